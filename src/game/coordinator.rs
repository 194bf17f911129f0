//! The tick coordinator: one driver thread plus one worker thread per ghost,
//! synchronized through a single mutex and two condition variables.
//!
//! Per-cycle ordering guarantee: Pac-Man's queued move for tick N is applied
//! and the tick id incremented *before* any ghost computes its step for tick
//! N, and the driver only resolves collisions and renders once all four
//! workers have stamped the tick. Cancellation is cooperative through the
//! stop flag, which every wait predicate observes.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace, warn};

use crate::constants::GHOST_COUNT;
use crate::error::{GameError, GameResult};
use crate::events::{InputEvent, InputSource, RenderSink};
use crate::game::{Outcome, SessionState};

/// The state shared between the driver and the four workers. One lock guards
/// everything; the condvars only signal, they carry no data.
struct Shared {
    state: Mutex<SessionState>,
    /// Driver -> workers: a new tick id is available.
    tick_ready: Condvar,
    /// Workers -> driver: the done-counter reached four.
    all_done: Condvar,
}

/// What a finished session reports back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: Outcome,
    pub score: u32,
    pub ticks: u64,
}

/// One game instance: owns the shared state and the fixed thread topology
/// for its lifetime.
pub struct Session {
    shared: Arc<Shared>,
    interval: Duration,
}

impl Session {
    pub fn new(state: SessionState, interval: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                tick_ready: Condvar::new(),
                all_done: Condvar::new(),
            }),
            interval,
        }
    }

    /// Runs the session to completion: spawns the four ghost workers, drives
    /// the tick loop on the calling thread, joins the workers and reports the
    /// outcome.
    ///
    /// The driver/worker topology is fixed and mandatory; failure to spawn
    /// any worker aborts startup with [`GameError::Startup`].
    pub fn run(&self, input: &mut dyn InputSource, render: &mut dyn RenderSink) -> GameResult<SessionReport> {
        let mut workers: Vec<JoinHandle<()>> = Vec::with_capacity(GHOST_COUNT);

        for idx in 0..GHOST_COUNT {
            let shared = Arc::clone(&self.shared);
            let role = {
                let state = self.shared.state.lock();
                format!("ghost-{}", state.ghosts[idx].kind.as_ref())
            };

            match thread::Builder::new().name(role.clone()).spawn(move || worker_loop(shared, idx)) {
                Ok(handle) => workers.push(handle),
                Err(source) => {
                    // Wake and drain whatever did start before giving up.
                    self.shared.state.lock().stop = true;
                    self.shared.tick_ready.notify_all();
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(GameError::Startup { role, source });
                }
            }
        }

        let result = self.drive(input, render);

        // Whatever drive returned, the workers may still be parked on the
        // condvar; raise the stop flag and wake them before joining.
        self.shared.state.lock().stop = true;
        self.shared.tick_ready.notify_all();

        for handle in workers {
            let _ = handle.join();
        }

        result
    }

    /// The driver loop. Runs on the calling thread, holding the lock only for
    /// the O(agents) critical section of each cycle.
    fn drive(&self, input: &mut dyn InputSource, render: &mut dyn RenderSink) -> GameResult<SessionReport> {
        debug!(interval = ?self.interval, "session driver started");

        loop {
            let cycle_start = Instant::now();

            // Drain pending input before taking the lock.
            let mut events: Vec<InputEvent> = Vec::new();
            while let Some(event) = input.poll()? {
                events.push(event);
                if event == InputEvent::Quit {
                    break;
                }
            }

            let (snapshot, report) = {
                let mut state = self.shared.state.lock();

                for event in events {
                    state.queue_event(event);
                }

                if state.stop {
                    let report = SessionReport {
                        outcome: state.outcome.take().unwrap_or(Outcome::Aborted),
                        score: state.pacman.score,
                        ticks: state.tick,
                    };
                    self.shared.tick_ready.notify_all();
                    return Ok(report);
                }

                // Pac-Man's move lands on the frame the ghosts are about to see.
                state.apply_pacman_move();
                state.done = 0;
                state.tick += 1;
                trace!(tick = state.tick, "tick published");
                self.shared.tick_ready.notify_all();

                // Barrier: every ghost steps exactly once before we resolve.
                while state.done < GHOST_COUNT && !state.stop {
                    self.shared.all_done.wait(&mut state);
                }

                super::collision::resolve(&mut state);

                let snapshot = state.snapshot();
                let report = state.stop.then(|| SessionReport {
                    outcome: state.outcome.take().unwrap_or(Outcome::Aborted),
                    score: state.pacman.score,
                    ticks: state.tick,
                });
                if report.is_some() {
                    self.shared.tick_ready.notify_all();
                }
                (snapshot, report)
            };

            // The lock is released; hand the frame to the render sink.
            render.draw(&snapshot)?;

            if let Some(report) = report {
                return Ok(report);
            }

            let elapsed = cycle_start.elapsed();
            if elapsed < self.interval {
                spin_sleep::sleep(self.interval - elapsed);
            } else if !self.interval.is_zero() {
                warn!(?elapsed, "cycle behind schedule");
            }
        }
    }

    /// Locks and hands out the session state. Intended for inspection after
    /// [`Session::run`] has returned and the workers are gone.
    pub fn state(&self) -> parking_lot::MutexGuard<'_, SessionState> {
        self.shared.state.lock()
    }
}

/// One ghost's worker loop: wait for an unprocessed tick, take exactly one
/// step, stamp the tick, bump the done-counter and signal the driver when the
/// barrier is full.
fn worker_loop(shared: Arc<Shared>, idx: usize) {
    let mut state = shared.state.lock();
    let kind = state.ghosts[idx].kind;
    trace!(ghost = kind.as_ref(), "worker started");

    loop {
        while !state.stop && state.ghosts[idx].last_tick >= state.tick {
            shared.tick_ready.wait(&mut state);
        }
        if state.stop {
            break;
        }

        let tick = state.tick;
        state.step_ghost(idx);
        state.ghosts[idx].last_tick = tick;

        state.done += 1;
        if state.done == GHOST_COUNT {
            shared.all_done.notify_one();
        }
    }

    trace!(ghost = kind.as_ref(), "worker stopped");
}
