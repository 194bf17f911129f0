//! The crossterm front end: raw-mode guard, non-blocking input source, grid
//! renderer and the mode-selection menu.
//!
//! Everything here sits outside the simulation core; the core only sees the
//! [`InputSource`] and [`RenderSink`] traits.

use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use tracing::debug;

use crate::constants::DEFAULT_TICK_INTERVAL;
use crate::entity::{Direction, GhostKind};
use crate::error::GameResult;
use crate::events::{InputEvent, InputSource, RenderSink};
use crate::game::{ModeConfig, Snapshot};

/// Puts the terminal into raw mode on an alternate screen and restores it on
/// drop, so a panic can't leave the shell unusable.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> GameResult<Self> {
        terminal::enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?.execute(Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = stdout().execute(Show);
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Non-blocking keyboard input: arrows steer Pac-Man, WASD steers the
/// human-controlled ghost, `q`/Esc quits.
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self) -> GameResult<Option<InputEvent>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }

        let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
            return Ok(None);
        };
        if kind != KeyEventKind::Press {
            return Ok(None);
        }

        Ok(match code {
            KeyCode::Up => Some(InputEvent::Turn(Direction::Up)),
            KeyCode::Down => Some(InputEvent::Turn(Direction::Down)),
            KeyCode::Left => Some(InputEvent::Turn(Direction::Left)),
            KeyCode::Right => Some(InputEvent::Turn(Direction::Right)),
            KeyCode::Char('w') => Some(InputEvent::GhostTurn(Direction::Up)),
            KeyCode::Char('s') => Some(InputEvent::GhostTurn(Direction::Down)),
            KeyCode::Char('a') => Some(InputEvent::GhostTurn(Direction::Left)),
            KeyCode::Char('d') => Some(InputEvent::GhostTurn(Direction::Right)),
            KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
            _ => None,
        })
    }
}

fn ghost_color(kind: GhostKind) -> Color {
    match kind {
        GhostKind::Chaser => Color::Red,
        GhostKind::Ambusher => Color::Magenta,
        GhostKind::Flanker => Color::Cyan,
        GhostKind::Timid => Color::DarkYellow,
    }
}

/// Draws each snapshot to the terminal.
pub struct TerminalRenderer {
    stdout: Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { stdout: stdout() }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for TerminalRenderer {
    fn draw(&mut self, snapshot: &Snapshot) -> GameResult<()> {
        use crate::map::Cell;

        self.stdout.queue(MoveTo(0, 0))?;

        for row in &snapshot.grid {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Wall => '#',
                    Cell::Token => '.',
                    Cell::Power => 'o',
                    Cell::Door => '=',
                    Cell::Empty => ' ',
                })
                .collect();
            self.stdout.queue(Print(line))?.queue(Print("\r\n"))?;
        }

        for (kind, pos, _in_house) in &snapshot.ghosts {
            let color = if snapshot.frightened { Color::Blue } else { ghost_color(*kind) };
            let letter = kind.as_ref().chars().next().unwrap_or('g').to_ascii_uppercase();
            self.stdout
                .queue(MoveTo(pos.x as u16, pos.y as u16))?
                .queue(SetForegroundColor(color))?
                .queue(Print(letter))?
                .queue(ResetColor)?;
        }

        self.stdout
            .queue(MoveTo(snapshot.pacman.x as u16, snapshot.pacman.y as u16))?
            .queue(SetForegroundColor(Color::Yellow))?
            .queue(Print('C'))?
            .queue(ResetColor)?;

        let status = format!(
            "score {:>6}  lives {}  tokens {:>3}  {}",
            snapshot.score,
            snapshot.lives,
            snapshot.remaining_tokens,
            if snapshot.frightened { "POWER" } else { "     " },
        );
        self.stdout
            .queue(MoveTo(0, snapshot.grid.len() as u16))?
            .queue(Clear(ClearType::CurrentLine))?
            .queue(Print(status))?;

        self.stdout.flush()?;
        Ok(())
    }
}

const SPEEDS: [(&str, Duration); 3] = [
    ("normal", DEFAULT_TICK_INTERVAL),
    ("fast", Duration::from_millis(80)),
    ("slow", Duration::from_millis(160)),
];

/// Runs the mode-selection menu. Returns `None` when the player quits.
///
/// Navigation follows the original menu: arrow keys or number keys, Enter to
/// confirm, the speed row cycles through its options.
pub fn select_mode() -> GameResult<Option<ModeConfig>> {
    let mut selected = 0usize;
    let mut speed = 0usize;
    let mut out = stdout();

    loop {
        let items = [
            "1. Classic game".to_string(),
            "2. Ghost duel (WASD drives the chaser)".to_string(),
            format!("3. Speed: {}", SPEEDS[speed].0),
            "4. Quit".to_string(),
        ];

        out.queue(Clear(ClearType::All))?.queue(MoveTo(4, 2))?.queue(Print("C H O M P E R"))?;
        for (i, item) in items.iter().enumerate() {
            let marker = if i == selected { "> " } else { "  " };
            out.queue(MoveTo(4, 4 + i as u16))?.queue(Print(format!("{marker}{item}")))?;
        }
        out.flush()?;

        let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }

        match code {
            KeyCode::Up => selected = selected.checked_sub(1).unwrap_or(items.len() - 1),
            KeyCode::Down => selected = (selected + 1) % items.len(),
            KeyCode::Char(c @ '1'..='4') => {
                selected = c as usize - '1' as usize;
                if let Some(mode) = confirm(selected, &mut speed) {
                    return Ok(mode);
                }
            }
            KeyCode::Enter => {
                if let Some(mode) = confirm(selected, &mut speed) {
                    return Ok(mode);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
            _ => {}
        }
    }
}

/// Resolves a confirmed menu row; `None` means stay in the menu (the speed
/// row only cycles).
fn confirm(selected: usize, speed: &mut usize) -> Option<Option<ModeConfig>> {
    match selected {
        0 => Some(Some(ModeConfig {
            tick_interval: SPEEDS[*speed].1,
            human_ghost: false,
        })),
        1 => Some(Some(ModeConfig {
            tick_interval: SPEEDS[*speed].1,
            human_ghost: true,
        })),
        2 => {
            *speed = (*speed + 1) % SPEEDS.len();
            None
        }
        _ => Some(None),
    }
}

/// Blocks until the player types up to three initials and presses Enter.
pub fn read_initials(prompt: &str) -> GameResult<String> {
    let mut out = stdout();
    let mut initials = String::new();

    loop {
        out.queue(MoveTo(4, 2))?
            .queue(Clear(ClearType::CurrentLine))?
            .queue(Print(format!("{prompt} {initials}_")))?;
        out.flush()?;

        let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }

        match code {
            KeyCode::Char(c) if c.is_ascii_alphanumeric() && initials.len() < 3 => {
                initials.push(c.to_ascii_uppercase());
            }
            KeyCode::Backspace => {
                initials.pop();
            }
            KeyCode::Enter if !initials.is_empty() => break,
            _ => {}
        }
    }

    debug!(initials = %initials, "initials entered");
    Ok(initials)
}

/// Shows the end-of-session banner until any key is pressed.
pub fn show_banner(lines: &[String]) -> GameResult<()> {
    let mut out = stdout();
    out.queue(Clear(ClearType::All))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(MoveTo(4, 2 + i as u16))?.queue(Print(line))?;
    }
    out.flush()?;

    loop {
        if let Event::Key(KeyEvent { kind: KeyEventKind::Press, .. }) = event::read()? {
            return Ok(());
        }
    }
}
