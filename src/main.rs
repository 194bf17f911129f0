use std::path::Path;

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use chomper::constants::{Tunables, RAW_BOARD};
use chomper::game::coordinator::Session;
use chomper::game::{Outcome, SessionState};
use chomper::scores::{self, ScoreEntry};
use chomper::terminal::{self, TerminalGuard, TerminalInput, TerminalRenderer};

const SCORE_LOG: &str = "scores.txt";

fn main() -> anyhow::Result<()> {
    // Logging goes to stderr and is off by default; the board owns the screen.
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)?;

    let _guard = TerminalGuard::new()?;

    loop {
        let Some(mode) = terminal::select_mode()? else {
            break;
        };

        let state = SessionState::new(&RAW_BOARD, Tunables::default(), &mode)?;
        let session = Session::new(state, mode.tick_interval);

        let mut input = TerminalInput;
        let mut renderer = TerminalRenderer::new();
        let report = session.run(&mut input, &mut renderer)?;

        let headline = match report.outcome {
            Outcome::Win => "You cleared the maze!",
            Outcome::Loss => "Caught. Game over.",
            Outcome::Aborted => "Session aborted.",
        };

        if report.outcome == Outcome::Aborted {
            continue;
        }

        let initials = terminal::read_initials(&format!("{headline} Enter initials:"))?;
        let entries = scores::append_and_rewrite(Path::new(SCORE_LOG), ScoreEntry::new(initials, report.score))?;

        let best = entries.iter().map(|e| e.score).max().unwrap_or(0);
        terminal::show_banner(&[
            headline.to_string(),
            format!("Score: {}  (best on record: {best})", report.score),
            format!("Ticks: {}", report.ticks),
            String::new(),
            "Press any key for the menu.".to_string(),
        ])?;
    }

    Ok(())
}
