//! The append-then-recompute score log.
//!
//! One `INITIALS,SCORE` line per finished session, followed by a trailer:
//! `---`, `MAX,<n>`, `MIN,<n>`. Appending rescans every prior data line and
//! rewrites the trailer. Lines that do not match the pattern, and the trailer
//! lines themselves, are skipped during the rescan rather than treated as
//! errors.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ScoreError;

/// The separator between data lines and the recomputed trailer.
pub const TRAILER_MARK: &str = "---";

/// One score record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub initials: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(initials: impl Into<String>, score: u32) -> Self {
        Self {
            initials: initials.into(),
            score,
        }
    }
}

/// Parses one line as a `NAME,INTEGER` record. Trailer markers and anything
/// malformed yield `None`.
fn parse_line(line: &str) -> Option<ScoreEntry> {
    let line = line.trim_end();
    if line.is_empty() || line == TRAILER_MARK {
        return None;
    }

    let (name, value) = line.split_once(',')?;
    if name.is_empty() || name == "MAX" || name == "MIN" {
        return None;
    }

    let score = value.parse::<u32>().ok()?;
    Some(ScoreEntry::new(name, score))
}

/// Extracts every valid data record from a log body, skipping the trailer and
/// any malformed lines.
pub fn parse_entries(text: &str) -> Vec<ScoreEntry> {
    text.lines().filter_map(parse_line).collect()
}

/// Renders the full log body: data lines, then the recomputed trailer.
pub fn render_log(entries: &[ScoreEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{},{}", entry.initials, entry.score);
    }

    if !entries.is_empty() {
        let max = entries.iter().map(|e| e.score).max().unwrap_or(0);
        let min = entries.iter().map(|e| e.score).min().unwrap_or(0);
        let _ = writeln!(out, "{TRAILER_MARK}");
        let _ = writeln!(out, "MAX,{max}");
        let _ = writeln!(out, "MIN,{min}");
    }

    out
}

/// Appends one record to the log file and rewrites the recomputed trailer.
///
/// A missing file counts as an empty log. Returns the full record list after
/// the append.
pub fn append_and_rewrite(path: &Path, entry: ScoreEntry) -> Result<Vec<ScoreEntry>, ScoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };

    let mut entries = parse_entries(&text);
    entries.push(entry);
    fs::write(path, render_log(&entries))?;

    debug!(path = %path.display(), records = entries.len(), "score log rewritten");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_line_accepts_records() {
        assert_eq!(parse_line("AAA,100"), Some(ScoreEntry::new("AAA", 100)));
        assert_eq!(parse_line("zz,7"), Some(ScoreEntry::new("zz", 7)));
    }

    #[test]
    fn test_parse_line_skips_trailer_and_garbage() {
        assert_eq!(parse_line("---"), None);
        assert_eq!(parse_line("MAX,100"), None);
        assert_eq!(parse_line("MIN,50"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("no comma here"), None);
        assert_eq!(parse_line("AAA,notanumber"), None);
        assert_eq!(parse_line(",5"), None);
    }

    #[test]
    fn test_roundtrip_recomputes_trailer() {
        let body = render_log(&[ScoreEntry::new("AAA", 100), ScoreEntry::new("BBB", 50)]);

        let mut entries = parse_entries(&body);
        entries.push(ScoreEntry::new("CCC", 75));
        let rewritten = render_log(&entries);

        assert_eq!(rewritten, "AAA,100\nBBB,50\nCCC,75\n---\nMAX,100\nMIN,50\n");
    }

    #[test]
    fn test_malformed_lines_survive_rescan_silently() {
        let body = "AAA,100\n???\nBBB,50\n---\nMAX,999\nMIN,1\n";
        let entries = parse_entries(body);
        assert_eq!(entries, vec![ScoreEntry::new("AAA", 100), ScoreEntry::new("BBB", 50)]);
    }

    #[test]
    fn test_append_and_rewrite_file() {
        let path = std::env::temp_dir().join(format!("chomper-scores-{}.txt", std::process::id()));
        let _ = fs::remove_file(&path);

        append_and_rewrite(&path, ScoreEntry::new("AAA", 100)).unwrap();
        append_and_rewrite(&path, ScoreEntry::new("BBB", 50)).unwrap();
        let entries = append_and_rewrite(&path, ScoreEntry::new("CCC", 75)).unwrap();

        assert_eq!(entries.len(), 3);
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "AAA,100\nBBB,50\nCCC,75\n---\nMAX,100\nMIN,50\n");

        let _ = fs::remove_file(&path);
    }
}
