//! Session controller - repeated parse and export cycles for one configuration
//!
//! The controller is a state machine fed one input line at a time, so it can
//! be driven by a terminal, a file, or a test without any blocking I/O.
//!
//! - `AwaitingInput`: lines accumulate into a blob. The quit sentinel ends the
//!   session. Two consecutive empty lines close the blob.
//! - `HasBlob`: the blob is parsed and exported, then the controller returns to
//!   `AwaitingInput`.
//! - `Terminated`: no further lines are processed.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::config::ParsingConfig;
use super::exporter::{self, ExportArtifact};
use super::parser::{self, RejectedRow};
use crate::error::SplitError;

/// Line that ends a session, compared case-insensitively after trimming
pub const QUIT_SENTINEL: &str = "quit";

/// Where the controller is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    HasBlob,
    Terminated,
}

/// Outcome of one successful parse and export
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub artifact: ExportArtifact,
    pub accepted: usize,
    pub rejected: Vec<RejectedRow>,
}

/// What happened in response to a line
#[derive(Debug)]
pub enum SessionEvent {
    /// The line was buffered, or an empty blob was discarded
    Continue,
    /// A blob was parsed and written to disk
    Exported(SessionReport),
    /// A blob could not be exported; the session keeps going
    ExportFailed(SplitError),
    /// The session has ended
    Terminated,
}

/// Running totals across every blob in a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTotals {
    pub exports: usize,
    pub failures: usize,
    pub accepted_rows: usize,
    pub rejected_rows: usize,
}

/// Drives parse and export cycles for a single configuration
#[derive(Debug)]
pub struct Session {
    config: ParsingConfig,
    output_dir: PathBuf,
    state: SessionState,
    lines: Vec<String>,
    /// Empty lines seen since the last non-empty line
    pending_blanks: usize,
    totals: SessionTotals,
}

impl Session {
    pub fn new(config: ParsingConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
            state: SessionState::AwaitingInput,
            lines: Vec::new(),
            pending_blanks: 0,
            totals: SessionTotals::default(),
        }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn totals(&self) -> &SessionTotals {
        &self.totals
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Deliver one line of input (without its trailing newline).
    pub fn feed_line(&mut self, line: &str) -> SessionEvent {
        if self.is_terminated() {
            return SessionEvent::Terminated;
        }

        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().eq_ignore_ascii_case(QUIT_SENTINEL) {
            if !self.lines.is_empty() {
                debug!(lines = self.lines.len(), "discarding unfinished blob on quit");
            }
            self.terminate();
            return SessionEvent::Terminated;
        }

        if !line.is_empty() {
            // A lone empty line inside a blob belongs to the blob
            if !self.lines.is_empty() {
                self.lines
                    .extend(std::iter::repeat(String::new()).take(self.pending_blanks));
            }
            self.pending_blanks = 0;
            self.lines.push(line.to_string());
            return SessionEvent::Continue;
        }

        self.pending_blanks += 1;
        if self.pending_blanks < 2 {
            return SessionEvent::Continue;
        }

        self.pending_blanks = 0;
        if self.lines.is_empty() {
            return SessionEvent::Continue;
        }
        self.process_blob()
    }

    /// Signal end of input. A buffered blob is processed before the session
    /// terminates; `None` means there was nothing left to process.
    pub fn finish(&mut self) -> Option<SessionEvent> {
        if self.is_terminated() {
            return None;
        }
        let event = if self.lines.is_empty() {
            None
        } else {
            Some(self.process_blob())
        };
        self.terminate();
        event
    }

    fn terminate(&mut self) {
        self.lines.clear();
        self.pending_blanks = 0;
        self.state = SessionState::Terminated;
    }

    fn process_blob(&mut self) -> SessionEvent {
        self.state = SessionState::HasBlob;
        let blob = std::mem::take(&mut self.lines).join("\n");

        let table = parser::parse(&blob, &self.config);
        let event = match exporter::export(&table, &self.config.name, &self.output_dir) {
            Ok(artifact) => {
                self.totals.exports += 1;
                self.totals.accepted_rows += table.accepted_count();
                self.totals.rejected_rows += table.rejected_count();
                SessionEvent::Exported(SessionReport {
                    artifact,
                    accepted: table.accepted_count(),
                    rejected: table.rejected,
                })
            }
            Err(e) => {
                warn!(config = %self.config.name, error = %e, "export failed");
                self.totals.failures += 1;
                SessionEvent::ExportFailed(e)
            }
        };

        self.state = SessionState::AwaitingInput;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session {
        let config = ParsingConfig::new(
            "unit",
            "\n",
            ",",
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();
        Session::new(config, dir.path())
    }

    #[test]
    fn test_single_blank_line_does_not_close_blob() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);

        assert!(matches!(s.feed_line("1,2"), SessionEvent::Continue));
        assert!(matches!(s.feed_line(""), SessionEvent::Continue));
        assert_eq!(s.state(), SessionState::AwaitingInput);
        assert_eq!(s.lines, vec!["1,2".to_string()]);
    }

    #[test]
    fn test_interior_blank_line_is_kept() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);

        s.feed_line("1,2");
        s.feed_line("");
        s.feed_line("3,4");
        assert_eq!(
            s.lines,
            vec!["1,2".to_string(), String::new(), "3,4".to_string()]
        );
    }

    #[test]
    fn test_leading_blank_lines_are_dropped() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);

        s.feed_line("");
        s.feed_line("1,2");
        assert_eq!(s.lines, vec!["1,2".to_string()]);
    }

    #[test]
    fn test_carriage_return_is_stripped() {
        let dir = TempDir::new().unwrap();
        let mut s = session(&dir);

        s.feed_line("1,2\r");
        assert_eq!(s.lines, vec!["1,2".to_string()]);
    }
}
