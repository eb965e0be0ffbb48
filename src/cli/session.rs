//! Line-by-line driver that feeds a reader into a [`Session`]

use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::{self, ParsingConfig, Session, SessionEvent, SessionTotals, QUIT_SENTINEL};
use crate::report::{display_session_totals, ExportSummary};
use crate::utils::{print_config, print_success, print_warning};

/// Feed every line of `input` into `session`, reporting each event through
/// `on_event`. End of input processes any buffered blob.
///
/// Errors reading `input` are returned as-is; parse and export problems are
/// events, not errors.
pub fn drive_session<R, F>(session: &mut Session, input: R, mut on_event: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(&Session, SessionEvent),
{
    for line in input.lines() {
        let line = line?;
        let event = pipeline::feed_line(session, &line);
        let terminated = matches!(event, SessionEvent::Terminated);
        on_event(&*session, event);
        if terminated {
            return Ok(());
        }
    }

    if let Some(event) = session.finish() {
        on_event(&*session, event);
    }
    Ok(())
}

/// Run an interactive session on standard input until the user quits.
pub fn run_interactive_session(config: &ParsingConfig, output_dir: &Path) -> Result<SessionTotals> {
    print_config(config);
    print_instructions();

    let mut session = pipeline::run_session(config, output_dir);
    let stdin = io::stdin();
    drive_session(&mut session, stdin.lock(), report_event)
        .context("Failed to read input from the terminal")?;

    display_session_totals(&config.name, session.totals());
    Ok(session.totals().clone())
}

fn print_instructions() {
    println!(
        "    Paste the data to process, then press {} twice to export it.",
        style("Enter").cyan().bold()
    );
    println!(
        "    Type {} on its own line to return to the main menu.",
        style(QUIT_SENTINEL).cyan().bold()
    );
    println!();
}

/// Console rendering of a session event
pub fn report_event(session: &Session, event: SessionEvent) {
    match event {
        SessionEvent::Continue | SessionEvent::Terminated => {}
        SessionEvent::Exported(report) => {
            ExportSummary::new(&session.config().name, &report).display();
            println!();
            print_success(&format!("Data exported to {}", report.artifact.path.display()));
            println!();
            println!(
                "    Ready for more data. Paste it below or type {} to return to the menu.",
                style(QUIT_SENTINEL).cyan().bold()
            );
            println!();
        }
        SessionEvent::ExportFailed(error) => {
            print_warning(&format!("Export failed: {}", error));
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn config() -> ParsingConfig {
        ParsingConfig::new("drive", "\n", ",", vec!["a".into(), "b".into()]).unwrap()
    }

    #[test]
    fn test_stops_reading_after_quit() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(config(), dir.path());
        let mut exports = 0;

        drive_session(
            &mut session,
            Cursor::new("1,2\n\n\nquit\n3,4\n\n\n"),
            |_, event| {
                if matches!(event, SessionEvent::Exported(_)) {
                    exports += 1;
                }
            },
        )
        .unwrap();

        assert_eq!(exports, 1);
        assert!(session.is_terminated());
    }

    #[test]
    fn test_end_of_input_flushes_buffered_blob() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(config(), dir.path());
        let mut exports = 0;

        drive_session(&mut session, Cursor::new("1,2\n3,4"), |_, event| {
            if matches!(event, SessionEvent::Exported(_)) {
                exports += 1;
            }
        })
        .unwrap();

        assert_eq!(exports, 1);
        assert_eq!(session.totals().accepted_rows, 2);
    }
}
