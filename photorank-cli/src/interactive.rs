//! The interactive comparison loop.
//!
//! One pending pair at a time: print both file names, read a command,
//! drive the session. The engine is mutated only from this loop, so
//! every operation runs to completion before the next prompt.

use std::io::{self, BufRead, Write};
use std::path::Path;

use photorank_core::{SessionState, Side};

use crate::files;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// User asked to save and quit; no export yet.
    SaveAndQuit,
    /// User ended early, or every pair was presented. Export follows.
    Finished,
}

const HELP: &str = "\
  l   left is better        r   right is better
  xl  reject left image     xr  reject right image
  s   save and quit         e   end now and export";

/// Run comparisons until exhaustion or a quit command.
///
/// Before each prompt the rejection directory is rescanned, so images
/// dropped there out-of-band (e.g. from a file manager) leave the
/// session without a restart.
pub fn run(
    session: &mut SessionState,
    folder: &Path,
    rejected_dir: &Path,
    verbose: bool,
) -> io::Result<Outcome> {
    let mut rng = rand::rng();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let externally_rejected = files::scan_rejected(rejected_dir)?;
        let dropped = session.exclude_externally_rejected(&externally_rejected);
        if verbose && !dropped.is_empty() {
            eprintln!("Excluded {} externally rejected image(s)", dropped.len());
        }

        let pair = match session.schedule(&mut rng) {
            Ok(Some(pair)) => pair,
            Ok(None) => {
                println!("All comparisons complete or not enough images left to compare.");
                return Ok(Outcome::Finished);
            }
            Err(e) => return Err(io::Error::other(e)),
        };

        let progress = session.progress();
        println!(
            "\nComparison {} of {}",
            progress.completed + 1,
            progress.total_possible,
        );
        println!("  left:  {}", pair.0);
        println!("  right: {}", pair.1);
        print!("[l/r/xl/xr/s/e] > ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            // stdin closed: treat like save-and-quit so nothing is lost.
            None => return Ok(Outcome::SaveAndQuit),
        };

        match line.trim() {
            "l" => {
                act(session.decide(Side::Left))?;
            }
            "r" => {
                act(session.decide(Side::Right))?;
            }
            "xl" => reject(session, Side::Left, folder, rejected_dir, verbose)?,
            "xr" => reject(session, Side::Right, folder, rejected_dir, verbose)?,
            "s" => return Ok(Outcome::SaveAndQuit),
            "e" => return Ok(Outcome::Finished),
            "" => {}
            other => {
                println!("Unknown command {other:?}.\n{HELP}");
            }
        }
    }
}

fn act<T>(result: Result<T, photorank_core::EngineError>) -> io::Result<T> {
    result.map_err(io::Error::other)
}

fn reject(
    session: &mut SessionState,
    side: Side,
    folder: &Path,
    rejected_dir: &Path,
    verbose: bool,
) -> io::Result<()> {
    let rejection = act(session.reject(side))?;
    files::move_to_rejected(folder, rejected_dir, &rejection.removed)?;
    if verbose {
        eprintln!("Rejected {}", rejection.removed);
    }
    Ok(())
}
