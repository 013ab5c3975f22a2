//! Parse-failure diagnostic artifacts
//!
//! When the repair cascade gives up, the raw model output and the final
//! repair attempt are dumped to a timestamped file so the failure can be
//! inspected later. The write is best-effort and non-contractual: callers
//! log a failure and move on.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

/// Write a parse-failure artifact and return its path
pub fn write_parse_failure(
    directory: &str,
    raw_output: &str,
    best_attempt: &str,
) -> std::io::Result<PathBuf> {
    let dir = expand_home(directory);
    fs::create_dir_all(&dir)?;

    let filename = format!(
        "itinerary_parse_failure_{}.txt",
        Utc::now().format("%Y%m%d_%H%M%S%3f")
    );
    let path = dir.join(filename);

    let mut contents = String::with_capacity(raw_output.len() + best_attempt.len() + 128);
    contents.push_str("=== RAW MODEL OUTPUT ===\n");
    contents.push_str(raw_output);
    contents.push_str("\n\n=== FINAL REPAIR ATTEMPT ===\n");
    contents.push_str(best_attempt);
    contents.push('\n');

    fs::write(&path, contents)?;
    Ok(path)
}

/// Expand a leading `~/` against `$HOME`; other paths pass through
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return Path::new(&home).join(rest);
        }
    }
    PathBuf::from(path)
}
