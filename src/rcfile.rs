use bigcalc::Session;
use crate::terminal::{execute_line, script_lines, LineStatus};
use log::{debug, warn};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Get home directory
pub(crate) fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// Startup file: $BIGCALC_RC, else ~/.bigcalcrc
pub(crate) fn rc_path() -> Option<PathBuf> {
    env::var_os("BIGCALC_RC")
        .map(PathBuf::from)
        .or_else(|| dirs_home().map(|h| h.join(".bigcalcrc")))
}

/// History file for the REPL
pub(crate) fn history_path() -> Option<PathBuf> {
    dirs_home().map(|h| h.join(".bigcalc_history"))
}

/// Load and execute the rc file if it exists
pub(crate) fn load_bigcalcrc(session: &mut Session) {
    let path = match rc_path() {
        Some(p) => p,
        None => return,
    };

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return,
    };

    debug!("loading {}", path.display());
    load_rc_content(session, &content, &path.display().to_string());
}

/// Run rc lines silently; bad lines are reported and skipped
pub(crate) fn load_rc_content(session: &mut Session, content: &str, source: &str) {
    for (line_num, line) in script_lines(content) {
        match execute_line(session, line, false) {
            Ok(LineStatus::Exit) => break,
            Ok(LineStatus::Continue) => {}
            Err(e) => warn!("{} line {}: {}", source, line_num, e),
        }
    }
}
