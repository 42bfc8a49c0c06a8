use bigcalc::{Command, Session};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper, Result as RlResult};
use std::borrow::Cow;
use std::env;

use crate::cli::VERSION;
use crate::rcfile::{history_path, load_bigcalcrc};
use crate::terminal::{execute_line, LineStatus};

const PROMPT: &str = "> ";

/// Completes meta-commands and known variable names
struct CalcHelper {
    variables: Vec<String>,
}

impl Helper for CalcHelper {}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Commands only make sense as the whole line
        if line[..pos].starts_with('/') {
            let prefix = &line[..pos];
            let candidates = Command::ALL
                .iter()
                .filter(|(name, _)| name.starts_with(prefix))
                .map(|(name, _)| Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                })
                .collect();
            return Ok((0, candidates));
        }

        // Otherwise complete the variable name under the cursor
        let start = line[..pos]
            .rfind(|c: char| !c.is_ascii_alphabetic())
            .map(|i| i + 1)
            .unwrap_or(0);
        let prefix = &line[start..pos];
        if prefix.is_empty() {
            return Ok((pos, Vec::new()));
        }

        let candidates = self
            .variables
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CalcHelper {
    type Hint = String;
}

impl Highlighter for CalcHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
        false
    }
}

impl Validator for CalcHelper {}

/// Run the interactive loop until /exit or Ctrl-D
pub(crate) fn run_repl(load_rc: bool) -> RlResult<()> {
    let mut rl: Editor<CalcHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CalcHelper {
        variables: Vec::new(),
    }));

    let mut session = Session::new();

    if load_rc {
        load_bigcalcrc(&mut session);
    }

    // Try to load history
    let history = history_path();
    if let Some(ref path) = history {
        let _ = rl.load_history(path);
    }

    // Show banner only if BIGCALC_BANNER is set
    if env::var("BIGCALC_BANNER").is_ok() {
        println!("bigcalc-{} - arbitrary-precision integer calculator", VERSION);
        println!("  Type /help for usage, /exit or Ctrl-D to quit");
    }

    loop {
        // Keep completion in sync with assignments
        if let Some(helper) = rl.helper_mut() {
            helper.variables = session.variables().names().map(String::from).collect();
        }

        match rl.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match execute_line(&mut session, trimmed, true) {
                    Ok(LineStatus::Exit) => break,
                    Ok(LineStatus::Continue) => {}
                    // Errors are the answer to this line; the session goes on
                    Err(e) => println!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C - drop the line, continue
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D - exit
                println!("Bye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history {
        let _ = rl.save_history(path);
    }

    Ok(())
}
