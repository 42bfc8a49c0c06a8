use bigcalc::Session;
use crate::terminal::{execute_line, script_lines, LineStatus};
use log::LevelFilter;
use std::fs;
use std::process::ExitCode;
use std::sync::Once;

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) trace: bool,
    pub(crate) norc: bool,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => {
                cli.trace = true;
            }
            "--norc" => {
                cli.norc = true;
            }
            "-c" => {
                // Everything after -c is the line to run
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if !path.starts_with('-') {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    cli
}

/// Initialize logging once; `RUST_LOG` applies unless `--trace` forces debug
pub(crate) fn init_logger(trace: bool) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(LevelFilter::Warn);
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        if trace {
            builder.filter_module("bigcalc", LevelFilter::Debug);
        }
        builder.format_timestamp(None).try_init().ok();
    });
}

pub(crate) fn print_help() {
    println!(
        r#"bigcalc-{} - arbitrary-precision integer calculator

USAGE:
    bigcalc                 Start interactive REPL
    bigcalc -c <line>       Execute a single line
    bigcalc <script>        Execute a file line by line
    bigcalc --trace         Log normalization, flattening and postfix steps
    bigcalc --norc          Do not load the rc file
    bigcalc --help          Show this help message
    bigcalc --version       Show version

STARTUP:
    ~/.bigcalcrc            Executed on REPL startup (if exists)
    BIGCALC_RC=<path>       Use another rc file
    BIGCALC_BANNER=1        Show startup banner (quiet by default)
    RUST_LOG=<filter>       Log filter (default: warn)

INPUT:
    1 + 2 * (3 - 4)         Expression: + - * / ^ and parentheses
    name = expression       Assign the value (names are letters only)
    name                    Print a variable
    /help /vars /exit       Meta-commands"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("bigcalc {}", VERSION);
}

/// Execute a single line, errors go to stderr
pub(crate) fn execute_command(line: &str) -> ExitCode {
    let mut session = Session::new();

    match execute_line(&mut session, line, true) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute a script file in one session, stopping at the first error
pub(crate) fn execute_script(path: &str) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new();

    for (line_num, line) in script_lines(&content) {
        match execute_line(&mut session, line, true) {
            Ok(LineStatus::Continue) => {}
            Ok(LineStatus::Exit) => break,
            Err(e) => {
                eprintln!("Error at line {}: {}", line_num, e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
