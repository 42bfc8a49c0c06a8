//! bigcalc - interactive arbitrary-precision integer calculator
//!
//! Usage:
//!   bigcalc              Start interactive REPL
//!   bigcalc -c "line"    Execute a single line
//!   bigcalc script.txt   Execute a file line by line

mod cli;
mod rcfile;
mod repl;
mod terminal;

use std::env;
use std::process::ExitCode;

use cli::{execute_command, execute_script, init_logger, parse_args, print_help, print_version};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = parse_args(&args);

    init_logger(cli.trace);

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    if let Some(line) = cli.command {
        return execute_command(&line);
    }

    if let Some(script) = cli.script {
        return execute_script(&script);
    }

    match repl::run_repl(!cli.norc) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("REPL error: {}", e);
            ExitCode::FAILURE
        }
    }
}
