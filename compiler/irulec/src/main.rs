//! `irule`: F5 iRule validator CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use irulec::commands::{check_file, run_repl};
use irulec::options::USAGE;
use irulec::tracing_setup::init_tracing;
use irulec::{CliOptions, Command, VERSION};

fn main() -> ExitCode {
    let (command, options) = match CliOptions::parse(std::env::args().skip(1)) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(options.debug);

    match command {
        Command::Help => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("{VERSION}");
            ExitCode::SUCCESS
        }
        Command::Check(path) => match check_file(&path, &options) {
            Ok(outcome) => ExitCode::from(outcome.exit_code()),
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        Command::Repl => {
            let stdout = io::stdout();
            let is_tty = stdout.is_terminal();
            let result = run_repl(io::stdin().lock(), &mut stdout.lock(), &options, is_tty);
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
