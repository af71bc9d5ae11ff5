//! `spinup` binary: parse arguments, set up logging and run a subcommand.
use std::process::ExitCode;

use clap::Parser;

use spinup_cli::{cli, commands, logging, render::Style};

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = args.command_or_default();
    let style = Style::detect(args.global.no_color);

    let console = if command.writes_json() {
        logging::ConsoleTarget::Stderr
    } else {
        logging::ConsoleTarget::Split
    };
    logging::init_subscriber(args.verbose, command.name(), style.color, console);
    let log = logging::Logger::new(command.name());

    match commands::dispatch(&args.global, &command, &log, style) {
        Ok(outcome) => {
            log.debug(&format!("finished with {outcome:?}"));
            outcome.into()
        }
        Err(e) => {
            log.debug(&format!("fatal: {e:?}"));
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
