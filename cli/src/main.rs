use std::process::ExitCode;

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

mod cli;
mod commands;
mod config;

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match commands::dispatch(cli.command) {
        Ok(report) => {
            print!("{}", report.output);
            if !report.output.ends_with('\n') {
                println!();
            }
            ExitCode::from(report.code)
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(commands::exit_code(&e))
        }
    }
}

fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    // a logger can only be installed once per process
    let _ = TermLogger::init(
        log_level(verbose, quiet),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}
