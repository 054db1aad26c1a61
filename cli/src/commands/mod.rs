mod balance;
mod parse;

use balance::run_balance;
use parse::run_parse;

use anyhow::Result;
use chembal::BalanceError;

use crate::cli::Command;

/// Exit status for input that cannot be parsed or configured.
pub const INPUT_ERROR: u8 = 2;

/// Exit status for every other failure, including equations without a solution.
pub const FAILURE: u8 = 1;

/// Rendered command output and the exit status it reports.
#[derive(Debug, PartialEq, Eq)]
pub struct Report {
    pub output: String,
    pub code: u8,
}

impl Report {
    pub fn success(output: String) -> Self {
        Self { output, code: 0 }
    }

    pub fn failure(output: String, err: &BalanceError) -> Self {
        Self {
            output,
            code: failure_code(err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

pub fn dispatch(command: Command) -> Result<Report> {
    match command {
        Command::Balance(args) => run_balance(&args),
        Command::Parse(args) => run_parse(&args),
    }
}

pub fn failure_code(err: &BalanceError) -> u8 {
    if err.is_input_error() {
        INPUT_ERROR
    } else {
        FAILURE
    }
}

/// Exit status of an error returned by `dispatch`
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<BalanceError>().map_or(FAILURE, failure_code)
}
