use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chembal",
    about = "Balance chemical equations with exact arithmetic",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable logging entirely
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Balance an equation
    #[command(visible_alias = "b")]
    Balance(BalanceArgs),

    /// Print the element counts of a single formula
    #[command(visible_alias = "p")]
    Parse(ParseArgs),
}

#[derive(Args)]
pub struct BalanceArgs {
    /// Equation on one line, e.g. "H2 + O2 -> H2O"
    #[arg(
        value_name = "EQUATION",
        conflicts_with_all = ["reactants", "products"],
        required_unless_present_all = ["reactants", "products"]
    )]
    pub equation: Option<String>,

    /// Reactant side, e.g. "H2 + O2"
    #[arg(short, long, value_name = "TEXT", requires = "products")]
    pub reactants: Option<String>,

    /// Product side, e.g. "H2O"
    #[arg(short, long, value_name = "TEXT", requires = "reactants")]
    pub products: Option<String>,

    /// Also print the per-element table
    #[arg(short, long)]
    pub table: bool,

    /// Print the result (or the error) as JSON
    #[arg(short, long, conflicts_with = "table")]
    pub json: bool,

    #[command(flatten)]
    pub options: ParserOptions,
}

#[derive(Args)]
pub struct ParseArgs {
    /// Formula such as "Ca(OH)2"
    #[arg(value_name = "FORMULA")]
    pub formula: String,

    /// Print the counts as JSON
    #[arg(short, long)]
    pub json: bool,

    #[command(flatten)]
    pub options: ParserOptions,
}

/// Options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Parser Options")]
pub struct ParserOptions {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Deepest allowed group nesting (overrides the config file)
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Render "->" instead of "→" between the sides
    #[arg(long)]
    pub ascii: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
