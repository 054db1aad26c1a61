use std::fmt::Write;

use anyhow::{Context, Result};
use chembal::{element_label, is_known_element, Formula};
use log::warn;

use super::Report;
use crate::cli::ParseArgs;
use crate::config::build_config;

pub fn run_parse(args: &ParseArgs) -> Result<Report> {
    let config = build_config(&args.options)?;
    let formula = Formula::parse_with_depth(args.formula.trim(), config.max_nesting_depth)
        .context("Parsing failed")?;

    for symbol in formula.symbols().filter(|s| !is_known_element(s)) {
        warn!("'{}' is not an element of the periodic table", symbol);
    }

    if args.json {
        return Ok(Report::success(serde_json::to_string_pretty(&formula)?));
    }

    let labels = formula.symbols().map(element_label).collect::<Vec<_>>();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut output = format!("{} = {}\n", args.formula.trim(), formula);
    for (label, (_, count)) in labels.iter().zip(formula.iter()) {
        writeln!(output, "  {:<width$}  {}", label, count, width = width)?;
    }
    Ok(Report::success(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn run(argv: &[&str]) -> Result<Report> {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Parse(args) => run_parse(&args),
            Command::Balance(_) => panic!("expected parse"),
        }
    }

    #[test]
    fn lists_counts() {
        let report = run(&["chembal", "parse", "Ca(OH)2"]).unwrap();
        assert_eq!(
            report.output,
            "Ca(OH)2 = CaH2O2\n  Ca (Calcium)  1\n  H (Hydrogen)  2\n  O (Oxygen)    2\n"
        );
    }

    #[test]
    fn json_counts() {
        let report = run(&["chembal", "parse", "K4[Fe(CN)6]", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report.output).unwrap();
        assert_eq!(value, serde_json::json!({"C": 6, "Fe": 1, "K": 4, "N": 6}));
    }

    #[test]
    fn malformed_formula() {
        let err = run(&["chembal", "parse", "Ca(OH"]).unwrap_err();
        assert_eq!(err.to_string(), "Parsing failed");
        assert!(format!("{:#}", err).contains("missing closing ')'"));
    }
}
