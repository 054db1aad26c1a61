use anyhow::{bail, Context, Result};
use chembal::{BalanceConfig, BalanceError, Equation};
use log::info;
use serde_json::json;

use super::Report;
use crate::cli::BalanceArgs;
use crate::config::build_config;

enum Input<'a> {
    Line(&'a str),
    Sides(&'a str, &'a str),
}

pub fn run_balance(args: &BalanceArgs) -> Result<Report> {
    let config = build_config(&args.options)?;
    let input = resolve_input(args)?;

    match (solve(&input, &config), args.json) {
        (Ok(equation), true) => {
            let balanced = equation.balanced().context("Equation was not solved")?;
            Ok(Report::success(serde_json::to_string_pretty(&balanced)?))
        }
        (Err(err), true) => Ok(Report::failure(error_json(&err)?, &err)),
        (Ok(equation), false) => {
            let mut output = equation.solution_str().context("Equation was not solved")?;
            output.push('\n');
            if args.table {
                if let Some(table) = equation.element_table() {
                    output.push_str(&table.to_string());
                }
            }
            Ok(Report::success(output))
        }
        (Err(err), false) => {
            let context = if err.is_input_error() {
                "Invalid input"
            } else {
                "Balancing failed"
            };
            Err(err).context(context)
        }
    }
}

fn resolve_input(args: &BalanceArgs) -> Result<Input<'_>> {
    match (&args.equation, &args.reactants, &args.products) {
        (Some(line), None, None) => Ok(Input::Line(line)),
        (None, Some(reactants), Some(products)) => Ok(Input::Sides(reactants, products)),
        _ => bail!("Pass either a single-line EQUATION or both --reactants and --products."),
    }
}

fn solve(input: &Input<'_>, config: &BalanceConfig) -> chembal::Result<Equation> {
    let mut equation = match *input {
        Input::Line(line) => Equation::parse_with_config(line, config)?,
        Input::Sides(reactants, products) => Equation::with_config(reactants, products, config)?,
    };
    info!(
        "balancing {} reactant(s) and {} product(s) over {} element(s)",
        equation.reactants().len(),
        equation.products().len(),
        equation.elements().len()
    );
    equation.solve()?;
    Ok(equation)
}

fn error_json(err: &BalanceError) -> Result<String> {
    let value = json!({
        "code": err.error_code(),
        "message": err.to_string(),
        "error": err,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
