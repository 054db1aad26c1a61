use wasm_bindgen::prelude::*;
use chembal::Equation;

// Export a `equation_io` function from Rust to JavaScript.
#[wasm_bindgen]
/// Balance a one-line equation such as `H2 + O2 -> H2O`
/// The first char of the result is 1 on success (followed by the balanced equation)
/// and 0 on error (followed by the error message).
pub fn equation_io(equation: &str) -> String {
    let mut equation = match Equation::parse(equation) {
        Ok(equation) => equation,
        Err(err) => return format!("0{}", err),
    };

    if let Err(err) = equation.solve() {
        return format!("0{}", err);
    }
    match equation.solution_str() {
        Some(solution) => format!("1{}", solution),
        None => "0equation was not solved".to_string(),
    }
}
