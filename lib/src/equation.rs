use crate::config::BalanceConfig;
use crate::error::{BalanceError, Result, Side};
use crate::formula::{ElementSymbol, Formula};
use crate::matrix::ConservationMatrix;
use crate::solver::{self, CoefficientVector};
use log::{debug, warn};
use malachite::num::basic::traits::Zero;
use malachite::Natural;
use mendeleev::ALL_ELEMENTS;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::iter::zip;
use std::str::FromStr;

/// Arrows recognized between the two sides of a single-line equation
/// Longer arrows come first so `<->` is not read as `->`
pub const ARROWS: [&str; 7] = ["<->", "<=>", "⇌", "->", "=>", "→", "="];

/// Whether `symbol` names an element of the periodic table
/// # Example
/// ```
/// use chembal::is_known_element;
///
/// assert!(is_known_element("Fe"));
/// assert!(!is_known_element("Xx"));
/// ```
pub fn is_known_element(symbol: &str) -> bool {
    ALL_ELEMENTS.iter().any(|e| e.symbol() == symbol)
}

/// A struct that represents a chemical compound (e.g. H2O, Ca(OH)2, ...)
/// # Example
/// ```
/// use chembal::Compound;
///
/// let compound = Compound::parse("Ca(OH)2").unwrap();
///
/// assert_eq!(compound.original_str(), "Ca(OH)2");
/// assert_eq!(compound.formula().count("H"), 2);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Compound {
    /// String from which the compound was parsed
    original_str: String,
    /// Element counts
    formula: Formula,
}
impl Compound {
    /// Create new compound from a formula string with default configuration
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_config(input, &BalanceConfig::default())
    }

    /// Create new compound from a formula string
    pub fn parse_with_config(input: &str, config: &BalanceConfig) -> Result<Self> {
        Ok(Self {
            original_str: input.to_string(),
            formula: Formula::parse_with_depth(input, config.max_nesting_depth)?,
        })
    }

    /// Returns the string from which the compound was parsed
    pub fn original_str(&self) -> &str {
        &self.original_str
    }

    /// Returns the element counts of the compound
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Returns the map of elements and their quantities
    /// For example, in the compound H2O the map will be {H: 2, O: 1}
    pub fn elements(&self) -> &BTreeMap<ElementSymbol, u64> {
        self.formula.counts()
    }
}
impl AsRef<Formula> for Compound {
    fn as_ref(&self) -> &Formula {
        &self.formula
    }
}

/// Splits one side of an equation on `+` and parses every non-empty term
/// # Arguments
/// * `text` - e.g. `"C3H8 + O2"`
/// * `config` - parser configuration
/// # Returns
/// * `Ok` - compounds in input order (possibly empty)
/// * `Err` - `MalformedFormula` for the first term that does not parse
/// # Example
/// ```
/// use chembal::{parse_side, BalanceConfig};
///
/// let compounds = parse_side(" H2 +O2 + ", &BalanceConfig::default()).unwrap();
///
/// assert_eq!(compounds.len(), 2);
/// assert_eq!(compounds[1].original_str(), "O2");
/// ```
pub fn parse_side(text: &str, config: &BalanceConfig) -> Result<Vec<Compound>> {
    text.split('+')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| {
            let compound = Compound::parse_with_config(term, config)?;
            debug!("parsed compound '{}' as {}", term, compound.formula);
            for symbol in compound.formula.symbols().filter(|s| !is_known_element(s)) {
                warn!("'{}' in '{}' is not a known element symbol", symbol, term);
            }
            Ok(compound)
        })
        .collect()
}

/// Parses both sides of an equation
/// # Returns
/// * `Ok` - `(reactants, products)`
/// * `Err` - `MalformedFormula` from either side, or `EmptySide` if a side has no compounds
/// # Example
/// ```
/// use chembal::{parse_equation, BalanceConfig, BalanceError, Side};
///
/// let config = BalanceConfig::default();
/// let (reactants, products) = parse_equation("H2 + O2", "H2O", &config).unwrap();
/// assert_eq!((reactants.len(), products.len()), (2, 1));
///
/// let err = parse_equation("", "H2O", &config).unwrap_err();
/// assert_eq!(err, BalanceError::EmptySide { side: Side::Reactants });
/// ```
pub fn parse_equation(left: &str, right: &str, config: &BalanceConfig) -> Result<(Vec<Compound>, Vec<Compound>)> {
    let reactants = parse_side(left, config)?;
    let products = parse_side(right, config)?;
    if reactants.is_empty() {
        return Err(BalanceError::EmptySide { side: Side::Reactants });
    }
    if products.is_empty() {
        return Err(BalanceError::EmptySide { side: Side::Products });
    }
    Ok((reactants, products))
}

/// Locates the single arrow of an equation line
fn find_arrow(input: &str) -> Result<(&'static str, usize)> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < input.len() {
        match ARROWS.iter().find(|arrow| input[i..].starts_with(*arrow)) {
            Some(arrow) => {
                found.push((*arrow, i));
                i += arrow.len();
            },
            None => i += input[i..].chars().next().map_or(1, char::len_utf8),
        }
    }
    match found.as_slice() {
        [single] => Ok(*single),
        _ => Err(BalanceError::InvalidArrowCount { found: found.len() }),
    }
}

/// A struct that represents a chemical equation (e.g. 2H2 + O2 → 2H2O)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Equation {
    /// String from which the equation was parsed
    original_str: String,
    /// Arrow placed between the sides when rendering
    arrow: String,
    /// A vector of reactants
    reactants: Vec<Compound>,
    /// A vector of products
    products: Vec<Compound>,
    /// Element symbols of both sides, sorted
    elements: Vec<ElementSymbol>,
    /// Stoichiometric coefficients, set by `solve`
    coefficients: Option<CoefficientVector>,
}
impl Equation {
    /// Create new equation from reactant and product text with default configuration
    /// # Example
    /// ```
    /// use chembal::Equation;
    ///
    /// let mut equation = Equation::new("H2 + O2", "H2O").unwrap();
    /// equation.solve().unwrap();
    ///
    /// assert_eq!(equation.solution_str().unwrap(), "2H2 + O2 → 2H2O");
    /// ```
    pub fn new(reactants: &str, products: &str) -> Result<Self> {
        Self::with_config(reactants, products, &BalanceConfig::default())
    }

    /// Create new equation from reactant and product text
    pub fn with_config(reactants: &str, products: &str, config: &BalanceConfig) -> Result<Self> {
        let original_str = format!("{} {} {}", reactants.trim(), config.arrow, products.trim());
        Self::from_sides(original_str, config.arrow.clone(), reactants, products, config)
    }

    /// Create new equation from a single line containing exactly one arrow
    /// Recognized arrows are listed in [`ARROWS`]; the arrow found is reused when rendering
    /// # Example
    /// ```
    /// use chembal::Equation;
    ///
    /// let mut equation = Equation::parse("Fe2(SO4)3 + KOH -> K2SO4 + Fe(OH)3").unwrap();
    /// equation.solve().unwrap();
    ///
    /// assert_eq!(equation.arrow(), "->");
    /// assert_eq!(equation.solution_str().unwrap(), "Fe2(SO4)3 + 6KOH -> 3K2SO4 + 2Fe(OH)3");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_config(input, &BalanceConfig::default())
    }

    /// Create new equation from a single line, using `config` for the parser
    pub fn parse_with_config(input: &str, config: &BalanceConfig) -> Result<Self> {
        let (arrow, position) = find_arrow(input)?;
        let reactants = &input[..position];
        let products = &input[position + arrow.len()..];
        Self::from_sides(input.to_string(), arrow.to_string(), reactants, products, config)
    }

    fn from_sides(original_str: String, arrow: String, left: &str, right: &str, config: &BalanceConfig) -> Result<Self> {
        let (reactants, products) = parse_equation(left, right, config)?;
        let elements = reactants
            .iter()
            .chain(products.iter())
            .flat_map(|c| c.formula.symbols())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            original_str,
            arrow,
            reactants,
            products,
            elements,
            coefficients: None,
        })
    }

    /// Solves the equation
    /// The coefficients are checked against every element before they are stored
    /// # Returns
    /// * `Ok` - if the equation was solved successfully
    /// * `Err` - `NoSolution` if the equation cannot be balanced
    pub fn solve(&mut self) -> Result<()> {
        let matrix = self.matrix()?;
        let coefficients = solver::solve(&matrix)?;
        self.check_conservation(&coefficients)?;
        self.coefficients = Some(coefficients);
        Ok(())
    }

    fn check_conservation(&self, coefficients: &[u64]) -> Result<()> {
        let (reactant_coeffs, product_coeffs) = coefficients.split_at(self.reactants.len());
        let total = |compounds: &[Compound], coeffs: &[u64], element: &str| {
            zip(compounds, coeffs).fold(Natural::ZERO, |acc, (compound, &coeff)| {
                acc + Natural::from(coeff) * Natural::from(compound.formula.count(element))
            })
        };
        for element in &self.elements {
            let element = element.as_str();
            if total(&self.reactants, reactant_coeffs, element) != total(&self.products, product_coeffs, element) {
                return Err(BalanceError::no_solution(format!("coefficients do not conserve {}", element)));
            }
        }
        Ok(())
    }

    /// Builds the conservation matrix of the equation
    pub fn matrix(&self) -> Result<ConservationMatrix> {
        ConservationMatrix::build(&self.reactants, &self.products)
    }

    /// Returns the original string from which the equation was parsed
    pub fn original_str(&self) -> &str {
        &self.original_str
    }

    /// Returns the arrow used when rendering
    pub fn arrow(&self) -> &str {
        &self.arrow
    }

    /// Returns the vector of reactants
    pub fn reactants(&self) -> &[Compound] {
        &self.reactants
    }

    /// Returns the vector of products
    pub fn products(&self) -> &[Compound] {
        &self.products
    }

    /// Returns the element symbols of the equation in lexicographic order
    pub fn elements(&self) -> &[ElementSymbol] {
        &self.elements
    }

    /// Returns whether `solve` has succeeded
    pub fn is_solved(&self) -> bool {
        self.coefficients.is_some()
    }

    /// Returns all coefficients, reactants first
    pub fn coefficients(&self) -> Option<&CoefficientVector> {
        self.coefficients.as_ref()
    }

    /// Returns the stoichiometric coefficients of the reactants
    /// # Example
    /// ```
    /// use chembal::Equation;
    ///
    /// let mut equation = Equation::new("H2 + O2", "H2O").unwrap();
    /// equation.solve().unwrap();
    ///
    /// assert_eq!(equation.solution_reactants().unwrap(), &[2, 1]);
    /// assert_eq!(equation.solution_products().unwrap(), &[2]);
    /// ```
    pub fn solution_reactants(&self) -> Option<&[u64]> {
        self.coefficients.as_ref().map(|c| &c[..self.reactants.len()])
    }

    /// Returns the stoichiometric coefficients of the products
    pub fn solution_products(&self) -> Option<&[u64]> {
        self.coefficients.as_ref().map(|c| &c[self.reactants.len()..])
    }

    /// Returns the solution of the equation as a string, coefficients of 1 are omitted
    /// # Example
    /// ```
    /// use chembal::Equation;
    ///
    /// let mut equation = Equation::new("Fe", "Fe").unwrap();
    /// assert_eq!(equation.solution_str(), None);
    ///
    /// equation.solve().unwrap();
    /// assert_eq!(equation.solution_str().unwrap(), "Fe → Fe");
    /// ```
    pub fn solution_str(&self) -> Option<String> {
        let sols_reacts = self.solution_reactants()?;
        let sols_prods = self.solution_products()?;

        let side_str = |compounds: &[Compound], quantities: &[u64]| {
            zip(compounds, quantities)
                .map(|(compound, &quantity)| {
                    if quantity == 1 {
                        compound.original_str.clone()
                    } else {
                        format!("{}{}", quantity, compound.original_str)
                    }
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };

        Some(format!(
            "{} {} {}",
            side_str(&self.reactants, sols_reacts),
            self.arrow,
            side_str(&self.products, sols_prods),
        ))
    }

    /// Returns a serializable snapshot of the solved equation
    pub fn balanced(&self) -> Option<BalancedEquation> {
        Some(BalancedEquation {
            reactants: self.reactants.iter().map(|c| c.original_str.clone()).collect(),
            products: self.products.iter().map(|c| c.original_str.clone()).collect(),
            elements: self.elements.clone(),
            coefficients: self.coefficients.as_ref()?.to_vec(),
            equation: self.solution_str()?,
        })
    }
}
impl FromStr for Equation {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Result of a successful balance, ready for presentation or serialization
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BalancedEquation {
    /// Reactant formulas as entered
    pub reactants: Vec<String>,
    /// Product formulas as entered
    pub products: Vec<String>,
    /// Element symbols, sorted
    pub elements: Vec<ElementSymbol>,
    /// Coefficients, reactants first
    pub coefficients: Vec<u64>,
    /// Rendered equation, e.g. `2H2 + O2 → 2H2O`
    pub equation: String,
}

/// Parses and balances an equation in one call
/// # Example
/// ```
/// use chembal::balance;
///
/// let balanced = balance("C3H8 + O2", "CO2 + H2O").unwrap();
///
/// assert_eq!(balanced.coefficients, vec![1, 5, 3, 4]);
/// assert_eq!(balanced.elements, vec!["C", "H", "O"]);
/// assert_eq!(balanced.equation, "C3H8 + 5O2 → 3CO2 + 4H2O");
/// ```
pub fn balance(reactants: &str, products: &str) -> Result<BalancedEquation> {
    balance_with_config(reactants, products, &BalanceConfig::default())
}

/// Parses and balances an equation in one call, using `config`
pub fn balance_with_config(reactants: &str, products: &str, config: &BalanceConfig) -> Result<BalancedEquation> {
    let mut equation = Equation::with_config(reactants, products, config)?;
    equation.solve()?;
    equation
        .balanced()
        .ok_or_else(|| BalanceError::no_solution("equation was not solved"))
}
