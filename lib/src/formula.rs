use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::error::{BalanceError, Result};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Element symbol such as `H`, `Ca` or `Xx` (the periodic table is not consulted)
pub type ElementSymbol = String;

/// Largest atom count a formula may hold, so counts always fit a signed matrix entry
pub const MAX_COUNT: u64 = i64::MAX as u64;

/// Atomic composition of one compound (e.g. `Ca(OH)2` is {Ca: 1, H: 2, O: 2})
/// Every stored count is in `1..=MAX_COUNT`, absent elements have count 0
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<ElementSymbol, u64>", into = "BTreeMap<ElementSymbol, u64>")]
pub struct Formula {
    counts: BTreeMap<ElementSymbol, u64>,
}
impl Formula {
    /// Parse a formula using the default nesting bound
    /// # Arguments
    /// * `input` - formula such as `H2SO4`, `Ca(OH)2` or `K4[Fe(CN)6]`
    /// # Returns
    /// * `Ok` - element counts
    /// * `Err` - `MalformedFormula` describing where parsing stopped
    /// # Example
    /// ```
    /// use chembal::Formula;
    ///
    /// let formula = Formula::parse("Ca(OH)2").unwrap();
    ///
    /// assert_eq!(formula.count("Ca"), 1);
    /// assert_eq!(formula.count("O"), 2);
    /// assert_eq!(formula.count("H"), 2);
    /// assert_eq!(formula.count("N"), 0);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_depth(input, DEFAULT_MAX_NESTING_DEPTH)
    }

    /// Parse a formula, allowing at most `max_depth` levels of nested groups
    /// # Example
    /// ```
    /// use chembal::Formula;
    ///
    /// assert!(Formula::parse_with_depth("Ca(OH)2", 1).is_ok());
    /// assert!(Formula::parse_with_depth("Ca(OH)2", 0).is_err());
    /// ```
    pub fn parse_with_depth(input: &str, max_depth: usize) -> Result<Self> {
        let mut parser = FormulaParser {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            max_depth,
        };
        let counts = parser.parse_sequence(0, None)?;
        trace!("parsed formula '{}' into {:?}", input, counts);
        Ok(Self { counts })
    }

    /// Number of atoms of `symbol` in the formula, 0 if absent
    pub fn count(&self, symbol: &str) -> u64 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Element symbols in lexicographic order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// `(symbol, count)` pairs in lexicographic order of symbols
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(e, &q)| (e.as_str(), q))
    }

    /// Underlying map of element counts
    pub fn counts(&self) -> &BTreeMap<ElementSymbol, u64> {
        &self.counts
    }

    /// Number of distinct elements
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// A parsed formula is never empty, a default-constructed one is
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
impl TryFrom<BTreeMap<ElementSymbol, u64>> for Formula {
    type Error = BalanceError;

    /// Checks a map built outside the parser against the same rules the parser enforces
    /// # Example
    /// ```
    /// use chembal::Formula;
    /// use std::collections::BTreeMap;
    ///
    /// let water = BTreeMap::from([("H".to_string(), 2), ("O".to_string(), 1)]);
    /// assert_eq!(Formula::try_from(water).unwrap(), Formula::parse("H2O").unwrap());
    ///
    /// let empty = BTreeMap::from([("H".to_string(), 0)]);
    /// assert!(Formula::try_from(empty).is_err());
    /// ```
    fn try_from(counts: BTreeMap<ElementSymbol, u64>) -> Result<Self> {
        let text = counts.iter().map(|(s, q)| format!("{}{}", s, q)).collect::<String>();
        if counts.is_empty() {
            return Err(BalanceError::malformed(text, 0, "empty formula"));
        }
        for (symbol, &count) in &counts {
            if !is_element_symbol(symbol) {
                return Err(BalanceError::malformed(text, 0, format!("invalid element symbol '{}'", symbol)));
            }
            match count {
                0 => return Err(BalanceError::malformed(text, 0, "count must be at least 1")),
                c if c > MAX_COUNT => return Err(BalanceError::malformed(text, 0, "count too large")),
                _ => {},
            }
        }
        Ok(Self { counts })
    }
}
impl From<Formula> for BTreeMap<ElementSymbol, u64> {
    fn from(formula: Formula) -> Self {
        formula.counts
    }
}
impl AsRef<Formula> for Formula {
    fn as_ref(&self) -> &Formula {
        self
    }
}
impl FromStr for Formula {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
impl Display for Formula {
    /// Symbols in lexicographic order, counts of 1 omitted
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (symbol, count) in self.iter() {
            write!(f, "{}", symbol)?;
            if count != 1 {
                write!(f, "{}", count)?;
            }
        }
        Ok(())
    }
}

/// Uppercase ASCII letter optionally followed by one lowercase letter
fn is_element_symbol(symbol: &str) -> bool {
    match symbol.as_bytes() {
        [first] => first.is_ascii_uppercase(),
        [first, second] => first.is_ascii_uppercase() && second.is_ascii_lowercase(),
        _ => false,
    }
}

/// Recursive-descent parser over the ASCII formula grammar
///
/// ```text
/// formula := unit+
/// unit    := element digits? | '(' formula ')' digits? | '[' formula ']' digits?
/// element := [A-Z] [a-z]?
/// ```
struct FormulaParser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}
impl FormulaParser<'_> {
    /// Parses units until the end of input or until `closing` is consumed
    fn parse_sequence(&mut self, depth: usize, closing: Option<u8>) -> Result<BTreeMap<ElementSymbol, u64>> {
        let start = self.pos;
        let mut counts = BTreeMap::new();
        let mut units = 0;

        while let Some(&c) = self.bytes.get(self.pos) {
            match c {
                b'A'..=b'Z' => {
                    let symbol = self.element_symbol();
                    let quantity = self.multiplier()?;
                    self.add(&mut counts, symbol, quantity)?;
                },
                b'(' | b'[' => {
                    let close = if c == b'(' { b')' } else { b']' };
                    if depth + 1 > self.max_depth {
                        return Err(self.error(format!("groups nested deeper than {}", self.max_depth)));
                    }
                    self.pos += 1;
                    let inner = self.parse_sequence(depth + 1, Some(close))?;
                    let multiplier = self.multiplier()?;
                    for (symbol, quantity) in inner {
                        let quantity = quantity.checked_mul(multiplier).ok_or_else(|| self.overflow())?;
                        self.add(&mut counts, symbol, quantity)?;
                    }
                },
                b')' | b']' => {
                    return match closing {
                        Some(expected) if expected == c => {
                            if units == 0 {
                                return Err(BalanceError::malformed(self.input, start, "empty group"));
                            }
                            self.pos += 1;
                            Ok(counts)
                        },
                        Some(expected) => Err(self.error(format!("expected '{}' but found '{}'", expected as char, c as char))),
                        None => Err(self.error(format!("unmatched '{}'", c as char))),
                    };
                },
                _ => {
                    let found = self.input[self.pos..].chars().next().unwrap_or_default();
                    return Err(self.error(format!("unexpected character '{}'", found)));
                },
            }
            units += 1;
        }

        if let Some(expected) = closing {
            return Err(self.error(format!("missing closing '{}'", expected as char)));
        }
        if units == 0 {
            return Err(self.error("empty formula"));
        }
        Ok(counts)
    }

    /// Uppercase letter optionally followed by one lowercase letter
    fn element_symbol(&mut self) -> ElementSymbol {
        let start = self.pos;
        self.pos += 1;
        if self.bytes.get(self.pos).is_some_and(u8::is_ascii_lowercase) {
            self.pos += 1;
        }
        self.input[start..self.pos].to_string()
    }

    /// Digits following a unit, 1 if there are none
    fn multiplier(&mut self) -> Result<u64> {
        let start = self.pos;
        while self.bytes.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(1);
        }
        let value: u64 = self.input[start..self.pos]
            .parse()
            .map_err(|_| BalanceError::malformed(self.input, start, "count too large"))?;
        match value {
            0 => Err(BalanceError::malformed(self.input, start, "count must be at least 1")),
            v if v > MAX_COUNT => Err(BalanceError::malformed(self.input, start, "count too large")),
            v => Ok(v),
        }
    }

    fn add(&self, counts: &mut BTreeMap<ElementSymbol, u64>, symbol: ElementSymbol, quantity: u64) -> Result<()> {
        let entry = counts.entry(symbol).or_insert(0);
        *entry = entry
            .checked_add(quantity)
            .filter(|&total| total <= MAX_COUNT)
            .ok_or_else(|| self.overflow())?;
        Ok(())
    }

    fn overflow(&self) -> BalanceError {
        self.error("count too large")
    }

    fn error(&self, reason: impl Into<String>) -> BalanceError {
        BalanceError::malformed(self.input, self.pos, reason)
    }
}
