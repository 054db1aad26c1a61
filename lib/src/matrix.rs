use crate::error::{BalanceError, Result};
use crate::formula::{ElementSymbol, Formula};
use log::debug;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Conservation matrix of an equation
///
/// One row per element (symbols in lexicographic order), one column per compound:
/// reactant columns first, then product columns, both in input order. A reactant
/// entry is the atom count of the row's element in that compound, a product entry
/// is the negated count.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConservationMatrix {
    rows: Vec<Vec<i64>>,
    elements: Vec<ElementSymbol>,
    reactant_count: usize,
    product_count: usize,
}
impl ConservationMatrix {
    /// Build the matrix for `reactants -> products`
    /// # Arguments
    /// * `reactants` - compounds on the left-hand side, in input order
    /// * `products` - compounds on the right-hand side, in input order
    /// # Returns
    /// * `Ok` - the matrix
    /// * `Err` - `MalformedFormula` if a count does not fit a signed 64-bit entry
    /// # Example
    /// ```
    /// use chembal::{ConservationMatrix, Formula};
    ///
    /// let reactants = [Formula::parse("H2").unwrap(), Formula::parse("O2").unwrap()];
    /// let products = [Formula::parse("H2O").unwrap()];
    ///
    /// let matrix = ConservationMatrix::build(&reactants, &products).unwrap();
    ///
    /// assert_eq!(matrix.elements(), &["H", "O"]);
    /// assert_eq!(matrix.rows(), &[vec![2, 0, -2], vec![0, 2, -1]]);
    /// ```
    pub fn build<R: AsRef<Formula>, P: AsRef<Formula>>(reactants: &[R], products: &[P]) -> Result<Self> {
        let elements = reactants
            .iter()
            .map(AsRef::as_ref)
            .chain(products.iter().map(AsRef::as_ref))
            .flat_map(Formula::symbols)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let entry = |formula: &Formula, element: &str| {
            i64::try_from(formula.count(element))
                .map_err(|_| BalanceError::malformed(formula.to_string(), 0, "count too large"))
        };
        let rows = elements
            .iter()
            .map(|element| {
                let element = element.as_str();
                reactants
                    .iter()
                    .map(|c| entry(c.as_ref(), element))
                    .chain(products.iter().map(|c| entry(c.as_ref(), element).map(|x| -x)))
                    .collect::<Result<Vec<i64>>>()
            })
            .collect::<Result<Vec<Vec<i64>>>>()?;

        debug!(
            "conservation matrix: {} elements x {} compounds ({} reactants, {} products)",
            elements.len(),
            reactants.len() + products.len(),
            reactants.len(),
            products.len(),
        );

        Ok(Self {
            rows,
            elements,
            reactant_count: reactants.len(),
            product_count: products.len(),
        })
    }

    /// Matrix rows, one per element
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Row labels, sorted lexicographically
    pub fn elements(&self) -> &[ElementSymbol] {
        &self.elements
    }

    /// Number of rows (distinct elements)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (compounds on both sides)
    pub fn column_count(&self) -> usize {
        self.reactant_count + self.product_count
    }

    /// Number of leading reactant columns
    pub fn reactant_count(&self) -> usize {
        self.reactant_count
    }

    /// Number of trailing product columns
    pub fn product_count(&self) -> usize {
        self.product_count
    }
}
impl Display for ConservationMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self.elements.iter().map(String::len).max().unwrap_or(0);
        for (element, row) in self.elements.iter().zip(&self.rows) {
            write!(f, "{:<width$} |", element, width = width)?;
            for (i, entry) in row.iter().enumerate() {
                if i == self.reactant_count {
                    write!(f, " |")?;
                }
                write!(f, " {:>3}", entry)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
