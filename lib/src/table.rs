use crate::equation::Equation;
use mendeleev::ALL_ELEMENTS;
use prettytable::{Cell, Row, Table};

/// Row label of an element, with its name when the symbol is in the periodic table
/// # Example
/// ```
/// use chembal::element_label;
///
/// assert_eq!(element_label("Fe"), "Fe (Iron)");
/// assert_eq!(element_label("Xx"), "Xx");
/// ```
pub fn element_label(symbol: &str) -> String {
    match ALL_ELEMENTS.iter().find(|e| e.symbol() == symbol) {
        Some(element) => format!("{} ({})", symbol, element.name()),
        None => symbol.to_string(),
    }
}

/// Cell text for `base` atoms in a compound with `coefficient`
pub fn cell_text(base: u64, coefficient: u64) -> String {
    let scaled = u128::from(base) * u128::from(coefficient);
    if scaled == u128::from(base) {
        base.to_string()
    } else {
        format!("{} → {}", base, scaled)
    }
}

impl Equation {
    /// Builds the element table of a solved equation, `None` before `solve` succeeds
    /// One row per element and one column per compound; a cell is the atom count in one unit of
    /// the compound, followed by the scaled count when the coefficient is not 1 (`2 → 4`)
    /// # Example
    /// ```
    /// use chembal::Equation;
    ///
    /// let mut equation = Equation::new("H2 + O2", "H2O").unwrap();
    /// equation.solve().unwrap();
    ///
    /// let table = equation.element_table().unwrap();
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn element_table(&self) -> Option<Table> {
        let coefficients = self.coefficients()?;
        let compounds = self.reactants().iter().chain(self.products());

        let mut titles = vec![Cell::new("Element")];
        for (i, compound) in self.reactants().iter().enumerate() {
            titles.push(Cell::new(&format!("Reactant {}: {}", i + 1, compound.original_str())));
        }
        for (j, compound) in self.products().iter().enumerate() {
            titles.push(Cell::new(&format!("Product {}: {}", j + 1, compound.original_str())));
        }

        let mut table = Table::new();
        table.set_titles(Row::new(titles));

        for element in self.elements() {
            let mut cells = vec![Cell::new(&element_label(element))];
            for (compound, &coefficient) in compounds.clone().zip(coefficients.iter()) {
                cells.push(Cell::new(&cell_text(compound.formula().count(element), coefficient)));
            }
            table.add_row(Row::new(cells));
        }

        Some(table)
    }
}
