use crate::error::{BalanceError, Result};
use crate::matrix::ConservationMatrix;
use log::{debug, trace, warn};
use malachite::num::arithmetic::traits::{Abs, Gcd, Lcm, UnsignedAbs};
use malachite::num::basic::traits::{One, Zero};
use malachite::{Integer, Natural, Rational};
use serde::{Deserialize, Serialize};
use std::cmp::{max, min};
use std::mem;
use std::ops::Deref;

/// Stoichiometric coefficients in matrix column order (reactants, then products)
/// All entries are positive and their greatest common divisor is 1
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct CoefficientVector(Vec<u64>);
impl TryFrom<Vec<u64>> for CoefficientVector {
    type Error = BalanceError;

    /// Accepts a non-empty vector of positive coefficients whose greatest common divisor is 1
    /// # Example
    /// ```
    /// use chembal::CoefficientVector;
    ///
    /// assert!(CoefficientVector::try_from(vec![2, 1, 2]).is_ok());
    /// assert!(CoefficientVector::try_from(vec![0, 4]).is_err());
    /// assert!(CoefficientVector::try_from(vec![2, 4]).is_err());
    /// ```
    fn try_from(coefficients: Vec<u64>) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(BalanceError::no_solution("no coefficients"));
        }
        if coefficients.contains(&0) {
            return Err(BalanceError::no_solution("a compound takes no part in the reaction"));
        }
        if coefficients.iter().fold(0u64, |acc, &x| acc.gcd(x)) != 1 {
            return Err(BalanceError::no_solution("coefficients are not reduced"));
        }
        Ok(Self(coefficients))
    }
}
impl From<CoefficientVector> for Vec<u64> {
    fn from(coefficients: CoefficientVector) -> Self {
        coefficients.0
    }
}
impl CoefficientVector {
    /// Coefficients as a slice
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Consume into the underlying vector
    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}
impl Deref for CoefficientVector {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.0
    }
}

/// Solves the conservation matrix for the smallest positive integer coefficients
/// # Arguments
/// * `matrix` - conservation matrix of the equation
/// # Returns
/// * `Ok` - coprime positive coefficients, one per column
/// * `Err` - `NoSolution` if the null space is trivial or its first basis vector is not sign-consistent
/// # Example
/// ```
/// use chembal::{solve, ConservationMatrix, Formula};
///
/// let reactants = [Formula::parse("C3H8").unwrap(), Formula::parse("O2").unwrap()];
/// let products = [Formula::parse("CO2").unwrap(), Formula::parse("H2O").unwrap()];
/// let matrix = ConservationMatrix::build(&reactants, &products).unwrap();
///
/// assert_eq!(solve(&matrix).unwrap().as_slice(), &[1, 5, 3, 4]);
/// ```
pub fn solve(matrix: &ConservationMatrix) -> Result<CoefficientVector> {
    let basis = null_space(matrix.rows(), matrix.column_count());
    debug!(
        "rank {}, null space dimension {}",
        matrix.column_count() - basis.len(),
        basis.len(),
    );
    if basis.len() > 1 {
        // several independent balancing modes, only the first one is reported
        warn!(
            "null space has dimension {}, using the first basis vector",
            basis.len()
        );
    }
    let first = basis
        .into_iter()
        .next()
        .ok_or_else(|| BalanceError::no_solution("only the all-zero solution exists"))?;

    let integers = clear_denominators(&first)?;
    let magnitudes = normalize_signs(integers)?;
    let coefficients = reduce_to_lowest_terms(magnitudes)?;
    debug!("coefficients: {:?}", coefficients);

    Ok(CoefficientVector(coefficients))
}

/// Basis of the null space of an integer matrix over the rationals
/// One vector per free column of the reduced row echelon form, in column order. The free
/// column's own entry is 1, the other free entries are 0.
/// # Arguments
/// * `rows` - matrix rows
/// * `n` - number of columns
/// # Example
/// ```
/// use chembal::null_space;
/// use malachite::Rational;
///
/// // x - y = 0
/// let basis = null_space(&[vec![1, -1]], 2);
///
/// assert_eq!(basis, vec![vec![Rational::from(1), Rational::from(1)]]);
/// ```
pub fn null_space(rows: &[Vec<i64>], n: usize) -> Vec<Vec<Rational>> {
    let mut matrix = rows
        .iter()
        .map(|row| row
            .iter()
            .map(|&x| Rational::from(x))
            .collect()
        )
        .collect::<Vec<Vec<Rational>>>();

    let pivots = reduce_row_echelon(&mut matrix, n);

    (0..n)
        .filter(|col| !pivots.contains(col))
        .map(|free| {
            let mut vector = vec![Rational::ZERO; n];
            vector[free] = Rational::ONE;
            for (row, &pivot_col) in pivots.iter().enumerate() {
                vector[pivot_col] = -&matrix[row][free];
            }
            vector
        })
        .collect()
}

/// Reduces a matrix to reduced row echelon form in place
/// Columns are processed left to right; the pivot of a column is the entry with the largest
/// absolute value at or below the current row (topmost on ties).
/// # Arguments
/// * `matrix` - matrix rows
/// * `n` - number of columns
/// # Returns
/// * `Vec<usize>` - pivot column of each non-zero row, in row order
/// # Example
/// ```
/// use chembal::reduce_row_echelon;
/// use malachite::Rational;
///
/// let mut matrix = vec![
///     vec![Rational::from(2), Rational::from(0), Rational::from(-2)],
///     vec![Rational::from(0), Rational::from(2), Rational::from(-1)],
/// ];
///
/// let pivots = reduce_row_echelon(&mut matrix, 3);
///
/// assert_eq!(pivots, vec![0, 1]);
/// assert_eq!(matrix, vec![
///     vec![Rational::from(1), Rational::from(0), Rational::from(-1)],
///     vec![Rational::from(0), Rational::from(1), Rational::from_signeds(-1, 2)],
/// ]);
/// ```
pub fn reduce_row_echelon(matrix: &mut [Vec<Rational>], n: usize) -> Vec<usize> {
    let m = matrix.len();
    let mut pivots = Vec::new();
    let mut row = 0;
    let mut col = 0;
    while row < m && col < n {
        let mut i_max = row;
        for (i, row_n) in matrix.iter().enumerate().skip(row + 1) {
            if (&row_n[col]).abs() > (&matrix[i_max][col]).abs() {
                i_max = i;
            }
        }

        if matrix[i_max][col] == Rational::ZERO {
            col += 1;
            continue;
        }

        swap_rows(row, i_max, matrix);

        // scale pivot row so the pivot is 1
        let pivot = matrix[row][col].clone();
        for j in col..n {
            matrix[row][j] /= &pivot;
        }

        // clear the pivot column above and below
        for i in 0..m {
            if i == row || matrix[i][col] == Rational::ZERO {
                continue;
            }
            let f = matrix[i][col].clone();
            for j in col..n {
                let sub_amount = &f * &matrix[row][j];
                matrix[i][j] -= sub_amount;
            }
        }

        trace!("pivot at row {}, column {}", row, col);
        pivots.push(col);
        row += 1;
        col += 1;
    }
    pivots
}

/// Swaps two rows in a matrix
/// # Example
/// ```
/// use chembal::swap_rows;
///
/// let mut matrix = vec![
///     vec![1, 2, 3],
///     vec![4, 5, 6],
///     vec![7, 8, 9],
/// ];
///
/// swap_rows(0, 2, &mut matrix);
///
/// assert_eq!(matrix, vec![
///     vec![7, 8, 9],
///     vec![4, 5, 6],
///     vec![1, 2, 3],
/// ]);
/// ```
#[inline(always)]
pub fn swap_rows<T>(r1: usize, r2: usize, matrix: &mut [Vec<T>]) {
    if r1 != r2 {
        let bigger_r = max(r1, r2);
        let smaller_r = min(r1, r2);
        let (top, bot) = matrix.split_at_mut(bigger_r);  // bot[0] is row bigger_r
        mem::swap(&mut top[smaller_r], &mut bot[0])
    }
}

/// Multiplies by the least common multiple of the denominators
fn clear_denominators(vector: &[Rational]) -> Result<Vec<Integer>> {
    let mut lcm = Natural::ONE;
    for entry in vector {
        lcm = lcm.lcm(entry.denominator_ref());
    }
    let scale = Rational::from(&lcm);
    vector
        .iter()
        .map(|entry| {
            Integer::try_from(&(entry * &scale))
                .map_err(|_| BalanceError::no_solution("scaled coefficient is not an integer"))
        })
        .collect()
}

/// All entries must share one sign; a non-positive vector is negated
fn normalize_signs(vector: Vec<Integer>) -> Result<Vec<Natural>> {
    let positive = vector.iter().any(|x| *x > Integer::ZERO);
    let negative = vector.iter().any(|x| *x < Integer::ZERO);
    let vector = match (positive, negative) {
        (true, true) => return Err(BalanceError::no_solution("coefficients have mixed signs")),
        (false, false) => return Err(BalanceError::no_solution("only the all-zero solution exists")),
        (false, true) => vector.into_iter().map(|x| -x).collect(),
        (true, false) => vector,
    };
    Ok(vector.into_iter().map(UnsignedAbs::unsigned_abs).collect())
}

/// Divides by the greatest common divisor, every result must be a positive `u64`
fn reduce_to_lowest_terms(vector: Vec<Natural>) -> Result<Vec<u64>> {
    let mut gcd = Natural::ZERO;
    for entry in &vector {
        gcd = gcd.gcd(entry);
    }
    vector
        .into_iter()
        .map(|entry| {
            let reduced = entry / &gcd;
            if reduced == Natural::ZERO {
                return Err(BalanceError::no_solution("a compound takes no part in the reaction"));
            }
            u64::try_from(&reduced).map_err(|_| BalanceError::no_solution("coefficient does not fit into 64 bits"))
        })
        .collect()
}
