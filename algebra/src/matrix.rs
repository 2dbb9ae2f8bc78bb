//! Sparse matrices of row polynomials.

use std::collections::BTreeMap;
use std::fmt;

use num::BigUint;
use serde::{Deserialize, Serialize};

use crate::poly::SparsePoly;

/// A mapping from row index to [`SparsePoly`].
///
/// Row `r` represents a constraint on `α_{r+1}` expressed in `α₁..α_r`.
/// An absent row and a present-but-empty row both stand for the empty
/// polynomial; callers that care about the distinction use [`Self::has_row`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RowMatrix {
    pub rows: BTreeMap<usize, SparsePoly>,
}

impl RowMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// A matrix holding `poly` at `row` and nothing else.
    pub fn single(row: usize, poly: SparsePoly) -> Self {
        let mut m = Self::new();
        m.set_row(row, poly);
        m
    }

    pub fn row(&self, r: usize) -> Option<&SparsePoly> {
        self.rows.get(&r)
    }

    /// Copy of row `r`, empty when the row is absent.
    pub fn row_or_empty(&self, r: usize) -> SparsePoly {
        self.row(r).cloned().unwrap_or_default()
    }

    pub fn set_row(&mut self, r: usize, poly: SparsePoly) {
        self.rows.insert(r, poly);
    }

    pub fn remove_row(&mut self, r: usize) {
        self.rows.remove(&r);
    }

    pub fn has_row(&self, r: usize) -> bool {
        self.rows.contains_key(&r)
    }

    /// Add one monomial mod 2 into row `r`, creating the row if needed.
    pub fn toggle(&mut self, r: usize, m: BigUint) {
        self.rows.entry(r).or_default().toggle(m);
    }

    /// Number of monomials in row `r` (`0` for an absent row).
    pub fn row_len(&self, r: usize) -> usize {
        self.row(r).map_or(0, SparsePoly::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &SparsePoly)> {
        self.rows.iter().map(|(&r, p)| (r, p))
    }
}

impl fmt::Display for RowMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, poly) in self.iter() {
            writeln!(f, "Row {}: {}", r + 1, poly)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use num::{One, Zero};

    use super::*;

    #[test]
    fn toggle_creates_and_cancels() {
        let mut m = RowMatrix::new();
        m.toggle(2, BigUint::one());
        assert_eq!(m.row_len(2), 1);
        m.toggle(2, BigUint::one());
        assert_eq!(m.row_len(2), 0);
        // Cancelling leaves the row present but empty.
        assert!(m.has_row(2));
    }

    #[test]
    fn absent_rows_read_as_empty() {
        let m = RowMatrix::new();
        assert_eq!(m.row_len(7), 0);
        assert!(m.row_or_empty(7).is_empty());
        assert!(!m.has_row(7));
    }

    #[test]
    fn set_row_replaces() {
        let mut m = RowMatrix::new();
        m.toggle(0, BigUint::zero());
        m.set_row(0, SparsePoly::new());
        assert_eq!(m.row_len(0), 0);
        m.remove_row(0);
        assert!(!m.has_row(0));
    }
}
