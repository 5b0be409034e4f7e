//! Recombining binomial trees in flat triangular storage.
//!
//! Node `(i, j)` is state `i` at step `j`, with `0 <= i <= j`; `i` counts
//! down moves. Column `j` holds `j + 1` nodes and lives at offset
//! `j (j + 1) / 2` of a single buffer.
//!
//! ```text
//!   j:   0      1      2
//!      (0,0)  (0,1)  (0,2)
//!             (1,1)  (1,2)
//!                    (2,2)
//! ```
//!
//! The same layout holds short rates ([`RateTree`]), zero-coupon prices
//! ([`ZeroTree`]) and instrument values ([`PriceTree`]).

use serde::{Deserialize, Serialize};

/// Risk-neutral probability of each branch.
pub const BRANCH_PROBABILITY: f64 = 0.5;

/// A triangular array of node values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangularTree {
    columns: usize,
    values: Vec<f64>,
}

/// Short rates per node, continuously compounded over one step.
pub type RateTree = TriangularTree;

/// Zero-coupon bond prices per node.
pub type ZeroTree = TriangularTree;

/// Instrument values per node.
pub type PriceTree = TriangularTree;

const fn column_offset(j: usize) -> usize {
    j * (j + 1) / 2
}

impl TriangularTree {
    /// Creates a tree of `columns` columns filled with zeros.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self::filled(columns, 0.0)
    }

    /// Creates a tree of `columns` columns filled with `value`.
    #[must_use]
    pub fn filled(columns: usize, value: f64) -> Self {
        Self {
            columns,
            values: vec![value; column_offset(columns)],
        }
    }

    /// Creates a single-node tree.
    #[must_use]
    pub fn with_root(value: f64) -> Self {
        Self::filled(1, value)
    }

    /// Number of columns (time steps, counting step 0).
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Value at state `i`, step `j`.
    ///
    /// # Panics
    ///
    /// Panics unless `i <= j < columns`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[self.index(i, j)]
    }

    /// Sets the value at state `i`, step `j`.
    ///
    /// # Panics
    ///
    /// Panics unless `i <= j < columns`.
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.values[idx] = value;
    }

    /// Value at the root node.
    #[must_use]
    pub fn root(&self) -> f64 {
        self.get(0, 0)
    }

    /// The `j + 1` values of column `j`.
    #[must_use]
    pub fn column(&self, j: usize) -> &[f64] {
        assert!(j < self.columns, "column {j} out of range for {} columns", self.columns);
        &self.values[column_offset(j)..column_offset(j + 1)]
    }

    /// Mutable access to column `j`.
    pub fn column_mut(&mut self, j: usize) -> &mut [f64] {
        assert!(j < self.columns, "column {j} out of range for {} columns", self.columns);
        &mut self.values[column_offset(j)..column_offset(j + 1)]
    }

    /// Appends a zero-filled column and returns its index.
    pub fn grow(&mut self) -> usize {
        let j = self.columns;
        self.values.resize(column_offset(j + 1), 0.0);
        self.columns += 1;
        j
    }

    /// Drops every column from `columns` onwards.
    pub fn truncate(&mut self, columns: usize) {
        if columns < self.columns {
            self.values.truncate(column_offset(columns));
            self.columns = columns;
        }
    }

    fn index(&self, i: usize, j: usize) -> usize {
        assert!(
            i <= j && j < self.columns,
            "node ({i}, {j}) outside triangular tree of {} columns",
            self.columns
        );
        column_offset(j) + i
    }
}

/// Discounts a value tree back one step through a rate column.
///
/// `values` must hold column `j + 1`; returns column `j`:
/// `v(i) = exp(-r(i, j) dt) (½ v(i) + ½ v(i + 1))`.
pub(crate) fn discount_step(rates: &RateTree, j: usize, next: &[f64], time_step: f64) -> Vec<f64> {
    rates
        .column(j)
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            (-r * time_step).exp()
                * (BRANCH_PROBABILITY * next[i] + BRANCH_PROBABILITY * next[i + 1])
        })
        .collect()
}

/// Builds the zero-coupon tree for a unit bond maturing at step
/// `period + 1`.
///
/// The result has `period + 2` columns with the terminal column equal to 1;
/// earlier nodes are discounted through rate columns `period, ..., 0`.
///
/// # Panics
///
/// Panics if `rates` has fewer than `period + 1` columns.
#[must_use]
pub fn backfill(rates: &RateTree, period: usize, time_step: f64) -> ZeroTree {
    let columns = period + 2;
    let mut zeros = ZeroTree::new(columns);
    zeros.column_mut(columns - 1).fill(1.0);

    for j in (0..=period).rev() {
        let column = discount_step(rates, j, zeros.column(j + 1), time_step);
        zeros.column_mut(j).copy_from_slice(&column);
    }
    zeros
}
