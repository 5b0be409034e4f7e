//! Portfolios of instruments used for curve bootstrapping.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::error::{BondError, BondResult};
use crate::instruments::{Instrument, Periods};

/// An ordered collection of instruments.
#[derive(Debug, Default)]
pub struct Portfolio {
    instruments: Vec<Box<dyn Instrument>>,
}

impl Portfolio {
    /// Creates an empty portfolio.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a portfolio from boxed instruments.
    #[must_use]
    pub fn from_instruments(instruments: Vec<Box<dyn Instrument>>) -> Self {
        Self { instruments }
    }

    /// Adds an instrument.
    pub fn push<I: Instrument + 'static>(&mut self, instrument: I) {
        self.instruments.push(Box::new(instrument));
    }

    /// Adds an instrument, builder style.
    #[must_use]
    pub fn with<I: Instrument + 'static>(mut self, instrument: I) -> Self {
        self.push(instrument);
        self
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true if the portfolio holds no instruments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Iterates over the instruments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Instrument> {
        self.instruments.iter().map(as_dyn)
    }

    /// Market prices of the instruments, in insertion order.
    #[must_use]
    pub fn prices(&self) -> DVector<f64> {
        DVector::from_iterator(self.len(), self.iter().map(Instrument::price))
    }

    /// Returns true if the period counts are exactly `{1, 2, ..., n}`, one
    /// instrument per period.
    ///
    /// An empty portfolio, or one containing a perpetuity, is not
    /// bootstrappable.
    #[must_use]
    pub fn can_bootstrap(&self) -> bool {
        let mut counts = Vec::with_capacity(self.len());
        for instrument in self.iter() {
            match instrument.periods() {
                Periods::Finite(n) => counts.push(n),
                Periods::Perpetual => return false,
            }
        }
        if counts.is_empty() {
            return false;
        }
        counts.sort_unstable();
        counts.iter().zip(1u32..).all(|(&n, expected)| n == expected)
    }

    /// Longest maturity in periods.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::UnsupportedInstrumentClass`] if the portfolio
    /// holds a perpetuity.
    pub fn max_periods(&self) -> BondResult<u32> {
        let mut max = 0;
        for instrument in self.iter() {
            match instrument.periods() {
                Periods::Finite(n) => max = max.max(n),
                Periods::Perpetual => {
                    return Err(BondError::unsupported(
                        instrument.kind().to_string(),
                        "cash-flow matrix assembly",
                    ))
                }
            }
        }
        Ok(max)
    }

    /// Cash-flow matrix: row `k` holds the cash flows of instrument `k` by
    /// period, zero-padded to the longest maturity.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::UnsupportedInstrumentClass`] if an instrument
    /// cannot be decomposed into finite cash flows.
    pub fn cash_flow_matrix(&self) -> BondResult<DMatrix<f64>> {
        let cols = self.max_periods()? as usize;
        let mut matrix = DMatrix::zeros(self.len(), cols);
        for (row, instrument) in self.iter().enumerate() {
            let dense = instrument.cashflows()?.to_dense(cols);
            for (col, amount) in dense.into_iter().enumerate() {
                matrix[(row, col)] = amount;
            }
        }
        Ok(matrix)
    }
}

#[allow(clippy::borrowed_box)]
fn as_dyn(instrument: &Box<dyn Instrument>) -> &dyn Instrument {
    instrument.as_ref()
}

impl fmt::Display for Portfolio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Portfolio({} instruments)", self.len())
    }
}
