//! Term-structure reports.
//!
//! A report lists, per maturity, the discount factor, the zero rate and the
//! forward rate from the previous maturity.

use serde::{Deserialize, Serialize};

use strata_core::Compounding;

use crate::curve::DiscountCurve;
use crate::error::CurveResult;

/// One row of a term-structure report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermStructurePoint {
    /// Maturity in years.
    pub maturity: f64,
    /// Discount factor to the maturity.
    pub discount_factor: f64,
    /// Zero rate to the maturity.
    pub zero_rate: f64,
    /// Forward rate from the previous row's maturity (or from today for the
    /// first row).
    pub forward_rate: f64,
}

/// Discount factors, zero rates and forward rates by maturity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStructureReport {
    /// Compounding used for the zero and forward rates.
    pub compounding: Compounding,
    /// Rows in increasing maturity.
    pub points: Vec<TermStructurePoint>,
}

impl TermStructureReport {
    /// Reports the curve at its own pillars.
    pub fn from_curve(curve: &DiscountCurve, compounding: Compounding) -> CurveResult<Self> {
        Self::at_maturities(curve, curve.tenors(), compounding)
    }

    /// Reports the curve at the given maturities.
    ///
    /// # Errors
    ///
    /// Fails if a maturity is off the curve or the maturities are not
    /// positive and strictly increasing.
    pub fn at_maturities(
        curve: &DiscountCurve,
        maturities: &[f64],
        compounding: Compounding,
    ) -> CurveResult<Self> {
        let mut points = Vec::with_capacity(maturities.len());
        let mut previous = 0.0;
        for &maturity in maturities {
            let forward = curve.forward_rate(previous, maturity, compounding)?;
            points.push(TermStructurePoint {
                maturity,
                discount_factor: curve.discount_factor(maturity)?,
                zero_rate: curve.zero_rate(maturity, compounding)?,
                forward_rate: forward.rate,
            });
            previous = maturity;
        }
        Ok(Self {
            compounding,
            points,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the report has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_report_rows() {
        let curve = DiscountCurve::new(vec![1.0, 2.0], vec![0.96, 0.90]).unwrap();
        let report = TermStructureReport::from_curve(&curve, Compounding::ANNUAL).unwrap();

        assert_eq!(report.len(), 2);
        let first = report.points[0];
        assert_relative_eq!(first.zero_rate, 1.0 / 0.96 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(first.forward_rate, first.zero_rate, epsilon = 1e-12);

        let second = report.points[1];
        assert_relative_eq!(second.discount_factor, 0.90);
        assert_relative_eq!(second.forward_rate, 0.96 / 0.90 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_report_rejects_unordered_maturities() {
        let curve = DiscountCurve::new(vec![1.0, 2.0], vec![0.96, 0.90]).unwrap();
        assert!(TermStructureReport::at_maturities(&curve, &[1.0, 0.5], Compounding::ANNUAL).is_err());
    }
}
