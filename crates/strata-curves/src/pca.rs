//! Principal component analysis of yield-curve histories.
//!
//! The input is a panel of observations (rows, typically dates) by
//! maturities (columns), e.g. daily yield changes. The leading components
//! are conventionally read as level, slope and curvature.

use nalgebra::{DMatrix, SymmetricEigen};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Conventional names of the leading components.
const COMPONENT_NAMES: [&str; 3] = ["Level", "Slope", "Curvature"];

/// Default number of components kept.
pub const DEFAULT_COMPONENTS: usize = 3;

/// Principal components of a yield-curve panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldCurvePca {
    /// Loadings by component, each a unit vector over maturities.
    pub components: Vec<Vec<f64>>,
    /// Variance explained by each component.
    pub explained_variance: Vec<f64>,
    /// Share of total variance explained by each component.
    pub explained_variance_ratio: Vec<f64>,
    /// Column means removed before the decomposition.
    pub mean: Vec<f64>,
}

impl YieldCurvePca {
    /// Fits the leading `n_components` components of `data`.
    ///
    /// Each component is oriented so that the longer maturities load
    /// positively on balance.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidInput`] with fewer than two
    /// observations, non-finite data, or more components than maturities.
    pub fn fit(data: &DMatrix<f64>, n_components: usize) -> CurveResult<Self> {
        let (n_obs, n_mat) = data.shape();
        if n_obs < 2 {
            return Err(CurveError::invalid_input(format!(
                "PCA needs at least two observations, got {n_obs}"
            )));
        }
        if n_components == 0 || n_components > n_mat {
            return Err(CurveError::invalid_input(format!(
                "cannot extract {n_components} components from {n_mat} maturities"
            )));
        }
        if data.iter().any(|x| !x.is_finite()) {
            return Err(CurveError::invalid_input("PCA input contains non-finite values"));
        }

        let mean: Vec<f64> = data.column_iter().map(|col| col.mean()).collect();
        let centered = DMatrix::from_fn(n_obs, n_mat, |i, j| data[(i, j)] - mean[j]);
        let covariance = centered.transpose() * &centered / (n_obs - 1) as f64;

        let eigen = SymmetricEigen::new(covariance);
        let mut order: Vec<usize> = (0..n_mat).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

        let total: f64 = eigen.eigenvalues.iter().map(|v| v.max(0.0)).sum();

        let mut components = Vec::with_capacity(n_components);
        let mut explained_variance = Vec::with_capacity(n_components);
        for &k in order.iter().take(n_components) {
            let mut loading: Vec<f64> = eigen.eigenvectors.column(k).iter().copied().collect();
            let orientation: f64 = loading.iter().zip(1u32..).map(|(v, w)| v * f64::from(w)).sum();
            if orientation < 0.0 {
                loading.iter_mut().for_each(|v| *v = -*v);
            }
            components.push(loading);
            explained_variance.push(eigen.eigenvalues[k].max(0.0));
        }

        let explained_variance_ratio = explained_variance
            .iter()
            .map(|v| if total > 0.0 { v / total } else { 0.0 })
            .collect();

        Ok(Self {
            components,
            explained_variance,
            explained_variance_ratio,
            mean,
        })
    }

    /// Number of components kept.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    /// Name of component `k`: Level, Slope, Curvature, then `PC4`, ...
    #[must_use]
    pub fn component_name(k: usize) -> String {
        COMPONENT_NAMES
            .get(k)
            .map_or_else(|| format!("PC{}", k + 1), |name| (*name).to_string())
    }

    /// Cumulative factor paths: row `t` holds, per component, the running
    /// sum over observations `0..=t` of the observation projected on the
    /// component's loadings.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidInput`] if `data` has a different
    /// number of maturities than the fit.
    pub fn factors(&self, data: &DMatrix<f64>) -> CurveResult<DMatrix<f64>> {
        if data.ncols() != self.mean.len() {
            return Err(CurveError::invalid_input(format!(
                "fitted on {} maturities, got {}",
                self.mean.len(),
                data.ncols()
            )));
        }

        let mut factors = DMatrix::zeros(data.nrows(), self.n_components());
        for (k, loading) in self.components.iter().enumerate() {
            let mut running = 0.0;
            for (t, row) in data.row_iter().enumerate() {
                running += row.iter().zip(loading).map(|(x, l)| x * l).sum::<f64>();
                factors[(t, k)] = running;
            }
        }
        Ok(factors)
    }
}
