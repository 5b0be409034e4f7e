//! Least-squares calibration of parametric curves to bond prices.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use strata_bonds::cashflows::CashflowSchedule;
use strata_math::optimization::{nelder_mead, OptimizationConfig};

use super::{NelsonSiegel, ParametricModel, Vasicek};
use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};

/// A bond quote: market price and cash flows by time in years.
///
/// Quotes without a usable market price (missing or NaN) are carried but
/// ignored by the fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuote {
    /// Observed price, if any.
    pub market_price: Option<f64>,
    /// `(time in years, amount)` pairs.
    pub cashflows: Vec<(f64, f64)>,
}

impl FitQuote {
    /// Creates a quote.
    #[must_use]
    pub fn new(market_price: Option<f64>, cashflows: Vec<(f64, f64)>) -> Self {
        Self {
            market_price,
            cashflows,
        }
    }

    /// Creates a quote from a period-indexed schedule, mapping period `k`
    /// to `k * period_length` years.
    #[must_use]
    pub fn from_schedule(market_price: Option<f64>, schedule: &CashflowSchedule, period_length: f64) -> Self {
        let cashflows = schedule
            .iter()
            .map(|cf| (f64::from(cf.period) * period_length, cf.amount))
            .collect();
        Self::new(market_price, cashflows)
    }

    /// The market price, if present and not NaN.
    #[must_use]
    pub fn observed_price(&self) -> Option<f64> {
        self.market_price.filter(|p| !p.is_nan())
    }

    /// Price of the cash flows under a model.
    pub fn model_price<M: ParametricModel>(&self, model: &M) -> f64 {
        self.cashflows
            .iter()
            .map(|&(t, amount)| amount * model.discount_factor(t))
            .sum()
    }
}

/// Sum of squared pricing errors over the quotes with observed prices.
pub fn pricing_error<M: ParametricModel>(model: &M, quotes: &[FitQuote]) -> f64 {
    quotes
        .iter()
        .filter_map(|quote| {
            quote
                .observed_price()
                .map(|market| (market - quote.model_price(model)).powi(2))
        })
        .sum()
}

/// Outcome of a curve fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult<M> {
    /// The fitted model.
    pub model: M,
    /// Fitted parameter vector.
    pub parameters: Vec<f64>,
    /// Achieved sum of squared pricing errors.
    pub objective: f64,
    /// Optimizer iterations used.
    pub iterations: u32,
    /// Whether the optimizer met its tolerances.
    pub converged: bool,
}

impl<M: ParametricModel> FitResult<M> {
    /// Samples the fitted model into a discount curve at the given tenors.
    pub fn discount_curve(&self, tenors: &[f64]) -> CurveResult<DiscountCurve> {
        DiscountCurve::from_pillars(tenors.iter().map(|&t| (t, self.model.discount_factor(t))))
    }
}

/// Fits parametric curves by Nelder-Mead minimization of squared pricing
/// errors.
///
/// The fit is deterministic. It may stop in a local minimum; the achieved
/// objective is reported rather than treated as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveFitter {
    /// Optimizer settings.
    pub config: OptimizationConfig,
}

impl CurveFitter {
    /// Creates a fitter with the given optimizer settings.
    #[must_use]
    pub fn new(config: OptimizationConfig) -> Self {
        Self { config }
    }

    /// Fits model `M` starting from `initial`, or from the model's default
    /// guess.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidInput`] if no quote has an observed
    /// price or the initial guess has the wrong length.
    pub fn fit<M: ParametricModel>(
        &self,
        quotes: &[FitQuote],
        initial: Option<&[f64]>,
    ) -> CurveResult<FitResult<M>> {
        let observed = quotes.iter().filter(|q| q.observed_price().is_some()).count();
        if observed == 0 {
            return Err(CurveError::invalid_input("no quotes with observed prices"));
        }

        let guess = initial.map_or_else(M::default_guess, <[f64]>::to_vec);
        M::from_parameters(&guess)?;

        let objective = |p: &[f64]| match M::from_parameters(p) {
            Ok(model) => pricing_error(&model, quotes),
            Err(_) => f64::INFINITY,
        };
        let result = nelder_mead(objective, &guess, &self.config)?;
        let model = M::from_parameters(&result.parameters)?;

        if result.converged {
            debug!(
                quotes = observed,
                iterations = result.iterations,
                objective = result.objective_value,
                "curve fit converged"
            );
        } else {
            warn!(
                quotes = observed,
                iterations = result.iterations,
                objective = result.objective_value,
                "curve fit stopped before meeting tolerances"
            );
        }

        Ok(FitResult {
            model,
            parameters: result.parameters,
            objective: result.objective_value,
            iterations: result.iterations,
            converged: result.converged,
        })
    }

    /// Fits a Nelson-Siegel curve.
    pub fn fit_nelson_siegel(
        &self,
        quotes: &[FitQuote],
        initial: Option<&[f64]>,
    ) -> CurveResult<FitResult<NelsonSiegel>> {
        self.fit(quotes, initial)
    }

    /// Fits a Vasicek curve.
    pub fn fit_vasicek(
        &self,
        quotes: &[FitQuote],
        initial: Option<&[f64]>,
    ) -> CurveResult<FitResult<Vasicek>> {
        self.fit(quotes, initial)
    }
}
