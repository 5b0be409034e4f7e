//! Backward-induction pricing on a calibrated rate tree.
//!
//! A bond maturing at step `n` needs rate columns `0..n`. Its value tree has
//! `n + 1` columns: the terminal column pays `face + coupon`, interior
//! nodes add the coupon `face · c · dt` to the discounted continuation, and
//! the root is ex-coupon. Options on the bond exercise against the
//! ex-coupon value.

use serde::{Deserialize, Serialize};
use tracing::debug;

use strata_bonds::options::{ExerciseStyle, OptionType};

use crate::error::{LatticeError, LatticeResult};
use crate::tree::{discount_step, PriceTree, RateTree};

/// A fixed-coupon bullet bond laid on the tree grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondSpec {
    /// Face value.
    pub face_value: f64,
    /// Annual coupon rate as a decimal.
    pub coupon_rate: f64,
    /// Step at which the bond matures.
    pub maturity_steps: usize,
}

impl BondSpec {
    /// Creates a bond description.
    #[must_use]
    pub fn new(face_value: f64, coupon_rate: f64, maturity_steps: usize) -> Self {
        Self {
            face_value,
            coupon_rate,
            maturity_steps,
        }
    }

    /// Unit zero-coupon bond maturing at `maturity_steps`.
    #[must_use]
    pub fn zero(maturity_steps: usize) -> Self {
        Self::new(1.0, 0.0, maturity_steps)
    }
}

/// An option on a tree-priced bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Call or put.
    pub option_type: OptionType,
    /// European or American.
    pub exercise: ExerciseStyle,
    /// Strike price.
    pub strike: f64,
    /// Step at which the option expires.
    pub expiry_steps: usize,
    /// First step at which exercise is allowed. A lockout past expiry
    /// leaves the option worthless.
    pub lockout_steps: usize,
}

impl OptionSpec {
    /// European option expiring at `expiry_steps`.
    #[must_use]
    pub fn european(option_type: OptionType, strike: f64, expiry_steps: usize) -> Self {
        Self {
            option_type,
            exercise: ExerciseStyle::European,
            strike,
            expiry_steps,
            lockout_steps: 0,
        }
    }

    /// American option exercisable from step 0 to `expiry_steps`.
    #[must_use]
    pub fn american(option_type: OptionType, strike: f64, expiry_steps: usize) -> Self {
        Self {
            exercise: ExerciseStyle::American,
            ..Self::european(option_type, strike, expiry_steps)
        }
    }

    /// Forbids exercise before `lockout_steps`.
    #[must_use]
    pub fn with_lockout(mut self, lockout_steps: usize) -> Self {
        self.lockout_steps = lockout_steps;
        self
    }

    fn can_exercise(&self, step: usize) -> bool {
        step >= self.lockout_steps
            && match self.exercise {
                ExerciseStyle::European => step == self.expiry_steps,
                ExerciseStyle::American => step <= self.expiry_steps,
            }
    }
}

/// Value breakdown of a callable bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallableValue {
    /// Value of the bond without the call.
    pub straight: f64,
    /// Value of the issuer's American call.
    pub call: f64,
    /// `straight - call`.
    pub callable: f64,
}

/// Prices instruments by backward induction through a rate tree.
#[derive(Debug, Clone, Copy)]
pub struct TreePricer<'a> {
    rates: &'a RateTree,
    time_step: f64,
}

impl<'a> TreePricer<'a> {
    /// Creates a pricer over `rates` with steps of `time_step` years.
    #[must_use]
    pub fn new(rates: &'a RateTree, time_step: f64) -> Self {
        Self { rates, time_step }
    }

    /// Coupon paid at each step.
    fn coupon(&self, bond: &BondSpec) -> f64 {
        bond.face_value * bond.coupon_rate * self.time_step
    }

    fn check_bond(&self, bond: &BondSpec) -> LatticeResult<()> {
        if bond.maturity_steps == 0 {
            return Err(LatticeError::invalid_input("bond must mature after step 0"));
        }
        if !(bond.face_value > 0.0) || !bond.coupon_rate.is_finite() {
            return Err(LatticeError::invalid_input(format!(
                "invalid bond: face {} coupon rate {}",
                bond.face_value, bond.coupon_rate
            )));
        }
        if bond.maturity_steps > self.rates.columns() {
            return Err(LatticeError::insufficient_steps(
                bond.maturity_steps,
                self.rates.columns(),
            ));
        }
        Ok(())
    }

    /// Builds the bond's value tree.
    ///
    /// Nodes after the root include the coupon paid at that step; the root
    /// does not.
    pub fn bond_tree(&self, bond: &BondSpec) -> LatticeResult<PriceTree> {
        self.check_bond(bond)?;
        let n = bond.maturity_steps;
        let coupon = self.coupon(bond);

        let mut tree = PriceTree::new(n + 1);
        tree.column_mut(n).fill(bond.face_value + coupon);
        for j in (0..n).rev() {
            let continuation = discount_step(self.rates, j, tree.column(j + 1), self.time_step);
            let paid = if j == 0 { 0.0 } else { coupon };
            for (node, value) in tree.column_mut(j).iter_mut().zip(continuation) {
                *node = value + paid;
            }
        }
        Ok(tree)
    }

    /// Ex-coupon price of the bond at the root.
    pub fn bond_price(&self, bond: &BondSpec) -> LatticeResult<f64> {
        Ok(self.bond_tree(bond)?.root())
    }

    /// Builds the value tree of an option on `bond`.
    ///
    /// # Errors
    ///
    /// The option must expire before the bond matures.
    pub fn option_tree(&self, bond: &BondSpec, option: &OptionSpec) -> LatticeResult<PriceTree> {
        let bond_values = self.bond_tree(bond)?;
        if option.expiry_steps >= bond.maturity_steps {
            return Err(LatticeError::invalid_input(format!(
                "option expiry step {} must precede bond maturity step {}",
                option.expiry_steps, bond.maturity_steps
            )));
        }
        if !option.strike.is_finite() {
            return Err(LatticeError::invalid_input("strike must be finite"));
        }

        let coupon = self.coupon(bond);
        let ex_coupon = |i: usize, j: usize| {
            let paid = if j == 0 { 0.0 } else { coupon };
            bond_values.get(i, j) - paid
        };
        let payoff = |i: usize, j: usize| option.option_type.intrinsic(ex_coupon(i, j), option.strike);

        let expiry = option.expiry_steps;
        let mut tree = PriceTree::new(expiry + 1);
        if option.can_exercise(expiry) {
            for (i, node) in tree.column_mut(expiry).iter_mut().enumerate() {
                *node = payoff(i, expiry);
            }
        }

        for j in (0..expiry).rev() {
            let continuation = discount_step(self.rates, j, tree.column(j + 1), self.time_step);
            let exercisable = option.can_exercise(j);
            for (i, (node, value)) in tree.column_mut(j).iter_mut().zip(continuation).enumerate() {
                *node = if exercisable { value.max(payoff(i, j)) } else { value };
            }
        }
        Ok(tree)
    }

    /// Price of an option on `bond`.
    pub fn option_price(&self, bond: &BondSpec, option: &OptionSpec) -> LatticeResult<f64> {
        Ok(self.option_tree(bond, option)?.root())
    }

    /// Values a bond callable at `call_price` from `lockout_steps` until the
    /// step before maturity. A lockout at or past maturity leaves the call
    /// worthless.
    pub fn callable_bond(
        &self,
        bond: &BondSpec,
        call_price: f64,
        lockout_steps: usize,
    ) -> LatticeResult<CallableValue> {
        let straight = self.bond_price(bond)?;
        let call = OptionSpec::american(OptionType::Call, call_price, bond.maturity_steps - 1)
            .with_lockout(lockout_steps);
        let call = self.option_price(bond, &call)?;

        debug!(
            straight,
            call,
            call_price,
            lockout_steps,
            "callable bond valued"
        );
        Ok(CallableValue {
            straight,
            call,
            callable: straight - call,
        })
    }
}
