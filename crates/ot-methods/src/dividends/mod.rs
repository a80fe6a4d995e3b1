//! Discrete dividend schedules on the lattice.
//!
//! The tree is built on a dividend-adjusted base price and every layer's
//! node prices are corrected back to actual asset prices: additively for
//! cash dividends (the present value of the dividends still to be paid),
//! multiplicatively for proportional ones. The correction is carried from
//! expiry towards the root and bumped at each ex-dividend step.

pub mod cash;
pub mod proportional;

pub use cash::CashDividends;
pub use proportional::ProportionalDividends;

use std::fmt;

use ot_core::{ensure, Rate, Real, Result, Size, Time};

/// Dividend times and amounts, validated for ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendSchedule {
    times: Vec<Time>,
    amounts: Vec<Real>,
}

impl DividendSchedule {
    /// A schedule with strictly increasing positive times and finite
    /// amounts, one amount per time.
    pub fn new(times: Vec<Time>, amounts: Vec<Real>) -> Result<Self> {
        ensure!(
            times.len() == amounts.len(),
            "got {} dividend times but {} amounts",
            times.len(),
            amounts.len()
        );
        for (i, &t) in times.iter().enumerate() {
            ensure!(t.is_finite() && t > 0.0, "dividend time must be finite and positive, got {t}");
            if i > 0 {
                ensure!(
                    t > times[i - 1],
                    "dividend times must be increasing, got {t} after {}",
                    times[i - 1]
                );
            }
        }
        for &amount in &amounts {
            ensure!(amount.is_finite(), "dividend amount must be finite, got {amount}");
        }
        Ok(Self { times, amounts })
    }

    /// Ex-dividend times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Amounts (cash) or rates (proportional).
    pub fn amounts(&self) -> &[Real] {
        &self.amounts
    }

    /// Number of dividends.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// `true` when there are no dividends.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Layer index `⌊t/dt⌋` of every dividend. Each dividend must fall
    /// strictly before expiry and no two may share a layer.
    pub fn steps(&self, dt: Time, time_to_expiry: Time) -> Result<Vec<Size>> {
        let mut steps: Vec<Size> = Vec::with_capacity(self.times.len());
        for &t in &self.times {
            ensure!(
                t < time_to_expiry,
                "dividend at {t} is not before expiry {time_to_expiry}"
            );
            let step = (t / dt).floor() as Size;
            if let Some(&previous) = steps.last() {
                ensure!(
                    step != previous,
                    "two dividends fall on lattice step {step}; use more steps"
                );
            }
            steps.push(step);
        }
        Ok(steps)
    }
}

/// How a discrete dividend schedule adjusts the lattice.
pub trait DividendFunctionProvider: fmt::Debug + Send + Sync {
    /// The underlying schedule.
    fn schedule(&self) -> &DividendSchedule;

    /// Base price the lattice is built from.
    fn spot_modifier(&self, spot: Real, rate: Rate) -> Real;

    /// Correction at expiry, after every dividend has been paid.
    fn initial_correction(&self) -> Real;

    /// Carry the correction one layer towards the root.
    fn roll_back(&self, running: Real, _rate: Rate, _dt: Time) -> Real {
        running
    }

    /// Correction after adding dividend `index` at a layer `time_offset`
    /// years from the root.
    fn dividend_correction(&self, running: Real, rate: Rate, time_offset: Time, index: Size) -> Real;

    /// Split a layer's correction into `(base, additive)`: node prices are
    /// `base·factors + additive`.
    fn layer_base(&self, base_spot: Real, correction: Real) -> (Real, Real);

    /// Layer index of every dividend.
    fn dividend_steps(&self, dt: Time, time_to_expiry: Time) -> Result<Vec<Size>> {
        self.schedule().steps(dt, time_to_expiry)
    }

    /// Actual asset prices of the two outer nodes one step after the root.
    fn asset_prices_for_delta(
        &self,
        base_spot: Real,
        correction: Real,
        down_factor: Real,
        up_factor: Real,
    ) -> [Real; 2] {
        let (base, shift) = self.layer_base(base_spot, correction);
        [base * down_factor + shift, base * up_factor + shift]
    }

    /// Actual asset prices of the low, centre and high nodes two steps
    /// after the root, given their cumulative factors.
    fn asset_prices_for_gamma(&self, base_spot: Real, correction: Real, factors: [Real; 3]) -> [Real; 3] {
        let (base, shift) = self.layer_base(base_spot, correction);
        factors.map(|factor| base * factor + shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ot_core::Error;

    #[test]
    fn steps_are_floored() {
        let schedule = DividendSchedule::new(vec![0.305, 0.7], vec![2.0, 2.0]).unwrap();
        assert_eq!(schedule.steps(0.01, 1.0).unwrap(), vec![30, 70]);
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn invalid_schedules() {
        assert!(matches!(
            DividendSchedule::new(vec![0.5, 0.3], vec![1.0, 1.0]),
            Err(Error::Validation(_))
        ));
        assert!(matches!(DividendSchedule::new(vec![0.0], vec![1.0]), Err(Error::Validation(_))));
        assert!(matches!(DividendSchedule::new(vec![0.5], vec![]), Err(Error::Validation(_))));

        let at_expiry = DividendSchedule::new(vec![1.0], vec![1.0]).unwrap();
        assert!(matches!(at_expiry.steps(0.1, 1.0), Err(Error::Validation(_))));

        let aliased = DividendSchedule::new(vec![0.31, 0.35], vec![1.0, 1.0]).unwrap();
        assert!(matches!(aliased.steps(0.1, 1.0), Err(Error::Validation(_))));
    }
}
