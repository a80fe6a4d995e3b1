//! Escrowed cash dividends.

use ot_core::{ensure, Rate, Real, Result, Size, Time};

use super::{DividendFunctionProvider, DividendSchedule};

/// Known cash amounts paid at fixed times.
///
/// The lattice diffuses `S* = S − Σ Dᵢ·e^{−r·tᵢ}`; a node's asset price is
/// its lattice price plus the present value, at the node's time, of the
/// dividends not yet paid.
#[derive(Debug, Clone, PartialEq)]
pub struct CashDividends {
    schedule: DividendSchedule,
}

impl CashDividends {
    /// Cash dividends of `amounts` paid at `times`; every amount must be
    /// positive.
    pub fn new(times: Vec<Time>, amounts: Vec<Real>) -> Result<Self> {
        for &amount in &amounts {
            ensure!(amount > 0.0, "cash dividend must be positive, got {amount}");
        }
        Ok(Self { schedule: DividendSchedule::new(times, amounts)? })
    }

    /// Present value at time zero of every dividend.
    pub fn present_value(&self, rate: Rate) -> Real {
        self.schedule
            .times()
            .iter()
            .zip(self.schedule.amounts())
            .map(|(&t, &amount)| amount * (-rate * t).exp())
            .sum()
    }
}

impl DividendFunctionProvider for CashDividends {
    fn schedule(&self) -> &DividendSchedule {
        &self.schedule
    }

    fn spot_modifier(&self, spot: Real, rate: Rate) -> Real {
        spot - self.present_value(rate)
    }

    fn initial_correction(&self) -> Real {
        0.0
    }

    fn roll_back(&self, running: Real, rate: Rate, dt: Time) -> Real {
        running * (-rate * dt).exp()
    }

    fn dividend_correction(&self, running: Real, rate: Rate, time_offset: Time, index: Size) -> Real {
        let t = self.schedule.times()[index];
        running + self.schedule.amounts()[index] * (-rate * (t - time_offset)).exp()
    }

    fn layer_base(&self, base_spot: Real, correction: Real) -> (Real, Real) {
        (base_spot, correction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ot_core::Error;

    #[test]
    fn correction_rebuilds_spot_at_the_root() {
        let dividends = CashDividends::new(vec![0.3, 0.7], vec![2.0, 2.0]).unwrap();
        let (rate, steps, t) = (0.05, 200, 1.0);
        let dt = t / steps as Real;
        let spot = 100.0;
        let base = dividends.spot_modifier(spot, rate);
        let flagged = dividends.dividend_steps(dt, t).unwrap();

        let mut correction = dividends.initial_correction();
        for i in (0..steps).rev() {
            correction = dividends.roll_back(correction, rate, dt);
            for (index, _) in flagged.iter().enumerate().filter(|&(_, &s)| s == i) {
                correction = dividends.dividend_correction(correction, rate, i as Real * dt, index);
            }
        }
        let (root_base, shift) = dividends.layer_base(base, correction);
        assert_relative_eq!(root_base + shift, spot, epsilon = 1e-10);
    }

    #[test]
    fn greek_nodes_are_shifted() {
        let dividends = CashDividends::new(vec![0.5], vec![1.0]).unwrap();
        let prices = dividends.asset_prices_for_delta(99.0, 0.9, 0.9, 1.1);
        assert_relative_eq!(prices[0], 99.0 * 0.9 + 0.9);
        assert_relative_eq!(prices[1], 99.0 * 1.1 + 0.9);
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert!(matches!(CashDividends::new(vec![0.5], vec![0.0]), Err(Error::Validation(_))));
    }
}
