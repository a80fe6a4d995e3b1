//! Proportional (yield) dividends.

use ot_core::{ensure, Rate, Real, Result, Size, Time};

use super::{DividendFunctionProvider, DividendSchedule};

/// Dividends paid as a fraction `δᵢ` of the asset price.
///
/// The lattice starts from `S·Π(1 − δᵢ)`; a node's asset price is its
/// lattice price divided by `Π(1 − δᵢ)` over the dividends not yet paid.
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionalDividends {
    schedule: DividendSchedule,
}

impl ProportionalDividends {
    /// Proportional dividends of `rates` paid at `times`; every rate must
    /// lie in `(0, 1)`.
    pub fn new(times: Vec<Time>, rates: Vec<Real>) -> Result<Self> {
        for &rate in &rates {
            ensure!(
                rate > 0.0 && rate < 1.0,
                "proportional dividend must lie in (0, 1), got {rate}"
            );
        }
        Ok(Self { schedule: DividendSchedule::new(times, rates)? })
    }
}

impl DividendFunctionProvider for ProportionalDividends {
    fn schedule(&self) -> &DividendSchedule {
        &self.schedule
    }

    fn spot_modifier(&self, spot: Real, _rate: Rate) -> Real {
        self.schedule
            .amounts()
            .iter()
            .fold(spot, |adjusted, &delta| adjusted * (1.0 - delta))
    }

    fn initial_correction(&self) -> Real {
        1.0
    }

    fn dividend_correction(&self, running: Real, _rate: Rate, _time_offset: Time, index: Size) -> Real {
        running / (1.0 - self.schedule.amounts()[index])
    }

    fn layer_base(&self, base_spot: Real, correction: Real) -> (Real, Real) {
        (base_spot * correction, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ot_core::Error;

    #[test]
    fn correction_rebuilds_spot_at_the_root() {
        let dividends = ProportionalDividends::new(vec![0.3, 0.7], vec![0.02, 0.02]).unwrap();
        let base = dividends.spot_modifier(100.0, 0.05);
        assert_relative_eq!(base, 100.0 * 0.98 * 0.98, epsilon = 1e-12);

        let mut correction = dividends.initial_correction();
        for index in 0..2 {
            correction = dividends.roll_back(correction, 0.05, 0.01);
            correction = dividends.dividend_correction(correction, 0.05, 0.0, index);
        }
        let (root_base, shift) = dividends.layer_base(base, correction);
        assert_eq!(shift, 0.0);
        assert_relative_eq!(root_base, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn gamma_nodes_are_scaled() {
        let dividends = ProportionalDividends::new(vec![0.5], vec![0.1]).unwrap();
        let prices = dividends.asset_prices_for_gamma(90.0, 1.0 / 0.9, [0.81, 1.0, 1.21]);
        assert_relative_eq!(prices[1], 100.0, epsilon = 1e-12);
        assert_relative_eq!(prices[2], 121.0, epsilon = 1e-12);
    }

    #[test]
    fn rates_outside_unit_interval_are_rejected() {
        assert!(matches!(ProportionalDividends::new(vec![0.5], vec![1.0]), Err(Error::Validation(_))));
        assert!(matches!(ProportionalDividends::new(vec![0.5], vec![-0.1]), Err(Error::Validation(_))));
    }
}
