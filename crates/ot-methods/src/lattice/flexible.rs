//! Tian's flexible binomial lattice.

use ot_core::{Real, Result};

use super::{BinomialParameters, LatticeInputs, LatticeSpecification};

/// CRR jumps tilted by `λσ²dt` so that one terminal node lands exactly on
/// the strike, which removes the odd-even oscillation of the CRR price.
///
/// The node is `j* = round((ln(K/S) + nσ√dt)/(2σ√dt))`, clamped to the
/// terminal layer, and `u, d = e^{±σ√dt + λσ²dt}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flexible;

impl LatticeSpecification for Flexible {
    fn name(&self) -> &'static str {
        "Flexible"
    }

    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters> {
        let jump = inputs.volatility * inputs.dt.sqrt();
        let variance = inputs.volatility * inputs.volatility * inputs.dt;
        let n = inputs.steps as Real;
        let log_moneyness = (inputs.strike / inputs.spot).ln();
        let node = ((log_moneyness + n * jump) / (2.0 * jump)).round().clamp(0.0, n);
        let tilt = (log_moneyness - (2.0 * node - n) * jump) / (n * variance);
        Ok(BinomialParameters::risk_neutral(
            (jump + tilt * variance).exp(),
            (-jump + tilt * variance).exp(),
            inputs.cost_of_carry,
            inputs.dt,
        ))
    }
}
