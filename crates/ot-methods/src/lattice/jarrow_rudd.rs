//! Jarrow-Rudd equal-probability lattice.

use ot_core::Result;

use super::{BinomialParameters, LatticeInputs, LatticeSpecification, TrinomialParameters};

/// Log jumps centred on the drift `ν = b − σ²/2` with equal probabilities.
///
/// Binomial: `u, d = e^{ν·dt ± σ√dt}`, `p = ½`.
/// Trinomial: `m = e^{ν·dt}`, `u, d = m·e^{±σ√(3dt)}`, `p = (⅙, ⅔, ⅙)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JarrowRudd;

impl LatticeSpecification for JarrowRudd {
    fn name(&self) -> &'static str {
        "Jarrow-Rudd"
    }

    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters> {
        let sigma = inputs.volatility;
        let drift = (inputs.cost_of_carry - 0.5 * sigma * sigma) * inputs.dt;
        let jump = sigma * inputs.dt.sqrt();
        Ok(BinomialParameters::new((drift + jump).exp(), (drift - jump).exp(), 0.5))
    }

    fn trinomial_parameters(&self, inputs: &LatticeInputs) -> Result<TrinomialParameters> {
        let sigma = inputs.volatility;
        let drift = (inputs.cost_of_carry - 0.5 * sigma * sigma) * inputs.dt;
        let jump = sigma * (3.0 * inputs.dt).sqrt();
        Ok(TrinomialParameters::new(
            (drift + jump).exp(),
            drift.exp(),
            (drift - jump).exp(),
            1.0 / 6.0,
            1.0 / 6.0,
        ))
    }
}
