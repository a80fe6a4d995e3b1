//! Tian moment-matching lattice.

use ot_core::Result;

use super::{BinomialParameters, LatticeInputs, LatticeSpecification, TrinomialParameters};

/// Matches the first three moments of the lognormal step (binomial) or the
/// first two exactly with a drift-centred middle node (trinomial).
///
/// With `M = e^{b·dt}` and `V = e^{σ²dt}`, the binomial factors are
/// `u, d = ½·M·V·(V + 1 ± √(V² + 2V − 3))`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tian;

impl LatticeSpecification for Tian {
    fn name(&self) -> &'static str {
        "Tian"
    }

    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters> {
        let growth = (inputs.cost_of_carry * inputs.dt).exp();
        let v = (inputs.volatility * inputs.volatility * inputs.dt).exp();
        let root = (v * v + 2.0 * v - 3.0).sqrt();
        let up = 0.5 * growth * v * (v + 1.0 + root);
        let down = 0.5 * growth * v * (v + 1.0 - root);
        Ok(BinomialParameters::new(up, down, (growth - down) / (up - down)))
    }

    fn trinomial_parameters(&self, inputs: &LatticeInputs) -> Result<TrinomialParameters> {
        let growth = (inputs.cost_of_carry * inputs.dt).exp();
        let v = (inputs.volatility * inputs.volatility * inputs.dt).exp();
        let jump = (inputs.volatility * (3.0 * inputs.dt).sqrt()).exp();
        let (m, u, d) = (growth, growth * jump, growth / jump);
        let second_moment = growth * growth * v;
        let pu = (second_moment - growth * (m + d) + m * d) / ((u - d) * (u - m));
        let pd = (second_moment - growth * (u + m) + u * m) / ((u - d) * (m - d));
        Ok(TrinomialParameters::new(u, m, d, pu, pd))
    }
}
