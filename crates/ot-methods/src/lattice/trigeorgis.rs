//! Trigeorgis log-transformed lattice.

use ot_core::{Real, Result};

use super::{BinomialParameters, LatticeInputs, LatticeSpecification, TrinomialParameters};

/// Additive lattice in `ln S` with the first two moments of the log step
/// matched exactly; `ν = b − σ²/2`.
///
/// Binomial: `dx = √(σ²dt + ν²dt²)`, `p = ½ + ½·ν·dt/dx`.
/// Trinomial: `dx = σ√(3dt)`, `p_{u,d} = ½((σ²dt + ν²dt²)/dx² ± ν·dt/dx)`.
///
/// Both forms recombine on the spot (`u·d = 1`), but theta keeps the PDE form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trigeorgis;

impl LatticeSpecification for Trigeorgis {
    fn name(&self) -> &'static str {
        "Trigeorgis"
    }

    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters> {
        let sigma = inputs.volatility;
        let nu_dt = (inputs.cost_of_carry - 0.5 * sigma * sigma) * inputs.dt;
        let dx = (sigma * sigma * inputs.dt + nu_dt * nu_dt).sqrt();
        Ok(BinomialParameters::new(dx.exp(), (-dx).exp(), 0.5 + 0.5 * nu_dt / dx))
    }

    fn trinomial_parameters(&self, inputs: &LatticeInputs) -> Result<TrinomialParameters> {
        let sigma = inputs.volatility;
        let nu_dt = (inputs.cost_of_carry - 0.5 * sigma * sigma) * inputs.dt;
        let dx = sigma * (3.0 * inputs.dt).sqrt();
        let (pu, pd) = trigeorgis_trinomial_probabilities(sigma * sigma * inputs.dt, nu_dt, dx);
        Ok(TrinomialParameters::new(dx.exp(), 1.0, (-dx).exp(), pu, pd))
    }
}

/// `(p_u, p_d)` of the log-space trinomial step with space step `dx`.
pub(crate) fn trigeorgis_trinomial_probabilities(variance: Real, nu_dt: Real, dx: Real) -> (Real, Real) {
    let a = (variance + nu_dt * nu_dt) / (dx * dx);
    let c = nu_dt / dx;
    (0.5 * (a + c), 0.5 * (a - c))
}
