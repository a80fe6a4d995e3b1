//! Cox-Ross-Rubinstein lattice, with Boyle's trinomial extension.

use ot_core::{Rate, Real, Result, Time, Volatility};

use super::{
    finite_difference_theta, BinomialParameters, LatticeInputs, LatticeSpecification,
    ThetaInputs, TrinomialParameters,
};

/// Equal and opposite log jumps `±σ√dt`; the drift lives in the
/// probabilities.
///
/// Binomial: `u = e^{σ√dt}`, `d = 1/u`, `p = (e^{b·dt} − d)/(u − d)`.
/// Trinomial (Boyle): `u = e^{σ√(2dt)}`, `m = 1`, `d = 1/u`, with
/// probabilities built from the half-step binomial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoxRossRubinstein;

impl LatticeSpecification for CoxRossRubinstein {
    fn name(&self) -> &'static str {
        "Cox-Ross-Rubinstein"
    }

    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters> {
        let up = (inputs.volatility * inputs.dt.sqrt()).exp();
        Ok(BinomialParameters::risk_neutral(up, 1.0 / up, inputs.cost_of_carry, inputs.dt))
    }

    fn trinomial_parameters(&self, inputs: &LatticeInputs) -> Result<TrinomialParameters> {
        let half_jump = (inputs.volatility * (0.5 * inputs.dt).sqrt()).exp();
        let half_growth = (0.5 * inputs.cost_of_carry * inputs.dt).exp();
        let spread = half_jump - 1.0 / half_jump;
        let pu = ((half_growth - 1.0 / half_jump) / spread).powi(2);
        let pd = ((half_jump - half_growth) / spread).powi(2);
        let up = half_jump * half_jump;
        Ok(TrinomialParameters::new(up, 1.0, 1.0 / up, pu, pd))
    }

    fn theta(
        &self,
        _spot: Real,
        _volatility: Volatility,
        _rate: Rate,
        _dividend_yield: Rate,
        dt: Time,
        inputs: &ThetaInputs,
    ) -> Real {
        finite_difference_theta(dt, inputs)
    }
}
