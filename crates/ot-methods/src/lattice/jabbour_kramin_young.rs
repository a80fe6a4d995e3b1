//! Jabbour-Kramin-Young drift-centred lattice.

use ot_core::Result;

use super::{BinomialParameters, LatticeInputs, LatticeSpecification};

/// Log jumps `ν·dt ± σ√dt` around the lognormal drift `ν = b − σ²/2`,
/// paired with the exact risk-neutral probability
/// `p = (e^{b·dt} − d)/(u − d)` rather than ½.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JabbourKraminYoung;

impl LatticeSpecification for JabbourKraminYoung {
    fn name(&self) -> &'static str {
        "Jabbour-Kramin-Young"
    }

    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters> {
        let sigma = inputs.volatility;
        let drift = (inputs.cost_of_carry - 0.5 * sigma * sigma) * inputs.dt;
        let jump = sigma * inputs.dt.sqrt();
        Ok(BinomialParameters::risk_neutral(
            (drift + jump).exp(),
            (drift - jump).exp(),
            inputs.cost_of_carry,
            inputs.dt,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::test_support::atm_inputs;
    use ot_core::Error;

    #[test]
    fn probability_is_close_to_half() {
        let p = JabbourKraminYoung.binomial_parameters(&atm_inputs(200)).unwrap();
        assert!((p.up_probability - 0.5).abs() < 1e-2);
        assert!(p.up_probability != 0.5);
    }

    #[test]
    fn has_no_trinomial_form() {
        let err = JabbourKraminYoung.trinomial_parameters(&atm_inputs(200)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConfiguration(_)));
    }
}
