//! Leisen-Reimer lattice.

use ot_core::{unsupported, Real, Result, Size};

use super::{BinomialParameters, LatticeInputs, LatticeSpecification};

/// Strike-centred binomial lattice built from the Peizer-Pratt inversion of
/// the Black-Scholes `d1` and `d2`. Converges smoothly, at order one in the
/// number of steps, which must be odd.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeisenReimer;

impl LatticeSpecification for LeisenReimer {
    fn name(&self) -> &'static str {
        "Leisen-Reimer"
    }

    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters> {
        if inputs.steps % 2 == 0 {
            unsupported!(
                "the Leisen-Reimer lattice needs an odd number of steps, got {}",
                inputs.steps
            );
        }
        let sigma = inputs.volatility;
        let std_dev = sigma * inputs.time_to_expiry.sqrt();
        let d1 = ((inputs.spot / inputs.strike).ln()
            + (inputs.cost_of_carry + 0.5 * sigma * sigma) * inputs.time_to_expiry)
            / std_dev;
        let d2 = d1 - std_dev;

        let growth = (inputs.cost_of_carry * inputs.dt).exp();
        let pu = peizer_pratt_2(d2, inputs.steps);
        let up = growth * peizer_pratt_2(d1, inputs.steps) / pu;
        let down = (growth - pu * up) / (1.0 - pu);
        Ok(BinomialParameters::new(up, down, pu))
    }
}

/// Peizer-Pratt method 2 inversion: maps a normal quantile `z` to the
/// probability of an `n`-step binomial, `n` odd.
fn peizer_pratt_2(z: Real, n: Size) -> Real {
    let nf = n as Real;
    let r = z / (nf + 1.0 / 3.0 + 0.1 / (nf + 1.0));
    let ex = (-r * r * (nf + 1.0 / 6.0)).exp();
    0.5 + z.signum() * 0.5 * (1.0 - ex).sqrt()
}
