//! Ritchken's barrier-aligned trinomial lattice.

use ot_core::{ensure, unsupported, Rate, Real, Result, Time, Volatility};
use ot_instruments::{BarrierOptionFunctionProvider, CrossBarrierChecker};

use super::{
    finite_difference_theta, BinomialParameters, LatticeInputs, LatticeSpecification,
    ThetaInputs, TrinomialParameters,
};

/// Default stretch `λ = √1.5`, which gives a middle probability of ⅓.
const DEFAULT_STRETCH: Real = 1.224_744_871_391_589;

/// Relative offset pushing the aligned layer just beyond the barrier, so
/// that it is knocked out despite rounding.
const BARRIER_OFFSET: Real = 1e-12;

/// Trinomial lattice whose jump size is stretched so that a layer of nodes
/// falls on the barrier.
///
/// With `η = |ln(S/B)|/(σ√dt)` and `k = ⌊η/λ₀⌋`, the stretch is `λ = η/k`
/// when `k ≥ 1` and `λ₀` otherwise. Then `u = e^{λσ√dt}`, `m = 1`, and
/// `p_{u,d} = 1/(2λ²) ± ν√dt/(2λσ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adaptive {
    barrier: Real,
}

impl Adaptive {
    /// Lattice aligned with the barrier of a single-barrier contract.
    /// Double barriers fail with `UnsupportedConfiguration`.
    pub fn new<B>(provider: &B) -> Result<Self>
    where
        B: BarrierOptionFunctionProvider + ?Sized,
    {
        match *provider.checker() {
            CrossBarrierChecker::Lower(barrier) | CrossBarrierChecker::Upper(barrier) => {
                Self::with_barrier(barrier)
            }
            CrossBarrierChecker::Double { .. } => {
                unsupported!("the adaptive lattice aligns with a single barrier only")
            }
        }
    }

    /// Lattice aligned with `barrier`.
    pub fn with_barrier(barrier: Real) -> Result<Self> {
        ensure!(
            barrier.is_finite() && barrier > 0.0,
            "barrier must be finite and positive, got {barrier}"
        );
        Ok(Self { barrier })
    }

    /// Barrier the lattice is aligned with.
    pub fn barrier(&self) -> Real {
        self.barrier
    }

    fn stretch(&self, spot: Real, jump: Real) -> Real {
        let eta = (spot / self.barrier).ln().abs() / jump;
        let layers = (eta / DEFAULT_STRETCH).floor();
        if layers >= 1.0 {
            eta / layers * (1.0 + BARRIER_OFFSET)
        } else {
            DEFAULT_STRETCH
        }
    }
}

impl LatticeSpecification for Adaptive {
    fn name(&self) -> &'static str {
        "Adaptive"
    }

    fn binomial_parameters(&self, _inputs: &LatticeInputs) -> Result<BinomialParameters> {
        unsupported!("the adaptive lattice is trinomial only")
    }

    fn trinomial_parameters(&self, inputs: &LatticeInputs) -> Result<TrinomialParameters> {
        let sigma = inputs.volatility;
        let jump = sigma * inputs.dt.sqrt();
        let lambda = self.stretch(inputs.spot, jump);
        let nu = inputs.cost_of_carry - 0.5 * sigma * sigma;
        let base = 0.5 / (lambda * lambda);
        let tilt = nu * inputs.dt.sqrt() / (2.0 * lambda * sigma);
        let up = (lambda * jump).exp();
        Ok(TrinomialParameters::new(up, 1.0, 1.0 / up, base + tilt, base - tilt))
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
