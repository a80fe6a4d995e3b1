//! Lattice discretization schemes.
//!
//! A [`LatticeSpecification`] maps flat market parameters to the factors and
//! branch probabilities of one time step of a recombining tree. The pricing
//! model passes the cost of carry `b = r − q` as the scheme's drift and
//! discounts separately at the risk-free rate.
//!
//! # Schemes
//!
//! | Scheme | Binomial | Trinomial | Theta |
//! |---|---|---|---|
//! | [`CoxRossRubinstein`] | yes | yes (Boyle) | finite difference |
//! | [`JarrowRudd`] | yes | yes | PDE |
//! | [`Tian`] | yes | yes | PDE |
//! | [`LeisenReimer`] | odd steps only | no | PDE |
//! | [`Trigeorgis`] | yes | yes | PDE |
//! | [`JabbourKraminYoung`] | yes | no | PDE |
//! | [`Flexible`] | yes | no | PDE |
//! | [`Adaptive`] | no | yes | finite difference |
//! | [`TimeVarying`] | yes | yes | finite difference |

pub mod adaptive;
pub mod cox_ross_rubinstein;
pub mod flexible;
pub mod jabbour_kramin_young;
pub mod jarrow_rudd;
pub mod leisen_reimer;
pub mod tian;
pub mod time_varying;
pub mod trigeorgis;

pub use adaptive::Adaptive;
pub use cox_ross_rubinstein::CoxRossRubinstein;
pub use flexible::Flexible;
pub use jabbour_kramin_young::JabbourKraminYoung;
pub use jarrow_rudd::JarrowRudd;
pub use leisen_reimer::LeisenReimer;
pub use tian::Tian;
pub use time_varying::{TimeVarying, TimeVaryingParameters, TimeVaryingStep};
pub use trigeorgis::Trigeorgis;

use std::fmt;

use ot_core::{unsupported, Probability, Rate, Real, Result, Size, Time, Volatility};

// ─── Inputs and outputs ───────────────────────────────────────────────────────

/// Flat market and contract inputs a scheme discretizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeInputs {
    /// Spot (or dividend-adjusted spot) of the underlying.
    pub spot: Real,
    /// Strike of the contract being priced.
    pub strike: Real,
    /// Time to expiry in years.
    pub time_to_expiry: Time,
    /// Volatility.
    pub volatility: Volatility,
    /// Cost of carry `b = r − q`.
    pub cost_of_carry: Rate,
    /// Number of time steps.
    pub steps: Size,
    /// Length of one step.
    pub dt: Time,
}

/// One binomial step: `S → S·up` with `up_probability`, `S → S·down`
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialParameters {
    /// Up factor.
    pub up_factor: Real,
    /// Down factor.
    pub down_factor: Real,
    /// Probability of the up move.
    pub up_probability: Probability,
    /// Probability of the down move.
    pub down_probability: Probability,
}

impl BinomialParameters {
    /// Parameters with `down_probability = 1 − up_probability`.
    pub fn new(up_factor: Real, down_factor: Real, up_probability: Probability) -> Self {
        Self {
            up_factor,
            down_factor,
            up_probability,
            down_probability: 1.0 - up_probability,
        }
    }

    /// Factors with the risk-neutral probability `(e^{b·dt} − d)/(u − d)`.
    pub fn risk_neutral(up_factor: Real, down_factor: Real, cost_of_carry: Rate, dt: Time) -> Self {
        let growth = (cost_of_carry * dt).exp();
        Self::new(up_factor, down_factor, (growth - down_factor) / (up_factor - down_factor))
    }

    /// `up / down`.
    pub fn factor_ratio(&self) -> Real {
        self.up_factor / self.down_factor
    }
}

/// One trinomial step with up, middle and down moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrinomialParameters {
    /// Up factor.
    pub up_factor: Real,
    /// Middle factor.
    pub middle_factor: Real,
    /// Down factor.
    pub down_factor: Real,
    /// Probability of the up move.
    pub up_probability: Probability,
    /// Probability of the middle move.
    pub middle_probability: Probability,
    /// Probability of the down move.
    pub down_probability: Probability,
}

impl TrinomialParameters {
    /// Parameters with `middle_probability = 1 − up − down`.
    pub fn new(
        up_factor: Real,
        middle_factor: Real,
        down_factor: Real,
        up_probability: Probability,
        down_probability: Probability,
    ) -> Self {
        Self {
            up_factor,
            middle_factor,
            down_factor,
            up_probability,
            middle_probability: 1.0 - up_probability - down_probability,
            down_probability,
        }
    }

    /// `middle / down`.
    pub fn factor_ratio(&self) -> Real {
        self.middle_factor / self.down_factor
    }
}

/// Values read off the lattice that a theta estimate may use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThetaInputs {
    /// Root value.
    pub value: Real,
    /// Lattice delta.
    pub delta: Real,
    /// Lattice gamma.
    pub gamma: Real,
    /// Value of the centre node two steps after the root.
    pub centre_value: Real,
}

// ─── The trait ────────────────────────────────────────────────────────────────

/// A discretization scheme for recombining binomial and trinomial trees.
pub trait LatticeSpecification: fmt::Debug + Send + Sync {
    /// Scheme name, used in log events and error messages.
    fn name(&self) -> &'static str;

    /// Binomial factors and probabilities.
    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters>;

    /// Trinomial factors and probabilities. Binomial-only schemes keep the
    /// default, which fails with `UnsupportedConfiguration`.
    fn trinomial_parameters(&self, _inputs: &LatticeInputs) -> Result<TrinomialParameters> {
        unsupported!("the {} lattice has no trinomial form", self.name())
    }

    /// Theta of the priced contract.
    ///
    /// The default solves the Black-Scholes PDE for `∂V/∂t`. Cox-Ross-Rubinstein,
    /// Adaptive and the per-step time-varying path override it with
    /// [`finite_difference_theta`]; that form needs the centre node two steps
    /// out to sit at the spot.
    fn theta(
        &self,
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividend_yield: Rate,
        _dt: Time,
        inputs: &ThetaInputs,
    ) -> Real {
        pde_theta(spot, volatility, rate, dividend_yield, inputs)
    }
}

/// `Θ = rV − (r − q)SΔ − ½σ²S²Γ`.
pub fn pde_theta(
    spot: Real,
    volatility: Volatility,
    rate: Rate,
    dividend_yield: Rate,
    inputs: &ThetaInputs,
) -> Real {
    rate * inputs.value
        - (rate - dividend_yield) * spot * inputs.delta
        - 0.5 * volatility * volatility * spot * spot * inputs.gamma
}

/// `Θ = (V(2, centre) − V(0)) / (2·dt)`.
pub fn finite_difference_theta(dt: Time, inputs: &ThetaInputs) -> Real {
    (inputs.centre_value - inputs.value) / (2.0 * dt)
}
