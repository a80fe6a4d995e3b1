//! Lattice for term structures of volatility, rate and dividend yield.
//!
//! A single space step `dx` is shared by all time steps so the tree keeps
//! recombining; each step gets its own probabilities and discount factor.
//! Flat (single-path) calls fall back to [`Trigeorgis`].

use ot_core::{ensure, Rate, Real, Result, Time, Volatility};

use super::trigeorgis::trigeorgis_trinomial_probabilities;
use super::{
    BinomialParameters, LatticeInputs, LatticeSpecification, TrinomialParameters, Trigeorgis,
};

/// Time-dependent lattice. Single-path calls use the [`Trigeorgis`]
/// parameters; vector paths go through [`TimeVarying::binomial_path`] and
/// [`TimeVarying::trinomial_path`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeVarying;

/// Probabilities and discounting of one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeVaryingStep {
    /// Probability of the up move.
    pub up_probability: Real,
    /// Probability of the middle move (zero on a binomial lattice).
    pub middle_probability: Real,
    /// Probability of the down move.
    pub down_probability: Real,
    /// `e^{−r_i·dt}`.
    pub discount: Real,
}

/// Discretization of a time-dependent market.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeVaryingParameters {
    /// Shared log-space step.
    pub space_step: Real,
    /// One entry per time step, root first.
    pub steps: Vec<TimeVaryingStep>,
}

impl TimeVaryingParameters {
    /// `e^{dx}`.
    pub fn up_factor(&self) -> Real {
        self.space_step.exp()
    }

    /// `e^{−dx}`.
    pub fn down_factor(&self) -> Real {
        (-self.space_step).exp()
    }
}

/// Per-step `(σ²dt, ν·dt)` and the mean of `σ²dt + ν²dt²`.
fn step_moments(
    volatilities: &[Volatility],
    rates: &[Rate],
    dividend_yields: &[Rate],
    dt: Time,
) -> Result<(Vec<(Real, Real)>, Real)> {
    let n = volatilities.len();
    ensure!(n > 0, "time-varying inputs must not be empty");
    ensure!(
        rates.len() == n && dividend_yields.len() == n,
        "volatility, rate and dividend vectors must have equal lengths, got {n}, {} and {}",
        rates.len(),
        dividend_yields.len()
    );
    ensure!(dt.is_finite() && dt > 0.0, "time step must be finite and positive, got {dt}");
    let moments: Vec<(Real, Real)> = volatilities
        .iter()
        .zip(rates)
        .zip(dividend_yields)
        .map(|((&sigma, &r), &q)| (sigma * sigma * dt, (r - q - 0.5 * sigma * sigma) * dt))
        .collect();
    let mean = moments.iter().map(|&(var, nu_dt)| var + nu_dt * nu_dt).sum::<Real>() / n as Real;
    Ok((moments, mean))
}

impl TimeVarying {
    /// Binomial discretization: `dx = √mean(σ_i²dt + ν_i²dt²)` and
    /// `p_i = ½ + ½·ν_i·dt/dx`.
    pub fn binomial_path(
        &self,
        volatilities: &[Volatility],
        rates: &[Rate],
        dividend_yields: &[Rate],
        dt: Time,
    ) -> Result<TimeVaryingParameters> {
        let (moments, mean) = step_moments(volatilities, rates, dividend_yields, dt)?;
        let dx = mean.sqrt();
        let steps = moments
            .iter()
            .zip(rates)
            .map(|(&(_, nu_dt), &r)| {
                let pu = 0.5 + 0.5 * nu_dt / dx;
                TimeVaryingStep {
                    up_probability: pu,
                    middle_probability: 0.0,
                    down_probability: 1.0 - pu,
                    discount: (-r * dt).exp(),
                }
            })
            .collect();
        Ok(TimeVaryingParameters { space_step: dx, steps })
    }

    /// Trinomial discretization: `dx = √(3·mean(σ_i²dt + ν_i²dt²))` with
    /// the Trigeorgis probabilities of each step.
    pub fn trinomial_path(
        &self,
        volatilities: &[Volatility],
        rates: &[Rate],
        dividend_yields: &[Rate],
        dt: Time,
    ) -> Result<TimeVaryingParameters> {
        let (moments, mean) = step_moments(volatilities, rates, dividend_yields, dt)?;
        let dx = (3.0 * mean).sqrt();
        let steps = moments
            .iter()
            .zip(rates)
            .map(|(&(var, nu_dt), &r)| {
                let (pu, pd) = trigeorgis_trinomial_probabilities(var, nu_dt, dx);
                TimeVaryingStep {
                    up_probability: pu,
                    middle_probability: 1.0 - pu - pd,
                    down_probability: pd,
                    discount: (-r * dt).exp(),
                }
            })
            .collect();
        Ok(TimeVaryingParameters { space_step: dx, steps })
    }
}

impl LatticeSpecification for TimeVarying {
    fn name(&self) -> &'static str {
        "Time-varying"
    }

    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters> {
        Trigeorgis.binomial_parameters(inputs)
    }

    fn trinomial_parameters(&self, inputs: &LatticeInputs) -> Result<TrinomialParameters> {
        Trigeorgis.trinomial_parameters(inputs)
    }
}
