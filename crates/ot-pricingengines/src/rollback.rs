//! Pieces of the backward loop shared by the binomial and trinomial models.

use ot_core::{ensure, Probability, Rate, Real, Result, Size, Time};
use ot_instruments::OptionFunctionProvider1D;
use ot_methods::{DividendFunctionProvider, ThetaInputs};

use crate::greeks::{central_delta, central_gamma, TreeGreeks};

/// `true` when a barrier contract is already dead at `spot`: the spot sits
/// on or beyond the barrier, or the strike is on the knocked-out side.
pub(crate) fn knocked_out<F>(function: &F, spot: Real) -> bool
where
    F: OptionFunctionProvider1D + ?Sized,
{
    let breached = function
        .barrier_checker()
        .is_some_and(|checker| checker.crosses(spot));
    if breached || function.check_strike_behind_barrier() {
        tracing::trace!(spot, breached, "barrier contract is worthless, skipping the lattice");
        true
    } else {
        false
    }
}

/// Every branch probability must lie strictly inside (0, 1).
pub(crate) fn ensure_probabilities(lattice: &str, probabilities: &[Probability]) -> Result<()> {
    for &p in probabilities {
        ensure!(
            p > 0.0 && p < 1.0,
            "the {lattice} lattice produced probability {p} outside (0, 1); increase the number of steps"
        );
    }
    Ok(())
}

/// Node prices of one layer: `base · factors + shift`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LayerGeometry {
    pub base: Real,
    pub shift: Real,
    /// Dividend correction the layer was built from.
    pub correction: Real,
}

struct DividendState<'a> {
    provider: &'a dyn DividendFunctionProvider,
    rate: Rate,
    dt: Time,
    flagged: Vec<Size>,
    correction: Real,
}

/// Tracks the lattice base price and the running dividend correction while
/// the loop walks from expiry to the root.
pub(crate) struct LayerPricing<'a> {
    base_spot: Real,
    dividends: Option<DividendState<'a>>,
}

impl<'a> LayerPricing<'a> {
    /// No discrete dividends: every layer is built on `spot`.
    pub(crate) fn flat(spot: Real) -> Self {
        Self { base_spot: spot, dividends: None }
    }

    /// Build the lattice on the dividend-adjusted spot.
    pub(crate) fn with_dividends(
        provider: &'a dyn DividendFunctionProvider,
        spot: Real,
        rate: Rate,
        dt: Time,
        time_to_expiry: Time,
    ) -> Result<Self> {
        let base_spot = provider.spot_modifier(spot, rate);
        ensure!(
            base_spot.is_finite() && base_spot > 0.0,
            "dividend-adjusted spot must be positive, got {base_spot}"
        );
        let flagged = provider.dividend_steps(dt, time_to_expiry)?;
        Ok(Self {
            base_spot,
            dividends: Some(DividendState {
                provider,
                rate,
                dt,
                flagged,
                correction: provider.initial_correction(),
            }),
        })
    }

    /// Price the lattice factors are applied to.
    pub(crate) fn base_spot(&self) -> Real {
        self.base_spot
    }

    /// Geometry of the terminal layer.
    pub(crate) fn terminal(&self) -> LayerGeometry {
        match &self.dividends {
            None => LayerGeometry { base: self.base_spot, shift: 0.0, correction: 0.0 },
            Some(state) => {
                let (base, shift) = state.provider.layer_base(self.base_spot, state.correction);
                LayerGeometry { base, shift, correction: state.correction }
            }
        }
    }

    /// Roll the correction back to layer `step`, paying any dividend that
    /// falls on it, and return the layer's geometry.
    pub(crate) fn layer(&mut self, step: Size) -> LayerGeometry {
        let base_spot = self.base_spot;
        match &mut self.dividends {
            None => LayerGeometry { base: base_spot, shift: 0.0, correction: 0.0 },
            Some(state) => {
                let provider = state.provider;
                let mut correction = provider.roll_back(state.correction, state.rate, state.dt);
                for (index, _) in state.flagged.iter().enumerate().filter(|&(_, &s)| s == step) {
                    correction = provider.dividend_correction(
                        correction,
                        state.rate,
                        step as Real * state.dt,
                        index,
                    );
                }
                state.correction = correction;
                let (base, shift) = provider.layer_base(base_spot, correction);
                LayerGeometry { base, shift, correction }
            }
        }
    }

    /// Actual asset prices of the two outer nodes one step after the root.
    pub(crate) fn prices_for_delta(&self, correction: Real, down: Real, up: Real) -> [Real; 2] {
        match &self.dividends {
            None => [self.base_spot * down, self.base_spot * up],
            Some(state) => {
                state
                    .provider
                    .asset_prices_for_delta(self.base_spot, correction, down, up)
            }
        }
    }

    /// Actual asset prices of the low, centre and high nodes two steps
    /// after the root.
    pub(crate) fn prices_for_gamma(&self, correction: Real, factors: [Real; 3]) -> [Real; 3] {
        match &self.dividends {
            None => factors.map(|factor| self.base_spot * factor),
            Some(state) => {
                state
                    .provider
                    .asset_prices_for_gamma(self.base_spot, correction, factors)
            }
        }
    }
}

/// Option values read off the lattice one and two steps after the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Snapshot<const N: usize> {
    pub values: [Real; N],
    pub correction: Real,
}

impl<const N: usize> Default for Snapshot<N> {
    fn default() -> Self {
        Self { values: [0.0; N], correction: 0.0 }
    }
}

/// What one backward pass leaves behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rollback {
    pub value: Real,
    /// Low and high nodes one step after the root.
    pub depth1: Snapshot<2>,
    /// Low, centre and high nodes two steps after the root.
    pub depth2: Snapshot<3>,
}

impl Rollback {
    /// Greeks from the captured nodes. `delta_factors` and `gamma_factors`
    /// are the cumulative lattice factors of those nodes; the centre value
    /// at depth two feeds `theta`.
    pub(crate) fn greeks<T>(
        &self,
        pricing: &LayerPricing<'_>,
        delta_factors: [Real; 2],
        gamma_factors: [Real; 3],
        theta: T,
    ) -> TreeGreeks
    where
        T: FnOnce(&ThetaInputs) -> Real,
    {
        let [down, up] = delta_factors;
        let delta_prices = pricing.prices_for_delta(self.depth1.correction, down, up);
        let gamma_prices = pricing.prices_for_gamma(self.depth2.correction, gamma_factors);
        let delta = central_delta(self.depth1.values, delta_prices);
        let gamma = central_gamma(self.depth2.values, gamma_prices);
        let theta = theta(&ThetaInputs {
            value: self.value,
            delta,
            gamma,
            centre_value: self.depth2.values[1],
        });
        TreeGreeks { price: self.value, delta, gamma, theta }
    }
}
