//! Payoff and backward-recursion rules consumed by the tree pricing models.
//!
//! A function provider knows nothing about the lattice: the pricing model
//! hands it the terminal node prices and, for every earlier layer, a small
//! context struct ([`BinomialLayer`], [`TrinomialLayer`], [`TwoAssetLayer`])
//! with the discount factor, the branch probabilities and enough geometry to
//! rebuild the asset price at any node. The provider writes the option values
//! of that layer into an output buffer.
//!
//! The asset price of node `j` at layer `i` is
//!
//! ```text
//! base · down^i · ratio^j + dividend_correction
//! ```
//!
//! with `ratio = up/down` on a binomial lattice and `middle/down` on a
//! trinomial one. Nodes are ordered from the lowest asset price upwards.

use std::fmt;

use ot_core::{ensure, DiscountFactor, Probability, Real, Result, Size, Time};

use crate::barrier::CrossBarrierChecker;
use crate::option_type::OptionType;

// ────────────────────────────────────────────────────────────────────────────
// Contract terms
// ────────────────────────────────────────────────────────────────────────────

/// Parameters every lattice contract carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractTerms {
    strike: Real,
    time_to_expiry: Time,
    steps: Size,
    option_type: OptionType,
}

impl ContractTerms {
    /// Terms of a one-asset contract: the strike must be finite and positive.
    pub fn new(strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType) -> Result<Self> {
        ensure!(
            strike.is_finite() && strike > 0.0,
            "strike must be finite and positive, got {strike}"
        );
        Self::checked(strike, time_to_expiry, steps, option_type)
    }

    /// Terms of a two-asset contract: a zero strike is allowed.
    pub fn two_asset(strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType) -> Result<Self> {
        ensure!(
            strike.is_finite() && strike >= 0.0,
            "strike must be finite and non-negative, got {strike}"
        );
        Self::checked(strike, time_to_expiry, steps, option_type)
    }

    fn checked(strike: Real, time_to_expiry: Time, steps: Size, option_type: OptionType) -> Result<Self> {
        ensure!(
            time_to_expiry.is_finite() && time_to_expiry > 0.0,
            "time to expiry must be finite and positive, got {time_to_expiry}"
        );
        ensure!(steps > 2, "number of steps should be greater than 2, got {steps}");
        Ok(Self { strike, time_to_expiry, steps, option_type })
    }

    /// Strike.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Time to expiry in years.
    pub fn time_to_expiry(&self) -> Time {
        self.time_to_expiry
    }

    /// Number of time steps of the lattice.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Length of one time step.
    pub fn dt(&self) -> Time {
        self.time_to_expiry / self.steps as Real
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layer contexts
// ────────────────────────────────────────────────────────────────────────────

/// Asset prices of one layer, lowest first.
#[derive(Debug, Clone)]
pub struct NodePrices {
    next: Real,
    ratio: Real,
    shift: Real,
    remaining: Size,
}

impl NodePrices {
    /// `count` prices `lowest · ratio^j + shift`.
    pub fn new(lowest: Real, ratio: Real, shift: Real, count: Size) -> Self {
        Self { next: lowest, ratio, shift, remaining: count }
    }
}

impl Iterator for NodePrices {
    type Item = Real;

    #[inline]
    fn next(&mut self) -> Option<Real> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let price = self.next + self.shift;
        self.next *= self.ratio;
        Some(price)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for NodePrices {}

/// Context for folding one binomial layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialLayer {
    /// Index of the layer being computed (root is 0).
    pub step: Size,
    /// Discount factor over one step.
    pub discount: DiscountFactor,
    /// Probability of the up branch.
    pub up_probability: Probability,
    /// Probability of the down branch.
    pub down_probability: Probability,
    /// Lattice base price the nodes are built from.
    pub base_asset_price: Real,
    /// Additive shift applied to every node price.
    pub dividend_correction: Real,
    /// Down factor of the lattice.
    pub down_factor: Real,
    /// `up / down`.
    pub factor_ratio: Real,
}

impl BinomialLayer {
    /// Number of nodes in the layer.
    pub fn width(&self) -> Size {
        self.step + 1
    }

    /// Asset prices of the layer's nodes, lowest first.
    pub fn asset_prices(&self) -> NodePrices {
        let lowest = self.base_asset_price * self.down_factor.powi(self.step as i32);
        NodePrices::new(lowest, self.factor_ratio, self.dividend_correction, self.width())
    }

    /// Asset price of the middle of the layer before any dividend shift.
    pub fn centre_asset_price(&self) -> Real {
        self.base_asset_price
            * self.down_factor.powi(self.step as i32)
            * self.factor_ratio.powf(0.5 * self.step as Real)
            + self.dividend_correction
    }
}

/// Context for folding one trinomial layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrinomialLayer {
    /// Index of the layer being computed (root is 0).
    pub step: Size,
    /// Discount factor over one step.
    pub discount: DiscountFactor,
    /// Probability of the up branch.
    pub up_probability: Probability,
    /// Probability of the middle branch.
    pub middle_probability: Probability,
    /// Probability of the down branch.
    pub down_probability: Probability,
    /// Lattice base price the nodes are built from.
    pub base_asset_price: Real,
    /// Additive shift applied to every node price.
    pub dividend_correction: Real,
    /// Down factor of the lattice.
    pub down_factor: Real,
    /// `middle / down`.
    pub factor_ratio: Real,
}

impl TrinomialLayer {
    /// Number of nodes in the layer.
    pub fn width(&self) -> Size {
        2 * self.step + 1
    }

    /// Asset prices of the layer's nodes, lowest first.
    pub fn asset_prices(&self) -> NodePrices {
        let lowest = self.base_asset_price * self.down_factor.powi(self.step as i32);
        NodePrices::new(lowest, self.factor_ratio, self.dividend_correction, self.width())
    }

    /// Asset price of the middle node.
    pub fn centre_asset_price(&self) -> Real {
        self.base_asset_price
            * self.down_factor.powi(self.step as i32)
            * self.factor_ratio.powi(self.step as i32)
            + self.dividend_correction
    }
}

/// Context for folding one layer of the two-asset binomial lattice.
///
/// Values are stored row-major: node `(a, c)` of a layer with width `w`
/// lives at `a·w + c`, where `a` counts asset-1 up moves and `c` asset-2 up
/// moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoAssetLayer {
    /// Index of the layer being computed (root is 0).
    pub step: Size,
    /// Discount factor over one step.
    pub discount: DiscountFactor,
    /// Both assets move up.
    pub up_up_probability: Probability,
    /// Asset 1 up, asset 2 down.
    pub up_down_probability: Probability,
    /// Asset 1 down, asset 2 up.
    pub down_up_probability: Probability,
    /// Both assets move down.
    pub down_down_probability: Probability,
    /// Spot of asset 1.
    pub base_asset_price1: Real,
    /// Spot of asset 2.
    pub base_asset_price2: Real,
    /// Down factor of asset 1.
    pub down_factor1: Real,
    /// Down factor of asset 2.
    pub down_factor2: Real,
    /// `up / down` of asset 1.
    pub factor_ratio1: Real,
    /// `up / down` of asset 2.
    pub factor_ratio2: Real,
}

impl TwoAssetLayer {
    /// Number of nodes along each asset axis.
    pub fn width(&self) -> Size {
        self.step + 1
    }

    /// Prices of asset 1 along the layer, lowest first.
    pub fn asset_prices1(&self) -> NodePrices {
        let lowest = self.base_asset_price1 * self.down_factor1.powi(self.step as i32);
        NodePrices::new(lowest, self.factor_ratio1, 0.0, self.width())
    }

    /// Prices of asset 2 along the layer, lowest first.
    pub fn asset_prices2(&self) -> NodePrices {
        let lowest = self.base_asset_price2 * self.down_factor2.powi(self.step as i32);
        NodePrices::new(lowest, self.factor_ratio2, 0.0, self.width())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layer folds
// ────────────────────────────────────────────────────────────────────────────

/// Fold a binomial layer: `node(price, continuation)` receives the node's
/// asset price and its discounted expectation.
///
/// `values` holds the `width + 1` values of the layer above; `out` receives
/// `width` values.
#[inline]
pub fn fold_binomial<F>(layer: &BinomialLayer, values: &[Real], out: &mut [Real], mut node: F)
where
    F: FnMut(Real, Real) -> Real,
{
    let width = layer.width();
    let (pu, pd, disc) = (layer.up_probability, layer.down_probability, layer.discount);
    for ((slot, price), pair) in out[..width]
        .iter_mut()
        .zip(layer.asset_prices())
        .zip(values[..width + 1].windows(2))
    {
        let continuation = disc * (pu * pair[1] + pd * pair[0]);
        *slot = node(price, continuation);
    }
}

/// Fold a trinomial layer: `values` holds the `width + 2` values above.
#[inline]
pub fn fold_trinomial<F>(layer: &TrinomialLayer, values: &[Real], out: &mut [Real], mut node: F)
where
    F: FnMut(Real, Real) -> Real,
{
    let width = layer.width();
    let (pu, pm, pd, disc) = (
        layer.up_probability,
        layer.middle_probability,
        layer.down_probability,
        layer.discount,
    );
    for ((slot, price), triple) in out[..width]
        .iter_mut()
        .zip(layer.asset_prices())
        .zip(values[..width + 2].windows(3))
    {
        let continuation = disc * (pu * triple[2] + pm * triple[1] + pd * triple[0]);
        *slot = node(price, continuation);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// One-asset providers
// ────────────────────────────────────────────────────────────────────────────

/// Payoff and recursion rule of a one-asset lattice contract.
pub trait OptionFunctionProvider1D: fmt::Debug + Send + Sync {
    /// Contract terms.
    fn terms(&self) -> &ContractTerms;

    /// Payoff when exercised or expiring with the asset at `asset_price`.
    fn payoff(&self, asset_price: Real) -> Real;

    /// Strike, for contracts where it carries meaning.
    fn strike(&self) -> Result<Real> {
        Ok(self.terms().strike())
    }

    /// +1 for calls and −1 for puts, for contracts where it carries meaning.
    fn sign(&self) -> Result<Real> {
        Ok(self.terms().option_type().sign())
    }

    /// Time to expiry in years.
    fn time_to_expiry(&self) -> Time {
        self.terms().time_to_expiry()
    }

    /// Number of time steps.
    fn steps(&self) -> Size {
        self.terms().steps()
    }

    /// Whether the holder may exercise at `step`.
    fn early_exercise(&self, _step: Size) -> bool {
        false
    }

    /// Knock-out predicate, for barrier contracts.
    fn barrier_checker(&self) -> Option<&CrossBarrierChecker> {
        None
    }

    /// `true` when the contract is worthless whatever the path.
    fn check_strike_behind_barrier(&self) -> bool {
        false
    }

    /// Value at a node given its discounted expectation.
    fn node_value(&self, step: Size, asset_price: Real, continuation: Real) -> Real {
        if self.early_exercise(step) {
            continuation.max(self.payoff(asset_price))
        } else {
            continuation
        }
    }

    /// Terminal values of the binomial lattice (`steps + 1` nodes).
    fn payoff_at_expiry(&self, lowest_asset_price: Real, factor_ratio: Real) -> Vec<Real> {
        NodePrices::new(lowest_asset_price, factor_ratio, 0.0, self.steps() + 1)
            .map(|price| self.payoff(price))
            .collect()
    }

    /// Terminal values of the trinomial lattice (`2·steps + 1` nodes).
    fn payoff_at_expiry_trinomial(&self, lowest_asset_price: Real, factor_ratio: Real) -> Vec<Real> {
        NodePrices::new(lowest_asset_price, factor_ratio, 0.0, 2 * self.steps() + 1)
            .map(|price| self.payoff(price))
            .collect()
    }

    /// Fold one binomial layer into `out`.
    fn next_layer_values(&self, layer: &BinomialLayer, values: &[Real], out: &mut [Real]) {
        fold_binomial(layer, values, out, |price, continuation| {
            self.node_value(layer.step, price, continuation)
        });
    }

    /// Fold one trinomial layer into `out`.
    fn next_layer_values_trinomial(&self, layer: &TrinomialLayer, values: &[Real], out: &mut [Real]) {
        fold_trinomial(layer, values, out, |price, continuation| {
            self.node_value(layer.step, price, continuation)
        });
    }
}

/// A one-asset contract that is knocked out at a barrier.
///
/// The adaptive lattice aligns its nodes with [`checker`](Self::checker).
pub trait BarrierOptionFunctionProvider: OptionFunctionProvider1D {
    /// Knock-out predicate.
    fn checker(&self) -> &CrossBarrierChecker;
}

// ────────────────────────────────────────────────────────────────────────────
// Two-asset providers
// ────────────────────────────────────────────────────────────────────────────

/// Payoff and recursion rule of a two-asset lattice contract.
pub trait OptionFunctionProvider2D: fmt::Debug + Send + Sync {
    /// Contract terms.
    fn terms(&self) -> &ContractTerms;

    /// Payoff with the assets at `asset_price1` and `asset_price2`.
    fn payoff(&self, asset_price1: Real, asset_price2: Real) -> Real;

    /// Strike, for contracts where it carries meaning.
    fn strike(&self) -> Result<Real> {
        Ok(self.terms().strike())
    }

    /// +1 for calls and −1 for puts, for contracts where it carries meaning.
    fn sign(&self) -> Result<Real> {
        Ok(self.terms().option_type().sign())
    }

    /// Time to expiry in years.
    fn time_to_expiry(&self) -> Time {
        self.terms().time_to_expiry()
    }

    /// Number of time steps.
    fn steps(&self) -> Size {
        self.terms().steps()
    }

    /// Whether the holder may exercise at `step`.
    fn early_exercise(&self, _step: Size) -> bool {
        false
    }

    /// Terminal values, `(steps + 1)²` nodes row-major over asset 1.
    fn payoff_at_expiry(
        &self,
        lowest_asset_price1: Real,
        lowest_asset_price2: Real,
        factor_ratio1: Real,
        factor_ratio2: Real,
    ) -> Vec<Real> {
        let width = self.steps() + 1;
        let mut values = Vec::with_capacity(width * width);
        for s1 in NodePrices::new(lowest_asset_price1, factor_ratio1, 0.0, width) {
            for s2 in NodePrices::new(lowest_asset_price2, factor_ratio2, 0.0, width) {
                values.push(self.payoff(s1, s2));
            }
        }
        values
    }

    /// Fold one layer: `values` holds the `(width + 1)²` values above.
    fn next_layer_values(&self, layer: &TwoAssetLayer, values: &[Real], out: &mut [Real]) {
        let width = layer.width();
        let above = width + 1;
        let exercise = self.early_exercise(layer.step);
        for (a, s1) in layer.asset_prices1().enumerate() {
            let up_row = &values[(a + 1) * above..(a + 2) * above];
            let down_row = &values[a * above..(a + 1) * above];
            for (c, s2) in layer.asset_prices2().enumerate() {
                let continuation = layer.discount
                    * (layer.up_up_probability * up_row[c + 1]
                        + layer.up_down_probability * up_row[c]
                        + layer.down_up_probability * down_row[c + 1]
                        + layer.down_down_probability * down_row[c]);
                out[a * width + c] = if exercise {
                    continuation.max(self.payoff(s1, s2))
                } else {
                    continuation
                };
            }
        }
    }
}
