//! Greeks bundles and the finite differences that fill them.
//!
//! Lattice nodes are not evenly spaced in price, so delta and gamma are
//! non-uniform central differences on the actual (dividend-corrected) asset
//! prices of the nodes one and two steps after the root.

use ot_core::Real;

/// Price and sensitivities of a one-asset contract.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TreeGreeks {
    /// Value at the root.
    pub price: Real,
    /// `∂V/∂S`.
    pub delta: Real,
    /// `∂²V/∂S²`.
    pub gamma: Real,
    /// `∂V/∂t`, per year.
    pub theta: Real,
}

impl TreeGreeks {
    /// All fields zero, the result for a contract that is already dead.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Price and sensitivities of a two-asset contract.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TwoAssetGreeks {
    /// Value at the root.
    pub price: Real,
    /// `∂V/∂S₁`.
    pub delta1: Real,
    /// `∂V/∂S₂`.
    pub delta2: Real,
    /// `∂V/∂t`, per year.
    pub theta: Real,
    /// `∂²V/∂S₁²`.
    pub gamma1: Real,
    /// `∂²V/∂S₂²`.
    pub gamma2: Real,
    /// `∂²V/∂S₁∂S₂`.
    pub cross_gamma: Real,
}

/// Slope between two nodes: `(V₁ − V₀)/(S₁ − S₀)`.
#[inline]
pub fn central_delta(values: [Real; 2], asset_prices: [Real; 2]) -> Real {
    (values[1] - values[0]) / (asset_prices[1] - asset_prices[0])
}

/// Difference of the two adjacent slopes over half the outer span:
///
/// $$\Gamma = \frac{\frac{V_2 - V_1}{S_2 - S_1} - \frac{V_1 - V_0}{S_1 - S_0}}{\tfrac12 (S_2 - S_0)}$$
#[inline]
pub fn central_gamma(values: [Real; 3], asset_prices: [Real; 3]) -> Real {
    let upper = central_delta([values[1], values[2]], [asset_prices[1], asset_prices[2]]);
    let lower = central_delta([values[0], values[1]], [asset_prices[0], asset_prices[1]]);
    (upper - lower) / (0.5 * (asset_prices[2] - asset_prices[0]))
}

/// Mixed derivative from the four corners of a 3×3 grid stored row-major
/// over asset 1.
pub fn cross_gamma(values: &[Real; 9], asset_prices1: [Real; 3], asset_prices2: [Real; 3]) -> Real {
    (values[8] - values[6] - values[2] + values[0])
        / ((asset_prices1[2] - asset_prices1[0]) * (asset_prices2[2] - asset_prices2[0]))
}
