//! Binomial tree pricing model.
//!
//! Composes a [`LatticeSpecification`] with a payoff provider and, when
//! given one, a discrete dividend schedule. The lattice is discretized once
//! up front; the backward loop then folds one layer per step through the
//! provider, ping-ponging two buffers sized for the terminal layer.
//!
//! Node `j` of layer `i` sits at `base · d^i · (u/d)^j + shift`. Greeks come
//! from the nodes one and two steps after the root:
//!
//! $$\Delta = \frac{V_{1,1} - V_{1,0}}{S u - S d}$$
//!
//! and gamma from the adjacent slopes of layer two. Theta is delegated to the
//! lattice.
//!
//! Two-asset contracts run on the four-branch additive tree of
//! Clewlow & Strickland with `Δx_k = σ_k√dt` and `ν_k = r − q_k − ½σ_k²`.

use ot_core::{DiscountFactor, Probability, Rate, Real, Result, Size, Volatility};
use ot_instruments::{BinomialLayer, OptionFunctionProvider1D, OptionFunctionProvider2D, TwoAssetLayer};
use ot_methods::{
    finite_difference_theta, BinomialParameters, DividendFunctionProvider, LatticeInputs,
    LatticeSpecification, TimeVarying, TimeVaryingParameters,
};
use tracing::debug;

use crate::greeks::{central_delta, central_gamma, cross_gamma, TreeGreeks, TwoAssetGreeks};
use crate::market::{MarketSnapshot, TimeVaryingMarket, TwoAssetMarket};
use crate::rollback::{ensure_probabilities, knocked_out, LayerPricing, Rollback, Snapshot};

/// Prices one- and two-asset contracts on recombining binomial trees.
///
/// The model is stateless; every entry point validates its inputs before
/// any lattice work and returns `Error::Validation`,
/// `Error::UnsupportedConfiguration` or `Error::NotApplicable` on failure.
/// A barrier contract that is already knocked out prices at exactly zero
/// without consulting the lattice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinomialTreeOptionPricingModel;

/// A completed pass on a constant lattice.
struct Solved<'a> {
    rollback: Rollback,
    pricing: LayerPricing<'a>,
    parameters: BinomialParameters,
    market: MarketSnapshot,
    dt: Real,
}

/// A completed pass on a time-varying lattice.
struct SolvedPath {
    rollback: Rollback,
    pricing: LayerPricing<'static>,
    path: TimeVaryingParameters,
    dt: Real,
}

/// Backward induction over `function.steps()` layers. `step_parameters`
/// yields the discount factor and the up/down probabilities of each layer.
fn roll_back<F, P>(
    function: &F,
    pricing: &mut LayerPricing<'_>,
    down_factor: Real,
    factor_ratio: Real,
    mut step_parameters: P,
) -> Rollback
where
    F: OptionFunctionProvider1D + ?Sized,
    P: FnMut(Size) -> (DiscountFactor, Probability, Probability),
{
    let steps = function.steps();
    let terminal = pricing.terminal();
    let lowest = terminal.base * down_factor.powi(steps as i32);
    let mut values = function.payoff_at_expiry(lowest, factor_ratio);
    let mut out = vec![0.0; values.len()];
    let mut depth1 = Snapshot::default();
    let mut depth2 = Snapshot::default();

    for step in (0..steps).rev() {
        let geometry = pricing.layer(step);
        let (discount, up_probability, down_probability) = step_parameters(step);
        let layer = BinomialLayer {
            step,
            discount,
            up_probability,
            down_probability,
            base_asset_price: geometry.base,
            dividend_correction: geometry.shift,
            down_factor,
            factor_ratio,
        };
        function.next_layer_values(&layer, &values, &mut out);
        std::mem::swap(&mut values, &mut out);
        match step {
            2 => {
                depth2 = Snapshot {
                    values: [values[0], values[1], values[2]],
                    correction: geometry.correction,
                }
            }
            1 => {
                depth1 = Snapshot {
                    values: [values[0], values[1]],
                    correction: geometry.correction,
                }
            }
            _ => {}
        }
    }

    Rollback { value: values[0], depth1, depth2 }
}

impl BinomialTreeOptionPricingModel {
    /// Price with a continuous dividend yield.
    pub fn price<L, F>(
        &self,
        lattice: &L,
        function: &F,
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividend_yield: Rate,
    ) -> Result<Real>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = MarketSnapshot::new(spot, volatility, rate, dividend_yield)?;
        Ok(self
            .solve(lattice, function, market, None)?
            .map_or(0.0, |solved| solved.rollback.value))
    }

    /// Price and Greeks with a continuous dividend yield.
    pub fn greeks<L, F>(
        &self,
        lattice: &L,
        function: &F,
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividend_yield: Rate,
    ) -> Result<TreeGreeks>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = MarketSnapshot::new(spot, volatility, rate, dividend_yield)?;
        Ok(self
            .solve(lattice, function, market, None)?
            .map_or_else(TreeGreeks::zero, |solved| solved.greeks(lattice)))
    }

    /// Price with discrete dividends. The lattice drifts at the risk-free
    /// rate and is built on the dividend-adjusted spot.
    pub fn price_with_dividends<L, F>(
        &self,
        lattice: &L,
        function: &F,
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividends: &dyn DividendFunctionProvider,
    ) -> Result<Real>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = MarketSnapshot::new(spot, volatility, rate, 0.0)?;
        Ok(self
            .solve(lattice, function, market, Some(dividends))?
            .map_or(0.0, |solved| solved.rollback.value))
    }

    /// Price and Greeks with discrete dividends. Node prices used by the
    /// Greeks include the dividend correction of their layer.
    pub fn greeks_with_dividends<L, F>(
        &self,
        lattice: &L,
        function: &F,
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividends: &dyn DividendFunctionProvider,
    ) -> Result<TreeGreeks>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = MarketSnapshot::new(spot, volatility, rate, 0.0)?;
        Ok(self
            .solve(lattice, function, market, Some(dividends))?
            .map_or_else(TreeGreeks::zero, |solved| solved.greeks(lattice)))
    }

    /// Price on the [`TimeVarying`] lattice. Each vector holds one entry per
    /// time step, root first.
    pub fn price_time_varying<F>(
        &self,
        function: &F,
        spot: Real,
        volatilities: &[Volatility],
        rates: &[Rate],
        dividend_yields: &[Rate],
    ) -> Result<Real>
    where
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = TimeVaryingMarket::new(spot, volatilities, rates, dividend_yields, function.steps())?;
        Ok(self
            .solve_time_varying(function, &market)?
            .map_or(0.0, |solved| solved.rollback.value))
    }

    /// Price and Greeks on the [`TimeVarying`] lattice. Theta is the
    /// finite difference between the root and the centre node two steps on.
    pub fn greeks_time_varying<F>(
        &self,
        function: &F,
        spot: Real,
        volatilities: &[Volatility],
        rates: &[Rate],
        dividend_yields: &[Rate],
    ) -> Result<TreeGreeks>
    where
        F: OptionFunctionProvider1D + ?Sized,
    {
        let market = TimeVaryingMarket::new(spot, volatilities, rates, dividend_yields, function.steps())?;
        Ok(self
            .solve_time_varying(function, &market)?
            .map_or_else(TreeGreeks::zero, |solved| solved.greeks()))
    }

    /// Price a two-asset contract.
    #[allow(clippy::too_many_arguments)]
    pub fn price_two_asset<F>(
        &self,
        function: &F,
        spot1: Real,
        spot2: Real,
        volatility1: Volatility,
        volatility2: Volatility,
        correlation: Real,
        rate: Rate,
        dividend_yield1: Rate,
        dividend_yield2: Rate,
    ) -> Result<Real>
    where
        F: OptionFunctionProvider2D + ?Sized,
    {
        let market = TwoAssetMarket::new(
            spot1,
            spot2,
            volatility1,
            volatility2,
            correlation,
            rate,
            dividend_yield1,
            dividend_yield2,
        )?;
        Ok(self.solve_two_asset(function, &market)?.price)
    }

    /// Price and Greeks of a two-asset contract.
    ///
    /// Deltas come from the first layer averaged over the other asset's
    /// states, gammas from the middle row and column of the second layer and
    /// the cross gamma from its four corners.
    #[allow(clippy::too_many_arguments)]
    pub fn greeks_two_asset<F>(
        &self,
        function: &F,
        spot1: Real,
        spot2: Real,
        volatility1: Volatility,
        volatility2: Volatility,
        correlation: Real,
        rate: Rate,
        dividend_yield1: Rate,
        dividend_yield2: Rate,
    ) -> Result<TwoAssetGreeks>
    where
        F: OptionFunctionProvider2D + ?Sized,
    {
        let market = TwoAssetMarket::new(
            spot1,
            spot2,
            volatility1,
            volatility2,
            correlation,
            rate,
            dividend_yield1,
            dividend_yield2,
        )?;
        self.solve_two_asset(function, &market)
    }

    fn solve<'a, L, F>(
        &self,
        lattice: &L,
        function: &F,
        market: MarketSnapshot,
        dividends: Option<&'a dyn DividendFunctionProvider>,
    ) -> Result<Option<Solved<'a>>>
    where
        L: LatticeSpecification + ?Sized,
        F: OptionFunctionProvider1D + ?Sized,
    {
        if knocked_out(function, market.spot()) {
            return Ok(None);
        }
        let steps = function.steps();
        let time_to_expiry = function.time_to_expiry();
        let dt = time_to_expiry / steps as Real;
        let mut pricing = match dividends {
            Some(provider) => {
                LayerPricing::with_dividends(provider, market.spot(), market.rate(), dt, time_to_expiry)?
            }
            None => LayerPricing::flat(market.spot()),
        };

        let inputs = LatticeInputs {
            spot: pricing.base_spot(),
            strike: function.terms().strike(),
            time_to_expiry,
            volatility: market.volatility(),
            cost_of_carry: market.cost_of_carry(),
            steps,
            dt,
        };
        let parameters = lattice.binomial_parameters(&inputs)?;
        ensure_probabilities(
            lattice.name(),
            &[parameters.up_probability, parameters.down_probability],
        )?;
        let discount = (-market.rate() * dt).exp();
        debug!(
            model = "binomial",
            lattice = lattice.name(),
            steps,
            dt,
            up_factor = parameters.up_factor,
            down_factor = parameters.down_factor,
            up_probability = parameters.up_probability,
            discrete_dividends = dividends.is_some(),
            "rolling back binomial tree"
        );

        let rollback = roll_back(
            function,
            &mut pricing,
            parameters.down_factor,
            parameters.factor_ratio(),
            |_| (discount, parameters.up_probability, parameters.down_probability),
        );
        Ok(Some(Solved { rollback, pricing, parameters, market, dt }))
    }

    fn solve_time_varying<F>(&self, function: &F, market: &TimeVaryingMarket) -> Result<Option<SolvedPath>>
    where
        F: OptionFunctionProvider1D + ?Sized,
    {
        if knocked_out(function, market.spot()) {
            return Ok(None);
        }
        let steps = function.steps();
        let dt = function.time_to_expiry() / steps as Real;
        let path = TimeVarying.binomial_path(
            market.volatilities(),
            market.rates(),
            market.dividend_yields(),
            dt,
        )?;
        for step in &path.steps {
            ensure_probabilities(TimeVarying.name(), &[step.up_probability, step.down_probability])?;
        }
        let (down_factor, up_factor) = (path.down_factor(), path.up_factor());
        debug!(
            model = "binomial",
            lattice = TimeVarying.name(),
            steps,
            dt,
            space_step = path.space_step,
            "rolling back time-varying binomial tree"
        );

        let mut pricing = LayerPricing::flat(market.spot());
        let rollback = roll_back(function, &mut pricing, down_factor, up_factor / down_factor, |step| {
            let parameters = &path.steps[step];
            (parameters.discount, parameters.up_probability, parameters.down_probability)
        });
        Ok(Some(SolvedPath { rollback, pricing, path, dt }))
    }

    fn solve_two_asset<F>(&self, function: &F, market: &TwoAssetMarket) -> Result<TwoAssetGreeks>
    where
        F: OptionFunctionProvider2D + ?Sized,
    {
        let steps = function.steps();
        let dt = function.time_to_expiry() / steps as Real;
        let (sigma1, sigma2) = (market.volatility1, market.volatility2);
        let dx1 = sigma1 * dt.sqrt();
        let dx2 = sigma2 * dt.sqrt();
        let nu1 = market.rate - market.dividend_yield1 - 0.5 * sigma1 * sigma1;
        let nu2 = market.rate - market.dividend_yield2 - 0.5 * sigma2 * sigma2;
        let dx12 = dx1 * dx2;
        let drift = |s1: Real, s2: Real| (s1 * nu1 * dx2 + s2 * nu2 * dx1) * dt;
        let covariance = market.correlation * sigma1 * sigma2 * dt;
        let up_up = 0.25 * (dx12 + drift(1.0, 1.0) + covariance) / dx12;
        let up_down = 0.25 * (dx12 + drift(1.0, -1.0) - covariance) / dx12;
        let down_up = 0.25 * (dx12 + drift(-1.0, 1.0) - covariance) / dx12;
        let down_down = 0.25 * (dx12 + drift(-1.0, -1.0) + covariance) / dx12;
        ensure_probabilities("two-asset", &[up_up, up_down, down_up, down_down])?;

        let (up1, down1) = (dx1.exp(), (-dx1).exp());
        let (up2, down2) = (dx2.exp(), (-dx2).exp());
        let (ratio1, ratio2) = (up1 / down1, up2 / down2);
        let discount = (-market.rate * dt).exp();
        debug!(
            model = "binomial",
            lattice = "two-asset",
            steps,
            dt,
            up_up,
            up_down,
            down_up,
            down_down,
            "rolling back two-asset tree"
        );

        let mut values = function.payoff_at_expiry(
            market.spot1 * down1.powi(steps as i32),
            market.spot2 * down2.powi(steps as i32),
            ratio1,
            ratio2,
        );
        let mut out = vec![0.0; values.len()];
        let mut depth1 = [0.0; 4];
        let mut depth2 = [0.0; 9];
        for step in (0..steps).rev() {
            let layer = TwoAssetLayer {
                step,
                discount,
                up_up_probability: up_up,
                up_down_probability: up_down,
                down_up_probability: down_up,
                down_down_probability: down_down,
                base_asset_price1: market.spot1,
                base_asset_price2: market.spot2,
                down_factor1: down1,
                down_factor2: down2,
                factor_ratio1: ratio1,
                factor_ratio2: ratio2,
            };
            function.next_layer_values(&layer, &values, &mut out);
            std::mem::swap(&mut values, &mut out);
            match step {
                2 => depth2.copy_from_slice(&values[..9]),
                1 => depth1.copy_from_slice(&values[..4]),
                _ => {}
            }
        }

        let price = values[0];
        let prices1 = [market.spot1 * down1, market.spot1 * up1];
        let prices2 = [market.spot2 * down2, market.spot2 * up2];
        let delta1 = 0.5
            * (central_delta([depth1[0], depth1[2]], prices1)
                + central_delta([depth1[1], depth1[3]], prices1));
        let delta2 = 0.5
            * (central_delta([depth1[0], depth1[1]], prices2)
                + central_delta([depth1[2], depth1[3]], prices2));

        let outer1 = [market.spot1 * down1 * down1, market.spot1, market.spot1 * up1 * up1];
        let outer2 = [market.spot2 * down2 * down2, market.spot2, market.spot2 * up2 * up2];
        Ok(TwoAssetGreeks {
            price,
            delta1,
            delta2,
            theta: (depth2[4] - price) / (2.0 * dt),
            gamma1: central_gamma([depth2[1], depth2[4], depth2[7]], outer1),
            gamma2: central_gamma([depth2[3], depth2[4], depth2[5]], outer2),
            cross_gamma: cross_gamma(&depth2, outer1, outer2),
        })
    }
}

impl Solved<'_> {
    fn greeks<L>(&self, lattice: &L) -> TreeGreeks
    where
        L: LatticeSpecification + ?Sized,
    {
        let (up, down) = (self.parameters.up_factor, self.parameters.down_factor);
        let market = &self.market;
        self.rollback.greeks(
            &self.pricing,
            [down, up],
            [down * down, down * up, up * up],
            |inputs| {
                lattice.theta(
                    market.spot(),
                    market.volatility(),
                    market.rate(),
                    market.dividend_yield(),
                    self.dt,
                    inputs,
                )
            },
        )
    }
}

impl SolvedPath {
    fn greeks(&self) -> TreeGreeks {
        let (up, down) = (self.path.up_factor(), self.path.down_factor());
        self.rollback.greeks(
            &self.pricing,
            [down, up],
            [down * down, down * up, up * up],
            |inputs| finite_difference_theta(self.dt, inputs),
        )
    }
}
