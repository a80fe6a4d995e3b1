//! Integration tests for the one-asset tree pricing models.
//!
//! Reference market unless stated otherwise: S = K = 100, σ = 20%,
//! r = 5%, q = 0, T = 1.

use std::sync::atomic::{AtomicUsize, Ordering};

use approx::assert_relative_eq;
use ot_core::{Error, Real, Result, ScopedTruncationWidth};
use ot_instruments::{
    knock_in_from_parity, AmericanMethod, AmericanVanillaOption, AssetOrNothingOption,
    BarrierType, BermudanOption, CashOrNothingOption, ClosedFormInputs, EuropeanVanillaOption,
    LogOption, OptionFunctionProvider1D, OptionType, PoweredOption, SingleBarrierOption,
};
use ot_math::{black_scholes_price, normal_cdf, normal_pdf};
use ot_methods::{
    Adaptive, BinomialParameters, CashDividends, CoxRossRubinstein, JabbourKraminYoung,
    JarrowRudd, LatticeInputs, LatticeSpecification, LeisenReimer, ProportionalDividends, Tian,
    TrinomialParameters, Trigeorgis,
};
use ot_pricingengines::{BinomialTreeOptionPricingModel, TreeGreeks, TrinomialTreeOptionPricingModel};
use proptest::prelude::*;

const SPOT: Real = 100.0;
const VOL: Real = 0.2;
const RATE: Real = 0.05;

fn european(steps: usize, option_type: OptionType) -> EuropeanVanillaOption {
    EuropeanVanillaOption::new(100.0, 1.0, steps, option_type).unwrap()
}

fn american(steps: usize, option_type: OptionType) -> AmericanVanillaOption {
    AmericanVanillaOption::new(100.0, 1.0, steps, option_type).unwrap()
}

fn binomial<L, F>(lattice: &L, function: &F) -> Real
where
    L: LatticeSpecification + ?Sized,
    F: OptionFunctionProvider1D + ?Sized,
{
    BinomialTreeOptionPricingModel
        .price(lattice, function, SPOT, VOL, RATE, 0.0)
        .unwrap()
}

fn trinomial<L, F>(lattice: &L, function: &F) -> Real
where
    L: LatticeSpecification + ?Sized,
    F: OptionFunctionProvider1D + ?Sized,
{
    TrinomialTreeOptionPricingModel
        .price(lattice, function, SPOT, VOL, RATE, 0.0)
        .unwrap()
}

/// Counts discretization requests, delegating to CRR.
#[derive(Debug, Default)]
struct CountingLattice {
    calls: AtomicUsize,
}

impl LatticeSpecification for CountingLattice {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn binomial_parameters(&self, inputs: &LatticeInputs) -> Result<BinomialParameters> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CoxRossRubinstein.binomial_parameters(inputs)
    }

    fn trinomial_parameters(&self, inputs: &LatticeInputs) -> Result<TrinomialParameters> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CoxRossRubinstein.trinomial_parameters(inputs)
    }
}

// ───────────────────────── vanilla convergence ─────────────────────────

#[test]
fn crr_european_converges_to_black_scholes() {
    let reference = black_scholes_price(SPOT, 100.0, 1.0, VOL, RATE, RATE, true);
    assert_relative_eq!(reference, 10.4506, epsilon = 1e-4);

    let call200 = binomial(&CoxRossRubinstein, &european(200, OptionType::Call));
    assert_relative_eq!(call200, 10.44059, epsilon = 1e-4);
    assert!((call200 - reference).abs() < 0.05);

    let call500 = binomial(&CoxRossRubinstein, &european(500, OptionType::Call));
    assert!((call500 - reference).abs() < 1e-2, "call500 = {call500}");

    let put200 = binomial(&CoxRossRubinstein, &european(200, OptionType::Put));
    assert_relative_eq!(put200, 5.56353, epsilon = 1e-4);
}

#[test]
fn binomial_schemes_agree_with_black_scholes() {
    let reference = black_scholes_price(SPOT, 100.0, 1.0, VOL, RATE, RATE, true);
    let call = european(200, OptionType::Call);
    let schemes: Vec<Box<dyn LatticeSpecification>> = vec![
        Box::new(JarrowRudd),
        Box::new(Tian),
        Box::new(Trigeorgis),
        Box::new(JabbourKraminYoung),
    ];
    for lattice in &schemes {
        let price = binomial(lattice.as_ref(), &call);
        assert!((price - reference).abs() < 0.02, "{}: {price}", lattice.name());
    }
}

#[test]
fn leisen_reimer_is_accurate_with_odd_steps() {
    let reference = black_scholes_price(SPOT, 100.0, 1.0, VOL, RATE, RATE, true);
    let price = binomial(&LeisenReimer, &european(201, OptionType::Call));
    assert_relative_eq!(price, reference, epsilon = 1e-3);
    let coarse = binomial(&LeisenReimer, &european(51, OptionType::Call));
    assert_relative_eq!(coarse, reference, epsilon = 2e-3);
}

#[test]
fn leisen_reimer_rejects_even_steps() {
    let err = BinomialTreeOptionPricingModel
        .price(&LeisenReimer, &european(200, OptionType::Call), SPOT, VOL, RATE, 0.0)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedConfiguration(_)));
}

#[test]
fn trinomial_schemes_agree_with_black_scholes() {
    let reference = black_scholes_price(SPOT, 100.0, 1.0, VOL, RATE, RATE, true);
    let call = european(100, OptionType::Call);
    let schemes: Vec<Box<dyn LatticeSpecification>> = vec![
        Box::new(CoxRossRubinstein),
        Box::new(JarrowRudd),
        Box::new(Tian),
        Box::new(Trigeorgis),
    ];
    for lattice in &schemes {
        let price = trinomial(lattice.as_ref(), &call);
        assert!((price - reference).abs() < 0.03, "{}: {price}", lattice.name());
    }
}

#[test]
fn trinomial_on_binomial_only_lattice_fails() {
    for lattice in [&JabbourKraminYoung as &dyn LatticeSpecification, &LeisenReimer] {
        let err = TrinomialTreeOptionPricingModel
            .price(lattice, &european(101, OptionType::Call), SPOT, VOL, RATE, 0.0)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedConfiguration(_)));
    }
}

// ───────────────────────── parity and ordering ─────────────────────────

#[test]
fn put_call_parity_with_dividend_yield() {
    let (q, t) = (0.03, 1.0_f64);
    let model = BinomialTreeOptionPricingModel;
    let call = model
        .price(&CoxRossRubinstein, &european(150, OptionType::Call), SPOT, VOL, RATE, q)
        .unwrap();
    let put = model
        .price(&CoxRossRubinstein, &european(150, OptionType::Put), SPOT, VOL, RATE, q)
        .unwrap();
    assert_relative_eq!(
        call - put,
        SPOT * (-q * t).exp() - 100.0 * (-RATE * t).exp(),
        epsilon = 1e-9
    );
}

#[test]
fn american_put_is_worth_more_than_european() {
    let european_put = binomial(&CoxRossRubinstein, &european(200, OptionType::Put));
    let american_put = binomial(&CoxRossRubinstein, &american(200, OptionType::Put));
    assert_relative_eq!(american_put, 6.08638, epsilon = 1e-4);
    assert!(american_put > european_put);

    let trinomial_put = trinomial(&CoxRossRubinstein, &american(100, OptionType::Put));
    assert!((trinomial_put - american_put).abs() < 0.01, "trinomial put = {trinomial_put}");
}

#[test]
fn american_call_without_dividends_equals_european() {
    let european_call = binomial(&CoxRossRubinstein, &european(200, OptionType::Call));
    let american_call = binomial(&CoxRossRubinstein, &american(200, OptionType::Call));
    assert_relative_eq!(american_call, european_call, epsilon = 1e-12);
}

#[test]
fn bermudan_sits_between_european_and_american() {
    let bermudan = BermudanOption::new(100.0, 1.0, 200, OptionType::Put, &[0.25, 0.5, 0.75]).unwrap();
    let price = binomial(&CoxRossRubinstein, &bermudan);
    assert_relative_eq!(price, 5.94820, epsilon = 1e-4);
    assert!(binomial(&CoxRossRubinstein, &european(200, OptionType::Put)) <= price);
    assert!(price <= binomial(&CoxRossRubinstein, &american(200, OptionType::Put)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn parity_and_early_exercise_premium(
        spot in 80.0..120.0_f64,
        vol in 0.15..0.4_f64,
        rate in 0.0..0.08_f64,
        q in 0.0..0.05_f64,
        steps in 20usize..60,
    ) {
        let model = BinomialTreeOptionPricingModel;
        let call = EuropeanVanillaOption::new(100.0, 1.0, steps, OptionType::Call).unwrap();
        let put = EuropeanVanillaOption::new(100.0, 1.0, steps, OptionType::Put).unwrap();
        let c = model.price(&CoxRossRubinstein, &call, spot, vol, rate, q).unwrap();
        let p = model.price(&CoxRossRubinstein, &put, spot, vol, rate, q).unwrap();
        let forward = spot * (-q).exp() - 100.0 * (-rate).exp();
        prop_assert!((c - p - forward).abs() < 1e-8);

        let american_put = AmericanVanillaOption::new(100.0, 1.0, steps, OptionType::Put).unwrap();
        let a = model.price(&CoxRossRubinstein, &american_put, spot, vol, rate, q).unwrap();
        prop_assert!(a >= p - 1e-12);
    }
}

// ───────────────────────── American strategies ─────────────────────────

#[test]
fn american_strategies_stay_close_to_plain_rollback() {
    let inputs = ClosedFormInputs::new(VOL, RATE, 0.0).unwrap();
    let plain = binomial(&CoxRossRubinstein, &american(200, OptionType::Put));

    let accelerated = AmericanVanillaOption::with_method(
        100.0,
        1.0,
        200,
        OptionType::Put,
        AmericanMethod::Acceleration(inputs),
    )
    .unwrap();
    let accelerated = binomial(&CoxRossRubinstein, &accelerated);
    assert_relative_eq!(accelerated, 6.09295, epsilon = 1e-3);

    let truncated = AmericanVanillaOption::with_method(
        100.0,
        1.0,
        200,
        OptionType::Put,
        AmericanMethod::truncation_default(inputs),
    )
    .unwrap();
    assert_relative_eq!(binomial(&CoxRossRubinstein, &truncated), plain, epsilon = 1e-6);

    let both = AmericanVanillaOption::with_method(
        100.0,
        1.0,
        200,
        OptionType::Put,
        AmericanMethod::accelerated_truncation_default(inputs),
    )
    .unwrap();
    assert_relative_eq!(binomial(&CoxRossRubinstein, &both), accelerated, epsilon = 1e-6);
}

#[test]
fn narrow_truncation_band_from_settings() {
    let _width = ScopedTruncationWidth::new(3.0);
    let inputs = ClosedFormInputs::new(VOL, RATE, 0.0).unwrap();
    let truncated = AmericanVanillaOption::with_method(
        100.0,
        1.0,
        200,
        OptionType::Put,
        AmericanMethod::truncation_default(inputs),
    )
    .unwrap();
    let price = binomial(&CoxRossRubinstein, &truncated);
    assert!((price - 6.08638).abs() < 0.02, "price = {price}");
}

// ───────────────────────── barriers ─────────────────────────

fn down_and_out_call(barrier: Real, steps: usize) -> SingleBarrierOption {
    SingleBarrierOption::european(100.0, 1.0, steps, OptionType::Call, barrier, BarrierType::DownAndOut)
        .unwrap()
}

#[test]
fn breached_barrier_short_circuits_the_lattice() {
    let lattice = CountingLattice::default();
    let option = down_and_out_call(100.0, 200);
    let model = BinomialTreeOptionPricingModel;
    assert_eq!(model.price(&lattice, &option, SPOT, VOL, RATE, 0.0).unwrap(), 0.0);
    assert_eq!(model.greeks(&lattice, &option, SPOT, VOL, RATE, 0.0).unwrap(), TreeGreeks::zero());
    assert_eq!(
        TrinomialTreeOptionPricingModel
            .price(&lattice, &down_and_out_call(120.0, 200), SPOT, VOL, RATE, 0.0)
            .unwrap(),
        0.0
    );
    assert_eq!(lattice.calls.load(Ordering::SeqCst), 0);

    let alive = down_and_out_call(90.0, 200);
    assert!(model.price(&lattice, &alive, SPOT, VOL, RATE, 0.0).unwrap() > 0.0);
    assert_eq!(lattice.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn strike_behind_barrier_is_worthless() {
    let lattice = CountingLattice::default();
    let option = SingleBarrierOption::european(
        130.0,
        1.0,
        100,
        OptionType::Call,
        120.0,
        BarrierType::UpAndOut,
    )
    .unwrap();
    let price = BinomialTreeOptionPricingModel
        .price(&lattice, &option, SPOT, VOL, RATE, 0.0)
        .unwrap();
    assert_eq!(price, 0.0);
    assert_eq!(lattice.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn down_and_out_call_rises_as_barrier_falls() {
    let mut previous = 0.0;
    for barrier in [98.0, 95.0, 90.0, 80.0, 60.0] {
        let price = binomial(&CoxRossRubinstein, &down_and_out_call(barrier, 200));
        assert!(price >= previous, "barrier {barrier}: {price} < {previous}");
        previous = price;
    }
    assert!(previous <= binomial(&CoxRossRubinstein, &european(200, OptionType::Call)));
}

#[test]
fn in_out_parity() {
    let knock_out = down_and_out_call(90.0, 200);
    let vanilla = knock_out.vanilla_counterpart().unwrap();
    let out_price = binomial(&CoxRossRubinstein, &knock_out);
    let in_price = knock_in_from_parity(binomial(&CoxRossRubinstein, &vanilla), out_price);
    assert!(in_price > 0.0);
    assert_relative_eq!(in_price + out_price, binomial(&CoxRossRubinstein, &vanilla), epsilon = 1e-12);

    let err = SingleBarrierOption::european(100.0, 1.0, 200, OptionType::Call, 90.0, BarrierType::DownAndIn)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedConfiguration(_)));
}

#[test]
fn adaptive_lattice_removes_barrier_oscillation() {
    let mut prices = Vec::new();
    for steps in [100, 200, 400] {
        let option = down_and_out_call(90.0, steps);
        let lattice = Adaptive::new(&option).unwrap();
        prices.push(trinomial(&lattice, &option));
    }
    for price in &prices {
        assert_relative_eq!(*price, 8.6655, epsilon = 2e-3);
    }
    // A plain CRR lattice is still far off at 400 steps.
    let crr = binomial(&CoxRossRubinstein, &down_and_out_call(90.0, 400));
    assert!(crr - prices[2] > 0.1, "crr = {crr}");
}

// ───────────────────────── exotic payoffs ─────────────────────────

#[test]
fn digitals_replicate_the_vanilla() {
    let asset = AssetOrNothingOption::new(100.0, 1.0, 201, OptionType::Call).unwrap();
    let cash = CashOrNothingOption::new(100.0, 1.0, 201, OptionType::Call, 1.0).unwrap();
    let replicated = binomial(&CoxRossRubinstein, &asset) - 100.0 * binomial(&CoxRossRubinstein, &cash);
    assert_relative_eq!(
        replicated,
        binomial(&CoxRossRubinstein, &european(201, OptionType::Call)),
        epsilon = 1e-9
    );
}

#[test]
fn unit_power_is_the_vanilla() {
    let powered = PoweredOption::new(100.0, 1.0, 100, OptionType::Put, 1.0).unwrap();
    assert_relative_eq!(
        binomial(&Tian, &powered),
        binomial(&Tian, &european(100, OptionType::Put)),
        epsilon = 1e-12
    );
}

#[test]
fn log_option_matches_closed_form() {
    let log = LogOption::new(100.0, 1.0, 500).unwrap();
    let price = binomial(&CoxRossRubinstein, &log);
    // e^{−rT}·(σ√T·n(d₂) + (ln(S/K) + (r − ½σ²)T)·N(d₂))
    let d2 = (RATE - 0.5 * VOL * VOL) / VOL;
    let closed = (-RATE).exp() * (VOL * normal_pdf(d2) + (RATE - 0.5 * VOL * VOL) * normal_cdf(d2));
    assert_relative_eq!(closed, 0.091018, epsilon = 1e-5);
    assert_relative_eq!(price, closed, epsilon = 1e-3);
}

// ───────────────────────── Greeks ─────────────────────────

#[test]
fn greeks_match_black_scholes() {
    let greeks = BinomialTreeOptionPricingModel
        .greeks(&CoxRossRubinstein, &european(200, OptionType::Call), SPOT, VOL, RATE, 0.0)
        .unwrap();
    let d1 = (RATE + 0.5 * VOL * VOL) / VOL;
    let d2 = d1 - VOL;
    let delta = normal_cdf(d1);
    let gamma = normal_pdf(d1) / (SPOT * VOL);
    let theta = -SPOT * normal_pdf(d1) * VOL / 2.0 - RATE * 100.0 * (-RATE).exp() * normal_cdf(d2);

    assert_relative_eq!(greeks.price, 10.44059, epsilon = 1e-4);
    assert_relative_eq!(greeks.delta, delta, epsilon = 2e-3);
    assert_relative_eq!(greeks.gamma, gamma, epsilon = 5e-4);
    assert_relative_eq!(greeks.theta, theta, epsilon = 0.05);
}

#[test]
fn pde_theta_schemes_report_similar_theta() {
    let call = european(200, OptionType::Call);
    let crr = BinomialTreeOptionPricingModel
        .greeks(&CoxRossRubinstein, &call, SPOT, VOL, RATE, 0.0)
        .unwrap();
    let jr = BinomialTreeOptionPricingModel
        .greeks(&JarrowRudd, &call, SPOT, VOL, RATE, 0.0)
        .unwrap();
    assert!((crr.theta - jr.theta).abs() < 0.1, "crr {} vs jr {}", crr.theta, jr.theta);
    assert!((crr.delta - jr.delta).abs() < 5e-3);
}

#[test]
fn trinomial_greeks() {
    let greeks = TrinomialTreeOptionPricingModel
        .greeks(&CoxRossRubinstein, &european(100, OptionType::Put), SPOT, VOL, RATE, 0.0)
        .unwrap();
    let d1 = (RATE + 0.5 * VOL * VOL) / VOL;
    assert_relative_eq!(greeks.delta, normal_cdf(d1) - 1.0, epsilon = 5e-3);
    assert_relative_eq!(greeks.gamma, normal_pdf(d1) / (SPOT * VOL), epsilon = 1e-3);
    assert!(greeks.theta < 0.0);
}

// ───────────────────────── discrete dividends ─────────────────────────

fn cash_dividends() -> CashDividends {
    CashDividends::new(vec![0.3, 0.7], vec![2.0, 2.0]).unwrap()
}

#[test]
fn cash_dividends_price_near_escrowed_black_scholes() {
    let dividends = cash_dividends();
    let model = BinomialTreeOptionPricingModel;
    let call = european(200, OptionType::Call);
    let price = model
        .price_with_dividends(&CoxRossRubinstein, &call, SPOT, VOL, RATE, &dividends)
        .unwrap();
    let escrowed = SPOT - dividends.present_value(RATE);
    let reference = black_scholes_price(escrowed, 100.0, 1.0, VOL, RATE, RATE, true);
    assert_relative_eq!(price, 8.12140, epsilon = 1e-4);
    assert!((price - reference).abs() < 0.02);

    let greeks = model
        .greeks_with_dividends(&CoxRossRubinstein, &call, SPOT, VOL, RATE, &dividends)
        .unwrap();
    assert_relative_eq!(greeks.price, price, epsilon = 1e-12);
    assert_relative_eq!(greeks.delta, 0.55974, epsilon = 1e-4);
    assert_relative_eq!(greeks.gamma, 0.020556, epsilon = 1e-5);
    assert_relative_eq!(greeks.theta, -6.0800, epsilon = 1e-3);

    let american_call = model
        .price_with_dividends(&CoxRossRubinstein, &american(200, OptionType::Call), SPOT, VOL, RATE, &dividends)
        .unwrap();
    assert_relative_eq!(american_call, 8.18463, epsilon = 1e-4);
    assert!(american_call > price);
}

#[test]
fn proportional_dividends() {
    let dividends = ProportionalDividends::new(vec![0.3, 0.7], vec![0.02, 0.02]).unwrap();
    let model = BinomialTreeOptionPricingModel;
    let call = model
        .price_with_dividends(&CoxRossRubinstein, &european(200, OptionType::Call), SPOT, VOL, RATE, &dividends)
        .unwrap();
    let reference = black_scholes_price(SPOT * 0.98 * 0.98, 100.0, 1.0, VOL, RATE, RATE, true);
    assert_relative_eq!(call, 8.08889, epsilon = 1e-4);
    assert!((call - reference).abs() < 0.02);

    let european_put = model
        .price_with_dividends(&CoxRossRubinstein, &european(200, OptionType::Put), SPOT, VOL, RATE, &dividends)
        .unwrap();
    let american_put = model
        .price_with_dividends(&CoxRossRubinstein, &american(200, OptionType::Put), SPOT, VOL, RATE, &dividends)
        .unwrap();
    assert_relative_eq!(american_put, 7.60273, epsilon = 1e-4);
    assert!(american_put > european_put);
}

#[test]
fn trinomial_handles_dividends() {
    let dividends = cash_dividends();
    let price = TrinomialTreeOptionPricingModel
        .price_with_dividends(&CoxRossRubinstein, &european(100, OptionType::Call), SPOT, VOL, RATE, &dividends)
        .unwrap();
    assert!((price - 8.1214).abs() < 0.02, "price = {price}");
}

#[test]
fn bad_dividend_schedules_fail() {
    let model = BinomialTreeOptionPricingModel;
    let call = european(10, OptionType::Call);

    let at_expiry = CashDividends::new(vec![1.0], vec![2.0]).unwrap();
    assert!(matches!(
        model.price_with_dividends(&CoxRossRubinstein, &call, SPOT, VOL, RATE, &at_expiry),
        Err(Error::Validation(_))
    ));

    let same_step = CashDividends::new(vec![0.31, 0.35], vec![1.0, 1.0]).unwrap();
    assert!(matches!(
        model.price_with_dividends(&CoxRossRubinstein, &call, SPOT, VOL, RATE, &same_step),
        Err(Error::Validation(_))
    ));

    assert!(matches!(
        CashDividends::new(vec![0.5, 0.2], vec![1.0, 1.0]),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        ProportionalDividends::new(vec![0.5], vec![1.5]),
        Err(Error::Validation(_))
    ));
}

// ───────────────────────── time-varying market ─────────────────────────

#[test]
fn flat_time_varying_market_matches_trigeorgis() {
    let steps = 200;
    let call = european(steps, OptionType::Call);
    let model = BinomialTreeOptionPricingModel;
    let price = model
        .price_time_varying(&call, SPOT, &vec![VOL; steps], &vec![RATE; steps], &vec![0.0; steps])
        .unwrap();
    assert_relative_eq!(price, binomial(&Trigeorgis, &call), epsilon = 1e-9);
    assert_relative_eq!(price, 10.44084, epsilon = 1e-4);

    let trinomial_price = TrinomialTreeOptionPricingModel
        .price_time_varying(&call, SPOT, &vec![VOL; steps], &vec![RATE; steps], &vec![0.0; steps])
        .unwrap();
    assert!((trinomial_price - 10.4506).abs() < 0.02, "trinomial = {trinomial_price}");
}

#[test]
fn rising_volatility_term_structure() {
    let steps = 200;
    let call = european(steps, OptionType::Call);
    let vols: Vec<Real> = (0..steps).map(|i| 0.15 + 0.1 * i as Real / steps as Real).collect();
    let rates = vec![RATE; steps];
    let divs = vec![0.0; steps];
    let model = BinomialTreeOptionPricingModel;
    let price = model.price_time_varying(&call, SPOT, &vols, &rates, &divs).unwrap();
    let low = black_scholes_price(SPOT, 100.0, 1.0, 0.15, RATE, RATE, true);
    let high = black_scholes_price(SPOT, 100.0, 1.0, 0.25, RATE, RATE, true);
    assert!(low < price && price < high, "price = {price}");

    let greeks = model.greeks_time_varying(&call, SPOT, &vols, &rates, &divs).unwrap();
    assert_relative_eq!(greeks.price, price, epsilon = 1e-12);
    assert!(greeks.delta > 0.5 && greeks.delta < 0.75);
    assert!(greeks.gamma > 0.0);
    assert!(greeks.theta < 0.0);
}

#[test]
fn time_varying_vectors_must_cover_every_step() {
    let call = european(10, OptionType::Call);
    let err = BinomialTreeOptionPricingModel
        .price_time_varying(&call, SPOT, &[VOL; 9], &[RATE; 10], &[0.0; 10])
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
