//! # ot-instruments
//!
//! Option contracts as seen by the lattice: each contract is a *function
//! provider* that supplies its payoff at expiry and the rule folding one
//! layer of option values into the layer below. One-asset contracts
//! implement [`OptionFunctionProvider1D`], knock-outs additionally
//! [`BarrierOptionFunctionProvider`], and two-asset contracts
//! [`OptionFunctionProvider2D`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod barrier;
pub mod barrier_options;
pub mod exercise;
pub mod exotic;
pub mod function_provider;
pub mod option_type;
pub mod two_asset;
pub mod vanilla;

pub use barrier::{BarrierType, CrossBarrierChecker};
pub use barrier_options::{knock_in_from_parity, DoubleBarrierOption, SingleBarrierOption};
pub use exercise::ExerciseStyle;
pub use exotic::{
    AssetOrNothingOption, CappedPowerOption, CashOrNothingOption, GapOption, LogOption,
    PoweredOption, SupershareOption,
};
pub use function_provider::{
    fold_binomial, fold_trinomial, BarrierOptionFunctionProvider, BinomialLayer, ContractTerms,
    NodePrices, OptionFunctionProvider1D, OptionFunctionProvider2D, TrinomialLayer, TwoAssetLayer,
};
pub use option_type::OptionType;
pub use two_asset::{
    ExchangeOption, ProductOption, RelativeOutperformanceOption, SpreadOption,
    TwoAssetCorrelationOption,
};
pub use vanilla::{
    AmericanMethod, AmericanVanillaOption, BermudanOption, ClosedFormInputs, EuropeanVanillaOption,
};
