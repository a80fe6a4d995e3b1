//! Knock-out barrier contracts.
//!
//! Only knock-outs are priced on the lattice. A knock-in is worth the
//! vanilla minus the matching knock-out; see [`knock_in_from_parity`].

use ot_core::{Real, Result, Size, Time};

use crate::barrier::{BarrierType, CrossBarrierChecker};
use crate::exercise::ExerciseStyle;
use crate::function_provider::{BarrierOptionFunctionProvider, ContractTerms, OptionFunctionProvider1D};
use crate::option_type::OptionType;
use crate::vanilla::EuropeanVanillaOption;

/// Knock-in value from in-out parity: `vanilla − knock_out`.
///
/// Holds for European exercise only.
pub fn knock_in_from_parity(vanilla: Real, knock_out: Real) -> Real {
    vanilla - knock_out
}

/// State shared by single and double knock-outs.
#[derive(Debug, Clone, PartialEq)]
struct KnockOut {
    terms: ContractTerms,
    checker: CrossBarrierChecker,
    exercise: ExerciseStyle,
}

impl KnockOut {
    fn payoff(&self, asset_price: Real) -> Real {
        if self.checker.crosses(asset_price) {
            0.0
        } else {
            self.terms.option_type().intrinsic(asset_price, self.terms.strike())
        }
    }

    fn node_value(&self, step: Size, asset_price: Real, continuation: Real) -> Real {
        if self.checker.crosses(asset_price) {
            0.0
        } else if self.exercise.allows_exercise_at(step) {
            continuation.max(self.payoff(asset_price))
        } else {
            continuation
        }
    }

    fn strike_behind_barrier(&self) -> bool {
        self.checker
            .strike_behind_barrier(self.terms.strike(), self.terms.option_type().sign())
    }

    fn vanilla_counterpart(&self) -> Result<EuropeanVanillaOption> {
        EuropeanVanillaOption::new(
            self.terms.strike(),
            self.terms.time_to_expiry(),
            self.terms.steps(),
            self.terms.option_type(),
        )
    }
}

/// Vanilla option knocked out at a single barrier.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleBarrierOption {
    inner: KnockOut,
    barrier_type: BarrierType,
}

impl SingleBarrierOption {
    /// European knock-out.
    pub fn european(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        barrier: Real,
        barrier_type: BarrierType,
    ) -> Result<Self> {
        Self::new(strike, time_to_expiry, steps, option_type, barrier, barrier_type, ExerciseStyle::European)
    }

    /// American knock-out.
    pub fn american(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        barrier: Real,
        barrier_type: BarrierType,
    ) -> Result<Self> {
        Self::new(strike, time_to_expiry, steps, option_type, barrier, barrier_type, ExerciseStyle::American)
    }

    /// Knock-out with the given exercise style. `barrier_type` must be
    /// [`BarrierType::DownAndOut`] or [`BarrierType::UpAndOut`].
    pub fn new(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        barrier: Real,
        barrier_type: BarrierType,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, time_to_expiry, steps, option_type)?;
        let checker = CrossBarrierChecker::for_single_barrier(barrier_type, barrier)?;
        Ok(Self { inner: KnockOut { terms, checker, exercise }, barrier_type })
    }

    /// Barrier type.
    pub fn barrier_type(&self) -> BarrierType {
        self.barrier_type
    }

    /// Exercise style.
    pub fn exercise(&self) -> ExerciseStyle {
        self.inner.exercise
    }

    /// The European vanilla with the same strike, expiry and steps, for
    /// in-out parity.
    pub fn vanilla_counterpart(&self) -> Result<EuropeanVanillaOption> {
        self.inner.vanilla_counterpart()
    }
}

impl OptionFunctionProvider1D for SingleBarrierOption {
    fn terms(&self) -> &ContractTerms {
        &self.inner.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        self.inner.payoff(asset_price)
    }

    fn early_exercise(&self, step: Size) -> bool {
        self.inner.exercise.allows_exercise_at(step)
    }

    fn barrier_checker(&self) -> Option<&CrossBarrierChecker> {
        Some(&self.inner.checker)
    }

    fn check_strike_behind_barrier(&self) -> bool {
        self.inner.strike_behind_barrier()
    }

    fn node_value(&self, step: Size, asset_price: Real, continuation: Real) -> Real {
        self.inner.node_value(step, asset_price, continuation)
    }
}

impl BarrierOptionFunctionProvider for SingleBarrierOption {
    fn checker(&self) -> &CrossBarrierChecker {
        &self.inner.checker
    }
}

/// Vanilla option knocked out when the asset leaves `(lower, upper)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleBarrierOption {
    inner: KnockOut,
}

impl DoubleBarrierOption {
    /// European double knock-out.
    pub fn european(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        lower_barrier: Real,
        upper_barrier: Real,
        barrier_type: BarrierType,
    ) -> Result<Self> {
        Self::new(
            strike,
            time_to_expiry,
            steps,
            option_type,
            lower_barrier,
            upper_barrier,
            barrier_type,
            ExerciseStyle::European,
        )
    }

    /// American double knock-out.
    pub fn american(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        lower_barrier: Real,
        upper_barrier: Real,
        barrier_type: BarrierType,
    ) -> Result<Self> {
        Self::new(
            strike,
            time_to_expiry,
            steps,
            option_type,
            lower_barrier,
            upper_barrier,
            barrier_type,
            ExerciseStyle::American,
        )
    }

    /// Double knock-out with the given exercise style. `barrier_type` must
    /// be [`BarrierType::DoubleKnockOut`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        strike: Real,
        time_to_expiry: Time,
        steps: Size,
        option_type: OptionType,
        lower_barrier: Real,
        upper_barrier: Real,
        barrier_type: BarrierType,
        exercise: ExerciseStyle,
    ) -> Result<Self> {
        let terms = ContractTerms::new(strike, time_to_expiry, steps, option_type)?;
        let checker = CrossBarrierChecker::for_double_barrier(barrier_type, lower_barrier, upper_barrier)?;
        Ok(Self { inner: KnockOut { terms, checker, exercise } })
    }

    /// Exercise style.
    pub fn exercise(&self) -> ExerciseStyle {
        self.inner.exercise
    }

    /// The European vanilla with the same strike, expiry and steps, for
    /// in-out parity.
    pub fn vanilla_counterpart(&self) -> Result<EuropeanVanillaOption> {
        self.inner.vanilla_counterpart()
    }
}

impl OptionFunctionProvider1D for DoubleBarrierOption {
    fn terms(&self) -> &ContractTerms {
        &self.inner.terms
    }

    fn payoff(&self, asset_price: Real) -> Real {
        self.inner.payoff(asset_price)
    }

    fn early_exercise(&self, step: Size) -> bool {
        self.inner.exercise.allows_exercise_at(step)
    }

    fn barrier_checker(&self) -> Option<&CrossBarrierChecker> {
        Some(&self.inner.checker)
    }

    fn check_strike_behind_barrier(&self) -> bool {
        self.inner.strike_behind_barrier()
    }

    fn node_value(&self, step: Size, asset_price: Real, continuation: Real) -> Real {
        self.inner.node_value(step, asset_price, continuation)
    }
}

impl BarrierOptionFunctionProvider for DoubleBarrierOption {
    fn checker(&self) -> &CrossBarrierChecker {
        &self.inner.checker
    }
}
