//! Exercise style of a lattice contract.
//!
//! Bermudan exercise is carried by [`BermudanOption`](crate::BermudanOption)
//! itself, as a set of exercisable steps.

use ot_core::Size;
use std::fmt;

/// When the holder may exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExerciseStyle {
    /// Only at expiry.
    #[default]
    European,
    /// At any step up to expiry.
    American,
}

impl ExerciseStyle {
    /// Whether exercise is allowed at `step` (expiry is handled by the
    /// terminal payoff).
    pub fn allows_exercise_at(self, _step: Size) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}
