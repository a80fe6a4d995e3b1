//! Global library settings.
//!
//! [`Settings`] holds the defaults that numerical strategies fall back to
//! when the caller does not pin a value explicitly. It is a process-wide
//! singleton accessed via a `std::sync::OnceLock`.
//!
//! Thread safety: values are stored behind a `Mutex` so they can be changed
//! from any thread. Providers read them once at construction and keep a copy,
//! so a change never affects a contract that already exists. Tests that
//! change a setting should use [`ScopedTruncationWidth`].

use std::sync::{Mutex, OnceLock};

use crate::Real;

/// Default half-width of the truncation band, in standard deviations of the
/// log asset price over the life of the option.
pub const DEFAULT_TRUNCATION_WIDTH: Real = 6.0;

/// Process-wide settings used by optree.
pub struct Settings {
    truncation_width: Mutex<Real>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            truncation_width: Mutex::new(DEFAULT_TRUNCATION_WIDTH),
        })
    }

    /// Half-width `k` of the `±kσ√T` band used by truncated American
    /// strategies when none is given.
    pub fn truncation_width(&self) -> Real {
        *self
            .truncation_width
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set the default truncation half-width. Non-finite or non-positive
    /// values are ignored.
    pub fn set_truncation_width(&self, width: Real) {
        if width.is_finite() && width > 0.0 {
            *self
                .truncation_width
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = width;
        }
    }

    /// Restore every setting to its default.
    pub fn reset(&self) {
        self.set_truncation_width(DEFAULT_TRUNCATION_WIDTH);
    }
}

/// RAII guard that sets the default truncation width and restores the
/// previous value on drop.
pub struct ScopedTruncationWidth {
    previous: Real,
}

impl ScopedTruncationWidth {
    /// Set `width` for the lifetime of the guard.
    pub fn new(width: Real) -> Self {
        let settings = Settings::instance();
        let previous = settings.truncation_width();
        settings.set_truncation_width(width);
        Self { previous }
    }
}

impl Drop for ScopedTruncationWidth {
    fn drop(&mut self) {
        Settings::instance().set_truncation_width(self.previous);
    }
}
