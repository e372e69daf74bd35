//! Cooperative cancellation and fuel accounting.
//!
//! Query evaluation in this workspace is synchronous and CPU-bound, so the
//! surrounding engine cannot preempt it. Instead, long-running passes call
//! [`Tracker::check`] at their loop heads (once per depth-first step during
//! prefix expansion, once per frontier iteration in the path operator) and
//! [`Tracker::charge`] per emitted row. Fuel counted per emitted item; the
//! limit errors when the total exceeds it.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Tracking configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingOptions {
    /// Maximum number of fuel units (emitted rows) before evaluation is
    /// aborted. `None` = unlimited.
    pub max_fuel: Option<u64>,
}

/// Fuel limit exceeded
#[derive(Debug, Clone, Error)]
#[error("fuel limit exceeded: used {used} of {limit}")]
pub struct FuelExceededError {
    pub used: u64,
    pub limit: u64,
}

struct TrackerInner {
    cancelled: AtomicBool,
    fuel_total: AtomicU64,
    /// 0 = unlimited
    fuel_limit: u64,
}

/// Execution tracker.
///
/// When disabled, this is a single `None` pointer (cheap to clone and pass
/// around); `check` and `charge` are then no-ops.
#[derive(Clone, Default)]
pub struct Tracker(Option<Arc<TrackerInner>>);

impl Tracker {
    /// Create an enabled tracker. Cancellation is always available on an
    /// enabled tracker; fuel accounting only if `max_fuel` is set.
    pub fn new(options: TrackingOptions) -> Self {
        Self(Some(Arc::new(TrackerInner {
            cancelled: AtomicBool::new(false),
            fuel_total: AtomicU64::new(0),
            fuel_limit: options.max_fuel.unwrap_or(0),
        })))
    }

    /// Disabled tracker (zero overhead beyond a null check at call sites).
    #[inline]
    pub fn disabled() -> Self {
        Self(None)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Request cancellation. The running evaluation observes it at its next
    /// checkpoint. A no-op on a disabled tracker.
    pub fn cancel(&self) {
        if let Some(inner) = &self.0 {
            inner.cancelled.store(true, Ordering::Relaxed);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.0
            .as_ref()
            .map(|inner| inner.cancelled.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Cooperative checkpoint. Errors once `cancel` has been called.
    #[inline]
    pub fn check(&self) -> crate::Result<()> {
        if self.is_cancelled() {
            return Err(crate::Error::Cancelled);
        }
        Ok(())
    }

    /// Account `amount` units of fuel, erroring when the budget is exceeded.
    /// Also observes cancellation, so hot loops need only one call.
    pub fn charge(&self, amount: u64) -> crate::Result<()> {
        let Some(inner) = &self.0 else {
            return Ok(());
        };
        if inner.cancelled.load(Ordering::Relaxed) {
            return Err(crate::Error::Cancelled);
        }
        let total = inner.fuel_total.fetch_add(amount, Ordering::Relaxed) + amount;
        if inner.fuel_limit > 0 && total > inner.fuel_limit {
            return Err(FuelExceededError {
                used: total,
                limit: inner.fuel_limit,
            }
            .into());
        }
        Ok(())
    }

    /// Total fuel charged so far.
    pub fn fuel_used(&self) -> u64 {
        self.0
            .as_ref()
            .map(|inner| inner.fuel_total.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("enabled", &self.is_enabled())
            .field("cancelled", &self.is_cancelled())
            .field("fuel_used", &self.fuel_used())
            .finish()
    }
}
