//! Runtime control of the simulation step loop.
//!
//! [`StepControl`] is shared (behind an `Arc`) between the step loop and
//! whoever may end it: the engine's shutdown hook, the status page, tests.
//! The stop flag is an atomic so the loop can poll it without locking.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

/// Reason why the step loop ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepEndReason {
    /// Reached the configured `max_steps` limit.
    MaxStepsReached,
    /// Reached the configured `max_real_time_seconds` limit.
    MaxRealTimeReached,
    /// A stop was requested.
    Stopped,
}

/// Shared step loop control state.
#[derive(Debug)]
pub struct StepControl {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Milliseconds between steps.
    step_interval_ms: u64,

    /// Wall-clock time when the loop was created.
    started_at: DateTime<Utc>,

    /// Maximum number of steps (0 = unlimited).
    max_steps: u64,

    /// Maximum wall-clock seconds (0 = unlimited).
    max_real_time_seconds: u64,
}

impl StepControl {
    /// Create control state from configuration.
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            step_interval_ms: config.step_interval_ms,
            started_at: Utc::now(),
            max_steps: config.max_steps,
            max_real_time_seconds: config.max_real_time_seconds,
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop. The loop exits before its next step.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Milliseconds between steps.
    pub const fn step_interval_ms(&self) -> u64 {
        self.step_interval_ms
    }

    /// `true` if `max_steps > 0` and `steps >= max_steps`.
    pub const fn step_limit_reached(&self, steps: u64) -> bool {
        self.max_steps > 0 && steps >= self.max_steps
    }

    /// `true` if `max_real_time_seconds > 0` and that much time has passed.
    pub fn time_limit_reached(&self) -> bool {
        self.max_real_time_seconds > 0 && self.elapsed_seconds() >= self.max_real_time_seconds
    }

    /// Elapsed seconds since start.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    /// Configured max steps.
    pub const fn max_steps(&self) -> u64 {
        self.max_steps
    }

    /// Configured max real-time seconds.
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.max_real_time_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unbounded() -> SimulationConfig {
        SimulationConfig {
            step_interval_ms: 1000,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn initial_state_is_running() {
        let control = StepControl::new(&unbounded());
        assert!(!control.is_stop_requested());
        assert_eq!(control.step_interval_ms(), 1000);
    }

    #[test]
    fn stop_is_sticky() {
        let control = StepControl::new(&unbounded());
        control.request_stop();
        control.request_stop();
        assert!(control.is_stop_requested());
    }

    #[test]
    fn zero_limits_mean_unlimited() {
        let control = StepControl::new(&unbounded());
        assert!(!control.step_limit_reached(1_000_000));
        assert!(!control.time_limit_reached());
    }

    #[test]
    fn step_limit() {
        let config = SimulationConfig {
            max_steps: 10,
            ..SimulationConfig::default()
        };
        let control = StepControl::new(&config);
        assert!(!control.step_limit_reached(9));
        assert!(control.step_limit_reached(10));
    }
}
