//! Simulation step loop.
//!
//! [`run_simulation`] drives a [`SimulationStep`] implementation through
//! the [`SimulationGate`], so every step competes with query calls for the
//! same suspension. The loop supports:
//!
//! - **Bounded runs**: stop after `max_steps` or `max_real_time_seconds`
//! - **Pacing**: a fixed interval between steps
//! - **Clean stop** on request

use std::sync::Arc;

use tracing::{debug, info, warn};
use worldview_world::WorldError;

use crate::control::{StepControl, StepEndReason};
use crate::gate::SimulationGate;

/// Errors that can occur during the step loop.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step failed to mutate the world.
    #[error("step error: {source}")]
    Step {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// What one step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSummary {
    /// Step number, starting at 1.
    pub step: u64,
    /// Cells whose raw data changed.
    pub changed_cells: u32,
}

/// One unit of simulated world mutation.
pub trait SimulationStep<W>: Send {
    /// Advance the world by one step.
    fn step(&mut self, world: &mut W) -> Result<StepSummary, WorldError>;
}

/// Callback invoked after each step completes.
pub trait StepCallback: Send {
    /// Called after a step completes successfully.
    fn on_step(&mut self, summary: &StepSummary);
}

/// A no-op step callback.
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _summary: &StepSummary) {}
}

/// Result of a step loop run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the loop ended.
    pub end_reason: StepEndReason,
    /// The last step summary, if any step completed.
    pub final_summary: Option<StepSummary>,
    /// Total number of steps executed.
    pub total_steps: u64,
}

/// Run the step loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails.
pub async fn run_simulation<W>(
    gate: &SimulationGate<W>,
    simulation: &mut dyn SimulationStep<W>,
    control: &Arc<StepControl>,
    callback: &mut dyn StepCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<StepSummary> = None;
    let mut total_steps: u64 = 0;

    info!(
        max_steps = control.max_steps(),
        max_real_time_seconds = control.max_real_time_seconds(),
        step_interval_ms = control.step_interval_ms(),
        "Simulation starting"
    );

    loop {
        // --- Check stop request (before step) ---
        if control.is_stop_requested() {
            info!("Stop requested");
            return Ok(finish(StepEndReason::Stopped, last_summary, total_steps));
        }

        // --- Check time limit (before step) ---
        if control.time_limit_reached() {
            info!(
                max_seconds = control.max_real_time_seconds(),
                elapsed = control.elapsed_seconds(),
                "Real-time limit reached"
            );
            return Ok(finish(StepEndReason::MaxRealTimeReached, last_summary, total_steps));
        }

        // --- Execute step ---
        let summary = gate.step(|world| simulation.step(world)).await?;
        total_steps = total_steps.saturating_add(1);
        debug!(
            step = summary.step,
            changed_cells = summary.changed_cells,
            "Step complete"
        );

        callback.on_step(&summary);
        last_summary = Some(summary);

        // --- Check step limit (after step) ---
        if control.step_limit_reached(total_steps) {
            info!(
                steps = total_steps,
                max_steps = control.max_steps(),
                "Step limit reached"
            );
            return Ok(finish(StepEndReason::MaxStepsReached, last_summary, total_steps));
        }

        // --- Sleep for step interval ---
        let interval_ms = control.step_interval_ms();
        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

const fn finish(
    reason: StepEndReason,
    final_summary: Option<StepSummary>,
    total_steps: u64,
) -> SimulationResult {
    SimulationResult {
        end_reason: reason,
        final_summary,
        total_steps,
    }
}

/// Log the end of a step loop run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_steps = result.total_steps,
        final_step = result.final_summary.as_ref().map(|s| s.step),
        "Simulation ended"
    );

    if result.final_summary.is_none() {
        warn!("Simulation ended with no steps executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;

    struct Counter {
        step: u64,
        fail_at: Option<u64>,
    }

    impl SimulationStep<Vec<u64>> for Counter {
        fn step(&mut self, world: &mut Vec<u64>) -> Result<StepSummary, WorldError> {
            self.step += 1;
            if self.fail_at == Some(self.step) {
                return Err(WorldError::MapNotLoaded);
            }
            world.push(self.step);
            Ok(StepSummary {
                step: self.step,
                changed_cells: 1,
            })
        }
    }

    struct Recorder(Vec<u64>);

    impl StepCallback for Recorder {
        fn on_step(&mut self, summary: &StepSummary) {
            self.0.push(summary.step);
        }
    }

    fn control(max_steps: u64) -> Arc<StepControl> {
        Arc::new(StepControl::new(&SimulationConfig {
            step_interval_ms: 0,
            max_steps,
            ..SimulationConfig::default()
        }))
    }

    #[tokio::test]
    async fn stops_at_step_limit() {
        let gate = SimulationGate::new(Vec::new());
        let mut sim = Counter {
            step: 0,
            fail_at: None,
        };
        let control = control(5);
        let mut recorder = Recorder(Vec::new());
        let result = run_simulation(&gate, &mut sim, &control, &mut recorder)
            .await
            .unwrap();
        assert_eq!(result.end_reason, StepEndReason::MaxStepsReached);
        assert_eq!(result.total_steps, 5);
        assert_eq!(result.final_summary.map(|s| s.step), Some(5));
        assert_eq!(recorder.0, vec![1, 2, 3, 4, 5]);
        assert_eq!(gate.steps(), 5);
        assert_eq!(gate.into_inner(), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn stop_before_first_step() {
        let gate = SimulationGate::new(Vec::new());
        let mut sim = Counter {
            step: 0,
            fail_at: None,
        };
        let control = control(0);
        control.request_stop();
        let result = run_simulation(&gate, &mut sim, &control, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, StepEndReason::Stopped);
        assert_eq!(result.total_steps, 0);
        assert!(result.final_summary.is_none());
        log_simulation_end(&result);
    }

    struct StopAfter {
        control: Arc<StepControl>,
        at: u64,
    }

    impl StepCallback for StopAfter {
        fn on_step(&mut self, summary: &StepSummary) {
            if summary.step == self.at {
                self.control.request_stop();
            }
        }
    }

    #[tokio::test]
    async fn stop_requested_mid_run_ends_before_next_step() {
        let gate = SimulationGate::new(Vec::new());
        let mut sim = Counter {
            step: 0,
            fail_at: None,
        };
        let control = control(0);
        let mut stopper = StopAfter {
            control: Arc::clone(&control),
            at: 2,
        };
        let result = run_simulation(&gate, &mut sim, &control, &mut stopper)
            .await
            .unwrap();
        assert_eq!(result.end_reason, StepEndReason::Stopped);
        assert_eq!(result.total_steps, 2);
        assert_eq!(gate.into_inner(), vec![1, 2]);
    }

    #[tokio::test]
    async fn step_errors_propagate() {
        let gate = SimulationGate::new(Vec::new());
        let mut sim = Counter {
            step: 0,
            fail_at: Some(3),
        };
        let control = control(0);
        let result = run_simulation(&gate, &mut sim, &control, &mut NoOpCallback).await;
        assert!(matches!(result, Err(RunnerError::Step { .. })));
        assert_eq!(gate.into_inner(), vec![1, 2]);
    }
}
