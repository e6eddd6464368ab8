#![forbid(unsafe_code)]

//! The four-step macro sequencer.
//!
//! A fixed workflow animation: steps light up on a 500 ms schedule, the
//! final step holds for 600 ms, then the chain resets to idle and reports
//! completion. At most one run may be in flight; `start` while running is a
//! rejected no-op. Because the schedule lives inside the state machine
//! (elapsed time, not scheduled callbacks), dropping the chain mid-run
//! cannot leak a pending timer.

use std::time::Duration;

/// One named step in the macro workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroStep {
    /// Short glyph shown next to the step.
    pub icon: &'static str,
    pub label: &'static str,
}

/// The fixed workflow, in execution order.
pub const MACRO_STEPS: [MacroStep; 4] = [
    MacroStep {
        icon: "[ ]",
        label: "Capture Screen",
    },
    MacroStep {
        icon: "AI",
        label: "AI Analyze",
    },
    MacroStep {
        icon: "Rp",
        label: "Generate Report",
    },
    MacroStep {
        icon: ">>",
        label: "Send to Slack",
    },
];

/// Step *i* becomes active `(i + 1) ×` this long after start.
pub const STEP_INTERVAL: Duration = Duration::from_millis(500);
/// Hold on the final step before resetting to idle.
pub const FINAL_HOLD: Duration = Duration::from_millis(600);

/// Emitted by [`MacroChain::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroEvent {
    /// A run finished and the chain is idle again. Emitted once per run.
    Completed,
}

/// The macro sequencer state machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroChain {
    /// Elapsed time of the in-flight run, if any.
    run: Option<Duration>,
}

impl MacroChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a run. Returns `false` (and changes nothing) if a run is
    /// already in progress.
    pub fn start(&mut self) -> bool {
        if self.run.is_some() {
            tracing::debug!("macro start rejected: run in progress");
            return false;
        }
        tracing::debug!("macro run started");
        self.run = Some(Duration::ZERO);
        true
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Index of the currently active step, or `None` when idle.
    ///
    /// The first step is active from start; step *i* takes over at
    /// `(i + 1) × STEP_INTERVAL`.
    pub fn active_step(&self) -> Option<usize> {
        let elapsed = self.run?;
        let ticks = (elapsed.as_millis() / STEP_INTERVAL.as_millis()) as usize;
        Some(ticks.saturating_sub(1).min(MACRO_STEPS.len() - 1))
    }

    /// Whether step `j` has completed (a later step is active).
    pub fn step_done(&self, j: usize) -> bool {
        self.active_step().is_some_and(|active| active > j)
    }

    /// Advance the run clock. Returns [`MacroEvent::Completed`] on the
    /// advance that finishes the run.
    pub fn advance(&mut self, dt: Duration) -> Option<MacroEvent> {
        let elapsed = self.run? + dt;
        let total = STEP_INTERVAL * MACRO_STEPS.len() as u32 + FINAL_HOLD;
        if elapsed >= total {
            self.run = None;
            tracing::debug!("macro run completed");
            return Some(MacroEvent::Completed);
        }
        self.run = Some(elapsed);
        None
    }
}
