#![forbid(unsafe_code)]

//! Boot splash choreography.
//!
//! Six phases on a fixed schedule: logo scales in, the diagonal logo dots
//! light up with a stagger, brand text appears, the progress bar fills,
//! status flips to ready, then the whole screen fades out and finishes.

use std::time::Duration;

/// Phase entry times, indexed by phase number (phase 0 starts at zero).
const PHASE_STARTS: [Duration; 5] = [
    Duration::from_millis(300),
    Duration::from_millis(900),
    Duration::from_millis(1_300),
    Duration::from_millis(1_800),
    Duration::from_millis(2_800),
];

/// The splash ends (and the app takes over) at this point.
pub const SPLASH_TOTAL: Duration = Duration::from_millis(3_400);

/// Stagger between the diagonal logo dots lighting up.
pub const DOT_STAGGER: Duration = Duration::from_millis(200);

/// Logo dots that participate in the diagonal light-up, by grid index.
pub const ACTIVE_DOTS: [usize; 3] = [0, 4, 8];

/// Emitted by [`Splash::advance`] when the sequence ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashEvent {
    Finished,
}

/// The splash-screen state machine.
#[derive(Debug, Clone, Copy)]
pub struct Splash {
    elapsed: Duration,
    finished: bool,
}

impl Default for Splash {
    fn default() -> Self {
        Self::new()
    }
}

impl Splash {
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Advance the sequence. Returns [`SplashEvent::Finished`] exactly once.
    pub fn advance(&mut self, dt: Duration) -> Option<SplashEvent> {
        if self.finished {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed >= SPLASH_TOTAL {
            self.finished = true;
            tracing::debug!("splash finished");
            return Some(SplashEvent::Finished);
        }
        None
    }

    /// Current phase, 0 through 5.
    pub fn phase(&self) -> u8 {
        let mut phase = 0u8;
        for (i, start) in PHASE_STARTS.iter().enumerate() {
            if self.elapsed >= *start {
                phase = i as u8 + 1;
            }
        }
        phase
    }

    /// Whether the diagonal dot with light-up order `order` (0..3) is lit.
    pub fn dot_lit(&self, grid_index: usize) -> bool {
        let Some(order) = ACTIVE_DOTS.iter().position(|&d| d == grid_index) else {
            return false;
        };
        self.phase() >= 1 && self.elapsed >= PHASE_STARTS[0] + DOT_STAGGER * order as u32
    }

    /// Progress-bar fill fraction.
    pub fn progress(&self) -> f32 {
        match self.phase() {
            0..=2 => 0.0,
            3 => 0.6,
            _ => 1.0,
        }
    }

    /// Status line under the progress bar.
    pub fn status_text(&self) -> &'static str {
        if self.phase() >= 4 {
            "Ready"
        } else {
            "Connecting to MX Console\u{2026}"
        }
    }

    /// Whether the final fade-out is playing.
    pub fn is_fading_out(&self) -> bool {
        self.phase() >= 5
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
