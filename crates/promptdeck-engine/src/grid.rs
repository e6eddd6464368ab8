#![forbid(unsafe_code)]

//! Button-grid enter/exit choreography.
//!
//! On an application switch the grid hides all nine buttons, waits a settle
//! delay while the new button set takes effect, then reveals the buttons
//! with a per-index stagger. Selection itself lives on the session; this
//! module only answers "is button *i* visible right now?".

use std::time::Duration;

use promptdeck_core::BUTTONS_PER_APP;

/// Hide time before the reveal begins.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);
/// Per-button reveal stagger; button *i* appears at `i ×` this.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(60);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Steady,
    Hidden { elapsed: Duration },
    Revealing { elapsed: Duration },
}

/// The grid's transition state machine.
#[derive(Debug, Clone, Copy)]
pub struct GridTransition {
    phase: Phase,
}

impl Default for GridTransition {
    fn default() -> Self {
        Self::new()
    }
}

impl GridTransition {
    /// A settled grid with every button visible.
    pub fn new() -> Self {
        Self {
            phase: Phase::Steady,
        }
    }

    /// Begin the hide/settle/reveal cycle. Restarts the cycle if one is
    /// already playing.
    pub fn app_switched(&mut self) {
        self.phase = Phase::Hidden {
            elapsed: Duration::ZERO,
        };
    }

    /// Advance the transition by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        match self.phase {
            Phase::Steady => {}
            Phase::Hidden { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= SETTLE_DELAY {
                    self.phase = Phase::Revealing {
                        elapsed: elapsed - SETTLE_DELAY,
                    };
                } else {
                    self.phase = Phase::Hidden { elapsed };
                }
            }
            Phase::Revealing { elapsed } => {
                let elapsed = elapsed + dt;
                let full = REVEAL_STAGGER * (BUTTONS_PER_APP as u32 - 1);
                if elapsed >= full {
                    self.phase = Phase::Steady;
                } else {
                    self.phase = Phase::Revealing { elapsed };
                }
            }
        }
    }

    /// Whether button `i` should be drawn.
    pub fn button_visible(&self, i: usize) -> bool {
        match self.phase {
            Phase::Steady => true,
            Phase::Hidden { .. } => false,
            Phase::Revealing { elapsed } => elapsed >= REVEAL_STAGGER * i as u32,
        }
    }

    /// Whether a transition is currently playing.
    pub fn is_transitioning(&self) -> bool {
        self.phase != Phase::Steady
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_grid_shows_everything() {
        let grid = GridTransition::new();
        assert!(!grid.is_transitioning());
        for i in 0..BUTTONS_PER_APP {
            assert!(grid.button_visible(i));
        }
    }

    #[test]
    fn switch_hides_all_buttons_until_settled() {
        let mut grid = GridTransition::new();
        grid.app_switched();
        grid.advance(SETTLE_DELAY - Duration::from_millis(1));
        for i in 0..BUTTONS_PER_APP {
            assert!(!grid.button_visible(i));
        }
    }

    #[test]
    fn reveal_is_staggered_by_index() {
        let mut grid = GridTransition::new();
        grid.app_switched();
        grid.advance(SETTLE_DELAY);
        // At the instant the reveal starts, only button 0 shows.
        assert!(grid.button_visible(0));
        assert!(!grid.button_visible(1));

        grid.advance(REVEAL_STAGGER * 3);
        assert!(grid.button_visible(3));
        assert!(!grid.button_visible(4));
    }

    #[test]
    fn transition_finishes_back_to_steady() {
        let mut grid = GridTransition::new();
        grid.app_switched();
        grid.advance(SETTLE_DELAY + REVEAL_STAGGER * BUTTONS_PER_APP as u32);
        assert!(!grid.is_transitioning());
        assert!(grid.button_visible(BUTTONS_PER_APP - 1));
    }

    #[test]
    fn switch_mid_reveal_restarts_cycle() {
        let mut grid = GridTransition::new();
        grid.app_switched();
        grid.advance(SETTLE_DELAY + REVEAL_STAGGER);
        assert!(grid.button_visible(0));
        grid.app_switched();
        assert!(!grid.button_visible(0));
    }
}
