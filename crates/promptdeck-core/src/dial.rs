#![forbid(unsafe_code)]

//! The intensity dial.
//!
//! A bounded 0–100 value driven by pointer drag or scroll wheel, mapped to
//! one of three named intensity tiers. Input is always clamped, never
//! rejected. The tier boundaries and sensitivities are presentation tuning
//! values carried over unchanged; behavioral parity matters more than the
//! specific numbers.

/// Lower dial bound.
pub const DIAL_MIN: f32 = 0.0;
/// Upper dial bound.
pub const DIAL_MAX: f32 = 100.0;
/// Dial units per unit of upward drag motion.
pub const DRAG_SENSITIVITY: f32 = 0.5;
/// Dial units per wheel delta unit (sign inverted vs. drag).
pub const WHEEL_SENSITIVITY: f32 = 0.3;

/// Highest dial value still mapped to [`Tier::Minimal`].
pub const MINIMAL_CEILING: f32 = 33.0;
/// Highest dial value still mapped to [`Tier::Balanced`].
pub const BALANCED_CEILING: f32 = 66.0;

/// Named intensity level derived from the dial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Quick, terse output.
    Minimal,
    /// The default middle ground.
    Balanced,
    /// Exhaustive output.
    Maximum,
}

impl Tier {
    /// Display label, matching the dial readout.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Balanced => "Balanced",
            Self::Maximum => "Maximum",
        }
    }

    /// Index into a `[minimal, balanced, maximum]` variant triple.
    pub const fn index(self) -> usize {
        match self {
            Self::Minimal => 0,
            Self::Balanced => 1,
            Self::Maximum => 2,
        }
    }
}

/// Clamp a raw dial value into `[DIAL_MIN, DIAL_MAX]`.
#[inline]
pub fn clamp_dial(value: f32) -> f32 {
    value.clamp(DIAL_MIN, DIAL_MAX)
}

/// Map a dial value to its tier. Boundaries are inclusive on the lower tier.
pub fn tier(value: f32) -> Tier {
    if value <= MINIMAL_CEILING {
        Tier::Minimal
    } else if value <= BALANCED_CEILING {
        Tier::Balanced
    } else {
        Tier::Maximum
    }
}

/// The dial's session state. Mutated only through the drag/wheel/set paths.
#[derive(Debug, Clone, Copy)]
pub struct DialState {
    value: f32,
}

impl Default for DialState {
    fn default() -> Self {
        Self::new()
    }
}

impl DialState {
    /// Start at the midpoint, as the demo session does.
    pub const fn new() -> Self {
        Self { value: 50.0 }
    }

    /// Current value in `[0, 100]`.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Tier derived from the current value.
    pub fn tier(&self) -> Tier {
        tier(self.value)
    }

    /// Set the value directly (clamped).
    pub fn set(&mut self, value: f32) {
        self.value = clamp_dial(value);
    }

    /// Apply a drag delta. Positive `dy_up` is upward motion and increases
    /// the value.
    pub fn drag(&mut self, dy_up: f32) {
        self.set(self.value + dy_up * DRAG_SENSITIVITY);
    }

    /// Apply a wheel delta. Scrolling up (negative delta in the host's
    /// convention) increases the value.
    pub fn wheel(&mut self, delta: f32) {
        self.set(self.value - delta * WHEEL_SENSITIVITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier(0.0), Tier::Minimal);
        assert_eq!(tier(33.0), Tier::Minimal);
        assert_eq!(tier(34.0), Tier::Balanced);
        assert_eq!(tier(66.0), Tier::Balanced);
        assert_eq!(tier(67.0), Tier::Maximum);
        assert_eq!(tier(100.0), Tier::Maximum);
    }

    #[test]
    fn tier_index_matches_variant_order() {
        assert_eq!(Tier::Minimal.index(), 0);
        assert_eq!(Tier::Balanced.index(), 1);
        assert_eq!(Tier::Maximum.index(), 2);
    }

    #[test]
    fn drag_up_increases() {
        let mut dial = DialState::new();
        dial.drag(10.0);
        assert_eq!(dial.value(), 55.0);
        dial.drag(-10.0);
        assert_eq!(dial.value(), 50.0);
    }

    #[test]
    fn wheel_sign_is_inverted() {
        let mut dial = DialState::new();
        dial.wheel(-10.0);
        assert_eq!(dial.value(), 53.0);
        dial.wheel(10.0);
        assert_eq!(dial.value(), 50.0);
    }

    #[test]
    fn drag_clamps_at_bounds() {
        let mut dial = DialState::new();
        dial.drag(1_000.0);
        assert_eq!(dial.value(), DIAL_MAX);
        dial.drag(-10_000.0);
        assert_eq!(dial.value(), DIAL_MIN);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(v in -1e6f32..1e6f32) {
            let c = clamp_dial(v);
            prop_assert!((DIAL_MIN..=DIAL_MAX).contains(&c));
        }

        #[test]
        fn clamp_is_idempotent(v in -1e6f32..1e6f32) {
            prop_assert_eq!(clamp_dial(clamp_dial(v)), clamp_dial(v));
        }

        #[test]
        fn tier_total_over_valid_range(v in 0.0f32..=100.0f32) {
            // Every in-range value maps to exactly one tier.
            let t = tier(v);
            let expected = if v <= 33.0 {
                Tier::Minimal
            } else if v <= 66.0 {
                Tier::Balanced
            } else {
                Tier::Maximum
            };
            prop_assert_eq!(t, expected);
        }
    }
}
