#![forbid(unsafe_code)]

//! Progressive text reveal for the output panel.
//!
//! A [`Typewriter`] owns at most one in-flight reveal, keyed by the
//! `(application, button, tier)` triple currently on screen. Retargeting to
//! a different key (or to new text for the same key, which happens when a
//! lazy output load resolves) cancels the old reveal outright: the state is
//! replaced, so a superseded animation cannot emit another prefix. The
//! generation counter identifies which reveal produced the current text.
//!
//! Reveal order is grapheme clusters, not bytes: slicing mid-cluster would
//! split combining sequences and emoji.

use std::time::Duration;

use promptdeck_core::{AppId, Tier};
use unicode_segmentation::UnicodeSegmentation;

/// Graphemes revealed per chunk.
pub const CHUNK_GRAPHEMES: usize = 3;
/// Delay between chunks.
pub const CHUNK_DELAY: Duration = Duration::from_millis(8);
/// Fade-out played before a new reveal starts.
pub const FADE_OUT: Duration = Duration::from_millis(200);

/// Identifies which text variant is being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderKey {
    pub app: AppId,
    pub button: usize,
    pub tier: Tier,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Previous text is fading; nothing is shown.
    FadingOut { elapsed: Duration },
    /// Revealing. `shown` counts grapheme clusters.
    Typing {
        shown: usize,
        since_chunk: Duration,
    },
    /// Full text visible, caret hidden.
    Done,
}

/// The single in-flight reveal session.
#[derive(Debug, Clone)]
pub struct Typewriter {
    key: Option<RenderKey>,
    text: String,
    /// Byte offsets of grapheme boundaries; `boundaries[n]` is the end of
    /// the first `n` clusters, so `boundaries[0] == 0` and the last entry
    /// is `text.len()`.
    boundaries: Vec<usize>,
    phase: Phase,
    generation: u64,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Typewriter {
    /// An idle typewriter showing nothing.
    pub fn new() -> Self {
        Self {
            key: None,
            text: String::new(),
            boundaries: vec![0],
            phase: Phase::Done,
            generation: 0,
        }
    }

    /// Point the typewriter at a new target. No-op when both the key and
    /// the text are unchanged; otherwise the in-flight reveal is cancelled
    /// and a fade-out begins.
    pub fn retarget(&mut self, key: RenderKey, text: &str) {
        if self.key == Some(key) && self.text == text {
            return;
        }
        tracing::debug!(?key, len = text.len(), "typewriter retarget");
        self.key = Some(key);
        self.text = text.to_owned();
        self.boundaries = boundary_offsets(&self.text);
        self.phase = Phase::FadingOut {
            elapsed: Duration::ZERO,
        };
        self.generation = self.generation.wrapping_add(1);
    }

    /// Advance the animation by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        match self.phase {
            Phase::FadingOut { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= FADE_OUT {
                    // Forward the overshoot into the reveal so a large frame
                    // delta does not stall the first chunk.
                    self.phase = Phase::Typing {
                        shown: 0,
                        since_chunk: elapsed - FADE_OUT,
                    };
                    self.step_typing(Duration::ZERO);
                } else {
                    self.phase = Phase::FadingOut { elapsed };
                }
            }
            Phase::Typing { .. } => self.step_typing(dt),
            Phase::Done => {}
        }
    }

    fn step_typing(&mut self, dt: Duration) {
        let Phase::Typing {
            mut shown,
            mut since_chunk,
        } = self.phase
        else {
            return;
        };
        let total = self.boundaries.len() - 1;
        if total == 0 {
            // Empty target completes immediately.
            self.phase = Phase::Done;
            return;
        }
        since_chunk += dt;
        while since_chunk >= CHUNK_DELAY && shown < total {
            since_chunk -= CHUNK_DELAY;
            shown = (shown + CHUNK_GRAPHEMES).min(total);
        }
        self.phase = if shown >= total {
            Phase::Done
        } else {
            Phase::Typing { shown, since_chunk }
        };
    }

    /// The currently visible prefix of the target text.
    pub fn visible_text(&self) -> &str {
        match self.phase {
            Phase::FadingOut { .. } => "",
            Phase::Typing { shown, .. } => &self.text[..self.boundaries[shown]],
            Phase::Done => &self.text,
        }
    }

    /// Whether the reveal is still in progress (caret shown).
    pub fn is_typing(&self) -> bool {
        matches!(self.phase, Phase::Typing { .. })
    }

    /// Whether the pre-reveal fade is playing.
    pub fn is_fading(&self) -> bool {
        matches!(self.phase, Phase::FadingOut { .. })
    }

    /// Whether the full target text is visible.
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Current render key, if any target has been set.
    pub fn key(&self) -> Option<RenderKey> {
        self.key
    }

    /// Increments on every retarget; identifies the reveal that produced
    /// the current visible text.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn boundary_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(text.len() / 2 + 1);
    offsets.push(0);
    offsets.extend(text.grapheme_indices(true).map(|(i, g)| i + g.len()));
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(button: usize, tier: Tier) -> RenderKey {
        RenderKey {
            app: AppId::VsCode,
            button,
            tier,
        }
    }

    fn drain(tw: &mut Typewriter) {
        tw.advance(Duration::from_secs(60));
    }

    #[test]
    fn reveals_full_text_in_order() {
        let mut tw = Typewriter::new();
        tw.retarget(key(0, Tier::Balanced), "hello world");
        assert!(tw.is_fading());
        assert_eq!(tw.visible_text(), "");

        tw.advance(FADE_OUT);
        assert!(tw.is_typing());
        tw.advance(CHUNK_DELAY);
        assert_eq!(tw.visible_text(), "hel");
        tw.advance(CHUNK_DELAY);
        assert_eq!(tw.visible_text(), "hello ");

        drain(&mut tw);
        assert!(tw.is_done());
        assert_eq!(tw.visible_text(), "hello world");
    }

    #[test]
    fn empty_target_completes_immediately() {
        let mut tw = Typewriter::new();
        tw.retarget(key(1, Tier::Minimal), "");
        tw.advance(FADE_OUT);
        assert!(tw.is_done());
        assert_eq!(tw.visible_text(), "");
    }

    #[test]
    fn retarget_cancels_in_flight_reveal() {
        let mut tw = Typewriter::new();
        tw.retarget(key(0, Tier::Minimal), "aaaaaaaaaa");
        tw.advance(FADE_OUT);
        tw.advance(CHUNK_DELAY);
        assert_eq!(tw.visible_text(), "aaa");
        let gen_before = tw.generation();

        tw.retarget(key(0, Tier::Maximum), "bbbbbb");
        assert_eq!(tw.generation(), gen_before + 1);
        assert_eq!(tw.visible_text(), "");
        drain(&mut tw);
        // No characters from the abandoned text survive.
        assert_eq!(tw.visible_text(), "bbbbbb");
    }

    #[test]
    fn retarget_same_key_same_text_is_noop() {
        let mut tw = Typewriter::new();
        tw.retarget(key(0, Tier::Balanced), "stable");
        drain(&mut tw);
        let generation = tw.generation();
        tw.retarget(key(0, Tier::Balanced), "stable");
        assert_eq!(tw.generation(), generation);
        assert!(tw.is_done());
    }

    #[test]
    fn retarget_same_key_new_text_restarts() {
        // Happens when a lazy output load resolves for the visible key.
        let mut tw = Typewriter::new();
        tw.retarget(key(2, Tier::Balanced), "");
        drain(&mut tw);
        tw.retarget(key(2, Tier::Balanced), "loaded");
        assert!(tw.is_fading());
        drain(&mut tw);
        assert_eq!(tw.visible_text(), "loaded");
    }

    #[test]
    fn reveal_respects_grapheme_clusters() {
        let mut tw = Typewriter::new();
        // Family emoji is one cluster; a prefix must never split it.
        let text = "a\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F466}bc";
        tw.retarget(key(0, Tier::Minimal), text);
        tw.advance(FADE_OUT);
        tw.advance(CHUNK_DELAY);
        assert_eq!(tw.visible_text(), "a\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F466}b");
        drain(&mut tw);
        assert_eq!(tw.visible_text(), text);
    }

    #[test]
    fn overshoot_carries_from_fade_into_typing() {
        let mut tw = Typewriter::new();
        tw.retarget(key(0, Tier::Minimal), "abcdef");
        // One big delta: fade (200ms) plus two chunk delays.
        tw.advance(FADE_OUT + CHUNK_DELAY * 2);
        assert_eq!(tw.visible_text(), "abcdef");
    }
}
