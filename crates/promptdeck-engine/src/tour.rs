#![forbid(unsafe_code)]

//! The guided tour engine.
//!
//! A finite sequence of highlight-and-explain steps, each bound to a named
//! UI anchor. Anchor geometry comes from a [`LayoutProbe`] capability so the
//! placement math stays pure and testable without a rendering surface. The
//! engine re-measures on step entry, on explicit resize notification, and on
//! a periodic tick while active; if an anchor disappears the last known
//! rectangle is held (the renderer may then skip the step, but nothing
//! crashes).
//!
//! On narrow viewports the tour degrades to a single dismissible banner
//! instead of per-step spotlighting.

use std::time::Duration;

use promptdeck_core::{Rect, Size};

/// Re-measure cadence while a step is active.
pub const REMEASURE_INTERVAL: Duration = Duration::from_millis(500);
/// Fade-out played when the tour ends or is skipped.
pub const TOUR_FADE_OUT: Duration = Duration::from_millis(300);

/// A named UI element the tour can highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    AppSwitcher,
    ButtonGrid,
    OutputPanel,
    DialPanel,
    ActionsRing,
    MacroChain,
}

/// Which side of the anchor the tooltip prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// One tour step: anchor plus callout copy.
#[derive(Debug, Clone, Copy)]
pub struct TourStep {
    pub anchor: Anchor,
    pub title: &'static str,
    pub body: &'static str,
    pub side: Side,
}

/// The fixed step sequence.
pub static TOUR_STEPS: [TourStep; 6] = [
    TourStep {
        anchor: Anchor::AppSwitcher,
        title: "Your Active App",
        body: "PromptDeck detects which app you're using. Pick any app here to \
               simulate switching. Watch how everything on the page changes to match.",
        side: Side::Bottom,
    },
    TourStep {
        anchor: Anchor::ButtonGrid,
        title: "9 Smart Buttons",
        body: "These represent the 9 physical LCD buttons on your MX Creative \
               Console. Each one triggers a different AI action and they change \
               automatically based on your active app.",
        side: Side::Right,
    },
    TourStep {
        anchor: Anchor::OutputPanel,
        title: "Instant AI Results",
        body: "When you press a console button, the AI result appears here \
               instantly. The output changes based on which button you pressed \
               and where the dial is set.",
        side: Side::Left,
    },
    TourStep {
        anchor: Anchor::DialPanel,
        title: "The AI Dial",
        body: "This is the physical dial on the console. Drag up and down or \
               scroll to control how detailed the AI response is. Low for a quick \
               answer, high for a deep analysis.",
        side: Side::Left,
    },
    TourStep {
        anchor: Anchor::ActionsRing,
        title: "MX Master4 Actions Ring",
        body: "Select any text on your screen, twist the ring on your MX Master4 \
               mouse, and get instant AI processing with a single gesture.",
        side: Side::Left,
    },
    TourStep {
        anchor: Anchor::MacroChain,
        title: "One Button Workflows",
        body: "Chain multiple AI steps into a single button press. Hit \"Run \
               Macro\" to see it in action: capture screen, analyze, generate \
               report, and send to Slack automatically.",
        side: Side::Right,
    },
];

/// Message shown in degraded banner mode.
pub const BANNER_TEXT: &str =
    "PromptDeck turns your Logitech MX Console into an AI command center. Explore the demo below.";

/// Geometry tuning for placement math. Defaults match the product's screen
/// units; a frontend with coarser units (terminal cells) scales these.
#[derive(Debug, Clone, Copy)]
pub struct PlacementConfig {
    /// Fixed tooltip width.
    pub tooltip_width: f32,
    /// Inset between the anchor and the spotlight cutout.
    pub pad: f32,
    /// Gap between the cutout edge and the tooltip.
    pub gap: f32,
    /// Viewports narrower than this get the banner instead of spotlights.
    pub narrow_width: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            tooltip_width: 320.0,
            pad: 8.0,
            gap: 16.0,
            narrow_width: 768.0,
        }
    }
}

/// The spotlight cutout around an anchor.
pub fn cutout(anchor: Rect, cfg: &PlacementConfig) -> Rect {
    anchor.inflate(cfg.pad)
}

/// Place a tooltip of the given size relative to an anchor.
///
/// Pure function of its inputs. The result is clamped into the viewport so
/// an anchor near an edge never pushes the tooltip off screen.
pub fn place_tooltip(
    side: Side,
    anchor: Rect,
    viewport: Size,
    tooltip: Size,
    cfg: &PlacementConfig,
) -> Rect {
    let (x, y) = match side {
        Side::Bottom => (
            anchor.center_x() - tooltip.width / 2.0,
            anchor.bottom() + cfg.pad + cfg.gap,
        ),
        Side::Top => (
            anchor.center_x() - tooltip.width / 2.0,
            anchor.y - cfg.pad - cfg.gap - tooltip.height,
        ),
        Side::Right => (
            anchor.right() + cfg.pad + cfg.gap,
            anchor.center_y() - tooltip.height / 2.0,
        ),
        Side::Left => (
            anchor.x - cfg.pad - cfg.gap - tooltip.width,
            anchor.center_y() - tooltip.height / 2.0,
        ),
    };
    let x = x.clamp(0.0, (viewport.width - tooltip.width).max(0.0));
    let y = y.clamp(0.0, (viewport.height - tooltip.height).max(0.0));
    Rect::new(x, y, tooltip.width, tooltip.height)
}

/// Capability interface over whatever supplies layout geometry.
pub trait LayoutProbe {
    /// Current on-screen rectangle of the anchor, if it is present.
    fn measure(&self, anchor: Anchor) -> Option<Rect>;
    /// Current viewport size.
    fn viewport(&self) -> Size;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Inactive,
    Active { step: usize },
    FadingOut { elapsed: Duration },
}

/// Emitted by the engine when a tour run ends (finished or skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    Completed,
}

/// Everything a renderer needs for one tour frame.
#[derive(Debug, Clone, Copy)]
pub enum TourFrame {
    /// Narrow viewport: one dismissible banner, no spotlight.
    Banner { text: &'static str },
    /// Spotlight mode.
    Spotlight {
        step_index: usize,
        step_count: usize,
        step: &'static TourStep,
        /// Last known anchor rectangle; `None` if never measured.
        anchor: Option<Rect>,
        /// Cutout in the overlay mask, when the anchor is known.
        cutout: Option<Rect>,
        /// 1.0 while active, falling to 0.0 during fade-out.
        opacity: f32,
    },
}

/// The tour state machine.
#[derive(Debug, Clone)]
pub struct TourEngine {
    phase: Phase,
    cfg: PlacementConfig,
    anchor_rect: Option<Rect>,
    since_measure: Duration,
}

impl Default for TourEngine {
    fn default() -> Self {
        Self::new(PlacementConfig::default())
    }
}

impl TourEngine {
    pub fn new(cfg: PlacementConfig) -> Self {
        Self {
            phase: Phase::Inactive,
            cfg,
            anchor_rect: None,
            since_measure: Duration::ZERO,
        }
    }

    /// Placement tuning in effect.
    pub fn config(&self) -> &PlacementConfig {
        &self.cfg
    }

    /// Begin the tour at step 0. Only valid from the inactive state;
    /// returns `false` otherwise.
    pub fn start(&mut self, probe: &dyn LayoutProbe) -> bool {
        if self.phase != Phase::Inactive {
            return false;
        }
        tracing::debug!("tour started");
        self.phase = Phase::Active { step: 0 };
        self.anchor_rect = None;
        self.since_measure = Duration::ZERO;
        self.measure(probe);
        true
    }

    /// Advance to the next step, or begin the fade-out after the last one.
    pub fn next(&mut self, probe: &dyn LayoutProbe) {
        let Phase::Active { step } = self.phase else {
            return;
        };
        if step + 1 < TOUR_STEPS.len() {
            self.phase = Phase::Active { step: step + 1 };
            self.anchor_rect = None;
            self.since_measure = Duration::ZERO;
            self.measure(probe);
        } else {
            tracing::debug!("tour finished, fading out");
            self.phase = Phase::FadingOut {
                elapsed: Duration::ZERO,
            };
        }
    }

    /// Skip out of the tour from any active step.
    pub fn skip(&mut self) {
        if let Phase::Active { step } = self.phase {
            tracing::debug!(step, "tour skipped");
            self.phase = Phase::FadingOut {
                elapsed: Duration::ZERO,
            };
        }
    }

    /// Re-measure the current anchor now (call on viewport resize).
    pub fn measure(&mut self, probe: &dyn LayoutProbe) {
        if let Phase::Active { step } = self.phase {
            // Hold the last known rect when the anchor is absent.
            if let Some(rect) = probe.measure(TOUR_STEPS[step].anchor) {
                self.anchor_rect = Some(rect);
            }
        }
    }

    /// Advance timers: the periodic re-measure tick while active, and the
    /// fade-out. Returns [`TourEvent::Completed`] exactly once per run,
    /// on the advance that finishes the fade.
    pub fn advance(&mut self, dt: Duration, probe: &dyn LayoutProbe) -> Option<TourEvent> {
        match self.phase {
            Phase::Inactive => None,
            Phase::Active { .. } => {
                self.since_measure += dt;
                if self.since_measure >= REMEASURE_INTERVAL {
                    self.since_measure = Duration::ZERO;
                    self.measure(probe);
                }
                None
            }
            Phase::FadingOut { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= TOUR_FADE_OUT {
                    self.phase = Phase::Inactive;
                    self.anchor_rect = None;
                    Some(TourEvent::Completed)
                } else {
                    self.phase = Phase::FadingOut { elapsed };
                    None
                }
            }
        }
    }

    /// Whether the tour is running (active or fading).
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Inactive
    }

    /// Index of the current step while active.
    pub fn step_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Active { step } => Some(step),
            _ => None,
        }
    }

    /// Snapshot for the renderer, or `None` when inactive.
    pub fn frame(&self, probe: &dyn LayoutProbe) -> Option<TourFrame> {
        let (step, opacity) = match self.phase {
            Phase::Inactive => return None,
            Phase::Active { step } => (step, 1.0),
            Phase::FadingOut { elapsed } => {
                // Step index is gone during fade; keep showing the last step.
                let t = elapsed.as_secs_f32() / TOUR_FADE_OUT.as_secs_f32();
                (TOUR_STEPS.len() - 1, (1.0 - t).max(0.0))
            }
        };
        if probe.viewport().width < self.cfg.narrow_width {
            return Some(TourFrame::Banner { text: BANNER_TEXT });
        }
        Some(TourFrame::Spotlight {
            step_index: step,
            step_count: TOUR_STEPS.len(),
            step: &TOUR_STEPS[step],
            anchor: self.anchor_rect,
            cutout: self.anchor_rect.map(|r| cutout(r, &self.cfg)),
            opacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Probe with a scriptable anchor rect and measure counter.
    struct FakeProbe {
        rect: Cell<Option<Rect>>,
        viewport: Size,
        measures: Cell<usize>,
    }

    impl FakeProbe {
        fn new() -> Self {
            Self {
                rect: Cell::new(Some(Rect::new(100.0, 100.0, 200.0, 80.0))),
                viewport: Size::new(1280.0, 800.0),
                measures: Cell::new(0),
            }
        }
    }

    impl LayoutProbe for FakeProbe {
        fn measure(&self, _anchor: Anchor) -> Option<Rect> {
            self.measures.set(self.measures.get() + 1);
            self.rect.get()
        }

        fn viewport(&self) -> Size {
            self.viewport
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn run_to_completion(tour: &mut TourEngine, probe: &FakeProbe) -> usize {
        let mut completions = 0;
        for _ in 0..20 {
            if tour.advance(ms(100), probe) == Some(TourEvent::Completed) {
                completions += 1;
            }
        }
        completions
    }

    #[test]
    fn start_only_from_inactive() {
        let probe = FakeProbe::new();
        let mut tour = TourEngine::default();
        assert!(tour.start(&probe));
        assert!(!tour.start(&probe));
        assert_eq!(tour.step_index(), Some(0));
    }

    #[test]
    fn next_walks_steps_then_fades_out() {
        let probe = FakeProbe::new();
        let mut tour = TourEngine::default();
        tour.start(&probe);
        for i in 1..TOUR_STEPS.len() {
            tour.next(&probe);
            assert_eq!(tour.step_index(), Some(i));
        }
        tour.next(&probe);
        assert!(tour.is_active());
        assert_eq!(tour.step_index(), None);
        assert_eq!(run_to_completion(&mut tour, &probe), 1);
        assert!(!tour.is_active());
    }

    #[test]
    fn skip_completes_exactly_once_from_any_step() {
        for k in 0..TOUR_STEPS.len() {
            let probe = FakeProbe::new();
            let mut tour = TourEngine::default();
            tour.start(&probe);
            for _ in 0..k {
                tour.next(&probe);
            }
            tour.skip();
            // A second skip during the fade must not re-arm completion.
            tour.skip();
            assert_eq!(run_to_completion(&mut tour, &probe), 1, "step {k}");
        }
    }

    #[test]
    fn periodic_tick_remeasures() {
        let probe = FakeProbe::new();
        let mut tour = TourEngine::default();
        tour.start(&probe);
        let after_start = probe.measures.get();
        tour.advance(ms(499), &probe);
        assert_eq!(probe.measures.get(), after_start);
        tour.advance(ms(1), &probe);
        assert_eq!(probe.measures.get(), after_start + 1);
    }

    #[test]
    fn missing_anchor_holds_last_known_rect() {
        let probe = FakeProbe::new();
        let mut tour = TourEngine::default();
        tour.start(&probe);
        let first = match tour.frame(&probe) {
            Some(TourFrame::Spotlight { anchor, .. }) => anchor,
            other => panic!("expected spotlight frame, got {other:?}"),
        };
        assert!(first.is_some());

        probe.rect.set(None);
        tour.advance(ms(500), &probe);
        match tour.frame(&probe) {
            Some(TourFrame::Spotlight { anchor, .. }) => assert_eq!(anchor, first),
            other => panic!("expected spotlight frame, got {other:?}"),
        }
    }

    #[test]
    fn narrow_viewport_degrades_to_banner() {
        let mut probe = FakeProbe::new();
        probe.viewport = Size::new(500.0, 800.0);
        let mut tour = TourEngine::default();
        tour.start(&probe);
        match tour.frame(&probe) {
            Some(TourFrame::Banner { text }) => assert_eq!(text, BANNER_TEXT),
            other => panic!("expected banner frame, got {other:?}"),
        }
    }

    #[test]
    fn restartable_after_completion() {
        let probe = FakeProbe::new();
        let mut tour = TourEngine::default();
        tour.start(&probe);
        tour.skip();
        run_to_completion(&mut tour, &probe);
        assert!(tour.start(&probe));
        assert_eq!(tour.step_index(), Some(0));
    }

    #[test]
    fn placement_bottom_centers_horizontally() {
        let cfg = PlacementConfig::default();
        let anchor = Rect::new(400.0, 100.0, 200.0, 50.0);
        let viewport = Size::new(1280.0, 800.0);
        let tip = place_tooltip(Side::Bottom, anchor, viewport, Size::new(320.0, 120.0), &cfg);
        assert_eq!(tip.x, 500.0 - 160.0);
        assert_eq!(tip.y, 150.0 + 8.0 + 16.0);
    }

    #[test]
    fn placement_top_mirrors_bottom() {
        let cfg = PlacementConfig::default();
        let anchor = Rect::new(400.0, 400.0, 200.0, 50.0);
        let viewport = Size::new(1280.0, 800.0);
        let tip = place_tooltip(Side::Top, anchor, viewport, Size::new(320.0, 120.0), &cfg);
        assert_eq!(tip.y, 400.0 - 8.0 - 16.0 - 120.0);
        assert_eq!(tip.center_x(), anchor.center_x());
    }

    #[test]
    fn placement_left_offsets_by_tooltip_width() {
        let cfg = PlacementConfig::default();
        let anchor = Rect::new(800.0, 300.0, 100.0, 100.0);
        let viewport = Size::new(1280.0, 800.0);
        let tip = place_tooltip(Side::Left, anchor, viewport, Size::new(320.0, 160.0), &cfg);
        assert_eq!(tip.x, 800.0 - 8.0 - 16.0 - 320.0);
        assert_eq!(tip.center_y(), anchor.center_y());
    }

    #[test]
    fn placement_clamps_into_viewport() {
        let cfg = PlacementConfig::default();
        let anchor = Rect::new(0.0, 0.0, 40.0, 40.0);
        let viewport = Size::new(1280.0, 800.0);
        let tip = place_tooltip(Side::Left, anchor, viewport, Size::new(320.0, 160.0), &cfg);
        assert_eq!(tip.x, 0.0);
        assert!(tip.y >= 0.0);
    }

    #[test]
    fn cutout_is_padded_anchor() {
        let cfg = PlacementConfig::default();
        let anchor = Rect::new(100.0, 100.0, 50.0, 50.0);
        assert_eq!(cutout(anchor, &cfg), Rect::new(92.0, 92.0, 66.0, 66.0));
    }

    #[test]
    fn steps_cover_every_anchor() {
        let anchors: Vec<_> = TOUR_STEPS.iter().map(|s| s.anchor).collect();
        for anchor in [
            Anchor::AppSwitcher,
            Anchor::ButtonGrid,
            Anchor::OutputPanel,
            Anchor::DialPanel,
            Anchor::ActionsRing,
            Anchor::MacroChain,
        ] {
            assert!(anchors.contains(&anchor));
        }
    }
}
