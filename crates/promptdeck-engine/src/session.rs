#![forbid(unsafe_code)]

//! The console session: one struct owning every piece of demo state.
//!
//! Frontends translate input into the methods here (select an app, press a
//! button, turn the dial, run the macro) and call [`ConsoleSession::tick`]
//! once per frame with the elapsed time. `tick` advances every animation and
//! returns the events that fired, so the frontend never needs its own timers
//! or completion bookkeeping.

use std::time::Duration;

use promptdeck_core::{AppId, BUTTONS_PER_APP, DialState, dial};

use crate::grid::GridTransition;
use crate::macro_chain::{MacroChain, MacroEvent};
use crate::outputs::OutputLibrary;
use crate::toast::ToastQueue;
use crate::tour::{LayoutProbe, PlacementConfig, TourEngine, TourEvent};
use crate::typewriter::{RenderKey, Typewriter};

/// Toast posted when a macro run completes.
pub const MACRO_TOAST: &str = "\u{2705} Macro complete \u{2014} report sent to #design-feedback";
/// Toast posted when the actions ring is triggered.
pub const RING_TOAST: &str = "\u{2728} AI action triggered on selected content";

/// Simulated seconds of work saved per completed action.
pub const SECONDS_SAVED_PER_ACTION: u64 = 45;

/// How long the actions ring spins after a trigger.
pub const RING_SPIN: Duration = Duration::from_millis(800);

/// Events surfaced from one [`ConsoleSession::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The macro chain finished a run (its toast is already queued).
    MacroCompleted,
    /// The guided tour finished or was skipped.
    TourCompleted,
    /// A lazily loaded output table became resident.
    OutputsLoaded(AppId),
}

/// Aggregate demo state.
#[derive(Debug)]
pub struct ConsoleSession {
    app: AppId,
    /// Index of the active console button. A button is always selected;
    /// the session starts on (and app switches reset to) button 0.
    selected_button: usize,
    dial: DialState,
    outputs: OutputLibrary,
    typewriter: Typewriter,
    grid: GridTransition,
    macros: MacroChain,
    toasts: ToastQueue,
    tour: TourEngine,
    /// Elapsed time of the ring spin animation, if one is playing.
    ring_spin: Option<Duration>,
    actions_completed: u64,
}

impl Default for ConsoleSession {
    fn default() -> Self {
        Self::new(PlacementConfig::default())
    }
}

impl ConsoleSession {
    pub fn new(placement: PlacementConfig) -> Self {
        let mut session = Self {
            app: AppId::ALL[0],
            selected_button: 0,
            dial: DialState::new(),
            outputs: OutputLibrary::new(),
            typewriter: Typewriter::new(),
            grid: GridTransition::new(),
            macros: MacroChain::new(),
            toasts: ToastQueue::new(),
            tour: TourEngine::new(placement),
            ring_spin: None,
            actions_completed: 0,
        };
        // The first frame already shows button 0's output revealing.
        session.sync_typewriter();
        session
    }

    pub fn app(&self) -> AppId {
        self.app
    }

    pub fn selected_button(&self) -> usize {
        self.selected_button
    }

    pub fn dial(&self) -> &DialState {
        &self.dial
    }

    pub fn grid(&self) -> &GridTransition {
        &self.grid
    }

    pub fn macros(&self) -> &MacroChain {
        &self.macros
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn tour(&self) -> &TourEngine {
        &self.tour
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn outputs(&self) -> &OutputLibrary {
        &self.outputs
    }

    pub fn actions_completed(&self) -> u64 {
        self.actions_completed
    }

    /// Switch the active application. Resets the selection to button 0,
    /// restarts the grid transition, and schedules the output table load if
    /// the new app's table is not resident. Re-selecting the current app is
    /// a no-op.
    pub fn select_app(&mut self, app: AppId) {
        if app == self.app {
            return;
        }
        tracing::info!(app = app.as_str(), "application switched");
        self.app = app;
        self.selected_button = 0;
        self.grid.app_switched();
        self.outputs.request(app);
        self.sync_typewriter();
    }

    /// Cycle to the next application in catalog order.
    pub fn next_app(&mut self) {
        let i = AppId::ALL.iter().position(|a| *a == self.app).unwrap_or(0);
        self.select_app(AppId::ALL[(i + 1) % AppId::ALL.len()]);
    }

    /// Press console button `index`. Out-of-range presses are ignored.
    /// Pressing the already selected button counts as an action but does
    /// not restart the reveal.
    pub fn press_button(&mut self, index: usize) {
        if index >= BUTTONS_PER_APP {
            return;
        }
        self.selected_button = index;
        self.actions_completed += 1;
        self.sync_typewriter();
    }

    /// Vertical drag on the dial, in up-positive units.
    pub fn dial_drag(&mut self, dy_up: f32) {
        self.dial.drag(dy_up);
        self.sync_typewriter();
    }

    /// Scroll-wheel input on the dial.
    pub fn dial_wheel(&mut self, delta: f32) {
        self.dial.wheel(delta);
        self.sync_typewriter();
    }

    /// Start a macro run. Rejected (returns `false`) while one is playing.
    pub fn run_macro(&mut self) -> bool {
        self.macros.start()
    }

    /// Simulate a twist of the actions ring. Restarts the spin animation
    /// if one is already playing.
    pub fn trigger_ring(&mut self) {
        self.actions_completed += 1;
        self.ring_spin = Some(Duration::ZERO);
        self.toasts.push(RING_TOAST);
    }

    /// Whether the ring spin animation is playing.
    pub fn ring_spinning(&self) -> bool {
        self.ring_spin.is_some()
    }

    /// Begin the guided tour. Returns `false` if it is already running.
    pub fn start_tour(&mut self, probe: &dyn LayoutProbe) -> bool {
        self.tour.start(probe)
    }

    pub fn tour_next(&mut self, probe: &dyn LayoutProbe) {
        self.tour.next(probe);
    }

    pub fn tour_skip(&mut self) {
        self.tour.skip();
    }

    /// Notify the session that the viewport changed so the tour re-measures.
    pub fn viewport_resized(&mut self, probe: &dyn LayoutProbe) {
        self.tour.measure(probe);
    }

    /// Advance every animation by `dt`. Returns the events that fired, in
    /// a fixed order, each at most once per tick.
    pub fn tick(&mut self, dt: Duration, probe: &dyn LayoutProbe) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        for app in self.outputs.poll() {
            if app == self.app {
                // The visible table just resolved; restart the reveal with
                // the real text.
                self.sync_typewriter();
            }
            events.push(SessionEvent::OutputsLoaded(app));
        }

        self.grid.advance(dt);
        self.typewriter.advance(dt);
        if let Some(elapsed) = self.ring_spin {
            let elapsed = elapsed + dt;
            self.ring_spin = (elapsed < RING_SPIN).then_some(elapsed);
        }
        if self.macros.advance(dt) == Some(MacroEvent::Completed) {
            self.actions_completed += 1;
            self.toasts.push(MACRO_TOAST);
            events.push(SessionEvent::MacroCompleted);
        }
        self.toasts.advance(dt);
        if self.tour.advance(dt, probe) == Some(TourEvent::Completed) {
            events.push(SessionEvent::TourCompleted);
        }
        events
    }

    /// Human-readable estimate of time saved so far.
    pub fn time_saved(&self) -> String {
        format_time_saved(self.actions_completed)
    }

    fn sync_typewriter(&mut self) {
        let key = RenderKey {
            app: self.app,
            button: self.selected_button,
            tier: dial::tier(self.dial.value()),
        };
        let text = self
            .outputs
            .get(self.app, self.selected_button, self.dial.value())
            .to_owned();
        self.typewriter.retarget(key, &text);
    }
}

/// Format `actions × 45 s` as a compact duration, e.g. `45s` or `3m 45s`.
pub fn format_time_saved(actions: u64) -> String {
    let total = actions * SECONDS_SAVED_PER_ACTION;
    let minutes = total / 60;
    let seconds = total % 60;
    if minutes == 0 {
        format!("{seconds}s")
    } else {
        format!("{minutes}m {seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptdeck_core::{Rect, Size};
    use crate::tour::Anchor;

    struct StubProbe;

    impl LayoutProbe for StubProbe {
        fn measure(&self, _anchor: Anchor) -> Option<Rect> {
            Some(Rect::new(10.0, 10.0, 100.0, 40.0))
        }

        fn viewport(&self) -> Size {
            Size::new(1280.0, 800.0)
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn settle(session: &mut ConsoleSession) -> Vec<SessionEvent> {
        let mut all = Vec::new();
        for _ in 0..100 {
            all.extend(session.tick(ms(100), &StubProbe));
        }
        all
    }

    #[test]
    fn starts_on_default_app_with_button_zero_selected() {
        let session = ConsoleSession::default();
        assert_eq!(session.app(), AppId::VsCode);
        assert_eq!(session.selected_button(), 0);
        assert_eq!(session.dial().value(), 50.0);
        assert_eq!(session.actions_completed(), 0);
        // The initial reveal is already in flight.
        assert!(session.typewriter().is_fading());
    }

    #[test]
    fn initial_reveal_shows_the_balanced_variant() {
        let mut session = ConsoleSession::default();
        settle(&mut session);
        assert!(
            session
                .typewriter()
                .visible_text()
                .starts_with("// Moderate refactoring applied")
        );
    }

    #[test]
    fn repeat_press_counts_but_does_not_restart() {
        let mut session = ConsoleSession::default();
        session.press_button(0);
        settle(&mut session);
        let generation = session.typewriter().generation();
        session.press_button(0);
        assert_eq!(session.typewriter().generation(), generation);
        assert_eq!(session.actions_completed(), 2);
    }

    #[test]
    fn out_of_range_press_is_ignored() {
        let mut session = ConsoleSession::default();
        session.press_button(BUTTONS_PER_APP);
        assert_eq!(session.selected_button(), 0);
        assert_eq!(session.actions_completed(), 0);
    }

    #[test]
    fn dial_crossing_a_tier_boundary_retargets_the_reveal() {
        let mut session = ConsoleSession::default();
        session.press_button(0);
        settle(&mut session);
        let balanced = session.typewriter().visible_text().to_owned();

        // 50 -> 90 crosses into Maximum.
        session.dial_drag(80.0);
        assert!(session.typewriter().is_fading());
        settle(&mut session);
        assert_ne!(session.typewriter().visible_text(), balanced);
    }

    #[test]
    fn dial_within_a_tier_does_not_restart_the_reveal() {
        let mut session = ConsoleSession::default();
        session.press_button(0);
        settle(&mut session);
        let generation = session.typewriter().generation();
        session.dial_drag(4.0);
        assert_eq!(session.typewriter().generation(), generation);
    }

    #[test]
    fn app_switch_schedules_lazy_load_and_resolves_on_tick() {
        let mut session = ConsoleSession::default();
        session.select_app(AppId::Slack);
        assert!(session.outputs().is_pending(AppId::Slack));
        assert_eq!(session.selected_button(), 0);
        assert!(session.grid().is_transitioning());

        let events = session.tick(ms(16), &StubProbe);
        assert!(events.contains(&SessionEvent::OutputsLoaded(AppId::Slack)));
        assert!(session.outputs().is_cached(AppId::Slack));
    }

    #[test]
    fn press_before_load_resolves_recovers_after_poll() {
        let mut session = ConsoleSession::default();
        session.select_app(AppId::Figma);
        session.press_button(2);
        // Table not resident yet, so the target is empty.
        settle(&mut session);
        assert!(!session.typewriter().visible_text().is_empty());
    }

    #[test]
    fn reselecting_current_app_changes_nothing() {
        let mut session = ConsoleSession::default();
        session.press_button(1);
        session.select_app(AppId::VsCode);
        assert_eq!(session.selected_button(), 1);
        assert!(!session.grid().is_transitioning());
    }

    #[test]
    fn next_app_cycles_in_catalog_order() {
        let mut session = ConsoleSession::default();
        for expected in [
            AppId::Chrome,
            AppId::Figma,
            AppId::Slack,
            AppId::Excel,
            AppId::VsCode,
        ] {
            session.next_app();
            assert_eq!(session.app(), expected);
        }
    }

    #[test]
    fn macro_completion_posts_toast_and_event() {
        let mut session = ConsoleSession::default();
        assert!(session.run_macro());
        assert!(!session.run_macro());

        let events = settle(&mut session);
        let completions = events
            .iter()
            .filter(|e| **e == SessionEvent::MacroCompleted)
            .count();
        assert_eq!(completions, 1);
        assert_eq!(session.actions_completed(), 1);
        // The toast itself expires during the long settle.
        assert!(session.toasts().is_empty());
    }

    #[test]
    fn ring_posts_toast_and_counts_an_action() {
        let mut session = ConsoleSession::default();
        session.trigger_ring();
        assert_eq!(session.actions_completed(), 1);
        assert!(session.ring_spinning());
        let messages: Vec<_> = session.toasts().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec![RING_TOAST]);
    }

    #[test]
    fn ring_spin_stops_after_its_interval() {
        let mut session = ConsoleSession::default();
        session.trigger_ring();
        session.tick(RING_SPIN - ms(1), &StubProbe);
        assert!(session.ring_spinning());
        session.tick(ms(1), &StubProbe);
        assert!(!session.ring_spinning());
    }

    #[test]
    fn tour_completion_event_fires_once() {
        let mut session = ConsoleSession::default();
        assert!(session.start_tour(&StubProbe));
        assert!(!session.start_tour(&StubProbe));
        session.tour_skip();
        let events = settle(&mut session);
        let completions = events
            .iter()
            .filter(|e| **e == SessionEvent::TourCompleted)
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn time_saved_formats_compactly() {
        assert_eq!(format_time_saved(0), "0s");
        assert_eq!(format_time_saved(1), "45s");
        assert_eq!(format_time_saved(4), "3m 0s");
        assert_eq!(format_time_saved(5), "3m 45s");
    }
}
