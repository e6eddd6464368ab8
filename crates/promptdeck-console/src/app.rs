#![forbid(unsafe_code)]

//! The interactive event loop.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use promptdeck_engine::splash::{Splash, SplashEvent};
use promptdeck_engine::{ConsoleSession, SessionEvent};

use crate::chrome::{self, Layout};
use crate::cli::Opts;
use crate::error::ConsoleError;
use crate::surface::Surface;
use crate::terminal::TerminalGuard;

/// Frame pacing target.
const FRAME: Duration = Duration::from_millis(16);

/// Dial units moved per Up/Down key press (via the drag path).
const KEY_DIAL_STEP: f32 = 6.0;
/// Wheel delta fed per scroll event; sign matches a browser wheel.
const WHEEL_STEP: f32 = 10.0;
/// Drag gain per cell of vertical mouse motion. Terminal rows are coarse
/// compared to pixels, so one row moves the dial further.
const ROW_DRAG_GAIN: f32 = 8.0;

pub struct App {
    session: ConsoleSession,
    splash: Option<Splash>,
    layout: Layout,
    start_tour_on_entry: bool,
    drag_row: Option<u16>,
    should_quit: bool,
}

impl App {
    pub fn new(opts: &Opts) -> Self {
        Self {
            session: ConsoleSession::new(chrome::placement_config()),
            splash: opts.splash.then(Splash::new),
            layout: Layout::default(),
            start_tour_on_entry: opts.start_tour,
            drag_row: None,
            should_quit: false,
        }
    }

    /// Run the console until quit or the optional deadline.
    pub fn run(mut self, opts: &Opts) -> Result<(), ConsoleError> {
        let terminal = TerminalGuard::new(opts.mouse)?;
        let (width, height) = terminal.size()?;
        self.layout = Layout::compute(width, height);
        let mut surface = Surface::new(width, height);

        if self.splash.is_none() {
            self.enter_console();
        }

        let started = Instant::now();
        let mut last_frame = Instant::now();
        let mut stdout = io::stdout();
        while !self.should_quit {
            let budget = FRAME.saturating_sub(last_frame.elapsed());
            if crossterm::event::poll(budget)? {
                let event = crossterm::event::read()?;
                self.handle_event(event, &mut surface);
                // Drain whatever queued up behind the first event.
                while crossterm::event::poll(Duration::ZERO)? {
                    let event = crossterm::event::read()?;
                    self.handle_event(event, &mut surface);
                }
            }

            let dt = last_frame.elapsed();
            last_frame = Instant::now();
            self.advance(dt);

            if opts.exit_after_ms > 0
                && started.elapsed() >= Duration::from_millis(opts.exit_after_ms)
            {
                tracing::info!("exit-after deadline reached");
                self.should_quit = true;
            }

            match &self.splash {
                Some(splash) => chrome::render_splash(&mut surface, splash),
                None => chrome::render(&mut surface, &self.layout, &self.session),
            }
            surface.flush(&mut stdout)?;
        }
        drop(terminal);
        Ok(())
    }

    fn advance(&mut self, dt: Duration) {
        if let Some(splash) = &mut self.splash {
            if splash.advance(dt) == Some(SplashEvent::Finished) {
                self.splash = None;
                self.enter_console();
            }
            return;
        }
        for event in self.session.tick(dt, &self.layout) {
            match event {
                SessionEvent::MacroCompleted => tracing::info!("macro run finished"),
                SessionEvent::TourCompleted => tracing::info!("tour dismissed"),
                SessionEvent::OutputsLoaded(app) => {
                    tracing::debug!(app = app.as_str(), "outputs ready")
                }
            }
        }
    }

    fn enter_console(&mut self) {
        if self.start_tour_on_entry {
            self.start_tour_on_entry = false;
            self.session.start_tour(&self.layout);
        }
    }

    fn handle_event(&mut self, event: Event, surface: &mut Surface) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                surface.resize(width, height);
                self.layout = Layout::compute(width, height);
                self.session.viewport_resized(&self.layout);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.splash.is_some() {
            // Any key skips the boot sequence.
            self.splash = None;
            self.enter_console();
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.session.next_app(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.session.press_button(index);
            }
            KeyCode::Up => self.session.dial_drag(KEY_DIAL_STEP),
            KeyCode::Down => self.session.dial_drag(-KEY_DIAL_STEP),
            KeyCode::Char('m') => {
                self.session.run_macro();
            }
            KeyCode::Char('r') => self.session.trigger_ring(),
            KeyCode::Char('t') => {
                self.session.start_tour(&self.layout);
            }
            KeyCode::Enter => self.session.tour_next(&self.layout),
            KeyCode::Esc => self.session.tour_skip(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.splash.is_some() {
            return;
        }
        let over_dial = self.layout.dial.contains(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollUp if over_dial => self.session.dial_wheel(-WHEEL_STEP),
            MouseEventKind::ScrollDown if over_dial => self.session.dial_wheel(WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) if over_dial => {
                self.drag_row = Some(mouse.row);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(prev) = self.drag_row {
                    let dy_up = f32::from(prev) - f32::from(mouse.row);
                    self.session.dial_drag(dy_up * ROW_DRAG_GAIN);
                    self.drag_row = Some(mouse.row);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_row = None,
            _ => {}
        }
    }
}
