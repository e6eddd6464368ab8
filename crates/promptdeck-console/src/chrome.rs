#![forbid(unsafe_code)]

//! Screen layout and panel rendering.
//!
//! [`Layout`] carves the terminal into panel rectangles and doubles as the
//! [`LayoutProbe`] the tour engine measures anchors through, so the spotlight
//! always tracks whatever the current terminal size produced.

use promptdeck_core::{AppId, Rect, Size};
use promptdeck_engine::ConsoleSession;
use promptdeck_engine::macro_chain::MACRO_STEPS;
use promptdeck_engine::splash::Splash;
use promptdeck_engine::tour::{Anchor, LayoutProbe, PlacementConfig, TourFrame, place_tooltip};

use crate::surface::{CellRect, Style, Surface};
use crate::theme;

/// Placement tuning in terminal cells rather than screen pixels.
pub fn placement_config() -> PlacementConfig {
    PlacementConfig {
        tooltip_width: 36.0,
        pad: 1.0,
        gap: 2.0,
        narrow_width: 84.0,
    }
}

/// Panel rectangles for one terminal size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    pub header: CellRect,
    pub switcher: CellRect,
    pub grid: CellRect,
    pub output: CellRect,
    pub dial: CellRect,
    pub ring: CellRect,
    pub macro_chain: CellRect,
    pub hints: CellRect,
}

impl Layout {
    pub fn compute(width: u16, height: u16) -> Self {
        let mut l = Self {
            width,
            height,
            ..Self::default()
        };
        if width < 40 || height < 20 {
            // Too small for panels; the render path falls back to a notice.
            return l;
        }
        l.header = CellRect::new(0, 0, width, 3);
        l.switcher = CellRect::new(0, 3, width, 3);

        let macro_h = 5;
        let hints_h = 1;
        let body_y = 6;
        let body_h = height - body_y - macro_h - hints_h;

        let side_w = 26.min(width / 3);
        let grid_w = 36.min((width - side_w) / 2);
        let output_w = width - grid_w - side_w;

        l.grid = CellRect::new(0, body_y, grid_w, body_h);
        l.output = CellRect::new(grid_w, body_y, output_w, body_h);
        let dial_h = (body_h * 3 / 5).max(7);
        l.dial = CellRect::new(grid_w + output_w, body_y, side_w, dial_h);
        l.ring = CellRect::new(grid_w + output_w, body_y + dial_h, side_w, body_h - dial_h);
        l.macro_chain = CellRect::new(0, body_y + body_h, width, macro_h);
        l.hints = CellRect::new(0, height - 1, width, 1);
        l
    }

    pub fn is_usable(&self) -> bool {
        self.grid.width > 0
    }

    fn anchor_rect(&self, anchor: Anchor) -> CellRect {
        match anchor {
            Anchor::AppSwitcher => self.switcher,
            Anchor::ButtonGrid => self.grid,
            Anchor::OutputPanel => self.output,
            Anchor::DialPanel => self.dial,
            Anchor::ActionsRing => self.ring,
            Anchor::MacroChain => self.macro_chain,
        }
    }
}

impl LayoutProbe for Layout {
    fn measure(&self, anchor: Anchor) -> Option<Rect> {
        if !self.is_usable() {
            return None;
        }
        Some(self.anchor_rect(anchor).to_rect())
    }

    fn viewport(&self) -> Size {
        Size::new(f32::from(self.width), f32::from(self.height))
    }
}

/// Paint one full frame of the console.
pub fn render(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    surface.clear();
    if !layout.is_usable() {
        surface.put_str(1, 1, "Terminal too small for PromptDeck", theme::text());
        return;
    }
    render_header(surface, layout, session);
    render_switcher(surface, layout, session);
    render_grid(surface, layout, session);
    render_output(surface, layout, session);
    render_dial(surface, layout, session);
    render_ring(surface, layout, session);
    render_macro(surface, layout, session);
    render_hints(surface, layout);
    render_toasts(surface, layout, session);
    render_tour(surface, layout, session);
}

fn render_header(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    let app = session.app();
    surface.draw_box(layout.header, None, theme::panel_border(app));
    surface.put_str(2, 1, "PromptDeck", theme::highlight(app));
    surface.put_str(13, 1, "MX Creative Console", theme::muted());

    let stats = format!(
        "{} actions · {} saved",
        session.actions_completed(),
        session.time_saved()
    );
    let x = layout.header.right().saturating_sub(stats.chars().count() as u16 + 2);
    surface.put_str(x, 1, &stats, theme::muted());
}

fn render_switcher(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    let active = session.app();
    surface.draw_box(layout.switcher, None, theme::panel_border(active));
    let mut x = layout.switcher.x + 2;
    for app in AppId::ALL {
        let spec = app.spec();
        let label = format!(" {} {} ", spec.icon, spec.name);
        let style = if app == active {
            Style::new().fg(theme::accent(app)).bold()
        } else {
            theme::muted()
        };
        x = surface.put_str(x, layout.switcher.y + 1, &label, style);
        x += 1;
    }
}

fn render_grid(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    let app = session.app();
    let spec = app.spec();
    surface.draw_box(layout.grid, Some("Console Buttons"), theme::panel_border(app));

    let inner_w = layout.grid.width.saturating_sub(2);
    let inner_h = layout.grid.height.saturating_sub(2);
    let cell_w = inner_w / 3;
    let cell_h = inner_h / 3;
    if cell_w < 4 || cell_h < 2 {
        return;
    }
    for (i, button) in spec.buttons.iter().enumerate() {
        if !session.grid().button_visible(i) {
            continue;
        }
        let col = (i % 3) as u16;
        let row = (i / 3) as u16;
        let x = layout.grid.x + 1 + col * cell_w;
        let y = layout.grid.y + 1 + row * cell_h;
        let selected = session.selected_button() == i;
        let style = if selected {
            theme::highlight(app)
        } else {
            theme::text()
        };
        let face = format!("{} {}", i + 1, button.icon);
        surface.put_str(x + 1, y, &face, style);
        let label: String = button.label.chars().take(usize::from(cell_w) - 2).collect();
        surface.put_str(x + 1, y + 1, &label, if selected { style } else { theme::muted() });
    }
}

fn render_output(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    let app = session.app();
    surface.draw_box(layout.output, Some("AI Output"), theme::panel_border(app));
    let inner_x = layout.output.x + 2;
    let inner_w = usize::from(layout.output.width.saturating_sub(4));
    let top = layout.output.y + 1;
    let rows = layout.output.height.saturating_sub(2);

    let button = session.selected_button();
    let spec = &app.spec().buttons[button];
    surface.put_str(inner_x, top, spec.label, theme::highlight(app));
    let tier = session.dial().tier();
    let tag = format!("[{}]", tier.label());
    surface.put_str(
        layout.output.right().saturating_sub(tag.chars().count() as u16 + 2),
        top,
        &tag,
        theme::muted(),
    );

    if session.outputs().is_pending(app) {
        surface.put_str(inner_x, top + 2, "Loading app profile…", theme::muted());
        return;
    }

    let tw = session.typewriter();
    let mut y = top + 2;
    'lines: for line in tw.visible_text().split('\n') {
        let chunks = wrap(line, inner_w);
        if chunks.is_empty() {
            // Blank source lines keep their vertical space.
            y += 1;
            if y >= top + rows {
                break;
            }
            continue;
        }
        for chunk in chunks {
            if y >= top + rows {
                break 'lines;
            }
            surface.put_str(inner_x, y, &chunk, theme::text());
            y += 1;
        }
    }
    if tw.is_typing() && y < top + rows {
        surface.put_char(inner_x, y, '▌', theme::highlight(app));
    }
}

fn render_dial(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    let app = session.app();
    let dial = session.dial();
    surface.draw_box(layout.dial, Some(app.spec().dial_label), theme::panel_border(app));

    let gauge_h = layout.dial.height.saturating_sub(4);
    if gauge_h == 0 {
        return;
    }
    let filled = ((dial.value() / 100.0) * f32::from(gauge_h)).round() as u16;
    let gx = layout.dial.x + layout.dial.width / 2;
    for i in 0..gauge_h {
        // Row 0 of the gauge is the top; fill from the bottom up.
        let on = gauge_h - i <= filled;
        let (ch, style) = if on {
            ('█', theme::highlight(app))
        } else {
            ('░', theme::muted())
        };
        surface.put_char(gx, layout.dial.y + 1 + i, ch, style);
    }
    let readout = format!("{:>3.0}  {}", dial.value(), dial.tier().label());
    surface.put_str(layout.dial.x + 2, layout.dial.bottom() - 2, &readout, theme::text());
}

fn render_ring(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    let app = session.app();
    surface.draw_box(layout.ring, Some("Actions Ring"), theme::panel_border(app));
    if layout.ring.height > 3 {
        let (glyph, style) = if session.ring_spinning() {
            ("✨ MX Master4", theme::highlight(app))
        } else {
            ("◎ MX Master4", theme::text())
        };
        surface.put_str(layout.ring.x + 2, layout.ring.y + 1, glyph, style);
        surface.put_str(layout.ring.x + 2, layout.ring.y + 2, "Select → Twist [r]", theme::muted());
    }
}

fn render_macro(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    let app = session.app();
    let chain = session.macros();
    surface.draw_box(layout.macro_chain, Some("Macro Chain"), theme::panel_border(app));

    let mut x = layout.macro_chain.x + 2;
    let y = layout.macro_chain.y + 2;
    for (i, step) in MACRO_STEPS.iter().enumerate() {
        let (marker, style) = if chain.step_done(i) {
            ("✔", Style::new().fg(theme::SUCCESS))
        } else if chain.active_step() == Some(i) {
            ("▶", theme::highlight(app))
        } else {
            ("·", theme::muted())
        };
        let label = format!("{marker} {} {}", step.icon, step.label);
        x = surface.put_str(x, y, &label, style);
        if i + 1 < MACRO_STEPS.len() {
            x = surface.put_str(x, y, "  →  ", theme::muted());
        }
    }
    let hint = if chain.is_running() {
        "running…"
    } else {
        "Run Macro [m]"
    };
    surface.put_str(
        layout.macro_chain.right().saturating_sub(hint.chars().count() as u16 + 2),
        y,
        hint,
        theme::muted(),
    );
}

fn render_hints(surface: &mut Surface, layout: &Layout) {
    surface.put_str(
        layout.hints.x + 1,
        layout.hints.y,
        "1-9 buttons · Tab apps · ↑/↓ dial · m macro · r ring · t tour · q quit",
        theme::muted(),
    );
}

fn render_toasts(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    // Stacked above the macro panel, newest at the bottom.
    let toasts: Vec<_> = session.toasts().iter().collect();
    let mut y = layout.macro_chain.y;
    for toast in toasts.iter().rev() {
        if y < 3 {
            break;
        }
        y -= 3;
        let w = (toast.message.chars().count() as u16 + 4).min(layout.width.saturating_sub(2));
        let x = layout.width.saturating_sub(w + 1);
        let rect = CellRect::new(x, y, w, 3);
        surface.fill_rect(rect, ' ', Style::new().bg(theme::OVERLAY));
        surface.draw_box(rect, None, Style::new().fg(theme::SUCCESS).bg(theme::OVERLAY));
        surface.put_str(x + 2, y + 1, &toast.message, theme::text().bg(theme::OVERLAY));
    }
}

fn render_tour(surface: &mut Surface, layout: &Layout, session: &ConsoleSession) {
    let Some(frame) = session.tour().frame(layout) else {
        return;
    };
    match frame {
        TourFrame::Banner { text } => {
            let rect = CellRect::new(0, 0, layout.width, 3);
            surface.fill_rect(rect, ' ', Style::new().bg(theme::OVERLAY));
            surface.draw_box(rect, None, Style::new().fg(theme::SUCCESS).bg(theme::OVERLAY));
            for (i, chunk) in wrap(text, usize::from(layout.width.saturating_sub(4)))
                .into_iter()
                .take(1)
                .enumerate()
            {
                surface.put_str(2, 1 + i as u16, &chunk, theme::text().bg(theme::OVERLAY));
            }
        }
        TourFrame::Spotlight {
            step_index,
            step_count,
            step,
            cutout,
            ..
        } => {
            let accent = theme::highlight(session.app());
            if let Some(cutout) = cutout {
                surface.draw_box(clamp_rect(cutout, layout), None, accent);
            }
            let cfg = session.tour().config();
            let body_w = usize::from(cfg.tooltip_width as u16).saturating_sub(4);
            let lines = wrap(step.body, body_w);
            let tip_h = lines.len() as u16 + 4;
            let anchor = cutout.unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
            let tip = place_tooltip(
                step.side,
                anchor,
                layout.viewport(),
                Size::new(cfg.tooltip_width, f32::from(tip_h)),
                cfg,
            );
            let rect = clamp_rect(tip, layout);
            surface.fill_rect(rect, ' ', Style::new().bg(theme::OVERLAY));
            surface.draw_box(rect, None, accent);
            let counter = format!("{}/{}", step_index + 1, step_count);
            surface.put_str(rect.x + 2, rect.y + 1, step.title, accent);
            surface.put_str(
                rect.right().saturating_sub(counter.chars().count() as u16 + 2),
                rect.y + 1,
                &counter,
                theme::muted(),
            );
            for (i, line) in lines.iter().enumerate() {
                surface.put_str(
                    rect.x + 2,
                    rect.y + 2 + i as u16,
                    line,
                    theme::text().bg(theme::OVERLAY),
                );
            }
            surface.put_str(
                rect.x + 2,
                rect.bottom().saturating_sub(2),
                "Enter next · Esc skip",
                theme::muted(),
            );
        }
    }
}

/// Centered boot splash.
pub fn render_splash(surface: &mut Surface, splash: &Splash) {
    surface.clear();
    let w = surface.width();
    let h = surface.height();
    let cx = w / 2;
    let cy = h / 2;
    if w < 30 || h < 12 {
        return;
    }
    let dim_all = splash.is_fading_out();
    let base = if dim_all { theme::muted() } else { theme::text() };

    // 3x3 logo dot grid.
    for row in 0..3u16 {
        for col in 0..3u16 {
            let idx = usize::from(row * 3 + col);
            let lit = splash.dot_lit(idx) && !dim_all;
            let (ch, style) = if lit {
                ('●', Style::new().fg(theme::SUCCESS))
            } else {
                ('○', theme::muted())
            };
            surface.put_char(cx - 3 + col * 3, cy - 4 + row, ch, style);
        }
    }
    if splash.phase() >= 2 {
        surface.put_str(cx - 5, cy, "PromptDeck", base.bold());
    }
    if splash.phase() >= 3 {
        let bar_w = 20u16;
        let filled = (splash.progress() * f32::from(bar_w)).round() as u16;
        let x0 = cx - bar_w / 2;
        for i in 0..bar_w {
            let (ch, style) = if i < filled {
                ('━', Style::new().fg(theme::SUCCESS))
            } else {
                ('─', theme::muted())
            };
            surface.put_char(x0 + i, cy + 2, ch, style);
        }
    }
    let status = splash.status_text();
    surface.put_str(cx - status.chars().count() as u16 / 2, cy + 4, status, theme::muted());
}

fn clamp_rect(rect: Rect, layout: &Layout) -> CellRect {
    let x = rect.x.max(0.0) as u16;
    let y = rect.y.max(0.0) as u16;
    let width = (rect.width as u16).min(layout.width.saturating_sub(x));
    let height = (rect.height as u16).min(layout.height.saturating_sub(y));
    CellRect::new(x, y, width, height)
}

/// Greedy word wrap; words longer than `width` are split hard.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;
    for word in text.split_whitespace() {
        let wlen = word.chars().count();
        if line_len > 0 && line_len + 1 + wlen > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if wlen > width {
            for ch in word.chars() {
                if line_len >= width {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                line.push(ch);
                line_len += 1;
            }
            continue;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += wlen;
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
