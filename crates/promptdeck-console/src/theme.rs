#![forbid(unsafe_code)]

//! Color palette.

use crossterm::style::Color;
use promptdeck_core::AppId;

use crate::surface::Style;

/// Active application's accent color.
pub fn accent(app: AppId) -> Color {
    let (r, g, b) = app.spec().accent;
    Color::Rgb { r, g, b }
}

pub const TEXT: Color = Color::Rgb {
    r: 226,
    g: 232,
    b: 240,
};

pub const MUTED: Color = Color::Rgb {
    r: 120,
    g: 130,
    b: 150,
};

pub const SUCCESS: Color = Color::Rgb {
    r: 74,
    g: 222,
    b: 128,
};

pub const OVERLAY: Color = Color::Rgb {
    r: 30,
    g: 34,
    b: 44,
};

pub fn text() -> Style {
    Style::new().fg(TEXT)
}

pub fn muted() -> Style {
    Style::new().fg(MUTED)
}

pub fn panel_border(app: AppId) -> Style {
    Style::new().fg(accent(app))
}

pub fn highlight(app: AppId) -> Style {
    Style::new().fg(accent(app)).bold()
}
