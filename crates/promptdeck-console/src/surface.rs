#![forbid(unsafe_code)]

//! A full-redraw cell buffer flushed through crossterm.
//!
//! Each frame the app paints into the buffer and [`Surface::flush`] emits the
//! whole thing. The demo's screen is small and animations touch most of it
//! every frame, so diffing would buy little. Wide glyphs occupy two cells;
//! the trailing cell holds a continuation marker that the flush skips.

use std::io::{self, Write};

use crossterm::style::Color;
use promptdeck_core::Rect;
use unicode_width::UnicodeWidthChar;

/// Marker stored in the cell shadowed by a wide glyph.
const CONTINUATION: char = '\0';

/// Minimal style, mapped to crossterm attributes at flush time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            dim: false,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    symbol: char,
    style: Style,
}

impl Cell {
    const BLANK: Self = Self {
        symbol: ' ',
        style: Style::new(),
    };
}

/// Integer cell rectangle used for layout and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }

    /// The same rectangle in the engine's float geometry.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f32::from(self.x),
            f32::from(self.y),
            f32::from(self.width),
            f32::from(self.height),
        )
    }
}

/// The frame buffer.
#[derive(Debug)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::BLANK);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// Paint a single character cell.
    pub fn put_char(&mut self, x: u16, y: u16, symbol: char, style: Style) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { symbol, style };
        }
    }

    /// Paint a string starting at `(x, y)`, clipped at the right edge.
    /// Returns the column after the last painted cell.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col + w > self.width {
                break;
            }
            self.put_char(col, y, ch, style);
            if w == 2 {
                self.put_char(col + 1, y, CONTINUATION, style);
            }
            col += w;
        }
        col
    }

    /// Fill every cell of `rect` with `symbol`.
    pub fn fill_rect(&mut self, rect: CellRect, symbol: char, style: Style) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.put_char(x, y, symbol, style);
            }
        }
    }

    /// Draw a rounded single-line border around `rect` with an optional
    /// title on the top edge.
    pub fn draw_box(&mut self, rect: CellRect, title: Option<&str>, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let (x0, y0) = (rect.x, rect.y);
        let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);
        for x in x0 + 1..x1 {
            self.put_char(x, y0, '─', style);
            self.put_char(x, y1, '─', style);
        }
        for y in y0 + 1..y1 {
            self.put_char(x0, y, '│', style);
            self.put_char(x1, y, '│', style);
        }
        self.put_char(x0, y0, '╭', style);
        self.put_char(x1, y0, '╮', style);
        self.put_char(x0, y1, '╰', style);
        self.put_char(x1, y1, '╯', style);
        if let Some(title) = title
            && rect.width > 4
        {
            let label = format!(" {title} ");
            self.put_str(x0 + 1, y0, &label, style);
        }
    }

    /// Emit the whole buffer.
    pub fn flush(&self, out: &mut impl Write) -> io::Result<()> {
        use crossterm::style::{
            Attribute, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
        };

        crossterm::queue!(out, crossterm::cursor::MoveTo(0, 0))?;
        let mut current = Style::new();
        crossterm::queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
        for y in 0..self.height {
            crossterm::queue!(out, crossterm::cursor::MoveTo(0, y))?;
            for x in 0..self.width {
                let Some(i) = self.index(x, y) else {
                    continue;
                };
                let cell = self.cells[i];
                if cell.symbol == CONTINUATION {
                    continue;
                }
                if cell.style != current {
                    crossterm::queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
                    if let Some(fg) = cell.style.fg {
                        crossterm::queue!(out, SetForegroundColor(fg))?;
                    }
                    if let Some(bg) = cell.style.bg {
                        crossterm::queue!(out, SetBackgroundColor(bg))?;
                    }
                    if cell.style.bold {
                        crossterm::queue!(out, SetAttribute(Attribute::Bold))?;
                    }
                    if cell.style.dim {
                        crossterm::queue!(out, SetAttribute(Attribute::Dim))?;
                    }
                    current = cell.style;
                }
                crossterm::queue!(out, crossterm::style::Print(cell.symbol))?;
            }
        }
        crossterm::queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
        out.flush()
    }

    #[cfg(test)]
    fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.index(x, y).map(|i| self.cells[i].symbol))
            .filter(|c| *c != CONTINUATION)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_the_right_edge() {
        let mut s = Surface::new(5, 1);
        let end = s.put_str(2, 0, "hello", Style::new());
        assert_eq!(end, 5);
        assert_eq!(s.row_text(0), "  hel");
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        let mut s = Surface::new(6, 1);
        let end = s.put_str(0, 0, "日本", Style::new());
        assert_eq!(end, 4);
        // Continuation cells are skipped when reading the row back.
        assert_eq!(s.row_text(0), "日本  ");
    }

    #[test]
    fn wide_glyph_never_splits_across_the_edge() {
        let mut s = Surface::new(3, 1);
        s.put_str(2, 0, "日", Style::new());
        assert_eq!(s.row_text(0), "   ");
    }

    #[test]
    fn draw_box_corners() {
        let mut s = Surface::new(4, 3);
        s.draw_box(CellRect::new(0, 0, 4, 3), None, Style::new());
        assert_eq!(s.row_text(0), "╭──╮");
        assert_eq!(s.row_text(1), "│  │");
        assert_eq!(s.row_text(2), "╰──╯");
    }

    #[test]
    fn cell_rect_hit_testing() {
        let r = CellRect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(2, 5));
    }

    #[test]
    fn resize_clears_content() {
        let mut s = Surface::new(4, 2);
        s.put_str(0, 0, "abcd", Style::new());
        s.resize(6, 3);
        assert_eq!(s.width(), 6);
        assert_eq!(s.row_text(0), "      ");
    }
}
