use ratatui::prelude::*;

/// Character grid the playfields are painted into before becoming `Line`s.
pub struct Field {
    w: usize,
    h: usize,
    cells: Vec<Vec<(char, Style)>>,
}

impl Field {
    pub fn new(w: usize, h: usize, bg: Color) -> Self {
        Self {
            w,
            h,
            cells: vec![vec![(' ', Style::default().bg(bg)); w]; h],
        }
    }

    pub fn put(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return;
        }
        self.cells[y as usize][x as usize] = (ch, style);
    }

    /// Paints a two-column-wide grid cell, keeping square-ish proportions in the terminal.
    pub fn put_wide(&mut self, col: i32, row: i32, glyph: [char; 2], style: Style) {
        self.put(col * 2, row, glyph[0], style);
        self.put(col * 2 + 1, row, glyph[1], style);
    }

    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, ch: char, style: Style) {
        for y in y0..y1.max(y0 + 1) {
            for x in x0..x1.max(x0 + 1) {
                self.put(x, y, ch, style);
            }
        }
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Scales continuous playfield coordinates onto a `w`×`h` character grid.
#[derive(Clone, Copy)]
pub struct Scale {
    sx: f32,
    sy: f32,
}

impl Scale {
    pub fn new(w: usize, h: usize, field_w: f32, field_h: f32) -> Self {
        Self {
            sx: w as f32 / field_w,
            sy: h as f32 / field_h,
        }
    }

    pub fn x(&self, x: f32) -> i32 {
        (x * self.sx).floor() as i32
    }

    pub fn y(&self, y: f32) -> i32 {
        (y * self.sy).floor() as i32
    }
}
