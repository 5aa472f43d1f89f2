//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, ShapeCatalog};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::ShapeId;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame lands inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Renders a game into a framebuffer, one board cell as `cell_w x cell_h`
/// terminal characters.
#[derive(Debug, Clone)]
pub struct GameView {
    cell_w: u16,
    cell_h: u16,
    anchor_y: AnchorY,
    /// Shape colors, indexed by `ShapeId::index`
    palette: [Rgb; 7],
}

impl GameView {
    /// 2x1 cells, centred vertically, colors from the catalog
    pub fn new(catalog: &ShapeCatalog) -> Self {
        let mut palette = [Rgb::default(); 7];
        for def in catalog.iter() {
            palette[def.id().index()] = def.color();
        }
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            palette,
        }
    }

    pub fn with_cell_size(mut self, cell_w: u16, cell_h: u16) -> Self {
        self.cell_w = cell_w.max(1);
        self.cell_h = cell_h.max(1);
        self
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn color_of(&self, shape: ShapeId) -> Rgb {
        self.palette[shape.index()]
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let w = snap.cols.saturating_mul(self.cell_w).saturating_add(2);
        let h = snap.rows.saturating_mul(self.cell_h).saturating_add(2);
        let x = viewport.width.saturating_sub(w + PANEL_WIDTH) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Layout { x, y, w, h }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers can reuse a framebuffer across frames.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        draw_border(fb, layout, border);

        // Locked board cells.
        for y in 0..snap.rows {
            for x in 0..snap.cols {
                match ShapeId::from_cell(snap.cell(x as usize, y as usize)) {
                    Some(shape) => self.draw_block(fb, layout, x, y, shape),
                    None => self.draw_empty(fb, layout, x, y),
                }
            }
        }

        // Active piece.
        if let Some(active) = &snap.active {
            for &(x, y) in active.cells.iter() {
                if x >= 0 && y >= 0 && (x as u16) < snap.cols && (y as u16) < snap.rows {
                    self.draw_block(fb, layout, x as u16, y as u16, active.shape);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            draw_overlay_text(fb, layout, "GAME OVER");
        } else if snap.paused {
            draw_overlay_text(fb, layout, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = layout.x + 1 + x * self.cell_w;
        let py = layout.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16, shape: ShapeId) {
        let style = CellStyle::new(self.color_of(shape), WELL_BG).bold();
        self.fill_cell(fb, layout, x, y, '█', style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, layout: Layout, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell(fb, layout, x, y, '·', style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout.x.saturating_add(layout.w).saturating_add(2);
        if panel_x.saturating_add(MIN_PANEL_WIDTH) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = layout.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "SPEED", label);
        let end = fb.put_u32(panel_x, y + 1, snap.delay_ms, value);
        fb.put_str(end, y + 1, "ms", value);
        y = y.saturating_add(3);

        if let Some(active) = &snap.active {
            fb.put_str(panel_x, y, "PIECE", label);
            let style = CellStyle::new(self.color_of(active.shape), BLACK).bold();
            fb.put_str(panel_x, y + 1, active.shape.letter(), style);
            y = y.saturating_add(3);
        }

        let help = CellStyle::default().dim();
        for line in HELP_LINES {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }
}

const MIN_PANEL_WIDTH: u16 = 8;
const PANEL_WIDTH: u16 = 18;

const HELP_LINES: [&str; 5] = [
    "←→/ad move",
    "↓/s   drop",
    "↑/w/x z/q turn",
    "p pause r reset",
    "esc   quit",
];

fn draw_border(fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
    let Layout { x, y, w, h } = layout;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: Layout, text: &str) {
    let mid_y = layout.y.saturating_add(layout.h / 2);
    let text_w = text.chars().count() as u16;
    let x = layout.x.saturating_add(layout.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
    fb.put_str(x, mid_y, text, style);
}
