//! GameView: maps the painted field and a [`GameSnapshot`] into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Field row 0 is the floor, so it lands on the bottom screen row of the well.

use crate::core::{get_shape, pieces, GamePhase, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::paint::PaintBuffer;
use crate::types::{PieceKind, Rotation};

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

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up terminal glyphs.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen placement of the well for one frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    rows: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, paint: &PaintBuffer, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let cols = paint.width().max(0) as u16;
        let rows = paint.height().max(0) as u16;
        let w = cols * self.cell_w + 2;
        let h = rows * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
            rows,
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, w - 2, h - 2, ' ', CellStyle::plain(WELL_BG, WELL_BG));
        draw_border(fb, frame.x, frame.y, w, h, CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG));

        // Full rows shrink away during the first collapse step.
        let shrinking = snap.phase == GamePhase::AnimateCollapse && snap.animation_step == 0;

        for y in 0..paint.height() {
            let fading = shrinking && paint.is_row_full(y);
            for x in 0..paint.width() {
                match paint.get(x, y) {
                    Some(kind) if fading => self.draw_cell(fb, frame, x, y, '▒', piece_style(kind, 55)),
                    Some(kind) => self.draw_cell(fb, frame, x, y, '█', piece_style(kind, 100)),
                    None => {
                        let dot = CellStyle {
                            dim: true,
                            ..CellStyle::plain(Rgb::new(90, 90, 100), WELL_BG)
                        };
                        self.draw_cell(fb, frame, x, y, '·', dot);
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        let overlay = if snap.paused {
            Some("PAUSED")
        } else {
            match snap.phase {
                GamePhase::Idle => Some("PRESS SPACE"),
                GamePhase::WaitDelay(_) | GamePhase::AnimateEnd => Some("GAME OVER"),
                GamePhase::Playing | GamePhase::AnimateCollapse => None,
            }
        };
        if let Some(text) = overlay {
            draw_overlay_text(fb, frame, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, paint: &PaintBuffer, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(paint, snap, viewport, &mut fb);
        fb
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32, ch: char, style: CellStyle) {
        if x < 0 || y < 0 || y as u16 >= frame.rows {
            return;
        }
        let screen_row = frame.rows - 1 - y as u16;
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + screen_row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y + 1, snap.next);
        y += 4;

        fb.put_str(panel_x, y, "PIECES", label);
        fb.put_u32(panel_x, y + 1, snap.pieces_locked, value);
        y += 3;

        fb.put_str(panel_x, y, "ROWS", label);
        fb.put_u32(panel_x, y + 1, snap.rows_cleared, value);
        y += 3;

        fb.put_str(panel_x, y, "DROP MS", label);
        fb.put_u32(panel_x, y + 1, snap.drop_interval_ms.round() as u32, value);
        y += 3;

        if snap.last_score > 0 {
            fb.put_str(panel_x, y, "LAST", label);
            fb.put_u32(panel_x, y + 1, snap.last_score, value);
        }
    }

    /// Next piece in its spawn orientation, two screen rows tall.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let shape = get_shape(kind, Rotation::North);
        let top = shape.iter().map(|&(_, dy)| dy).max().unwrap_or(0);
        let style = piece_style(kind, 100);
        for &(dx, dy) in shape.iter() {
            let row = (top - dy) as u16;
            if row > 1 {
                continue;
            }
            fb.fill_rect(x + dx as u16 * 2, y + row, 2, 1, '█', style);
        }
    }
}

fn piece_style(kind: PieceKind, brightness: u8) -> CellStyle {
    CellStyle {
        bold: brightness >= 100,
        dim: false,
        ..CellStyle::plain(Rgb::from_array(pieces::color(kind)).scaled(brightness), WELL_BG)
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
    };
    fb.put_str(x, mid_y, text, style);
}
