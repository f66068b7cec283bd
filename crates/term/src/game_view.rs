//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::f32::consts::PI;

use crate::core::{get_shape, ClearProgress, GameSnapshot, Tetromino};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const FLASH_RGB: Rgb = Rgb::new(255, 255, 200);
const BLOCK: char = '█';

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

/// Front-end state shown next to the board that the engine does not own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelInfo {
    pub high_score: u32,
    pub music_enabled: bool,
}

impl Default for PanelInfo {
    fn default() -> Self {
        Self {
            high_score: 0,
            music_enabled: true,
        }
    }
}

/// Where the board frame landed inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Draws the playfield, ghost, clear animation, side panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers can reuse a framebuffer across frames; nothing here allocates
    /// unless the viewport grows.
    pub fn render_into(&self, snap: &GameSnapshot, panel: PanelInfo, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let w = board_px_w + 2;
        let h = board_px_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', CellStyle::new(PLAYFIELD_BG, PLAYFIELD_BG));
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        // Locked cells; rows being cleared get the flash/fade treatment.
        let progress = snap.clear_progress.unwrap_or_default();
        for (y, row) in snap.board.iter().enumerate() {
            let clearing = snap.is_row_clearing(y);
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match (*cell, clearing) {
                    (Some(kind), true) => {
                        let (ch, style) = clearing_cell(kind, progress);
                        self.fill_cell(fb, frame, x, y, ch, style);
                    }
                    (Some(kind), false) => {
                        self.fill_cell(fb, frame, x, y, BLOCK, CellStyle::new(piece_rgb(kind), PLAYFIELD_BG).bold());
                    }
                    (None, _) => {
                        let dot = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
                        self.fill_cell(fb, frame, x, y, '·', dot);
                    }
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            let style = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
            self.draw_piece(fb, frame, &ghost, '░', style);
        }

        if let Some(current) = snap.current {
            let style = CellStyle::new(piece_rgb(current.kind()), PLAYFIELD_BG).bold();
            self.draw_piece(fb, frame, &current, BLOCK, style);
        }

        self.draw_side_panel(fb, snap, panel, viewport, frame);

        match snap.status {
            GameStatus::Paused => draw_overlay(fb, frame, &["PAUSED", "ESC to resume"]),
            GameStatus::GameOver => draw_overlay(fb, frame, &["GAME OVER", "R to restart"]),
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, panel: PanelInfo, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, panel, viewport, &mut fb);
        fb
    }

    /// Blocks above or beside the board are skipped.
    fn draw_piece(&self, fb: &mut FrameBuffer, frame: Frame, piece: &Tetromino, ch: char, style: CellStyle) {
        for block in piece.absolute_blocks() {
            if (0..BOARD_WIDTH as i32).contains(&block.x) && (0..BOARD_HEIGHT as i32).contains(&block.y) {
                self.fill_cell(fb, frame, block.x as u16, block.y as u16, ch, style);
            }
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, cell_x: u16, cell_y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, panel: PanelInfo, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("HIGH", panel.high_score.max(snap.score)),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next.kind(), false);
        y = y.saturating_add(4);
        self.draw_preview(fb, panel_x, y, snap.next_next.kind(), true);
        y = y.saturating_add(4);

        fb.put_str(panel_x, y, "MUSIC", label);
        fb.put_str(panel_x + 6, y, if panel.music_enabled { "ON" } else { "OFF" }, value);
    }

    /// Small spawn-orientation drawing of `kind` in a 4x3 cell box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, faded: bool) {
        let mut style = CellStyle::new(piece_rgb(kind), PANEL_BG);
        if faded {
            style = style.dim();
        }
        for (dx, dy) in get_shape(kind, 0) {
            // Spawn offsets span -1..=2 horizontally and -1..=1 vertically.
            let px = x + ((dx + 1) as u16) * self.cell_w;
            let py = y + (dy + 1) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, BLOCK, style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
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

fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
    let title = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let hint = CellStyle::new(Rgb::new(180, 180, 180), PANEL_BG);
    let mid_y = frame.y.saturating_add(frame.h / 2);
    for (i, text) in lines.iter().enumerate() {
        let style = if i == 0 { title } else { hint };
        fb.put_str_centered(frame.x, mid_y + i as u16, frame.w, text, style);
    }
}

/// Display color for each piece kind.
pub fn piece_rgb(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// Brightness of the clear flash: a fast pulse under a slowly rising envelope.
pub fn flash_intensity(flash: f32) -> f32 {
    let pulse = (flash * PI * 10.0).sin() * 0.5 + 0.5;
    let envelope = 0.7 + (flash * PI * 0.5).sin() * 0.3;
    (pulse * envelope).clamp(0.0, 1.0)
}

/// Glyph and style of a block in a row that is being cleared.
pub fn clearing_cell(kind: PieceKind, progress: ClearProgress) -> (char, CellStyle) {
    let base = piece_rgb(kind);
    if progress.fade > 0.0 {
        let fg = base.lerp(PLAYFIELD_BG, progress.fade);
        let ch = if progress.fade < 0.5 { '▓' } else { '░' };
        return (ch, CellStyle::new(fg, PLAYFIELD_BG));
    }
    let fg = base.lerp(FLASH_RGB, flash_intensity(progress.flash));
    (BLOCK, CellStyle::new(fg, PLAYFIELD_BG).bold())
}
