//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O). Field row 0 is the bottom row, so field rows are flipped on
//! the way to the screen. Bricks of the current figure that are still above
//! the field are not drawn.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Coordinate, FigureKind};

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

/// Side length, in field cells, of the next-figure preview.
const PREVIEW_CELLS: u16 = 4;
const STATUS_BOX_W: u16 = 16;
const STATUS_BOX_H: u16 = 4;

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Field cell `(x, y)` in screen space, relative to a frame's top-left corner.
#[derive(Debug, Clone, Copy)]
struct CellGrid {
    left: u16,
    top: u16,
    rows: u16,
    cell_w: u16,
    cell_h: u16,
}

impl CellGrid {
    fn origin(&self, x: u16, y: u16) -> (u16, u16) {
        let flipped = self.rows - 1 - y;
        (
            self.left + 1 + x * self.cell_w,
            self.top + 1 + flipped * self.cell_h,
        )
    }
}

pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares cells in common terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
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
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let cols = to_u16(snap.width);
        let rows = to_u16(snap.height);
        if cols == 0 || rows == 0 {
            return;
        }

        let frame_w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = rows.saturating_mul(self.cell_h).saturating_add(2);
        let panel_w = STATUS_BOX_W + 2;
        let left = viewport.width.saturating_sub(frame_w.saturating_add(panel_w)) / 2;
        let top = viewport.height.saturating_sub(frame_h) / 2;

        let field = CellGrid {
            left,
            top,
            rows,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        };

        fb.fill_rect(
            left + 1,
            top + 1,
            frame_w - 2,
            frame_h - 2,
            Style::new(FIELD_BG, FIELD_BG).glyph(' '),
        );
        fb.draw_box(left, top, frame_w, frame_h, Style::new(Rgb::new(200, 200, 200), PANEL_BG));

        for y in 0..rows {
            for x in 0..cols {
                match snap.cell(usize::from(x), usize::from(y)) {
                    Some(brick) => self.draw_brick(fb, field, x, y, brick.kind),
                    None => self.draw_empty(fb, field, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            for brick in active.bricks {
                if let Some((x, y)) = visible(brick, cols, rows) {
                    self.draw_brick(fb, field, x, y, active.kind);
                }
            }
        }

        let panel_x = left.saturating_add(frame_w).saturating_add(2);
        self.draw_status(fb, snap, panel_x, top);
        self.draw_next(fb, snap, panel_x, top.saturating_add(STATUS_BOX_H + 1));
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_brick(&self, fb: &mut FrameBuffer, grid: CellGrid, x: u16, y: u16, kind: FigureKind) {
        let style = Style::new(kind_color(kind), FIELD_BG).bold();
        let (px, py) = grid.origin(x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, style.glyph('█'));
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, grid: CellGrid, x: u16, y: u16) {
        let style = Style::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        let (px, py) = grid.origin(x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, style.glyph('·'));
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let frame = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.draw_box(x, y, STATUS_BOX_W, STATUS_BOX_H, frame);
        fb.put_str(x + 2, y + 1, "Level", label);
        fb.put_number(x + 9, y + 1, u64::from(snap.level), value);
        fb.put_str(x + 2, y + 2, "Score", label);
        fb.put_number(x + 9, y + 2, snap.score, value);
    }

    fn draw_next(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        fb.put_str(x, y, "Next", label);

        let box_y = y + 1;
        let box_w = PREVIEW_CELLS * self.cell_w + 2;
        let box_h = PREVIEW_CELLS * self.cell_h + 2;
        fb.draw_box(x, box_y, box_w, box_h, Style::new(Rgb::new(120, 120, 130), PANEL_BG));

        let grid = CellGrid {
            left: x,
            top: box_y,
            rows: PREVIEW_CELLS,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        };
        for brick in snap.next.preview {
            if let Some((bx, by)) = visible(brick, PREVIEW_CELLS, PREVIEW_CELLS) {
                let style = Style::new(kind_color(snap.next.kind), PANEL_BG).bold();
                let (px, py) = grid.origin(bx, by);
                fb.fill_rect(px, py, self.cell_w, self.cell_h, style.glyph('█'));
            }
        }
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Brick position if it lies inside a `cols` x `rows` grid.
fn visible(brick: Coordinate, cols: u16, rows: u16) -> Option<(u16, u16)> {
    let x = u16::try_from(brick.x).ok().filter(|&x| x < cols)?;
    let y = u16::try_from(brick.y).ok().filter(|&y| y < rows)?;
    Some((x, y))
}

fn kind_color(kind: FigureKind) -> Rgb {
    match kind {
        FigureKind::I => Rgb::new(80, 220, 220),
        FigureKind::J => Rgb::new(80, 120, 220),
        FigureKind::L => Rgb::new(255, 165, 0),
        FigureKind::O => Rgb::new(240, 220, 80),
        FigureKind::S => Rgb::new(100, 220, 120),
        FigureKind::Z => Rgb::new(220, 80, 80),
        FigureKind::T => Rgb::new(200, 120, 220),
    }
}
