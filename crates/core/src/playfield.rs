//! Playfield module - the grid figures land in
//!
//! A `width x height` grid stored as a flat row-major vector of cells
//! (`y * width + x`). Row 0 is the bottom row. Occupancy changes only through
//! [`Playfield::stamp`], [`Playfield::collapse_filled_rows`] and
//! [`Playfield::clear`].

use crate::figure::{Figure, FigureShape};
use crate::types::{Brick, Cell, Coordinate};

/// Result of writing a figure into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampOutcome {
    /// Every brick was written; these are the cells it now occupies.
    Placed(FigureShape),
    /// At least one brick lies outside the field. Nothing was written.
    Overflow,
}

/// Fixed-size grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Playfield {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Playfield {
    /// Create an empty field.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, c: Coordinate) -> Option<usize> {
        if !self.in_bounds(c) {
            return None;
        }
        Some(c.y as usize * self.width + c.x as usize)
    }

    /// `0 <= x < width` and `0 <= y < height`.
    pub fn in_bounds(&self, c: Coordinate) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    /// Cell at `c`, or `None` when out of bounds.
    pub fn get(&self, c: Coordinate) -> Option<Cell> {
        self.index(c).map(|idx| self.cells[idx])
    }

    /// Overwrite the cell at `c`. Returns false when out of bounds.
    pub fn set(&mut self, c: Coordinate, cell: Cell) -> bool {
        match self.index(c) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and holding a brick.
    pub fn is_occupied(&self, c: Coordinate) -> bool {
        matches!(self.get(c), Some(Some(_)))
    }

    /// Would `figure` overlap the walls, the floor or a settled brick?
    ///
    /// The ceiling is open: bricks at `y >= height` never collide, so figures
    /// can spawn above the field and fall into it. Such bricks are caught
    /// later by [`Playfield::stamp`].
    pub fn is_collision(&self, figure: &Figure) -> bool {
        let bbox = figure.world_bounding_box();
        if bbox.x_min < 0 || bbox.y_min < 0 || bbox.x_max >= self.width as i32 {
            return true;
        }
        figure
            .world_bricks()
            .iter()
            .any(|&brick| self.is_occupied(brick))
    }

    /// Write every brick of `figure` into the grid, tagged with `figure_id`.
    ///
    /// Returns [`StampOutcome::Overflow`] without touching the grid when any
    /// brick is out of bounds; the caller treats that as a lost round.
    pub fn stamp(&mut self, figure: &Figure, figure_id: u32) -> StampOutcome {
        let bricks = figure.world_bricks();
        if !bricks.iter().all(|&brick| self.in_bounds(brick)) {
            return StampOutcome::Overflow;
        }

        let occupant = Brick {
            kind: figure.kind(),
            figure_id,
        };
        for &brick in &bricks {
            self.set(brick, Some(occupant));
        }
        StampOutcome::Placed(bricks)
    }

    /// Every column of row `y` is occupied.
    pub fn is_row_filled(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Rows from bottom (`y = 0`) to top.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Remove row `y`, shift every row above it down by one and empty the top row.
    fn remove_row(&mut self, y: usize) {
        let width = self.width;
        let src_start = (y + 1) * width;
        let src_end = self.height * width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(src_start..src_end, y * width);
        let top = (self.height - 1) * width;
        self.cells[top..].fill(None);
    }

    /// Remove every filled row, returning how many were removed.
    pub fn collapse_filled_rows(&mut self) -> usize {
        self.collapse_filled_rows_with(|_| {})
    }

    /// Remove every filled row, reporting each removal to `on_removed`.
    ///
    /// Rows are scanned bottom to top. After a removal the same index is
    /// checked again, since the row that slid into it may itself be filled,
    /// so one call clears every filled row. The index passed to `on_removed`
    /// is the row's position at the moment it was removed; the same index can
    /// be reported more than once.
    pub fn collapse_filled_rows_with(&mut self, mut on_removed: impl FnMut(usize)) -> usize {
        let mut removed = 0;
        let mut y = 0;
        while y < self.height {
            if self.is_row_filled(y) {
                self.remove_row(y);
                removed += 1;
                on_removed(y);
            } else {
                y += 1;
            }
        }
        removed
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Flat row-major view of all cells, bottom row first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FigureKind;

    fn brick(id: u32) -> Cell {
        Some(Brick {
            kind: FigureKind::I,
            figure_id: id,
        })
    }

    fn fill_row(field: &mut Playfield, y: i32, id: u32) {
        for x in 0..field.width() as i32 {
            field.set(Coordinate::new(x, y), brick(id));
        }
    }

    #[test]
    fn test_index_is_row_major_from_bottom() {
        let field = Playfield::new(10, 20);
        assert_eq!(field.index(Coordinate::new(0, 0)), Some(0));
        assert_eq!(field.index(Coordinate::new(9, 0)), Some(9));
        assert_eq!(field.index(Coordinate::new(0, 1)), Some(10));
        assert_eq!(field.index(Coordinate::new(9, 19)), Some(199));
        assert_eq!(field.index(Coordinate::new(-1, 0)), None);
        assert_eq!(field.index(Coordinate::new(10, 0)), None);
        assert_eq!(field.index(Coordinate::new(0, 20)), None);
    }

    #[test]
    fn test_remove_row_shifts_and_empties_top() {
        let mut field = Playfield::new(3, 4);
        fill_row(&mut field, 0, 1);
        field.set(Coordinate::new(1, 1), brick(2));
        fill_row(&mut field, 3, 3);

        field.remove_row(0);

        assert_eq!(field.get(Coordinate::new(1, 0)), Some(brick(2)));
        assert!(field.row(2).iter().all(|c| *c == brick(3)));
        assert!(field.row(3).iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_remove_top_row() {
        let mut field = Playfield::new(3, 2);
        fill_row(&mut field, 1, 1);
        field.remove_row(1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_collapse_rechecks_the_same_index() {
        let mut field = Playfield::new(4, 6);
        fill_row(&mut field, 0, 1);
        fill_row(&mut field, 1, 2);
        field.set(Coordinate::new(0, 2), brick(3));
        fill_row(&mut field, 3, 4);

        let mut reported = Vec::new();
        let removed = field.collapse_filled_rows_with(|y| reported.push(y));

        assert_eq!(removed, 3);
        assert_eq!(reported, vec![0, 0, 1]);
        assert_eq!(field.get(Coordinate::new(0, 0)), Some(brick(3)));
        assert_eq!(field.occupied_count(), 1);
    }

    #[test]
    fn test_collapse_everything() {
        let mut field = Playfield::new(4, 5);
        for y in 0..5 {
            fill_row(&mut field, y, y as u32);
        }
        assert_eq!(field.collapse_filled_rows(), 5);
        assert!(field.is_empty());
    }

    #[test]
    fn test_stamp_overflow_leaves_field_untouched() {
        let mut field = Playfield::new(10, 20);
        let figure = Figure::at(FigureKind::O, 0, Coordinate::new(4, 19));
        assert_eq!(field.stamp(&figure, 1), StampOutcome::Overflow);
        assert!(field.is_empty());
    }

    #[test]
    fn test_stamp_checks_columns_too() {
        let mut field = Playfield::new(4, 4);
        let figure = Figure::at(FigureKind::I, 0, Coordinate::new(2, 0));
        assert_eq!(field.stamp(&figure, 1), StampOutcome::Overflow);
        assert!(field.is_empty());
    }
}
