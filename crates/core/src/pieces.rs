//! Pieces module - the piece catalog and matrix rotation
//!
//! Every piece is a small square matrix of cells. Templates are immutable
//! constants; [`template_for`] hands out a copy that the caller owns and may
//! rotate freely.
//!
//! Rotation is a plain matrix transform:
//! - clockwise: transpose, then reverse each row
//! - counter-clockwise: transpose, then reverse the row order
//!
//! This only works because every template is square (2x2, 3x3 or 4x4).

use crate::types::{Cell, PieceKind, Rotation};

/// Largest matrix side length in the catalog (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// A square piece matrix stored inline.
///
/// Only the top-left `size x size` block is meaningful; the rest stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of ids (0 = empty, otherwise [`PieceKind::id`]).
    ///
    /// # Panics
    ///
    /// Panics if `rows` is not square or larger than [`MAX_SHAPE_SIZE`].
    pub fn from_ids<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N <= MAX_SHAPE_SIZE, "shape larger than {MAX_SHAPE_SIZE}x{MAX_SHAPE_SIZE}");
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                cells[y][x] = PieceKind::from_id(id);
            }
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Side length of the matrix.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell at matrix position (x, y), `None` outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size as usize || y >= self.size as usize {
            return None;
        }
        self.cells[y][x]
    }

    /// Occupied cells as `(dx, dy, kind)` offsets from the matrix origin.
    pub fn blocks(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        let n = self.size as usize;
        self.cells[..n].iter().enumerate().flat_map(move |(y, row)| {
            row[..n]
                .iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.map(|kind| (x as i8, y as i8, kind)))
        })
    }

    /// Rotate in place.
    pub fn rotate(&mut self, dir: Rotation) {
        self.transpose();
        match dir {
            Rotation::Cw => self.reverse_each_row(),
            Rotation::Ccw => self.reverse_row_order(),
        }
    }

    /// Rotated copy.
    pub fn rotated(mut self, dir: Rotation) -> Self {
        self.rotate(dir);
        self
    }

    fn transpose(&mut self) {
        let n = self.size as usize;
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[y][x];
                self.cells[y][x] = self.cells[x][y];
                self.cells[x][y] = tmp;
            }
        }
    }

    fn reverse_each_row(&mut self) {
        let n = self.size as usize;
        for row in &mut self.cells[..n] {
            row[..n].reverse();
        }
    }

    fn reverse_row_order(&mut self) {
        let n = self.size as usize;
        self.cells[..n].reverse();
    }
}

const T_TEMPLATE: [[u8; 3]; 3] = [[0, 0, 0], [6, 6, 6], [0, 6, 0]];
const O_TEMPLATE: [[u8; 2]; 2] = [[4, 4], [4, 4]];
const L_TEMPLATE: [[u8; 3]; 3] = [[0, 3, 0], [0, 3, 0], [0, 3, 3]];
const J_TEMPLATE: [[u8; 3]; 3] = [[0, 2, 0], [0, 2, 0], [2, 2, 0]];
const I_TEMPLATE: [[u8; 4]; 4] = [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]];
const S_TEMPLATE: [[u8; 3]; 3] = [[0, 5, 5], [5, 5, 0], [0, 0, 0]];
const Z_TEMPLATE: [[u8; 3]; 3] = [[7, 7, 0], [0, 7, 7], [0, 0, 0]];

/// Fresh copy of the spawn matrix for a piece kind.
pub fn template_for(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_ids(I_TEMPLATE),
        PieceKind::J => Shape::from_ids(J_TEMPLATE),
        PieceKind::L => Shape::from_ids(L_TEMPLATE),
        PieceKind::O => Shape::from_ids(O_TEMPLATE),
        PieceKind::S => Shape::from_ids(S_TEMPLATE),
        PieceKind::T => Shape::from_ids(T_TEMPLATE),
        PieceKind::Z => Shape::from_ids(Z_TEMPLATE),
    }
}

/// Rotate with the simple horizontal wall kick.
///
/// After rotating, the piece is shifted by +1, -2, +3, -4, ... columns
/// (applied cumulatively, so it tries x+1, x-1, x+2, x-2, ...) until
/// `collides` reports a free spot. The search gives up once the next shift
/// would exceed the matrix width.
///
/// Returns the rotated shape and its new column, or `None` if every candidate
/// collided (callers then keep the original piece untouched).
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    dir: Rotation,
    collides: impl Fn(&Shape, i8) -> bool,
) -> Option<(Shape, i8)> {
    let rotated = shape.rotated(dir);
    let width = rotated.size() as i8;

    let mut new_x = x;
    let mut offset: i8 = 1;
    while collides(&rotated, new_x) {
        new_x += offset;
        offset = -(offset + offset.signum());
        if offset > width {
            return None;
        }
    }

    Some((rotated, new_x))
}
