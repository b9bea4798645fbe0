//! Per-frame view of a game for renderers and HUDs.

use crate::game_state::ActivePiece;
use crate::pieces::{template_for, Shape};
use crate::types::{PieceKind, SessionState, BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Type ids per cell (0 = empty), row 0 at the top.
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Landing row of the active piece (ghost preview).
    pub ghost_y: Option<i8>,
    pub next: Option<PieceKind>,
    pub state: SessionState,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub best: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Spawn matrix of the queued piece, for the "next" preview.
    pub fn next_shape(&self) -> Option<Shape> {
        self.next.map(template_for)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            state: SessionState::Ready,
            score: 0,
            lines: 0,
            level: 1,
            best: 0,
            drop_interval_ms: BASE_DROP_MS,
        }
    }
}
