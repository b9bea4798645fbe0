//! Shared types - plain data used by every crate in the workspace
//!
//! Nothing in here depends on the engine, the terminal, or persistence, so the
//! same definitions can be used by the core rules, the input adapter, and the
//! renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn row**: -2, two rows above the visible board
//!
//! # Gravity
//!
//! Gravity is derived from the level, and the level from cleared lines:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 800 | Interval at level 1 |
//! | `DROP_STEP_MS` | 70 | Interval reduction per level |
//! | `DROP_INTERVAL_FLOOR_MS` | 120 | Fastest interval |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, SessionState, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.id(), 6);
//! assert_eq!(PieceKind::from_id(6), Some(PieceKind::T));
//! assert_eq!(SessionState::GameOver.label(), "GAME OVER");
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Origin row of a freshly spawned piece (above the visible board)
pub const SPAWN_ROW: i8 = -2;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 800;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 70;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Cleared lines per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear rewards indexed by rows cleared in one lock, multiplied by the level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// DAS (Delayed Auto Shift) for held left/right.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) for held left/right.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Held soft drop starts repeating immediately.
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Held soft drop repeat rate.
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// The seven piece kinds, in catalog order
///
/// The catalog order fixes each kind's id (1-7), which doubles as the color key
/// for renderers:
/// - **I**: 4-long bar
/// - **J** / **L**: mirrored hooks
/// - **O**: 2x2 square
/// - **S** / **Z**: mirrored zigzags
/// - **T**: T-shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Nonzero type id (1-7).
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. `0` and anything above 7 map to `None`.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// 90° clockwise
    Cw,
    /// 90° counter-clockwise
    Ccw,
}

/// Commands accepted by the game loop
///
/// Keyboard input, the demo player and tests all drive the game through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Drop piece one row, locking it if it cannot descend
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle between playing and paused
    Pause,
    /// Start a session (resets first after a game over)
    Start,
    /// Throw away the current session and start a fresh one
    Restart,
}

/// Lifecycle of a game session
///
/// `Ready -> Playing <-> Paused -> GameOver`; restart goes back through `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Ready,
    Playing,
    Paused,
    GameOver,
}

impl SessionState {
    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Ready => "READY",
            SessionState::Playing => "PLAYING",
            SessionState::Paused => "PAUSED",
            SessionState::GameOver => "GAME OVER",
        }
    }
}

/// A cell on the game board or in a piece matrix
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied; the kind only matters for color
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_constants_reach_floor_by_level_11() {
        let level_11 = BASE_DROP_MS - 10 * DROP_STEP_MS;
        assert!(level_11 < DROP_INTERVAL_FLOOR_MS);
        assert!(BASE_DROP_MS - 9 * DROP_STEP_MS > DROP_INTERVAL_FLOOR_MS);
    }

    #[test]
    fn piece_ids_are_distinct_and_nonzero() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i + 1);
            assert_eq!(PieceKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn session_labels() {
        assert_eq!(SessionState::Ready.label(), "READY");
        assert_eq!(SessionState::GameOver.label(), "GAME OVER");
        assert_eq!(SessionState::default(), SessionState::Ready);
    }
}
