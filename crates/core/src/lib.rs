//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules: the piece catalog, the bag
//! randomizer, the board with its collision and row-sweep algorithms, and the
//! session state machine that ties them together. It has **zero dependencies**
//! on terminals, persistence, or clocks:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Synchronous**: every command and tick completes within the call
//! - **Allocation-free**: boards and piece matrices are fixed-size arrays
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven piece matrices, matrix rotation and the wall kick
//! - [`rng`]: 7-bag piece sequencing on a seeded LCG
//! - [`board`]: 10x20 grid with collision, merge and row sweep
//! - [`scoring`]: line rewards, level and gravity derivation
//! - [`game_state`]: the session state machine
//! - [`snapshot`]: copyable per-frame view for renderers and HUDs
//!
//! # Rules
//!
//! - **Spawn**: horizontally centered, origin two rows above the board; a
//!   spawn that collides ends the game
//! - **Rotation**: matrix transpose plus a simple alternating horizontal kick
//! - **Scoring**: 100 / 300 / 500 / 800 for 1-4 rows, times the level
//! - **Level**: `1 + lines / 10`; gravity `max(120, 800 - (level - 1) * 70)` ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, SessionState};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.state(), SessionState::Playing);
//! assert!(game.board().cells().iter().any(|c| c.is_some()));
//! ```
//!
//! # Timing
//!
//! The host calls [`GameState::tick`](game_state::GameState::tick) with the
//! elapsed milliseconds, conventionally once per frame. Gravity moves the piece
//! one row each time the accumulated time exceeds the current interval.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{ActivePiece, GameState};
pub use pieces::{template_for, try_rotate, Shape};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
