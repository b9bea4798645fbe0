//! Host-facing session layer.
//!
//! Wraps the pure [`GameState`](blockfall_core::GameState) with best-score
//! persistence. The core never touches the filesystem; a [`Session`] reads the
//! stored best when it opens and writes every new best the game reports.
//!
//! Also hosts placement-level control ([`place`]) and the greedy demo player
//! ([`autoplay`]) built on it.

pub mod autoplay;
pub mod best_score;
pub mod place;
pub mod session;

pub use autoplay::{choose_placement, Surface, Weights};
pub use best_score::{default_path, load_best, FileSlot, MemorySlot, ScoreSlot, StoreError};
pub use place::{apply_place, PlaceError, Placement};
pub use session::{Session, SharedSession};
