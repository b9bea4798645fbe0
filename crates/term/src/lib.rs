//! Terminal "game renderer".
//!
//! A small, game-oriented rendering layer: no widget toolkit, just a
//! framebuffer of styled cells that [`GameView`] paints from a
//! [`GameSnapshot`](blockfall_core::GameSnapshot) and [`TerminalRenderer`]
//! flushes to the terminal. Board cells are two columns wide by default to
//! keep the well roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
