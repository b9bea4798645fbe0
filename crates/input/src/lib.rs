//! Terminal input.
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`GameAction`](crate::types::GameAction)s and provides a DAS/ARR repeat
//! handler that also works on terminals without key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{InputHandler, RepeatedActions};
pub use map::{handle_key_event, should_quit};
