//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace members under one roof so the binary, the
//! integration tests and the benches can use `blockfall::{core, engine, ...}`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
