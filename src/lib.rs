//! Stackfall (workspace facade crate).
//!
//! Keeps a single `stackfall::{core, types}` public path while the
//! implementation lives in dedicated crates under `crates/`.

pub use stackfall_core as core;
pub use stackfall_types as types;
