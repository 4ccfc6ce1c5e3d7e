//! Chroma Flood (workspace facade crate).
//!
//! Re-exports the rules (`core`), content (`engine`) and shared types (`types`)
//! crates under one name, plus the terminal front end used by the binary.

pub use chroma_flood_core as core;
pub use chroma_flood_engine as engine;
pub use chroma_flood_types as types;

pub mod cli;
pub mod store;
pub mod term;
