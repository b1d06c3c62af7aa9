//! Board layout.
//!
//! The layout is authored data. The engine reads it once per session for
//! the playable count and the valid id range; the renderer reads it for
//! geometry. Neither mutates it.

pub mod layout;

pub use layout::{BoardLayout, Cell, HEART, HEART_TILES};
