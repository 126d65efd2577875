//! Core deterministic primitives.
//!
//! Grid coordinates and state hashing. Nothing here depends on the
//! game rules.

pub mod coord;
pub mod hash;

// Re-export core types
pub use coord::{Coord, Offset};
pub use hash::{compute_state_hash, StateHash, StateHasher};
