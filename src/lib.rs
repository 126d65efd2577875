//! # Boulder Core
//!
//! Deterministic discrete-tick simulation for a falling-block tile puzzle.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       BOULDER CORE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── coord.rs    - Integer grid coordinates and offsets      │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── key.rs      - Key classes and lock matching             │
//! │  ├── tile.rs     - Tile variants and falling state           │
//! │  ├── level.rs    - Raw tile codes and level validation       │
//! │  ├── grid.rs     - Moves, pushes, drops, lock removal        │
//! │  ├── player.rs   - Player position and intent handling       │
//! │  ├── input.rs    - Command queue and input recording         │
//! │  ├── events.rs   - Per-tick events                           │
//! │  ├── render.rs   - Read-only views for renderers             │
//! │  └── tick.rs     - Simulation context and tick driver        │
//! │                                                              │
//! │  config.rs       - Shell configuration                       │
//! │  error.rs        - Error types                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tick Order
//!
//! Each call to [`Simulation::advance`] drains queued intents oldest
//! first, each one handled by the tile in the destination cell, then runs
//! a single gravity pass from the bottom row to the top, left to right.
//!
//! Given identical level data and inputs, the simulation produces
//! identical results; [`Simulation::compute_hash`] makes that checkable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod game;

// Re-export commonly used types
pub use crate::core::coord::{Coord, Offset};
pub use error::{InputError, LevelError};
pub use game::input::Direction;
pub use game::level::Level;
pub use game::tick::{Simulation, TickResult};
pub use game::tile::{FallingState, Tile};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rate the external frame driver calls `advance()` at (Hz)
pub const TICK_RATE: u32 = 30;
