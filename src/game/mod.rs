//! Game Logic Module
//!
//! All simulation code. Single-threaded and deterministic.
//!
//! ## Module Structure
//!
//! - `key`: Key classes, shared key configurations, lock matching
//! - `tile`: Tile variants and falling state
//! - `level`: Raw tile codes and level validation
//! - `grid`: Grid mechanics (moves, pushes, drops, lock removal)
//! - `player`: Player position and intent handling
//! - `input`: Directions, command queue, input recording
//! - `events`: Events generated during a tick
//! - `render`: Read-only views for renderers
//! - `tick`: Simulation context and tick driver

pub mod key;
pub mod tile;
pub mod level;
pub mod grid;
pub mod player;
pub mod input;
pub mod events;
pub mod render;
pub mod tick;

// Re-export key types
pub use key::{KeyClass, KeyConfiguration, RemoveStrategy};
pub use tile::{FallingState, Tile};
pub use level::{Level, RawTile};
pub use grid::Grid;
pub use player::Player;
pub use input::{CommandQueue, Direction, InputRecording};
pub use events::{GameEvent, GameEventData};
pub use tick::{Simulation, TickResult};
