//! State Hashing for Verification
//!
//! Provides deterministic hashing of simulation state for:
//! - Replay validation
//! - Idempotence checks on settled grids

use sha2::{Sha256, Digest};
use super::coord::Coord;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for simulation state.
///
/// Wraps SHA-256 with helpers for grid types.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for grid state.
    pub fn for_grid_state() -> Self {
        Self::new(b"BOULDER_GRID_V1")
    }

    /// Create hasher for input recordings.
    pub fn for_input_recording() -> Self {
        Self::new(b"BOULDER_INPUTS_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a grid coordinate.
    #[inline]
    pub fn update_coord(&mut self, value: Coord) {
        self.update_i32(value.x);
        self.update_i32(value.y);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for a simulation.
///
/// The tick counter is always hashed first; the closure adds
/// grid-specific data.
pub fn compute_state_hash<F>(tick: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_grid_state();
    hasher.update_u32(tick);
    add_state(&mut hasher);
    hasher.finalize()
}
