//! Input Capture and Queueing
//!
//! Directional intents cross into the core through an append-only
//! FIFO queue. The tick driver drains it completely once per tick.

use std::collections::VecDeque;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::core::coord::Offset;
use crate::core::hash::{StateHash, StateHasher};
use crate::error::InputError;

// =============================================================================
// DIRECTION
// =============================================================================

/// One directional intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0
    Up = 0,
    /// Away from row 0
    Down = 1,
    /// Toward column 0
    Left = 2,
    /// Away from column 0
    Right = 3,
}

impl Direction {
    /// Grid offset for this direction.
    #[inline]
    pub fn offset(self) -> Offset {
        match self {
            Direction::Up => Offset::UP,
            Direction::Down => Offset::DOWN,
            Direction::Left => Offset::LEFT,
            Direction::Right => Offset::RIGHT,
        }
    }

    /// Map a keyboard key name to a direction.
    ///
    /// Arrow keys and `wasd` are recognised; anything else is ignored.
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" | "w" => Some(Direction::Up),
            "ArrowDown" | "s" => Some(Direction::Down),
            "ArrowLeft" | "a" => Some(Direction::Left),
            "ArrowRight" | "d" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Map a single script character to a direction.
    ///
    /// Lowercase `wasd` or uppercase `UDLR`.
    pub fn from_char(c: char) -> Option<Direction> {
        match c {
            'w' | 'U' => Some(Direction::Up),
            's' | 'D' => Some(Direction::Down),
            'a' | 'L' => Some(Direction::Left),
            'd' | 'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Direction::from_key(s).ok_or_else(|| InputError::UnknownDirection(s.to_string())),
        }
    }
}

// =============================================================================
// INPUT SCRIPTS
// =============================================================================

/// One step of a scripted input sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    /// Queue an intent
    Input(Direction),
    /// Advance one tick
    Tick,
}

/// Parse an input script.
///
/// Each character is an intent (see [`Direction::from_char`]) or `.` for
/// a tick. Whitespace is ignored.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, InputError> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '.' => Ok(ScriptStep::Tick),
            _ => Direction::from_char(c)
                .map(ScriptStep::Input)
                .ok_or_else(|| InputError::UnknownDirection(c.to_string())),
        })
        .collect()
}

// =============================================================================
// COMMAND QUEUE
// =============================================================================

/// Pending intents, oldest first.
#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Direction>,
}

impl CommandQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an intent.
    #[inline]
    pub fn push(&mut self, direction: Direction) {
        self.pending.push_back(direction);
    }

    /// Take every pending intent, oldest first.
    ///
    /// The queue is empty afterwards.
    pub fn drain(&mut self) -> impl Iterator<Item = Direction> + '_ {
        self.pending.drain(..)
    }

    /// Number of pending intents.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Intent queued for a given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedInput {
    /// Tick whose drain phase consumes this intent
    pub tick: u32,
    /// The intent
    pub direction: Direction,
}

/// Complete input recording for one run.
///
/// Used for replay and determinism checks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecording {
    /// Entries in arrival order (ticks non-decreasing)
    entries: Vec<RecordedInput>,
    /// Last tick covered by the recording
    end_tick: u32,
}

impl InputRecording {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an intent consumed at `tick`.
    ///
    /// Ticks must be recorded in non-decreasing order.
    pub fn record(&mut self, tick: u32, direction: Direction) {
        debug_assert!(
            self.entries.last().map_or(true, |e| e.tick <= tick),
            "inputs must be recorded in tick order"
        );
        self.entries.push(RecordedInput { tick, direction });
        self.end_tick = self.end_tick.max(tick);
    }

    /// Intents consumed at `tick`, in arrival order.
    pub fn inputs_at(&self, tick: u32) -> &[RecordedInput] {
        let start = self.entries.partition_point(|e| e.tick < tick);
        let end = self.entries.partition_point(|e| e.tick <= tick);
        &self.entries[start..end]
    }

    /// All entries.
    pub fn entries(&self) -> &[RecordedInput] {
        &self.entries
    }

    /// Last tick covered.
    #[inline]
    pub fn end_tick(&self) -> u32 {
        self.end_tick
    }

    /// Extend coverage to `end_tick` (call when the run stops).
    pub fn finalize(&mut self, end_tick: u32) {
        self.end_tick = self.end_tick.max(end_tick);
    }

    /// Hash of the recording.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_u32(self.end_tick);
        hasher.update_u32(self.entries.len() as u32);
        for entry in &self.entries {
            hasher.update_u32(entry.tick);
            hasher.update_u8(entry.direction as u8);
        }
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Up.offset(), Offset::new(0, -1));
        assert_eq!(Direction::Down.offset(), Offset::new(0, 1));
        assert_eq!(Direction::Left.offset(), Offset::new(-1, 0));
        assert_eq!(Direction::Right.offset(), Offset::new(1, 0));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("w"), Some(Direction::Up));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Enter"), None);
    }

    #[test]
    fn test_script_chars() {
        let script: Vec<_> = "wasdUDLR".chars().filter_map(Direction::from_char).collect();
        assert_eq!(
            script,
            vec![
                Direction::Up,
                Direction::Left,
                Direction::Down,
                Direction::Right,
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right,
            ]
        );
        assert_eq!(Direction::from_char('x'), None);
    }

    #[test]
    fn test_parse_script() {
        let steps = parse_script("d. s\n.").unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep::Input(Direction::Right),
                ScriptStep::Tick,
                ScriptStep::Input(Direction::Down),
                ScriptStep::Tick,
            ]
        );
        assert_eq!(
            parse_script("dx"),
            Err(InputError::UnknownDirection("x".to_string()))
        );
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        assert_eq!("Left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("ArrowDown".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(InputError::UnknownDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = CommandQueue::new();
        queue.push(Direction::Left);
        queue.push(Direction::Up);
        queue.push(Direction::Right);
        assert_eq!(queue.len(), 3);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![Direction::Left, Direction::Up, Direction::Right]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_recording_inputs_at() {
        let mut recording = InputRecording::new();
        recording.record(1, Direction::Right);
        recording.record(1, Direction::Down);
        recording.record(4, Direction::Left);
        recording.finalize(10);

        let at1: Vec<_> = recording.inputs_at(1).iter().map(|e| e.direction).collect();
        assert_eq!(at1, vec![Direction::Right, Direction::Down]);
        assert!(recording.inputs_at(2).is_empty());
        assert_eq!(recording.inputs_at(4).len(), 1);
        assert_eq!(recording.end_tick(), 10);
    }

    #[test]
    fn test_recording_hash_depends_on_order() {
        let mut a = InputRecording::new();
        a.record(1, Direction::Left);
        a.record(1, Direction::Right);

        let mut b = InputRecording::new();
        b.record(1, Direction::Right);
        b.record(1, Direction::Left);

        assert_ne!(a.compute_hash(), b.compute_hash());
    }
}
