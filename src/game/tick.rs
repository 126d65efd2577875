//! Simulation Tick
//!
//! The explicitly constructed simulation context and its single entry
//! point, [`Simulation::advance`]. One tick drains every queued intent
//! oldest-first, then runs one gravity pass over the grid.

use tracing::debug;

use crate::core::hash::StateHash;
use crate::error::LevelError;
use crate::game::events::GameEvent;
use crate::game::grid::Grid;
use crate::game::input::{CommandQueue, Direction, InputRecording};
use crate::game::level::Level;
use crate::game::player::{handle_intent, Player};
use crate::game::render::{self, Frame};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Tick number just completed
    pub tick: u32,
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Intents drained this tick
    pub intents_applied: usize,
}

/// Simulation context: grid, player, pending input and tick counter.
#[derive(Clone, Debug)]
pub struct Simulation {
    grid: Grid,
    queue: CommandQueue,
    recording: InputRecording,
    tick: u32,
}

impl Simulation {
    /// Create a simulation from validated level data.
    pub fn new(level: &Level) -> Self {
        Self {
            grid: Grid::new(level),
            queue: CommandQueue::new(),
            recording: InputRecording::new(),
            tick: 0,
        }
    }

    /// Create a simulation from rows of raw tile codes.
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, LevelError> {
        Ok(Self::new(&Level::from_codes(rows)?))
    }

    /// Queue an intent for the next tick.
    pub fn push_input(&mut self, direction: Direction) {
        self.recording.record(self.tick.wrapping_add(1), direction);
        self.queue.push(direction);
    }

    /// Run one tick: drain intents, then apply gravity.
    ///
    /// The tick counter wraps to 0 after `u32::MAX`.
    pub fn advance(&mut self) -> TickResult {
        self.tick = self.tick.wrapping_add(1);

        // 1. Apply queued intents in arrival order
        let intents: Vec<Direction> = self.queue.drain().collect();
        for direction in &intents {
            handle_intent(&mut self.grid, *direction);
        }

        // 2. Gravity pass
        self.grid.update();

        let tick = self.tick;
        let events: Vec<GameEvent> = self
            .grid
            .take_events()
            .into_iter()
            .map(|data| GameEvent::new(tick, data))
            .collect();

        debug!(
            "tick {}: {} intents, {} events, player at {}",
            tick,
            intents.len(),
            events.len(),
            self.grid.player().position()
        );

        #[cfg(feature = "debug-tracing")]
        tracing::trace!("tick {}\n{}", tick, render::to_text(&self.grid));

        TickResult {
            tick,
            events,
            intents_applied: intents.len(),
        }
    }

    /// The grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The player.
    #[inline]
    pub fn player(&self) -> &Player {
        self.grid.player()
    }

    /// Ticks completed so far.
    #[inline]
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Intents waiting for the next tick.
    #[inline]
    pub fn pending_inputs(&self) -> usize {
        self.queue.len()
    }

    /// Every intent queued so far, stamped with the tick that consumes it.
    pub fn recording(&self) -> &InputRecording {
        &self.recording
    }

    /// Read-only snapshot for renderers.
    pub fn frame(&self) -> Frame {
        render::frame(&self.grid, self.tick)
    }

    /// Compute deterministic state hash.
    pub fn compute_hash(&self) -> StateHash {
        self.grid.compute_hash(self.tick)
    }
}

/// Replay recorded inputs against a fresh simulation.
///
/// Runs `tick_count` ticks, feeding each tick the intents recorded for
/// it. Returns the final simulation and all events.
pub fn replay(
    level: &Level,
    recording: &InputRecording,
    tick_count: u32,
) -> (Simulation, Vec<GameEvent>) {
    let mut sim = Simulation::new(level);
    let mut all_events = Vec::new();

    for t in 1..=tick_count {
        for input in recording.inputs_at(t) {
            sim.push_input(input.direction);
        }
        let result = sim.advance();
        all_events.extend(result.events);
    }

    (sim, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coord::Coord;
    use crate::game::events::GameEventData;
    use crate::game::key::KeyClass;
    use crate::game::tile::{FallingState, Tile};

    fn sim(rows: &[&str]) -> Simulation {
        Simulation::new(&Level::from_text(&rows.join("\n")).unwrap())
    }

    #[test]
    fn test_intents_drain_fifo_before_gravity() {
        let mut s = sim(&["######", "#P   #", "######"]);
        s.push_input(Direction::Right);
        s.push_input(Direction::Right);
        s.push_input(Direction::Left);
        assert_eq!(s.pending_inputs(), 3);

        let result = s.advance();

        assert_eq!(result.tick, 1);
        assert_eq!(result.intents_applied, 3);
        assert_eq!(s.pending_inputs(), 0);
        assert_eq!(s.player().position(), Coord::new(2, 1));
    }

    #[test]
    fn test_order_of_intents_matters() {
        // Right then Down reaches the flux pocket; Down then Right does not.
        let rows = ["#####", "#P  #", "##: #", "#####"];

        let mut a = sim(&rows);
        a.push_input(Direction::Right);
        a.push_input(Direction::Down);
        a.advance();

        let mut b = sim(&rows);
        b.push_input(Direction::Down);
        b.push_input(Direction::Right);
        b.advance();

        assert_eq!(a.player().position(), Coord::new(2, 2));
        assert_eq!(b.player().position(), Coord::new(2, 1));
    }

    #[test]
    fn test_stone_reaches_rest_after_three_ticks() {
        let mut s = sim(&["###", "#o#", "# #", "# #", "# #", "#:#", "#P#", "###"]);

        for _ in 0..3 {
            s.advance();
        }
        assert_eq!(s.grid().tile(Coord::new(1, 4)).falling_state(), Some(FallingState::Falling));

        let hash = s.compute_hash();
        let result = s.advance();
        assert_eq!(s.grid().tile(Coord::new(1, 4)), Tile::Stone(FallingState::Resting));
        assert!(result.events.is_empty());
        assert_ne!(hash, s.compute_hash());

        // Settled: further ticks change nothing but the counter.
        let settled = s.grid().clone();
        s.advance();
        assert_eq!(s.grid(), &settled);
    }

    #[test]
    fn test_pushed_box_over_gap_falls_next_pass() {
        // Push lands the box above a hole; same tick's gravity pass drops it.
        let mut s = sim(&["######", "#Pb  #", "### ##", "#   ##", "######"]);
        s.push_input(Direction::Right);

        let result = s.advance();

        assert_eq!(s.player().position(), Coord::new(2, 1));
        assert_eq!(s.grid().tile(Coord::new(3, 2)), Tile::Box(FallingState::Falling));
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::BlockDropped { .. })));
    }

    #[test]
    fn test_taking_key_opens_path() {
        let mut s = sim(&["######", "#Pk l#", "######"]);
        for _ in 0..3 {
            s.push_input(Direction::Right);
        }
        s.advance();

        assert_eq!(s.player().position(), Coord::new(4, 1));
        let removed = s.grid().count(|t| t.is_lock_of_class(KeyClass::Yellow));
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_default_level_first_moves() {
        let mut s = Simulation::new(&Level::default_level());

        // Stone under the player start is resting on the key row.
        s.advance();
        assert!(s.grid().player_invariant_holds());

        s.push_input(Direction::Right);
        s.advance();
        assert_eq!(s.player().position(), Coord::new(2, 1));
    }

    #[test]
    fn test_replay_reproduces_hash() {
        let level = Level::default_level();
        let mut s = Simulation::new(&level);
        let script = [
            Some(Direction::Right),
            None,
            Some(Direction::Right),
            Some(Direction::Down),
            None,
            Some(Direction::Left),
        ];
        for step in script {
            if let Some(direction) = step {
                s.push_input(direction);
            }
            s.advance();
        }

        let (replayed, events) = replay(&level, s.recording(), s.tick());

        assert_eq!(replayed.compute_hash(), s.compute_hash());
        assert_eq!(replayed.recording(), s.recording());
        assert!(events.iter().all(|e| e.tick >= 1 && e.tick <= s.tick()));
    }

    #[test]
    fn test_tick_counter_wraps() {
        let mut s = sim(&["#####", "#P  #", "#####"]);
        s.tick = u32::MAX;
        s.push_input(Direction::Right);

        let result = s.advance();

        assert_eq!(result.tick, 0);
        assert_eq!(s.tick(), 0);
        assert_eq!(result.intents_applied, 1);
        assert_eq!(s.player().position(), Coord::new(2, 1));
        assert_eq!(s.recording().inputs_at(0).len(), 1);
    }

    #[test]
    fn test_malformed_codes_fail_construction() {
        let result = Simulation::from_codes(&[[2u8, 3, 42]]);
        assert!(matches!(result, Err(LevelError::UnknownTileCode { code: 42, .. })));
    }
}
