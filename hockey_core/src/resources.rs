use std::collections::HashSet;

use hecs::Entity;

use crate::{CollisionEvent, PlayerInput, Side};

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Total elapsed time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 0.016,
            now: 0.0,
        }
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u8,  // Red player score
    pub right: u8, // Blue player score
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Score indicator lights around the table.
///
/// Slots 1..=4 count red goals, slots 5..=8 count blue goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreLights {
    lit: [bool; 8],
}

impl ScoreLights {
    pub const SLOTS: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Light the slot for `side`'s `count`-th goal
    pub fn light(&mut self, side: Side, count: u8) {
        if !(1..=4).contains(&count) {
            return;
        }
        let slot = match side {
            Side::Left => count as usize,
            Side::Right => count as usize + 4,
        };
        self.lit[slot - 1] = true;
    }

    /// Whether slot `slot` (1-based) is lit
    pub fn is_lit(&self, slot: usize) -> bool {
        (1..=Self::SLOTS).contains(&slot) && self.lit[slot - 1]
    }

    pub fn lit_count(&self) -> usize {
        self.lit.iter().filter(|l| **l).count()
    }

    pub fn clear(&mut self) {
        self.lit = [false; 8];
    }
}

/// Match bookkeeping carried between frames
#[derive(Debug, Clone, Copy, Default)]
pub struct GameState {
    pub score: Score,
    pub lights: ScoreLights,
    pub reset_pending: bool, // Set on a win, consumed by the reset check
    pub reset_timer: f32,    // Pause remaining after a reset (0 = running)
    pub winner: Option<Side>, // Winner of the last finished match
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_goal(&mut self, scorer: Side) {
        self.score.increment(scorer);
        self.lights.light(scorer, self.score.get(scorer));
    }

    pub fn is_paused(&self) -> bool {
        self.reset_timer > 0.0
    }

    pub fn start_pause(&mut self, delay: f32) {
        self.reset_timer = delay;
    }

    pub fn tick_pause(&mut self, dt: f32) {
        if self.reset_timer > 0.0 {
            self.reset_timer = (self.reset_timer - dt).max(0.0);
        }
    }
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub collisions: Vec<CollisionEvent>,
    pub goals: Vec<Side>,       // Scoring side per goal
    pub paddle_hits: Vec<Side>, // Paddle that struck the puck
    pub winner: Option<Side>,
    pub match_reset: bool,
    pub puck_recovered: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.collisions.clear();
        self.goals.clear();
        self.paddle_hits.clear();
        self.winner = None;
        self.match_reset = false;
        self.puck_recovered = false;
    }

    pub fn bounces(&self) -> usize {
        self.collisions.iter().filter(|e| e.is_entered()).count()
    }
}

/// Player inputs waiting for the next step
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pub inputs: Vec<PlayerInput>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    pub fn push(&mut self, input: PlayerInput) {
        self.inputs.push(input);
    }

    pub fn drain(&mut self) -> Vec<PlayerInput> {
        std::mem::take(&mut self.inputs)
    }
}

/// (body, trigger) pairs currently overlapping
#[derive(Debug, Clone, Default)]
pub struct TriggerContacts {
    pairs: HashSet<(Entity, Entity)>,
}

impl TriggerContacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, body: Entity, trigger: Entity) -> bool {
        self.pairs.contains(&(body, trigger))
    }

    pub fn insert(&mut self, body: Entity, trigger: Entity) -> bool {
        self.pairs.insert((body, trigger))
    }

    pub fn remove(&mut self, body: Entity, trigger: Entity) -> bool {
        self.pairs.remove(&(body, trigger))
    }

    /// Number of triggers `body` is inside
    pub fn count_for(&self, body: Entity) -> usize {
        self.pairs.iter().filter(|(b, _)| *b == body).count()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Drop pairs whose entities no longer exist
    pub fn retain_live(&mut self, world: &hecs::World) {
        self.pairs
            .retain(|(body, trigger)| world.contains(*body) && world.contains(*trigger));
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}
