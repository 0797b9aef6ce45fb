//! Keyboard and mouse handling

use glam::Vec2;

use crate::Side;

/// One input for the next simulation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerInput {
    /// Keyboard paddle direction, held until changed
    Move { side: Side, dir: Vec2 },
    /// Mouse drag, normalized to half the window size
    Drag { side: Side, delta: Vec2 },
    /// Push the puck (debug arrows)
    Nudge { dir: Vec2 },
}

/// Held movement keys for the keyboard paddle (WASD)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key down event, returns false for keys it does not own
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Handle key up event
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    fn set(&mut self, key: &str, held: bool) -> bool {
        match key {
            "w" | "W" => self.up = held,
            "s" | "S" => self.down = held,
            "a" | "A" => self.left = held,
            "d" | "D" => self.right = held,
            _ => return false,
        }
        true
    }

    /// Movement direction, +Y up the table
    pub fn dir(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up))
    }
}

/// Puck nudge direction for an arrow key
pub fn nudge_for_key(key: &str) -> Option<Vec2> {
    match key {
        "ArrowUp" => Some(Vec2::Y),
        "ArrowDown" => Some(Vec2::NEG_Y),
        "ArrowRight" => Some(Vec2::X),
        "ArrowLeft" => Some(Vec2::NEG_X),
        _ => None,
    }
}

/// Turns absolute cursor positions into normalized drag deltas.
///
/// The first pressed frame only anchors the cursor. Screen Y grows downward,
/// table Y grows upward.
#[derive(Debug, Clone, Copy)]
pub struct CursorTracker {
    half_window: Vec2,
    last: Option<Vec2>,
    dragging: bool,
}

impl CursorTracker {
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            half_window: Vec2::new(window_width.max(1) as f32, window_height.max(1) as f32) / 2.0,
            last: None,
            dragging: false,
        }
    }

    pub fn update(&mut self, cursor: Vec2, pressed: bool) -> Option<Vec2> {
        let delta = match self.last {
            Some(last) if pressed && self.dragging => {
                let d = (cursor - last) / self.half_window;
                Some(Vec2::new(d.x, -d.y))
            }
            _ => None,
        };
        self.dragging = pressed;
        self.last = Some(cursor);
        delta
    }
}
