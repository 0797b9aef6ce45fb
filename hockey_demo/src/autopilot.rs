//! Scripted players for unattended runs
//!
//! Each autopilot chases the puck inside its own half with a little seeded
//! jitter. Red plays with the mouse (drag deltas), blue with WASD.

use glam::Vec2;
use hockey_core::{nudge_for_key, Config, CursorTracker, KeyState, PlayerInput, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Virtual window the red player's cursor moves in
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

/// Puck speed below which the table gets a nudge
const STALL_SPEED: f32 = 0.2;
/// Paddle distance at which the keyboard player stops pressing
const KEY_DEADZONE: f32 = 0.25;

/// Seeded random source for the scripted players
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// What the autopilot sees of the table each frame
#[derive(Debug, Clone, Copy)]
pub struct TableView {
    pub puck: Vec2,
    pub puck_vel: Vec2,
    pub paddle: Vec2,
}

enum Controller {
    Mouse { tracker: CursorTracker, cursor: Vec2 },
    Keyboard { keys: KeyState },
}

pub struct Autopilot {
    side: Side,
    controller: Controller,
    jitter: f32,
}

impl Autopilot {
    /// Red drags with the mouse, blue uses the keyboard
    pub fn new(side: Side, jitter: f32) -> Self {
        let controller = match side {
            Side::Left => Controller::Mouse {
                tracker: CursorTracker::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                cursor: Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32) / 2.0,
            },
            Side::Right => Controller::Keyboard {
                keys: KeyState::new(),
            },
        };
        Self {
            side,
            controller,
            jitter,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Where the paddle wants to be: on the puck, kept inside its own half
    pub fn target(&self, view: &TableView, config: &Config, rng: &mut GameRng) -> Vec2 {
        let jitter = if self.jitter > 0.0 {
            Vec2::new(
                rng.0.gen_range(-self.jitter..=self.jitter),
                rng.0.gen_range(-self.jitter..=self.jitter),
            )
        } else {
            Vec2::ZERO
        };

        let mut target = view.puck + jitter;
        target.x = match self.side {
            Side::Left => target.x.min(-config.paddle_radius),
            Side::Right => target.x.max(config.paddle_radius),
        };
        config.clamp_paddle(target)
    }

    /// Inputs for this frame
    pub fn drive(
        &mut self,
        view: &TableView,
        config: &Config,
        dt: f32,
        rng: &mut GameRng,
    ) -> Vec<PlayerInput> {
        let target = self.target(view, config, rng);
        let side = self.side;
        let mut inputs = Vec::new();

        match &mut self.controller {
            Controller::Mouse { tracker, cursor } => {
                // Limit to what a hand could plausibly drag in one frame
                let step = (target - view.paddle).clamp_length_max(config.paddle_key_speed * 2.0 * dt);
                let half_window = Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32) / 2.0;
                let pixels = step / config.paddle_drag_gain * half_window;
                *cursor += Vec2::new(pixels.x, -pixels.y);

                if let Some(delta) = tracker.update(*cursor, true) {
                    inputs.push(PlayerInput::Drag { side, delta });
                }
            }
            Controller::Keyboard { keys } => {
                let before = *keys;
                let offset = target - view.paddle;
                press(keys, "d", "a", offset.x);
                press(keys, "w", "s", offset.y);
                if *keys != before {
                    inputs.push(PlayerInput::Move {
                        side,
                        dir: keys.dir(),
                    });
                }
            }
        }

        // Blue owns the arrow keys and pokes a stalled puck toward red
        if side == Side::Right && view.puck_vel.length() < STALL_SPEED {
            let key = if rng.0.gen_bool(0.5) {
                "ArrowLeft"
            } else {
                "ArrowUp"
            };
            if let Some(dir) = nudge_for_key(key) {
                inputs.push(PlayerInput::Nudge { dir });
            }
        }

        inputs
    }
}

fn press(keys: &mut KeyState, positive: &str, negative: &str, offset: f32) {
    keys.key_up(positive);
    keys.key_up(negative);
    if offset > KEY_DEADZONE {
        keys.key_down(positive);
    } else if offset < -KEY_DEADZONE {
        keys.key_down(negative);
    }
}
