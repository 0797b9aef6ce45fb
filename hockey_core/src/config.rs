use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{Params, Side};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub goal_line: f32,
    pub table_half_height: f32,
    pub recovery_y: f32,
    pub serve_x: f32,
    pub edge_thickness: f32,
    pub edge_depth: f32,
    pub puck_radius: f32,
    pub puck_mass: f32,
    pub puck_damping: f32,
    pub puck_speed_max: f32,
    pub paddle_radius: f32,
    pub paddle_key_speed: f32,
    pub paddle_drag_gain: f32,
    pub paddle_restitution: f32,
    pub paddle_bound_x: f32,
    pub paddle_bound_y: f32,
    pub nudge_force: f32,
    pub bounce_factor: f32,
    pub repel_speed: f32,
    pub win_score: u8,
    pub reset_delay: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goal_line: Params::GOAL_LINE,
            table_half_height: Params::TABLE_HALF_HEIGHT,
            recovery_y: Params::RECOVERY_Y,
            serve_x: Params::SERVE_X,
            edge_thickness: Params::EDGE_THICKNESS,
            edge_depth: Params::EDGE_DEPTH,
            puck_radius: Params::PUCK_RADIUS,
            puck_mass: Params::PUCK_MASS,
            puck_damping: Params::PUCK_DAMPING,
            puck_speed_max: Params::PUCK_SPEED_MAX,
            paddle_radius: Params::PADDLE_RADIUS,
            paddle_key_speed: Params::PADDLE_KEY_SPEED,
            paddle_drag_gain: Params::PADDLE_DRAG_GAIN,
            paddle_restitution: Params::PADDLE_RESTITUTION,
            paddle_bound_x: Params::PADDLE_BOUND_X,
            paddle_bound_y: Params::PADDLE_BOUND_Y,
            nudge_force: Params::NUDGE_FORCE,
            bounce_factor: Params::BOUNCE_FACTOR,
            repel_speed: Params::REPEL_SPEED,
            win_score: Params::WIN_SCORE,
            reset_delay: Params::RESET_DELAY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp a paddle position to the playable rectangle
    pub fn clamp_paddle(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(-self.paddle_bound_x, self.paddle_bound_x),
            pos.y.clamp(-self.paddle_bound_y, self.paddle_bound_y),
        )
    }

    /// Where the puck is placed after `scorer` scores
    pub fn serve_position(&self, scorer: Side) -> Vec3 {
        match scorer {
            Side::Left => Vec3::new(-self.serve_x, 0.0, 0.0),
            Side::Right => Vec3::new(self.serve_x, 0.0, 0.0),
        }
    }

    /// Which side scores when the puck is at `x`, if any
    pub fn scorer_at(&self, x: f32) -> Option<Side> {
        if x <= -self.goal_line {
            Some(Side::Right)
        } else if x >= self.goal_line {
            Some(Side::Left)
        } else {
            None
        }
    }
}
