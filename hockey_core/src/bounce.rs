//! Trigger-driven wall bounce
//!
//! When a body enters a wall's trigger volume its planar velocity is reflected
//! about the wall normal and it is relaunched at a fraction of its incoming
//! speed.

use glam::{Quat, Vec3};
use hecs::Entity;
use tracing::{debug, trace};

use crate::{CollisionEvent, Params, RigidBody, TriggerListener};

/// Lengths below this are treated as zero
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Inward facing normal of a wall with the given orientation, flattened to the table plane.
///
/// The wall's forward axis is +Y. It is rotated by the inverse orientation and
/// mirrored in X, which for a rotation of `θ` about Z gives `(-sin θ, cos θ, 0)`.
pub fn wall_normal(rotation: Quat) -> Vec3 {
    let mut normal = rotation.inverse() * Vec3::Y;
    normal.x = -normal.x;
    normal.z = 0.0;
    normal
}

/// Reflect `incoming` about `normal` (`normal` must be unit length)
pub fn reflect(incoming: Vec3, normal: Vec3) -> Vec3 {
    incoming - 2.0 * incoming.dot(normal) * normal
}

/// Exit velocity for a body hitting a wall.
///
/// Returns `None` when either the planar velocity or the flattened normal is
/// too short to normalize.
pub fn bounce_velocity(velocity: Vec3, normal: Vec3, factor: f32) -> Option<Vec3> {
    let planar = Vec3::new(velocity.x, velocity.y, 0.0);
    let normal = Vec3::new(normal.x, normal.y, 0.0);

    let speed = planar.length();
    if speed < DEGENERATE_EPSILON || normal.length() < DEGENERATE_EPSILON {
        return None;
    }

    let mut reflected = reflect(planar / speed, normal.normalize()) * (speed * factor);
    reflected.z = 0.0;
    Some(reflected)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceState {
    /// Outside every trigger
    Idle,
    /// Inside a trigger volume
    Colliding,
}

/// Reflects its owner off walls whose trigger volumes it enters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceBehaviour {
    pub owner: Option<Entity>,
    /// Rigid body receiving the impulse, bound on awake
    pub body: Option<Entity>,
    pub in_collision: bool,
    pub reflection_velocity: Vec3,
    /// Fixed-speed exit velocity for a repel after cooldown; cached, never applied
    pub repel_velocity: Vec3,
    pub bounce_factor: f32,
    pub repel_speed: f32,
}

impl Default for BounceBehaviour {
    fn default() -> Self {
        Self::new(Params::BOUNCE_FACTOR, Params::REPEL_SPEED)
    }
}

impl BounceBehaviour {
    pub fn new(bounce_factor: f32, repel_speed: f32) -> Self {
        Self {
            owner: None,
            body: None,
            in_collision: false,
            reflection_velocity: Vec3::ZERO,
            repel_velocity: Vec3::ZERO,
            bounce_factor,
            repel_speed,
        }
    }

    /// Bind to the owner. Only a dynamic rigid body on the owner is driven.
    pub fn awake(&mut self, owner: Entity, body: Option<&RigidBody>) {
        self.owner = Some(owner);
        self.body = body.filter(|b| b.is_dynamic()).map(|_| owner);
    }

    pub fn state(&self) -> BounceState {
        if self.in_collision {
            BounceState::Colliding
        } else {
            BounceState::Idle
        }
    }

    fn bounce(&mut self, velocity: Vec3, normal: Vec3, body: &mut RigidBody) {
        let Some(exit) = bounce_velocity(velocity, normal, self.bounce_factor) else {
            debug!(?velocity, ?normal, "degenerate bounce skipped");
            return;
        };

        body.reset_velocity();
        body.apply_velocity_change(exit);
        self.reflection_velocity = exit;
        self.repel_velocity = exit.normalize_or_zero() * self.repel_speed;
    }
}

impl TriggerListener for BounceBehaviour {
    fn on_trigger(&mut self, event: &CollisionEvent, body: Option<&mut RigidBody>) {
        match *event {
            CollisionEvent::Entered {
                trigger,
                velocity,
                normal,
                ..
            } => {
                trace!(owner = ?self.owner, ?trigger, "entered trigger");
                self.in_collision = true;
                if self.body.is_none() {
                    return;
                }
                if let Some(body) = body {
                    self.bounce(velocity, normal, body);
                }
            }
            CollisionEvent::Left {
                trigger,
                still_inside,
                ..
            } => {
                trace!(owner = ?self.owner, ?trigger, still_inside, "left trigger");
                if !still_inside {
                    self.in_collision = false;
                }
            }
        }
    }
}
