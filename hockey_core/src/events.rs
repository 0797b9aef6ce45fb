use glam::Vec3;
use hecs::Entity;

use crate::RigidBody;

/// A body crossing the boundary of a trigger volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    Entered {
        body: Entity,
        trigger: Entity,
        /// Body velocity at the moment of entry
        velocity: Vec3,
        /// Inward facing normal of the trigger's surface
        normal: Vec3,
    },
    Left {
        body: Entity,
        trigger: Entity,
        /// Body still overlaps another registered trigger
        still_inside: bool,
    },
}

impl CollisionEvent {
    pub fn body(&self) -> Entity {
        match *self {
            CollisionEvent::Entered { body, .. } | CollisionEvent::Left { body, .. } => body,
        }
    }

    pub fn trigger(&self) -> Entity {
        match *self {
            CollisionEvent::Entered { trigger, .. } | CollisionEvent::Left { trigger, .. } => {
                trigger
            }
        }
    }

    pub fn is_entered(&self) -> bool {
        matches!(self, CollisionEvent::Entered { .. })
    }
}

/// Component reacting to trigger events of the entity it is attached to
pub trait TriggerListener {
    /// `body` is the listener owner's rigid body, when it has one
    fn on_trigger(&mut self, event: &CollisionEvent, body: Option<&mut RigidBody>);
}
