use hecs::{Component, World};
use tracing::debug;

use crate::{CollisionEvent, RigidBody, TriggerListener};

/// Deliver trigger events to the `L` listener on each event's body entity.
///
/// Entities without the listener are skipped.
pub fn dispatch_trigger_events<L>(world: &mut World, events: &[CollisionEvent])
where
    L: TriggerListener + Component,
{
    for event in events {
        let body = event.body();
        let Ok((listener, rigid_body)) =
            world.query_one_mut::<(&mut L, Option<&mut RigidBody>)>(body)
        else {
            continue;
        };

        debug!(
            ?body,
            trigger = ?event.trigger(),
            entered = event.is_entered(),
            "trigger event"
        );
        listener.on_trigger(event, rigid_body);
    }
}
