use glam::Vec3;
use hecs::{Entity, World};

use crate::bounce::wall_normal;
use crate::geometry::{circle_overlap, OrientedBox};
use crate::{
    BodyKind, CollisionEvent, Config, Events, Paddle, RigidBody, Side, SphereCollider, Time,
    Transform, TriggerContacts, TriggerVolume,
};

/// Integrate forces and velocities of dynamic bodies on the table plane
pub fn integrate_bodies(world: &mut World, time: &Time, config: &Config) {
    for (_entity, (transform, body)) in world.query_mut::<(&mut Transform, &mut RigidBody)>() {
        if body.kind != BodyKind::Dynamic {
            continue;
        }

        body.velocity += body.force * body.inverse_mass() * time.dt;
        body.velocity /= 1.0 + body.linear_damping * time.dt;
        body.velocity.z = 0.0;
        body.velocity = body.velocity.clamp_length_max(config.puck_speed_max);
        body.force = Vec3::ZERO;

        transform.position += body.velocity * time.dt;
    }
}

/// Strike dynamic bodies with kinematic and static round bodies (paddles)
pub fn resolve_paddle_contacts(world: &mut World, config: &Config, events: &mut Events) {
    // First, collect striker data without holding borrows
    let strikers: Vec<(Option<Side>, Vec3, Vec3, f32)> = world
        .query::<(&Transform, &RigidBody, &SphereCollider, Option<&Paddle>)>()
        .iter()
        .filter(|(_e, (_t, body, _c, _p))| !body.is_dynamic())
        .map(|(_e, (t, body, collider, paddle))| {
            (paddle.map(|p| p.side), t.position, body.velocity, collider.radius)
        })
        .collect();

    for (_entity, (transform, body, collider)) in
        world.query_mut::<(&mut Transform, &mut RigidBody, &SphereCollider)>()
    {
        if !body.is_dynamic() {
            continue;
        }

        for &(side, striker_pos, striker_vel, striker_radius) in &strikers {
            let Some((normal, depth)) = circle_overlap(
                transform.position,
                collider.radius,
                striker_pos,
                striker_radius,
            ) else {
                continue;
            };

            // Only bounce when approaching
            let relative = body.velocity - striker_vel;
            let approach = relative.dot(normal);
            if approach < 0.0 {
                body.velocity -= (1.0 + config.paddle_restitution) * approach * normal;
                body.velocity.z = 0.0;
                body.velocity = body.velocity.clamp_length_max(config.puck_speed_max);
                if let Some(side) = side {
                    events.paddle_hits.push(side);
                }
            }

            // Push out of the striker
            transform.position += normal * depth;
        }
    }
}

/// Detect bodies crossing trigger boundaries.
///
/// When a body newly overlaps several triggers in one step only the nearest
/// one registers; the rest are checked again next step.
pub fn detect_triggers(world: &World, contacts: &mut TriggerContacts) -> Vec<CollisionEvent> {
    contacts.retain_live(world);

    // Deterministic: sort by entity ID
    let mut triggers: Vec<(Entity, OrientedBox)> = world
        .query::<(&Transform, &TriggerVolume)>()
        .iter()
        .map(|(e, (t, volume))| {
            (e, OrientedBox::new(t.position, t.rotation, volume.half_extents))
        })
        .collect();
    triggers.sort_by_key(|(e, _)| e.id());

    let mut bodies: Vec<(Entity, Vec3, Vec3, f32)> = world
        .query::<(&Transform, &RigidBody, &SphereCollider)>()
        .iter()
        .filter(|(_e, (_t, body, _c))| body.is_dynamic())
        .map(|(e, (t, body, collider))| (e, t.position, body.velocity, collider.radius))
        .collect();
    bodies.sort_by_key(|(e, ..)| e.id());

    let mut out = Vec::new();
    for (body, position, velocity, radius) in bodies {
        let mut nearest: Option<(f32, Entity, &OrientedBox)> = None;

        for (trigger, volume) in &triggers {
            let overlapping = volume.intersects_sphere(position, radius);
            let known = contacts.contains(body, *trigger);

            if known && !overlapping {
                contacts.remove(body, *trigger);
                out.push(CollisionEvent::Left {
                    body,
                    trigger: *trigger,
                    still_inside: contacts.count_for(body) > 0,
                });
            } else if !known && overlapping {
                let dist = (volume.center - position).length_squared();
                if nearest.map_or(true, |(best, ..)| dist < best) {
                    nearest = Some((dist, *trigger, volume));
                }
            }
        }

        if let Some((_dist, trigger, volume)) = nearest {
            contacts.insert(body, trigger);
            out.push(CollisionEvent::Entered {
                body,
                trigger,
                velocity,
                normal: wall_normal(volume.rotation),
            });
        }
    }

    out
}
