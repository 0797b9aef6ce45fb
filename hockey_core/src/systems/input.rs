use hecs::World;

use crate::{Config, InputQueue, Paddle, PaddleIntent, PlayerInput, Puck, RigidBody};

/// Ingest queued inputs into paddle intents and puck forces
pub fn ingest_inputs(world: &mut World, inputs: &mut InputQueue, config: &Config) {
    for input in inputs.drain() {
        match input {
            PlayerInput::Move { side, dir } => {
                for (_e, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
                    if paddle.side == side {
                        intent.dir = dir.clamp_length_max(1.0);
                    }
                }
            }
            PlayerInput::Drag { side, delta } => {
                for (_e, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
                    if paddle.side == side {
                        intent.drag += delta;
                    }
                }
            }
            PlayerInput::Nudge { dir } => {
                let force = dir.normalize_or_zero().extend(0.0) * config.nudge_force;
                for (_e, (_puck, body)) in world.query_mut::<(&Puck, &mut RigidBody)>() {
                    body.apply_force(force);
                }
            }
        }
    }
}
