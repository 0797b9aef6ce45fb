use crate::{Config, Paddle, PaddleIntent, RigidBody, Time, Transform};
use hecs::World;

/// Apply paddle movement based on intents.
///
/// Paddles are kinematic: their velocity is whatever this move implies, so
/// contacts can transfer it to the puck.
pub fn move_paddles(world: &mut World, time: &Time, config: &Config) {
    for (_entity, (_paddle, transform, intent, body)) in world.query_mut::<(
        &Paddle,
        &mut Transform,
        &mut PaddleIntent,
        Option<&mut RigidBody>,
    )>() {
        let before = transform.position;
        let delta = intent.dir * config.paddle_key_speed * time.dt
            + intent.drag * config.paddle_drag_gain;
        intent.drag = glam::Vec2::ZERO;

        // Clamp to table bounds
        let target = config.clamp_paddle(before.truncate() + delta);
        transform.position = target.extend(before.z);

        if let Some(body) = body {
            body.velocity = if time.dt > 0.0 {
                (transform.position - before) / time.dt
            } else {
                glam::Vec3::ZERO
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_paddle, Side};
    use glam::Vec2;

    #[test]
    fn test_keyboard_move_uses_speed_and_dt() {
        let mut world = hecs::World::new();
        let config = Config::new();
        let paddle = create_paddle(&mut world, &config, Side::Right, Vec2::new(5.0, 0.0));
        world.get::<&mut PaddleIntent>(paddle).unwrap().dir = Vec2::Y;

        move_paddles(&mut world, &Time::new(0.5, 0.0), &config);

        let t = world.get::<&Transform>(paddle).unwrap();
        assert!((t.position.y - config.paddle_key_speed * 0.5).abs() < 1e-5);
        let body = world.get::<&RigidBody>(paddle).unwrap();
        assert!((body.velocity.y - config.paddle_key_speed).abs() < 1e-4);
    }

    #[test]
    fn test_drag_is_consumed_once() {
        let mut world = hecs::World::new();
        let config = Config::new();
        let paddle = create_paddle(&mut world, &config, Side::Left, Vec2::new(-5.0, 0.0));
        world.get::<&mut PaddleIntent>(paddle).unwrap().drag = Vec2::new(0.1, 0.0);

        let time = Time::new(0.01, 0.0);
        move_paddles(&mut world, &time, &config);
        move_paddles(&mut world, &time, &config);

        let t = world.get::<&Transform>(paddle).unwrap();
        let expected = -5.0 + 0.1 * config.paddle_drag_gain;
        assert!((t.position.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_clamped_to_bounds() {
        let mut world = hecs::World::new();
        let config = Config::new();
        let paddle = create_paddle(&mut world, &config, Side::Left, Vec2::new(-5.0, 0.0));
        world.get::<&mut PaddleIntent>(paddle).unwrap().drag = Vec2::new(-10.0, 10.0);

        move_paddles(&mut world, &Time::new(0.016, 0.0), &config);

        let t = world.get::<&Transform>(paddle).unwrap();
        assert_eq!(t.position.x, -config.paddle_bound_x);
        assert_eq!(t.position.y, config.paddle_bound_y);
    }
}
