use crate::{Config, Events, GameState, Puck, RigidBody, Transform};
use glam::Vec3;
use hecs::World;
use tracing::{info, warn};

/// Check if the puck crossed a goal line (scoring)
pub fn check_goals(world: &mut World, config: &Config, game: &mut GameState, events: &mut Events) {
    for (_entity, (_puck, transform, body)) in
        world.query_mut::<(&Puck, &mut Transform, &mut RigidBody)>()
    {
        let Some(scorer) = config.scorer_at(transform.position.x) else {
            continue;
        };

        game.record_goal(scorer);
        events.goals.push(scorer);
        info!(
            scorer = scorer.colour(),
            left = game.score.left,
            right = game.score.right,
            "goal"
        );

        // Serve from the scorer's half
        let serve = config.serve_position(scorer);
        transform.position = Vec3::new(serve.x, serve.y, transform.position.z);
        body.reset_velocity();
    }
}

/// Declare a winner once a side reaches the win score
pub fn check_winner(config: &Config, game: &mut GameState, events: &mut Events) {
    let Some(winner) = game.score.has_winner(config.win_score) else {
        return;
    };

    info!("{} player wins", winner.colour());
    game.winner = Some(winner);
    game.score.reset();
    game.reset_pending = true;
    events.winner = Some(winner);
}

/// Put the puck back in the centre after a win and pause the table
pub fn apply_match_reset(
    world: &mut World,
    config: &Config,
    game: &mut GameState,
    events: &mut Events,
) {
    if !game.reset_pending {
        return;
    }

    info!("resetting match");
    center_pucks(world);
    game.lights.clear();
    game.reset_pending = false;
    game.start_pause(config.reset_delay);
    events.match_reset = true;
}

/// Return a puck that escaped through a wall to the centre
pub fn recover_escaped_puck(world: &mut World, config: &Config, events: &mut Events) {
    let escaped = world
        .query::<(&Puck, &Transform)>()
        .iter()
        .any(|(_e, (_p, t))| t.position.y.abs() > config.recovery_y);

    if escaped {
        warn!("puck left the table, returning it to the centre");
        center_pucks(world);
        events.puck_recovered = true;
    }
}

fn center_pucks(world: &mut World) {
    for (_entity, (_puck, transform, body)) in
        world.query_mut::<(&Puck, &mut Transform, &mut RigidBody)>()
    {
        transform.position = Vec3::new(0.0, 0.0, transform.position.z);
        body.reset_velocity();
    }
}
