pub mod bounce;
pub mod components;
pub mod config;
pub mod controls;
pub mod events;
pub mod geometry;
pub mod params;
pub mod resources;
pub mod scene;
pub mod systems;

pub use bounce::*;
pub use components::*;
pub use config::*;
pub use controls::*;
pub use events::*;
pub use params::*;
pub use resources::*;
pub use scene::*;

use hecs::World;
use systems::*;

/// Run the deterministic air hockey simulation for one frame
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    config: &Config,
    game: &mut GameState,
    events: &mut Events,
    inputs: &mut InputQueue,
    contacts: &mut TriggerContacts,
) {
    // Clamp dt to prevent large jumps and time running backwards
    let clamped_dt = time.dt.clamp(0.0, Params::MAX_DT);

    // Clear events at start of frame
    events.clear();

    // 1. Ingest inputs (apply to paddle intents and puck nudges)
    ingest_inputs(world, inputs, config);

    // Fixed micro-steps for stable physics
    let mut remaining_dt = clamped_dt;
    while remaining_dt > 0.0 {
        let step_dt = remaining_dt.min(Params::FIXED_DT);
        remaining_dt -= step_dt;

        let step_time = Time {
            dt: step_dt,
            now: time.now + (clamped_dt - remaining_dt),
        };

        // 2. Move paddles based on intents
        move_paddles(world, &step_time, config);

        // Table is frozen while a finished match resets
        if game.is_paused() {
            game.tick_pause(step_dt);
            continue;
        }

        // 3. Integrate the puck
        integrate_bodies(world, &step_time, config);

        // 4. Paddle strikes
        resolve_paddle_contacts(world, config, events);

        // 5. Wall triggers, delivered to bounce behaviours before gameplay checks
        let collisions = detect_triggers(world, contacts);
        dispatch_trigger_events::<BounceBehaviour>(world, &collisions);
        events.collisions.extend(collisions);

        // 6. Goals, wins and resets
        check_goals(world, config, game, events);
        check_winner(config, game, events);
        apply_match_reset(world, config, game, events);
        recover_escaped_puck(world, config, events);
    }

    // Update time
    time.now += clamped_dt;
}
