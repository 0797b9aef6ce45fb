use glam::{Vec2, Vec3};
use hecs::World;
use hockey_core::*;
use hockey_proto::SceneDoc;

struct Table {
    world: World,
    time: Time,
    config: Config,
    game: GameState,
    events: Events,
    inputs: InputQueue,
    contacts: TriggerContacts,
    handles: SceneHandles,
}

impl Table {
    fn new() -> Self {
        let config = Config::new();
        Self::from_doc(&default_table(&config), config)
    }

    fn from_doc(doc: &SceneDoc, config: Config) -> Self {
        let mut world = World::new();
        let handles = spawn_scene(&mut world, doc, &config).unwrap();
        Self {
            world,
            time: Time::new(Params::FIXED_DT, 0.0),
            config,
            game: GameState::new(),
            events: Events::new(),
            inputs: InputQueue::new(),
            contacts: TriggerContacts::new(),
            handles,
        }
    }

    fn step(&mut self) {
        step(
            &mut self.world,
            &mut self.time,
            &self.config,
            &mut self.game,
            &mut self.events,
            &mut self.inputs,
            &mut self.contacts,
        );
    }

    fn place_puck(&mut self, pos: Vec2, vel: Vec2) {
        let puck = self.handles.puck;
        self.world.get::<&mut Transform>(puck).unwrap().position = pos.extend(0.0);
        self.world.get::<&mut RigidBody>(puck).unwrap().velocity = vel.extend(0.0);
    }

    fn puck_pos(&self) -> Vec2 {
        self.world
            .get::<&Transform>(self.handles.puck)
            .unwrap()
            .planar()
    }

    fn puck_vel(&self) -> Vec3 {
        self.world
            .get::<&RigidBody>(self.handles.puck)
            .unwrap()
            .velocity
    }

    fn in_collision(&self) -> bool {
        self.world
            .get::<&BounceBehaviour>(self.handles.puck)
            .unwrap()
            .in_collision
    }

    /// Step until a goal is scored, returning the frame count
    fn run_until_goal(&mut self, max_frames: u32) -> Option<u32> {
        (1..=max_frames).find(|_| {
            self.step();
            !self.events.goals.is_empty()
        })
    }
}

#[test]
fn test_wall_bounce_relaunches_at_half_speed() {
    let mut table = Table::new();
    table.place_puck(Vec2::new(-4.21, 9.0), Vec2::new(0.0, 8.0));

    let mut speed_before = 0.0;
    let mut bounced = false;
    for _ in 0..120 {
        speed_before = table.puck_vel().length();
        table.step();
        if table.events.bounces() > 0 {
            bounced = true;
            break;
        }
    }

    assert!(bounced, "Puck should reach the top wall");
    assert!(table.in_collision());
    let after = table.puck_vel();
    assert!(
        (after.length() - speed_before * 0.5).abs() < 0.05,
        "Exit speed {} should be half of {}",
        after.length(),
        speed_before
    );
    assert!(after.y < 0.0, "Puck should head back into the rink");
    assert_eq!(after.z, 0.0);
}

#[test]
fn test_heavy_puck_still_leaves_wall_at_half_speed() {
    let config = Config {
        puck_mass: 2.0,
        ..Config::new()
    };
    let mut table = Table::from_doc(&default_table(&config), config);
    table.place_puck(Vec2::new(-4.21, 9.0), Vec2::new(0.0, 8.0));

    let mut speed_before = 0.0;
    for _ in 0..120 {
        speed_before = table.puck_vel().length();
        table.step();
        if table.events.bounces() > 0 {
            break;
        }
    }

    assert_eq!(table.events.bounces(), 1);
    assert!((table.puck_vel().length() - speed_before * 0.5).abs() < 0.05);
}

#[test]
fn test_leaving_the_wall_clears_collision_flag() {
    let mut table = Table::new();
    table.place_puck(Vec2::new(-4.21, 9.0), Vec2::new(0.0, 8.0));

    let mut entered = false;
    let mut left = false;
    for _ in 0..240 {
        table.step();
        entered |= table.events.bounces() > 0;
        if entered
            && table
                .events
                .collisions
                .iter()
                .any(|e| !e.is_entered())
        {
            left = true;
            break;
        }
    }

    assert!(entered);
    assert!(left, "Puck should leave the wall trigger");
    assert!(!table.in_collision());
    assert!(table.contacts.is_empty());
}

#[test]
fn test_goal_through_left_mouth_scores_for_blue() {
    let mut table = Table::new();
    table.place_puck(Vec2::new(-15.0, 0.0), Vec2::new(-10.0, 0.0));

    let frames = table.run_until_goal(120);

    assert!(frames.is_some(), "Puck should reach the goal");
    assert_eq!(table.events.goals, vec![Side::Right]);
    assert_eq!(table.game.score.right, 1);
    assert_eq!(table.game.score.left, 0);
    assert!(table.game.lights.is_lit(5));
    assert_eq!(table.game.lights.lit_count(), 1);
    assert_eq!(table.puck_pos(), Vec2::new(9.5, 0.0));
    assert_eq!(table.puck_vel(), Vec3::ZERO);
}

#[test]
fn test_goal_through_right_mouth_scores_for_red() {
    let mut table = Table::new();
    table.place_puck(Vec2::new(15.0, 1.0), Vec2::new(10.0, 0.0));

    assert!(table.run_until_goal(120).is_some());
    assert_eq!(table.events.goals, vec![Side::Left]);
    assert!(table.game.lights.is_lit(1));
    assert_eq!(table.puck_pos(), Vec2::new(-9.5, 0.0));
}

#[test]
fn test_four_goals_win_and_reset_the_match() {
    let mut table = Table::new();

    for goal in 1..=4u8 {
        table.place_puck(Vec2::new(16.5, 0.0), Vec2::new(10.0, 0.0));
        assert!(table.run_until_goal(120).is_some());

        if goal < 4 {
            assert_eq!(table.game.score.left, goal);
            assert!(table.game.lights.is_lit(goal as usize));
            assert!(table.events.winner.is_none());
        }
    }

    assert_eq!(table.events.winner, Some(Side::Left));
    assert!(table.events.match_reset);
    assert_eq!(table.game.winner, Some(Side::Left));
    assert_eq!(table.game.score, Score::new());
    assert_eq!(table.game.lights.lit_count(), 0);
    assert_eq!(table.puck_pos(), Vec2::ZERO);
    assert!(table.game.is_paused());
}

#[test]
fn test_table_is_frozen_during_reset_pause() {
    let mut table = Table::new();
    table.game.start_pause(table.config.reset_delay);
    table.place_puck(Vec2::ZERO, Vec2::new(0.0, 2.0));

    for _ in 0..30 {
        table.step();
    }
    assert_eq!(table.puck_pos(), Vec2::ZERO, "Puck should not move while paused");

    for _ in 0..40 {
        table.step();
    }
    assert!(!table.game.is_paused());
    assert!(table.puck_pos().y > 0.0, "Puck should move once play resumes");
}

#[test]
fn test_paddles_move_during_reset_pause() {
    let mut table = Table::new();
    table.game.start_pause(table.config.reset_delay);
    table.inputs.push(PlayerInput::Move {
        side: Side::Right,
        dir: Vec2::Y,
    });

    table.time.dt = 0.1;
    table.step();

    let blue = table
        .world
        .get::<&Transform>(table.handles.right_paddle)
        .unwrap()
        .planar();
    assert!((blue.y - 0.6).abs() < 1e-3);
}

#[test]
fn test_dt_is_clamped() {
    let mut table = Table::new();
    table.time.dt = 5.0;
    table.step();

    assert!((table.time.now - Params::MAX_DT).abs() < 1e-6);
}

#[test]
fn test_negative_dt_does_not_rewind_time() {
    let mut table = Table::new();
    table.step();
    let now = table.time.now;

    table.time.dt = -0.5;
    table.step();

    assert_eq!(table.time.now, now);
}

#[test]
fn test_scene_json_round_trip_spawns_equivalent_table() {
    let config = Config::new();
    let json = default_table(&config).to_json().unwrap();
    let doc = SceneDoc::from_json(&json).unwrap();

    let mut table = Table::from_doc(&doc, config.clone());
    let captured = capture_scene(&table.world);
    assert_eq!(captured.objects.len(), doc.objects.len());

    let path = std::env::temp_dir().join(format!("hockey_scene_{}.json", std::process::id()));
    captured.save(&path).unwrap();
    let reloaded = SceneDoc::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let mut copy = Table::from_doc(&reloaded, config);
    table.place_puck(Vec2::new(-15.0, 0.0), Vec2::new(-10.0, 0.0));
    copy.place_puck(Vec2::new(-15.0, 0.0), Vec2::new(-10.0, 0.0));

    assert_eq!(table.run_until_goal(120), copy.run_until_goal(120));
}
