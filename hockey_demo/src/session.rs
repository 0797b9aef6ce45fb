use glam::Vec2;
use hecs::World;
use hockey_core::*;
use hockey_proto::{SceneDoc, Snapshot};
use tracing::{debug, info};

use crate::autopilot::{Autopilot, GameRng, TableView};

/// Match lifecycle as seen by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Puck in play
    Playing,
    /// A match was won, table frozen until the reset delay runs out
    Resetting,
}

/// Running totals over a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub frames: u32,
    pub goals_left: u32,
    pub goals_right: u32,
    pub wins_left: u32,
    pub wins_right: u32,
    pub bounces: u32,
    pub paddle_hits: u32,
    pub recoveries: u32,
}

impl MatchStats {
    fn record(&mut self, events: &Events) {
        for side in &events.goals {
            match side {
                Side::Left => self.goals_left += 1,
                Side::Right => self.goals_right += 1,
            }
        }
        match events.winner {
            Some(Side::Left) => self.wins_left += 1,
            Some(Side::Right) => self.wins_right += 1,
            None => {}
        }
        self.bounces += events.bounces() as u32;
        self.paddle_hits += events.paddle_hits.len() as u32;
        self.recoveries += events.puck_recovered as u32;
    }
}

/// A table with everything needed to run it
pub struct Session {
    pub world: World,
    pub time: Time,
    pub config: Config,
    pub game: GameState,
    pub events: Events,
    pub inputs: InputQueue,
    pub contacts: TriggerContacts,
    pub handles: SceneHandles,
    pub match_state: MatchState,
    pub frame: u32,
    pub stats: MatchStats,
    pub rng: GameRng,
    autopilots: Vec<Autopilot>,
}

impl Session {
    pub fn new(doc: &SceneDoc, config: Config, seed: u64) -> Result<Self, SceneError> {
        let mut world = World::new();
        let handles = spawn_scene(&mut world, doc, &config)?;

        Ok(Self {
            world,
            time: Time::default(),
            config,
            game: GameState::new(),
            events: Events::new(),
            inputs: InputQueue::new(),
            contacts: TriggerContacts::new(),
            handles,
            match_state: MatchState::Playing,
            frame: 0,
            stats: MatchStats::default(),
            rng: GameRng::new(seed),
            autopilots: Vec::new(),
        })
    }

    /// Let scripted players drive both paddles
    pub fn with_autopilot(mut self, jitter: f32) -> Self {
        self.autopilots = vec![
            Autopilot::new(Side::Left, jitter),
            Autopilot::new(Side::Right, jitter),
        ];
        self
    }

    pub fn push_input(&mut self, input: PlayerInput) {
        self.inputs.push(input);
    }

    /// Run one frame
    pub fn step(&mut self, dt: f32) {
        self.time.dt = dt;
        self.frame += 1;
        self.drive_autopilots(dt);

        hockey_core::step(
            &mut self.world,
            &mut self.time,
            &self.config,
            &mut self.game,
            &mut self.events,
            &mut self.inputs,
            &mut self.contacts,
        );

        self.stats.frames += 1;
        self.stats.record(&self.events);

        if self.events.bounces() > 0 {
            debug!(frame = self.frame, puck = ?self.puck(), "wall bounce");
        }
        if let Some(winner) = self.events.winner {
            info!(frame = self.frame, "match over, {} wins", winner.colour());
        }

        let state = if self.game.is_paused() {
            MatchState::Resetting
        } else {
            MatchState::Playing
        };
        if state != self.match_state {
            info!(frame = self.frame, ?state, "match state changed");
            self.match_state = state;
        }

        if self.frame % 600 == 0 {
            debug!(
                frame = self.frame,
                left = self.game.score.left,
                right = self.game.score.right,
                "table running"
            );
        }
    }

    fn drive_autopilots(&mut self, dt: f32) {
        let puck = self.puck();
        let puck_vel = self.puck_velocity();

        for pilot in &mut self.autopilots {
            let paddle = match pilot.side() {
                Side::Left => self.handles.left_paddle,
                Side::Right => self.handles.right_paddle,
            };
            let Ok(transform) = self.world.get::<&Transform>(paddle) else {
                continue;
            };
            let view = TableView {
                puck,
                puck_vel,
                paddle: transform.planar(),
            };
            drop(transform);

            for input in pilot.drive(&view, &self.config, dt, &mut self.rng) {
                self.inputs.push(input);
            }
        }
    }

    pub fn puck(&self) -> Vec2 {
        self.planar(self.handles.puck)
    }

    pub fn puck_velocity(&self) -> Vec2 {
        self.world
            .get::<&RigidBody>(self.handles.puck)
            .map(|body| body.velocity.truncate())
            .unwrap_or(Vec2::ZERO)
    }

    fn planar(&self, entity: hecs::Entity) -> Vec2 {
        self.world
            .get::<&Transform>(entity)
            .map(|t| t.planar())
            .unwrap_or(Vec2::ZERO)
    }

    pub fn in_collision(&self) -> bool {
        self.world
            .get::<&BounceBehaviour>(self.handles.puck)
            .map(|b| b.in_collision)
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.frame,
            puck: self.puck().to_array(),
            puck_vel: self.puck_velocity().to_array(),
            paddle_left: self.planar(self.handles.left_paddle).to_array(),
            paddle_right: self.planar(self.handles.right_paddle).to_array(),
            score_left: self.game.score.left,
            score_right: self.game.score.right,
            in_collision: self.in_collision(),
        }
    }
}
