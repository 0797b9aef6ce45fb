//! Headless air hockey runner
//!
//! Loads a table, lets two scripted players loose on it and optionally records
//! every frame.

pub mod autopilot;
pub mod logging;
pub mod recorder;
pub mod session;
pub mod settings;

pub use autopilot::{Autopilot, GameRng, TableView};
pub use recorder::Recorder;
pub use session::{MatchState, MatchStats, Session};
pub use settings::Settings;

use anyhow::Context;
use hockey_core::{capture_scene, default_table};
use hockey_proto::SceneDoc;
use tracing::info;

/// Run a full session as described by `settings`
pub fn run(settings: &Settings) -> anyhow::Result<MatchStats> {
    settings.validate()?;

    let doc = match &settings.scene_path {
        Some(path) => SceneDoc::load(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => default_table(&settings.game),
    };

    let mut session =
        Session::new(&doc, settings.game.clone(), settings.seed).context("invalid scene")?;
    if settings.autopilot {
        session = session.with_autopilot(settings.autopilot_jitter);
    }

    if let Some(path) = &settings.export_scene_path {
        capture_scene(&session.world)
            .save(path)
            .with_context(|| format!("failed to export scene to {}", path.display()))?;
        info!(path = %path.display(), "scene exported");
    }

    let mut recorder = settings
        .recording_path
        .as_ref()
        .map(Recorder::create)
        .transpose()?;

    info!(frames = settings.frames, seed = settings.seed, "starting session");
    for _ in 0..settings.frames {
        session.step(settings.dt);
        if let Some(recorder) = recorder.as_mut() {
            recorder.record(&session.snapshot())?;
        }
    }

    if let Some(recorder) = recorder {
        let frames = recorder.finish()?;
        info!(frames, "recording written");
    }

    let stats = session.stats;
    info!(
        goals_left = stats.goals_left,
        goals_right = stats.goals_right,
        wins_left = stats.wins_left,
        wins_right = stats.wins_right,
        bounces = stats.bounces,
        "session finished"
    );
    Ok(stats)
}
