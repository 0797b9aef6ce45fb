use anyhow::Context;
use hockey_demo::Settings;

fn main() -> anyhow::Result<()> {
    hockey_demo::logging::init()?;

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).context("failed to load settings")?,
        None => Settings::default(),
    };

    let stats = hockey_demo::run(&settings)?;
    println!(
        "{} frames: goals red {} blue {}, wins red {} blue {}, {} wall bounces",
        stats.frames,
        stats.goals_left,
        stats.goals_right,
        stats.wins_left,
        stats.wins_right,
        stats.bounces
    );
    Ok(())
}
