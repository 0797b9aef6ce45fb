use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt::time, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the tracing subscriber.
///
/// `RUST_LOG` adds to the defaults. Debug builds log table events, release
/// builds only goals, wins and warnings. Call once at startup.
pub fn init() -> anyhow::Result<()> {
    let core_level = if cfg!(debug_assertions) {
        "hockey_core=debug"
    } else {
        "hockey_core=info"
    };

    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_timer(time::uptime()),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()?
                .add_directive(core_level.parse()?)
                .add_directive("hockey_demo=info".parse()?),
        )
        .try_init()?;
    Ok(())
}
