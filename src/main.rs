use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use firefox_session::config::{Config, Settings};
use firefox_session::report;
use firefox_session_core::list_profiles;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Config::parse_args();

    // Setup logging
    setup_logging(cli.debug);

    // Load settings
    let mut settings = Settings::load(cli.config.as_ref())?;
    settings.merge_cli(&cli);

    let root = settings
        .resolve_profiles_dir()
        .context("Could not determine the Firefox profiles directory; pass --profiles-dir")?;
    tracing::debug!("Scanning profiles in {:?}", root);

    let reports = report::collect(&list_profiles(root), settings.strict)?;
    println!("{}", report::render(&reports, settings.pretty)?);
    Ok(())
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("firefox_session=debug,firefox_session_core=debug")
    } else {
        EnvFilter::new("firefox_session=info,firefox_session_core=info")
    };

    // stdout carries the JSON report
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
