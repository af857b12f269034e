use std::io::Write;
use std::sync::Arc;

use geo_clock::{Config, FixedPosition, GoogleMaps, LocationOrchestrator, RefreshLoop, render};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Instrument, info, span};
use tracing_subscriber::EnvFilter;

const HELP: &str = "Commands: `locate` to fetch your location, `show` to display it, `exit` to stop";

/// The main function initializes the tracing subscriber, loads the configuration and starts the
/// time zone refresh loop, then reads commands until the user inputs "exit" or closes stdin.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    let host = config.position.map(FixedPosition::new);
    let api = Arc::new(GoogleMaps::new(&config)?);
    let orchestrator =
        Arc::new(LocationOrchestrator::new(host, api).with_position_timeout(config.position_timeout));

    let refresh = RefreshLoop::spawn(Arc::clone(&orchestrator), config.refresh_interval);

    span!(tracing::Level::INFO, "view").in_scope(|| {
        info!("Geolocation view ready");
    });
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            "exit" => break,
            "locate" => {
                orchestrator
                    .request_location()
                    .instrument(span!(tracing::Level::INFO, "locate"))
                    .await;
                print!("{}", render::render(&orchestrator.snapshot(), &config.api_key));
            }
            "show" => print!("{}", render::render(&orchestrator.snapshot(), &config.api_key)),
            other => println!("Unknown command `{}`. {}", other, HELP),
        }
        prompt()?;
    }

    refresh.stop();
    Ok(())
}

fn prompt() -> anyhow::Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
