use std::time::Duration;

use anyhow::Result;
use aura_client::capture::{CameraBackendFactory, CameraConfig, CameraSource};
use aura_client::speech::ScriptedEngine;
use aura_client::{AssistantSession, Config};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "aura-client", about = "Webcam + voice client for the Aura assistant")]
struct Args {
    /// Config file path (without extension)
    #[arg(long, default_value = "config/aura-client")]
    config: String,

    /// Override the service WebSocket URL
    #[arg(long)]
    server_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut cfg = Config::load_or_default(&args.config);
    if let Some(url) = args.server_url {
        cfg.server.url = url;
    }

    info!("{} v0.1.0", cfg.service.name);
    info!("Service endpoint: {}", cfg.server.url);

    let camera = CameraBackendFactory::create(
        CameraSource::Synthetic,
        CameraConfig {
            width: cfg.capture.width,
            height: cfg.capture.height,
            ..CameraConfig::default()
        },
    )?;

    // Canned utterances stand in for a live recognition engine.
    let engine = Box::new(ScriptedEngine::new(
        vec![
            "hello there".to_string(),
            "how is the weather today".to_string(),
            "tell me a joke".to_string(),
        ],
        Duration::from_secs(2),
    ));

    let session = AssistantSession::new(cfg.session(), camera, engine);
    info!("Session endpoint: {}", session.config().endpoint());

    session.start().await?;
    info!("Assistant running, press ctrl-c to stop");

    tokio::signal::ctrl_c().await?;

    session.stop().await;
    let stats = session.stats();
    info!(
        "Session over: {:.1}s, {} frames sent, {} transcripts, {} messages received",
        stats.duration_secs, stats.frames_sent, stats.transcripts_sent, stats.messages_received
    );

    Ok(())
}
