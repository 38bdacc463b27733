use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use jamboard_client::transport::{self, TransportEvents};
use jamboard_client::{PointerInput, RecordingSurface, StrokeCapture, StrokeClient, StrokeReplayer};
use jamboard_core::config::Config;
use jamboard_core::PaintEvent;

#[derive(Parser)]
#[command(
    name = "jamboard",
    about = "Real-time collaborative drawing relay",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay server
    Relay {
        /// Port to listen on (default: 9230)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Connect as a headless client and draw a scripted stroke
    Draw {
        /// Relay WebSocket URL (default: from config)
        #[arg(long)]
        url: Option<String>,

        /// Seconds to keep listening for remote strokes after drawing
        #[arg(long, default_value_t = 5)]
        listen: u64,
    },

    /// Subscribe to the topic and log reconstructed remote strokes
    Watch {
        /// Relay WebSocket URL (default: from config)
        #[arg(long)]
        url: Option<String>,
    },

    /// Show version and configuration summary
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    // Load config
    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(Config::config_dir);

    let config = Config::load(&config_path)?;

    match cli.command {
        Commands::Relay { port } => {
            let port = port.unwrap_or_else(|| config.relay_port());
            tracing::info!("Starting Jamboard relay on port {port}");
            let state = Arc::new(jamboard_relay::RelayState::new(Arc::new(config)));
            jamboard_relay::start_relay(state, port).await?;
        }
        Commands::Draw { url, listen } => {
            let url = url.unwrap_or_else(|| config.server_url());
            run_draw(&config, &url, listen).await?;
        }
        Commands::Watch { url } => {
            let url = url.unwrap_or_else(|| config.server_url());
            run_watch(&url).await?;
        }
        Commands::Status => {
            println!("Jamboard v{}", env!("CARGO_PKG_VERSION"));
            println!("Config: {}", config_path.display());
            println!("Relay port: {}", config.relay_port());
            println!("Topic: {}", config.topic());
            println!("Throttle: {:?}", config.throttle());

            let health_url = format!("http://127.0.0.1:{}/health", config.relay_port());
            match reqwest::get(&health_url).await {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("Relay: running ({} subscribers)", body["subscribers"]);
                }
                Err(_) => println!("Relay: not running"),
            }
        }
    }

    Ok(())
}

/// Draw a diagonal demo stroke, then keep replaying inbound strokes.
async fn run_draw(config: &Config, url: &str, listen: u64) -> anyhow::Result<()> {
    tracing::info!(url, "Connecting to relay");
    let (mut publisher, mut inbound) = transport::connect(url).await?;

    let mut client = StrokeClient::new(
        StrokeCapture::new(config.throttle()),
        RecordingSurface::new(),
        RecordingSurface::new(),
    );

    let (pointer_tx, pointer_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let _ = pointer_tx.send(PointerInput::Down { x: 20.0, y: 20.0 });
        for i in 1..=30u32 {
            tokio::time::sleep(Duration::from_millis(4)).await;
            let _ = pointer_tx.send(PointerInput::Move {
                x: 20.0 + f64::from(i) * 3.0,
                y: 20.0 + f64::from(i),
            });
        }
        let _ = pointer_tx.send(PointerInput::Up { x: 110.0, y: 50.0 });

        // Keep the input channel open so the loop stays subscribed.
        tokio::time::sleep(Duration::from_secs(listen)).await;
    });

    client.run(&mut publisher, &mut inbound, pointer_rx).await?;

    tracing::info!(
        local_segments = client.local.segments.len(),
        remote_segments = client.remote.segments.len(),
        "Draw session finished"
    );
    Ok(())
}

/// Handler that reconstructs and logs every remote stroke segment.
struct WatchHandler {
    replayer: StrokeReplayer,
    surface: RecordingSurface,
}

impl TransportEvents for WatchHandler {
    fn on_connected(&mut self) {
        tracing::info!("Watching the paint topic");
    }

    fn on_disconnected(&mut self) {
        tracing::info!(
            segments = self.surface.segments.len(),
            "Relay connection closed"
        );
    }

    fn on_message_received(&mut self, text: &str) {
        match PaintEvent::from_json(text) {
            Ok(event) => {
                let before = self.surface.segments.len();
                self.replayer.apply_anonymous(&event, &mut self.surface);
                if let Some(segment) = self.surface.segments.get(before) {
                    tracing::info!(
                        "segment ({:.1},{:.1}) -> ({:.1},{:.1})",
                        segment.x1,
                        segment.y1,
                        segment.x2,
                        segment.y2
                    );
                }
            }
            Err(e) => tracing::warn!(%e, "Dropping malformed paint event"),
        }
    }
}

async fn run_watch(url: &str) -> anyhow::Result<()> {
    let (_publisher, mut inbound) = transport::connect(url).await?;
    let mut handler = WatchHandler {
        replayer: StrokeReplayer::new(),
        surface: RecordingSurface::new(),
    };
    inbound.drive(&mut handler).await;
    Ok(())
}
