use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use rendezvous_core::IceServerConfig;
use rendezvous_server::{DEFAULT_STUN_URL, ServerConfig, serve};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rendezvous")]
#[command(about = "WebRTC rendezvous and signaling server", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling server.
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "RENDEZVOUS_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Seconds of inactivity before a room is swept.
    #[arg(
        long,
        env = "RENDEZVOUS_ROOM_TIMEOUT",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    room_timeout_secs: u64,

    #[arg(
        long,
        env = "RENDEZVOUS_SWEEP_INTERVAL",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    sweep_interval_secs: u64,

    /// Do not send CORS headers.
    #[arg(long)]
    no_cors: bool,

    #[arg(long, env = "STUN_URL", default_value = DEFAULT_STUN_URL)]
    stun_url: String,

    #[arg(long, env = "TURN_URL")]
    turn_url: Option<String>,

    #[arg(long, env = "TURN_USERNAME", requires = "turn_url")]
    turn_username: Option<String>,

    #[arg(long, env = "TURN_CREDENTIAL", requires = "turn_url")]
    turn_credential: Option<String>,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

impl ServeArgs {
    fn ice_servers(&self) -> Vec<IceServerConfig> {
        let mut servers = Vec::new();
        if !self.stun_url.is_empty() {
            servers.push(IceServerConfig {
                urls: vec![self.stun_url.clone()],
                username: None,
                credential: None,
            });
        }
        if let Some(url) = &self.turn_url {
            servers.push(IceServerConfig {
                urls: vec![url.clone()],
                username: self.turn_username.clone(),
                credential: self.turn_credential.clone(),
            });
        }
        servers
    }

    fn to_config(&self) -> ServerConfig {
        ServerConfig {
            bind_address: self.bind,
            room_timeout: Duration::from_secs(self.room_timeout_secs),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
            cors: !self.no_cors,
            ice_servers: self.ice_servers(),
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("Invalid log filter '{}'", level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            init_tracing(&args.log_level)?;
            let config = args.to_config();

            println!("{}", "📡 Starting rendezvous server...".green().bold());
            println!("   🔌 Bind:    {}", config.bind_address);
            println!(
                "   ⏱  Timeout: {}s (sweep every {}s)",
                config.room_timeout.as_secs(),
                config.sweep_interval.as_secs()
            );
            for server in &config.ice_servers {
                println!("   🧊 ICE:     {}", server.urls.join(", "));
            }
            if !config.cors {
                println!("{}", "   CORS headers disabled".yellow());
            }

            info!(
                "Serving with {} ICE servers, CORS {}",
                config.ice_servers.len(),
                if config.cors { "on" } else { "off" }
            );
            serve(config).await?;
        }
    }

    Ok(())
}
