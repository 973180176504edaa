//! Command-line arguments and logging setup shared by the Networdle
//! binaries.

use std::path::PathBuf;

use clap::Parser;
use networdle::{NetwordleError, ServerConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Networdle game server.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "networdle-server")]
#[command(about = "Serves Networdle games over TCP, one game per connection")]
#[command(version)]
pub struct ServerArgs {
    /// Port to listen on
    pub port: u16,

    /// Interface to bind (default 0.0.0.0)
    #[arg(long, value_name = "HOST")]
    pub bind_host: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File of accepted guesses, one word per line
    #[arg(long, value_name = "FILE")]
    pub guesses: Option<PathBuf>,

    /// File of candidate target words, one word per line
    #[arg(long, value_name = "FILE")]
    pub targets: Option<PathBuf>,

    /// Seed for target selection, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds to wait for each guess before dropping a client
    #[arg(long, value_name = "SECS")]
    pub idle_timeout: Option<u64>,
}

impl ServerArgs {
    /// Builds the server configuration: the config file (or defaults),
    /// then any flags given on the command line.
    ///
    /// # Errors
    /// If `--config` names a file that can't be read or parsed.
    pub fn server_config(&self) -> Result<ServerConfig, NetwordleError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_toml_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = &self.bind_host {
            config.bind_host = host.clone();
        }
        if let Some(path) = &self.guesses {
            config.guess_list = path.clone();
        }
        if let Some(path) = &self.targets {
            config.target_list = path.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(secs) = self.idle_timeout {
            config.idle_timeout_secs = secs;
        }
        Ok(config)
    }
}

/// Networdle game client.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "networdle-client")]
#[command(about = "Plays one game of Networdle, reading guesses from stdin")]
#[command(version)]
pub struct ClientArgs {
    /// Server host name or address
    pub host: String,

    /// Server port
    pub port: u16,
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies. Logs go to
/// stderr so they never mix with the game on stdout.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
