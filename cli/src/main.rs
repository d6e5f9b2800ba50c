//! Academia server CLI
//!
//! Runs the academy management backend: billing API plus the bundled
//! single-page frontend.
//!
//! ```sh
//! # Run with default config (~/.config/academia/config.toml)
//! academia
//!
//! # Custom config path
//! academia --config /etc/academia/config.toml
//!
//! # Listen on all interfaces
//! academia --host 0.0.0.0 --port 8090
//!
//! # Validate config without starting
//! academia --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use academia::config::AppConfig;
use academia::server::{init_tracing, ServerHandle, ServerOptions};

/// Academy management server.
#[derive(Parser, Debug)]
#[command(
    name = "academia",
    version,
    about = "Academy management server: billing API and web frontend",
    long_about = "Serves the academy web frontend and the billing API that \
                  generates pending charges for active enrollments.\n\n\
                  Default config: ~/.config/academia/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ACADEMIA_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(academia::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {}", e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : http://{}", config.listen_address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Frontend    : {}", config.frontend.dir);
        println!("   Page size   : {}", config.billing.page_size);
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from(["academia", "--host", "0.0.0.0", "--port", "9000", "-l", "debug"]);
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.listen_address(), "0.0.0.0:9000");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn flags_default_to_off() {
        let cli = Cli::parse_from(["academia"]);
        assert!(!cli.check);
        assert!(!cli.no_migrate);
        assert!(cli.port.is_none());
    }
}
