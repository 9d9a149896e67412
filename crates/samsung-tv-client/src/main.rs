//! Samsung TV remote control: command-line entry point.
//!
//! # Usage
//!
//! ```text
//! samsung-tv [--config FILE] [--host HOST] [--app-id ID] [--app-name NAME] <COMMAND>
//!
//! Commands:
//!   send <KEY>...                      Send one or more keys, e.g. KEY_VOLUP KEY_MUTE
//!   check [--timeout-ms N]             Print online/offline; exit code 0/1
//!   watch [--interval-secs N] [--on-online KEY]
//!                                      Log power transitions until Ctrl+C
//!   init-config [--force]              Write a default config file
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Description                             |
//! |-----------------------|-----------------------------------------|
//! | `SAMSUNG_TV_CONFIG`   | Config file path                        |
//! | `SAMSUNG_TV_HOST`     | TV hostname or IP                       |
//! | `SAMSUNG_TV_APP_ID`   | Application ID remembered by the TV     |
//! | `SAMSUNG_TV_APP_NAME` | Name shown in the TV's pairing prompt   |
//! | `RUST_LOG`            | Log filter; overrides `log_level`       |
//!
//! Command-line flags win over environment variables, which win over the
//! config file.
//!
//! # First contact
//!
//! The first `send` from a new application ID makes the TV ask its user
//! whether to allow the remote.  Until they answer, every command is refused
//! with "waiting for the TV user"; accept the prompt and send again.

use std::{
    path::PathBuf,
    process::ExitCode,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use samsung_tv_client::infrastructure::storage::config::{
    config_file_path, load_config_from, save_config_to, AppConfig,
};
use samsung_tv_client::{CommandClient, CommandError, PowerMonitor, TcpProbe};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Samsung TV remote control.
///
/// Sends key commands to pre-2014 Samsung televisions over their
/// remote-control port and watches their power state.
#[derive(Debug, Parser)]
#[command(
    name = "samsung-tv",
    about = "Remote control for Samsung TVs over the LAN",
    version
)]
struct Cli {
    /// Config file to read instead of the platform default.
    #[arg(long, global = true, env = "SAMSUNG_TV_CONFIG")]
    config: Option<PathBuf>,

    /// Hostname or IP address of the television.
    #[arg(long, global = true, env = "SAMSUNG_TV_HOST")]
    host: Option<String>,

    /// Application ID the TV remembers when access is allowed.
    #[arg(long, global = true, env = "SAMSUNG_TV_APP_ID")]
    app_id: Option<String>,

    /// Name shown in the TV's "allow this device?" prompt.
    #[arg(long, global = true, env = "SAMSUNG_TV_APP_NAME")]
    app_name: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send key commands, one connection each, in order.
    Send {
        /// Key names such as KEY_VOLUP, KEY_POWEROFF, KEY_HDMI.
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Check once whether the TV is on.
    Check {
        /// Connect timeout in milliseconds [default: network.connect_timeout_ms].
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Report every time the TV turns on or off.
    Watch {
        /// Polling interval in seconds [default: monitor.interval_secs].
        #[arg(long)]
        interval_secs: Option<u64>,
        /// Key to send whenever the TV comes online.
        #[arg(long)]
        on_online: Option<String>,
    },
    /// Write a config file with default settings.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Resolves the config file path: `--config` or the platform default.
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => config_file_path().context("no --config given and no platform config directory"),
        }
    }

    /// Copies the identity flags that were given over the loaded settings.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.tv.host = host.clone();
        }
        if let Some(id) = &self.app_id {
            config.tv.application_id = id.clone();
        }
        if let Some(name) = &self.app_name {
            config.tv.application_name = name.clone();
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let path = cli.config_path()?;
    let mut config = load_config_from(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    cli.apply_overrides(&mut config);

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise the configured level; otherwise `info`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.log_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Command::Send { keys } => send_keys(&config, &keys).await,
        Command::Check { timeout_ms } => {
            let timeout = timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(config.command_config().connect_timeout);
            check(&config, timeout).await
        }
        Command::Watch {
            interval_secs,
            on_online,
        } => {
            let interval = interval_secs
                .map(|secs| Duration::from_secs(secs.max(1)))
                .unwrap_or_else(|| config.monitor_interval());
            watch(&config, interval, on_online).await
        }
        Command::InitConfig { force } => init_config(&config, &path, force),
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

async fn send_keys(config: &AppConfig, keys: &[String]) -> anyhow::Result<ExitCode> {
    let tv = config.device_identity()?;
    let client = CommandClient::new(config.command_config());

    for key in keys {
        match client.send_command(&tv, key).await {
            Ok(()) => println!("{key}: sent"),
            Err(e @ CommandError::PendingUserDecision) => {
                println!("{key}: {e}");
                println!("accept the prompt on the TV, then send the key again");
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("{key} was not sent to {}", tv.host()));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn check(config: &AppConfig, timeout: Duration) -> anyhow::Result<ExitCode> {
    let tv = config.device_identity()?;
    let monitor = PowerMonitor::new(TcpProbe, tv.host(), config.network.port);

    if monitor.check_once(timeout).await {
        println!("online");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("offline");
        Ok(ExitCode::FAILURE)
    }
}

async fn watch(
    config: &AppConfig,
    interval: Duration,
    on_online: Option<String>,
) -> anyhow::Result<ExitCode> {
    let tv = config.device_identity()?;
    let client = CommandClient::new(config.command_config());
    let monitor = PowerMonitor::new(TcpProbe, tv.host(), config.network.port);

    info!("watching {} every {interval:?}; press Ctrl+C to stop", tv.host());

    let running = Arc::new(AtomicBool::new(true));
    let mut transitions = monitor.spawn_watch(interval, Arc::clone(&running));

    loop {
        tokio::select! {
            next = transitions.recv() => {
                let Some(online) = next else { break };
                println!("{}", if online { "online" } else { "offline" });

                if let (true, Some(key)) = (online, on_online.as_deref()) {
                    match client.send_command(&tv, key).await {
                        Ok(()) => info!("sent {key} after power-on"),
                        Err(e) => warn!("could not send {key} after power-on: {e}"),
                    }
                }
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    tracing::error!("failed to listen for Ctrl+C signal: {e}");
                }
                info!("received Ctrl+C, stopping");
                break;
            }
        }
    }

    running.store(false, Ordering::Relaxed);
    Ok(ExitCode::SUCCESS)
}

fn init_config(config: &AppConfig, path: &std::path::Path, force: bool) -> anyhow::Result<ExitCode> {
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite it", path.display());
    }
    save_config_to(config, path)
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(ExitCode::SUCCESS)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
