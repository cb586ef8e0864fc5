//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chanterm/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::log_store::DEFAULT_CHANNEL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChantermConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_channel: Option<String>,
    pub boot_message: Option<String>,
    pub frame_interval_ms: Option<u64>,
    pub animation_interval_ms: Option<u64>,
    pub boot_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub palette: Option<Palette>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MonitorConfig {
    pub enabled: Option<bool>,
    pub channel: Option<String>,
    pub sample_interval_ms: Option<u64>,
    pub max_samples: Option<usize>,
}

/// How semantic colours are mapped onto the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    /// Truecolor when `COLORTERM` advertises it, named ANSI colours otherwise.
    #[default]
    Auto,
    Named,
    Truecolor,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BOOT_MESSAGE: &str = "Booting chanterm";
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;
pub const DEFAULT_ANIMATION_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_BOOT_DELAY_MS: u64 = 120;
pub const DEFAULT_LOG_FILE: &str = "chanterm.log";
pub const DEFAULT_MONITOR_CHANNEL: &str = "activity";
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_MAX_SAMPLES: usize = 512;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_channel: String,
    pub boot_message: String,
    pub frame_interval: Duration,
    pub animation_interval: Duration,
    pub boot_delay: Duration,
    pub palette: Palette,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub monitor_enabled: bool,
    pub monitor_channel: String,
    pub sample_interval: Duration,
    pub max_samples: usize,
}

/// Values given on the command line. `None` / `false` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub channel: Option<String>,
    pub palette: Option<Palette>,
    pub log_level: Option<String>,
    pub no_monitor: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.chanterm/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chanterm").join("config.toml"))
}

/// Load config from `path`, or from `~/.chanterm/config.toml` when `None`.
///
/// A missing default file is generated (commented out) and the defaults
/// are returned. An explicitly given path must exist. A malformed file
/// returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<ChantermConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => {
                if !p.exists() {
                    info!("No config file found, generating default at {}", p.display());
                    generate_default_config(&p);
                    return Ok(ChantermConfig::default());
                }
                p
            }
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(ChantermConfig::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ChantermConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# chanterm configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_channel = "main"
# boot_message = "Booting chanterm"
# frame_interval_ms = 33             # how often the dashboard ticks
# animation_interval_ms = 1000       # ellipsis / cursor blink period
# boot_delay_ms = 120                # pause between boot log lines

# [theme]
# palette = "auto"                   # "auto", "named" or "truecolor"

# [logging]
# file = "chanterm.log"
# level = "debug"                    # "off", "error", "warn", "info", "debug", "trace"

# [monitor]
# enabled = true
# channel = "activity"
# sample_interval_ms = 1000
# max_samples = 512
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChantermConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Channel: CLI → env → config → default
    let start_channel = cli
        .channel
        .clone()
        .or_else(|| std::env::var("CHANTERM_CHANNEL").ok())
        .or_else(|| config.general.start_channel.clone())
        .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());

    // Palette: CLI → env → config → default
    let palette = cli
        .palette
        .or_else(|| {
            std::env::var("CHANTERM_PALETTE")
                .ok()
                .and_then(|p| Palette::from_str(&p, true).ok())
        })
        .or(config.theme.palette)
        .unwrap_or_default();

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("CHANTERM_LOG_LEVEL").ok())
        .or_else(|| config.logging.level.clone())
        .and_then(|level| match LevelFilter::from_str(&level) {
            Ok(filter) => Some(filter),
            Err(_) => {
                warn!("Unknown log level '{}', using debug", level);
                None
            }
        })
        .unwrap_or(LevelFilter::Debug);

    let millis = |value: Option<u64>, default: u64| Duration::from_millis(value.unwrap_or(default));

    ResolvedConfig {
        start_channel,
        boot_message: config
            .general
            .boot_message
            .clone()
            .unwrap_or_else(|| DEFAULT_BOOT_MESSAGE.to_string()),
        frame_interval: millis(config.general.frame_interval_ms, DEFAULT_FRAME_INTERVAL_MS)
            .max(Duration::from_millis(1)),
        animation_interval: millis(
            config.general.animation_interval_ms,
            DEFAULT_ANIMATION_INTERVAL_MS,
        ),
        boot_delay: millis(config.general.boot_delay_ms, DEFAULT_BOOT_DELAY_MS),
        palette,
        log_file: PathBuf::from(
            config
                .logging
                .file
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        ),
        log_level,
        monitor_enabled: !cli.no_monitor && config.monitor.enabled.unwrap_or(true),
        monitor_channel: config
            .monitor
            .channel
            .clone()
            .unwrap_or_else(|| DEFAULT_MONITOR_CHANNEL.to_string()),
        sample_interval: millis(config.monitor.sample_interval_ms, DEFAULT_SAMPLE_INTERVAL_MS)
            .max(Duration::from_millis(10)),
        max_samples: config.monitor.max_samples.unwrap_or(DEFAULT_MAX_SAMPLES).max(1),
    }
}
