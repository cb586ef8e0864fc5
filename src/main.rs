use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use chanterm::core::commands::Builtins;
use chanterm::core::config::{self, CliOverrides, Palette};
use chanterm::core::console::Console;
use chanterm::{monitor, tui};
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "chanterm", about = "Channel-multiplexed terminal dashboard")]
struct Args {
    /// Config file to use instead of ~/.chanterm/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Channel to show first
    #[arg(short, long)]
    channel: Option<String>,

    /// Colour palette
    #[arg(long, value_enum)]
    palette: Option<Palette>,

    /// Log level for the log file (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Don't publish the activity graph
    #[arg(long)]
    no_monitor: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Logging isn't up yet; the terminal is still ours to print to
    let file_config = config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("chanterm: {e}, using defaults");
        config::ChantermConfig::default()
    });
    let cli = CliOverrides {
        channel: args.channel,
        palette: args.palette,
        log_level: args.log_level,
        no_monitor: args.no_monitor,
    };
    let resolved = config::resolve(&file_config, &cli);

    // stdout belongs to the dashboard, so the log goes to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "chanterm starting on channel '{}' with {:?} palette",
        resolved.start_channel,
        resolved.palette
    );

    let console = Arc::new(Console::new());
    let boot_done = monitor::spawn_boot_sequence(console.clone(), &resolved);
    let monitor_task = resolved
        .monitor_enabled
        .then(|| monitor::spawn_activity_monitor(console.clone(), &resolved));

    let dispatcher = Box::new(Builtins::new(console.clone()));
    let result = tui::run(&resolved, console, dispatcher, boot_done).await;

    if let Some(handle) = monitor_task {
        handle.abort();
    }
    log::info!("chanterm exiting");
    result
}
