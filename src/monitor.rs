//! # Background Producers
//!
//! Tasks that feed the console from outside the render loop:
//!
//! - **Boot sequence**: timestamped startup lines on the default channel,
//!   then a signal that the dashboard may start taking commands.
//! - **Activity monitor**: log entries written per second, as a graph on its
//!   own channel.
//!
//! Both only ever go through `Arc<Console>`, the same way any other producer
//! thread would.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use log::{debug, info};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::config::ResolvedConfig;
use crate::core::console::Console;
use crate::core::graph::Graph;
use crate::core::log_store::EntryKind;

/// Write the boot log, one line per `delay`. The receiver fires when the last
/// line is out.
pub fn spawn_boot_sequence(
    console: Arc<Console>,
    config: &ResolvedConfig,
) -> oneshot::Receiver<()> {
    let (done_tx, done_rx) = oneshot::channel();
    let lines = boot_lines(config);
    let delay = config.boot_delay;

    tokio::spawn(async move {
        for (kind, line) in lines {
            tokio::time::sleep(delay).await;
            let stamp = Local::now().format("%H:%M:%S");
            console.write(kind, &format!("[{stamp}] {line}"));
        }
        debug!("Boot sequence finished");
        let _ = done_tx.send(());
    });

    done_rx
}

fn boot_lines(config: &ResolvedConfig) -> Vec<(EntryKind, String)> {
    let mut lines = vec![
        (
            EntryKind::Message,
            format!("chanterm {}", env!("CARGO_PKG_VERSION")),
        ),
        (EntryKind::Debug, format!("Palette: {:?}", config.palette)),
        (EntryKind::Debug, format!("Log file: {}", config.log_file.display())),
    ];
    if config.monitor_enabled {
        lines.push((
            EntryKind::Debug,
            format!("Activity graph on channel '{}'", config.monitor_channel),
        ));
    }
    lines.push((EntryKind::Success, "Ready.".to_string()));
    lines.push((
        EntryKind::Message,
        "Type 'help' for a list of commands.".to_string(),
    ));
    lines
}

/// Turns running entry totals into an entries-per-second graph.
pub struct ActivitySampler {
    graph: Graph,
    last_total: usize,
    max_samples: usize,
}

impl ActivitySampler {
    pub fn new(max_samples: usize) -> Self {
        Self {
            graph: Graph::new(Arc::new(|value: f64| format!("{value:.0}/s"))),
            last_total: 0,
            max_samples: max_samples.max(1),
        }
    }

    /// Record the entries written since the previous sample, `elapsed` ago.
    pub fn sample(&mut self, total: usize, elapsed: Duration) -> &Graph {
        let written = total.saturating_sub(self.last_total);
        self.last_total = total;

        let seconds = elapsed.as_secs_f64();
        let rate = if seconds > 0.0 {
            written as f64 / seconds
        } else {
            written as f64
        };
        self.graph.push(rate);
        self.graph.retain_last(self.max_samples);
        &self.graph
    }
}

/// Sample the log store every `sample_interval` and publish the graph.
pub fn spawn_activity_monitor(console: Arc<Console>, config: &ResolvedConfig) -> JoinHandle<()> {
    let channel = config.monitor_channel.clone();
    let interval = config.sample_interval.max(Duration::from_millis(1));
    let mut sampler = ActivitySampler::new(config.max_samples);
    info!("Activity monitor on '{channel}' every {interval:?}");

    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticks.tick().await;

        loop {
            ticks.tick().await;
            if console.quit_requested() {
                break;
            }
            let graph = sampler.sample(console.logs().len(), interval).clone();
            console.set_channel_graph(&channel, graph);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ChantermConfig, CliOverrides, resolve};

    fn config() -> ResolvedConfig {
        let mut config = resolve(&ChantermConfig::default(), &CliOverrides::default());
        config.boot_delay = Duration::ZERO;
        config
    }

    #[test]
    fn test_sampler_records_rate_per_second() {
        let mut sampler = ActivitySampler::new(8);
        sampler.sample(10, Duration::from_secs(2));
        let graph = sampler.sample(16, Duration::from_millis(500));

        assert_eq!(graph.data_points(), &[5.0, 12.0]);
        assert_eq!(graph.format_axis(12.0), "12/s");
    }

    #[test]
    fn test_sampler_keeps_last_samples() {
        let mut sampler = ActivitySampler::new(3);
        for total in [1, 2, 3, 4, 5] {
            sampler.sample(total * total, Duration::from_secs(1));
        }
        // Totals 1, 4, 9, 16, 25 give rates 1, 3, 5, 7, 9
        let graph = sampler.sample(25, Duration::from_secs(1));
        assert_eq!(graph.data_points(), &[7.0, 9.0, 0.0]);
        assert_eq!(graph.max_point(), 9.0);
    }

    #[test]
    fn test_boot_lines_mention_monitor_only_when_enabled() {
        let mut config = config();
        config.monitor_enabled = false;
        let lines = boot_lines(&config);
        assert!(!lines.iter().any(|(_, line)| line.contains("Activity graph")));
        assert_eq!(lines.last().map(|(kind, _)| *kind), Some(EntryKind::Message));
    }

    #[tokio::test]
    async fn test_boot_sequence_signals_after_last_line() {
        let console = Arc::new(Console::new());
        let config = config();
        let expected = boot_lines(&config).len();

        spawn_boot_sequence(console.clone(), &config)
            .await
            .expect("boot task sends completion");

        assert_eq!(console.logs().count_for("main"), expected);
        let first = console.logs().window_for("main", 0, 1);
        assert!(first[0].text.starts_with('['));
        assert!(first[0].text.contains("chanterm "));
    }
}
