//! # Graph Store
//!
//! One numeric series per channel. Producers build a [`Graph`] and hand it
//! over wholesale with [`GraphStore::set_channel_graph`]; the graph view only
//! ever reads the latest one.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Formats a Y-axis value into its label.
pub type AxisFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

#[derive(Clone)]
pub struct Graph {
    data_points: Vec<f64>,
    max_point: f64,
    formatter: AxisFormatter,
}

impl Graph {
    pub fn new(formatter: AxisFormatter) -> Self {
        Self {
            data_points: Vec::new(),
            max_point: 0.0,
            formatter,
        }
    }

    pub fn with_points(formatter: AxisFormatter, points: impl IntoIterator<Item = f64>) -> Self {
        let mut graph = Self::new(formatter);
        for point in points {
            graph.push(point);
        }
        graph
    }

    /// Append a sample. The running maximum never decreases.
    pub fn push(&mut self, value: f64) {
        self.data_points.push(value);
        if value > self.max_point {
            self.max_point = value;
        }
    }

    /// Drop the oldest samples so at most `count` remain. Keeps `max_point`.
    pub fn retain_last(&mut self, count: usize) {
        let excess = self.data_points.len().saturating_sub(count);
        self.data_points.drain(..excess);
    }

    pub fn data_points(&self) -> &[f64] {
        &self.data_points
    }

    pub fn max_point(&self) -> f64 {
        self.max_point
    }

    pub fn format_axis(&self, value: f64) -> String {
        (self.formatter)(value)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(Arc::new(|value: f64| format!("{value:.0}")))
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("data_points", &self.data_points.len())
            .field("max_point", &self.max_point)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct GraphStore {
    graphs: Mutex<HashMap<String, Arc<Graph>>>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_channel_graph(&self, channel: &str, graph: Graph) {
        self.lock().insert(channel.to_string(), Arc::new(graph));
    }

    pub fn get(&self, channel: &str) -> Option<Arc<Graph>> {
        self.lock().get(channel).cloned()
    }

    pub fn channels(&self) -> BTreeSet<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Graph>>> {
        self.graphs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
