//! Timing metrics for the boundary operations.
//!
//! The client reports one [`TimingRecord`] per call through a
//! [`MetricsSink`]. Recording is fire-and-forget: a sink must never block
//! and has no way to fail the caller's result. [`NoopMetrics`] is the
//! default; [`InMemoryMetrics`] keeps a bounded window of records for tests
//! and simple hosts.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Duration;

/// Number of records kept per operation by [`InMemoryMetrics`]; older
/// records are dropped first.
const MAX_RECORDS_PER_OPERATION: usize = 1000;

/// The boundary operations that report timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SuggestStations,
    CurrentWeather,
    RankActivities,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::SuggestStations => "suggest_stations",
            Operation::CurrentWeather => "current_weather",
            Operation::RankActivities => "rank_activities",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Timing of one boundary call.
///
/// `success` reflects the typed outcome of the call: a weather lookup that
/// resolved to a failure value counts as unsuccessful even though nothing
/// panicked.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: Duration,
    pub success: bool,
}

/// Receiver of per-call timing records.
pub trait MetricsSink: Send + Sync {
    fn record(&self, operation: Operation, timing: TimingRecord);
}

/// Sink that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn record(&self, _operation: Operation, _timing: TimingRecord) {}
}

#[derive(Default)]
struct OperationStats {
    timings: VecDeque<TimingRecord>,
    call_count: u64,
    error_count: u64,
}

/// Sink that keeps the last [`MAX_RECORDS_PER_OPERATION`] records per
/// operation in memory, plus running call and error counts.
#[derive(Default)]
pub struct InMemoryMetrics {
    inner: Mutex<HashMap<Operation, OperationStats>>,
}

/// Latency percentiles and success rate over the retained records of one
/// operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationSummary {
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub success_rate: f64,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// The retained timing records for `operation`, oldest first.
    pub fn records(&self, operation: Operation) -> Vec<TimingRecord> {
        let inner = self.inner.lock();
        inner
            .get(&operation)
            .map(|stats| stats.timings.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Total calls recorded for `operation`, including ones whose timing
    /// record has since been dropped from the window.
    pub fn call_count(&self, operation: Operation) -> u64 {
        let inner = self.inner.lock();
        inner.get(&operation).map(|stats| stats.call_count).unwrap_or(0)
    }

    /// Total unsuccessful calls recorded for `operation`.
    pub fn error_count(&self, operation: Operation) -> u64 {
        let inner = self.inner.lock();
        inner.get(&operation).map(|stats| stats.error_count).unwrap_or(0)
    }

    /// Summary over the retained window, or `None` when nothing has been
    /// recorded for `operation` yet.
    pub fn summary(&self, operation: Operation) -> Option<OperationSummary> {
        let inner = self.inner.lock();
        let stats = inner.get(&operation)?;
        if stats.timings.is_empty() {
            return None;
        }

        let mut durations: Vec<Duration> = stats.timings.iter().map(|t| t.duration).collect();
        durations.sort();
        let successes = stats.timings.iter().filter(|t| t.success).count();

        Some(OperationSummary {
            p50: percentile(&durations, 0.50),
            p95: percentile(&durations, 0.95),
            p99: percentile(&durations, 0.99),
            success_rate: successes as f64 / stats.timings.len() as f64,
        })
    }
}

/// Nearest-rank percentile over an ascending-sorted slice.
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let rank = (p * sorted.len() as f64).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

impl MetricsSink for InMemoryMetrics {
    fn record(&self, operation: Operation, timing: TimingRecord) {
        let mut inner = self.inner.lock();
        let stats = inner.entry(operation).or_default();
        stats.call_count += 1;
        if !timing.success {
            stats.error_count += 1;
        }
        stats.timings.push_back(timing);
        while stats.timings.len() > MAX_RECORDS_PER_OPERATION {
            stats.timings.pop_front();
        }
    }
}
