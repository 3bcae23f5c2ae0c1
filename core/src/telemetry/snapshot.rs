//! telemetry/snapshot.rs
//! Immutable end-of-run summary.

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::telemetry::counters::RemuxCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: RemuxCounters,
    /// Non-payload share of the output, 0.0 for an empty output.
    pub overhead_ratio: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &RemuxCounters, timer: &TelemetryTimer) -> Self {
        let total = counters.output_bytes();
        let overhead_ratio = if total > 0 {
            counters.overhead_bytes() as f64 / total as f64
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            overhead_ratio,
            elapsed: timer.elapsed(),
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn output_bytes(&self) -> u64 {
        self.counters.output_bytes()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
