//! # Progress Metrics
//!
//! Turns the raw counters of an [`ExtractionJob`] into throughput, completion
//! and remaining-time figures. Throughput is the plain average since the
//! measurement origin (`skip_bytes`); the ETA is a linear extrapolation of it.

use std::fmt;
use std::time::Duration;

use crate::constants::MB_THRESHOLD_KIB;
use crate::job::ExtractionJob;

/// Average read speed, already scaled to the unit it is shown in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Throughput {
    KiloBytes(f64),
    MegaBytes(f64),
}

impl Throughput {
    pub fn from_kib_per_sec(kib: f64) -> Self {
        if kib > MB_THRESHOLD_KIB {
            Throughput::MegaBytes(kib / 1024.0)
        } else {
            Throughput::KiloBytes(kib)
        }
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Throughput::KiloBytes(v) => write!(f, "{v:.1} KB/sec"),
            Throughput::MegaBytes(v) => write!(f, "{v:.1} MB/sec"),
        }
    }
}

/// One render tick worth of derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSample {
    pub elapsed_ms: u64,
    pub match_count: u64,
    pub speed: Throughput,
    pub completed_pct: f64,
    /// `None` until some bytes past `skip_bytes` have been read.
    pub eta_seconds: Option<u64>,
}

/// Holds the last computed speed so a tick with no elapsed time keeps
/// showing the previous figure.
#[derive(Debug, Clone, Default)]
pub struct ProgressState {
    speed_kib: f64,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, job: &ExtractionJob, elapsed: Duration) -> ProgressSample {
        let elapsed_ms = elapsed.as_millis() as u64;
        let total = job.bytes_total();
        let read = job.bytes_read();
        let measured = job.measured_bytes();

        if total > 0 && elapsed_ms > 0 {
            // bytes/ms to KB/s
            self.speed_kib = (measured as f64 * 1000.0) / (elapsed_ms as f64 * 1024.0);
        }

        let completed_pct = if total > 0 {
            read as f64 * 100.0 / total as f64
        } else {
            0.0
        };

        let eta_seconds = if measured > 0 && total > 0 {
            let elapsed_secs = elapsed_ms as f64 / 1000.0;
            let remaining = total.saturating_sub(read) as f64;
            Some((elapsed_secs * remaining / measured as f64) as u64)
        } else {
            None
        };

        ProgressSample {
            elapsed_ms,
            match_count: job.match_count(),
            speed: Throughput::from_kib_per_sec(self.speed_kib),
            completed_pct,
            eta_seconds,
        }
    }
}
