use std::time::{Duration, Instant};

/// Elapsed-time source for the extraction loop.
pub trait Clock {
    /// Reset the origin to now.
    fn start(&mut self);
    /// Time since the last `start`, zero if never started.
    fn elapsed(&self) -> Duration;
}

/// Monotonic wall-clock stopwatch.
#[derive(Debug, Default, Clone)]
pub struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self { started: None }
    }

    pub fn started() -> Self {
        Self {
            started: Some(Instant::now()),
        }
    }
}

impl Clock for Stopwatch {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn elapsed(&self) -> Duration {
        self.started.map(|t| t.elapsed()).unwrap_or(Duration::ZERO)
    }
}

/// Render a duration as `HH:MM:SS.mmm`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        total / 3600,
        (total / 60) % 60,
        total % 60,
        elapsed.subsec_millis()
    )
}
