//! Shared helpers for engine integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use appid_extract::clock::Clock;
use appid_extract::console::CapturedConsole;
use appid_extract::engine::{EngineOptions, ExtractionEngine};
use appid_extract::error::ExtractError;
use appid_extract::job::RunSummary;

/// Clock that moves forward a fixed step on every read.
pub struct StepClock {
    now: Cell<Duration>,
    step: Duration,
}

impl StepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }
}

impl Clock for StepClock {
    fn start(&mut self) {
        self.now.set(Duration::ZERO);
    }

    fn elapsed(&self) -> Duration {
        let next = self.now.get() + self.step;
        self.now.set(next);
        next
    }
}

/// An anchor tag as it appears on a store listing page.
pub fn app_link(id: &str, title: &str) -> String {
    format!(
        r#"<a class="title" href="https://play.google.com/store/apps/details?id={id}&hl=en" title="{title}">{title}</a>"#
    )
}

pub fn write_input(dir: &Path, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write input");
    path
}

pub fn run_engine(
    input: &Path,
    output: &Path,
    options: EngineOptions,
    clock: Option<StepClock>,
) -> (Result<RunSummary, ExtractError>, CapturedConsole) {
    let mut console = CapturedConsole::new();
    let result = {
        let mut engine = ExtractionEngine::new(&mut console, options);
        if let Some(clock) = clock {
            engine = engine.with_clock(clock);
        }
        engine.run(input, output)
    };
    (result, console)
}

pub fn read_ids(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read output")
        .lines()
        .map(str::to_string)
        .collect()
}
