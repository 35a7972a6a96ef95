//! # Status Line Rendering
//!
//! Formats a [`ProgressSample`] into a single fixed-width line meant to be
//! redrawn in place:
//!
//! ```text
//! Apps: 12 [#################.................] 812.4 KB/sec   (1m 5s)
//! ```
//!
//! The line carries no terminator. Callers pass [`crate::console::LineEnd::InPlace`]
//! alongside it so the console returns the cursor to column zero.

use crate::constants::{
    DEFAULT_STATUS_WIDTH, SPEED_ZONE_WIDTH, STATUS_RESERVED, TIME_ZONE_WIDTH,
};
use crate::progress::ProgressSample;

const FILL_GLYPH: char = '#';
const EMPTY_GLYPH: char = '.';

#[derive(Debug, Clone, Copy)]
pub struct StatusRenderer {
    width: usize,
}

impl Default for StatusRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_WIDTH)
    }
}

impl StatusRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn bar_width(&self) -> usize {
        self.width
            .saturating_sub(SPEED_ZONE_WIDTH + TIME_ZONE_WIDTH + STATUS_RESERVED)
    }

    pub fn render(&self, sample: &ProgressSample) -> String {
        let mut zones = String::with_capacity(self.width);
        zones.push_str(&self.bar(sample.completed_pct));
        zones.push_str(&fit_zone(&format!(" {}", sample.speed), SPEED_ZONE_WIDTH));
        zones.push_str(&fit_zone(&time_zone(sample.eta_seconds), TIME_ZONE_WIDTH));

        format!(
            "Apps: {} {}",
            sample.match_count,
            pad_right(&zones, self.width.saturating_sub(1))
        )
    }

    fn bar(&self, completed_pct: f64) -> String {
        let bar_width = self.bar_width();
        let filled = ((bar_width as f64 * completed_pct / 100.0).round().max(0.0) as usize)
            .min(bar_width);
        let mut bar = String::with_capacity(bar_width + 2);
        bar.push('[');
        bar.extend(std::iter::repeat_n(FILL_GLYPH, filled));
        bar.extend(std::iter::repeat_n(EMPTY_GLYPH, bar_width - filled));
        bar.push(']');
        bar
    }
}

/// Remaining time as `Ns`, `Mm Ss` or `Hh Mm Ss`; empty when unknown or zero.
pub fn format_eta(eta_seconds: Option<u64>) -> String {
    match eta_seconds {
        None | Some(0) => String::new(),
        Some(secs) if secs < 60 => format!("{secs}s"),
        Some(secs) if secs < 3600 => format!("{}m {}s", secs / 60, secs % 60),
        Some(secs) => format!("{}h {}m {}s", secs / 3600, (secs / 60) % 60, secs % 60),
    }
}

fn time_zone(eta_seconds: Option<u64>) -> String {
    let eta = format_eta(eta_seconds);
    if eta.is_empty() {
        eta
    } else {
        format!(" ({eta})")
    }
}

/// Force `text` to exactly `width` characters: keep the leftmost characters
/// when too long, pad with spaces when too short.
pub fn fit_zone(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(width);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}
