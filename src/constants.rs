//! Shared constants for the extraction engine and status rendering.

/// Output file name used when neither the CLI nor the config names one.
pub const DEFAULT_OUTPUT_FILE: &str = "AppIdExtract.out";

/// Default total width of the status line.
pub const DEFAULT_STATUS_WIDTH: usize = 64;

/// Smallest status width that still leaves room for a progress bar.
pub const MIN_STATUS_WIDTH: usize = 40;

/// Fixed width of the speed zone.
pub const SPEED_ZONE_WIDTH: usize = 15;

/// Fixed width of the remaining-time zone.
pub const TIME_ZONE_WIDTH: usize = 12;

/// Characters reserved for the bar brackets plus the trailing column.
pub const STATUS_RESERVED: usize = 3;

/// Speed (KB/s) above which throughput is shown in MB/s.
pub const MB_THRESHOLD_KIB: f64 = 1024.0;

pub const READ_BUFFER_SIZE: usize = 1024 * 1024;
pub const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Console width assumed when the terminal size cannot be queried.
pub const FALLBACK_CONSOLE_WIDTH: usize = 80;
