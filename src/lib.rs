//! # appid-extract
//!
//! Streams a large text or HTML dump, pulls out every Play Store application
//! id it finds and writes them one per line, while redrawing a fixed-width
//! progress line with throughput and remaining time.

pub mod cli;
pub mod clock;
pub mod config;
pub mod console;
pub mod constants;
pub mod engine;
pub mod error;
pub mod job;
pub mod logging;
pub mod markup;
pub mod matcher;
pub mod progress;
pub mod render;
