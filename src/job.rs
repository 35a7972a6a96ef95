use std::path::{Path, PathBuf};
use std::time::Duration;

/// Counters for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    input_path: PathBuf,
    output_path: PathBuf,
    bytes_total: u64,
    bytes_read: u64,
    skip_bytes: u64,
    match_count: u64,
    output_size_bytes: Option<u64>,
}

impl ExtractionJob {
    pub fn new(input_path: &Path, output_path: &Path, bytes_total: u64, skip_bytes: u64) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            bytes_total,
            bytes_read: 0,
            skip_bytes,
            match_count: 0,
            output_size_bytes: None,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn bytes_total(&self) -> u64 {
        self.bytes_total
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn skip_bytes(&self) -> u64 {
        self.skip_bytes
    }

    pub fn match_count(&self) -> u64 {
        self.match_count
    }

    pub fn output_size_bytes(&self) -> Option<u64> {
        self.output_size_bytes
    }

    /// Move the read offset forward. Offsets never go backwards; a file that
    /// grows during the scan raises `bytes_total` to keep `read <= total`.
    pub fn advance_to(&mut self, offset: u64) {
        if offset > self.bytes_read {
            self.bytes_read = offset;
        }
        if self.bytes_read > self.bytes_total {
            self.bytes_total = self.bytes_read;
        }
    }

    pub fn record_match(&mut self) {
        self.match_count += 1;
    }

    pub fn finish(&mut self, output_size_bytes: u64) {
        self.output_size_bytes = Some(output_size_bytes);
    }

    /// Bytes counted toward throughput.
    pub fn measured_bytes(&self) -> u64 {
        self.bytes_read.saturating_sub(self.skip_bytes)
    }

    /// Totals for a finished run. The output size is 0 until `finish` ran.
    pub fn summary(&self, status_renders: u64, elapsed: Duration) -> RunSummary {
        RunSummary {
            match_count: self.match_count,
            output_size_bytes: self.output_size_bytes.unwrap_or(0),
            bytes_read: self.bytes_read,
            bytes_total: self.bytes_total,
            status_renders,
            elapsed,
        }
    }
}

/// Final totals handed back once the input is exhausted.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub match_count: u64,
    pub output_size_bytes: u64,
    pub bytes_read: u64,
    pub bytes_total: u64,
    /// Throttled in-place status renders emitted during the scan.
    pub status_renders: u64,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::ExtractionJob;
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn read_offset_never_goes_backwards() {
        let mut job = ExtractionJob::new(Path::new("in"), Path::new("out"), 100, 0);
        job.advance_to(40);
        job.advance_to(10);
        assert_eq!(job.bytes_read(), 40);
    }

    #[test]
    fn total_grows_with_appended_input() {
        let mut job = ExtractionJob::new(Path::new("in"), Path::new("out"), 10, 0);
        job.advance_to(25);
        assert_eq!(job.bytes_total(), 25);
        assert_eq!(job.bytes_read(), 25);
    }

    #[test]
    fn measured_bytes_excludes_skipped_prefix() {
        let mut job = ExtractionJob::new(Path::new("in"), Path::new("out"), 100, 30);
        job.advance_to(20);
        assert_eq!(job.measured_bytes(), 0);
        job.advance_to(50);
        assert_eq!(job.measured_bytes(), 20);
    }

    #[test]
    fn summary_carries_output_size_after_finish() {
        let mut job = ExtractionJob::new(Path::new("in"), Path::new("out"), 64, 0);
        job.advance_to(64);
        job.record_match();
        assert_eq!(job.output_size_bytes(), None);
        assert_eq!(job.summary(0, Duration::ZERO).output_size_bytes, 0);

        job.finish(17);
        let summary = job.summary(3, Duration::from_secs(2));
        assert_eq!(job.output_size_bytes(), Some(17));
        assert_eq!(summary.output_size_bytes, 17);
        assert_eq!(summary.match_count, 1);
        assert_eq!(summary.bytes_read, 64);
        assert_eq!(summary.status_renders, 3);
    }
}
