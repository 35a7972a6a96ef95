//! # Extraction Engine
//!
//! Streams the input line by line, writes every matched id to the output and
//! redraws the status line at most once per elapsed second. A run is
//! single-threaded and blocking; the only exits are end of input or a fatal
//! I/O error.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::clock::{Clock, Stopwatch};
use crate::config::Config;
use crate::console::{Console, LineEnd};
use crate::constants::{DEFAULT_STATUS_WIDTH, READ_BUFFER_SIZE, WRITE_BUFFER_SIZE};
use crate::error::{ExtractError, IoOp};
use crate::job::{ExtractionJob, RunSummary};
use crate::matcher::PatternMatcher;
use crate::progress::ProgressState;
use crate::render::StatusRenderer;

#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub status_width: usize,
    pub skip_bytes: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            status_width: DEFAULT_STATUS_WIDTH,
            skip_bytes: 0,
        }
    }
}

impl From<&Config> for EngineOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            status_width: cfg.status_width,
            skip_bytes: cfg.skip_bytes,
        }
    }
}

pub struct ExtractionEngine<'a> {
    matcher: PatternMatcher,
    renderer: StatusRenderer,
    skip_bytes: u64,
    clock: Box<dyn Clock + 'a>,
    console: &'a mut dyn Console,
}

impl<'a> ExtractionEngine<'a> {
    pub fn new(console: &'a mut dyn Console, options: EngineOptions) -> Self {
        Self {
            matcher: PatternMatcher::new(),
            renderer: StatusRenderer::new(options.status_width),
            skip_bytes: options.skip_bytes,
            clock: Box::new(Stopwatch::new()),
            console,
        }
    }

    /// Replace the wall clock, e.g. with a scripted one in tests.
    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Scan `input_path` and write every id found to `output_path`.
    ///
    /// The input is opened before the output is touched, so a missing input
    /// leaves an existing output file as it was.
    pub fn run(&mut self, input_path: &Path, output_path: &Path) -> Result<RunSummary, ExtractError> {
        let (reader, bytes_total) = open_input(input_path)?;

        self.console.message(
            &format!("Reading file: <c:DarkCyan>{}", input_path.display()),
            LineEnd::Newline,
        );
        self.console.message(
            &format!("File size   : <c:DarkCyan>{bytes_total}"),
            LineEnd::Newline,
        );

        let mut writer = create_output(output_path)?;
        let mut job = ExtractionJob::new(input_path, output_path, bytes_total, self.skip_bytes);
        let mut progress = ProgressState::new();
        info!(
            "scanning input={} output={} bytes_total={} skip_bytes={}",
            job.input_path().display(),
            job.output_path().display(),
            job.bytes_total(),
            job.skip_bytes()
        );

        self.clock.start();
        let status_renders = self.scan(reader, &mut writer, &mut job, &mut progress)?;

        let file = writer
            .into_inner()
            .map_err(|err| ExtractError::io(IoOp::Flush, output_path, err.into_error()))?;
        let output_size_bytes = file
            .metadata()
            .map_err(|err| ExtractError::io(IoOp::Flush, output_path, err))?
            .len();
        drop(file);
        job.finish(output_size_bytes);

        let elapsed = self.clock.elapsed();
        let summary = job.summary(status_renders, elapsed);
        let final_sample = progress.sample(&job, elapsed);
        self.console
            .message(&self.renderer.render(&final_sample), LineEnd::Newline);
        self.console.message(
            &format!(
                "Done. Saved results in <c:DarkCyan>{}</c>. Found apps: <c:Magenta>{}</c> File size: <c:Magenta>{}",
                output_path.display(),
                summary.match_count,
                summary.output_size_bytes
            ),
            LineEnd::Newline,
        );
        info!(
            "scan finished matches={} bytes_read={} output_bytes={} renders={}",
            summary.match_count,
            summary.bytes_read,
            summary.output_size_bytes,
            summary.status_renders
        );

        Ok(summary)
    }

    /// Returns the number of throttled status renders.
    fn scan<R: BufRead, W: Write>(
        &mut self,
        mut reader: R,
        writer: &mut W,
        job: &mut ExtractionJob,
        progress: &mut ProgressState,
    ) -> Result<u64, ExtractError> {
        let mut buf = Vec::with_capacity(4096);
        let mut offset = 0u64;
        let mut last_step = 0u64;
        let mut renders = 0u64;

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|err| ExtractError::io(IoOp::Read, job.input_path(), err))?;
            if n == 0 {
                break;
            }
            offset += n as u64;
            job.advance_to(offset);

            let line = String::from_utf8_lossy(strip_line_end(&buf));
            // A lone `\r` also ends a line.
            for part in line.split('\r') {
                for id in self.matcher.extract(part) {
                    writer
                        .write_all(id.as_bytes())
                        .and_then(|_| writer.write_all(b"\n"))
                        .map_err(|err| ExtractError::io(IoOp::Write, job.output_path(), err))?;
                    job.record_match();
                }
            }

            let elapsed = self.clock.elapsed();
            let step = elapsed.as_secs();
            if step != last_step {
                last_step = step;
                let sample = progress.sample(job, elapsed);
                debug!(
                    "progress bytes_read={} pct={:.1} matches={}",
                    job.bytes_read(),
                    sample.completed_pct,
                    sample.match_count
                );
                self.console
                    .message(&self.renderer.render(&sample), LineEnd::InPlace);
                renders += 1;
            }
        }

        Ok(renders)
    }
}

fn open_input(path: &Path) -> Result<(BufReader<File>, u64), ExtractError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ExtractError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => ExtractError::io(IoOp::OpenInput, path, err),
    })?;
    let metadata = file
        .metadata()
        .map_err(|err| ExtractError::io(IoOp::OpenInput, path, err))?;
    if metadata.is_dir() {
        return Err(ExtractError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok((BufReader::with_capacity(READ_BUFFER_SIZE, file), metadata.len()))
}

fn create_output(path: &Path) -> Result<BufWriter<File>, ExtractError> {
    let file = File::create(path).map_err(|err| ExtractError::io(IoOp::CreateOutput, path, err))?;
    Ok(BufWriter::with_capacity(WRITE_BUFFER_SIZE, file))
}

fn strip_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::{EngineOptions, ExtractionEngine, strip_line_end};
    use crate::clock::Clock;
    use crate::console::CapturedConsole;
    use crate::error::ExtractError;
    use std::cell::Cell;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    /// Advances a fixed step every time it is read.
    struct StepClock {
        now: Cell<Duration>,
        step: Duration,
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

    #[test]
    fn strips_lf_and_crlf() {
        assert_eq!(strip_line_end(b"abc\r\n"), b"abc");
        assert_eq!(strip_line_end(b"abc\n"), b"abc");
        assert_eq!(strip_line_end(b"abc"), b"abc");
        assert_eq!(strip_line_end(b"\r\n"), b"");
    }

    #[test]
    fn writes_ids_in_discovery_order() {
        let dir = tempdir().expect("tempdir");
        let input = dir.path().join("page.html");
        let output = dir.path().join("ids.txt");
        fs::write(
            &input,
            "<a href=\"/store/apps/details?id=b.two\" title=\"B\"><a href=\"/store/apps/details?id=a.one\" title=\"A\">\nnoise\n",
        )
        .expect("write input");

        let mut console = CapturedConsole::new();
        let summary = ExtractionEngine::new(&mut console, EngineOptions::default())
            .run(&input, &output)
            .expect("run");

        assert_eq!(summary.match_count, 2);
        assert_eq!(fs::read_to_string(&output).expect("read"), "b.two\na.one\n");
        assert_eq!(summary.output_size_bytes, 12);
    }

    #[test]
    fn renders_once_per_elapsed_second() {
        let dir = tempdir().expect("tempdir");
        let input = dir.path().join("lines.txt");
        let output = dir.path().join("ids.txt");
        fs::write(&input, "line\n".repeat(100)).expect("write input");

        let mut console = CapturedConsole::new();
        let clock = StepClock {
            now: Cell::new(Duration::ZERO),
            step: Duration::from_millis(300),
        };
        let summary = ExtractionEngine::new(&mut console, EngineOptions::default())
            .with_clock(clock)
            .run(&input, &output)
            .expect("run");

        // 100 lines at 300ms per line crosses 30 second boundaries.
        assert_eq!(summary.status_renders, 30);
        assert_eq!(console.in_place().count(), 30);
        assert!(summary.status_renders <= summary.elapsed.as_secs());
    }

    #[test]
    fn no_render_within_first_second() {
        let dir = tempdir().expect("tempdir");
        let input = dir.path().join("lines.txt");
        let output = dir.path().join("ids.txt");
        fs::write(&input, "line\n".repeat(50)).expect("write input");

        let mut console = CapturedConsole::new();
        let clock = StepClock {
            now: Cell::new(Duration::ZERO),
            step: Duration::from_millis(1),
        };
        let summary = ExtractionEngine::new(&mut console, EngineOptions::default())
            .with_clock(clock)
            .run(&input, &output)
            .expect("run");

        assert_eq!(summary.status_renders, 0);
        assert_eq!(console.in_place().count(), 0);
    }

    #[test]
    fn directory_input_is_not_found() {
        let dir = tempdir().expect("tempdir");
        let mut console = CapturedConsole::new();
        let err = ExtractionEngine::new(&mut console, EngineOptions::default())
            .run(dir.path(), &dir.path().join("ids.txt"))
            .expect_err("should fail");
        assert!(matches!(err, ExtractError::InputNotFound { .. }));
        assert!(!dir.path().join("ids.txt").exists());
    }

    #[test]
    fn status_line_counts_matches_on_the_rendered_line() {
        let dir = tempdir().expect("tempdir");
        let input = dir.path().join("one.html");
        let output = dir.path().join("ids.txt");
        fs::write(
            &input,
            "<a href=\"/store/apps/details?id=com.only\" title=\"Only\">\n",
        )
        .expect("write input");

        let mut console = CapturedConsole::new();
        let clock = StepClock {
            now: Cell::new(Duration::ZERO),
            step: Duration::from_millis(1000),
        };
        let summary = ExtractionEngine::new(&mut console, EngineOptions::default())
            .with_clock(clock)
            .run(&input, &output)
            .expect("run");

        assert_eq!(summary.status_renders, 1);
        let status: Vec<_> = console.in_place().map(|l| l.text()).collect();
        assert_eq!(status.len(), 1);
        assert!(status[0].starts_with("Apps: 1 "), "{}", status[0]);
    }

    #[test]
    fn bare_carriage_return_splits_lines() {
        let dir = tempdir().expect("tempdir");
        let input = dir.path().join("cr.html");
        let output = dir.path().join("ids.txt");
        fs::write(
            &input,
            "<a href=\"/store/apps/details?id=com.nottitle\" x\r y title=\"Z\">\r<a href=\"/store/apps/details?id=com.ok\" title=\"Ok\">\r",
        )
        .expect("write input");

        let mut console = CapturedConsole::new();
        let summary = ExtractionEngine::new(&mut console, EngineOptions::default())
            .run(&input, &output)
            .expect("run");

        assert_eq!(summary.match_count, 1);
        assert_eq!(fs::read_to_string(&output).expect("read"), "com.ok\n");
        assert_eq!(summary.bytes_read, summary.bytes_total);
    }
}
