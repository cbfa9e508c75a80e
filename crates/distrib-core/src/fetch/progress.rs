//! Transfer progress line (bytes done, rate, ETA) printed to stderr.

use std::io::Write;
use std::time::{Duration, Instant};

const PRINT_INTERVAL: Duration = Duration::from_millis(500);
const MIB: f64 = 1_048_576.0;

/// Throttled single-line progress display for one transfer.
#[derive(Debug)]
pub struct TransferProgress {
    label: String,
    started: Instant,
    last_print: Option<Instant>,
    printed: bool,
}

impl TransferProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            started: Instant::now(),
            last_print: None,
            printed: false,
        }
    }

    /// Called from curl's progress callback; prints at most every 500ms.
    pub fn update(&mut self, done: u64, total: u64) {
        let now = Instant::now();
        let due = self
            .last_print
            .map_or(true, |t| now.duration_since(t) >= PRINT_INTERVAL);
        if !due || done == 0 {
            return;
        }
        self.last_print = Some(now);
        self.printed = true;
        let line = render(&self.label, done, total, now.duration_since(self.started));
        let mut err = std::io::stderr().lock();
        let _ = write!(err, "\r{}", line);
        let _ = err.flush();
    }

    /// Ends the progress line, if one was started.
    pub fn finish(&self) {
        if self.printed {
            eprintln!();
        }
    }
}

fn render(label: &str, done: u64, total: u64, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 { done as f64 / secs } else { 0.0 };
    if total == 0 {
        return format!(
            "  {}: {:.1} MiB  {:.2} MiB/s  ",
            label,
            done as f64 / MIB,
            rate / MIB
        );
    }
    let pct = (done as f64 / total as f64 * 100.0).min(100.0);
    let eta = if rate > 0.0 {
        format!("{:.0}s", total.saturating_sub(done) as f64 / rate)
    } else {
        "?".to_string()
    };
    format!(
        "  {}: {:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ETA {}  ",
        label,
        done as f64 / MIB,
        total as f64 / MIB,
        pct,
        rate / MIB,
        eta
    )
}
