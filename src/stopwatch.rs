use crate::clock::Clock;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Pausable elapsed-time counter.
///
/// Time accumulated from earlier running windows lives in `baseline`; the
/// current window is measured from `anchor`.
pub struct Stopwatch {
    clock: Arc<dyn Clock>,
    baseline: Duration,
    anchor: Option<Instant>,
}

impl Stopwatch {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            baseline: Duration::ZERO,
            anchor: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start or resume. No-op when already running.
    pub fn start(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.clock.now());
        }
    }

    /// Pause, folding the current window into the baseline.
    pub fn stop(&mut self) {
        if let Some(anchor) = self.anchor.take() {
            let window = self.clock.now().saturating_duration_since(anchor);
            self.baseline = self.baseline.saturating_add(window);
        }
    }

    pub fn reset(&mut self) {
        self.baseline = Duration::ZERO;
        self.anchor = None;
    }

    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    pub fn elapsed(&self) -> Duration {
        match self.anchor {
            Some(anchor) => self
                .baseline
                .saturating_add(self.clock.now().saturating_duration_since(anchor)),
            None => self.baseline,
        }
    }

    /// Read the elapsed time and zero the stopwatch.
    pub fn take(&mut self) -> Duration {
        let elapsed = self.elapsed();
        self.reset();
        elapsed
    }
}

impl std::fmt::Debug for Stopwatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stopwatch")
            .field("elapsed", &self.elapsed())
            .field("running", &self.is_running())
            .finish()
    }
}
