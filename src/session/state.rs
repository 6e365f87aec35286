use super::handshake::Handshake;
use crate::clock::Clock;
use crate::error::AppError;
use crate::safe_lock;
use crate::stopwatch::Stopwatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionMode {
    /// Distractions pause the session until the user decides.
    #[default]
    Focus,
    /// Distractions are timed but never interrupt.
    Casual,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Focus => f.write_str("focus"),
            SessionMode::Casual => f.write_str("casual"),
        }
    }
}

impl FromStr for SessionMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(SessionMode::Focus),
            "casual" => Ok(SessionMode::Casual),
            other => Err(AppError::InvalidInput {
                field: "mode",
                reason: format!("'{other}' is not one of: focus, casual"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running(SessionMode),
    /// Focus session paused on a distraction prompt.
    Resolving,
}

/// Live state of one session. Created on start, dropped once the session
/// has been settled and its monitoring thread joined.
#[derive(Debug)]
pub struct SessionState {
    mode: SessionMode,
    running: AtomicBool,
    elapsed: Mutex<Stopwatch>,
    distraction: Mutex<Stopwatch>,
    handshake: Arc<Handshake>,
}

impl SessionState {
    /// Create the state with the elapsed timer already running.
    pub fn begin(mode: SessionMode, clock: &Arc<dyn Clock>) -> Self {
        let mut elapsed = Stopwatch::new(Arc::clone(clock));
        elapsed.restart();

        Self {
            mode,
            running: AtomicBool::new(true),
            elapsed: Mutex::new(elapsed),
            distraction: Mutex::new(Stopwatch::new(Arc::clone(clock))),
            handshake: Arc::new(Handshake::new()),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Clear the running flag. Returns whether it was still set.
    pub fn request_stop(&self) -> bool {
        self.running.swap(false, Ordering::SeqCst)
    }

    pub fn handshake(&self) -> &Arc<Handshake> {
        &self.handshake
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.is_running() {
            SessionPhase::Idle
        } else if self.handshake.is_pending() {
            SessionPhase::Resolving
        } else {
            SessionPhase::Running(self.mode)
        }
    }

    pub fn pause_elapsed(&self) {
        safe_lock(&self.elapsed, "Elapsed timer").stop();
    }

    pub fn resume_elapsed(&self) {
        safe_lock(&self.elapsed, "Elapsed timer").start();
    }

    pub fn start_distraction(&self) {
        safe_lock(&self.distraction, "Distraction timer").start();
    }

    pub fn stop_distraction(&self) {
        safe_lock(&self.distraction, "Distraction timer").stop();
    }

    pub fn elapsed(&self) -> Duration {
        safe_lock(&self.elapsed, "Elapsed timer").elapsed()
    }

    pub fn distracted(&self) -> Duration {
        safe_lock(&self.distraction, "Distraction timer").elapsed()
    }

    /// Read and reset both timers: `(elapsed, distracted)`.
    pub fn capture(&self) -> (Duration, Duration) {
        let elapsed = safe_lock(&self.elapsed, "Elapsed timer").take();
        let distracted = safe_lock(&self.distraction, "Distraction timer").take();
        (elapsed, distracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Decision;
    use crate::test_utils::ManualClock;

    fn setup(mode: SessionMode) -> (Arc<ManualClock>, SessionState) {
        let clock = Arc::new(ManualClock::new());
        let shared: Arc<dyn Clock> = Arc::<ManualClock>::clone(&clock);
        (clock, SessionState::begin(mode, &shared))
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("focus".parse::<SessionMode>().unwrap(), SessionMode::Focus);
        assert_eq!(" Casual ".parse::<SessionMode>().unwrap(), SessionMode::Casual);
        assert!("relaxed".parse::<SessionMode>().is_err());
    }

    #[test]
    fn test_begin_starts_running() {
        let (clock, state) = setup(SessionMode::Focus);
        clock.advance(Duration::from_secs(12));

        assert!(state.is_running());
        assert_eq!(state.phase(), SessionPhase::Running(SessionMode::Focus));
        assert_eq!(state.elapsed(), Duration::from_secs(12));
        assert_eq!(state.distracted(), Duration::ZERO);
    }

    #[test]
    fn test_phase_follows_handshake() {
        let (_clock, state) = setup(SessionMode::Focus);

        state.handshake().raise();
        assert_eq!(state.phase(), SessionPhase::Resolving);

        state.handshake().resolve(Decision::Resume);
        state.handshake().wait();
        assert_eq!(state.phase(), SessionPhase::Running(SessionMode::Focus));
    }

    #[test]
    fn test_request_stop_only_once() {
        let (_clock, state) = setup(SessionMode::Casual);

        assert!(state.request_stop());
        assert!(!state.request_stop());
        assert_eq!(state.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_capture_resets_timers() {
        let (clock, state) = setup(SessionMode::Casual);
        clock.advance(Duration::from_secs(30));
        state.start_distraction();
        clock.advance(Duration::from_secs(15));
        state.stop_distraction();

        assert_eq!(
            state.capture(),
            (Duration::from_secs(45), Duration::from_secs(15))
        );
        assert_eq!(state.capture(), (Duration::ZERO, Duration::ZERO));
    }
}
