//! Stopwatch that measures a solve and turns the measurement into a `Solve`.
//!
//! Instants are plain milliseconds from a monotonic clock: `performance.now()`
//! in the browser, an `Instant` anchored at first use natively. The `*_at`
//! variants take the instant explicitly so callers can drive the watch from
//! their own event timestamps.

use crate::{CubeType, Solve};
use log::{debug, warn};
use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
static CLOCK_ORIGIN: once_cell::sync::Lazy<std::time::Instant> =
    once_cell::sync::Lazy::new(std::time::Instant::now);

/// Current monotonic time in milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    CLOCK_ORIGIN.elapsed().as_secs_f64() * 1000.0
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopwatchState {
    Idle,
    Running { started_at: f64 },
    Stopped { elapsed_ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    AlreadyRunning,
    NotRunning,
    NotStopped,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::AlreadyRunning => write!(f, "Timer is already running"),
            TimerError::NotRunning => write!(f, "Timer is not running"),
            TimerError::NotStopped => write!(f, "No finished measurement to record"),
        }
    }
}

impl std::error::Error for TimerError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stopwatch {
    state: StopwatchState,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: StopwatchState::Idle,
        }
    }

    pub fn state(&self) -> StopwatchState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, StopwatchState::Running { .. })
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        self.start_at(now_ms())
    }

    /// Start timing at `now`. A stopped measurement that was never recorded is discarded.
    pub fn start_at(&mut self, now: f64) -> Result<(), TimerError> {
        if self.is_running() {
            return Err(TimerError::AlreadyRunning);
        }
        if let StopwatchState::Stopped { elapsed_ms } = self.state {
            warn!("Discarding unrecorded measurement of {} ms", elapsed_ms);
        }
        self.state = StopwatchState::Running { started_at: now };
        Ok(())
    }

    pub fn stop(&mut self) -> Result<u32, TimerError> {
        self.stop_at(now_ms())
    }

    /// Stop timing at `now` and return the elapsed whole milliseconds.
    pub fn stop_at(&mut self, now: f64) -> Result<u32, TimerError> {
        let StopwatchState::Running { started_at } = self.state else {
            return Err(TimerError::NotRunning);
        };
        let elapsed_ms = Self::whole_ms(now - started_at);
        debug!("Stopwatch stopped after {} ms", elapsed_ms);
        self.state = StopwatchState::Stopped { elapsed_ms };
        Ok(elapsed_ms)
    }

    /// Elapsed milliseconds as of `now`, for a live display.
    pub fn elapsed_at(&self, now: f64) -> u32 {
        match self.state {
            StopwatchState::Idle => 0,
            StopwatchState::Running { started_at } => Self::whole_ms(now - started_at),
            StopwatchState::Stopped { elapsed_ms } => elapsed_ms,
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed_at(now_ms())
    }

    /// Record the stopped measurement as a new solve and return to idle.
    pub fn finish(
        &mut self,
        cube_type: impl Into<CubeType>,
        scramble: impl Into<String>,
        session: impl Into<String>,
    ) -> Result<Solve, TimerError> {
        let StopwatchState::Stopped { elapsed_ms } = self.state else {
            return Err(TimerError::NotStopped);
        };
        self.state = StopwatchState::Idle;
        Ok(Solve::new(cube_type, elapsed_ms, scramble, session))
    }

    pub fn reset(&mut self) {
        self.state = StopwatchState::Idle;
    }

    fn whole_ms(delta: f64) -> u32 {
        // `as` saturates: negative deltas from a skewed clock become 0
        delta.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SESSION;

    #[test]
    fn test_measures_elapsed_time() {
        let mut watch = Stopwatch::new();
        watch.start_at(1_000.0).unwrap();
        assert!(watch.is_running());
        assert_eq!(watch.elapsed_at(3_500.4), 2_500);
        assert_eq!(watch.stop_at(13_345.9), Ok(12_345));
        assert_eq!(watch.state(), StopwatchState::Stopped { elapsed_ms: 12_345 });
        assert_eq!(watch.elapsed_at(99_999.0), 12_345);
    }

    #[test]
    fn test_misuse_is_reported() {
        let mut watch = Stopwatch::new();
        assert_eq!(watch.stop_at(10.0), Err(TimerError::NotRunning));
        assert_eq!(
            watch.finish("3x3", "R U", DEFAULT_SESSION).unwrap_err(),
            TimerError::NotStopped
        );
        watch.start_at(0.0).unwrap();
        assert_eq!(watch.start_at(5.0), Err(TimerError::AlreadyRunning));
    }

    #[test]
    fn test_finish_builds_solve_and_resets() {
        let mut watch = Stopwatch::new();
        watch.start_at(0.0).unwrap();
        watch.stop_at(8_765.0).unwrap();
        let solve = watch.finish("2x2", "R U F", DEFAULT_SESSION).unwrap();
        assert_eq!(solve.time, 8_765);
        assert_eq!(solve.cube_type, CubeType::TwoByTwo);
        assert_eq!(solve.penalty, None);
        assert_eq!(solve.scramble, "R U F");
        assert_eq!(watch.state(), StopwatchState::Idle);
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let mut watch = Stopwatch::new();
        watch.start_at(500.0).unwrap();
        assert_eq!(watch.stop_at(100.0), Ok(0));
    }

    #[test]
    fn test_platform_clock() {
        let mut watch = Stopwatch::default();
        watch.start().unwrap();
        let elapsed = watch.stop().unwrap();
        assert!(elapsed < 1_000);
        watch.reset();
        assert_eq!(watch.elapsed(), 0);
    }
}
