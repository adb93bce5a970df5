//! Polled countdown timer
//!
//! Checked once per frame against the clock; there is no scheduling. A
//! repeating timer restarts itself the moment it fires, so it never idles.

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerState {
    /// Never started, or a one-shot that already fired
    Idle,
    /// Counting since `start`
    Running { start: f64 },
}

/// Countdown used to gate meteor spawns
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    duration: f64,
    repeat: bool,
    state: TimerState,
}

impl SpawnTimer {
    /// Create a timer; with `autostart` it begins counting at `now`
    pub fn new(duration: f64, repeat: bool, autostart: bool, now: f64) -> Self {
        let state = if autostart {
            TimerState::Running { start: now }
        } else {
            TimerState::Idle
        };
        Self {
            duration,
            repeat,
            state,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn repeats(&self) -> bool {
        self.repeat
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// When the current countdown began, if running
    pub fn start_time(&self) -> Option<f64> {
        match self.state {
            TimerState::Running { start } => Some(start),
            TimerState::Idle => None,
        }
    }

    /// (Re)start counting from `now`
    pub fn start(&mut self, now: f64) {
        self.state = TimerState::Running { start: now };
    }

    /// Stop the countdown. Repeating timers restart from `now` instead.
    pub fn stop(&mut self, now: f64) {
        self.state = TimerState::Idle;
        if self.repeat {
            self.start(now);
        }
    }

    /// Poll the timer. Returns true when it fires; the caller performs the
    /// timed action.
    pub fn tick(&mut self, now: f64) -> bool {
        let TimerState::Running { start } = self.state else {
            return false;
        };
        if now - start < self.duration {
            return false;
        }
        self.stop(now);
        true
    }
}
