//! Rest timer between sets.
//!
//! The timer is a plain state machine advanced by [`RestTimer::tick`]. It owns
//! no thread; the front-end ticks it once per elapsed second while it is
//! running and simply stops ticking on pause, reset or teardown.

use crate::notify::{notify_best_effort, Notifier};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Selectable rest durations in seconds
pub const REST_DURATIONS: [u32; 6] = [30, 45, 60, 90, 120, 180];

pub const DEFAULT_REST_SECONDS: u32 = 90;

const FINISHED_TITLE: &str = "Rest is over!";
const FINISHED_BODY: &str = "Ready for the next set?";

/// Rest timer state
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestTimer {
    duration: u32,
    time_left: u32,
    state: TimerState,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self {
            duration: DEFAULT_REST_SECONDS,
            time_left: DEFAULT_REST_SECONDS,
            state: TimerState::Idle,
        }
    }
}

/// Reject durations outside [`REST_DURATIONS`]
pub fn validate_duration(seconds: u32) -> Result<()> {
    if REST_DURATIONS.contains(&seconds) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "rest duration must be one of {:?} seconds, got {}",
            REST_DURATIONS, seconds
        )))
    }
}

impl RestTimer {
    pub fn new(duration: u32) -> Result<Self> {
        validate_duration(duration)?;
        Ok(Self {
            duration,
            time_left: duration,
            state: TimerState::Idle,
        })
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == TimerState::Finished
    }

    /// Start a fresh countdown from the configured duration
    pub fn start(&mut self, notifier: &mut dyn Notifier) {
        self.time_left = self.duration;
        self.state = TimerState::Running;
        if !notifier.request_permission() {
            tracing::debug!("Notification permission not granted");
        }
        tracing::debug!("Rest timer started ({}s)", self.duration);
    }

    /// Halt the countdown, keeping the remaining time
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Continue a paused countdown
    pub fn resume(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
        }
    }

    /// Halt and restore the full duration
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.time_left = self.duration;
    }

    /// Change the configured duration
    ///
    /// A running countdown keeps going; otherwise the remaining time jumps to
    /// the new duration.
    pub fn set_duration(&mut self, seconds: u32) -> Result<()> {
        validate_duration(seconds)?;
        self.duration = seconds;
        match self.state {
            TimerState::Running => {}
            TimerState::Paused => {
                self.state = TimerState::Idle;
                self.time_left = seconds;
            }
            TimerState::Idle | TimerState::Finished => self.time_left = seconds,
        }
        Ok(())
    }

    /// Advance one second; returns the state after the tick
    pub fn tick(&mut self, notifier: &mut dyn Notifier) -> TimerState {
        if self.state != TimerState::Running {
            return self.state;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.state = TimerState::Finished;
            tracing::info!("Rest timer finished");
            notify_best_effort(notifier, FINISHED_TITLE, FINISHED_BODY);
        }
        self.state
    }
}

/// Format seconds as `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
