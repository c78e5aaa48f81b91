//! Session timer.
//!
//! A wall-clock stopwatch for executing one time block. It does not tick or
//! run threads: the caller passes the current time into every transition and
//! gets back a single reconciled elapsed-minutes figure when the session ends.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Finished
//! ```

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    block_id: String,
    state: TimerState,
    /// Time banked from completed running spans, in seconds.
    banked_secs: i64,
    /// When the current running span began.
    #[serde(default)]
    running_since: Option<NaiveDateTime>,
}

impl SessionTimer {
    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            state: TimerState::Idle,
            banked_secs: 0,
            running_since: None,
        }
    }

    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Elapsed running time as of `now`, pauses excluded.
    pub fn elapsed(&self, now: NaiveDateTime) -> Duration {
        let running = self
            .running_since
            .map(|since| (now - since).max(Duration::zero()))
            .unwrap_or_else(Duration::zero);
        Duration::seconds(self.banked_secs) + running
    }

    pub fn start(&mut self, at: NaiveDateTime) -> Result<(), ValidationError> {
        self.transition(TimerState::Idle, TimerState::Running, "start")?;
        self.running_since = Some(at);
        Ok(())
    }

    pub fn pause(&mut self, at: NaiveDateTime) -> Result<(), ValidationError> {
        self.transition(TimerState::Running, TimerState::Paused, "pause")?;
        self.bank(at);
        Ok(())
    }

    pub fn resume(&mut self, at: NaiveDateTime) -> Result<(), ValidationError> {
        self.transition(TimerState::Paused, TimerState::Running, "resume")?;
        self.running_since = Some(at);
        Ok(())
    }

    /// Stop the session and return the elapsed minutes, rounded to the nearest minute.
    pub fn finish(&mut self, at: NaiveDateTime) -> Result<u32, ValidationError> {
        match self.state {
            TimerState::Running => self.bank(at),
            TimerState::Paused => {}
            _ => return Err(self.invalid("finish")),
        }
        self.state = TimerState::Finished;
        let minutes = (self.banked_secs + 30) / 60;
        Ok(u32::try_from(minutes).unwrap_or(u32::MAX))
    }

    fn bank(&mut self, at: NaiveDateTime) {
        if let Some(since) = self.running_since.take() {
            self.banked_secs += (at - since).num_seconds().max(0);
        }
    }

    fn transition(
        &mut self,
        from: TimerState,
        to: TimerState,
        action: &str,
    ) -> Result<(), ValidationError> {
        if self.state != from {
            return Err(self.invalid(action));
        }
        self.state = to;
        Ok(())
    }

    fn invalid(&self, action: &str) -> ValidationError {
        ValidationError::InvalidValue {
            field: "timer".to_string(),
            message: format!("cannot {action} a {:?} session", self.state).to_lowercase(),
        }
    }
}
