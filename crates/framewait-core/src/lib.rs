#![doc = r"Frame loop runtime: tasks, frame callbacks, frame timing and cancellation."]

pub mod cancellation;
pub mod frame_clock;
pub mod lifecycle;
pub mod platform;
pub mod runtime;
pub mod time;
pub mod wait;

pub use cancellation::{CancellationToken, Cancelled};
pub use frame_clock::{FrameCallbackRegistration, FrameClock, NextFrame};
pub use lifecycle::{Component, ComponentScope};
pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle, TaskHandle};
pub use time::{FrameTime, TimeSettings};
pub use wait::WaitForSeconds;

#[cfg(test)]
pub use runtime::{TestRuntime, TestScheduler};

pub(crate) type FrameCallbackId = u64;

/// Failure of a timed wait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaitError {
    /// The cancellation token tied to the wait fired before it elapsed.
    Cancelled,
    /// The requested duration is not a number.
    InvalidDuration(f32),
    /// The runtime driving the wait was dropped.
    RuntimeDropped,
}

impl WaitError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, WaitError::Cancelled)
    }
}

impl std::fmt::Display for WaitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaitError::Cancelled => write!(f, "wait cancelled"),
            WaitError::InvalidDuration(seconds) => {
                write!(f, "invalid wait duration {seconds}")
            }
            WaitError::RuntimeDropped => write!(f, "runtime dropped during wait"),
        }
    }
}

impl std::error::Error for WaitError {}
