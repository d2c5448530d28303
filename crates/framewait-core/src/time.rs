//! Per-frame time bookkeeping.

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Runtime-wide time configuration.
///
/// Only the scaled delta is affected by these values; the unscaled delta is
/// always the raw time between two drained frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSettings {
    /// Multiplier applied to the scaled delta. `0.0` pauses scaled time.
    pub time_scale: f32,
    /// Upper bound for a single frame's scaled delta, in seconds.
    pub maximum_delta_time: f32,
}

impl TimeSettings {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_maximum_delta_time(mut self, maximum_delta_time: f32) -> Self {
        self.maximum_delta_time = maximum_delta_time;
        self
    }

    /// Returns `true` when a time scale can be applied to the runtime.
    pub fn is_valid_time_scale(time_scale: f32) -> bool {
        time_scale.is_finite() && time_scale >= 0.0
    }
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            maximum_delta_time: 1.0 / 3.0,
        }
    }
}

/// Snapshot of the timing values for the frame currently being processed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous drained frame, unaffected by time scaling.
    pub unscaled_delta_time: f32,
    /// Clamped and scaled delta for the current frame.
    pub delta_time: f32,
    /// Total unscaled seconds accumulated across drained frames.
    pub unscaled_time: f64,
    /// Total scaled seconds accumulated across drained frames.
    pub time: f64,
    /// Number of frames drained so far.
    pub frame_count: u64,
}

#[derive(Debug, Default)]
pub(crate) struct FrameTimer {
    settings: TimeSettings,
    last_frame_nanos: Option<u64>,
    current: FrameTime,
}

impl FrameTimer {
    pub(crate) fn new(settings: TimeSettings) -> Self {
        Self {
            settings,
            last_frame_nanos: None,
            current: FrameTime::default(),
        }
    }

    pub(crate) fn settings(&self) -> TimeSettings {
        self.settings
    }

    pub(crate) fn set_time_scale(&mut self, time_scale: f32) {
        self.settings.time_scale = time_scale;
    }

    pub(crate) fn current(&self) -> FrameTime {
        self.current
    }

    /// Advances the timer to `frame_time_nanos` and returns the new snapshot.
    pub(crate) fn begin_frame(&mut self, frame_time_nanos: u64) -> FrameTime {
        let elapsed_nanos = match self.last_frame_nanos {
            Some(last) => frame_time_nanos.saturating_sub(last),
            None => 0,
        };
        // A timestamp going backwards must not rewind the accumulators.
        if self.last_frame_nanos.map_or(true, |last| frame_time_nanos >= last) {
            self.last_frame_nanos = Some(frame_time_nanos);
        }

        let unscaled = (elapsed_nanos as f64 / NANOS_PER_SECOND) as f32;
        let scaled = unscaled.min(self.settings.maximum_delta_time.max(0.0)) * self.settings.time_scale;

        let current = &mut self.current;
        current.unscaled_delta_time = unscaled;
        current.delta_time = scaled;
        current.unscaled_time += unscaled as f64;
        current.time += scaled as f64;
        current.frame_count += 1;
        *current
    }
}

#[cfg(test)]
#[path = "tests/time_tests.rs"]
mod tests;
