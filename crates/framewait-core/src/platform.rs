//! Platform abstraction traits for the frame loop.
//!
//! These traits let the runtime delegate frame scheduling and time keeping
//! to whatever host drives it, so the core never reads wall-clock time or
//! spins an event loop itself.

/// Schedules frames for the runtime.
///
/// Implementations are responsible for making the host run another frame
/// (drain frame callbacks, then poll tasks). They must be safe to use from
/// multiple threads because task wakers hold on to them.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information used to stamp frames.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}
