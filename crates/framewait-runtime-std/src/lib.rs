//! Standard host for the framewait runtime.
//!
//! [`StdRuntime`] pairs a [`framewait_core::Runtime`] with a scheduler that
//! records frame requests and a monotonic clock, and drives frames on the
//! calling thread. Terminal programs and tools that have no event loop of
//! their own use it to run gameplay tasks to completion.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use web_time::Instant;

use framewait_core::{
    Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler, TaskHandle, TimeSettings,
};

type FrameWaker = Arc<dyn Fn() + Send + Sync + 'static>;

/// Scheduler that records frame requests and forwards them to an optional
/// host waker.
pub struct StdScheduler {
    frame_requested: AtomicBool,
    frame_waker: RwLock<Option<FrameWaker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            frame_requested: AtomicBool::new(false),
            frame_waker: RwLock::new(None),
        }
    }

    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }

    /// Registers a waker that will be invoked whenever a new frame is scheduled.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.replace_waker(Some(Arc::new(waker)));
    }

    /// Clears any registered frame waker.
    pub fn clear_frame_waker(&self) {
        self.replace_waker(None);
    }

    fn replace_waker(&self, waker: Option<FrameWaker>) {
        match self.frame_waker.write() {
            Ok(mut slot) => *slot = waker,
            Err(poisoned) => {
                log::warn!("frame waker lock poisoned; replacing waker anyway");
                *poisoned.into_inner() = waker;
            }
        }
    }

    fn wake(&self) {
        let waker = match self.frame_waker.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if let Some(waker) = waker {
            waker();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field(
                "frame_requested",
                &self.frame_requested.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
        self.wake();
    }
}

/// Monotonic clock backed by [`web_time::Instant`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

impl StdClock {
    /// Returns the elapsed time as a [`Duration`] for convenience.
    pub fn elapsed(&self, since: Instant) -> Duration {
        since.elapsed()
    }
}

/// A [`Runtime`] driven on the current thread with wall-clock frame stamps.
///
/// Frame timestamps are measured from the moment the runtime was created.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: Arc<StdClock>,
    runtime: Runtime,
    started: Instant,
}

impl StdRuntime {
    /// Creates a new standard runtime instance.
    pub fn new() -> Self {
        Self::with_settings(TimeSettings::default())
    }

    pub fn with_settings(settings: TimeSettings) -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::with_settings(scheduler.clone(), settings);
        let clock = Arc::new(StdClock);
        let started = clock.now();
        Self {
            scheduler,
            clock,
            runtime,
            started,
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn clock(&self) -> Arc<StdClock> {
        Arc::clone(&self.clock)
    }

    /// Spawns `future` and polls it up to its first suspension point.
    pub fn spawn<F>(&self, future: F) -> Option<TaskHandle>
    where
        F: Future<Output = ()> + 'static,
    {
        let handle = self.runtime_handle();
        let task = handle.spawn_ui(future);
        handle.drain_ui();
        task
    }

    /// Returns whether a frame was requested since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    /// Registers a waker to be called when the runtime schedules a new frame.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    /// Clears any previously registered frame waker.
    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }

    /// Drains pending frame callbacks using the provided frame timestamp in nanoseconds.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.runtime_handle()
            .drain_frame_callbacks(frame_time_nanos);
    }

    /// Runs one frame stamped with the current time: frame callbacks first,
    /// then every task that became ready.
    ///
    /// Returns whether work is still pending afterwards.
    pub fn pump_frame(&self) -> bool {
        let now = self.clock.elapsed_nanos(self.started);
        self.take_frame_request();
        let handle = self.runtime_handle();
        handle.drain_frame_callbacks(now);
        handle.drain_ui();
        self.has_pending_work()
    }

    /// Whether any task or frame callback is still outstanding.
    pub fn has_pending_work(&self) -> bool {
        let handle = self.runtime_handle();
        handle.has_pending_ui() || handle.has_frame_callbacks()
    }

    /// Pumps frames `frame_interval` apart until no work is pending or
    /// `max_frames` frames have run. Returns the number of frames run.
    pub fn run_until_idle(&self, frame_interval: Duration, max_frames: usize) -> usize {
        self.runtime_handle().drain_ui();
        let mut frames = 0;
        while frames < max_frames && self.has_pending_work() {
            if !frame_interval.is_zero() {
                std::thread::sleep(frame_interval);
            }
            self.pump_frame();
            frames += 1;
        }
        if frames == max_frames && self.has_pending_work() {
            log::debug!("run_until_idle stopped after {max_frames} frames with work pending");
        }
        frames
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
