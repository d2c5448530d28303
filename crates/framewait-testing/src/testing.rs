use framewait_core::{
    FrameClock, Runtime, RuntimeHandle, RuntimeScheduler, TaskHandle, TimeSettings,
};
use std::cell::Cell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Scheduler that only counts frame requests.
#[derive(Debug, Default)]
pub struct TestScheduler {
    requests: AtomicUsize,
}

impl TestScheduler {
    pub fn frame_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl RuntimeScheduler for TestScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// Completion flag for a task started through [`FrameDriver::spawn_tracked`].
#[derive(Clone, Default)]
pub struct Completion {
    done: Rc<Cell<bool>>,
}

impl Completion {
    pub fn is_done(&self) -> bool {
        self.done.get()
    }
}

/// Deterministic frame loop for exercising frame-synchronised code.
///
/// Frames are stamped from an internal clock that only moves when a test
/// advances it, so every delta is exactly the one requested. Construction
/// drains a baseline frame at `t = 0`; work spawned before the first
/// [`advance`](Self::advance) therefore sees an unscaled delta of zero.
pub struct FrameDriver {
    runtime: Runtime,
    scheduler: Arc<TestScheduler>,
    now_nanos: u64,
    frames: usize,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::with_settings(TimeSettings::default())
    }

    pub fn with_settings(settings: TimeSettings) -> Self {
        let scheduler = Arc::new(TestScheduler::default());
        let runtime = Runtime::with_settings(scheduler.clone(), settings);
        runtime.handle().drain_frame_callbacks(0);
        Self {
            runtime,
            scheduler,
            now_nanos: 0,
            frames: 0,
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

    pub fn scheduler(&self) -> Arc<TestScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Number of frames advanced since construction, excluding the baseline.
    pub fn frames_advanced(&self) -> usize {
        self.frames
    }

    /// Spawns `future` and polls it until it suspends or completes.
    pub fn spawn(&self, future: impl Future<Output = ()> + 'static) -> Option<TaskHandle> {
        let handle = self.runtime.handle();
        let task = handle.spawn_ui(future);
        handle.drain_ui();
        task
    }

    /// Like [`spawn`](Self::spawn), returning a flag set once the future
    /// has completed.
    pub fn spawn_tracked(&self, future: impl Future<Output = ()> + 'static) -> Completion {
        let completion = Completion::default();
        let done = Rc::clone(&completion.done);
        self.spawn(async move {
            future.await;
            done.set(true);
        });
        completion
    }

    /// Runs one frame `delta_seconds` after the previous one, then resumes
    /// every task the frame woke.
    pub fn advance(&mut self, delta_seconds: f64) {
        let delta_nanos = (delta_seconds.max(0.0) * NANOS_PER_SECOND).round() as u64;
        self.now_nanos = self.now_nanos.saturating_add(delta_nanos);
        self.frames += 1;
        let handle = self.runtime.handle();
        handle.drain_frame_callbacks(self.now_nanos);
        handle.drain_ui();
    }

    pub fn advance_frames(&mut self, frames: usize, delta_seconds: f64) {
        for _ in 0..frames {
            self.advance(delta_seconds);
        }
    }

    /// Advances frames of `delta_seconds` until `condition` holds.
    ///
    /// Returns the number of frames it took, or `None` if the condition was
    /// still false after `max_frames`.
    pub fn run_until(
        &mut self,
        mut condition: impl FnMut() -> bool,
        delta_seconds: f64,
        max_frames: usize,
    ) -> Option<usize> {
        for frame in 0..=max_frames {
            if condition() {
                return Some(frame);
            }
            if frame < max_frames {
                self.advance(delta_seconds);
            }
        }
        None
    }

    /// Frames needed for `completion` to finish, advancing `delta_seconds`
    /// at a time.
    pub fn frames_until_done(
        &mut self,
        completion: &Completion,
        delta_seconds: f64,
        max_frames: usize,
    ) -> Option<usize> {
        let completion = completion.clone();
        self.run_until(move || completion.is_done(), delta_seconds, max_frames)
    }

    pub fn is_idle(&self) -> bool {
        let handle = self.runtime.handle();
        !handle.has_pending_ui() && !handle.has_frame_callbacks()
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Polls `future` once with a no-op waker.
///
/// Useful to check that an operation completes without ever suspending.
pub fn poll_once<F: Future>(future: F) -> Poll<F::Output> {
    let waker = futures_task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    let future = pin!(future);
    future.poll(&mut cx)
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
