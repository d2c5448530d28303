use crate::cancellation::CancellationToken;
use crate::runtime::RuntimeHandle;
use crate::time::FrameTime;
use crate::wait::WaitForSeconds;
use crate::FrameCallbackId;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Entry point for frame-synchronised work.
///
/// The clock is a cheap handle onto a runtime: it hands out one-shot frame
/// callbacks, the [`NextFrame`] suspension point, and the timing values of
/// the frame currently being processed.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Whether the runtime behind this clock still exists.
    pub fn is_alive(&self) -> bool {
        self.runtime.is_alive()
    }

    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut callback_opt = Some(callback);
        let runtime = self.runtime.clone();
        match runtime.register_frame_callback(move |time| {
            if let Some(callback) = callback_opt.take() {
                callback(time);
            }
        }) {
            Some(id) => FrameCallbackRegistration::new(runtime, id),
            None => FrameCallbackRegistration::inactive(runtime),
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            let millis = nanos / 1_000_000;
            callback(millis);
        })
    }

    /// Suspends the awaiting task until the next frame is drained.
    ///
    /// Resolves with the frame timestamp in nanoseconds.
    pub fn next_frame(&self) -> NextFrame {
        NextFrame::new(self.clone())
    }

    /// Suspends for `seconds` of scaled game time, giving up early with
    /// [`crate::WaitError::Cancelled`] once `token` is cancelled.
    pub fn wait_for_seconds(&self, seconds: f32, token: CancellationToken) -> WaitForSeconds {
        WaitForSeconds::new(self.clone(), seconds, token)
    }

    /// Timing of the frame currently being processed.
    pub fn frame_time(&self) -> FrameTime {
        self.runtime.frame_time().unwrap_or_default()
    }

    /// Real seconds between the previous frame and the current one,
    /// independent of the runtime's time scale.
    pub fn unscaled_delta_time(&self) -> f32 {
        self.frame_time().unscaled_delta_time
    }

    /// Scaled and clamped seconds for the current frame.
    pub fn delta_time(&self) -> f32 {
        self.frame_time().delta_time
    }

    pub fn time(&self) -> f64 {
        self.frame_time().time
    }

    pub fn unscaled_time(&self) -> f64 {
        self.frame_time().unscaled_time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_time().frame_count
    }
}

pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

/// Shared between a [`NextFrame`] and the frame callback it registers.
///
/// The frame-callback drain resolves it through a weak reference, so a
/// dropped `NextFrame` takes its registration down with it.
#[derive(Default)]
struct NextFrameState {
    registration: Option<FrameCallbackRegistration>,
    time: Option<u64>,
    waker: Option<Waker>,
}

impl NextFrameState {
    fn resolve(&mut self, time: u64) {
        self.time = Some(time);
        self.registration = None;
        if let Some(waker) = self.waker.take() {
            waker.wake();
        }
    }
}

/// Future returned by [`FrameClock::next_frame`].
///
/// Registers its frame callback on first poll, so creating one without
/// awaiting it does not request a frame.
#[must_use = "futures do nothing unless `.await`ed or polled"]
pub struct NextFrame {
    clock: FrameClock,
    state: Rc<RefCell<NextFrameState>>,
}

impl NextFrame {
    fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            state: Rc::default(),
        }
    }
}

impl Future for NextFrame {
    type Output = u64;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.borrow_mut();
        if let Some(time) = state.time {
            return Poll::Ready(time);
        }
        state.waker = Some(cx.waker().clone());
        if state.registration.is_some() {
            return Poll::Pending;
        }
        drop(state);

        let weak = Rc::downgrade(&self.state);
        let registration = self.clock.with_frame_nanos(move |time| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().resolve(time);
            }
        });
        self.state.borrow_mut().registration = Some(registration);
        Poll::Pending
    }
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

#[cfg(test)]
#[path = "tests/frame_clock_tests.rs"]
mod tests;
