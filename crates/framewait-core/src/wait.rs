use crate::cancellation::CancellationToken;
use crate::frame_clock::{FrameClock, NextFrame};
use crate::WaitError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future returned by [`FrameClock::wait_for_seconds`].
///
/// Accumulates the scaled delta of every frame it resumes on. Cancellation
/// is checked on every poll, so a cancelled token ends the wait on the next
/// drain even when no frame has elapsed.
#[must_use = "futures do nothing unless `.await`ed or polled"]
pub struct WaitForSeconds {
    clock: FrameClock,
    seconds: f32,
    elapsed: f32,
    token: CancellationToken,
    frame: Option<NextFrame>,
}

impl WaitForSeconds {
    pub(crate) fn new(clock: FrameClock, seconds: f32, token: CancellationToken) -> Self {
        Self {
            clock,
            seconds,
            elapsed: 0.0,
            token,
            frame: None,
        }
    }

    /// Scaled seconds accumulated so far.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Future for WaitForSeconds {
    type Output = Result<(), WaitError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Every field is Unpin.
        let this = self.get_mut();

        if this.token.is_cancelled() {
            this.frame = None;
            return Poll::Ready(Err(WaitError::Cancelled));
        }
        if this.seconds.is_nan() {
            return Poll::Ready(Err(WaitError::InvalidDuration(this.seconds)));
        }

        loop {
            if this.elapsed >= this.seconds {
                return Poll::Ready(Ok(()));
            }
            if !this.clock.is_alive() {
                this.frame = None;
                return Poll::Ready(Err(WaitError::RuntimeDropped));
            }

            let clock = &this.clock;
            let frame = this.frame.get_or_insert_with(|| clock.next_frame());
            match Pin::new(frame).poll(cx) {
                Poll::Ready(_) => {
                    this.frame = None;
                    this.elapsed += this.clock.delta_time();
                }
                Poll::Pending => {
                    this.token.register_waker(cx.waker());
                    return Poll::Pending;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/wait_tests.rs"]
mod tests;
