use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use framewait_core::{Component, WaitError, WaitForSeconds};

/// How a lifecycle-bound wait ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum WaitOutcome {
    Completed,
    /// The owning component was destroyed mid-wait.
    ExpectedCancellation,
    UnexpectedFailure(WaitError),
}

impl From<Result<(), WaitError>> for WaitOutcome {
    fn from(result: Result<(), WaitError>) -> Self {
        match result {
            Ok(()) => WaitOutcome::Completed,
            Err(WaitError::Cancelled) => WaitOutcome::ExpectedCancellation,
            Err(error) => WaitOutcome::UnexpectedFailure(error),
        }
    }
}

/// Future returned by [`ComponentExt::wait_for_seconds`].
///
/// Always completes with `()`: destruction of the component ends the wait
/// silently and any other failure is logged instead of returned.
#[must_use = "futures do nothing unless `.await`ed or polled"]
pub struct ComponentWait {
    component: String,
    wait: WaitForSeconds,
}

impl Future for ComponentWait {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let result = match Pin::new(&mut self.wait).poll(cx) {
            Poll::Ready(result) => result,
            Poll::Pending => return Poll::Pending,
        };
        match WaitOutcome::from(result) {
            WaitOutcome::Completed | WaitOutcome::ExpectedCancellation => {}
            WaitOutcome::UnexpectedFailure(error) => {
                log::error!("wait_for_seconds on {} failed: {error}", self.component);
            }
        }
        Poll::Ready(())
    }
}

/// Lifecycle-bound waits for any [`Component`].
pub trait ComponentExt: Component {
    /// Suspends for `seconds` of scaled time, ending early and silently
    /// when the component is destroyed.
    fn wait_for_seconds(&self, seconds: f32) -> ComponentWait {
        ComponentWait {
            component: self.name().to_owned(),
            wait: self
                .frame_clock()
                .wait_for_seconds(seconds, self.destroy_cancellation_token()),
        }
    }
}

impl<C: Component + ?Sized> ComponentExt for C {}

/// Free-function form of [`ComponentExt::wait_for_seconds`].
pub fn component_wait_for_seconds<C>(component: &C, seconds: f32) -> ComponentWait
where
    C: Component + ?Sized,
{
    component.wait_for_seconds(seconds)
}

#[cfg(test)]
#[path = "tests/component_tests.rs"]
mod tests;
