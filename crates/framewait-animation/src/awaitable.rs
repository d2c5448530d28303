//! Frame-synchronised waits and interpolations.
//!
//! Every helper is an `async fn` that suspends only at
//! [`FrameClock::next_frame`]. Between two suspension points the helper
//! runs synchronously, so predicates and update callbacks always execute
//! on the runtime thread, once per resumed frame.
//!
//! None of the helpers cancel themselves: a predicate that never flips or a
//! non-positive speed keeps the task suspended until the host drops it.

use framewait_core::FrameClock;
use framewait_graphics::Color;

use crate::easing::Easing;
use crate::lerp::Lerp;
use crate::playback::Playback;

/// Suspends until `condition` returns `true`.
///
/// Completes without suspending when the condition already holds.
pub async fn wait_until(clock: &FrameClock, mut condition: impl FnMut() -> bool) {
    while !condition() {
        clock.next_frame().await;
    }
}

/// Suspends while `condition` returns `true`.
pub async fn wait_while(clock: &FrameClock, mut condition: impl FnMut() -> bool) {
    while condition() {
        clock.next_frame().await;
    }
}

/// Suspends for `time` seconds of real time, ignoring the time scale.
///
/// The unscaled delta of each resumed frame is added to the accumulator;
/// the wait ends on the first frame where it reaches `time`.
pub async fn wait_for_seconds_realtime(clock: &FrameClock, time: f32) {
    let mut current_time = 0.0f32;
    while current_time < time {
        clock.next_frame().await;
        current_time += clock.unscaled_delta_time();
    }
}

/// Suspends exactly `frames` times.
pub async fn wait_for_frames(clock: &FrameClock, frames: u32) {
    let mut current = 0u32;
    while current < frames {
        current += 1;
        clock.next_frame().await;
    }
}

/// Suspends while `animation` is alive and playing.
pub async fn wait_while_playing<P>(clock: &FrameClock, animation: &P)
where
    P: Playback + ?Sized,
{
    wait_while(clock, || animation.is_alive() && animation.is_playing()).await;
}

/// Drives `value_at` from progress `0.0` towards `1.0` over `duration`
/// seconds of real time, handing each value to `on_update`.
///
/// Progress advances by `unscaled_delta_time * speed` per frame. Once the
/// accumulated time reaches `duration`, `on_update` receives
/// `value_at(1.0)`, whatever the last frame overshot by. A non-positive or
/// NaN `duration` skips the loop and delivers that final value without
/// suspending.
pub async fn interpolate<T, U, V>(
    clock: &FrameClock,
    duration: f32,
    mut on_update: Option<U>,
    mut value_at: V,
    speed: f32,
) where
    U: FnMut(T),
    V: FnMut(f32) -> T,
{
    let mut current_time = 0.0f32;
    while current_time < duration {
        let step = current_time / duration;
        let value = value_at(step);

        if let Some(on_update) = on_update.as_mut() {
            on_update(value);
        }
        current_time += clock.unscaled_delta_time() * speed;

        clock.next_frame().await;
    }
    if let Some(on_update) = on_update.as_mut() {
        on_update(value_at(1.0));
    }
}

/// [`interpolate`] with `easing` applied to the progress fraction.
///
/// Every [`Easing`] maps `1.0` to `1.0`, so the final update still receives
/// `value_at(1.0)`.
pub async fn interpolate_eased<T, U, V>(
    clock: &FrameClock,
    duration: f32,
    easing: Easing,
    on_update: Option<U>,
    mut value_at: V,
    speed: f32,
) where
    U: FnMut(T),
    V: FnMut(f32) -> T,
{
    interpolate(
        clock,
        duration,
        on_update,
        |step| value_at(easing.transform(step)),
        speed,
    )
    .await;
}

/// Interpolates any [`Lerp`] value from `start` to `end`.
///
/// Progress is clamped to `[0, 1]` before blending, so a negative `speed`
/// keeps reporting `start` instead of extrapolating past it.
pub async fn lerp_value<T, U>(
    clock: &FrameClock,
    start: T,
    end: T,
    duration: f32,
    on_update: Option<U>,
    speed: f32,
) where
    T: Lerp,
    U: FnMut(T),
{
    interpolate(
        clock,
        duration,
        on_update,
        |step| start.lerp(&end, step.clamp(0.0, 1.0)),
        speed,
    )
    .await;
}

/// Interpolates a scalar from `start` to `end` over `duration` seconds.
///
/// Pass `1.0` as `speed` for the plain duration.
pub async fn lerp(
    clock: &FrameClock,
    start: f32,
    end: f32,
    duration: f32,
    on_update: Option<impl FnMut(f32)>,
    speed: f32,
) {
    lerp_value(clock, start, end, duration, on_update, speed).await;
}

/// Interpolates a color from `start` to `end` over `duration` seconds.
pub async fn lerp_color(
    clock: &FrameClock,
    start: Color,
    end: Color,
    duration: f32,
    on_update: Option<impl FnMut(Color)>,
    speed: f32,
) {
    lerp_value(clock, start, end, duration, on_update, speed).await;
}

#[cfg(test)]
#[path = "tests/awaitable_tests.rs"]
mod tests;
