use super::*;

use framewait_testing::{poll_once, FrameDriver};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

const FRAME: f64 = 1.0 / 60.0;

fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T) + 'static) {
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);
    (values, move |value| sink.borrow_mut().push(value))
}

struct FakeAnimation {
    alive: bool,
    playing: bool,
}

impl Playback for FakeAnimation {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[test]
fn wait_until_true_completes_without_suspending() {
    let driver = FrameDriver::new();
    let clock = driver.frame_clock();
    assert!(poll_once(wait_until(&clock, || true)).is_ready());
    assert!(poll_once(wait_while(&clock, || false)).is_ready());
}

#[test]
fn wait_until_evaluates_condition_once_per_frame() {
    let mut driver = FrameDriver::new();
    let clock = driver.frame_clock();
    let evaluations = Rc::new(Cell::new(0u32));

    let completion = {
        let evaluations = Rc::clone(&evaluations);
        driver.spawn_tracked(async move {
            wait_until(&clock, || {
                evaluations.set(evaluations.get() + 1);
                evaluations.get() >= 3
            })
            .await;
        })
    };
    assert_eq!(evaluations.get(), 1);

    // Draining without a new frame must not re-evaluate.
    driver.runtime_handle().drain_ui();
    assert_eq!(evaluations.get(), 1);

    assert_eq!(driver.frames_until_done(&completion, FRAME, 10), Some(2));
    assert_eq!(evaluations.get(), 3);
}

#[test]
fn wait_while_resumes_on_first_false_frame() {
    let mut driver = FrameDriver::new();
    let clock = driver.frame_clock();
    let busy = Rc::new(Cell::new(true));

    let completion = {
        let busy = Rc::clone(&busy);
        driver.spawn_tracked(async move {
            wait_while(&clock, || busy.get()).await;
        })
    };
    driver.advance_frames(5, FRAME);
    assert!(!completion.is_done());

    busy.set(false);
    driver.advance(FRAME);
    assert!(completion.is_done());
}

#[test]
fn wait_for_frames_suspends_exactly_n_times() {
    for frames in [0u32, 1, 2, 7] {
        let mut driver = FrameDriver::new();
        let clock = driver.frame_clock();
        let completion = driver.spawn_tracked(async move {
            wait_for_frames(&clock, frames).await;
        });
        assert_eq!(
            driver.frames_until_done(&completion, FRAME, 20),
            Some(frames as usize),
            "wait_for_frames({frames})"
        );
    }
}

#[test]
fn wait_for_seconds_realtime_completes_on_first_frame_reaching_target() {
    let mut driver = FrameDriver::new();
    let clock = driver.frame_clock();
    let completion = driver.spawn_tracked(async move {
        wait_for_seconds_realtime(&clock, 1.0).await;
    });
    // 0.3 + 0.3 + 0.3 < 1.0 <= 1.2
    assert_eq!(driver.frames_until_done(&completion, 0.3, 10), Some(4));
}

#[test]
fn wait_for_seconds_realtime_exact_target() {
    let mut driver = FrameDriver::new();
    let clock = driver.frame_clock();
    let completion = driver.spawn_tracked(async move {
        wait_for_seconds_realtime(&clock, 0.5).await;
    });
    assert_eq!(driver.frames_until_done(&completion, 0.25, 10), Some(2));
}

#[test]
fn wait_for_seconds_realtime_ignores_time_scale() {
    let mut driver = FrameDriver::new();
    driver.runtime_handle().set_time_scale(0.0);
    let clock = driver.frame_clock();
    let completion = driver.spawn_tracked(async move {
        wait_for_seconds_realtime(&clock, 0.5).await;
    });
    assert_eq!(driver.frames_until_done(&completion, 0.25, 10), Some(2));
}

#[test]
fn wait_for_seconds_realtime_non_positive_does_not_suspend() {
    let driver = FrameDriver::new();
    let clock = driver.frame_clock();
    assert!(poll_once(wait_for_seconds_realtime(&clock, 0.0)).is_ready());
    assert!(poll_once(wait_for_seconds_realtime(&clock, -3.0)).is_ready());
}

#[test]
fn wait_while_playing_short_circuits_on_dead_or_stopped_animation() {
    let driver = FrameDriver::new();
    let clock = driver.frame_clock();

    let stopped = FakeAnimation {
        alive: true,
        playing: false,
    };
    assert!(poll_once(wait_while_playing(&clock, &stopped)).is_ready());

    let destroyed = FakeAnimation {
        alive: false,
        playing: true,
    };
    assert!(poll_once(wait_while_playing(&clock, &destroyed)).is_ready());

    let dropped: Weak<RefCell<FakeAnimation>> = {
        let animation = Rc::new(RefCell::new(FakeAnimation {
            alive: true,
            playing: true,
        }));
        Rc::downgrade(&animation)
    };
    assert!(poll_once(wait_while_playing(&clock, &dropped)).is_ready());

    let missing: Option<FakeAnimation> = None;
    assert!(poll_once(wait_while_playing(&clock, &missing)).is_ready());
}

#[test]
fn wait_while_playing_waits_for_playback_to_stop() {
    let mut driver = FrameDriver::new();
    let clock = driver.frame_clock();
    let animation = Rc::new(RefCell::new(FakeAnimation {
        alive: true,
        playing: true,
    }));

    let completion = {
        let animation = Rc::clone(&animation);
        driver.spawn_tracked(async move {
            wait_while_playing(&clock, &animation).await;
        })
    };
    driver.advance_frames(3, FRAME);
    assert!(!completion.is_done());

    animation.borrow_mut().playing = false;
    driver.advance(FRAME);
    assert!(completion.is_done());
}

#[test]
fn wait_while_playing_ends_when_animation_is_dropped() {
    let mut driver = FrameDriver::new();
    let clock = driver.frame_clock();
    let animation = Rc::new(RefCell::new(FakeAnimation {
        alive: true,
        playing: true,
    }));
    let weak = Rc::downgrade(&animation);

    let completion = driver.spawn_tracked(async move {
        wait_while_playing(&clock, &weak).await;
    });
    driver.advance(FRAME);
    assert!(!completion.is_done());

    drop(animation);
    driver.advance(FRAME);
    assert!(completion.is_done());
}

#[test]
fn interpolate_zero_duration_snaps_to_end_without_suspending() {
    let driver = FrameDriver::new();
    let clock = driver.frame_clock();

    for duration in [0.0f32, -1.0, f32::NAN] {
        let (values, sink) = recorder::<f32>();
        let poll = poll_once(interpolate(
            &clock,
            duration,
            Some(sink),
            |step| step * 100.0,
            1.0,
        ));
        assert!(poll.is_ready(), "duration {duration}");
        assert_eq!(*values.borrow(), vec![100.0], "duration {duration}");
    }
}

#[test]
fn interpolate_final_value_is_exact_despite_overshoot() {
    let mut driver = FrameDriver::new();
    let clock = driver.frame_clock();
    let (values, sink) = recorder::<f32>();

    let completion = driver.spawn_tracked(async move {
        interpolate(&clock, 1.0, Some(sink), |step| step * 100.0, 1.0).await;
    });
    // The baseline frame has a zero delta, so the first iteration does not
    // advance; 0.4 s frames then overshoot the one-second duration.
    assert_eq!(driver.frames_until_done(&completion, 0.4, 10), Some(4));

    let values = values.borrow();
    assert_eq!(values.last(), Some(&100.0));
    assert!(values[..values.len() - 1].iter().all(|value| *value < 100.0));
}

#[test]
fn lerp_reports_increasing_values_ending_at_target() {
    let mut driver = FrameDriver::new();
    driver.advance(0.25);
    let clock = driver.frame_clock();
    let (values, sink) = recorder::<f32>();

    let completion = driver.spawn_tracked(async move {
        lerp(&clock, 0.0, 10.0, 1.0, Some(sink), 1.0).await;
    });
    assert_eq!(driver.frames_until_done(&completion, 0.25, 10), Some(4));

    let values = values.borrow();
    assert_eq!(*values, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn lerp_speed_scales_progress() {
    let mut driver = FrameDriver::new();
    driver.advance(0.25);
    let clock = driver.frame_clock();
    let (values, sink) = recorder::<f32>();

    let completion = driver.spawn_tracked(async move {
        lerp(&clock, 0.0, 10.0, 1.0, Some(sink), 2.0).await;
    });
    assert_eq!(driver.frames_until_done(&completion, 0.25, 10), Some(2));
    assert_eq!(*values.borrow(), vec![0.0, 5.0, 10.0]);
}

#[test]
fn lerp_with_zero_speed_never_finishes() {
    let mut driver = FrameDriver::new();
    driver.advance(FRAME);
    let clock = driver.frame_clock();
    let (values, sink) = recorder::<f32>();

    let completion = driver.spawn_tracked(async move {
        lerp(&clock, 1.0, 2.0, 0.5, Some(sink), 0.0).await;
    });
    driver.advance_frames(100, FRAME);

    assert!(!completion.is_done());
    assert_eq!(values.borrow().len(), 101);
    assert!(values.borrow().iter().all(|value| *value == 1.0));
}

#[test]
fn lerp_with_negative_speed_holds_start_value() {
    let mut driver = FrameDriver::new();
    driver.advance(0.25);
    let clock = driver.frame_clock();
    let (values, sink) = recorder::<f32>();

    let completion = driver.spawn_tracked(async move {
        lerp(&clock, 0.0, 10.0, 1.0, Some(sink), -1.0).await;
    });
    driver.advance_frames(4, 0.25);

    assert!(!completion.is_done());
    assert_eq!(*values.borrow(), vec![0.0; 5]);
}

#[test]
fn lerp_color_with_negative_speed_holds_start_color() {
    let mut driver = FrameDriver::new();
    driver.advance(0.25);
    let clock = driver.frame_clock();
    let (colors, sink) = recorder::<Color>();

    let completion = driver.spawn_tracked(async move {
        lerp_color(&clock, Color::RED, Color::BLUE, 0.5, Some(sink), -2.0).await;
    });
    driver.advance_frames(3, 0.25);

    assert!(!completion.is_done());
    assert_eq!(colors.borrow().len(), 4);
    assert!(colors.borrow().iter().all(|color| *color == Color::RED));
}

#[test]
fn interpolate_passes_raw_progress_to_value_at() {
    let mut driver = FrameDriver::new();
    driver.advance(0.25);
    let clock = driver.frame_clock();
    let (steps, sink) = recorder::<f32>();

    let completion = driver.spawn_tracked(async move {
        interpolate(&clock, 1.0, Some(sink), |step| step, -1.0).await;
    });
    driver.advance_frames(2, 0.25);

    assert!(!completion.is_done());
    assert_eq!(*steps.borrow(), vec![0.0, -0.25, -0.5]);
}

#[test]
fn lerp_uses_unscaled_time() {
    let mut driver = FrameDriver::new();
    driver.runtime_handle().set_time_scale(0.0);
    driver.advance(0.5);
    let clock = driver.frame_clock();

    let completion = driver.spawn_tracked(async move {
        lerp(&clock, 0.0, 1.0, 1.0, None::<fn(f32)>, 1.0).await;
    });
    assert_eq!(driver.frames_until_done(&completion, 0.5, 10), Some(2));
}

#[test]
fn interpolate_without_callback_still_completes() {
    let mut driver = FrameDriver::new();
    let clock = driver.frame_clock();
    let samples = Rc::new(Cell::new(0u32));

    let completion = {
        let samples = Rc::clone(&samples);
        driver.spawn_tracked(async move {
            interpolate(
                &clock,
                0.5,
                None::<fn(f32)>,
                |step| {
                    samples.set(samples.get() + 1);
                    step
                },
                1.0,
            )
            .await;
        })
    };
    assert!(driver.frames_until_done(&completion, 0.25, 10).is_some());
    // Loop iterations sample; the final update is skipped without a callback.
    assert_eq!(samples.get(), 3);
}

#[test]
fn lerp_color_ends_on_target_color() {
    let mut driver = FrameDriver::new();
    let clock = driver.frame_clock();
    let (values, sink) = recorder::<Color>();
    let end = Color::rgba(0.1, 0.7, 0.3, 0.25);

    let completion = driver.spawn_tracked(async move {
        lerp_color(&clock, Color::WHITE, end, 0.3, Some(sink), 1.0).await;
    });
    assert!(driver.frames_until_done(&completion, 0.07, 20).is_some());

    let values = values.borrow();
    assert_eq!(values.first(), Some(&Color::WHITE));
    assert_eq!(values.last(), Some(&end));
}

#[test]
fn interpolate_eased_keeps_exact_endpoint() {
    let mut driver = FrameDriver::new();
    driver.advance(0.1);
    let clock = driver.frame_clock();
    let (values, sink) = recorder::<f32>();

    let completion = driver.spawn_tracked(async move {
        interpolate_eased(
            &clock,
            0.4,
            Easing::EaseInOut,
            Some(sink),
            |step| 3.0f32.lerp(&9.0, step),
            1.0,
        )
        .await;
    });
    assert!(driver.frames_until_done(&completion, 0.1, 10).is_some());

    let values = values.borrow();
    assert_eq!(values.first(), Some(&3.0));
    assert_eq!(values.last(), Some(&9.0));
    assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn concurrent_waiters_on_same_predicate_are_independent() {
    let mut driver = FrameDriver::new();
    let gate = Rc::new(Cell::new(false));

    let first = {
        let gate = Rc::clone(&gate);
        let clock = driver.frame_clock();
        driver.spawn_tracked(async move { wait_until(&clock, || gate.get()).await })
    };
    driver.advance(FRAME);
    let second = {
        let gate = Rc::clone(&gate);
        let clock = driver.frame_clock();
        driver.spawn_tracked(async move { wait_until(&clock, || gate.get()).await })
    };
    driver.advance(FRAME);
    assert!(!first.is_done() && !second.is_done());

    gate.set(true);
    driver.advance(FRAME);
    assert!(first.is_done() && second.is_done());
}
