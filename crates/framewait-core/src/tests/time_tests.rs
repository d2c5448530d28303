use super::*;

#[test]
fn first_frame_has_zero_delta() {
    let mut timer = FrameTimer::new(TimeSettings::default());
    let frame = timer.begin_frame(5_000_000_000);
    assert_eq!(frame.unscaled_delta_time, 0.0);
    assert_eq!(frame.delta_time, 0.0);
    assert_eq!(frame.frame_count, 1);
}

#[test]
fn unscaled_delta_ignores_time_scale() {
    let settings = TimeSettings::default().with_time_scale(0.5);
    let mut timer = FrameTimer::new(settings);
    timer.begin_frame(0);
    let frame = timer.begin_frame(250_000_000);
    assert_eq!(frame.unscaled_delta_time, 0.25);
    assert_eq!(frame.delta_time, 0.125);
    assert_eq!(frame.frame_count, 2);
}

#[test]
fn maximum_delta_clamps_only_scaled_time() {
    let settings = TimeSettings::default().with_maximum_delta_time(0.1);
    let mut timer = FrameTimer::new(settings);
    timer.begin_frame(0);
    let frame = timer.begin_frame(500_000_000);
    assert_eq!(frame.unscaled_delta_time, 0.5);
    assert!((frame.delta_time - 0.1).abs() < f32::EPSILON);
    assert!((frame.unscaled_time - 0.5).abs() < 1e-9);
}

#[test]
fn backwards_timestamp_yields_zero_delta() {
    let mut timer = FrameTimer::new(TimeSettings::default());
    timer.begin_frame(1_000_000_000);
    let frame = timer.begin_frame(500_000_000);
    assert_eq!(frame.unscaled_delta_time, 0.0);

    // The previous timestamp is kept, so the next frame measures from it.
    let frame = timer.begin_frame(1_250_000_000);
    assert_eq!(frame.unscaled_delta_time, 0.25);
}

#[test]
fn accumulated_time_is_monotonic() {
    let mut timer = FrameTimer::new(TimeSettings::default());
    let mut previous = 0.0;
    for frame in 0..10u64 {
        let time = timer.begin_frame(frame * 16_000_000);
        assert!(time.unscaled_time >= previous);
        previous = time.unscaled_time;
    }
    assert_eq!(timer.current().frame_count, 10);
}

#[test]
fn time_scale_validation() {
    assert!(TimeSettings::is_valid_time_scale(0.0));
    assert!(TimeSettings::is_valid_time_scale(2.0));
    assert!(!TimeSettings::is_valid_time_scale(-1.0));
    assert!(!TimeSettings::is_valid_time_scale(f32::NAN));
    assert!(!TimeSettings::is_valid_time_scale(f32::INFINITY));
}
