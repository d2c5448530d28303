use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use framewait_animation::prelude::*;
use framewait_core::{Component, ComponentScope, FrameClock};
use framewait_graphics::Color;
use framewait_runtime_std::StdRuntime;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 1_000;

fn init_logging() {
    #[cfg(all(feature = "logging", not(target_arch = "wasm32")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

async fn fade_sequence(clock: FrameClock) {
    let mut last_printed = None;
    lerp_color(
        &clock,
        Color::BLACK,
        Color::WHITE,
        0.5,
        Some(|color: Color| {
            let [r, g, b, _] = color.to_rgba_u8();
            if last_printed != Some(r) {
                last_printed = Some(r);
                println!("  fade  #{r:02x}{g:02x}{b:02x}");
            }
        }),
        1.0,
    )
    .await;

    let mut samples = Vec::new();
    lerp(&clock, 0.0, 10.0, 0.3, Some(|value| samples.push(value)), 1.0).await;
    println!(
        "  lerp  {} updates, last {:.2}",
        samples.len(),
        samples.last().copied().unwrap_or_default()
    );

    let before = clock.frame_count();
    wait_for_frames(&clock, 3).await;
    println!("  waited {} frames", clock.frame_count() - before);

    let started = clock.unscaled_time();
    wait_for_seconds_realtime(&clock, 0.2).await;
    println!(
        "  waited {:.3}s of real time",
        clock.unscaled_time() - started
    );
}

async fn destroy_after(clock: FrameClock, component: ComponentScope, seconds: f32) {
    wait_for_seconds_realtime(&clock, seconds).await;
    log::info!("destroying {}", component.name());
    component.destroy();
}

fn main() {
    init_logging();

    println!("=== framewait fade demo ===");
    let runtime = StdRuntime::new();
    let clock = runtime.frame_clock();

    runtime.spawn(fade_sequence(clock.clone()));

    let spawner = ComponentScope::new("spawner", runtime.runtime_handle());
    let resumed = Rc::new(Cell::new(false));
    {
        let waiting = spawner.clone();
        let resumed = Rc::clone(&resumed);
        let clock = clock.clone();
        spawner.launch(async move {
            let started = clock.time();
            waiting.wait_for_seconds(60.0).await;
            println!(
                "  spawner wait ended after {:.3}s (destroyed: {})",
                clock.time() - started,
                waiting.is_destroyed()
            );
            resumed.set(true);
        });
    }
    runtime.spawn(destroy_after(clock.clone(), spawner.clone(), 0.25));

    let frames = runtime.run_until_idle(FRAME_INTERVAL, MAX_FRAMES);
    println!(
        "ran {frames} frames, {:.3}s scaled time, spawner resumed: {}",
        clock.time(),
        resumed.get()
    );
}
