//! Cooperative waits and interpolations for framewait
//!
//! Gameplay code awaits these helpers from tasks spawned on a
//! [`framewait_core::Runtime`]; each one suspends across frame boundaries
//! until its condition, timer, animation or interpolation finishes.

pub mod awaitable;
pub mod component;
pub mod easing;
pub mod lerp;
pub mod playback;

pub use awaitable::*;
pub use component::{component_wait_for_seconds, ComponentExt, ComponentWait};
pub use easing::{CubicBezier, Easing};
pub use lerp::Lerp;
pub use playback::Playback;

pub mod prelude {
    pub use crate::awaitable::{
        interpolate, interpolate_eased, lerp, lerp_color, lerp_value, wait_for_frames,
        wait_for_seconds_realtime, wait_until, wait_while, wait_while_playing,
    };
    pub use crate::component::ComponentExt;
    pub use crate::easing::Easing;
    pub use crate::lerp::Lerp;
    pub use crate::playback::Playback;
}
