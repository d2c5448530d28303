//! Testing utilities and harness for framewait

pub mod log_capture;
pub mod testing;

pub use log_capture::{capture_logs, CapturedRecord};
pub use testing::*;

pub mod prelude {
    pub use crate::log_capture::{capture_logs, CapturedRecord};
    pub use crate::testing::*;
}
