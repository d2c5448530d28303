//! Pure color math for framewait.
//!
//! Colors are plain data; interpolating them over frames lives in
//! `framewait-animation`.

mod color;

pub use color::*;

pub mod prelude {
    pub use crate::color::Color;
}
