mod color;
mod mask;
mod screen;
mod surface;
mod text;

pub use color::Color;
pub use mask::{Mask, ALPHA_THRESHOLD};
pub use screen::{Canvas, Screen};
pub use surface::Surface;
pub use text::{FontHandle, TextStyle};
pub use crate::math::Vec2;
