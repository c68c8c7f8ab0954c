//! scratch2d - Scratch-style helpers for beginner 2D games.
//!
//! Game objects are [`Actor`]s that move, turn, animate and collide through
//! plain method calls (`alien.move_forward(2.0)`, `key.r_is_pressed()`), while
//! the [`Stage`] paints the backdrop. A [`Game`] is driven frame by frame by
//! the [`Engine`].

pub mod actor;
pub mod assets;
pub mod display;
pub mod engine;
pub mod error;
pub mod input;
pub mod keys;
pub mod math;
pub mod mouse;
pub mod render;
pub mod stage;

pub use crate::actor::{Actor, Anchor, Positioned, Target, DEFAULT_FPS, DEFAULT_TURN};
pub use crate::assets::Assets;
pub use crate::display::Display;
pub use crate::engine::{Engine, EngineConfig, EngineContext, Game};
pub use crate::error::{Error, Result};
pub use crate::input::InputState;
pub use crate::keys::Keys;
pub use crate::math::{Rect, Vec2};
pub use crate::mouse::Mouse;
pub use crate::render::{Canvas, Color, FontHandle, Mask, Screen, Surface, TextStyle};
pub use crate::stage::{Background, Stage};
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
