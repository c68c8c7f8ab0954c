use winit::event::MouseButton;

use crate::input::InputState;
use crate::math::Vec2;

/// Mouse facade with Scratch-style getters and show/hide commands.
///
/// Visibility is only recorded here; the host applies it to its window with
/// `Window::set_cursor_visible(input.cursor_visible())`.
pub struct Mouse<'a> {
    input: &'a mut InputState,
}

impl<'a> Mouse<'a> {
    pub fn new(input: &'a mut InputState) -> Self {
        Self { input }
    }

    pub fn hide(&mut self) {
        self.input.set_cursor_visible(false);
    }

    pub fn show(&mut self) {
        self.input.set_cursor_visible(true);
    }

    pub fn is_visible(&self) -> bool {
        self.input.cursor_visible()
    }

    pub fn x_position(&self) -> f32 {
        self.input.mouse_position().x
    }

    pub fn y_position(&self) -> f32 {
        self.input.mouse_position().y
    }

    pub fn position(&self) -> Vec2 {
        self.input.mouse_position()
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.input.is_mouse_down(button)
    }
}
