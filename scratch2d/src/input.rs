use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::math::Vec2;

/// Tracks keyboard and mouse state across frames.
///
/// Fed either from winit window events or directly through the `press_*` /
/// `release_*` methods when a script drives the game without a window.
#[derive(Debug)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,

    mouse_x: f32,
    mouse_y: f32,
    mouse_down: [bool; 8],
    cursor_visible: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            mouse_x: 0.0,
            mouse_y: 0.0,
            mouse_down: [false; 8],
            cursor_visible: true,
        }
    }

    /// Clear per-frame pressed/released flags.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Handle a keyboard input event from winit.
    ///
    /// Returns the key code when the event was a fresh press, so callers can
    /// dispatch key-down hooks.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<KeyCode> {
        let PhysicalKey::Code(keycode) = event.physical_key else {
            return None;
        };
        match event.state {
            ElementState::Pressed => self.press_key(keycode).then_some(keycode),
            ElementState::Released => {
                self.release_key(keycode);
                None
            }
        }
    }

    /// Mark a key as held. Returns true if it was not already held.
    pub fn press_key(&mut self, key: KeyCode) -> bool {
        let fresh = self.keys_down.insert(key);
        if fresh {
            self.keys_pressed.insert(key);
        }
        fresh
    }

    pub fn release_key(&mut self, key: KeyCode) {
        if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    /// Handle a mouse button input event from winit.
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => self.press_mouse(button),
            ElementState::Released => self.release_mouse(button),
        }
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        if let Some(idx) = mouse_button_index(button) {
            self.mouse_down[idx] = true;
        }
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        if let Some(idx) = mouse_button_index(button) {
            self.mouse_down[idx] = false;
        }
    }

    /// Handle mouse cursor movement from winit.
    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) {
        self.set_mouse_position(x as f32, y as f32);
    }

    pub fn set_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Returns true if the key is currently held down.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Returns true if the mouse button is currently held down.
    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        mouse_button_index(button)
            .map(|idx| self.mouse_down[idx])
            .unwrap_or(false)
    }

    /// Current mouse cursor position in logical pixels.
    pub fn mouse_position(&self) -> Vec2 {
        Vec2::new(self.mouse_x, self.mouse_y)
    }

    /// Whether the host should show the cursor over the window.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

fn mouse_button_index(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        MouseButton::Back => Some(3),
        MouseButton::Forward => Some(4),
        MouseButton::Other(raw) => {
            let idx = raw as usize;
            let mapped = 5 + idx; // Reserve 0-4 for standard buttons
            (mapped < 8).then_some(mapped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_edges() {
        let mut input = InputState::new();
        assert!(input.press_key(KeyCode::Space));
        assert!(!input.press_key(KeyCode::Space));
        assert!(input.is_key_down(KeyCode::Space));
        assert!(input.is_key_pressed(KeyCode::Space));

        input.begin_frame();
        assert!(input.is_key_down(KeyCode::Space));
        assert!(!input.is_key_pressed(KeyCode::Space));

        input.release_key(KeyCode::Space);
        assert!(!input.is_key_down(KeyCode::Space));
        assert!(input.is_key_released(KeyCode::Space));
    }

    #[test]
    fn mouse_buttons_and_position() {
        let mut input = InputState::new();
        input.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.handle_cursor_moved(12.5, 40.0);
        assert!(input.is_mouse_down(MouseButton::Left));
        assert!(!input.is_mouse_down(MouseButton::Right));
        assert!(!input.is_mouse_down(MouseButton::Other(10)));
        assert_eq!(input.mouse_position(), Vec2::new(12.5, 40.0));

        input.handle_mouse_button(MouseButton::Left, ElementState::Released);
        assert!(!input.is_mouse_down(MouseButton::Left));
    }
}
