//! Named keyboard queries: `key.w_is_pressed()` instead of key codes.
//!
//! Queries report whether a key is held right now. There is no
//! "was just pressed" variant here; use [`InputState::is_key_pressed`] for that.
//!
//! A few names are mapped for a German (QWERTZ) keyboard: `y` and `z` are
//! swapped, `hash` is the key right of `Ä`, `plus` is the key right of `Ü`,
//! and `minus` shares its key with `slash`.

use winit::keyboard::KeyCode;

use crate::input::InputState;

/// Read-only keyboard facade over the current input state.
#[derive(Clone, Copy)]
pub struct Keys<'a> {
    input: &'a InputState,
}

macro_rules! key_queries {
    ($($name:ident => $code:ident),* $(,)?) => {
        impl Keys<'_> {
            $(
                pub fn $name(&self) -> bool {
                    self.input.is_key_down(KeyCode::$code)
                }
            )*
        }
    };
}

impl<'a> Keys<'a> {
    pub fn new(input: &'a InputState) -> Self {
        Self { input }
    }

    /// Whether an arbitrary physical key is held.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.input.is_key_down(key)
    }
}

key_queries! {
    a_is_pressed => KeyA,
    b_is_pressed => KeyB,
    c_is_pressed => KeyC,
    d_is_pressed => KeyD,
    e_is_pressed => KeyE,
    f_is_pressed => KeyF,
    g_is_pressed => KeyG,
    h_is_pressed => KeyH,
    i_is_pressed => KeyI,
    j_is_pressed => KeyJ,
    k_is_pressed => KeyK,
    l_is_pressed => KeyL,
    m_is_pressed => KeyM,
    n_is_pressed => KeyN,
    o_is_pressed => KeyO,
    p_is_pressed => KeyP,
    q_is_pressed => KeyQ,
    r_is_pressed => KeyR,
    s_is_pressed => KeyS,
    t_is_pressed => KeyT,
    u_is_pressed => KeyU,
    v_is_pressed => KeyV,
    w_is_pressed => KeyW,
    x_is_pressed => KeyX,
    // QWERTZ: y and z trade places.
    y_is_pressed => KeyZ,
    z_is_pressed => KeyY,

    k_0_is_pressed => Digit0,
    k_1_is_pressed => Digit1,
    k_2_is_pressed => Digit2,
    k_3_is_pressed => Digit3,
    k_4_is_pressed => Digit4,
    k_5_is_pressed => Digit5,
    k_6_is_pressed => Digit6,
    k_7_is_pressed => Digit7,
    k_8_is_pressed => Digit8,
    k_9_is_pressed => Digit9,

    kp0_is_pressed => Numpad0,
    kp1_is_pressed => Numpad1,
    kp2_is_pressed => Numpad2,
    kp3_is_pressed => Numpad3,
    kp4_is_pressed => Numpad4,
    kp5_is_pressed => Numpad5,
    kp6_is_pressed => Numpad6,
    kp7_is_pressed => Numpad7,
    kp8_is_pressed => Numpad8,
    kp9_is_pressed => Numpad9,

    up_is_pressed => ArrowUp,
    down_is_pressed => ArrowDown,
    right_is_pressed => ArrowRight,
    left_is_pressed => ArrowLeft,
    backspace_is_pressed => Backspace,
    space_is_pressed => Space,

    hash_is_pressed => Backslash,
    plus_is_pressed => BracketRight,
    comma_is_pressed => Comma,
    minus_is_pressed => Slash,
    period_is_pressed => Period,
    slash_is_pressed => Slash,
}
