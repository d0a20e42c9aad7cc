use super::types::Key;

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys/buttons, pointer position).
/// `InputFrame` provides the presses and accumulated motion of the current frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame (including key-repeat presses), in order.
    pub keys_pressed: Vec<Key>,

    /// Pointer motion accumulated this frame, logical pixels.
    pub pointer_delta: (f32, f32),

    /// Vertical wheel motion accumulated this frame, in lines.
    pub wheel_lines: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.pointer_delta = (0.0, 0.0);
        self.wheel_lines = 0.0;
    }
}
