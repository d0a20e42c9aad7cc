use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes
    /// this frame's presses and motion to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear "down" sets to avoid stuck keys/buttons.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let Some((px, py)) = self.pointer_pos {
                    frame.pointer_delta.0 += x - px;
                    frame.pointer_delta.1 += y - py;
                }
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                repeat,
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        let inserted = self.keys_down.insert(*key);
                        if inserted || *repeat {
                            frame.keys_pressed.push(*key);
                        }
                    }
                    KeyState::Released => {
                        self.keys_down.remove(key);
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                frame.wheel_lines += delta.lines_y();
            }
        }
    }

    /// Helper queries
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat }
    }

    #[test]
    fn pointer_delta_accumulates_between_moves() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 10.0 }));
        assert_eq!(frame.pointer_delta, (0.0, 0.0));

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 14.0, y: 7.0 }));
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 15.0, y: 9.0 }));
        assert_eq!(frame.pointer_delta, (5.0, -1.0));

        frame.clear();
        assert_eq!(frame.pointer_delta, (0.0, 0.0));
    }

    #[test]
    fn key_repeat_is_reported_as_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed, true));
        assert_eq!(frame.keys_pressed, vec![Key::ArrowUp, Key::ArrowUp]);
        assert!(state.key_down(Key::ArrowUp));

        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Released, false));
        assert!(!state.key_down(Key::ArrowUp));
        assert_eq!(frame.keys_pressed.len(), 2);
    }

    #[test]
    fn focus_loss_clears_held_input() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Shift, KeyState::Pressed, false));
        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
    }

    #[test]
    fn button_is_held_until_release() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let button = |state| {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                x: 3.0,
                y: 4.0,
                modifiers: Modifiers::default(),
            })
        };

        state.apply_event(&mut frame, button(MouseButtonState::Pressed));
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(state.pointer_pos, Some((3.0, 4.0)));

        state.apply_event(&mut frame, button(MouseButtonState::Released));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn wheel_pixels_convert_to_lines() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(
            &mut frame,
            InputEvent::MouseWheel {
                delta: MouseWheelDelta::Pixel { x: 0.0, y: 80.0 },
                modifiers: Modifiers::default(),
            },
        );
        state.apply_event(
            &mut frame,
            InputEvent::MouseWheel {
                delta: MouseWheelDelta::Line { x: 0.0, y: -1.0 },
                modifiers: Modifiers::default(),
            },
        );
        assert_eq!(frame.wheel_lines, 1.0);
    }
}
