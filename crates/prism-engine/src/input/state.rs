use std::collections::HashSet;

use super::types::{ButtonState, InputEvent, Modifiers, MouseButton};

/// Current input state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match *ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = m,

            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Releases are not delivered after focus is gone.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((x, y)),

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::PointerButton { button, state, modifiers } => {
                self.modifiers = modifiers;
                match state {
                    ButtonState::Pressed => {
                        self.buttons_down.insert(button);
                    }
                    ButtonState::Released => {
                        self.buttons_down.remove(&button);
                    }
                }
            }

            InputEvent::MouseWheel { modifiers, .. } => self.modifiers = modifiers,
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::PointerButton {
            button,
            state: ButtonState::Pressed,
            modifiers: Modifiers::default(),
        }
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn tracks_pointer_position_until_left() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved { x: 10.0, y: 20.0 });
        assert_eq!(s.pointer_pos, Some((10.0, 20.0)));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }

    // ── buttons ───────────────────────────────────────────────────────────

    #[test]
    fn press_and_release() {
        let mut s = InputState::default();
        s.apply_event(&press(MouseButton::Left));
        assert!(s.button_down(MouseButton::Left));
        s.apply_event(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: ButtonState::Released,
            modifiers: Modifiers::default(),
        });
        assert!(!s.button_down(MouseButton::Left));
    }

    #[test]
    fn focus_loss_clears_held_buttons() {
        let mut s = InputState::default();
        s.apply_event(&press(MouseButton::Right));
        s.apply_event(&InputEvent::Focused(false));
        assert!(s.buttons_down.is_empty());
        assert!(!s.focused);
    }

    // ── modifiers ─────────────────────────────────────────────────────────

    #[test]
    fn wheel_updates_modifiers() {
        let mut s = InputState::default();
        let shift = Modifiers { shift: true, ..Default::default() };
        s.apply_event(&InputEvent::MouseWheel {
            delta: crate::input::WheelDelta::Line { x: 0.0, y: 1.0 },
            modifiers: shift,
        });
        assert_eq!(s.modifiers, shift);
        assert!(s.modifiers.any());
    }
}
