use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::ModifiersState;

use crate::input::{ButtonState, InputEvent, InputState, Modifiers, MouseButton, WheelDelta};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// `scale_factor` converts physical positions to logical pixels. Returns `None`
/// for events not represented by the input subsystem.
pub fn translate_window_event(
    scale_factor: f64,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            // winit 0.30: ModifiersChanged carries a wrapper with `.state()`.
            Some(InputEvent::ModifiersChanged(map_modifiers(m.state())))
        }

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale_factor, *position);
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::MouseInput { state: st, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: map_element_state(*st),
            // winit 0.30 does not expose `Window::modifiers()`; use the tracked state.
            modifiers: state.modifiers,
        }),

        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::MouseWheel {
            delta: map_wheel_delta(scale_factor, *delta),
            modifiers: state.modifiers,
        }),

        _ => None,
    }
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

fn map_element_state(st: ElementState) -> ButtonState {
    match st {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_wheel_delta(scale_factor: f64, delta: MouseScrollDelta) -> WheelDelta {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => WheelDelta::Line { x, y },
        MouseScrollDelta::PixelDelta(p) => {
            let (x, y) = to_logical_f32(scale_factor, p);
            WheelDelta::Pixel { x, y }
        }
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_logical() {
        let (x, y) = to_logical_f32(2.0, PhysicalPosition::new(200.0, 100.0));
        assert_eq!((x, y), (100.0, 50.0));
    }

    #[test]
    fn pixel_wheel_is_scaled_line_wheel_is_not() {
        assert_eq!(
            map_wheel_delta(2.0, MouseScrollDelta::PixelDelta(PhysicalPosition::new(4.0, 8.0))),
            WheelDelta::Pixel { x: 2.0, y: 4.0 }
        );
        assert_eq!(
            map_wheel_delta(2.0, MouseScrollDelta::LineDelta(1.0, -1.0)),
            WheelDelta::Line { x: 1.0, y: -1.0 }
        );
    }

    #[test]
    fn modifiers_map_each_key() {
        let m = map_modifiers(ModifiersState::SHIFT | ModifiersState::SUPER);
        assert_eq!(
            m,
            Modifiers { shift: true, ctrl: false, alt: false, meta: true }
        );
    }

    #[test]
    fn buttons_map_one_to_one() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(7)), MouseButton::Other(7));
        assert_eq!(map_element_state(ElementState::Released), ButtonState::Released);
    }

    #[test]
    fn untracked_events_are_ignored() {
        let ev = WindowEvent::CloseRequested;
        assert_eq!(translate_window_event(1.0, &InputState::default(), &ev), None);
    }
}
