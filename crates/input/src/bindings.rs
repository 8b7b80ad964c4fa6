//! Window-event adapter: maps winit keys and mouse events onto [`InputState`].

use crate::{Action, InputState, MoveDirection};
use glam::Vec2;

pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

/// What a physical input drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Move(MoveDirection),
    Trigger(Action),
}

/// Default key table.
///
/// Space is both the grounded jump and the flight climb, so it arms `Jump` and holds
/// `Up`; each mode ignores the half it does not use.
pub fn key_bindings(key: KeyCode) -> &'static [Binding] {
    use Binding::*;
    match key {
        KeyCode::KeyW | KeyCode::ArrowUp => &[Move(MoveDirection::Forward)],
        KeyCode::KeyS | KeyCode::ArrowDown => &[Move(MoveDirection::Backward)],
        KeyCode::KeyA | KeyCode::ArrowLeft => &[Move(MoveDirection::Left)],
        KeyCode::KeyD | KeyCode::ArrowRight => &[Move(MoveDirection::Right)],
        KeyCode::KeyQ => &[Move(MoveDirection::Up)],
        KeyCode::ControlLeft | KeyCode::KeyC => &[Move(MoveDirection::Down)],
        KeyCode::Space => &[Move(MoveDirection::Up), Trigger(Action::Jump)],
        KeyCode::ShiftLeft | KeyCode::ShiftRight => &[Trigger(Action::Boost)],
        KeyCode::KeyE => &[Trigger(Action::Activate)],
        _ => &[],
    }
}

/// Default mouse button table.
pub fn mouse_bindings(button: MouseButton) -> &'static [Binding] {
    match button {
        MouseButton::Left => &[Binding::Trigger(Action::Activate)],
        _ => &[],
    }
}

impl InputState {
    fn apply_bindings(&mut self, bindings: &[Binding], state: ElementState) {
        let down = state == ElementState::Pressed;
        for binding in bindings {
            match *binding {
                Binding::Move(direction) => self.set_moving(direction, down),
                Binding::Trigger(action) => self.set_action(action, down),
            }
        }
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        self.apply_bindings(key_bindings(key), state);
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.apply_bindings(mouse_bindings(button), state);
    }

    /// Process raw mouse movement (device motion while the cursor is locked).
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.add_look_delta(Vec2::new(delta.0 as f32, delta.1 as f32));
    }

    /// Process a cursor position in window pixels.
    pub fn process_cursor_position(&mut self, position: (f64, f64), window_size: (u32, u32)) {
        let (width, height) = window_size;
        if width == 0 || height == 0 {
            log::debug!("Ignoring cursor position for zero-sized window");
            return;
        }
        let x = (position.0 as f32 / width as f32) * 2.0 - 1.0;
        let y = 1.0 - (position.1 as f32 / height as f32) * 2.0;
        self.set_cursor_ndc(Vec2::new(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_drive_movement_flags() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        assert!(input.is_moving(MoveDirection::Forward));
        assert!(input.is_moving(MoveDirection::Right));
        input.process_keyboard(KeyCode::KeyW, ElementState::Released);
        assert!(!input.is_moving(MoveDirection::Forward));
    }

    #[test]
    fn space_arms_jump_and_holds_up() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(input.is_moving(MoveDirection::Up));
        assert!(input.consume_action(Action::Jump));
        // OS key repeat delivers further Pressed events while held
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(!input.consume_action(Action::Jump));
    }

    #[test]
    fn left_click_activates() {
        let mut input = InputState::new();
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(input.consume_action(Action::Activate));
        input.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert!(!input.consume_action(Action::Activate));
    }

    #[test]
    fn cursor_maps_to_ndc() {
        let mut input = InputState::new();
        input.process_cursor_position((400.0, 300.0), (800, 600));
        assert_eq!(input.cursor_ndc(), Vec2::ZERO);
        input.process_cursor_position((0.0, 0.0), (800, 600));
        assert_eq!(input.cursor_ndc(), Vec2::new(-1.0, 1.0));
        input.process_cursor_position((10.0, 10.0), (0, 600));
        assert_eq!(input.cursor_ndc(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn mouse_motion_feeds_look_delta() {
        let mut input = InputState::new();
        input.process_mouse_motion((4.0, -2.0));
        assert_eq!(input.consume_look_delta(), Vec2::new(4.0, -2.0));
    }
}
