//! Input management system
//!
//! Tracks pointer state and turns raw button/cursor events into drag deltas
//! for camera controls.

use serde::{Deserialize, Serialize};

/// Input manager
///
/// Keeps the pressed state of mouse buttons and the last cursor position so
/// cursor movement can be reported as a drag delta while a button is held.
#[derive(Debug, Default)]
pub struct InputManager {
    pressed: Vec<MouseButton>,
    cursor: Option<(f64, f64)>,
}

/// Cursor movement while a button is held
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragDelta {
    /// Button held during the movement
    pub button: MouseButton,
    /// Horizontal movement in pixels
    pub dx: f64,
    /// Vertical movement in pixels
    pub dy: f64,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            if !self.pressed.contains(&button) {
                self.pressed.push(button);
            }
        } else {
            self.pressed.retain(|b| *b != button);
        }
    }

    /// Handle mouse movement, returning a drag delta when a button is held
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) -> Option<DragDelta> {
        let previous = self.cursor.replace((x, y));
        let button = *self.pressed.first()?;
        let (px, py) = previous?;
        Some(DragDelta { button, dx: x - px, dy: y - py })
    }

    /// Whether a mouse button is currently held
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }
}

/// Keyboard keys an application can bind
///
/// Letter variants are named after their key cap.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Space,
    Escape,
}

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; drags orbit the camera
    Left,
    /// Secondary button
    Right,
    /// Wheel button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_without_button_is_not_a_drag() {
        let mut input = InputManager::new();
        assert_eq!(input.handle_mouse_move(10.0, 10.0), None);
        assert_eq!(input.handle_mouse_move(12.0, 10.0), None);
    }

    #[test]
    fn test_drag_reports_delta_from_previous_position() {
        let mut input = InputManager::new();
        input.handle_mouse_move(100.0, 50.0);
        input.handle_mouse_button(MouseButton::Left, true);
        let drag = input.handle_mouse_move(110.0, 45.0).unwrap();
        assert_eq!(drag, DragDelta { button: MouseButton::Left, dx: 10.0, dy: -5.0 });

        input.handle_mouse_button(MouseButton::Left, false);
        assert!(!input.is_pressed(MouseButton::Left));
        assert_eq!(input.handle_mouse_move(120.0, 45.0), None);
    }

    #[test]
    fn test_first_move_after_press_has_no_origin() {
        let mut input = InputManager::new();
        input.handle_mouse_button(MouseButton::Left, true);
        assert_eq!(input.handle_mouse_move(5.0, 5.0), None);
        assert!(input.handle_mouse_move(6.0, 5.0).is_some());
    }
}
