//! Input events delivered to a scene, and the pointer/keyboard state tracked
//! between them.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event, positions in screen coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Wheel scroll. Positive `delta.y` zooms in.
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

impl PointerEvent {
    /// Screen position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Scroll { position, .. } => *position,
        }
    }
}

/// Keys the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Shift,
    Control,
    Alt,
    Meta,
    Character(char),
}

/// Keyboard event type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Tracks pointer and keyboard state between events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Previous pointer position for delta calculations.
    pub previous_pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    /// Screen position where the current button press started.
    pub press_start: Option<Point>,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.previous_pointer_position = self.pointer_position;
        self.pointer_position = event.position();
        match event {
            PointerEvent::Down { position, button } => {
                if self.pressed_buttons.is_empty() {
                    self.press_start = Some(*position);
                }
                self.pressed_buttons.insert(*button);
            }
            PointerEvent::Up { button, .. } => {
                self.pressed_buttons.remove(button);
                if self.pressed_buttons.is_empty() {
                    self.press_start = None;
                }
            }
            PointerEvent::Move { .. } | PointerEvent::Scroll { .. } => {}
        }
    }

    /// Process a key event, tracking modifier keys.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let (key, pressed) = match *event {
            KeyEvent::Pressed(key) => (key, true),
            KeyEvent::Released(key) => (key, false),
        };
        match key {
            Key::Shift => self.modifiers.shift = pressed,
            Key::Control => self.modifiers.ctrl = pressed,
            Key::Alt => self.modifiers.alt = pressed,
            Key::Meta => self.modifiers.meta = pressed,
            _ => {}
        }
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Get the pointer movement delta since the previous event.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_position - self.previous_pointer_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_press_and_release() {
        let mut input = InputState::new();

        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(input.is_button_pressed(MouseButton::Left));
        assert!(!input.is_button_pressed(MouseButton::Right));
        assert_eq!(input.press_start, Some(Point::new(100.0, 100.0)));

        input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(120.0, 100.0),
            button: MouseButton::Left,
        });
        assert!(!input.is_button_pressed(MouseButton::Left));
        assert_eq!(input.press_start, None);
    }

    #[test]
    fn test_pointer_delta() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(100.0, 100.0),
        });
        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(150.0, 120.0),
        });

        let delta = input.pointer_delta();
        assert!((delta.x - 50.0).abs() < f64::EPSILON);
        assert!((delta.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_modifier_keys_tracked() {
        let mut input = InputState::new();

        input.handle_key_event(&KeyEvent::Pressed(Key::Shift));
        input.handle_key_event(&KeyEvent::Pressed(Key::Control));
        assert!(input.modifiers.shift);
        assert!(input.modifiers.command());

        input.handle_key_event(&KeyEvent::Released(Key::Shift));
        assert!(!input.modifiers.shift);
        assert!(input.modifiers.ctrl);

        input.handle_key_event(&KeyEvent::Pressed(Key::Character('c')));
        assert_eq!(input.modifiers, Modifiers { shift: false, ctrl: true, alt: false, meta: false });
    }
}
