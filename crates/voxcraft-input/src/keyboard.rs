//! Keyboard state tracking.

use hashbrown::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keys currently held, plus the keys that went down since the last frame.
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key event. Auto-repeat does not produce a new press.
    pub fn process_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key) = event.physical_key else {
            return;
        };
        match event.state {
            ElementState::Pressed => self.press_key(key),
            ElementState::Released => self.release_key(key),
        }
    }

    /// Mark `key` as pressed.
    pub fn press_key(&mut self, key: KeyCode) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    /// Mark `key` as released.
    pub fn release_key(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Returns `true` while the key is held.
    #[must_use]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Returns `true` if the key went down this frame.
    #[must_use]
    pub fn is_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Keys held right now.
    pub fn held(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.held.iter().copied()
    }

    /// Keys that went down this frame.
    pub fn just_pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.just_pressed.iter().copied()
    }

    /// Forget this frame's presses.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_reported_once() {
        let mut keyboard = KeyboardState::new();
        keyboard.press_key(KeyCode::KeyW);
        assert!(keyboard.is_held(KeyCode::KeyW));
        assert!(keyboard.is_just_pressed(KeyCode::KeyW));

        keyboard.end_frame();
        // Auto-repeat
        keyboard.press_key(KeyCode::KeyW);
        assert!(keyboard.is_held(KeyCode::KeyW));
        assert!(!keyboard.is_just_pressed(KeyCode::KeyW));
    }

    #[test]
    fn release_clears_hold() {
        let mut keyboard = KeyboardState::new();
        keyboard.press_key(KeyCode::Space);
        keyboard.release_key(KeyCode::Space);
        assert!(!keyboard.is_held(KeyCode::Space));
        // The press still counts for this frame.
        assert!(keyboard.is_just_pressed(KeyCode::Space));

        keyboard.press_key(KeyCode::KeyA);
        keyboard.clear();
        assert_eq!(keyboard.held().count(), 0);
        assert_eq!(keyboard.just_pressed().count(), 0);
    }
}
