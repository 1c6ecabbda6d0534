//! Key bindings for game actions.

use hashbrown::HashMap;
use voxcraft_core::BlockType;
use winit::keyboard::KeyCode;

/// Something a key can do in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    /// Pulse: make this block type the selected one.
    SelectBlock(BlockType),
    /// Pulse: switch between first- and third-person view.
    ToggleView,
}

const DIGIT_KEYS: [KeyCode; BlockType::COUNT] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Mapping from physical keys to game actions.
///
/// A key maps to at most one action; an action may have several keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<KeyCode, GameAction>,
}

impl Default for KeyBindings {
    /// WASD to move, Space to jump, 1-9 to pick a block, V to switch view.
    fn default() -> Self {
        let mut bindings = Self::empty()
            .bind(KeyCode::KeyW, GameAction::MoveForward)
            .bind(KeyCode::KeyS, GameAction::MoveBackward)
            .bind(KeyCode::KeyA, GameAction::MoveLeft)
            .bind(KeyCode::KeyD, GameAction::MoveRight)
            .bind(KeyCode::Space, GameAction::Jump)
            .bind(KeyCode::KeyV, GameAction::ToggleView);
        for (key, block) in DIGIT_KEYS.into_iter().zip(BlockType::ALL) {
            bindings = bindings.bind(key, GameAction::SelectBlock(block));
        }
        bindings
    }
}

impl KeyBindings {
    /// Bindings with no keys bound.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding of that key.
    #[must_use]
    pub fn bind(mut self, key: KeyCode, action: GameAction) -> Self {
        self.rebind(key, action);
        self
    }

    /// Bind `key` to `action` at runtime.
    pub fn rebind(&mut self, key: KeyCode, action: GameAction) {
        self.keys.insert(key, action);
    }

    /// Remove whatever `key` was bound to.
    pub fn unbind(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    /// Action bound to `key`.
    #[must_use]
    pub fn action_for(&self, key: KeyCode) -> Option<GameAction> {
        self.keys.get(&key).copied()
    }
}
