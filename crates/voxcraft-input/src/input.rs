//! Input manager that folds window events into per-frame snapshots.

use glam::Vec2;
use tracing::trace;
use voxcraft_core::PointerAction;
use winit::event::{DeviceEvent, ElementState, WindowEvent};

use crate::action::{GameAction, KeyBindings};
use crate::joystick::VirtualJoystick;
use crate::keyboard::KeyboardState;
use crate::pointer::{classify_click, Modifiers, PointerButton};
use crate::snapshot::{InputSnapshot, MovementState};

/// Collects raw input and hands out one [`InputSnapshot`] per frame.
///
/// # Usage
///
/// ```ignore
/// fn on_event(&mut self, event: &WindowEvent) {
///     self.input.process_window_event(event);
/// }
///
/// fn update(&mut self, dt: f32) {
///     let snapshot = self.input.snapshot();
///     for action in self.input.take_clicks() {
///         self.session.pointer_ray(self.cursor_ray(), action);
///     }
///     self.session.tick(&snapshot, dt);
///     self.input.end_frame();
/// }
/// ```
#[derive(Debug, Default)]
pub struct InputManager {
    bindings: KeyBindings,
    keyboard: KeyboardState,
    modifiers: Modifiers,
    joystick: VirtualJoystick,
    jump_button: bool,
    look_delta: Vec2,
    clicks: Vec<PointerAction>,
}

impl InputManager {
    /// Create an input manager with the given key bindings.
    #[must_use]
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    /// Current key bindings.
    #[must_use]
    pub const fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Mutable access to key bindings.
    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Keyboard state.
    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Mutable keyboard state, for synthetic input.
    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    /// On-screen joystick.
    pub fn joystick_mut(&mut self) -> &mut VirtualJoystick {
        &mut self.joystick
    }

    /// Process a window event.
    ///
    /// Returns `true` if the event was consumed.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_key_event(event);
                true
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = Modifiers::from(modifiers.state());
                true
            }
            WindowEvent::MouseInput {
                button,
                state: ElementState::Pressed,
                ..
            } => {
                let Ok(button) = PointerButton::try_from(*button) else {
                    return false;
                };
                self.click(button);
                true
            }
            WindowEvent::Focused(false) => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Process a device event (raw mouse motion drives the camera).
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.add_look(Vec2::new(delta.0 as f32, delta.1 as f32));
        }
    }

    /// Register a click or tap with the current modifiers.
    pub fn click(&mut self, button: PointerButton) {
        if let Some(action) = classify_click(button, self.modifiers) {
            trace!(?button, ?action, "pointer click");
            self.clicks.push(action);
        }
    }

    /// Set the modifier keys directly.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Accumulate mouse-look motion.
    pub fn add_look(&mut self, delta: Vec2) {
        self.look_delta += delta;
    }

    /// Press or release the on-screen jump button.
    pub fn set_jump_button(&mut self, pressed: bool) {
        self.jump_button = pressed;
    }

    /// Drain the clicks registered since the last call.
    pub fn take_clicks(&mut self) -> Vec<PointerAction> {
        std::mem::take(&mut self.clicks)
    }

    /// Build this frame's snapshot.
    ///
    /// When several block keys are pressed in one frame the highest slot wins.
    #[must_use]
    pub fn snapshot(&self) -> InputSnapshot {
        let mut keys = MovementState::default();
        for key in self.keyboard.held() {
            match self.bindings.action_for(key) {
                Some(GameAction::MoveForward) => keys.forward = true,
                Some(GameAction::MoveBackward) => keys.backward = true,
                Some(GameAction::MoveLeft) => keys.left = true,
                Some(GameAction::MoveRight) => keys.right = true,
                Some(GameAction::Jump) => keys.jump = true,
                _ => {}
            }
        }
        let buttons = MovementState {
            jump: self.jump_button,
            ..MovementState::default()
        };

        let mut snapshot = InputSnapshot {
            movement: keys.merge(self.joystick.movement()).merge(buttons),
            look_delta: self.look_delta,
            ..InputSnapshot::default()
        };
        for key in self.keyboard.just_pressed() {
            match self.bindings.action_for(key) {
                Some(GameAction::SelectBlock(block)) => {
                    snapshot.select = snapshot.select.max(Some(block));
                }
                Some(GameAction::ToggleView) => snapshot.toggle_view = true,
                _ => {}
            }
        }
        snapshot
    }

    /// Called at the end of each frame to drop pulses and motion.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.look_delta = Vec2::ZERO;
    }

    /// Release all held input.
    pub fn clear(&mut self) {
        self.keyboard.clear();
        self.joystick.release();
        self.jump_button = false;
        self.look_delta = Vec2::ZERO;
        self.clicks.clear();
    }
}
