//! Pointer buttons, modifier keys and click classification.

use bitflags::bitflags;
use voxcraft_core::PointerAction;
use winit::event::MouseButton as WinitMouseButton;
use winit::keyboard::ModifiersState;

bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

impl Modifiers {
    /// Returns `true` if the Alt (Option) key is held.
    #[inline]
    #[must_use]
    pub const fn alt(self) -> bool {
        self.contains(Self::ALT)
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut modifiers = Self::empty();
        modifiers.set(Self::SHIFT, state.shift_key());
        modifiers.set(Self::CTRL, state.control_key());
        modifiers.set(Self::ALT, state.alt_key());
        modifiers.set(Self::SUPER, state.super_key());
        modifiers
    }
}

/// Mouse buttons (or taps) that can start a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button, or a touch tap.
    Left,
    Right,
    Middle,
}

impl TryFrom<WinitMouseButton> for PointerButton {
    type Error = ();

    fn try_from(button: WinitMouseButton) -> Result<Self, Self::Error> {
        match button {
            WinitMouseButton::Left => Ok(Self::Left),
            WinitMouseButton::Right => Ok(Self::Right),
            WinitMouseButton::Middle => Ok(Self::Middle),
            _ => Err(()),
        }
    }
}

/// Decide what a click does.
///
/// A right click, or any click with Alt held, is secondary (remove). A left
/// click or tap is primary (place). Other buttons do nothing.
#[must_use]
pub fn classify_click(button: PointerButton, modifiers: Modifiers) -> Option<PointerAction> {
    match button {
        PointerButton::Right => Some(PointerAction::Secondary),
        PointerButton::Left if modifiers.alt() => Some(PointerAction::Secondary),
        PointerButton::Left => Some(PointerAction::Primary),
        PointerButton::Middle => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_click_places() {
        assert_eq!(
            classify_click(PointerButton::Left, Modifiers::empty()),
            Some(PointerAction::Primary)
        );
        assert_eq!(
            classify_click(PointerButton::Left, Modifiers::SHIFT),
            Some(PointerAction::Primary)
        );
    }

    #[test]
    fn right_or_alt_removes() {
        assert_eq!(
            classify_click(PointerButton::Right, Modifiers::empty()),
            Some(PointerAction::Secondary)
        );
        assert_eq!(
            classify_click(PointerButton::Left, Modifiers::ALT),
            Some(PointerAction::Secondary)
        );
        assert_eq!(
            classify_click(PointerButton::Right, Modifiers::ALT | Modifiers::CTRL),
            Some(PointerAction::Secondary)
        );
    }

    #[test]
    fn middle_does_nothing() {
        assert_eq!(classify_click(PointerButton::Middle, Modifiers::empty()), None);
    }

    #[test]
    fn modifiers_from_winit() {
        let state = ModifiersState::ALT | ModifiersState::SHIFT;
        let modifiers = Modifiers::from(state);
        assert!(modifiers.alt());
        assert!(modifiers.contains(Modifiers::SHIFT));
        assert!(!modifiers.contains(Modifiers::CTRL));
    }
}
