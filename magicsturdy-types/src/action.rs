//! Keyboard actions.
//!
//! Key types:
//! - [`Action`] - Single operations that keyboards send or execute
//! - [`KeyAction`] - What a key position does, including dual-role tap/hold keys

use crate::keycode::KeyCode;
use crate::modifier::ModifierCombination;

/// A KeyAction is the action at a keyboard position, stored in keymap.
/// It can be a single action like triggering a key, or a composite keyboard action like tap/hold
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// No action.
    No,
    /// Transparent action, next layer will be checked.
    Transparent,
    /// A single action, such as triggering a key, or activating a layer. Action is triggered when pressed and cancelled when released.
    Single(Action),
    /// Tap hold action: (tap, hold)
    TapHold(Action, Action),
}

impl KeyAction {
    /// Convert `KeyAction` to the internal `Action`.
    /// For `TapHold`, the tap action is returned.
    pub fn to_action(self) -> Action {
        match self {
            KeyAction::Single(a) | KeyAction::TapHold(a, _) => a,
            KeyAction::Transparent => Action::Transparent,
            KeyAction::No => Action::No,
        }
    }

    /// The keycode this key types when it's tapped, if any.
    pub fn tap_keycode(self) -> Option<KeyCode> {
        self.to_action().keycode()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, KeyAction::No)
    }
}

/// A single basic action that a keyboard can execute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Default action, no action.
    No,
    /// Transparent action, next layer will be checked.
    Transparent,
    /// A normal key stroke.
    Key(KeyCode),
    /// Key stroke with modifier combination triggered.
    KeyWithModifier(KeyCode, ModifierCombination),
    /// Modifier Combination, used as the hold side of home row mods.
    Modifier(ModifierCombination),
    /// Activate a layer while held
    LayerOn(u8),
    /// Triggers the user macro at the index.
    TriggerMacro(u8),
    /// Repeat the last key
    Repeat,
    /// Send the alternate of the last key
    AltRepeat,
    /// Toggle Caps Word
    CapsWordToggle,
}

impl Action {
    /// Keycode sent by this action, if it sends one.
    pub fn keycode(self) -> Option<KeyCode> {
        match self {
            Action::Key(k) | Action::KeyWithModifier(k, _) => Some(k),
            _ => None,
        }
    }

    /// Returns `true` for actions that can be remembered by the repeat keys.
    ///
    /// Modifiers, layer switches, caps word and the repeat keys themselves are skipped.
    pub fn is_repeatable(self) -> bool {
        match self {
            Action::Key(k) => !k.is_modifier() && k != KeyCode::No,
            Action::KeyWithModifier(_, _) | Action::TriggerMacro(_) => true,
            _ => false,
        }
    }
}
