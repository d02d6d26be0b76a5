//! The magic key.
//!
//! The magic key is an alternate repeat key: instead of sending the last key again, it sends a
//! key or a short text which often follows the last key in English, e.g. `t` -> `ment`.

use crate::keyboard_macros::MacroId;
use crate::types::action::{Action, KeyAction};
use crate::types::keycode::KeyCode;
use crate::types::modifier::{HidModifiers, LSHIFT, RSHIFT};

/// Adjust the modifiers remembered along with the last key.
///
/// A capitalized letter forgets its shift, unless the shift came with a modifier other than
/// right alt.
pub fn remember_mods(action: &KeyAction, mods: HidModifiers) -> HidModifiers {
    match action.tap_keycode() {
        Some(keycode) if keycode.is_letter() => {
            if (mods & !(HidModifiers::SHIFT_MASK | HidModifiers::RIGHT_ALT)).is_empty() {
                mods & !HidModifiers::SHIFT_MASK
            } else {
                mods
            }
        }
        _ => mods,
    }
}

/// What the magic key sends after `last`, typed with the remembered `mods`.
///
/// Returns the action along with the modifiers which should be applied to it.
pub fn alt_repeat(last: &KeyAction, mods: HidModifiers) -> (Action, HidModifiers) {
    let (keycode, mods) = match last.to_action() {
        Action::Key(k) => (k, mods),
        // `>` and `<` bound as shifted keys, any other modified key is a key of its own
        Action::KeyWithModifier(k @ (KeyCode::Dot | KeyCode::Comma), m) if m == LSHIFT || m == RSHIFT => {
            (k, mods | m.to_hid_modifiers())
        }
        Action::TriggerMacro(_) => return (Action::Key(KeyCode::N), HidModifiers::new()),
        _ => (KeyCode::No, mods),
    };

    let key = |k: KeyCode| (Action::Key(k), mods);
    let text = |m: MacroId| (m.as_action(), HidModifiers::new());

    match keycode {
        KeyCode::A => key(KeyCode::O),
        KeyCode::B => text(MacroId::Efore),
        KeyCode::C => key(KeyCode::Y),
        KeyCode::D => key(KeyCode::Y),
        KeyCode::E => key(KeyCode::U),
        KeyCode::G => key(KeyCode::Y),
        KeyCode::I => text(MacroId::On),
        KeyCode::J => text(MacroId::Ust),
        KeyCode::K => key(KeyCode::S),
        KeyCode::L => key(KeyCode::K),
        KeyCode::M => text(MacroId::Ent),
        KeyCode::N => text(MacroId::Ion),
        KeyCode::O => key(KeyCode::A),
        KeyCode::P => key(KeyCode::Y),
        KeyCode::R => key(KeyCode::L),
        KeyCode::S => key(KeyCode::K),
        KeyCode::T => text(MacroId::Ment),
        KeyCode::U => key(KeyCode::E),
        KeyCode::V => text(MacroId::Er),
        KeyCode::W => text(MacroId::Hich),
        KeyCode::X => text(MacroId::Es),
        KeyCode::Y => key(KeyCode::P),
        // `>` -> `=`, `.` -> `` ` ``
        KeyCode::Dot if mods.has_shift() => (Action::Key(KeyCode::Equal), mods & !HidModifiers::SHIFT_MASK),
        KeyCode::Dot => key(KeyCode::Grave),
        // `<` -> `=`, `,` -> ` but`
        KeyCode::Comma if mods.has_shift() => (Action::Key(KeyCode::Equal), mods & !HidModifiers::SHIFT_MASK),
        KeyCode::Comma => text(MacroId::SpaceBut),
        KeyCode::Equal | KeyCode::Minus => (
            Action::KeyWithModifier(KeyCode::Dot, LSHIFT),
            mods & !HidModifiers::SHIFT_MASK,
        ),
        k if k.is_digit() => key(KeyCode::Dot),
        _ => key(KeyCode::N),
    }
}
