use strum::FromRepr;

use crate::types::action::{Action, KeyAction};

/// Text macros sent by the magic key.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroId {
    Ent = 0,
    Ment = 1,
    Er = 2,
    Es = 3,
    Ust = 4,
    On = 5,
    Ion = 6,
    SpaceBut = 7,
    Efore = 8,
    Hich = 9,
}

impl MacroId {
    /// Macro bound to a `TriggerMacro` index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::from_repr(index)
    }

    /// Text typed by the macro
    pub fn text(self) -> &'static str {
        match self {
            MacroId::Ent => "ent",
            MacroId::Ment => "ment",
            MacroId::Er => "er",
            MacroId::Es => "es",
            MacroId::Ust => "ust",
            MacroId::On => "on",
            MacroId::Ion => "ion",
            MacroId::SpaceBut => " but",
            MacroId::Efore => "efore",
            MacroId::Hich => "hich",
        }
    }

    pub const fn as_action(self) -> Action {
        Action::TriggerMacro(self as u8)
    }

    pub const fn as_key_action(self) -> KeyAction {
        KeyAction::Single(self.as_action())
    }
}

/// Sink for text typed by macros.
pub trait TextOutput {
    /// Tap the key(s) typing `c`
    fn send_char(&mut self, c: char);

    fn send_string(&mut self, s: &str) {
        for c in s.chars() {
            self.send_char(c);
        }
    }
}

impl<const N: usize> TextOutput for heapless::String<N> {
    fn send_char(&mut self, c: char) {
        if self.push(c).is_err() {
            warn!("Macro text buffer full, dropping {}", c);
        }
    }
}

/// Repeat count at or below which the magic key is considered chained
const CHAINED_REPEAT: i8 = -2;

/// User key processing, called on every key press and release before the default handling.
///
/// `repeat_count` is the repeat key counter: positive while the repeat key repeats, negative
/// while the magic key repeats, 0 otherwise.
///
/// Returns `false` if the event was consumed.
pub fn process_record_user(action: &Action, pressed: bool, repeat_count: i8, out: &mut impl TextOutput) -> bool {
    if !pressed {
        return true;
    }

    let chained = repeat_count <= CHAINED_REPEAT;
    let id = match action {
        Action::TriggerMacro(index) => MacroId::from_index(*index),
        _ => None,
    };

    if chained && id != Some(MacroId::Ust) {
        debug!("Chained magic key, repeat count {}", repeat_count);
        out.send_char('n');
        return false;
    }

    match id {
        Some(MacroId::Ust) if chained => out.send_string("ment"),
        Some(id) => out.send_string(id.text()),
        None => return true,
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::keycode::KeyCode;

    #[derive(Default)]
    struct Text(String);

    impl TextOutput for Text {
        fn send_char(&mut self, c: char) {
            self.0.push(c);
        }
    }

    fn run(action: Action, pressed: bool, repeat_count: i8) -> (bool, String) {
        let mut out = Text::default();
        let handled = process_record_user(&action, pressed, repeat_count, &mut out);
        (handled, out.0)
    }

    #[test]
    fn test_macro_texts() {
        let expected = [
            (MacroId::Ent, "ent"),
            (MacroId::Ment, "ment"),
            (MacroId::Er, "er"),
            (MacroId::Es, "es"),
            (MacroId::Ust, "ust"),
            (MacroId::On, "on"),
            (MacroId::Ion, "ion"),
            (MacroId::SpaceBut, " but"),
            (MacroId::Efore, "efore"),
            (MacroId::Hich, "hich"),
        ];
        for (id, text) in expected {
            assert_eq!(run(id.as_action(), true, 0), (false, text.to_string()));
            assert_eq!(run(id.as_action(), true, -1), (false, text.to_string()));
        }
    }

    #[test]
    fn test_release_passes_through() {
        assert_eq!(run(MacroId::Ment.as_action(), false, 0), (true, String::new()));
        assert_eq!(run(MacroId::Ment.as_action(), false, -3), (true, String::new()));
    }

    #[test]
    fn test_plain_keys_pass_through() {
        assert_eq!(run(Action::Key(KeyCode::A), true, 0), (true, String::new()));
        assert_eq!(run(Action::Key(KeyCode::A), true, 2), (true, String::new()));
        // Unknown macro index
        assert_eq!(run(Action::TriggerMacro(42), true, 0), (true, String::new()));
    }

    #[test]
    fn test_chained_magic_types_n() {
        assert_eq!(run(Action::Key(KeyCode::A), true, -2), (false, "n".to_string()));
        assert_eq!(run(MacroId::Ion.as_action(), true, -2), (false, "n".to_string()));
        assert_eq!(run(Action::TriggerMacro(42), true, -5), (false, "n".to_string()));
    }

    #[test]
    fn test_chained_ust() {
        assert_eq!(run(MacroId::Ust.as_action(), true, -2), (false, "ment".to_string()));
        assert_eq!(run(MacroId::Ust.as_action(), true, -4), (false, "ment".to_string()));
    }

    #[test]
    fn test_from_index() {
        assert_eq!(MacroId::from_index(7), Some(MacroId::SpaceBut));
        assert_eq!(MacroId::from_index(10), None);
    }
}
