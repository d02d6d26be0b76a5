use serde::{Deserialize, Serialize};
use strum::FromRepr;

use crate::modifier::HidModifiers;

/// Keycodes in the HID keyboard/keypad usage page.
///
/// Only the usages a split ortholinear layout can reach are listed; media keys use their
/// keyboard-page usages and are translated to consumer reports by the host stack.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Reserved, no-key.
    No = 0x00,
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,
    /// `1` and `!`
    Kc1 = 0x1E,
    /// `2` and `@`
    Kc2 = 0x1F,
    /// `3` and `#`
    Kc3 = 0x20,
    /// `4` and `$`
    Kc4 = 0x21,
    /// `5` and `%`
    Kc5 = 0x22,
    /// `6` and `^`
    Kc6 = 0x23,
    /// `7` and `&`
    Kc7 = 0x24,
    /// `8` and `*`
    Kc8 = 0x25,
    /// `9` and `(`
    Kc9 = 0x26,
    /// `0` and `)`
    Kc0 = 0x27,
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    /// `-` and `_`
    Minus = 0x2D,
    /// `=` and `+`
    Equal = 0x2E,
    /// `[` and `{`
    LeftBracket = 0x2F,
    /// `]` and `}`
    RightBracket = 0x30,
    /// `\` and `|`
    Backslash = 0x31,
    /// `;` and `:`
    Semicolon = 0x33,
    /// `'` and `"`
    Quote = 0x34,
    /// `` ` `` and `~`
    Grave = 0x35,
    /// `,` and `<`
    Comma = 0x36,
    /// `.` and `>`
    Dot = 0x37,
    /// `/` and `?`
    Slash = 0x38,
    CapsLock = 0x39,
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,
    Application = 0x65,
    AudioMute = 0xA8,
    AudioVolUp = 0xA9,
    AudioVolDown = 0xAA,
    MediaNextTrack = 0xAB,
    MediaPrevTrack = 0xAC,
    MediaStop = 0xAD,
    MediaPlayPause = 0xAE,
    LCtrl = 0xE0,
    LShift = 0xE1,
    LAlt = 0xE2,
    LGui = 0xE3,
    RCtrl = 0xE4,
    RShift = 0xE5,
    RAlt = 0xE6,
    RGui = 0xE7,
}

impl KeyCode {
    /// Returns `true` if the keycode is one of `A` ~ `Z`
    pub fn is_letter(self) -> bool {
        KeyCode::A <= self && self <= KeyCode::Z
    }

    /// Returns `true` if the keycode is one of the number row keys
    pub fn is_digit(self) -> bool {
        KeyCode::Kc1 <= self && self <= KeyCode::Kc0
    }

    /// Returns `true` if the keycode is a modifier keycode
    pub fn is_modifier(self) -> bool {
        KeyCode::LCtrl <= self && self <= KeyCode::RGui
    }

    /// Returns the HID report bit of a modifier keycode, empty for other keycodes.
    pub fn to_hid_modifiers(self) -> HidModifiers {
        if self.is_modifier() {
            HidModifiers::from_bits(1 << (self as u8 - KeyCode::LCtrl as u8))
        } else {
            HidModifiers::new()
        }
    }

    /// Does current keycode continue Caps Word?
    pub fn is_caps_word_continue_key(self) -> bool {
        self.is_letter()
            || self.is_digit()
            || matches!(self, KeyCode::Minus | KeyCode::Backspace | KeyCode::Delete)
    }

    /// Is current keycode shifted by Caps Word?
    pub fn is_caps_word_shifted_key(self) -> bool {
        self.is_letter() || self == KeyCode::Minus
    }
}

impl ::postcard::experimental::max_size::MaxSize for KeyCode {
    const POSTCARD_MAX_SIZE: usize = 1usize;
}

impl From<u8> for KeyCode {
    fn from(value: u8) -> Self {
        Self::from_repr(value).unwrap_or(KeyCode::No)
    }
}

/// Punctuation keys with their unshifted and shifted characters, en-US layout
const PUNCTUATION: [(KeyCode, u8, u8); 11] = [
    (KeyCode::Minus, b'-', b'_'),
    (KeyCode::Equal, b'=', b'+'),
    (KeyCode::LeftBracket, b'[', b'{'),
    (KeyCode::RightBracket, b']', b'}'),
    (KeyCode::Backslash, b'\\', b'|'),
    (KeyCode::Semicolon, b';', b':'),
    (KeyCode::Quote, b'\'', b'"'),
    (KeyCode::Grave, b'`', b'~'),
    (KeyCode::Comma, b',', b'<'),
    (KeyCode::Dot, b'.', b'>'),
    (KeyCode::Slash, b'/', b'?'),
];

/// Shifted characters of the number row, starting from `1`
const SHIFTED_DIGITS: &[u8; 10] = b"!@#$%^&*()";

/// Convert an ascii char to keycode.
/// The bool is whether the keycode should be shifted, assumes en-us keyboard mapping.
pub fn from_ascii(ascii: u8) -> (KeyCode, bool) {
    match ascii {
        b'a'..=b'z' => (KeyCode::from(KeyCode::A as u8 + (ascii - b'a')), false),
        b'A'..=b'Z' => (KeyCode::from(KeyCode::A as u8 + (ascii - b'A')), true),
        b'1'..=b'9' => (KeyCode::from(KeyCode::Kc1 as u8 + (ascii - b'1')), false),
        b'0' => (KeyCode::Kc0, false),
        b' ' => (KeyCode::Space, false),
        b'\n' => (KeyCode::Enter, false),
        b'\t' => (KeyCode::Tab, false),
        b'\x08' => (KeyCode::Backspace, false),
        b'\x1B' => (KeyCode::Escape, false),
        b'\x7F' => (KeyCode::Delete, false),
        _ => {
            if let Some(i) = SHIFTED_DIGITS.iter().position(|&c| c == ascii) {
                return (KeyCode::from(KeyCode::Kc1 as u8 + i as u8), true);
            }
            for (keycode, plain, shifted) in PUNCTUATION {
                if ascii == plain {
                    return (keycode, false);
                }
                if ascii == shifted {
                    return (keycode, true);
                }
            }
            (KeyCode::No, false)
        }
    }
}

/// Convert a keycode to the ascii char it types, assumes en-us keyboard mapping.
/// Returns 0 if the key doesn't type a printable char.
pub fn to_ascii(keycode: KeyCode, shifted: bool) -> u8 {
    if keycode.is_letter() {
        let base = if shifted { b'A' } else { b'a' };
        return base + (keycode as u8 - KeyCode::A as u8);
    }
    if keycode.is_digit() {
        let idx = (keycode as u8 - KeyCode::Kc1 as u8) as usize;
        return match (shifted, keycode) {
            (true, _) => SHIFTED_DIGITS[idx],
            (false, KeyCode::Kc0) => b'0',
            (false, _) => b'1' + idx as u8,
        };
    }
    match (keycode, shifted) {
        (KeyCode::Space, false) => b' ',
        (KeyCode::Enter, false) => b'\n',
        (KeyCode::Tab, false) => b'\t',
        (KeyCode::Backspace, false) => b'\x08',
        (KeyCode::Escape, false) => b'\x1B',
        (KeyCode::Delete, false) => b'\x7F',
        _ => PUNCTUATION
            .iter()
            .find(|(k, _, _)| *k == keycode)
            .map(|&(_, plain, upper)| if shifted { upper } else { plain })
            .unwrap_or(0),
    }
}
