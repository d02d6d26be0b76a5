use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use bitfield_struct::bitfield;
use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

/// Modifier combination as written in a keymap.
///
/// To represent all combinations of modifiers, at least 5 bits are needed.
/// 1 bit for Left/Right, 4 bits for modifier type. Represented in LSB format.
///
/// | bit4 | bit3 | bit2 | bit1 | bit0 |
/// | --- | --- | --- | --- | --- |
/// | L/R | GUI | ALT |SHIFT| CTRL|
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Serialize, Deserialize, MaxSize, Eq, PartialEq)]
pub struct ModifierCombination {
    #[bits(1)]
    pub ctrl: bool,
    #[bits(1)]
    pub shift: bool,
    #[bits(1)]
    pub alt: bool,
    #[bits(1)]
    pub gui: bool,
    #[bits(1)]
    pub right: bool,
    #[bits(3)]
    _reserved: u8,
}

impl BitOr for ModifierCombination {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}

pub const CTRL: ModifierCombination = ModifierCombination::new().with_ctrl(true);
pub const SHIFT: ModifierCombination = ModifierCombination::new().with_shift(true);
pub const ALT: ModifierCombination = ModifierCombination::new().with_alt(true);
pub const GUI: ModifierCombination = ModifierCombination::new().with_gui(true);
pub const RIGHT: ModifierCombination = ModifierCombination::new().with_right(true);

pub const LCTRL: ModifierCombination = ModifierCombination::new_from(false, false, false, false, true);
pub const LSHIFT: ModifierCombination = ModifierCombination::new_from(false, false, false, true, false);
pub const LALT: ModifierCombination = ModifierCombination::new_from(false, false, true, false, false);
pub const LGUI: ModifierCombination = ModifierCombination::new_from(false, true, false, false, false);
pub const RCTRL: ModifierCombination = ModifierCombination::new_from(true, false, false, false, true);
pub const RSHIFT: ModifierCombination = ModifierCombination::new_from(true, false, false, true, false);
pub const RALT: ModifierCombination = ModifierCombination::new_from(true, false, true, false, false);
pub const RGUI: ModifierCombination = ModifierCombination::new_from(true, true, false, false, false);

impl ModifierCombination {
    pub const fn new_from(right: bool, gui: bool, alt: bool, shift: bool, ctrl: bool) -> Self {
        ModifierCombination::new()
            .with_right(right)
            .with_gui(gui)
            .with_alt(alt)
            .with_shift(shift)
            .with_ctrl(ctrl)
    }

    /// Get modifier hid report bits from modifier combination
    pub const fn to_hid_modifiers(self) -> HidModifiers {
        if !self.right() {
            HidModifiers::new()
                .with_left_ctrl(self.ctrl())
                .with_left_shift(self.shift())
                .with_left_alt(self.alt())
                .with_left_gui(self.gui())
        } else {
            HidModifiers::new()
                .with_right_ctrl(self.ctrl())
                .with_right_shift(self.shift())
                .with_right_alt(self.alt())
                .with_right_gui(self.gui())
        }
    }
}

/// Modifier byte of a HID keyboard report, one bit per physical modifier key.
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Serialize, Deserialize, MaxSize, Eq, PartialEq)]
pub struct HidModifiers {
    #[bits(1)]
    pub left_ctrl: bool,
    #[bits(1)]
    pub left_shift: bool,
    #[bits(1)]
    pub left_alt: bool,
    #[bits(1)]
    pub left_gui: bool,
    #[bits(1)]
    pub right_ctrl: bool,
    #[bits(1)]
    pub right_shift: bool,
    #[bits(1)]
    pub right_alt: bool,
    #[bits(1)]
    pub right_gui: bool,
}

impl BitOr for HidModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() | rhs.into_bits())
    }
}
impl BitAnd for HidModifiers {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.into_bits() & rhs.into_bits())
    }
}
impl Not for HidModifiers {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.into_bits())
    }
}
impl BitAndAssign for HidModifiers {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}
impl BitOrAssign for HidModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl HidModifiers {
    /// Both shift keys
    pub const SHIFT_MASK: Self = Self::new().with_left_shift(true).with_right_shift(true);
    pub const LEFT_SHIFT: Self = Self::new().with_left_shift(true);
    pub const RIGHT_ALT: Self = Self::new().with_right_alt(true);

    /// Returns `true` if either shift is held
    pub fn has_shift(self) -> bool {
        (self & Self::SHIFT_MASK).into_bits() != 0
    }

    pub fn is_empty(self) -> bool {
        self.into_bits() == 0
    }
}

impl From<ModifierCombination> for HidModifiers {
    fn from(value: ModifierCombination) -> Self {
        value.to_hid_modifiers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combination_to_hid_modifiers() {
        assert_eq!((CTRL | SHIFT).to_hid_modifiers().into_bits(), 0b0000_0011);
        assert_eq!((RIGHT | SHIFT).to_hid_modifiers(), HidModifiers::new().with_right_shift(true));
        assert_eq!((RIGHT | GUI).to_hid_modifiers().into_bits(), 0b1000_0000);
    }

    #[test]
    fn test_shift_mask() {
        assert!(HidModifiers::LEFT_SHIFT.has_shift());
        assert!(HidModifiers::new().with_right_shift(true).has_shift());
        assert!(!HidModifiers::RIGHT_ALT.has_shift());
        let mods = HidModifiers::LEFT_SHIFT | HidModifiers::RIGHT_ALT;
        assert_eq!(mods & !HidModifiers::SHIFT_MASK, HidModifiers::RIGHT_ALT);
    }
}
