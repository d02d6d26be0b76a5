use strum::FromRepr;

use crate::types::action::{Action, KeyAction};
use crate::types::keycode::KeyCode;
use crate::types::modifier::{LALT, LCTRL, LGUI, LSHIFT, ModifierCombination, RCTRL, RGUI, RSHIFT};
use crate::{a, k, layer, lt, mt, shifted, wm};

/// Rows of the keymap grid: 5 per hand, the last row of each hand holds the thumb keys.
pub const ROW: usize = 10;
pub const COL: usize = 6;
pub const NUM_LAYER: usize = 3;
/// Number of per-key LEDs
pub const LED_COUNT: usize = 52;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    Base = 0,
    Sym = 1,
    Nav = 2,
}

// Home row mods
pub const HRM_S: KeyAction = mt!(S, LCTRL);
pub const HRM_T: KeyAction = mt!(T, LALT);
pub const HRM_R: KeyAction = mt!(R, LSHIFT);
pub const HRM_D: KeyAction = mt!(D, LGUI);
pub const HRM_N: KeyAction = mt!(N, RGUI);
pub const HRM_E: KeyAction = mt!(E, RSHIFT);
pub const HRM_A: KeyAction = mt!(A, LALT);
pub const HRM_I: KeyAction = mt!(I, RCTRL);

// Layer-tap thumb keys
pub const SPC_NAV: KeyAction = lt!(Layer::Nav as u8, Space);
pub const BSPC_SYM: KeyAction = lt!(Layer::Sym as u8, Backspace);

/// The alternate repeat key
pub const MAGIC: KeyAction = KeyAction::Single(Action::AltRepeat);
pub const CW_TOGG: KeyAction = KeyAction::Single(Action::CapsWordToggle);

// macOS editing shortcuts
const CMD: ModifierCombination = LGUI;
const CMD_CTRL_SHIFT: ModifierCombination = ModifierCombination::new_from(false, true, false, true, true);
pub const MAC_UND: KeyAction = wm!(Z, CMD);
pub const MAC_CUT: KeyAction = wm!(X, CMD);
pub const MAC_CPY: KeyAction = wm!(C, CMD);
pub const MAC_PST: KeyAction = wm!(V, CMD);
/// Screenshot of a selection to the clipboard
pub const MAC_SCR: KeyAction = wm!(Kc4, CMD_CTRL_SHIFT);

#[rustfmt::skip]
pub const fn get_default_keymap() -> [[[KeyAction; COL]; ROW]; NUM_LAYER] {
    [
        // Base: Magic Sturdy
        layer!([
            [k!(Grave), a!(No), a!(No), shifted!(Equal), k!(Minus), k!(Equal)],
            [CW_TOGG, k!(V), k!(M), k!(L), k!(C), k!(P)],
            [k!(Escape), HRM_S, HRM_T, HRM_R, HRM_D, k!(Y)],
            [a!(No), k!(X), k!(K), k!(J), k!(G), k!(W)],
            [a!(No), a!(No), a!(No), a!(No), SPC_NAV, k!(Enter)],

            [shifted!(LeftBracket), shifted!(RightBracket), shifted!(Kc9), shifted!(Kc0), k!(LeftBracket), k!(RightBracket)],
            [k!(B), MAGIC, k!(U), k!(O), k!(Q), k!(Backslash)],
            [k!(F), HRM_N, HRM_E, HRM_A, HRM_I, k!(Quote)],
            [k!(Z), k!(H), k!(Comma), k!(Dot), k!(Slash), k!(Semicolon)],
            [k!(Tab), BSPC_SYM, a!(No), a!(No), a!(No), a!(No)]
        ]),
        // Sym: F-keys, digits, shifted symbols
        layer!([
            [a!(Transparent), k!(F1), k!(F2), k!(F3), k!(F4), k!(F5)],
            [a!(Transparent), k!(Kc1), k!(Kc2), k!(Kc3), k!(Kc4), k!(Kc5)],
            [a!(Transparent), shifted!(Kc1), shifted!(Kc2), shifted!(Kc3), shifted!(Kc4), shifted!(Kc5)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(No), a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent)],

            [k!(F6), k!(F7), k!(F8), k!(F9), k!(F10), k!(F11)],
            [k!(Kc6), k!(Kc7), k!(Kc8), k!(Kc9), k!(Kc0), k!(F12)],
            [shifted!(Kc6), shifted!(Kc7), shifted!(Kc8), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No), a!(No)]
        ]),
        // Nav: arrows, media, editing shortcuts
        layer!([
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), MAC_SCR, a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), k!(LCtrl), k!(LAlt), k!(LShift), k!(LGui), a!(Transparent)],
            [a!(Transparent), MAC_UND, MAC_CUT, MAC_CPY, MAC_PST, a!(Transparent)],
            [a!(No), a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent)],

            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [k!(PageUp), k!(Home), k!(Up), k!(End), k!(AudioVolUp), a!(Transparent)],
            [k!(PageDown), k!(Left), k!(Down), k!(Right), k!(AudioVolDown), a!(Transparent)],
            [a!(Transparent), k!(MediaPrevTrack), k!(MediaPlayPause), k!(MediaNextTrack), k!(AudioMute), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No), a!(No)]
        ]),
    ]
}

/// LED index of a key position, `None` for grid slots without a key.
///
/// LEDs are chained in layout order: the 24 left hand keys, the 2 left thumb keys,
/// then the same for the right hand.
pub const fn led_index(row: usize, col: usize) -> Option<usize> {
    if col >= COL {
        return None;
    }
    match row {
        0..=3 => Some(row * COL + col),
        4 if col >= 4 => Some(24 + col - 4),
        5..=8 => Some(26 + (row - 5) * COL + col),
        9 if col < 2 => Some(50 + col),
        _ => None,
    }
}

/// Keymap represents the stack of layers.
///
/// RMK-style lookup: `(row, col)` is resolved from the highest active layer down to the
/// default layer, skipping transparent keys.
pub struct KeyMap {
    layers: [[[KeyAction; COL]; ROW]; NUM_LAYER],
    /// Current state of each layer
    layer_state: [bool; NUM_LAYER],
    default_layer: u8,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(get_default_keymap())
    }
}

impl KeyMap {
    pub fn new(layers: [[[KeyAction; COL]; ROW]; NUM_LAYER]) -> Self {
        Self {
            layers,
            layer_state: [false; NUM_LAYER],
            default_layer: Layer::Base as u8,
        }
    }

    /// Action at the position, resolved through the active layers
    pub fn get_action(&self, row: usize, col: usize) -> KeyAction {
        if row >= ROW || col >= COL {
            return KeyAction::No;
        }

        // Iterate from higher layer to lower layer, the lowest checked layer is the default layer
        for (layer_idx, layer) in self.layers.iter().enumerate().rev() {
            if self.layer_state[layer_idx] || layer_idx as u8 == self.default_layer {
                let action = layer[row][col];
                if action == KeyAction::Transparent {
                    continue;
                }
                return action;
            }

            if layer_idx as u8 == self.default_layer {
                break;
            }
        }

        KeyAction::No
    }

    /// Highest active layer
    pub fn get_activated_layer(&self) -> u8 {
        for (layer_idx, _) in self.layers.iter().enumerate().rev() {
            if self.layer_state[layer_idx] || layer_idx as u8 == self.default_layer {
                return layer_idx as u8;
            }
        }

        self.default_layer
    }

    /// Activate given layer
    pub fn activate_layer(&mut self, layer_num: u8) {
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return;
        }
        debug!("Activate layer {}", layer_num);
        self.layer_state[layer_num as usize] = true;
    }

    /// Deactivate given layer
    pub fn deactivate_layer(&mut self, layer_num: u8) {
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return;
        }
        self.layer_state[layer_num as usize] = false;
    }

    pub fn is_layer_active(&self, layer_num: u8) -> bool {
        self.layer_state.get(layer_num as usize).copied().unwrap_or(false)
    }

    /// Position of the first key sending `keycode` on the given layer.
    pub fn find_keycode(&self, layer: u8, keycode: KeyCode) -> Option<(usize, usize)> {
        let layer = self.layers.get(layer as usize)?;
        for (row, keys) in layer.iter().enumerate() {
            for (col, action) in keys.iter().enumerate() {
                if action.tap_keycode() == Some(keycode) && matches!(action, KeyAction::Single(Action::Key(_)) | KeyAction::TapHold(_, _)) {
                    return Some((row, col));
                }
            }
        }
        None
    }
}
