use embassy_time::Duration;

use crate::config::{KeyboardConfig, TapHoldConfig};
use crate::keyboard_macros::{self, TextOutput};
use crate::keymap::LED_COUNT;
use crate::ledmap::{self, LEDMAP};
use crate::rgb_matrix::RgbMatrix;
use crate::types::action::{Action, KeyAction};
use crate::types::modifier::HidModifiers;
use crate::{magic, tap_hold};

/// Callbacks the key processor calls while processing keys and refreshing LEDs.
///
/// Every method has a default which keeps the stock behavior.
pub trait KeyboardHooks {
    /// Tapping term of a dual-role key, queried when the key is pressed
    fn tapping_term(&self, _action: &KeyAction, config: &TapHoldConfig) -> Duration {
        config.tapping_term
    }

    /// Modifiers remembered along with a key for the repeat keys
    fn remember_mods(&self, _action: &KeyAction, mods: HidModifiers) -> HidModifiers {
        mods
    }

    /// Output of the alternate repeat key, the default repeats the last key
    fn alt_repeat(&self, last: &KeyAction, mods: HidModifiers) -> (Action, HidModifiers) {
        (last.to_action(), mods)
    }

    /// Called on every press and release before the default handling.
    /// Return `false` to skip the default handling.
    fn process_record(
        &mut self,
        _action: &Action,
        _pressed: bool,
        _repeat_count: i8,
        _out: &mut impl TextOutput,
    ) -> bool {
        true
    }

    /// Called on every LED frame, returns `true` if something was painted
    fn rgb_matrix_indicators(
        &self,
        _layer: u8,
        _config: &KeyboardConfig,
        _matrix: &mut RgbMatrix<LED_COUNT>,
    ) -> bool {
        false
    }

    /// Called once after the keyboard is initialized
    fn post_init(&mut self, _matrix: &mut RgbMatrix<LED_COUNT>) {}
}

/// The Magic Sturdy layout callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicSturdy;

impl KeyboardHooks for MagicSturdy {
    fn tapping_term(&self, action: &KeyAction, config: &TapHoldConfig) -> Duration {
        tap_hold::tapping_term(action, config)
    }

    fn remember_mods(&self, action: &KeyAction, mods: HidModifiers) -> HidModifiers {
        magic::remember_mods(action, mods)
    }

    fn alt_repeat(&self, last: &KeyAction, mods: HidModifiers) -> (Action, HidModifiers) {
        magic::alt_repeat(last, mods)
    }

    fn process_record(&mut self, action: &Action, pressed: bool, repeat_count: i8, out: &mut impl TextOutput) -> bool {
        keyboard_macros::process_record_user(action, pressed, repeat_count, out)
    }

    fn rgb_matrix_indicators(&self, layer: u8, config: &KeyboardConfig, matrix: &mut RgbMatrix<LED_COUNT>) -> bool {
        ledmap::rgb_matrix_indicators(layer, config, matrix, &LEDMAP)
    }

    fn post_init(&mut self, matrix: &mut RgbMatrix<LED_COUNT>) {
        info!("Magic Sturdy keymap initialized");
        matrix.enable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{HRM_E, HRM_T};
    use crate::types::keycode::KeyCode;

    struct Stock;
    impl KeyboardHooks for Stock {}

    #[test]
    fn test_stock_hooks() {
        let config = TapHoldConfig::default();
        assert_eq!(Stock.tapping_term(&HRM_E, &config), config.tapping_term);
        assert_eq!(
            Stock.alt_repeat(&HRM_T, HidModifiers::new()),
            (Action::Key(KeyCode::T), HidModifiers::new())
        );
        let mut matrix = RgbMatrix::new();
        Stock.post_init(&mut matrix);
        assert!(!matrix.is_enabled());
        assert!(!Stock.rgb_matrix_indicators(0, &KeyboardConfig::default(), &mut matrix));
    }

    #[test]
    fn test_magic_sturdy_hooks() {
        let mut hooks = MagicSturdy;
        let config = TapHoldConfig::default();
        assert_eq!(hooks.tapping_term(&HRM_E, &config), Duration::from_millis(180));
        assert_eq!(hooks.alt_repeat(&HRM_E, HidModifiers::new()).0, Action::Key(KeyCode::U));

        let mut matrix = RgbMatrix::new();
        hooks.post_init(&mut matrix);
        assert!(matrix.is_enabled());
        assert!(hooks.rgb_matrix_indicators(0, &KeyboardConfig::default(), &mut matrix));

        let mut text: heapless::String<8> = heapless::String::new();
        assert!(!hooks.process_record(&Action::TriggerMacro(1), true, -1, &mut text));
        assert_eq!(text.as_str(), "ment");
    }
}
