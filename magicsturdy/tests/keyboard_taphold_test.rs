pub mod common;

use embassy_time::Duration;
use magicsturdy::config::{BehaviorConfig, TapHoldConfig};

fn tap_hold_config_with_term(ms: u64) -> BehaviorConfig {
    BehaviorConfig {
        tap_hold: TapHoldConfig {
            tapping_term: Duration::from_millis(ms),
        },
    }
}

mod tap_hold_test {
    use super::*;
    use crate::common::{KC_LALT, KC_LSHIFT, KC_RSHIFT, create_test_keyboard, create_test_keyboard_with_config};
    use crate::{kc8, key_sequence_test};

    #[test]
    fn test_hrm_tap() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [2, 2, true, 10],   // Press HRM_T
                [2, 2, false, 100], // Release before the tapping term
            ],
            expected_reports: [
                [0, [kc8!(T), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_hrm_hold() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [2, 2, true, 10],   // Press HRM_T
                [2, 2, false, 300], // Release after the tapping term
            ],
            expected_reports: [
                [KC_LALT, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_default_term_key_at_190ms_is_tap() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [2, 2, true, 10],   // HRM_T, 200ms
                [2, 2, false, 190],
            ],
            expected_reports: [
                [0, [kc8!(T), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_fast_key_at_190ms_is_hold() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [7, 2, true, 10],   // HRM_E, 180ms
                [7, 2, false, 190],
            ],
            expected_reports: [
                [KC_RSHIFT, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_fast_key_at_170ms_is_tap() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [2, 3, true, 10],   // HRM_R, 180ms
                [2, 3, false, 170],
            ],
            expected_reports: [
                [0, [kc8!(R), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_backspace_sym_tap() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [9, 1, true, 10],   // BSPC_SYM
                [9, 1, false, 170],
            ],
            expected_reports: [
                [0, [kc8!(Backspace), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_backspace_sym_hold_sends_nothing() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [9, 1, true, 10],   // BSPC_SYM
                [9, 1, false, 185],
            ],
            expected_reports: []
        }
    }

    #[test]
    fn test_space_nav_tap() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [4, 4, true, 10],   // SPC_NAV
                [4, 4, false, 190],
            ],
            expected_text: " "
        }
    }

    #[test]
    fn test_rolling_keys_are_taps() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [7, 2, true, 10],  // HRM_E
                [1, 4, true, 30],  // C
                [1, 4, false, 30],
                [7, 2, false, 30], // HRM_E released before its term
            ],
            expected_reports: [
                [0, [kc8!(E), 0, 0, 0, 0, 0]],
                [0, [kc8!(E), kc8!(C), 0, 0, 0, 0]],
                [0, [kc8!(E), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_held_hrm_shifts_next_key() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [7, 2, true, 10],   // HRM_E
                [1, 4, true, 200],  // C, after the term
                [1, 4, false, 10],
                [7, 2, false, 10],
            ],
            expected_reports: [
                [KC_RSHIFT, [0, 0, 0, 0, 0, 0]],
                [KC_RSHIFT, [kc8!(C), 0, 0, 0, 0, 0]],
                [KC_RSHIFT, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_key_inside_term_waits_for_decision() {
        key_sequence_test! {
            keyboard: create_test_keyboard(),
            sequence: [
                [2, 3, true, 10],   // HRM_R
                [1, 4, true, 50],   // C, buffered
                [1, 4, false, 300], // Term is over, shift then C
                [2, 3, false, 10],
            ],
            expected_reports: [
                [KC_LSHIFT, [0, 0, 0, 0, 0, 0]],
                [KC_LSHIFT, [kc8!(C), 0, 0, 0, 0, 0]],
                [KC_LSHIFT, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }

    #[test]
    fn test_custom_tapping_term() {
        key_sequence_test! {
            keyboard: create_test_keyboard_with_config(tap_hold_config_with_term(300)),
            sequence: [
                [2, 2, true, 10],   // HRM_T, 300ms
                [2, 2, false, 250],
                [7, 2, true, 10],   // HRM_E, 280ms
                [7, 2, false, 290],
            ],
            expected_reports: [
                [0, [kc8!(T), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
                [KC_RSHIFT, [0, 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        }
    }
}
