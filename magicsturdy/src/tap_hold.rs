use embassy_time::Duration;

use crate::config::TapHoldConfig;
use crate::keymap::{BSPC_SYM, HRM_D, HRM_E, HRM_N, HRM_R};
use crate::types::action::KeyAction;

/// How much sooner the faster dual-role keys turn into a hold
const FAST_HOLD_OFFSET: Duration = Duration::from_millis(20);

/// Tapping term of a dual-role key.
///
/// Shift, GUI and the symbol layer key decide faster than the global tapping term, the
/// other keys use it unchanged.
pub fn tapping_term(action: &KeyAction, config: &TapHoldConfig) -> Duration {
    match *action {
        HRM_R | HRM_D | HRM_N | HRM_E | BSPC_SYM => {
            Duration::from_ticks(config.tapping_term.as_ticks().saturating_sub(FAST_HOLD_OFFSET.as_ticks()))
        }
        _ => config.tapping_term,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k;
    use crate::keymap::{HRM_A, HRM_I, HRM_S, HRM_T, MAGIC, SPC_NAV};

    #[test]
    fn test_fast_keys() {
        let config = TapHoldConfig::default();
        for action in [HRM_R, HRM_D, HRM_N, HRM_E, BSPC_SYM] {
            assert_eq!(tapping_term(&action, &config), Duration::from_millis(180));
        }
    }

    #[test]
    fn test_default_keys() {
        let config = TapHoldConfig::default();
        for action in [HRM_S, HRM_T, HRM_A, HRM_I, SPC_NAV, MAGIC, k!(R), KeyAction::No] {
            assert_eq!(tapping_term(&action, &config), Duration::from_millis(200));
        }
    }

    #[test]
    fn test_follows_configured_term() {
        let config = TapHoldConfig {
            tapping_term: Duration::from_millis(250),
        };
        assert_eq!(tapping_term(&HRM_E, &config), Duration::from_millis(230));
        assert_eq!(tapping_term(&HRM_T, &config), Duration::from_millis(250));

        let config = TapHoldConfig {
            tapping_term: Duration::from_millis(10),
        };
        assert_eq!(tapping_term(&HRM_E, &config), Duration::from_millis(0));

        let config = TapHoldConfig {
            tapping_term: Duration::from_millis(20),
        };
        assert_eq!(tapping_term(&BSPC_SYM, &config), Duration::from_millis(0));
    }
}
