use embassy_time::Duration;

/// Config for configurable action behavior
#[derive(Clone, Copy, Debug, Default)]
pub struct BehaviorConfig {
    pub tap_hold: TapHoldConfig,
}

/// Configurations for tap hold behavior
#[derive(Clone, Copy, Debug)]
pub struct TapHoldConfig {
    /// Global tapping term, a dual-role key held longer than this becomes a hold
    pub tapping_term: Duration,
}

impl Default for TapHoldConfig {
    fn default() -> Self {
        Self {
            tapping_term: Duration::from_millis(200),
        }
    }
}

/// Keyboard level settings toggled at runtime and kept in eeprom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardConfig {
    /// Turn off the per-layer LED colors
    pub disable_layer_led: bool,
}
