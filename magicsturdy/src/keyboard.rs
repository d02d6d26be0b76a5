use embassy_time::Instant;
use heapless::{Deque, String};

use crate::config::{BehaviorConfig, KeyboardConfig};
use crate::descriptor::KeyboardReport;
use crate::eeconfig::Eeconfig;
use crate::error::Error;
use crate::event::KeyEvent;
use crate::hooks::KeyboardHooks;
use crate::keymap::{COL, KeyMap, LED_COUNT, ROW};
use crate::reporter::Reporter;
use crate::rgb_matrix::RgbMatrix;
use crate::types::action::{Action, KeyAction};
use crate::types::keycode::{KeyCode, from_ascii};
use crate::types::modifier::{HidModifiers, ModifierCombination};

/// Max number of key events buffered while a tap/hold decision is pending
pub const UNPROCESSED_EVENTS_SIZE: usize = 16;

/// Max length of the text typed by a single key press
const MACRO_TEXT_SIZE: usize = 16;

/// A dual-role key waiting for its tap/hold decision
#[derive(Debug, Clone, Copy)]
struct PendingTapHold {
    event: KeyEvent,
    key_action: KeyAction,
    tap: Action,
    hold: Action,
    /// The key becomes a hold at this time
    deadline: Instant,
}

/// What a pressed key registered, it's released when the key goes up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveKey {
    /// Processed by the default handling
    Action(Action),
    /// Consumed by the user hook
    Consumed(Action),
}

/// Key processor.
///
/// Turns key events into HID reports: resolves actions through the layer stack, decides
/// tap/hold of dual-role keys, keeps the repeat key state and runs the user hooks.
pub struct Keyboard<H: KeyboardHooks, R: Reporter<ReportType = KeyboardReport>> {
    keymap: KeyMap,
    hooks: H,
    reporter: R,
    behavior: BehaviorConfig,
    config: KeyboardConfig,
    rgb_matrix: RgbMatrix<LED_COUNT>,

    /// Action registered by each pressed position
    active_keys: [[Option<ActiveKey>; COL]; ROW],

    /// Tap/hold key which is not decided yet
    pending: Option<PendingTapHold>,

    /// Key events which arrived while a tap/hold decision was pending
    unprocessed_events: Deque<KeyEvent, UNPROCESSED_EVENTS_SIZE>,

    /// Held modifier keys and hold-side modifiers
    held_modifiers: HidModifiers,

    /// The modifiers coming from pressed `Action::KeyWithModifier`
    with_modifiers: HidModifiers,

    /// The held keys for the keyboard hid report, except the modifiers
    held_keycodes: [KeyCode; 6],

    /// Registered key position
    registered_keys: [Option<(u8, u8)>; 6],

    /// Macro text typing state, it overrides all other modifiers
    macro_texting: bool,
    macro_caps: bool,

    /// The last key remembered by the repeat keys and its modifiers
    last_key: KeyAction,
    last_mods: HidModifiers,

    /// Positive while the repeat key repeats, negative while the alternate repeat key repeats
    repeat_count: i8,

    /// Modifiers replacing the held ones while a repeat key output is pressed
    repeat_mods: Option<HidModifiers>,

    caps_word: bool,
}

impl<H: KeyboardHooks, R: Reporter<ReportType = KeyboardReport>> Keyboard<H, R> {
    pub fn new(keymap: KeyMap, hooks: H, reporter: R, behavior: BehaviorConfig) -> Self {
        Self {
            keymap,
            hooks,
            reporter,
            behavior,
            config: KeyboardConfig::default(),
            rgb_matrix: RgbMatrix::new(),
            active_keys: [[None; COL]; ROW],
            pending: None,
            unprocessed_events: Deque::new(),
            held_modifiers: HidModifiers::new(),
            with_modifiers: HidModifiers::new(),
            held_keycodes: [KeyCode::No; 6],
            registered_keys: [None; 6],
            macro_texting: false,
            macro_caps: false,
            last_key: KeyAction::No,
            last_mods: HidModifiers::new(),
            repeat_count: 0,
            repeat_mods: None,
            caps_word: false,
        }
    }

    /// Run the post init hook, call it once before processing keys
    pub fn post_init(&mut self) {
        self.hooks.post_init(&mut self.rgb_matrix);
    }

    /// Process a key event.
    pub fn process(&mut self, event: KeyEvent) -> Result<(), Error> {
        if event.row as usize >= ROW || event.col as usize >= COL {
            error!("Invalid key position: ({}, {})", event.row, event.col);
            return Err(Error::InvalidPosition {
                row: event.row,
                col: event.col,
            });
        }
        self.process_inner(event);
        Ok(())
    }

    /// Advance time without key events, a pending dual-role key whose tapping term is over
    /// becomes a hold.
    pub fn tick(&mut self, now: Instant) {
        if let Some(pending) = self.pending {
            if now >= pending.deadline {
                self.resolve_hold(pending);
            }
        }
    }

    /// Paint the per-frame indicators of the current layer.
    /// Returns `true` if the hook painted something, nothing is painted while the matrix is off.
    pub fn render_leds(&mut self) -> bool {
        if !self.rgb_matrix.is_enabled() {
            return false;
        }
        let layer = self.keymap.get_activated_layer();
        self.hooks
            .rgb_matrix_indicators(layer, &self.config, &mut self.rgb_matrix)
    }

    /// Serialize the persistent settings into `buf`
    pub fn save_config<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], Error> {
        Eeconfig::capture(&self.config, &self.rgb_matrix).save(buf)
    }

    /// Restore the persistent settings, the current settings are kept on error
    pub fn load_config(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let eeconfig = Eeconfig::load(bytes)?;
        eeconfig.apply(&mut self.config, &mut self.rgb_matrix);
        Ok(())
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut KeyMap {
        &mut self.keymap
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn rgb_matrix(&self) -> &RgbMatrix<LED_COUNT> {
        &self.rgb_matrix
    }

    pub fn rgb_matrix_mut(&mut self) -> &mut RgbMatrix<LED_COUNT> {
        &mut self.rgb_matrix
    }

    pub fn keyboard_config(&self) -> &KeyboardConfig {
        &self.config
    }

    pub fn keyboard_config_mut(&mut self) -> &mut KeyboardConfig {
        &mut self.config
    }

    pub fn repeat_count(&self) -> i8 {
        self.repeat_count
    }

    pub fn is_caps_word_on(&self) -> bool {
        self.caps_word
    }

    /// Returns `true` if a dual-role key is waiting for its tap/hold decision
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn process_inner(&mut self, event: KeyEvent) {
        if let Some(pending) = self.pending {
            if !event.pressed && event.row == pending.event.row && event.col == pending.event.col {
                if event.time < pending.deadline {
                    self.resolve_tap(pending, event);
                } else {
                    self.resolve_hold(pending);
                    self.release(event);
                }
                return;
            }

            if event.time >= pending.deadline {
                // The term is over before this event, decide first
                self.resolve_hold(pending);
                self.process_inner(event);
                return;
            }

            if self.unprocessed_events.push_back(event).is_err() {
                warn!("Unprocessed event buffer full, dropping {:?}", event);
            }
            return;
        }

        if event.pressed {
            self.press(event);
        } else {
            self.release(event);
        }
    }

    fn press(&mut self, event: KeyEvent) {
        let key_action = self.keymap.get_action(event.row as usize, event.col as usize);
        match key_action {
            KeyAction::No | KeyAction::Transparent => (),
            KeyAction::Single(action) => self.press_action(event, key_action, action),
            KeyAction::TapHold(tap, hold) => {
                let tapping_term = self.hooks.tapping_term(&key_action, &self.behavior.tap_hold);
                debug!("Tap/hold pressed: {:?}, term {}ms", key_action, tapping_term.as_millis());
                self.pending = Some(PendingTapHold {
                    event,
                    key_action,
                    tap,
                    hold,
                    deadline: event.time + tapping_term,
                });
            }
        }
    }

    fn resolve_tap(&mut self, pending: PendingTapHold, release: KeyEvent) {
        debug!("TAP action: {:?}", pending.tap);
        self.pending = None;
        self.press_action(pending.event, pending.key_action, pending.tap);
        self.replay_unprocessed();
        self.release(release);
    }

    fn resolve_hold(&mut self, pending: PendingTapHold) {
        debug!("HOLD action: {:?}", pending.hold);
        self.pending = None;
        self.press_action(pending.event, pending.key_action, pending.hold);
        self.replay_unprocessed();
    }

    fn replay_unprocessed(&mut self) {
        let mut events = core::mem::replace(&mut self.unprocessed_events, Deque::new());
        while let Some(event) = events.pop_front() {
            self.process_inner(event);
        }
    }

    /// Press an action resolved from the keymap
    fn press_action(&mut self, event: KeyEvent, key_action: KeyAction, action: Action) {
        if matches!(action, Action::Repeat | Action::AltRepeat) {
            self.press_repeat(event, action);
            return;
        }

        self.repeat_count = 0;
        if action.is_repeatable() {
            self.last_key = key_action;
            self.last_mods = self.hooks.remember_mods(&key_action, self.held_modifiers);
        }
        self.dispatch_press(event, action);
    }

    fn press_repeat(&mut self, event: KeyEvent, action: Action) {
        if self.last_key.is_empty() {
            debug!("Nothing to repeat");
            return;
        }

        let (output, mods) = if action == Action::Repeat {
            self.repeat_count = if self.repeat_count <= 0 {
                1
            } else {
                self.repeat_count.saturating_add(1)
            };
            (self.last_key.to_action(), self.last_mods)
        } else {
            self.repeat_count = if self.repeat_count >= 0 {
                -1
            } else {
                self.repeat_count.saturating_sub(1)
            };
            self.hooks.alt_repeat(&self.last_key, self.last_mods)
        };
        debug!("Repeat {:?} -> {:?}, count {}", self.last_key, output, self.repeat_count);

        self.repeat_mods = Some(mods);
        self.dispatch_press(event, output);
        self.repeat_mods = None;
    }

    /// Run the user hook, then the default handling if the hook didn't consume the press
    fn dispatch_press(&mut self, event: KeyEvent, action: Action) {
        let mut text: String<MACRO_TEXT_SIZE> = String::new();
        let handled = self.hooks.process_record(&action, true, self.repeat_count, &mut text);
        self.type_text(&text, event);

        let active = if handled {
            self.process_action(action, event);
            ActiveKey::Action(action)
        } else {
            ActiveKey::Consumed(action)
        };
        self.active_keys[event.row as usize][event.col as usize] = Some(active);
    }

    fn release(&mut self, event: KeyEvent) {
        let Some(active) = self.active_keys[event.row as usize][event.col as usize].take() else {
            return;
        };

        let action = match active {
            ActiveKey::Action(a) | ActiveKey::Consumed(a) => a,
        };
        let mut text: String<MACRO_TEXT_SIZE> = String::new();
        let handled = self.hooks.process_record(&action, false, self.repeat_count, &mut text);
        self.type_text(&text, event);

        if handled && active == ActiveKey::Action(action) {
            self.process_action(action, event);
        }
    }

    /// Default handling of an action
    fn process_action(&mut self, action: Action, event: KeyEvent) {
        match action {
            Action::No | Action::Transparent | Action::Repeat | Action::AltRepeat => (),
            Action::Key(key) => self.process_action_key(key, event),
            Action::KeyWithModifier(key, modifiers) => {
                if event.pressed {
                    self.with_modifiers |= modifiers.to_hid_modifiers();
                } else {
                    self.with_modifiers &= !modifiers.to_hid_modifiers();
                }
                self.process_action_key(key, event);
            }
            Action::Modifier(modifiers) => {
                if event.pressed {
                    self.register_modifiers(modifiers);
                } else {
                    self.unregister_modifiers(modifiers);
                }
                self.send_keyboard_report();
            }
            Action::LayerOn(layer_num) => self.process_action_layer_switch(layer_num, event),
            Action::TriggerMacro(index) => {
                if event.pressed {
                    warn!("Macro {} is not handled", index);
                }
            }
            Action::CapsWordToggle => {
                if event.pressed {
                    self.caps_word = !self.caps_word;
                    debug!("Caps word: {}", self.caps_word);
                }
            }
        }
    }

    fn process_action_key(&mut self, key: KeyCode, event: KeyEvent) {
        if event.pressed {
            if self.caps_word && !key.is_modifier() && !key.is_caps_word_continue_key() {
                debug!("Caps word ended by {:?}", key);
                self.caps_word = false;
            }
            self.register_key(key, event);
        } else {
            self.unregister_key(key, event);
        }
        self.send_keyboard_report();
    }

    /// Process layer switch action.
    fn process_action_layer_switch(&mut self, layer_num: u8, event: KeyEvent) {
        if event.pressed {
            self.keymap.activate_layer(layer_num);
        } else {
            self.keymap.deactivate_layer(layer_num);
        }
    }

    /// Type ascii text by tapping keys, each char is a press and a release report
    fn type_text(&mut self, text: &str, event: KeyEvent) {
        if text.is_empty() {
            return;
        }
        let press = KeyEvent { pressed: true, ..event };
        for c in text.bytes() {
            let (key, shifted) = from_ascii(c);
            if key == KeyCode::No {
                warn!("No key types char {}", c);
                continue;
            }
            self.macro_texting = true;
            self.macro_caps = shifted;
            self.register_keycode(key, press);
            self.send_keyboard_report();
            self.unregister_keycode(key, press);
            self.send_keyboard_report();
        }
        // Restore the state of the keyboard (held modifiers, etc.) after text typing
        self.macro_texting = false;
        self.send_keyboard_report();
    }

    /// Calculates the combined effect of all modifiers:
    /// - text macro related modifier suppressions + capitalization
    /// - registered (held) modifiers, or the remembered ones of a repeat key
    /// - effect of `Action::KeyWithModifier` (while they are pressed)
    /// - caps word
    pub fn resolve_modifiers(&self) -> HidModifiers {
        if self.macro_texting {
            return if self.macro_caps {
                HidModifiers::LEFT_SHIFT
            } else {
                HidModifiers::new()
            };
        }

        let mut result = self.repeat_mods.unwrap_or(self.held_modifiers);
        result |= self.with_modifiers;
        if self.caps_word && self.held_keycodes.iter().any(|k| k.is_caps_word_shifted_key()) {
            result |= HidModifiers::LEFT_SHIFT;
        }
        result
    }

    fn send_keyboard_report(&mut self) {
        let report = KeyboardReport::new(
            self.resolve_modifiers().into_bits(),
            self.held_keycodes.map(|k| k as u8),
        );
        self.reporter.write_report(report);
    }

    /// Register a key, the key can be a basic keycode or a modifier.
    fn register_key(&mut self, key: KeyCode, event: KeyEvent) {
        if key.is_modifier() {
            self.held_modifiers |= key.to_hid_modifiers();
        } else if key != KeyCode::No {
            self.register_keycode(key, event);
        }
    }

    /// Unregister a key, the key can be a basic keycode or a modifier.
    fn unregister_key(&mut self, key: KeyCode, event: KeyEvent) {
        if key.is_modifier() {
            self.held_modifiers &= !key.to_hid_modifiers();
        } else if key != KeyCode::No {
            self.unregister_keycode(key, event);
        }
    }

    fn slot_of(&self, event: KeyEvent) -> Option<usize> {
        self.registered_keys
            .iter()
            .position(|k| *k == Some((event.row, event.col)))
    }

    /// Register a key to be sent in hid report.
    fn register_keycode(&mut self, key: KeyCode, event: KeyEvent) {
        // The slot of the position first, then the first free slot
        let slot = self
            .slot_of(event)
            .or_else(|| self.held_keycodes.iter().position(|&k| k == KeyCode::No));

        match slot {
            Some(index) => {
                self.held_keycodes[index] = key;
                self.registered_keys[index] = Some((event.row, event.col));
            }
            None => warn!("6KRO report full, dropping {:?}", key),
        }
    }

    /// Unregister a key from hid report.
    fn unregister_keycode(&mut self, key: KeyCode, event: KeyEvent) {
        // The slot of the position first, otherwise release the first same key
        let slot = self
            .slot_of(event)
            .or_else(|| self.held_keycodes.iter().position(|&k| k == key));

        if let Some(index) = slot {
            self.held_keycodes[index] = KeyCode::No;
            self.registered_keys[index] = None;
        }
    }

    /// Register a modifier combination to be sent in hid report.
    fn register_modifiers(&mut self, modifiers: ModifierCombination) {
        self.held_modifiers |= modifiers.to_hid_modifiers();
    }

    /// Unregister a modifier combination from hid report.
    fn unregister_modifiers(&mut self, modifiers: ModifierCombination) {
        self.held_modifiers &= !modifiers.to_hid_modifiers();
    }
}
