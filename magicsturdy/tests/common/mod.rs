pub mod test_macro;

use embassy_time::Instant;
use magicsturdy::config::BehaviorConfig;
use magicsturdy::descriptor::KeyboardReport;
use magicsturdy::event::KeyEvent;
use magicsturdy::hooks::MagicSturdy;
use magicsturdy::keyboard::Keyboard;
use magicsturdy::keymap::KeyMap;
use magicsturdy::reporter::Reporter;
use magicsturdy::types::keycode::{KeyCode, to_ascii};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const KC_LCTRL: u8 = 1 << 0;
pub const KC_LSHIFT: u8 = 1 << 1;
pub const KC_LALT: u8 = 1 << 2;
pub const KC_LGUI: u8 = 1 << 3;
pub const KC_RSHIFT: u8 = 1 << 5;

#[derive(Debug, Clone)]
pub struct TestKeyPress {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
    pub delay: u64, // Delay before this key event in milliseconds
}

/// Records every report sent to the host.
#[derive(Debug, Default)]
pub struct TestReporter {
    pub reports: Vec<KeyboardReport>,
}

impl Reporter for TestReporter {
    type ReportType = KeyboardReport;

    fn write_report(&mut self, report: Self::ReportType) {
        self.reports.push(report);
    }
}

impl TestReporter {
    /// Decode the reports into the text a host would see, en-US layout.
    /// Each newly pressed key types one char, non-printable keys are skipped.
    pub fn text(&self) -> String {
        let mut text = String::new();
        let mut last = [0u8; 6];
        for report in &self.reports {
            let shifted = report.modifier & (KC_LSHIFT | KC_RSHIFT) != 0;
            for key in report.keycodes {
                if key != 0 && !last.contains(&key) {
                    let c = to_ascii(KeyCode::from(key), shifted);
                    if c != 0 {
                        text.push(c as char);
                    }
                }
            }
            last = report.keycodes;
        }
        text
    }
}

pub type TestKeyboard = Keyboard<MagicSturdy, TestReporter>;

pub fn create_test_keyboard_with_config(config: BehaviorConfig) -> TestKeyboard {
    let mut keyboard = Keyboard::new(KeyMap::default(), MagicSturdy, TestReporter::default(), config);
    keyboard.post_init();
    keyboard
}

pub fn create_test_keyboard() -> TestKeyboard {
    create_test_keyboard_with_config(BehaviorConfig::default())
}

/// Feed the key sequence, the clock starts at 0.
/// Pending tap/hold keys see the time passing between two events, like a timer does.
pub fn run_key_sequence(keyboard: &mut TestKeyboard, key_sequence: &[TestKeyPress]) {
    let mut now = 0;
    for key in key_sequence {
        now += key.delay;
        let time = Instant::from_millis(now);
        keyboard.tick(time);
        keyboard
            .process(KeyEvent::new(key.row, key.col, key.pressed, time))
            .expect("valid key position");
    }
}

/// Run the key sequence, then compare all sent reports
pub fn run_key_sequence_test(keyboard: &mut TestKeyboard, key_sequence: &[TestKeyPress], expected_reports: &[KeyboardReport]) {
    run_key_sequence(keyboard, key_sequence);
    let reports = &keyboard.reporter().reports;
    for (i, (expected, report)) in expected_reports.iter().zip(reports.iter()).enumerate() {
        assert_eq!(expected, report, "on #{} reports, expected left but actually right", i);
    }
    assert_eq!(
        expected_reports.len(),
        reports.len(),
        "expected {} reports, got {:?}",
        expected_reports.len(),
        reports
    );
}

/// Run the key sequence, then compare the typed text
pub fn run_key_sequence_text_test(keyboard: &mut TestKeyboard, key_sequence: &[TestKeyPress], expected_text: &str) {
    run_key_sequence(keyboard, key_sequence);
    assert_eq!(keyboard.reporter().text(), expected_text);
    // Every key is released at the end
    assert!(keyboard.reporter().reports.last().is_none_or(|r| r.is_empty()));
}
