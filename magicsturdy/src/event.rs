use embassy_time::Instant;

/// A physical key transition reported by the matrix scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
    /// When the transition was debounced
    pub time: Instant,
}

impl KeyEvent {
    pub fn new(row: u8, col: u8, pressed: bool, time: Instant) -> Self {
        Self {
            row,
            col,
            pressed,
            time,
        }
    }
}
