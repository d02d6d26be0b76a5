use bitfield_struct::bitfield;
use serde::{Deserialize, Serialize};

use crate::types::color::{Hsv, Rgb};

/// Which kinds of LEDs the running effect is allowed to drive.
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq, Serialize, Deserialize)]
pub struct LedFlags {
    #[bits(1)]
    pub modifier: bool,
    #[bits(1)]
    pub underglow: bool,
    #[bits(1)]
    pub keylight: bool,
    #[bits(1)]
    pub indicator: bool,
    #[bits(4)]
    _reserved: u8,
}

impl LedFlags {
    /// No effect is active, the matrix is dark unless something paints it
    pub const NONE: Self = Self::new();
    pub const ALL: Self = Self::from_bits(0xFF);

    pub fn is_none(self) -> bool {
        self.into_bits() == 0
    }
}

/// Frame buffer and global state of a per-key RGB matrix.
pub struct RgbMatrix<const N: usize> {
    enabled: bool,
    /// Global color of the running effect, its `v` is the global brightness
    hsv: Hsv,
    flags: LedFlags,
    leds: [Rgb; N],
}

impl<const N: usize> Default for RgbMatrix<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RgbMatrix<N> {
    pub const fn new() -> Self {
        Self {
            enabled: false,
            hsv: Hsv::new(0, 255, 255),
            flags: LedFlags::ALL,
            leds: [Rgb::OFF; N],
        }
    }

    pub fn enable(&mut self) {
        debug!("RGB matrix enabled");
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    pub fn set_hsv(&mut self, hsv: Hsv) {
        self.hsv = hsv;
    }

    /// Global brightness
    pub fn brightness(&self) -> u8 {
        self.hsv.v
    }

    pub fn flags(&self) -> LedFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: LedFlags) {
        self.flags = flags;
    }

    /// Set the color of a single LED. Out of range indexes are ignored.
    pub fn set_color(&mut self, index: usize, color: Rgb) {
        match self.leds.get_mut(index) {
            Some(led) => *led = color,
            None => warn!("LED index {} out of range", index),
        }
    }

    pub fn set_color_all(&mut self, color: Rgb) {
        self.leds = [color; N];
    }

    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.leds.get(index).copied()
    }

    /// Current frame
    pub fn leds(&self) -> &[Rgb; N] {
        &self.leds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_color() {
        let mut matrix: RgbMatrix<4> = RgbMatrix::new();
        matrix.set_color(2, Rgb::new(1, 2, 3));
        matrix.set_color(7, Rgb::new(9, 9, 9));
        assert_eq!(matrix.color(2), Some(Rgb::new(1, 2, 3)));
        assert_eq!(matrix.color(0), Some(Rgb::OFF));
        assert_eq!(matrix.color(7), None);

        matrix.set_color_all(Rgb::new(5, 5, 5));
        assert!(matrix.leds().iter().all(|c| *c == Rgb::new(5, 5, 5)));
    }

    #[test]
    fn test_flags() {
        assert!(LedFlags::NONE.is_none());
        assert!(!LedFlags::ALL.is_none());
        assert!(LedFlags::new().with_keylight(true).keylight());
    }
}
