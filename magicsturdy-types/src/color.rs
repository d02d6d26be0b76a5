//! Color triples for per-key backlighting.

use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

/// Hue/saturation/value color, every component spans 0 ~ 255.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// An all-zero triple marks an LED which is left untouched.
    pub const fn is_off(&self) -> bool {
        self.h == 0 && self.s == 0 && self.v == 0
    }
}

/// Displayable red/green/blue color.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, MaxSize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `brightness / 255`.
    pub const fn scale(self, brightness: u8) -> Self {
        let f = brightness as u16;
        Self {
            r: (self.r as u16 * f / 255) as u8,
            g: (self.g as u16 * f / 255) as u8,
            b: (self.b as u16 * f / 255) as u8,
        }
    }
}

/// Convert HSV to RGB with 8-bit integer math.
///
/// The hue circle is split into six regions of ~42.5 steps each.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    if hsv.s == 0 {
        return Rgb::new(hsv.v, hsv.v, hsv.v);
    }

    let h = hsv.h as u16;
    let s = hsv.s as u16;
    let v = hsv.v as u16;

    let region = h * 6 / 255;
    let remainder = (h * 2 - region * 85) * 3;

    let p = ((v * (255 - s)) >> 8) as u8;
    let q = ((v * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;
    let v = hsv.v;

    match region {
        0 | 6 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}
