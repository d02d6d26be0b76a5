use bitfield_struct::bitfield;
use serde::{Deserialize, Serialize};

use crate::config::KeyboardConfig;
use crate::error::Error;
use crate::rgb_matrix::{LedFlags, RgbMatrix};
use crate::types::color::Hsv;

/// Marks an initialized eeprom image
const EECONFIG_MAGIC: u16 = 0xFEE8;

/// Upper bound of a serialized [`Eeconfig`]
pub const EECONFIG_SIZE: usize = 16;

#[bitfield(u8, order = Msb, defmt = cfg(feature = "defmt"))]
#[derive(PartialEq, Eq, Serialize, Deserialize)]
pub struct EeKeyboardConfig {
    #[bits(1)]
    pub disable_layer_led: bool,
    #[bits(7)]
    _reserved: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EeRgbMatrixConfig {
    pub enable: bool,
    pub hsv: Hsv,
    pub flags: LedFlags,
}

impl Default for EeRgbMatrixConfig {
    fn default() -> Self {
        Self {
            enable: true,
            hsv: Hsv::new(0, 255, 255),
            flags: LedFlags::ALL,
        }
    }
}

/// Keyboard configurations which should be saved in eeprom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Eeconfig {
    magic: u16,
    pub keyboard: EeKeyboardConfig,
    pub rgb_matrix: EeRgbMatrixConfig,
}

impl Default for Eeconfig {
    fn default() -> Self {
        Self {
            magic: EECONFIG_MAGIC,
            keyboard: EeKeyboardConfig::new(),
            rgb_matrix: EeRgbMatrixConfig::default(),
        }
    }
}

impl Eeconfig {
    /// Snapshot the runtime state
    pub fn capture<const N: usize>(keyboard: &KeyboardConfig, matrix: &RgbMatrix<N>) -> Self {
        Self {
            magic: EECONFIG_MAGIC,
            keyboard: EeKeyboardConfig::new().with_disable_layer_led(keyboard.disable_layer_led),
            rgb_matrix: EeRgbMatrixConfig {
                enable: matrix.is_enabled(),
                hsv: matrix.hsv(),
                flags: matrix.flags(),
            },
        }
    }

    /// Write the stored settings back to the runtime state
    pub fn apply<const N: usize>(&self, keyboard: &mut KeyboardConfig, matrix: &mut RgbMatrix<N>) {
        keyboard.disable_layer_led = self.keyboard.disable_layer_led();
        if self.rgb_matrix.enable {
            matrix.enable();
        } else {
            matrix.disable();
        }
        matrix.set_hsv(self.rgb_matrix.hsv);
        matrix.set_flags(self.rgb_matrix.flags);
    }

    /// Serialize into `buf`, returns the written bytes
    pub fn save<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], Error> {
        Ok(postcard::to_slice(self, buf)?)
    }

    /// Read an eeprom image, images without the magic number are rejected
    pub fn load(bytes: &[u8]) -> Result<Self, Error> {
        let config: Eeconfig = postcard::from_bytes(bytes)?;
        if config.magic != EECONFIG_MAGIC {
            warn!("Eeconfig magic mismatch: {}", config.magic);
            return Err(Error::Storage);
        }
        Ok(config)
    }
}
