use crate::config::KeyboardConfig;
use crate::keymap::{LED_COUNT, Layer};
use crate::rgb_matrix::RgbMatrix;
use crate::types::color::{Hsv, Rgb, hsv_to_rgb};

// Teal to orange gradient, from the thumbs out to the top corners
const COLOUR1: Hsv = Hsv::new(137, 255, 255);
const COLOUR2: Hsv = Hsv::new(137, 200, 255);
const COLOUR3: Hsv = Hsv::new(190, 150, 255);
const COLOUR4: Hsv = Hsv::new(245, 200, 255);
const COLOUR5: Hsv = Hsv::new(16, 255, 255);
const COLOUR6: Hsv = Hsv::new(21, 255, 255);
const COLOUR7: Hsv = Hsv::new(36, 255, 255);
const COLOUR8: Hsv = Hsv::new(53, 255, 255);

/// Colors of every LED, in LED order. Shared by all layers.
#[rustfmt::skip]
pub const LEDMAP: [Hsv; LED_COUNT] = [
    COLOUR8, COLOUR7, COLOUR7, COLOUR6, COLOUR5, COLOUR4,
    COLOUR7, COLOUR7, COLOUR6, COLOUR5, COLOUR4, COLOUR3,
    COLOUR7, COLOUR6, COLOUR5, COLOUR4, COLOUR3, COLOUR2,
    COLOUR6, COLOUR5, COLOUR4, COLOUR3, COLOUR2, COLOUR1,
                                        COLOUR1, COLOUR1,

    COLOUR4, COLOUR5, COLOUR6, COLOUR7, COLOUR7, COLOUR8,
    COLOUR3, COLOUR4, COLOUR5, COLOUR6, COLOUR7, COLOUR7,
    COLOUR2, COLOUR3, COLOUR4, COLOUR5, COLOUR6, COLOUR7,
    COLOUR1, COLOUR2, COLOUR3, COLOUR4, COLOUR5, COLOUR6,
    COLOUR1, COLOUR1,
];

/// Paint a layer color map, scaled by the global brightness.
///
/// Zero triples leave their LED untouched.
pub fn set_layer_color<const N: usize>(layer_map: &[Hsv; N], matrix: &mut RgbMatrix<N>) {
    let brightness = matrix.brightness();
    for (i, hsv) in layer_map.iter().enumerate() {
        if hsv.is_off() {
            continue;
        }
        matrix.set_color(i, hsv_to_rgb(*hsv).scale(brightness));
    }
}

/// Per-frame indicator callback.
///
/// Returns `false` if layer colors are disabled and nothing was painted.
pub fn rgb_matrix_indicators<const N: usize>(
    layer: u8,
    config: &KeyboardConfig,
    matrix: &mut RgbMatrix<N>,
    layer_map: &[Hsv; N],
) -> bool {
    if config.disable_layer_led {
        return false;
    }

    match Layer::from_repr(layer) {
        Some(Layer::Base | Layer::Sym | Layer::Nav) => set_layer_color(layer_map, matrix),
        None => {
            if matrix.flags().is_none() {
                matrix.set_color_all(Rgb::OFF);
            }
        }
    }
    true
}
