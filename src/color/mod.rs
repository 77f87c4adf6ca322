//! Color model: hex, RGB and HSL representations, literal parsing, and
//! manipulations (lighten, mix, palettes, ...).

pub mod manipulate;
pub mod model;
pub mod parse;

pub use manipulate::{
    adjust_hue, complementary, darken, desaturate, generate_palette, grayscale, invert, is_dark,
    is_light, lighten, mix, saturate,
};
pub use model::{
    hex_to_hsl, hex_to_rgb, hsl_to_hex, hsl_to_rgb, is_valid_hex, rgb_to_hex, rgb_to_hsl,
    ColorError, Hsl, Rgb,
};
pub use parse::{is_color, parse_color};
