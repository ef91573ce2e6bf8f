//! Color construction and packing.
//!
//! The animation thinks in HSV with hue expressed in turns (`0.0..1.0`),
//! while LED strips want a packed 24-bit word. These helpers bridge the two
//! through `palette`, so the gamma/curve policy stays in one place.

use palette::{FromColor, Hsv, Srgb};

/// Packed value of an element that is switched off.
pub const OFF: u32 = 0;

/// Creates an RGB color from hue (in turns), saturation and value.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue * 360.0, saturation, value);
    Srgb::from_color(hsv)
}

/// Packs a color as `0x00RRGGBB`, 8 bits per channel.
#[inline]
pub fn pack(color: Srgb) -> u32 {
    let rgb: Srgb<u8> = color.into_format();
    (u32::from(rgb.red) << 16) | (u32::from(rgb.green) << 8) | u32::from(rgb.blue)
}

/// HSV straight to the packed strip representation.
#[inline]
pub fn hsv_packed(hue: f32, saturation: f32, value: f32) -> u32 {
    pack(hsv(hue, saturation, value))
}
