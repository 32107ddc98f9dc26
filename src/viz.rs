//! Flow-field visualization.
//!
//! Available when the `image-io` feature is enabled. The field is rendered
//! with the usual optical-flow color wheel: hue encodes the displacement
//! angle, saturation the magnitude relative to the field maximum, and value
//! stays at full brightness. Cells with zero displacement come out white.

use crate::field::OffsetField;
use image::{Rgb, RgbImage};

/// Renders an offset field as an RGB image of the same dimensions.
pub fn flow_to_rgb(field: &OffsetField) -> RgbImage {
    let max_magnitude = field
        .cells()
        .iter()
        .map(|cell| cell.offset.magnitude())
        .fold(0.0f32, f32::max);

    let mut out = RgbImage::new(field.width() as u32, field.height() as u32);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let offset = field
            .offset(x as usize, y as usize)
            .expect("image and field dimensions agree");
        let angle = (offset.dy as f32)
            .atan2(offset.dx as f32)
            .to_degrees()
            .rem_euclid(360.0);
        let saturation = if max_magnitude > 0.0 {
            offset.magnitude() / max_magnitude
        } else {
            0.0
        };
        *pixel = Rgb(hsv_to_rgb(angle, saturation, 1.0));
    }
    out
}

/// Standard HSV to RGB conversion; hue in degrees, s and v in [0, 1].
fn hsv_to_rgb(hue: f32, s: f32, v: f32) -> [u8; 3] {
    let c = v * s;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}
