//! Small color helpers shared by both renderer backends.

use glam::Vec3;

/// Expand a packed `0xRRGGBB` color to float RGB in \[0, 1\].
#[inline]
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Linear interpolation between two colors, `t` in \[0, 1\].
#[inline]
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// CSS `rgba(...)` string for a byte color and alpha, for the 2-D canvas.
pub fn css_rgba(color: [u8; 3], alpha: f32) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        color[0],
        color[1],
        color[2],
        alpha.clamp(0.0, 1.0)
    )
}
