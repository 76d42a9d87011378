use bevy::math::{UVec2, Vec2};

/// Fill parameters for text drawn on a [`DrawSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    pub font_px: f32,
    /// Straight (non-premultiplied) sRGB RGBA.
    pub color: [u8; 4],
}

impl FillStyle {
    pub fn from_rgb(font_px: f32, rgb: [f32; 3]) -> Self {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            font_px,
            color: [to_u8(rgb[0]), to_u8(rgb[1]), to_u8(rgb[2]), 255],
        }
    }
}

/// Minimal 2D drawing surface backing the scoreboard texture.
pub trait DrawSurface: Send + Sync + 'static {
    fn size(&self) -> UVec2;
    /// Reset every pixel to fully transparent.
    fn clear(&mut self);
    /// Draw `text` horizontally centered on `anchor.x`, alphabetic baseline at `anchor.y`
    /// (y grows downward, origin top-left).
    fn fill_text(&mut self, text: &str, anchor: Vec2, style: &FillStyle);
    /// Row-major RGBA8 pixels, `size.x * size.y * 4` bytes.
    fn pixels(&self) -> &[u8];
}
