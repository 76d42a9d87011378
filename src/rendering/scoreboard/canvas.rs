// This file is part of Home Run Derby.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CPU RGBA canvas with `ab_glyph` text rasterization.

use std::path::Path;

use ab_glyph::{point, Font, FontArc, Glyph, PxScale, ScaleFont};
use bevy::math::{UVec2, Vec2};

use super::surface::{DrawSurface, FillStyle};
use crate::core::assets;

pub struct CanvasSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    font: Option<FontArc>,
}

impl CanvasSurface {
    /// Transparent surface; without a font `fill_text` leaves the pixels untouched.
    pub fn new(width: u32, height: u32, font: Option<FontArc>) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
            font,
        }
    }

    pub fn load_font(path: &Path) -> anyhow::Result<FontArc> {
        let bytes = assets::read_bytes(path)
            .map_err(|e| anyhow::anyhow!("read font {}: {e}", path.display()))?;
        FontArc::try_from_vec(bytes).map_err(|e| anyhow::anyhow!("decode font: {e}"))
    }

    /// Advance width of `text` at `font_px`, `None` without a font.
    pub fn measure(&self, text: &str, font_px: f32) -> Option<f32> {
        let font = self.font.as_ref()?;
        Some(layout_line(font, text, font_px).1)
    }

    fn blend(&mut self, x: i32, y: i32, coverage: f32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let src_a = coverage.clamp(0.0, 1.0) * (color[3] as f32 / 255.0);
        if src_a <= 0.0 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let dst = &mut self.data[idx..idx + 4];
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        for c in 0..3 {
            let s = color[c] as f32;
            let d = dst[c] as f32;
            dst[c] = ((s * src_a + d * dst_a * (1.0 - src_a)) / out_a)
                .round()
                .clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

/// `PxScale` for an em size of `font_px`. ab_glyph scales by ascent-to-descent height, while
/// `font_px` follows the CSS convention of one em.
fn em_scale(font: &FontArc, font_px: f32) -> PxScale {
    let upem = font.units_per_em().unwrap_or(font.height_unscaled());
    PxScale::from(font_px * font.height_unscaled() / upem)
}

/// Single-line layout with kerning; glyph positions are relative to a caret starting at 0.
fn layout_line(font: &FontArc, text: &str, font_px: f32) -> (Vec<Glyph>, f32) {
    let scale = em_scale(font, font_px);
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0f32;
    let mut last = None;
    let mut glyphs = Vec::with_capacity(text.len());
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = last {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, 0.0)));
        caret += scaled.h_advance(id);
        last = Some(id);
    }
    (glyphs, caret)
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }

    fn fill_text(&mut self, text: &str, anchor: Vec2, style: &FillStyle) {
        let Some(font) = self.font.clone() else {
            return;
        };
        let (glyphs, width) = layout_line(&font, text, style.font_px);
        let origin_x = anchor.x - width * 0.5;
        for mut glyph in glyphs {
            glyph.position = point(origin_x + glyph.position.x, anchor.y);
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue; // whitespace
            };
            let bounds = outlined.px_bounds();
            let (bx, by) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|x, y, coverage| {
                self.blend(bx + x as i32, by + y as i32, coverage, style.color);
            });
        }
    }

    fn pixels(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> FillStyle {
        FillStyle::from_rgb(120.0, [1.0, 0.0, 0.0])
    }

    #[test]
    fn clear_makes_surface_transparent() {
        let mut s = CanvasSurface::new(4, 2, None);
        s.blend(1, 1, 1.0, [255, 0, 0, 255]);
        assert!(s.pixels().iter().any(|&b| b != 0));
        s.clear();
        assert!(s.pixels().iter().all(|&b| b == 0));
        assert_eq!(s.pixels().len(), 4 * 2 * 4);
    }

    #[test]
    fn blend_over_transparent_keeps_color() {
        let mut s = CanvasSurface::new(1, 1, None);
        s.blend(0, 0, 0.5, [255, 0, 0, 255]);
        let px = s.pixels();
        assert_eq!(px[0], 255);
        assert_eq!(px[1], 0);
        assert!((126..=129).contains(&px[3]));
    }

    #[test]
    fn out_of_bounds_blend_ignored() {
        let mut s = CanvasSurface::new(2, 2, None);
        s.blend(-1, 0, 1.0, [255, 255, 255, 255]);
        s.blend(0, 2, 1.0, [255, 255, 255, 255]);
        assert!(s.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn fontless_fill_is_noop() {
        let mut s = CanvasSurface::new(16, 16, None);
        s.fill_text("HOME RUN!", Vec2::new(8.0, 8.0), &red());
        assert!(s.pixels().iter().all(|&b| b == 0));
        assert!(s.measure("HOME RUN!", 120.0).is_none());
    }

    #[test]
    fn font_px_is_an_em_size() {
        let font = CanvasSurface::load_font(Path::new("assets/fonts/DejaVuSans-Bold.ttf"))
            .expect("bundled font");
        let upem = font.units_per_em().expect("scalable font");
        let cap = font.outline(font.glyph_id('H')).expect("H outline").bounds;
        let expected = (cap.max.y - cap.min.y) / upem * 120.0;

        let mut s = CanvasSurface::new(256, 256, Some(font));
        let advance = s.measure("H", 120.0).expect("font loaded");
        assert!(advance > 0.0 && advance < 256.0);
        s.fill_text("H", Vec2::new(128.0, 200.0), &red());
        let rows: Vec<usize> = s
            .pixels()
            .chunks_exact(256 * 4)
            .enumerate()
            .filter(|(_, row)| row.chunks_exact(4).any(|px| px[3] > 0))
            .map(|(y, _)| y)
            .collect();
        let drawn = (rows[rows.len() - 1] - rows[0] + 1) as f32;
        assert!((drawn - expected).abs() <= 3.0, "cap height {drawn}, expected {expected}");
    }

    #[test]
    fn bundled_font_draws_centered_red_text() {
        let font = CanvasSurface::load_font(Path::new("assets/fonts/DejaVuSans-Bold.ttf"))
            .expect("bundled font");
        let mut s = CanvasSurface::new(2048, 256, Some(font));
        s.fill_text("HOME RUN!", Vec2::new(1024.0, 144.0), &red());
        let px = s.pixels();
        let mut min_x = u32::MAX;
        let mut max_x = 0;
        for (i, chunk) in px.chunks_exact(4).enumerate() {
            if chunk[3] > 0 {
                assert_eq!(chunk[1], 0);
                assert_eq!(chunk[2], 0);
                let x = i as u32 % 2048;
                min_x = min_x.min(x);
                max_x = max_x.max(x);
            }
        }
        assert!(max_x > min_x, "no text pixels drawn");
        let center = (min_x + max_x) as f32 * 0.5;
        assert!((center - 1024.0).abs() < 24.0, "text not centered: {center}");
    }
}
