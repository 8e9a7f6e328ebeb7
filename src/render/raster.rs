//! Offline rasterization of a shape's vector tree.

use std::io::Cursor;

use anyhow::Context;

use crate::{
    foundation::error::{ProgressError, ProgressResult},
    shape::instance::Shape,
};

/// Largest accepted raster edge in pixels.
const MAX_DIM: u32 = 8_192;

/// Premultiplied RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied pixels.
    pub rgba8_premul: Vec<u8>,
}

impl Raster {
    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.rgba8_premul.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3] as u16;
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let px = self.rgba8_premul.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

fn check_dims(width: u32, height: u32) -> ProgressResult<()> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(ProgressError::validation(format!(
            "raster size {width}x{height} outside 1..={MAX_DIM}"
        )));
    }
    Ok(())
}

/// Parse standalone svg markup and render it scaled to `width` x `height`.
#[tracing::instrument(skip(markup), fields(bytes = markup.len()))]
pub fn rasterize_markup(markup: &str, width: u32, height: u32) -> ProgressResult<Raster> {
    check_dims(width, height)?;
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(markup.as_bytes(), &opts).context("parse svg tree")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ProgressError::validation("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    tracing::debug!(width, height, "rasterized svg");
    Ok(Raster {
        width,
        height,
        rgba8_premul: pixmap.data().to_vec(),
    })
}

/// Standalone markup for `shape` with an explicit pixel size on the root.
pub fn standalone_markup(shape: &Shape, width: u32, height: u32) -> ProgressResult<String> {
    let markup = shape.vector_markup()?;
    let body = markup
        .strip_prefix("<svg")
        .ok_or_else(|| ProgressError::validation("shape root is not an svg element"))?;
    Ok(format!("<svg width=\"{width}\" height=\"{height}\"{body}"))
}

/// Render the current state of `shape`. The text overlay is not part of the vector tree and is
/// not drawn.
pub fn rasterize_shape(shape: &Shape, width: u32, height: u32) -> ProgressResult<Raster> {
    check_dims(width, height)?;
    let markup = standalone_markup(shape, width, height)?;
    rasterize_markup(&markup, width, height)
}

/// Encode `raster` as PNG bytes.
pub fn encode_png(raster: &Raster) -> ProgressResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(raster.width, raster.height, raster.to_straight_rgba8())
        .ok_or_else(|| ProgressError::validation("raster buffer does not match its dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
