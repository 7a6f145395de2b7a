//! Image crop/zoom editor
//!
//! Every committed image (cover, avatar, map background, image block) passes
//! through the same pipeline: the user pans and zooms a preview, then the
//! source is rasterized onto a fixed-size canvas and committed as a PNG data
//! URI so the document stays fully self-contained.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

/// Preview viewport width the pan offset is expressed in.
pub const PREVIEW_WIDTH: f64 = 300.0;
/// Default committed width.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 600;
pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("could not decode image: {0}")]
    Decode(String),
    #[error("could not encode image: {0}")]
    Encode(String),
    #[error("not a data URI")]
    InvalidDataUri,
}

/// Pan/zoom state of the crop preview. Offsets are preview pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTransform {
    scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ImageTransform {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Wheel zoom: delta is added to the current scale, then clamped.
    pub fn zoom_by(&mut self, delta: f64) {
        self.set_scale(self.scale + delta);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Replace aspect ratios that cannot produce a canvas with square.
pub fn sanitize_aspect(aspect: f64) -> f64 {
    if !aspect.is_finite() || aspect <= 0.0 {
        1.0
    } else {
        aspect
    }
}

/// Canvas height for a given width and (already sanitized) aspect.
fn canvas_height(width: u32, aspect: f64) -> u32 {
    let calculated = f64::from(width) / aspect;
    if calculated.is_finite() && calculated > 0.0 {
        calculated.round().max(1.0) as u32
    } else {
        width.max(1)
    }
}

/// Rasterize `bytes` under the given crop transform.
///
/// The source is drawn at canvas width (height following its own aspect),
/// centered, shifted by the pan offset scaled from preview to output space,
/// then scaled about the center. Uncovered canvas stays black. Returns PNG
/// bytes; a decode failure leaves the caller's stored image untouched.
pub fn rasterize(
    bytes: &[u8],
    aspect: f64,
    output_width: u32,
    transform: ImageTransform,
) -> Result<Vec<u8>, ImageError> {
    let source = image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;

    let aspect = sanitize_aspect(aspect);
    let canvas_w = if output_width == 0 {
        DEFAULT_OUTPUT_WIDTH
    } else {
        output_width
    };
    let canvas_h = canvas_height(canvas_w, aspect);

    let mut canvas = RgbaImage::from_pixel(canvas_w, canvas_h, image::Rgba([0, 0, 0, 255]));

    let source_aspect = f64::from(source.width()) / f64::from(source.height()).max(1.0);
    let draw_w = f64::from(canvas_w) * transform.scale();
    let draw_h = draw_w / source_aspect;
    if draw_w >= 1.0 && draw_h >= 1.0 {
        let resized = source.resize_exact(
            draw_w.round() as u32,
            draw_h.round() as u32,
            FilterType::Triangle,
        );
        // Pan offsets are preview pixels; the committed canvas is wider by
        // this ratio.
        let ratio = f64::from(canvas_w) / PREVIEW_WIDTH;
        let x = f64::from(canvas_w) / 2.0 + transform.offset_x * ratio - draw_w / 2.0;
        let y = f64::from(canvas_h) / 2.0 + transform.offset_y * ratio - draw_h / 2.0;
        image::imageops::overlay(&mut canvas, &resized, x.round() as i64, y.round() as i64);
    }

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

/// Wrap PNG bytes as the data URI the document stores.
pub fn to_data_uri(png_bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png_bytes))
}

/// Extract raw bytes from a stored data URI.
pub fn from_data_uri(uri: &str) -> Result<Vec<u8>, ImageError> {
    let (header, payload) = uri.split_once(',').ok_or(ImageError::InvalidDataUri)?;
    if !header.starts_with("data:") {
        return Err(ImageError::InvalidDataUri);
    }
    BASE64
        .decode(payload)
        .map_err(|_| ImageError::InvalidDataUri)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode");
        out.into_inner()
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut transform = ImageTransform::default();
        transform.set_scale(40.0);
        assert_eq!(transform.scale(), MAX_SCALE);
        transform.zoom_by(-100.0);
        assert_eq!(transform.scale(), MIN_SCALE);
    }

    #[test]
    fn test_bad_aspects_become_square() {
        assert_eq!(sanitize_aspect(f64::NAN), 1.0);
        assert_eq!(sanitize_aspect(f64::INFINITY), 1.0);
        assert_eq!(sanitize_aspect(0.0), 1.0);
        assert_eq!(sanitize_aspect(-2.0), 1.0);
        assert_eq!(sanitize_aspect(1.5), 1.5);
    }

    #[test]
    fn test_rasterize_produces_canvas_of_requested_aspect() {
        let png = rasterize(&tiny_png(), 1.5, 600, ImageTransform::default()).expect("rasterize");
        let out = image::load_from_memory(&png).expect("decode");
        assert_eq!(out.width(), 600);
        assert_eq!(out.height(), 400);
    }

    #[test]
    fn test_rasterize_rejects_garbage_bytes() {
        let err = rasterize(b"not an image", 1.0, 600, ImageTransform::default())
            .expect_err("must fail");
        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[test]
    fn test_data_uri_roundtrip() {
        let png = tiny_png();
        let uri = to_data_uri(&png);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(from_data_uri(&uri).expect("decode"), png);
    }

    #[test]
    fn test_from_data_uri_rejects_plain_text() {
        assert!(from_data_uri("hello world").is_err());
        assert!(from_data_uri("nothdr,AAAA").is_err());
    }
}
