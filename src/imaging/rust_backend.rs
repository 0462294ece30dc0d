//! Pure Rust canvas backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Fit resize | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Compose | `image::imageops::overlay` onto a background-filled canvas |
//! | Caption glyphs | `ab_glyph` outlines, coverage-blended by hand |
//! | Encode | `image` crate, format from the output extension |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::pixel_rect;
use super::params::{CaptionStyle, RenderParams, Rgba};
use crate::caption::{CaptionPosition, LineMetrics, layout_caption, stroke_offsets};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::path::Path;

/// Extensions the renderer can write, with their encoders.
const OUTPUT_FORMATS: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("webp", ImageFormat::WebP),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
];

/// Returns the output file extensions the renderer can encode.
pub fn supported_output_extensions() -> Vec<&'static str> {
    OUTPUT_FORMATS.iter().map(|(ext, _)| *ext).collect()
}

/// Pure Rust backend using the `image` crate and `ab_glyph`.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk, sniffing the format from its bytes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

fn load_font(path: Option<&Path>) -> Result<FontVec, BackendError> {
    let path = path.ok_or_else(|| {
        BackendError::ProcessingFailed(
            "No caption font configured (set caption.font or pass --font)".into(),
        )
    })?;
    let data = std::fs::read(path).map_err(BackendError::Io)?;
    FontVec::try_from_vec(data).map_err(|e| {
        BackendError::ProcessingFailed(format!("Invalid font {}: {}", path.display(), e))
    })
}

/// Measure a single line of text at `size` pixels.
fn measure_line(font: &FontVec, size: f32, text: &str) -> LineMetrics {
    let scaled = font.as_scaled(PxScale::from(size));
    let mut width = 0.0;
    let mut previous = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    LineMetrics {
        natural_width: width,
        ascent: scaled.ascent(),
        descent: scaled.descent(),
    }
}

/// Blend `color` over the pixel at `(x, y)` with the given coverage.
fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0) * (color.0[3] as f32 / 255.0);
    if alpha <= 0.0 {
        return;
    }
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for i in 0..3 {
        let dst = pixel.0[i] as f32;
        pixel.0[i] = (dst + (color.0[i] as f32 - dst) * alpha).round() as u8;
    }
    let dst_a = pixel.0[3] as f32 / 255.0;
    pixel.0[3] = ((alpha + dst_a * (1.0 - alpha)) * 255.0).round() as u8;
}

/// Rasterize one line of text with its top-left advance box at the layout origin.
fn stamp_text(
    canvas: &mut RgbaImage,
    font: &FontVec,
    scale: PxScale,
    text: &str,
    origin: (f32, f32),
    color: Rgba,
) {
    let scaled = font.as_scaled(scale);
    let mut caret = origin.0;
    let mut previous = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, origin.1));
        caret += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                blend(canvas, x, y, color, coverage);
            });
        }
    }
}

fn draw_caption(
    canvas: &mut RgbaImage,
    font: &FontVec,
    style: &CaptionStyle,
    position: CaptionPosition,
    text: &str,
) {
    let metrics = measure_line(font, style.size, text);
    let layout = layout_caption(position, canvas.width(), canvas.height(), metrics);
    let scale = PxScale {
        x: style.size * layout.squeeze,
        y: style.size,
    };
    log::debug!(
        "caption {:?}: width {:.1} (squeeze {:.3}), baseline {:.1}",
        position,
        layout.width,
        layout.squeeze,
        layout.baseline_y
    );

    for (dx, dy) in stroke_offsets(style.stroke_width) {
        let origin = (layout.origin_x + dx as f32, layout.baseline_y + dy as f32);
        stamp_text(canvas, font, scale, text, origin, style.stroke);
    }
    stamp_text(
        canvas,
        font,
        scale,
        text,
        (layout.origin_x, layout.baseline_y),
        style.fill,
    );
}

/// Encode the canvas to `path`, choosing the format from the extension.
fn save_image(canvas: RgbaImage, path: &Path) -> Result<(), BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let format = OUTPUT_FORMATS
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, format)| *format)
        .ok_or_else(|| {
            BackendError::ProcessingFailed(format!("Unsupported output format: {}", ext))
        })?;

    // JPEG has no alpha channel
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8()),
        _ => DynamicImage::ImageRgba8(canvas),
    };
    image.save_with_format(path, format).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn render(&self, params: &RenderParams) -> Result<(), BackendError> {
        let source = load_image(&params.source)?;

        let mut canvas = RgbaImage::from_pixel(
            params.canvas.width,
            params.canvas.height,
            image::Rgba(params.background.0),
        );

        let (x, y, width, height) = pixel_rect(&params.fit);
        let fitted = source
            .resize_exact(width, height, FilterType::Lanczos3)
            .to_rgba8();
        image::imageops::overlay(&mut canvas, &fitted, x, y);

        if let Some(captions) = &params.captions {
            let placed: Vec<_> = captions.placed().collect();
            if !placed.is_empty() {
                let font = load_font(params.style.font.as_deref())?;
                for (position, text) in placed {
                    draw_caption(&mut canvas, &font, &params.style, position, text);
                }
            }
        }

        save_image(canvas, &params.output)
    }
}
