//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they take
//! configuration, compute render parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::fit_image;
use super::params::{CaptionStyle, RenderParams, Rgba};
use crate::caption::Captions;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Canvas and caption settings shared by every render.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub canvas: Dimensions,
    pub background: Rgba,
    pub style: CaptionStyle,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas: Dimensions {
                width: 400,
                height: 400,
            },
            background: Rgba::BLACK,
            style: CaptionStyle::default(),
        }
    }
}

/// Plan a render without executing it.
///
/// Fails with [`BackendError::Fit`] when the canvas or image has a zero
/// dimension.
pub fn plan_render(
    source: &Path,
    output: &Path,
    image: Dimensions,
    captions: Option<&Captions>,
    config: &CanvasConfig,
) -> Result<RenderParams> {
    let fit = fit_image(
        config.canvas.width as f64,
        config.canvas.height as f64,
        image.width as f64,
        image.height as f64,
    )?;

    Ok(RenderParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        canvas: config.canvas,
        background: config.background,
        fit,
        captions: captions.cloned(),
        style: config.style.clone(),
    })
}

/// Identify, plan and render a meme in one call.
///
/// Returns the executed parameters so callers can report the placement.
pub fn create_meme(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    captions: Option<&Captions>,
    config: &CanvasConfig,
) -> Result<RenderParams> {
    let image = backend.identify(source)?;
    let params = plan_render(source, output, image, captions, config)?;
    log::info!(
        "rendering {} ({}x{}) onto {}x{} canvas",
        source.display(),
        image.width,
        image.height,
        config.canvas.width,
        config.canvas.height
    );
    backend.render(&params)?;
    Ok(params)
}
