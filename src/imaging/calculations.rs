//! Pure calculation functions for canvas geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FitError {
    #[error("invalid {name}: {value} (must be a positive, finite number)")]
    InvalidDimension { name: &'static str, value: f64 },
}

/// Destination rectangle for drawing an image onto a canvas.
///
/// Serialized with the canvas-style `startX`/`startY` names so the JSON output
/// can be handed straight to a 2D drawing context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub width: f64,
    pub height: f64,
    #[serde(rename = "startX")]
    pub start_x: f64,
    #[serde(rename = "startY")]
    pub start_y: f64,
}

fn check_dimension(name: &'static str, value: f64) -> Result<f64, FitError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(FitError::InvalidDimension { name, value })
    }
}

/// Fit an image inside a canvas, preserving its aspect ratio.
///
/// The image is scaled to span one canvas dimension and centered along the
/// other. An image that is relatively taller than the canvas spans the canvas
/// height; everything else (including an exact aspect-ratio match, e.g. a
/// square image on a square canvas) spans the canvas width.
///
/// "Relatively taller" compares the image aspect ratio with the canvas aspect
/// ratio, not with 1. On a square canvas the two tests agree; on any other
/// canvas this keeps the image inside it, so a square image on a 2:1 canvas
/// is pillarboxed to the canvas height instead of overflowing vertically.
///
/// # Examples
/// ```
/// # use memecanvas::imaging::fit_image;
/// // 1:2 portrait on a square canvas → pillarboxed
/// let fit = fit_image(400.0, 400.0, 100.0, 200.0).unwrap();
/// assert_eq!((fit.width, fit.height, fit.start_x, fit.start_y), (200.0, 400.0, 100.0, 0.0));
///
/// // 4:1 landscape on a 2:1 canvas → letterboxed
/// let fit = fit_image(400.0, 200.0, 800.0, 200.0).unwrap();
/// assert_eq!((fit.width, fit.height, fit.start_x, fit.start_y), (400.0, 100.0, 0.0, 50.0));
/// ```
pub fn fit_image(
    canvas_width: f64,
    canvas_height: f64,
    image_width: f64,
    image_height: f64,
) -> Result<FitResult, FitError> {
    let canvas_width = check_dimension("canvas width", canvas_width)?;
    let canvas_height = check_dimension("canvas height", canvas_height)?;
    let image_width = check_dimension("image width", image_width)?;
    let image_height = check_dimension("image height", image_height)?;

    let aspect_ratio = image_width / image_height;

    if aspect_ratio < canvas_width / canvas_height {
        // Height-constrained: pillarbox
        let width = canvas_height * aspect_ratio;
        Ok(FitResult {
            width,
            height: canvas_height,
            start_x: (canvas_width - width) / 2.0,
            start_y: 0.0,
        })
    } else {
        // Width-constrained: letterbox
        let height = canvas_width / aspect_ratio;
        Ok(FitResult {
            width: canvas_width,
            height,
            start_x: 0.0,
            start_y: (canvas_height - height) / 2.0,
        })
    }
}

/// Whole-pixel placement of a fitted image: `(x, y, width, height)`.
///
/// Offsets are rounded and the size is kept at least 1×1 so that extreme
/// aspect ratios still produce a drawable image.
pub fn pixel_rect(fit: &FitResult) -> (i64, i64, u32, u32) {
    let width = fit.width.round().max(1.0) as u32;
    let height = fit.height.round().max(1.0) as u32;
    (
        fit.start_x.round() as i64,
        fit.start_y.round() as i64,
        width,
        height,
    )
}
