//! Caption placement on the meme canvas.
//!
//! Captions follow the classic meme layout, expressed in the same terms a 2D
//! canvas text API uses:
//!
//! | Caption | Anchor | Baseline | Max width |
//! |---------|--------|----------|-----------|
//! | top     | (canvas width / 2, 0) | top of the em box | canvas width |
//! | bottom  | (canvas width / 2, canvas height) | bottom of the em box | canvas width |
//!
//! Text is centered on the anchor. When the natural width exceeds the max
//! width the whole line is squeezed horizontally to fit; it is never
//! stretched. Everything here is pure arithmetic on font metrics, so the
//! rasterizer in [`crate::imaging::rust_backend`] stays a thin drawing loop.

use serde::{Deserialize, Serialize};

/// Top and bottom caption text, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captions {
    pub top: String,
    pub bottom: String,
}

impl Captions {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// True when neither caption has any visible text.
    pub fn is_blank(&self) -> bool {
        self.top.trim().is_empty() && self.bottom.trim().is_empty()
    }

    /// Captions paired with where they go, skipping empty ones.
    pub fn placed(&self) -> impl Iterator<Item = (CaptionPosition, &str)> {
        [
            (CaptionPosition::Top, self.top.as_str()),
            (CaptionPosition::Bottom, self.bottom.as_str()),
        ]
        .into_iter()
        .filter(|(_, text)| !text.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionPosition {
    Top,
    Bottom,
}

/// Font metrics for one line of caption text at the requested pixel size.
///
/// `descent` is negative (below the baseline), as in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub natural_width: f32,
    pub ascent: f32,
    pub descent: f32,
}

/// Where and how wide a caption line is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionLayout {
    /// Left edge of the first glyph's advance box.
    pub origin_x: f32,
    /// Baseline y coordinate.
    pub baseline_y: f32,
    /// Horizontal scale factor in `(0, 1]`.
    pub squeeze: f32,
    /// Drawn width after squeezing.
    pub width: f32,
}

/// Horizontal scale needed to fit `natural_width` into `max_width`.
///
/// Returns `1.0` when the text already fits or has no width.
pub fn squeeze_factor(natural_width: f32, max_width: f32) -> f32 {
    if natural_width <= max_width || natural_width <= 0.0 {
        1.0
    } else {
        max_width / natural_width
    }
}

/// Lay out one caption line on a canvas of the given size.
pub fn layout_caption(
    position: CaptionPosition,
    canvas_width: u32,
    canvas_height: u32,
    metrics: LineMetrics,
) -> CaptionLayout {
    let canvas_width = canvas_width as f32;
    let squeeze = squeeze_factor(metrics.natural_width, canvas_width);
    let width = metrics.natural_width * squeeze;
    let anchor_x = canvas_width / 2.0;

    let baseline_y = match position {
        // Top of the em box sits on y = 0
        CaptionPosition::Top => metrics.ascent,
        // Bottom of the em box sits on the canvas bottom edge
        CaptionPosition::Bottom => canvas_height as f32 + metrics.descent,
    };

    CaptionLayout {
        origin_x: anchor_x - width / 2.0,
        baseline_y,
        squeeze,
        width,
    }
}

/// Pixel offsets used to draw an outline of `stroke_width` pixels around text.
///
/// The text is stamped at every offset in stroke color before the fill pass.
pub fn stroke_offsets(stroke_width: u32) -> Vec<(i32, i32)> {
    let r = stroke_width as i32;
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if (dx, dy) != (0, 0) && dx * dx + dy * dy <= r * r {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: LineMetrics = LineMetrics {
        natural_width: 200.0,
        ascent: 40.0,
        descent: -10.0,
    };

    #[test]
    fn top_caption_hangs_from_canvas_top() {
        let layout = layout_caption(CaptionPosition::Top, 400, 400, METRICS);
        assert_eq!(layout.baseline_y, 40.0);
        assert_eq!(layout.origin_x, 100.0);
        assert_eq!(layout.squeeze, 1.0);
        assert_eq!(layout.width, 200.0);
    }

    #[test]
    fn bottom_caption_rests_on_canvas_bottom() {
        let layout = layout_caption(CaptionPosition::Bottom, 400, 300, METRICS);
        assert_eq!(layout.baseline_y, 290.0);
        assert_eq!(layout.origin_x, 100.0);
    }

    #[test]
    fn wide_caption_is_squeezed_to_canvas_width() {
        let metrics = LineMetrics {
            natural_width: 800.0,
            ..METRICS
        };
        let layout = layout_caption(CaptionPosition::Top, 400, 400, metrics);
        assert_eq!(layout.squeeze, 0.5);
        assert_eq!(layout.width, 400.0);
        assert_eq!(layout.origin_x, 0.0);
    }

    #[test]
    fn squeeze_never_stretches() {
        assert_eq!(squeeze_factor(10.0, 400.0), 1.0);
        assert_eq!(squeeze_factor(400.0, 400.0), 1.0);
        assert_eq!(squeeze_factor(0.0, 400.0), 1.0);
        assert_eq!(squeeze_factor(1000.0, 250.0), 0.25);
    }

    #[test]
    fn placed_skips_empty_captions() {
        let captions = Captions::new("", "bottom text");
        let placed: Vec<_> = captions.placed().collect();
        assert_eq!(placed, vec![(CaptionPosition::Bottom, "bottom text")]);
    }

    #[test]
    fn placed_keeps_order_top_then_bottom() {
        let captions = Captions::new("one does not simply", "write a meme");
        let positions: Vec<_> = captions.placed().map(|(p, _)| p).collect();
        assert_eq!(positions, vec![CaptionPosition::Top, CaptionPosition::Bottom]);
    }

    #[test]
    fn blank_captions() {
        assert!(Captions::default().is_blank());
        assert!(Captions::new("  ", "").is_blank());
        assert!(!Captions::new("", "x").is_blank());
    }

    #[test]
    fn stroke_offsets_form_a_disc() {
        assert!(stroke_offsets(0).is_empty());
        let one = stroke_offsets(1);
        assert_eq!(one.len(), 4);
        assert!(one.contains(&(1, 0)) && one.contains(&(0, -1)));
        let two = stroke_offsets(2);
        assert!(two.contains(&(1, 1)));
        assert!(!two.contains(&(2, 2)));
        assert!(!two.contains(&(0, 0)));
    }
}
