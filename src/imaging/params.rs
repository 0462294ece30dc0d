//! Parameter types for image operations.
//!
//! These structs describe *what* to draw, not *how*. They are the interface
//! between [`operations`](super::operations), which decides the geometry, and
//! the [`backend`](super::backend), which does the pixel work. A mock backend
//! can therefore verify the planned geometry without decoding anything.
//!
//! - [`Rgba`]: an 8-bit color parsed from `#rgb` / `#rrggbb` hex.
//! - [`CaptionStyle`]: font, size and colors for caption text.
//! - [`RenderParams`]: full specification of one meme render.

use super::backend::Dimensions;
use super::calculations::FitResult;
use crate::caption::Captions;
use std::path::PathBuf;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    /// Parse `#rgb` or `#rrggbb`. The leading `#` is required.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    rgb[i] = v * 16 + v;
                }
                Some(Rgba([rgb[0], rgb[1], rgb[2], 255]))
            }
            6 => Some(Rgba([
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                255,
            ])),
            _ => None,
        }
    }
}

/// How caption text is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionStyle {
    /// TrueType/OpenType font file.
    pub font: Option<PathBuf>,
    /// Pixel size of the em box.
    pub size: f32,
    pub fill: Rgba,
    pub stroke: Rgba,
    /// Outline thickness in pixels (0 = no outline).
    pub stroke_width: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font: None,
            size: 50.0,
            fill: Rgba::WHITE,
            stroke: Rgba::BLACK,
            stroke_width: 2,
        }
    }
}

/// Parameters for one meme render: fitted image plus optional captions.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub canvas: Dimensions,
    pub background: Rgba,
    /// Destination rectangle of the source image on the canvas.
    pub fit: FitResult,
    /// `None` renders the bare fitted image (the "image loaded" preview).
    pub captions: Option<Captions>,
    pub style: CaptionStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_hex() {
        assert_eq!(Rgba::from_hex("#ff8000"), Some(Rgba([255, 128, 0, 255])));
        assert_eq!(Rgba::from_hex("#000000"), Some(Rgba::BLACK));
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::from_hex("#1a2"), Some(Rgba([0x11, 0xaa, 0x22, 255])));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgba::from_hex("ffffff"), None);
        assert_eq!(Rgba::from_hex("#ffff"), None);
        assert_eq!(Rgba::from_hex("#gggggg"), None);
        assert_eq!(Rgba::from_hex("#"), None);
        assert_eq!(Rgba::from_hex("#+12345"), None);
    }

    #[test]
    fn default_caption_style_is_white_on_black_outline() {
        let style = CaptionStyle::default();
        assert_eq!(style.size, 50.0);
        assert_eq!(style.fill, Rgba::WHITE);
        assert_eq!(style.stroke, Rgba::BLACK);
        assert!(style.font.is_none());
    }
}
