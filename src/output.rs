//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.
//!
//! ```text
//! Fit 800x200 → 400x200 canvas
//!     Size: 400 x 100
//!     Offset: 0, 50
//!
//! Meme cat.jpg → cat-meme.png
//!     Image: 800x200, drawn at 400 x 100 (0, 50)
//!     Top: "one does not simply"
//!     Bottom: "make a meme"
//!     Buttons: generate off, clear on, read text on
//! ```

use crate::controller::ButtonStates;
use crate::imaging::{FitResult, RenderParams};
use crate::speech::{Utterance, VoiceCatalog, Volume};

/// Trim trailing zeros so `400.0` prints as `400` and `266.6667` stays precise.
fn format_number(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn rect(fit: &FitResult) -> String {
    format!(
        "{} x {} ({}, {})",
        format_number(fit.width),
        format_number(fit.height),
        format_number(fit.start_x),
        format_number(fit.start_y)
    )
}

// ============================================================================
// fit
// ============================================================================

pub fn format_fit_output(canvas: (f64, f64), image: (f64, f64), fit: &FitResult) -> Vec<String> {
    vec![
        format!(
            "Fit {}x{} → {}x{} canvas",
            format_number(image.0),
            format_number(image.1),
            format_number(canvas.0),
            format_number(canvas.1)
        ),
        format!(
            "    Size: {} x {}",
            format_number(fit.width),
            format_number(fit.height)
        ),
        format!(
            "    Offset: {}, {}",
            format_number(fit.start_x),
            format_number(fit.start_y)
        ),
    ]
}

pub fn print_fit_output(canvas: (f64, f64), image: (f64, f64), fit: &FitResult) {
    for line in format_fit_output(canvas, image, fit) {
        println!("{}", line);
    }
}

// ============================================================================
// render
// ============================================================================

pub fn format_buttons(buttons: &ButtonStates) -> String {
    format!(
        "Buttons: generate {}, clear {}, read text {}",
        on_off(buttons.submit),
        on_off(buttons.clear),
        on_off(buttons.read_text)
    )
}

pub fn format_render_output(
    params: &RenderParams,
    image: (u32, u32),
    buttons: &ButtonStates,
) -> Vec<String> {
    let name = |p: &std::path::Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.display().to_string())
    };

    let mut lines = vec![
        format!(
            "Meme {} → {}",
            name(params.source.as_path()),
            name(params.output.as_path())
        ),
        format!(
            "    Image: {}x{}, drawn at {}",
            image.0,
            image.1,
            rect(&params.fit)
        ),
    ];
    if let Some(captions) = &params.captions {
        if !captions.top.is_empty() {
            lines.push(format!("    Top: {:?}", captions.top));
        }
        if !captions.bottom.is_empty() {
            lines.push(format!("    Bottom: {:?}", captions.bottom));
        }
    }
    lines.push(format!("    {}", format_buttons(buttons)));
    lines
}

pub fn print_render_output(params: &RenderParams, image: (u32, u32), buttons: &ButtonStates) {
    for line in format_render_output(params, image, buttons) {
        println!("{}", line);
    }
}

// ============================================================================
// voices / speak
// ============================================================================

pub fn format_voice_options(catalog: &VoiceCatalog) -> Vec<String> {
    if catalog.is_empty() {
        return vec!["No voices available".to_string()];
    }
    let mut lines = vec!["Voices".to_string()];
    for (i, label) in catalog.option_labels().iter().enumerate() {
        lines.push(format!("{:0>3} {}", i + 1, label));
    }
    lines
}

pub fn print_voice_options(catalog: &VoiceCatalog) {
    for line in format_voice_options(catalog) {
        println!("{}", line);
    }
}

pub fn format_utterance(utterance: &Utterance, volume: Volume) -> Vec<String> {
    let voice = utterance
        .voice
        .as_ref()
        .map(|v| v.option_label())
        .unwrap_or_else(|| "engine default".to_string());
    vec![
        format!("Speak {:?}", utterance.text),
        format!("    Voice: {}", voice),
        format!(
            "    Volume: {}% ({})",
            volume.percent(),
            volume.level().icon_path()
        ),
    ]
}

pub fn print_utterance(utterance: &Utterance, volume: Volume) {
    for line in format_utterance(utterance, volume) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::Captions;
    use crate::controller::MemeState;
    use crate::imaging::{CaptionStyle, Dimensions, Rgba};
    use crate::speech::Voice;
    use std::path::PathBuf;

    fn letterbox() -> FitResult {
        FitResult {
            width: 400.0,
            height: 100.0,
            start_x: 0.0,
            start_y: 50.0,
        }
    }

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(format_number(400.0), "400");
        assert_eq!(format_number(66.5), "66.5");
        assert_eq!(format_number(266.666666), "266.6667");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.00001), "0");
    }

    #[test]
    fn fit_output() {
        let lines = format_fit_output((400.0, 200.0), (800.0, 200.0), &letterbox());
        assert_eq!(
            lines,
            vec![
                "Fit 800x200 → 400x200 canvas",
                "    Size: 400 x 100",
                "    Offset: 0, 50",
            ]
        );
    }

    #[test]
    fn render_output_lists_captions_and_buttons() {
        let params = RenderParams {
            source: PathBuf::from("/photos/cat.jpg"),
            output: PathBuf::from("/tmp/cat-meme.png"),
            canvas: Dimensions {
                width: 400,
                height: 200,
            },
            background: Rgba::BLACK,
            fit: letterbox(),
            captions: Some(Captions::new("top text", "")),
            style: CaptionStyle::default(),
        };
        let lines = format_render_output(
            &params,
            (800, 200),
            &MemeState::MemeGenerated.buttons(),
        );
        assert_eq!(
            lines,
            vec![
                "Meme cat.jpg → cat-meme.png",
                "    Image: 800x200, drawn at 400 x 100 (0, 50)",
                "    Top: \"top text\"",
                "    Buttons: generate off, clear on, read text on",
            ]
        );
    }

    #[test]
    fn voice_options_numbered() {
        let catalog = VoiceCatalog::new(vec![
            Voice::new("Alex", "en-US", true),
            Voice::new("Kyoko", "ja-JP", false),
        ]);
        assert_eq!(
            format_voice_options(&catalog),
            vec![
                "Voices",
                "001 Alex (en-US) -- DEFAULT --",
                "002 Kyoko (ja-JP)"
            ]
        );
    }

    #[test]
    fn empty_voice_options() {
        assert_eq!(
            format_voice_options(&VoiceCatalog::default()),
            vec!["No voices available"]
        );
    }

    #[test]
    fn utterance_output() {
        let utterance = Utterance {
            text: "hello world".into(),
            voice: None,
            volume: 0.3,
        };
        assert_eq!(
            format_utterance(&utterance, Volume::new(30)),
            vec![
                "Speak \"hello world\"",
                "    Voice: engine default",
                "    Volume: 30% (icons/volume-level-1.svg)",
            ]
        );
    }
}
