//! End-to-end: load a picture, fit it, render it, and walk the button flow.

use image::RgbImage;
use memecanvas::caption::Captions;
use memecanvas::config;
use memecanvas::controller::{MemeController, MemeState};
use memecanvas::imaging::{self, ImageBackend, RustBackend};
use memecanvas::speech::{SpeechEngine, TranscriptEngine, Voice};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    RgbImage::from_pixel(width, height, image::Rgb(rgb))
        .save(path)
        .unwrap();
}

#[test]
fn render_with_configured_canvas() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.toml");
    fs::write(
        &config_path,
        r##"
[canvas]
width = 300
height = 200
background = "#102030"
"##,
    )
    .unwrap();

    let source = tmp.path().join("square.png");
    let output = tmp.path().join("meme.png");
    write_png(&source, 50, 50, [250, 250, 0]);

    let settings = config::load_config(&config_path).unwrap();
    let canvas = settings.canvas_config().unwrap();
    let params =
        imaging::create_meme(&RustBackend::new(), &source, &output, None, &canvas).unwrap();

    // Square image on a 3:2 canvas spans the height and is pillarboxed
    assert_eq!(params.fit.height, 200.0);
    assert_eq!(params.fit.width, 200.0);
    assert_eq!(params.fit.start_x, 50.0);

    let rendered = image::open(&output).unwrap().to_rgba8();
    assert_eq!(rendered.dimensions(), (300, 200));
    assert_eq!(rendered.get_pixel(5, 100).0, [0x10, 0x20, 0x30, 255]);
    assert_eq!(rendered.get_pixel(295, 100).0, [0x10, 0x20, 0x30, 255]);
    let middle = rendered.get_pixel(150, 100).0;
    assert!(middle[0] > 230 && middle[1] > 230 && middle[2] < 20, "{middle:?}");
}

#[test]
fn controller_follows_render_and_clear() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    let output = tmp.path().join("photo-meme.png");
    write_png(&source, 120, 60, [0, 128, 255]);

    let backend = RustBackend::new();
    let canvas = config::MemeConfig::default().canvas_config().unwrap();
    let mut controller = MemeController::new();
    assert!(!controller.buttons().submit);

    let dims = backend.identify(&source).unwrap();
    let preview = imaging::plan_render(&source, &output, dims, None, &canvas).unwrap();
    backend.render(&preview).unwrap();
    controller
        .image_loaded("photo.png", dims, preview.fit)
        .unwrap();
    assert_eq!(controller.state(), MemeState::ImageLoaded);
    assert!(controller.buttons().submit);

    // Captions are blank, so no font is needed to "generate"
    controller.submit(Captions::default()).unwrap();
    assert!(controller.buttons().clear && controller.buttons().read_text);

    controller.clear().unwrap();
    assert_eq!(controller.state(), MemeState::Cleared);
    assert!(controller.read_text().is_err());
}

#[test]
fn speak_generated_captions_through_transcript() {
    let mut controller = MemeController::new();
    let engine = TranscriptEngine::new(
        vec![
            Voice::new("Alex", "en-US", false),
            Voice::new("Fiona", "en-scotland", true),
        ],
        Vec::new(),
    );
    controller.voices_changed(engine.voices().unwrap());
    controller.set_volume(60);

    let fit = imaging::fit_image(400.0, 400.0, 100.0, 200.0).unwrap();
    let dims = imaging::Dimensions {
        width: 100,
        height: 200,
    };
    controller.image_loaded("cat.jpg", dims, fit).unwrap();
    controller
        .submit(Captions::new("i can has", "cheezburger"))
        .unwrap();

    let utterance = controller.read_text().unwrap();
    engine.speak(&utterance).unwrap();

    let transcript = String::from_utf8(engine.into_inner()).unwrap();
    assert_eq!(transcript, "[Fiona @ 60%] i can has cheezburger\n");
}

#[test]
fn zero_sized_canvas_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.toml");
    fs::write(&config_path, "[canvas]\nwidth = 0\n").unwrap();
    assert!(config::load_config(&config_path).is_err());
}
