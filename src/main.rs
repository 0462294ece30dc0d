use clap::{Parser, Subcommand};
use memecanvas::caption::Captions;
use memecanvas::controller::MemeController;
use memecanvas::imaging::ImageBackend;
use memecanvas::speech::{SpeechEngine, TranscriptEngine};
use memecanvas::{config, imaging, output};
use std::path::PathBuf;

/// Caption text shared by commands that draw or speak it.
#[derive(clap::Args, Clone)]
struct CaptionArgs {
    /// Caption drawn along the top edge
    #[arg(long, default_value = "")]
    top: String,
    /// Caption drawn along the bottom edge
    #[arg(long, default_value = "")]
    bottom: String,
}

impl CaptionArgs {
    fn captions(&self) -> Captions {
        Captions::new(self.top.clone(), self.bottom.clone())
    }
}

#[derive(Parser)]
#[command(name = "memecanvas")]
#[command(about = "Fit an image into a canvas, caption it, and read it aloud")]
#[command(long_about = "\
Fit an image into a canvas, caption it, and read it aloud

The image is scaled to span one canvas dimension and centered along the
other, keeping its aspect ratio. Captions are centered at the top and bottom
edges and squeezed to the canvas width when too long.

Run 'memecanvas gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file (missing file = stock defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute where an image lands on a canvas
    Fit {
        canvas_width: f64,
        canvas_height: f64,
        image_width: f64,
        image_height: f64,
        /// Print the placement as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw an image (and captions) onto the canvas and save it
    Render {
        /// Source image (JPEG, PNG, TIFF or WebP)
        image: PathBuf,
        /// Output file; format from extension (png, jpg, webp, tiff)
        #[arg(long, short)]
        output: PathBuf,
        /// Caption font, overriding caption.font from the config
        #[arg(long)]
        font: Option<PathBuf>,
        #[command(flatten)]
        captions: CaptionArgs,
    },
    /// Read captions aloud through the speech engine
    Speak {
        #[command(flatten)]
        captions: CaptionArgs,
        /// Voice name, overriding speech.voice from the config
        #[arg(long)]
        voice: Option<String>,
        /// Volume percentage 0-100, overriding speech.volume
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        volume: Option<u32>,
    },
    /// List the voices offered by the speech engine
    Voices,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Fit {
            canvas_width,
            canvas_height,
            image_width,
            image_height,
            json,
        } => {
            let fit = imaging::fit_image(canvas_width, canvas_height, image_width, image_height)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&fit)?);
            } else {
                output::print_fit_output(
                    (canvas_width, canvas_height),
                    (image_width, image_height),
                    &fit,
                );
            }
        }
        Command::Render {
            image,
            output: output_path,
            font,
            captions,
        } => {
            let settings = config::load_config(&cli.config)?;
            let mut canvas = settings.canvas_config()?;
            if font.is_some() {
                canvas.style.font = font;
            }
            let captions = captions.captions();
            let backend = imaging::RustBackend::new();

            let mut controller = MemeController::new();
            let dims = backend.identify(&image)?;
            let alt = image
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            // Blank captions render the plain fitted preview
            let drawn = (!captions.is_blank()).then_some(&captions);
            let params = imaging::plan_render(&image, &output_path, dims, drawn, &canvas)?;
            controller.image_loaded(alt, dims, params.fit)?;
            backend.render(&params)?;
            if let Some(captions) = drawn {
                controller.submit(captions.clone())?;
            }

            output::print_render_output(
                &params,
                (dims.width, dims.height),
                &controller.buttons(),
            );
        }
        Command::Speak {
            captions,
            voice,
            volume,
        } => {
            let settings = config::load_config(&cli.config)?;
            let engine = TranscriptEngine::new(settings.speech.voices.clone(), std::io::stdout());
            let mut controller = MemeController::new();

            match engine.voices() {
                Ok(voices) => controller.voices_changed(voices),
                Err(e) => log::warn!("{e}; speaking with the engine default voice"),
            }
            let preferred = voice.unwrap_or(settings.speech.voice);
            if !preferred.is_empty() && !controller.select_voice(&preferred) {
                return Err(format!("unknown voice '{preferred}'").into());
            }
            controller.set_volume(volume.unwrap_or(settings.speech.volume));

            let utterance = controller.utterance(&captions.captions());
            output::print_utterance(&utterance, controller.volume());
            engine.speak(&utterance)?;
        }
        Command::Voices => {
            let settings = config::load_config(&cli.config)?;
            let mut controller = MemeController::new();
            controller.voices_changed(settings.speech.voices);
            output::print_voice_options(controller.voices());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
