//! Meme editor state: the button flow and the speech settings.
//!
//! The editor moves through four states. Each state fixes which of the three
//! buttons (generate, clear, read text) is usable:
//!
//! ```text
//!              image loaded          form submitted
//!   NoImage ───────────────▶ ImageLoaded ───────────▶ MemeGenerated
//!                               ▲    ▲                   │
//!                image loaded   │    │ image loaded      │ clear clicked
//!                  (any state) ─┘    │                   ▼
//!                                    └──────────────── Cleared
//!                                       form submitted ──▶ MemeGenerated
//! ```
//!
//! Events that would require a disabled button are rejected with
//! [`TransitionError::NotAllowed`] instead of being silently ignored.
//!
//! [`MemeController`] owns all session state that the editor mutates: the
//! state machine, the loaded image, the voice catalog and the utterance
//! settings. It lives for the whole session.

use crate::caption::Captions;
use crate::imaging::{Dimensions, FitResult};
use crate::speech::{Utterance, Voice, VoiceCatalog, Volume, VolumeLevel, compose_speech};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemeState {
    NoImage,
    ImageLoaded,
    MemeGenerated,
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemeEvent {
    ImageLoaded,
    FormSubmitted,
    ClearClicked,
    ReadTextClicked,
}

impl fmt::Display for MemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemeState::NoImage => "no image",
            MemeState::ImageLoaded => "image loaded",
            MemeState::MemeGenerated => "meme generated",
            MemeState::Cleared => "cleared",
        };
        f.write_str(name)
    }
}

impl fmt::Display for MemeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemeEvent::ImageLoaded => "image loaded",
            MemeEvent::FormSubmitted => "form submitted",
            MemeEvent::ClearClicked => "clear clicked",
            MemeEvent::ReadTextClicked => "read text clicked",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("'{event}' is not allowed while {state}")]
    NotAllowed { state: MemeState, event: MemeEvent },
}

/// Which buttons are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonStates {
    pub submit: bool,
    pub clear: bool,
    pub read_text: bool,
}

impl MemeState {
    pub fn buttons(self) -> ButtonStates {
        match self {
            MemeState::NoImage => ButtonStates {
                submit: false,
                clear: false,
                read_text: false,
            },
            MemeState::ImageLoaded | MemeState::Cleared => ButtonStates {
                submit: true,
                clear: false,
                read_text: false,
            },
            MemeState::MemeGenerated => ButtonStates {
                submit: false,
                clear: true,
                read_text: true,
            },
        }
    }

    pub fn transition(self, event: MemeEvent) -> Result<MemeState, TransitionError> {
        match (self, event) {
            (_, MemeEvent::ImageLoaded) => Ok(MemeState::ImageLoaded),
            (MemeState::ImageLoaded | MemeState::Cleared, MemeEvent::FormSubmitted) => {
                Ok(MemeState::MemeGenerated)
            }
            (MemeState::MemeGenerated, MemeEvent::ClearClicked) => Ok(MemeState::Cleared),
            (MemeState::MemeGenerated, MemeEvent::ReadTextClicked) => {
                Ok(MemeState::MemeGenerated)
            }
            (state, event) => Err(TransitionError::NotAllowed { state, event }),
        }
    }
}

/// The image currently on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    /// Alt text: the file name the image was picked from.
    pub alt: String,
    pub dimensions: Dimensions,
    pub fit: FitResult,
}

/// Session-lifetime owner of editor state.
#[derive(Debug, Clone)]
pub struct MemeController {
    state: MemeState,
    image: Option<LoadedImage>,
    captions: Captions,
    voices: VoiceCatalog,
    voice: Option<Voice>,
    volume: Volume,
}

impl Default for MemeController {
    fn default() -> Self {
        Self::new()
    }
}

impl MemeController {
    pub fn new() -> Self {
        Self {
            state: MemeState::NoImage,
            image: None,
            captions: Captions::default(),
            voices: VoiceCatalog::default(),
            voice: None,
            volume: Volume::default(),
        }
    }

    pub fn state(&self) -> MemeState {
        self.state
    }

    pub fn buttons(&self) -> ButtonStates {
        self.state.buttons()
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    /// Captions drawn by the last successful submit.
    pub fn captions(&self) -> &Captions {
        &self.captions
    }

    fn apply(&mut self, event: MemeEvent) -> Result<(), TransitionError> {
        let next = self.state.transition(event)?;
        log::debug!("{} --[{}]--> {}", self.state, event, next);
        self.state = next;
        Ok(())
    }

    /// A new image finished loading and was drawn at `fit`.
    pub fn image_loaded(
        &mut self,
        alt: impl Into<String>,
        dimensions: Dimensions,
        fit: FitResult,
    ) -> Result<(), TransitionError> {
        self.apply(MemeEvent::ImageLoaded)?;
        self.image = Some(LoadedImage {
            alt: alt.into(),
            dimensions,
            fit,
        });
        self.captions = Captions::default();
        Ok(())
    }

    /// The caption form was submitted and the captions drawn.
    pub fn submit(&mut self, captions: Captions) -> Result<(), TransitionError> {
        self.apply(MemeEvent::FormSubmitted)?;
        self.captions = captions;
        Ok(())
    }

    /// The canvas was wiped. The loaded image stays known so a new submit
    /// can still be attempted, but nothing remains drawn.
    pub fn clear(&mut self) -> Result<(), TransitionError> {
        self.apply(MemeEvent::ClearClicked)?;
        self.captions = Captions::default();
        Ok(())
    }

    /// Build the utterance for the "read text" button.
    ///
    /// Only available once a meme has been generated.
    pub fn read_text(&self) -> Result<Utterance, TransitionError> {
        self.state.transition(MemeEvent::ReadTextClicked)?;
        Ok(self.utterance(&self.captions))
    }

    /// Utterance for arbitrary captions with the current voice and volume.
    pub fn utterance(&self, captions: &Captions) -> Utterance {
        Utterance {
            text: compose_speech(&captions.top, &captions.bottom),
            voice: self.voice.clone(),
            volume: self.volume.gain(),
        }
    }

    /// The engine announced its voices. The default voice becomes selected.
    pub fn voices_changed(&mut self, voices: Vec<Voice>) {
        self.voices = VoiceCatalog::new(voices);
        if let Some(default) = self.voices.default_voice() {
            self.voice = Some(default.clone());
        }
        log::debug!("{} voices available", self.voices.voices().len());
    }

    pub fn voices(&self) -> &VoiceCatalog {
        &self.voices
    }

    pub fn selected_voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    /// Select a voice by name. Returns `false` and keeps the current voice
    /// when no voice has that name.
    pub fn select_voice(&mut self, name: &str) -> bool {
        match self.voices.find(name) {
            Some(voice) => {
                self.voice = Some(voice.clone());
                true
            }
            None => {
                log::warn!("unknown voice '{}'", name);
                false
            }
        }
    }

    /// Set the volume from a percentage; returns the icon level to show.
    pub fn set_volume(&mut self, percent: u32) -> VolumeLevel {
        self.volume = Volume::new(percent);
        self.volume.level()
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }
}
