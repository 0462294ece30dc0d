//! Reading captions aloud.
//!
//! A speech engine announces its voices some time after startup; until then
//! the voice picker stays empty and the utterance uses the engine default.
//! Once voices arrive, the engine's default voice is pre-selected.
//!
//! Volume is entered as a whole percentage and shown with one of four icons:
//!
//! | Percent | Level | Icon |
//! |---------|-------|------|
//! | 67–100  | High   | `icons/volume-level-3.svg` |
//! | 34–66   | Medium | `icons/volume-level-2.svg` |
//! | 1–33    | Low    | `icons/volume-level-1.svg` |
//! | 0       | Muted  | `icons/volume-level-0.svg` |

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("speech engine has no voices")]
    NoVoices,
}

/// A voice offered by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Voice {
    pub name: String,
    pub lang: String,
    #[serde(default)]
    pub default: bool,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            default,
        }
    }

    /// Label shown in the voice picker, e.g. `Alex (en-US) -- DEFAULT --`.
    pub fn option_label(&self) -> String {
        let mut label = format!("{} ({})", self.name, self.lang);
        if self.default {
            label.push_str(" -- DEFAULT --");
        }
        label
    }
}

/// Voices announced by the engine, in engine order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
}

impl VoiceCatalog {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self { voices }
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// The engine's default voice. If several claim it, the last one wins.
    pub fn default_voice(&self) -> Option<&Voice> {
        self.voices.iter().rev().find(|v| v.default)
    }

    /// Look up a voice by exact name. Duplicate names resolve to the last entry.
    pub fn find(&self, name: &str) -> Option<&Voice> {
        self.voices.iter().rev().find(|v| v.name == name)
    }

    pub fn option_labels(&self) -> Vec<String> {
        self.voices.iter().map(Voice::option_label).collect()
    }
}

/// Volume as a whole percentage, clamped to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Volume(u8);

impl Volume {
    pub const MAX: Volume = Volume(100);

    pub fn new(percent: u32) -> Self {
        Self(percent.min(100) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Gain in `0.0..=1.0` for the utterance.
    pub fn gain(self) -> f32 {
        self.0 as f32 / 100.0
    }

    pub fn level(self) -> VolumeLevel {
        match self.0 {
            67.. => VolumeLevel::High,
            34..=66 => VolumeLevel::Medium,
            1..=33 => VolumeLevel::Low,
            0 => VolumeLevel::Muted,
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    Medium,
    High,
}

impl VolumeLevel {
    /// Icon index 0–3.
    pub fn index(self) -> u8 {
        match self {
            VolumeLevel::Muted => 0,
            VolumeLevel::Low => 1,
            VolumeLevel::Medium => 2,
            VolumeLevel::High => 3,
        }
    }

    pub fn icon_path(self) -> String {
        format!("icons/volume-level-{}.svg", self.index())
    }
}

/// One unit of speech: text plus the voice and volume to say it with.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// `None` lets the engine pick.
    pub voice: Option<Voice>,
    /// Gain in `0.0..=1.0`.
    pub volume: f32,
}

/// Text read aloud for a pair of captions: top, a space, then bottom.
pub fn compose_speech(top: &str, bottom: &str) -> String {
    format!("{} {}", top, bottom)
}

/// A text-to-speech engine.
pub trait SpeechEngine {
    /// Voices the engine can speak with.
    fn voices(&self) -> Result<Vec<Voice>, SpeechError>;

    /// Queue an utterance for playback.
    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;
}

/// Engine that "speaks" by writing a transcript line per utterance.
///
/// Voices come from configuration. Useful on machines without a synthesizer
/// and as a record of what would have been said.
pub struct TranscriptEngine<W: Write> {
    voices: Vec<Voice>,
    out: Mutex<W>,
}

impl<W: Write> TranscriptEngine<W> {
    pub fn new(voices: Vec<Voice>, out: W) -> Self {
        Self {
            voices,
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

/// Transcript line for an utterance: `[voice @ NN%] text`.
pub fn transcript_line(utterance: &Utterance) -> String {
    let voice = utterance
        .voice
        .as_ref()
        .map(|v| v.name.as_str())
        .unwrap_or("default voice");
    format!(
        "[{} @ {}%] {}",
        voice,
        (utterance.volume * 100.0).round() as u32,
        utterance.text
    )
}

impl<W: Write> SpeechEngine for TranscriptEngine<W> {
    fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        if self.voices.is_empty() {
            return Err(SpeechError::NoVoices);
        }
        Ok(self.voices.clone())
    }

    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{}", transcript_line(utterance))?;
        out.flush()?;
        Ok(())
    }
}
