//! # memecanvas
//!
//! Fit a picture into a fixed-size canvas, caption it top and bottom, and
//! read the captions aloud.
//!
//! # How a Meme Is Made
//!
//! ```text
//! 1. Load      image file  →  fitted onto a background-filled canvas
//! 2. Caption   top/bottom  →  drawn centered, squeezed to canvas width
//! 3. Speak     captions    →  one utterance with the chosen voice and volume
//! ```
//!
//! The geometry at the heart of step 1 is [`imaging::fit_image`]: the image is
//! scaled to span one canvas dimension and centered along the other, always
//! preserving its aspect ratio. It is a pure function and the only part of
//! the system with no ties to pixels, fonts, or speech.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Fit calculation, render parameters, `image`-crate backend |
//! | [`caption`] | Caption anchors, baselines and horizontal squeeze |
//! | [`controller`] | Button-flow state machine and session-owned speech state |
//! | [`speech`] | Voices, volume levels, utterances, the speech engine seam |
//! | [`config`] | `config.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit State Instead of Toggled Buttons
//!
//! Which buttons are usable is a function of a single [`controller::MemeState`].
//! Events arriving in a state that does not accept them are errors, so there is
//! no way to, say, clear a canvas that was never generated.
//!
//! ## Pluggable Speech
//!
//! Synthesis sits behind [`speech::SpeechEngine`]. The bundled
//! [`speech::TranscriptEngine`] writes what would be spoken, which keeps the
//! binary free of native audio dependencies.

pub mod caption;
pub mod config;
pub mod controller;
pub mod imaging;
pub mod output;
pub mod speech;
