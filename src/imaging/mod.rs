//! Image processing in pure Rust, statically linked.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Fit** | [`fit_image`] (pure geometry) |
//! | **Compose** | `image` crate resize + overlay |
//! | **Captions** | `ab_glyph` glyph outlines |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for canvas geometry (unit testable)
//! - **Parameters**: Data structures describing a render
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{FitError, FitResult, fit_image, pixel_rect};
pub use operations::{CanvasConfig, create_meme, plan_render};
pub use params::{CaptionStyle, RenderParams, Rgba};
pub use rust_backend::RustBackend;
