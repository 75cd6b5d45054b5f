//! time-mosaic library crate.
//!
//! A webcam mirror that breaks the picture into a mosaic of colour blocks
//! and glyphs, noisier the more screen time is reported. Modules are
//! public for integration testing.

pub mod app;
pub mod camera;
pub mod chaos;
pub mod cli;
pub mod config;
pub mod error;
pub mod mirror;
pub mod mosaic;
pub mod source;
pub mod surface;
pub mod terminal;

pub use chaos::ChaosLevel;
pub use error::MirrorError;
