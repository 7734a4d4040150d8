//! Common types and utilities shared by the writer, the inspector and the
//! deck pipeline.

pub mod color;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use color::RGBColor;
pub use unit::{Emu, inches};
