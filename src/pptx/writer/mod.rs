//! Presentation writer components for PPTX.

pub mod pres;
pub(crate) mod relmap;
pub mod shape;
pub mod slide;
pub mod text;

// Re-export main types
pub use pres::Presentation;
pub use shape::{Frame, Shape};
pub use slide::Slide;
pub use text::{LINE_BREAK, MAX_LEVEL, Paragraph, RunFormat, TextFrame, TextRun};
