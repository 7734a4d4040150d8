//! XML helpers for the hand-written PresentationML serializer.

mod escape;

pub use escape::{escape_xml, unescape_xml};
