//! Slide deck generation.
//!
//! [`DeckConfig`] describes the deck, [`pipeline::run`] renders the
//! background, builds every slide and saves the presentation.

pub mod builders;
pub mod compositor;
pub mod config;
pub mod content;
pub mod defaults;
pub mod pipeline;
pub mod styling;

pub use compositor::Backdrop;
pub use config::{DeckConfig, LogoSpec, PageSize};
pub use content::{ContentNode, Leaf, LeafStyle, PictureSpec, SlideSpec};
pub use pipeline::{Report, run};
pub use styling::style_paragraph;
