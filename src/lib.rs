//! deckforge - generate a themed PowerPoint deck
//!
//! The crate renders a vertical gradient background, lays out title, bullet
//! and conclusion slides on top of it with a logo in the corner, and writes
//! the result as a `.pptx` package.
//!
//! # Modules
//!
//! - [`gradient`]: background image rendering
//! - [`pptx`]: a minimal PresentationML writer and a reader for its output
//! - [`deck`]: deck configuration, slide builders and the pipeline
//!
//! # Example
//!
//! ```no_run
//! use deckforge::deck::{DeckConfig, run};
//!
//! # fn main() -> Result<(), deckforge::Error> {
//! let report = run(&DeckConfig::default())?;
//! println!("Saved {}", report.output.display());
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod deck;
pub mod error;
pub mod gradient;
pub mod pptx;

pub use error::{Error, Result};
pub use gradient::{GradientSpec, make_vertical_gradient};
