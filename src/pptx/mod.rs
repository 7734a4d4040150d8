//! PowerPoint (.pptx) presentation writing.
//!
//! A minimal PresentationML writer: blank slides holding text boxes and
//! pictures, one master, one blank layout and one theme. [`inspect`] reads a
//! written package back for verification.
//!
//! # Example
//!
//! ```no_run
//! use deckforge::common::inches;
//! use deckforge::pptx::Presentation;
//!
//! let mut pres = Presentation::new();
//! let slide = pres.add_slide();
//! slide
//!     .add_text_box(inches(1.0), inches(1.0), inches(8.0), inches(1.0))
//!     .set_text("Hello");
//! pres.save("hello.pptx")?;
//! # Ok::<(), deckforge::Error>(())
//! ```

pub mod constants;
pub mod format;
pub mod inspect;
pub mod package;
pub mod template;
pub mod writer;

pub use format::{Alignment, ImageData, ImageFormat};
pub use inspect::{ParagraphSummary, PictureSummary, PresentationSummary, SlideSummary};
pub use writer::{Frame, Paragraph, Presentation, RunFormat, Shape, Slide, TextFrame, TextRun};
