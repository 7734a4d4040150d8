//! Slide content: text leaves, nested groups and per-slide specs.
//!
//! A bullet list is a sequence of [`ContentNode`]s. A leaf is one paragraph;
//! a group indents every paragraph inside it by one more level.
//!
//! In YAML a leaf is either a plain string or a map with styling, and a
//! nested sequence is a group:
//!
//! ```yaml
//! items:
//!   - "Major Flaws:"
//!   - - Touch response lag
//!     - Clicks felt unnatural and tiring
//!   - text: "1. The Rise of BYOD:"
//!     bullet: false
//!     font_size: 22
//!     bold: true
//! ```

use crate::pptx::format::Alignment;
use crate::pptx::writer::MAX_LEVEL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Paragraph styling carried by a leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafStyle {
    pub bullet: bool,
    /// Font size in points
    pub font_size: f64,
    pub bold: bool,
    pub align: Alignment,
}

impl Default for LeafStyle {
    /// A 20 pt left-aligned bullet.
    fn default() -> Self {
        Self {
            bullet: true,
            font_size: 20.0,
            bold: false,
            align: Alignment::Left,
        }
    }
}

/// One paragraph of text with its styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LeafRepr", into = "LeafRepr")]
pub struct Leaf {
    pub text: String,
    pub style: LeafStyle,
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LeafStyle::default(),
        }
    }

    pub fn with_style(text: impl Into<String>, style: LeafStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

fn default_bullet() -> bool {
    true
}

fn default_font_size() -> f64 {
    20.0
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LeafRepr {
    Plain(String),
    Styled {
        text: String,
        #[serde(default = "default_bullet")]
        bullet: bool,
        #[serde(default = "default_font_size")]
        font_size: f64,
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        align: Alignment,
    },
}

impl From<LeafRepr> for Leaf {
    fn from(repr: LeafRepr) -> Self {
        match repr {
            LeafRepr::Plain(text) => Leaf::new(text),
            LeafRepr::Styled {
                text,
                bullet,
                font_size,
                bold,
                align,
            } => Leaf::with_style(
                text,
                LeafStyle {
                    bullet,
                    font_size,
                    bold,
                    align,
                },
            ),
        }
    }
}

impl From<Leaf> for LeafRepr {
    fn from(leaf: Leaf) -> Self {
        if leaf.style == LeafStyle::default() {
            LeafRepr::Plain(leaf.text)
        } else {
            LeafRepr::Styled {
                text: leaf.text,
                bullet: leaf.style.bullet,
                font_size: leaf.style.font_size,
                bold: leaf.style.bold,
                align: leaf.style.align,
            }
        }
    }
}

/// A bullet-list entry: a single paragraph or an indented group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    Group(Vec<ContentNode>),
    Leaf(Leaf),
}

impl ContentNode {
    /// Default-styled bullet.
    pub fn leaf(text: impl Into<String>) -> Self {
        ContentNode::Leaf(Leaf::new(text))
    }

    pub fn styled(text: impl Into<String>, style: LeafStyle) -> Self {
        ContentNode::Leaf(Leaf::with_style(text, style))
    }

    /// Group of default-styled bullets.
    pub fn group<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentNode::Group(items.into_iter().map(ContentNode::leaf).collect())
    }
}

/// Flatten content nodes into `(level, leaf)` pairs in document order.
///
/// Top-level leaves are level 0; each enclosing group adds one, up to
/// [`MAX_LEVEL`].
pub fn flatten(nodes: &[ContentNode]) -> Vec<(u8, &Leaf)> {
    fn walk<'a>(nodes: &'a [ContentNode], level: u8, out: &mut Vec<(u8, &'a Leaf)>) {
        for node in nodes {
            match node {
                ContentNode::Leaf(leaf) => out.push((level, leaf)),
                ContentNode::Group(children) => {
                    walk(children, (level + 1).min(MAX_LEVEL), out)
                },
            }
        }
    }

    let mut out = Vec::new();
    walk(nodes, 0, &mut out);
    out
}

/// An image placed on a slide, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureSpec {
    pub path: PathBuf,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PictureSpec {
    pub fn new(path: impl Into<PathBuf>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            path: path.into(),
            x,
            y,
            width,
            height,
        }
    }
}

fn default_conclusion_title() -> String {
    "Conclusion".to_string()
}

/// Content of one slide, selecting the builder that lays it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SlideSpec {
    /// Large centered title with an optional subtitle.
    Title {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
    },
    /// Title over a bullet list, optionally with pictures.
    Bullets {
        title: String,
        items: Vec<ContentNode>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pictures: Vec<PictureSpec>,
    },
    /// Closing slide with larger bullet points.
    Conclusion {
        #[serde(default = "default_conclusion_title")]
        title: String,
        #[serde(default)]
        points: Vec<String>,
    },
}

impl SlideSpec {
    pub fn title(&self) -> &str {
        match self {
            SlideSpec::Title { title, .. }
            | SlideSpec::Bullets { title, .. }
            | SlideSpec::Conclusion { title, .. } => title,
        }
    }
}
