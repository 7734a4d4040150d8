//! The one formatting routine every paragraph of the deck goes through.

use crate::common::RGBColor;
use crate::pptx::format::Alignment;
use crate::pptx::writer::Paragraph;

use super::content::LeafStyle;

/// Glyph that marks a bullet paragraph.
pub const BULLET_GLYPH: char = '•';
/// Prefix inserted in front of bullet text.
pub const BULLET_PREFIX: &str = "• ";

pub const SPACE_BEFORE_PT: f64 = 6.0;
pub const SPACE_AFTER_PT: f64 = 12.0;
pub const LINE_SPACING: f64 = 1.2;

pub const BOLD_FONT: &str = "Times New Roman";
pub const REGULAR_FONT: &str = "Calibri";
pub const TEXT_COLOR: RGBColor = RGBColor::WHITE;

/// Apply alignment, spacing, bullet prefix and run formatting.
///
/// Must run after the paragraph text is set. The bullet prefix is only added
/// when the trimmed text does not already start with [`BULLET_GLYPH`], so
/// styling twice never doubles it.
pub fn style_paragraph(
    paragraph: &mut Paragraph,
    font_size: f64,
    bold: bool,
    bullet: bool,
    align: Alignment,
) {
    paragraph.set_alignment(align);
    paragraph.set_space_after(SPACE_AFTER_PT);
    paragraph.set_space_before(SPACE_BEFORE_PT);
    paragraph.set_line_spacing(LINE_SPACING);

    if bullet {
        let text = paragraph.text();
        if paragraph.runs().is_empty() {
            paragraph.add_run(BULLET_PREFIX);
        } else if !text.trim().starts_with(BULLET_GLYPH) {
            paragraph.set_text(&format!("{}{}", BULLET_PREFIX, text));
        }
    }

    let font = if bold { BOLD_FONT } else { REGULAR_FONT };
    for run in paragraph.runs_mut() {
        run.format.size = Some(font_size);
        run.format.bold = Some(bold);
        run.format.font = Some(font.to_string());
        run.format.color = Some(TEXT_COLOR);
    }
}

/// [`style_paragraph`] with the settings of a content leaf.
#[inline]
pub fn style_with(paragraph: &mut Paragraph, style: &LeafStyle) {
    style_paragraph(paragraph, style.font_size, style.bold, style.bullet, style.align);
}
