/// Text frame, paragraph and run types for PPTX text boxes.
use crate::common::RGBColor;
use crate::common::unit::{line_spacing_to_pct, pt_to_centipoints};
use crate::common::xml::escape_xml;
use crate::error::Result;
use std::fmt::Write as FmtWrite;

use super::super::format::Alignment;

/// Deepest indentation level PresentationML allows on a paragraph.
pub const MAX_LEVEL: u8 = 8;

/// Soft line break inside a paragraph, written as `<a:br/>`.
pub const LINE_BREAK: char = '\u{B}';

/// Character formatting of a single run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunFormat {
    /// Latin font family
    pub font: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub color: Option<RGBColor>,
}

/// A span of text sharing one [`RunFormat`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub format: RunFormat,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: RunFormat::default(),
        }
    }

    fn write_props(&self, xml: &mut String) -> Result<()> {
        let f = &self.format;
        xml.push_str("<a:rPr lang=\"en-US\"");
        if let Some(size) = f.size {
            write!(xml, " sz=\"{}\"", pt_to_centipoints(size))?;
        }
        if let Some(bold) = f.bold {
            write!(xml, " b=\"{}\"", u8::from(bold))?;
        }
        xml.push_str(" dirty=\"0\"");

        if f.color.is_none() && f.font.is_none() {
            xml.push_str("/>");
        } else {
            xml.push('>');
            // CT_TextCharacterProperties: fill before latin
            if let Some(color) = f.color {
                write!(
                    xml,
                    "<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>",
                    color.to_hex()
                )?;
            }
            if let Some(ref font) = f.font {
                write!(xml, "<a:latin typeface=\"{}\"/>", escape_xml(font))?;
            }
            xml.push_str("</a:rPr>");
        }
        Ok(())
    }

    /// Write the run; every line break in its text becomes an `<a:br>`
    /// carrying the same character properties.
    fn write_xml(&self, xml: &mut String) -> Result<()> {
        let mut props = String::new();
        self.write_props(&mut props)?;

        let segments: Vec<&str> = self.text.split(['\n', LINE_BREAK]).collect();
        let single = segments.len() == 1;
        for (index, segment) in segments.into_iter().enumerate() {
            if index > 0 {
                write!(xml, "<a:br>{}</a:br>", props)?;
            }
            if single || !segment.is_empty() {
                write!(xml, "<a:r>{}<a:t>{}</a:t></a:r>", props, escape_xml(segment))?;
            }
        }
        Ok(())
    }
}

/// One paragraph of a text frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    runs: Vec<TextRun>,
    level: u8,
    alignment: Option<Alignment>,
    /// Space before, in points
    space_before: Option<f64>,
    /// Space after, in points
    space_after: Option<f64>,
    /// Line spacing as a multiple of single spacing
    line_spacing: Option<f64>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Replace the content with a single unformatted run.
    ///
    /// `\n` and `\v` both become [`LINE_BREAK`]. An empty string leaves the
    /// paragraph without runs.
    pub fn set_text(&mut self, text: &str) {
        self.runs.clear();
        if !text.is_empty() {
            self.runs.push(TextRun::new(text.replace('\n', "\u{B}")));
        }
    }

    pub fn add_run(&mut self, text: &str) -> &mut TextRun {
        self.runs.push(TextRun::new(text));
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn runs_mut(&mut self) -> &mut [TextRun] {
        &mut self.runs
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Set the indentation level, clamped to [`MAX_LEVEL`].
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(MAX_LEVEL);
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = Some(alignment);
    }

    pub fn space_before(&self) -> Option<f64> {
        self.space_before
    }

    pub fn set_space_before(&mut self, points: f64) {
        self.space_before = Some(points);
    }

    pub fn space_after(&self) -> Option<f64> {
        self.space_after
    }

    pub fn set_space_after(&mut self, points: f64) {
        self.space_after = Some(points);
    }

    pub fn line_spacing(&self) -> Option<f64> {
        self.line_spacing
    }

    pub fn set_line_spacing(&mut self, multiple: f64) {
        self.line_spacing = Some(multiple);
    }

    fn has_properties(&self) -> bool {
        self.level > 0
            || self.alignment.is_some()
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.line_spacing.is_some()
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<a:p>");

        if self.has_properties() {
            xml.push_str("<a:pPr");
            if self.level > 0 {
                write!(xml, " lvl=\"{}\"", self.level)?;
            }
            if let Some(align) = self.alignment {
                write!(xml, " algn=\"{}\"", align.as_ooxml())?;
            }
            xml.push('>');
            // CT_TextParagraphProperties: lnSpc, spcBef, spcAft
            if let Some(multiple) = self.line_spacing {
                write!(
                    xml,
                    "<a:lnSpc><a:spcPct val=\"{}\"/></a:lnSpc>",
                    line_spacing_to_pct(multiple)
                )?;
            }
            if let Some(points) = self.space_before {
                write!(
                    xml,
                    "<a:spcBef><a:spcPts val=\"{}\"/></a:spcBef>",
                    pt_to_centipoints(points)
                )?;
            }
            if let Some(points) = self.space_after {
                write!(
                    xml,
                    "<a:spcAft><a:spcPts val=\"{}\"/></a:spcAft>",
                    pt_to_centipoints(points)
                )?;
            }
            xml.push_str("</a:pPr>");
        }

        for run in &self.runs {
            run.write_xml(xml)?;
        }

        xml.push_str("</a:p>");
        Ok(())
    }
}

/// The text body of a text box. Always holds at least one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
    word_wrap: bool,
}

impl Default for TextFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFrame {
    /// A frame holding one empty paragraph, without word wrap.
    pub fn new() -> Self {
        Self {
            paragraphs: vec![Paragraph::new()],
            word_wrap: false,
        }
    }

    /// Paragraph texts joined by `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace all content; each `\n`-separated line becomes a paragraph.
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs = text
            .split('\n')
            .map(|line| {
                let mut p = Paragraph::new();
                p.set_text(line);
                p
            })
            .collect();
    }

    /// Remove everything except a single empty paragraph.
    pub fn clear(&mut self) {
        self.paragraphs.clear();
        self.paragraphs.push(Paragraph::new());
    }

    /// Append a new empty paragraph.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    /// The paragraph to fill next: the only paragraph while the frame is
    /// still empty, otherwise a newly appended one.
    pub fn next_paragraph(&mut self) -> &mut Paragraph {
        if self.text().is_empty() {
            return &mut self.paragraphs[0];
        }
        self.add_paragraph()
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn set_word_wrap(&mut self, wrap: bool) {
        self.word_wrap = wrap;
    }

    /// Write `<p:txBody>` for a text box.
    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<p:txBody>");
        write!(
            xml,
            r#"<a:bodyPr wrap="{}" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#,
            if self.word_wrap { "square" } else { "none" }
        )?;
        xml.push_str("<a:lstStyle/>");
        for paragraph in &self.paragraphs {
            paragraph.write_xml(xml)?;
        }
        xml.push_str("</p:txBody>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_replaces_runs() {
        let mut p = Paragraph::new();
        p.add_run("one");
        p.add_run("two");
        assert_eq!(p.text(), "onetwo");

        p.set_text("three");
        assert_eq!(p.runs().len(), 1);
        assert_eq!(p.text(), "three");

        p.set_text("");
        assert!(p.runs().is_empty());
    }

    #[test]
    fn test_line_breaks_inside_paragraph() {
        let mut p = Paragraph::new();
        p.set_text("one\ntwo\u{B}three");
        assert_eq!(p.runs().len(), 1);
        assert_eq!(p.text(), "one\u{B}two\u{B}three");
        p.runs_mut()[0].format.bold = Some(true);

        let mut xml = String::new();
        p.write_xml(&mut xml).unwrap();
        assert_eq!(xml.matches(r#"<a:br><a:rPr lang="en-US" b="1" dirty="0"/></a:br>"#).count(), 2);
        assert_eq!(xml.matches("<a:t>").count(), 3);
        assert!(!xml.contains('\n'));
        assert!(!xml.contains('\u{B}'));

        p.set_text("trailing\n");
        xml.clear();
        p.write_xml(&mut xml).unwrap();
        assert!(xml.ends_with("<a:t>trailing</a:t></a:r><a:br><a:rPr lang=\"en-US\" dirty=\"0\"/></a:br></a:p>"));
    }

    #[test]
    fn test_control_characters_stay_well_formed() {
        let mut tf = TextFrame::new();
        tf.paragraphs_mut()[0].set_text("ring\u{7}bell\u{0}");
        let mut xml = String::new();
        tf.write_xml(&mut xml).unwrap();
        assert!(xml.contains("<a:t>ring_x0007_bell_x0000_</a:t>"));

        let wrapped = format!(
            r#"<root xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">{xml}</root>"#
        );
        let mut reader = quick_xml::Reader::from_str(&wrapped);
        loop {
            match reader.read_event().unwrap() {
                quick_xml::events::Event::Eof => break,
                _ => {},
            }
        }
    }

    #[test]
    fn test_level_is_clamped() {
        let mut p = Paragraph::new();
        p.set_level(12);
        assert_eq!(p.level(), MAX_LEVEL);
    }

    #[test]
    fn test_frame_set_text_splits_lines() {
        let mut tf = TextFrame::new();
        tf.set_text("BLACKBERRY\nA concise analysis");
        assert_eq!(tf.paragraphs().len(), 2);
        assert_eq!(tf.paragraphs()[1].text(), "A concise analysis");
        assert_eq!(tf.text(), "BLACKBERRY\nA concise analysis");
    }

    #[test]
    fn test_clear_leaves_one_empty_paragraph() {
        let mut tf = TextFrame::new();
        tf.set_text("a\nb\nc");
        tf.clear();
        assert_eq!(tf.paragraphs().len(), 1);
        assert_eq!(tf.text(), "");
    }

    #[test]
    fn test_next_paragraph_reuses_first_while_empty() {
        let mut tf = TextFrame::new();
        tf.next_paragraph().set_text("first");
        tf.next_paragraph().set_text("second");
        assert_eq!(tf.paragraphs().len(), 2);
        assert_eq!(tf.text(), "first\nsecond");
    }

    #[test]
    fn test_paragraph_xml_property_order() {
        let mut p = Paragraph::new();
        p.set_text("Tom & Jerry");
        p.set_level(1);
        p.set_alignment(Alignment::Center);
        p.set_space_before(6.0);
        p.set_space_after(12.0);
        p.set_line_spacing(1.2);
        {
            let run = &mut p.runs_mut()[0];
            run.format.size = Some(20.0);
            run.format.bold = Some(false);
            run.format.font = Some("Calibri".into());
            run.format.color = Some(RGBColor::WHITE);
        }

        let mut xml = String::new();
        p.write_xml(&mut xml).unwrap();

        assert!(xml.starts_with(r#"<a:p><a:pPr lvl="1" algn="ctr"><a:lnSpc><a:spcPct val="120000"/></a:lnSpc><a:spcBef><a:spcPts val="600"/></a:spcBef><a:spcAft><a:spcPts val="1200"/></a:spcAft></a:pPr>"#));
        assert!(xml.contains(r#"<a:rPr lang="en-US" sz="2000" b="0" dirty="0"><a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill><a:latin typeface="Calibri"/></a:rPr>"#));
        assert!(xml.contains("<a:t>Tom &amp; Jerry</a:t>"));
    }

    #[test]
    fn test_empty_paragraph_xml() {
        let mut xml = String::new();
        Paragraph::new().write_xml(&mut xml).unwrap();
        assert_eq!(xml, "<a:p></a:p>");
    }

    #[test]
    fn test_word_wrap_in_body_properties() {
        let mut tf = TextFrame::new();
        let mut xml = String::new();
        tf.write_xml(&mut xml).unwrap();
        assert!(xml.contains(r#"wrap="none""#));

        tf.set_word_wrap(true);
        xml.clear();
        tf.write_xml(&mut xml).unwrap();
        assert!(xml.contains(r#"wrap="square""#));
    }
}
