/// Presentation writer for PPTX.
use crate::common::Emu;
use crate::common::xml::escape_xml;
use crate::error::{Error, Result};
use log::debug;
use std::fmt::Write as FmtWrite;
use std::path::Path;

use super::super::package::PackageWriter;
use super::super::template::XML_DECLARATION;
use super::slide::Slide;

/// A PowerPoint presentation under construction.
///
/// Slides are appended with [`Presentation::add_slide`] and the finished deck
/// is written once with [`Presentation::save`] or [`Presentation::to_bytes`].
#[derive(Debug, Clone)]
pub struct Presentation {
    pub(crate) slides: Vec<Slide>,
    /// Slide width in EMUs (914400 EMU = 1 inch)
    slide_width: Emu,
    /// Slide height in EMUs
    slide_height: Emu,
    /// Document title stored in the core properties
    title: Option<String>,
}

impl Presentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: 9_144_000,
            slide_height: 6_858_000,
            title: None,
        }
    }

    /// Append a new blank slide and return it.
    pub fn add_slide(&mut self) -> &mut Slide {
        let slide_id = (self.slides.len() + 256) as u32;
        self.slides.push(Slide::new(slide_id));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_width(&self) -> Emu {
        self.slide_width
    }

    pub fn set_slide_width(&mut self, width: Emu) {
        self.slide_width = width;
    }

    pub fn slide_height(&self) -> Emu {
        self.slide_height
    }

    pub fn set_slide_height(&mut self, height: Emu) {
        self.slide_height = height;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Serialize the presentation into the bytes of a `.pptx` package.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }

    /// Write the presentation to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes).map_err(|e| Error::io(path, e))?;
        debug!(
            "wrote {} slides ({} bytes) to {}",
            self.slides.len(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }

    /// Generate presentation.xml with the relationship IDs of the master and
    /// of every slide, in slide order.
    pub(crate) fn generate_presentation_xml(
        &self,
        master_rel_id: &str,
        slide_rel_ids: &[String],
    ) -> Result<String> {
        if slide_rel_ids.len() != self.slides.len() {
            return Err(Error::Xml(format!(
                "{} slide relationships for {} slides",
                slide_rel_ids.len(),
                self.slides.len()
            )));
        }

        let mut xml = String::with_capacity(1024 + self.slides.len() * 48);

        xml.push_str(XML_DECLARATION);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        xml.push_str("<p:sldMasterIdLst>");
        write!(
            xml,
            r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#,
            escape_xml(master_rel_id)
        )?;
        xml.push_str("</p:sldMasterIdLst>");

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    escape_xml(rel_id)
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("<p:defaultTextStyle/>");
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}
