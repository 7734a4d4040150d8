/// Shape types and XML serialization for PPTX slides.
use crate::common::Emu;
use crate::common::xml::escape_xml;
use crate::error::Result;
use std::fmt::Write as FmtWrite;

use super::super::format::ImageData;
use super::text::TextFrame;

/// Position and size of a shape, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Frame {
    pub fn new(x: Emu, y: Emu, width: Emu, height: Emu) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> Emu {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> Emu {
        self.y + self.height
    }

    fn write_xfrm(&self, xml: &mut String) {
        let mut buf = itoa::Buffer::new();
        xml.push_str("<a:xfrm><a:off x=\"");
        xml.push_str(buf.format(self.x));
        xml.push_str("\" y=\"");
        xml.push_str(buf.format(self.y));
        xml.push_str("\"/><a:ext cx=\"");
        xml.push_str(buf.format(self.width));
        xml.push_str("\" cy=\"");
        xml.push_str(buf.format(self.height));
        xml.push_str("\"/></a:xfrm>");
    }
}

/// A shape on a slide.
#[derive(Debug, Clone)]
pub struct Shape {
    pub(crate) shape_id: u32,
    pub(crate) frame: Frame,
    pub(crate) kind: ShapeKind,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeKind {
    TextBox { text_frame: TextFrame },
    Picture { image: ImageData, description: String },
}

impl Shape {
    pub(crate) fn new_text_box(shape_id: u32, frame: Frame) -> Self {
        Self {
            shape_id,
            frame,
            kind: ShapeKind::TextBox {
                text_frame: TextFrame::new(),
            },
        }
    }

    pub(crate) fn new_picture(
        shape_id: u32,
        frame: Frame,
        image: ImageData,
        description: String,
    ) -> Self {
        Self {
            shape_id,
            frame,
            kind: ShapeKind::Picture { image, description },
        }
    }

    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Display name, numbered the way PowerPoint numbers new shapes.
    pub fn name(&self) -> String {
        let prefix = match self.kind {
            ShapeKind::TextBox { .. } => "TextBox",
            ShapeKind::Picture { .. } => "Picture",
        };
        format!("{} {}", prefix, self.shape_id - 1)
    }

    pub fn is_picture(&self) -> bool {
        matches!(self.kind, ShapeKind::Picture { .. })
    }

    pub fn text_frame(&self) -> Option<&TextFrame> {
        match &self.kind {
            ShapeKind::TextBox { text_frame } => Some(text_frame),
            _ => None,
        }
    }

    pub fn text_frame_mut(&mut self) -> Option<&mut TextFrame> {
        match &mut self.kind {
            ShapeKind::TextBox { text_frame } => Some(text_frame),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&ImageData> {
        match &self.kind {
            ShapeKind::Picture { image, .. } => Some(image),
            _ => None,
        }
    }

    /// Generate XML for this shape.
    ///
    /// Pictures need the relationship ID of their media part.
    pub(crate) fn to_xml(&self, xml: &mut String, image_rel_id: Option<&str>) -> Result<()> {
        match &self.kind {
            ShapeKind::TextBox { text_frame } => {
                xml.push_str("<p:sp><p:nvSpPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="{}"/>"#,
                    self.shape_id,
                    self.name()
                )?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);

                xml.push_str("<p:spPr>");
                self.frame.write_xfrm(xml);
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
                xml.push_str("</p:spPr>");

                text_frame.write_xml(xml)?;
                xml.push_str("</p:sp>");
            },
            ShapeKind::Picture { description, .. } => {
                xml.push_str("<p:pic><p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="{}" descr="{}"/>"#,
                    self.shape_id,
                    self.name(),
                    escape_xml(description)
                )?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
                xml.push_str("<p:nvPr/></p:nvPicPr>");

                xml.push_str("<p:blipFill>");
                let rid = image_rel_id.unwrap_or("rIdImagePlaceholder");
                write!(xml, r#"<a:blip r:embed="{}"/>"#, rid)?;
                xml.push_str("<a:stretch><a:fillRect/></a:stretch></p:blipFill>");

                xml.push_str("<p:spPr>");
                self.frame.write_xfrm(xml);
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr></p:pic>");
            },
        }

        Ok(())
    }
}
