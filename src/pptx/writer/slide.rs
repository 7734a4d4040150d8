/// Slide type and XML generation for PPTX presentations.
use crate::common::Emu;
use crate::error::Result;
use log::trace;
use std::fmt::Write as FmtWrite;
use std::path::Path;

use super::super::constants::namespace;
use super::super::format::ImageData;
use super::super::template::{GROUP_SHAPE_PROPERTIES, XML_DECLARATION};
use super::relmap::RelationshipMapper;
use super::shape::{Frame, Shape};
use super::text::TextFrame;

/// A slide in a presentation.
///
/// Shapes are drawn in insertion order: the first shape added ends up at the
/// back of the z-order.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Slide ID (unique within the presentation, 256 and up)
    pub(crate) slide_id: u32,
    pub(crate) shapes: Vec<Shape>,
}

impl Slide {
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
        }
    }

    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    // IDs: 1=group, 2+=shapes
    fn next_shape_id(&self) -> u32 {
        (self.shapes.len() + 2) as u32
    }

    /// Add an empty text box and return its text frame.
    pub fn add_text_box(&mut self, x: Emu, y: Emu, width: Emu, height: Emu) -> &mut TextFrame {
        let shape = Shape::new_text_box(self.next_shape_id(), Frame::new(x, y, width, height));
        self.shapes.push(shape);
        let last = self.shapes.len() - 1;
        match self.shapes[last].text_frame_mut() {
            Some(frame) => frame,
            None => unreachable!("a text box always has a text frame"),
        }
    }

    /// Add a picture from a file, stretched to the given frame.
    pub fn add_picture(
        &mut self,
        image_path: impl AsRef<Path>,
        x: Emu,
        y: Emu,
        width: Emu,
        height: Emu,
    ) -> Result<()> {
        let image_path = image_path.as_ref();
        let image = ImageData::from_file(image_path)?;
        let description = format!("Picture from {}", image_path.display());
        self.add_image(&image, x, y, width, height, Some(description));
        Ok(())
    }

    /// Add a picture from encoded bytes.
    pub fn add_picture_from_bytes(
        &mut self,
        data: Vec<u8>,
        x: Emu,
        y: Emu,
        width: Emu,
        height: Emu,
        description: Option<String>,
    ) -> Result<()> {
        let image = ImageData::from_bytes(data)?;
        self.add_image(&image, x, y, width, height, description);
        Ok(())
    }

    /// Add a picture sharing already loaded image bytes.
    pub fn add_image(
        &mut self,
        image: &ImageData,
        x: Emu,
        y: Emu,
        width: Emu,
        height: Emu,
        description: Option<String>,
    ) {
        let shape_id = self.next_shape_id();
        trace!(
            "slide {}: picture {} at ({}, {}) {}x{}",
            self.slide_id, shape_id, x, y, width, height
        );
        let shape = Shape::new_picture(
            shape_id,
            Frame::new(x, y, width, height),
            image.clone(),
            description.unwrap_or_else(|| "Picture".to_string()),
        );
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Text frames of all text boxes, in drawing order.
    pub fn text_frames(&self) -> impl Iterator<Item = &TextFrame> {
        self.shapes.iter().filter_map(Shape::text_frame)
    }

    /// Generate slide XML with relationship IDs from the mapper.
    pub(crate) fn to_xml_with_rels(
        &self,
        slide_index: usize,
        rel_mapper: &RelationshipMapper,
    ) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(XML_DECLARATION);
        write!(
            xml,
            r#"<p:sld xmlns:p="{}" xmlns:a="{}" xmlns:r="{}">"#,
            namespace::PML_MAIN,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )?;

        xml.push_str("<p:cSld><p:spTree>");
        xml.push_str(GROUP_SHAPE_PROPERTIES);

        for (shape_index, shape) in self.shapes.iter().enumerate() {
            let rid = rel_mapper.get_image_id(slide_index, shape_index);
            shape.to_xml(&mut xml, rid)?;
        }

        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}
