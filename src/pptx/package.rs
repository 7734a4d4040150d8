//! Package writer for PPTX files.
//!
//! Serializes a [`Presentation`] into an OPC ZIP archive: the content types
//! stream, package and part relationships, document properties, the
//! presentation part with its master/layout/theme, one part per slide and
//! the media parts shared between slides.
//!
//! Archive entries carry a fixed timestamp and are written in a fixed
//! order, so the same presentation always produces the same bytes.

use crate::common::xml::escape_xml;
use crate::error::Result;
use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::constants::{content_type as ct, namespace, part_name, relationship_type as rt};
use super::format::{ImageData, ImageFormat};
use super::template::{self, XML_DECLARATION};
use super::writer::relmap::{RelationshipMapper, Relationships};
use super::writer::{Presentation, Slide};

const APPLICATION: &str = "deckforge";

/// ZIP-level writer for package parts.
pub(crate) struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn options(method: CompressionMethod) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(DateTime::default())
    }

    /// Write a part with Deflate compression.
    pub fn write(&mut self, member_name: &str, blob: &[u8]) -> Result<()> {
        self.archive
            .start_file(member_name, Self::options(CompressionMethod::Deflated))?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Write a part without compression; used for already compressed media.
    pub fn write_stored(&mut self, member_name: &str, blob: &[u8]) -> Result<()> {
        self.archive
            .start_file(member_name, Self::options(CompressionMethod::Stored))?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

/// Builder for the `[Content_Types].xml` stream.
///
/// Manages Default (by extension) and Override (by part name) elements.
struct ContentTypes {
    defaults: BTreeMap<&'static str, &'static str>,
    overrides: BTreeMap<String, &'static str>,
}

impl ContentTypes {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels", ct::OPC_RELATIONSHIPS);
        defaults.insert("xml", ct::XML);
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn add_default(&mut self, ext: &'static str, content_type: &'static str) {
        self.defaults.insert(ext, content_type);
    }

    fn add_override(&mut self, part_name: &str, content_type: &'static str) {
        self.overrides.insert(format!("/{}", part_name), content_type);
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(XML_DECLARATION);
        xml.push_str(r#"<Types xmlns=""#);
        xml.push_str(namespace::OPC_CONTENT_TYPES);
        xml.push_str(r#"">"#);

        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            ));
        }
        for (part_name, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(part_name),
                escape_xml(content_type)
            ));
        }

        xml.push_str("</Types>");
        xml
    }
}

/// One media part, shared by every picture with the same bytes.
struct MediaPart {
    part_name: String,
    image: ImageData,
}

/// Media parts keyed by content digest, numbered in first-use order.
#[derive(Default)]
struct MediaStore {
    parts: Vec<MediaPart>,
    by_digest: HashMap<Vec<u8>, usize>,
}

impl MediaStore {
    /// Return the part name holding `image`, adding it on first use.
    fn intern(&mut self, image: &ImageData) -> &str {
        let digest = image.digest();
        let index = match self.by_digest.get(&digest) {
            Some(&index) => index,
            None => {
                let index = self.parts.len();
                let part_name = format!(
                    "ppt/media/image{}.{}",
                    index + 1,
                    image.format().extension()
                );
                trace!("new media part {}", part_name);
                self.parts.push(MediaPart {
                    part_name,
                    image: image.clone(),
                });
                self.by_digest.insert(digest, index);
                index
            },
        };
        &self.parts[index].part_name
    }

    fn formats(&self) -> impl Iterator<Item = ImageFormat> + '_ {
        self.parts.iter().map(|part| part.image.format())
    }
}

fn slide_part_name(index: usize) -> String {
    format!("ppt/slides/slide{}.xml", index + 1)
}

fn slide_rels_part_name(index: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", index + 1)
}

/// Relationships of every slide, with picture shapes registered in the mapper.
fn plan_slide_relationships(
    slides: &[Slide],
    media: &mut MediaStore,
    mapper: &mut RelationshipMapper,
) -> Vec<Relationships> {
    slides
        .iter()
        .enumerate()
        .map(|(slide_index, slide)| {
            let mut rels = Relationships::new();
            rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

            for (shape_index, shape) in slide.shapes().iter().enumerate() {
                if let Some(image) = shape.image() {
                    let part_name = media.intern(image);
                    let target = format!("../{}", part_name.trim_start_matches("ppt/"));
                    let rel_id = rels.get_or_add(rt::IMAGE, &target);
                    mapper.add_image(slide_index, shape_index, rel_id);
                }
            }
            rels
        })
        .collect()
}

fn core_props_xml(title: Option<&str>) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    if let Some(title) = title {
        xml.push_str("<dc:title>");
        xml.push_str(&escape_xml(title));
        xml.push_str("</dc:title>");
    }
    xml.push_str("<dc:creator>");
    xml.push_str(APPLICATION);
    xml.push_str("</dc:creator>");
    xml.push_str("</cp:coreProperties>");
    xml
}

fn app_props_xml(slide_count: usize) -> String {
    format!(
        concat!(
            "{}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>{}</Application><Slides>{}</Slides></Properties>"
        ),
        XML_DECLARATION, APPLICATION, slide_count
    )
}

/// Serializes a presentation into package bytes.
pub struct PackageWriter;

impl PackageWriter {
    pub fn to_bytes(pres: &Presentation) -> Result<Vec<u8>> {
        let slides = pres.slides();

        let mut media = MediaStore::default();
        let mut mapper = RelationshipMapper::new();
        let slide_rels = plan_slide_relationships(slides, &mut media, &mut mapper);

        let mut pres_rels = Relationships::new();
        let master_rel_id = pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        let slide_rel_ids: Vec<String> = (0..slides.len())
            .map(|index| pres_rels.add(rt::SLIDE, format!("slides/slide{}.xml", index + 1)))
            .collect();
        pres_rels.add(rt::PRES_PROPS, "presProps.xml");
        pres_rels.add(rt::VIEW_PROPS, "viewProps.xml");
        pres_rels.add(rt::THEME, "theme/theme1.xml");
        pres_rels.add(rt::TABLE_STYLES, "tableStyles.xml");

        let mut package_rels = Relationships::new();
        package_rels.add(rt::OFFICE_DOCUMENT, part_name::PRESENTATION);
        package_rels.add(rt::CORE_PROPERTIES, part_name::CORE_PROPS);
        package_rels.add(rt::EXTENDED_PROPERTIES, part_name::APP_PROPS);

        let mut master_rels = Relationships::new();
        master_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.add(rt::THEME, "../theme/theme1.xml");

        let mut layout_rels = Relationships::new();
        layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");

        let mut content_types = ContentTypes::new();
        for format in media.formats() {
            content_types.add_default(format.extension(), format.mime_type());
        }
        content_types.add_override(part_name::PRESENTATION, ct::PML_PRESENTATION_MAIN);
        content_types.add_override(part_name::CORE_PROPS, ct::OPC_CORE_PROPERTIES);
        content_types.add_override(part_name::APP_PROPS, ct::OFC_EXTENDED_PROPERTIES);
        content_types.add_override(part_name::PRES_PROPS, ct::PML_PRES_PROPS);
        content_types.add_override(part_name::VIEW_PROPS, ct::PML_VIEW_PROPS);
        content_types.add_override(part_name::TABLE_STYLES, ct::PML_TABLE_STYLES);
        content_types.add_override(part_name::SLIDE_MASTER, ct::PML_SLIDE_MASTER);
        content_types.add_override(part_name::SLIDE_LAYOUT, ct::PML_SLIDE_LAYOUT);
        content_types.add_override(part_name::THEME, ct::OFC_THEME);
        for index in 0..slides.len() {
            content_types.add_override(&slide_part_name(index), ct::PML_SLIDE);
        }

        let mut phys = PhysPkgWriter::new();
        phys.write(part_name::CONTENT_TYPES, content_types.to_xml().as_bytes())?;
        phys.write(part_name::PACKAGE_RELS, package_rels.to_xml().as_bytes())?;
        phys.write(part_name::CORE_PROPS, core_props_xml(pres.title()).as_bytes())?;
        phys.write(part_name::APP_PROPS, app_props_xml(slides.len()).as_bytes())?;

        let presentation_xml = pres.generate_presentation_xml(&master_rel_id, &slide_rel_ids)?;
        phys.write(part_name::PRESENTATION, presentation_xml.as_bytes())?;
        phys.write(part_name::PRESENTATION_RELS, pres_rels.to_xml().as_bytes())?;
        phys.write(part_name::PRES_PROPS, template::pres_props_xml().as_bytes())?;
        phys.write(part_name::VIEW_PROPS, template::view_props_xml().as_bytes())?;
        phys.write(part_name::TABLE_STYLES, template::table_styles_xml().as_bytes())?;
        phys.write(part_name::SLIDE_MASTER, template::slide_master_xml().as_bytes())?;
        phys.write(part_name::SLIDE_MASTER_RELS, master_rels.to_xml().as_bytes())?;
        phys.write(part_name::SLIDE_LAYOUT, template::blank_layout_xml().as_bytes())?;
        phys.write(part_name::SLIDE_LAYOUT_RELS, layout_rels.to_xml().as_bytes())?;
        phys.write(part_name::THEME, template::theme_xml().as_bytes())?;

        for (index, (slide, rels)) in slides.iter().zip(&slide_rels).enumerate() {
            let slide_xml = slide.to_xml_with_rels(index, &mapper)?;
            phys.write(&slide_part_name(index), slide_xml.as_bytes())?;
            phys.write(&slide_rels_part_name(index), rels.to_xml().as_bytes())?;
        }

        for part in &media.parts {
            phys.write_stored(&part.part_name, part.image.bytes())?;
        }

        debug!(
            "packaged {} slides, {} media parts, {} picture references",
            slides.len(),
            media.parts.len(),
            mapper.image_count()
        );
        phys.finish()
    }
}
