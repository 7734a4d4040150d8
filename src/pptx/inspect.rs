//! Read-back of generated packages.
//!
//! [`PresentationSummary`] re-opens a `.pptx` written by this crate and
//! reports what a viewer would lay out: the slide size, the slides in
//! presentation order, and for each slide its pictures and text paragraphs.
//! It understands the subset of PresentationML the writer produces.

use crate::common::RGBColor;
use crate::common::xml::unescape_xml;
use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

use super::constants::part_name;
use super::format::Alignment;
use super::writer::{Frame, LINE_BREAK};

/// A picture shape as found on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct PictureSummary {
    pub name: String,
    pub frame: Frame,
    /// Package part the picture shows, e.g. `ppt/media/image1.png`
    pub media: Option<String>,
}

/// A text paragraph with the formatting of its first run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphSummary {
    pub level: u8,
    pub text: String,
    pub alignment: Option<Alignment>,
    /// Font size in points
    pub font_size: Option<f64>,
    pub bold: Option<bool>,
    pub font: Option<String>,
    pub color: Option<RGBColor>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideSummary {
    pub part_name: String,
    pub pictures: Vec<PictureSummary>,
    /// Paragraphs of all text boxes, in drawing order
    pub paragraphs: Vec<ParagraphSummary>,
}

impl SlideSummary {
    /// Non-empty paragraph texts, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentationSummary {
    pub slide_width: i64,
    pub slide_height: i64,
    pub slides: Vec<SlideSummary>,
}

impl PresentationSummary {
    /// Open and summarize a `.pptx` file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_bytes(&bytes)
    }

    /// Summarize a package held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let pres_xml = read_part(&mut archive, part_name::PRESENTATION)?;
        let pres_rels = parse_relationships(&read_part(&mut archive, part_name::PRESENTATION_RELS)?)?;
        let (slide_width, slide_height, slide_rel_ids) = parse_presentation(&pres_xml)?;

        let mut slides = Vec::with_capacity(slide_rel_ids.len());
        for rel_id in slide_rel_ids {
            let target = pres_rels.get(&rel_id).ok_or_else(|| {
                Error::InvalidFormat(format!("slide relationship {} is not defined", rel_id))
            })?;
            let slide_part = resolve_target("ppt", target);
            let rels_part = rels_part_name(&slide_part);

            let slide_rels = match read_part(&mut archive, &rels_part) {
                Ok(xml) => parse_relationships(&xml)?,
                Err(Error::PartNotFound(_)) => HashMap::new(),
                Err(e) => return Err(e),
            };
            let slide_xml = read_part(&mut archive, &slide_part)?;
            let base = parent_dir(&slide_part);
            let mut slide = parse_slide(&slide_xml, |rid| {
                slide_rels.get(rid).map(|target| resolve_target(base, target))
            })?;
            slide.part_name = slide_part;
            slides.push(slide);
        }

        Ok(Self {
            slide_width,
            slide_height,
            slides,
        })
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

fn read_part<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut file = archive.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => Error::PartNotFound(name.to_string()),
        other => Error::Zip(other),
    })?;
    let mut xml = String::new();
    file.read_to_string(&mut xml)?;
    Ok(xml)
}

fn parent_dir(part: &str) -> &str {
    part.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// `ppt/slides/slide1.xml` -> `ppt/slides/_rels/slide1.xml.rels`
fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

fn attr_value(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match e.try_get_attribute(name).map_err(|e| Error::Xml(e.to_string()))? {
        Some(attr) => {
            let raw = std::str::from_utf8(&attr.value).map_err(|e| Error::Xml(e.to_string()))?;
            Ok(Some(unescape_xml(raw)))
        },
        None => Ok(None),
    }
}

fn attr_i64(e: &BytesStart<'_>, name: &str) -> Result<Option<i64>> {
    attr_value(e, name)?
        .map(|v| {
            v.parse::<i64>()
                .map_err(|err| Error::Xml(format!("invalid {} value {:?}: {}", name, v, err)))
        })
        .transpose()
}

fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut rels = HashMap::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr_value(&e, "Id")?, attr_value(&e, "Target")?) {
                    rels.insert(id, target);
                }
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(rels)
}

/// Slide size and the slide relationship IDs in `sldIdLst` order.
fn parse_presentation(xml: &str) -> Result<(i64, i64, Vec<String>)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut size = None;
    let mut rel_ids = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"sldSz" => {
                    size = Some((
                        attr_i64(&e, "cx")?.unwrap_or_default(),
                        attr_i64(&e, "cy")?.unwrap_or_default(),
                    ));
                },
                b"sldId" => {
                    if let Some(rid) = attr_value(&e, "r:id")? {
                        rel_ids.push(rid);
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    let (cx, cy) = size.ok_or_else(|| Error::InvalidFormat("presentation has no sldSz".into()))?;
    Ok((cx, cy, rel_ids))
}

/// Parser state for one slide part.
#[derive(Default)]
struct SlideParser {
    slide: SlideSummary,
    picture: Option<PictureSummary>,
    paragraph: Option<ParagraphSummary>,
    runs_in_paragraph: usize,
    in_run_props: bool,
    in_text: bool,
}

impl SlideParser {
    fn start(&mut self, e: &BytesStart<'_>, resolve: &impl Fn(&str) -> Option<String>) -> Result<()> {
        match e.local_name().as_ref() {
            b"pic" => {
                self.picture = Some(PictureSummary {
                    name: String::new(),
                    frame: Frame::new(0, 0, 0, 0),
                    media: None,
                });
            },
            b"cNvPr" => {
                if let Some(pic) = self.picture.as_mut() {
                    pic.name = attr_value(e, "name")?.unwrap_or_default();
                }
            },
            b"blip" => {
                if let Some(pic) = self.picture.as_mut() {
                    pic.media = attr_value(e, "r:embed")?.and_then(|rid| resolve(&rid));
                }
            },
            b"off" => {
                if let Some(pic) = self.picture.as_mut() {
                    pic.frame.x = attr_i64(e, "x")?.unwrap_or_default();
                    pic.frame.y = attr_i64(e, "y")?.unwrap_or_default();
                }
            },
            b"ext" => {
                if let Some(pic) = self.picture.as_mut() {
                    pic.frame.width = attr_i64(e, "cx")?.unwrap_or_default();
                    pic.frame.height = attr_i64(e, "cy")?.unwrap_or_default();
                }
            },
            b"p" => {
                self.paragraph = Some(ParagraphSummary::default());
                self.runs_in_paragraph = 0;
            },
            b"pPr" => {
                if let Some(para) = self.paragraph.as_mut() {
                    if let Some(lvl) = attr_i64(e, "lvl")? {
                        para.level = lvl.clamp(0, u8::MAX as i64) as u8;
                    }
                    para.alignment = attr_value(e, "algn")?.and_then(|a| Alignment::from_ooxml(&a));
                }
            },
            b"r" => self.runs_in_paragraph += 1,
            b"br" => {
                if let Some(para) = self.paragraph.as_mut() {
                    para.text.push(LINE_BREAK);
                }
            },
            b"rPr" => {
                self.in_run_props = true;
                if self.runs_in_paragraph == 1
                    && let Some(para) = self.paragraph.as_mut()
                {
                    para.font_size = attr_i64(e, "sz")?.map(|sz| sz as f64 / 100.0);
                    para.bold = attr_value(e, "b")?.map(|b| b == "1" || b == "true");
                }
            },
            b"srgbClr" => {
                if self.in_run_props && self.runs_in_paragraph == 1 {
                    let color = attr_value(e, "val")?.and_then(|v| RGBColor::from_hex(&v));
                    if let Some(para) = self.paragraph.as_mut() {
                        para.color = color;
                    }
                }
            },
            b"latin" => {
                if self.in_run_props
                    && self.runs_in_paragraph == 1
                    && let Some(para) = self.paragraph.as_mut()
                {
                    para.font = attr_value(e, "typeface")?;
                }
            },
            b"t" => self.in_text = true,
            _ => {},
        }
        Ok(())
    }

    fn end(&mut self, local_name: &[u8]) {
        match local_name {
            b"pic" => {
                if let Some(pic) = self.picture.take() {
                    self.slide.pictures.push(pic);
                }
            },
            b"p" => {
                if let Some(para) = self.paragraph.take() {
                    self.slide.paragraphs.push(para);
                }
            },
            b"rPr" => self.in_run_props = false,
            b"t" => self.in_text = false,
            _ => {},
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_text
            && let Some(para) = self.paragraph.as_mut()
        {
            para.text.push_str(text);
        }
    }
}

fn parse_slide(xml: &str, resolve: impl Fn(&str) -> Option<String>) -> Result<SlideSummary> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut parser = SlideParser::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => parser.start(&e, &resolve)?,
            Event::Empty(e) => {
                parser.start(&e, &resolve)?;
                let name = e.local_name();
                parser.end(name.as_ref());
            },
            Event::End(e) => parser.end(e.local_name().as_ref()),
            Event::Text(t) => parser.text(&String::from_utf8_lossy(&t)),
            Event::GeneralRef(r) => match r.resolve_char_ref() {
                Ok(Some(ch)) => parser.text(ch.encode_utf8(&mut [0; 4])),
                _ => parser.text(&unescape_xml(&format!("&{};", String::from_utf8_lossy(&r)))),
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }
    Ok(parser.slide)
}
