/// Relationship bookkeeping for presentation generation.
///
/// Relationships are created before any slide XML is generated so that the
/// shapes can reference their media with the actual relationship IDs.
use crate::common::xml::escape_xml;
use std::collections::HashMap;

use super::super::constants::namespace;
use super::super::template::XML_DECLARATION;

/// Maps picture shapes to the relationship IDs of their media parts.
///
/// The mapper is organized per slide, as each slide has its own set of
/// relationships.
#[derive(Debug, Default)]
pub struct RelationshipMapper {
    /// Maps (slide_index, shape_index_in_slide) to relationship ID
    image_ids: HashMap<(usize, usize), String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the relationship ID used by a picture shape.
    pub fn add_image(&mut self, slide_index: usize, shape_index: usize, rel_id: String) {
        self.image_ids.insert((slide_index, shape_index), rel_id);
    }

    /// Relationship ID of a picture shape, if it has one.
    pub fn get_image_id(&self, slide_index: usize, shape_index: usize) -> Option<&str> {
        self.image_ids
            .get(&(slide_index, shape_index))
            .map(|s| s.as_str())
    }

    pub fn image_count(&self) -> usize {
        self.image_ids.len()
    }
}

/// A single relationship from a source part to a target part.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Relationship {
    r_id: String,
    reltype: &'static str,
    target: String,
}

/// Relationships of one source part, numbered `rId1`, `rId2`, ... in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its ID.
    pub fn add(&mut self, reltype: &'static str, target: impl Into<String>) -> String {
        let r_id = format!("rId{}", self.rels.len() + 1);
        self.rels.push(Relationship {
            r_id: r_id.clone(),
            reltype,
            target: target.into(),
        });
        r_id
    }

    /// Return the ID of an existing relationship to `target`, or add one.
    pub fn get_or_add(&mut self, reltype: &'static str, target: &str) -> String {
        match self
            .rels
            .iter()
            .find(|rel| rel.reltype == reltype && rel.target == target)
        {
            Some(rel) => rel.r_id.clone(),
            None => self.add(reltype, target),
        }
    }

    /// Serialize to the XML of a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(XML_DECLARATION);
        xml.push_str(r#"<Relationships xmlns=""#);
        xml.push_str(namespace::OPC_RELATIONSHIPS);
        xml.push_str(r#"">"#);

        for rel in &self.rels {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                escape_xml(&rel.r_id),
                escape_xml(rel.reltype),
                escape_xml(&rel.target)
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }
}
