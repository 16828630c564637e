//! `word/styles.xml`: document defaults and style definitions.
use super::properties::{read_paragraph_properties, read_run_properties, read_table_properties};
use super::xml::{XmlReader, attr, children, root, val};
use crate::ooxml::error::{OoxmlError, Result};
use crate::style::{
    DocumentDefaults, StyleDefinition, StyleKind, TableProperties, parse_toggle,
};
use quick_xml::Reader;
use quick_xml::events::BytesStart;

/// Content of the styles part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylesPart {
    /// `w:docDefaults`
    pub defaults: DocumentDefaults,
    /// `w:style` elements in definition order
    pub styles: Vec<StyleDefinition>,
}

/// Parse the styles part.
///
/// # Errors
///
/// Returns [`OoxmlError::UnknownStyleKind`] for a `w:type` outside
/// paragraph, character, table and numbering, and [`OoxmlError::Xml`] for
/// malformed XML.
pub fn read_styles(xml: &[u8]) -> Result<StylesPart> {
    let mut reader = Reader::from_reader(xml);
    let (_, empty) = root(&mut reader)?;

    let mut part = StylesPart::default();
    children(&mut reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"docDefaults" => read_defaults(reader, empty, &mut part.defaults)?,
            b"style" => {
                if let Some(style) = read_style(reader, e, empty)? {
                    part.styles.push(style);
                }
            },
            _ => return Ok(false),
        }
        Ok(true)
    })?;

    log::debug!("read {} style definitions", part.styles.len());
    Ok(part)
}

fn read_defaults(
    reader: &mut XmlReader<'_>,
    empty: bool,
    defaults: &mut DocumentDefaults,
) -> Result<()> {
    children(reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"rPrDefault" => children(reader, empty, |reader, e, empty| {
                if e.local_name().as_ref() != b"rPr" {
                    return Ok(false);
                }
                read_run_properties(reader, empty, &mut defaults.run, None)?;
                Ok(true)
            })?,
            b"pPrDefault" => children(reader, empty, |reader, e, empty| {
                if e.local_name().as_ref() != b"pPr" {
                    return Ok(false);
                }
                read_paragraph_properties(reader, empty, &mut defaults.paragraph, &mut None)?;
                Ok(true)
            })?,
            _ => return Ok(false),
        }
        Ok(true)
    })
}

/// Read one `w:style`. Styles without an id are dropped.
fn read_style(
    reader: &mut XmlReader<'_>,
    start: &BytesStart<'_>,
    empty: bool,
) -> Result<Option<StyleDefinition>> {
    let id = attr(start, b"styleId");
    let kind = match attr(start, b"type") {
        None => StyleKind::Paragraph,
        Some(kind) => StyleKind::from_xml(&kind).ok_or_else(|| OoxmlError::UnknownStyleKind {
            style: id.clone().unwrap_or_default(),
            kind,
        })?,
    };

    let mut style = StyleDefinition::new(id.clone().unwrap_or_default(), kind);
    style.is_default = attr(start, b"default").is_some_and(|v| parse_toggle(Some(&v)));

    let properties = &mut style.properties;
    let mut name = None;
    let mut based_on = None;
    let mut link = None;
    children(reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"name" => name = val(e),
            b"basedOn" => based_on = val(e),
            b"link" => link = val(e),
            b"rPr" => {
                read_run_properties(reader, empty, &mut properties.run, None)?;
                return Ok(true);
            },
            b"pPr" => {
                read_paragraph_properties(reader, empty, &mut properties.paragraph, &mut None)?;
                return Ok(true);
            },
            b"tblPr" => {
                let mut table = properties.table.unwrap_or_default();
                read_table_properties(reader, empty, &mut table, &mut None)?;
                properties.table = Some(table);
                return Ok(true);
            },
            // Conditional formatting for table regions is not part of the
            // style's own format.
            _ => {},
        }
        Ok(false)
    })?;

    if id.is_none() {
        log::warn!("dropping style without w:styleId (name {:?})", name);
        return Ok(None);
    }
    if kind == StyleKind::Table && style.properties.table.is_none() {
        style.properties.table = Some(TableProperties::default());
    }
    style.name = name;
    style.based_on = based_on;
    style.link = link;
    Ok(Some(style))
}
