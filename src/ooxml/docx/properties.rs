//! Readers for the property containers shared by styles, numbering levels
//! and body content.
//!
//! Each reader is called right after the container's start tag and fills in
//! only what the XML states. Revision records (`w:rPrChange`,
//! `w:pPrChange`, `w:tblPrChange`) describe the previous formatting and are
//! skipped, as are containers nested for other purposes (the paragraph
//! mark's `w:rPr` inside `w:pPr`, `w:sectPr`).
use super::xml::{XmlReader, attr_i32, attr_u32, children, val};
use crate::common::{RGBColor, Script};
use crate::ooxml::error::Result;
use crate::style::{
    IndentationProperties, Justification, NumberingReference, ParagraphProperties,
    RunProperties, TableProperties, parse_toggle, parse_underline,
};
use quick_xml::events::BytesStart;

/// Read `w:rPr`. The character style (`w:rStyle`) goes to `style` when a
/// slot is given.
pub(crate) fn read_run_properties(
    reader: &mut XmlReader<'_>,
    empty: bool,
    run: &mut RunProperties,
    mut style: Option<&mut Option<String>>,
) -> Result<()> {
    children(reader, empty, |_, e, _| {
        match e.local_name().as_ref() {
            b"sz" => {
                if let Some(size) = attr_u32(e, b"val") {
                    run.font_size = Some(size);
                }
            },
            b"color" => run.color = val(e).and_then(|v| RGBColor::from_xml(&v)),
            b"vertAlign" => run.script = val(e).and_then(|v| Script::from_xml(&v)),
            b"b" => run.bold = Some(parse_toggle(val(e).as_deref())),
            b"i" => run.italic = Some(parse_toggle(val(e).as_deref())),
            b"u" => run.underline = Some(parse_underline(val(e).as_deref())),
            b"rStyle" => {
                if let Some(slot) = style.as_mut() {
                    **slot = val(e);
                }
            },
            _ => {},
        }
        Ok(false)
    })
}

/// Read `w:pPr`. The paragraph style (`w:pStyle`) goes to `style`.
pub(crate) fn read_paragraph_properties(
    reader: &mut XmlReader<'_>,
    empty: bool,
    paragraph: &mut ParagraphProperties,
    style: &mut Option<String>,
) -> Result<()> {
    children(reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"pStyle" => *style = val(e),
            b"jc" => paragraph.justification = val(e).and_then(|v| Justification::from_xml(&v)),
            b"ind" => read_indentation(e, &mut paragraph.indentation),
            b"numPr" => {
                let mut reference = paragraph.numbering.unwrap_or_default();
                read_numbering_reference(reader, empty, &mut reference)?;
                paragraph.numbering = Some(reference);
                return Ok(true);
            },
            _ => {},
        }
        Ok(false)
    })
}

/// Read `w:tblPr`. The table style (`w:tblStyle`) goes to `style`.
pub(crate) fn read_table_properties(
    reader: &mut XmlReader<'_>,
    empty: bool,
    table: &mut TableProperties,
    style: &mut Option<String>,
) -> Result<()> {
    children(reader, empty, |_, e, _| {
        match e.local_name().as_ref() {
            b"tblStyle" => *style = val(e),
            b"jc" => table.justification = val(e).and_then(|v| Justification::from_xml(&v)),
            b"tblInd" => {
                if let Some(w) = attr_i32(e, b"w") {
                    table.indentation = Some(w);
                }
            },
            _ => {},
        }
        Ok(false)
    })
}

fn read_numbering_reference(
    reader: &mut XmlReader<'_>,
    empty: bool,
    reference: &mut NumberingReference,
) -> Result<()> {
    children(reader, empty, |_, e, _| {
        match e.local_name().as_ref() {
            b"ilvl" => {
                if let Some(level) = attr_u32(e, b"val").and_then(|v| u8::try_from(v).ok()) {
                    reference.level = Some(level);
                }
            },
            b"numId" => {
                if let Some(id) = attr_u32(e, b"val") {
                    reference.id = Some(id);
                }
            },
            _ => {},
        }
        Ok(false)
    })
}

/// `w:ind`: bidi-aware names win over the legacy `left`/`right`, and
/// `hanging` wins over `firstLine`.
fn read_indentation(e: &BytesStart<'_>, indentation: &mut IndentationProperties) {
    if let Some(start) = attr_i32(e, b"start").or_else(|| attr_i32(e, b"left")) {
        indentation.start = Some(start);
    }
    if let Some(end) = attr_i32(e, b"end").or_else(|| attr_i32(e, b"right")) {
        indentation.end = Some(end);
    }
    if let Some(hanging) = attr_i32(e, b"hanging") {
        indentation.first = Some(-hanging);
    } else if let Some(first) = attr_i32(e, b"firstLine") {
        indentation.first = Some(first);
    }
}
