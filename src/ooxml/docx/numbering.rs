//! `word/numbering.xml`: list templates and the instances bound to them.
use super::properties::{read_paragraph_properties, read_run_properties};
use super::xml::{XmlReader, attr_i32, attr_u32, children, root, val};
use crate::numbering::{
    AbstractNumberingDefinition, LevelDefinition, LevelOverride, MarkerPattern, MarkerType,
    NumberingDefinition, Restart, Whitespace,
};
use crate::ooxml::error::Result;
use crate::style::parse_toggle;
use quick_xml::Reader;
use quick_xml::events::BytesStart;

/// Content of the numbering part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberingPart {
    /// `w:abstractNum` elements
    pub abstract_numberings: Vec<AbstractNumberingDefinition>,
    /// `w:num` elements
    pub numberings: Vec<NumberingDefinition>,
}

/// Parse the numbering part.
pub fn read_numbering(xml: &[u8]) -> Result<NumberingPart> {
    let mut reader = Reader::from_reader(xml);
    let (_, empty) = root(&mut reader)?;

    let mut part = NumberingPart::default();
    children(&mut reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"abstractNum" => {
                if let Some(definition) = read_abstract_numbering(reader, e, empty)? {
                    part.abstract_numberings.push(definition);
                }
            },
            b"num" => {
                if let Some(definition) = read_instance(reader, e, empty)? {
                    part.numberings.push(definition);
                }
            },
            // Picture bullets and cleanup markers carry nothing structural.
            _ => return Ok(false),
        }
        Ok(true)
    })?;

    log::debug!(
        "read {} numbering templates and {} instances",
        part.abstract_numberings.len(),
        part.numberings.len()
    );
    Ok(part)
}

fn read_abstract_numbering(
    reader: &mut XmlReader<'_>,
    start: &BytesStart<'_>,
    empty: bool,
) -> Result<Option<AbstractNumberingDefinition>> {
    let mut definition = AbstractNumberingDefinition::default();
    children(reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"numStyleLink" => definition.style_link = val(e),
            b"styleLink" => definition.num_style = val(e),
            b"lvl" => {
                if let Some(level) = read_level(reader, e, empty)? {
                    definition.levels.push(level);
                }
                return Ok(true);
            },
            _ => {},
        }
        Ok(false)
    })?;

    match attr_u32(start, b"abstractNumId") {
        Some(id) => {
            definition.id = id;
            Ok(Some(definition))
        },
        None => {
            log::warn!("dropping w:abstractNum without an id");
            Ok(None)
        },
    }
}

fn read_instance(
    reader: &mut XmlReader<'_>,
    start: &BytesStart<'_>,
    empty: bool,
) -> Result<Option<NumberingDefinition>> {
    let mut abstract_id = None;
    let mut overrides = Vec::new();
    children(reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"abstractNumId" => abstract_id = attr_u32(e, b"val"),
            b"lvlOverride" => {
                overrides.push(read_override(reader, e, empty)?);
                return Ok(true);
            },
            _ => {},
        }
        Ok(false)
    })?;

    let (Some(id), Some(abstract_id)) = (attr_u32(start, b"numId"), abstract_id) else {
        log::warn!("dropping w:num without an id or a w:abstractNumId");
        return Ok(None);
    };
    let mut definition = NumberingDefinition::new(id, abstract_id);
    definition.overrides = overrides;
    Ok(Some(definition))
}

fn read_override(
    reader: &mut XmlReader<'_>,
    start: &BytesStart<'_>,
    empty: bool,
) -> Result<LevelOverride> {
    let mut level_override = LevelOverride {
        level: level_id(start),
        ..Default::default()
    };
    children(reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"startOverride" => level_override.start = attr_i32(e, b"val"),
            b"lvl" => {
                level_override.definition = read_level(reader, e, empty)?;
                return Ok(true);
            },
            _ => {},
        }
        Ok(false)
    })?;
    Ok(level_override)
}

/// Read one `w:lvl`. Levels with an out-of-range `w:ilvl` are dropped.
fn read_level(
    reader: &mut XmlReader<'_>,
    start: &BytesStart<'_>,
    empty: bool,
) -> Result<Option<LevelDefinition>> {
    let mut level = LevelDefinition::default();
    children(reader, empty, |reader, e, empty| {
        read_level_child(reader, e, empty, &mut level)
    })?;

    match attr_u32(start, b"ilvl").and_then(|v| u8::try_from(v).ok()) {
        Some(id) => {
            level.id = id;
            Ok(Some(level))
        },
        None => {
            log::warn!("dropping w:lvl without a valid w:ilvl");
            Ok(None)
        },
    }
}

fn read_level_child(
    reader: &mut XmlReader<'_>,
    e: &BytesStart<'_>,
    empty: bool,
    level: &mut LevelDefinition,
) -> Result<bool> {
    let properties = &mut level.properties;
    match e.local_name().as_ref() {
        b"start" => {
            if let Some(start) = attr_i32(e, b"val") {
                properties.start = start;
            }
        },
        // Formats this crate does not know are ignored, so the
        // `mc:Fallback` branch of a custom format takes effect.
        b"numFmt" => {
            if let Some(marker) = val(e).and_then(|v| MarkerType::from_xml(&v)) {
                properties.marker = marker;
            }
        },
        b"lvlRestart" => {
            if let Some(value) = attr_i32(e, b"val") {
                properties.restart = Restart::from_value(value);
            }
        },
        b"isLgl" => properties.legal = parse_toggle(val(e).as_deref()),
        b"suff" => {
            if let Some(whitespace) = val(e).and_then(|v| Whitespace::from_xml(&v)) {
                properties.whitespace = whitespace;
            }
        },
        b"lvlText" => properties.pattern = MarkerPattern::parse(&val(e).unwrap_or_default()),
        b"pStyle" => level.style = val(e),
        b"pPr" => {
            read_paragraph_properties(reader, empty, &mut level.paragraph, &mut None)?;
            return Ok(true);
        },
        b"rPr" => {
            read_run_properties(reader, empty, &mut level.run, None)?;
            return Ok(true);
        },
        b"AlternateContent" | b"Choice" | b"Fallback" => {
            children(reader, empty, |reader, e, empty| {
                read_level_child(reader, e, empty, level)
            })?;
            return Ok(true);
        },
        _ => {},
    }
    Ok(false)
}

fn level_id(e: &BytesStart<'_>) -> u8 {
    attr_u32(e, b"ilvl")
        .and_then(|v| u8::try_from(v).ok())
        .unwrap_or_default()
}
