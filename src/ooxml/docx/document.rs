//! `word/document.xml`: the body as a flat block sequence.
//!
//! Content controls, custom XML, smart tags and tracked insertions are
//! transparent wrappers: their content is read as if it stood in place.
//! Tracked deletions, field instructions and drawings contribute no text.
use super::properties::{read_paragraph_properties, read_run_properties, read_table_properties};
use super::xml::{XmlReader, attr, children, root, text};
use crate::document::{SourceBlock, SourceCell, SourceContent, SourceParagraph, SourceRun, SourceTable};
use crate::ooxml::error::Result;
use quick_xml::Reader;
use quick_xml::events::BytesStart;

/// Parse the main document part into its body blocks.
pub fn read_body(xml: &[u8]) -> Result<Vec<SourceBlock>> {
    let mut reader = Reader::from_reader(xml);
    let (_, empty) = root(&mut reader)?;

    let mut blocks = Vec::new();
    children(&mut reader, empty, |reader, e, empty| {
        if e.local_name().as_ref() != b"body" {
            return Ok(false);
        }
        read_blocks(reader, empty, &mut blocks)?;
        Ok(true)
    })?;

    log::debug!("read {} body blocks", blocks.len());
    Ok(blocks)
}

fn read_blocks(
    reader: &mut XmlReader<'_>,
    empty: bool,
    blocks: &mut Vec<SourceBlock>,
) -> Result<()> {
    children(reader, empty, |reader, e, empty| read_block(reader, e, empty, blocks))
}

fn read_block(
    reader: &mut XmlReader<'_>,
    e: &BytesStart<'_>,
    empty: bool,
    blocks: &mut Vec<SourceBlock>,
) -> Result<bool> {
    match e.local_name().as_ref() {
        b"p" => blocks.push(read_paragraph(reader, empty)?.into()),
        b"tbl" => blocks.push(read_table(reader, empty)?.into()),
        b"sdt" | b"sdtContent" | b"customXml" | b"ins" | b"moveTo" => {
            read_blocks(reader, empty, blocks)?
        },
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_paragraph(reader: &mut XmlReader<'_>, empty: bool) -> Result<SourceParagraph> {
    let mut paragraph = SourceParagraph::default();
    children(reader, empty, |reader, e, empty| {
        if e.local_name().as_ref() == b"pPr" {
            read_paragraph_properties(
                reader,
                empty,
                &mut paragraph.properties,
                &mut paragraph.style,
            )?;
            return Ok(true);
        }
        read_inline(reader, e, empty, &mut paragraph)
    })?;
    Ok(paragraph)
}

fn read_inline(
    reader: &mut XmlReader<'_>,
    e: &BytesStart<'_>,
    empty: bool,
    paragraph: &mut SourceParagraph,
) -> Result<bool> {
    match e.local_name().as_ref() {
        b"r" => {
            let run = read_run(reader, empty)?;
            paragraph.content.push(SourceContent::Run(run));
        },
        b"hyperlink" => {
            let target = attr(e, b"id").or_else(|| attr(e, b"anchor"));
            let mut runs = Vec::new();
            children(reader, empty, |reader, e, empty| {
                read_hyperlink_run(reader, e, empty, &mut runs)
            })?;
            paragraph.content.push(SourceContent::Hyperlink { target, runs });
        },
        b"sdt" | b"sdtContent" | b"customXml" | b"smartTag" | b"ins" | b"moveTo"
        | b"fldSimple" => {
            children(reader, empty, |reader, e, empty| {
                read_inline(reader, e, empty, paragraph)
            })?;
        },
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_hyperlink_run(
    reader: &mut XmlReader<'_>,
    e: &BytesStart<'_>,
    empty: bool,
    runs: &mut Vec<SourceRun>,
) -> Result<bool> {
    match e.local_name().as_ref() {
        b"r" => runs.push(read_run(reader, empty)?),
        b"smartTag" | b"ins" | b"moveTo" | b"customXml" => {
            children(reader, empty, |reader, e, empty| {
                read_hyperlink_run(reader, e, empty, runs)
            })?;
        },
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_run(reader: &mut XmlReader<'_>, empty: bool) -> Result<SourceRun> {
    let mut run = SourceRun::default();
    children(reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"rPr" => {
                read_run_properties(reader, empty, &mut run.properties, Some(&mut run.style))?;
                return Ok(true);
            },
            b"t" => {
                run.text.push_str(&text(reader, empty)?);
                return Ok(true);
            },
            b"tab" | b"ptab" => run.text.push('\t'),
            b"br" | b"cr" => run.text.push('\n'),
            b"noBreakHyphen" => run.text.push('-'),
            _ => {},
        }
        Ok(false)
    })?;
    Ok(run)
}

fn read_table(reader: &mut XmlReader<'_>, empty: bool) -> Result<SourceTable> {
    let mut table = SourceTable::default();
    children(reader, empty, |reader, e, empty| {
        match e.local_name().as_ref() {
            b"tblPr" => {
                read_table_properties(reader, empty, &mut table.properties, &mut table.style)?
            },
            b"tr" => table.rows.push(read_row(reader, empty)?),
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    Ok(table)
}

fn read_row(reader: &mut XmlReader<'_>, empty: bool) -> Result<Vec<SourceCell>> {
    let mut cells = Vec::new();
    children(reader, empty, |reader, e, empty| {
        if e.local_name().as_ref() != b"tc" {
            return Ok(false);
        }
        let mut cell = SourceCell::default();
        read_blocks(reader, empty, &mut cell.blocks)?;
        cells.push(cell);
        Ok(true)
    })?;
    Ok(cells)
}
