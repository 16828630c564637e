//! Event-loop helpers over a borrowed XML part.
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Display;

pub(crate) type XmlReader<'i> = Reader<&'i [u8]>;

#[inline]
pub(crate) fn xml_error(err: impl Display) -> OoxmlError {
    OoxmlError::Xml(err.to_string())
}

/// Advance to the root element. The flag tells whether it is empty.
pub(crate) fn root<'i>(reader: &mut XmlReader<'i>) -> Result<(BytesStart<'i>, bool)> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => return Ok((e, false)),
            Event::Empty(e) => return Ok((e, true)),
            Event::Eof => return Err(OoxmlError::Xml("part has no root element".to_string())),
            _ => {},
        }
    }
}

/// Visit the child elements of the element just opened, up to its end tag.
///
/// `visit` gets each child with a flag telling whether it is empty, and
/// returns whether it consumed the child's content; unconsumed children are
/// skipped whole. Nothing is read when the parent itself is `empty`.
pub(crate) fn children<'i, F>(reader: &mut XmlReader<'i>, empty: bool, mut visit: F) -> Result<()>
where
    F: FnMut(&mut XmlReader<'i>, &BytesStart<'i>, bool) -> Result<bool>,
{
    if empty {
        return Ok(());
    }
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if !visit(reader, &e, false)? {
                    reader.read_to_end(e.name())?;
                }
            },
            Event::Empty(e) => {
                visit(reader, &e, true)?;
            },
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(OoxmlError::Xml("unexpected end of part".to_string()));
            },
            _ => {},
        }
    }
}

/// Collect the character data of the element just opened, resolving
/// character and predefined entity references. Nested elements are skipped.
pub(crate) fn text(reader: &mut XmlReader<'_>, empty: bool) -> Result<String> {
    let mut text = String::new();
    if empty {
        return Ok(text);
    }
    loop {
        match reader.read_event()? {
            Event::Text(e) => text.push_str(std::str::from_utf8(e.as_ref()).map_err(xml_error)?),
            Event::CData(e) => text.push_str(std::str::from_utf8(e.as_ref()).map_err(xml_error)?),
            Event::GeneralRef(e) => {
                if let Some(ch) = e.resolve_char_ref().map_err(xml_error)? {
                    text.push(ch);
                } else {
                    let name = std::str::from_utf8(&e).map_err(xml_error)?;
                    match resolve_predefined_entity(name) {
                        Some(value) => text.push_str(value),
                        None => log::debug!("dropping unknown entity &{};", name),
                    }
                }
            },
            Event::Start(e) => {
                reader.read_to_end(e.name())?;
            },
            Event::End(_) => return Ok(text),
            Event::Eof => {
                return Err(OoxmlError::Xml("unexpected end of part".to_string()));
            },
            _ => {},
        }
    }
}

/// Value of the attribute with the given local name.
pub(crate) fn attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Value of `w:val`.
#[inline]
pub(crate) fn val(e: &BytesStart<'_>) -> Option<String> {
    attr(e, b"val")
}

pub(crate) fn attr_u32(e: &BytesStart<'_>, name: &[u8]) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| atoi_simd::parse::<u32, false, false>(a.value.as_ref()).ok())
}

pub(crate) fn attr_i32(e: &BytesStart<'_>, name: &[u8]) -> Option<i32> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| atoi_simd::parse::<i32, false, false>(a.value.as_ref()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_skip_unvisited_subtrees() {
        let xml = br#"<w:r xmlns:w="w"><w:rPr><w:b/><w:deep><w:b/></w:deep></w:rPr><w:t>x</w:t></w:r>"#;
        let mut reader = Reader::from_reader(xml.as_slice());
        let (_, empty) = root(&mut reader).unwrap();

        let mut seen = Vec::new();
        children(&mut reader, empty, |_, e, _| {
            seen.push(e.local_name().as_ref().to_vec());
            Ok(false)
        })
        .unwrap();
        assert_eq!(seen, vec![b"rPr".to_vec(), b"t".to_vec()]);
    }

    #[test]
    fn test_text_resolves_references() {
        let xml = br#"<t>a &amp; b &#x41;<x>skipped</x>c</t>"#;
        let mut reader = Reader::from_reader(xml.as_slice());
        let (_, empty) = root(&mut reader).unwrap();
        assert_eq!(text(&mut reader, empty).unwrap(), "a & b Ac");
    }

    #[test]
    fn test_numeric_attributes() {
        let xml = br#"<w:ind xmlns:w="w" w:start="720" w:hanging="-360" w:bad="x"/>"#;
        let mut reader = Reader::from_reader(xml.as_slice());
        let (e, empty) = root(&mut reader).unwrap();
        assert!(empty);
        assert_eq!(attr_u32(&e, b"start"), Some(720));
        assert_eq!(attr_i32(&e, b"hanging"), Some(-360));
        assert_eq!(attr_i32(&e, b"bad"), None);
        assert_eq!(attr(&e, b"missing"), None);
    }
}
