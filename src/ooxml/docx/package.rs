/// The `.docx` container and the parts read from it.
use super::document::read_body;
use super::numbering::{NumberingPart, read_numbering};
use super::styles::{StylesPart, read_styles};
use crate::document::SourceDocument;
use crate::ooxml::error::{OoxmlError, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Path of the styles part.
pub const STYLES_PART: &str = "word/styles.xml";
/// Path of the numbering part.
pub const NUMBERING_PART: &str = "word/numbering.xml";

/// A Word (.docx) package, reduced to the parts an outline needs.
///
/// The parts are read out of the archive when the package is opened; they
/// are parsed by [`Package::source`].
///
/// # Examples
///
/// ```rust,no_run
/// use litchi_outline::ooxml::docx::Package;
///
/// let pkg = Package::open("document.docx")?;
/// let source = pkg.source()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Package {
    document: Vec<u8>,
    styles: Option<Vec<u8>>,
    numbering: Option<Vec<u8>>,
}

impl Package {
    /// Open a .docx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create a .docx package from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`OoxmlError::PartNotFound`] if the archive has no
    /// `word/document.xml`. The styles and numbering parts are optional.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let document = read_part(&mut archive, DOCUMENT_PART)?
            .ok_or_else(|| OoxmlError::PartNotFound(DOCUMENT_PART.to_string()))?;
        let styles = read_part(&mut archive, STYLES_PART)?;
        let numbering = read_part(&mut archive, NUMBERING_PART)?;

        Ok(Self {
            document,
            styles,
            numbering,
        })
    }

    /// Parse the parts into the flat document the resolvers consume.
    pub fn source(&self) -> Result<SourceDocument> {
        let StylesPart { defaults, styles } = match &self.styles {
            Some(xml) => read_styles(xml)?,
            None => StylesPart::default(),
        };
        let NumberingPart {
            abstract_numberings,
            numberings,
        } = match &self.numbering {
            Some(xml) => read_numbering(xml)?,
            None => NumberingPart::default(),
        };
        let body = read_body(&self.document)?;

        Ok(SourceDocument {
            defaults,
            styles,
            abstract_numberings,
            numberings,
            body,
        })
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<Vec<u8>>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let mut data = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut data)?;
    Ok(Some(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SourceBlock;
    use std::io::{Cursor, Write};
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn archive(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, content) in parts {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const BODY: &str = r#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>Hi</w:t></w:r></w:p></w:body></w:document>"#;

    #[test]
    fn test_optional_parts() {
        let data = archive(&[(DOCUMENT_PART, BODY)]);
        let source = Package::from_reader(Cursor::new(data))
            .unwrap()
            .source()
            .unwrap();
        assert!(source.styles.is_empty());
        assert!(source.numberings.is_empty());
        assert!(matches!(source.body.as_slice(), [SourceBlock::Paragraph(_)]));
    }

    #[test]
    fn test_missing_document_part() {
        let data = archive(&[(STYLES_PART, "<w:styles xmlns:w=\"w\"/>")]);
        let err = Package::from_reader(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, OoxmlError::PartNotFound(ref p) if p == DOCUMENT_PART));
    }

    #[test]
    fn test_open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.docx");
        std::fs::write(&path, archive(&[(DOCUMENT_PART, BODY)])).unwrap();

        let source = Package::open(&path).unwrap().source().unwrap();
        assert_eq!(source.body.len(), 1);
    }

    #[test]
    fn test_not_an_archive() {
        let err = Package::from_reader(Cursor::new(b"plain text".to_vec())).unwrap_err();
        assert!(matches!(err, OoxmlError::Zip(_)));
    }
}
