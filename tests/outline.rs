//! End-to-end outlines, in memory and through a `.docx` package.
use litchi_outline::common::{Diagnostic, Error};
use litchi_outline::document::{BlockId, BlockKind, DocumentView, SourceDocument, SourceParagraph};
use litchi_outline::hierarchy::{HierarchyOptions, NumberingConflict};
use litchi_outline::numbering::{
    AbstractNumberingDefinition, Counters, ImpliedIndexPolicy, LevelDefinition, LevelProperties,
    MarkerPattern, MarkerType, NumberingDefinition,
};
use litchi_outline::style::{RunProperties, StyleDefinition, StyleKind};
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

fn options() -> HierarchyOptions {
    HierarchyOptions::new(NumberingConflict::Fail)
}

/// `(text or marker, depth)` for every block in pre-order.
fn shape(view: &DocumentView) -> Vec<(String, usize)> {
    view.depth_first()
        .into_iter()
        .map(|(block, depth)| {
            let label = match &block.kind {
                BlockKind::Table(_) => "<table>".to_string(),
                _ => match view.marker(block.id) {
                    Some(marker) => format!("{} {}", marker, view.text(block.id).unwrap_or_default()),
                    None => view.text(block.id).unwrap_or_default(),
                },
            };
            (label, depth)
        })
        .collect()
}

fn sized(id: &str, font_size: u32, bold: bool) -> StyleDefinition {
    StyleDefinition::new(id, StyleKind::Paragraph)
        .based_on("Normal")
        .with_run(RunProperties {
            font_size: Some(font_size),
            bold: bold.then_some(true),
            ..Default::default()
        })
}

fn decimal_list() -> (Vec<AbstractNumberingDefinition>, Vec<NumberingDefinition>) {
    let template = AbstractNumberingDefinition {
        id: 0,
        levels: vec![LevelDefinition::new(
            0,
            LevelProperties {
                pattern: MarkerPattern::parse("%1."),
                marker: MarkerType::Decimal,
                ..Default::default()
            },
        )],
        ..Default::default()
    };
    (vec![template], vec![NumberingDefinition::new(1, 0)])
}

#[test]
fn test_headings_and_body_text() {
    let source = SourceDocument {
        styles: vec![
            StyleDefinition::new("Normal", StyleKind::Paragraph)
                .as_default()
                .with_run(RunProperties {
                    font_size: Some(22),
                    ..Default::default()
                }),
            sized("Heading1", 48, true),
            sized("Heading2", 36, true),
        ],
        body: vec![
            SourceParagraph::with_text(Some("Heading1"), "Chapter").into(),
            SourceParagraph::with_text(Some("Heading2"), "Section").into(),
            SourceParagraph::with_text(Some("Normal"), "text").into(),
            SourceParagraph::with_text(None, "more text").into(),
            SourceParagraph::with_text(Some("Heading1"), "Appendix").into(),
        ],
        ..Default::default()
    };
    let view = litchi_outline::outline(&source, &options()).unwrap();

    assert_eq!(
        shape(&view),
        vec![
            ("Chapter".to_string(), 0),
            ("Section".to_string(), 1),
            ("text".to_string(), 2),
            ("more text".to_string(), 2),
            ("Appendix".to_string(), 0),
        ]
    );
    assert_eq!(view.parent(BlockId(2)).map(|b| b.id), Some(BlockId(1)));
    assert!(view.diagnostics().is_empty());
}

#[test]
fn test_numbered_paragraphs_are_siblings() {
    let (abstract_numberings, numberings) = decimal_list();
    let source = SourceDocument {
        styles: vec![StyleDefinition::new("Normal", StyleKind::Paragraph).as_default()],
        abstract_numberings,
        numberings,
        body: vec![
            SourceParagraph::with_text(Some("Normal"), "first").numbered(1, Some(0)).into(),
            SourceParagraph::with_text(Some("Normal"), "second").numbered(1, Some(0)).into(),
        ],
        ..Default::default()
    };
    let view = litchi_outline::outline(&source, &options()).unwrap();

    let first = view.block(BlockId(0)).and_then(|b| b.index()).unwrap();
    let second = view.block(BlockId(1)).and_then(|b| b.index()).unwrap();
    assert_eq!(first.counters, Counters::from([(0, 1)]));
    assert_eq!(second.counters, Counters::from([(0, 2)]));
    assert_eq!(view.marker(BlockId(0)).as_deref(), Some("1."));
    assert_eq!(view.marker(BlockId(1)).as_deref(), Some("2."));
    assert_eq!(view.root().children, vec![BlockId(0), BlockId(1)]);
}

#[test]
fn test_typed_markers_become_implied_indices() {
    let (abstract_numberings, numberings) = decimal_list();
    let source = SourceDocument {
        styles: vec![StyleDefinition::new("Normal", StyleKind::Paragraph).as_default()],
        abstract_numberings,
        numberings,
        body: vec![
            SourceParagraph::with_text(None, "1.\tAlpha").into(),
            SourceParagraph::with_text(None, "2.\tBeta").into(),
        ],
        ..Default::default()
    };

    let view = litchi_outline::outline(&source, &options()).unwrap();
    assert!(view.block(BlockId(0)).and_then(|b| b.index()).is_none());
    assert_eq!(view.text(BlockId(0)).as_deref(), Some("1.\tAlpha"));

    let options = options().with_implied_indices(ImpliedIndexPolicy::AllowPartial);
    let view = litchi_outline::outline(&source, &options).unwrap();
    let index = view.block(BlockId(1)).and_then(|b| b.index()).unwrap();
    assert!(index.implied);
    assert_eq!(view.text(BlockId(1)).as_deref(), Some("Beta"));
    assert_eq!(view.marker(BlockId(1)).as_deref(), Some("2."));
}

#[test]
fn test_fatal_and_non_fatal_problems() {
    let source = SourceDocument {
        styles: vec![sized("Orphan", 30, false)],
        ..Default::default()
    };
    let err = litchi_outline::outline(&source, &options()).unwrap_err();
    assert!(matches!(err, Error::DanglingBasedOn { ref parent, .. } if parent == "Normal"));

    let source = SourceDocument {
        body: vec![SourceParagraph::with_text(None, "lost").numbered(9, Some(0)).into()],
        ..Default::default()
    };
    let view = litchi_outline::outline(&source, &options()).unwrap();
    assert!(view.block(BlockId(0)).and_then(|b| b.index()).is_none());
    assert!(matches!(
        view.diagnostics(),
        [Diagnostic::UnknownNumbering {
            block: BlockId(0),
            numbering: 9
        }]
    ));
}

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:basedOn w:val="Normal"/><w:rPr><w:b/><w:sz w:val="32"/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading2">
    <w:basedOn w:val="Normal"/><w:rPr><w:b/><w:sz w:val="26"/></w:rPr>
  </w:style>
</w:styles>"#;

const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/>
      <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>
    <w:lvl w:ilvl="1"><w:start w:val="1"/><w:numFmt w:val="lowerLetter"/><w:lvlText w:val="%2)"/>
      <w:pPr><w:ind w:left="1440" w:hanging="360"/></w:pPr></w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Scope</w:t></w:r></w:p>
    <w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>first</w:t></w:r></w:p>
    <w:p><w:pPr><w:numPr><w:ilvl w:val="1"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>detail</w:t></w:r></w:p>
    <w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>second</w:t></w:r></w:p>
    <w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Details</w:t></w:r></w:p>
    <w:tbl>
      <w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr>
    </w:tbl>
    <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Next</w:t></w:r></w:p>
    <w:sectPr/>
  </w:body>
</w:document>"#;

#[test]
fn test_docx_package() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outline.docx");

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in [
        ("word/document.xml", DOCUMENT),
        ("word/styles.xml", STYLES),
        ("word/numbering.xml", NUMBERING),
    ] {
        writer.start_file(name, stored).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();

    let view = litchi_outline::outline_docx(&path, &options()).unwrap();
    assert_eq!(
        shape(&view),
        vec![
            ("Scope".to_string(), 0),
            ("1. first".to_string(), 1),
            ("a) detail".to_string(), 2),
            ("2. second".to_string(), 1),
            ("Details".to_string(), 1),
            ("<table>".to_string(), 2),
            ("cell".to_string(), 3),
            ("Next".to_string(), 0),
        ]
    );
}
