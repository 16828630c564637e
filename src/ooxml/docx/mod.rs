/// Word (.docx) package reading.
///
/// # Architecture
///
/// - `package`: the ZIP container and the three parts read from it
/// - `styles`: `word/styles.xml` into style definitions and defaults
/// - `numbering`: `word/numbering.xml` into templates and instances
/// - `document`: `word/document.xml` into the flat block sequence
/// - `properties`: the `w:rPr`, `w:pPr` and `w:tblPr` readers they share
///
/// # Example
///
/// ```rust,no_run
/// use litchi_outline::ooxml::docx::Package;
///
/// let package = Package::open("document.docx")?;
/// let source = package.source()?;
/// println!("{} styles, {} body blocks", source.styles.len(), source.body.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod document;
pub mod numbering;
pub mod package;
mod properties;
pub mod styles;
mod xml;

pub use package::Package;
