/// Style definitions and their cascade resolution.
///
/// This module turns the `basedOn`-chained style definitions of a document
/// into effective, fully populated formats.
///
/// # Architecture
///
/// - `properties`: definition-level and effective property types and the
///   toggle-aware cascade rules
/// - `definition`: raw `<w:style>` definitions
/// - `resolver`: the inheritance walk and link merging
/// - `registry`: deduplicated canonical styles and raw-id lookups
///
/// # Example
///
/// ```rust
/// use litchi_outline::style::{
///     DocumentDefaults, RunProperties, StyleDefinition, StyleKind, StyleResolver,
/// };
///
/// let styles = vec![
///     StyleDefinition::new("Normal", StyleKind::Paragraph),
///     StyleDefinition::new("Body", StyleKind::Paragraph).based_on("Normal"),
/// ];
/// let registry = StyleResolver::new(&DocumentDefaults::default(), &styles).resolve()?;
///
/// // "Normal" and "Body" state nothing, so both collapse into the defaults.
/// assert_eq!(registry.canonical_id("Body"), Some("docDefaults|Normal|Body"));
/// # Ok::<(), litchi_outline::common::Error>(())
/// ```
pub mod definition;
pub mod properties;
pub mod registry;
pub mod resolver;

pub use definition::{StyleDefinition, StyleKind};
pub use properties::{
    DocumentDefaults, Indentation, IndentationProperties, Justification, NumberingReference,
    ParagraphFormat, ParagraphProperties, RunFormat, RunProperties, StyleFormat, StyleProperties,
    TableFormat, TableProperties, aggregate, parse_toggle, parse_underline,
};
pub use registry::{DEFAULT_STYLE_ID, STYLE_ID_SEPARATOR, Style, StyleRegistry, deduplicate};
pub use resolver::StyleResolver;
