/// Error types for reading a `.docx` package.
use thiserror::Error;

/// Result type for package reading.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for package reading.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// A required part is missing from the package
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// A style declares a `w:type` this reader does not know
    #[error("style '{style}' has unrecognized type '{kind}'")]
    UnknownStyleKind { style: String, kind: String },
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<zip::result::ZipError> for OoxmlError {
    fn from(err: zip::result::ZipError) -> Self {
        OoxmlError::Zip(err.to_string())
    }
}
