//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::ooxml::OoxmlError;

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::Xml(s) => Error::Xml(s),
            OoxmlError::Zip(s) => Error::Zip(s),
            OoxmlError::PartNotFound(s) => Error::PartNotFound(s),
            OoxmlError::UnknownStyleKind { style, kind } => Error::UnknownStyleKind { style, kind },
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}
