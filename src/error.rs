//! All error types for the i18n-export crate.
//!
//! Every failure is fatal to an export run: errors are propagated to the caller
//! unchanged and nothing is written once one has occurred.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Language;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing file: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("no source configured for language `{0}`")]
    UnconfiguredLanguage(Language),

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an invalid resource error.
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Error::InvalidResource(message.into())
    }
}
