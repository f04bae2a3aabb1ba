#![forbid(unsafe_code)]
//! Extracts localized UI strings from Android `strings.xml` resources.
//!
//! Five locales are read, restricted to an allow-list of identifiers, gaps are
//! filled from English, a handful of hand-authored strings are merged in, and
//! the result is written as one JSON document keyed by language code.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use i18n_export::{ExportConfig, export};
//!
//! let report = export(&ExportConfig::default().with_root("app"))?;
//! println!("Wrote {}", report.output.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::{DEFAULT_OUTPUT, ExportConfig, LocaleSources, ManualOverlay},
    error::Error,
    pipeline::{ExportReport, LanguageStats, export},
    traits::Parser,
    types::{AllowList, Document, Language, StringTable},
};
