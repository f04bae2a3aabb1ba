//! Resource file formats understood by i18n-export.

pub mod android_strings;

// Reexporting the formats for easier access
pub use android_strings::Format as AndroidStringsFormat;
