//! JSON serialization of the exported [`Document`].
//!
//! The document is pretty-printed with two-space indentation and non-ASCII text
//! is written as-is rather than `\u`-escaped.

use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::Document};

impl Parser for Document {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Json)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(Error::Json)
    }
}
