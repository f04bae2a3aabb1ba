//! Core types for i18n-export.
//! Parsers decode into a `StringTable`; the exporter serializes a `Document` of them.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    str::FromStr,
};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::error::Error;

/// One of the five supported locales.
///
/// Variant order is the output order of the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "pt")]
    Portuguese,
}

impl Language {
    /// All supported languages, in output order.
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::German,
        Language::Spanish,
        Language::French,
        Language::Portuguese,
    ];

    /// The language every other language falls back to.
    pub const FALLBACK: Language = Language::English;

    /// The two-letter code used as the top-level key of the document.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Portuguese => "pt",
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::FALLBACK
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

/// The set of string identifiers eligible for extraction.
///
/// Built from a list; repeated identifiers collapse into one member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    keys: BTreeSet<String>,
}

impl AllowList {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// A single identifier/text pair of a `StringTable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub id: String,
    pub value: String,
}

/// Identifier to text mapping for one language.
///
/// Keeps insertion order. Re-inserting an identifier replaces its value but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: Vec<StringEntry>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites `id`. Returns the previous value, if any.
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let id = id.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => Some(std::mem::replace(&mut existing.value, value)),
            None => {
                self.entries.push(StringEntry { id, value });
                None
            }
        }
    }

    /// Inserts `id` only when it is not already present. Returns whether it inserted.
    pub fn insert_if_absent(&mut self, id: &str, value: &str) -> bool {
        if self.contains_key(id) {
            return false;
        }
        self.entries.push(StringEntry {
            id: id.to_string(),
            value: value.to_string(),
        });
        true
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.value.as_str())
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.id.as_str(), e.value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = StringTable::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

impl Serialize for StringTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.id, &entry.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StringTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = StringTable;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("an object of identifier to text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = StringTable::new();
                while let Some((id, value)) = access.next_entry::<String, String>()? {
                    table.insert(id, value);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// The exported document: one `StringTable` per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Document {
    pub tables: BTreeMap<Language, StringTable>,
}

impl Document {
    pub fn new(tables: BTreeMap<Language, StringTable>) -> Self {
        Self { tables }
    }

    pub fn get(&self, lang: Language) -> Option<&StringTable> {
        self.tables.get(&lang)
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.tables.keys().copied()
    }
}
