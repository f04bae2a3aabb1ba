//! The export run: load every language, fill gaps from English, merge the
//! manual overlay, then write the document.
//!
//! Each stage runs once over all languages. The first error aborts the run
//! before anything is written.

use std::{collections::BTreeMap, path::PathBuf};

use tracing::{debug, info, warn};

use crate::{
    config::{ExportConfig, LocaleSources, ManualOverlay},
    error::Error,
    formats::AndroidStringsFormat,
    traits::Parser,
    types::{AllowList, Document, Language, StringTable},
};

/// How one language's table was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageStats {
    /// Allow-listed strings read from the language's own resource file.
    pub native: usize,
    /// Strings copied from English because the language lacked them.
    pub fallback: usize,
    /// Manual overlay entries applied.
    pub manual: usize,
    /// Entries in the final table.
    pub total: usize,
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub output: PathBuf,
    pub document: Document,
    pub languages: BTreeMap<Language, LanguageStats>,
}

/// Reads the allow-listed strings of every supported language.
///
/// Fails on the first language whose resource file is missing or unreadable.
pub fn load_tables(
    sources: &LocaleSources,
    allow_list: &AllowList,
) -> Result<BTreeMap<Language, StringTable>, Error> {
    if allow_list.is_empty() {
        warn!("allow-list is empty; only manual overlay strings will be exported");
    }
    let mut tables = BTreeMap::new();
    for lang in Language::ALL {
        let path = sources
            .path(lang)
            .ok_or(Error::UnconfiguredLanguage(lang))?;
        let format = AndroidStringsFormat::read_from(&path)?;
        let table = format.to_table(allow_list);
        debug!(
            language = %lang,
            path = %path.display(),
            parsed = format.strings.len(),
            kept = table.len(),
            "loaded resource file"
        );
        tables.insert(lang, table);
    }
    Ok(tables)
}

/// Copies English values into every other language for allow-listed
/// identifiers that language lacks. Existing values are never replaced and
/// identifiers English lacks are never added.
///
/// Returns how many entries were copied per language.
pub fn fill_fallbacks(
    tables: &mut BTreeMap<Language, StringTable>,
    allow_list: &AllowList,
) -> BTreeMap<Language, usize> {
    let english = tables
        .get(&Language::FALLBACK)
        .cloned()
        .unwrap_or_default();

    let mut copied = BTreeMap::new();
    for (lang, table) in tables.iter_mut() {
        if lang.is_fallback() {
            continue;
        }
        let mut count = 0;
        for key in allow_list.iter() {
            if let Some(value) = english.get(key) {
                if table.insert_if_absent(key, value) {
                    count += 1;
                }
            }
        }
        debug!(language = %lang, copied = count, "filled fallbacks from English");
        copied.insert(*lang, count);
    }
    copied
}

/// Inserts or overwrites every manual overlay entry for each language.
///
/// Returns how many entries were applied per language.
pub fn apply_overlay(
    tables: &mut BTreeMap<Language, StringTable>,
    overlay: &ManualOverlay,
) -> BTreeMap<Language, usize> {
    let mut applied = BTreeMap::new();
    for (lang, table) in tables.iter_mut() {
        let Some(entries) = overlay.entries_for(*lang) else {
            continue;
        };
        for (id, value) in entries.iter() {
            if let Some(previous) = table.insert(id, value) {
                debug!(language = %lang, id, previous = %previous, "overlay replaced extracted string");
            }
        }
        applied.insert(*lang, entries.len());
    }
    applied
}

/// Runs every stage except writing.
pub fn build_document(
    config: &ExportConfig,
) -> Result<(Document, BTreeMap<Language, LanguageStats>), Error> {
    let mut tables = load_tables(&config.sources, &config.allow_list)?;
    let mut stats: BTreeMap<Language, LanguageStats> = tables
        .iter()
        .map(|(lang, table)| {
            (
                *lang,
                LanguageStats {
                    native: table.len(),
                    ..Default::default()
                },
            )
        })
        .collect();

    for (lang, count) in fill_fallbacks(&mut tables, &config.allow_list) {
        stats.entry(lang).or_default().fallback = count;
    }
    for (lang, count) in apply_overlay(&mut tables, &config.overlay) {
        stats.entry(lang).or_default().manual = count;
    }
    for (lang, table) in &tables {
        stats.entry(*lang).or_default().total = table.len();
    }

    Ok((Document::new(tables), stats))
}

/// Builds the document and writes it to `config.output`, replacing any
/// previous file. Nothing is written when any stage fails.
pub fn export(config: &ExportConfig) -> Result<ExportReport, Error> {
    let (document, languages) = build_document(config)?;
    document.write_to(&config.output)?;
    info!(
        output = %config.output.display(),
        languages = languages.len(),
        "wrote i18n document"
    );
    Ok(ExportReport {
        output: config.output.clone(),
        document,
        languages,
    })
}
