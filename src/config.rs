//! Fixed export configuration: where each language's resources live, which
//! identifiers are extracted, and the hand-authored strings merged on top.
//!
//! Nothing here is global state. `ExportConfig::default()` yields the built-in
//! configuration and callers pass it into [`crate::export`].

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::types::{AllowList, Language, StringTable};

/// Default location of the exported document, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "docs/i18n.json";

const BUILTIN_SOURCES: [(Language, &str); 5] = [
    (Language::English, "decompiled/base/res/values/strings.xml"),
    (
        Language::German,
        "decompiled/config_de/res/values-de/strings.xml",
    ),
    (
        Language::Spanish,
        "decompiled/config_es/res/values-es/strings.xml",
    ),
    (
        Language::French,
        "decompiled/config_fr/res/values-fr/strings.xml",
    ),
    (
        Language::Portuguese,
        "decompiled/config_pt/res/values-pt/strings.xml",
    ),
];

// Repeated identifiers are intentional; `AllowList` collapses them.
const BUILTIN_KEYS: &[&str] = &[
    "app_name",
    "main_editTeams",
    "main_setStones",
    "main_lastScore",
    "settings",
    "main_team1",
    "main_team2",
    "main_changeColor_1",
    "main_changeColor_2",
    "main_changeOfEnds",
    "main_changeColor",
    "main_renameTeams",
    "main_renameTeams_1",
    "main_renameTeams_2",
    "main_toast_infinity",
    "reset",
    "pref_category_game",
    "pref_category_sound",
    "pref_category_others",
    "pref_mode",
    "pref_mode_50",
    "pref_mode_100",
    "pref_mode_infinite",
    "pref_mode_custom",
    "playStore",
    "pref_interval_custom",
    "pref_stoneInterval",
    "pref_reverse",
    "pref_reverse_summary",
    "pref_immediateStart",
    "pref_gong_after_point",
    "pref_pause_after_point",
    "pref_pause_after_gong",
    "pref_keep_display_awake",
    "pref_sounds_stones",
    "pref_sounds_stones_countdown",
    "pref_sounds_gong",
    "pref_sounds_gong",
    "pref_sounds_stones",
    "pref_sounds_stones_countdown",
    "pref_stone",
    "pref_achievement",
    "pref_big_drum",
    "pref_cash_reg",
    "pref_censure",
    "pref_crow",
    "pref_doh",
    "pref_drum",
    "pref_duck",
    "pref_fb",
    "pref_gong",
    "pref_metal_gear",
    "pref_pan",
    "pref_snare_drum",
    "pref_telephone",
    "pref_train_whistle",
    "pref_vuvuzela",
    "pref_air_horn",
    "pref_email",
    "pref_version",
    "language",
    "language_english",
    "language_german",
    "language_spanish",
    "language_french",
    "language_portuguese",
    "language_en",
    "language_english_en",
    "language_german_en",
    "language_spanish_en",
    "language_french_en",
    "language_portuguese_en",
    "pref_mode_infinite",
    "pref_mode_custom",
];

const BUILTIN_OVERLAY: [(Language, &[(&str, &str)]); 5] = [
    (
        Language::English,
        &[("common.save", "Save"), ("common.cancel", "Cancel")],
    ),
    (
        Language::German,
        &[("common.save", "Speichern"), ("common.cancel", "Abbrechen")],
    ),
    (
        Language::Spanish,
        &[("common.save", "Guardar"), ("common.cancel", "Cancelar")],
    ),
    (
        Language::French,
        &[("common.save", "Enregistrer"), ("common.cancel", "Annuler")],
    ),
    (
        Language::Portuguese,
        &[("common.save", "Guardar"), ("common.cancel", "Cancelar")],
    ),
];

/// Maps each language to the `strings.xml` it is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSources {
    root: Option<PathBuf>,
    paths: BTreeMap<Language, PathBuf>,
}

impl LocaleSources {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = (Language, P)>,
        P: Into<PathBuf>,
    {
        Self {
            root: None,
            paths: paths.into_iter().map(|(l, p)| (l, p.into())).collect(),
        }
    }

    /// The decompiled APK layout the exporter was written against.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_SOURCES)
    }

    /// Resolves every relative path against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Path of the resource file for `lang`, or `None` when it is not configured.
    pub fn path(&self, lang: Language) -> Option<PathBuf> {
        let relative = self.paths.get(&lang)?;
        Some(match &self.root {
            Some(root) => root.join(relative),
            None => relative.clone(),
        })
    }
}

impl Default for LocaleSources {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AllowList {
    pub fn builtin() -> Self {
        AllowList::new(BUILTIN_KEYS.iter().copied())
    }
}

/// Hand-authored strings merged into every language after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualOverlay {
    tables: BTreeMap<Language, StringTable>,
}

impl ManualOverlay {
    pub fn new(tables: BTreeMap<Language, StringTable>) -> Self {
        Self { tables }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_OVERLAY
                .iter()
                .map(|(lang, entries)| (*lang, entries.iter().copied().collect::<StringTable>()))
                .collect(),
        )
    }

    /// The overlay for `lang`, defaulting to the English set when `lang` has none.
    pub fn entries_for(&self, lang: Language) -> Option<&StringTable> {
        self.tables
            .get(&lang)
            .or_else(|| self.tables.get(&Language::FALLBACK))
    }
}

impl Default for ManualOverlay {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Everything an export run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub sources: LocaleSources,
    pub allow_list: AllowList,
    pub overlay: ManualOverlay,
    pub output: PathBuf,
}

impl ExportConfig {
    /// Re-bases both the source files and the output under `root`.
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        self.sources = self.sources.with_root(root);
        if self.output.is_relative() {
            self.output = root.join(&self.output);
        }
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sources: LocaleSources::builtin(),
            allow_list: AllowList::builtin(),
            overlay: ManualOverlay::builtin(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sources_cover_every_language() {
        let sources = LocaleSources::builtin();
        for lang in Language::ALL {
            assert!(sources.path(lang).is_some(), "no path for {lang}");
        }
        assert_eq!(
            sources.path(Language::German).unwrap(),
            PathBuf::from("decompiled/config_de/res/values-de/strings.xml")
        );
    }

    #[test]
    fn test_sources_with_root() {
        let sources = LocaleSources::builtin().with_root("/tmp/apk");
        assert_eq!(
            sources.path(Language::English).unwrap(),
            PathBuf::from("/tmp/apk/decompiled/base/res/values/strings.xml")
        );
    }

    #[test]
    fn test_unconfigured_language_has_no_path() {
        let sources = LocaleSources::new([(Language::English, "en.xml")]);
        assert!(sources.path(Language::French).is_none());
    }

    #[test]
    fn test_builtin_allow_list_is_deduplicated() {
        let list = AllowList::builtin();
        assert!(list.len() < BUILTIN_KEYS.len());
        assert!(list.contains("pref_sounds_gong"));
        assert!(list.contains("app_name"));
        assert_eq!(list.iter().filter(|k| *k == "pref_mode_custom").count(), 1);
    }

    #[test]
    fn test_overlay_per_language() {
        let overlay = ManualOverlay::builtin();
        let de = overlay.entries_for(Language::German).unwrap();
        assert_eq!(de.get("common.save"), Some("Speichern"));
        assert_eq!(de.get("common.cancel"), Some("Abbrechen"));
    }

    #[test]
    fn test_overlay_defaults_to_english() {
        let mut tables = BTreeMap::new();
        tables.insert(
            Language::English,
            [("common.save", "Save")].into_iter().collect(),
        );
        let overlay = ManualOverlay::new(tables);
        let pt = overlay.entries_for(Language::Portuguese).unwrap();
        assert_eq!(pt.get("common.save"), Some("Save"));
    }

    #[test]
    fn test_config_with_root_rebases_output() {
        let config = ExportConfig::default().with_root("/work");
        assert_eq!(config.output, PathBuf::from("/work/docs/i18n.json"));
        let config = ExportConfig::default()
            .with_output("/abs/out.json")
            .with_root("/work");
        assert_eq!(config.output, PathBuf::from("/abs/out.json"));
    }
}
