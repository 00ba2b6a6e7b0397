//! Locale catalogs: the (context, source phrase) -> translation tables.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{ Deserialize, Serialize };

use crate::bundle;
use crate::error::I18nError;

/// Context of the main window strings.
pub const RPD_DESIGN: &str = "RpdDesign";
/// Context of the viewer strings (file dialogs and error boxes).
pub const RPD_VIEWER: &str = "RpdViewer";

/// A built-in language.
///
/// Only tags with a bundled catalog can be represented, so holding a
/// `LanguageTag` means the locale is known to be supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageTag {
    #[default]
    EnUs,
    ZhCn,
}

impl LanguageTag {
    /// All supported languages, in the order they are offered to the user.
    pub const ALL: [LanguageTag; 2] = [LanguageTag::EnUs, LanguageTag::ZhCn];

    /// The tag string, e.g. `"en_US"`.
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageTag::EnUs => "en_US",
            LanguageTag::ZhCn => "zh_CN",
        }
    }

    /// The language's name written in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            LanguageTag::EnUs => "English",
            LanguageTag::ZhCn => "中文",
        }
    }

    /// The language the "Switch Language" button leads to.
    pub fn toggled(self) -> Self {
        match self {
            LanguageTag::EnUs => LanguageTag::ZhCn,
            LanguageTag::ZhCn => LanguageTag::EnUs,
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = I18nError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        LanguageTag::ALL
            .into_iter()
            .find(|lang| lang.as_str() == tag)
            .ok_or_else(|| I18nError::UnsupportedLocale(tag.to_string()))
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = I18nError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.as_str().to_string()
    }
}

/// One translated phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub context: String,
    pub source: String,
    pub translation: String,
}

impl Entry {
    pub fn new(
        context: impl Into<String>,
        source: impl Into<String>,
        translation: impl Into<String>
    ) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            translation: translation.into(),
        }
    }
}

/// Immutable translation table for a single language.
///
/// Entries keep the order they were supplied in; lookups go through an index
/// keyed by context, then source phrase.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    tag: LanguageTag,
    entries: Vec<Entry>,
    index: HashMap<String, HashMap<String, usize>>,
}

impl LocaleCatalog {
    /// Builds a catalog, rejecting a repeated (context, source) pair.
    pub fn from_entries(tag: LanguageTag, entries: Vec<Entry>) -> Result<Self, I18nError> {
        let mut index: HashMap<String, HashMap<String, usize>> = HashMap::new();

        for (position, entry) in entries.iter().enumerate() {
            let phrases = index.entry(entry.context.clone()).or_default();
            if phrases.insert(entry.source.clone(), position).is_some() {
                return Err(I18nError::DuplicateEntry {
                    locale: tag.to_string(),
                    context: entry.context.clone(),
                    source: entry.source.clone(),
                });
            }
        }

        Ok(Self { tag, entries, index })
    }

    /// An empty catalog: every lookup falls back to the source phrase.
    pub fn empty(tag: LanguageTag) -> Self {
        Self {
            tag,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The built-in catalog for `tag`.
    pub fn builtin(tag: LanguageTag) -> Result<Self, I18nError> {
        bundle::entries_for(tag).and_then(|entries| Self::from_entries(tag, entries))
    }

    pub fn tag(&self) -> LanguageTag {
        self.tag
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Context names in first-seen order.
    pub fn contexts(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.context.as_str()) {
                seen.push(&entry.context);
            }
        }
        seen
    }

    /// The translation of `source` in `context`, if this catalog has one.
    pub fn get(&self, context: &str, source: &str) -> Option<&str> {
        self.index
            .get(context)
            .and_then(|phrases| phrases.get(source))
            .map(|&position| self.entries[position].translation.as_str())
    }

    /// The text to display for `source` in `context`.
    ///
    /// Missing entries render the source phrase unchanged.
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.get(context, source).unwrap_or(source)
    }
}

/// Loads the built-in catalog for a language tag such as `"zh_CN"`.
pub fn load_catalog(language_tag: &str) -> Result<LocaleCatalog, I18nError> {
    let tag: LanguageTag = language_tag.parse()?;
    LocaleCatalog::builtin(tag)
}

/// Free-function form of [`LocaleCatalog::translate`].
pub fn translate<'a>(catalog: &'a LocaleCatalog, context: &str, source_phrase: &'a str) -> &'a str {
    catalog.translate(context, source_phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!("en_US".parse::<LanguageTag>(), Ok(LanguageTag::EnUs));
        assert_eq!("zh_CN".parse::<LanguageTag>(), Ok(LanguageTag::ZhCn));
    }

    #[test]
    fn rejects_unknown_tags() {
        for tag in ["fr_FR", "en", "zh", "en-US", "EN_US", ""] {
            assert_eq!(
                tag.parse::<LanguageTag>(),
                Err(I18nError::UnsupportedLocale(tag.to_string())),
                "tag {tag:?} should be rejected"
            );
        }
    }

    #[test]
    fn toggled_flips_between_the_two_languages() {
        assert_eq!(LanguageTag::EnUs.toggled(), LanguageTag::ZhCn);
        assert_eq!(LanguageTag::ZhCn.toggled(), LanguageTag::EnUs);
    }

    #[test]
    fn tag_serde_uses_tag_string() {
        let json = serde_json::to_string(&LanguageTag::ZhCn).unwrap();
        assert_eq!(json, "\"zh_CN\"");
        let back: LanguageTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LanguageTag::ZhCn);
        assert!(serde_json::from_str::<LanguageTag>("\"de_DE\"").is_err());
    }

    #[test]
    fn from_entries_rejects_duplicate_pair() {
        let entries = vec![
            Entry::new(RPD_DESIGN, "Base", "底图"),
            Entry::new(RPD_VIEWER, "Base", "底图"),
            Entry::new(RPD_DESIGN, "Base", "基础")
        ];
        let err = LocaleCatalog::from_entries(LanguageTag::ZhCn, entries).unwrap_err();
        assert_eq!(err, I18nError::DuplicateEntry {
            locale: "zh_CN".to_string(),
            context: RPD_DESIGN.to_string(),
            source: "Base".to_string(),
        });
    }

    #[test]
    fn same_source_in_different_contexts_is_allowed() {
        let entries = vec![
            Entry::new(RPD_DESIGN, "Error", "错误"),
            Entry::new(RPD_VIEWER, "Error", "Fehler")
        ];
        let catalog = LocaleCatalog::from_entries(LanguageTag::ZhCn, entries).unwrap();
        assert_eq!(catalog.translate(RPD_DESIGN, "Error"), "错误");
        assert_eq!(catalog.translate(RPD_VIEWER, "Error"), "Fehler");
        assert_eq!(catalog.contexts(), vec![RPD_DESIGN, RPD_VIEWER]);
    }

    #[test]
    fn translate_falls_back_to_source() {
        let catalog = LocaleCatalog::empty(LanguageTag::ZhCn);
        assert!(catalog.is_empty());
        assert_eq!(catalog.translate(RPD_DESIGN, "Remedy"), "Remedy");
        assert_eq!(catalog.get(RPD_DESIGN, "Remedy"), None);
    }

    #[test]
    fn load_catalog_rejects_unsupported_locale() {
        let err = load_catalog("ja_JP").unwrap_err();
        assert_eq!(err, I18nError::UnsupportedLocale("ja_JP".to_string()));
    }

    #[test]
    fn load_catalog_switch_language_scenario() {
        let zh = load_catalog("zh_CN").unwrap();
        assert_eq!(translate(&zh, RPD_DESIGN, "Switch Language"), "English");
        assert_eq!(translate(&zh, RPD_DESIGN, "Save Design"), "保存设计图");

        let en = load_catalog("en_US").unwrap();
        assert_eq!(translate(&en, RPD_DESIGN, "Switch Language"), "中文");
    }
}
