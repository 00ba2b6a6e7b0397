//! Translations bundled at build time from `messages/<tag>/<Context>.json`.

use bevy::prelude::*;
use once_cell::sync::Lazy;

use crate::catalog::{ Entry, LanguageTag };
use crate::error::I18nError;
use crate::unique_map::UniqueMap;

const BUNDLED_TRANSLATIONS: &str = include_str!(concat!(env!("OUT_DIR"), "/all_translations.json"));

/// Entries per language, in bundle order.
type LangEntries = Vec<(LanguageTag, Vec<Entry>)>;

/// `{ tag: { context: { source: translation } } }`
type BundleDoc = UniqueMap<UniqueMap<UniqueMap<String>>>;

static BUNDLE: Lazy<Result<LangEntries, I18nError>> = Lazy::new(|| parse_bundle(BUNDLED_TRANSLATIONS));

/// The bundled entries of one language.
pub(crate) fn entries_for(tag: LanguageTag) -> Result<Vec<Entry>, I18nError> {
    let langs = BUNDLE.as_ref().map_err(Clone::clone)?;
    entries_in(langs, tag)
}

/// An empty bundle (crate built without a messages folder) yields no entries,
/// so lookups fall back to source phrases. A bundle holding other languages
/// but not `tag` is an error.
fn entries_in(langs: &[(LanguageTag, Vec<Entry>)], tag: LanguageTag) -> Result<Vec<Entry>, I18nError> {
    if langs.is_empty() {
        return Ok(Vec::new());
    }

    langs
        .iter()
        .find(|(lang, _)| *lang == tag)
        .map(|(_, entries)| entries.clone())
        .ok_or_else(|| I18nError::InvalidData(format!("no bundled catalog for {tag}")))
}

/// Decodes the bundle. Repeated keys at any level and non-string
/// translations are rejected.
pub(crate) fn parse_bundle(json: &str) -> Result<LangEntries, I18nError> {
    let UniqueMap(doc) = serde_json::from_str::<BundleDoc>(json)?;

    let mut langs = Vec::new();

    for (lang_code, UniqueMap(contexts)) in doc {
        let tag = match lang_code.parse::<LanguageTag>() {
            Ok(tag) => tag,
            Err(_) => {
                warn!("Ignoring bundled translations for unsupported locale '{}'", lang_code);
                continue;
            }
        };

        let mut entries = Vec::new();
        for (context, UniqueMap(phrases)) in contexts {
            for (source, translation) in phrases {
                entries.push(Entry::new(context.as_str(), source, translation));
            }
        }

        debug!("Decoded {} bundled entries for {}", entries.len(), tag);
        langs.push((tag, entries));
    }

    Ok(langs)
}
