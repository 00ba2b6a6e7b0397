//! Errors raised while selecting or building a locale catalog.

/// Failure modes of the localization layer.
///
/// Lookups never fail (a missing translation renders its source phrase), so
/// every variant here is about choosing or constructing a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// The language tag is not one of the built-in locales.
    UnsupportedLocale(String),
    /// Two entries share the same (context, source phrase) pair.
    DuplicateEntry {
        locale: String,
        context: String,
        source: String,
    },
    /// The bundled translation data or a configuration document could not be decoded.
    InvalidData(String),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLocale(tag) => write!(f, "unsupported locale: '{tag}'"),
            Self::DuplicateEntry { locale, context, source } => {
                write!(f, "duplicate entry '{source}' in context '{context}' of locale '{locale}'")
            }
            Self::InvalidData(msg) => write!(f, "invalid translation data: {msg}"),
        }
    }
}

impl std::error::Error for I18nError {}

impl From<serde_json::Error> for I18nError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidData(err.to_string())
    }
}
