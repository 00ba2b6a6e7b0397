#![doc = include_str!("../README.md")]

//! # rpd-intl
//!
//! English and Chinese strings of the RPD Design tool, packaged as a
//! [Bevy](https://bevyengine.org/) plugin:
//!
//! - **Built-in catalogs**: `messages/<tag>/<Context>.json` is bundled at build time
//! - **Context-aware lookup**: phrases are keyed by (context, source phrase)
//! - **Resilient fallback**: a missing translation renders its source phrase
//! - **Atomic switching**: the active catalog is replaced whole, never patched
//! - **Dialog helpers**: typed window labels, file-dialog filters and error boxes
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use rpd_intl::{ I18n, Label, RpdI18nPlugin };
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(RpdI18nPlugin::default())
//!         .add_systems(Startup, setup_ui)
//!         .run();
//! }
//!
//! fn setup_ui(mut commands: Commands, i18n: Res<I18n>) {
//!     commands.spawn((
//!         Text::new(Label::SaveDesign.text(&i18n)),
//!         Node::default(),
//!     ));
//! }
//! ```
//!
//! ## Switching language
//!
//! Write a [`LanguageRequest`] message; the plugin applies it during `Update`
//! and answers with [`LanguageChanged`] so UI code can redraw its labels.
//! Text that was already rendered is left alone until then.

use std::sync::Arc;

use bevy::prelude::*;
use serde::Deserialize;

mod bundle;
pub mod catalog;
pub mod dialogs;
pub mod error;
pub mod formats;
mod unique_map;

pub use catalog::{ load_catalog, translate, Entry, LanguageTag, LocaleCatalog, RPD_DESIGN, RPD_VIEWER };
pub use dialogs::{ ErrorDialog, FileDialog, FileDialogText, Label, RpdError };
pub use error::I18nError;

/// Configuration for the I18n plugin.
///
/// # Example
///
/// ```rust
/// use rpd_intl::{ I18nConfig, LanguageTag };
///
/// let config = I18nConfig::with_default_lang("zh_CN").unwrap();
/// assert_eq!(config.default_lang, LanguageTag::ZhCn);
///
/// assert!(I18nConfig::with_default_lang("fr_FR").is_err());
/// ```
#[derive(Debug, Clone, Default, Resource)]
pub struct I18nConfig {
    /// Language active at startup.
    /// Default: `en_US`
    pub default_lang: LanguageTag,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    default_lang: Option<String>,
}

impl I18nConfig {
    /// Config starting in `tag`; an unknown tag is reported, not defaulted.
    pub fn with_default_lang(tag: &str) -> Result<Self, I18nError> {
        Ok(Self { default_lang: tag.parse()? })
    }

    /// Reads `{ "default_lang": "zh_CN" }`. A missing field means `en_US`.
    pub fn from_json_str(json: &str) -> Result<Self, I18nError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let default_lang = raw.default_lang
            .map(|tag| tag.parse::<LanguageTag>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self { default_lang })
    }
}

// ---------- Bevy Plugin ----------

/// Installs [`I18nConfig`], the [`I18n`] resource and the language messages.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use rpd_intl::{ I18n, I18nConfig, LanguageTag, RpdI18nPlugin };
///
/// let mut app = App::new();
/// app.add_plugins(RpdI18nPlugin::with_config(I18nConfig {
///     default_lang: LanguageTag::ZhCn,
/// }));
/// assert_eq!(app.world().resource::<I18n>().lang(), LanguageTag::ZhCn);
/// ```
#[derive(Default)]
pub struct RpdI18nPlugin {
    pub config: I18nConfig,
}

impl RpdI18nPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: I18nConfig) -> Self {
        Self { config }
    }
}

impl Plugin for RpdI18nPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<I18n>()
            .add_message::<LanguageRequest>()
            .add_message::<LanguageChanged>()
            .add_systems(Update, apply_language_requests);
    }
}

/// Asks the plugin to change the active language.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum LanguageRequest {
    /// Switch to the given tag, e.g. `"zh_CN"`.
    Set(String),
    /// Flip to the other language, like the window's "Switch Language" button.
    Toggle,
}

/// Sent after the active catalog was replaced.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageChanged {
    pub from: LanguageTag,
    pub to: LanguageTag,
}

/// Applies pending [`LanguageRequest`]s in order.
///
/// Rejected requests are logged and leave the active catalog untouched.
pub fn apply_language_requests(
    mut requests: MessageReader<LanguageRequest>,
    mut i18n: ResMut<I18n>,
    mut changed: MessageWriter<LanguageChanged>
) {
    for request in requests.read() {
        let from = i18n.lang();
        let result = match request {
            LanguageRequest::Set(tag) => i18n.switch_language(tag),
            LanguageRequest::Toggle => i18n.toggle_language(),
        };

        match result {
            Ok(to) if to != from => {
                changed.write(LanguageChanged { from, to });
            }
            Ok(_) => {}
            Err(err) => error!("Language request {:?} rejected: {}", request, err),
        }
    }
}

// ---------- Active catalog ----------

/// The catalog every UI string is currently rendered from.
///
/// Holds exactly one [`LocaleCatalog`]. Switching builds the new catalog
/// completely before swapping it in, so readers see either the old table or
/// the new one.
///
/// # Example
///
/// ```rust
/// use rpd_intl::{ I18n, LanguageTag, RPD_DESIGN };
///
/// let mut i18n = I18n::new(LanguageTag::EnUs).unwrap();
/// assert_eq!(i18n.t(RPD_DESIGN, "Switch Language"), "中文");
///
/// i18n.switch_language("zh_CN").unwrap();
/// assert_eq!(i18n.t(RPD_DESIGN, "Save Design"), "保存设计图");
/// ```
#[derive(Debug, Clone, Resource)]
pub struct I18n {
    active: Arc<LocaleCatalog>,
}

impl FromWorld for I18n {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource::<I18nConfig>().cloned().unwrap_or_default();

        match I18n::new(config.default_lang) {
            Ok(i18n) => i18n,
            Err(err) => {
                // Keep the UI drawable: an empty catalog renders source phrases.
                error!("Failed to load built-in catalog for {}: {}", config.default_lang, err);
                I18n::from_catalog(LocaleCatalog::empty(config.default_lang))
            }
        }
    }
}

impl I18n {
    /// Starts with the built-in catalog of `tag`.
    pub fn new(tag: LanguageTag) -> Result<Self, I18nError> {
        Ok(Self::from_catalog(LocaleCatalog::builtin(tag)?))
    }

    pub fn from_catalog(catalog: LocaleCatalog) -> Self {
        Self { active: Arc::new(catalog) }
    }

    pub fn catalog(&self) -> &LocaleCatalog {
        &self.active
    }

    /// A handle to the active catalog that stays valid across later switches.
    pub fn snapshot(&self) -> Arc<LocaleCatalog> {
        Arc::clone(&self.active)
    }

    pub fn lang(&self) -> LanguageTag {
        self.active.tag()
    }

    /// Looks `source` up in the active catalog, falling back to `source`.
    pub fn t<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.active.translate(context, source)
    }

    /// Replaces the active catalog with the one for `new_tag`.
    ///
    /// Unknown tags fail with [`I18nError::UnsupportedLocale`] and change nothing.
    pub fn switch_language(&mut self, new_tag: &str) -> Result<LanguageTag, I18nError> {
        let tag: LanguageTag = new_tag.parse()?;
        self.set_language(tag)?;
        Ok(tag)
    }

    pub fn set_language(&mut self, tag: LanguageTag) -> Result<(), I18nError> {
        if tag == self.lang() {
            return Ok(());
        }
        let catalog = LocaleCatalog::builtin(tag)?;
        self.active = Arc::new(catalog);
        info!("Switched language to {}", tag);
        Ok(())
    }

    /// Flips between the two built-in languages.
    pub fn toggle_language(&mut self) -> Result<LanguageTag, I18nError> {
        let tag = self.lang().toggled();
        self.set_language(tag)?;
        Ok(tag)
    }

    pub fn available_languages(&self) -> &'static [LanguageTag] {
        &LanguageTag::ALL
    }
}

// ---------- API ----------

/// Extension trait for `App` to switch language outside of systems.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use rpd_intl::{ LanguageAppExt, LanguageTag, RpdI18nPlugin };
///
/// let mut app = App::new();
/// app.add_plugins(RpdI18nPlugin::default());
/// app.switch_language("zh_CN").unwrap();
/// assert_eq!(app.current_language(), Some(LanguageTag::ZhCn));
/// ```
pub trait LanguageAppExt {
    /// Switches the [`I18n`] resource to `tag`.
    ///
    /// Fails if the tag is unsupported, with or without the plugin; a valid
    /// tag is ignored when the plugin is absent.
    fn switch_language(&mut self, tag: &str) -> Result<(), I18nError>;
    /// The active language, if the plugin is installed.
    fn current_language(&self) -> Option<LanguageTag>;
}

impl LanguageAppExt for App {
    fn switch_language(&mut self, tag: &str) -> Result<(), I18nError> {
        let tag: LanguageTag = tag.parse()?;
        match self.world_mut().get_resource_mut::<I18n>() {
            Some(mut i18n) => i18n.set_language(tag),
            None => {
                warn!("Language switch to '{}' ignored: RpdI18nPlugin is not installed", tag);
                Ok(())
            }
        }
    }

    fn current_language(&self) -> Option<LanguageTag> {
        self.world().get_resource::<I18n>().map(I18n::lang)
    }
}
