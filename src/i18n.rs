//! Translation catalogs and lookup.
//!
//! Catalogs are nested JSON objects flattened to dotted keys
//! (`menu.file.label`). Lookups fall back to English, then to the key itself.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::I18nError;

const EN_CATALOG: &str = include_str!("../assets/locales/en.json");
const ZH_CATALOG: &str = include_str!("../assets/locales/zh.json");

/// `{{ name }}` placeholders, i18next style.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
});

/// The two supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Zh];
    pub const FALLBACK: Language = Language::En;

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Parse an exact lowercase code. Anything else, including `"ZH"` or
    /// `" zh"`, is rejected.
    pub fn parse(raw: &str) -> Option<Language> {
        match raw {
            "en" => Some(Language::En),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    pub fn toggled(self) -> Language {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Flattened string table for one language.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    language: Language,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn parse(language: Language, raw: &str) -> Result<Self, I18nError> {
        let malformed = |reason: String| I18nError::MalformedCatalog {
            language: language.code(),
            reason,
        };
        let root: Value = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
        if !root.is_object() {
            return Err(malformed("root is not an object".into()));
        }

        let mut entries = HashMap::new();
        flatten_into(&mut entries, "", &root);
        Ok(Self { language, entries })
    }

    /// Catalog with no entries; every lookup misses.
    pub fn empty(language: Language) -> Self {
        Self {
            language,
            entries: HashMap::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(out, &path, child);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        // Numbers and booleans are rendered verbatim; arrays/null are skipped.
        Value::Number(_) | Value::Bool(_) => {
            out.insert(prefix.to_string(), value.to_string());
        }
        Value::Array(_) | Value::Null => {}
    }
}

/// Where catalogs come from. The host loads through this on every locale change.
pub trait CatalogSource: Send + Sync + 'static {
    fn load(&self, language: Language) -> Result<Catalog, I18nError>;
}

/// Catalogs compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalogs;

impl CatalogSource for BuiltinCatalogs {
    fn load(&self, language: Language) -> Result<Catalog, I18nError> {
        let raw = match language {
            Language::En => EN_CATALOG,
            Language::Zh => ZH_CATALOG,
        };
        Catalog::parse(language, raw)
    }
}

/// The asynchronous locale-change operation: parse off the async executor.
pub async fn load_catalog(
    source: Arc<dyn CatalogSource>,
    language: Language,
) -> Result<Catalog, I18nError> {
    tokio::task::spawn_blocking(move || source.load(language))
        .await
        .map_err(|e| I18nError::TaskAborted(e.to_string()))?
}

/// Active catalog plus the English fallback.
#[derive(Debug, Clone)]
pub struct Translator {
    active: Catalog,
    fallback: Catalog,
}

impl Translator {
    pub fn new(active: Catalog, fallback: Catalog) -> Self {
        Self { active, fallback }
    }

    /// Build from a source, degrading to empty catalogs (keys shown verbatim).
    pub fn load(source: &dyn CatalogSource, language: Language) -> Self {
        let fallback = source.load(Language::FALLBACK).unwrap_or_else(|e| {
            tracing::error!("fallback catalog unavailable: {}", e);
            Catalog::empty(Language::FALLBACK)
        });
        let mut translator = Self {
            active: fallback.clone(),
            fallback,
        };
        if language != Language::FALLBACK {
            match source.load(language) {
                Ok(catalog) => translator.active = catalog,
                Err(e) => tracing::error!("catalog for {} unavailable: {}", language, e),
            }
        }
        translator
    }

    pub fn language(&self) -> Language {
        self.active.language()
    }

    /// Swap in a freshly loaded catalog.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.active = catalog;
    }

    pub fn t(&self, key: &str) -> String {
        self.active
            .get(key)
            .or_else(|| self.fallback.get(key))
            .unwrap_or(key)
            .to_string()
    }

    /// Lookup with `{{name}}` interpolation. Unknown placeholders stay as-is.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.t(key);
        PLACEHOLDER
            .replace_all(&template, |caps: &Captures| {
                let name = &caps[1];
                args.iter()
                    .find(|(arg, _)| *arg == name)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
