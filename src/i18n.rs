use crate::config::I18nConfig;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../messages/en.json")),
    ("de", include_str!("../messages/de.json")),
];

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("default locale `{0}` is not one of the supported locales")]
    UnsupportedDefault(String),

    #[error("no message catalog for locale `{0}`")]
    MissingCatalog(String),

    #[error("malformed message catalog for locale `{locale}`: {source}")]
    MalformedCatalog {
        locale: String,
        source: serde_json::Error,
    },
}

/// A locale from the supported set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, derive_more::Display)]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct I18n {
    default_locale: Locale,
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl I18n {
    pub fn new(config: &I18nConfig) -> Result<Self, Error> {
        if !config.locales.contains(&config.default_locale) {
            return Err(Error::UnsupportedDefault(config.default_locale.clone()));
        }

        let mut catalogs = HashMap::new();
        for locale in &config.locales {
            let (_, source) = CATALOGS
                .iter()
                .find(|&&(name, _)| name == locale.as_str())
                .ok_or_else(|| Error::MissingCatalog(locale.clone()))?;
            let catalog = parse_catalog(source).map_err(|source| Error::MalformedCatalog {
                locale: locale.clone(),
                source,
            })?;
            catalogs.insert(locale.clone(), catalog);
        }

        Ok(Self {
            default_locale: Locale(config.default_locale.clone()),
            catalogs,
        })
    }

    /// The locale for a request: the path segment if it carries one, the
    /// default otherwise. `None` when the segment is not supported.
    pub fn resolve(&self, requested: Option<&str>) -> Option<Locale> {
        match requested {
            None => Some(self.default_locale.clone()),
            Some(locale) if self.catalogs.contains_key(locale) => Some(Locale(locale.to_string())),
            Some(_) => None,
        }
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn translate(&self, locale: &Locale, key: &str) -> String {
        match self
            .catalogs
            .get(locale.as_str())
            .and_then(|catalog| catalog.get(key))
        {
            Some(message) => message.clone(),
            None => {
                warn!("missing translation for `{key}` in locale `{locale}`");
                key.to_string()
            }
        }
    }

    pub fn translator<'a>(&'a self, locale: &'a Locale) -> Translator<'a> {
        Translator { i18n: self, locale }
    }
}

/// Lookups bound to one locale.
#[derive(Clone, Copy)]
pub struct Translator<'a> {
    i18n: &'a I18n,
    locale: &'a Locale,
}

impl Translator<'_> {
    pub fn t(&self, key: &str) -> String {
        self.i18n.translate(self.locale, key)
    }

    pub fn locale(&self) -> &Locale {
        self.locale
    }
}

fn parse_catalog(source: &str) -> Result<HashMap<String, String>, serde_json::Error> {
    let value: Value = serde_json::from_str(source)?;
    let mut catalog = HashMap::new();
    flatten(None, value, &mut catalog);

    Ok(catalog)
}

// {"Navigation": {"bases": "Bases"}} becomes "Navigation.bases" => "Bases".
fn flatten(prefix: Option<&str>, value: Value, catalog: &mut HashMap<String, String>) {
    let key = |name: &str| match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.to_string(),
    };

    match value {
        Value::Object(entries) => {
            for (name, value) in entries {
                flatten(Some(&key(&name)), value, catalog);
            }
        }
        Value::String(message) => {
            if let Some(prefix) = prefix {
                catalog.insert(prefix.to_string(), message);
            }
        }
        other => {
            if let Some(prefix) = prefix {
                catalog.insert(prefix.to_string(), other.to_string());
            }
        }
    }
}
