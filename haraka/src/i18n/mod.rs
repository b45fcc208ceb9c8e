//! Display language and translated strings.
//!
//! The active [`Locale`] lives in [`crate::state::AppState`] and is handed to
//! every render and formatting call. Switching language replaces it.

pub mod format;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const EN_TRANSLATIONS: &str = include_str!("../../locales/en.json");
const FR_TRANSLATIONS: &str = include_str!("../../locales/fr.json");

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::French => "Français",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::English => Self::French,
            Self::French => Self::English,
        }
    }
}

type Table = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct Locale {
    language: Language,
    table: Arc<Table>,
    fallback: Arc<Table>,
}

impl Locale {
    pub fn new(language: Language) -> Self {
        let fallback = Arc::new(parse_table(Language::English, EN_TRANSLATIONS));
        let table = match language {
            Language::English => fallback.clone(),
            Language::French => Arc::new(parse_table(Language::French, FR_TRANSLATIONS)),
        };

        Self {
            language,
            table,
            fallback,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Translation for `key`, if either the active language or English has one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.table
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
    }

    /// Translation for `key`, or the key itself when no language has it.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Translation with `{name}` placeholders substituted.
    pub fn tf(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.t(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
    }
}

fn parse_table(language: Language, source: &str) -> Table {
    serde_json::from_str(source).unwrap_or_else(|e| {
        tracing::error!("Invalid {} translations: {}", language.code(), e);
        Table::new()
    })
}
