//! Display language.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language code: {code}")]
pub struct InvalidLanguage {
    code: String,
}

/// The language results are requested and displayed in.
///
/// The backend localizes country names and booking links, so the active
/// language travels with every lookup and route request as `?lang=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Primary language (`ru`).
    #[default]
    #[serde(rename = "ru")]
    Russian,
    /// Secondary language (`en`).
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Returns the wire code sent to the backend.
    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
        }
    }

    /// Returns the other language.
    pub fn toggle(self) -> Self {
        match self {
            Language::Russian => Language::English,
            Language::English => Language::Russian,
        }
    }
}

impl FromStr for Language {
    type Err = InvalidLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Russian),
            "en" => Ok(Language::English),
            _ => Err(InvalidLanguage {
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}
