//! Country directory entries.

use serde::{Deserialize, Serialize};

use super::{Coordinates, Language};

/// A supported country and its plate format, as listed by `/countries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// Two-letter ISO code, uppercase.
    pub country_code: String,
    pub country_name: String,

    #[serde(default)]
    pub country_name_en: Option<String>,

    pub pattern: String,

    #[serde(default)]
    pub allowed_letters: String,

    pub lat: f64,
    pub lng: f64,

    #[serde(default)]
    pub flag_emoji: Option<String>,
}

impl Country {
    /// Approximate centre of the country, usable as a manual route origin.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Display name in the requested language, falling back to the primary name.
    pub fn name_in(&self, language: Language) -> &str {
        match (language, &self.country_name_en) {
            (Language::English, Some(en)) => en,
            _ => &self.country_name,
        }
    }
}

/// Find a country by its code, ignoring case.
pub fn find_country<'a>(countries: &'a [Country], code: &str) -> Option<&'a Country> {
    let code = code.trim();
    countries
        .iter()
        .find(|c| c.country_code.eq_ignore_ascii_case(code))
}
