//! Intent classification for free-text requests.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::CityLexicon;

/// Phrases asking for the supported city list.
static CITY_LIST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(지원\s*도시|도시\s*목록|지원\s*목록|도시\s*리스트|목록\s*보여)")
        .expect("city list pattern is valid")
});

/// What a free-text request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Nothing but whitespace.
    Empty,
    /// The list of supported cities.
    ListCities,
    /// The current observation for a city.
    CurrentWeather {
        /// Canonical city name.
        city: String,
    },
}

impl Intent {
    /// Classify `text`, falling back to `default_city` when no city is named.
    pub fn classify(text: &str, lexicon: &dyn CityLexicon, default_city: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::Empty;
        }

        if CITY_LIST_PATTERN.is_match(text) {
            return Self::ListCities;
        }

        let city = lexicon
            .resolve(text)
            .unwrap_or_else(|| default_city.to_string());
        Self::CurrentWeather { city }
    }
}
