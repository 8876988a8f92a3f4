//! City name lookup.

/// Maps free text to a canonical city name.
pub trait CityLexicon: Send + Sync {
    /// Find the first city mentioned in `text`.
    fn resolve(&self, text: &str) -> Option<String>;

    /// Canonical names of every city this lexicon knows.
    fn supported(&self) -> Vec<String>;
}

/// The eight Korean metropolitan cities covered by the KMA nowcast server.
const METRO_CITIES: &[&str] = &["서울", "부산", "대구", "인천", "광주", "대전", "울산", "세종"];

/// Administrative long forms, checked before the bare names.
const METRO_ALIASES: &[(&str, &str)] = &[
    ("서울시", "서울"),
    ("서울특별시", "서울"),
    ("부산시", "부산"),
    ("부산광역시", "부산"),
    ("대구시", "대구"),
    ("대구광역시", "대구"),
    ("인천시", "인천"),
    ("인천광역시", "인천"),
    ("광주시", "광주"),
    ("광주광역시", "광주"),
    ("대전시", "대전"),
    ("대전광역시", "대전"),
    ("울산시", "울산"),
    ("울산광역시", "울산"),
    ("세종시", "세종"),
    ("세종특별자치시", "세종"),
];

/// Fixed lexicon of Korean metropolitan cities and their aliases.
#[derive(Debug, Clone, Copy, Default)]
pub struct KoreanMetroLexicon;

impl CityLexicon for KoreanMetroLexicon {
    fn resolve(&self, text: &str) -> Option<String> {
        let text = text.trim();

        METRO_ALIASES
            .iter()
            .find(|(alias, _)| text.contains(alias))
            .map(|(_, city)| *city)
            .or_else(|| METRO_CITIES.iter().copied().find(|city| text.contains(city)))
            .map(str::to_string)
    }

    fn supported(&self) -> Vec<String> {
        METRO_CITIES.iter().map(|c| c.to_string()).collect()
    }
}
