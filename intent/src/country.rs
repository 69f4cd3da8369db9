//! Language-default countries.

/// ISO 3166 alpha-2 country for news and holidays when the message names none.
///
/// Only the primary subtag of `lang` counts ("uk-UA" behaves as "uk"). Unknown languages map to `US`.
pub fn default_country(lang: &str) -> &'static str {
    match primary_subtag(lang).as_str() {
        "uk" => "UA",
        "ru" => "RU",
        "de" => "DE",
        "pl" => "PL",
        "fr" => "FR",
        "en" => "US",
        _ => "US",
    }
}

pub(crate) fn primary_subtag(lang: &str) -> String {
    lang.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}
