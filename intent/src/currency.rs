//! Currency vocabulary.
//!
//! Tokens are matched by plain substring containment on the lowercased text, so a token inside
//! a longer word also counts ("europe" resolves to EUR). When several tokens occur, the one
//! starting earliest in the text wins.

use crate::country::primary_subtag;

/// Words, stems and symbols in English, Ukrainian and Russian, mapped to ISO 4217 codes.
const VOCABULARY: &[(&str, &str)] = &[
    ("usd", "USD"),
    ("dollar", "USD"),
    ("долар", "USD"),
    ("доллар", "USD"),
    ("бакс", "USD"),
    ("$", "USD"),
    ("eur", "EUR"),
    ("євро", "EUR"),
    ("евро", "EUR"),
    ("€", "EUR"),
    ("uah", "UAH"),
    ("hryvn", "UAH"),
    ("грив", "UAH"),
    ("грн", "UAH"),
    ("₴", "UAH"),
    ("rub", "RUB"),
    ("рубл", "RUB"),
    ("₽", "RUB"),
    ("gbp", "GBP"),
    ("pound", "GBP"),
    ("фунт", "GBP"),
    ("£", "GBP"),
    ("pln", "PLN"),
    ("zloty", "PLN"),
    ("злот", "PLN"),
    ("zł", "PLN"),
    ("chf", "CHF"),
    ("franc", "CHF"),
    ("франк", "CHF"),
    ("jpy", "JPY"),
    ("yen", "JPY"),
    ("єн", "JPY"),
    ("иен", "JPY"),
    ("¥", "JPY"),
    ("cny", "CNY"),
    ("yuan", "CNY"),
    ("юан", "CNY"),
];

/// First currency mentioned in `text`, if any.
pub fn resolve_currency(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    VOCABULARY
        .iter()
        .filter_map(|(token, code)| lowered.find(token).map(|pos| (pos, *code)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, code)| code)
}

/// Quote currency for rates, chosen by language only.
pub fn target_currency(lang: &str) -> &'static str {
    match primary_subtag(lang).as_str() {
        "uk" => "UAH",
        "ru" => "RUB",
        _ => "USD",
    }
}

/// `(from, to)` for a rates request. `from` is the mentioned currency or USD; when that equals
/// the target it switches to EUR (target USD) or USD (any other target).
pub fn rate_pair(text: &str, lang: &str) -> (String, String) {
    let to = target_currency(lang);
    let mut from = resolve_currency(text).unwrap_or("USD");
    if from == to {
        from = if to == "USD" { "EUR" } else { "USD" };
    }
    (from.to_string(), to.to_string())
}
