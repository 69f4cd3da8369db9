//! Ordered pattern groups.
//!
//! An explicit `ai:`/`gpt` prefix is checked first and addresses the model like a command.
//! Then groups are tried in a fixed order (weather, rates, news, holidays, wiki) and the first
//! group with a matching pattern decides the intent; inside a group the first matching pattern
//! wins. Text that matches no group but mentions a currency becomes a rates request.

use lazy_regex::{lazy_regex, Lazy};
use regex::{Captures, Regex};
use serde::Serialize;

use crate::country::default_country;
use crate::currency::{rate_pair, resolve_currency};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Intent {
    None,
    Weather {
        city: Option<String>,
    },
    Rates {
        from: String,
        to: String,
    },
    News {
        country: String,
        topic: Option<String>,
    },
    Holidays {
        country: String,
        year: Option<i32>,
    },
    Wiki {
        title: String,
    },
    Ai {
        prompt: String,
    },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::None => "none",
            Intent::Weather { .. } => "weather",
            Intent::Rates { .. } => "rates",
            Intent::News { .. } => "news",
            Intent::Holidays { .. } => "holidays",
            Intent::Wiki { .. } => "wiki",
            Intent::Ai { .. } => "ai",
        }
    }
}

static WEATHER: [&Lazy<Regex>; 4] = [&WEATHER_EN, &WEATHER_EN_QUESTION, &WEATHER_UK_RU, &WEATHER_UK_RU_QUESTION];
static WEATHER_EN: Lazy<Regex> = lazy_regex!(
    r"(?i)^\s*(?:weather|forecast)(?:\s+forecast)?(?:\s+(?:for\s+)?(?:today|tonight|tomorrow|now))?(?:\s+(?:in|for|at))?(?:\s+(?P<city>[^?!.]+?))?(?:\s+(?:today|tonight|tomorrow|now))?\s*[?!.]*$"
);
static WEATHER_EN_QUESTION: Lazy<Regex> = lazy_regex!(
    r"(?i)^\s*(?:what(?:'s|\s+is)|how(?:'s|\s+is))\s+the\s+weather(?:\s+like)?(?:\s+(?:in|at)\s+(?P<city>[^?!.]+?))?(?:\s+today)?\s*[?!.]*$"
);
static WEATHER_UK_RU: Lazy<Regex> = lazy_regex!(
    r"(?i)^\s*(?:погода|прогноз\s+погоди|прогноз\s+погоды)(?:\s+(?:на\s+)?(?:зараз|сейчас|сьогодні|сегодня|завтра))?(?:\s+(?:в|у|на|для))?(?:\s+(?P<city>[^?!.]+?))?(?:\s+(?:на\s+)?(?:сьогодні|сегодня|завтра))?\s*[?!.]*$"
);
static WEATHER_UK_RU_QUESTION: Lazy<Regex> = lazy_regex!(
    r"(?i)^\s*(?:яка|какая)\s+(?:зараз\s+|сейчас\s+|сьогодні\s+|сегодня\s+)?погода(?:\s+(?:в|у|на)\s+(?P<city>[^?!.]+?))?\s*[?!.]*$"
);

static RATES: [&Lazy<Regex>; 2] = [&RATES_KEYWORD, &RATES_CONVERT];
static RATES_KEYWORD: Lazy<Regex> = lazy_regex!(
    r"(?i)\b(?:exchange\s+rates?|rates?|currenc(?:y|ies)|курс[иы]?|обмін|обмен|валют[аиы]?)\b"
);
static RATES_CONVERT: Lazy<Regex> = lazy_regex!(r"(?i)\b(?:convert|конвертуй|конвертируй)\b");

static NEWS: [&Lazy<Regex>; 3] = [&NEWS_EN, &NEWS_UK_RU, &NEWS_LATEST];
static NEWS_EN: Lazy<Regex> = lazy_regex!(
    r"(?i)^\s*(?:news|headlines)(?:\s+(?:about|on|for)\s+(?P<topic>[^?!.]+?))?\s*[?!.]*$"
);
static NEWS_UK_RU: Lazy<Regex> = lazy_regex!(
    r"(?i)^\s*(?:новини|новости)(?:\s+(?:про|о|об|по)\s+(?P<topic>[^?!.]+?))?\s*[?!.]*$"
);
static NEWS_LATEST: Lazy<Regex> = lazy_regex!(
    r"(?i)\b(?:latest|today'?s|top|останні|последние|свіжі|свежие)\s+(?:news|headlines|новини|новости)\b"
);

static HOLIDAYS: [&Lazy<Regex>; 2] = [&HOLIDAYS_EN, &HOLIDAYS_UK_RU];
static HOLIDAYS_EN: Lazy<Regex> = lazy_regex!(r"(?i)\b(?:public\s+)?holidays?\b");
static HOLIDAYS_UK_RU: Lazy<Regex> =
    lazy_regex!(r"(?i)\b(?:свята|свят|вихідні\s+дні|праздники|праздников|праздник)\b");
static YEAR: Lazy<Regex> = lazy_regex!(r"\b(?P<year>\d{4})\b");

static WIKI: [&Lazy<Regex>; 4] = [&WIKI_PREFIX, &WIKI_EN_QUESTION, &WIKI_UK, &WIKI_RU];
static WIKI_PREFIX: Lazy<Regex> =
    lazy_regex!(r"(?i)^\s*(?:wiki|wikipedia|вікі|вики)\s*:?\s+(?P<title>[^?!]+?)\s*[?!.]*$");
static WIKI_EN_QUESTION: Lazy<Regex> = lazy_regex!(
    r"(?i)^\s*(?:who|what)\s+(?:is|are|was|were)\s+(?P<title>[^?!]+?)\s*[?!.]*$"
);
static WIKI_UK: Lazy<Regex> = lazy_regex!(
    r"(?i)^\s*(?:хто|що)\s+(?:такий|така|таке|такі|це)\s+(?P<title>[^?!]+?)\s*[?!.]*$"
);
static WIKI_RU: Lazy<Regex> = lazy_regex!(
    r"(?i)^\s*(?:кто|что)\s+(?:такой|такая|такое|такие|это)\s+(?P<title>[^?!]+?)\s*[?!.]*$"
);

static AI: [&Lazy<Regex>; 2] = [&AI_PREFIX, &AI_GPT];
static AI_PREFIX: Lazy<Regex> = lazy_regex!(r"(?is)^\s*(?:ai|ші|ии)\s*[:,]\s*(?P<prompt>.+)$");
static AI_GPT: Lazy<Regex> = lazy_regex!(r"(?is)^\s*(?:chat\s*gpt|gpt)\b[\s:,]*(?P<prompt>.+)$");

fn first_match<'t>(patterns: &[&Lazy<Regex>], text: &'t str) -> Option<Captures<'t>> {
    patterns.iter().find_map(|re| re.captures(text))
}

fn named(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Classifies `text` for a user whose language is `lang` (an IETF tag such as "uk" or "en-US").
pub fn detect_intent(text: &str, lang: &str) -> Intent {
    let text = text.trim();
    if text.is_empty() {
        return Intent::None;
    }

    if let Some(prompt) = first_match(&AI, text).and_then(|c| named(&c, "prompt")) {
        return Intent::Ai { prompt };
    }

    if let Some(caps) = first_match(&WEATHER, text) {
        return Intent::Weather {
            city: named(&caps, "city"),
        };
    }

    if first_match(&RATES, text).is_some() {
        let (from, to) = rate_pair(text, lang);
        return Intent::Rates { from, to };
    }

    if let Some(caps) = first_match(&NEWS, text) {
        return Intent::News {
            country: default_country(lang).to_string(),
            topic: named(&caps, "topic"),
        };
    }

    if first_match(&HOLIDAYS, text).is_some() {
        let year = YEAR
            .captures(text)
            .and_then(|c| c.name("year"))
            .and_then(|m| m.as_str().parse().ok());
        return Intent::Holidays {
            country: default_country(lang).to_string(),
            year,
        };
    }

    if let Some(title) = first_match(&WIKI, text).and_then(|c| named(&c, "title")) {
        return Intent::Wiki { title };
    }

    if resolve_currency(text).is_some() {
        let (from, to) = rate_pair(text, lang);
        return Intent::Rates { from, to };
    }

    Intent::None
}
