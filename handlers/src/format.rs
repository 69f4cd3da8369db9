//! Plain-text rendering of lookup results and stored state.

use chrono::{DateTime, Utc};
use providers::{Headline, Holiday, RateQuote, WeatherReport, WikiSummary};
use storage::{BrainNote, PhotoEntry};

const MAX_HOLIDAYS: usize = 12;
const MAX_EXTRACT_CHARS: usize = 900;
const MAX_LISTED_NOTES: usize = 5;

/// Emoji and short label for a WMO weather interpretation code.
fn weather_label(code: i32) -> (&'static str, &'static str) {
    match code {
        0 => ("☀️", "clear"),
        1..=3 => ("⛅", "partly cloudy"),
        45 | 48 => ("🌫", "fog"),
        51..=57 => ("🌦", "drizzle"),
        61..=67 | 80..=82 => ("🌧", "rain"),
        71..=77 | 85 | 86 => ("🌨", "snow"),
        95..=99 => ("⛈", "thunderstorm"),
        _ => ("🌡", "—"),
    }
}

pub(crate) fn weather(report: &WeatherReport) -> String {
    let (icon, label) = weather_label(report.weather_code);
    let place = match &report.country {
        Some(country) => format!("{}, {}", report.place, country),
        None => report.place.clone(),
    };
    format!(
        "{icon} {place}: {:.1}°C, {label}, 💨 {:.0} km/h",
        report.temperature_c, report.wind_kmh
    )
}

pub(crate) fn rate(quote: &RateQuote) -> String {
    format!("💱 1 {} = {:.4} {}", quote.from, quote.rate, quote.to)
}

pub(crate) fn headlines(items: &[Headline]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, h)| match &h.source {
            Some(source) => format!("{}. {} ({})\n{}", i + 1, h.title, source, h.url),
            None => format!("{}. {}\n{}", i + 1, h.title, h.url),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub(crate) fn holidays(items: &[Holiday]) -> String {
    items
        .iter()
        .take(MAX_HOLIDAYS)
        .map(|h| {
            if h.local_name == h.name {
                format!("📅 {} {}", h.date, h.name)
            } else {
                format!("📅 {} {} ({})", h.date, h.local_name, h.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn wiki(summary: &WikiSummary) -> String {
    let mut extract: String = summary.extract.chars().take(MAX_EXTRACT_CHARS).collect();
    if extract.len() < summary.extract.len() {
        extract.push('…');
    }
    match &summary.url {
        Some(url) => format!("📖 {}\n\n{}\n{}", summary.title, extract, url),
        None => format!("📖 {}\n\n{}", summary.title, extract),
    }
}

fn date(ts_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ts_ms)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub(crate) fn photos(entries: &[PhotoEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let label = p
                .caption
                .as_deref()
                .or(p.desc.as_deref())
                .unwrap_or("📷");
            format!("{}. {} – {}", i + 1, date(p.ts), label)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Count header plus the newest notes.
pub(crate) fn brain(header: &str, notes: &[BrainNote]) -> String {
    let mut out = format!("{header} {}", notes.len());
    for note in notes.iter().rev().take(MAX_LISTED_NOTES) {
        out.push_str(&format!("\n• {} {}", date(note.ts), note.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_line() {
        let report = WeatherReport {
            place: "Kyiv".into(),
            country: Some("Ukraine".into()),
            temperature_c: 21.46,
            wind_kmh: 12.2,
            weather_code: 0,
        };
        assert_eq!(weather(&report), "☀️ Kyiv, Ukraine: 21.5°C, clear, 💨 12 km/h");
    }

    #[test]
    fn test_wiki_truncates_long_extract() {
        let summary = WikiSummary {
            title: "T".into(),
            extract: "a".repeat(2000),
            url: None,
        };
        let text = wiki(&summary);
        assert!(text.ends_with('…'));
        assert!(text.chars().count() < 1000);
    }
}
