//! Open-data lookups behind the intent handler.
//!
//! - weather: Open-Meteo geocoding + current conditions
//! - rates: open.er-api.com latest rates
//! - news: NewsAPI top headlines (needs an API key)
//! - holidays: Nager.Date public holidays
//! - wiki: Wikipedia REST page summary

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::LookupEndpoints;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_HEADLINES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub place: String,
    pub country: Option<String>,
    pub temperature_c: f64,
    pub wind_kmh: f64,
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateQuote {
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub title: String,
    pub url: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: String,
    #[serde(rename = "localName")]
    pub local_name: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WikiSummary {
    pub title: String,
    pub extract: String,
    pub url: Option<String>,
}

#[async_trait]
pub trait Lookup: Send + Sync {
    async fn weather(&self, city: &str) -> Result<WeatherReport>;
    async fn rates(&self, from: &str, to: &str) -> Result<RateQuote>;
    async fn news(&self, country: &str, topic: Option<&str>) -> Result<Vec<Headline>>;
    /// `year = None` means the current year.
    async fn holidays(&self, country: &str, year: Option<i32>) -> Result<Vec<Holiday>>;
    async fn wiki(&self, title: &str, lang: &str) -> Result<WikiSummary>;
}

#[derive(Clone)]
pub struct HttpLookup {
    client: Client,
    endpoints: LookupEndpoints,
}

impl HttpLookup {
    pub fn new(endpoints: LookupEndpoints) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("hookbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, endpoints })
    }

    /// `base` joined with path segments, each percent-encoded.
    fn url(base: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(base).with_context(|| format!("Invalid base URL: {base}"))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Base URL cannot have a path: {base}"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T> {
        debug!(url = %url, "Lookup request");
        let response = self.client.get(url.clone()).query(query).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Lookup API error ({status}) for {}: {body}", url.path());
        }
        Ok(response.json().await?)
    }
}

#[derive(Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeoPlace>,
}

#[derive(Deserialize)]
struct GeoPlace {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct ForecastResponse {
    current: CurrentWeather,
}

#[derive(Deserialize)]
struct CurrentWeather {
    temperature_2m: f64,
    wind_speed_10m: f64,
    #[serde(default)]
    weather_code: i32,
}

#[derive(Deserialize)]
struct RatesResponse {
    result: String,
    #[serde(default)]
    rates: std::collections::HashMap<String, f64>,
    time_last_update_utc: Option<String>,
}

#[derive(Deserialize)]
struct NewsResponse {
    status: String,
    #[serde(default)]
    articles: Vec<NewsArticle>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct NewsArticle {
    title: Option<String>,
    url: Option<String>,
    source: Option<NewsSource>,
}

#[derive(Deserialize)]
struct NewsSource {
    name: Option<String>,
}

#[derive(Deserialize)]
struct WikiResponse {
    title: String,
    #[serde(default)]
    extract: String,
    content_urls: Option<WikiContentUrls>,
}

#[derive(Deserialize)]
struct WikiContentUrls {
    desktop: Option<WikiPage>,
}

#[derive(Deserialize)]
struct WikiPage {
    page: Option<String>,
}

#[async_trait]
impl Lookup for HttpLookup {
    #[instrument(skip(self))]
    async fn weather(&self, city: &str) -> Result<WeatherReport> {
        let url = Self::url(&self.endpoints.geocoding, &["v1", "search"])?;
        let geo: GeocodingResponse = self
            .get_json(
                url,
                &[("name", city.to_string()), ("count", "1".to_string())],
            )
            .await?;
        let place = geo
            .results
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Place not found: {city}"))?;

        let url = Self::url(&self.endpoints.forecast, &["v1", "forecast"])?;
        let forecast: ForecastResponse = self
            .get_json(
                url,
                &[
                    ("latitude", place.latitude.to_string()),
                    ("longitude", place.longitude.to_string()),
                    (
                        "current",
                        "temperature_2m,wind_speed_10m,weather_code".to_string(),
                    ),
                ],
            )
            .await?;

        Ok(WeatherReport {
            place: place.name,
            country: place.country,
            temperature_c: forecast.current.temperature_2m,
            wind_kmh: forecast.current.wind_speed_10m,
            weather_code: forecast.current.weather_code,
        })
    }

    #[instrument(skip(self))]
    async fn rates(&self, from: &str, to: &str) -> Result<RateQuote> {
        let url = Self::url(&self.endpoints.rates, &["v6", "latest", from])?;
        let body: RatesResponse = self.get_json(url, &[]).await?;
        if body.result != "success" {
            bail!("Rates API returned result={}", body.result);
        }
        let rate = *body
            .rates
            .get(to)
            .ok_or_else(|| anyhow!("No {to} rate for base {from}"))?;
        Ok(RateQuote {
            from: from.to_string(),
            to: to.to_string(),
            rate,
            updated: body.time_last_update_utc,
        })
    }

    #[instrument(skip(self))]
    async fn news(&self, country: &str, topic: Option<&str>) -> Result<Vec<Headline>> {
        let api_key = self
            .endpoints
            .news_api_key
            .clone()
            .ok_or_else(|| anyhow!("News API key is not configured"))?;
        let url = Self::url(&self.endpoints.news, &["v2", "top-headlines"])?;
        let mut query = vec![
            ("country", country.to_ascii_lowercase()),
            ("pageSize", MAX_HEADLINES.to_string()),
            ("apiKey", api_key),
        ];
        if let Some(topic) = topic {
            query.push(("q", topic.to_string()));
        }
        let body: NewsResponse = self.get_json(url, &query).await?;
        if body.status != "ok" {
            bail!(
                "News API returned status={}: {}",
                body.status,
                body.message.unwrap_or_default()
            );
        }
        Ok(body
            .articles
            .into_iter()
            .filter_map(|a| {
                Some(Headline {
                    title: a.title?,
                    url: a.url?,
                    source: a.source.and_then(|s| s.name),
                })
            })
            .take(MAX_HEADLINES)
            .collect())
    }

    #[instrument(skip(self))]
    async fn holidays(&self, country: &str, year: Option<i32>) -> Result<Vec<Holiday>> {
        let year = year.unwrap_or_else(|| Utc::now().year()).to_string();
        let url = Self::url(
            &self.endpoints.holidays,
            &["api", "v3", "PublicHolidays", &year, country],
        )?;
        self.get_json(url, &[]).await
    }

    #[instrument(skip(self))]
    async fn wiki(&self, title: &str, lang: &str) -> Result<WikiSummary> {
        let base = self.endpoints.wiki.replace("{lang}", lang);
        let page = title.trim().replace(' ', "_");
        let url = Self::url(&base, &["api", "rest_v1", "page", "summary", &page])?;
        let body: WikiResponse = self.get_json(url, &[]).await?;
        Ok(WikiSummary {
            title: body.title,
            extract: body.extract,
            url: body.content_urls.and_then(|c| c.desktop).and_then(|d| d.page),
        })
    }
}
