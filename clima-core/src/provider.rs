use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;
use crate::model::{Coordinates, CurrentReport, ForecastReport, ForecastSlot};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const FORECAST_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Fixed per request, exactly as the app hardcodes them: metric units,
// Spanish descriptions.
const UNITS: &str = "metric";
const LANG: &str = "es";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the three OpenWeather endpoint shapes the app uses.
///
/// One GET per call, no retry, no backoff. Every request carries the fixed
/// `units`/`lang` pair and the API key.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { api_key, http, base_url: DEFAULT_BASE_URL.to_string() })
    }

    #[cfg(test)]
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            http: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Current weather at a fix (home screen).
    pub async fn current_by_coords(&self, at: Coordinates) -> Result<CurrentReport, FetchError> {
        debug!(lat = at.latitude, lon = at.longitude, "fetching current weather by coordinates");

        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();
        let parsed: OwCurrent = self
            .get_json(
                "/data/2.5/weather",
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", UNITS),
                    ("lang", LANG),
                ],
            )
            .await?;

        Ok(parsed.into_report())
    }

    /// Current weather for a city name (search screen). The name must
    /// already be trimmed and non-empty; blank queries are rejected before
    /// a request is ever built.
    pub async fn current_by_city(&self, city: &str) -> Result<CurrentReport, FetchError> {
        debug!(city, "fetching current weather by city name");

        let parsed: OwCurrent = self
            .get_json(
                "/data/2.5/weather",
                &[
                    ("q", city),
                    ("appid", self.api_key.as_str()),
                    ("units", UNITS),
                    ("lang", LANG),
                ],
            )
            .await?;

        Ok(parsed.into_report())
    }

    /// 5-day / 3-hour forecast at a fix, consumed by both the forecast and
    /// hourly screens.
    pub async fn forecast_by_coords(&self, at: Coordinates) -> Result<ForecastReport, FetchError> {
        debug!(lat = at.latitude, lon = at.longitude, "fetching 5-day forecast");

        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();
        let parsed: OwForecast = self
            .get_json(
                "/data/2.5/forecast",
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", UNITS),
                    ("lang", LANG),
                ],
            )
            .await?;

        parsed.into_report()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self.http.get(&url).query(query).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::CityNotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Api { status: status.as_u16(), body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

// Private wire mirrors of the provider JSON, mapped into domain models at
// the boundary.

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize, Default)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    name: String,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
}

impl OwCurrent {
    fn into_report(self) -> CurrentReport {
        let (group, description, icon) = first_condition(self.weather);

        CurrentReport {
            city: self.name,
            country: self.sys.country.unwrap_or_default(),
            temperature_c: self.main.temp,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            group,
            description,
            icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
}

impl OwForecastEntry {
    fn into_slot(self) -> Result<ForecastSlot, FetchError> {
        let stamp = NaiveDateTime::parse_from_str(&self.dt_txt, FORECAST_STAMP_FORMAT)?;
        let (group, description, icon) = first_condition(self.weather);

        Ok(ForecastSlot {
            stamp,
            temperature_c: self.main.temp,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            group,
            description,
            icon,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecast {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

impl OwForecast {
    fn into_report(self) -> Result<ForecastReport, FetchError> {
        let slots = self
            .list
            .into_iter()
            .map(OwForecastEntry::into_slot)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ForecastReport { city: self.city.name, country: self.city.country, slots })
    }
}

fn first_condition(weather: Vec<OwCondition>) -> (String, String, String) {
    match weather.into_iter().next() {
        Some(c) => (c.main, c.description, c.icon),
        None => ("Unknown".to_string(), "desconocido".to_string(), String::new()),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
