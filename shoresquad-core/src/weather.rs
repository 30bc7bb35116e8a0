use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Coordinate, ForecastDay};

/// Number of forecast days requested and rendered.
pub const FORECAST_DAYS: u8 = 3;

const WEATHER_API_BASE: &str = "https://api.weatherapi.com";

/// Client for the WeatherAPI.com forecast endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::new_with_base_url(api_key, WEATHER_API_BASE)
    }

    pub fn new_with_base_url(api_key: String, base_url: &str) -> Self {
        Self { api_key, http: Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// Fetch the [`FORECAST_DAYS`]-day forecast for a coordinate.
    pub async fn forecast(&self, location: Coordinate) -> Result<Vec<ForecastDay>> {
        let url = format!("{}/v1/forecast.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", &location.as_query()),
                ("days", &FORECAST_DAYS.to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to WeatherAPI.com (forecast)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read WeatherAPI forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "WeatherAPI forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: WaForecastResponse =
            serde_json::from_str(&body).context("Failed to parse WeatherAPI forecast JSON")?;

        if parsed.forecast.forecastday.is_empty() {
            return Err(anyhow!("WeatherAPI response contained no forecastday data"));
        }

        Ok(parsed.forecast.forecastday.into_iter().map(ForecastDay::from).collect())
    }
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    maxwind_kph: f64,
    totalprecip_mm: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    forecast: WaForecast,
}

impl From<WaForecastDay> for ForecastDay {
    fn from(wa: WaForecastDay) -> Self {
        ForecastDay {
            date: wa.date,
            max_temp_c: wa.day.maxtemp_c,
            min_temp_c: wa.day.mintemp_c,
            max_wind_kph: wa.day.maxwind_kph,
            total_precip_mm: wa.day.totalprecip_mm,
            condition_text: wa.day.condition.text,
            condition_icon_url: wa.day.condition.icon,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
