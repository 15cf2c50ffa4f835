//! Daily weather forecasts from the Open-Meteo API

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::PlannerError;
use crate::config::{HttpConfig, WeatherConfig};
use crate::models::{Coordinates, DailyForecast, weather_code_to_description};

/// Source of per-day forecasts for a coordinate
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// One forecast record per requested day, ordered 1..=days
    async fn fetch_daily(
        &self,
        center: Coordinates,
        days: u32,
    ) -> Result<Vec<DailyForecast>, PlannerError>;
}

/// Open-Meteo forecast API client (no API key required)
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

/// Forecast response from Open-Meteo
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

/// Daily weather arrays from Open-Meteo; entries within a row may be null
#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Option<Vec<Option<f64>>>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Option<Vec<Option<f64>>>,
    #[serde(rename = "precipitation_sum")]
    precipitation: Option<Vec<Option<f64>>>,
    #[serde(rename = "weathercode")]
    weather_code: Option<Vec<Option<i64>>>,
}

impl OpenMeteoClient {
    /// Create a new client
    pub fn new(http: &HttpConfig, config: &WeatherConfig) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_seconds.into()))
            .user_agent(http.user_agent.clone())
            .build()
            .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    #[tracing::instrument(skip(self), fields(center = %center.format_coordinates()))]
    async fn fetch_daily(
        &self,
        center: Coordinates,
        days: u32,
    ) -> Result<Vec<DailyForecast>, PlannerError> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&daily=temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode&timezone=auto&forecast_days={}",
            self.base_url, center.latitude, center.longitude, days
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PlannerError::upstream(format!("Weather request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::upstream(format!(
                "Weather API error {status}: {body}"
            )));
        }

        let forecast_response: ForecastResponse = response.json().await.map_err(|e| {
            PlannerError::upstream(format!("Failed to parse Open-Meteo forecast response: {e}"))
        })?;

        let forecasts = daily_forecasts(&forecast_response, days);
        info!(
            "Retrieved {}-day forecast for {}",
            forecasts.len(),
            center.format_coordinates()
        );
        Ok(forecasts)
    }
}

/// Flatten the parallel Open-Meteo daily arrays into one record per day,
/// 1-based, with safe indexing and zero defaults for missing values
fn daily_forecasts(response: &ForecastResponse, days: u32) -> Vec<DailyForecast> {
    let Some(daily) = &response.daily else {
        return Vec::new();
    };

    let len = daily.time.len().min(days as usize);
    let mut forecasts = Vec::with_capacity(len);

    for i in 0..len {
        let date = NaiveDate::parse_from_str(&daily.time[i], "%Y-%m-%d").ok();

        let temp_max = value_at(&daily.temperature_max, i).unwrap_or(0.0);
        let temp_min = value_at(&daily.temperature_min, i).unwrap_or(0.0);
        let precipitation = value_at(&daily.precipitation, i).unwrap_or(0.0);
        let weather_code = value_at(&daily.weather_code, i).unwrap_or(0);

        forecasts.push(DailyForecast {
            day: i as u32 + 1,
            date,
            temp_max,
            temp_min,
            precipitation,
            weather_code,
            description: weather_code_to_description(weather_code).to_string(),
        });
    }

    forecasts
}

fn value_at<T: Copy>(column: &Option<Vec<Option<T>>>, index: usize) -> Option<T> {
    column.as_ref().and_then(|values| values.get(index).copied().flatten())
}
