use crate::error::StagerError;
use chrono::NaiveDate;
use common::config::WeatherApiConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// One hourly observation as the weather API reports it. Field names match
/// the API payload so the staged CSV header mirrors the upstream schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub valid_time_gmt: i64,
    pub temp: Option<i64>,
    #[serde(rename = "dewPt")]
    pub dew_pt: Option<i64>,
    pub rh: Option<i64>,
    pub pressure: Option<f64>,
    pub wspd: Option<i64>,
    pub precip_hrly: Option<f64>,
    pub feels_like: Option<i64>,
    pub wx_phrase: Option<String>,
}

#[derive(Deserialize)]
struct ObservationsResponse {
    observations: Vec<WeatherObservation>,
}

pub struct WeatherApiClient {
    http: Client,
    base_url: String,
    api_key: String,
    station: String,
    units: String,
}

impl WeatherApiClient {
    pub fn new(config: &WeatherApiConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            station: config.station.clone(),
            units: config.units.clone(),
        }
    }

    /// Fetch every observation recorded on `day` (start and end date are
    /// the same request parameter; the API paginates by day).
    pub async fn observations_for_day(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<WeatherObservation>, StagerError> {
        let date = day.format("%Y%m%d").to_string();
        let url = format!(
            "{}/v1/location/{}/observations/historical.json",
            self.base_url, self.station
        );
        let response = self
            .http
            .get(&url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("units", self.units.as_str()),
                ("startDate", date.as_str()),
                ("endDate", date.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StagerError::fetch(format!(
                "weather API returned {} for {day}",
                response.status()
            )));
        }

        let body: ObservationsResponse = response.json().await?;
        Ok(body.observations)
    }
}

/// Serialize observations to CSV with a header row, ready for a COPY with
/// IGNOREHEADER 1.
pub fn to_csv(observations: &[WeatherObservation]) -> Result<Vec<u8>, StagerError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for observation in observations {
        writer.serialize(observation)?;
    }
    writer
        .into_inner()
        .map_err(|e| StagerError::decode(e.to_string()))
}
