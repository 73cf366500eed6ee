//! Upstream staging: fetches weather observations and taxi trip data and
//! deposits them as CSV objects under the key prefixes the warehouse's
//! bulk loader copies from.
//!
//! Every unit of work is idempotent: re-fetching a day or month simply
//! overwrites the same destination key, so a failed staging run is
//! re-run from the start, like the pipeline itself. No retry/backoff;
//! upstream errors surface immediately.

pub mod error;
pub mod taxi;
pub mod weather;

pub use error::StagerError;

use common::config::{PipelineConfig, RunWindow};
use shared_clients::blob::BlobStore;
use taxi::TripDataClient;
use tracing::info;
use weather::WeatherApiClient;

pub struct Stager {
    store: BlobStore,
    weather: WeatherApiClient,
    trips: TripDataClient,
    window: RunWindow,
}

impl Stager {
    pub fn new(config: &PipelineConfig, store: BlobStore) -> Self {
        Self {
            store,
            weather: WeatherApiClient::new(&config.weather_api),
            trips: TripDataClient::new(taxi::DEFAULT_TRIP_DATA_BASE_URL),
            window: config.run.clone(),
        }
    }

    pub fn with_trip_client(mut self, trips: TripDataClient) -> Self {
        self.trips = trips;
        self
    }

    pub async fn stage_all(&self) -> Result<(), StagerError> {
        self.stage_weather().await?;
        self.stage_trips().await?;
        self.stage_zone_lookup().await?;
        Ok(())
    }

    /// One CSV object per day in the window, keyed
    /// `raw/weather/<city>/<start>-<end>/day_<n>.csv` with n starting at 1.
    pub async fn stage_weather(&self) -> Result<(), StagerError> {
        let label = self.window.label();
        for (position, day) in self.window.days().enumerate() {
            let observations = self.weather.observations_for_day(day).await?;
            info!(%day, count = observations.len(), "staging weather observations");
            let body = weather::to_csv(&observations)?;
            let key = format!(
                "raw/weather/{}/{}/day_{}.csv",
                self.window.city,
                label,
                position + 1
            );
            self.store.put(&key, body.into()).await?;
        }
        Ok(())
    }

    /// One converted CSV object per month the window touches, keyed
    /// `raw/taxi/<city>/trips/<file>.csv`.
    pub async fn stage_trips(&self) -> Result<(), StagerError> {
        for (year, month) in self.window.months() {
            info!(year, month, "staging trip data");
            let parquet = self.trips.fetch_month(year, month).await?;
            let body = taxi::parquet_to_csv(parquet)?;
            let key = format!(
                "raw/taxi/{}/trips/{}.csv",
                self.window.city,
                TripDataClient::trip_file_stem(year, month)
            );
            self.store.put(&key, body.into()).await?;
        }
        Ok(())
    }

    /// The zone lookup is already CSV; relay it unchanged.
    pub async fn stage_zone_lookup(&self) -> Result<(), StagerError> {
        info!("staging taxi zone lookup");
        let body = self.trips.fetch_zone_lookup().await?;
        let key = format!("raw/taxi/{}/taxi_zone_lookup.csv", self.window.city);
        self.store.put(&key, body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{StorageConfig, WarehouseConnection, WeatherApiConfig};
    use wiremock::matchers::{method, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(weather_base: &str) -> PipelineConfig {
        PipelineConfig {
            warehouse: WarehouseConnection {
                host: "localhost".into(),
                database: "analytics".into(),
                user: "etl".into(),
                password: "etl".into(),
                port: 5439,
            },
            storage: StorageConfig {
                bucket: "trip-staging".into(),
                region: "us-east-1".into(),
                access_key_id: "AKIAEXAMPLE".into(),
                secret_access_key: "secret".into(),
            },
            run: RunWindow {
                city: "New_York".into(),
                start_date: "2021-01-01".parse().unwrap(),
                end_date: "2021-01-02".parse().unwrap(),
                timezone: "America/New_York".into(),
            },
            weather_api: WeatherApiConfig {
                base_url: weather_base.to_string(),
                api_key: "test-key".into(),
                station: "KLGA:9:US".into(),
                units: "m".into(),
            },
        }
    }

    const DAY_BODY: &str = r#"{"observations": [
        {"valid_time_gmt": 1609459200, "temp": 4, "dewPt": -2, "rh": 65,
         "pressure": 1017.2, "wspd": 13, "precip_hrly": 0.0,
         "feels_like": 1, "wx_phrase": "Cloudy"}
    ]}"#;

    #[tokio::test]
    async fn stages_one_weather_object_per_day() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/location/.*/observations/historical\.json$"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DAY_BODY))
            .mount(&server)
            .await;

        let store = BlobStore::in_memory("trip-staging");
        let stager = Stager::new(&test_config(&server.uri()), store.clone());
        stager.stage_weather().await.unwrap();

        let keys = store.list_keys("raw/weather/New_York").await.unwrap();
        assert_eq!(
            keys,
            vec![
                "raw/weather/New_York/2021-01-01-2021-01-02/day_1.csv",
                "raw/weather/New_York/2021-01-01-2021-01-02/day_2.csv",
            ]
        );

        let body = store.get(&keys[0]).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("valid_time_gmt,temp,dewPt"));
        assert!(text.contains("1609459200,4,-2,65,1017.2,13,0.0,1,Cloudy"));
    }

    #[tokio::test]
    async fn weather_requests_cover_each_day_once() {
        let server = MockServer::start().await;
        for date in ["20210101", "20210102"] {
            Mock::given(method("GET"))
                .and(query_param("startDate", date))
                .and(query_param("endDate", date))
                .respond_with(ResponseTemplate::new(200).set_body_string(DAY_BODY))
                .expect(1)
                .mount(&server)
                .await;
        }

        let store = BlobStore::in_memory("trip-staging");
        let stager = Stager::new(&test_config(&server.uri()), store);
        stager.stage_weather().await.unwrap();
        // Mock expectations verify on drop.
    }

    #[tokio::test]
    async fn zone_lookup_lands_next_to_but_outside_the_trip_prefix() {
        let weather = MockServer::start().await;
        let trips = MockServer::start().await;
        let lookup = "LocationID,Borough,Zone,service_zone\n1,EWR,Newark Airport,EWR\n";
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(lookup))
            .mount(&trips)
            .await;

        let store = BlobStore::in_memory("trip-staging");
        let stager = Stager::new(&test_config(&weather.uri()), store.clone())
            .with_trip_client(TripDataClient::new(&trips.uri()));
        stager.stage_zone_lookup().await.unwrap();

        let keys = store.list_keys("raw/taxi/New_York").await.unwrap();
        assert_eq!(keys, vec!["raw/taxi/New_York/taxi_zone_lookup.csv"]);
        assert!(store.list_keys("raw/taxi/New_York/trips").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_halts_staging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let store = BlobStore::in_memory("trip-staging");
        let stager = Stager::new(&test_config(&server.uri()), store.clone());
        let err = stager.stage_weather().await.unwrap_err();
        assert!(matches!(err, StagerError::Fetch { .. }));
        assert!(store.list_keys("raw/weather").await.unwrap().is_empty());
    }
}
