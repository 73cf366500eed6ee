use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

/// Everything a pipeline run needs, loaded once from `pipeline.yml` and
/// passed into each component's constructor. Nothing here is process-wide
/// state; the value's lifetime is the run's lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub warehouse: WarehouseConnection,
    pub storage: StorageConfig,
    pub run: RunWindow,
    pub weather_api: WeatherApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConnection {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// The fixed date window a run operates on. The pipeline is full-refresh:
/// the window is closed on both ends and never advanced incrementally.
#[derive(Debug, Clone, Deserialize)]
pub struct RunWindow {
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl RunWindow {
    /// Every day in the window, inclusive on both ends.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
    }

    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// `<start>-<end>` segment used in weather object keys.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_date, self.end_date)
    }

    /// Distinct `(year, month)` pairs the window touches, in order. Trip
    /// data is published per month.
    pub fn months(&self) -> Vec<(i32, u32)> {
        use chrono::Datelike;
        let mut months = Vec::new();
        for day in self.days() {
            let ym = (day.year(), day.month());
            if months.last() != Some(&ym) {
                months.push(ym);
            }
        }
        months
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherApiConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    pub api_key: String,
    /// Observation station code, e.g. `KLGA:9:US` for LaGuardia.
    pub station: String,
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.weather.com".to_string()
}

fn default_units() -> String {
    "m".to_string()
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct PortVisitor;

    impl serde::de::Visitor<'_> for PortVisitor {
        type Value = u16;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer port value")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u16::try_from(value).map_err(|_| E::custom("port out of range"))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u16::try_from(value).map_err(|_| E::custom("port out of range"))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value.parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(PortVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> RunWindow {
        RunWindow {
            city: "New_York".into(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            timezone: default_timezone(),
        }
    }

    #[test]
    fn window_days_are_inclusive() {
        let w = window("2021-01-01", "2021-01-31");
        assert_eq!(w.num_days(), 31);
        assert_eq!(w.days().count(), 31);
        assert_eq!(w.label(), "2021-01-01-2021-01-31");
    }

    #[test]
    fn window_months_span_boundaries() {
        let w = window("2021-01-25", "2021-03-02");
        assert_eq!(w.months(), vec![(2021, 1), (2021, 2), (2021, 3)]);
    }

    #[test]
    fn single_day_window() {
        let w = window("2021-01-01", "2021-01-01");
        assert_eq!(w.num_days(), 1);
        assert_eq!(w.months(), vec![(2021, 1)]);
    }
}
