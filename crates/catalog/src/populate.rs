//! The SQL transformations deriving the star schema from the staging
//! tables. Statement order is load-bearing: the time dimension must exist
//! before the fact tables reference it, and both fact tables must exist
//! before the view joins them.

use crate::CatalogConfig;

/// Weather epochs arrive as seconds since epoch in GMT; trips arrive as
/// naive timestamps. Both end up in the configured local time zone.
fn weather_ts_expr(timezone: &str) -> String {
    format!(
        "CONVERT_TIMEZONE('GMT', '{timezone}', TIMESTAMP 'epoch' + valid_time_gmt * INTERVAL '1 second')"
    )
}

fn populate_time_table(timezone: &str) -> String {
    format!(
        "INSERT INTO time_table (ts, hour, day, week, month, year, weekday)\n\
         SELECT ts,\n\
        \x20       EXTRACT(hour FROM ts),\n\
        \x20       EXTRACT(day FROM ts),\n\
        \x20       EXTRACT(week FROM ts),\n\
        \x20       EXTRACT(month FROM ts),\n\
        \x20       EXTRACT(year FROM ts),\n\
        \x20       EXTRACT(dow FROM ts)\n\
         FROM (\n\
        \x20    SELECT CONVERT_TIMEZONE('{timezone}', tpep_pickup_datetime) AS ts FROM staging_taxi\n\
        \x20    UNION\n\
        \x20    SELECT CONVERT_TIMEZONE('{timezone}', tpep_dropoff_datetime) FROM staging_taxi\n\
        \x20    UNION\n\
        \x20    SELECT {weather_ts} FROM staging_weather\n\
         ) timestamps;",
        timezone = timezone,
        weather_ts = weather_ts_expr(timezone),
    )
}

fn populate_taxi_facts(timezone: &str) -> String {
    format!(
        "INSERT INTO taxi_facts (pickup_ts, dropoff_ts, pickup_location_id, dropoff_location_id, trip_distance, fare_amount, paid_amount)\n\
         SELECT CONVERT_TIMEZONE('{timezone}', tpep_pickup_datetime),\n\
        \x20       CONVERT_TIMEZONE('{timezone}', tpep_dropoff_datetime),\n\
        \x20       pulocationid,\n\
        \x20       dolocationid,\n\
        \x20       trip_distance,\n\
        \x20       fare_amount,\n\
        \x20       total_amount\n\
         FROM staging_taxi\n\
         WHERE fare_amount >= 0 AND total_amount >= 0;"
    )
}

fn populate_weather_facts(timezone: &str) -> String {
    format!(
        "INSERT INTO weather_facts (ts, temperature, dewpoint_temperature, relative_humidity, pressure, windspeed, precipitation, feels_like, classification)\n\
         SELECT {weather_ts},\n\
        \x20       temp,\n\
        \x20       dewpt,\n\
        \x20       rh,\n\
        \x20       pressure,\n\
        \x20       wspd,\n\
        \x20       precip_hrly,\n\
        \x20       feels_like,\n\
        \x20       wx_phrase\n\
         FROM staging_weather;",
        weather_ts = weather_ts_expr(timezone),
    )
}

/// One row per trip, paired with the weather observation nearest its pickup
/// time. Candidates are limited to ±1 hour; ties on absolute distance are
/// broken by the row numbering, keeping exactly one winner per trip. Trips
/// with no observation in the window produce no row.
fn create_taxi_weather_view() -> String {
    "CREATE VIEW taxi_weather_facts AS\n\
     SELECT trip_id,\n\
    \x20       pickup_ts,\n\
    \x20       dropoff_ts,\n\
    \x20       pickup_location_id,\n\
    \x20       dropoff_location_id,\n\
    \x20       trip_distance,\n\
    \x20       fare_amount,\n\
    \x20       paid_amount,\n\
    \x20       weather_ts,\n\
    \x20       temperature,\n\
    \x20       dewpoint_temperature,\n\
    \x20       relative_humidity,\n\
    \x20       pressure,\n\
    \x20       windspeed,\n\
    \x20       precipitation,\n\
    \x20       feels_like,\n\
    \x20       classification\n\
     FROM (\n\
    \x20    SELECT t.trip_id,\n\
    \x20           t.pickup_ts,\n\
    \x20           t.dropoff_ts,\n\
    \x20           t.pickup_location_id,\n\
    \x20           t.dropoff_location_id,\n\
    \x20           t.trip_distance,\n\
    \x20           t.fare_amount,\n\
    \x20           t.paid_amount,\n\
    \x20           w.ts AS weather_ts,\n\
    \x20           w.temperature,\n\
    \x20           w.dewpoint_temperature,\n\
    \x20           w.relative_humidity,\n\
    \x20           w.pressure,\n\
    \x20           w.windspeed,\n\
    \x20           w.precipitation,\n\
    \x20           w.feels_like,\n\
    \x20           w.classification,\n\
    \x20           ROW_NUMBER() OVER (\n\
    \x20               PARTITION BY t.trip_id\n\
    \x20               ORDER BY ABS(DATEDIFF(second, t.pickup_ts, w.ts)) ASC\n\
    \x20           ) AS closeness_rank\n\
    \x20    FROM taxi_facts t\n\
    \x20    JOIN weather_facts w\n\
    \x20      ON w.ts BETWEEN DATEADD(hour, -1, t.pickup_ts) AND DATEADD(hour, 1, t.pickup_ts)\n\
     ) ranked\n\
     WHERE closeness_rank = 1;"
        .to_string()
}

pub(crate) fn statements(config: &CatalogConfig) -> Vec<String> {
    vec![
        populate_time_table(&config.timezone),
        populate_taxi_facts(&config.timezone),
        populate_weather_facts(&config.timezone),
        create_taxi_weather_view(),
    ]
}
