//! DDL for the staging and warehouse tables.
//!
//! Creation order matters: staging tables first, then the dimensions
//! (`taxi_locations`, `time_table`), then the fact tables that reference
//! them. Drops run in the exact reverse, with the derived view removed
//! before any table it reads.

pub const CREATE_STAGING_WEATHER: &str = r#"
CREATE TABLE IF NOT EXISTS staging_weather (
    valid_time_gmt bigint,
    temp int,
    dewpt int,
    rh int,
    pressure float,
    wspd int,
    precip_hrly float,
    feels_like int,
    wx_phrase varchar(255)
);
"#;

pub const CREATE_STAGING_TAXI: &str = r#"
CREATE TABLE IF NOT EXISTS staging_taxi (
    vendorid smallint,
    tpep_pickup_datetime timestamp,
    tpep_dropoff_datetime timestamp,
    passenger_count int,
    trip_distance float,
    ratecodeid int,
    store_and_fwd_flag char(1),
    pulocationid int,
    dolocationid int,
    payment_type int,
    fare_amount float,
    extra float,
    mta_tax float,
    tip_amount float,
    tolls_amount float,
    improvement_surcharge float,
    total_amount float,
    congestion_surcharge float,
    airport_fee float
);
"#;

// Small lookup dimension; replicated to every slice for join locality.
pub const CREATE_TAXI_LOCATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS taxi_locations (
    location_id int PRIMARY KEY,
    borough varchar(255),
    zone varchar(255),
    service_zone varchar(255)
) DISTSTYLE ALL;
"#;

pub const CREATE_TIME_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS time_table (
    ts timestamp PRIMARY KEY,
    hour int,
    day int,
    week int,
    month int,
    year int,
    weekday int
);
"#;

pub const CREATE_TAXI_FACTS: &str = r#"
CREATE TABLE IF NOT EXISTS taxi_facts (
    trip_id bigint IDENTITY(0, 1) PRIMARY KEY,
    pickup_ts timestamp REFERENCES time_table (ts),
    dropoff_ts timestamp REFERENCES time_table (ts),
    pickup_location_id int REFERENCES taxi_locations (location_id),
    dropoff_location_id int REFERENCES taxi_locations (location_id),
    trip_distance float,
    fare_amount float,
    paid_amount float
);
"#;

pub const CREATE_WEATHER_FACTS: &str = r#"
CREATE TABLE IF NOT EXISTS weather_facts (
    ts timestamp PRIMARY KEY REFERENCES time_table (ts),
    temperature int,
    dewpoint_temperature int,
    relative_humidity int,
    pressure float,
    windspeed int,
    precipitation float,
    feels_like int,
    classification varchar(255)
);
"#;

pub const CREATE_TABLE_STATEMENTS: &[&str] = &[
    CREATE_STAGING_WEATHER,
    CREATE_STAGING_TAXI,
    CREATE_TAXI_LOCATIONS,
    CREATE_TIME_TABLE,
    CREATE_TAXI_FACTS,
    CREATE_WEATHER_FACTS,
];

pub const DROP_STATEMENTS: &[&str] = &[
    "DROP VIEW IF EXISTS taxi_weather_facts;",
    "DROP TABLE IF EXISTS weather_facts;",
    "DROP TABLE IF EXISTS taxi_facts;",
    "DROP TABLE IF EXISTS time_table;",
    "DROP TABLE IF EXISTS taxi_locations;",
    "DROP TABLE IF EXISTS staging_taxi;",
    "DROP TABLE IF EXISTS staging_weather;",
];
