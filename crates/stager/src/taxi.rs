use crate::error::StagerError;
use bytes::Bytes;
use chrono::DateTime;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;
use reqwest::Client;

pub const DEFAULT_TRIP_DATA_BASE_URL: &str = "https://d37ci6vzurychx.cloudfront.net";

/// Downloads the monthly yellow-trip parquet files and converts them to
/// CSV for staging. The warehouse's COPY reads CSV; the publisher ships
/// columnar files, so conversion happens here, row by row.
pub struct TripDataClient {
    http: Client,
    base_url: String,
}

impl TripDataClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn trip_file_stem(year: i32, month: u32) -> String {
        format!("yellow_tripdata_{year}-{month:02}")
    }

    pub async fn fetch_month(&self, year: i32, month: u32) -> Result<Bytes, StagerError> {
        let url = format!(
            "{}/trip-data/{}.parquet",
            self.base_url,
            Self::trip_file_stem(year, month)
        );
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(StagerError::fetch(format!(
                "trip data endpoint returned {} for {url}",
                response.status()
            )));
        }
        Ok(response.bytes().await?)
    }

    pub async fn fetch_zone_lookup(&self) -> Result<Bytes, StagerError> {
        let url = format!("{}/misc/taxi+_zone_lookup.csv", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(StagerError::fetch(format!(
                "zone lookup endpoint returned {} for {url}",
                response.status()
            )));
        }
        Ok(response.bytes().await?)
    }
}

/// Convert a parquet file to CSV with a header row taken from the file's
/// schema. Timestamps render in the warehouse's default
/// `YYYY-MM-DD HH:MM:SS` form; nulls become empty fields.
pub fn parquet_to_csv(data: Bytes) -> Result<Vec<u8>, StagerError> {
    let reader = SerializedFileReader::new(data)?;
    let headers: Vec<String> = reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers)?;

    for row in reader.get_row_iter(None)? {
        let row = row?;
        let record: Vec<String> = row
            .get_column_iter()
            .map(|(_, field)| render_field(field))
            .collect();
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| StagerError::decode(e.to_string()))
}

fn render_field(field: &Field) -> String {
    match field {
        Field::Null => String::new(),
        Field::Bool(v) => v.to_string(),
        Field::Byte(v) => v.to_string(),
        Field::Short(v) => v.to_string(),
        Field::Int(v) => v.to_string(),
        Field::Long(v) => v.to_string(),
        Field::UByte(v) => v.to_string(),
        Field::UShort(v) => v.to_string(),
        Field::UInt(v) => v.to_string(),
        Field::ULong(v) => v.to_string(),
        Field::Float(v) => v.to_string(),
        Field::Double(v) => v.to_string(),
        Field::Str(v) => v.clone(),
        Field::TimestampMillis(ms) => DateTime::from_timestamp_millis(*ms)
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        Field::TimestampMicros(us) => DateTime::from_timestamp_micros(*us)
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parquet::data_type::{ByteArray, ByteArrayType, DoubleType, Int64Type};
    use parquet::file::properties::WriterProperties;
    use parquet::file::writer::SerializedFileWriter;
    use parquet::schema::parser::parse_message_type;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_parquet() -> Bytes {
        let schema = Arc::new(
            parse_message_type(
                "message trips {
                    REQUIRED INT64 vendorid;
                    REQUIRED INT64 tpep_pickup_datetime (TIMESTAMP(MICROS,true));
                    REQUIRED DOUBLE fare_amount;
                    REQUIRED BYTE_ARRAY store_and_fwd_flag (UTF8);
                }",
            )
            .unwrap(),
        );

        let mut buffer = Vec::new();
        let mut writer = SerializedFileWriter::new(
            &mut buffer,
            schema,
            Arc::new(WriterProperties::builder().build()),
        )
        .unwrap();

        let mut row_group = writer.next_row_group().unwrap();

        // 2021-01-01 00:05:00 UTC in micros.
        let pickup = 1_609_459_500_000_000_i64;

        let mut col = row_group.next_column().unwrap().unwrap();
        col.typed::<Int64Type>()
            .write_batch(&[1, 2], None, None)
            .unwrap();
        col.close().unwrap();

        let mut col = row_group.next_column().unwrap().unwrap();
        col.typed::<Int64Type>()
            .write_batch(&[pickup, pickup + 60_000_000], None, None)
            .unwrap();
        col.close().unwrap();

        let mut col = row_group.next_column().unwrap().unwrap();
        col.typed::<DoubleType>()
            .write_batch(&[12.5, 8.0], None, None)
            .unwrap();
        col.close().unwrap();

        let mut col = row_group.next_column().unwrap().unwrap();
        col.typed::<ByteArrayType>()
            .write_batch(&[ByteArray::from("N"), ByteArray::from("Y")], None, None)
            .unwrap();
        col.close().unwrap();

        row_group.close().unwrap();
        writer.close().unwrap();

        Bytes::from(buffer)
    }

    #[test]
    fn converts_parquet_rows_to_csv() {
        let body = String::from_utf8(parquet_to_csv(sample_parquet()).unwrap()).unwrap();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(
            lines[0],
            "vendorid,tpep_pickup_datetime,fare_amount,store_and_fwd_flag"
        );
        assert_eq!(lines[1], "1,2021-01-01 00:05:00,12.5,N");
        assert_eq!(lines[2], "2,2021-01-01 00:06:00,8,Y");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn null_fields_render_empty() {
        assert_eq!(render_field(&Field::Null), "");
        assert_eq!(render_field(&Field::Long(42)), "42");
        assert_eq!(render_field(&Field::Str("JFK".into())), "JFK");
    }

    #[tokio::test]
    async fn missing_month_is_a_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/trip-data/yellow_tripdata_2021-01.parquet"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = TripDataClient::new(&server.uri());
        let err = client.fetch_month(2021, 1).await.unwrap_err();
        assert!(matches!(err, StagerError::Fetch { .. }));
    }

    #[tokio::test]
    async fn zone_lookup_passes_through_unchanged() {
        let server = MockServer::start().await;
        let lookup = "LocationID,Borough,Zone,service_zone\n1,EWR,Newark Airport,EWR\n";
        Mock::given(method("GET"))
            .and(path("/misc/taxi+_zone_lookup.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string(lookup))
            .mount(&server)
            .await;

        let client = TripDataClient::new(&server.uri());
        let body = client.fetch_zone_lookup().await.unwrap();
        assert_eq!(&body[..], lookup.as_bytes());
    }
}
