use crate::CatalogConfig;

/// Binds a staging table to the blob-store prefix its CSV objects live
/// under. The bulk loader renders one COPY per binding; a prefix may hold
/// one object or many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyBinding {
    pub table: &'static str,
    pub prefix: String,
    pub ignore_header: u32,
}

impl CopyBinding {
    pub fn statement(&self, config: &CatalogConfig) -> String {
        format!(
            "COPY {table}\n\
             FROM 's3://{bucket}/{prefix}'\n\
             ACCESS_KEY_ID '{key}'\n\
             SECRET_ACCESS_KEY '{secret}'\n\
             REGION '{region}'\n\
             FORMAT AS CSV\n\
             IGNOREHEADER {header}\n\
             EMPTYASNULL\n\
             BLANKSASNULL;",
            table = self.table,
            bucket = config.bucket,
            prefix = self.prefix,
            key = config.access_key_id,
            secret = config.secret_access_key,
            region = config.region,
            header = self.ignore_header,
        )
    }
}

pub(crate) fn bindings(config: &CatalogConfig) -> Vec<CopyBinding> {
    vec![
        CopyBinding {
            table: "staging_weather",
            prefix: format!("raw/weather/{}/{}/", config.city, config.window_label),
            ignore_header: 1,
        },
        // Trips get their own sub-prefix so the zone lookup object next to
        // them is never swept into staging_taxi by the prefix match.
        CopyBinding {
            table: "staging_taxi",
            prefix: format!("raw/taxi/{}/trips/", config.city),
            ignore_header: 1,
        },
        CopyBinding {
            table: "taxi_locations",
            prefix: format!("raw/taxi/{}/taxi_zone_lookup.csv", config.city),
            ignore_header: 1,
        },
    ]
}
