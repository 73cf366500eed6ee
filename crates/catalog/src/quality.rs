use crate::CatalogConfig;

/// A scalar validation query over staged data. A result of zero means "no
/// violations"; anything else halts the pipeline before the transforms run.
#[derive(Debug, Clone)]
pub struct QualityCheck {
    pub name: &'static str,
    pub statement: String,
}

pub(crate) fn checks(config: &CatalogConfig) -> Vec<QualityCheck> {
    vec![
        QualityCheck {
            name: "implausible_temperature",
            statement: "SELECT COUNT(*) FROM staging_weather WHERE temp < -100 OR temp > 100;"
                .to_string(),
        },
        QualityCheck {
            name: "negative_trip_distance",
            statement: "SELECT COUNT(*) FROM staging_taxi WHERE trip_distance < 0;".to_string(),
        },
        // Fires (returns 1) when fewer observations were staged than the
        // run window should contain, i.e. missing data fails the gate.
        QualityCheck {
            name: "incomplete_weather_window",
            statement: format!(
                "SELECT CAST(COUNT(*) < {} AS int) FROM staging_weather;",
                config.expected_observations
            ),
        },
    ]
}
