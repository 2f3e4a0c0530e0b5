use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::{QuakeSyncError, Result};
use crate::model::QuakeEvent;

pub const QUAKE_LIMIT: u32 = 200;
pub const MIN_MAGNITUDE: f64 = 2.5;

const SOURCE: &str = "USGS";

// GeoJSON feature collection, reduced to the fields the dashboard reads.
#[derive(Debug, Deserialize)]
struct WireCollection {
    features: Vec<WireFeature>,
}

#[derive(Debug, Deserialize)]
struct WireFeature {
    id: String,
    properties: WireProperties,
}

#[derive(Debug, Deserialize)]
struct WireProperties {
    mag: f64,
    place: String,
    time: i64,
}

pub fn query_url(base: &str, since: DateTime<Utc>) -> String {
    format!(
        "{base}/fdsnws/event/1/query?format=geojson&starttime={}&orderby=time&limit={QUAKE_LIMIT}&minmagnitude={MIN_MAGNITUDE}",
        since.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    )
}

fn decode_error(detail: impl Into<String>) -> QuakeSyncError {
    QuakeSyncError::Decode {
        source_name: SOURCE,
        detail: detail.into(),
    }
}

/// Decodes the feature collection into normalized events. Event times are
/// epoch milliseconds on the wire.
pub fn decode_quakes(body: &str) -> Result<Vec<QuakeEvent>> {
    let wire: WireCollection = serde_json::from_str(body).map_err(|e| decode_error(e.to_string()))?;

    wire.features
        .into_iter()
        .map(|f| {
            let timestamp = Utc
                .timestamp_millis_opt(f.properties.time)
                .single()
                .ok_or_else(|| decode_error(format!("event time {} out of range", f.properties.time)))?;
            Ok(QuakeEvent {
                id: f.id,
                timestamp,
                magnitude: f.properties.mag,
                place: f.properties.place,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_feature_collection() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "us7000abcd",
                    "properties": {
                        "mag": 4.6,
                        "place": "120km SSE of Sand Point, Alaska",
                        "time": 1710500400000,
                        "tsunami": 0
                    }
                }
            ]
        }"#;
        let quakes = decode_quakes(body).unwrap();
        assert_eq!(quakes.len(), 1);
        assert_eq!(quakes[0].id, "us7000abcd");
        assert_eq!(quakes[0].magnitude, 4.6);
        assert_eq!(
            quakes[0].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 15, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn null_magnitude_is_a_decode_error() {
        let body = r#"{
            "features": [
                { "id": "x", "properties": { "mag": null, "place": "nowhere", "time": 0 } }
            ]
        }"#;
        assert!(matches!(
            decode_quakes(body),
            Err(QuakeSyncError::Decode { .. })
        ));
    }

    #[test]
    fn url_carries_caps_and_magnitude_floor() {
        let since = Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap();
        let url = query_url("https://earthquake.usgs.gov", since);
        assert!(url.contains("format=geojson"));
        assert!(url.contains("orderby=time"));
        assert!(url.contains("limit=200"));
        assert!(url.contains("minmagnitude=2.5"));
    }
}
