use crate::error::CatalogError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const QUICKLOOK_API: &str = "https://sobloo.eu/api/v1/services/quicklook";
const SCENE_ID_DISPLAY_LEN: usize = 255;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrbitDirection {
    Ascending,
    Descending,
}

impl FromStr for OrbitDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            _ => Err(format!("unknown orbit direction '{s}'")),
        }
    }
}

impl<'de> Deserialize<'de> for OrbitDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl fmt::Display for OrbitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "ASCENDING"),
            Self::Descending => write!(f, "DESCENDING"),
        }
    }
}

/// One scene returned by a catalog search.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SceneRecord {
    pub geometry: Value,
    pub id: String,
    pub scene_id: String,
    pub acquisition_date: DateTime<Utc>,
    pub collection: String,
    pub orbit_relative_number: i64,
    pub orbit_direction: OrbitDirection,
}

impl SceneRecord {
    /// Scene id cut to the length accepted by the processing workflow.
    pub fn display_scene_id(self: &Self) -> &str {
        match self.scene_id.char_indices().nth(SCENE_ID_DISPLAY_LEN) {
            Some((idx, _)) => &self.scene_id[..idx],
            None => &self.scene_id,
        }
    }

    pub fn quicklook_url(self: &Self) -> String {
        format!("{}/{}", QUICKLOOK_API, self.id)
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Value,
    properties: FeatureProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeatureProperties {
    id: String,
    scene_id: String,
    #[serde(deserialize_with = "deserialize_acquisition_date")]
    acquisition_date: DateTime<Utc>,
    collection: String,
    provider_properties: ProviderProperties,
}

#[derive(Deserialize)]
struct ProviderProperties {
    orbit: Orbit,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Orbit {
    relative_number: i64,
    direction: OrbitDirection,
}

/// Parses the body of a catalog search into scene records. Every feature must
/// carry the full set of required properties; the first one that doesn't
/// fails the whole response.
pub fn parse_search_response(body: &[u8]) -> Result<Vec<SceneRecord>, CatalogError> {
    let deserializer = &mut serde_json::Deserializer::from_slice(body);
    let response: SearchResponse = serde_path_to_error::deserialize(deserializer)?;

    let mut records = Vec::with_capacity(response.features.len());
    for (idx, feature) in response.features.into_iter().enumerate() {
        if !feature.geometry.is_object() {
            return Err(CatalogError::parse(
                format!("features[{idx}].geometry"),
                "expected a GeoJSON geometry object",
            ));
        }
        let properties = feature.properties;
        records.push(SceneRecord {
            geometry: feature.geometry,
            id: properties.id,
            scene_id: properties.scene_id,
            acquisition_date: properties.acquisition_date,
            collection: properties.collection,
            orbit_relative_number: properties.provider_properties.orbit.relative_number,
            orbit_direction: properties.provider_properties.orbit.direction,
        });
    }
    Ok(records)
}

fn deserialize_acquisition_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{s}'")))
}

/// Accepts RFC 3339 timestamps, zone-less timestamps (taken as UTC) and bare dates.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn feature(id: &str, scene_id: &str, date: &str, orbit: i64) -> Value {
        json!({
            "type": "Feature",
            "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]},
            "properties": {
                "id": id,
                "sceneId": scene_id,
                "acquisitionDate": date,
                "collection": "SENTINEL1-SLC",
                "providerProperties": {
                    "orbit": {"relativeNumber": orbit, "direction": "DESCENDING"}
                }
            }
        })
    }

    fn body(features: Vec<Value>) -> Vec<u8> {
        serde_json::to_vec(&json!({"type": "FeatureCollection", "features": features})).unwrap()
    }

    #[test]
    fn test_parse_features() {
        let response = body(vec![
            feature("a1", "S1A_IW_SLC_1", "2020-12-03T05:52:13.123Z", 66),
            feature("a2", "S1B_IW_SLC_2", "2020-12-09T05:51:40Z", 139),
        ]);
        let records = parse_search_response(&response).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a1");
        assert_eq!(records[0].scene_id, "S1A_IW_SLC_1");
        assert_eq!(records[0].orbit_relative_number, 66);
        assert_eq!(records[0].orbit_direction, OrbitDirection::Descending);
        assert_eq!(records[0].collection, "SENTINEL1-SLC");
        assert_eq!(
            records[1].acquisition_date,
            Utc.with_ymd_and_hms(2020, 12, 9, 5, 51, 40).unwrap()
        );
    }

    #[test]
    fn test_empty_feature_collection() {
        let records = parse_search_response(&body(vec![])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_scene_id_names_the_field() {
        let mut incomplete = feature("a2", "S1B", "2020-12-09T05:51:40Z", 139);
        incomplete["properties"]
            .as_object_mut()
            .unwrap()
            .remove("sceneId");
        let response = body(vec![feature("a1", "S1A", "2020-12-03", 66), incomplete]);

        match parse_search_response(&response) {
            Err(CatalogError::Parse { path, message }) => {
                assert_eq!(path, "features[1].properties");
                assert!(message.contains("sceneId"), "{message}");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_orbit_number_names_the_field() {
        let mut incomplete = feature("a1", "S1A", "2020-12-03", 66);
        incomplete["properties"]["providerProperties"]["orbit"]
            .as_object_mut()
            .unwrap()
            .remove("relativeNumber");

        match parse_search_response(&body(vec![incomplete])) {
            Err(CatalogError::Parse { path, message }) => {
                assert_eq!(path, "features[0].properties.providerProperties.orbit");
                assert!(message.contains("relativeNumber"), "{message}");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_orbit_direction() {
        let mut odd = feature("a1", "S1A", "2020-12-03", 66);
        odd["properties"]["providerProperties"]["orbit"]["direction"] = json!("SIDEWAYS");
        let err = parse_search_response(&body(vec![odd])).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_null_geometry_is_rejected() {
        let mut odd = feature("a1", "S1A", "2020-12-03", 66);
        odd["geometry"] = Value::Null;
        match parse_search_response(&body(vec![odd])) {
            Err(CatalogError::Parse { path, .. }) => assert_eq!(path, "features[0].geometry"),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_not_json_at_all() {
        let err = parse_search_response(b"<html>Bad gateway</html>").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_orbit_direction_casing() {
        for direction in [OrbitDirection::Ascending, OrbitDirection::Descending] {
            let serialized = serde_json::to_value(direction).unwrap();
            assert_eq!(serialized, json!(direction.to_string()));
            assert_eq!(direction.to_string().parse::<OrbitDirection>(), Ok(direction));
        }
        assert_eq!("ascending".parse::<OrbitDirection>(), Ok(OrbitDirection::Ascending));
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2021, 6, 3, 17, 4, 5).unwrap();
        assert_eq!(parse_timestamp("2021-06-03T17:04:05Z"), Some(expected));
        assert_eq!(parse_timestamp("2021-06-03T19:04:05+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2021-06-03T17:04:05.000"), Some(expected));
        assert_eq!(
            parse_timestamp("2021-06-03"),
            Some(Utc.with_ymd_and_hms(2021, 6, 3, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("03/06/2021"), None);
    }

    #[test]
    fn test_display_scene_id_is_truncated() {
        let response = body(vec![feature("a1", &"X".repeat(300), "2020-12-03", 66)]);
        let record = parse_search_response(&response).unwrap().remove(0);
        assert_eq!(record.display_scene_id().len(), 255);

        let response = body(vec![feature("a1", "short", "2020-12-03", 66)]);
        let record = parse_search_response(&response).unwrap().remove(0);
        assert_eq!(record.display_scene_id(), "short");
    }

    #[test]
    fn test_quicklook_url() {
        let response = body(vec![feature("abc-123", "S1A", "2020-12-03", 66)]);
        let record = parse_search_response(&response).unwrap().remove(0);
        assert_eq!(
            record.quicklook_url(),
            "https://sobloo.eu/api/v1/services/quicklook/abc-123"
        );
    }
}
