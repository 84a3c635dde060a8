use crate::aoi::AreaOfInterest;
use crate::pairing::CandidatePair;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

const TIME_BOUND: &str = "2018-01-01T00:00:00+00:00/2021-12-31T23:59:59+00:00";

/// Job configuration for the "Sentinel-1 L1 SLC (SAFE) - Ground Displacement"
/// workflow: the raw-data block selects both scenes, the processing block
/// runs the InSAR stack over the area of interest.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct JobConfig {
    #[serde(rename = "sobloo-s1-slc-fullscene:1")]
    pub data: DataBlockParams,
    #[serde(rename = "catalystpro-insstack:1")]
    pub processing: ProcessingBlockParams,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DataBlockParams {
    pub ids: Vec<String>,
    pub time: String,
    pub limit: u32,
    pub time_series: Option<Value>,
    pub mission_code: Option<String>,
    pub orbit_direction: Option<String>,
    pub acquisition_mode: Option<String>,
    pub orbit_relative_number: Option<i64>,
    pub intersects: AreaOfInterest,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ProcessingBlockParams {
    pub aoi_bbox: Option<Vec<f64>>,
    pub aoi_geojson: AreaOfInterest,
}

impl JobConfig {
    pub fn new(scene_id_a: &str, scene_id_b: &str, aoi: &AreaOfInterest) -> Self {
        Self {
            data: DataBlockParams {
                ids: vec![scene_id_a.to_string(), scene_id_b.to_string()],
                time: TIME_BOUND.to_string(),
                limit: 1,
                time_series: None,
                mission_code: None,
                orbit_direction: None,
                acquisition_mode: None,
                orbit_relative_number: None,
                intersects: aoi.clone(),
            },
            processing: ProcessingBlockParams {
                aoi_bbox: None,
                aoi_geojson: aoi.clone(),
            },
        }
    }

    pub fn for_pair(pair: &CandidatePair, aoi: &AreaOfInterest) -> Self {
        Self::new(
            pair.first.display_scene_id(),
            pair.second.display_scene_id(),
            aoi,
        )
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn write<P: AsRef<Path>>(self: &Self, path: P) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn to_json_pretty(self: &Self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aoi() -> AreaOfInterest {
        AreaOfInterest::from_geometry(json!({
            "type": "Polygon",
            "coordinates": [[[13.3, 52.4], [13.5, 52.4], [13.5, 52.6], [13.3, 52.4]]]
        }))
    }

    #[test]
    fn test_document_layout() {
        let geometry = serde_json::to_value(aoi()).unwrap();
        let config = serde_json::to_value(JobConfig::new("A", "B", &aoi())).unwrap();

        assert_eq!(
            config,
            json!({
                "sobloo-s1-slc-fullscene:1": {
                    "ids": ["A", "B"],
                    "time": "2018-01-01T00:00:00+00:00/2021-12-31T23:59:59+00:00",
                    "limit": 1,
                    "time_series": null,
                    "mission_code": null,
                    "orbit_direction": null,
                    "acquisition_mode": null,
                    "orbit_relative_number": null,
                    "intersects": geometry
                },
                "catalystpro-insstack:1": {
                    "aoi_bbox": null,
                    "aoi_geojson": geometry
                }
            })
        );
    }

    #[test]
    fn test_scene_ids_with_quotes_stay_single_values() {
        let tricky = r#"S1A", "injected"#;
        let config = JobConfig::new(tricky, "B", &aoi());
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["sobloo-s1-slc-fullscene:1"]["ids"], json!([tricky, "B"]));
    }

    #[test]
    fn test_write_and_read_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job_config.json");
        let config = JobConfig::new("A", "B", &aoi());
        config.write(&path).unwrap();

        let read_back = JobConfig::read(&path).unwrap();
        assert_eq!(read_back, config);
    }
}
