use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Polygon geometry the searches are restricted to. The geometry is carried
/// through to the catalog query and job configuration untouched.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct AreaOfInterest(Value);

impl AreaOfInterest {
    pub fn from_geometry(geometry: Value) -> Self {
        Self(geometry)
    }

    /// Reads a GeoJSON FeatureCollection and keeps the geometry of its first
    /// feature.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let collection: Value = serde_json::from_str(&content)?;
        Self::from_feature_collection(&collection)
    }

    pub fn from_feature_collection(collection: &Value) -> Result<Self> {
        let features = collection
            .get("features")
            .and_then(Value::as_array)
            .ok_or(anyhow!("GeoJSON has no 'features' array"))?;

        let first = features
            .first()
            .ok_or(anyhow!("GeoJSON FeatureCollection is empty"))?;
        if features.len() > 1 {
            warn!(
                "GeoJSON contains {} features, only the first one is used",
                features.len()
            );
        }

        let geometry = first
            .get("geometry")
            .filter(|g| g.is_object())
            .ok_or(anyhow!("First feature has no geometry"))?;

        Ok(Self(geometry.clone()))
    }

    pub fn geometry(self: &Self) -> &Value {
        &self.0
    }
}
