use crate::acquisition::AcquisitionWindow;
use crate::pairing::DISPLAY_LIMIT;
use crate::query::{DEFAULT_DATA_BLOCK, DEFAULT_LIMIT};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use toml;

pub fn search_parameters_toml() -> toml::Table {
    toml::toml! {
        name = "Sentinel-1 L1 SLC (SAFE) - Ground Displacement"

        description = "Pairs of Sentinel-1 SLC scenes sharing a relative orbit, one from each\n\
        acquisition window, for repeat pass InSAR processing with the CATALYST\n\
        Ground Displacement block."

        aoi = "aoi.geojson"

        data_block = "sobloo-s1-slc-fullscene"

        limit = 500

        display_limit = 6

        [first]
        start = "2020-12-01"
        end = "2020-12-15"

        [second]
        start = "2021-06-01"
        end = "2021-06-15"
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct SearchParameters {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// GeoJSON FeatureCollection holding the area of interest. Relative paths
    /// are resolved against the parameters file.
    pub aoi: PathBuf,
    #[serde(default = "default_data_block")]
    pub data_block: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
    pub first: AcquisitionWindow,
    pub second: AcquisitionWindow,
}

fn default_data_block() -> String {
    DEFAULT_DATA_BLOCK.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_display_limit() -> usize {
    DISPLAY_LIMIT
}

impl SearchParameters {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut parameters: Self = toml::from_str(&content)?;

        if parameters.aoi.is_relative() {
            if let Some(parent) = path.parent() {
                parameters.aoi = parent.join(&parameters.aoi);
            }
        }
        parameters.first.warn_if_inverted("first acquisition");
        parameters.second.warn_if_inverted("second acquisition");
        Ok(parameters)
    }

    pub fn write<P: AsRef<Path>>(self: &Self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn from_template(table: &toml::Table) -> Result<Self> {
        let parameters: Self = toml::from_str(&table.to_string())?;
        Ok(parameters)
    }
}
