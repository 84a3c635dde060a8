use crate::acquisition::AcquisitionWindow;
use crate::aoi::AreaOfInterest;
use serde::Serialize;

/// Sentinel-1 L1 SLC full scenes as published by sobloo.
pub const DEFAULT_DATA_BLOCK: &str = "sobloo-s1-slc-fullscene";
pub const DEFAULT_LIMIT: u32 = 500;

/// Body of a catalog search request.
#[derive(Serialize, Clone, Debug)]
pub struct CatalogQuery {
    datetime: String,
    intersects: AreaOfInterest,
    limit: u32,
    query: QueryFilter,
}

#[derive(Serialize, Clone, Debug)]
struct QueryFilter {
    #[serde(rename = "dataBlock")]
    data_block: InFilter,
}

#[derive(Serialize, Clone, Debug)]
struct InFilter {
    #[serde(rename = "in")]
    values: Vec<String>,
}

impl CatalogQuery {
    pub fn new(window: &AcquisitionWindow, aoi: &AreaOfInterest) -> Self {
        Self::with_source(window, aoi, DEFAULT_DATA_BLOCK, DEFAULT_LIMIT)
    }

    pub fn with_source(
        window: &AcquisitionWindow,
        aoi: &AreaOfInterest,
        data_block: &str,
        limit: u32,
    ) -> Self {
        Self {
            datetime: window.datetime_interval(),
            intersects: aoi.clone(),
            limit,
            query: QueryFilter {
                data_block: InFilter {
                    values: vec![data_block.to_string()],
                },
            },
        }
    }

    pub fn datetime(self: &Self) -> &str {
        &self.datetime
    }
}
