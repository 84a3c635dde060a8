use crate::acquisition::{self, AcquisitionWindow};
use crate::aoi::AreaOfInterest;
use crate::catalog::CatalogOps;
use crate::error::CatalogError;
use crate::pairing::{self, CandidatePair};
use crate::query::{CatalogQuery, DEFAULT_DATA_BLOCK, DEFAULT_LIMIT};
use crate::search_parameters::SearchParameters;
use anyhow::Result;
use log::info;
use std::fmt;

/// Everything a single search needs. Built once per invocation and passed
/// down, nothing is shared between searches.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub first: AcquisitionWindow,
    pub second: AcquisitionWindow,
    pub aoi: AreaOfInterest,
    pub data_block: String,
    pub limit: u32,
}

impl SearchRequest {
    pub fn new(first: AcquisitionWindow, second: AcquisitionWindow, aoi: AreaOfInterest) -> Self {
        Self {
            first,
            second,
            aoi,
            data_block: DEFAULT_DATA_BLOCK.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }

    /// Loads the area of interest named by `parameters`.
    pub fn from_parameters(parameters: &SearchParameters) -> Result<Self> {
        let aoi = AreaOfInterest::read(&parameters.aoi)?;
        Ok(Self {
            first: parameters.first,
            second: parameters.second,
            aoi,
            data_block: parameters.data_block.clone(),
            limit: parameters.limit,
        })
    }

    pub fn target_gap(self: &Self) -> i64 {
        acquisition::target_gap(&self.first, &self.second)
    }

    fn query(self: &Self, window: &AcquisitionWindow) -> CatalogQuery {
        CatalogQuery::with_source(window, &self.aoi, &self.data_block, self.limit)
    }
}

/// Raised when no scene pair could be formed. Not an error: the user is
/// expected to adjust the request and search again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyResultWarning {
    pub first_count: usize,
    pub second_count: usize,
}

impl fmt::Display for EmptyResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Search returned zero results, please change the search request \
             ({} scenes in the first window, {} in the second, none on a shared orbit)",
            self.first_count, self.second_count
        )
    }
}

#[derive(Clone, Debug)]
pub struct RankedPairs {
    pub target_gap: i64,
    pub pairs: Vec<CandidatePair>,
}

impl RankedPairs {
    /// The best `n` pairs, or all of them if there are fewer.
    pub fn top(self: &Self, n: usize) -> &[CandidatePair] {
        &self.pairs[..n.min(self.pairs.len())]
    }
}

#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Matches(RankedPairs),
    Empty(EmptyResultWarning),
}

/// Searches both windows, one after the other, then pairs and ranks the
/// scenes. A failure in either search aborts the whole run.
pub async fn find_pairs(
    catalog: &impl CatalogOps,
    request: &SearchRequest,
) -> Result<SearchOutcome, CatalogError> {
    info!("Searching first acquisition window {}", request.first);
    let first_set = catalog.search(&request.query(&request.first)).await?;

    info!("Searching second acquisition window {}", request.second);
    let second_set = catalog.search(&request.query(&request.second)).await?;

    let target_gap = request.target_gap();
    let pairs = pairing::pair_and_rank(&first_set, &second_set, target_gap);
    info!(
        "{} candidate pairs from {} x {} scenes, target gap {} days",
        pairs.len(),
        first_set.len(),
        second_set.len(),
        target_gap
    );

    if pairs.is_empty() {
        return Ok(SearchOutcome::Empty(EmptyResultWarning {
            first_count: first_set.len(),
            second_count: second_set.len(),
        }));
    }
    Ok(SearchOutcome::Matches(RankedPairs { target_gap, pairs }))
}
