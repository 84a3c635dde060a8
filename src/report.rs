//! Terminal presentation of a search outcome.
use crate::aoi::AreaOfInterest;
use crate::job_config::JobConfig;
use crate::pairing::CandidatePair;
use crate::scene::SceneRecord;
use crate::search::SearchOutcome;
use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::path::Path;

#[derive(Serialize, Clone, Debug)]
pub struct SceneSummary {
    pub id: String,
    pub scene_id: String,
    pub acquisition_date: DateTime<Utc>,
    pub quicklook: String,
}

/// One displayed result: a ranked pair with its job configuration.
#[derive(Serialize, Clone, Debug)]
pub struct ResultRow {
    pub rank: usize,
    pub orbit: i64,
    pub day_gap: i64,
    pub priority_score: i64,
    pub first: SceneSummary,
    pub second: SceneSummary,
    pub job_config: JobConfig,
}

impl SceneSummary {
    fn new(scene: &SceneRecord) -> Self {
        Self {
            id: scene.id.clone(),
            scene_id: scene.display_scene_id().to_string(),
            acquisition_date: scene.acquisition_date,
            quicklook: scene.quicklook_url(),
        }
    }
}

pub fn result_rows(pairs: &[CandidatePair], aoi: &AreaOfInterest) -> Vec<ResultRow> {
    pairs
        .iter()
        .enumerate()
        .map(|(idx, pair)| ResultRow {
            rank: idx + 1,
            orbit: pair.orbit,
            day_gap: pair.day_gap,
            priority_score: pair.priority_score,
            first: SceneSummary::new(&pair.first),
            second: SceneSummary::new(&pair.second),
            job_config: JobConfig::for_pair(pair, aoi),
        })
        .collect()
}

/// Rows for the best `limit` pairs of `outcome`; empty when nothing matched.
pub fn rows_for(outcome: &SearchOutcome, aoi: &AreaOfInterest, limit: usize) -> Vec<ResultRow> {
    match outcome {
        SearchOutcome::Matches(ranked) => result_rows(ranked.top(limit), aoi),
        SearchOutcome::Empty(_) => vec![],
    }
}

pub fn render_text(outcome: &SearchOutcome, rows: &[ResultRow]) -> Result<String> {
    let mut out = String::new();
    match outcome {
        SearchOutcome::Empty(warning) => {
            writeln!(out, "WARNING: {warning}")?;
        }
        SearchOutcome::Matches(ranked) => {
            writeln!(out, "# Search results")?;
            writeln!(
                out,
                "Showing {} of {} pairs, target gap {} days",
                rows.len(),
                ranked.pairs.len(),
                ranked.target_gap
            )?;
            for row in rows {
                writeln!(out)?;
                writeln!(
                    out,
                    "## {}. Orbit {} ({} days apart, score {})",
                    row.rank, row.orbit, row.day_gap, row.priority_score
                )?;
                for (label, scene) in [("First", &row.first), ("Second", &row.second)] {
                    writeln!(out, "{label} acquisition: {}", scene.acquisition_date)?;
                    writeln!(out, "  scene:     {}", scene.scene_id)?;
                    writeln!(out, "  quicklook: {}", scene.quicklook)?;
                }
                writeln!(out, "Job configuration:")?;
                writeln!(out, "{}", row.job_config.to_json_pretty()?)?;
            }
        }
    }
    Ok(out)
}

pub fn render_json(rows: &[ResultRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Writes each row's job configuration to `<dir>/job_config_<rank>.json`.
pub fn write_job_configs<P: AsRef<Path>>(rows: &[ResultRow], dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    for row in rows {
        let path = dir.join(format!("job_config_{}.json", row.rank));
        row.job_config.write(&path)?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}
