//! Pairing of scenes from two acquisition windows on a shared relative orbit,
//! ranked by how close their separation is to the requested one.
use crate::scene::SceneRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Number of pairs presented to the user.
pub const DISPLAY_LIMIT: usize = 6;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CandidatePair {
    pub first: SceneRecord,
    pub second: SceneRecord,
    pub orbit: i64,
    /// Whole days from the first acquisition to the second, truncated toward zero.
    pub day_gap: i64,
    /// Distance of `day_gap` from the target gap. Lower ranks higher.
    pub priority_score: i64,
}

impl CandidatePair {
    fn new(first: &SceneRecord, second: &SceneRecord, target_gap: i64) -> Self {
        let day_gap = (second.acquisition_date - first.acquisition_date).num_days();
        Self {
            first: first.clone(),
            second: second.clone(),
            orbit: first.orbit_relative_number,
            day_gap,
            priority_score: (day_gap - target_gap).abs(),
        }
    }
}

/// Joins both sets on relative orbit number and sorts the joined pairs by
/// priority score.
///
/// Every scene of `first_set` is paired with every scene of `second_set` on
/// the same orbit. Pairs are emitted in `first_set` order, then `second_set`
/// order, and the sort is stable so equal scores keep that order.
pub fn pair_and_rank(
    first_set: &[SceneRecord],
    second_set: &[SceneRecord],
    target_gap: i64,
) -> Vec<CandidatePair> {
    let mut by_orbit: HashMap<i64, Vec<&SceneRecord>> = HashMap::new();
    for scene in second_set {
        by_orbit
            .entry(scene.orbit_relative_number)
            .or_default()
            .push(scene);
    }

    let mut pairs = vec![];
    for first in first_set {
        let Some(matches) = by_orbit.get(&first.orbit_relative_number) else {
            continue;
        };
        for second in matches {
            pairs.push(CandidatePair::new(first, second, target_gap));
        }
    }

    pairs.sort_by_key(|p| p.priority_score);
    pairs
}
