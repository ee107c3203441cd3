// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Meetsite Contributors

use crate::catalog::Catalog;
use crate::location::{Location, ParticipantGroup};
use crate::scoring::{score_candidate, CandidateResult};
use crate::MeetsiteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed normalisation constants for `Balanced`. They bring total CO2 (kg)
/// and fairness (km) onto comparable scales; they are not fitted to data.
pub const BALANCED_CO2_DIVISOR: f64 = 1000.0;
pub const BALANCED_FAIRNESS_DIVISOR: f64 = 100.0;

/// What the ranking minimises. Lower scores are better in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationMode {
    /// Total attendee-weighted CO2.
    Carbon,
    /// Spread of travel distance between offices.
    Distance,
    #[default]
    Balanced,
}

impl OptimizationMode {
    pub const ALL: [OptimizationMode; 3] = [
        OptimizationMode::Carbon,
        OptimizationMode::Distance,
        OptimizationMode::Balanced,
    ];

    pub fn score(&self, result: &CandidateResult) -> f64 {
        match self {
            OptimizationMode::Carbon => result.total_co2_kg,
            OptimizationMode::Distance => result.fairness_km,
            OptimizationMode::Balanced => {
                result.total_co2_kg / BALANCED_CO2_DIVISOR
                    + result.fairness_km / BALANCED_FAIRNESS_DIVISOR
            }
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            OptimizationMode::Carbon => "carbon emissions",
            OptimizationMode::Distance => "travel fairness",
            OptimizationMode::Balanced => "balanced optimization",
        }
    }
}

impl fmt::Display for OptimizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OptimizationMode::Carbon => "carbon",
            OptimizationMode::Distance => "distance",
            OptimizationMode::Balanced => "balanced",
        };
        f.write_str(s)
    }
}

impl FromStr for OptimizationMode {
    type Err = MeetsiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "carbon" | "co2" => Ok(OptimizationMode::Carbon),
            "distance" | "fairness" => Ok(OptimizationMode::Distance),
            "balanced" => Ok(OptimizationMode::Balanced),
            _ => Err(MeetsiteError::InvalidMode(s.to_string())),
        }
    }
}

/// Offices with at least one attendee, in input order.
pub fn participant_groups(offices: &[Location]) -> Vec<ParticipantGroup<'_>> {
    offices
        .iter()
        .filter_map(ParticipantGroup::from_office)
        .collect()
}

/// Scores every office and every external candidate, then sorts ascending by
/// the mode's score. The sort is stable, so ties keep input order (offices
/// first, then `candidates` in catalog order).
///
/// Returns an empty list when no office has attendees.
pub fn rank(
    offices: &[Location],
    candidates: &[Location],
    mode: OptimizationMode,
) -> Vec<CandidateResult> {
    let groups = participant_groups(offices);
    if groups.is_empty() {
        log::warn!("[Ranking] No office has attendees, nothing to rank");
        return Vec::new();
    }

    log::debug!(
        "[Ranking] Scoring {} candidates for {} active offices ({} mode)",
        offices.len() + candidates.len(),
        groups.len(),
        mode
    );

    let mut results: Vec<CandidateResult> = offices
        .iter()
        .chain(candidates.iter())
        .map(|candidate| {
            let mut result = score_candidate(&groups, candidate);
            result.score = mode.score(&result);
            result
        })
        .collect();

    results.sort_by(|a, b| a.score.total_cmp(&b.score));

    if let Some(best) = results.first() {
        log::info!(
            "[Ranking] Best site: {} ({}) score {:.3}",
            best.location.name,
            best.location.code,
            best.score
        );
    }
    results
}

pub fn rank_catalog(catalog: &Catalog, mode: OptimizationMode) -> Vec<CandidateResult> {
    rank(catalog.offices(), catalog.hubs(), mode)
}
