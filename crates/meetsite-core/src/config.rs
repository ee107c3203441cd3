// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Meetsite Contributors

use crate::catalog::Catalog;
use crate::ranking::OptimizationMode;
use crate::schedule::MeetingWindow;
use crate::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// A saved meeting scenario: who attends from where, and how to rank.
/// Read-only from the library's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Attendee counts keyed by office airport code.
    pub attendees: BTreeMap<String, u32>,
    pub mode: OptimizationMode,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<MeetingWindow>,
    /// Seed for flight offers; unset means a fresh random source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Replacement catalog file. The built-in catalog is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            attendees: BTreeMap::new(),
            mode: OptimizationMode::default(),
            limit: DEFAULT_RESULT_LIMIT,
            window: None,
            seed: None,
            catalog: None,
        }
    }
}

impl ScenarioConfig {
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("org", "meetsite", "meetsite")
            .map(|dirs| dirs.config_dir().join("scenario.json"))
            .unwrap_or_else(|| PathBuf::from("scenario.json"))
    }

    /// A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("[Config] No scenario file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        log::debug!("[Config] Loading scenario from {:?}", path);
        let content = fs::read_to_string(path)?;
        let mut config: ScenarioConfig = serde_json::from_str(&content).map_err(|e| {
            log::error!("[Config] JSON parse error for {:?}: {}", path, e);
            e
        })?;
        if let Some(window) = config.window {
            config.window = Some(window.validated()?);
        }
        // Relative catalog paths are resolved against the scenario file
        if let (Some(catalog), Some(parent)) = (config.catalog.as_ref(), path.parent()) {
            if catalog.is_relative() {
                config.catalog = Some(parent.join(catalog));
            }
        }
        Ok(config)
    }

    /// Builds the catalog this scenario refers to and applies its counts.
    pub fn build_catalog(&self) -> Result<Catalog> {
        let mut catalog = match &self.catalog {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        self.apply_attendees(&mut catalog)?;
        Ok(catalog)
    }

    pub fn apply_attendees(&self, catalog: &mut Catalog) -> Result<()> {
        for (code, count) in &self.attendees {
            catalog.set_attendees(code, *count)?;
        }
        log::info!(
            "[Config] {} attendees across {} offices",
            catalog.total_attendees(),
            catalog.active_offices().count()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeetsiteError;

    #[test]
    fn test_defaults() {
        let config: ScenarioConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ScenarioConfig::default());
        assert_eq!(config.limit, 10);
        assert_eq!(config.mode, OptimizationMode::Balanced);
    }

    #[test]
    fn test_apply_attendees() {
        let config: ScenarioConfig = serde_json::from_str(
            r#"{ "attendees": { "LHR": 10, "syd": 10 }, "mode": "carbon" }"#,
        )
        .unwrap();
        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.total_attendees(), 20);
        assert_eq!(config.mode, OptimizationMode::Carbon);
    }

    #[test]
    fn test_unknown_office_is_an_error() {
        let config: ScenarioConfig =
            serde_json::from_str(r#"{ "attendees": { "XXX": 1 } }"#).unwrap();
        let err = config.build_catalog().unwrap_err();
        assert!(matches!(err, MeetsiteError::UnknownOffice(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = Path::new("/nonexistent/meetsite/scenario.json");
        let config = ScenarioConfig::load(path).unwrap();
        assert_eq!(config, ScenarioConfig::default());
    }
}
