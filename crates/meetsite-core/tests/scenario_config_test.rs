// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Meetsite Contributors

use meetsite_core::config::ScenarioConfig;
use meetsite_core::{rank_catalog, Catalog, MeetsiteError, OptimizationMode};
use std::fs;
use tempfile::tempdir;

const TWO_OFFICE_CATALOG: &str = r#"{
    "offices": [
        { "id": 1, "name": "West", "code": "WST", "lat": 0.0, "lon": -10.0 },
        { "id": 2, "name": "East", "code": "EST", "lat": 0.0, "lon": 10.0 }
    ],
    "hubs": [
        { "id": 100, "name": "Middle", "code": "MID", "lat": 0.0, "lon": 0.0,
          "connectivity": "medium", "reason": "Halfway" }
    ]
}"#;

#[test]
fn test_scenario_with_relative_catalog() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("catalog.json"), TWO_OFFICE_CATALOG).unwrap();
    fs::write(
        dir.path().join("scenario.json"),
        r#"{
            "attendees": { "WST": 4, "EST": 4 },
            "mode": "distance",
            "limit": 2,
            "seed": 17,
            "window": { "start": "2026-09-14", "end": "2026-09-16", "flexibility_days": 2 },
            "catalog": "catalog.json"
        }"#,
    )
    .unwrap();

    let config = ScenarioConfig::load(&dir.path().join("scenario.json")).unwrap();
    assert_eq!(config.mode, OptimizationMode::Distance);
    assert_eq!(config.limit, 2);
    assert_eq!(config.seed, Some(17));
    assert_eq!(config.catalog.as_deref(), Some(dir.path().join("catalog.json").as_path()));
    let window = config.window.unwrap();
    assert_eq!(window.nights(), 2);

    let catalog = config.build_catalog().unwrap();
    assert_eq!(catalog.total_attendees(), 8);

    let results = rank_catalog(&catalog, config.mode);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].location.code, "MID");
    assert!(results[0].fairness_km.abs() < 1e-9);
}

#[test]
fn test_malformed_scenario_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scenario.json");
    fs::write(&path, "{ \"attendees\": [1, 2] }").unwrap();
    assert!(matches!(
        ScenarioConfig::load(&path),
        Err(MeetsiteError::Json(_))
    ));
}

#[test]
fn test_inverted_window_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scenario.json");
    fs::write(
        &path,
        r#"{ "window": { "start": "2026-09-16", "end": "2026-09-14" } }"#,
    )
    .unwrap();
    assert!(matches!(
        ScenarioConfig::load(&path),
        Err(MeetsiteError::InvalidWindow(_))
    ));
}

#[test]
fn test_catalog_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let mut catalog = Catalog::builtin();
    catalog.set_attendees("GVA", 3).unwrap();
    fs::write(&path, catalog.to_json().unwrap()).unwrap();

    let loaded = Catalog::load(&path).unwrap();
    assert_eq!(loaded.offices(), catalog.offices());
    assert_eq!(loaded.hubs().len(), 18);
    assert_eq!(loaded.find("GVA").unwrap().attendees(), 3);
}
