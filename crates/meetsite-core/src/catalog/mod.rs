// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Meetsite Contributors

use crate::location::{ConnectivityTier, Location, LocationRole};
use crate::{GeoPoint, MeetsiteError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// On-disk shape of a catalog row. Offices and hubs share it; the list a row
/// appears in decides its role.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogEntry {
    id: u32,
    name: String,
    code: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    attendees: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    connectivity: Option<ConnectivityTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl CatalogEntry {
    fn into_office(self) -> Location {
        Location {
            id: self.id,
            name: self.name,
            code: self.code,
            point: GeoPoint::new(self.lat, self.lon),
            role: LocationRole::Office {
                attendees: self.attendees,
            },
        }
    }

    fn into_hub(self) -> Location {
        Location {
            id: self.id,
            name: self.name,
            code: self.code,
            point: GeoPoint::new(self.lat, self.lon),
            role: LocationRole::Candidate {
                connectivity: self.connectivity,
                reason: self.reason,
            },
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    offices: Vec<CatalogEntry>,
    #[serde(default)]
    hubs: Vec<CatalogEntry>,
}

/// Offices (with mutable attendee counts) plus the static list of external
/// meeting hubs.
#[derive(Debug, Clone)]
pub struct Catalog {
    offices: Vec<Location>,
    hubs: Vec<Location>,
}

impl Catalog {
    /// The shipped seed data: 13 offices, all at 0 attendees, and 18
    /// high-connectivity hubs.
    pub fn builtin() -> Self {
        let offices: Vec<CatalogEntry> = serde_json::from_str(include_str!("offices.json"))
            .expect("Failed to parse offices.json");
        let hubs: Vec<CatalogEntry> =
            serde_json::from_str(include_str!("hubs.json")).expect("Failed to parse hubs.json");
        Self {
            offices: offices.into_iter().map(CatalogEntry::into_office).collect(),
            hubs: hubs.into_iter().map(CatalogEntry::into_hub).collect(),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        let catalog = Self {
            offices: file
                .offices
                .into_iter()
                .map(CatalogEntry::into_office)
                .collect(),
            hubs: file.hubs.into_iter().map(CatalogEntry::into_hub).collect(),
        };
        catalog.validate()?;
        log::debug!(
            "[Catalog] Parsed {} offices and {} hubs",
            catalog.offices.len(),
            catalog.hubs.len()
        );
        Ok(catalog)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        log::debug!("[Catalog] Loading catalog from {:?}", path.as_ref());
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        let file = CatalogFile {
            offices: self.offices.iter().map(entry_from).collect(),
            hubs: self.hubs.iter().map(entry_from).collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for loc in self.offices.iter().chain(self.hubs.iter()) {
            if !loc.point.is_valid() {
                return Err(MeetsiteError::InvalidCoordinates {
                    name: loc.name.clone(),
                    lat: loc.point.lat,
                    lon: loc.point.lon,
                });
            }
            if !seen.insert(loc.id) {
                return Err(MeetsiteError::DuplicateLocation(loc.id));
            }
        }
        Ok(())
    }

    pub fn offices(&self) -> &[Location] {
        &self.offices
    }

    pub fn hubs(&self) -> &[Location] {
        &self.hubs
    }

    /// Looks up an office or hub by airport code (case-insensitive).
    /// Offices win when both lists carry the code.
    pub fn find(&self, code: &str) -> Option<&Location> {
        self.offices
            .iter()
            .chain(self.hubs.iter())
            .find(|l| l.code.eq_ignore_ascii_case(code))
    }

    pub fn set_attendees(&mut self, code: &str, count: u32) -> Result<()> {
        let office = self
            .offices
            .iter_mut()
            .find(|o| o.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| MeetsiteError::UnknownOffice(code.to_string()))?;
        office.set_attendees(count);
        log::debug!(
            "[Catalog] {} ({}) now has {} attendees",
            office.name,
            office.code,
            count
        );
        Ok(())
    }

    pub fn clear_attendees(&mut self) {
        for office in &mut self.offices {
            office.set_attendees(0);
        }
    }

    /// Summed as `u64` so offices at `u32::MAX` don't overflow.
    pub fn total_attendees(&self) -> u64 {
        self.offices
            .iter()
            .map(|o| u64::from(o.attendees()))
            .sum()
    }

    pub fn active_offices(&self) -> impl Iterator<Item = &Location> {
        self.offices.iter().filter(|o| o.attendees() > 0)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn entry_from(loc: &Location) -> CatalogEntry {
    CatalogEntry {
        id: loc.id,
        name: loc.name.clone(),
        code: loc.code.clone(),
        lat: loc.point.lat,
        lon: loc.point.lon,
        attendees: loc.attendees(),
        connectivity: loc.connectivity(),
        reason: loc.reason().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_loading() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.offices().len(), 13);
        assert_eq!(catalog.hubs().len(), 18);
        assert_eq!(catalog.total_attendees(), 0);
        assert!(catalog.offices().iter().all(Location::is_office));
        assert!(catalog.hubs().iter().all(|h| !h.is_office()));
        assert!(catalog.validate().is_ok());

        let ist = catalog.find("ist").expect("Istanbul missing");
        assert_eq!(ist.name, "Istanbul");
        assert_eq!(ist.connectivity(), Some(ConnectivityTier::VeryHigh));
        assert_eq!(
            ist.reason(),
            Some("#1 most destinations (309), Europe-Asia bridge")
        );

        let syd = catalog.find("SYD").expect("Sydney missing");
        assert_eq!(syd.id, 4);
        assert!(syd.is_office());

        assert!(catalog.find("ZZZ").is_none());
    }

    #[test]
    fn test_set_attendees() {
        let mut catalog = Catalog::builtin();
        catalog.set_attendees("lhr", 10).unwrap();
        catalog.set_attendees("SYD", 5).unwrap();
        assert_eq!(catalog.total_attendees(), 15);
        assert_eq!(catalog.active_offices().count(), 2);

        // Hubs are not offices
        let err = catalog.set_attendees("AMS", 3).unwrap_err();
        assert!(matches!(err, MeetsiteError::UnknownOffice(ref c) if c == "AMS"));

        catalog.clear_attendees();
        assert_eq!(catalog.total_attendees(), 0);
    }

    #[test]
    fn test_total_attendees_beyond_u32() {
        let mut catalog = Catalog::builtin();
        catalog.set_attendees("LHR", u32::MAX).unwrap();
        catalog.set_attendees("SYD", 1).unwrap();
        assert_eq!(catalog.total_attendees(), u64::from(u32::MAX) + 1);
        assert_eq!(catalog.active_offices().count(), 2);
    }

    #[test]
    fn test_rejects_bad_coordinates() {
        let json = r#"{ "offices": [ { "id": 1, "name": "Nowhere", "code": "NWH", "lat": 95.0, "lon": 0.0 } ] }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, MeetsiteError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{
            "offices": [ { "id": 7, "name": "A", "code": "AAA", "lat": 1.0, "lon": 1.0 } ],
            "hubs": [ { "id": 7, "name": "B", "code": "BBB", "lat": 2.0, "lon": 2.0 } ]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, MeetsiteError::DuplicateLocation(7)));
    }

    #[test]
    fn test_json_round_trip_keeps_counts() {
        let mut catalog = Catalog::builtin();
        catalog.set_attendees("CDG", 7).unwrap();
        let json = catalog.to_json().unwrap();
        let back = Catalog::from_json(&json).unwrap();
        assert_eq!(back.offices(), catalog.offices());
        assert_eq!(back.hubs(), catalog.hubs());
        assert_eq!(back.find("CDG").unwrap().attendees(), 7);
    }
}
