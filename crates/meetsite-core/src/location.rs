use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hub importance of an external candidate. Shown to users, never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectivityTier {
    VeryHigh,
    High,
    Medium,
}

impl fmt::Display for ConnectivityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectivityTier::VeryHigh => "very-high",
            ConnectivityTier::High => "high",
            ConnectivityTier::Medium => "medium",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LocationRole {
    Office {
        attendees: u32,
    },
    Candidate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        connectivity: Option<ConnectivityTier>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    /// IATA code of the serving airport.
    pub code: String,
    pub point: GeoPoint,
    pub role: LocationRole,
}

impl Location {
    pub fn office(id: u32, name: &str, code: &str, lat: f64, lon: f64, attendees: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            code: code.to_string(),
            point: GeoPoint::new(lat, lon),
            role: LocationRole::Office { attendees },
        }
    }

    pub fn candidate(
        id: u32,
        name: &str,
        code: &str,
        lat: f64,
        lon: f64,
        connectivity: Option<ConnectivityTier>,
        reason: Option<&str>,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            code: code.to_string(),
            point: GeoPoint::new(lat, lon),
            role: LocationRole::Candidate {
                connectivity,
                reason: reason.map(str::to_string),
            },
        }
    }

    pub fn is_office(&self) -> bool {
        matches!(self.role, LocationRole::Office { .. })
    }

    /// Attendee count for offices, 0 for external candidates.
    pub fn attendees(&self) -> u32 {
        match self.role {
            LocationRole::Office { attendees } => attendees,
            LocationRole::Candidate { .. } => 0,
        }
    }

    /// Only offices carry a count; setting it on a candidate is a no-op.
    pub fn set_attendees(&mut self, count: u32) {
        if let LocationRole::Office { ref mut attendees } = self.role {
            *attendees = count;
        }
    }

    pub fn connectivity(&self) -> Option<ConnectivityTier> {
        match self.role {
            LocationRole::Candidate { connectivity, .. } => connectivity,
            LocationRole::Office { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.role {
            LocationRole::Candidate { reason, .. } => reason.as_deref(),
            LocationRole::Office { .. } => None,
        }
    }

    /// Identity comparison. Two entries with the same id are the same site.
    pub fn same_site(&self, other: &Location) -> bool {
        self.id == other.id
    }
}

/// An office taking part in a scoring run. Built only for offices with
/// at least one attendee.
#[derive(Debug, Clone, Copy)]
pub struct ParticipantGroup<'a> {
    pub office: &'a Location,
    pub attendees: u32,
}

impl<'a> ParticipantGroup<'a> {
    pub fn new(office: &'a Location, attendees: u32) -> Self {
        Self { office, attendees }
    }

    /// `None` when the office has no attendees.
    pub fn from_office(office: &'a Location) -> Option<Self> {
        match office.attendees() {
            0 => None,
            n => Some(Self::new(office, n)),
        }
    }
}
