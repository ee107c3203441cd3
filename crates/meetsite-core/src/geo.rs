// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Meetsite Contributors

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distances below this use the short-haul emission factor.
pub const SHORT_HAUL_THRESHOLD_KM: f64 = 1500.0;
pub const SHORT_HAUL_KG_PER_KM: f64 = 0.09;
pub const LONG_HAUL_KG_PER_KM: f64 = 0.08;

pub const CRUISE_SPEED_KMH: f64 = 800.0;
/// Taxi, climb and descent, added to every leg.
pub const GROUND_OVERHEAD_HOURS: f64 = 0.5;

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_km(*self, *other)
    }
}

/// Great-circle distance in kilometres (Haversine).
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    distance_km_between(a.lat, a.lon, b.lat, b.lon)
}

pub fn distance_km_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Per-passenger CO2 in kg. The factor drops at exactly 1500 km.
pub fn estimate_co2_kg(distance_km: f64) -> f64 {
    let factor = if distance_km < SHORT_HAUL_THRESHOLD_KM {
        SHORT_HAUL_KG_PER_KM
    } else {
        LONG_HAUL_KG_PER_KM
    };
    distance_km * factor
}

/// Nonstop block time in hours.
pub fn estimate_flight_time_hours(distance_km: f64) -> f64 {
    distance_km / CRUISE_SPEED_KMH + GROUND_OVERHEAD_HOURS
}
