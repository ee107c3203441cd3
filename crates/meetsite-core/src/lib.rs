// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Meetsite Contributors

pub mod catalog;
pub mod config;
pub mod flights;
pub mod geo;
pub mod location;
pub mod ranking;
pub mod schedule;
pub mod scoring;

pub use catalog::Catalog;
pub use flights::{flights_for_candidate, generate_flights, FlightOffer, RouteFlights};
pub use geo::{distance_km, estimate_co2_kg, estimate_flight_time_hours, GeoPoint};
pub use location::{ConnectivityTier, Location, LocationRole, ParticipantGroup};
pub use ranking::{rank, rank_catalog, OptimizationMode};
pub use scoring::{score_candidate, CandidateResult, Route};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeetsiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No office with airport code '{0}'")]
    UnknownOffice(String),
    #[error("Coordinates out of range for {name}: ({lat}, {lon})")]
    InvalidCoordinates { name: String, lat: f64, lon: f64 },
    #[error("Duplicate location id {0}")]
    DuplicateLocation(u32),
    #[error("Invalid meeting window: {0}")]
    InvalidWindow(String),
    #[error("Unknown optimization mode '{0}' (expected carbon/co2, distance/fairness or balanced)")]
    InvalidMode(String),
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, MeetsiteError>;
