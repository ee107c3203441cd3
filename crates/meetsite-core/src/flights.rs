// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Meetsite Contributors

//! Synthetic flight offers for a route.
//!
//! The schedule shape is deterministic (offer count, departure spread); stop,
//! duration jitter, fare noise and airline come from the caller's RNG. The
//! date is carried on each offer for display and does not change the
//! schedule.

use crate::geo::{distance_km, estimate_co2_kg, estimate_flight_time_hours};
use crate::location::Location;
use crate::scoring::CandidateResult;
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::fmt;

pub const AIRLINES: [&str; 5] = [
    "British Airways",
    "Emirates",
    "Singapore Airlines",
    "United",
    "Lufthansa",
];

const FIRST_DEPARTURE_HOUR: f64 = 6.0;
const DEPARTURE_WINDOW_HOURS: f64 = 18.0;

/// Only routes longer than this may connect.
pub const CONNECTION_THRESHOLD_KM: f64 = 8000.0;
const CONNECTION_PROBABILITY: f64 = 0.4;
const CONNECTION_DURATION_FACTOR: f64 = 1.4;
const CONNECTION_CO2_FACTOR: f64 = 1.2;
const DURATION_JITTER_HOURS: f64 = 0.25;

const FARE_PER_KM: f64 = 0.15;
const NONSTOP_FARE_BASE: f64 = 150.0;
const CONNECTING_FARE_BASE: f64 = 50.0;
const FARE_NOISE: f64 = 200.0;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Wall-clock time of day. No date rollover is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    /// Rounds fractional hours to the nearest minute and wraps at 24h.
    pub fn from_hours(hours: f64) -> Self {
        let minutes = ((hours * 60.0).round() as i64).rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightOffer {
    pub id: String,
    pub date: NaiveDate,
    pub departure: ClockTime,
    pub arrival: ClockTime,
    pub duration_hours: f64,
    pub stops: u8,
    pub co2_kg: f64,
    pub price: u32,
    pub airline: String,
}

/// Offers for every route of a ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteFlights {
    pub origin: Location,
    pub attendees: u32,
    pub offers: Vec<FlightOffer>,
}

/// 8 offers under 1000 km, 5 under 3000 km, otherwise 3.
pub fn offer_count(distance_km: f64) -> usize {
    if distance_km < 1000.0 {
        8
    } else if distance_km < 3000.0 {
        5
    } else {
        3
    }
}

fn departure_hour(index: usize, count: usize) -> f64 {
    FIRST_DEPARTURE_HOUR + index as f64 * (DEPARTURE_WINDOW_HOURS / count as f64)
}

/// Builds the offers for `origin` → `destination`, sorted by duration
/// (shortest first, stable).
pub fn generate_flights<R: Rng + ?Sized>(
    origin: &Location,
    destination: &Location,
    date: NaiveDate,
    rng: &mut R,
) -> Vec<FlightOffer> {
    let distance = distance_km(origin.point, destination.point);
    let base_hours = estimate_flight_time_hours(distance);
    let base_co2 = estimate_co2_kg(distance);
    let count = offer_count(distance);

    log::debug!(
        "[Flights] {} -> {}: {:.0} km, {} offers on {}",
        origin.code,
        destination.code,
        distance,
        count,
        date
    );

    let mut offers: Vec<FlightOffer> = (0..count)
        .map(|i| {
            let departure = departure_hour(i, count);
            let connects =
                distance > CONNECTION_THRESHOLD_KM && rng.gen_bool(CONNECTION_PROBABILITY);

            let jitter = rng.gen_range(-DURATION_JITTER_HOURS..DURATION_JITTER_HOURS);
            let duration = if connects {
                base_hours * CONNECTION_DURATION_FACTOR
            } else {
                base_hours
            } + jitter;

            let fare_base = if connects {
                CONNECTING_FARE_BASE
            } else {
                NONSTOP_FARE_BASE
            };
            let price = distance * FARE_PER_KM + fare_base + rng.gen_range(0.0..FARE_NOISE);

            let airline = AIRLINES[rng.gen_range(0..AIRLINES.len())];

            FlightOffer {
                id: format!("{}-{}-{}", origin.code, destination.code, i),
                date,
                departure: ClockTime::from_hours(departure),
                arrival: ClockTime::from_hours(departure + duration),
                duration_hours: duration,
                stops: u8::from(connects),
                co2_kg: if connects {
                    base_co2 * CONNECTION_CO2_FACTOR
                } else {
                    base_co2
                },
                price: price.round() as u32,
                airline: airline.to_string(),
            }
        })
        .collect();

    offers.sort_by(|a, b| a.duration_hours.total_cmp(&b.duration_hours));
    offers
}

/// Generates offers from each travelling office to the candidate site.
pub fn flights_for_candidate<R: Rng + ?Sized>(
    result: &CandidateResult,
    date: NaiveDate,
    rng: &mut R,
) -> Vec<RouteFlights> {
    result
        .routes
        .iter()
        .map(|route| RouteFlights {
            origin: route.origin.clone(),
            attendees: route.attendees,
            offers: generate_flights(&route.origin, &result.location, date, rng),
        })
        .collect()
}
