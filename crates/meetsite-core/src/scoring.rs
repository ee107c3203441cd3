use crate::geo::{distance_km, estimate_co2_kg, estimate_flight_time_hours};
use crate::location::{Location, ParticipantGroup};
use serde::Serialize;

/// One office's trip to a candidate. Values are per traveller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub origin: Location,
    pub attendees: u32,
    pub distance_km: f64,
    pub co2_kg: f64,
    pub travel_hours: f64,
}

impl Route {
    fn compute(group: &ParticipantGroup<'_>, destination: &Location) -> Self {
        if group.office.same_site(destination) {
            return Self {
                origin: group.office.clone(),
                attendees: group.attendees,
                distance_km: 0.0,
                co2_kg: 0.0,
                travel_hours: 0.0,
            };
        }
        let distance = distance_km(group.office.point, destination.point);
        Self {
            origin: group.office.clone(),
            attendees: group.attendees,
            distance_km: distance,
            co2_kg: estimate_co2_kg(distance),
            travel_hours: estimate_flight_time_hours(distance),
        }
    }
}

/// Aggregate travel cost of hosting the meeting at `location`.
///
/// Totals and averages are attendee-weighted. `fairness_km` is the
/// population standard deviation of per-office distances (one sample per
/// office) around the weighted average distance. `score` is filled in by
/// [`crate::ranking::rank`] and is 0 straight out of [`score_candidate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateResult {
    pub location: Location,
    pub total_co2_kg: f64,
    pub avg_co2_kg: f64,
    pub total_distance_km: f64,
    pub avg_distance_km: f64,
    pub max_distance_km: f64,
    pub avg_travel_hours: f64,
    pub fairness_km: f64,
    pub score: f64,
    /// Attendees whose office is the candidate itself.
    pub local_attendees: u32,
    /// Excludes the local office's zero-length route.
    pub routes: Vec<Route>,
}

impl CandidateResult {
    pub fn total_attendees(&self) -> u64 {
        self.routes
            .iter()
            .map(|r| u64::from(r.attendees))
            .sum::<u64>()
            + u64::from(self.local_attendees)
    }
}

/// Must not be called with an empty `groups` slice (or one whose attendees
/// sum to zero); the averages would divide by zero.
pub fn score_candidate(groups: &[ParticipantGroup<'_>], candidate: &Location) -> CandidateResult {
    let routes: Vec<Route> = groups.iter().map(|g| Route::compute(g, candidate)).collect();

    let total_attendees: f64 = routes.iter().map(|r| f64::from(r.attendees)).sum();
    let weighted = |f: fn(&Route) -> f64| -> f64 {
        routes
            .iter()
            .map(|r| f(r) * f64::from(r.attendees))
            .sum()
    };

    let total_co2_kg = weighted(|r| r.co2_kg);
    let total_distance_km = weighted(|r| r.distance_km);
    let total_hours = weighted(|r| r.travel_hours);
    let max_distance_km = routes.iter().map(|r| r.distance_km).fold(0.0, f64::max);

    let avg_distance_km = total_distance_km / total_attendees;

    // Unweighted across offices, centred on the weighted mean. The local
    // office's zero route is still a sample here.
    let variance = routes
        .iter()
        .map(|r| (r.distance_km - avg_distance_km).powi(2))
        .sum::<f64>()
        / routes.len() as f64;

    let local_attendees = routes
        .iter()
        .filter(|r| r.origin.same_site(candidate))
        .map(|r| r.attendees)
        .sum();

    CandidateResult {
        location: candidate.clone(),
        total_co2_kg,
        avg_co2_kg: total_co2_kg / total_attendees,
        total_distance_km,
        avg_distance_km,
        max_distance_km,
        avg_travel_hours: total_hours / total_attendees,
        fairness_km: variance.sqrt(),
        score: 0.0,
        local_attendees,
        routes: routes
            .into_iter()
            .filter(|r| !r.origin.same_site(candidate))
            .collect(),
    }
}
