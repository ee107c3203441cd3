// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Meetsite Contributors

use chrono::NaiveDate;
use meetsite_core::flights::{offer_count, AIRLINES, CONNECTION_THRESHOLD_KM};
use meetsite_core::{
    distance_km, flights_for_candidate, generate_flights, rank_catalog, Catalog, OptimizationMode,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn meeting_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 11).unwrap()
}

#[test]
fn test_offer_counts_follow_distance_tiers() {
    let catalog = Catalog::builtin();
    let lhr = catalog.find("LHR").unwrap();
    let mut rng = StdRng::seed_from_u64(2026);

    // Paris ~344 km, Istanbul ~2500 km, Sydney ~17000 km
    for (code, expected) in [("CDG", 8), ("IST", 5), ("SYD", 3)] {
        let dest = catalog.find(code).unwrap();
        let offers = generate_flights(lhr, dest, meeting_day(), &mut rng);
        assert_eq!(offers.len(), expected, "LHR-{}", code);
        assert_eq!(offers.len(), offer_count(distance_km(lhr.point, dest.point)));
        assert!(offers
            .windows(2)
            .all(|w| w[0].duration_hours <= w[1].duration_hours));
    }
}

#[test]
fn test_connections_only_on_ultra_long_haul() {
    let catalog = Catalog::builtin();
    let lhr = catalog.find("LHR").unwrap();
    let syd = catalog.find("SYD").unwrap();
    let ist = catalog.find("IST").unwrap();
    assert!(distance_km(lhr.point, syd.point) > CONNECTION_THRESHOLD_KM);

    let mut seen_stops = [false; 2];
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for offer in generate_flights(lhr, syd, meeting_day(), &mut rng) {
            assert!(offer.stops <= 1);
            seen_stops[offer.stops as usize] = true;
            assert!(AIRLINES.contains(&offer.airline.as_str()));
        }
        for offer in generate_flights(lhr, ist, meeting_day(), &mut rng) {
            assert_eq!(offer.stops, 0);
        }
    }
    // Over 150 draws both outcomes appear
    assert!(seen_stops[0] && seen_stops[1]);
}

#[test]
fn test_date_does_not_change_schedule() {
    let catalog = Catalog::builtin();
    let zrh = catalog.find("ZRH").unwrap();
    let doh = catalog.find("DOH").unwrap();
    let other_day = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();

    let a = generate_flights(zrh, doh, meeting_day(), &mut StdRng::seed_from_u64(9));
    let b = generate_flights(zrh, doh, other_day, &mut StdRng::seed_from_u64(9));
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.departure, y.departure);
        assert_eq!(x.price, y.price);
        assert_eq!(x.airline, y.airline);
        assert_eq!(y.date, other_day);
    }
}

#[test]
fn test_enrich_best_candidate() {
    let mut catalog = Catalog::builtin();
    catalog.set_attendees("LHR", 10).unwrap();
    catalog.set_attendees("SYD", 10).unwrap();
    catalog.set_attendees("BUD", 0).unwrap();

    let results = rank_catalog(&catalog, OptimizationMode::Balanced);
    let best = &results[0];
    let mut rng = StdRng::seed_from_u64(1);
    let itinerary = flights_for_candidate(best, meeting_day(), &mut rng);

    assert_eq!(itinerary.len(), best.routes.len());
    for (route_flights, route) in itinerary.iter().zip(best.routes.iter()) {
        assert_eq!(route_flights.origin, route.origin);
        assert_eq!(route_flights.attendees, 10);
        assert_eq!(route_flights.offers.len(), offer_count(route.distance_km));
        for offer in &route_flights.offers {
            assert!(offer
                .id
                .starts_with(&format!("{}-{}-", route.origin.code, best.location.code)));
        }
    }

    // Same seed, same itinerary
    let again = flights_for_candidate(best, meeting_day(), &mut StdRng::seed_from_u64(1));
    assert_eq!(itinerary, again);
}
