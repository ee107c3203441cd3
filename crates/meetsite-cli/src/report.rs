use anyhow::Result;
use meetsite_core::schedule::MeetingWindow;
use meetsite_core::{
    CandidateResult, Catalog, ConnectivityTier, FlightOffer, Location, OptimizationMode,
    RouteFlights,
};
use std::io::Write;

fn site_kind(loc: &Location) -> &'static str {
    if loc.is_office() {
        return "office";
    }
    match loc.connectivity() {
        Some(ConnectivityTier::VeryHigh) => "* hub",
        _ => "hub",
    }
}

pub fn print_offices(catalog: &Catalog) {
    println!("{:<4} {:<12} {:>9}", "Code", "Office", "Attendees");
    for office in catalog.offices() {
        println!("{:<4} {:<12} {:>9}", office.code, office.name, office.attendees());
    }
    println!(
        "\n{} attendees from {} offices",
        catalog.total_attendees(),
        catalog.active_offices().count()
    );
}

pub fn print_hubs(catalog: &Catalog) {
    for hub in catalog.hubs() {
        let tier = hub
            .connectivity()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4} {:<14} {:<10} {}",
            hub.code,
            hub.name,
            tier,
            hub.reason().unwrap_or("")
        );
    }
}

pub fn print_ranking(catalog: &Catalog, mode: OptimizationMode, results: &[CandidateResult]) {
    println!(
        "Rankings based on {} ({} attendees from {} offices)\n",
        mode.describe(),
        catalog.total_attendees(),
        catalog.active_offices().count()
    );
    println!(
        "{:>3}  {:<4} {:<14} {:<7} {:>10} {:>9} {:>9} {:>8} {:>9}",
        "#", "Code", "Site", "Kind", "Score", "CO2 kg", "Avg km", "Avg h", "Spread km"
    );
    for (i, r) in results.iter().enumerate() {
        println!(
            "{:>3}  {:<4} {:<14} {:<7} {:>10.3} {:>9.0} {:>9.0} {:>8.1} {:>9.0}",
            i + 1,
            r.location.code,
            r.location.name,
            site_kind(&r.location),
            r.score,
            r.total_co2_kg,
            r.avg_distance_km,
            r.avg_travel_hours,
            r.fairness_km
        );
        if let Some(reason) = r.location.reason() {
            println!("{:>5}{}", "", reason);
        }
    }
}

pub fn print_offers(origin: &Location, destination: &Location, offers: &[FlightOffer]) {
    println!("{} ({}) -> {} ({})", origin.name, origin.code, destination.name, destination.code);
    for offer in offers {
        println!(
            "  {}  {} -> {}  {:>5.1} h  {:<8} {:>6.0} kg  {:>5}  {}",
            offer.date,
            offer.departure,
            offer.arrival,
            offer.duration_hours,
            if offer.stops == 0 { "nonstop" } else { "1 stop" },
            offer.co2_kg,
            offer.price,
            offer.airline
        );
    }
}

pub fn print_plan(
    mode: OptimizationMode,
    window: &MeetingWindow,
    best: &CandidateResult,
    itinerary: &[RouteFlights],
) {
    println!(
        "Best site by {}: {} ({}), score {:.3}",
        mode.describe(),
        best.location.name,
        best.location.code,
        best.score
    );
    println!(
        "Meeting {} to {}, travel between {} and {}",
        window.start,
        window.last_day(),
        window.earliest_departure(),
        window.latest_return()
    );
    if best.local_attendees > 0 {
        println!("{} attendees are already on site", best.local_attendees);
    }
    for route in itinerary {
        println!("\n{} attendee(s) from:", route.attendees);
        print_offers(&route.origin, &best.location, &route.offers);
    }
}

pub fn write_ranking_csv<W: Write>(out: W, results: &[CandidateResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "rank",
        "code",
        "name",
        "kind",
        "score",
        "total_co2_kg",
        "avg_co2_kg",
        "total_distance_km",
        "avg_distance_km",
        "max_distance_km",
        "avg_travel_hours",
        "fairness_km",
    ])?;
    for (i, r) in results.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            r.location.code.clone(),
            r.location.name.clone(),
            if r.location.is_office() { "office" } else { "hub" }.to_string(),
            format!("{:.4}", r.score),
            format!("{:.0}", r.total_co2_kg),
            format!("{:.0}", r.avg_co2_kg),
            format!("{:.0}", r.total_distance_km),
            format!("{:.0}", r.avg_distance_km),
            format!("{:.0}", r.max_distance_km),
            format!("{:.1}", r.avg_travel_hours),
            format!("{:.0}", r.fairness_km),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_offers_csv<W: Write>(out: W, offers: &[FlightOffer]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "id", "date", "departure", "arrival", "duration_hours", "stops", "co2_kg", "price",
        "airline",
    ])?;
    for o in offers {
        wtr.write_record([
            o.id.clone(),
            o.date.to_string(),
            o.departure.to_string(),
            o.arrival.to_string(),
            format!("{:.1}", o.duration_hours),
            o.stops.to_string(),
            format!("{:.0}", o.co2_kg),
            o.price.to_string(),
            o.airline.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
