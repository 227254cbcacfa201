//! Road-network distances from a running OSRM server.
//!
//! Needs an `osrm-routed` instance loaded with Vietnam data. Point
//! `OSRM_URL` at it and run with `--ignored`.

mod fixtures;

use std::env;

use itinerary_planner::haversine::HaversineMatrix;
use itinerary_planner::osrm::{OsrmClient, OsrmConfig};
use itinerary_planner::path_index::ShortestPathIndex;
use itinerary_planner::place::PlaceRecord;
use itinerary_planner::traits::DistanceMatrixProvider;
use itinerary_planner::TripPlanner;

use fixtures::*;

fn client() -> OsrmClient {
    let config = OsrmConfig {
        base_url: env::var("OSRM_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
        ..OsrmConfig::default()
    };
    OsrmClient::new(config).expect("build OSRM client")
}

#[test]
#[ignore = "requires a running OSRM server"]
fn osrm_table_returns_matrix() {
    init_tracing();
    let locations = [
        CHAM_MUSEUM.coords(),
        ACTIVITIES[0].coords(),
        HOI_AN_ANCIENT_TOWN.coords(),
    ];

    let matrix = client().matrix_for(&locations);

    assert_eq!(matrix.len(), 3);
    for row in &matrix {
        assert_eq!(row.len(), 3);
    }
    assert_eq!(matrix[0][0], 0.0);
    let straight = HaversineMatrix::haversine_km(locations[0], locations[2]);
    assert!(matrix[0][2] >= straight, "road distance shorter than great circle");
}

#[test]
#[ignore = "requires a running OSRM server"]
fn road_index_is_symmetric() {
    let places: Vec<PlaceRecord> = ACTIVITIES.iter().map(activity).collect();
    let refs: Vec<&PlaceRecord> = places.iter().collect();

    let index = ShortestPathIndex::build(&refs, &client());

    for a in &places {
        for b in &places {
            let ab = index.distance(&a.id, &b.id).unwrap();
            let ba = index.distance(&b.id, &a.id).unwrap();
            assert_eq!(ab, ba);
        }
    }
}

#[test]
fn unreachable_server_falls_back_to_haversine() {
    init_tracing();
    let client = OsrmClient::new(OsrmConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 1,
        ..OsrmConfig::default()
    })
    .expect("build OSRM client");
    let source = InMemorySource::new().with(DESTINATION, centre_places());
    let content = FixedContent::new(0.5);

    let trip = TripPlanner::new(&source, &content, &RatingCollab, &client)
        .plan(&context(1))
        .expect("plan without road data");

    assert_eq!(trip.summary.scheduled_places, 7);
}
