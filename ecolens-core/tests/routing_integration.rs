//! Route planner integration tests
//!
//! Green versus shortest routes over the city readings, plus the routes the
//! monitor plans between its own locations.

mod common;

use std::collections::HashMap;

use ecolens_core::{GeoPoint, PollutionSample, RoutePlanner, RoutingConfig};

use common::{city_samples, quiet_monitor, reference_weather};

// ===== ROUTING CONSTANTS =====

/// Lattice spacing of the default planner (°)
const STEP_DEG: f64 = 0.002;

fn planner() -> RoutePlanner {
    let mut planner = RoutePlanner::new(RoutingConfig::default());
    planner.update_readings(city_samples());
    planner
}

fn trips() -> Vec<(GeoPoint, GeoPoint)> {
    vec![
        (GeoPoint::new(40.7580, -73.9855), GeoPoint::new(40.7648, -73.9724)),
        (GeoPoint::new(40.7061, -73.9969), GeoPoint::new(40.7074, -74.0113)),
        (GeoPoint::new(40.7400, -73.9900), GeoPoint::new(40.7550, -73.9700)),
    ]
}

#[test]
fn green_never_worse_than_shortest() {
    let planner = planner();
    for (from, to) in trips() {
        let route = planner.find_route(&from, &to).unwrap();
        let c = route.comparison;
        assert!(c.green_path_exposure <= c.shortest_path_exposure + 1e-9);
        assert!(c.reduction_percent >= 0.0);
        assert!(c.reduction_percent <= 100.0);
        assert_eq!(route.estimated_exposure, c.green_path_exposure);
    }
}

#[test]
fn endpoints_snap_near_request() {
    let planner = planner();
    for (from, to) in trips() {
        let route = planner.find_route(&from, &to).unwrap();
        let first = route.path.first().unwrap();
        let last = route.path.last().unwrap();
        assert!((first.lat - from.lat).abs() <= STEP_DEG);
        assert!((first.lng - from.lng).abs() <= STEP_DEG);
        assert!((last.lat - to.lat).abs() <= STEP_DEG);
        assert!((last.lng - to.lng).abs() <= STEP_DEG);
    }
}

#[test]
fn average_pollution_matches_exposure() {
    let planner = planner();
    let (from, to) = &trips()[0];
    let route = planner.find_route(from, to).unwrap();
    let expected = route.estimated_exposure / route.total_distance_km;
    assert!((route.avg_pollution - expected).abs() < 1e-9);
}

#[test]
fn no_readings_uses_background() {
    let planner = RoutePlanner::new(RoutingConfig::default());
    let route = planner
        .find_route(&GeoPoint::new(40.75, -73.99), &GeoPoint::new(40.76, -73.98))
        .unwrap();
    assert!((route.avg_pollution - 15.0).abs() < 1e-9);
    assert_eq!(route.comparison.reduction_percent, 0.0);
}

#[test]
fn hotspot_pushes_route_away() {
    let mut planner = RoutePlanner::new(RoutingConfig::default());
    planner.update_readings(vec![
        PollutionSample::new(40.7500, -73.9800, 150.0),
        PollutionSample::new(40.7600, -73.9600, 5.0),
        PollutionSample::new(40.7400, -73.9600, 5.0),
    ]);
    let route = planner
        .find_route(&GeoPoint::new(40.7500, -73.9900), &GeoPoint::new(40.7500, -73.9700))
        .unwrap();
    assert!(route.comparison.reduction_percent > 0.0);
}

#[test]
fn monitor_routes_between_locations() {
    let mut monitor = quiet_monitor();
    monitor.run_cycle(&reference_weather(), &HashMap::new());

    let route = monitor.route_between("cam-001", "cam-003").unwrap();
    assert!(route.path.len() >= 2);
    assert!(route.total_distance_km > 0.0);

    let direct = monitor
        .route(&GeoPoint::new(40.7580, -73.9855), &GeoPoint::new(40.7648, -73.9724))
        .unwrap();
    assert_eq!(direct, route);
}
