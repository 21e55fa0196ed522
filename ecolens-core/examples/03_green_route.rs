//! Green Route Example
//!
//! Plans a walking route that avoids a pollution hotspot and compares it with
//! the shortest route over the same lattice.
//!
//! ## What You'll Learn
//!
//! - Loading readings into the route planner
//! - Interpreting the green/shortest comparison
//! - Handling invalid coordinates
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 03_green_route
//! ```

use ecolens_core::{EngineError, GeoPoint, PollutionSample, RoutePlanner, RoutingConfig};

fn main() {
    println!("EcoLens Green Route Example");
    println!("===========================\n");

    let mut planner = RoutePlanner::new(RoutingConfig::default());
    planner.update_readings(vec![
        PollutionSample::new(40.7580, -73.9855, 85.0), // Times Square, congested
        PollutionSample::new(40.7648, -73.9724, 9.0),  // Central Park South
        PollutionSample::new(40.7484, -73.9857, 40.0), // Midtown
        PollutionSample::new(40.7527, -73.9772, 30.0), // Grand Central
    ]);

    let from = GeoPoint::new(40.7505, -73.9934);
    let to = GeoPoint::new(40.7644, -73.9745);

    match planner.find_route(&from, &to) {
        Ok(route) => {
            let c = &route.comparison;
            println!("Green route: {} waypoints", route.path.len());
            println!("  Distance: {:.2} km", route.total_distance_km);
            println!("  Average PM2.5: {:.1} µg/m³", route.avg_pollution);
            println!("  Exposure: {:.1} µg/m³·km\n", route.estimated_exposure);

            println!("Shortest route:");
            println!("  Distance: {:.2} km", c.shortest_path_distance_km);
            println!("  Exposure: {:.1} µg/m³·km\n", c.shortest_path_exposure);

            println!("Exposure reduced by {:.1}%", c.reduction_percent);
        }
        Err(e) => println!("Routing failed: {}", e),
    }

    println!("\nInvalid input:");
    match planner.find_route(&GeoPoint::new(f64::NAN, -73.99), &to) {
        Err(EngineError::InvalidValue { field, .. }) => println!("  rejected {}", field),
        other => println!("  unexpected: {:?}", other.map(|r| r.path.len())),
    }
}
