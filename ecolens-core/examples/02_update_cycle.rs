//! Update Cycle Example
//!
//! Drives the full monitor over the six default cameras for a simulated
//! minute, printing city-wide statistics each cycle.
//!
//! ## What You'll Learn
//!
//! - Building a monitor from an `EcoConfig`
//! - Feeding weather from the cached weather service
//! - Reading snapshots, forecasts, and engine status
//! - Persisting readings through a `ReadingSink`
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_update_cycle
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use ecolens_core::{
    EcoConfig, EngineResult, FixedClock, LocationSnapshot, Monitor, ReadingSink, WeatherService,
};

/// Prints a line per stored batch instead of writing to a database
struct ConsoleSink;

impl ReadingSink for ConsoleSink {
    fn store(&mut self, readings: &[LocationSnapshot]) -> EngineResult<()> {
        println!("  [sink] stored {} readings", readings.len());
        Ok(())
    }
}

fn main() -> EngineResult<()> {
    println!("EcoLens Update Cycle Example");
    println!("============================\n");

    let config = EcoConfig::from_json_str(r#"{ "interpolation": { "resolution": 25 } }"#)?;
    let clock = Arc::new(FixedClock::at(2024, 6, 3, 17, 0));

    let mut weather = WeatherService::new(config.weather.clone())
        .with_seed(11)
        .with_clock(clock.clone());
    let mut monitor = Monitor::new(config)
        .with_seed(11)
        .with_clock(clock.clone())
        .with_sink(Box::new(ConsoleSink));

    let frames = HashMap::new();
    for _ in 0..12 {
        let conditions = weather.fetch();
        let snapshot = monitor.run_cycle(&conditions, &frames);
        let stats = &snapshot.stats;

        println!(
            "Cycle {:2}: AQI {:5.1}, PM2.5 {:5.1}, noise {:4.1} dB, {:4} vehicles, worst {}",
            snapshot.cycle,
            stats.avg_aqi,
            stats.avg_pm25,
            stats.avg_noise_db,
            stats.total_vehicles,
            stats.most_polluted_zone.as_deref().unwrap_or("-"),
        );
        clock.advance(Duration::seconds(5));
    }

    let snapshot = monitor.snapshot();
    println!("\nForecast for {}:", monitor.locations()[0].name);
    for point in snapshot.forecast.iter().step_by(2) {
        println!(
            "  +{:3} min: {:5.1} µg/m³  [{:5.1}, {:5.1}]",
            point.horizon_minutes, point.predicted_pm25, point.lower_bound, point.upper_bound
        );
    }

    let summary = monitor.health_summary();
    println!("\nHealth summary: avg score {}, worst {}", summary.avg_score, summary.worst_risk_level);

    let status = monitor.status();
    println!("\nStatus:");
    println!("{}", serde_json::to_string_pretty(&status)?);

    Ok(())
}
