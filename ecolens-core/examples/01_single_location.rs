//! Single Location Example
//!
//! Runs the engine chain by hand for one camera: traffic counts feed the
//! dispersion engine and the noise model, and both feed the health scorer.
//!
//! ## What You'll Learn
//!
//! - Creating engines from their configs
//! - Fixing seed and clock for reproducible output
//! - Reading pollution, noise, and health results
//! - Adjusting risk for vulnerable groups
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_single_location
//! ```

use std::sync::Arc;

use ecolens_core::{
    DispersionConfig, DispersionEngine, FixedClock, HealthConfig, HealthScorer, NoiseConfig, NoiseModel,
    TrafficConfig, TrafficGenerator, VulnerabilityGroup, WeatherState,
};

fn main() {
    println!("EcoLens Single Location Example");
    println!("===============================\n");

    // Monday, morning rush hour
    let clock = Arc::new(FixedClock::at(2024, 6, 3, 8, 30));

    let mut traffic = TrafficGenerator::new(TrafficConfig::default())
        .with_seed(1)
        .with_clock(clock.clone());
    let mut dispersion = DispersionEngine::new(DispersionConfig::default())
        .with_seed(2)
        .with_clock(clock);
    let mut noise = NoiseModel::new(NoiseConfig::default()).with_seed(3);
    let scorer = HealthScorer::new(HealthConfig::default());

    let weather = WeatherState::new(2.5, 220.0, 28.0, 70.0);
    println!("Weather:");
    println!("  Wind: {:.1} m/s from {:.0}°", weather.wind_speed, weather.wind_direction);
    println!("  Temperature: {:.1}°C, humidity {:.0}%\n", weather.temperature, weather.humidity);

    let vehicles = traffic.detect_vehicles("cam-001", None);
    println!("Traffic at Times Square:");
    println!(
        "  {} cars, {} trucks, {} buses, {} motorcycles ({} total)\n",
        vehicles.cars,
        vehicles.trucks,
        vehicles.buses,
        vehicles.motorcycles,
        vehicles.total()
    );

    let pollution = dispersion.calculate_pollution(&vehicles, &weather);
    println!("Air quality:");
    println!("  PM2.5: {:.1} µg/m³", pollution.pm25);
    println!("  PM10:  {:.1} µg/m³", pollution.pm10);
    println!("  NO2:   {:.1} µg/m³", pollution.no2);
    println!("  CO:    {:.0} µg/m³", pollution.co);
    println!("  AQI {} ({})", pollution.aqi, pollution.category.label());
    if let Some(stability) = dispersion.last_stability() {
        println!("  Stability class: {:?}", stability);
    }
    println!();

    let sound = noise.calculate_noise(&vehicles);
    println!("Noise: {:.1} dB ({})\n", sound.db_level, sound.category);

    let health = scorer.calculate_health(&pollution, &sound);
    println!("Health:");
    println!("  Score: {}/100 ({})", health.score, health.risk_level);
    println!("  Cigarette equivalent: {:.2}/day", health.cigarette_equivalent);
    println!("  Advisory: {}\n", health.advisory);

    println!("Population-adjusted risk:");
    for group in VulnerabilityGroup::ALL {
        let risk = scorer.adjusted_risk(pollution.pm25, group);
        println!(
            "  {:<10} RR {:.3}, excess mortality {:+.2}%",
            group.name(),
            risk.relative_risk,
            risk.excess_mortality_percent
        );
    }
}
