//! Monitoring cycle integration tests
//!
//! Drives the full engine chain through [`Monitor`] with seeded engines and a
//! fixed clock.
//!
//! ## Test Scope
//!
//! - Snapshot contents and cadence (grid, forecast, sink)
//! - Detector frames versus simulated traffic
//! - Determinism under a shared seed
//! - Location-keyed queries against the published snapshot

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Duration;
use ecolens_core::{
    EngineError, EngineResult, LocationSnapshot, ReadingSink, RiskLevel, VulnerabilityGroup,
};

use common::{quiet_monitor, reference_weather, rush_hour_clock, FixedDetector};

// ===== CYCLE CONSTANTS =====

/// Cycles in one persistence period
const PERSIST_EVERY: usize = 12;

/// Points in the default 6 h / 30 min forecast
const FORECAST_POINTS: usize = 12;

struct MemorySink(Arc<Mutex<Vec<Vec<LocationSnapshot>>>>);

impl ReadingSink for MemorySink {
    fn store(&mut self, readings: &[LocationSnapshot]) -> EngineResult<()> {
        self.0.lock().unwrap().push(readings.to_vec());
        Ok(())
    }
}

#[test]
fn first_cycle_publishes_full_snapshot() {
    let mut monitor = quiet_monitor();
    let snapshot = monitor.run_cycle(&reference_weather(), &HashMap::new());

    assert_eq!(snapshot.readings.len(), 6);
    assert_eq!(snapshot.forecast.len(), FORECAST_POINTS);
    assert!(snapshot.grid.is_some());
    assert!(Arc::ptr_eq(&snapshot, &monitor.snapshot()));

    for reading in &snapshot.readings {
        assert!(reading.pollution.pm25 >= 1.0);
        assert!(reading.pollution.aqi <= 500);
        assert!(reading.noise.db_level >= 30.0);
        assert!(reading.health.score <= 100);
        assert_eq!(reading.timestamp, snapshot.timestamp);
    }
}

#[test]
fn same_seed_same_snapshot() {
    let mut a = quiet_monitor();
    let mut b = quiet_monitor();
    for _ in 0..4 {
        let sa = a.run_cycle(&reference_weather(), &HashMap::new());
        let sb = b.run_cycle(&reference_weather(), &HashMap::new());
        assert_eq!(*sa, *sb);
    }
}

#[test]
fn detector_frames_override_simulation() {
    let mut monitor = quiet_monitor().with_detector(Box::new(FixedDetector::busy_street()));
    let mut frames = HashMap::new();
    frames.insert("cam-001".to_string(), vec![0u8; 16]);

    let snapshot = monitor.run_cycle(&reference_weather(), &frames);
    let with_frame = snapshot.reading("cam-001").unwrap();
    assert_eq!(with_frame.vehicles, FixedDetector::busy_street().0);
    assert_eq!(with_frame.vehicles.total(), 61);
}

#[test]
fn sink_receives_every_twelfth_cycle() {
    let stored = Arc::new(Mutex::new(Vec::new()));
    let mut monitor = quiet_monitor().with_sink(Box::new(MemorySink(Arc::clone(&stored))));

    let mut last = None;
    for _ in 0..PERSIST_EVERY {
        last = Some(monitor.run_cycle(&reference_weather(), &HashMap::new()));
    }

    let stored = stored.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], last.unwrap().readings);
}

#[test]
fn timestamps_follow_clock() {
    let clock = rush_hour_clock();
    let mut monitor = quiet_monitor().with_clock(clock.clone());

    let first = monitor.run_cycle(&reference_weather(), &HashMap::new());
    clock.advance(Duration::seconds(5));
    let second = monitor.run_cycle(&reference_weather(), &HashMap::new());

    assert_eq!(second.timestamp - first.timestamp, Duration::seconds(5));
    assert_eq!(second.forecast[0].timestamp, second.timestamp + Duration::minutes(30));
}

#[test]
fn seasonal_history_drives_forecast() {
    let mut monitor = quiet_monitor();
    monitor.run_cycle(&reference_weather(), &HashMap::new());
    for h in 0..48 {
        let pm25 = 20.0 + 8.0 * (h as f64 * std::f64::consts::TAU / 24.0).sin();
        monitor.add_hourly_reading("cam-003", pm25).unwrap();
    }

    let forecast = monitor.forecast("cam-003", 12.0, 60).unwrap();
    assert_eq!(forecast.len(), 12);
    for point in &forecast {
        assert!(point.lower_bound <= point.predicted_pm25);
        assert!(point.predicted_pm25 <= point.upper_bound);
    }
    assert_eq!(monitor.status().forecast_history["cam-003"].hourly, 48);
}

#[test]
fn queries_reject_untracked_ids() {
    let mut monitor = quiet_monitor();
    monitor.run_cycle(&reference_weather(), &HashMap::new());

    assert!(matches!(monitor.reading("nowhere"), Err(EngineError::UnknownLocation(_))));
    assert!(matches!(
        monitor.add_hourly_reading("nowhere", 10.0),
        Err(EngineError::UnknownLocation(_))
    ));
    assert!(matches!(
        monitor.cumulative_dose("nowhere"),
        Err(EngineError::UnknownLocation(_))
    ));
}

#[test]
fn vulnerable_groups_carry_more_risk() {
    let mut monitor = quiet_monitor();
    monitor.run_cycle(&reference_weather(), &HashMap::new());

    let general = monitor.adjusted_risk("cam-001", VulnerabilityGroup::General).unwrap();
    let asthma = monitor.adjusted_risk("cam-001", VulnerabilityGroup::Asthma).unwrap();
    assert!(asthma.relative_risk > general.relative_risk);
    assert!(asthma.excess_mortality_percent > general.excess_mortality_percent);
}

#[test]
fn health_summary_counts_every_location() {
    let mut monitor = quiet_monitor();
    monitor.run_cycle(&reference_weather(), &HashMap::new());

    let summary = monitor.health_summary();
    assert_eq!(summary.location_count, 6);
    assert_eq!(summary.count_by_level.values().sum::<usize>(), 6);
    assert!(RiskLevel::ALL.contains(&summary.worst_risk_level));
}

#[test]
fn dose_accumulates_across_cycles() {
    let mut monitor = quiet_monitor();
    monitor.run_cycle(&reference_weather(), &HashMap::new());
    let once = monitor.cumulative_dose("cam-004").unwrap();
    monitor.run_cycle(&reference_weather(), &HashMap::new());
    let twice = monitor.cumulative_dose("cam-004").unwrap();
    assert!(twice > once);
}
