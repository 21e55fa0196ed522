//! Monitoring cycle
//!
//! [`Monitor`] owns one instance of every engine and drives them over a fixed
//! set of locations. Each call to [`Monitor::run_cycle`] produces a new
//! immutable [`Snapshot`] that replaces the previous one.
//!
//! ## Cycle
//!
//! ```text
//! for each location:
//!     frame ──► traffic ──► pollution ──► noise ──► health
//!                              │
//!                              ├──► forecaster observation, dose ledger
//!                              └──► particles
//!
//! readings ──► route planner samples
//!          ──► interpolation grid          (every `grid_every` cycles)
//!          ──► global stats + forecast     (every cycle)
//!          ──► ReadingSink                 (every `persist_every` cycles)
//! ```
//!
//! The grid is built on cycle 1 and then every `grid_every` cycles; between
//! rebuilds the previous grid is carried forward. Sink failures are logged
//! and never abort the cycle.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::acoustics::{NoiseModel, NoiseSource};
use crate::config::EcoConfig;
use crate::dispersion::{DispersionEngine, EmissionRates, EmissionSource, StabilityClass};
use crate::errors::{EngineError, EngineResult};
use crate::forecast::{Forecaster, HistoryLen};
use crate::geo::{GeoPoint, GridBounds};
use crate::health::{aggregate, AdjustedRisk, HealthScorer, HealthSummary, VulnerabilityGroup};
use crate::interpolation::{Interpolator, VariogramModel};
use crate::macros::{log_debug, log_info, log_warn};
use crate::models::{
    ForecastPoint, HealthAssessment, InterpolationGrid, NoiseReading, Particle, PollutionReading, PollutionSample,
    RouteResult, VehicleCounts, WeatherState,
};
use crate::routing::RoutePlanner;
use crate::time::{Clock, SystemClock};
use crate::traffic::{LocationProfile, TrafficGenerator};
use crate::traits::{ReadingSink, VehicleDetector};

/// A camera site under observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoredLocation {
    /// Stable identifier, also the traffic profile key
    pub id: String,
    /// Display name
    pub name: String,
    /// Camera position
    pub position: GeoPoint,
}

impl MonitoredLocation {
    /// Create a location
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: GeoPoint::new(lat, lng),
        }
    }
}

/// The six Manhattan/Brooklyn/Queens cameras with built-in traffic profiles
pub fn default_locations() -> Vec<MonitoredLocation> {
    vec![
        MonitoredLocation::new("cam-001", "Times Square", 40.7580, -73.9855),
        MonitoredLocation::new("cam-002", "Brooklyn Bridge", 40.7061, -73.9969),
        MonitoredLocation::new("cam-003", "Central Park South", 40.7648, -73.9724),
        MonitoredLocation::new("cam-004", "Wall Street", 40.7074, -74.0113),
        MonitoredLocation::new("cam-005", "Harlem", 40.8116, -73.9465),
        MonitoredLocation::new("cam-006", "Queens Blvd", 40.7282, -73.7949),
    ]
}

/// Everything computed for one location in one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    /// Location identifier
    pub location_id: String,
    /// Display name
    pub name: String,
    /// Camera position
    pub position: GeoPoint,
    /// Smoothed vehicle counts
    pub vehicles: VehicleCounts,
    /// Pollutant concentrations
    pub pollution: PollutionReading,
    /// Sound level
    pub noise: NoiseReading,
    /// Composite health score
    pub health: HealthAssessment,
    /// Cycle time
    pub timestamp: DateTime<Utc>,
}

/// City-wide summary of one cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Locations with a reading
    pub active_locations: usize,
    /// Mean AQI
    pub avg_aqi: f64,
    /// Mean PM2.5 (µg/m³)
    pub avg_pm25: f64,
    /// Mean sound level (dB)
    pub avg_noise_db: f64,
    /// Vehicles across all locations
    pub total_vehicles: u64,
    /// Location with the lowest AQI (first on ties)
    pub healthiest_zone: Option<String>,
    /// Location with the highest AQI (first on ties)
    pub most_polluted_zone: Option<String>,
}

impl GlobalStats {
    /// Summarize a batch of readings
    pub fn from_readings(readings: &[LocationSnapshot]) -> Self {
        if readings.is_empty() {
            return Self::default();
        }
        let n = readings.len() as f64;
        let mean = |f: fn(&LocationSnapshot) -> f64| readings.iter().map(f).sum::<f64>() / n;

        let mut healthiest = &readings[0];
        let mut most_polluted = &readings[0];
        for r in &readings[1..] {
            if r.pollution.aqi < healthiest.pollution.aqi {
                healthiest = r;
            }
            if r.pollution.aqi > most_polluted.pollution.aqi {
                most_polluted = r;
            }
        }

        Self {
            active_locations: readings.len(),
            avg_aqi: mean(|r| f64::from(r.pollution.aqi)),
            avg_pm25: mean(|r| r.pollution.pm25),
            avg_noise_db: mean(|r| r.noise.db_level),
            total_vehicles: readings.iter().map(|r| r.vehicles.total()).sum(),
            healthiest_zone: Some(healthiest.location_id.clone()),
            most_polluted_zone: Some(most_polluted.location_id.clone()),
        }
    }
}

/// Immutable result of one monitoring cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cycle time
    pub timestamp: DateTime<Utc>,
    /// Cycle number, 0 before the first cycle
    pub cycle: u64,
    /// Per-location readings in location order
    pub readings: Vec<LocationSnapshot>,
    /// Latest PM2.5 surface, if one has been built
    pub grid: Option<InterpolationGrid>,
    /// Visualization particles for every location
    pub particles: Vec<Particle>,
    /// City-wide summary
    pub stats: GlobalStats,
    /// Forecast for the first location
    pub forecast: Vec<ForecastPoint>,
}

impl Snapshot {
    /// Serialize as compact JSON
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reading for `location_id`
    pub fn reading(&self, location_id: &str) -> Option<&LocationSnapshot> {
        self.readings.iter().find(|r| r.location_id == location_id)
    }
}

/// Serializable engine state for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// Completed cycles
    pub cycles: u64,
    /// Tracked locations
    pub locations: usize,
    /// Stability class of the last dispersion run
    pub stability: Option<StabilityClass>,
    /// Variogram of the last kriging grid
    pub variogram: Option<VariogramModel>,
    /// Kriging cells answered by IDW in the last grid
    pub singular_cells: usize,
    /// Forecaster history sizes by location
    pub forecast_history: BTreeMap<String, HistoryLen>,
    /// Samples cached by the route planner
    pub cached_route_samples: usize,
    /// Locations with an exposure dose on record
    pub tracked_doses: usize,
}

/// Drives every engine over a set of locations
pub struct Monitor {
    config: EcoConfig,
    locations: Vec<MonitoredLocation>,
    clock: Arc<dyn Clock>,
    traffic: TrafficGenerator,
    dispersion: DispersionEngine,
    noise: NoiseModel,
    health: HealthScorer,
    forecaster: Forecaster,
    interpolator: Interpolator,
    router: RoutePlanner,
    sink: Option<Box<dyn ReadingSink>>,
    snapshot: Arc<Snapshot>,
}

impl Monitor {
    /// Monitor over [`default_locations`]
    pub fn new(config: EcoConfig) -> Self {
        Self {
            locations: default_locations(),
            clock: Arc::new(SystemClock),
            traffic: TrafficGenerator::new(config.traffic.clone()),
            dispersion: DispersionEngine::new(config.dispersion.clone()),
            noise: NoiseModel::new(config.noise.clone()),
            health: HealthScorer::new(config.health.clone()),
            forecaster: Forecaster::new(config.forecast.clone()),
            interpolator: Interpolator::new(config.interpolation.clone()),
            router: RoutePlanner::new(config.routing.clone()),
            sink: None,
            snapshot: Arc::new(Snapshot::default()),
            config,
        }
    }

    /// Replace the tracked locations
    pub fn with_locations(mut self, locations: Vec<MonitoredLocation>) -> Self {
        self.locations = locations;
        self
    }

    /// Seed every stochastic engine; each gets its own stream
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.traffic = std::mem::take(&mut self.traffic).with_seed(seed);
        self.dispersion = std::mem::take(&mut self.dispersion).with_seed(seed.wrapping_add(1));
        self.noise = std::mem::take(&mut self.noise).with_seed(seed.wrapping_add(2));
        self.forecaster = std::mem::take(&mut self.forecaster).with_seed(seed.wrapping_add(3));
        self
    }

    /// Share a clock with every time-dependent engine
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.traffic = std::mem::take(&mut self.traffic).with_clock(Arc::clone(&clock));
        self.dispersion = std::mem::take(&mut self.dispersion).with_clock(Arc::clone(&clock));
        self.forecaster = std::mem::take(&mut self.forecaster).with_clock(Arc::clone(&clock));
        self.clock = clock;
        self
    }

    /// Count vehicles from camera frames
    pub fn with_detector(mut self, detector: Box<dyn VehicleDetector>) -> Self {
        self.traffic = std::mem::take(&mut self.traffic).with_detector(detector);
        self
    }

    /// Register a traffic profile, e.g. for a location added with
    /// [`Monitor::with_locations`]
    pub fn with_profile(mut self, location_id: impl Into<String>, profile: LocationProfile) -> Self {
        self.traffic.register_profile(location_id, profile);
        self
    }

    /// Persist readings periodically
    pub fn with_sink(mut self, sink: Box<dyn ReadingSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &EcoConfig {
        &self.config
    }

    /// Tracked locations
    pub fn locations(&self) -> &[MonitoredLocation] {
        &self.locations
    }

    /// Completed cycles
    pub fn cycle_count(&self) -> u64 {
        self.snapshot.cycle
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Run one cycle and publish its snapshot.
    ///
    /// `frames` maps location ids to camera frames; locations without a
    /// frame use simulated traffic.
    pub fn run_cycle(&mut self, weather: &WeatherState, frames: &HashMap<String, Vec<u8>>) -> Arc<Snapshot> {
        let cycle = self.snapshot.cycle + 1;
        let now = self.clock.now();
        let weather = weather.sanitized();
        let cadence = self.config.cycle.clone();
        let dose_hours = cadence.interval_secs / 3600.0;

        let mut readings = Vec::with_capacity(self.locations.len());
        let mut particles = Vec::with_capacity(self.locations.len() * cadence.particles_per_location);

        for location in &self.locations {
            let frame = frames.get(&location.id).map(Vec::as_slice);
            let vehicles = self.traffic.detect_vehicles(&location.id, frame);
            let pollution = self.dispersion.calculate_pollution(&vehicles, &weather);
            let noise = self.noise.calculate_noise(&vehicles);
            let health = self.health.calculate_health(&pollution, &noise);

            self.forecaster.record_observation(&location.id, pollution.pm25);
            self.health.record_dose(&location.id, pollution.pm25, dose_hours);
            particles.extend(self.dispersion.generate_particles(
                &location.id,
                &location.position,
                pollution.pm25,
                &weather,
                cadence.particles_per_location,
            ));

            readings.push(LocationSnapshot {
                location_id: location.id.clone(),
                name: location.name.clone(),
                position: location.position,
                vehicles,
                pollution,
                noise,
                health,
                timestamp: now,
            });
        }

        let samples: Arc<[PollutionSample]> = readings
            .iter()
            .map(|r| PollutionSample {
                position: r.position,
                pm25: r.pollution.pm25,
            })
            .collect();
        self.router.update_readings(Arc::clone(&samples));

        let grid = if (cycle - 1) % cadence.grid_every.max(1) == 0 {
            let grid = self.interpolator.generate_grid(&samples);
            log_debug!("Cycle {}: rebuilt {:?} grid", cycle, grid.method);
            Some(grid)
        } else {
            self.snapshot.grid.clone()
        };

        let stats = GlobalStats::from_readings(&readings);
        let forecast = match self.locations.first() {
            Some(first) => self.forecaster.generate_forecast(
                &first.id,
                cadence.forecast_horizon_hours,
                cadence.forecast_step_minutes,
            ),
            None => Vec::new(),
        };

        if cycle % cadence.persist_every.max(1) == 0 {
            if let Some(sink) = self.sink.as_mut() {
                match sink.store(&readings) {
                    Ok(()) => log_debug!("Cycle {}: stored {} readings", cycle, readings.len()),
                    Err(e) => log_warn!("Cycle {}: failed to store readings: {}", cycle, e),
                }
            }
        }

        log_info!(
            "Cycle {}: {} locations, avg AQI {:.0}, avg noise {:.1} dB",
            cycle,
            stats.active_locations,
            stats.avg_aqi,
            stats.avg_noise_db
        );

        let snapshot = Arc::new(Snapshot {
            timestamp: now,
            cycle,
            readings,
            grid,
            particles,
            stats,
            forecast,
        });
        self.snapshot = Arc::clone(&snapshot);
        snapshot
    }

    fn location(&self, location_id: &str) -> EngineResult<&MonitoredLocation> {
        self.locations
            .iter()
            .find(|l| l.id == location_id)
            .ok_or_else(|| EngineError::UnknownLocation(location_id.to_string()))
    }

    /// Latest reading for a tracked location; `None` before its first cycle
    pub fn reading(&self, location_id: &str) -> EngineResult<Option<LocationSnapshot>> {
        self.location(location_id)?;
        Ok(self.snapshot.reading(location_id).cloned())
    }

    /// PM2.5 forecast for a tracked location
    pub fn forecast(
        &mut self,
        location_id: &str,
        horizon_hours: f64,
        step_minutes: u32,
    ) -> EngineResult<Vec<ForecastPoint>> {
        self.location(location_id)?;
        Ok(self.forecaster.generate_forecast(location_id, horizon_hours, step_minutes))
    }

    /// Feed a completed hourly average to the seasonal model
    pub fn add_hourly_reading(&mut self, location_id: &str, pm25: f64) -> EngineResult<()> {
        self.location(location_id)?;
        self.forecaster.add_hourly_reading(location_id, pm25);
        Ok(())
    }

    /// Green route between arbitrary points over the latest readings
    pub fn route(&self, from: &GeoPoint, to: &GeoPoint) -> EngineResult<RouteResult> {
        self.router.find_route(from, to)
    }

    /// Green route between two tracked locations
    pub fn route_between(&self, from_id: &str, to_id: &str) -> EngineResult<RouteResult> {
        let from = self.location(from_id)?.position;
        let to = self.location(to_id)?.position;
        self.router.find_route(&from, &to)
    }

    /// Population-adjusted risk at a tracked location's latest PM2.5
    pub fn adjusted_risk(&self, location_id: &str, group: VulnerabilityGroup) -> EngineResult<AdjustedRisk> {
        let reading = self
            .reading(location_id)?
            .ok_or(EngineError::InsufficientHistory {
                required: 1,
                available: 0,
            })?;
        Ok(self.health.adjusted_risk(reading.pollution.pm25, group))
    }

    /// Exposure dose accumulated at a tracked location (µg/m³·h)
    pub fn cumulative_dose(&self, location_id: &str) -> EngineResult<f64> {
        self.location(location_id)?;
        Ok(self.health.cumulative_dose(location_id))
    }

    /// Aggregate of the latest health assessments
    pub fn health_summary(&self) -> HealthSummary {
        let assessments: Vec<HealthAssessment> =
            self.snapshot.readings.iter().map(|r| r.health.clone()).collect();
        aggregate(&assessments)
    }

    /// Sound level surface from the latest readings
    pub fn noise_grid(&self, bounds: &GridBounds, resolution: usize) -> Vec<Vec<f64>> {
        let sources: Vec<NoiseSource> = self
            .snapshot
            .readings
            .iter()
            .map(|r| NoiseSource::new(r.position, r.noise.db_level))
            .collect();
        self.noise.noise_grid(&sources, bounds, resolution)
    }

    /// Plume concentration surface from the latest traffic under `weather`
    pub fn concentration_grid(&self, weather: &WeatherState, bounds: &GridBounds, resolution: usize) -> Vec<Vec<f64>> {
        let weather = weather.sanitized();
        let sources: Vec<EmissionSource> = self
            .snapshot
            .readings
            .iter()
            .map(|r| {
                EmissionSource::at(r.position)
                    .with_emission(EmissionRates::from_counts(&r.vehicles).pm25)
                    .with_wind(weather.wind_speed, weather.wind_direction)
            })
            .collect();
        self.dispersion.concentration_grid(&sources, bounds, resolution)
    }

    /// Engine state for diagnostics
    pub fn status(&self) -> MonitorStatus {
        MonitorStatus {
            cycles: self.snapshot.cycle,
            locations: self.locations.len(),
            stability: self.dispersion.last_stability(),
            variogram: self.interpolator.last_variogram(),
            singular_cells: self.interpolator.last_singular_cells(),
            forecast_history: self.forecaster.history_lens().into_iter().collect(),
            cached_route_samples: self.router.readings().len(),
            tracked_doses: self.health.tracked_doses(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::time::FixedClock;

    fn monitor() -> Monitor {
        Monitor::new(EcoConfig::default())
            .with_seed(7)
            .with_clock(Arc::new(FixedClock::at(2024, 6, 3, 8, 30)))
    }

    fn calm() -> WeatherState {
        WeatherState::new(3.0, 220.0, 30.0, 55.0)
    }

    #[test]
    fn registered_profile_drives_new_location() {
        let mut monitor = Monitor::new(EcoConfig::default().with_jitter_scale(0.0))
            .with_clock(Arc::new(FixedClock::at(2024, 6, 3, 8, 30)))
            .with_locations(vec![MonitoredLocation::new("park-01", "Pedestrian Park", 40.77, -73.97)])
            .with_profile("park-01", LocationProfile::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0));

        let snapshot = monitor.run_cycle(&calm(), &HashMap::new());
        assert_eq!(snapshot.readings[0].vehicles.total(), 0);
    }

    struct CountingSink(Arc<Mutex<Vec<usize>>>);

    impl ReadingSink for CountingSink {
        fn store(&mut self, readings: &[LocationSnapshot]) -> EngineResult<()> {
            self.0.lock().unwrap().push(readings.len());
            Ok(())
        }
    }

    struct FailingSink;

    impl ReadingSink for FailingSink {
        fn store(&mut self, _readings: &[LocationSnapshot]) -> EngineResult<()> {
            Err(EngineError::UpstreamUnavailable("disk full".into()))
        }
    }

    #[test]
    fn default_locations_are_distinct() {
        let locations = default_locations();
        assert_eq!(locations.len(), 6);
        assert_eq!(locations[0].id, "cam-001");
        let mut ids: Vec<_> = locations.iter().map(|l| l.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn cycle_covers_every_location() {
        let mut m = monitor();
        let snap = m.run_cycle(&calm(), &HashMap::new());

        assert_eq!(snap.cycle, 1);
        assert_eq!(snap.readings.len(), 6);
        assert_eq!(snap.particles.len(), 6 * 12);
        assert_eq!(snap.stats.active_locations, 6);
        assert!(snap.grid.is_some());
        assert!(!snap.forecast.is_empty());
        assert_eq!(m.cycle_count(), 1);
    }

    #[test]
    fn grid_reused_between_rebuilds() {
        let mut m = monitor();
        let first = m.run_cycle(&calm(), &HashMap::new());
        let second = m.run_cycle(&calm(), &HashMap::new());
        assert_eq!(first.grid, second.grid);
        m.run_cycle(&calm(), &HashMap::new());
        let fourth = m.run_cycle(&calm(), &HashMap::new());
        assert!(fourth.grid.is_some());
    }

    #[test]
    fn stats_pick_extremes() {
        let mut m = monitor();
        let snap = m.run_cycle(&calm(), &HashMap::new());
        let min_aqi = snap.readings.iter().map(|r| r.pollution.aqi).min().unwrap();
        let max_aqi = snap.readings.iter().map(|r| r.pollution.aqi).max().unwrap();
        let healthiest = snap.reading(snap.stats.healthiest_zone.as_deref().unwrap()).unwrap();
        let worst = snap.reading(snap.stats.most_polluted_zone.as_deref().unwrap()).unwrap();
        assert_eq!(healthiest.pollution.aqi, min_aqi);
        assert_eq!(worst.pollution.aqi, max_aqi);
    }

    #[test]
    fn empty_stats_have_no_zones() {
        let stats = GlobalStats::from_readings(&[]);
        assert_eq!(stats.active_locations, 0);
        assert!(stats.healthiest_zone.is_none());
    }

    #[test]
    fn sink_called_on_schedule() {
        let stored = Arc::new(Mutex::new(Vec::new()));
        let mut m = monitor().with_sink(Box::new(CountingSink(Arc::clone(&stored))));
        for _ in 0..24 {
            m.run_cycle(&calm(), &HashMap::new());
        }
        assert_eq!(*stored.lock().unwrap(), vec![6, 6]);
    }

    #[test]
    fn sink_failure_not_fatal() {
        let mut m = monitor().with_sink(Box::new(FailingSink));
        for _ in 0..12 {
            m.run_cycle(&calm(), &HashMap::new());
        }
        assert_eq!(m.cycle_count(), 12);
    }

    #[test]
    fn unknown_location_rejected() {
        let mut m = monitor();
        m.run_cycle(&calm(), &HashMap::new());
        let unknown = EngineError::UnknownLocation("cam-999".into());

        assert_eq!(m.reading("cam-999"), Err(unknown.clone()));
        assert_eq!(m.forecast("cam-999", 6.0, 30), Err(unknown.clone()));
        assert_eq!(m.route_between("cam-001", "cam-999").map(|_| ()), Err(unknown.clone()));
        assert_eq!(
            m.adjusted_risk("cam-999", VulnerabilityGroup::Children).map(|_| ()),
            Err(unknown)
        );
    }

    #[test]
    fn risk_requires_a_reading() {
        let m = monitor();
        assert!(matches!(
            m.adjusted_risk("cam-001", VulnerabilityGroup::Asthma),
            Err(EngineError::InsufficientHistory { .. })
        ));
    }

    #[test]
    fn queries_after_cycle() {
        let mut m = monitor();
        m.run_cycle(&calm(), &HashMap::new());

        assert!(m.reading("cam-002").unwrap().is_some());
        let risk = m.adjusted_risk("cam-002", VulnerabilityGroup::Asthma).unwrap();
        assert!(risk.relative_risk >= 1.0);
        assert!(m.cumulative_dose("cam-002").unwrap() > 0.0);
        assert_eq!(m.health_summary().location_count, 6);

        let route = m.route_between("cam-001", "cam-003").unwrap();
        assert!(route.path.len() >= 2);
    }

    #[test]
    fn status_reflects_engines() {
        let mut m = monitor();
        m.run_cycle(&calm(), &HashMap::new());
        let status = m.status();

        assert_eq!(status.cycles, 1);
        assert_eq!(status.locations, 6);
        assert_eq!(status.cached_route_samples, 6);
        assert_eq!(status.forecast_history.len(), 6);
        assert!(status.stability.is_some());
        assert!(status.variogram.is_some());
        assert!(serde_json::to_string(&status).is_ok());
    }

    #[test]
    fn surfaces_from_latest_readings() {
        let mut m = monitor();
        m.run_cycle(&calm(), &HashMap::new());
        let bounds = GridBounds::default();

        let noise = m.noise_grid(&bounds, 6);
        assert_eq!(noise.len(), 6);
        assert!(noise.iter().flatten().all(|&db| db >= 35.0));

        let plume = m.concentration_grid(&calm(), &bounds, 6);
        assert!(plume.iter().flatten().all(|&c| c >= 5.0));
    }

    #[test]
    fn snapshot_serializes() {
        let mut m = monitor();
        let snap = m.run_cycle(&calm(), &HashMap::new());
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"cam-001\""));
        assert!(json.contains("\"healthiest_zone\""));
    }
}
