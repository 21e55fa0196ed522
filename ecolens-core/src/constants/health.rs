//! Health scoring constants

/// WHO annual PM2.5 guideline (µg/m³).
///
/// Source: WHO Global Air Quality Guidelines (2021)
pub const WHO_PM25_GUIDELINE: f64 = 5.0;

/// WHO annual PM10 guideline (µg/m³).
///
/// Source: WHO Global Air Quality Guidelines (2021)
pub const WHO_PM10_GUIDELINE: f64 = 15.0;

/// WHO annual NO2 guideline (µg/m³).
///
/// Source: WHO Global Air Quality Guidelines (2021)
pub const WHO_NO2_GUIDELINE: f64 = 10.0;

/// Daytime outdoor noise threshold (dB).
///
/// Source: WHO Environmental Noise Guidelines (2018)
pub const NOISE_THRESHOLD_DB: f64 = 55.0;

/// Penalty points per guideline multiple of excess: PM2.5, PM10, NO2.
pub const PENALTY_WEIGHTS: [f64; 3] = [10.0, 5.0, 4.0];

/// Penalty caps: PM2.5, PM10, NO2.
pub const PENALTY_CAPS: [f64; 3] = [40.0, 15.0, 15.0];

/// Penalty points per dB above the noise threshold.
pub const NOISE_PENALTY_PER_DB: f64 = 0.5;

/// Cap on the noise penalty.
pub const NOISE_PENALTY_CAP: f64 = 15.0;

/// Lower score bounds for Low, Moderate, High, Very High.
pub const RISK_BREAKPOINTS: [f64; 4] = [80.0, 60.0, 40.0, 20.0];

/// PM2.5 equivalent of one cigarette per day (µg/m³).
///
/// Source: Berkeley Earth, "Air Pollution and Cigarette Equivalence" (2015)
pub const CIGARETTE_PM25_EQUIVALENT: f64 = 22.0;

/// Default exposure window (h).
pub const DEFAULT_EXPOSURE_HOURS: f64 = 24.0;

/// PM2.5 above which the advisory recommends N95 masks (µg/m³).
pub const MASK_ADVISORY_PM25: f64 = 55.0;

/// Noise above which the advisory recommends hearing protection (dB).
pub const HEARING_ADVISORY_DB: f64 = 70.0;

/// Log-linear mortality coefficient per µg/m³ PM2.5.
///
/// Source: Krewski et al. (2009), ACS cohort extended analysis
pub const MORTALITY_BETA: f64 = 0.006;
