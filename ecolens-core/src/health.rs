//! Health Impact Scorer
//!
//! Reduces one pollution reading and one noise reading to a 0–100 score,
//! a risk band, a cigarette-equivalent dose, and advisory text.
//!
//! ## Score
//!
//! ```text
//! score = 100 − min(40, 10 · (PM2.5 − 5)/5)
//!             − min(15,  5 · (PM10 − 15)/15)
//!             − min(15,  4 · (NO2 − 10)/10)
//!             − min(15, 0.5 · (dB − 55))
//! ```
//!
//! Each term applies only above its guideline; the result is rounded and
//! clamped to [0, 100].
//!
//! ## Population-adjusted risk
//!
//! ```text
//! RR = exp(β · PM2.5 · m_group)      β = 0.006
//! excess mortality = (RR − 1) · 100 %
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::health::{
    CIGARETTE_PM25_EQUIVALENT, DEFAULT_EXPOSURE_HOURS, HEARING_ADVISORY_DB, MASK_ADVISORY_PM25, MORTALITY_BETA,
    NOISE_PENALTY_CAP, NOISE_PENALTY_PER_DB, NOISE_THRESHOLD_DB, PENALTY_CAPS, PENALTY_WEIGHTS, RISK_BREAKPOINTS,
    WHO_NO2_GUIDELINE, WHO_PM10_GUIDELINE, WHO_PM25_GUIDELINE,
};
use crate::errors::{EngineError, EngineResult};
use crate::models::{HealthAssessment, NoiseReading, PollutionReading, RiskLevel};

impl RiskLevel {
    /// Band for a health score
    pub fn from_score(score: u8) -> Self {
        let s = score as f64;
        let [low, moderate, high, very_high] = RISK_BREAKPOINTS;
        if s >= low {
            Self::Low
        } else if s >= moderate {
            Self::Moderate
        } else if s >= high {
            Self::High
        } else if s >= very_high {
            Self::VeryHigh
        } else {
            Self::Severe
        }
    }
}

/// Population groups with elevated PM2.5 sensitivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VulnerabilityGroup {
    /// General population
    General,
    /// Children (higher ventilation per kg)
    Children,
    /// Older adults
    Elderly,
    /// People with asthma
    Asthma,
    /// People with cardiovascular disease
    Cardiac,
    /// Pregnant people
    Pregnant,
}

impl VulnerabilityGroup {
    /// All groups
    pub const ALL: [VulnerabilityGroup; 6] = [
        Self::General,
        Self::Children,
        Self::Elderly,
        Self::Asthma,
        Self::Cardiac,
        Self::Pregnant,
    ];

    /// Dose multiplier relative to the general population
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::General => 1.0,
            Self::Children => 1.5,
            Self::Elderly => 1.4,
            Self::Asthma => 1.8,
            Self::Cardiac => 1.6,
            Self::Pregnant => 1.3,
        }
    }

    /// Lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Children => "children",
            Self::Elderly => "elderly",
            Self::Asthma => "asthma",
            Self::Cardiac => "cardiac",
            Self::Pregnant => "pregnant",
        }
    }
}

impl fmt::Display for VulnerabilityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VulnerabilityGroup {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.name() == wanted)
            .ok_or_else(|| EngineError::UnknownGroup(s.to_string()))
    }
}

/// Dose-response result for one population group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedRisk {
    /// Group evaluated
    pub group: VulnerabilityGroup,
    /// Group dose multiplier
    pub multiplier: f64,
    /// Relative risk versus clean air
    pub relative_risk: f64,
    /// Excess mortality (%)
    pub excess_mortality_percent: f64,
    /// Cigarette equivalent scaled by the multiplier
    pub adjusted_cigarettes: f64,
}

/// Reduction of many assessments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    /// Rounded mean score
    pub avg_score: u8,
    /// Most severe risk present
    pub worst_risk_level: RiskLevel,
    /// Mean cigarette equivalent
    pub avg_cigarette_equivalent: f64,
    /// Number of assessments per risk level
    pub count_by_level: BTreeMap<RiskLevel, usize>,
    /// Number of assessments reduced
    pub location_count: usize,
}

/// Health scorer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// PM2.5 guideline (µg/m³)
    pub pm25_guideline: f64,
    /// PM10 guideline (µg/m³)
    pub pm10_guideline: f64,
    /// NO2 guideline (µg/m³)
    pub no2_guideline: f64,
    /// Noise threshold (dB)
    pub noise_threshold_db: f64,
    /// Exposure window for cigarette equivalence (h)
    pub exposure_hours: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            pm25_guideline: WHO_PM25_GUIDELINE,
            pm10_guideline: WHO_PM10_GUIDELINE,
            no2_guideline: WHO_NO2_GUIDELINE,
            noise_threshold_db: NOISE_THRESHOLD_DB,
            exposure_hours: DEFAULT_EXPOSURE_HOURS,
        }
    }
}

impl HealthConfig {
    /// Set exposure window (h)
    pub fn with_exposure_hours(mut self, hours: f64) -> Self {
        self.exposure_hours = hours.max(0.0);
        self
    }
}

/// Cigarettes per day with the same PM2.5 dose over `hours`
pub fn cigarette_equivalent(pm25: f64, hours: f64) -> f64 {
    if pm25 <= 0.0 || hours <= 0.0 {
        return 0.0;
    }
    pm25 / CIGARETTE_PM25_EQUIVALENT * (hours / 24.0)
}

/// Guidance text for a score band with conditional clauses
pub fn advisory(score: u8, pm25: f64, noise_db: f64) -> String {
    match RiskLevel::from_score(score) {
        RiskLevel::Low => "Safe for all groups".to_string(),
        RiskLevel::Moderate => {
            let mut text = String::from(
                "Sensitive individuals (children, elderly, respiratory conditions) should limit prolonged outdoor exertion",
            );
            if noise_db > HEARING_ADVISORY_DB {
                text.push_str(". Hearing protection recommended for extended exposure");
            }
            text
        }
        RiskLevel::High => {
            let mut text =
                String::from("Everyone should reduce prolonged outdoor exertion. Sensitive groups should avoid outdoor activity");
            if pm25 > MASK_ADVISORY_PM25 {
                text.push_str(". Consider wearing N95 masks outdoors");
            }
            text
        }
        RiskLevel::VeryHigh => "Health alert: everyone may experience health effects. \
             Sensitive groups at serious risk. Stay indoors if possible"
            .to_string(),
        RiskLevel::Severe => "Emergency conditions: all outdoor activity should be avoided. \
             Keep windows closed. Use air purifiers indoors"
            .to_string(),
    }
}

/// Composite health scorer with a per-location cumulative dose ledger
#[derive(Debug, Clone, Default)]
pub struct HealthScorer {
    config: HealthConfig,
    doses: HashMap<String, f64>,
}

impl HealthScorer {
    /// Create a scorer
    pub fn new(config: HealthConfig) -> Self {
        Self { config, doses: HashMap::new() }
    }

    /// Active configuration
    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Composite 0–100 score
    pub fn score(&self, pm25: f64, pm10: f64, no2: f64, noise_db: f64) -> u8 {
        let c = &self.config;
        let excess_penalty = |value: f64, guideline: f64, weight: f64, cap: f64| {
            if value > guideline {
                ((value - guideline) / guideline * weight).min(cap)
            } else {
                0.0
            }
        };

        let mut score = 100.0;
        score -= excess_penalty(pm25, c.pm25_guideline, PENALTY_WEIGHTS[0], PENALTY_CAPS[0]);
        score -= excess_penalty(pm10, c.pm10_guideline, PENALTY_WEIGHTS[1], PENALTY_CAPS[1]);
        score -= excess_penalty(no2, c.no2_guideline, PENALTY_WEIGHTS[2], PENALTY_CAPS[2]);
        if noise_db > c.noise_threshold_db {
            score -= ((noise_db - c.noise_threshold_db) * NOISE_PENALTY_PER_DB).min(NOISE_PENALTY_CAP);
        }

        if score.is_nan() {
            return 0;
        }
        score.round().clamp(0.0, 100.0) as u8
    }

    /// Assessment for one observation
    pub fn calculate_health(&self, pollution: &PollutionReading, noise: &NoiseReading) -> HealthAssessment {
        let score = self.score(pollution.pm25, pollution.pm10, pollution.no2, noise.db_level);
        HealthAssessment {
            score,
            risk_level: RiskLevel::from_score(score),
            cigarette_equivalent: cigarette_equivalent(pollution.pm25, self.config.exposure_hours),
            advisory: advisory(score, pollution.pm25, noise.db_level),
        }
    }

    /// Relative risk for a population group
    pub fn adjusted_risk(&self, pm25: f64, group: VulnerabilityGroup) -> AdjustedRisk {
        let pm25 = pm25.max(0.0);
        let multiplier = group.multiplier();
        let relative_risk = (MORTALITY_BETA * pm25 * multiplier).exp();
        AdjustedRisk {
            group,
            multiplier,
            relative_risk,
            excess_mortality_percent: (relative_risk - 1.0) * 100.0,
            adjusted_cigarettes: cigarette_equivalent(pm25, self.config.exposure_hours) * multiplier,
        }
    }

    /// Relative risk for a group given by name
    pub fn adjusted_risk_for(&self, pm25: f64, group: &str) -> EngineResult<AdjustedRisk> {
        Ok(self.adjusted_risk(pm25, group.parse()?))
    }

    /// Add `pm25 · hours` to a location's dose; returns the new total
    pub fn record_dose(&mut self, location_id: &str, pm25: f64, hours: f64) -> f64 {
        let dose = self.doses.entry(location_id.to_string()).or_insert(0.0);
        *dose += pm25.max(0.0) * hours.max(0.0);
        *dose
    }

    /// Accumulated dose (µg/m³·h), 0 for unseen locations
    pub fn cumulative_dose(&self, location_id: &str) -> f64 {
        self.doses.get(location_id).copied().unwrap_or(0.0)
    }

    /// Number of locations with a dose ledger
    pub fn tracked_doses(&self) -> usize {
        self.doses.len()
    }
}

/// Mean score, worst level, mean cigarettes, and per-level counts
pub fn aggregate(assessments: &[HealthAssessment]) -> HealthSummary {
    let mut count_by_level: BTreeMap<RiskLevel, usize> = RiskLevel::ALL.iter().map(|&l| (l, 0)).collect();

    if assessments.is_empty() {
        return HealthSummary {
            avg_score: 100,
            worst_risk_level: RiskLevel::Low,
            avg_cigarette_equivalent: 0.0,
            count_by_level,
            location_count: 0,
        };
    }

    let n = assessments.len() as f64;
    for a in assessments {
        *count_by_level.entry(a.risk_level).or_insert(0) += 1;
    }
    let avg_score = assessments.iter().map(|a| a.score as f64).sum::<f64>() / n;
    let worst_risk_level = assessments
        .iter()
        .map(|a| a.risk_level)
        .max()
        .unwrap_or(RiskLevel::Low);

    HealthSummary {
        avg_score: avg_score.round() as u8,
        worst_risk_level,
        avg_cigarette_equivalent: assessments.iter().map(|a| a.cigarette_equivalent).sum::<f64>() / n,
        count_by_level,
        location_count: assessments.len(),
    }
}
