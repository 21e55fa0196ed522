//! Earth geometry constants

/// Mean Earth radius (km).
///
/// Used by the haversine great-circle distance.
///
/// Source: IUGG mean radius R1
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Metres per degree of latitude (m/°).
///
/// Flat-earth conversion for short source-to-cell offsets; longitude offsets
/// are additionally scaled by cos(latitude).
///
/// Source: WGS-84 mean meridional degree
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Kilometres per degree, rounded (km/°).
///
/// Used to express lattice spacing as a distance for goal tolerance.
pub const KM_PER_DEGREE_APPROX: f64 = 111.0;
