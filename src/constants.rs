//! # Constants and type definitions for skyframe
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **unit
//! type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ radians, days ↔ seconds)
//! - Reference epochs (J2000, B1950) in Modified Julian Date
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// MJD epoch of B1900.0, origin of the Besselian year count
pub const B1900: f64 = 15019.81352;

/// Length of the Besselian (tropical) year in days
pub const BESSELIAN_YEAR: f64 = 365.242198781;

/// Length of the Julian year in days
pub const JULIAN_YEAR: f64 = 365.25;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Milliarcseconds → radians
pub const RADMAS: f64 = RADSEC / 1000.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Nominal Earth rotation rate in rad/s (IERS)
pub const EARTH_ROTATION_RATE: f64 = 7.292_115_146_706_979e-5;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in m/s
pub const VLIGHT_M: f64 = VLIGHT * 1000.0;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

/// One light-year in astronomical units, the distance above which parallax is applied
pub const LIGHT_YEAR_AU: f64 = 63_241.077;

/// Schwarzschild radius of the Sun (2GM/c²) in astronomical units
pub const SUN_SCHWARZSCHILD_AU: f64 = 1.974_125_743_36e-8;

/// Solar radius in astronomical units
pub const SUN_RADIUS_AU: f64 = 0.004_65;

/// Valid MJD window of the simplified ephemeris
pub const EPHEMERIS_MJD_RANGE: (f64, f64) = (0.0, 100_000.0);

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
