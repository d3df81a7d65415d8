//! Julian and Besselian epochs.
//!
//! An [`Epoch`] is a year number tagged with its calendar: Julian years (365.25 days,
//! origin J2000.0) or Besselian years (tropical years, origin B1900.0). It is the
//! equinox of FK4 and FK5 frames and the epoch of observation of geocentric ones.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MJD;
use crate::time::{
    besselian_year_to_mjd, julian_year_to_mjd, mjd_to_besselian_year, mjd_to_julian_year,
};

/// Tolerance of [`Epoch`] equality, in years.
pub const EPOCH_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Epoch {
    Julian(f64),
    Besselian(f64),
}

impl Epoch {
    pub const J2000: Epoch = Epoch::Julian(2000.0);
    pub const B1950: Epoch = Epoch::Besselian(1950.0);

    pub fn julian(year: f64) -> Self {
        Epoch::Julian(year)
    }

    pub fn besselian(year: f64) -> Self {
        Epoch::Besselian(year)
    }

    /// Julian epoch of a Modified Julian Date.
    pub fn julian_from_mjd(mjd: MJD) -> Self {
        Epoch::Julian(mjd_to_julian_year(mjd))
    }

    /// Besselian epoch of a Modified Julian Date.
    pub fn besselian_from_mjd(mjd: MJD) -> Self {
        Epoch::Besselian(mjd_to_besselian_year(mjd))
    }

    /// Year number, in the calendar of the epoch.
    pub fn year(&self) -> f64 {
        match *self {
            Epoch::Julian(year) | Epoch::Besselian(year) => year,
        }
    }

    pub fn to_mjd(&self) -> MJD {
        match *self {
            Epoch::Julian(year) => julian_year_to_mjd(year),
            Epoch::Besselian(year) => besselian_year_to_mjd(year),
        }
    }

    pub fn is_julian(&self) -> bool {
        matches!(self, Epoch::Julian(_))
    }

    pub fn is_besselian(&self) -> bool {
        matches!(self, Epoch::Besselian(_))
    }

    /// "Julian" or "Besselian".
    pub fn kind(&self) -> &'static str {
        match self {
            Epoch::Julian(_) => "Julian",
            Epoch::Besselian(_) => "Besselian",
        }
    }

    /// Same calendar and years closer than `tolerance`.
    pub fn approx_eq(&self, other: &Epoch, tolerance: f64) -> bool {
        self.is_julian() == other.is_julian() && (self.year() - other.year()).abs() < tolerance
    }
}

impl PartialEq for Epoch {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, EPOCH_TOLERANCE)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Epoch::Julian(year) => write!(f, "J{year:.3}"),
            Epoch::Besselian(year) => write!(f, "B{year:.3}"),
        }
    }
}
