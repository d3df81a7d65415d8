use hifitime::Epoch as HifiEpoch;
use std::str::FromStr;

use crate::constants::{
    Radian, B1900, BESSELIAN_YEAR, DAYS_PER_JULIAN_CENTURY, DPI, JULIAN_YEAR, MJD, T2000,
};
use crate::skyframe_errors::SkyframeError;

/// Julian centuries (TT) elapsed since J2000.0.
#[inline]
pub fn centuries_since_j2000(mjd: MJD) -> f64 {
    (mjd - T2000) / DAYS_PER_JULIAN_CENTURY
}

/// Convert a Julian epoch year (e.g. `2000.0`) to a Modified Julian Date.
pub fn julian_year_to_mjd(year: f64) -> MJD {
    T2000 + (year - 2000.0) * JULIAN_YEAR
}

/// Convert a Modified Julian Date to a Julian epoch year.
pub fn mjd_to_julian_year(mjd: MJD) -> f64 {
    2000.0 + (mjd - T2000) / JULIAN_YEAR
}

/// Convert a Besselian epoch year (e.g. `1950.0`) to a Modified Julian Date.
pub fn besselian_year_to_mjd(year: f64) -> MJD {
    B1900 + (year - 1900.0) * BESSELIAN_YEAR
}

/// Convert a Modified Julian Date to a Besselian epoch year.
pub fn mjd_to_besselian_year(mjd: MJD) -> f64 {
    1900.0 + (mjd - B1900) / BESSELIAN_YEAR
}

/// Transformation from an ISO date (`YYYY-MM-ddTHH:mm:ss`, UTC unless a scale is given)
/// to a modified julian date in the TT scale.
///
/// Argument
/// --------
/// * `date`: the date string, as found in a FITS `DATE-OBS` card
///
/// Return
/// ------
/// * the MJD (TT) of the date, or [`SkyframeError::InvalidDate`] if hifitime cannot parse it
pub fn date_to_mjd(date: &str) -> Result<MJD, SkyframeError> {
    HifiEpoch::from_str(date.trim())
        .map(|epoch| epoch.to_mjd_tt_days())
        .map_err(|err| SkyframeError::InvalidDate(format!("{date}: {err}")))
}

/// Earth rotation angle (IERS 2003) in radians, normalized to `[0, 2π)`.
///
/// The MJD is taken in the UT1 scale.
///
/// ```text
/// θ = 2π (0.7790572732640 + 1.00273781191135448 · (MJD − 51544.5))
/// ```
///
/// The integer and fractional day parts are split before scaling to keep full
/// precision far from J2000.
pub fn earth_rotation_angle(tjm: MJD) -> Radian {
    let d = tjm - T2000;
    let frac = d.fract();
    let turns = frac + 0.7790572732640 + 0.00273781191135448 * d;
    (DPI * turns).rem_euclid(DPI)
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982/2000 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, IERS Conventions 1996/2000.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = centuries_since_j2000(itjm);

    // GMST at 0h UT1, seconds to radians
    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / 86400.0;

    // Sidereal contribution of the fraction of the day
    let h = (tjm - itjm) * DPI;

    (gmst0 + h * RAP).rem_euclid(DPI)
}
