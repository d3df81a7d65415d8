//! # Delaunay fundamental arguments
//!
//! The five lunisolar angles driving the nutation series (IERS Conventions 2003,
//! eq. 5.43), the mean longitudes of the planets (eq. 5.44) and the general
//! accumulated precession in longitude `pA`, the last two used by the planetary part
//! of IAU 2000A.
//!
//! Two forms are available:
//! - [`ArgumentForm::Full`]: quartic polynomials in Julian centuries since J2000.
//! - [`ArgumentForm::Linear`]: constant and rate terms only. The dropped terms amount
//!   to a few arcseconds per century², which is negligible for the truncated
//!   nutation tiers that use this form.
//!
//! All angles are returned in radians, wrapped to `(−π, π]`.

use std::f64::consts::PI;

use crate::constants::{Radian, DPI, MJD, RADSEC};
use crate::time::centuries_since_j2000;

/// Arcseconds in a full turn
const TURNAS: f64 = 1_296_000.0;

/// Polynomial coefficients in arcseconds, lowest degree first: l, l', F, D, Ω.
#[rustfmt::skip]
const DELAUNAY_POLYNOMIALS: [[f64; 5]; 5] = [
    [485868.249036,  1717915923.2178,  31.8792,  0.051635, -0.00024470],
    [1287104.79305,   129596581.0481,  -0.5532,  0.000136, -0.00001149],
    [335779.526232,  1739527262.8478, -12.7512, -0.001037,  0.00000417],
    [1072260.70369,  1602961601.2090,  -6.3706,  0.006593, -0.00003169],
    [450160.398036,    -6962890.5431,   7.4722,  0.007702, -0.00005939],
];

/// Mean longitudes of Mercury to Neptune, radians at J2000 and radians per century.
#[rustfmt::skip]
const PLANETARY_LONGITUDES: [(f64, f64); 8] = [
    (4.402608842, 2608.7903141574),
    (3.176146697, 1021.3285546211),
    (1.753470314,  628.3075849991),
    (6.203480913,  334.0612426700),
    (0.599546497,   52.9690962641),
    (0.874016757,   21.3299104960),
    (5.481293872,    7.4781598567),
    (5.311886287,    3.8133035638),
];

/// Which polynomial form to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentForm {
    Full,
    Linear,
}

/// The five Delaunay arguments, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelaunayArguments {
    /// Mean anomaly of the Moon
    pub l: Radian,
    /// Mean anomaly of the Sun
    pub l_prime: Radian,
    /// Mean argument of latitude of the Moon
    pub f: Radian,
    /// Mean elongation of the Moon from the Sun
    pub d: Radian,
    /// Mean longitude of the ascending node of the Moon
    pub omega: Radian,
}

impl DelaunayArguments {
    pub fn as_array(&self) -> [Radian; 5] {
        [self.l, self.l_prime, self.f, self.d, self.omega]
    }
}

/// Every argument of a nutation term, in table column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundamentalArguments {
    pub delaunay: DelaunayArguments,
    /// Mean longitudes of Mercury, Venus, Earth, Mars, Jupiter, Saturn, Uranus, Neptune.
    pub planets: [Radian; 8],
    /// General precession in longitude, not range-reduced.
    pub pa: Radian,
}

impl FundamentalArguments {
    /// l, l', F, D, Ω, the eight planetary longitudes and pA.
    pub fn as_array(&self) -> [Radian; 14] {
        let mut out = [0.0; 14];
        out[..5].copy_from_slice(&self.delaunay.as_array());
        out[5..13].copy_from_slice(&self.planets);
        out[13] = self.pa;
        out
    }
}

/// Wrap an angle to `(−π, π]`.
pub fn wrap_pi(angle: Radian) -> Radian {
    let mut a = angle % DPI;
    if a <= -PI {
        a += DPI;
    } else if a > PI {
        a -= DPI;
    }
    a
}

fn evaluate(coeffs: &[f64; 5], t: f64, form: ArgumentForm) -> Radian {
    let arcsec = match form {
        ArgumentForm::Full => coeffs
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c),
        ArgumentForm::Linear => coeffs[0] + coeffs[1] * t,
    };
    wrap_pi((arcsec % TURNAS) * RADSEC)
}

/// Compute the Delaunay arguments at a given epoch.
///
/// Arguments
/// ---------
/// * `mjd`: Modified Julian Date (TT).
/// * `form`: full quartic or linear polynomials.
///
/// Returns
/// --------
/// * The five arguments in radians, each in `(−π, π]`.
pub fn delaunay(mjd: MJD, form: ArgumentForm) -> DelaunayArguments {
    let t = centuries_since_j2000(mjd);
    let [l, l_prime, f, d, omega] = DELAUNAY_POLYNOMIALS.map(|c| evaluate(&c, t, form));
    DelaunayArguments {
        l,
        l_prime,
        f,
        d,
        omega,
    }
}

/// General accumulated precession in longitude `pA` (radians, not range-reduced).
pub fn general_precession(mjd: MJD) -> Radian {
    let t = centuries_since_j2000(mjd);
    (0.024381750 + 0.00000538691 * t) * t
}

/// Mean longitudes of the eight planets, linear in time, each in `(−π, π]`.
pub fn planetary_longitudes(mjd: MJD) -> [Radian; 8] {
    let t = centuries_since_j2000(mjd);
    PLANETARY_LONGITUDES.map(|(l0, rate)| wrap_pi((l0 + rate * t) % DPI))
}

/// Delaunay arguments in the requested form, planetary longitudes and pA at `mjd`.
pub fn fundamental_arguments(mjd: MJD, form: ArgumentForm) -> FundamentalArguments {
    FundamentalArguments {
        delaunay: delaunay(mjd, form),
        planets: planetary_longitudes(mjd),
        pa: general_precession(mjd),
    }
}
