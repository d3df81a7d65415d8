//! # Earth orientation: obliquity, precession, frame biases, nutation and polar motion
//!
//! All matrices here are passive rotations built with [`rotmt`]/[`compose`]; they map
//! the coordinates of a fixed vector from one set of axes to another.
//!
//! ## Precession theories
//!
//! | Frame family | Theory | Base epoch |
//! |---|---|---|
//! | Dynamical / topocentric | IAU 2006 (P03) | J2000 |
//! | FK5 | IAU 1976 (Lieske), as adopted for the FK5 by Lederle & Schwan (1984) | J2000 |
//! | FK4 | Newcomb (Andoyer form) | B1950 |
//!
//! Every theory exposes a matrix "from base epoch to epoch", and precession between two
//! arbitrary epochs goes through the base epoch: `P(a→b) = P₀(b) · P₀(a)ᵀ`.
//! The reverse matrix is therefore exactly the transpose.

use nalgebra::Rotation3;
use serde::{Deserialize, Serialize};

use crate::constants::{ArcSec, Radian, MJD, RADMAS, RADSEC};
use crate::nutation::NutationAngles;
use crate::ref_system::{compose, Axis};
use crate::time::{centuries_since_j2000, earth_rotation_angle};

/// Frame bias of the J2000 mean equator and equinox with respect to the ICRS (IERS 2003):
/// (dψ_b, dε_b, dα₀) in milliarcseconds.
pub const J2000_FRAME_BIAS_MAS: (f64, f64, f64) = (-41.775, -6.8192, -14.6);

/// Orientation of the FK5 axes with respect to the ICRS (Mignard & Froeschlé 2000),
/// small rotations about x, y, z in milliarcseconds.
pub const FK5_FRAME_BIAS_MAS: (f64, f64, f64) = (-19.9, -9.1, 22.9);

/// Equinox offset between FK4 and FK5 at B1950 (Fricke 1982), in arcseconds.
pub const FK4_EQUINOX_OFFSET: ArcSec = 0.525;

/// Polar motion coordinates of the celestial intermediate pole in the terrestrial frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarWobble {
    /// x_p, radians
    pub xp: Radian,
    /// y_p, radians
    pub yp: Radian,
}

impl PolarWobble {
    pub fn new(xp: Radian, yp: Radian) -> Self {
        PolarWobble { xp, yp }
    }

    /// Build from pole coordinates in arcseconds, as published in IERS bulletins.
    pub fn from_arcsec(xp: ArcSec, yp: ArcSec) -> Self {
        PolarWobble {
            xp: xp * RADSEC,
            yp: yp * RADSEC,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.xp == 0.0 && self.yp == 0.0
    }
}

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 2006 model).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// ```text
/// ε(t) = 84381.406″ − 46.836769″·T − 0.0001831″·T² + 0.00200340″·T³
///        − 0.000000576″·T⁴ − 0.0000000434″·T⁵
/// ```
/// with `T` in Julian centuries since J2000, evaluated with Horner's method.
pub fn obleq(tjm: MJD) -> Radian {
    let t = centuries_since_j2000(tjm);
    let arcsec = ((((-0.0000000434 * t - 0.000000576) * t + 0.00200340) * t - 0.0001831) * t
        - 46.836769)
        * t
        + 84381.406;
    arcsec * RADSEC
}

/// Precession matrix from the classical (ζ, z, θ) angles, all in radians:
/// `R₃(−z) · R₂(θ) · R₃(−ζ)`.
fn precession_from_angles(zeta: Radian, z: Radian, theta: Radian) -> Rotation3<f64> {
    compose(&[(Axis::Z, -zeta), (Axis::Y, theta), (Axis::Z, -z)])
}

/// Precession from the J2000 mean equator and equinox to the mean equator and equinox
/// of date, IAU 2006 (Capitaine et al. 2003, P03) angles.
pub fn precession_iau2006(tjm: MJD) -> Rotation3<f64> {
    let t = centuries_since_j2000(tjm);

    let zeta = (((((-0.0000003173 * t - 0.000005971) * t + 0.01801828) * t + 0.2988499) * t
        + 2306.083227)
        * t
        + 2.650545)
        * RADSEC;
    let z = (((((-0.0000002904 * t - 0.000028596) * t + 0.01826837) * t + 1.0927348) * t
        + 2306.077181)
        * t
        - 2.650545)
        * RADSEC;
    let theta = ((((-0.0000001274 * t - 0.000007089) * t - 0.04182264) * t - 0.4294934) * t
        + 2004.191903)
        * t
        * RADSEC;

    precession_from_angles(zeta, z, theta)
}

/// Compute the precession matrix from J2000 to the mean equator and equinox of a given
/// epoch (IAU 1976 model, the precession of the FK5 system).
///
/// Method
/// ------
/// ```text
/// ζ(T) = 2306.2181″·T + 0.30188″·T² + 0.017998″·T³
/// z(T) = 2306.2181″·T + 1.09468″·T² + 0.018203″·T³
/// θ(T) = 2004.3109″·T − 0.42665″·T² − 0.041833″·T³
/// ```
/// where `T = (tjm − T2000) / 36525`.
///
/// # See also
/// * [`fk5_precession`] – precession between two FK5 epochs
pub fn precession_iau1976(tjm: MJD) -> Rotation3<f64> {
    let t = centuries_since_j2000(tjm);

    let zeta = ((0.017998 * t + 0.30188) * t + 2306.2181) * t * RADSEC;
    let z = ((0.018203 * t + 1.09468) * t + 2306.2181) * t * RADSEC;
    let theta = ((-0.041833 * t - 0.42665) * t + 2004.3109) * t * RADSEC;

    precession_from_angles(zeta, z, theta)
}

/// Newcomb precession from B1950 to the Besselian epoch `year`, with `t` in tropical
/// centuries since B1950:
///
/// ```text
/// ζ = 2304.948″·t + 0.302″·t² + 0.0179″·t³
/// z = 2304.948″·t + 1.093″·t² + 0.0192″·t³
/// θ = 2004.255″·t − 0.426″·t² − 0.0416″·t³
/// ```
pub fn precession_newcomb(besselian_year: f64) -> Rotation3<f64> {
    let t = (besselian_year - 1950.0) / 100.0;

    let zeta = ((0.0179 * t + 0.302) * t + 2304.948) * t * RADSEC;
    let z = ((0.0192 * t + 1.093) * t + 2304.948) * t * RADSEC;
    let theta = ((-0.0416 * t - 0.426) * t + 2004.255) * t * RADSEC;

    precession_from_angles(zeta, z, theta)
}

/// IAU 2006 precession between two epochs (MJD, TT).
pub fn dynamical_precession(from: MJD, to: MJD) -> Rotation3<f64> {
    precession_iau2006(to) * precession_iau2006(from).inverse()
}

/// IAU 1976 precession between two FK5 epochs (MJD, TT).
pub fn fk5_precession(from: MJD, to: MJD) -> Rotation3<f64> {
    precession_iau1976(to) * precession_iau1976(from).inverse()
}

/// Newcomb precession between two FK4 epochs (Besselian years).
pub fn fk4_precession(from: f64, to: f64) -> Rotation3<f64> {
    precession_newcomb(to) * precession_newcomb(from).inverse()
}

/// Frame bias from the ICRS to the J2000 mean equator and equinox:
/// `R₁(−dε_b) · R₂(dψ_b sin ε₀) · R₃(dα₀)`.
pub fn j2000_frame_bias() -> Rotation3<f64> {
    let (dpsi_b, deps_b, dra0) = J2000_FRAME_BIAS_MAS;
    let eps0 = 84381.448 * RADSEC;
    compose(&[
        (Axis::Z, dra0 * RADMAS),
        (Axis::Y, dpsi_b * RADMAS * eps0.sin()),
        (Axis::X, -deps_b * RADMAS),
    ])
}

/// Frame bias from the ICRS to the FK5 (J2000) axes: `R₁(ε_x) · R₂(ε_y) · R₃(ε_z)`.
pub fn fk5_frame_bias() -> Rotation3<f64> {
    let (ex, ey, ez) = FK5_FRAME_BIAS_MAS;
    compose(&[
        (Axis::Z, ez * RADMAS),
        (Axis::Y, ey * RADMAS),
        (Axis::X, ex * RADMAS),
    ])
}

/// Rotation from FK5 to FK4 axes at B1950: the FK4 equinox lies east of the FK5 one.
pub fn fk5_to_fk4_equinox() -> Rotation3<f64> {
    compose(&[(Axis::Z, FK4_EQUINOX_OFFSET * RADSEC)])
}

/// Construct the nutation rotation matrix from the mean equator and equinox of date
/// to the true equator and equinox of date.
///
/// Three successive rotations are applied:
///
/// 1. around X by the **mean obliquity** ε,
/// 2. around Z by minus the **nutation in longitude** Δψ,
/// 3. around X by minus the **true obliquity** ε + Δε.
///
/// ```text
/// N = R₁(−(ε + Δε)) · R₃(−Δψ) · R₁(ε)
/// ```
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT), used for the mean obliquity.
/// * `nutation`: (Δψ, Δε) in radians, from [`Nutation::angles`](crate::nutation::Nutation::angles).
pub fn nutation_matrix(tjm: MJD, nutation: &NutationAngles) -> Rotation3<f64> {
    let epsm = obleq(tjm);
    compose(&[
        (Axis::X, epsm),
        (Axis::Z, -nutation.dpsi),
        (Axis::X, -(epsm + nutation.deps)),
    ])
}

/// Compute the equation of the equinoxes in radians: `Δψ · cos(ε)`.
///
/// This is the difference between apparent and mean sidereal time.
pub fn equequ(tjm: MJD, nutation: &NutationAngles) -> Radian {
    nutation.dpsi * obleq(tjm).cos()
}

/// TIO locator s′, radians: `−47 µas · T`.
pub fn tio_locator(tjm: MJD) -> Radian {
    -47e-6 * RADSEC * centuries_since_j2000(tjm)
}

/// Polar motion matrix from the terrestrial intermediate frame to the terrestrial frame,
/// `W = R₁(−y_p) · R₂(−x_p) · R₃(s′)`.
pub fn polar_motion(tjm: MJD, wobble: &PolarWobble) -> Rotation3<f64> {
    compose(&[
        (Axis::Z, tio_locator(tjm)),
        (Axis::Y, -wobble.xp),
        (Axis::X, -wobble.yp),
    ])
}

/// Polar motion expressed in celestial axes of date: `R₃(−θ) · W · R₃(θ)`, θ being the
/// Earth rotation angle at `tjm`.
pub fn polar_motion_celestial(tjm: MJD, wobble: &PolarWobble) -> Rotation3<f64> {
    let era = earth_rotation_angle(tjm);
    let spin = compose(&[(Axis::Z, era)]);
    spin.inverse() * polar_motion(tjm, wobble) * spin
}

#[cfg(test)]
mod test_earth_orientation {
    use super::*;
    use crate::constants::T2000;
    use crate::time::julian_year_to_mjd;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn max_abs_diff(a: &Rotation3<f64>, b: &Rotation3<f64>) -> f64 {
        (a.matrix() - b.matrix()).abs().max()
    }

    #[test]
    fn test_obliquity() {
        assert_relative_eq!(obleq(T2000), 84381.406 * RADSEC, epsilon = 1e-15);
        // About 47" per century decrease
        let drift = (obleq(T2000 + 36525.0) - obleq(T2000)) / RADSEC;
        assert_relative_eq!(drift, -46.83495, epsilon = 1e-4);
    }

    #[test]
    fn test_precession_pole_displacement() {
        // The pole moves by exactly θ_A along the precession path
        let p = precession_iau1976(julian_year_to_mjd(2050.0));
        let pole = p * Vector3::z();
        let theta = (2004.3109 * 0.5 - 0.42665 * 0.25 - 0.041833 * 0.125) * RADSEC;
        assert_relative_eq!(pole.angle(&Vector3::z()), theta, epsilon = 1e-12);

        let p = precession_newcomb(2000.0);
        let pole = p * Vector3::z();
        let theta = (2004.255 * 0.5 - 0.426 * 0.25 - 0.0416 * 0.125) * RADSEC;
        assert_relative_eq!(pole.angle(&Vector3::z()), theta, epsilon = 1e-12);
    }

    #[test]
    fn test_precession_models_agree() {
        let mjd = julian_year_to_mjd(2040.0);
        let diff = max_abs_diff(&precession_iau2006(mjd), &precession_iau1976(mjd));
        assert!(diff < 1.0 * RADSEC, "IAU2006 vs IAU1976: {diff}");
    }

    #[test]
    fn test_precession_between_epochs_is_invertible() {
        let a = julian_year_to_mjd(1985.3);
        let b = julian_year_to_mjd(2031.7);
        let there = fk5_precession(a, b);
        let back = fk5_precession(b, a);
        assert!(max_abs_diff(&(back * there), &Rotation3::identity()) < 1e-15);

        let there = dynamical_precession(a, b);
        let back = dynamical_precession(b, a);
        assert!(max_abs_diff(&(back * there), &Rotation3::identity()) < 1e-15);

        let there = fk4_precession(1875.0, 1950.0);
        let back = fk4_precession(1950.0, 1875.0);
        assert!(max_abs_diff(&(back * there), &Rotation3::identity()) < 1e-15);
        assert!(max_abs_diff(&fk4_precession(1950.0, 1950.0), &Rotation3::identity()) < 1e-15);
    }

    #[test]
    fn test_fk4_equinox_motion() {
        // Fifty tropical years of Newcomb precession move the equinox by about ζ + z
        let p = fk4_precession(1950.0, 2000.0);
        let x = p.inverse() * Vector3::x();
        let shift = x.y.atan2(x.x);
        assert_relative_eq!(shift, -2305.3 * RADSEC, epsilon = 0.5 * RADSEC);
    }

    #[test]
    fn test_frame_biases_are_small() {
        let b = j2000_frame_bias();
        assert_relative_eq!(b.matrix()[(0, 1)], -14.6 * RADMAS, epsilon = 1e-13);
        assert!(max_abs_diff(&b, &Rotation3::identity()) < 30.0 * RADMAS);

        let b = fk5_frame_bias();
        assert!(max_abs_diff(&b, &Rotation3::identity()) < 30.0 * RADMAS);
    }

    #[test]
    fn test_nutation_matrix() {
        let angles = NutationAngles {
            dpsi: -13.9315 * RADSEC,
            deps: -5.7704 * RADSEC,
        };
        let n = nutation_matrix(T2000, &angles);
        let eps = obleq(T2000);

        // First order terms of the classical nutation matrix
        assert_relative_eq!(n.matrix()[(1, 0)], angles.dpsi * eps.cos(), epsilon = 1e-8);
        assert_relative_eq!(n.matrix()[(2, 0)], angles.dpsi * eps.sin(), epsilon = 1e-8);
        assert_relative_eq!(n.matrix()[(2, 1)], angles.deps, epsilon = 1e-8);

        let zero = nutation_matrix(T2000, &NutationAngles::default());
        assert!(max_abs_diff(&zero, &Rotation3::identity()) < 1e-15);
    }

    #[test]
    fn test_equequ() {
        let angles = NutationAngles {
            dpsi: -13.9315 * RADSEC,
            deps: 0.0,
        };
        let eqeq = equequ(T2000, &angles);
        assert_relative_eq!(eqeq, angles.dpsi * obleq(T2000).cos(), epsilon = 1e-18);
        assert!(eqeq.abs() < 30.0 * RADSEC);
    }

    #[test]
    fn test_polar_motion() {
        // Without wobble only s' remains, a rotation about the pole
        let w = polar_motion_celestial(T2000 + 36525.0, &PolarWobble::default());
        assert_relative_eq!(w * Vector3::z(), Vector3::z(), epsilon = 1e-15);

        let wobble = PolarWobble::from_arcsec(0.2, 0.35);
        let w = polar_motion_celestial(60000.0, &wobble);
        let tilt = (w * Vector3::z()).cross(&Vector3::z()).norm();
        assert_relative_eq!(tilt, wobble.xp.hypot(wobble.yp), epsilon = 1e-12);
    }
}
