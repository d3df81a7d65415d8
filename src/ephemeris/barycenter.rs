//! Heliocentric position of the solar-system barycenter from the mean orbits of the four
//! giant planets, each orbit being a fixed Keplerian ellipse (J2000 ecliptic elements).

use nalgebra::Vector3;

use crate::constants::{AstronomicalUnit, Radian, DPI, MJD, T2000};
use crate::earth_orientation::obleq;
use crate::ref_system::{compose, Axis};

/// Mean orbit of a giant planet.
#[derive(Debug, Clone, Copy)]
struct GiantPlanet {
    /// Sun / planet mass ratio.
    mass_ratio: f64,
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
    inclination: Radian,
    ascending_node: Radian,
    perihelion_longitude: Radian,
    /// Mean longitude at J2000.
    mean_longitude: Radian,
    /// Mean motion, radians per day.
    mean_motion: f64,
}

#[rustfmt::skip]
const GIANT_PLANETS: [GiantPlanet; 4] = [
    // Jupiter
    GiantPlanet { mass_ratio: 1047.349, semi_major_axis: 5.203363, eccentricity: 0.048393,
        inclination: 0.022782, ascending_node: 1.755036, perihelion_longitude: 0.257503,
        mean_longitude: 0.600470, mean_motion: 1.450138e-3 },
    // Saturn
    GiantPlanet { mass_ratio: 3497.910, semi_major_axis: 9.537070, eccentricity: 0.054151,
        inclination: 0.043362, ascending_node: 1.984702, perihelion_longitude: 1.613242,
        mean_longitude: 0.871693, mean_motion: 5.841727e-4 },
    // Uranus
    GiantPlanet { mass_ratio: 22903.0, semi_major_axis: 19.191264, eccentricity: 0.047168,
        inclination: 0.013437, ascending_node: 1.295556, perihelion_longitude: 2.983889,
        mean_longitude: 5.466933, mean_motion: 2.047497e-4 },
    // Neptune
    GiantPlanet { mass_ratio: 19416.0, semi_major_axis: 30.068963, eccentricity: 0.008586,
        inclination: 0.030878, ascending_node: 2.298977, perihelion_longitude: 0.784898,
        mean_longitude: 5.321160, mean_motion: 1.043891e-4 },
];

impl GiantPlanet {
    /// Heliocentric position on J2000 ecliptic axes, AU.
    fn position(&self, mjd: MJD) -> Vector3<f64> {
        let e = self.eccentricity;
        let mean_anomaly = (self.mean_longitude + self.mean_motion * (mjd - T2000)
            - self.perihelion_longitude)
            .rem_euclid(DPI);

        // Second-order solution of Kepler's equation, enough for e < 0.06
        let ecc_anomaly =
            mean_anomaly + e * mean_anomaly.sin() + 0.5 * e * e * (2.0 * mean_anomaly).sin();
        let (sin_u, cos_u) = ecc_anomaly.sin_cos();

        let in_plane = self.semi_major_axis
            * Vector3::new(cos_u - e, (1.0 - e * e).sqrt() * sin_u, 0.0);

        let argument_of_perihelion = self.perihelion_longitude - self.ascending_node;
        compose(&[
            (Axis::Z, -argument_of_perihelion),
            (Axis::X, -self.inclination),
            (Axis::Z, -self.ascending_node),
        ]) * in_plane
    }
}

/// Heliocentric position of the barycenter, AU, on J2000 equatorial axes.
///
/// Arguments
/// -----------------
/// * `mjd`: epoch, Modified Julian Date (TT).
///
/// Return
/// ----------
/// * `Σ rᵢ / (1 + M☉/mᵢ)` over Jupiter, Saturn, Uranus and Neptune, rotated from the
///   J2000 ecliptic to the equator. Its norm stays below about 0.01 AU.
pub fn barycenter_offset(mjd: MJD) -> Vector3<f64> {
    let ecliptic: Vector3<f64> = GIANT_PLANETS
        .iter()
        .map(|planet| planet.position(mjd) / (planet.mass_ratio + 1.0))
        .sum();
    compose(&[(Axis::X, -obleq(T2000))]) * ecliptic
}
