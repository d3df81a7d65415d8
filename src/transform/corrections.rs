//! Elementary corrections acting on unit direction vectors.
//!
//! Every correction maps a unit vector to a unit vector. The displacement-type
//! corrections (parallax, light deflection) have the form `p ↦ unit(p + D(p))` and are
//! undone by [`undo_displacement`], a fixed-point iteration.
//!
//! ## Light deflection near the Sun
//!
//! The deflection map is not invertible for lines of sight grazing the solar disk:
//! two directions within a few tens of arcseconds of the Sun centre can be deflected
//! onto the same apparent direction. Light from behind the disk never reaches the
//! observer, so the deflection is skipped for directions within the apparent solar
//! radius `asin(R☉/|E|)` (about 16′), within 1″ of the anti-Sun direction, and for
//! objects closer to the Sun than its radius. Everywhere else the iteration recovers
//! the input to full precision.

use nalgebra::Vector3;

use crate::constants::{LIGHT_YEAR_AU, RADSEC, SUN_RADIUS_AU, SUN_SCHWARZSCHILD_AU, VLIGHT_AU};
use crate::ephemeris::EarthState;

/// Iteration cap of [`undo_displacement`].
pub const MAX_ITERATIONS: usize = 50;

/// Convergence threshold of [`undo_displacement`] on the change of the unit vector.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-16;

/// Relativistic aberration.
///
/// Arguments
/// -----------------
/// * `p`: unit direction of the source in the rest frame.
/// * `beta`: velocity of the observer in units of c.
///
/// Return
/// ----------
/// * Unit direction seen by the moving observer:
///   `unit(√(1−β²)·p + (1 + p·β / (1 + √(1−β²)))·β)`.
///   Applying it again with `−β` gives back `p`.
pub fn aberration(p: &Vector3<f64>, beta: &Vector3<f64>) -> Vector3<f64> {
    let bm1 = (1.0 - beta.norm_squared()).sqrt();
    let w = 1.0 + p.dot(beta) / (1.0 + bm1);
    (bm1 * p + w * beta).normalize()
}

/// Parallax displacement `−E⊥ / d` of a source at `distance` AU seen from an observer
/// at barycentric position `observer`.
pub fn parallax_displacement(
    p: &Vector3<f64>,
    distance: f64,
    observer: &Vector3<f64>,
) -> Vector3<f64> {
    let perpendicular = observer - observer.dot(p) * p;
    -perpendicular / distance
}

/// Gravitational light deflection by the Sun.
///
/// Arguments
/// -----------------
/// * `p`: unit geocentric direction of the source.
/// * `distance`: distance of the source in AU, `None` for a source at infinity.
/// * `earth_heliocentric`: heliocentric position of the observer, AU.
///
/// Return
/// ----------
/// * `g·((p·q)e − (e·p)q)/(1 + q·e)` with `g = 2GM☉/(c²|E|)`, `e` the unit Sun→observer
///   vector and `q` the unit Sun→source vector. Zero behind the solar disk, within 1″
///   of the anti-Sun direction, and for a source within one solar radius of the Sun.
pub fn deflection_displacement(
    p: &Vector3<f64>,
    distance: Option<f64>,
    earth_heliocentric: &Vector3<f64>,
) -> Vector3<f64> {
    let em = earth_heliocentric.norm();
    let e = earth_heliocentric / em;

    if -p.dot(&e) > solar_disk_cosine(em) || p.cross(&e).norm() < RADSEC.sin() {
        return Vector3::zeros();
    }

    let q = match distance {
        Some(d) => {
            let source = earth_heliocentric + d * p;
            let sun_distance = source.norm();
            if sun_distance < SUN_RADIUS_AU {
                return Vector3::zeros();
            }
            source / sun_distance
        }
        None => *p,
    };

    let g = SUN_SCHWARZSCHILD_AU / em;
    g * (p.dot(&q) * e - e.dot(p) * q) / (1.0 + q.dot(&e))
}

/// Cosine of the apparent solar radius seen from `sun_distance` AU.
pub fn solar_disk_cosine(sun_distance: f64) -> f64 {
    let sin_radius = (SUN_RADIUS_AU / sun_distance).min(1.0);
    (1.0 - sin_radius * sin_radius).sqrt()
}

/// Apply a displacement-type correction: `unit(p + D(p))`.
pub fn apply_displacement(
    p: &Vector3<f64>,
    displacement: impl Fn(&Vector3<f64>) -> Vector3<f64>,
) -> Vector3<f64> {
    (p + displacement(p)).normalize()
}

/// Invert `p ↦ unit(p + D(p))` by fixed-point iteration.
///
/// Arguments
/// -----------------
/// * `target`: the corrected unit direction.
/// * `displacement`: the displacement `D` of the forward correction.
///
/// Return
/// ----------
/// * The unit vector `p` with `unit(p + D(p)) = target`, after at most
///   [`MAX_ITERATIONS`] steps of `p ← unit(target·|p + D(p)| − D(p))`.
pub fn undo_displacement(
    target: &Vector3<f64>,
    displacement: impl Fn(&Vector3<f64>) -> Vector3<f64>,
) -> Vector3<f64> {
    let mut p = *target;
    for _ in 0..MAX_ITERATIONS {
        let d = displacement(&p);
        let next = (target * (p + d).norm() - d).normalize();
        let change = (next - p).norm();
        p = next;
        if change < CONVERGENCE_TOLERANCE {
            break;
        }
    }
    p
}

/// Move a barycentric direction to the geocentre: parallax (beyond one light-year),
/// light deflection, then annual aberration.
pub fn enter_geocentre(p: &Vector3<f64>, distance: Option<f64>, earth: &EarthState) -> Vector3<f64> {
    let mut p = *p;
    if let Some(d) = parallax_distance(distance) {
        p = apply_displacement(&p, |v| {
            parallax_displacement(v, d, &earth.barycentric_position)
        });
    }
    p = apply_displacement(&p, |v| {
        deflection_displacement(v, distance, &earth.heliocentric_position)
    });
    aberration(&p, &annual_beta(earth))
}

/// Exact inverse of [`enter_geocentre`].
pub fn leave_geocentre(p: &Vector3<f64>, distance: Option<f64>, earth: &EarthState) -> Vector3<f64> {
    let mut p = aberration(p, &-annual_beta(earth));
    p = undo_displacement(&p, |v| {
        deflection_displacement(v, distance, &earth.heliocentric_position)
    });
    if let Some(d) = parallax_distance(distance) {
        p = undo_displacement(&p, |v| {
            parallax_displacement(v, d, &earth.barycentric_position)
        });
    }
    p
}

fn parallax_distance(distance: Option<f64>) -> Option<f64> {
    distance.filter(|&d| d > LIGHT_YEAR_AU)
}

fn annual_beta(earth: &EarthState) -> Vector3<f64> {
    earth.barycentric_velocity / VLIGHT_AU
}
