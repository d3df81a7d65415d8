//! # Rotation utility and rectangular/spherical conversions
//!
//! Every rotation used by the crate (frame biases, precession, nutation, polar motion)
//! is built here from elementary axis rotations, so the sign convention lives in a
//! single place.
//!
//! ## Convention
//!
//! [`rotmt`] returns a **passive** (change of basis) right-handed rotation: with
//! `R = rotmt(φ, Axis::Z)`, a fixed vector expressed in the old axes has coordinates
//! `R · x` in axes turned by `+φ` about Z. This is the `R₁, R₂, R₃` convention of the
//! IERS Conventions and SOFA, so published formulas such as
//!
//! ```text
//! P = R₃(−z_A) · R₂(θ_A) · R₃(−ζ_A)
//! ```
//!
//! transcribe literally into `rotmt` products.

use nalgebra::{Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{Radian, DPI};

/// Principal axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

/// Construct the passive rotation of angle `alpha` about one of the principal axes.
///
/// # Arguments
///
/// * `alpha` - Rotation angle of the axes in **radians** (positive = direct sense).
/// * `axis` - Axis of rotation.
///
/// # Returns
///
/// A [`Rotation3`] `R` such that `x' = R · x` are the coordinates of the same vector
/// in the rotated axes. The matrix for `Axis::Z` is
///
/// ```text
/// |  cos α   sin α   0 |
/// | −sin α   cos α   0 |
/// |    0       0     1 |
/// ```
///
/// # Remarks
///
/// * Built on [`Rotation3::from_axis_angle`] with the opposite angle, which keeps the
///   result orthonormal and its inverse a cheap transpose.
///
/// # See also
/// * [`compose`] – chains several elementary rotations in application order
pub fn rotmt(alpha: Radian, axis: Axis) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&axis.unit(), -alpha)
}

/// Compose elementary rotations, the first element being applied first.
///
/// `compose(&[(Axis::Z, a), (Axis::Y, b)])` is `R₂(b) · R₃(a)`.
pub fn compose(steps: &[(Axis, Radian)]) -> Rotation3<f64> {
    steps
        .iter()
        .fold(Rotation3::identity(), |acc, &(axis, alpha)| {
            rotmt(alpha, axis) * acc
        })
}

/// Longitude/latitude pair on the unit sphere (right ascension/declination for
/// equatorial frames), in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalCoordinates {
    /// Longitude in `[0, 2π)`.
    pub longitude: Radian,
    /// Latitude in `[−π/2, π/2]`.
    pub latitude: Radian,
}

impl SphericalCoordinates {
    pub fn new(longitude: Radian, latitude: Radian) -> Self {
        SphericalCoordinates {
            longitude,
            latitude,
        }
    }

    /// Unit vector pointing in this direction.
    pub fn to_cartesian(&self) -> Vector3<f64> {
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        let (sin_lon, cos_lon) = self.longitude.sin_cos();
        Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Direction of a rectangular vector; see [`cartesian_to_radec`].
    pub fn from_cartesian(v: &Vector3<f64>) -> Self {
        let (longitude, latitude, _) = cartesian_to_radec(v);
        SphericalCoordinates {
            longitude,
            latitude,
        }
    }
}

/// Convert a 3D Cartesian vector to right ascension and declination.
///
/// Arguments
/// ---------
/// * `cartesian_position`: 3D vector in Cartesian coordinates (any length unit).
///
/// Returns
/// --------
/// * Tuple `(α, δ, ρ)`:
///     - `α`: right ascension in radians, in the range [0, 2π).
///     - `δ`: declination in radians, in the range [−π/2, +π/2].
///     - `ρ`: Euclidean norm of the vector.
///
/// Remarks
/// -------
/// * If the input vector has zero norm, the result is `(0.0, 0.0, 0.0)`.
/// * At the poles the right ascension is set to zero.
pub fn cartesian_to_radec(cartesian_position: &Vector3<f64>) -> (Radian, Radian, f64) {
    let pos_norm = cartesian_position.norm();
    if pos_norm == 0. {
        return (0.0, 0.0, pos_norm);
    }

    let delta = (cartesian_position.z / pos_norm).clamp(-1.0, 1.0).asin();

    let rho_xy = cartesian_position.x.hypot(cartesian_position.y);
    if rho_xy == 0.0 {
        return (0.0, delta, pos_norm);
    }

    let alpha = cartesian_position.y.atan2(cartesian_position.x);
    let alpha = if alpha < 0.0 { alpha + DPI } else { alpha };
    (alpha, delta, pos_norm)
}
