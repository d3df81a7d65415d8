use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{
    Meter, Radian, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, EARTH_ROTATION_RATE, MJD, VLIGHT_M,
};
use crate::earth_orientation::{equequ, PolarWobble};
use crate::epoch::Epoch;
use crate::nutation::NutationAngles;
use crate::time::gmst;

/// Tolerance on the observation time when comparing two sites, days.
const MJD_TOLERANCE: f64 = 1e-6 * 365.25;

/// Geodetic coordinates of a site on the reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticLocation {
    /// East longitude, radians.
    pub longitude: Radian,
    /// Geodetic latitude, radians.
    pub latitude: Radian,
    /// Height above the ellipsoid, metres.
    pub height: Meter,
}

impl GeodeticLocation {
    pub fn new(longitude: Radian, latitude: Radian, height: Meter) -> Self {
        GeodeticLocation {
            longitude,
            latitude,
            height,
        }
    }

    /// Build from longitude and latitude in degrees.
    pub fn from_degrees(longitude: f64, latitude: f64, height: Meter) -> Self {
        GeodeticLocation::new(longitude.to_radians(), latitude.to_radians(), height)
    }

    /// Distances of the site to the rotation axis and to the equatorial plane, in
    /// units of the Earth equatorial radius.
    ///
    /// Return
    /// ----------
    /// * `(ρ·cos φ′, ρ·sin φ′)`, φ′ being the geocentric latitude.
    pub fn parallax_constants(&self) -> (f64, f64) {
        let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;
        let lat = self.latitude;

        // Parametric latitude
        let u = (lat.sin() * axis_ratio).atan2(lat.cos());

        let rho_sin_phi = axis_ratio * u.sin() + (self.height / EARTH_MAJOR_AXIS) * lat.sin();
        let rho_cos_phi = u.cos() + (self.height / EARTH_MAJOR_AXIS) * lat.cos();
        (rho_cos_phi, rho_sin_phi)
    }
}

/// An observing site at a given instant: the frame of the apparent place seen from it.
///
/// The frame axes are the true equator and equinox of date corrected for polar motion;
/// directions in it include the diurnal aberration due to the motion of the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topocentric {
    pub name: String,
    pub location: GeodeticLocation,
    /// Observation time, MJD (used as both TT and UT1).
    pub mjd: MJD,
    pub wobble: PolarWobble,
    /// Velocity of the observer relative to the ground, m/s in the local
    /// east / north / up basis.
    pub surface_velocity: Vector3<f64>,
}

impl Topocentric {
    pub fn new(
        name: impl Into<String>,
        location: GeodeticLocation,
        mjd: MJD,
        wobble: Option<PolarWobble>,
    ) -> Self {
        Topocentric {
            name: name.into(),
            location,
            mjd,
            wobble: wobble.unwrap_or_default(),
            surface_velocity: Vector3::zeros(),
        }
    }

    /// Same site carried by a moving platform (ship, aircraft).
    pub fn with_surface_velocity(mut self, east: f64, north: f64, up: f64) -> Self {
        self.surface_velocity = Vector3::new(east, north, up);
        self
    }

    /// Julian epoch of the observation.
    pub fn epoch(&self) -> Epoch {
        Epoch::julian_from_mjd(self.mjd)
    }

    /// Velocity of the site on the true equator and equinox of date, in units of c.
    ///
    /// Arguments
    /// -----------------
    /// * `nutation`: nutation angles at [`Topocentric::mjd`], for the equation of the equinoxes.
    ///
    /// Return
    /// ----------
    /// * `(ω × r + v_surface) / c`, where `r` is the geocentric site position and
    ///   `v_surface` the east/north/up velocity, both oriented at the local apparent
    ///   sidereal angle.
    pub fn equatorial_velocity(&self, nutation: &NutationAngles) -> Vector3<f64> {
        let theta = gmst(self.mjd) + equequ(self.mjd, nutation) + self.location.longitude;
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_lat, cos_lat) = self.location.latitude.sin_cos();

        let (rho_cos_phi, _) = self.location.parallax_constants();
        let axis_distance = EARTH_MAJOR_AXIS * rho_cos_phi;

        // ω × r with ω along the pole
        let rotation = EARTH_ROTATION_RATE * axis_distance * Vector3::new(-sin_t, cos_t, 0.0);

        let east = Vector3::new(-sin_t, cos_t, 0.0);
        let north = Vector3::new(-sin_lat * cos_t, -sin_lat * sin_t, cos_lat);
        let up = Vector3::new(cos_lat * cos_t, cos_lat * sin_t, sin_lat);
        let v = &self.surface_velocity;
        let surface = v.x * east + v.y * north + v.z * up;

        (rotation + surface) / VLIGHT_M
    }
}

impl PartialEq for Topocentric {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
            && self.wobble == other.wobble
            && (self.mjd - other.mjd).abs() < MJD_TOLERANCE
            && self.surface_velocity == other.surface_velocity
    }
}

impl fmt::Display for Topocentric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topocentric({}, {})", self.name, self.epoch())
    }
}
