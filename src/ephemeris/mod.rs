//! # Simplified Sun / Earth ephemeris
//!
//! Positions and velocities of the Sun and the Earth, heliocentric or barycentric, in
//! AU and AU/day on ICRS-aligned equatorial axes. The model is analytic:
//!
//! * the geocentric Sun comes from a 50-term series (see [`sun`]),
//! * the barycenter offset from the mean orbits of the giant planets (see [`barycenter`]),
//! * velocities are central differences at ±0.1 day.
//!
//! The accuracy (≈ 1″ on the Sun direction, a few 1e-6 AU on the Earth position) is
//! enough for annual aberration, parallax and light deflection, not for astrometric
//! reduction of solar-system bodies.
//!
//! ## Caching
//!
//! The barycenter offset of the last requested epoch is kept in a depth-1 cache, since
//! a conversion typically asks for position and velocity at the same instant.

pub mod barycenter;
pub mod sun;

use std::sync::{Mutex, PoisonError};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::{EPHEMERIS_MJD_RANGE, MJD};
use crate::skyframe_errors::SkyframeError;

use self::barycenter::barycenter_offset;
use self::sun::sun_geocentric;

/// Half step of the central differences, days.
const VELOCITY_STEP: f64 = 0.1;

/// Bodies known to the ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Earth,
}

/// Earth state needed by the geocentric corrections, AU and AU/day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarthState {
    pub barycentric_position: Vector3<f64>,
    pub barycentric_velocity: Vector3<f64>,
    pub heliocentric_position: Vector3<f64>,
}

/// Barycenter offset (position, velocity) of one epoch.
type Offset = (Vector3<f64>, Vector3<f64>);

/// Analytic ephemeris with a depth-1 memo of the barycenter offset.
#[derive(Debug, Default)]
pub struct Ephemeris {
    last_offset: Mutex<Option<(MJD, Offset)>>,
}

impl Ephemeris {
    pub fn new() -> Self {
        Ephemeris::default()
    }

    /// Heliocentric position of `body`.
    ///
    /// Return
    /// ----------
    /// * Position in AU, or [`SkyframeError::EphemerisDomain`] when `mjd` is outside
    ///   `[0, 100000]`.
    pub fn heliocentric_position(&self, body: Body, mjd: MJD) -> Result<Vector3<f64>, SkyframeError> {
        check_domain(mjd)?;
        Ok(match body {
            Body::Sun => Vector3::zeros(),
            Body::Earth => -sun_geocentric(mjd),
        })
    }

    /// Heliocentric velocity of `body`, AU/day.
    pub fn heliocentric_velocity(&self, body: Body, mjd: MJD) -> Result<Vector3<f64>, SkyframeError> {
        check_domain(mjd)?;
        Ok(match body {
            Body::Sun => Vector3::zeros(),
            Body::Earth => central_difference(mjd, |t| -sun_geocentric(t)),
        })
    }

    /// Barycentric position of `body`, AU.
    pub fn barycentric_position(&self, body: Body, mjd: MJD) -> Result<Vector3<f64>, SkyframeError> {
        let (offset, _) = self.offset(mjd)?;
        Ok(self.heliocentric_position(body, mjd)? - offset)
    }

    /// Barycentric velocity of `body`, AU/day.
    pub fn barycentric_velocity(&self, body: Body, mjd: MJD) -> Result<Vector3<f64>, SkyframeError> {
        let (_, offset_velocity) = self.offset(mjd)?;
        Ok(self.heliocentric_velocity(body, mjd)? - offset_velocity)
    }

    /// Everything the geocentric corrections need about the Earth at `mjd`.
    pub fn earth_state(&self, mjd: MJD) -> Result<EarthState, SkyframeError> {
        check_domain(mjd)?;
        let (offset, offset_velocity) = self.offset(mjd)?;
        let heliocentric_position = -sun_geocentric(mjd);
        let heliocentric_velocity = central_difference(mjd, |t| -sun_geocentric(t));
        Ok(EarthState {
            barycentric_position: heliocentric_position - offset,
            barycentric_velocity: heliocentric_velocity - offset_velocity,
            heliocentric_position,
        })
    }

    fn offset(&self, mjd: MJD) -> Result<Offset, SkyframeError> {
        check_domain(mjd)?;

        let mut last = self
            .last_offset
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_mjd, offset)) = *last {
            if cached_mjd == mjd {
                return Ok(offset);
            }
        }

        trace!(mjd, "computing barycenter offset");
        let offset = (barycenter_offset(mjd), central_difference(mjd, barycenter_offset));
        *last = Some((mjd, offset));
        Ok(offset)
    }
}

fn check_domain(mjd: MJD) -> Result<(), SkyframeError> {
    let (start, end) = EPHEMERIS_MJD_RANGE;
    if (start..=end).contains(&mjd) {
        Ok(())
    } else {
        Err(SkyframeError::EphemerisDomain(mjd))
    }
}

fn central_difference(mjd: MJD, position: impl Fn(MJD) -> Vector3<f64>) -> Vector3<f64> {
    (position(mjd + VELOCITY_STEP) - position(mjd - VELOCITY_STEP)) / (2.0 * VELOCITY_STEP)
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use crate::constants::T2000;
    use approx::assert_relative_eq;

    #[test]
    fn test_domain_errors() {
        let ephem = Ephemeris::new();
        assert_eq!(
            ephem.heliocentric_position(Body::Earth, -1.0),
            Err(SkyframeError::EphemerisDomain(-1.0))
        );
        assert_eq!(
            ephem.earth_state(100_000.5).unwrap_err(),
            SkyframeError::EphemerisDomain(100_000.5)
        );
        assert!(ephem.earth_state(0.0).is_ok());
        assert!(ephem.earth_state(100_000.0).is_ok());
    }

    #[test]
    fn test_sun_is_the_heliocentric_origin() {
        let ephem = Ephemeris::new();
        assert_eq!(
            ephem.heliocentric_position(Body::Sun, T2000).unwrap(),
            Vector3::zeros()
        );
        assert_eq!(
            ephem.heliocentric_velocity(Body::Sun, T2000).unwrap(),
            Vector3::zeros()
        );
        let sun_bary = ephem.barycentric_position(Body::Sun, T2000).unwrap();
        assert_relative_eq!(sun_bary, -barycenter_offset(T2000), epsilon = 1e-15);
    }

    #[test]
    fn test_earth_orbit() {
        let ephem = Ephemeris::new();
        for k in 0..12 {
            let mjd = 60000.0 + 30.0 * k as f64;
            let state = ephem.earth_state(mjd).unwrap();
            let r = state.heliocentric_position.norm();
            let v = state.barycentric_velocity.norm();
            assert!((0.983..1.017).contains(&r), "r = {r}");
            assert!((0.0165..0.0176).contains(&v), "v = {v}");

            // Nearly circular orbit: velocity almost perpendicular to the radius
            let cos = state.heliocentric_position.dot(&state.barycentric_velocity) / (r * v);
            assert!(cos.abs() < 0.03);
        }
    }

    #[test]
    fn test_earth_state_matches_individual_queries() {
        let ephem = Ephemeris::new();
        let mjd = 59000.25;
        let state = ephem.earth_state(mjd).unwrap();
        assert_eq!(
            state.barycentric_position,
            ephem.barycentric_position(Body::Earth, mjd).unwrap()
        );
        assert_eq!(
            state.barycentric_velocity,
            ephem.barycentric_velocity(Body::Earth, mjd).unwrap()
        );
        assert_eq!(
            state.heliocentric_position,
            ephem.heliocentric_position(Body::Earth, mjd).unwrap()
        );
    }

    #[test]
    fn test_cache_is_transparent() {
        let cached = Ephemeris::new();
        let a = cached.earth_state(58000.0).unwrap();
        let _ = cached.earth_state(58001.0).unwrap();
        let b = cached.earth_state(58000.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Ephemeris::new().earth_state(58000.0).unwrap());
    }
}
