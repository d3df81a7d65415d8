//! Route resolution between frames.
//!
//! The route is a chain of rules tried in order on the `(from, to)` pair:
//!
//! 1. identical frames: no leg;
//! 2. same variant, other epoch: a direct shift within the family;
//! 3. towards ICRS;
//! 4. towards GCRS, through ICRS;
//! 5. towards a dynamical frame, through ICRS unless coming from a site;
//! 6. towards FK4 / FK5, through ICRS;
//! 7. towards a site, through ICRS unless coming from a dynamical frame.
//!
//! The rules are written so that the route `B → A` is, leg by leg, the inverse of the
//! route `A → B`. Routes going through an intermediate frame recurse, and a recursion
//! deeper than [`MAX_ROUTE_DEPTH`] is reported as [`SkyframeError::UnsupportedRoute`].

use nalgebra::Rotation3;
use tracing::debug;

use crate::constants::{MJD, T2000};
use crate::earth_orientation::{
    dynamical_precession, fk4_precession, fk5_frame_bias, fk5_precession, fk5_to_fk4_equinox,
    j2000_frame_bias, nutation_matrix, polar_motion_celestial,
};
use crate::ephemeris::Ephemeris;
use crate::epoch::Epoch;
use crate::frames::{Frame, Topocentric};
use crate::nutation::Nutation;
use crate::skyframe_errors::SkyframeError;

use super::{Leg, Transform};

/// Deepest recursion accepted while resolving a route.
pub const MAX_ROUTE_DEPTH: usize = 20;

/// Builds [`Transform`]s, pulling nutation and Earth states from borrowed components.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    nutation: &'a Nutation,
    ephemeris: &'a Ephemeris,
}

impl<'a> Resolver<'a> {
    pub fn new(nutation: &'a Nutation, ephemeris: &'a Ephemeris) -> Self {
        Resolver {
            nutation,
            ephemeris,
        }
    }

    /// Resolve the route between two frames.
    ///
    /// Errors
    /// ----------
    /// * [`SkyframeError::EpochMismatch`] if a frame carries an epoch of the wrong calendar.
    /// * [`SkyframeError::EphemerisDomain`] if a geocentric hop falls outside the ephemeris.
    /// * [`SkyframeError::UnsupportedRoute`] if no route is found.
    pub fn route(&self, from: &Frame, to: &Frame) -> Result<Transform, SkyframeError> {
        from.validate()?;
        to.validate()?;

        let mut transform = Transform::new(from.clone(), to.clone());
        self.resolve(&mut transform, from, to, 0)?;

        debug!(
            from = %from,
            to = %to,
            legs = transform.legs().len(),
            hops = transform.hops(),
            "frame route resolved"
        );
        Ok(transform)
    }

    /// Append to `t` the legs going from `from` to `to`.
    pub(crate) fn resolve(
        &self,
        t: &mut Transform,
        from: &Frame,
        to: &Frame,
        depth: usize,
    ) -> Result<(), SkyframeError> {
        if depth > MAX_ROUTE_DEPTH {
            return Err(SkyframeError::UnsupportedRoute {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        if from == to {
            return Ok(());
        }
        let next = depth + 1;

        match (from, to) {
            // Same family, other epoch
            (Frame::Dynamical(a), Frame::Dynamical(b)) => {
                self.dynamical_shift(t, a.to_mjd(), b.to_mjd());
            }
            (Frame::Fk5(a), Frame::Fk5(b)) => {
                t.push_rotation(fk5_precession(a.to_mjd(), b.to_mjd()));
            }
            (Frame::Fk4(a), Frame::Fk4(b)) => {
                t.push_rotation(fk4_precession(a.year(), b.year()));
            }
            (Frame::Topocentric(s), Frame::Topocentric(u)) => {
                self.leave_site(t, s);
                self.dynamical_shift(t, s.mjd, u.mjd);
                self.enter_site(t, u);
            }
            (Frame::Gcrs(a), Frame::Gcrs(b)) => {
                self.leave_geocentre(t, a.to_mjd())?;
                self.enter_geocentre(t, b.to_mjd())?;
            }

            // Towards ICRS
            (Frame::Gcrs(a), Frame::Icrs) => self.leave_geocentre(t, a.to_mjd())?,
            (Frame::Fk5(e), Frame::Icrs) => {
                t.push_rotation(fk5_precession(e.to_mjd(), T2000));
                t.push_rotation(fk5_frame_bias().inverse());
            }
            (Frame::Fk4(e), Frame::Icrs) => {
                t.push_rotation(fk4_precession(e.year(), Epoch::B1950.year()));
                t.push_rotation(fk5_to_fk4_equinox().inverse());
                t.push_rotation(fk5_precession(Epoch::B1950.to_mjd(), T2000));
                t.push_rotation(fk5_frame_bias().inverse());
            }
            (Frame::Dynamical(_) | Frame::Topocentric(_), Frame::Icrs) => {
                let source_mjd = of_date_mjd(from);
                self.resolve(t, from, &Frame::Dynamical(Epoch::J2000), next)?;
                t.push_rotation(self.nutation_at(T2000).inverse());
                t.push_rotation(j2000_frame_bias().inverse());
                self.leave_geocentre(t, source_mjd)?;
            }

            // Towards GCRS
            (_, Frame::Gcrs(b)) => {
                self.resolve(t, from, &Frame::Icrs, next)?;
                self.enter_geocentre(t, b.to_mjd())?;
            }

            // Towards a dynamical frame
            (Frame::Topocentric(s), Frame::Dynamical(b)) => {
                self.leave_site(t, s);
                self.dynamical_shift(t, s.mjd, b.to_mjd());
            }
            (_, Frame::Dynamical(b)) => {
                self.resolve(t, from, &Frame::Icrs, next)?;
                self.enter_true_of_date(t, b.to_mjd())?;
            }

            // Towards FK5 / FK4
            (_, Frame::Fk5(e)) => {
                self.resolve(t, from, &Frame::Icrs, next)?;
                t.push_rotation(fk5_frame_bias());
                t.push_rotation(fk5_precession(T2000, e.to_mjd()));
            }
            (_, Frame::Fk4(e)) => {
                self.resolve(t, from, &Frame::Icrs, next)?;
                t.push_rotation(fk5_frame_bias());
                t.push_rotation(fk5_precession(T2000, Epoch::B1950.to_mjd()));
                t.push_rotation(fk5_to_fk4_equinox());
                t.push_rotation(fk4_precession(Epoch::B1950.year(), e.year()));
            }

            // Towards a site
            (Frame::Dynamical(a), Frame::Topocentric(u)) => {
                self.dynamical_shift(t, a.to_mjd(), u.mjd);
                self.enter_site(t, u);
            }
            (_, Frame::Topocentric(u)) => {
                self.resolve(t, from, &Frame::Icrs, next)?;
                self.enter_true_of_date(t, u.mjd)?;
                self.enter_site(t, u);
            }

            (Frame::Icrs, Frame::Icrs) => {}
        }
        Ok(())
    }

    fn nutation_at(&self, mjd: MJD) -> Rotation3<f64> {
        nutation_matrix(mjd, &self.nutation.angles(mjd))
    }

    /// `N(b)·P(a→b)·N(a)ᵀ`, nothing when both epochs coincide.
    fn dynamical_shift(&self, t: &mut Transform, from_mjd: MJD, to_mjd: MJD) {
        if from_mjd == to_mjd {
            return;
        }
        let shift = self.nutation_at(to_mjd)
            * dynamical_precession(from_mjd, to_mjd)
            * self.nutation_at(from_mjd).inverse();
        t.push_rotation(shift);
    }

    /// ICRS → true equator and equinox of `mjd`, seen from the geocentre at `mjd`.
    fn enter_true_of_date(&self, t: &mut Transform, mjd: MJD) -> Result<(), SkyframeError> {
        self.enter_geocentre(t, mjd)?;
        t.push_rotation(j2000_frame_bias());
        t.push_rotation(self.nutation_at(T2000));
        self.dynamical_shift(t, T2000, mjd);
        Ok(())
    }

    fn enter_geocentre(&self, t: &mut Transform, mjd: MJD) -> Result<(), SkyframeError> {
        t.push_geocentric(self.ephemeris.earth_state(mjd)?, false);
        Ok(())
    }

    fn leave_geocentre(&self, t: &mut Transform, mjd: MJD) -> Result<(), SkyframeError> {
        t.push_geocentric(self.ephemeris.earth_state(mjd)?, true);
        Ok(())
    }

    fn site_leg(&self, site: &Topocentric, undo: bool) -> Leg {
        Leg::Diurnal {
            velocity: site.equatorial_velocity(&self.nutation.angles(site.mjd)),
            wobble: polar_motion_celestial(site.mjd, &site.wobble),
            undo,
        }
    }

    fn enter_site(&self, t: &mut Transform, site: &Topocentric) {
        t.push(self.site_leg(site, false));
    }

    fn leave_site(&self, t: &mut Transform, site: &Topocentric) {
        t.push(self.site_leg(site, true));
    }
}

/// MJD of a frame whose geocentric corrections are evaluated at its own date.
fn of_date_mjd(frame: &Frame) -> MJD {
    match frame {
        Frame::Topocentric(site) => site.mjd,
        other => other.epoch().map_or(T2000, |e| e.to_mjd()),
    }
}
