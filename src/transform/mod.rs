//! # Frame-conversion sessions
//!
//! A [`Transform`] is the resolved route between two frames: an ordered list of
//! [`Leg`]s, built once by [`Resolver`] and applied to any number of directions.
//!
//! Three kinds of leg exist:
//!
//! * [`Leg::Rotate`]: a change of axes (frame bias, precession, nutation, or any product
//!   of them). Consecutive rotations are merged when the route is built.
//! * [`Leg::Geocentric`]: moving between the barycentre and the geocentre (ICRS ↔ GCRS),
//!   i.e. parallax, light deflection and annual aberration, or their inverse.
//! * [`Leg::Diurnal`]: moving between the geocentre and an observing site, i.e.
//!   diurnal aberration and polar motion, or their inverse.
//!
//! Every leg has an exact inverse ([`Leg::inverse`]), and [`Transform::reversed`] is the
//! route of the opposite conversion.

pub mod corrections;
pub mod resolve;

use nalgebra::{Rotation3, Vector3};

use crate::ephemeris::EarthState;
use crate::frames::Frame;

use self::corrections::{aberration, enter_geocentre, leave_geocentre};

pub use resolve::{Resolver, MAX_ROUTE_DEPTH};

/// One elementary step of a conversion, acting on unit vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum Leg {
    Rotate(Rotation3<f64>),
    /// ICRS → GCRS when `undo` is false.
    Geocentric { earth: EarthState, undo: bool },
    /// Geocentre → site when `undo` is false: aberration by `velocity` (units of c) on
    /// true-of-date axes, then the polar motion rotation `wobble`.
    Diurnal {
        velocity: Vector3<f64>,
        wobble: Rotation3<f64>,
        undo: bool,
    },
}

impl Leg {
    pub fn inverse(&self) -> Leg {
        match self {
            Leg::Rotate(rot) => Leg::Rotate(rot.inverse()),
            Leg::Geocentric { earth, undo } => Leg::Geocentric {
                earth: *earth,
                undo: !undo,
            },
            Leg::Diurnal {
                velocity,
                wobble,
                undo,
            } => Leg::Diurnal {
                velocity: *velocity,
                wobble: *wobble,
                undo: !undo,
            },
        }
    }

    /// Apply the leg to a unit vector.
    ///
    /// `distance` (AU) only matters to the geocentric legs.
    pub fn apply(&self, p: &Vector3<f64>, distance: Option<f64>) -> Vector3<f64> {
        match self {
            Leg::Rotate(rot) => rot * p,
            Leg::Geocentric { earth, undo: false } => enter_geocentre(p, distance, earth),
            Leg::Geocentric { earth, undo: true } => leave_geocentre(p, distance, earth),
            Leg::Diurnal {
                velocity,
                wobble,
                undo: false,
            } => wobble * aberration(p, velocity),
            Leg::Diurnal {
                velocity,
                wobble,
                undo: true,
            } => aberration(&(wobble.inverse() * p), &-velocity),
        }
    }
}

/// Resolved conversion between two frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    from: Frame,
    to: Frame,
    legs: Vec<Leg>,
    /// Velocity of the target origin relative to the source origin, AU/day.
    velocity: Vector3<f64>,
    /// Position of the target origin relative to the source origin, AU.
    offset: Vector3<f64>,
    /// Barycentre → geocentre hops minus geocentre → barycentre hops.
    hops: i32,
}

impl Transform {
    /// Empty session between two frames; legs are added by the [`Resolver`].
    pub fn new(from: Frame, to: Frame) -> Self {
        Transform {
            from,
            to,
            legs: Vec::new(),
            velocity: Vector3::zeros(),
            offset: Vector3::zeros(),
            hops: 0,
        }
    }

    pub fn from(&self) -> &Frame {
        &self.from
    }

    pub fn to(&self) -> &Frame {
        &self.to
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    pub fn offset(&self) -> Vector3<f64> {
        self.offset
    }

    pub fn hops(&self) -> i32 {
        self.hops
    }

    pub fn is_identity(&self) -> bool {
        self.legs.is_empty()
    }

    /// Convert one direction.
    ///
    /// Arguments
    /// -----------------
    /// * `direction`: rectangular vector in the source frame, any non-zero norm.
    /// * `distance`: distance of the object in AU, `None` for an object at infinity.
    ///
    /// Return
    /// ----------
    /// * The vector in the target frame with the same norm. Without legs the input is
    ///   returned untouched.
    pub fn apply(&self, direction: &Vector3<f64>, distance: Option<f64>) -> Vector3<f64> {
        if self.legs.is_empty() {
            return *direction;
        }
        let norm = direction.norm();
        if norm == 0.0 {
            return *direction;
        }

        let unit = self
            .legs
            .iter()
            .fold(direction / norm, |p, leg| leg.apply(&p, distance));
        unit * norm
    }

    /// Session of the opposite conversion.
    pub fn reversed(&self) -> Transform {
        Transform {
            from: self.to.clone(),
            to: self.from.clone(),
            legs: self.legs.iter().rev().map(Leg::inverse).collect(),
            velocity: -self.velocity,
            offset: -self.offset,
            hops: -self.hops,
        }
    }

    /// Append a rotation, merged into the previous leg when that one is a rotation too.
    pub(crate) fn push_rotation(&mut self, rotation: Rotation3<f64>) {
        match self.legs.last_mut() {
            Some(Leg::Rotate(previous)) => *previous = rotation * *previous,
            _ => self.legs.push(Leg::Rotate(rotation)),
        }
    }

    pub(crate) fn push_geocentric(&mut self, earth: EarthState, undo: bool) {
        let sign = if undo { -1.0 } else { 1.0 };
        self.velocity += sign * earth.barycentric_velocity;
        self.offset += sign * earth.barycentric_position;
        self.hops += if undo { -1 } else { 1 };
        self.legs.push(Leg::Geocentric { earth, undo });
    }

    pub(crate) fn push(&mut self, leg: Leg) {
        self.legs.push(leg);
    }
}

#[cfg(test)]
mod transform_test {
    use super::*;
    use crate::ephemeris::Ephemeris;
    use crate::ref_system::{compose, Axis};
    use approx::assert_relative_eq;

    fn sample_transform() -> Transform {
        let earth = Ephemeris::new().earth_state(60000.0).unwrap();
        let mut t = Transform::new(Frame::Icrs, Frame::Icrs);
        t.push_rotation(compose(&[(Axis::Z, 0.1)]));
        t.push_geocentric(earth, false);
        t.push(Leg::Diurnal {
            velocity: Vector3::new(1e-6, -1e-6, 0.0),
            wobble: compose(&[(Axis::Y, 1e-6)]),
            undo: false,
        });
        t.push_rotation(compose(&[(Axis::X, 0.2)]));
        t
    }

    #[test]
    fn test_identity_is_untouched() {
        let t = Transform::new(Frame::Icrs, Frame::Icrs);
        let v = Vector3::new(0.1, 0.2, 0.3);
        assert!(t.is_identity());
        assert_eq!(t.apply(&v, Some(1.0)), v);
    }

    #[test]
    fn test_rotations_are_merged() {
        let mut t = Transform::new(Frame::Icrs, Frame::Icrs);
        t.push_rotation(compose(&[(Axis::Z, 0.1)]));
        t.push_rotation(compose(&[(Axis::Z, 0.2)]));
        assert_eq!(t.legs().len(), 1);
        let v = Vector3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(t.apply(&v, None), compose(&[(Axis::Z, 0.3)]) * v, epsilon = 1e-15);
    }

    #[test]
    fn test_norm_is_preserved() {
        let t = sample_transform();
        let v = Vector3::new(3.0, -4.0, 12.0);
        assert_relative_eq!(t.apply(&v, None).norm(), 13.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reversed_undoes() {
        let t = sample_transform();
        let r = t.reversed();
        assert_eq!(r.hops(), -1);
        assert_eq!(r.velocity(), -t.velocity());
        assert_eq!(r.legs().len(), t.legs().len());

        let v = Vector3::new(0.5, 0.5, -0.2);
        for distance in [None, Some(1e6)] {
            let back = r.apply(&t.apply(&v, distance), distance);
            assert_relative_eq!(back, v, epsilon = 1e-13);
        }
    }
}
