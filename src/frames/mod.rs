//! # Celestial reference frames
//!
//! [`Frame`] is the closed set of frames the converter knows about:
//!
//! | Variant | Axes | Origin | Epoch |
//! |---|---|---|---|
//! | [`Frame::Icrs`] | ICRS | barycenter | none |
//! | [`Frame::Gcrs`] | ICRS | geocenter, apparent (aberration, deflection, parallax) | Julian, of observation |
//! | [`Frame::Fk5`] | mean equator and equinox (IAU 1976) | barycenter | Julian equinox |
//! | [`Frame::Fk4`] | mean equator and equinox (Newcomb) | barycenter | Besselian equinox |
//! | [`Frame::Dynamical`] | true equator and equinox of date | geocenter | Julian, of date |
//! | [`Frame::Topocentric`] | true of date, with polar motion | site, with diurnal aberration | site time |
//!
//! Frames are plain values. Constructors check the epoch calendar, and the converter
//! checks it again with [`Frame::validate`] since the variants are public.

pub mod fits;
pub mod topocentric;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::MJD;
use crate::earth_orientation::PolarWobble;
use crate::epoch::Epoch;
use crate::skyframe_errors::SkyframeError;

pub use fits::FitsKeywords;
pub use topocentric::{GeodeticLocation, Topocentric};

/// Tolerance on epochs when comparing frames, in years.
pub const FRAME_EPOCH_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Frame {
    Icrs,
    Gcrs(Epoch),
    Fk4(Epoch),
    Fk5(Epoch),
    Dynamical(Epoch),
    Topocentric(Topocentric),
}

impl Frame {
    pub fn icrs() -> Self {
        Frame::Icrs
    }

    /// Geocentric frame observed at a Julian epoch.
    pub fn gcrs(epoch: Epoch) -> Result<Self, SkyframeError> {
        Frame::Gcrs(epoch).validated()
    }

    /// FK4 frame of a Besselian equinox.
    pub fn fk4(epoch: Epoch) -> Result<Self, SkyframeError> {
        Frame::Fk4(epoch).validated()
    }

    /// FK5 frame of a Julian equinox.
    pub fn fk5(epoch: Epoch) -> Result<Self, SkyframeError> {
        Frame::Fk5(epoch).validated()
    }

    /// True equator and equinox of a Julian date.
    pub fn dynamical(epoch: Epoch) -> Result<Self, SkyframeError> {
        Frame::Dynamical(epoch).validated()
    }

    /// Apparent frame of an observing site.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: site label, informative only.
    /// * `location`: geodetic coordinates of the site.
    /// * `mjd`: observation time.
    /// * `wobble`: polar motion, zero when `None`.
    pub fn topocentric(
        name: impl Into<String>,
        location: GeodeticLocation,
        mjd: MJD,
        wobble: Option<PolarWobble>,
    ) -> Self {
        Frame::Topocentric(Topocentric::new(name, location, mjd, wobble))
    }

    /// Short variant name.
    pub fn name(&self) -> &'static str {
        match self {
            Frame::Icrs => "ICRS",
            Frame::Gcrs(_) => "GCRS",
            Frame::Fk4(_) => "FK4",
            Frame::Fk5(_) => "FK5",
            Frame::Dynamical(_) => "Dynamical",
            Frame::Topocentric(_) => "Topocentric",
        }
    }

    /// Equinox or observation epoch, `None` for the ICRS.
    pub fn epoch(&self) -> Option<Epoch> {
        match self {
            Frame::Icrs => None,
            Frame::Gcrs(e) | Frame::Fk4(e) | Frame::Fk5(e) | Frame::Dynamical(e) => Some(*e),
            Frame::Topocentric(site) => Some(site.epoch()),
        }
    }

    /// Check that the epoch has the calendar the frame requires: Besselian for FK4,
    /// Julian for GCRS, FK5 and Dynamical.
    pub fn validate(&self) -> Result<(), SkyframeError> {
        let (epoch, julian) = match self {
            Frame::Icrs | Frame::Topocentric(_) => return Ok(()),
            Frame::Fk4(e) => (e, false),
            Frame::Gcrs(e) | Frame::Fk5(e) | Frame::Dynamical(e) => (e, true),
        };
        if epoch.is_julian() == julian {
            Ok(())
        } else {
            Err(SkyframeError::EpochMismatch {
                frame: self.name(),
                expected: if julian { "Julian" } else { "Besselian" },
                found: epoch.to_string(),
            })
        }
    }

    fn validated(self) -> Result<Self, SkyframeError> {
        self.validate()?;
        Ok(self)
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        let same = |a: &Epoch, b: &Epoch| a.approx_eq(b, FRAME_EPOCH_TOLERANCE);
        match (self, other) {
            (Frame::Icrs, Frame::Icrs) => true,
            (Frame::Gcrs(a), Frame::Gcrs(b))
            | (Frame::Fk4(a), Frame::Fk4(b))
            | (Frame::Fk5(a), Frame::Fk5(b))
            | (Frame::Dynamical(a), Frame::Dynamical(b)) => same(a, b),
            (Frame::Topocentric(a), Frame::Topocentric(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Icrs => write!(f, "ICRS"),
            Frame::Gcrs(e) | Frame::Fk4(e) | Frame::Fk5(e) | Frame::Dynamical(e) => {
                write!(f, "{}({e})", self.name())
            }
            Frame::Topocentric(site) => write!(f, "{site}"),
        }
    }
}

#[cfg(test)]
mod frames_test {
    use super::*;

    #[test]
    fn test_epoch_kind_is_checked() {
        assert!(Frame::fk5(Epoch::J2000).is_ok());
        assert!(Frame::fk4(Epoch::B1950).is_ok());
        assert_eq!(
            Frame::fk4(Epoch::J2000),
            Err(SkyframeError::EpochMismatch {
                frame: "FK4",
                expected: "Besselian",
                found: "J2000.000".into(),
            })
        );
        assert!(Frame::fk5(Epoch::B1950).is_err());
        assert!(Frame::gcrs(Epoch::besselian(2000.0)).is_err());
        assert!(Frame::dynamical(Epoch::besselian(2000.0)).is_err());
        assert!(Frame::Fk5(Epoch::B1950).validate().is_err());
    }

    #[test]
    fn test_equality() {
        let a = Frame::Fk5(Epoch::julian(2000.0));
        assert_eq!(a, Frame::Fk5(Epoch::julian(2000.0 + 1e-7)));
        assert_ne!(a, Frame::Fk5(Epoch::julian(2000.0005)));
        assert_ne!(a, Frame::Dynamical(Epoch::julian(2000.0)));
        assert_ne!(a, Frame::Icrs);
        assert_eq!(Frame::icrs(), Frame::Icrs);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Frame::Icrs.to_string(), "ICRS");
        assert_eq!(Frame::Fk5(Epoch::J2000).to_string(), "FK5(J2000.000)");
        assert_eq!(Frame::Fk4(Epoch::B1950).to_string(), "FK4(B1950.000)");
        let site = Frame::topocentric(
            "Calern",
            GeodeticLocation::from_degrees(6.92, 43.75, 1270.0),
            60000.0,
            None,
        );
        assert_eq!(site.to_string(), "Topocentric(Calern, J2023.150)");
        assert_eq!(site.epoch(), Some(Epoch::julian_from_mjd(60000.0)));
    }
}
