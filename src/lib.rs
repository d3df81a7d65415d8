//! # skyframe
//!
//! Conversion of apparent directions between celestial reference frames: ICRS, GCRS,
//! FK4, FK5, the true equator and equinox of date, and observer-local topocentric
//! frames.
//!
//! The conversions chain frame bias, precession (IAU 2006, IAU 1976, Newcomb), IAU 2000A
//! nutation at a selectable precision, annual and diurnal aberration, solar light
//! deflection, stellar parallax and polar motion.
//!
//! ```rust, no_run
//! use nalgebra::Vector3;
//! use skyframe::{convert, Epoch, Frame};
//!
//! let fk5 = Frame::fk5(Epoch::J2000).unwrap();
//! let gcrs = Frame::gcrs(Epoch::julian(2025.0)).unwrap();
//! let apparent = convert(&Vector3::new(0.0, 0.6, 0.8), None, &fk5, &gcrs).unwrap();
//! ```
//!
//! Logging goes through [`tracing`]; the crate installs no subscriber.

pub mod constants;
pub mod converter;
pub mod earth_orientation;
pub mod ephemeris;
pub mod epoch;
pub mod frames;
pub mod fundamental_args;
pub mod nutation;
pub mod ref_system;
pub mod skyframe_errors;
pub mod time;
pub mod transform;

pub use converter::{convert, convert_in_place, ConverterConfig, FrameConverter};
pub use epoch::Epoch;
pub use frames::{Frame, GeodeticLocation, Topocentric};
pub use ref_system::SphericalCoordinates;
pub use skyframe_errors::SkyframeError;
pub use transform::Transform;
