//! # Frame converter façade
//!
//! [`FrameConverter`] owns the stateful components of a conversion (the nutation
//! evaluator with its cache, the ephemeris with its barycenter memo) and exposes the
//! conversion entry points. It is `Send + Sync`: one converter can serve many threads.
//!
//! A process-wide converter with the default [`ConverterConfig`] backs the free
//! functions [`convert`] and [`convert_in_place`]; it is built on first use.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use nalgebra::Vector3;
//! use skyframe::converter::{ConverterConfig, FrameConverter};
//! use skyframe::epoch::Epoch;
//! use skyframe::frames::Frame;
//! use skyframe::nutation::NutationPrecision;
//!
//! let converter = FrameConverter::new(
//!     ConverterConfig::default().with_nutation_precision(NutationPrecision::Milli1),
//! );
//!
//! let fk4 = Frame::fk4(Epoch::B1950).unwrap();
//! let apparent = Frame::dynamical(Epoch::julian(2024.5)).unwrap();
//!
//! // Reuse the resolved route for a batch of stars
//! let session = converter.transform(&fk4, &apparent).unwrap();
//! let star = session.apply(&Vector3::new(0.2, 0.3, 0.93), None);
//! ```
//!
//! ## See also
//! ------------
//! * [`Transform`] – Resolved route, reusable for many directions.
//! * [`Resolver`] – Route rules.

use camino::Utf8PathBuf;
use nalgebra::Vector3;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::ephemeris::Ephemeris;
use crate::frames::Frame;
use crate::nutation::{Nutation, NutationPrecision, DEFAULT_CACHE_CAPACITY};
use crate::ref_system::SphericalCoordinates;
use crate::skyframe_errors::SkyframeError;
use crate::transform::{Resolver, Transform};

/// Settings of a [`FrameConverter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub nutation_precision: NutationPrecision,
    /// Capacity of the nutation cache, zero to disable it.
    pub nutation_cache_capacity: usize,
    /// Coefficient table replacing the bundled one.
    pub nutation_table: Option<Utf8PathBuf>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            nutation_precision: NutationPrecision::Full,
            nutation_cache_capacity: DEFAULT_CACHE_CAPACITY,
            nutation_table: None,
        }
    }
}

impl ConverterConfig {
    pub fn with_nutation_precision(mut self, precision: NutationPrecision) -> Self {
        self.nutation_precision = precision;
        self
    }

    pub fn with_nutation_cache_capacity(mut self, capacity: usize) -> Self {
        self.nutation_cache_capacity = capacity;
        self
    }

    pub fn with_nutation_table(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.nutation_table = Some(path.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct FrameConverter {
    nutation: Nutation,
    ephemeris: Ephemeris,
}

impl FrameConverter {
    /// Build a converter with its own caches.
    ///
    /// Nothing is loaded here: the nutation table is read on the first conversion that
    /// needs it.
    pub fn new(config: ConverterConfig) -> Self {
        let nutation = match config.nutation_table {
            Some(path) => Nutation::from_path(config.nutation_precision, path),
            None => Nutation::new(config.nutation_precision),
        }
        .with_cache_capacity(config.nutation_cache_capacity);

        FrameConverter::with_components(nutation, Ephemeris::new())
    }

    /// Build a converter around existing components.
    pub fn with_components(nutation: Nutation, ephemeris: Ephemeris) -> Self {
        FrameConverter {
            nutation,
            ephemeris,
        }
    }

    pub fn nutation(&self) -> &Nutation {
        &self.nutation
    }

    pub fn ephemeris(&self) -> &Ephemeris {
        &self.ephemeris
    }

    /// Resolve the route between two frames.
    ///
    /// Arguments
    /// -----------------
    /// * `from`: frame of the input directions.
    /// * `to`: frame of the output directions.
    ///
    /// Return
    /// ----------
    /// * A [`Transform`] to apply to any number of directions, or the error of the
    ///   first leg that could not be built.
    ///
    /// See also
    /// ------------
    /// * [`Resolver::route`] – Rules and errors.
    pub fn transform(&self, from: &Frame, to: &Frame) -> Result<Transform, SkyframeError> {
        Resolver::new(&self.nutation, &self.ephemeris).route(from, to)
    }

    /// Convert a rectangular direction, optionally at a known distance (AU).
    ///
    /// The output has the norm of `direction`. Converting to the same frame returns
    /// `direction` unchanged.
    pub fn convert(
        &self,
        direction: &Vector3<f64>,
        distance: Option<f64>,
        from: &Frame,
        to: &Frame,
    ) -> Result<Vector3<f64>, SkyframeError> {
        Ok(self.transform(from, to)?.apply(direction, distance))
    }

    /// Convert a longitude/latitude pair, overwriting it.
    pub fn convert_in_place(
        &self,
        coordinates: &mut SphericalCoordinates,
        from: &Frame,
        to: &Frame,
    ) -> Result<(), SkyframeError> {
        let transform = self.transform(from, to)?;
        if transform.is_identity() {
            return Ok(());
        }
        let converted = transform.apply(&coordinates.to_cartesian(), None);
        *coordinates = SphericalCoordinates::from_cartesian(&converted);
        Ok(())
    }
}

static DEFAULT_CONVERTER: Lazy<FrameConverter> = Lazy::new(FrameConverter::default);

/// Process-wide converter with the default configuration.
pub fn default_converter() -> &'static FrameConverter {
    &DEFAULT_CONVERTER
}

/// [`FrameConverter::convert`] on the process-wide converter.
pub fn convert(
    direction: &Vector3<f64>,
    distance: Option<f64>,
    from: &Frame,
    to: &Frame,
) -> Result<Vector3<f64>, SkyframeError> {
    DEFAULT_CONVERTER.convert(direction, distance, from, to)
}

/// [`FrameConverter::convert_in_place`] on the process-wide converter.
pub fn convert_in_place(
    coordinates: &mut SphericalCoordinates,
    from: &Frame,
    to: &Frame,
) -> Result<(), SkyframeError> {
    DEFAULT_CONVERTER.convert_in_place(coordinates, from, to)
}

#[cfg(test)]
mod converter_test {
    use super::*;
    use crate::epoch::Epoch;
    use approx::assert_relative_eq;

    #[test]
    fn test_config_builders() {
        let config = ConverterConfig::default()
            .with_nutation_precision(NutationPrecision::Milli10)
            .with_nutation_cache_capacity(0)
            .with_nutation_table("/tmp/table.dat");
        assert_eq!(config.nutation_precision, NutationPrecision::Milli10);
        assert_eq!(config.nutation_cache_capacity, 0);
        assert_eq!(
            config.nutation_table.as_deref(),
            Some(camino::Utf8Path::new("/tmp/table.dat"))
        );

        let converter = FrameConverter::new(ConverterConfig::default().with_nutation_cache_capacity(7));
        assert_eq!(converter.nutation().cache().capacity(), 7);
        assert_eq!(converter.nutation().precision(), NutationPrecision::Full);
    }

    #[test]
    fn test_cache_is_filled_by_conversions() {
        let converter = FrameConverter::default();
        let v = Vector3::new(0.0, 0.0, 1.0);
        converter
            .convert(&v, None, &Frame::Icrs, &Frame::Dynamical(Epoch::julian(2020.0)))
            .unwrap();
        // J2000 and the target epoch
        assert_eq!(converter.nutation().cache().len(), 2);
    }

    #[test]
    fn test_in_place_round_trip() {
        let mut c = SphericalCoordinates::new(1.2, -0.4);
        let fk4 = Frame::Fk4(Epoch::B1950);
        let gcrs = Frame::Gcrs(Epoch::julian(2015.0));
        convert_in_place(&mut c, &fk4, &gcrs).unwrap();
        assert!((c.longitude - 1.2).abs() > 1e-4);
        convert_in_place(&mut c, &gcrs, &fk4).unwrap();
        assert_relative_eq!(c.longitude, 1.2, epsilon = 1e-10);
        assert_relative_eq!(c.latitude, -0.4, epsilon = 1e-10);
    }

    #[test]
    fn test_missing_table_still_converts() {
        let converter = FrameConverter::new(
            ConverterConfig::default().with_nutation_table("/nonexistent/nutation.dat"),
        );
        let v = Vector3::new(1.0, 0.0, 0.0);
        let out = converter
            .convert(&v, None, &Frame::Icrs, &Frame::Dynamical(Epoch::julian(2020.0)))
            .unwrap();
        assert_relative_eq!(out.norm(), 1.0, epsilon = 1e-12);
        assert_eq!(converter.nutation().term_count(), 0);
    }
}
