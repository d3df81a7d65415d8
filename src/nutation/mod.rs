//! # IAU 2000A nutation with selectable precision
//!
//! This module evaluates the nutation in longitude and obliquity (Δψ, Δε) from a
//! periodic-term table, with four precision tiers trading series length for speed.
//!
//! | Tier | Threshold | Arguments | IAU 2006 adjustment |
//! |------|-----------|-----------|---------------------|
//! | [`NutationPrecision::Full`] | none | full | yes |
//! | [`NutationPrecision::Micro100`] | 100 µas | full | no |
//! | [`NutationPrecision::Milli1`] | 1 mas | linear | no |
//! | [`NutationPrecision::Milli10`] | 10 mas | linear | no |
//!
//! A term is dropped when **both** its leading longitude and obliquity amplitudes
//! are under the threshold, so cheaper tiers are backed by strictly shorter lists.
//!
//! ## Table loading
//!
//! The coefficient table is parsed lazily, once per [`Nutation`] instance, from the
//! bundled resource or from a user-supplied file (see
//! [`Nutation::from_path`](crate::nutation::Nutation::from_path)) in the same format,
//! e.g. the complete IERS 2003 series with its planetary rows.
//!
//! The bundled table holds the 225 leading lunisolar terms plus the constant
//! planetary offsets, retaining 226 / 88 / 36 / 13 terms across the four tiers.
//!
//! If the table cannot be read or parsed, a warning is logged and every evaluation
//! returns a zero correction. Nutation is a sub-arcsecond refinement, so conversions
//! stay available in degraded mode.
//!
//! ## Caching
//!
//! Results are memoized in a [`NutationCache`] keyed by the MJD rounded to 1/100 day.
//! The series is evaluated at the bucket epoch itself, so cached and uncached calls
//! for the same bucket agree exactly.
//!
//! ## See also
//! ------------
//! * [`fundamental_arguments`](crate::fundamental_args::fundamental_arguments) – Series arguments.
//! * [`nutation_matrix`](crate::earth_orientation::nutation_matrix) – Rotation built from (Δψ, Δε).

pub mod cache;
pub mod series;

use std::ops::{Add, AddAssign};

use camino::{Utf8Path, Utf8PathBuf};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{Radian, MJD, RADSEC};
use crate::fundamental_args::{fundamental_arguments, ArgumentForm, DelaunayArguments};
use crate::skyframe_errors::SkyframeError;
use crate::time::centuries_since_j2000;

pub use cache::{NutationCache, DEFAULT_CACHE_CAPACITY};
pub use series::{NutationSeries, NutationTerm};

/// Nutation precision tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NutationPrecision {
    #[default]
    Full,
    Micro100,
    Milli1,
    Milli10,
}

impl NutationPrecision {
    /// Truncation threshold in units of 0.1 µas.
    pub fn threshold(&self) -> f64 {
        match self {
            NutationPrecision::Full => 0.0,
            NutationPrecision::Micro100 => 1_000.0,
            NutationPrecision::Milli1 => 10_000.0,
            NutationPrecision::Milli10 => 100_000.0,
        }
    }

    pub fn argument_form(&self) -> ArgumentForm {
        match self {
            NutationPrecision::Full | NutationPrecision::Micro100 => ArgumentForm::Full,
            NutationPrecision::Milli1 | NutationPrecision::Milli10 => ArgumentForm::Linear,
        }
    }
}

/// Nutation in longitude and obliquity, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutationAngles {
    pub dpsi: Radian,
    pub deps: Radian,
}

impl Add for NutationAngles {
    type Output = NutationAngles;

    fn add(self, rhs: NutationAngles) -> NutationAngles {
        NutationAngles {
            dpsi: self.dpsi + rhs.dpsi,
            deps: self.deps + rhs.deps,
        }
    }
}

impl AddAssign for NutationAngles {
    fn add_assign(&mut self, rhs: NutationAngles) {
        *self = *self + rhs;
    }
}

/// Closed-form IAU 2006 adjustment of the IAU 2000A angles (J2 rate and
/// precession-rate consistency), expressed on the four leading node terms.
pub fn iau2006_adjustment(args: &DelaunayArguments, t: f64) -> NutationAngles {
    let f = args.f;
    let d = args.d;
    let om = args.omega;

    let psi0 = (-17.2064161 * om.sin() - 1.3170906 * (2.0 * (f - d + om)).sin()
        - 0.2276413 * (2.0 * (f + om)).sin()
        + 0.2074554 * (2.0 * om).sin())
        * RADSEC;
    let eps0 = (9.2052331 * om.cos()
        + 0.5730336 * (2.0 * (f - d + om)).cos()
        + 0.0978459 * (2.0 * (f + om)).cos()
        - 0.0897492 * (2.0 * om).cos())
        * RADSEC;

    let fj2 = -2.7774e-6 * t;
    NutationAngles {
        dpsi: (0.4697e-6 + fj2) * psi0,
        deps: fj2 * eps0,
    }
}

#[derive(Debug, Clone)]
enum TableSource {
    Bundled,
    File(Utf8PathBuf),
    Text(String),
}

/// Nutation evaluator for one precision tier, owning its table and cache.
#[derive(Debug)]
pub struct Nutation {
    precision: NutationPrecision,
    source: TableSource,
    series: OnceCell<Option<NutationSeries>>,
    cache: NutationCache,
}

impl Default for Nutation {
    fn default() -> Self {
        Nutation::full()
    }
}

impl Nutation {
    /// Evaluator backed by the bundled table.
    pub fn new(precision: NutationPrecision) -> Self {
        Nutation {
            precision,
            source: TableSource::Bundled,
            series: OnceCell::new(),
            cache: NutationCache::default(),
        }
    }

    pub fn full() -> Self {
        Nutation::new(NutationPrecision::Full)
    }

    pub fn micro100() -> Self {
        Nutation::new(NutationPrecision::Micro100)
    }

    pub fn milli1() -> Self {
        Nutation::new(NutationPrecision::Milli1)
    }

    pub fn milli10() -> Self {
        Nutation::new(NutationPrecision::Milli10)
    }

    /// Evaluator backed by a coefficient file, read on first use.
    pub fn from_path(precision: NutationPrecision, path: impl AsRef<Utf8Path>) -> Self {
        Nutation {
            source: TableSource::File(path.as_ref().to_owned()),
            ..Nutation::new(precision)
        }
    }

    /// Evaluator backed by an in-memory table.
    pub fn with_table(precision: NutationPrecision, table: impl Into<String>) -> Self {
        Nutation {
            source: TableSource::Text(table.into()),
            ..Nutation::new(precision)
        }
    }

    /// Replace the cache by an empty one of the given capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = NutationCache::new(capacity);
        self
    }

    pub fn precision(&self) -> NutationPrecision {
        self.precision
    }

    pub fn cache(&self) -> &NutationCache {
        &self.cache
    }

    /// Number of terms retained for this tier, zero if the table failed to load.
    pub fn term_count(&self) -> usize {
        self.series().map_or(0, NutationSeries::len)
    }

    /// Nutation angles at `mjd`, memoized per 1/100 day bucket.
    ///
    /// Arguments
    /// -----------------
    /// * `mjd`: Modified Julian Date (TT).
    ///
    /// Return
    /// ----------
    /// * (Δψ, Δε) in radians, evaluated at the bucket epoch. Zero when the table is unavailable.
    pub fn angles(&self, mjd: MJD) -> NutationAngles {
        let key = NutationCache::key(mjd);
        if let Some(hit) = self.cache.get(key) {
            return hit;
        }
        let angles = self.compute(NutationCache::bucket_mjd(key));
        self.cache.insert(key, angles);
        angles
    }

    /// Uncached evaluation at the exact epoch.
    pub fn compute(&self, mjd: MJD) -> NutationAngles {
        let Some(series) = self.series() else {
            return NutationAngles::default();
        };

        let args = fundamental_arguments(mjd, self.precision.argument_form());
        let t = centuries_since_j2000(mjd);
        let mut angles = series.evaluate(&args.as_array(), t);

        if self.precision == NutationPrecision::Full {
            angles += iau2006_adjustment(&args.delaunay, t);
        }
        angles
    }

    fn series(&self) -> Option<&NutationSeries> {
        self.series
            .get_or_init(|| match self.load() {
                Ok(series) => {
                    debug!(
                        precision = ?self.precision,
                        terms = series.len(),
                        "nutation table loaded"
                    );
                    Some(series)
                }
                Err(err) => {
                    warn!(
                        precision = ?self.precision,
                        source = ?self.source,
                        "{err}; nutation corrections are disabled"
                    );
                    None
                }
            })
            .as_ref()
    }

    fn load(&self) -> Result<NutationSeries, SkyframeError> {
        let threshold = self.precision.threshold();
        match &self.source {
            TableSource::Bundled => NutationSeries::parse(series::BUNDLED_TABLE, threshold),
            TableSource::Text(text) => NutationSeries::parse(text, threshold),
            TableSource::File(path) => {
                let text = std::fs::read_to_string(path)?;
                NutationSeries::parse(&text, threshold)
            }
        }
    }
}
