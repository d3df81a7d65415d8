//! Parsing and evaluation of a nutation coefficient table.
//!
//! The table format is whitespace separated, one term per line, with `#` comments.
//! Lunisolar rows carry the multipliers of l, l', F, D, Ω and pA:
//!
//! ```text
//! #  l   l'   F    D   Om   pA       S      S1      Sc        C      C1      Cs
//!    0    0    0    0    1    0  -172064161 -174666  33386  92052331   9086  15377
//! ```
//!
//! Planetary rows insert the multipliers of the eight planetary mean longitudes
//! (Mercury to Neptune) between Ω and pA, for 20 columns in all.
//!
//! Amplitudes are in units of 0.1 µas. Each term contributes
//!
//! ```text
//! Δψ += (S + S1·t)·sin(arg) + Sc·cos(arg)
//! Δε += (C + C1·t)·cos(arg) + Cs·sin(arg)
//! ```
//!
//! with `arg` the integer combination of the fundamental arguments
//! ([`FundamentalArguments::as_array`](crate::fundamental_args::FundamentalArguments::as_array)).


use crate::constants::RADSEC;
use crate::skyframe_errors::SkyframeError;

use super::NutationAngles;

/// Table shipped with the crate: the leading lunisolar terms of IAU 2000A.
pub(crate) const BUNDLED_TABLE: &str = include_str!("../../data/iau2000a_nutation.dat");

/// 0.1 µas → radians
const UNIT_TO_RAD: f64 = 1e-7 * RADSEC;

/// Columns of a lunisolar row and of a planetary row.
const LUNISOLAR_COLUMNS: usize = 12;
const PLANETARY_COLUMNS: usize = 20;

/// One periodic term of the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutationTerm {
    /// Multipliers of l, l', F, D, Ω, the eight planetary longitudes and pA.
    pub multipliers: [i32; 14],
    /// In-phase longitude amplitude and its rate (0.1 µas, 0.1 µas/century).
    pub s: f64,
    pub s_rate: f64,
    /// Out-of-phase longitude amplitude (0.1 µas).
    pub s_cos: f64,
    /// In-phase obliquity amplitude and its rate.
    pub c: f64,
    pub c_rate: f64,
    /// Out-of-phase obliquity amplitude.
    pub c_sin: f64,
}

impl NutationTerm {
    /// A term survives truncation unless both leading amplitudes fall under the threshold.
    fn is_retained(&self, threshold: f64) -> bool {
        !(self.s.abs() < threshold && self.c.abs() < threshold)
    }

    fn argument(&self, arguments: &[f64; 14]) -> f64 {
        arguments
            .iter()
            .zip(self.multipliers.iter())
            .map(|(a, &n)| n as f64 * a)
            .sum()
    }
}

/// A nutation series truncated at a given amplitude threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutationSeries {
    terms: Vec<NutationTerm>,
}

impl NutationSeries {
    /// Parse a coefficient table, keeping only the terms above `threshold` (0.1 µas).
    ///
    /// Arguments
    /// -----------------
    /// * `text`: the table content.
    /// * `threshold`: truncation threshold, `0.0` keeps every term.
    ///
    /// Return
    /// ----------
    /// * The truncated series, or [`SkyframeError::NutationTable`] when a line is malformed
    ///   or the table holds no term at all.
    pub fn parse(text: &str, threshold: f64) -> Result<Self, SkyframeError> {
        let mut terms = Vec::new();
        let mut seen = 0usize;

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let term = parse_line(line).map_err(|msg| {
                SkyframeError::NutationTable(format!("line {}: {msg}", lineno + 1))
            })?;
            seen += 1;
            if term.is_retained(threshold) {
                terms.push(term);
            }
        }

        if seen == 0 {
            return Err(SkyframeError::NutationTable(
                "table contains no term".to_string(),
            ));
        }

        Ok(NutationSeries { terms })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[NutationTerm] {
        &self.terms
    }

    /// Sum the series.
    ///
    /// Arguments
    /// -----------------
    /// * `arguments`: l, l', F, D, Ω, the planetary longitudes and pA, in radians.
    /// * `t`: Julian centuries since J2000.
    ///
    /// Return
    /// ----------
    /// * (Δψ, Δε) in radians.
    pub fn evaluate(&self, arguments: &[f64; 14], t: f64) -> NutationAngles {
        let (dpsi, deps) = self
            .terms
            .iter()
            .rev()
            .fold((0.0, 0.0), |(dpsi, deps), term| {
                let (sin_arg, cos_arg) = term.argument(arguments).sin_cos();
                (
                    dpsi + (term.s + term.s_rate * t) * sin_arg + term.s_cos * cos_arg,
                    deps + (term.c + term.c_rate * t) * cos_arg + term.c_sin * sin_arg,
                )
            });

        NutationAngles {
            dpsi: dpsi * UNIT_TO_RAD,
            deps: deps * UNIT_TO_RAD,
        }
    }
}

fn parse_line(line: &str) -> Result<NutationTerm, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let n_multipliers = match fields.len() {
        LUNISOLAR_COLUMNS => 6,
        PLANETARY_COLUMNS => 14,
        found => {
            return Err(format!(
                "expected {LUNISOLAR_COLUMNS} or {PLANETARY_COLUMNS} columns, found {found}"
            ))
        }
    };

    let mut parsed = [0i32; 14];
    for (slot, field) in parsed.iter_mut().zip(&fields[..n_multipliers]) {
        *slot = field
            .parse()
            .map_err(|_| format!("invalid argument multiplier '{field}'"))?;
    }
    // Lunisolar rows: l, l', F, D, Ω then pA in the last slot
    let multipliers = if n_multipliers == 6 {
        let mut m = [0i32; 14];
        m[..5].copy_from_slice(&parsed[..5]);
        m[13] = parsed[5];
        m
    } else {
        parsed
    };

    let mut amplitudes = [0f64; 6];
    for (slot, field) in amplitudes.iter_mut().zip(&fields[n_multipliers..]) {
        *slot = field
            .parse()
            .map_err(|_| format!("invalid amplitude '{field}'"))?;
    }
    let [s, s_rate, s_cos, c, c_rate, c_sin] = amplitudes;

    Ok(NutationTerm {
        multipliers,
        s,
        s_rate,
        s_cos,
        c,
        c_rate,
        c_sin,
    })
}
