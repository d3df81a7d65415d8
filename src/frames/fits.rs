//! Mapping between frames and the FITS world-coordinate keywords `RADESYS` and
//! `EQUINOX` (FITS standard 4.0, §8.3), with `MJD-OBS` / `DATE-OBS` for the frames
//! that depend on the time of observation.

use serde::{Deserialize, Serialize};

use crate::constants::MJD;
use crate::epoch::Epoch;
use crate::skyframe_errors::SkyframeError;
use crate::time::date_to_mjd;

use super::Frame;

/// EQUINOX value separating FK4 from FK5 when RADESYS is absent.
const FK5_EQUINOX_CUTOFF: f64 = 1984.0;

/// Values of the frame keywords of a FITS header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitsKeywords {
    pub radesys: String,
    pub equinox: Option<f64>,
}

impl Frame {
    /// `RADESYS` and `EQUINOX` describing this frame.
    ///
    /// Dynamical and topocentric frames are both reported as `GAPPT`, which loses the
    /// observing site.
    pub fn fits_keywords(&self) -> FitsKeywords {
        let (radesys, equinox) = match self {
            Frame::Icrs => ("ICRS", None),
            Frame::Fk5(e) => ("FK5", Some(e.year())),
            Frame::Fk4(e) => ("FK4", Some(e.year())),
            Frame::Gcrs(_) => ("GCRS", None),
            Frame::Dynamical(_) | Frame::Topocentric(_) => ("GAPPT", None),
        };
        FitsKeywords {
            radesys: radesys.to_string(),
            equinox,
        }
    }

    /// Frame described by FITS header keywords.
    ///
    /// Arguments
    /// -----------------
    /// * `radesys`: value of `RADESYS`, if present.
    /// * `equinox`: value of `EQUINOX`, if present.
    /// * `mjd_obs`: value of `MJD-OBS`, if present.
    /// * `date_obs`: value of `DATE-OBS`, if present; used when `MJD-OBS` is missing.
    ///
    /// Return
    /// ----------
    /// * With neither `RADESYS` nor `EQUINOX`, the ICRS.
    /// * Without `RADESYS`, FK4 for `EQUINOX < 1984` and FK5 otherwise.
    /// * FK5 defaults to J2000, FK4 and FK4-NO-E to B1950.
    /// * GCRS and GAPPT take the observation epoch and fail without one.
    ///
    /// Errors
    /// ----------
    /// * [`SkyframeError::InvalidFitsKeyword`] for an unknown `RADESYS` or a missing
    ///   observation time, [`SkyframeError::InvalidDate`] for an unreadable `DATE-OBS`.
    pub fn from_fits_keywords(
        radesys: Option<&str>,
        equinox: Option<f64>,
        mjd_obs: Option<MJD>,
        date_obs: Option<&str>,
    ) -> Result<Frame, SkyframeError> {
        let radesys = match radesys.map(|s| s.trim().to_ascii_uppercase()) {
            Some(value) => value,
            None => match equinox {
                None => return Ok(Frame::Icrs),
                Some(year) if year < FK5_EQUINOX_CUTOFF => "FK4".to_string(),
                Some(_) => "FK5".to_string(),
            },
        };

        match radesys.as_str() {
            "ICRS" => Ok(Frame::Icrs),
            "FK5" => Frame::fk5(Epoch::julian(equinox.unwrap_or(2000.0))),
            "FK4" | "FK4-NO-E" => Frame::fk4(Epoch::besselian(equinox.unwrap_or(1950.0))),
            "GCRS" => Frame::gcrs(observation_epoch(&radesys, mjd_obs, date_obs)?),
            "GAPPT" => Frame::dynamical(observation_epoch(&radesys, mjd_obs, date_obs)?),
            other => Err(SkyframeError::InvalidFitsKeyword(format!(
                "unsupported RADESYS '{other}'"
            ))),
        }
    }
}

fn observation_epoch(
    radesys: &str,
    mjd_obs: Option<MJD>,
    date_obs: Option<&str>,
) -> Result<Epoch, SkyframeError> {
    let mjd = match (mjd_obs, date_obs) {
        (Some(mjd), _) => mjd,
        (None, Some(date)) => date_to_mjd(date)?,
        (None, None) => {
            return Err(SkyframeError::InvalidFitsKeyword(format!(
                "RADESYS '{radesys}' requires MJD-OBS or DATE-OBS"
            )))
        }
    };
    Ok(Epoch::julian_from_mjd(mjd))
}
