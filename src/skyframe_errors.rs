use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyframeError {
    #[error("Ephemeris date out of range: MJD {0} is outside [0, 100000]")]
    EphemerisDomain(f64),

    #[error("Unsupported frame conversion from {from} to {to}")]
    UnsupportedRoute { from: String, to: String },

    #[error("{frame} frames require a {expected} epoch, got {found}")]
    EpochMismatch {
        frame: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Unable to load the nutation table: {0}")]
    NutationTable(String),

    #[error("Invalid FITS frame keywords: {0}")]
    InvalidFitsKeyword(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for SkyframeError {
    fn eq(&self, other: &Self) -> bool {
        use SkyframeError::*;
        match (self, other) {
            (EphemerisDomain(a), EphemerisDomain(b)) => a == b,
            (
                UnsupportedRoute { from: f1, to: t1 },
                UnsupportedRoute { from: f2, to: t2 },
            ) => f1 == f2 && t1 == t2,
            (
                EpochMismatch {
                    frame: f1,
                    expected: e1,
                    found: g1,
                },
                EpochMismatch {
                    frame: f2,
                    expected: e2,
                    found: g2,
                },
            ) => f1 == f2 && e1 == e2 && g1 == g2,
            (NutationTable(a), NutationTable(b)) => a == b,
            (InvalidFitsKeyword(a), InvalidFitsKeyword(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,

            // I/O errors are not comparable: equal when the kind matches
            (IoError(a), IoError(b)) => a.kind() == b.kind(),

            _ => false,
        }
    }
}
