#![allow(dead_code)]

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skyframe::constants::RADMAS;
use skyframe::earth_orientation::PolarWobble;
use skyframe::{Epoch, Frame, GeodeticLocation};

/// Assert that two vectors agree to `tolerance` relative to the norm of `expected`.
pub fn assert_direction_close(actual: &Vector3<f64>, expected: &Vector3<f64>, tolerance: f64) {
    let error = (actual - expected).norm() / expected.norm();
    assert!(
        error <= tolerance,
        "relative error {error:e} above {tolerance:e}\n  actual:   {actual:?}\n  expected: {expected:?}"
    );
}

/// Angle between two vectors in milliarcseconds, accurate for tiny angles.
pub fn separation_mas(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b)) / RADMAS
}

/// Seeded directions of random norm, uniform on the sphere.
pub fn random_directions(seed: u64, count: usize) -> Vec<Vector3<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let z: f64 = rng.random_range(-1.0..1.0);
            let lon: f64 = rng.random_range(0.0..std::f64::consts::TAU);
            let r = (1.0 - z * z).sqrt();
            let norm: f64 = rng.random_range(0.5..20.0);
            norm * Vector3::new(r * lon.cos(), r * lon.sin(), z)
        })
        .collect()
}

pub fn calern(mjd: f64) -> Frame {
    Frame::topocentric(
        "Calern",
        GeodeticLocation::from_degrees(6.92, 43.75, 1270.0),
        mjd,
        Some(PolarWobble::from_arcsec(0.15, 0.35)),
    )
}

pub fn mauna_kea(mjd: f64) -> Frame {
    Frame::Topocentric(
        skyframe::Topocentric::new(
            "Mauna Kea",
            GeodeticLocation::from_degrees(-155.47, 19.82, 4205.0),
            mjd,
            None,
        )
        .with_surface_velocity(3.0, -2.0, 0.5),
    )
}

/// At least two frames of every variant.
pub fn sample_frames() -> Vec<Frame> {
    vec![
        Frame::Icrs,
        Frame::Gcrs(Epoch::julian(2010.0)),
        Frame::Gcrs(Epoch::julian(2024.3)),
        Frame::Fk5(Epoch::J2000),
        Frame::Fk5(Epoch::julian(1975.0)),
        Frame::Fk4(Epoch::B1950),
        Frame::Fk4(Epoch::besselian(1900.0)),
        Frame::Dynamical(Epoch::J2000),
        Frame::Dynamical(Epoch::julian(2021.7)),
        calern(60000.3),
        mauna_kea(58000.7),
    ]
}
