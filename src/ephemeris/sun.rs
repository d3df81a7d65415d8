//! Low-precision geocentric Sun from a 50-term trigonometric series (Bretagnon & Simon
//! "Planetary Programs and Tables", as used by NOVAS `sun_eph`). Accuracy is about one
//! arcsecond in longitude over the ephemeris window.

use nalgebra::Vector3;

use crate::constants::{Radian, DPI, MJD, T2000};
use crate::earth_orientation::{obleq, precession_iau2006};

/// (longitude amplitude, distance amplitude, phase, frequency) per term.
/// Amplitudes in 1e-7 rad and 1e-7 AU, phase in rad, frequency in rad per 10⁴ Julian years.
#[rustfmt::skip]
const SUN_SERIES: [(f64, f64, f64, f64); 50] = [
    (403406.0, 0.0, 4.721964, 1.621043),
    (195207.0, -97597.0, 5.937458, 62830.348067),
    (119433.0, -59715.0, 1.115589, 62830.821524),
    (112392.0, -56188.0, 5.781616, 62829.634302),
    (3891.0, -1556.0, 5.5474, 125660.5691),
    (2819.0, -1126.0, 1.512, 125660.9845),
    (1721.0, -861.0, 4.1897, 62832.4766),
    (0.0, 941.0, 1.163, 0.813),
    (660.0, -264.0, 5.415, 125659.31),
    (350.0, -163.0, 4.315, 57533.85),
    (334.0, 0.0, 4.553, -33.931),
    (314.0, 309.0, 5.198, 777137.715),
    (268.0, -158.0, 5.989, 78604.191),
    (242.0, 0.0, 2.911, 5.412),
    (234.0, -54.0, 1.423, 39302.098),
    (158.0, 0.0, 0.061, -34.861),
    (132.0, -93.0, 2.317, 115067.698),
    (129.0, -20.0, 3.193, 15774.337),
    (114.0, 0.0, 2.828, 5296.67),
    (99.0, -47.0, 0.52, 58849.27),
    (93.0, 0.0, 4.65, 5296.11),
    (86.0, 0.0, 4.35, -3980.7),
    (78.0, -33.0, 2.75, 52237.69),
    (72.0, -32.0, 4.5, 55076.47),
    (68.0, 0.0, 3.23, 261.08),
    (64.0, -10.0, 1.22, 15773.85),
    (46.0, -16.0, 0.14, 188491.03),
    (38.0, 0.0, 3.44, -7756.55),
    (37.0, 0.0, 4.37, 264.89),
    (32.0, -24.0, 1.14, 117906.27),
    (29.0, -13.0, 2.84, 55075.75),
    (28.0, 0.0, 5.96, -7961.39),
    (27.0, -9.0, 5.09, 188489.81),
    (27.0, 0.0, 1.72, 2132.19),
    (25.0, -17.0, 2.56, 109771.03),
    (24.0, -11.0, 1.92, 54868.56),
    (21.0, 0.0, 0.09, 25443.93),
    (21.0, 31.0, 5.98, -55731.43),
    (20.0, -10.0, 4.03, 60697.74),
    (18.0, 0.0, 4.27, 2132.79),
    (17.0, -12.0, 0.79, 109771.63),
    (14.0, 0.0, 4.24, -7752.82),
    (13.0, -5.0, 2.01, 188491.91),
    (13.0, 0.0, 2.65, 207.81),
    (13.0, 0.0, 4.98, 29424.63),
    (12.0, 0.0, 0.93, -7.99),
    (10.0, 0.0, 2.21, 46941.14),
    (10.0, 0.0, 3.59, -68.29),
    (10.0, 0.0, 1.5, 21463.25),
    (10.0, -9.0, 2.55, 157208.4),
];

/// Ecliptic longitude of the Sun (mean equinox of date, radians in `[0, 2π)`) and
/// Earth–Sun distance (AU).
pub fn sun_longitude_distance(mjd: MJD) -> (Radian, f64) {
    // Time in units of 10⁴ Julian years since J2000
    let u = (mjd - T2000) / 3_652_500.0;

    let (sum_lon, sum_dist) = SUN_SERIES
        .iter()
        .fold((0.0, 0.0), |(sl, sr), &(l, r, alpha, nu)| {
            let (sin_arg, cos_arg) = (alpha + nu * u).sin_cos();
            (sl + l * sin_arg, sr + r * cos_arg)
        });

    let lon = (4.9353929 + 62833.1961680 * u + 1e-7 * sum_lon).rem_euclid(DPI);
    let dist = 1.0001026 + 1e-7 * sum_dist;
    (lon, dist)
}

/// Geocentric position of the Sun (AU) on the mean equator and equinox of date.
pub fn sun_geocentric_of_date(mjd: MJD) -> Vector3<f64> {
    let (lon, dist) = sun_longitude_distance(mjd);
    let (sin_eps, cos_eps) = obleq(mjd).sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    dist * Vector3::new(cos_lon, cos_eps * sin_lon, sin_eps * sin_lon)
}

/// Geocentric position of the Sun (AU) on J2000 equatorial axes.
pub fn sun_geocentric(mjd: MJD) -> Vector3<f64> {
    precession_iau2006(mjd).inverse() * sun_geocentric_of_date(mjd)
}
