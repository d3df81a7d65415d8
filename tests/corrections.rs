mod common;

use approx::assert_relative_eq;
use nalgebra::Vector3;
use skyframe::constants::{LIGHT_YEAR_AU, RADSEC};
use skyframe::converter::{ConverterConfig, FrameConverter};
use skyframe::earth_orientation::PolarWobble;
use skyframe::ephemeris::{Body, Ephemeris};
use skyframe::nutation::NutationPrecision;
use skyframe::{convert, Epoch, Frame, GeodeticLocation, SkyframeError};

use crate::common::{assert_direction_close, calern, random_directions, separation_mas};

#[test]
fn parallax_starts_beyond_one_light_year() {
    let epoch = Epoch::julian(2020.4);
    let gcrs = Frame::Gcrs(epoch);
    let earth = Ephemeris::new()
        .barycentric_position(Body::Earth, epoch.to_mjd())
        .unwrap();

    for v in random_directions(42, 5) {
        let far = convert(&v, None, &Frame::Icrs, &gcrs).unwrap();
        let at_boundary = convert(&v, Some(LIGHT_YEAR_AU), &Frame::Icrs, &gcrs).unwrap();
        assert_direction_close(&at_boundary, &far, 1e-12);

        let d = LIGHT_YEAR_AU * 1.000_001;
        let beyond = convert(&v, Some(d), &Frame::Icrs, &gcrs).unwrap();
        let p = v.normalize();
        let perpendicular = (earth - earth.dot(&p) * p).norm();
        let shift = separation_mas(&beyond, &at_boundary) * 1e-3 * RADSEC;
        assert_relative_eq!(shift, perpendicular / d, max_relative = 1e-3);
    }
}

#[test]
fn topocentric_round_trip_with_wobble() {
    let site = calern(60123.45);
    let frames = [
        Frame::Icrs,
        Frame::Gcrs(Epoch::julian(2023.5)),
        Frame::Dynamical(Epoch::julian(2023.5)),
        Frame::Fk4(Epoch::B1950),
    ];
    for v in random_directions(9, 6) {
        for other in &frames {
            for distance in [None, Some(1.0e7)] {
                let there = convert(&v, distance, other, &site).unwrap();
                let back = convert(&there, distance, &site, other).unwrap();
                assert_direction_close(&back, &v, 1e-9);
            }
        }
    }
}

#[test]
fn polar_motion_moves_the_site_frame() {
    let location = GeodeticLocation::from_degrees(6.92, 43.75, 1270.0);
    let mjd = 60123.45;
    let still = Frame::topocentric("a", location, mjd, None);
    let wobbling = Frame::topocentric("b", location, mjd, Some(PolarWobble::from_arcsec(0.15, 0.35)));

    let v = Vector3::new(0.3, 0.4, 0.5);
    let a = convert(&v, None, &Frame::Icrs, &still).unwrap();
    let b = convert(&v, None, &Frame::Icrs, &wobbling).unwrap();
    let sep = separation_mas(&a, &b);
    assert!(sep > 10.0 && sep < 400.0, "separation {sep} mas");
}

#[test]
fn diurnal_aberration_is_sub_arcsecond() {
    let mjd = 60123.45;
    let dynamical = Frame::Dynamical(Epoch::julian_from_mjd(mjd));
    let site = Frame::topocentric(
        "equator",
        GeodeticLocation::new(0.0, 0.0, 0.0),
        mjd,
        None,
    );
    for v in random_directions(5, 5) {
        let a = convert(&v, None, &dynamical, &site).unwrap();
        let sep = separation_mas(&a, &v);
        // At most 0.32″ at the equator, plus the tiny TIO locator rotation
        assert!(sep < 330.0, "separation {sep} mas");
    }
}

#[test]
fn deflection_close_to_the_sun_round_trips() {
    let epoch = Epoch::julian(2022.0);
    let earth = Ephemeris::new()
        .heliocentric_position(Body::Earth, epoch.to_mjd())
        .unwrap();
    let to_sun = -earth.normalize();
    let side = to_sun.cross(&Vector3::z()).normalize();

    // Half a degree from the Sun centre, just outside the disk
    let v = (to_sun + (0.5_f64.to_radians()).tan() * side).normalize();
    let gcrs = Frame::Gcrs(epoch);
    let apparent = convert(&v, None, &Frame::Icrs, &gcrs).unwrap();
    let back = convert(&apparent, None, &gcrs, &Frame::Icrs).unwrap();
    assert_direction_close(&back, &v, 1e-9);
}

#[test]
fn deflection_behind_the_solar_disk_round_trips() {
    let epoch = Epoch::julian(2022.0);
    let earth = Ephemeris::new()
        .heliocentric_position(Body::Earth, epoch.to_mjd())
        .unwrap();
    let to_sun = -earth.normalize();
    let side = to_sun.cross(&Vector3::z()).normalize();
    let gcrs = Frame::Gcrs(epoch);

    for arcsec in [2.0, 10.0, 30.0, 120.0, 900.0] {
        let v = (to_sun + (arcsec * RADSEC).tan() * side).normalize();
        let apparent = convert(&v, None, &Frame::Icrs, &gcrs).unwrap();
        let back = convert(&apparent, None, &gcrs, &Frame::Icrs).unwrap();
        assert_direction_close(&back, &v, 1e-9);
    }
}

#[test]
fn deflection_outside_the_limb_round_trips() {
    let epoch = Epoch::julian(2022.0);
    let earth = Ephemeris::new()
        .heliocentric_position(Body::Earth, epoch.to_mjd())
        .unwrap();
    let to_sun = -earth.normalize();
    let side = to_sun.cross(&Vector3::z()).normalize();
    let gcrs = Frame::Gcrs(epoch);

    for arcmin in [17.0, 20.0, 30.0] {
        let v = (to_sun + (arcmin / 60.0_f64).to_radians().tan() * side).normalize();
        let apparent = convert(&v, None, &Frame::Icrs, &gcrs).unwrap();
        let back = convert(&apparent, None, &gcrs, &Frame::Icrs).unwrap();
        assert_direction_close(&back, &v, 1e-9);
    }
}

#[test]
fn nutation_tiers_through_the_converter() {
    let target = Frame::Dynamical(Epoch::julian_from_mjd(60000.0));
    let converter = |precision| {
        FrameConverter::new(ConverterConfig::default().with_nutation_precision(precision))
    };
    let full = converter(NutationPrecision::Full);
    let micro = converter(NutationPrecision::Micro100);
    let milli10 = converter(NutationPrecision::Milli10);

    for v in random_directions(1, 8) {
        let reference = full.convert(&v, None, &Frame::Icrs, &target).unwrap();
        let a = micro.convert(&v, None, &Frame::Icrs, &target).unwrap();
        let b = milli10.convert(&v, None, &Frame::Icrs, &target).unwrap();
        assert!(separation_mas(&a, &reference) < 1.0);
        assert!(separation_mas(&b, &reference) < 15.0);
    }
}

#[test]
fn errors_are_reported() {
    let v = Vector3::x();
    assert_eq!(
        convert(&v, None, &Frame::Fk4(Epoch::J2000), &Frame::Icrs),
        Err(SkyframeError::EpochMismatch {
            frame: "FK4",
            expected: "Besselian",
            found: "J2000.000".into(),
        })
    );
    assert!(matches!(
        convert(&v, None, &Frame::Icrs, &Frame::Gcrs(Epoch::julian(1700.0))),
        Err(SkyframeError::EphemerisDomain(_))
    ));
    // Rotations only: no ephemeris needed even far in the past
    assert!(convert(&v, None, &Frame::Fk5(Epoch::julian(1700.0)), &Frame::Icrs).is_ok());
}

#[test]
fn fits_keywords_round_trip() {
    let mjd = 60000.0;
    let frames = [
        Frame::Icrs,
        Frame::Fk5(Epoch::julian(1975.0)),
        Frame::Fk4(Epoch::B1950),
        Frame::Gcrs(Epoch::julian_from_mjd(mjd)),
        Frame::Dynamical(Epoch::julian_from_mjd(mjd)),
    ];
    for frame in frames {
        let keys = frame.fits_keywords();
        let parsed =
            Frame::from_fits_keywords(Some(&keys.radesys), keys.equinox, Some(mjd), None).unwrap();
        assert_eq!(parsed, frame);
    }
}
