//! End-to-end pipeline test: encode synthetic photographs to disk, then run
//! decoding, peak detection, calibration and assembly through the public
//! API.

use approx::assert_relative_eq;
use image::{GrayImage, Luma};

use spectroline::spectrum::Spectrum;
use spectroline::SpectroError;

/// A 400x40 frame with triangular emission lines at pixel 100 (peak 50) and
/// pixel 300 (peak 80), constant across rows.
fn two_line_frame() -> GrayImage {
    GrayImage::from_fn(400, 40, |x, _| {
        let v = match x {
            99 | 101 => 25,
            100 => 50,
            299 | 301 => 40,
            300 => 80,
            _ => 0,
        };
        Luma([v])
    })
}

#[test]
fn calibrates_from_encoded_photographs() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("helium.png");
    let target = dir.path().join("lamp.png");

    two_line_frame().save(&reference).unwrap();
    // Target: flat glow, different width than the reference.
    GrayImage::from_fn(500, 40, |_, _| Luma([10u8]))
        .save(&target)
        .unwrap();

    let spectrum = Spectrum::from_images(&target, &reference, 0).unwrap();

    // Brightest detected peak is the second one, so the first two peaks are
    // anchored on the 502.60 / 588.87 nm helium pair.
    assert_eq!(spectrum.len(), 500);
    assert_relative_eq!(spectrum.wavelengths[100], 502.60, max_relative = 1e-9);
    assert_relative_eq!(spectrum.wavelengths[300], 588.87, max_relative = 1e-9);
    assert!(spectrum.intensities.iter().all(|&i| (i - 10.0).abs() < 1e-9));

    // The axis extrapolates past the anchors with constant slope.
    let slope = (588.87 - 502.60) / 200.0;
    assert_relative_eq!(
        spectrum.wavelengths[499] - spectrum.wavelengths[498],
        slope,
        max_relative = 1e-9
    );
}

#[test]
fn offset_shifts_the_whole_axis() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("helium.png");
    two_line_frame().save(&reference).unwrap();

    let base = Spectrum::from_images(&reference, &reference, 0).unwrap();
    let shifted = Spectrum::from_images(&reference, &reference, 5).unwrap();

    let slope = (588.87 - 502.60) / 200.0;
    for (b, s) in base.wavelengths.iter().zip(&shifted.wavelengths) {
        assert_relative_eq!(b - s, slope * 5.0, max_relative = 1e-6);
    }
}

#[test]
fn featureless_reference_is_an_explicit_error() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("dark.png");
    let target = dir.path().join("lamp.png");
    GrayImage::from_fn(200, 20, |_, _| Luma([3u8]))
        .save(&reference)
        .unwrap();
    GrayImage::from_fn(200, 20, |_, _| Luma([10u8]))
        .save(&target)
        .unwrap();

    let err = Spectrum::from_images(&target, &reference, 0).unwrap_err();
    assert!(matches!(err, SpectroError::InsufficientPeaks { found: 0 }));
}

#[test]
fn missing_reference_photo_propagates_as_decode_failure() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("lamp.png");
    GrayImage::from_fn(10, 10, |_, _| Luma([0u8]))
        .save(&target)
        .unwrap();

    let err = Spectrum::from_images(&target, &dir.path().join("nope.png"), 0).unwrap_err();
    assert!(matches!(err, SpectroError::Image(_)));
}
