use log::info;

use crate::error::{Result, SpectroError};
use crate::peaks::Peak;

// ---------------------------------------------------------------------------
// Helium reference lines
// ---------------------------------------------------------------------------

/// He I line at 502.60 nm (blue-green).
pub const HE_BLUE_GREEN_NM: f64 = 502.60;
/// He I line at 588.87 nm (yellow, the brightest visible helium line).
pub const HE_YELLOW_NM: f64 = 588.87;
/// He I line at 669.07 nm (red).
pub const HE_RED_NM: f64 = 669.07;

/// Which pair of helium lines anchors the two-point fit.
///
/// The instrument can be positioned so that either the yellow or the
/// blue-green line is the leftmost bright feature in frame; the position of
/// the globally brightest detected peak discriminates between the two
/// configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAssignment {
    /// The brightest peak is the first one detected: the frame starts at the
    /// yellow line, so the two leftmost peaks are yellow and red.
    BrightestFirst,
    /// The brightest peak has a predecessor: that pair is blue-green and
    /// yellow.
    BrightestLater,
}

impl LineAssignment {
    /// The (lower-pixel, higher-pixel) reference wavelengths for this
    /// configuration, in nanometers.
    pub fn wavelengths(self) -> (f64, f64) {
        match self {
            LineAssignment::BrightestFirst => (HE_YELLOW_NM, HE_RED_NM),
            LineAssignment::BrightestLater => (HE_BLUE_GREEN_NM, HE_YELLOW_NM),
        }
    }
}

// ---------------------------------------------------------------------------
// Linear pixel -> wavelength transform
// ---------------------------------------------------------------------------

/// Affine pixel-to-wavelength transform `nm = slope * pixel + intercept`,
/// fitted from two anchor points and extrapolated over the full sensor
/// width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCalibration {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearCalibration {
    /// Fit the transform through two (pixel, wavelength) anchors.
    pub fn from_anchors(x0: i64, y0: f64, x1: i64, y1: f64) -> Result<Self> {
        if x0 == x1 {
            return Err(SpectroError::DegenerateCalibration { pixel: x0 });
        }
        let slope = (y1 - y0) / (x1 - x0) as f64;
        let intercept = y0 - slope * x0 as f64;
        Ok(Self { slope, intercept })
    }

    /// Calibrated wavelength (nm) of a pixel column.
    pub fn apply(&self, pixel: f64) -> f64 {
        self.slope * pixel + self.intercept
    }

    /// Calibrated wavelengths for every column of a `width`-pixel image.
    pub fn wavelength_axis(&self, width: usize) -> Vec<f64> {
        (0..width).map(|p| self.apply(p as f64)).collect()
    }
}

/// Fit a pixel-to-wavelength transform from the peaks detected in a helium
/// reference photograph.
///
/// The globally brightest peak is assumed to be one of two known helium
/// lines depending on instrument positioning (see [`LineAssignment`]); its
/// pixel-space neighbour supplies the second anchor. Both anchor pixels are
/// shifted by `offset` before fitting, compensating a fixed mechanical
/// misalignment between the reference and target optical paths.
///
/// Known limitation: the two-branch rule assumes the expected helium lines
/// dominate the frame. A spurious bright peak to the left of the true first
/// line shifts the anchor choice and miscalibrates silently.
pub fn calibrate_helium(peaks: &[Peak], offset: i64) -> Result<LinearCalibration> {
    if peaks.len() < 2 {
        return Err(SpectroError::InsufficientPeaks { found: peaks.len() });
    }

    // First occurrence wins on intensity ties.
    let brightest = peaks
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| {
            a.intensity
                .total_cmp(&b.intensity)
                .then(ib.cmp(ia))
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    let (assignment, lo, hi) = if brightest == 0 {
        (LineAssignment::BrightestFirst, &peaks[0], &peaks[1])
    } else {
        (
            LineAssignment::BrightestLater,
            &peaks[brightest - 1],
            &peaks[brightest],
        )
    };
    let (y0, y1) = assignment.wavelengths();

    let x0 = lo.pixel as i64 + offset;
    let x1 = hi.pixel as i64 + offset;
    let cal = LinearCalibration::from_anchors(x0, y0, x1, y1)?;
    info!(
        "helium calibration ({assignment:?}): pixels ({x0}, {x1}) -> ({y0}, {y1}) nm, \
         slope {:.4} nm/px, intercept {:.2} nm",
        cal.slope, cal.intercept
    );
    Ok(cal)
}
