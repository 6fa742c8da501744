use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::calibrate::calibrate_helium;
use crate::error::{Result, SpectroError};
use crate::peaks::{find_peaks, HELIUM_MIN_DISTANCE, HELIUM_MIN_PROMINENCE};
use crate::profile::{column_intensity, load_grayscale};

// ---------------------------------------------------------------------------
// Spectrum – the assembled result
// ---------------------------------------------------------------------------

/// A calibrated spectrum: index-aligned wavelength and intensity arrays.
///
/// `wavelengths[i]` is the calibrated wavelength (nm) of the light measured
/// in the i-th pixel column, whose mean brightness is `intensities[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spectrum {
    /// Wavelength axis in nanometers.
    pub wavelengths: Vec<f64>,
    /// Column-mean intensities (arbitrary units), same length as
    /// `wavelengths`.
    pub intensities: Vec<f64>,
}

impl Spectrum {
    /// Assemble a spectrum from two already-extracted column profiles.
    ///
    /// `reference` is the helium photograph's profile, used only to fit the
    /// pixel-to-wavelength transform; the transform is then applied to every
    /// column index of `target`, extrapolating beyond the two anchor lines.
    /// The two photographs are assumed co-registered (same camera and
    /// monochromator position) — that is a physical-setup invariant, not
    /// something this code can check.
    pub fn from_profiles(target: &[f64], reference: &[f64], offset: i64) -> Result<Self> {
        let peaks = find_peaks(reference, HELIUM_MIN_PROMINENCE, HELIUM_MIN_DISTANCE);
        let cal = calibrate_helium(&peaks, offset)?;
        Ok(Self {
            wavelengths: cal.wavelength_axis(target.len()),
            intensities: target.to_vec(),
        })
    }

    /// Assemble a spectrum from a target photograph and a helium reference
    /// photograph. Decode failures propagate unchanged.
    pub fn from_images(target: &Path, reference: &Path, offset: i64) -> Result<Self> {
        let reference_profile = column_intensity(&load_grayscale(reference)?);
        let target_profile = column_intensity(&load_grayscale(target)?);
        info!(
            "assembling spectrum for {} against reference {}",
            target.display(),
            reference.display()
        );
        Self::from_profiles(&target_profile, &reference_profile, offset)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    /// Whether the spectrum holds no samples.
    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Largest measured intensity (0.0 for an empty spectrum).
    pub fn max_intensity(&self) -> f64 {
        self.intensities.iter().cloned().fold(0.0, f64::max)
    }

    /// Save the spectrum to a file. Dispatch by extension:
    /// * `.csv`  – two columns, `wavelength_nm` and `intensity`
    /// * `.json` – serde records (`{"wavelengths": [...], "intensities": [...]}`)
    pub fn save(&self, path: &Path) -> Result<()> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => self.save_csv(path),
            "json" => self.save_json(path),
            other => Err(SpectroError::UnsupportedFormat(other.to_string())),
        }
    }

    fn save_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["wavelength_nm", "intensity"])?;
        for (w, i) in self.wavelengths.iter().zip(&self.intensities) {
            writer.write_record([w.to_string(), i.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }

    fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Plot mode – closed enumeration of figure layouts
// ---------------------------------------------------------------------------

/// How (or whether) to composite the source photograph into a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    /// Bare intensity-vs-wavelength chart.
    #[default]
    None,
    /// Photograph strip above the chart.
    Above,
    /// Photograph strip behind the plotted series.
    Over,
}

impl FromStr for PlotMode {
    type Err = SpectroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(PlotMode::None),
            "above" => Ok(PlotMode::Above),
            "over" => Ok(PlotMode::Over),
            other => Err(SpectroError::InvalidPlotMode(other.to_string())),
        }
    }
}
