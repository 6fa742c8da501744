use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, SpectroError>;

/// Errors surfaced by the calibration pipeline.
///
/// All of these are unrecoverable at the point of detection: the tool is a
/// single-shot offline analysis, so there is no retry or partial-result
/// policy.
#[derive(Debug, Error)]
pub enum SpectroError {
    /// The photograph could not be decoded.
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    /// File-level I/O failure (missing file, permissions, ...).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The reference photograph yielded fewer than the two peaks a
    /// two-point linear fit requires.
    #[error("calibration needs at least 2 peaks, found {found}")]
    InsufficientPeaks { found: usize },

    /// Both calibration anchors landed on the same pixel column, so the
    /// linear fit is undefined.
    #[error("degenerate calibration: both anchors at pixel {pixel}")]
    DegenerateCalibration { pixel: i64 },

    /// Unrecognised plot mode string.
    #[error("invalid plot mode '{0}': expected one of 'none', 'above', 'over'")]
    InvalidPlotMode(String),

    /// Spectrum export to a file extension we do not handle.
    #[error("unsupported export format: .{0}")]
    UnsupportedFormat(String),

    /// Failure while drawing a figure.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while writing CSV output.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Failure while writing JSON output.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
