//! Wavelength calibration and spectrum extraction for photographs taken
//! with a DIY diffraction spectrometer.
//!
//! Pipeline:
//! ```text
//!  helium photo          target photo
//!       │                     │
//!       ▼                     ▼
//!  ┌─────────┐          ┌─────────┐
//!  │ profile  │          │ profile  │  column-mean intensity
//!  └─────────┘          └─────────┘
//!       │                     │
//!       ▼                     │
//!  ┌─────────┐               │
//!  │  peaks   │  prominence + │
//!  └─────────┘  spacing       │
//!       │                     │
//!       ▼                     ▼
//!  ┌───────────┐        ┌──────────┐
//!  │ calibrate  │──────▶│ spectrum  │  pixel → nm over the full axis
//!  └───────────┘        └──────────┘
//! ```
//!
//! The calibration is a two-point linear fit against known helium emission
//! lines; which two detected peaks anchor it is decided by the position of
//! the globally brightest peak (see [`calibrate::LineAssignment`]).

pub mod calibrate;
pub mod color;
pub mod error;
pub mod peaks;
pub mod physics;
pub mod profile;
pub mod render;
pub mod spectrum;

pub use calibrate::{calibrate_helium, LinearCalibration, LineAssignment};
pub use error::{Result, SpectroError};
pub use peaks::{find_peaks, Peak};
pub use profile::{column_intensity, load_grayscale};
pub use render::render_spectrum;
pub use spectrum::{PlotMode, Spectrum};
