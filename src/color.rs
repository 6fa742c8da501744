use palette::Srgb;

// ---------------------------------------------------------------------------
// Wavelength -> approximate display color
// ---------------------------------------------------------------------------

/// Lower edge of the visible range covered by the approximation (nm).
pub const VISIBLE_MIN_NM: f64 = 380.0;
/// Upper edge of the visible range covered by the approximation (nm).
pub const VISIBLE_MAX_NM: f64 = 750.0;

const GAMMA: f64 = 0.8;

/// Approximate the display color of monochromatic light at the given
/// wavelength (nm), after Dan Bruton's piecewise fit. Wavelengths outside
/// 380–750 nm map to white. Cosmetic only — used to tint plotted samples.
pub fn wavelength_to_rgb(wavelength: f64) -> Srgb<u8> {
    let (r, g, b) = wavelength_to_rgb_f64(wavelength);
    Srgb::new(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Same approximation with unquantised channels in `[0, 1]`.
pub fn wavelength_to_rgb_f64(wavelength: f64) -> (f64, f64, f64) {
    match wavelength {
        w if (380.0..=440.0).contains(&w) => {
            let attenuation = 0.3 + 0.7 * (w - 380.0) / (440.0 - 380.0);
            let r = ((-(w - 440.0) / (440.0 - 380.0)) * attenuation).powf(GAMMA);
            (r, 0.0, attenuation.powf(GAMMA))
        }
        w if (440.0..=490.0).contains(&w) => {
            (0.0, ((w - 440.0) / (490.0 - 440.0)).powf(GAMMA), 1.0)
        }
        w if (490.0..=510.0).contains(&w) => {
            (0.0, 1.0, ((510.0 - w) / (510.0 - 490.0)).powf(GAMMA))
        }
        w if (510.0..=580.0).contains(&w) => {
            (((w - 510.0) / (580.0 - 510.0)).powf(GAMMA), 1.0, 0.0)
        }
        w if (580.0..=645.0).contains(&w) => {
            (1.0, ((645.0 - w) / (645.0 - 580.0)).powf(GAMMA), 0.0)
        }
        w if (645.0..=750.0).contains(&w) => {
            let attenuation = 0.3 + 0.7 * (750.0 - w) / (750.0 - 645.0);
            (attenuation.powf(GAMMA), 0.0, 0.0)
        }
        _ => (1.0, 1.0, 1.0),
    }
}
