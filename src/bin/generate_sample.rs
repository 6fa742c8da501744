//! Generates synthetic spectrometer photographs (a helium reference frame
//! and a hydrogen lamp frame) and runs the full pipeline over them, so the
//! calibration can be exercised without real captures.
//!
//! Usage: `generate_sample [none|above|over]`

use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, Luma};

use spectroline::calibrate::{HE_BLUE_GREEN_NM, HE_RED_NM, HE_YELLOW_NM};
use spectroline::physics::balmer_wavelength;
use spectroline::profile::load_rgb;
use spectroline::{render_spectrum, PlotMode, Spectrum};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 120;

// True transform baked into the synthetic frames: nm = 0.43 px + 459.6.
const TRUE_SLOPE: f64 = 0.43;
const TRUE_INTERCEPT: f64 = 459.6;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Render emission lines (wavelength nm, amplitude) into a noisy grayscale
/// frame with the baked-in pixel-to-wavelength transform.
fn generate_frame(lines: &[(f64, f64)], noise_level: f64, rng: &mut SimpleRng) -> GrayImage {
    GrayImage::from_fn(WIDTH, HEIGHT, |x, _| {
        let signal: f64 = lines
            .iter()
            .map(|&(nm, amp)| {
                let mu = (nm - TRUE_INTERCEPT) / TRUE_SLOPE;
                gaussian(x as f64, mu, 2.5, amp)
            })
            .sum();
        let value = signal + rng.gauss(0.0, noise_level);
        Luma([value.clamp(0.0, 255.0) as u8])
    })
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mode: PlotMode = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("above")
        .parse()?;

    let mut rng = SimpleRng::new(42);

    // Helium reference: the yellow line dominates.
    let helium_lines = [
        (HE_BLUE_GREEN_NM, 120.0),
        (HE_YELLOW_NM, 220.0),
        (HE_RED_NM, 90.0),
    ];
    let helium = generate_frame(&helium_lines, 1.5, &mut rng);
    helium
        .save("sample_helium.png")
        .context("writing helium reference frame")?;

    // Unknown lamp: first four visible Balmer lines of hydrogen.
    let lamp_lines: Vec<(f64, f64)> = (3..=6)
        .filter_map(|n| balmer_wavelength(n).map(|m| (m * 1e9, 180.0 / n as f64)))
        .collect();
    let lamp = generate_frame(&lamp_lines, 1.5, &mut rng);
    lamp.save("sample_lamp.png").context("writing lamp frame")?;

    // Run the pipeline over the synthetic frames.
    let spectrum = Spectrum::from_images(
        Path::new("sample_lamp.png"),
        Path::new("sample_helium.png"),
        0,
    )?;
    spectrum.save(Path::new("sample_spectrum.csv"))?;

    let photo = load_rgb(Path::new("sample_lamp.png"))?;
    render_spectrum(
        &spectrum,
        mode,
        Some(&photo),
        Path::new("sample_spectrum.png"),
    )?;

    println!(
        "Wrote sample_helium.png, sample_lamp.png and a {}-sample spectrum \
         (sample_spectrum.csv, sample_spectrum.png)",
        spectrum.len()
    );
    Ok(())
}
