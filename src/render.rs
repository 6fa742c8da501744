use std::path::Path;

use image::RgbImage;
use plotters::prelude::*;

use crate::color::wavelength_to_rgb;
use crate::error::{Result, SpectroError};
use crate::spectrum::{PlotMode, Spectrum};

// ---------------------------------------------------------------------------
// Spectrum figures
// ---------------------------------------------------------------------------

const FIGURE_WIDTH: u32 = 960;
const FIGURE_HEIGHT: u32 = 720;
/// Height of the photograph strip in [`PlotMode::Above`] figures.
const STRIP_HEIGHT: u32 = FIGURE_HEIGHT / 4;

fn draw_err<E: std::fmt::Display>(e: E) -> SpectroError {
    SpectroError::Render(e.to_string())
}

/// Render a spectrum to a PNG figure.
///
/// The series is a scatter of samples tinted with the approximate color of
/// their wavelength, joined by a faint line. `PlotMode::Above` adds a strip
/// of the source photograph's per-column mean color above the chart;
/// `PlotMode::Over` paints that strip behind the series. Both composited
/// modes require `photo`.
pub fn render_spectrum(
    spectrum: &Spectrum,
    mode: PlotMode,
    photo: Option<&RgbImage>,
    out: &Path,
) -> Result<()> {
    if spectrum.is_empty() {
        return Err(SpectroError::Render("cannot render an empty spectrum".into()));
    }
    let photo = match mode {
        PlotMode::None => None,
        PlotMode::Above | PlotMode::Over => Some(photo.ok_or_else(|| {
            SpectroError::Render(format!("plot mode {mode:?} needs the source photograph"))
        })?),
    };

    let root = BitMapBackend::new(out, (FIGURE_WIDTH, FIGURE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let chart_area = match (mode, photo) {
        (PlotMode::Above, Some(photo)) => {
            let (strip, chart) = root.split_vertically(STRIP_HEIGHT);
            draw_photo_strip(&strip, photo)?;
            chart
        }
        _ => root,
    };

    let x_min = spectrum.wavelengths.iter().cloned().fold(f64::INFINITY, f64::min);
    let x_max = spectrum.wavelengths.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let y_top = (spectrum.max_intensity() * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0.0..y_top)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("wavelength (nm)")
        .y_desc("intensity (a.u.)")
        .draw()
        .map_err(draw_err)?;

    if let (PlotMode::Over, Some(photo)) = (mode, photo) {
        // Background: one data-coordinate rectangle per sample, tinted with
        // the photograph column it came from.
        let colors = column_mean_rgb(photo);
        let half = ((x_max - x_min) / spectrum.len() as f64 / 2.0).abs();
        chart
            .draw_series(spectrum.wavelengths.iter().enumerate().map(|(i, &w)| {
                let col = i * photo.width() as usize / spectrum.len();
                Rectangle::new(
                    [(w - half, 0.0), (w + half, y_top)],
                    colors[col].mix(0.6).filled(),
                )
            }))
            .map_err(draw_err)?;
    }

    chart
        .draw_series(LineSeries::new(
            spectrum
                .wavelengths
                .iter()
                .zip(&spectrum.intensities)
                .map(|(&w, &i)| (w, i)),
            RGBColor(110, 110, 110).mix(0.5),
        ))
        .map_err(draw_err)?;

    chart
        .draw_series(
            spectrum
                .wavelengths
                .iter()
                .zip(&spectrum.intensities)
                .map(|(&w, &i)| {
                    let c = wavelength_to_rgb(w);
                    Circle::new((w, i), 3, RGBColor(c.red, c.green, c.blue).filled())
                }),
        )
        .map_err(draw_err)?;

    chart_area.present().map_err(draw_err)
}

/// Paint the per-column mean color of the photograph across a strip area.
fn draw_photo_strip<DB: DrawingBackend>(
    strip: &DrawingArea<DB, plotters::coord::Shift>,
    photo: &RgbImage,
) -> Result<()> {
    let colors = column_mean_rgb(photo);
    let (sw, sh) = strip.dim_in_pixel();
    for x in 0..sw {
        let col = x as usize * photo.width() as usize / sw as usize;
        strip
            .draw(&Rectangle::new(
                [(x as i32, 0), (x as i32 + 1, sh as i32)],
                colors[col].filled(),
            ))
            .map_err(draw_err)?;
    }
    Ok(())
}

/// Mean color of each pixel column of the photograph.
fn column_mean_rgb(photo: &RgbImage) -> Vec<RGBColor> {
    let (width, height) = photo.dimensions();
    let mut sums = vec![[0.0f64; 3]; width as usize];
    for (x, _, pixel) in photo.enumerate_pixels() {
        for (c, sum) in sums[x as usize].iter_mut().enumerate() {
            *sum += pixel.0[c] as f64;
        }
    }
    let rows = (height as f64).max(1.0);
    sums.into_iter()
        .map(|[r, g, b]| {
            RGBColor(
                (r / rows).round() as u8,
                (g / rows).round() as u8,
                (b / rows).round() as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample_spectrum(n: usize) -> Spectrum {
        Spectrum {
            wavelengths: (0..n).map(|i| 400.0 + i as f64).collect(),
            intensities: (0..n).map(|i| (i % 10) as f64).collect(),
        }
    }

    #[test]
    fn writes_a_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("spectrum.png");
        render_spectrum(&sample_spectrum(50), PlotMode::None, None, &out).unwrap();
        assert!(out.metadata().unwrap().len() > 0);
    }

    #[test]
    fn composited_modes_require_the_photo() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("spectrum.png");
        let err =
            render_spectrum(&sample_spectrum(50), PlotMode::Above, None, &out).unwrap_err();
        assert!(matches!(err, SpectroError::Render(_)));
    }

    #[test]
    fn over_mode_renders_with_a_photo() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("spectrum.png");
        let photo = RgbImage::from_fn(50, 4, |x, _| Rgb([(x * 5) as u8, 0, 0]));
        render_spectrum(&sample_spectrum(50), PlotMode::Over, Some(&photo), &out).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn empty_spectrum_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("spectrum.png");
        let empty = Spectrum {
            wavelengths: vec![],
            intensities: vec![],
        };
        assert!(render_spectrum(&empty, PlotMode::None, None, &out).is_err());
    }

    #[test]
    fn column_mean_color_averages_rows() {
        let photo = RgbImage::from_fn(2, 2, |x, y| {
            if x == 0 {
                Rgb([if y == 0 { 0 } else { 200 }, 100, 100])
            } else {
                Rgb([50, 50, 50])
            }
        });
        let colors = column_mean_rgb(&photo);
        assert_eq!(colors[0], RGBColor(100, 100, 100));
        assert_eq!(colors[1], RGBColor(50, 50, 50));
    }
}
