use std::path::Path;

use image::{GrayImage, RgbImage};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Column intensity extraction
// ---------------------------------------------------------------------------

/// Decode a spectrometer photograph and reduce it to grayscale.
pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
    Ok(image::open(path)?.to_luma8())
}

/// Decode a spectrometer photograph keeping its color channels
/// (only needed for the rendering overlay).
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Reduce a grayscale image to a 1-D intensity profile: one value per pixel
/// column, each the mean brightness over all rows of that column.
///
/// The returned profile always has length == image width. The wavelength
/// axis of a spectrum is later derived from these column indices.
pub fn column_intensity(img: &GrayImage) -> Vec<f64> {
    let (width, height) = img.dimensions();
    if height == 0 {
        return vec![0.0; width as usize];
    }
    let mut sums = vec![0.0f64; width as usize];
    for (x, _, pixel) in img.enumerate_pixels() {
        sums[x as usize] += pixel.0[0] as f64;
    }
    let rows = height as f64;
    sums.iter_mut().for_each(|s| *s /= rows);
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Luma;

    #[test]
    fn profile_length_matches_width() {
        let img = GrayImage::from_fn(37, 5, |_, _| Luma([0u8]));
        assert_eq!(column_intensity(&img).len(), 37);
    }

    #[test]
    fn profile_is_column_mean() {
        // Column x has rows [x, 2x] -> mean 1.5x.
        let img = GrayImage::from_fn(4, 2, |x, y| Luma([((y + 1) * x) as u8]));
        let profile = column_intensity(&img);
        for (x, v) in profile.iter().enumerate() {
            assert_relative_eq!(*v, 1.5 * x as f64);
        }
    }

    #[test]
    fn single_row_image_is_identity() {
        let data = [0u8, 10, 50, 10, 0];
        let img = GrayImage::from_fn(5, 1, |x, _| Luma([data[x as usize]]));
        let profile = column_intensity(&img);
        assert_eq!(profile, vec![0.0, 10.0, 50.0, 10.0, 0.0]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_grayscale(Path::new("definitely_not_here.png")).is_err());
    }
}
