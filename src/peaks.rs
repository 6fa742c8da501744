use log::debug;

// ---------------------------------------------------------------------------
// Peak detection on 1-D intensity profiles
// ---------------------------------------------------------------------------

/// A local intensity maximum in a column profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Pixel column of the maximum (plateau midpoint for flat tops).
    pub pixel: usize,
    /// Measured intensity at that column.
    pub intensity: f64,
}

/// Minimum prominence used when detecting helium reference lines.
pub const HELIUM_MIN_PROMINENCE: f64 = 10.0;
/// Minimum horizontal spacing (pixels) between helium reference lines.
pub const HELIUM_MIN_DISTANCE: usize = 20;

/// Find local maxima in `profile` subject to a prominence threshold and a
/// minimum horizontal distance between accepted peaks.
///
/// Peaks closer together than `min_distance` are resolved by keeping the
/// taller one. Prominence is the height of a peak above the higher of its
/// two flanking bases, where each base is the lowest sample between the peak
/// and the nearest strictly-higher sample (or the signal edge).
///
/// Returns peaks in ascending pixel order. An empty result is valid — the
/// calibration stage is where "not enough peaks" becomes an error.
pub fn find_peaks(profile: &[f64], min_prominence: f64, min_distance: usize) -> Vec<Peak> {
    let candidates = local_maxima(profile);
    let spaced = enforce_distance(profile, candidates, min_distance);
    let peaks: Vec<Peak> = spaced
        .into_iter()
        .filter(|&p| prominence(profile, p) >= min_prominence)
        .map(|p| Peak {
            pixel: p,
            intensity: profile[p],
        })
        .collect();
    debug!(
        "detected {} peaks (prominence >= {}, distance >= {})",
        peaks.len(),
        min_prominence,
        min_distance
    );
    peaks
}

/// Indices of strict local maxima, with flat-topped plateaus collapsed to
/// their midpoint. Endpoints are never maxima.
fn local_maxima(profile: &[f64]) -> Vec<usize> {
    let n = profile.len();
    let mut maxima = Vec::new();
    let mut i = 1;
    while n >= 2 && i < n - 1 {
        if profile[i] > profile[i - 1] {
            // Walk over a possible plateau.
            let mut j = i;
            while j + 1 < n && profile[j + 1] == profile[i] {
                j += 1;
            }
            if j + 1 < n && profile[j + 1] < profile[i] {
                maxima.push((i + j) / 2);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }
    maxima
}

/// Non-maximum suppression: visit candidates tallest-first and drop any
/// not-yet-kept candidate within `min_distance` of a kept one.
fn enforce_distance(profile: &[f64], candidates: Vec<usize>, min_distance: usize) -> Vec<usize> {
    if min_distance <= 1 || candidates.len() < 2 {
        return candidates;
    }
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| profile[candidates[b]].total_cmp(&profile[candidates[a]]));

    let mut removed = vec![false; candidates.len()];
    for &rank in &order {
        if removed[rank] {
            continue;
        }
        let pos = candidates[rank];
        for (other, &other_pos) in candidates.iter().enumerate() {
            if other != rank && !removed[other] && other_pos.abs_diff(pos) < min_distance {
                // `rank` is the taller of the two by construction.
                removed[other] = true;
            }
        }
    }
    candidates
        .into_iter()
        .zip(removed)
        .filter(|(_, gone)| !gone)
        .map(|(pos, _)| pos)
        .collect()
}

/// Topographic prominence of the sample at `peak`: height above the higher
/// of the two flanking bases.
fn prominence(profile: &[f64], peak: usize) -> f64 {
    let height = profile[peak];

    let mut left_base = height;
    for &v in profile[..peak].iter().rev() {
        if v > height {
            break;
        }
        left_base = left_base.min(v);
    }

    let mut right_base = height;
    for &v in &profile[peak + 1..] {
        if v > height {
            break;
        }
        right_base = right_base.min(v);
    }

    height - left_base.max(right_base)
}
