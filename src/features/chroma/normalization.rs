//! Chroma normalization, fallback and rotation
//!
//! Every detector works on a fixed 12-bin array. Input that is missing, the
//! wrong length or non-finite is replaced by a flat profile before any
//! detector runs.

use super::{Chroma, CHROMA_BINS, EPSILON, NEUTRAL_CHROMA};

/// Resolve raw chroma into a 12-bin array
///
/// # Returns
///
/// `(chroma, fallback_used)`. The flat neutral profile (all 1.0) is returned
/// with `fallback_used = true` when the input is absent, not exactly 12 bins,
/// or contains NaN/infinite values.
pub fn resolve_chroma(raw: Option<&[f32]>) -> (Chroma, bool) {
    match raw {
        Some(values) if values.len() == CHROMA_BINS && values.iter().all(|v| v.is_finite()) => {
            let mut chroma = [0.0f32; CHROMA_BINS];
            chroma.copy_from_slice(values);
            (chroma, false)
        }
        Some(values) => {
            log::warn!(
                "Malformed chroma ({} bins); substituting neutral chroma",
                values.len()
            );
            (NEUTRAL_CHROMA, true)
        }
        None => {
            log::warn!("Chroma missing; substituting neutral chroma");
            (NEUTRAL_CHROMA, true)
        }
    }
}

/// Divide by the maximum bin (plus epsilon) so the peak is ~1.0
pub fn normalize_by_max(chroma: &Chroma) -> Chroma {
    let max = chroma.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let denom = max as f64 + EPSILON;
    let mut out = [0.0f32; CHROMA_BINS];
    for (o, &c) in out.iter_mut().zip(chroma.iter()) {
        *o = (c as f64 / denom) as f32;
    }
    out
}

/// Index of the strongest bin (first on ties)
pub fn argmax(chroma: &Chroma) -> usize {
    let mut best = 0;
    for (i, &c) in chroma.iter().enumerate().skip(1) {
        if c > chroma[best] {
            best = i;
        }
    }
    best
}

/// Shift chroma into the tonic-relative frame: `out[i] = chroma[(tonic + i) % 12]`
pub fn rotate_to_tonic(chroma: &Chroma, tonic: usize) -> Chroma {
    let mut out = [0.0f32; CHROMA_BINS];
    for (i, o) in out.iter_mut().enumerate() {
        *o = chroma[(tonic + i) % CHROMA_BINS];
    }
    out
}

/// Transpose a C-rooted profile so its index 0 lands on `tonic`:
/// `out[(tonic + i) % 12] = profile[i]`
pub fn rotate_profile(profile: &Chroma, tonic: usize) -> Chroma {
    let mut out = [0.0f32; CHROMA_BINS];
    for (i, &p) in profile.iter().enumerate() {
        out[(tonic + i) % CHROMA_BINS] = p;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_valid() {
        let raw = [0.5f32; 12];
        let (chroma, fallback) = resolve_chroma(Some(&raw));
        assert!(!fallback);
        assert_eq!(chroma, raw);
    }

    #[test]
    fn test_resolve_fallbacks() {
        let (chroma, fallback) = resolve_chroma(None);
        assert!(fallback);
        assert_eq!(chroma, [1.0; 12]);

        let (_, fallback) = resolve_chroma(Some(&[]));
        assert!(fallback);

        let (_, fallback) = resolve_chroma(Some(&[1.0; 11]));
        assert!(fallback);

        let mut with_nan = [0.3f32; 12];
        with_nan[4] = f32::NAN;
        let (chroma, fallback) = resolve_chroma(Some(&with_nan));
        assert!(fallback);
        assert_eq!(chroma, NEUTRAL_CHROMA);
    }

    #[test]
    fn test_normalize_by_max() {
        let mut chroma = [0.0f32; 12];
        chroma[3] = 4.0;
        chroma[7] = 2.0;
        let n = normalize_by_max(&chroma);
        assert!((n[3] - 1.0).abs() < 1e-6);
        assert!((n[7] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_all_zero_does_not_divide_by_zero() {
        let n = normalize_by_max(&[0.0; 12]);
        assert!(n.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_argmax_first_on_ties() {
        let mut chroma = [0.1f32; 12];
        chroma[2] = 0.9;
        chroma[9] = 0.9;
        assert_eq!(argmax(&chroma), 2);
        assert_eq!(argmax(&[0.0; 12]), 0);
    }

    #[test]
    fn test_rotations_are_inverse() {
        let mut chroma = [0.0f32; 12];
        for (i, c) in chroma.iter_mut().enumerate() {
            *c = i as f32;
        }
        let shifted = rotate_to_tonic(&chroma, 9);
        assert_eq!(shifted[0], 9.0);
        assert_eq!(shifted[3], 0.0);
        assert_eq!(rotate_profile(&shifted, 9), chroma);
    }
}
