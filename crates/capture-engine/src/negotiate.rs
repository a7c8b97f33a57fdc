//! Native format negotiation.

use camgrab_platform_core::{NativeFormat, Resolution};

/// Select the advertised format closest to the requested resolution.
///
/// Distance is the absolute difference of squared diagonal magnitudes
/// (`w² + h²`), so candidates larger than the request are not penalized
/// differently from smaller ones. On an exact distance tie an uncompressed
/// candidate replaces a compressed running best; any remaining tie keeps
/// the earlier candidate. Returns `None` when `candidates` is empty, which
/// callers must treat as "cannot negotiate".
///
/// Pure function of its inputs.
pub fn select_format(requested: Resolution, candidates: &[NativeFormat]) -> Option<NativeFormat> {
    let requested_len2 = magnitude_squared(requested.width, requested.height);

    let mut best: Option<(NativeFormat, u128)> = None;
    for candidate in candidates {
        let candidate_len2 = magnitude_squared(candidate.width, candidate.height);
        let delta = requested_len2.abs_diff(candidate_len2);

        let replace = match best {
            None => true,
            Some((current, best_delta)) => {
                delta < best_delta
                    || (delta == best_delta && !candidate.compressed && current.compressed)
            }
        };

        if replace {
            best = Some((*candidate, delta));
        }
    }

    best.map(|(format, _)| format)
}

// u128 so the sum of two squared u32s cannot overflow.
fn magnitude_squared(width: u32, height: u32) -> u128 {
    let w = u128::from(width);
    let h = u128::from(height);
    w * w + h * h
}

#[cfg(test)]
mod tests {
    use super::*;
    use camgrab_platform_core::CodecId;

    fn raw(width: u32, height: u32) -> NativeFormat {
        NativeFormat::new(width, height, CodecId::RGB24, 30)
    }

    fn mjpeg(width: u32, height: u32) -> NativeFormat {
        NativeFormat::new(width, height, CodecId::MJPG, 30)
    }

    #[test]
    fn exact_match_beats_larger_compressed_candidate() {
        let candidates = [raw(320, 240), mjpeg(640, 480)];
        let selected = select_format(Resolution::new(320, 240), &candidates).unwrap();
        assert_eq!(selected, candidates[0]);
    }

    #[test]
    fn equal_distance_tie_prefers_uncompressed() {
        // Both candidates sit at the same squared-magnitude distance from
        // the request; only the compression flag separates them.
        let candidates = [mjpeg(90, 110), raw(110, 90)];
        let selected = select_format(Resolution::new(100, 100), &candidates).unwrap();
        assert_eq!(selected, candidates[1]);
        assert!(!selected.compressed);
    }

    #[test]
    fn uncompressed_running_best_survives_compressed_tie() {
        let candidates = [raw(110, 90), mjpeg(90, 110)];
        let selected = select_format(Resolution::new(100, 100), &candidates).unwrap();
        assert_eq!(selected, candidates[0]);
    }

    #[test]
    fn first_candidate_wins_when_compression_also_ties() {
        let candidates = [raw(110, 90), raw(90, 110)];
        let selected = select_format(Resolution::new(100, 100), &candidates).unwrap();
        assert_eq!(selected, candidates[0]);
    }

    #[test]
    fn closest_by_magnitude_not_first_listed() {
        let candidates = [raw(1920, 1080), raw(640, 480), raw(800, 600)];
        let selected = select_format(Resolution::new(648, 486), &candidates).unwrap();
        assert_eq!(selected, candidates[1]);
    }

    #[test]
    fn oversized_candidates_are_not_penalized() {
        // 700x500 is closer to the request in squared magnitude than
        // 500x300, even though it overshoots.
        let candidates = [raw(500, 300), raw(700, 500)];
        let selected = select_format(Resolution::new(640, 480), &candidates).unwrap();
        assert_eq!(selected, candidates[1]);
    }

    #[test]
    fn empty_candidate_list_yields_none() {
        assert!(select_format(Resolution::new(640, 480), &[]).is_none());
    }

    #[test]
    fn large_dimensions_do_not_overflow() {
        let candidates = [raw(u32::MAX, u32::MAX), raw(1, 1)];
        let selected = select_format(Resolution::new(1, 2), &candidates).unwrap();
        assert_eq!(selected, candidates[1]);
    }
}
