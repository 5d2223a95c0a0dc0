//! Direction-aware tiebreak for near-white seeds.
//!
//! Whites are judged harshly when a candidate is dirtier (darker or more
//! chromatic) than the seed and leniently when it is cleaner. The score is
//! deliberately asymmetric and is not a metric: swapping seed and candidate
//! changes the result, and the triangle inequality does not hold.

use std::cmp::Ordering;

use crate::delta_e::ciede2000;
use crate::space::{Lab, Lch};

/// Minimum seed L* for the near-white gate.
pub const NEAR_WHITE_MIN_L: f64 = 85.0;
/// Maximum seed chroma for the near-white gate.
pub const NEAR_WHITE_MAX_C: f64 = 8.0;

const DARKER_WEIGHT: f64 = 1.10;
const LIGHTER_WEIGHT: f64 = 0.20;
const CHROMA_GAIN_WEIGHT: f64 = 1.60;
const CHROMA_LOSS_WEIGHT: f64 = 0.60;
const DARK_AND_CHROMATIC_WEIGHT: f64 = 1.60;
const HUE_CHORD_WEIGHT: f64 = 1.00;

/// Whether a seed is light and neutral enough for the asymmetric score.
pub fn is_near_white(seed: Lch) -> bool {
    seed.l >= NEAR_WHITE_MIN_L && seed.c <= NEAR_WHITE_MAX_C
}

/// Shortest-arc hue difference in degrees, `[0, 180]`.
pub fn hue_delta(h1: f64, h2: f64) -> f64 {
    let d = (h1 - h2).abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// Tiebreak score of `candidate` relative to `seed`; lower is closer.
///
/// Ungated seeds fall back to `|ΔL| + |ΔC| + 0.5·Δh/180`.
pub fn near_white_score(seed: Lch, candidate: Lch) -> f64 {
    let dh = hue_delta(seed.h, candidate.h);

    if !is_near_white(seed) {
        return (candidate.l - seed.l).abs() + (candidate.c - seed.c).abs() + 0.5 * (dh / 180.0);
    }

    let dl = candidate.l - seed.l;
    let darker = (-dl).max(0.0);
    let lighter = dl.max(0.0);

    let dc = candidate.c - seed.c;
    let chroma_gain = dc.max(0.0);
    let chroma_loss = (-dc).max(0.0);

    let avg_chroma = (seed.c + candidate.c) / 2.0;
    let hue_chord = 2.0 * avg_chroma * (dh.to_radians() / 2.0).sin();

    DARKER_WEIGHT * darker
        + LIGHTER_WEIGHT * lighter
        + CHROMA_GAIN_WEIGHT * chroma_gain
        + CHROMA_LOSS_WEIGHT * chroma_loss
        + DARK_AND_CHROMATIC_WEIGHT * darker * chroma_gain
        + HUE_CHORD_WEIGHT * hue_chord
}

/// Which comparison drives a candidate ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankMode {
    /// ΔE00 first, tiebreak score second.
    #[default]
    DeltaE,
    /// Hue distance first, ΔE00 second, for near-white seeds only.
    /// Seeds outside the gate rank as [`RankMode::DeltaE`].
    HueFirst,
}

/// Two-level sort key; compare lexicographically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankKey {
    pub primary: f64,
    pub secondary: f64,
}

impl RankKey {
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
    }
}

/// Sort key for `candidate` against `seed` under `mode`.
pub fn ordering_key(seed: Lab, candidate: Lab, mode: RankMode) -> RankKey {
    let seed_lch = seed.to_lch();
    let candidate_lch = candidate.to_lch();
    let de = ciede2000(seed, candidate);

    if mode == RankMode::HueFirst && is_near_white(seed_lch) {
        RankKey {
            primary: hue_delta(seed_lch.h, candidate_lch.h),
            secondary: de,
        }
    } else {
        RankKey {
            primary: de,
            secondary: near_white_score(seed_lch, candidate_lch),
        }
    }
}

/// Indices of `candidates` ordered nearest-first. Equal keys keep input order.
pub fn rank_candidates(seed: Lab, candidates: &[Lab], mode: RankMode) -> Vec<usize> {
    let mut keyed: Vec<(usize, RankKey)> = candidates
        .iter()
        .enumerate()
        .map(|(i, &c)| (i, ordering_key(seed, c, mode)))
        .collect();
    keyed.sort_by(|a, b| a.1.total_cmp(&b.1));
    keyed.into_iter().map(|(i, _)| i).collect()
}
