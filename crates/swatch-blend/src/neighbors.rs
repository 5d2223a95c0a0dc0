//! Weighted nearest-neighbor search and aggregation over a sample tier.

use swatch_color::Lch;

use crate::config::EngineConfig;
use crate::model::BlendSample;

/// A sample with its distance to the target.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub sample: &'a BlendSample,
    pub distance: f64,
}

impl Neighbor<'_> {
    pub fn weight(&self) -> f64 {
        1.0 / (1.0 + self.distance)
    }
}

/// Distance from `target` to a sample's recorded target color.
///
/// The hue term is the raw difference, not the shortest arc. Lightness is
/// weighted harder when the sample is lighter than the target.
pub fn weighted_distance(target: Lch, sample: &BlendSample, config: &EngineConfig) -> f64 {
    let dh = target.h - sample.target_h;
    let dc = target.c - sample.target_c;
    let dl = target.l - sample.target_l;
    let lightness_weight = if sample.target_l > target.l {
        config.lighter_weight
    } else {
        config.darker_weight
    };
    let h = config.hue_weight * dh;
    let c = config.chroma_weight * dc;
    let l = lightness_weight * dl;
    (h * h + c * c + l * l).sqrt()
}

/// The `k` closest samples, nearest first; ties keep store order.
pub fn nearest<'a>(
    target: Lch,
    samples: &'a [BlendSample],
    k: usize,
    config: &EngineConfig,
) -> Vec<Neighbor<'a>> {
    let mut scored: Vec<Neighbor<'a>> = samples
        .iter()
        .map(|sample| Neighbor {
            sample,
            distance: weighted_distance(target, sample, config),
        })
        .collect();
    scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    scored.truncate(k);
    for n in &scored {
        log::trace!(
            "neighbor color={} photo={} distance={:.4}",
            n.sample.color_id,
            n.sample.photo_id,
            n.distance
        );
    }
    scored
}

/// Weighted blend of a neighbor set.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub blend_mode: String,
    pub blend_opacity: f64,
    pub shadow_l_offset: f64,
    pub shadow_tint_hex: Option<String>,
    pub shadow_tint_opacity: f64,
    pub neighbors: usize,
}

/// Inverse-distance weighted vote and averages.
///
/// Returns `None` when the total weight is zero (no neighbors).
/// Mode ties go to the mode seen first in neighbor order; the tint hex is the
/// first one present in neighbor order.
pub fn aggregate(neighbors: &[Neighbor<'_>]) -> Option<Aggregate> {
    let mut votes: Vec<(&str, f64)> = Vec::new();
    let mut total = 0.0;
    let mut opacity = 0.0;
    let mut l_offset = 0.0;
    let mut tint_opacity = 0.0;
    let mut tint_hex: Option<&str> = None;

    for n in neighbors {
        let w = n.weight();
        let s = n.sample;
        total += w;
        opacity += w * s.blend_opacity;
        l_offset += w * s.shadow_l_offset;
        tint_opacity += w * s.shadow_tint_opacity;
        if tint_hex.is_none() {
            tint_hex = s.shadow_tint_hex.as_deref().filter(|h| !h.is_empty());
        }
        match votes.iter_mut().find(|(mode, _)| *mode == s.blend_mode) {
            Some((_, count)) => *count += w,
            None => votes.push((s.blend_mode.as_str(), w)),
        }
    }

    if total <= 0.0 {
        return None;
    }

    let mut winner: Option<(&str, f64)> = None;
    for &(mode, count) in &votes {
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((mode, count));
        }
    }
    let (mode, _) = winner?;

    Some(Aggregate {
        blend_mode: mode.to_string(),
        blend_opacity: opacity / total,
        shadow_l_offset: l_offset / total,
        shadow_tint_hex: tint_hex.map(str::to_string),
        shadow_tint_opacity: tint_opacity / total,
        neighbors: neighbors.len(),
    })
}
