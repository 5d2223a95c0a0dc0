//! Lightness bracketing and linear interpolation between two samples.

use std::ptr;

use crate::model::BlendSample;

/// Samples that bracket a target lightness.
#[derive(Debug, Clone, Copy)]
pub enum Bracket<'a> {
    /// The same sample is both the lower and the upper bound.
    Single(&'a BlendSample),
    /// Distinct lower and upper bounds.
    Pair {
        lower: &'a BlendSample,
        upper: &'a BlendSample,
    },
}

/// Find the bounds around `target_l` in one ascending pass over the samples
/// sorted by lightness: the last sample at or below the target and the first
/// at or above it.
///
/// With duplicate lightness values the two bounds are not necessarily the
/// nearest pair; this exact rule is what reproduces approved behavior.
pub fn bracket(samples: &[BlendSample], target_l: f64) -> Option<Bracket<'_>> {
    let mut sorted: Vec<&BlendSample> = samples.iter().collect();
    sorted.sort_by(|a, b| a.target_l.total_cmp(&b.target_l));

    let mut lower: Option<&BlendSample> = None;
    let mut upper: Option<&BlendSample> = None;
    for s in sorted {
        if s.target_l <= target_l {
            lower = Some(s);
        }
        if s.target_l >= target_l && upper.is_none() {
            upper = Some(s);
        }
    }

    match (lower, upper) {
        (Some(lower), Some(upper)) if ptr::eq(lower, upper) => Some(Bracket::Single(lower)),
        (Some(lower), Some(upper)) => Some(Bracket::Pair { lower, upper }),
        _ => None,
    }
}

/// Settings interpolated between two bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolated {
    pub t: f64,
    pub blend_mode: String,
    pub blend_opacity: f64,
    pub shadow_l_offset: f64,
    pub shadow_tint_hex: Option<String>,
    pub shadow_tint_opacity: f64,
}

/// Interpolate between `lower` and `upper` at `target_l`.
///
/// A zero lightness span yields `t = 0`. The mode is shared if both bounds
/// agree and otherwise comes from `upper`; the tint hex switches at `t = 0.5`.
pub fn interpolate(lower: &BlendSample, upper: &BlendSample, target_l: f64) -> Interpolated {
    let span = upper.target_l - lower.target_l;
    let t = if span.abs() > f64::EPSILON {
        ((target_l - lower.target_l) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let blend_mode = if lower.blend_mode == upper.blend_mode {
        lower.blend_mode.clone()
    } else {
        upper.blend_mode.clone()
    };
    let shadow_tint_hex = if t < 0.5 {
        lower.shadow_tint_hex.clone()
    } else {
        upper.shadow_tint_hex.clone()
    };

    Interpolated {
        t,
        blend_mode,
        blend_opacity: lerp(lower.blend_opacity, upper.blend_opacity, t),
        shadow_l_offset: lerp(lower.shadow_l_offset, upper.shadow_l_offset, t),
        shadow_tint_hex,
        shadow_tint_opacity: lerp(lower.shadow_tint_opacity, upper.shadow_tint_opacity, t),
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
