//! Color science primitives for the swatch paint catalog.
//!
//! This crate provides the math used by blend inference and color search:
//! - Conversions: [`rgb_to_lab`], [`lab_to_rgb`], [`lab_to_lch`], [`rgb_to_hsl`], [`lstar_from_lrv`]
//! - Perceptual distance: [`ciede2000`] (ΔE00)
//! - Bucketing: [`quantize`] into integer [`LchBucket`]s
//! - Near-white ranking: [`near_white_score`] and [`rank_candidates`]
//! - Catalog snapshot: [`Swatch`]

mod delta_e;
mod error;
mod near_white;
mod quantize;
mod space;
mod swatch;

pub use delta_e::{ciede2000, try_ciede2000, DeltaECategory};
pub use error::ColorError;
pub use near_white::{
    hue_delta, is_near_white, near_white_score, ordering_key, rank_candidates, RankKey, RankMode,
    NEAR_WHITE_MAX_C, NEAR_WHITE_MIN_L,
};
pub use quantize::{quantize, quantize_lch, LchBucket};
pub use space::{
    lab_to_lch, lab_to_rgb, lch_to_lab, lstar_from_lrv, normalize_hex, normalize_hue, rgb_to_hsl,
    rgb_to_lab, Hsl, Lab, Lch, Rgb,
};
pub use swatch::{ColorId, Swatch};
