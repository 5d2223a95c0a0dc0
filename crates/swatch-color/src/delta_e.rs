//! CIEDE2000 color difference implementation
//!
//! Implements the CIE Technical Report 142-2001 color difference formula (ΔE00).
//! Paint matching treats it as the primary perceptual ordering between swatches.
//!
//! Thresholds:
//! - ΔE00 < 1.0: Imperceptible difference
//! - ΔE00 1.0-2.0: Barely perceptible
//! - ΔE00 2.0-10.0: Noticeable
//! - ΔE00 > 10.0: Very different

#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

use serde::Serialize;

use crate::error::ColorError;
use crate::space::Lab;

/// 25^7, the chroma normalizer shared by the G and RC terms.
const POW25_7: f64 = 6103515625.0;

/// CIEDE2000 color difference (ΔE00)
///
/// Includes all correction terms: lightness, chroma, hue, and rotation.
/// Symmetric in its arguments. Non-finite input propagates NaN; use
/// [`try_ciede2000`] when the input is untrusted.
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    // Parametric factors (1.0 for graphic arts)
    const KL: f64 = 1.0;
    const KC: f64 = 1.0;
    const KH: f64 = 1.0;

    let Lab {
        l: l1,
        a: a1,
        b: b1,
    } = lab1;
    let Lab {
        l: l2,
        a: a2,
        b: b2,
    } = lab2;

    let c1_ab = a1.hypot(b1);
    let c2_ab = a2.hypot(b2);
    let c_ab_mean = (c1_ab + c2_ab) / 2.0;

    let c_ab_mean_pow7 = c_ab_mean.powi(7);
    let g = 0.5 * (1.0 - (c_ab_mean_pow7 / (c_ab_mean_pow7 + POW25_7)).sqrt());

    let a1_prime = a1 * (1.0 + g);
    let a2_prime = a2 * (1.0 + g);

    let c1_prime = a1_prime.hypot(b1);
    let c2_prime = a2_prime.hypot(b2);

    let h1_prime = hue_angle(a1_prime, b1);
    let h2_prime = hue_angle(a2_prime, b2);

    let delta_l_prime = l2 - l1;
    let delta_c_prime = c2_prime - c1_prime;

    let chroma_product = c1_prime * c2_prime;
    let delta_h_prime = if chroma_product == 0.0 {
        0.0
    } else {
        let delta_h = h2_prime - h1_prime;
        if delta_h.abs() <= 180.0 {
            delta_h
        } else if delta_h > 180.0 {
            delta_h - 360.0
        } else {
            delta_h + 360.0
        }
    };

    let delta_big_h_prime =
        2.0 * chroma_product.sqrt() * (delta_h_prime.to_radians() / 2.0).sin();

    let l_prime_mean = (l1 + l2) / 2.0;
    let c_prime_mean = (c1_prime + c2_prime) / 2.0;

    // Mean hue, corrected when the pair straddles 0°
    let h_prime_mean = if chroma_product == 0.0 {
        h1_prime + h2_prime
    } else {
        let h_diff = (h1_prime - h2_prime).abs();
        if h_diff <= 180.0 {
            (h1_prime + h2_prime) / 2.0
        } else if h1_prime + h2_prime < 360.0 {
            (h1_prime + h2_prime + 360.0) / 2.0
        } else {
            (h1_prime + h2_prime - 360.0) / 2.0
        }
    };

    let h_rad = h_prime_mean.to_radians();
    let t = 1.0 - 0.17 * (h_rad - 30f64.to_radians()).cos()
        + 0.24 * (2.0 * h_rad).cos()
        + 0.32 * (3.0 * h_rad + 6f64.to_radians()).cos()
        - 0.20 * (4.0 * h_rad - 63f64.to_radians()).cos();

    let l_offset_sq = (l_prime_mean - 50.0).powi(2);
    let sl = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
    let sc = 1.0 + 0.045 * c_prime_mean;
    let sh = 1.0 + 0.015 * c_prime_mean * t;

    // Rotation term for the blue region
    let delta_theta = 30.0 * (-((h_prime_mean - 275.0) / 25.0).powi(2)).exp();
    let c_prime_mean_pow7 = c_prime_mean.powi(7);
    let rc = 2.0 * (c_prime_mean_pow7 / (c_prime_mean_pow7 + POW25_7)).sqrt();
    let rt = -rc * (2.0 * delta_theta).to_radians().sin();

    let term_l = delta_l_prime / (KL * sl);
    let term_c = delta_c_prime / (KC * sc);
    let term_h = delta_big_h_prime / (KH * sh);

    (term_l * term_l + term_c * term_c + term_h * term_h + rt * term_c * term_h).sqrt()
}

/// [`ciede2000`] that rejects NaN or infinite components.
pub fn try_ciede2000(lab1: Lab, lab2: Lab) -> Result<f64, ColorError> {
    if !lab1.is_finite() || !lab2.is_finite() {
        return Err(ColorError::NonFinite);
    }
    Ok(ciede2000(lab1, lab2))
}

/// Calculate hue angle in degrees (0-360)
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        let h = b.atan2(a).to_degrees();
        if h < 0.0 {
            h + 360.0
        } else {
            h
        }
    }
}

/// Categorize a ΔE00 value into perceptual categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaECategory {
    /// ΔE00 < 1.0 - Not perceptible by human eyes
    Imperceptible,
    /// ΔE00 1.0-2.0 - Perceptible through close observation
    BarelyPerceptible,
    /// ΔE00 2.0-10.0 - Perceptible at a glance
    Noticeable,
    /// ΔE00 10.0-49.0 - Colors more similar than opposite
    Distinct,
    /// ΔE00 >= 50.0 - Colors are nearly opposite
    VeryDistinct,
}

impl DeltaECategory {
    /// Categorize a ΔE00 value
    pub fn from_delta_e(de: f64) -> Self {
        if de < 1.0 {
            Self::Imperceptible
        } else if de < 2.0 {
            Self::BarelyPerceptible
        } else if de < 10.0 {
            Self::Noticeable
        } else if de < 50.0 {
            Self::Distinct
        } else {
            Self::VeryDistinct
        }
    }
}
