//! Integration tests for swatch-color.
//!
//! These tests verify the public API works correctly end-to-end.

use swatch_color::{
    ciede2000, is_near_white, lab_to_rgb, near_white_score, ordering_key, quantize, quantize_lch,
    rank_candidates, rgb_to_lab, Lab, Lch, RankMode, Rgb, Swatch,
};

// =============================================================================
// Conversion Integration Tests
// =============================================================================

#[test]
fn test_full_rgb_cube_roundtrip_sampled() {
    // every 5th level on each axis, 52^3 triples
    for r in (0..=255u8).step_by(5) {
        for g in (0..=255u8).step_by(5) {
            for b in (0..=255u8).step_by(5) {
                let rgb = Rgb::new(r, g, b);
                let back = lab_to_rgb(rgb_to_lab(rgb));
                assert!(
                    (i16::from(back.r) - i16::from(r)).abs() <= 1
                        && (i16::from(back.g) - i16::from(g)).abs() <= 1
                        && (i16::from(back.b) - i16::from(b)).abs() <= 1,
                    "{rgb} came back as {back}"
                );
            }
        }
    }
}

#[test]
fn test_swatch_lch_invariant() {
    for hex in ["#f4f1ea", "#2f3d4c", "#808080", "#c2452d", "#000000"] {
        let swatch = Swatch::from_hex(1, hex, None).expect("valid hex");
        assert_eq!(swatch.lch.l, swatch.lab.l);
        assert!((swatch.lch.c - swatch.lab.a.hypot(swatch.lab.b)).abs() < 1e-12);
        assert!(swatch.lch.h >= 0.0 && swatch.lch.h < 360.0);
    }
}

// =============================================================================
// Distance Integration Tests
// =============================================================================

#[test]
fn test_delta_e_identity_and_symmetry_on_catalog_colors() {
    let labs: Vec<Lab> = ["#f4f1ea", "#2f3d4c", "#c2452d", "#7a8b6f", "#1b1b1b"]
        .iter()
        .map(|h| Swatch::from_hex(0, h, None).expect("valid hex").lab)
        .collect();

    for &x in &labs {
        assert!(ciede2000(x, x).abs() < 1e-12);
        for &y in &labs {
            assert!((ciede2000(x, y) - ciede2000(y, x)).abs() < 1e-9);
        }
    }
}

// =============================================================================
// Quantizer Integration Tests
// =============================================================================

#[test]
fn test_quantize_idempotent_on_catalog_colors() {
    for hex in ["#f4f1ea", "#2f3d4c", "#c2452d", "#ff0080"] {
        let lab = Swatch::from_hex(0, hex, None).expect("valid hex").lab;
        let bucket = quantize(lab);
        assert!(bucket.h >= 0 && bucket.h < 360);
        assert_eq!(quantize_lch(bucket.as_lch()), bucket);
    }
}

// =============================================================================
// Near-White Integration Tests
// =============================================================================

#[test]
fn test_near_white_gate_routes_scoring() {
    let white = Lch::new(90.0, 3.0, 85.0);
    let mid = Lch::new(70.0, 3.0, 85.0);
    assert!(is_near_white(white));
    assert!(!is_near_white(mid));

    // same offset: darker by 2, chroma +1
    let probe = |seed: Lch| Lch::new(seed.l - 2.0, seed.c + 1.0, seed.h);
    let gated = near_white_score(white, probe(white));
    let ungated = near_white_score(mid, probe(mid));
    assert!((gated - (1.1 * 2.0 + 1.6 + 1.6 * 2.0)).abs() < 1e-9);
    assert!((ungated - 3.0).abs() < 1e-9);
}

#[test]
fn test_hue_first_ranking_for_near_white_seed() {
    let seed = Lch::new(92.0, 4.0, 90.0).to_lab();
    // close in ΔE00 but off-hue, versus farther but on-hue
    let off_hue = Lch::new(92.0, 4.0, 130.0).to_lab();
    let on_hue = Lch::new(86.0, 4.0, 90.0).to_lab();

    let by_delta_e = rank_candidates(seed, &[off_hue, on_hue], RankMode::DeltaE);
    let by_hue = rank_candidates(seed, &[off_hue, on_hue], RankMode::HueFirst);
    assert_eq!(by_hue, vec![1, 0]);
    if ciede2000(seed, off_hue) < ciede2000(seed, on_hue) {
        assert_eq!(by_delta_e, vec![0, 1]);
    }

    let key = ordering_key(seed, on_hue, RankMode::HueFirst);
    assert!(key.primary < 1e-9);
}
