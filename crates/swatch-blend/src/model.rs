//! Sample and guess records.

use std::fmt;

use serde::{Deserialize, Serialize};
use swatch_color::ColorId;

/// Photo identifier in the sample library.
pub type PhotoId = i64;

/// Coarse grouping of mask roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleFamily {
    Body,
    Trim,
    Accent,
}

const BODY_MARKERS: [&str; 3] = ["body", "stucco", "siding"];
const TRIM_MARKERS: [&str; 6] = ["trim", "fascia", "shutter", "garage", "door", "window"];

impl RoleFamily {
    /// Classify a free-text mask role by substring; body markers win over trim.
    pub fn classify(mask_role: &str) -> Self {
        let role = mask_role.to_ascii_lowercase();
        if BODY_MARKERS.iter().any(|m| role.contains(m)) {
            Self::Body
        } else if TRIM_MARKERS.iter().any(|m| role.contains(m)) {
            Self::Trim
        } else {
            Self::Accent
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Trim => "trim",
            Self::Accent => "accent",
        }
    }
}

impl fmt::Display for RoleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blend mode recorded when a row has none.
pub const DEFAULT_BLEND_MODE: &str = "multiply";
/// Opacity assumed when a row has none.
pub const DEFAULT_BLEND_OPACITY: f64 = 0.5;

/// A human-approved rendering decision for one mask of one photo.
///
/// All numeric fields are filled; see [`SampleRow`] for the defaults applied
/// to incomplete rows.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendSample {
    pub mask_role: String,
    pub role_family: RoleFamily,
    pub color_id: ColorId,
    pub photo_id: PhotoId,
    /// Target hue at approval time, degrees.
    pub target_h: f64,
    /// Target chroma at approval time.
    pub target_c: f64,
    /// Target L* at approval time.
    pub target_l: f64,
    pub blend_mode: String,
    pub blend_opacity: f64,
    /// Signed L* delta applied to the shadow layer.
    pub shadow_l_offset: f64,
    pub shadow_tint_hex: Option<String>,
    pub shadow_tint_opacity: f64,
    pub approved: bool,
    /// Last update, seconds since the Unix epoch.
    pub updated_at: i64,
}

/// Raw sample row as stored; every numeric field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleRow {
    pub mask_role: String,
    pub color_id: ColorId,
    pub photo_id: PhotoId,
    pub target_h: Option<f64>,
    pub target_c: Option<f64>,
    pub target_l: Option<f64>,
    pub blend_mode: Option<String>,
    pub blend_opacity: Option<f64>,
    pub shadow_l_offset: Option<f64>,
    pub shadow_tint_hex: Option<String>,
    pub shadow_tint_opacity: Option<f64>,
    pub approved: bool,
    pub updated_at: i64,
}

impl From<SampleRow> for BlendSample {
    fn from(row: SampleRow) -> Self {
        let blend_mode = row
            .blend_mode
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_BLEND_MODE.to_string());
        let shadow_tint_hex = row
            .shadow_tint_hex
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());

        Self {
            role_family: RoleFamily::classify(&row.mask_role),
            mask_role: row.mask_role,
            color_id: row.color_id,
            photo_id: row.photo_id,
            target_h: row.target_h.unwrap_or(0.0),
            target_c: row.target_c.unwrap_or(0.0),
            target_l: row.target_l.unwrap_or(0.0),
            blend_mode,
            blend_opacity: row.blend_opacity.unwrap_or(DEFAULT_BLEND_OPACITY),
            shadow_l_offset: row.shadow_l_offset.unwrap_or(0.0),
            shadow_tint_hex,
            shadow_tint_opacity: row.shadow_tint_opacity.unwrap_or(0.0),
            approved: row.approved,
            updated_at: row.updated_at,
        }
    }
}

/// Blend settings suggested for a (mask role, color) pair.
///
/// `color_id` is `None` only on the pure-heuristic path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    pub mask_role: String,
    pub color_id: Option<ColorId>,
    pub blend_mode: String,
    pub blend_opacity: Option<f64>,
    pub shadow_l_offset: Option<f64>,
    pub shadow_tint_hex: Option<String>,
    pub shadow_tint_opacity: Option<f64>,
    /// 0 = heuristic, 1 = single sample, 2 = interpolated pair, more = k-NN aggregate.
    pub neighbors_used: usize,
}

impl Guess {
    /// Copy a sample's settings verbatim onto the requested pair.
    pub fn from_sample(mask_role: &str, color_id: ColorId, sample: &BlendSample) -> Self {
        Self {
            mask_role: mask_role.to_string(),
            color_id: Some(color_id),
            blend_mode: sample.blend_mode.clone(),
            blend_opacity: Some(sample.blend_opacity),
            shadow_l_offset: Some(sample.shadow_l_offset),
            shadow_tint_hex: sample.shadow_tint_hex.clone(),
            shadow_tint_opacity: Some(sample.shadow_tint_opacity),
            neighbors_used: 1,
        }
    }
}

/// Input to [`BlendInferenceEngine::guess`](crate::BlendInferenceEngine::guess).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRequest {
    pub mask_role: String,
    pub color_id: ColorId,
    pub photo_id: Option<PhotoId>,
    /// Neighbor count; the engine default applies when `None`.
    pub k: Option<usize>,
}

impl GuessRequest {
    pub fn new(mask_role: impl Into<String>, color_id: ColorId) -> Self {
        Self {
            mask_role: mask_role.into(),
            color_id,
            photo_id: None,
            k: None,
        }
    }

    #[must_use]
    pub fn with_photo(mut self, photo_id: PhotoId) -> Self {
        self.photo_id = Some(photo_id);
        self
    }

    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_body() {
        assert_eq!(RoleFamily::classify("body"), RoleFamily::Body);
        assert_eq!(RoleFamily::classify("upper_stucco"), RoleFamily::Body);
        assert_eq!(RoleFamily::classify("Siding-North"), RoleFamily::Body);
    }

    #[test]
    fn test_classify_trim() {
        for role in ["trim_fascia", "shutters", "garage", "front_door", "window_frame"] {
            assert_eq!(RoleFamily::classify(role), RoleFamily::Trim, "{role}");
        }
    }

    #[test]
    fn test_classify_accent_fallback() {
        assert_eq!(RoleFamily::classify("railing"), RoleFamily::Accent);
        assert_eq!(RoleFamily::classify(""), RoleFamily::Accent);
    }

    #[test]
    fn test_classify_body_wins_over_trim() {
        assert_eq!(RoleFamily::classify("body_trim"), RoleFamily::Body);
    }

    #[test]
    fn test_role_family_display() {
        assert_eq!(RoleFamily::Trim.to_string(), "trim");
    }

    #[test]
    fn test_sample_row_defaults() {
        let sample = BlendSample::from(SampleRow {
            mask_role: "trim".to_string(),
            color_id: 4,
            photo_id: 2,
            shadow_tint_hex: Some("  ".to_string()),
            blend_mode: Some(String::new()),
            ..SampleRow::default()
        });
        assert_eq!(sample.role_family, RoleFamily::Trim);
        assert_eq!(sample.target_h, 0.0);
        assert_eq!(sample.target_c, 0.0);
        assert_eq!(sample.target_l, 0.0);
        assert_eq!(sample.blend_opacity, 0.5);
        assert_eq!(sample.shadow_l_offset, 0.0);
        assert_eq!(sample.shadow_tint_opacity, 0.0);
        assert_eq!(sample.blend_mode, "multiply");
        assert!(sample.shadow_tint_hex.is_none());
    }

    #[test]
    fn test_sample_row_from_sparse_json() {
        let row: SampleRow = serde_json::from_str(
            r#"{"mask_role":"body","color_id":9,"target_l":62.5,"blend_mode":"colorize","approved":true}"#,
        )
        .unwrap();
        let sample = BlendSample::from(row);
        assert_eq!(sample.target_l, 62.5);
        assert_eq!(sample.blend_mode, "colorize");
        assert!(sample.approved);
        assert_eq!(sample.updated_at, 0);
    }

    #[test]
    fn test_guess_serializes_flat_with_nulls() {
        let guess = Guess {
            mask_role: "body".to_string(),
            color_id: None,
            blend_mode: "multiply".to_string(),
            blend_opacity: Some(0.55),
            shadow_l_offset: Some(0.0),
            shadow_tint_hex: None,
            shadow_tint_opacity: Some(0.0),
            neighbors_used: 0,
        };
        let value = serde_json::to_value(&guess).unwrap();
        assert!(value["color_id"].is_null());
        assert!(value["shadow_tint_hex"].is_null());
        assert_eq!(value["blend_mode"], "multiply");
        assert_eq!(value["neighbors_used"], 0);
    }

    #[test]
    fn test_guess_request_builder() {
        let req = GuessRequest::new("body", 3).with_photo(11).with_k(7);
        assert_eq!(req.photo_id, Some(11));
        assert_eq!(req.k, Some(7));
    }
}
