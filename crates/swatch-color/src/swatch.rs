//! Catalog color snapshot.

use serde::{Deserialize, Serialize};

use crate::error::ColorError;
use crate::space::{lab_to_lch, lstar_from_lrv, normalize_hex, rgb_to_hsl, rgb_to_lab, Hsl, Lab, Lch, Rgb};

/// Catalog color identifier.
pub type ColorId = i64;

/// Immutable snapshot of one catalog color in every representation the
/// catalog keeps. `lch` is always derived from `lab`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub id: ColorId,
    pub rgb: Rgb,
    /// Six lower-case hex digits, no `#`.
    pub hex: String,
    pub lab: Lab,
    pub lch: Lch,
    pub hsl: Hsl,
    /// Light reflectance value in percent, when the manufacturer publishes one.
    pub lrv: Option<f64>,
}

impl Swatch {
    /// Build a snapshot from a hex code.
    pub fn from_hex(id: ColorId, hex: &str, lrv: Option<f64>) -> Result<Self, ColorError> {
        let code = normalize_hex(hex)?;
        let rgb = Rgb::from_hex(&code)?;
        Ok(Self::from_parts(id, rgb, code, lrv))
    }

    pub fn from_rgb(id: ColorId, rgb: Rgb, lrv: Option<f64>) -> Self {
        Self::from_parts(id, rgb, rgb.to_hex(), lrv)
    }

    fn from_parts(id: ColorId, rgb: Rgb, hex: String, lrv: Option<f64>) -> Self {
        let lab = rgb_to_lab(rgb);
        Self {
            id,
            rgb,
            hex,
            lab,
            lch: lab_to_lch(lab),
            hsl: rgb_to_hsl(rgb),
            lrv,
        }
    }

    /// L* implied by the published LRV, if any.
    pub fn lrv_lightness(&self) -> Option<f64> {
        self.lrv.map(lstar_from_lrv)
    }
}
