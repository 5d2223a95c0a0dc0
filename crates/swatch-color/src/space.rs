//! sRGB, CIELAB, LCh and HSL conversions.
//!
//! All conversions assume the D65 reference white and the sRGB transfer curve.
//! Every function here is pure and deterministic.

// Allow standard color science naming conventions (x, y, z for XYZ; a, b for Lab; etc.)
// and precise colorimetric constants from CIE specifications
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::excessive_precision)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

// D65 reference white point (standard daylight)
const D65_XN: f64 = 0.95047;
const D65_YN: f64 = 1.00000;
const D65_ZN: f64 = 1.08883;

const DELTA: f64 = 6.0 / 29.0;
const DELTA_CUBE: f64 = DELTA * DELTA * DELTA;

/// sRGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from untyped integer channels, rejecting anything outside 0-255.
    pub fn from_ints(r: i64, g: i64, b: i64) -> Result<Self, ColorError> {
        let channel = |name: char, value: i64| {
            u8::try_from(value).map_err(|_| ColorError::ChannelOutOfRange {
                channel: name,
                value,
            })
        };
        Ok(Self::new(channel('r', r)?, channel('g', g)?, channel('b', b)?))
    }

    /// Parse a six-digit hex code (`"#a1b2c3"` or `"A1B2C3"`).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let code = normalize_hex(hex)?;
        // normalize_hex guarantees six ASCII hex digits
        let byte = |i: usize| {
            u8::from_str_radix(&code[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidHex(hex.to_string()))
        };
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?))
    }

    /// Lower-case six-digit catalog code, without a leading `#`.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Normalize a hex code to six lower-case digits with no `#`.
///
/// Three-digit shorthand and eight-digit RGBA are rejected, not expanded.
pub fn normalize_hex(hex: &str) -> Result<String, ColorError> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }
    Ok(digits.to_ascii_lowercase())
}

/// CIELAB color space representation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    /// Lightness (0-100)
    pub l: f64,
    /// Green-Red axis (-128 to +128)
    pub a: f64,
    /// Blue-Yellow axis (-128 to +128)
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }

    /// Cylindrical form of this color.
    pub fn to_lch(self) -> Lch {
        lab_to_lch(self)
    }
}

/// Cylindrical Lab: lightness, chroma and hue angle in degrees `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    pub fn to_lab(self) -> Lab {
        lch_to_lab(self)
    }
}

/// HSL with hue in degrees and saturation/lightness in percent (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Convert sRGB to CIELAB via XYZ
///
/// Uses D65 illuminant (standard daylight)
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    // sRGB to linear RGB
    let r = srgb_to_linear(f64::from(rgb.r) / 255.0);
    let g = srgb_to_linear(f64::from(rgb.g) / 255.0);
    let b = srgb_to_linear(f64::from(rgb.b) / 255.0);

    // Linear RGB to XYZ (sRGB D65)
    let x = r * 0.4124564 + g * 0.3575761 + b * 0.1804375;
    let y = r * 0.2126729 + g * 0.7151522 + b * 0.0721750;
    let z = r * 0.0193339 + g * 0.1191920 + b * 0.9503041;

    let fx = lab_f(x / D65_XN);
    let fy = lab_f(y / D65_YN);
    let fz = lab_f(z / D65_ZN);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert CIELAB back to 8-bit sRGB.
///
/// Out-of-gamut colors are clamped per channel after rounding.
pub fn lab_to_rgb(lab: Lab) -> Rgb {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    let x = lab_f_inv(fx) * D65_XN;
    let y = lab_f_inv(fy) * D65_YN;
    let z = lab_f_inv(fz) * D65_ZN;

    // XYZ to linear RGB (D65)
    let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
    let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
    let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;

    Rgb::new(encode_channel(r), encode_channel(g), encode_channel(b))
}

/// Lab to LCh. Achromatic colors get hue 0.
pub fn lab_to_lch(lab: Lab) -> Lch {
    let c = lab.a.hypot(lab.b);
    let h = if c > 0.0 {
        normalize_hue(lab.b.atan2(lab.a).to_degrees())
    } else {
        0.0
    };
    Lch { l: lab.l, c, h }
}

/// LCh to Lab.
pub fn lch_to_lab(lch: Lch) -> Lab {
    let (sin, cos) = lch.h.to_radians().sin_cos();
    Lab {
        l: lch.l,
        a: lch.c * cos,
        b: lch.c * sin,
    }
}

/// sRGB to HSL. Achromatic input (max == min) yields hue and saturation 0.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h * 60.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Map a paint LRV percentage to CIE L*.
///
/// LRV is treated as luminance Y in percent and clamped to `[0, 100]` first.
pub fn lstar_from_lrv(lrv: f64) -> f64 {
    let y = (lrv / 100.0).clamp(0.0, 1.0);
    116.0 * lab_f(y) - 16.0
}

/// Wrap any angle in degrees into `[0, 360)`.
pub fn normalize_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// sRGB gamma expansion
fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB gamma compression to an 8-bit channel.
fn encode_channel(u: f64) -> u8 {
    let v = if u <= 0.0031308 {
        12.92 * u
    } else {
        1.055 * u.powf(1.0 / 2.4) - 0.055
    };
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Lab transfer function
pub(crate) fn lab_f(t: f64) -> f64 {
    if t > DELTA_CUBE {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    let cube = t * t * t;
    if cube > DELTA_CUBE {
        cube
    } else {
        (116.0 * t - 16.0) / 903.3
    }
}
