//! Integer LCh buckets used as categorical join keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::space::{lab_to_lch, Lab, Lch};

/// An LCh triple rounded half-up to whole units, hue wrapped into `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LchBucket {
    pub h: i32,
    pub c: i32,
    pub l: i32,
}

impl LchBucket {
    /// Stable `"h-c-l"` key.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// The bucket center as an exact LCh value.
    pub fn as_lch(&self) -> Lch {
        Lch::new(f64::from(self.l), f64::from(self.c), f64::from(self.h))
    }
}

impl fmt::Display for LchBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.h, self.c, self.l)
    }
}

/// Quantize a Lab color into its LCh bucket.
pub fn quantize(lab: Lab) -> LchBucket {
    quantize_lch(lab_to_lch(lab))
}

/// Quantize an LCh color directly.
pub fn quantize_lch(lch: Lch) -> LchBucket {
    let h = round_half_up(lch.h);
    LchBucket {
        h: ((h % 360) + 360) % 360,
        c: round_half_up(lch.c),
        l: round_half_up(lch.l),
    }
}

fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}
