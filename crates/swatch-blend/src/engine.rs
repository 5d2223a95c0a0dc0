//! Blend-settings inference.
//!
//! Decision order for one request:
//! 1. Unknown color: `Ok(None)`, the sample store is never queried.
//! 2. Exact precedent (same photo, role and color): copied verbatim.
//! 3. First non-empty retrieval tier, narrowest scope first.
//! 4. No tier has samples: lightness heuristic.
//! 5. Lightness bracket within the tier: verbatim or interpolated.
//! 6. Otherwise the inverse-distance weighted k-NN aggregate, reported as
//!    `k` neighbors even when the tier holds fewer samples.

use swatch_color::Lch;

use crate::config::EngineConfig;
use crate::error::BlendError;
use crate::interpolate::{bracket, interpolate, Bracket};
use crate::model::{BlendSample, Guess, GuessRequest, RoleFamily, DEFAULT_BLEND_MODE};
use crate::neighbors::{aggregate, nearest};
use crate::store::{ColorCatalog, RoleScope, SampleFilter, SampleStore};

/// Retrieval scopes, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    PhotoRole,
    PhotoFamily,
    GlobalRole,
    GlobalFamily,
}

impl Tier {
    pub const ALL: [Self; 4] = [
        Self::PhotoRole,
        Self::PhotoFamily,
        Self::GlobalRole,
        Self::GlobalFamily,
    ];

    /// Filter for this tier; photo tiers are skipped without a photo.
    pub fn filter(self, request: &GuessRequest, family: RoleFamily) -> Option<SampleFilter> {
        let (photo_id, role) = match self {
            Self::PhotoRole => (
                Some(request.photo_id?),
                RoleScope::Exact(request.mask_role.clone()),
            ),
            Self::PhotoFamily => (Some(request.photo_id?), RoleScope::Family(family)),
            Self::GlobalRole => (None, RoleScope::Exact(request.mask_role.clone())),
            Self::GlobalFamily => (None, RoleScope::Family(family)),
        };
        Some(SampleFilter {
            photo_id,
            role,
            color_id: None,
        })
    }
}

/// Opacity used when no sample exists, banded by target L*.
pub fn heuristic_opacity(target_l: f64) -> f64 {
    if target_l < 30.0 {
        0.55
    } else if target_l < 45.0 {
        0.7
    } else if target_l < 60.0 {
        0.85
    } else {
        1.0
    }
}

/// Precedent-free guess: multiply at a lightness-banded opacity, no shadow.
pub fn heuristic_guess(mask_role: &str, target_l: f64) -> Guess {
    Guess {
        mask_role: mask_role.to_string(),
        color_id: None,
        blend_mode: DEFAULT_BLEND_MODE.to_string(),
        blend_opacity: Some(heuristic_opacity(target_l)),
        shadow_l_offset: Some(0.0),
        shadow_tint_hex: None,
        shadow_tint_opacity: Some(0.0),
        neighbors_used: 0,
    }
}

/// Infers blend settings for a (mask role, color) pair from approved samples.
///
/// Holds no mutable state; concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct BlendInferenceEngine<C, S> {
    catalog: C,
    store: S,
    config: EngineConfig,
}

impl<C: ColorCatalog, S: SampleStore> BlendInferenceEngine<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Self {
            catalog,
            store,
            config: EngineConfig::default(),
        }
    }

    /// Use a validated configuration.
    pub fn with_config(catalog: C, store: S, config: EngineConfig) -> Result<Self, BlendError> {
        config.validate()?;
        Ok(Self {
            catalog,
            store,
            config,
        })
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Guess blend settings. `Ok(None)` means the color id is unknown.
    pub fn guess(&self, request: &GuessRequest) -> Result<Option<Guess>, BlendError> {
        let Some(target) = self.catalog.lch(request.color_id)? else {
            log::debug!("color {} not found", request.color_id);
            return Ok(None);
        };
        let family = RoleFamily::classify(&request.mask_role);

        if let Some(exact) = self.exact_match(request)? {
            log::debug!(
                "exact precedent for role={} color={}",
                request.mask_role,
                request.color_id
            );
            return Ok(Some(Guess::from_sample(
                &request.mask_role,
                request.color_id,
                &exact,
            )));
        }

        for tier in Tier::ALL {
            let Some(filter) = tier.filter(request, family) else {
                continue;
            };
            let samples = self.store.fetch_approved(&filter, self.config.tier_limit)?;
            if samples.is_empty() {
                log::trace!("tier {tier:?} empty");
                continue;
            }
            log::debug!("tier {tier:?} yielded {} samples", samples.len());
            return Ok(Some(self.infer_from_tier(request, target, &samples)));
        }

        log::debug!(
            "no samples for role={} family={family}, using heuristic",
            request.mask_role
        );
        Ok(Some(heuristic_guess(&request.mask_role, target.l)))
    }

    fn exact_match(&self, request: &GuessRequest) -> Result<Option<BlendSample>, BlendError> {
        let Some(photo_id) = request.photo_id else {
            return Ok(None);
        };
        let filter = SampleFilter {
            photo_id: Some(photo_id),
            role: RoleScope::Exact(request.mask_role.clone()),
            color_id: Some(request.color_id),
        };
        Ok(self.store.fetch_approved(&filter, 1)?.into_iter().next())
    }

    fn infer_from_tier(
        &self,
        request: &GuessRequest,
        target: Lch,
        samples: &[BlendSample],
    ) -> Guess {
        let k = request.k.unwrap_or(self.config.k);
        let neighbors = nearest(target, samples, k, &self.config);

        match bracket(samples, target.l) {
            Some(Bracket::Single(sample)) => {
                log::debug!("sample at exact lightness {:.2}", sample.target_l);
                return Guess::from_sample(&request.mask_role, request.color_id, sample);
            }
            Some(Bracket::Pair { lower, upper }) => {
                let mix = interpolate(lower, upper, target.l);
                log::debug!(
                    "interpolated between L*={:.2} and L*={:.2} at t={:.3}",
                    lower.target_l,
                    upper.target_l,
                    mix.t
                );
                return Guess {
                    mask_role: request.mask_role.clone(),
                    color_id: Some(request.color_id),
                    blend_mode: mix.blend_mode,
                    blend_opacity: Some(mix.blend_opacity),
                    shadow_l_offset: Some(mix.shadow_l_offset),
                    shadow_tint_hex: mix.shadow_tint_hex,
                    shadow_tint_opacity: Some(mix.shadow_tint_opacity),
                    neighbors_used: 2,
                };
            }
            None => {}
        }

        let Some(agg) = aggregate(&neighbors) else {
            log::debug!("zero total neighbor weight, using heuristic");
            return heuristic_guess(&request.mask_role, target.l);
        };

        let mut opacity = agg.blend_opacity;
        if agg.blend_mode == DEFAULT_BLEND_MODE
            && target.l >= self.config.multiply_floor_min_lightness
            && opacity < self.config.multiply_floor
        {
            log::debug!(
                "raising multiply opacity {opacity:.3} to {:.3}",
                self.config.multiply_floor
            );
            opacity = self.config.multiply_floor;
        }

        Guess {
            mask_role: request.mask_role.clone(),
            color_id: Some(request.color_id),
            blend_mode: agg.blend_mode,
            blend_opacity: Some(opacity),
            shadow_l_offset: Some(agg.shadow_l_offset),
            shadow_tint_hex: agg.shadow_tint_hex,
            shadow_tint_opacity: Some(agg.shadow_tint_opacity),
            neighbors_used: k,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::model::SampleRow;
    use swatch_color::{Rgb, Swatch};

    #[test]
    fn test_heuristic_opacity_bands() {
        assert_eq!(heuristic_opacity(10.0), 0.55);
        assert_eq!(heuristic_opacity(29.99), 0.55);
        assert_eq!(heuristic_opacity(30.0), 0.7);
        assert_eq!(heuristic_opacity(44.9), 0.7);
        assert_eq!(heuristic_opacity(45.0), 0.85);
        assert_eq!(heuristic_opacity(59.9), 0.85);
        assert_eq!(heuristic_opacity(60.0), 1.0);
        assert_eq!(heuristic_opacity(95.0), 1.0);
    }

    #[test]
    fn test_heuristic_guess_shape() {
        let guess = heuristic_guess("body", 50.0);
        assert_eq!(guess.color_id, None);
        assert_eq!(guess.blend_mode, "multiply");
        assert_eq!(guess.blend_opacity, Some(0.85));
        assert_eq!(guess.shadow_tint_hex, None);
        assert_eq!(guess.neighbors_used, 0);
    }

    #[test]
    fn test_tier_filters_skip_photo_tiers_without_photo() {
        let request = GuessRequest::new("fascia", 1);
        assert!(Tier::PhotoRole.filter(&request, RoleFamily::Trim).is_none());
        assert!(Tier::PhotoFamily.filter(&request, RoleFamily::Trim).is_none());
        let global = Tier::GlobalFamily.filter(&request, RoleFamily::Trim).unwrap();
        assert_eq!(global.role, RoleScope::Family(RoleFamily::Trim));
        assert_eq!(global.photo_id, None);
    }

    #[test]
    fn test_tier_filters_with_photo() {
        let request = GuessRequest::new("fascia", 1).with_photo(8);
        let f = Tier::PhotoRole.filter(&request, RoleFamily::Trim).unwrap();
        assert_eq!(f.photo_id, Some(8));
        assert_eq!(f.role, RoleScope::Exact("fascia".to_string()));
        assert_eq!(f.color_id, None);
    }

    fn store_with_target(l_rgb: u8) -> (MemoryStore, Lch) {
        let mut store = MemoryStore::new();
        let swatch = Swatch::from_rgb(1, Rgb::new(l_rgb, l_rgb, l_rgb), None);
        let lch = swatch.lch;
        store.insert_color(swatch);
        (store, lch)
    }

    fn approved(role: &str, photo_id: i64, l: f64, mode: &str, opacity: f64) -> BlendSample {
        BlendSample::from(SampleRow {
            mask_role: role.to_string(),
            color_id: 2,
            photo_id,
            target_l: Some(l),
            blend_mode: Some(mode.to_string()),
            blend_opacity: Some(opacity),
            approved: true,
            ..SampleRow::default()
        })
    }

    #[test]
    fn test_photo_tier_preferred_over_global() {
        let (mut store, target) = store_with_target(128);
        store.insert_sample(approved("body", 5, target.l, "colorize", 0.4));
        store.insert_sample(approved("body", 6, target.l, "overlay", 0.8));
        let engine = BlendInferenceEngine::new(&store, &store);

        let guess = engine
            .guess(&GuessRequest::new("body", 1).with_photo(6))
            .unwrap()
            .unwrap();
        assert_eq!(guess.blend_mode, "overlay");
        assert_eq!(guess.neighbors_used, 1);
    }

    #[test]
    fn test_family_tier_used_when_role_missing() {
        let (mut store, target) = store_with_target(128);
        store.insert_sample(approved("stucco", 5, target.l, "colorize", 0.4));
        let engine = BlendInferenceEngine::new(&store, &store);

        let guess = engine.guess(&GuessRequest::new("body", 1)).unwrap().unwrap();
        assert_eq!(guess.blend_mode, "colorize");
        assert_eq!(guess.color_id, Some(1));
        assert_eq!(guess.mask_role, "body");
    }

    #[test]
    fn test_exact_precedent_copied_verbatim() {
        let (mut store, _) = store_with_target(128);
        let mut exact = approved("body", 5, 10.0, "screen", 0.33);
        exact.color_id = 1;
        exact.shadow_tint_hex = Some("445566".to_string());
        store.insert_sample(exact);
        store.insert_sample(approved("body", 5, 90.0, "multiply", 1.0));
        let engine = BlendInferenceEngine::new(&store, &store);

        let guess = engine
            .guess(&GuessRequest::new("body", 1).with_photo(5))
            .unwrap()
            .unwrap();
        assert_eq!(guess.blend_mode, "screen");
        assert_eq!(guess.blend_opacity, Some(0.33));
        assert_eq!(guess.shadow_tint_hex.as_deref(), Some("445566"));
        assert_eq!(guess.neighbors_used, 1);
    }

    #[test]
    fn test_k_zero_falls_back_to_heuristic() {
        let (mut store, target) = store_with_target(128);
        // all samples lighter: no lower bound, so k-NN with zero neighbors
        store.insert_sample(approved("body", 5, target.l + 10.0, "colorize", 0.4));
        let engine = BlendInferenceEngine::new(&store, &store);

        let guess = engine
            .guess(&GuessRequest::new("body", 1).with_k(0))
            .unwrap()
            .unwrap();
        assert_eq!(guess.neighbors_used, 0);
        assert_eq!(guess.color_id, None);
    }

    #[test]
    fn test_with_config_validates() {
        let store = MemoryStore::new();
        let config = EngineConfig {
            k: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            BlendInferenceEngine::with_config(&store, &store, config),
            Err(BlendError::Config(_))
        ));
    }
}
