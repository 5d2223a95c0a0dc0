//! Blend-settings inference for paint renderings.
//!
//! Given a mask role and a catalog color, [`BlendInferenceEngine`] suggests a
//! blend mode, opacity and shadow treatment by reasoning over previously
//! approved [`BlendSample`]s:
//! - exact precedents are reused as-is,
//! - otherwise the narrowest non-empty retrieval [`Tier`] is searched,
//! - lightness-bracketing samples are interpolated,
//! - and a weighted k-NN aggregate covers the rest.
//!
//! Storage is abstracted behind [`ColorCatalog`] and [`SampleStore`];
//! [`MemoryStore`] implements both over a JSON fixture.
//!
//! The engine logs through the `log` facade and installs no logger.

mod config;
mod engine;
mod error;
mod interpolate;
mod memory;
mod model;
mod neighbors;
mod store;

pub use config::EngineConfig;
pub use engine::{heuristic_guess, heuristic_opacity, BlendInferenceEngine, Tier};
pub use error::{BlendError, ConfigError, StoreError};
pub use interpolate::{bracket, interpolate, Bracket, Interpolated};
pub use memory::MemoryStore;
pub use model::{
    BlendSample, Guess, GuessRequest, PhotoId, RoleFamily, SampleRow, DEFAULT_BLEND_MODE,
    DEFAULT_BLEND_OPACITY,
};
pub use neighbors::{aggregate, nearest, weighted_distance, Aggregate, Neighbor};
pub use store::{ColorCatalog, RoleScope, SampleFilter, SampleStore};
