//! Collaborator contracts consumed by the engine.

use swatch_color::{ColorId, Lch};

use crate::error::StoreError;
use crate::model::{BlendSample, PhotoId, RoleFamily};

/// How a retrieval matches a sample's mask role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleScope {
    /// Identical mask role string.
    Exact(String),
    /// Any role in the same family.
    Family(RoleFamily),
}

/// Filter for one retrieval; only approved samples ever match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFilter {
    pub photo_id: Option<PhotoId>,
    pub role: RoleScope,
    pub color_id: Option<ColorId>,
}

impl SampleFilter {
    pub fn matches(&self, sample: &BlendSample) -> bool {
        if !sample.approved {
            return false;
        }
        if self.photo_id.is_some_and(|p| p != sample.photo_id) {
            return false;
        }
        if self.color_id.is_some_and(|c| c != sample.color_id) {
            return false;
        }
        match &self.role {
            RoleScope::Exact(role) => sample.mask_role == *role,
            RoleScope::Family(family) => sample.role_family == *family,
        }
    }
}

/// Resolves catalog colors.
pub trait ColorCatalog {
    /// LCh of a color, or `None` when the id is unknown.
    fn lch(&self, color_id: ColorId) -> Result<Option<Lch>, StoreError>;
}

/// Source of approved samples.
pub trait SampleStore {
    /// Approved samples matching `filter`, most recently updated first, at most `limit`.
    fn fetch_approved(
        &self,
        filter: &SampleFilter,
        limit: usize,
    ) -> Result<Vec<BlendSample>, StoreError>;
}

impl<T: ColorCatalog + ?Sized> ColorCatalog for &T {
    fn lch(&self, color_id: ColorId) -> Result<Option<Lch>, StoreError> {
        (**self).lch(color_id)
    }
}

impl<T: SampleStore + ?Sized> SampleStore for &T {
    fn fetch_approved(
        &self,
        filter: &SampleFilter,
        limit: usize,
    ) -> Result<Vec<BlendSample>, StoreError> {
        (**self).fetch_approved(filter, limit)
    }
}
