//! In-memory catalog and sample store, loadable from a JSON fixture.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use swatch_color::{ColorId, Lch, Swatch};

use crate::error::StoreError;
use crate::model::{BlendSample, SampleRow};
use crate::store::{ColorCatalog, SampleFilter, SampleStore};

#[derive(Debug, Deserialize)]
struct ColorRow {
    id: ColorId,
    hex: String,
    #[serde(default)]
    lrv: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixture {
    colors: Vec<ColorRow>,
    samples: Vec<SampleRow>,
}

/// Snapshot store holding colors and samples in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    colors: HashMap<ColorId, Swatch>,
    samples: Vec<BlendSample>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{ "colors": [...], "samples": [...] }` fixture.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        let mut store = Self::new();
        for row in fixture.colors {
            let swatch = Swatch::from_hex(row.id, &row.hex, row.lrv)
                .map_err(|e| StoreError::Malformed(format!("color {}: {e}", row.id)))?;
            store.insert_color(swatch);
        }
        for row in fixture.samples {
            store.insert_sample(row.into());
        }
        log::debug!(
            "loaded fixture: {} colors, {} samples",
            store.colors.len(),
            store.samples.len()
        );
        Ok(store)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert_color(&mut self, swatch: Swatch) {
        self.colors.insert(swatch.id, swatch);
    }

    pub fn insert_sample(&mut self, sample: BlendSample) {
        self.samples.push(sample);
    }

    pub fn color(&self, color_id: ColorId) -> Option<&Swatch> {
        self.colors.get(&color_id)
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl ColorCatalog for MemoryStore {
    fn lch(&self, color_id: ColorId) -> Result<Option<Lch>, StoreError> {
        Ok(self.colors.get(&color_id).map(|s| s.lch))
    }
}

impl SampleStore for MemoryStore {
    fn fetch_approved(
        &self,
        filter: &SampleFilter,
        limit: usize,
    ) -> Result<Vec<BlendSample>, StoreError> {
        let mut matched: Vec<&BlendSample> =
            self.samples.iter().filter(|s| filter.matches(s)).collect();
        // stable: equal timestamps keep insertion order
        matched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(matched.into_iter().take(limit).cloned().collect())
    }
}
