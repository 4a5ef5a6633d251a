//! A catalog page: one collection, one schema, one store, and the derived
//! facets, visible subset and chips kept in step with them.

use std::sync::Arc;

use tripfilter_core::types::{FilterValue, NumericRange};
use tripfilter_core::Result;

use crate::facets::{self, FacetOptions};
use crate::pipeline::Pipeline;
use crate::schema::kind::{self, Kind};
use crate::schema::{FieldKey, FilterSchema};
use crate::store::{FilterState, FilterStore};
use crate::summary::{self, ActiveFilterChip, RemoveAction};

/// Every mutation recomputes the visible subset and the chips before it
/// returns. Facets are recomputed only when the collection is replaced, and
/// are shared behind an `Arc` so an unchanged collection keeps handing out
/// the same options.
pub struct CatalogView<I> {
    schema: FilterSchema<I>,
    store: FilterStore,
    items: Vec<I>,
    generation: u64,
    facets: Arc<FacetOptions>,
    visible: Vec<usize>,
    chips: Vec<ActiveFilterChip>,
}

impl<I> CatalogView<I> {
    /// A page with no items loaded yet.
    pub fn new(schema: FilterSchema<I>) -> Self {
        Self::with_items(schema, Vec::new())
    }

    pub fn with_items(schema: FilterSchema<I>, items: Vec<I>) -> Self {
        let store = FilterStore::new(&schema);
        let mut view = Self {
            schema,
            store,
            items,
            generation: 0,
            facets: Arc::new(FacetOptions::default()),
            visible: Vec::new(),
            chips: Vec::new(),
        };
        view.refresh_facets();
        view.recompute();
        view
    }

    /// Swap in a freshly fetched collection. Filter state is kept.
    pub fn replace_items(&mut self, items: Vec<I>) {
        self.items = items;
        self.generation += 1;
        self.refresh_facets();
        self.recompute();
    }

    pub fn schema(&self) -> &FilterSchema<I> {
        &self.schema
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Bumped each time the collection is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn facets(&self) -> Arc<FacetOptions> {
        Arc::clone(&self.facets)
    }

    pub fn visible(&self) -> impl Iterator<Item = &I> + '_ {
        self.visible.iter().filter_map(|&i| self.items.get(i))
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn chips(&self) -> &[ActiveFilterChip] {
        &self.chips
    }

    pub fn state(&self) -> FilterState {
        self.store.snapshot()
    }

    pub fn get<K: Kind>(&self, key: FieldKey<K>) -> Option<&K::Value> {
        self.store.get(key)
    }

    pub fn set<K: Kind>(&mut self, key: FieldKey<K>, value: K::Value) -> bool {
        let changed = self.store.set(key, value);
        self.after_mutation(changed)
    }

    pub fn set_named(&mut self, name: &str, value: FilterValue) -> Result<bool> {
        let changed = self.store.set_named(name, value)?;
        Ok(self.after_mutation(changed))
    }

    /// Parse `raw` with the named field's rules and set it.
    pub fn set_parsed(&mut self, name: &str, raw: &str) -> Result<bool> {
        let value = match self.schema.find(name) {
            Some((_, field)) => field.parse_value(raw)?,
            None => return Err(tripfilter_core::Error::UnknownField(name.to_string())),
        };
        self.set_named(name, value)
    }

    pub fn reset<K: Kind>(&mut self, key: FieldKey<K>) -> bool {
        let changed = self.store.reset(key);
        self.after_mutation(changed)
    }

    pub fn reset_named(&mut self, name: &str) -> Result<bool> {
        let changed = self.store.reset_named(name)?;
        Ok(self.after_mutation(changed))
    }

    pub fn reset_all(&mut self) -> bool {
        let changed = self.store.reset_all();
        self.after_mutation(changed)
    }

    /// Run a chip's remove action.
    pub fn remove(&mut self, action: RemoveAction) -> bool {
        let changed = action.apply(&mut self.store);
        self.after_mutation(changed)
    }

    /// Drag a range field's slider handle to `upper`.
    pub fn slide_upper(&mut self, key: FieldKey<kind::Range>, upper: f64) -> bool {
        let (Some(slider), Some(current)) = (self.schema.slider(key), self.store.get(key)) else {
            return false;
        };
        let next: NumericRange = slider.slide(current, upper);
        self.set(key, next)
    }

    /// Click star `n` on a rating field's ladder.
    pub fn click_rating(&mut self, key: FieldKey<kind::Rating>, n: u8) -> bool {
        let (Some(ladder), Some(&current)) = (self.schema.ladder(key), self.store.get(key)) else {
            return false;
        };
        self.set(key, ladder.click(current, n))
    }

    fn after_mutation(&mut self, changed: bool) -> bool {
        if changed {
            self.recompute();
        }
        changed
    }

    fn refresh_facets(&mut self) {
        self.facets = Arc::new(facets::extract(&self.schema, &self.items));
    }

    fn recompute(&mut self) {
        self.visible = Pipeline::compile(&self.schema, &self.store).indices(&self.items);
        self.chips = summary::summarize(&self.schema, &self.store);
        tracing::debug!(
            generation = self.generation,
            revision = self.store.revision(),
            visible = self.visible.len(),
            chips = self.chips.len(),
            "catalog view recomputed"
        );
    }
}
