//! tripfilter-engine
//!
//! Faceted filtering over an in-memory catalog collection. A catalog declares
//! its fields once in a [`FilterSchema`]; a [`FilterStore`] holds their current
//! values; [`Pipeline`] narrows the collection, [`facets::extract`] derives the
//! option sets, and [`summary::summarize`] lists the active filters as chips.
//! [`CatalogView`] ties them together for one page.

pub mod controls;
pub mod facets;
pub mod pipeline;
pub mod schema;
pub mod store;
pub mod summary;
pub mod view;

pub use controls::{RangeSlider, RatingLadder};
pub use facets::FacetOptions;
pub use pipeline::{filter, Pipeline};
pub use schema::{
    kind, CategoricalField, FieldId, FieldKey, FilterSchema, RangeField, RatingField, SchemaBuilder, TextField,
    TriStateField,
};
pub use store::{FilterState, FilterStore};
pub use summary::{summarize, ActiveFilterChip, RemoveAction};
pub use view::CatalogView;
