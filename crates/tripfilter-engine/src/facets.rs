//! Facet extraction: the option sets a catalog page offers, derived from the
//! items currently loaded.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use tripfilter_core::types::{FacetValue, NumericRange};

use crate::schema::{FacetSource, FilterSchema, Source};

/// Distinct values per categorical field, observed bounds per range field and
/// observed flag values per tri-state field. Missing and blank attributes
/// never produce an option.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetOptions {
    values: BTreeMap<String, Vec<FacetValue>>,
    bounds: BTreeMap<String, NumericRange>,
    flags: BTreeMap<String, Vec<bool>>,
}

impl FacetOptions {
    /// Sorted, de-duplicated options for a categorical field; empty when the
    /// field is unknown or nothing was observed.
    pub fn values(&self, field: &str) -> &[FacetValue] {
        self.values.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Smallest and largest value seen for a range field.
    pub fn bounds(&self, field: &str) -> Option<NumericRange> {
        self.bounds.get(field).copied()
    }

    /// Flag values present in the data for a tri-state field, `false` first.
    pub fn flags(&self, field: &str) -> &[bool] {
        self.flags.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(Vec::is_empty)
            && self.bounds.is_empty()
            && self.flags.values().all(Vec::is_empty)
    }
}

/// Project every item through the schema's accessors. Pure in `items`; does
/// not look at filter state.
pub fn extract<I>(schema: &FilterSchema<I>, items: &[I]) -> FacetOptions {
    let mut options = FacetOptions::default();
    for (_, field) in schema.fields() {
        let name = field.name().to_string();
        match &field.source {
            Source::Categorical(source) => {
                let distinct: BTreeSet<FacetValue> = items
                    .iter()
                    .filter_map(|item| project(source, item))
                    .collect();
                options.values.insert(name, distinct.into_iter().collect());
            }
            Source::Range { value, .. } => {
                let observed = items.iter().filter_map(|item| value(item)).filter(|v| !v.is_nan());
                let bounds = observed.fold(None, |acc: Option<(f64, f64)>, v| match acc {
                    None => Some((v, v)),
                    Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                });
                if let Some(range) = bounds.and_then(|(lo, hi)| NumericRange::new(lo, hi).ok()) {
                    options.bounds.insert(name, range);
                }
            }
            Source::TriState(value) => {
                let seen: BTreeSet<bool> = items.iter().filter_map(|item| value(item)).collect();
                options.flags.insert(name, seen.into_iter().collect());
            }
            Source::Text(_) | Source::Rating { .. } => {}
        }
    }
    tracing::debug!(items = items.len(), "facets extracted");
    options
}

fn project<I>(source: &FacetSource<I>, item: &I) -> Option<FacetValue> {
    let value = match source {
        FacetSource::Text(get) => FacetValue::text(get(item)?.trim()),
        FacetSource::Number(get) => FacetValue::Number(get(item)?),
    };
    (!value.is_blank()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CategoricalField, RangeField, TriStateField};

    struct Tour {
        location: Option<String>,
        days: Option<i64>,
        price: Option<f64>,
        guided: Option<bool>,
    }

    fn tour(location: Option<&str>, days: Option<i64>, price: Option<f64>, guided: Option<bool>) -> Tour {
        Tour { location: location.map(str::to_string), days, price, guided }
    }

    fn schema() -> FilterSchema<Tour> {
        let mut b = FilterSchema::<Tour>::builder();
        b.add(CategoricalField::text("location", |t: &Tour| t.location.as_deref()));
        b.add(CategoricalField::number("duration", |t: &Tour| t.days));
        b.add(RangeField::new("price", NumericRange::new(0.0, 5000.0).unwrap(), |t: &Tour| t.price));
        b.add(TriStateField::new("guided", |t: &Tour| t.guided));
        b.build().unwrap()
    }

    #[test]
    fn blank_and_missing_values_are_excluded() {
        let items = vec![
            tour(Some("Ella"), Some(3), Some(120.0), Some(true)),
            tour(Some(""), None, None, None),
            tour(None, Some(1), Some(80.0), None),
            tour(Some("  "), Some(3), None, Some(true)),
        ];
        let facets = extract(&schema(), &items);
        assert_eq!(facets.values("location"), &[FacetValue::text("Ella")]);
        assert_eq!(facets.values("duration"), &[FacetValue::Number(1), FacetValue::Number(3)]);
        assert_eq!(facets.bounds("price"), Some(NumericRange::new(80.0, 120.0).unwrap()));
        assert_eq!(facets.flags("guided"), &[true]);
    }

    #[test]
    fn durations_sort_numerically() {
        let items = vec![
            tour(None, Some(10), None, None),
            tour(None, Some(2), None, None),
            tour(None, Some(7), None, None),
        ];
        let facets = extract(&schema(), &items);
        assert_eq!(
            facets.values("duration"),
            &[FacetValue::Number(2), FacetValue::Number(7), FacetValue::Number(10)]
        );
    }

    #[test]
    fn empty_collection_yields_empty_facets() {
        let facets = extract(&schema(), &[]);
        assert!(facets.is_empty());
        assert!(facets.values("location").is_empty());
        assert_eq!(facets.bounds("price"), None);
        assert!(facets.values("no-such-field").is_empty());
    }
}
