//! Predicate pipeline: narrows a collection to the items that satisfy every
//! active filter.

use tripfilter_core::types::FilterValue;

use crate::schema::{FacetSource, FieldSpec, FilterSchema, Source};
use crate::store::FilterStore;

pub type Predicate<'a, I> = Box<dyn Fn(&I) -> bool + 'a>;

impl<I> FieldSpec<I> {
    /// The inclusion test for `value`, or `None` when `value` filters nothing.
    pub(crate) fn predicate<'a>(&'a self, value: &'a FilterValue) -> Option<Predicate<'a, I>> {
        if value == self.default_value() {
            return None;
        }
        match (&self.source, value) {
            (Source::Text(searchable), FilterValue::Text(query)) => {
                if query.is_empty() {
                    return None;
                }
                let needle = query.to_lowercase();
                Some(Box::new(move |item: &I| {
                    searchable
                        .iter()
                        .filter_map(|get| get(item))
                        .any(|text| text.to_lowercase().contains(&needle))
                }))
            }
            (Source::Range { value: get, .. }, FilterValue::Range(range)) => {
                Some(Box::new(move |item: &I| get(item).is_some_and(|v| range.contains(v))))
            }
            (Source::Categorical(source), FilterValue::Category(Some(wanted))) => match source {
                FacetSource::Text(get) => {
                    Some(Box::new(move |item: &I| get(item).is_some_and(|v| wanted.matches_text(v))))
                }
                FacetSource::Number(get) => {
                    Some(Box::new(move |item: &I| get(item).is_some_and(|v| wanted.matches_number(v))))
                }
            },
            (Source::TriState(get), FilterValue::Toggle(Some(expected))) => {
                let expected = *expected;
                Some(Box::new(move |item: &I| get(item) == Some(expected)))
            }
            (Source::Rating { value: get, .. }, FilterValue::MinRating(min)) => {
                if *min == 0 {
                    return None;
                }
                let min = f64::from(*min);
                Some(Box::new(move |item: &I| get(item).is_some_and(|r| r >= min)))
            }
            // Category(None) and Toggle(None) are "don't filter"; a kind
            // mismatch cannot get past the store.
            _ => None,
        }
    }
}

trait FacetMatch {
    fn matches_text(&self, value: &str) -> bool;
    fn matches_number(&self, value: i64) -> bool;
}

impl FacetMatch for tripfilter_core::FacetValue {
    fn matches_text(&self, value: &str) -> bool {
        matches!(self, tripfilter_core::FacetValue::Text(s) if s == value.trim())
    }

    fn matches_number(&self, value: i64) -> bool {
        matches!(self, tripfilter_core::FacetValue::Number(n) if *n == value)
    }
}

/// The conjunction of one predicate per active field, compiled against a
/// store at one revision.
pub struct Pipeline<'a, I> {
    predicates: Vec<(&'a str, Predicate<'a, I>)>,
}

impl<'a, I> Pipeline<'a, I> {
    pub fn compile(schema: &'a FilterSchema<I>, store: &'a FilterStore) -> Self {
        let predicates: Vec<_> = schema
            .fields()
            .filter_map(|(id, field)| {
                let value = store.value(id)?;
                let predicate = field.predicate(value)?;
                tracing::trace!(field = field.name(), "predicate compiled");
                Some((field.name(), predicate))
            })
            .collect();
        Self { predicates }
    }

    /// Names of the fields contributing a predicate, in declaration order.
    pub fn active(&self) -> impl Iterator<Item = &str> + '_ {
        self.predicates.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, item: &I) -> bool {
        self.predicates.iter().all(|(_, p)| p(item))
    }

    /// Matching items, in source order.
    pub fn apply<'i>(&self, items: &'i [I]) -> Vec<&'i I> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    /// Positions of matching items in `items`, ascending.
    pub fn indices(&self, items: &[I]) -> Vec<usize> {
        let out: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(item))
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            active = self.predicates.len(),
            total = items.len(),
            visible = out.len(),
            "pipeline applied"
        );
        out
    }

    pub fn count(&self, items: &[I]) -> usize {
        items.iter().filter(|item| self.matches(item)).count()
    }
}

/// Filter `items` by every active field of `store`.
pub fn filter<'i, I>(schema: &FilterSchema<I>, store: &FilterStore, items: &'i [I]) -> Vec<&'i I> {
    Pipeline::compile(schema, store).apply(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{kind, CategoricalField, FieldKey, RangeField, RatingField, TextField, TriStateField};
    use tripfilter_core::types::{FacetValue, NumericRange};

    #[derive(Debug, PartialEq)]
    struct Hotel {
        name: &'static str,
        address: Option<&'static str>,
        location: &'static str,
        price: Option<f64>,
        stars: f64,
        wifi: Option<bool>,
    }

    struct Keys {
        search: FieldKey<kind::Text>,
        price: FieldKey<kind::Range>,
        location: FieldKey<kind::Categorical>,
        stars: FieldKey<kind::Rating>,
        wifi: FieldKey<kind::TriState>,
    }

    fn schema() -> (FilterSchema<Hotel>, Keys) {
        let mut b = FilterSchema::<Hotel>::builder();
        let keys = Keys {
            search: b.add(
                TextField::new("search")
                    .searching(|h: &Hotel| Some(h.name))
                    .searching(|h: &Hotel| h.address),
            ),
            price: b.add(RangeField::new("priceRange", NumericRange::new(0.0, 1000.0).unwrap(), |h: &Hotel| h.price)),
            location: b.add(CategoricalField::text("location", |h: &Hotel| Some(h.location))),
            stars: b.add(RatingField::new("starRating", |h: &Hotel| Some(h.stars))),
            wifi: b.add(TriStateField::new("hasWifi", |h: &Hotel| h.wifi)),
        };
        (b.build().unwrap(), keys)
    }

    fn hotels() -> Vec<Hotel> {
        vec![
            Hotel { name: "Beach Palace", address: None, location: "Galle", price: Some(80.0), stars: 4.5, wifi: Some(true) },
            Hotel { name: "Hill Lodge", address: Some("12 Beach Rd"), location: "Kandy", price: Some(150.0), stars: 3.0, wifi: Some(false) },
            Hotel { name: "City Grand", address: None, location: "Colombo", price: Some(400.0), stars: 5.0, wifi: None },
            Hotel { name: "Nowhere Inn", address: None, location: "Galle", price: None, stars: 2.0, wifi: Some(true) },
        ]
    }

    fn names(v: &[&Hotel]) -> Vec<&'static str> {
        v.iter().map(|h| h.name).collect()
    }

    #[test]
    fn defaults_compile_no_predicates() {
        let (schema, _) = schema();
        let store = FilterStore::new(&schema);
        let pipeline = Pipeline::compile(&schema, &store);
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.count(&hotels()), 4);
    }

    #[test]
    fn text_matches_any_attribute_case_insensitively() {
        let (schema, keys) = schema();
        let mut store = FilterStore::new(&schema);
        store.set(keys.search, "BEACH".to_string());
        let items = hotels();
        assert_eq!(names(&filter(&schema, &store, &items)), vec!["Beach Palace", "Hill Lodge"]);
    }

    #[test]
    fn range_is_inclusive_and_excludes_unpriced() {
        let (schema, keys) = schema();
        let mut store = FilterStore::new(&schema);
        store.set(keys.price, NumericRange::new(80.0, 150.0).unwrap());
        let items = hotels();
        assert_eq!(names(&filter(&schema, &store, &items)), vec!["Beach Palace", "Hill Lodge"]);
    }

    #[test]
    fn rating_threshold() {
        let (schema, keys) = schema();
        let mut store = FilterStore::new(&schema);
        store.set(keys.stars, 4);
        let items = hotels();
        assert_eq!(names(&filter(&schema, &store, &items)), vec!["Beach Palace", "City Grand"]);
    }

    #[test]
    fn tri_state_requires_exact_flag() {
        let (schema, keys) = schema();
        let mut store = FilterStore::new(&schema);
        let items = hotels();

        store.set(keys.wifi, Some(false));
        assert_eq!(names(&filter(&schema, &store, &items)), vec!["Hill Lodge"]);
        store.set(keys.wifi, None);
        assert_eq!(filter(&schema, &store, &items).len(), 4);
    }

    #[test]
    fn fields_combine_with_and() {
        let (schema, keys) = schema();
        let mut store = FilterStore::new(&schema);
        store.set(keys.location, Some(FacetValue::text("Galle")));
        store.set(keys.wifi, Some(true));
        store.set(keys.stars, 3);
        let items = hotels();
        let pipeline = Pipeline::compile(&schema, &store);
        assert_eq!(pipeline.active().collect::<Vec<_>>(), vec!["location", "starRating", "hasWifi"]);
        assert_eq!(pipeline.indices(&items), vec![0]);
    }
}
