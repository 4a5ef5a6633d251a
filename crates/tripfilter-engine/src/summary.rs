//! Active filter summary: one removable chip per non-default field.

use serde::Serialize;

use crate::schema::{FieldId, FilterSchema};
use crate::store::FilterStore;

/// Resets exactly one field when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoveAction {
    field: FieldId,
}

impl RemoveAction {
    pub fn field(&self) -> FieldId {
        self.field
    }

    pub fn apply(&self, store: &mut FilterStore) -> bool {
        store.reset_field(self.field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilterChip {
    pub field: String,
    pub label: String,
    #[serde(skip)]
    pub remove: RemoveAction,
}

/// Chips for every field whose value differs from its default, in
/// declaration order. No active fields means no chips.
pub fn summarize<I>(schema: &FilterSchema<I>, store: &FilterStore) -> Vec<ActiveFilterChip> {
    schema
        .fields()
        .filter(|(id, _)| !store.is_default(*id))
        .filter_map(|(id, field)| {
            let value = store.value(id)?;
            Some(ActiveFilterChip {
                field: field.name().to_string(),
                label: field.label(value),
                remove: RemoveAction { field: id },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CategoricalField, RatingField, TextField, TriStateField};
    use tripfilter_core::FacetValue;

    struct Villa {
        name: String,
    }

    #[test]
    fn chips_follow_declaration_order_not_click_order() {
        let mut b = FilterSchema::<Villa>::builder();
        let search = b.add(TextField::new("search").title("Search").searching(|v: &Villa| Some(v.name.as_str())));
        let location = b.add(CategoricalField::text("location", |_: &Villa| None).title("Location"));
        let pool = b.add(TriStateField::new("privatePool", |_: &Villa| None).title("Private pool"));
        let rating = b.add(RatingField::new("rating", |_: &Villa| None).label(|n| format!("{}+ Stars", n)));
        let schema = b.build().unwrap();
        let mut store = FilterStore::new(&schema);

        assert!(summarize(&schema, &store).is_empty());

        store.set(rating, 4);
        store.set(pool, Some(true));
        store.set(location, Some(FacetValue::text("Galle")));
        store.set(search, "sea view".to_string());

        let chips = summarize(&schema, &store);
        let labels: Vec<_> = chips.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Search: \"sea view\"", "Location: Galle", "Private pool: Yes", "4+ Stars"]
        );

        assert!(chips[1].remove.apply(&mut store));
        let fields: Vec<_> = summarize(&schema, &store).into_iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["search", "privatePool", "rating"]);
        assert_eq!(store.get(location), Some(&None));
    }
}
