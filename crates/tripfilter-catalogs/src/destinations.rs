use serde::{Deserialize, Serialize};

use tripfilter_core::config::RangeSettings;
use tripfilter_core::Result;
use tripfilter_engine::{
    kind, CategoricalField, FieldKey, FilterSchema, RangeField, RatingField, TextField, TriStateField,
};

use crate::price_bounds;
use crate::traits::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub name: String,
    pub description: Option<String>,
    pub province: Option<String>,
    pub category: Option<String>,
    pub popularity: Option<f64>,
    pub rating: Option<f64>,
    pub family_friendly: Option<bool>,
}

/// Destinations carry no price of their own. Until the backend supplies
/// one, the price filter ranks them by an estimate from popularity and
/// rating.
// TODO: switch to the backend's entry fee once the destinations endpoint exposes it.
pub fn estimated_price(destination: &Destination) -> Option<f64> {
    Some(destination.popularity? * destination.rating? * 10.0)
}

pub struct DestinationFilters {
    pub search: FieldKey<kind::Text>,
    pub price_range: FieldKey<kind::Range>,
    pub province: FieldKey<kind::Categorical>,
    pub category: FieldKey<kind::Categorical>,
    pub rating: FieldKey<kind::Rating>,
    pub family_friendly: FieldKey<kind::TriState>,
}

pub struct Destinations;

impl Catalog for Destinations {
    type Item = Destination;
    type Keys = DestinationFilters;

    const NAME: &'static str = "destinations";
    const DEFAULT_RANGE: RangeSettings = RangeSettings::new(0.0, 500.0, 10.0);

    fn schema(range: RangeSettings, max_stars: u8) -> Result<(FilterSchema<Destination>, DestinationFilters)> {
        let mut b = FilterSchema::<Destination>::builder();
        let keys = DestinationFilters {
            search: b.add(
                TextField::new("search")
                    .title("Search")
                    .searching(|d: &Destination| Some(d.name.as_str()))
                    .searching(|d: &Destination| d.description.as_deref()),
            ),
            price_range: b.add(
                RangeField::new("priceRange", price_bounds(range)?, estimated_price)
                    .title("Price")
                    .step(range.step),
            ),
            province: b.add(
                CategoricalField::text("province", |d: &Destination| d.province.as_deref()).title("Province"),
            ),
            category: b.add(
                CategoricalField::text("category", |d: &Destination| d.category.as_deref()).title("Category"),
            ),
            rating: b.add(
                RatingField::new("rating", |d: &Destination| d.rating).title("Rating").max_stars(max_stars),
            ),
            family_friendly: b.add(
                TriStateField::new("familyFriendly", |d: &Destination| d.family_friendly).title("Family friendly"),
            ),
        };
        Ok((b.build()?, keys))
    }

    fn title(item: &Destination) -> &str {
        &item.name
    }
}
