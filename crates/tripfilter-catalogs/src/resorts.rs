use serde::{Deserialize, Serialize};

use tripfilter_core::config::RangeSettings;
use tripfilter_core::Result;
use tripfilter_engine::{
    kind, CategoricalField, FieldKey, FilterSchema, RangeField, RatingField, TextField, TriStateField,
};

use crate::hotels::{min_room_price, Room};
use crate::price_bounds;
use crate::traits::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resort {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub resort_type: Option<String>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    pub rating: Option<f64>,
    pub spa_available: Option<bool>,
    pub pool_available: Option<bool>,
    pub all_inclusive: Option<bool>,
}

pub struct ResortFilters {
    pub search: FieldKey<kind::Text>,
    pub price_range: FieldKey<kind::Range>,
    pub location: FieldKey<kind::Categorical>,
    pub resort_type: FieldKey<kind::Categorical>,
    pub rating: FieldKey<kind::Rating>,
    pub has_spa: FieldKey<kind::TriState>,
    pub has_pool: FieldKey<kind::TriState>,
    pub all_inclusive: FieldKey<kind::TriState>,
}

pub struct Resorts;

impl Catalog for Resorts {
    type Item = Resort;
    type Keys = ResortFilters;

    const NAME: &'static str = "resorts";
    const DEFAULT_RANGE: RangeSettings = RangeSettings::new(0.0, 1500.0, 10.0);

    fn schema(range: RangeSettings, max_stars: u8) -> Result<(FilterSchema<Resort>, ResortFilters)> {
        let mut b = FilterSchema::<Resort>::builder();
        let keys = ResortFilters {
            search: b.add(
                TextField::new("search")
                    .title("Search")
                    .searching(|r: &Resort| Some(r.name.as_str()))
                    .searching(|r: &Resort| r.description.as_deref()),
            ),
            price_range: b.add(
                RangeField::new("priceRange", price_bounds(range)?, |r: &Resort| min_room_price(&r.rooms))
                    .title("Price")
                    .step(range.step),
            ),
            location: b.add(CategoricalField::text("location", |r: &Resort| r.location.as_deref()).title("Location")),
            resort_type: b.add(CategoricalField::text("resortType", |r: &Resort| r.resort_type.as_deref()).title("Type")),
            rating: b.add(RatingField::new("rating", |r: &Resort| r.rating).title("Rating").max_stars(max_stars)),
            has_spa: b.add(TriStateField::new("hasSpa", |r: &Resort| r.spa_available).title("Spa")),
            has_pool: b.add(TriStateField::new("hasPool", |r: &Resort| r.pool_available).title("Pool")),
            all_inclusive: b.add(TriStateField::new("allInclusive", |r: &Resort| r.all_inclusive).title("All inclusive")),
        };
        Ok((b.build()?, keys))
    }

    fn title(item: &Resort) -> &str {
        &item.name
    }
}
