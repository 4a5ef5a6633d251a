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
pub struct Tour {
    pub title: String,
    pub description: Option<String>,
    pub destination: Option<String>,
    pub tour_type: Option<String>,
    pub duration_days: Option<u32>,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub guide_included: Option<bool>,
    pub meals_included: Option<bool>,
}

pub struct TourFilters {
    pub search: FieldKey<kind::Text>,
    pub price_range: FieldKey<kind::Range>,
    pub destination: FieldKey<kind::Categorical>,
    pub tour_type: FieldKey<kind::Categorical>,
    pub duration: FieldKey<kind::Categorical>,
    pub rating: FieldKey<kind::Rating>,
    pub guide_included: FieldKey<kind::TriState>,
    pub meals_included: FieldKey<kind::TriState>,
}

pub struct Tours;

impl Catalog for Tours {
    type Item = Tour;
    type Keys = TourFilters;

    const NAME: &'static str = "tours";
    const DEFAULT_RANGE: RangeSettings = RangeSettings::new(0.0, 2000.0, 25.0);

    fn schema(range: RangeSettings, max_stars: u8) -> Result<(FilterSchema<Tour>, TourFilters)> {
        let mut b = FilterSchema::<Tour>::builder();
        let keys = TourFilters {
            search: b.add(
                TextField::new("search")
                    .title("Search")
                    .searching(|t: &Tour| Some(t.title.as_str()))
                    .searching(|t: &Tour| t.description.as_deref())
                    .searching(|t: &Tour| t.destination.as_deref()),
            ),
            price_range: b.add(
                RangeField::new("priceRange", price_bounds(range)?, |t: &Tour| t.price)
                    .title("Price")
                    .step(range.step),
            ),
            destination: b.add(
                CategoricalField::text("destination", |t: &Tour| t.destination.as_deref()).title("Destination"),
            ),
            tour_type: b.add(CategoricalField::text("tourType", |t: &Tour| t.tour_type.as_deref()).title("Type")),
            duration: b.add(
                CategoricalField::number("duration", |t: &Tour| t.duration_days.map(i64::from)).label(|d| match d {
                    Some(d) => format!("{} Days", d),
                    None => "Any duration".to_string(),
                }),
            ),
            rating: b.add(RatingField::new("rating", |t: &Tour| t.rating).title("Rating").max_stars(max_stars)),
            guide_included: b.add(
                TriStateField::new("guideIncluded", |t: &Tour| t.guide_included).title("Guide included"),
            ),
            meals_included: b.add(
                TriStateField::new("mealsIncluded", |t: &Tour| t.meals_included).title("Meals included"),
            ),
        };
        Ok((b.build()?, keys))
    }

    fn title(item: &Tour) -> &str {
        &item.title
    }
}
