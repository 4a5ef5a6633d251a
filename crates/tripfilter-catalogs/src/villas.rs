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
pub struct Villa {
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub villa_type: Option<String>,
    pub bedrooms: Option<u32>,
    pub price_per_night: Option<f64>,
    pub rating: Option<f64>,
    pub private_pool: Option<bool>,
    pub beach_access: Option<bool>,
    pub wifi_available: Option<bool>,
}

pub struct VillaFilters {
    pub search: FieldKey<kind::Text>,
    pub price_range: FieldKey<kind::Range>,
    pub location: FieldKey<kind::Categorical>,
    pub villa_type: FieldKey<kind::Categorical>,
    pub bedrooms: FieldKey<kind::Categorical>,
    pub rating: FieldKey<kind::Rating>,
    pub private_pool: FieldKey<kind::TriState>,
    pub beach_access: FieldKey<kind::TriState>,
    pub has_wifi: FieldKey<kind::TriState>,
}

pub struct Villas;

impl Catalog for Villas {
    type Item = Villa;
    type Keys = VillaFilters;

    const NAME: &'static str = "villas";
    const DEFAULT_RANGE: RangeSettings = RangeSettings::new(0.0, 1000.0, 10.0);

    fn schema(range: RangeSettings, max_stars: u8) -> Result<(FilterSchema<Villa>, VillaFilters)> {
        let mut b = FilterSchema::<Villa>::builder();
        let keys = VillaFilters {
            search: b.add(
                TextField::new("search")
                    .title("Search")
                    .searching(|v: &Villa| Some(v.name.as_str()))
                    .searching(|v: &Villa| v.description.as_deref())
                    .searching(|v: &Villa| v.location.as_deref()),
            ),
            price_range: b.add(
                RangeField::new("priceRange", price_bounds(range)?, |v: &Villa| v.price_per_night)
                    .title("Price")
                    .step(range.step),
            ),
            location: b.add(CategoricalField::text("location", |v: &Villa| v.location.as_deref()).title("Location")),
            villa_type: b.add(CategoricalField::text("villaType", |v: &Villa| v.villa_type.as_deref()).title("Type")),
            bedrooms: b.add(
                CategoricalField::number("bedrooms", |v: &Villa| v.bedrooms.map(i64::from)).label(|n| match n {
                    Some(n) => format!("{} Bedrooms", n),
                    None => "Any bedrooms".to_string(),
                }),
            ),
            rating: b.add(RatingField::new("rating", |v: &Villa| v.rating).title("Rating").max_stars(max_stars)),
            private_pool: b.add(TriStateField::new("privatePool", |v: &Villa| v.private_pool).title("Private pool")),
            beach_access: b.add(TriStateField::new("beachAccess", |v: &Villa| v.beach_access).title("Beach access")),
            has_wifi: b.add(TriStateField::new("hasWifi", |v: &Villa| v.wifi_available).title("WiFi")),
        };
        Ok((b.build()?, keys))
    }

    fn title(item: &Villa) -> &str {
        &item.name
    }
}
