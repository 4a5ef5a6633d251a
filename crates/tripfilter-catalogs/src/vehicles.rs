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
pub struct Vehicle {
    pub name: String,
    pub make: Option<String>,
    pub vehicle_type: Option<String>,
    pub location: Option<String>,
    pub seats: Option<u32>,
    pub transmission: Option<String>,
    pub price_per_day: Option<f64>,
    pub rating: Option<f64>,
    pub air_conditioning: Option<bool>,
    pub with_driver: Option<bool>,
}

pub struct VehicleFilters {
    pub search: FieldKey<kind::Text>,
    pub price_range: FieldKey<kind::Range>,
    pub vehicle_type: FieldKey<kind::Categorical>,
    pub location: FieldKey<kind::Categorical>,
    pub seats: FieldKey<kind::Categorical>,
    pub transmission: FieldKey<kind::Categorical>,
    pub rating: FieldKey<kind::Rating>,
    pub air_conditioning: FieldKey<kind::TriState>,
    pub with_driver: FieldKey<kind::TriState>,
}

pub struct Vehicles;

impl Catalog for Vehicles {
    type Item = Vehicle;
    type Keys = VehicleFilters;

    const NAME: &'static str = "vehicles";
    const DEFAULT_RANGE: RangeSettings = RangeSettings::new(0.0, 500.0, 5.0);

    fn schema(range: RangeSettings, max_stars: u8) -> Result<(FilterSchema<Vehicle>, VehicleFilters)> {
        let mut b = FilterSchema::<Vehicle>::builder();
        let keys = VehicleFilters {
            search: b.add(
                TextField::new("search")
                    .title("Search")
                    .searching(|v: &Vehicle| Some(v.name.as_str()))
                    .searching(|v: &Vehicle| v.make.as_deref()),
            ),
            price_range: b.add(
                RangeField::new("priceRange", price_bounds(range)?, |v: &Vehicle| v.price_per_day)
                    .title("Price per day")
                    .step(range.step),
            ),
            vehicle_type: b.add(
                CategoricalField::text("vehicleType", |v: &Vehicle| v.vehicle_type.as_deref()).title("Type"),
            ),
            location: b.add(CategoricalField::text("location", |v: &Vehicle| v.location.as_deref()).title("Location")),
            seats: b.add(
                CategoricalField::number("seats", |v: &Vehicle| v.seats.map(i64::from)).label(|n| match n {
                    Some(n) => format!("{} Seats", n),
                    None => "Any seats".to_string(),
                }),
            ),
            transmission: b.add(
                CategoricalField::text("transmission", |v: &Vehicle| v.transmission.as_deref()).title("Transmission"),
            ),
            rating: b.add(RatingField::new("rating", |v: &Vehicle| v.rating).title("Rating").max_stars(max_stars)),
            air_conditioning: b.add(
                TriStateField::new("airConditioning", |v: &Vehicle| v.air_conditioning).title("Air conditioning"),
            ),
            with_driver: b.add(TriStateField::new("withDriver", |v: &Vehicle| v.with_driver).title("With driver")),
        };
        Ok((b.build()?, keys))
    }

    fn title(item: &Vehicle) -> &str {
        &item.name
    }
}
