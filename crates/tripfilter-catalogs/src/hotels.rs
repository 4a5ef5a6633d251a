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
pub struct Room {
    pub room_type: String,
    pub price_per_night: Option<f64>,
}

/// Cheapest priced room, ignoring rooms without a usable price.
pub fn min_room_price(rooms: &[Room]) -> Option<f64> {
    rooms
        .iter()
        .filter_map(|r| r.price_per_night)
        .filter(|p| p.is_finite())
        .reduce(f64::min)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub hotel_type: Option<String>,
    pub star_rating: Option<f64>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    pub wifi_available: Option<bool>,
    pub pool_available: Option<bool>,
    pub parking_available: Option<bool>,
}

/// A hotel's price for filtering: its cheapest nightly room rate.
pub fn min_nightly_price(hotel: &Hotel) -> Option<f64> {
    min_room_price(&hotel.rooms)
}

pub struct HotelFilters {
    pub search: FieldKey<kind::Text>,
    pub price_range: FieldKey<kind::Range>,
    pub location: FieldKey<kind::Categorical>,
    pub hotel_type: FieldKey<kind::Categorical>,
    pub star_rating: FieldKey<kind::Rating>,
    pub has_wifi: FieldKey<kind::TriState>,
    pub has_pool: FieldKey<kind::TriState>,
    pub has_parking: FieldKey<kind::TriState>,
}

pub struct Hotels;

impl Catalog for Hotels {
    type Item = Hotel;
    type Keys = HotelFilters;

    const NAME: &'static str = "hotels";
    const DEFAULT_RANGE: RangeSettings = RangeSettings::new(0.0, 1000.0, 10.0);

    fn schema(range: RangeSettings, max_stars: u8) -> Result<(FilterSchema<Hotel>, HotelFilters)> {
        let mut b = FilterSchema::<Hotel>::builder();
        let keys = HotelFilters {
            search: b.add(
                TextField::new("search")
                    .title("Search")
                    .searching(|h: &Hotel| Some(h.name.as_str()))
                    .searching(|h: &Hotel| h.description.as_deref())
                    .searching(|h: &Hotel| h.address.as_deref()),
            ),
            price_range: b.add(
                RangeField::new("priceRange", price_bounds(range)?, min_nightly_price)
                    .title("Price")
                    .step(range.step),
            ),
            location: b.add(CategoricalField::text("location", |h: &Hotel| h.location.as_deref()).title("Location")),
            hotel_type: b.add(CategoricalField::text("hotelType", |h: &Hotel| h.hotel_type.as_deref()).title("Type")),
            star_rating: b.add(
                RatingField::new("starRating", |h: &Hotel| h.star_rating)
                    .max_stars(max_stars)
                    .label(|n| format!("{}+ Stars", n)),
            ),
            has_wifi: b.add(TriStateField::new("hasWifi", |h: &Hotel| h.wifi_available).title("WiFi")),
            has_pool: b.add(TriStateField::new("hasPool", |h: &Hotel| h.pool_available).title("Pool")),
            has_parking: b.add(TriStateField::new("hasParking", |h: &Hotel| h.parking_available).title("Parking")),
        };
        Ok((b.build()?, keys))
    }

    fn title(item: &Hotel) -> &str {
        &item.name
    }
}
