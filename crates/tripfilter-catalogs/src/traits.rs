use serde::de::DeserializeOwned;
use serde::Serialize;

use tripfilter_core::config::RangeSettings;
use tripfilter_core::Result;
use tripfilter_engine::FilterSchema;

/// A catalog page type: its item shape, its filter fields and the accessors
/// that read them.
pub trait Catalog {
    type Item: DeserializeOwned + Serialize;
    type Keys;

    /// Collection name, also the data file stem and config key.
    const NAME: &'static str;
    const DEFAULT_RANGE: RangeSettings;

    fn schema(range: RangeSettings, max_stars: u8) -> Result<(FilterSchema<Self::Item>, Self::Keys)>;

    /// Heading shown for an item in listings.
    fn title(item: &Self::Item) -> &str;
}
