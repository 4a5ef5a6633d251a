//! Travel catalogs (hotels, villas, resorts, vehicles, destinations, tours)
//! declared against the filter engine, plus loading their collections from
//! JSON files.
#![deny(unused_imports)]

pub mod destinations;
pub mod hotels;
pub mod loader;
pub mod resorts;
pub mod tours;
pub mod traits;
pub mod vehicles;
pub mod villas;

use std::fmt;
use std::str::FromStr;

use tripfilter_core::config::{Config, RangeSettings};
use tripfilter_core::{Error, NumericRange, Result};
use tripfilter_engine::CatalogView;

pub use destinations::{Destination, Destinations};
pub use hotels::{Hotel, Hotels};
pub use loader::CollectionLoader;
pub use resorts::{Resort, Resorts};
pub use tours::{Tour, Tours};
pub use traits::Catalog;
pub use vehicles::{Vehicle, Vehicles};
pub use villas::{Villa, Villas};

/// The price slider's default value: the whole configured span.
pub fn price_bounds(range: RangeSettings) -> Result<NumericRange> {
    NumericRange::new(range.floor, range.ceiling)
}

/// Build a catalog's view over `items` with the configured slider bounds
/// and star maximum.
pub fn open<C: Catalog>(config: &Config, items: Vec<C::Item>) -> Result<(CatalogView<C::Item>, C::Keys)> {
    let range = config.range_for(C::NAME, C::DEFAULT_RANGE);
    let (schema, keys) = C::schema(range, config.max_stars())?;
    Ok((CatalogView::with_items(schema, items), keys))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Hotels,
    Villas,
    Resorts,
    Vehicles,
    Destinations,
    Tours,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 6] = [
        CatalogKind::Hotels,
        CatalogKind::Villas,
        CatalogKind::Resorts,
        CatalogKind::Vehicles,
        CatalogKind::Destinations,
        CatalogKind::Tours,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CatalogKind::Hotels => Hotels::NAME,
            CatalogKind::Villas => Villas::NAME,
            CatalogKind::Resorts => Resorts::NAME,
            CatalogKind::Vehicles => Vehicles::NAME,
            CatalogKind::Destinations => Destinations::NAME,
            CatalogKind::Tours => Tours::NAME,
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        CatalogKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| Error::UnknownCatalog(s.to_string()))
    }
}
