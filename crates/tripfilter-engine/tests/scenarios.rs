use std::sync::Arc;

use tripfilter_core::{FacetValue, NumericRange};
use tripfilter_engine::{
    kind, CatalogView, CategoricalField, FieldKey, FilterSchema, RangeField, RatingField, TextField, TriStateField,
};

#[derive(Debug, Clone)]
struct Hotel {
    name: String,
    description: String,
    location: String,
    min_price: f64,
    stars: f64,
    wifi_available: Option<bool>,
}

fn hotel(name: &str, location: &str, min_price: f64) -> Hotel {
    Hotel {
        name: name.to_string(),
        description: String::new(),
        location: location.to_string(),
        min_price,
        stars: 3.0,
        wifi_available: None,
    }
}

struct Keys {
    search: FieldKey<kind::Text>,
    price: FieldKey<kind::Range>,
    location: FieldKey<kind::Categorical>,
    stars: FieldKey<kind::Rating>,
    wifi: FieldKey<kind::TriState>,
}

fn view(items: Vec<Hotel>) -> (CatalogView<Hotel>, Keys) {
    let mut b = FilterSchema::<Hotel>::builder();
    let keys = Keys {
        search: b.add(
            TextField::new("search")
                .searching(|h: &Hotel| Some(h.name.as_str()))
                .searching(|h: &Hotel| Some(h.description.as_str())),
        ),
        price: b.add(
            RangeField::new("priceRange", NumericRange::new(0.0, 1000.0).unwrap(), |h: &Hotel| Some(h.min_price))
                .title("Price")
                .step(10.0),
        ),
        location: b.add(CategoricalField::text("location", |h: &Hotel| Some(h.location.as_str())).title("Location")),
        stars: b.add(RatingField::new("starRating", |h: &Hotel| Some(h.stars)).label(|n| format!("{}+ Stars", n))),
        wifi: b.add(TriStateField::new("hasWifi", |h: &Hotel| h.wifi_available).title("WiFi")),
    };
    (CatalogView::with_items(b.build().unwrap(), items), keys)
}

fn visible_names(view: &CatalogView<Hotel>) -> Vec<String> {
    view.visible().map(|h| h.name.clone()).collect()
}

#[test]
fn price_range_keeps_affordable_hotels_in_order() {
    let (mut v, keys) = view(vec![
        hotel("Sea Breeze", "Galle", 80.0),
        hotel("Temple View", "Kandy", 150.0),
        hotel("Grand Colombo", "Colombo", 400.0),
    ]);
    assert!(v.set(keys.price, NumericRange::new(0.0, 200.0).unwrap()));
    assert_eq!(visible_names(&v), vec!["Sea Breeze", "Temple View"]);
    assert_eq!(v.chips()[0].label, "Price: 0 – 200");
}

#[test]
fn location_facet_is_sorted_and_deduplicated() {
    let (v, _) = view(vec![
        hotel("A", "Colombo", 10.0),
        hotel("B", "Kandy", 10.0),
        hotel("C", "Colombo", 10.0),
    ]);
    assert_eq!(
        v.facets().values("location"),
        &[FacetValue::text("Colombo"), FacetValue::text("Kandy")]
    );
}

#[test]
fn clicking_the_same_star_twice_clears_the_rating() {
    let (mut v, keys) = view(vec![hotel("A", "Galle", 10.0)]);
    v.click_rating(keys.stars, 4);
    assert_eq!(v.get(keys.stars), Some(&4));
    assert_eq!(v.chips().len(), 1);
    assert_eq!(v.chips()[0].label, "4+ Stars");

    v.click_rating(keys.stars, 4);
    assert_eq!(v.get(keys.stars), Some(&0));
    assert!(v.chips().iter().all(|c| c.field != "starRating"));
}

#[test]
fn wifi_tri_state_cycle() {
    let mut with_wifi = hotel("Connected", "Galle", 50.0);
    with_wifi.wifi_available = Some(true);
    let mut without = hotel("Offline", "Galle", 50.0);
    without.wifi_available = Some(false);
    let unknown = hotel("Unknown", "Galle", 50.0);
    let (mut v, keys) = view(vec![with_wifi, without, unknown]);

    v.set(keys.wifi, Some(true));
    assert_eq!(visible_names(&v), vec!["Connected"]);
    v.set(keys.wifi, Some(false));
    assert_eq!(visible_names(&v), vec!["Offline"]);
    v.reset(keys.wifi);
    assert_eq!(v.visible_count(), 3);
}

#[test]
fn search_and_location_compose_with_and() {
    let mut galle_beach = hotel("Beach House", "Galle", 90.0);
    galle_beach.description = "Steps from the beach".to_string();
    let kandy_beach = hotel("Beach Club", "Kandy", 90.0);
    let galle_fort = hotel("Fort Stay", "Galle", 90.0);
    let (mut v, keys) = view(vec![galle_beach, kandy_beach, galle_fort]);

    v.set(keys.search, "beach".to_string());
    v.set(keys.location, Some(FacetValue::text("Galle")));
    assert_eq!(visible_names(&v), vec!["Beach House"]);
}

#[test]
fn empty_collection_filters_to_nothing() {
    let (mut v, keys) = view(Vec::new());
    assert!(v.facets().values("location").is_empty());
    assert_eq!(v.visible_count(), 0);

    v.set(keys.search, "anything".to_string());
    v.set(keys.wifi, Some(true));
    assert_eq!(v.visible_count(), 0);
    assert!(v.facets().is_empty());
}

#[test]
fn facets_are_only_recomputed_when_the_collection_changes() {
    let (mut v, keys) = view(vec![hotel("A", "Colombo", 10.0)]);
    let before = v.facets();

    v.set(keys.location, Some(FacetValue::text("Colombo")));
    v.click_rating(keys.stars, 2);
    assert!(Arc::ptr_eq(&before, &v.facets()));

    v.replace_items(vec![hotel("B", "Ella", 20.0), hotel("C", "Colombo", 30.0)]);
    assert!(!Arc::ptr_eq(&before, &v.facets()));
    assert_eq!(v.generation(), 1);
    assert_eq!(
        v.facets().values("location"),
        &[FacetValue::text("Colombo"), FacetValue::text("Ella")]
    );
    // The location filter survived the reload and applies to the new items.
    assert_eq!(visible_names(&v), vec!["C"]);
}

#[test]
fn slider_only_moves_the_upper_bound() {
    let (mut v, keys) = view(vec![hotel("A", "Galle", 80.0), hotel("B", "Galle", 260.0)]);
    v.slide_upper(keys.price, 203.0);
    let range = *v.get(keys.price).unwrap();
    assert_eq!(range.lower(), 0.0);
    assert_eq!(range.upper(), 200.0);
    assert_eq!(visible_names(&v), vec!["A"]);

    v.slide_upper(keys.price, 5000.0);
    assert_eq!(v.get(keys.price).unwrap().upper(), 1000.0);
    assert!(v.chips().is_empty(), "ceiling is the default, so no chip");
}

#[test]
fn removing_a_chip_matches_resetting_the_field() {
    let (mut v, keys) = view(vec![hotel("A", "Galle", 80.0), hotel("B", "Kandy", 90.0)]);
    v.set(keys.location, Some(FacetValue::text("Kandy")));
    v.set(keys.search, "a".to_string());

    let chip = v.chips().iter().find(|c| c.field == "location").cloned().unwrap();
    v.remove(chip.remove);
    let after_chip = v.state();
    let visible_after_chip = visible_names(&v);

    v.set(keys.location, Some(FacetValue::text("Kandy")));
    v.reset(keys.location);
    assert_eq!(v.state(), after_chip);
    assert_eq!(visible_names(&v), visible_after_chip);
}

#[test]
fn reset_all_clears_every_chip() {
    let (mut v, keys) = view(vec![hotel("A", "Galle", 80.0)]);
    v.set(keys.search, "zzz".to_string());
    v.set(keys.wifi, Some(false));
    assert_eq!(v.visible_count(), 0);

    assert!(v.reset_all());
    assert!(v.chips().is_empty());
    assert_eq!(v.visible_count(), 1);
}

#[test]
fn set_parsed_reports_unknown_fields_and_bad_values() {
    let (mut v, _) = view(vec![hotel("A", "Galle", 80.0)]);
    assert!(v.set_parsed("priceRange", "0..50").unwrap());
    assert_eq!(v.visible_count(), 0);
    assert!(v.set_parsed("pets", "yes").is_err());
    assert!(v.set_parsed("hasWifi", "sometimes").is_err());
}

#[test]
fn dragging_to_the_end_restores_the_full_range_with_an_off_grid_step() {
    let mut b = FilterSchema::<Hotel>::builder();
    let price = b.add(
        RangeField::new("price", NumericRange::new(0.0, 1000.0).unwrap(), |h: &Hotel| Some(h.min_price)).step(30.0),
    );
    let mut v = CatalogView::with_items(b.build().unwrap(), vec![hotel("Cliff Top", "Ella", 995.0)]);

    v.slide_upper(price, 500.0);
    assert_eq!(v.visible_count(), 0);
    assert_eq!(v.chips().len(), 1);

    v.slide_upper(price, 1000.0);
    assert_eq!(v.get(price), Some(&NumericRange::new(0.0, 1000.0).unwrap()));
    assert_eq!(v.visible_count(), 1);
    assert!(v.chips().is_empty());
}
