//! Field declarations for one catalog.
//!
//! A catalog declares each filter dimension once: its name, its kind, its
//! default ("inactive") value, how to label it in the summary, and the
//! accessor that reads the attribute from an item. Declaring a field returns a
//! typed [`FieldKey`], so setting a value of the wrong kind does not compile.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use tripfilter_core::types::{FacetValue, FilterKind, FilterValue, NumericRange};
use tripfilter_core::{Error, Result};

use crate::controls::{RangeSlider, RatingLadder};

pub type StrAccessor<I> = Box<dyn for<'a> Fn(&'a I) -> Option<&'a str> + Send + Sync>;
pub type NumberAccessor<I> = Box<dyn Fn(&I) -> Option<f64> + Send + Sync>;
pub type IntAccessor<I> = Box<dyn Fn(&I) -> Option<i64> + Send + Sync>;
pub type FlagAccessor<I> = Box<dyn Fn(&I) -> Option<bool> + Send + Sync>;
pub type Labeler = Box<dyn Fn(&FilterValue) -> String + Send + Sync>;

/// Compile-time markers tying a [`FieldKey`] to the value type its field holds.
pub mod kind {
    use super::{FacetValue, FilterKind, FilterValue, NumericRange};

    pub trait Kind: 'static {
        type Value: Clone + PartialEq + std::fmt::Debug;
        const KIND: FilterKind;
        fn wrap(value: Self::Value) -> FilterValue;
        fn peek(value: &FilterValue) -> Option<&Self::Value>;
    }

    pub enum Text {}
    pub enum Range {}
    pub enum Categorical {}
    pub enum TriState {}
    pub enum Rating {}

    impl Kind for Text {
        type Value = String;
        const KIND: FilterKind = FilterKind::Text;
        fn wrap(value: String) -> FilterValue {
            FilterValue::Text(value)
        }
        fn peek(value: &FilterValue) -> Option<&String> {
            match value {
                FilterValue::Text(v) => Some(v),
                _ => None,
            }
        }
    }

    impl Kind for Range {
        type Value = NumericRange;
        const KIND: FilterKind = FilterKind::NumericRange;
        fn wrap(value: NumericRange) -> FilterValue {
            FilterValue::Range(value)
        }
        fn peek(value: &FilterValue) -> Option<&NumericRange> {
            match value {
                FilterValue::Range(v) => Some(v),
                _ => None,
            }
        }
    }

    impl Kind for Categorical {
        type Value = Option<FacetValue>;
        const KIND: FilterKind = FilterKind::Categorical;
        fn wrap(value: Option<FacetValue>) -> FilterValue {
            FilterValue::Category(value)
        }
        fn peek(value: &FilterValue) -> Option<&Option<FacetValue>> {
            match value {
                FilterValue::Category(v) => Some(v),
                _ => None,
            }
        }
    }

    impl Kind for TriState {
        type Value = Option<bool>;
        const KIND: FilterKind = FilterKind::TriStateBoolean;
        fn wrap(value: Option<bool>) -> FilterValue {
            FilterValue::Toggle(value)
        }
        fn peek(value: &FilterValue) -> Option<&Option<bool>> {
            match value {
                FilterValue::Toggle(v) => Some(v),
                _ => None,
            }
        }
    }

    impl Kind for Rating {
        type Value = u8;
        const KIND: FilterKind = FilterKind::MinRating;
        fn wrap(value: u8) -> FilterValue {
            FilterValue::MinRating(value)
        }
        fn peek(value: &FilterValue) -> Option<&u8> {
            match value {
                FilterValue::MinRating(v) => Some(v),
                _ => None,
            }
        }
    }
}

use kind::Kind;

/// Position of a field in its schema's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldId(pub(crate) usize);

impl FieldId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Typed handle to a declared field.
pub struct FieldKey<K> {
    index: usize,
    _kind: PhantomData<fn() -> K>,
}

impl<K> FieldKey<K> {
    fn new(index: usize) -> Self {
        Self { index, _kind: PhantomData }
    }

    pub fn id(&self) -> FieldId {
        FieldId(self.index)
    }
}

impl<K> Clone for FieldKey<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for FieldKey<K> {}

impl<K> PartialEq for FieldKey<K> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<K> Eq for FieldKey<K> {}

impl<K> fmt::Debug for FieldKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldKey").field(&self.index).finish()
    }
}

pub(crate) enum FacetSource<I> {
    Text(StrAccessor<I>),
    Number(IntAccessor<I>),
}

pub(crate) enum Source<I> {
    Text(Vec<StrAccessor<I>>),
    Range {
        value: NumberAccessor<I>,
        bounds: NumericRange,
        step: f64,
    },
    Categorical(FacetSource<I>),
    TriState(FlagAccessor<I>),
    Rating {
        value: NumberAccessor<I>,
        max_stars: u8,
    },
}

/// A declared filter dimension with its accessor erased to the field kind.
pub struct FieldSpec<I> {
    name: String,
    title: String,
    default: FilterValue,
    label: Labeler,
    pub(crate) source: Source<I>,
}

impl<I> FieldSpec<I> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn default_value(&self) -> &FilterValue {
        &self.default
    }

    pub fn kind(&self) -> FilterKind {
        match &self.source {
            Source::Text(_) => FilterKind::Text,
            Source::Range { .. } => FilterKind::NumericRange,
            Source::Categorical(_) => FilterKind::Categorical,
            Source::TriState(_) => FilterKind::TriStateBoolean,
            Source::Rating { .. } => FilterKind::MinRating,
        }
    }

    /// Summary label for `value`, produced by the field's formatter.
    pub fn label(&self, value: &FilterValue) -> String {
        (self.label)(value)
    }

    /// Parse a user-supplied string into a value of this field's kind.
    ///
    /// Ranges are written `lower..upper`; tri-state toggles accept
    /// `yes`/`no`/`any` (and `true`/`false`/`null`); an empty categorical
    /// selection means "any".
    pub fn parse_value(&self, raw: &str) -> Result<FilterValue> {
        let invalid = |reason: String| Error::InvalidValue { field: self.name.clone(), reason };
        let raw_trimmed = raw.trim();
        match &self.source {
            Source::Text(_) => Ok(FilterValue::Text(raw.to_string())),
            Source::Range { .. } => {
                let (lower, upper) = raw_trimmed
                    .split_once("..")
                    .ok_or_else(|| invalid(format!("expected 'lower..upper', got '{}'", raw)))?;
                let lower: f64 = lower
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("'{}' is not a number", lower.trim())))?;
                let upper: f64 = upper
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("'{}' is not a number", upper.trim())))?;
                Ok(FilterValue::Range(NumericRange::new(lower, upper)?))
            }
            Source::Categorical(_) if raw_trimmed.is_empty() => Ok(FilterValue::Category(None)),
            Source::Categorical(FacetSource::Text(_)) => {
                Ok(FilterValue::Category(Some(FacetValue::text(raw_trimmed))))
            }
            Source::Categorical(FacetSource::Number(_)) => raw_trimmed
                .parse::<i64>()
                .map(|n| FilterValue::Category(Some(FacetValue::Number(n))))
                .map_err(|_| invalid(format!("'{}' is not a whole number", raw_trimmed))),
            Source::TriState(_) => match raw_trimmed.to_ascii_lowercase().as_str() {
                "yes" | "true" | "1" => Ok(FilterValue::Toggle(Some(true))),
                "no" | "false" | "0" => Ok(FilterValue::Toggle(Some(false))),
                "" | "any" | "null" => Ok(FilterValue::Toggle(None)),
                other => Err(invalid(format!("'{}' is not yes, no or any", other))),
            },
            Source::Rating { max_stars, .. } => {
                let stars: u8 = raw_trimmed
                    .parse()
                    .map_err(|_| invalid(format!("'{}' is not a star count", raw_trimmed)))?;
                if stars > *max_stars {
                    return Err(invalid(format!("{} exceeds the {}-star maximum", stars, max_stars)));
                }
                Ok(FilterValue::MinRating(stars))
            }
        }
    }
}

fn erase_label<K, F>(format: F) -> Labeler
where
    K: Kind,
    F: Fn(&K::Value) -> String + Send + Sync + 'static,
{
    Box::new(move |value| K::peek(value).map(|v| format(v)).unwrap_or_default())
}

/// Something that can be declared on a [`SchemaBuilder`].
pub trait FieldDecl<I> {
    type Kind: Kind;
    fn into_spec(self) -> FieldSpec<I>;
}

/// Free-text search over one or more item attributes.
pub struct TextField<I> {
    name: String,
    title: Option<String>,
    searchable: Vec<StrAccessor<I>>,
    label: Option<Labeler>,
}

impl<I> TextField<I> {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), title: None, searchable: Vec::new(), label: None }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add an attribute the query is matched against.
    pub fn searching<F>(mut self, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a I) -> Option<&'a str> + Send + Sync + 'static,
    {
        self.searchable.push(Box::new(accessor));
        self
    }

    pub fn label<F>(mut self, format: F) -> Self
    where
        F: Fn(&String) -> String + Send + Sync + 'static,
    {
        self.label = Some(erase_label::<kind::Text, _>(format));
        self
    }
}

impl<I> FieldDecl<I> for TextField<I> {
    type Kind = kind::Text;

    fn into_spec(self) -> FieldSpec<I> {
        let title = self.title.unwrap_or_else(|| self.name.clone());
        let label = self.label.unwrap_or_else(|| {
            let title = title.clone();
            erase_label::<kind::Text, _>(move |q| format!("{}: \"{}\"", title, q))
        });
        FieldSpec {
            name: self.name,
            title,
            default: FilterValue::Text(String::new()),
            label,
            source: Source::Text(self.searchable),
        }
    }
}

/// Inclusive numeric range over a derived attribute, such as a nightly price.
pub struct RangeField<I> {
    name: String,
    title: Option<String>,
    value: NumberAccessor<I>,
    bounds: NumericRange,
    step: f64,
    label: Option<Labeler>,
}

impl<I> RangeField<I> {
    /// `bounds` is both the default value and the slider's floor and ceiling.
    pub fn new<F>(name: impl Into<String>, bounds: NumericRange, value: F) -> Self
    where
        F: Fn(&I) -> Option<f64> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            title: None,
            value: Box::new(value),
            bounds,
            step: 1.0,
            label: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn label<F>(mut self, format: F) -> Self
    where
        F: Fn(&NumericRange) -> String + Send + Sync + 'static,
    {
        self.label = Some(erase_label::<kind::Range, _>(format));
        self
    }
}

impl<I> FieldDecl<I> for RangeField<I> {
    type Kind = kind::Range;

    fn into_spec(self) -> FieldSpec<I> {
        let title = self.title.unwrap_or_else(|| self.name.clone());
        let label = self.label.unwrap_or_else(|| {
            let title = title.clone();
            erase_label::<kind::Range, _>(move |r| format!("{}: {}", title, r))
        });
        FieldSpec {
            name: self.name,
            title,
            default: FilterValue::Range(self.bounds),
            label,
            source: Source::Range { value: self.value, bounds: self.bounds, step: self.step },
        }
    }
}

/// Exact-match select whose options come from the loaded items.
pub struct CategoricalField<I> {
    name: String,
    title: Option<String>,
    source: FacetSource<I>,
    label: Option<Labeler>,
}

impl<I> CategoricalField<I> {
    /// A select over a text attribute (location, property type).
    pub fn text<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a I) -> Option<&'a str> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            title: None,
            source: FacetSource::Text(Box::new(accessor)),
            label: None,
        }
    }

    /// A select over a whole-number attribute (duration in days, seats).
    pub fn number<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&I) -> Option<i64> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            title: None,
            source: FacetSource::Number(Box::new(accessor)),
            label: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn label<F>(mut self, format: F) -> Self
    where
        F: Fn(&Option<FacetValue>) -> String + Send + Sync + 'static,
    {
        self.label = Some(erase_label::<kind::Categorical, _>(format));
        self
    }
}

impl<I> FieldDecl<I> for CategoricalField<I> {
    type Kind = kind::Categorical;

    fn into_spec(self) -> FieldSpec<I> {
        let title = self.title.unwrap_or_else(|| self.name.clone());
        let label = self.label.unwrap_or_else(|| {
            let title = title.clone();
            erase_label::<kind::Categorical, _>(move |v| match v {
                Some(v) => format!("{}: {}", title, v),
                None => format!("{}: Any", title),
            })
        });
        FieldSpec {
            name: self.name,
            title,
            default: FilterValue::Category(None),
            label,
            source: Source::Categorical(self.source),
        }
    }
}

/// Yes / no / don't-care over a boolean attribute such as an amenity.
pub struct TriStateField<I> {
    name: String,
    title: Option<String>,
    value: FlagAccessor<I>,
    label: Option<Labeler>,
}

impl<I> TriStateField<I> {
    pub fn new<F>(name: impl Into<String>, value: F) -> Self
    where
        F: Fn(&I) -> Option<bool> + Send + Sync + 'static,
    {
        Self { name: name.into(), title: None, value: Box::new(value), label: None }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn label<F>(mut self, format: F) -> Self
    where
        F: Fn(&Option<bool>) -> String + Send + Sync + 'static,
    {
        self.label = Some(erase_label::<kind::TriState, _>(format));
        self
    }
}

impl<I> FieldDecl<I> for TriStateField<I> {
    type Kind = kind::TriState;

    fn into_spec(self) -> FieldSpec<I> {
        let title = self.title.unwrap_or_else(|| self.name.clone());
        let label = self.label.unwrap_or_else(|| {
            let title = title.clone();
            erase_label::<kind::TriState, _>(move |v| match v {
                Some(true) => format!("{}: Yes", title),
                Some(false) => format!("{}: No", title),
                None => format!("{}: Any", title),
            })
        });
        FieldSpec {
            name: self.name,
            title,
            default: FilterValue::Toggle(None),
            label,
            source: Source::TriState(self.value),
        }
    }
}

/// Minimum star rating, driven by a rating ladder.
pub struct RatingField<I> {
    name: String,
    title: Option<String>,
    value: NumberAccessor<I>,
    max_stars: u8,
    label: Option<Labeler>,
}

impl<I> RatingField<I> {
    pub fn new<F>(name: impl Into<String>, value: F) -> Self
    where
        F: Fn(&I) -> Option<f64> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            title: None,
            value: Box::new(value),
            max_stars: 5,
            label: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn max_stars(mut self, max_stars: u8) -> Self {
        self.max_stars = max_stars;
        self
    }

    pub fn label<F>(mut self, format: F) -> Self
    where
        F: Fn(&u8) -> String + Send + Sync + 'static,
    {
        self.label = Some(erase_label::<kind::Rating, _>(format));
        self
    }
}

impl<I> FieldDecl<I> for RatingField<I> {
    type Kind = kind::Rating;

    fn into_spec(self) -> FieldSpec<I> {
        let title = self.title.unwrap_or_else(|| self.name.clone());
        let label = self.label.unwrap_or_else(|| {
            let title = title.clone();
            erase_label::<kind::Rating, _>(move |n| format!("{}: {}+", title, n))
        });
        FieldSpec {
            name: self.name,
            title,
            default: FilterValue::MinRating(0),
            label,
            source: Source::Rating { value: self.value, max_stars: self.max_stars },
        }
    }
}

pub struct SchemaBuilder<I> {
    fields: Vec<FieldSpec<I>>,
}

impl<I> Default for SchemaBuilder<I> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<I> SchemaBuilder<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<D>(&mut self, decl: D) -> FieldKey<D::Kind>
    where
        D: FieldDecl<I>,
    {
        let index = self.fields.len();
        self.fields.push(decl.into_spec());
        FieldKey::new(index)
    }

    pub fn build(self) -> Result<FilterSchema<I>> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(Error::DuplicateField(field.name.clone()));
            }
        }
        Ok(FilterSchema { fields: self.fields })
    }
}

/// The ordered field declarations for one catalog.
pub struct FilterSchema<I> {
    fields: Vec<FieldSpec<I>>,
}

impl<I> FilterSchema<I> {
    pub fn builder() -> SchemaBuilder<I> {
        SchemaBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields with their ids, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &FieldSpec<I>)> {
        self.fields.iter().enumerate().map(|(i, f)| (FieldId(i), f))
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldSpec<I>> {
        self.fields.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<(FieldId, &FieldSpec<I>)> {
        self.fields().find(|(_, f)| f.name == name)
    }

    pub fn name<K>(&self, key: FieldKey<K>) -> Option<&str> {
        self.field(key.id()).map(|f| f.name())
    }

    /// Slider controller for a range field, bounded by its declared floor and ceiling.
    pub fn slider(&self, key: FieldKey<kind::Range>) -> Option<RangeSlider> {
        match &self.field(key.id())?.source {
            Source::Range { bounds, step, .. } => Some(RangeSlider::new(*bounds, *step)),
            _ => None,
        }
    }

    pub fn ladder(&self, key: FieldKey<kind::Rating>) -> Option<RatingLadder> {
        match &self.field(key.id())?.source {
            Source::Rating { max_stars, .. } => Some(RatingLadder::new(*max_stars)),
            _ => None,
        }
    }
}
