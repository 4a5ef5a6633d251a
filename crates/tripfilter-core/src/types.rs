//! Value types shared by the filter engine and the catalog integrations.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// The five kinds of filter dimension a catalog can declare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    Text,
    NumericRange,
    Categorical,
    TriStateBoolean,
    MinRating,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Text => "text",
            FilterKind::NumericRange => "numericRange",
            FilterKind::Categorical => "categorical",
            FilterKind::TriStateBoolean => "triStateBoolean",
            FilterKind::MinRating => "minRating",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `[lower, upper]` bounds. `lower <= upper` holds for every
/// instance; the only way in is [`NumericRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct NumericRange {
    lower: f64,
    upper: f64,
}

impl NumericRange {
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        // Written as a negation so NaN bounds are rejected too.
        if !(lower <= upper) {
            return Err(Error::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl TryFrom<[f64; 2]> for NumericRange {
    type Error = Error;

    fn try_from(bounds: [f64; 2]) -> Result<Self> {
        Self::new(bounds[0], bounds[1])
    }
}

impl From<NumericRange> for [f64; 2] {
    fn from(range: NumericRange) -> Self {
        [range.lower, range.upper]
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", format_amount(self.lower), format_amount(self.upper))
    }
}

/// Render a number without a trailing `.0` when it is integral.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// A distinct value observed for a categorical facet.
///
/// Numeric facets (durations, seat counts) sort ascending by number. Text
/// facets sort case-folded first and fall back to code-point order, which keeps
/// "colombo" next to "Colombo" without a locale database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Number(i64),
    Text(String),
}

impl FacetValue {
    pub fn text(value: impl Into<String>) -> Self {
        FacetValue::Text(value.into())
    }

    /// Empty text carries no information and never becomes an option.
    pub fn is_blank(&self) -> bool {
        matches!(self, FacetValue::Text(s) if s.trim().is_empty())
    }
}

impl Ord for FacetValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FacetValue::Number(a), FacetValue::Number(b)) => a.cmp(b),
            (FacetValue::Text(a), FacetValue::Text(b)) => compare_text(a, b),
            (FacetValue::Number(_), FacetValue::Text(_)) => Ordering::Less,
            (FacetValue::Text(_), FacetValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for FacetValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::Number(n) => write!(f, "{}", n),
            FacetValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self {
        FacetValue::Text(value.to_string())
    }
}

impl From<String> for FacetValue {
    fn from(value: String) -> Self {
        FacetValue::Text(value)
    }
}

impl From<i64> for FacetValue {
    fn from(value: i64) -> Self {
        FacetValue::Number(value)
    }
}

pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// The current value of one filter field, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum FilterValue {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "numericRange")]
    Range(NumericRange),
    #[serde(rename = "categorical")]
    Category(Option<FacetValue>),
    #[serde(rename = "triStateBoolean")]
    Toggle(Option<bool>),
    #[serde(rename = "minRating")]
    MinRating(u8),
}

impl FilterValue {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterValue::Text(_) => FilterKind::Text,
            FilterValue::Range(_) => FilterKind::NumericRange,
            FilterValue::Category(_) => FilterKind::Categorical,
            FilterValue::Toggle(_) => FilterKind::TriStateBoolean,
            FilterValue::MinRating(_) => FilterKind::MinRating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_rejects_inverted_and_nan_bounds() {
        assert!(NumericRange::new(0.0, 200.0).is_ok());
        assert!(NumericRange::new(5.0, 5.0).is_ok());
        assert_eq!(
            NumericRange::new(10.0, 1.0),
            Err(Error::InvalidRange { lower: 10.0, upper: 1.0 })
        );
        assert!(NumericRange::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn range_contains_is_inclusive() {
        let r = NumericRange::new(0.0, 200.0).unwrap();
        assert!(r.contains(0.0));
        assert!(r.contains(200.0));
        assert!(!r.contains(200.01));
    }

    #[test]
    fn range_deserialize_validates() {
        let ok: NumericRange = serde_json::from_str("[0, 1000]").unwrap();
        assert_eq!(ok.upper(), 1000.0);
        assert!(serde_json::from_str::<NumericRange>("[9, 1]").is_err());
    }

    #[test]
    fn facet_values_sort_case_folded_then_numeric() {
        let mut values = vec![
            FacetValue::text("kandy"),
            FacetValue::text("Colombo"),
            FacetValue::text("Galle"),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                FacetValue::text("Colombo"),
                FacetValue::text("Galle"),
                FacetValue::text("kandy"),
            ]
        );

        let mut numbers = vec![FacetValue::Number(10), FacetValue::Number(2), FacetValue::Number(7)];
        numbers.sort();
        assert_eq!(numbers, vec![FacetValue::Number(2), FacetValue::Number(7), FacetValue::Number(10)]);
    }

    #[test]
    fn filter_value_json_uses_kind_tags() {
        let v = FilterValue::Toggle(Some(true));
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"kind":"triStateBoolean","value":true}"#);
        let back: FilterValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), FilterKind::TriStateBoolean);
    }

    #[test]
    fn amounts_drop_trailing_zero() {
        assert_eq!(format_amount(200.0), "200");
        assert_eq!(format_amount(99.5), "99.5");
    }
}
