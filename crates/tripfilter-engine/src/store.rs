//! The filter state store: one current value per declared field.

use serde::ser::{Serialize, SerializeMap, Serializer};

use tripfilter_core::types::{FacetValue, FilterValue};
use tripfilter_core::{Error, Result};

use crate::schema::kind::Kind;
use crate::schema::{FieldId, FieldKey, FilterSchema};

#[derive(Clone)]
struct Slot {
    name: String,
    default: FilterValue,
    value: FilterValue,
    revision: u64,
}

/// Current filter values, seeded with every field's default.
///
/// All mutation goes through `set*` and `reset*`. Each call replaces at most
/// the slots it names; a write that leaves a value unchanged is not a change.
/// `revision` increases once per effective mutation and each slot remembers
/// the revision that last touched it, which lets dependents skip work for
/// fields that did not move.
#[derive(Clone)]
pub struct FilterStore {
    slots: Vec<Slot>,
    revision: u64,
}

impl FilterStore {
    pub fn new<I>(schema: &FilterSchema<I>) -> Self {
        let slots = schema
            .fields()
            .map(|(_, f)| Slot {
                name: f.name().to_string(),
                default: f.default_value().clone(),
                value: f.default_value().clone(),
                revision: 0,
            })
            .collect();
        Self { slots, revision: 0 }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn field_revision(&self, id: FieldId) -> Option<u64> {
        self.slots.get(id.index()).map(|s| s.revision)
    }

    pub fn get<K: Kind>(&self, key: FieldKey<K>) -> Option<&K::Value> {
        self.value(key.id()).and_then(K::peek)
    }

    pub fn value(&self, id: FieldId) -> Option<&FilterValue> {
        self.slots.get(id.index()).map(|s| &s.value)
    }

    pub fn default_value(&self, id: FieldId) -> Option<&FilterValue> {
        self.slots.get(id.index()).map(|s| &s.default)
    }

    pub fn is_default(&self, id: FieldId) -> bool {
        self.slots.get(id.index()).map_or(true, |s| s.value == s.default)
    }

    /// Ids of fields currently holding a non-default value, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.value != s.default)
            .map(|(i, _)| FieldId(i))
    }

    /// Replace one field's value. Returns whether the state changed.
    pub fn set<K: Kind>(&mut self, key: FieldKey<K>, value: K::Value) -> bool {
        self.write(key.id(), K::wrap(value))
    }

    /// Name-based `set` for dynamic callers; the value must match the declared kind.
    pub fn set_named(&mut self, name: &str, value: FilterValue) -> Result<bool> {
        let id = self.id_of(name)?;
        let slot = &self.slots[id.index()];
        if slot.default.kind() != value.kind() {
            return Err(Error::KindMismatch {
                field: name.to_string(),
                expected: slot.default.kind(),
                actual: value.kind(),
            });
        }
        Ok(self.write(id, value))
    }

    pub fn reset<K: Kind>(&mut self, key: FieldKey<K>) -> bool {
        self.reset_field(key.id())
    }

    pub fn reset_field(&mut self, id: FieldId) -> bool {
        match self.slots.get(id.index()) {
            Some(slot) => {
                let default = slot.default.clone();
                self.write(id, default)
            }
            None => false,
        }
    }

    pub fn reset_named(&mut self, name: &str) -> Result<bool> {
        let id = self.id_of(name)?;
        Ok(self.reset_field(id))
    }

    /// Restore every default as a single mutation.
    pub fn reset_all(&mut self) -> bool {
        let next = self.revision + 1;
        let mut changed = false;
        for slot in &mut self.slots {
            if slot.value != slot.default {
                slot.value = slot.default.clone();
                slot.revision = next;
                changed = true;
            }
        }
        if changed {
            self.revision = next;
            tracing::debug!(revision = next, "filters reset");
        }
        changed
    }

    pub fn snapshot(&self) -> FilterState {
        FilterState {
            entries: self.slots.iter().map(|s| (s.name.clone(), s.value.clone())).collect(),
        }
    }

    fn id_of(&self, name: &str) -> Result<FieldId> {
        self.slots
            .iter()
            .position(|s| s.name == name)
            .map(FieldId)
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    fn write(&mut self, id: FieldId, value: FilterValue) -> bool {
        let value = normalize(value);
        let Some(slot) = self.slots.get_mut(id.index()) else {
            tracing::warn!(field = id.index(), "ignoring write to a field this store does not hold");
            return false;
        };
        if slot.default.kind() != value.kind() {
            tracing::warn!(field = %slot.name, kind = %value.kind(), "ignoring write of the wrong kind");
            return false;
        }
        if slot.value == value {
            return false;
        }
        self.revision += 1;
        slot.value = value;
        slot.revision = self.revision;
        tracing::trace!(field = %slot.name, revision = self.revision, "filter set");
        true
    }
}

/// A blank categorical selection means "no selection".
fn normalize(value: FilterValue) -> FilterValue {
    match value {
        FilterValue::Category(Some(v)) if v.is_blank() => FilterValue::Category(None),
        FilterValue::Category(Some(FacetValue::Text(s))) if s.trim() != s => {
            FilterValue::Category(Some(FacetValue::Text(s.trim().to_string())))
        }
        other => other,
    }
}

/// Point-in-time copy of every field's value, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    entries: Vec<(String, FilterValue)>,
}

impl FilterState {
    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FilterState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
