//! Tagged parameter values and the declaration-ordered parameter set.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single simulator parameter value.
///
/// The variant decides how the value is rendered in a case file. Values that
/// the simulator cannot read are kept as [`ParamValue::Unsupported`] so the
/// serializer can report and skip them instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Integer value, rendered without a decimal point.
    Int(i64),
    /// Floating point value, rendered with eight significant digits.
    Float(f64),
    /// Free-form text, rendered verbatim.
    Text(String),
    /// Any other input shape; the payload names the rejected kind.
    Unsupported(String),
}

impl ParamValue {
    /// Returns the numeric value for integers and floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(value) => Some(*value as f64),
            ParamValue::Float(value) => Some(*value),
            ParamValue::Text(_) | ParamValue::Unsupported(_) => None,
        }
    }

    /// Short name of the value kind used in diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Text(_) => "text",
            ParamValue::Unsupported(kind) => kind,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Int(value) => serializer.serialize_i64(*value),
            ParamValue::Float(value) => serializer.serialize_f64(*value),
            ParamValue::Text(value) => serializer.serialize_str(value),
            ParamValue::Unsupported(_) => serializer.serialize_unit(),
        }
    }
}

struct ParamValueVisitor;

impl<'de> Visitor<'de> for ParamValueVisitor {
    type Value = ParamValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a parameter value")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ParamValue, E> {
        Ok(ParamValue::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ParamValue, E> {
        Ok(i64::try_from(value)
            .map(ParamValue::Int)
            .unwrap_or(ParamValue::Float(value as f64)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<ParamValue, E> {
        Ok(ParamValue::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ParamValue, E> {
        Ok(ParamValue::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<ParamValue, E> {
        Ok(ParamValue::Text(value))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<ParamValue, E> {
        Ok(ParamValue::Unsupported("bool".to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<ParamValue, E> {
        Ok(ParamValue::Unsupported("null".to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<ParamValue, E> {
        Ok(ParamValue::Unsupported("null".to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ParamValue, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(ParamValue::Unsupported("sequence".to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ParamValue, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(ParamValue::Unsupported("map".to_string()))
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ParamValueVisitor)
    }
}

/// Entry of a [`ParameterSet`]: one value shared by every run, or one value per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamEntry {
    /// One value per run, zipped by index with the other sequences.
    Sequence(Vec<ParamValue>),
    /// Value held fixed across all runs.
    Scalar(ParamValue),
}

impl ParamEntry {
    /// Returns the sequence length, or `None` for scalars.
    pub fn sequence_len(&self) -> Option<usize> {
        match self {
            ParamEntry::Sequence(values) => Some(values.len()),
            ParamEntry::Scalar(_) => None,
        }
    }
}

/// Rheology parameters keyed by simulator name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: IndexMap<String, ParamEntry>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value shared by every run.
    pub fn scalar(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, ParamEntry::Scalar(value.into()));
        self
    }

    /// Adds a per-run value sequence.
    pub fn sequence<V: Into<ParamValue>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.insert(name, ParamEntry::Sequence(values));
        self
    }

    /// Inserts or replaces an entry, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, entry: ParamEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Looks up an entry by name.
    pub fn get(&self, name: &str) -> Option<&ParamEntry> {
        self.entries.get(name)
    }

    /// Returns whether an entry with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Iterates the names of sequence-valued entries in declaration order.
    pub fn sequence_names(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, entry)| matches!(entry, ParamEntry::Sequence(_)))
            .map(|(name, _)| name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
