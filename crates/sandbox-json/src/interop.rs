//! Conversions to and from `serde` / `serde_json`.
//!
//! Lets hosts that already speak `serde_json` hand trees across the boundary
//! without going through text. `serde_json::Map` cannot hold duplicate keys,
//! so converting an object with repeated member names keeps the last value at
//! the first position.

use crate::value::{Kind, Value};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number};

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.kind() {
            Kind::Null => serializer.serialize_unit(),
            Kind::True => serializer.serialize_bool(true),
            Kind::False => serializer.serialize_bool(false),
            Kind::Number => serializer.serialize_f64(self.as_f64().unwrap_or_default()),
            Kind::String => serializer.serialize_str(self.as_str().unwrap_or_default()),
            Kind::Array => {
                let mut seq = serializer.serialize_seq(Some(self.len()))?;
                for item in self.children() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Kind::Object => {
                let mut map = serializer.serialize_map(Some(self.len()))?;
                for (name, member) in self.members() {
                    map.serialize_entry(name, member)?;
                }
                map.end()
            }
        }
    }
}

impl From<&serde_json::Value> for Value<'static> {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::null(),
            serde_json::Value::Bool(b) => Value::bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map_or_else(Value::null, Value::number),
            serde_json::Value::String(s) => Value::string(s),
            serde_json::Value::Array(items) => {
                Value::array_from(items.iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::object_from(
                map.iter()
                    .map(|(name, member)| {
                        let mut member = Value::from(member);
                        member.set_name(name.clone());
                        member
                    })
                    .collect(),
            ),
        }
    }
}

impl Value<'_> {
    /// Convert into a `serde_json::Value`. Non-finite numbers become `null`.
    pub fn to_serde_json(&self) -> serde_json::Value {
        match self.kind() {
            Kind::Null => serde_json::Value::Null,
            Kind::True => serde_json::Value::Bool(true),
            Kind::False => serde_json::Value::Bool(false),
            Kind::Number => self
                .as_f64()
                .and_then(Number::from_f64)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Kind::String => serde_json::Value::String(self.as_str().unwrap_or_default().to_owned()),
            Kind::Array => {
                serde_json::Value::Array(self.children().iter().map(Value::to_serde_json).collect())
            }
            Kind::Object => {
                let mut map = Map::new();
                for (name, member) in self.members() {
                    map.insert(name.to_owned(), member.to_serde_json());
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
