//! The invoice value rendered by the printer.
//!
//! Every field is an opaque string; an empty string means the field is
//! absent. Nothing here parses or checks amounts or dates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One line of the items table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub name: String,
    pub variable: String,
    pub quantity: String,
    pub unit: String,
    pub price: String,
    pub tax: String,
    pub amount: String,
}

impl Item {
    pub const FIELDS: [&'static str; 7] = ["name", "variable", "quantity", "unit", "price", "tax", "amount"];

    pub fn new(name: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.name,
            "variable" => &self.variable,
            "quantity" => &self.quantity,
            "unit" => &self.unit,
            "price" => &self.price,
            "tax" => &self.tax,
            "amount" => &self.amount,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "name" => Some(&mut self.name),
            "variable" => Some(&mut self.variable),
            "quantity" => Some(&mut self.quantity),
            "unit" => Some(&mut self.unit),
            "price" => Some(&mut self.price),
            "tax" => Some(&mut self.tax),
            "amount" => Some(&mut self.amount),
            _ => None,
        }
    }

    /// Build an item from a JSON object. Only recognized keys are read;
    /// numbers and booleans become strings and null becomes empty.
    pub fn from_map(value: &Value) -> Result<Self> {
        let map = as_object(value, "item")?;
        let mut item = Item::default();
        for key in Self::FIELDS {
            if let Some(slot) = item.field_mut(key) {
                *slot = scalar(map, key)?;
            }
        }
        Ok(item)
    }

    pub fn to_map(&self) -> Value {
        let mut map = Map::new();
        for key in Self::FIELDS {
            if let Some(value) = self.field(key) {
                map.insert(key.to_string(), Value::String(value.to_string()));
            }
        }
        Value::Object(map)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_map(&serde_json::from_str::<Value>(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_map())?)
    }
}

/// A party on the document, projected from the document's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity<'a> {
    pub name: &'a str,
    pub lines: &'a str,
}

/// An invoice or receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub number: String,
    pub status: String,
    pub provider_name: String,
    pub provider_lines: String,
    pub purchaser_name: String,
    pub purchaser_lines: String,
    pub issue_date: String,
    pub due_date: String,
    pub charge_date: String,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub items: Vec<Item>,
    pub note: String,
}

impl Document {
    /// Scalar fields in their canonical order.
    pub const FIELDS: [&'static str; 13] = [
        "number",
        "status",
        "provider_name",
        "provider_lines",
        "purchaser_name",
        "purchaser_lines",
        "issue_date",
        "due_date",
        "charge_date",
        "subtotal",
        "tax",
        "total",
        "note",
    ];

    pub fn provider(&self) -> Entity<'_> {
        Entity {
            name: &self.provider_name,
            lines: &self.provider_lines,
        }
    }

    pub fn purchaser(&self) -> Entity<'_> {
        Entity {
            name: &self.purchaser_name,
            lines: &self.purchaser_lines,
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "number" => &self.number,
            "status" => &self.status,
            "provider_name" => &self.provider_name,
            "provider_lines" => &self.provider_lines,
            "purchaser_name" => &self.purchaser_name,
            "purchaser_lines" => &self.purchaser_lines,
            "issue_date" => &self.issue_date,
            "due_date" => &self.due_date,
            "charge_date" => &self.charge_date,
            "subtotal" => &self.subtotal,
            "tax" => &self.tax,
            "total" => &self.total,
            "note" => &self.note,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            "number" => Some(&mut self.number),
            "status" => Some(&mut self.status),
            "provider_name" => Some(&mut self.provider_name),
            "provider_lines" => Some(&mut self.provider_lines),
            "purchaser_name" => Some(&mut self.purchaser_name),
            "purchaser_lines" => Some(&mut self.purchaser_lines),
            "issue_date" => Some(&mut self.issue_date),
            "due_date" => Some(&mut self.due_date),
            "charge_date" => Some(&mut self.charge_date),
            "subtotal" => Some(&mut self.subtotal),
            "tax" => Some(&mut self.tax),
            "total" => Some(&mut self.total),
            "note" => Some(&mut self.note),
            _ => None,
        }
    }

    /// Build a document from a JSON object. Unknown keys are ignored and
    /// missing keys stay empty. `items`, when present and not null, must
    /// be an array of objects.
    pub fn from_map(value: &Value) -> Result<Self> {
        let map = as_object(value, "document")?;
        let mut doc = Document::default();
        for key in Self::FIELDS {
            if let Some(slot) = doc.field_mut(key) {
                *slot = scalar(map, key)?;
            }
        }
        doc.items = match map.get("items") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(Item::from_map).collect::<Result<_>>()?,
            Some(other) => {
                return Err(Error::InvalidInput(format!(
                    "items must be an array, got {}",
                    kind(other)
                )))
            }
        };
        Ok(doc)
    }

    pub fn to_map(&self) -> Value {
        let mut map = Map::new();
        for key in Self::FIELDS {
            if let Some(value) = self.field(key) {
                map.insert(key.to_string(), Value::String(value.to_string()));
            }
        }
        map.insert(
            "items".to_string(),
            Value::Array(self.items.iter().map(Item::to_map).collect()),
        );
        Value::Object(map)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_map(&serde_json::from_str::<Value>(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_map())?)
    }
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::InvalidInput(format!("{} must be an object, got {}", what, kind(value))))
}

/// Coerce a scalar JSON value to the string stored in a field.
fn scalar(map: &Map<String, Value>, key: &str) -> Result<String> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(Error::InvalidInput(format!(
            "field '{}' must be a scalar, got {}",
            key,
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Document {
        Document {
            number: "198900000001".into(),
            provider_name: "Business s.r.o.".into(),
            provider_lines: "Rolnicka 1\n747 05 Opava".into(),
            total: "$ 200".into(),
            items: vec![Item {
                quantity: "2".into(),
                ..Item::new("Web consultation")
            }],
            ..Default::default()
        }
    }

    #[test]
    fn map_round_trip_preserves_fields() {
        let doc = sample();
        assert_eq!(Document::from_map(&doc.to_map()).unwrap(), doc);
        let item = &doc.items[0];
        assert_eq!(Item::from_map(&item.to_map()).unwrap(), *item);
    }

    #[test]
    fn json_round_trip() {
        let doc = sample();
        let json = doc.to_json().unwrap();
        assert_eq!(Document::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn item_json_round_trip_and_coercion() {
        let item = Item {
            price: "$ 25".into(),
            amount: "$ 50".into(),
            ..Item::new("Hosting")
        };
        assert_eq!(Item::from_json(&item.to_json().unwrap()).unwrap(), item);

        let coerced = Item::from_json(r#"{"name": "Support", "quantity": 2, "tax": null, "sku": "A1"}"#).unwrap();
        assert_eq!(coerced.quantity, "2");
        assert_eq!(coerced.tax, "");
        assert!(matches!(Item::from_json("[1]"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn scalars_are_coerced_to_strings() {
        let doc = Document::from_map(&json!({
            "number": 42,
            "status": null,
            "subtotal": 17.5,
            "items": [{"name": "x", "quantity": 3, "unit": true}]
        }))
        .unwrap();
        assert_eq!(doc.number, "42");
        assert_eq!(doc.status, "");
        assert_eq!(doc.subtotal, "17.5");
        assert_eq!(doc.items[0].quantity, "3");
        assert_eq!(doc.items[0].unit, "true");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let doc = Document::from_map(&json!({"number": "1", "currency": "CZK"})).unwrap();
        assert_eq!(doc.number, "1");
        assert!(doc.items.is_empty());
    }

    #[test]
    fn malformed_shapes_are_invalid_input() {
        for bad in [
            json!([1, 2]),
            json!({"items": "none"}),
            json!({"items": [1]}),
            json!({"number": ["1"]}),
            json!({"items": [{"name": {"first": "x"}}]}),
        ] {
            assert!(
                matches!(Document::from_map(&bad), Err(Error::InvalidInput(_))),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn entities_project_document_fields() {
        let doc = sample();
        assert_eq!(doc.provider().name, "Business s.r.o.");
        assert_eq!(doc.provider().lines, "Rolnicka 1\n747 05 Opava");
        assert_eq!(doc.purchaser().name, "");
    }

    #[test]
    fn serde_derive_fills_missing_fields() {
        let item: Item = serde_json::from_str(r#"{"name": "a"}"#).unwrap();
        assert_eq!(item, Item::new("a"));
    }
}
