//! Field captions printed on the invoice, with optional sublabels
//! (usually a translation) shown beneath them.
//!
//! A process-wide set of labels starts out as the English defaults and
//! can be replaced with [`set_labels`]. Each render may shadow it with
//! its own [`LabelOverrides`] without touching the shared copy.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// The closed set of label keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelKey {
    Name,
    Provider,
    Purchaser,
    TaxId,
    TaxId2,
    IssueDate,
    DueDate,
    ChargeDate,
    Item,
    Variable,
    Quantity,
    Unit,
    PricePerItem,
    Tax,
    Amount,
    Subtotal,
    Total,
}

impl LabelKey {
    pub const ALL: [LabelKey; 17] = [
        LabelKey::Name,
        LabelKey::Provider,
        LabelKey::Purchaser,
        LabelKey::TaxId,
        LabelKey::TaxId2,
        LabelKey::IssueDate,
        LabelKey::DueDate,
        LabelKey::ChargeDate,
        LabelKey::Item,
        LabelKey::Variable,
        LabelKey::Quantity,
        LabelKey::Unit,
        LabelKey::PricePerItem,
        LabelKey::Tax,
        LabelKey::Amount,
        LabelKey::Subtotal,
        LabelKey::Total,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelKey::Name => "name",
            LabelKey::Provider => "provider",
            LabelKey::Purchaser => "purchaser",
            LabelKey::TaxId => "tax_id",
            LabelKey::TaxId2 => "tax_id2",
            LabelKey::IssueDate => "issue_date",
            LabelKey::DueDate => "due_date",
            LabelKey::ChargeDate => "charge_date",
            LabelKey::Item => "item",
            LabelKey::Variable => "variable",
            LabelKey::Quantity => "quantity",
            LabelKey::Unit => "unit",
            LabelKey::PricePerItem => "price_per_item",
            LabelKey::Tax => "tax",
            LabelKey::Amount => "amount",
            LabelKey::Subtotal => "subtotal",
            LabelKey::Total => "total",
        }
    }

    /// English caption used when nothing overrides the key.
    pub fn default_text(&self) -> &'static str {
        match self {
            LabelKey::Name => "Invoice",
            LabelKey::Provider => "Provider",
            LabelKey::Purchaser => "Purchaser",
            LabelKey::TaxId | LabelKey::TaxId2 => "Identification number",
            LabelKey::IssueDate => "Issue Date",
            LabelKey::DueDate => "Due Date",
            LabelKey::ChargeDate => "Charge Date",
            LabelKey::Item => "Item",
            LabelKey::Variable => "",
            LabelKey::Quantity => "Quantity",
            LabelKey::Unit => "Unit",
            LabelKey::PricePerItem => "Price per item",
            LabelKey::Tax => "Tax",
            LabelKey::Amount => "Amount",
            LabelKey::Subtotal => "Subtotal",
            LabelKey::Total => "Total",
        }
    }

    /// Look up a key written in any of the accepted spellings:
    /// `"price_per_item"`, `":price_per_item"`, `"Price-Per-Item"`.
    pub fn parse(raw: &str) -> Option<LabelKey> {
        let key = normalize_key(raw);
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical spelling of a user-supplied key.
fn normalize_key(raw: &str) -> String {
    raw.trim().trim_start_matches(':').to_ascii_lowercase().replace('-', "_")
}

/// A complete, effective label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    values: BTreeMap<LabelKey, String>,
    sublabels: BTreeMap<LabelKey, String>,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            values: LabelKey::ALL
                .into_iter()
                .map(|k| (k, k.default_text().to_string()))
                .collect(),
            sublabels: BTreeMap::new(),
        }
    }
}

impl Labels {
    pub fn get(&self, key: LabelKey) -> &str {
        self.values.get(&key).map(String::as_str).unwrap_or_else(|| key.default_text())
    }

    /// The sublabel for `key`, if one is set and non-empty.
    pub fn sublabel(&self, key: LabelKey) -> Option<&str> {
        self.sublabels
            .get(&key)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn sublabels(&self) -> &BTreeMap<LabelKey, String> {
        &self.sublabels
    }

    /// The label, followed on a new line by its sublabel when present.
    pub fn with_sublabel(&self, key: LabelKey) -> String {
        match self.sublabel(key) {
            Some(sub) => format!("{}\n{}", self.get(key), sub),
            None => self.get(key).to_string(),
        }
    }

    /// Key-wise override. Sublabels are replaced as a whole when the
    /// overrides carry any, and kept otherwise.
    pub fn merged(&self, overrides: &LabelOverrides) -> Labels {
        let mut merged = self.clone();
        for (key, text) in &overrides.labels {
            merged.values.insert(*key, text.clone());
        }
        if let Some(sublabels) = &overrides.sublabels {
            merged.sublabels = sublabels.clone();
        }
        merged
    }
}

/// A partial label set supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOverrides {
    labels: BTreeMap<LabelKey, String>,
    /// `Some` replaces every sublabel, `None` keeps the current ones.
    sublabels: Option<BTreeMap<LabelKey, String>>,
}

impl LabelOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: LabelKey, text: impl Into<String>) -> Self {
        self.labels.insert(key, text.into());
        self
    }

    pub fn with_sublabel(mut self, key: LabelKey, text: impl Into<String>) -> Self {
        self.sublabels
            .get_or_insert_with(BTreeMap::new)
            .insert(key, text.into());
        self
    }

    /// Replace the sublabels with an empty set.
    pub fn clear_sublabels(mut self) -> Self {
        self.sublabels = Some(BTreeMap::new());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.sublabels.is_none()
    }

    /// Read overrides from a JSON object such as
    /// `{"name": "Faktura", "sublabels": {"name": "Invoice"}}`.
    ///
    /// Unknown keys are skipped with a warning. Objects are only accepted
    /// under `sublabels`, and not nested any further.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidInput(format!(
                    "labels must be an object, got {}",
                    other
                )))
            }
        };

        let mut overrides = Self::default();
        for (raw, value) in map {
            if normalize_key(raw) == "sublabels" {
                overrides.sublabels = Some(read_sublabels(value)?);
                continue;
            }
            match LabelKey::parse(raw) {
                Some(key) => {
                    overrides.labels.insert(key, label_text(raw, value)?);
                }
                None => warn!("ignoring unknown label key '{}'", raw),
            }
        }
        Ok(overrides)
    }
}

impl<'de> Deserialize<'de> for LabelOverrides {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        LabelOverrides::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn read_sublabels(value: &Value) -> Result<BTreeMap<LabelKey, String>> {
    let map = match value {
        Value::Null => return Ok(BTreeMap::new()),
        Value::Object(map) => map,
        other => {
            return Err(Error::InvalidInput(format!(
                "sublabels must be an object, got {}",
                other
            )))
        }
    };
    let mut sublabels = BTreeMap::new();
    for (raw, value) in map {
        match LabelKey::parse(raw) {
            Some(key) => {
                sublabels.insert(key, label_text(raw, value)?);
            }
            None => warn!("ignoring unknown sublabel key '{}'", raw),
        }
    }
    Ok(sublabels)
}

fn label_text(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) | Value::Object(_) => Err(Error::InvalidInput(format!(
            "label '{}' must be text; only sublabels may be nested",
            key
        ))),
    }
}

// -------------------------------------------------------
// Process-wide labels
// -------------------------------------------------------

/// `None` until first replaced; reads fall back to the defaults.
static REGISTRY: RwLock<Option<Labels>> = RwLock::new(None);

/// The process-wide labels currently in effect.
pub fn labels() -> Labels {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}

/// Replace the process-wide labels with the defaults overridden by
/// `overrides`. Intended to be called once at start-up.
pub fn set_labels(overrides: &LabelOverrides) {
    let labels = Labels::default().merged(overrides);
    *REGISTRY.write().unwrap_or_else(PoisonError::into_inner) = Some(labels);
}

/// Restore the English defaults.
pub fn reset_labels() {
    *REGISTRY.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Labels for one render: the process-wide labels shadowed by
/// `overrides`. The shared copy is left untouched.
pub fn merge_for_render(overrides: Option<&LabelOverrides>) -> Labels {
    let current = labels();
    match overrides {
        Some(overrides) => current.merged(overrides),
        None => current,
    }
}
