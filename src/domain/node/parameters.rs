use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::node::node_kind::NodeKind;
use crate::error::ConversionError;

/// How a jammer behaves once active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackStrategy {
    #[default]
    Constant,
    Reactive,
    Random,
}

impl AttackStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackStrategy::Constant => "constant",
            AttackStrategy::Reactive => "reactive",
            AttackStrategy::Random => "random",
        }
    }
}

impl fmt::Display for AttackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackStrategy {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(AttackStrategy::Constant),
            "reactive" => Ok(AttackStrategy::Reactive),
            "random" => Ok(AttackStrategy::Random),
            _ => Err(ConversionError::UnknownStrategy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Flag(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Flag(flag) => write!(f, "{}", flag),
            ParameterValue::Integer(integer) => write!(f, "{}", integer),
            ParameterValue::Number(number) => write!(f, "{}", number),
            ParameterValue::Text(text) => f.write_str(text),
        }
    }
}

/// Parameter set of a single node. Keys serialize in sorted order so the
/// same bag always produces the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag(BTreeMap<String, ParameterValue>);

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.0.get(key)
    }

    /// Numeric value of `key`; whole-number fields are widened to `f64`.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(ParameterValue::Number(value)) => Some(*value),
            Some(ParameterValue::Integer(value)) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(ParameterValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(ParameterValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ParameterValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ParameterValue) -> Option<ParameterValue> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParameterValue> {
        self.0.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("'{key}' is not a parameter of {kind} nodes")]
    UnknownKey { kind: NodeKind, key: String },

    #[error("{kind} node is missing required parameter '{key}'")]
    MissingKey { kind: NodeKind, key: String },

    #[error("'{raw}' is not a number (parameter '{key}')")]
    NotANumber { key: String, raw: String },

    #[error("Parameter '{key}' must be a finite number")]
    NotFinite { key: String },

    #[error("'{raw}' is not true or false (parameter '{key}')")]
    NotAFlag { key: String, raw: String },

    #[error("'{value}' is not one of constant, reactive, random (parameter '{key}')")]
    InvalidStrategy { key: String, value: String },

    #[error("Parameter '{key}' must not be empty")]
    EmptyText { key: String },

    #[error("Parameter '{key}' expects a {expected} value")]
    WrongType { key: String, expected: FieldType },
}

impl ParameterError {
    /// Numeric parse failures are recovered by keeping the previous value.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ParameterError::NotANumber { .. } | ParameterError::NotFinite { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Number,
    Flag,
    Strategy,
    Text,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Integer => "whole number",
            FieldType::Number => "numeric",
            FieldType::Flag => "boolean",
            FieldType::Strategy => "strategy",
            FieldType::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Integer(i64),
    Number(f64),
    Flag(bool),
    Text(&'static str),
}

impl FieldDefault {
    fn to_value(self) -> ParameterValue {
        match self {
            FieldDefault::Integer(value) => ParameterValue::Integer(value),
            FieldDefault::Number(value) => ParameterValue::Number(value),
            FieldDefault::Flag(value) => ParameterValue::Flag(value),
            FieldDefault::Text(value) => ParameterValue::Text(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub field_type: FieldType,
    pub default: FieldDefault,
}

const fn number(key: &'static str, default: f64) -> FieldSpec {
    FieldSpec { key, field_type: FieldType::Number, default: FieldDefault::Number(default) }
}

const fn integer(key: &'static str, default: i64) -> FieldSpec {
    FieldSpec { key, field_type: FieldType::Integer, default: FieldDefault::Integer(default) }
}

const fn strategy(default: &'static str) -> FieldSpec {
    FieldSpec { key: "strategy", field_type: FieldType::Strategy, default: FieldDefault::Text(default) }
}

pub const TX_POWER: &str = "txPower";

const VEHICLE_ROUTE_FIELDS: &[FieldSpec] = &[
    number(TX_POWER, 23.0),
    integer("packetSize", 300),
    number("interval", 0.1),
    FieldSpec { key: "application", field_type: FieldType::Text, default: FieldDefault::Text("voip") },
    FieldSpec { key: "mitigation", field_type: FieldType::Flag, default: FieldDefault::Flag(false) },
];

const MOBILE_JAMMER_FIELDS: &[FieldSpec] =
    &[number(TX_POWER, 30.0), strategy("constant"), number("start", 20.0), number("stop", 120.0), number("speed", 10.0)];

const STATIC_JAMMER_FIELDS: &[FieldSpec] = &[number(TX_POWER, 40.0), strategy("reactive"), number("start", 0.0), number("stop", 120.0)];

const ROADSIDE_UNIT_FIELDS: &[FieldSpec] = &[number(TX_POWER, 30.0)];

/// The legal keys, their types and defaults for one node kind.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSchema {
    kind: NodeKind,
    fields: &'static [FieldSpec],
}

impl ParameterSchema {
    pub fn for_kind(kind: NodeKind) -> Self {
        let fields = match kind {
            NodeKind::VehicleRoute => VEHICLE_ROUTE_FIELDS,
            NodeKind::MobileJammer => MOBILE_JAMMER_FIELDS,
            NodeKind::StaticJammer => STATIC_JAMMER_FIELDS,
            NodeKind::RoadsideUnit => ROADSIDE_UNIT_FIELDS,
        };
        Self { kind, fields }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn defaults(&self) -> ParameterBag {
        let mut bag = ParameterBag::new();
        for field in self.fields {
            bag.insert(field.key, field.default.to_value());
        }
        bag
    }

    /// Parses the raw text of a form field into a typed value for `key`.
    ///
    /// Numbers use a strict float parser: surrounding whitespace is ignored,
    /// anything else that is not a complete finite number is rejected. Whole
    /// number fields additionally reject fractions and exponents.
    pub fn parse_field(&self, key: &str, raw: &str) -> Result<ParameterValue, ParameterError> {
        let field = self.field(key).ok_or_else(|| ParameterError::UnknownKey { kind: self.kind, key: key.to_string() })?;
        let trimmed = raw.trim();

        let value = match field.field_type {
            FieldType::Integer => {
                let integer = trimmed.parse::<i64>().map_err(|_| ParameterError::NotANumber { key: key.to_string(), raw: raw.to_string() })?;
                ParameterValue::Integer(integer)
            }
            FieldType::Number => {
                let number = trimmed.parse::<f64>().map_err(|_| ParameterError::NotANumber { key: key.to_string(), raw: raw.to_string() })?;
                ParameterValue::Number(number)
            }
            FieldType::Flag => match trimmed {
                "true" | "on" | "1" => ParameterValue::Flag(true),
                "false" | "off" | "0" => ParameterValue::Flag(false),
                _ => return Err(ParameterError::NotAFlag { key: key.to_string(), raw: raw.to_string() }),
            },
            FieldType::Strategy | FieldType::Text => ParameterValue::Text(trimmed.to_string()),
        };

        self.check_value(field, &value)?;
        Ok(value)
    }

    pub fn validate_value(&self, key: &str, value: &ParameterValue) -> Result<(), ParameterError> {
        let field = self.field(key).ok_or_else(|| ParameterError::UnknownKey { kind: self.kind, key: key.to_string() })?;
        self.check_value(field, value)
    }

    /// Checks a whole bag: no foreign keys, no missing keys, every value legal.
    pub fn validate(&self, bag: &ParameterBag) -> Result<(), ParameterError> {
        for (key, value) in bag.iter() {
            self.validate_value(key, value)?;
        }

        if let Some(missing) = self.fields.iter().find(|field| bag.get(field.key).is_none()) {
            return Err(ParameterError::MissingKey { kind: self.kind, key: missing.key.to_string() });
        }
        Ok(())
    }

    fn check_value(&self, field: &FieldSpec, value: &ParameterValue) -> Result<(), ParameterError> {
        let key = field.key.to_string();

        match (field.field_type, value) {
            (FieldType::Integer, ParameterValue::Integer(_)) => {}
            (FieldType::Number, ParameterValue::Number(number)) => {
                if !number.is_finite() {
                    return Err(ParameterError::NotFinite { key });
                }
            }
            (FieldType::Number, ParameterValue::Integer(_)) => {}
            (FieldType::Flag, ParameterValue::Flag(_)) => {}
            (FieldType::Strategy, ParameterValue::Text(text)) => {
                if text.parse::<AttackStrategy>().is_err() {
                    return Err(ParameterError::InvalidStrategy { key, value: text.clone() });
                }
            }
            (FieldType::Text, ParameterValue::Text(text)) => {
                if text.trim().is_empty() {
                    return Err(ParameterError::EmptyText { key });
                }
            }
            (expected, _) => return Err(ParameterError::WrongType { key, expected }),
        }
        Ok(())
    }
}

/// Default parameter bag for a freshly placed node of `kind`.
pub fn defaults_for(kind: NodeKind) -> ParameterBag {
    ParameterSchema::for_kind(kind).defaults()
}
