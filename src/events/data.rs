//! Event records and their free-form parameter bags

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tags for the event types that ship with a default handler
pub mod event_types {
    pub const FINANCIAL_PHASE: &str = "financial-phase";
    pub const RETIREMENT: &str = "retirement";
    pub const INCOME_PULSE: &str = "outstanding-income";
    pub const LARGE_EXPENSE: &str = "large-expense";
    pub const STUDENT_LOAN: &str = "student-loan";
    pub const RECURRING_EXPENSE: &str = "recurring-expense";
    pub const HOUSE: &str = "house";
    pub const CAR_PURCHASE: &str = "car-purchase";
    pub const SIDE_HUSTLE: &str = "side-hustle";
    pub const INVESTMENT: &str = "investment";
    pub const MARKET_EVENT: &str = "market-event";
}

/// Opaque identity of an event, stable for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single parameter value as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Numeric reading of the value; numeric text is accepted
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            ParamValue::Null => return None,
            ParamValue::Number(n) => *n,
            ParamValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<Option<f64>> for ParamValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(ParamValue::Null, ParamValue::Number)
    }
}

/// Type-specific parameters of an event, keyed by field name
///
/// Shape is never validated. Every accessor is total so handlers can
/// default missing fields instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Numeric field, `None` when missing, null or not a number
    pub fn number(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(ParamValue::as_number)
    }

    pub fn number_or(&self, name: &str, default: f64) -> f64 {
        self.number(name).unwrap_or(default)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(ParamValue::as_text)
    }

    /// Annual figure from a pair of fields: a non-zero annual value wins,
    /// otherwise the monthly value times twelve, otherwise zero
    pub fn annual_or_monthly(&self, annual: &str, monthly: &str) -> f64 {
        match self.number(annual) {
            Some(value) if value != 0.0 => value,
            _ => self.number(monthly).map_or(0.0, |m| m * 12.0),
        }
    }

    /// Merge another bag into this one, overwriting shared fields
    pub fn merge(&mut self, updates: Params) {
        self.0.extend(updates.0);
    }

    /// Raw value for display, `Null` when missing
    pub fn display_value(&self, name: &str) -> ParamValue {
        self.0.get(name).cloned().unwrap_or(ParamValue::Null)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A discrete, user-placed financial occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Identity, used for removal and active-instance checks, never for ordering
    pub id: EventId,

    /// Type tag resolved through the handler registry
    #[serde(rename = "type")]
    pub event_type: String,

    /// Placement age, may lie outside the simulated range
    pub age: i32,

    /// Type-specific parameters
    #[serde(default)]
    pub params: Params,
}

impl Event {
    pub fn new(id: EventId, event_type: &str, age: i32, params: Params) -> Self {
        Self {
            id,
            event_type: event_type.to_string(),
            age,
            params,
        }
    }

    /// Whole years elapsed since placement (negative before it)
    pub fn years_since(&self, age: i32) -> i64 {
        i64::from(age) - i64::from(self.age)
    }
}
