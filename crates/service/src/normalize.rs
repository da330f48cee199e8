//! Input normalization applied at the wire/storage boundary.
//!
//! Clients send loosely typed JSON (numbers as strings, a single service
//! instead of a list, legacy Polish status labels). Everything here is
//! total: malformed input falls back to a default or is ignored, never an error.

use std::fmt;

use models::service_request::STATUS_ALIASES;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Integer grid position of a grave, rendered as `"x,y"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    /// Accepts `{x, y}` (numbers or numeric strings) or `"x,y"`. Anything
    /// else, or any unparseable component, yields 0 for that component.
    pub fn from_value(v: &Value) -> Self {
        match v {
            Value::Object(m) => Self { x: int_component(m.get("x")), y: int_component(m.get("y")) },
            Value::String(s) => Self::parse(s),
            _ => Self::default(),
        }
    }

    pub fn parse(s: &str) -> Self {
        let mut parts = s.split(',');
        let x = parts.next().map(parse_int).unwrap_or(0);
        let y = parts.next().map(parse_int).unwrap_or(0);
        Self { x, y }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

fn int_component(v: Option<&Value>) -> i32 {
    match v {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .or_else(|| n.as_f64().map(truncate))
            .unwrap_or(0),
        Some(Value::String(s)) => parse_int(s),
        _ => 0,
    }
}

fn parse_int(s: &str) -> i32 {
    let t = s.trim();
    t.parse::<i32>()
        .ok()
        .or_else(|| t.parse::<f64>().ok().filter(|f| f.is_finite()).map(truncate))
        .unwrap_or(0)
}

fn truncate(f: f64) -> i32 {
    // `as` saturates at the i32 bounds
    f.trunc() as i32
}

/// Canonical service request status. Unrecognized labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
    Other(String),
}

impl RequestStatus {
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();
        let canonical = STATUS_ALIASES
            .iter()
            .find(|(_, aliases)| aliases.contains(&key.as_str()))
            .map(|(canonical, _)| *canonical);
        match canonical {
            Some("pending") => Self::Pending,
            Some("in_progress") => Self::InProgress,
            Some("completed") => Self::Completed,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Other(s) => s,
        }
    }
}

impl Default for RequestStatus {
    fn default() -> Self { Self::Pending }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RequestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Wrap a single service into a list and serialize it for the text column.
pub fn services_to_text(v: &Value) -> String {
    let items = match v {
        Value::Array(items) => items.clone(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    };
    Value::Array(items).to_string()
}

/// Stored services text back to a list. Empty or unparseable text is `[]`.
pub fn services_from_text(text: Option<&str>) -> Vec<Value> {
    let Some(t) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(t) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Null) | Err(_) => Vec::new(),
        Ok(other) => vec![other],
    }
}

/// Number or numeric string as `f64`; anything else is `None`.
pub fn coerce_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

pub fn coerce_i32(v: &Value) -> Option<i32> {
    match v {
        Value::Number(n) => n.as_i64().and_then(|i| i32::try_from(i).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

pub fn coerce_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "tak" => Some(true),
            "false" | "0" | "no" | "off" | "nie" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Strings pass through; numbers and booleans become their decimal text.
pub fn coerce_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// serde adapters, used with `#[serde(default, deserialize_with = "...")]`

pub fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(coerce_text(&Value::deserialize(d)?))
}

pub fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(coerce_f64(&Value::deserialize(d)?))
}

pub fn lenient_i32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Ok(coerce_i32(&Value::deserialize(d)?))
}

pub fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(coerce_bool(&Value::deserialize(d)?))
}

/// Patch semantics for nullable text columns: absent → `None` (via
/// `#[serde(default)]`), `null` → `Some(None)`, text → `Some(Some(..))`.
/// Values that are neither text nor null are ignored.
pub fn patch_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<String>>, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::Null => Some(None),
        other => coerce_text(&other).map(Some),
    })
}
