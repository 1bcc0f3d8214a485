//! Placeholder coaching advice.
//!
//! Turns a loosely shaped request body into a [`CoachRequest`] with defaults
//! applied, then builds a templated [`CoachResponse`]. The advice text and the
//! example ranges are fixed; no poker evaluation happens here.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value};

/// Stage used when the request does not name one
pub const DEFAULT_STAGE: &str = "preflop";

/// Example hero range returned with every answer
pub const HERO_RANGE: &str = "Tight-aggressive preflop open 15%";

/// Example villain range returned with every answer
pub const VILLAIN_RANGE: &str = "Blind defend ~30%";

/// A coaching request with every field resolved.
///
/// Fields keep whatever JSON value the caller sent; only absent keys get defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachRequest {
    pub stage: Value,
    pub action: Value,
    pub context: Value,
}

impl Default for CoachRequest {
    fn default() -> Self {
        Self {
            stage: Value::String(DEFAULT_STAGE.to_string()),
            action: Value::String(String::new()),
            context: Value::Object(Map::new()),
        }
    }
}

impl CoachRequest {
    /// Build a request from a raw body.
    ///
    /// Anything that is not a JSON object (empty body, invalid JSON, `null`,
    /// arrays, scalars) is replaced by an empty object before the fields are read.
    pub fn from_body(body: &[u8]) -> Self {
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                tracing::debug!(kind = json_kind(&other), "Coach body is not an object, using defaults");
                Map::new()
            }
            Err(e) => {
                if !body.is_empty() {
                    tracing::debug!(error = %e, "Coach body is not valid JSON, using defaults");
                }
                Map::new()
            }
        };

        Self::from_fields(fields)
    }

    /// Resolve the three fields from a JSON object.
    ///
    /// A key that is present is taken as-is, whatever its type.
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        let defaults = Self::default();

        let stage = fields.remove("stage").unwrap_or(defaults.stage);
        let action = fields.remove("action").unwrap_or(defaults.action);
        let context = fields.remove("context").unwrap_or(defaults.context);

        Self {
            stage,
            action,
            context,
        }
    }
}

/// Example ranges attached to every answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranges {
    pub hero: &'static str,
    pub villain: &'static str,
}

impl Ranges {
    pub const EXAMPLE: Ranges = Ranges {
        hero: HERO_RANGE,
        villain: VILLAIN_RANGE,
    };
}

/// The parts of the request sent back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Echo {
    pub stage: Value,
    pub context: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachResponse {
    pub message: String,
    pub ranges: Ranges,
    pub echo: Echo,
}

/// Build the templated advice message.
pub fn advice_message(stage: &str, action: &str) -> String {
    format!(
        "At {stage}, consider ranges, position, and stack depth. \
         You suggested: '{action}'. Start by evaluating opponent ranges, pot odds, and EV."
    )
}

/// Text of a field as it appears in the message: strings verbatim, anything
/// else as its JSON text.
pub fn field_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Produce the placeholder answer for a resolved request.
pub fn advise(request: CoachRequest) -> CoachResponse {
    CoachResponse {
        message: advice_message(&field_text(&request.stage), &field_text(&request.action)),
        ranges: Ranges::EXAMPLE,
        echo: Echo {
            stage: request.stage,
            context: request.context,
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
