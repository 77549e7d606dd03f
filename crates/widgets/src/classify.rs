//! Best-effort classification of untyped tool results.
//!
//! Tool servers return whatever JSON their backing API produced, without a
//! declared schema. The classifier infers which presentation shape the payload
//! most likely has so the chat UI can pick a renderer. It is a discriminator,
//! not a validator: arrays are judged by their first element only, so a
//! mixed-shape array takes the shape of whatever happens to come first.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

const MOVE_KEY: &str = "move";
const CONTEXT_KEYS: [&str; 2] = ["employee", "employer"];

/// Normalized projection of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum ClassifiedResult {
    /// Fields of a `move` entity with `employee`/`employer` promoted alongside them.
    #[serde(rename = "single-entity-with-context")]
    SingleEntityWithContext(Map<String, Value>),
    #[serde(rename = "list-of-invoices")]
    InvoiceList(Vec<Value>),
    #[serde(rename = "list-of-services")]
    ServiceList(Vec<Value>),
    /// Housing-style options: items carrying an address and a price.
    #[serde(rename = "list-of-options")]
    OptionList(Vec<Value>),
    #[serde(rename = "generic-list")]
    GenericList(Vec<Value>),
    /// Any other value, returned untouched.
    #[serde(rename = "passthrough-object")]
    Passthrough(Value),
}

impl ClassifiedResult {
    /// Wire tag of the variant, as used in serialized output and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedResult::SingleEntityWithContext(_) => "single-entity-with-context",
            ClassifiedResult::InvoiceList(_) => "list-of-invoices",
            ClassifiedResult::ServiceList(_) => "list-of-services",
            ClassifiedResult::OptionList(_) => "list-of-options",
            ClassifiedResult::GenericList(_) => "generic-list",
            ClassifiedResult::Passthrough(_) => "passthrough-object",
        }
    }

    /// Items of a list variant; `None` for the entity and passthrough variants.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            ClassifiedResult::InvoiceList(items)
            | ClassifiedResult::ServiceList(items)
            | ClassifiedResult::OptionList(items)
            | ClassifiedResult::GenericList(items) => Some(items),
            ClassifiedResult::SingleEntityWithContext(_) | ClassifiedResult::Passthrough(_) => None,
        }
    }

    /// Consume the result and return its payload as a plain JSON value.
    pub fn into_payload(self) -> Value {
        match self {
            ClassifiedResult::SingleEntityWithContext(fields) => Value::Object(fields),
            ClassifiedResult::InvoiceList(items)
            | ClassifiedResult::ServiceList(items)
            | ClassifiedResult::OptionList(items)
            | ClassifiedResult::GenericList(items) => Value::Array(items),
            ClassifiedResult::Passthrough(value) => value,
        }
    }
}

type ArrayRule = (fn(&Value) -> bool, fn(Vec<Value>) -> ClassifiedResult);

/// Evaluated in order against the first array element; first match wins.
const ARRAY_RULES: [ArrayRule; 3] = [
    (looks_like_invoice, ClassifiedResult::InvoiceList),
    (looks_like_service, ClassifiedResult::ServiceList),
    (looks_like_option, ClassifiedResult::OptionList),
];

/// Classify the raw text a tool returned.
///
/// Returns `None` when there is nothing to classify (absent or empty input)
/// or when the text is not valid JSON. Parse failures are logged and
/// swallowed; a broken payload must degrade to plain-text rendering rather
/// than fail the chat turn.
pub fn classify(raw: Option<&str>) -> Option<ClassifiedResult> {
    let text = raw.filter(|text| !text.is_empty())?;
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Some(classify_value(value)),
        Err(error) => {
            debug!(%error, "tool result is not JSON; skipping classification");
            None
        }
    }
}

/// Classify an already-parsed tool result.
pub fn classify_value(value: Value) -> ClassifiedResult {
    match value {
        Value::Object(envelope) if envelope.contains_key(MOVE_KEY) => {
            ClassifiedResult::SingleEntityWithContext(promote_move_context(envelope))
        }
        Value::Array(items) => classify_items(items),
        other => ClassifiedResult::Passthrough(other),
    }
}

fn classify_items(items: Vec<Value>) -> ClassifiedResult {
    let Some(first) = items.first() else {
        return ClassifiedResult::GenericList(items);
    };
    match ARRAY_RULES.iter().find(|(matches, _)| matches(first)) {
        Some((_, build)) => build(items),
        None => ClassifiedResult::GenericList(items),
    }
}

/// Spread the `move` entity's fields, then set `employee` and `employer`.
///
/// Promoted context keys overwrite same-named fields of the entity. Any other
/// sibling of `move` is dropped. Fields of the entity itself, including one
/// that happens to be named `move`, are copied unchanged.
fn promote_move_context(mut envelope: Map<String, Value>) -> Map<String, Value> {
    let mut entity = match envelope.remove(MOVE_KEY) {
        Some(Value::Object(fields)) => fields,
        _ => Map::new(),
    };
    for key in CONTEXT_KEYS {
        if let Some(context) = envelope.remove(key) {
            entity.insert(key.to_string(), context);
        }
    }
    entity
}

fn looks_like_invoice(item: &Value) -> bool {
    field_is_truthy(item, "invoiceNumber")
}

fn looks_like_service(item: &Value) -> bool {
    field_is_truthy(item, "type") && field_is_truthy(item, "status")
}

fn looks_like_option(item: &Value) -> bool {
    field_is_truthy(item, "address") && field_is_truthy(item, "price")
}

fn field_is_truthy(item: &Value, field: &str) -> bool {
    item.get(field).is_some_and(is_truthy)
}

/// JSON truthiness: `null`, `false`, zero and `""` are falsy; containers are
/// always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
