use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

use crate::utils::AppError;

/// Renders a BSON value the way the web client reads it: ids as hex
/// strings, datetimes as RFC 3339, everything else as plain JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(text) => Value::String(text),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    let fields: Map<String, Value> = doc
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();
    Value::Object(fields)
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

/// Client bodies are stored verbatim, but they still have to be objects.
pub fn json_to_document(body: Value) -> Result<Document, AppError> {
    if !body.is_object() {
        return Err(AppError::InvalidRequest(
            "request body must be a JSON object".to_string(),
        ));
    }

    bson::to_document(&body)
        .map_err(|e| AppError::InvalidRequest(format!("Unsupported document body: {}", e)))
}
