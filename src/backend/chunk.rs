//! Response chunk normalization for streamed model output.
//!
//! Streamed replies arrive as heterogeneous JSON values: a plain string, or
//! an object carrying its text under one of several field names. Extraction
//! applies a fixed-precedence list of extractors; the first success wins.

use serde_json::Value;

/// Reply returned when the stream finished without a single usable chunk.
pub const EMPTY_RESPONSE_APOLOGY: &str =
    "I'm sorry, I didn't receive a response from the model.";

/// One incremental unit of a streamed response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseChunk(Value);

impl ResponseChunk {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Split one wire payload into chunks.
    ///
    /// A payload shaped like a generation response (an object with a
    /// `candidates` array) yields one chunk per candidate; any other JSON
    /// value yields a single chunk; a payload that is not JSON at all is
    /// kept as a plain-string chunk.
    pub fn from_payload(payload: &str) -> Vec<Self> {
        match serde_json::from_str::<Value>(payload) {
            Ok(value) => match value.get("candidates").and_then(Value::as_array) {
                Some(candidates) => candidates.iter().cloned().map(Self).collect(),
                None => vec![Self(value)],
            },
            Err(_) => vec![Self(Value::String(payload.to_string()))],
        }
    }

    /// Extract the chunk's text through the extractor chain.
    ///
    /// Falls back to a generic string rendering of the value when no
    /// extractor matches, so every chunk yields *some* text.
    pub fn text(&self) -> String {
        for extract in EXTRACTORS {
            if let Some(text) = extract(&self.0) {
                return text;
            }
        }
        self.0.to_string()
    }
}

type Extractor = fn(&Value) -> Option<String>;

/// Fixed precedence: `content`, then `text`, then `output`, then the value
/// itself when it is already a string.
const EXTRACTORS: &[Extractor] = &[content_field, text_field, output_field, plain_string];

fn content_field(value: &Value) -> Option<String> {
    let content = value.get("content")?;
    Some(match content {
        Value::String(text) => text.clone(),
        other => joined_part_text(other).unwrap_or_default(),
    })
}

fn text_field(value: &Value) -> Option<String> {
    value.get("text").and_then(Value::as_str).map(str::to_string)
}

fn output_field(value: &Value) -> Option<String> {
    value
        .get("output")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn plain_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Join the `text` of every part in a structured content value.
fn joined_part_text(content: &Value) -> Option<String> {
    let parts = content.get("parts")?.as_array()?;
    Some(
        parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect(),
    )
}

/// Assemble the final reply from retained chunk texts, in arrival order.
///
/// Retained texts are concatenated with no separator and trimmed; an empty
/// trim falls back to the last retained text, and an empty sequence yields
/// the fixed apology.
pub fn assemble_reply(parts: &[String]) -> String {
    let Some(last) = parts.last() else {
        return EMPTY_RESPONSE_APOLOGY.to_string();
    };

    let joined: String = parts.concat();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        last.clone()
    } else {
        trimmed.to_string()
    }
}
