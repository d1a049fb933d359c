//! Document payload extraction.
//!
//! Turns the raw bytes of one corpus file into a single payload text.
//!
//! # Classification
//!
//! | File content | Payload | Text |
//! |--------------|---------|------|
//! | JSON object with a `text` member | [`DocumentPayload::DirectText`] | the member, verbatim |
//! | any other JSON value | [`DocumentPayload::Structured`] | canonical JSON rendering |
//! | not JSON | [`DocumentPayload::RawFallback`] | the file content |
//!
//! Classification runs an ordered list of [`ParseStrategy`] values and takes
//! the first success. Failures are collected and reported together only
//! when every strategy fails.
//!
//! # Canonical JSON rendering
//!
//! Structured payloads are flattened with `", "` between elements and
//! `": "` between keys and values, keys in document order, and non-ASCII
//! characters kept as-is. The spaces matter: the chunker splits on
//! whitespace, so `{"a": 1, "b": 2}` yields words where the compact form
//! would be one unbroken token.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

use kb_retriever_core::normalize::normalize_text;

/// Name of the JSON member that carries a document's body text.
pub const TEXT_FIELD: &str = "text";

/// The shapes a corpus file can take.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentPayload {
    /// A record with a designated body-text member.
    DirectText(String),
    /// Any other JSON value, flattened to text.
    Structured(Value),
    /// Content that is not JSON at all.
    RawFallback(String),
}

impl DocumentPayload {
    /// Render the payload as normalized plain text.
    pub fn into_text(self) -> Result<String> {
        let text = match self {
            DocumentPayload::DirectText(text) => text,
            DocumentPayload::Structured(value) => to_canonical_json(&value)?,
            DocumentPayload::RawFallback(raw) => raw,
        };
        Ok(normalize_text(&text))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentPayload::DirectText(_) => "direct_text",
            DocumentPayload::Structured(_) => "structured",
            DocumentPayload::RawFallback(_) => "raw",
        }
    }
}

/// One way of interpreting a decoded document.
pub trait ParseStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn parse(&self, raw: &str) -> Result<DocumentPayload>;
}

/// Parse the content as JSON.
pub struct JsonStrategy;

impl ParseStrategy for JsonStrategy {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, raw: &str) -> Result<DocumentPayload> {
        let value: Value = serde_json::from_str(raw.trim_start_matches('\u{feff}'))?;
        match value {
            Value::Object(mut map) if map.contains_key(TEXT_FIELD) => {
                let text = match map.remove(TEXT_FIELD) {
                    Some(Value::String(s)) => s,
                    Some(other) => to_canonical_json(&other)?,
                    None => String::new(),
                };
                Ok(DocumentPayload::DirectText(text))
            }
            other => Ok(DocumentPayload::Structured(other)),
        }
    }
}

/// Take the content as plain text. Always succeeds.
pub struct RawTextStrategy;

impl ParseStrategy for RawTextStrategy {
    fn name(&self) -> &'static str {
        "raw_text"
    }

    fn parse(&self, raw: &str) -> Result<DocumentPayload> {
        Ok(DocumentPayload::RawFallback(raw.to_string()))
    }
}

/// JSON first, plain text as the last resort.
pub fn default_strategies() -> Vec<Box<dyn ParseStrategy>> {
    vec![Box::new(JsonStrategy), Box::new(RawTextStrategy)]
}

/// Decode file bytes as UTF-8.
pub fn decode_document(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).with_context(|| "not valid UTF-8")
}

/// Run `strategies` in order and return the first payload produced.
///
/// The error, when every strategy fails, lists each strategy's failure.
pub fn classify(raw: &str, strategies: &[Box<dyn ParseStrategy>]) -> Result<DocumentPayload> {
    let mut failures = Vec::new();
    for strategy in strategies {
        match strategy.parse(raw) {
            Ok(payload) => return Ok(payload),
            Err(e) => failures.push(format!("{}: {}", strategy.name(), e)),
        }
    }
    Err(anyhow!("no parse strategy succeeded ({})", failures.join("; ")))
}

/// Serialize `value` with `", "` / `": "` separators.
pub fn to_canonical_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
