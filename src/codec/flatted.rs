// ============================================================================
// url-filters - Flatted Codec
// JSON-compatible encoding that stores every nested value once
// ============================================================================
//
// Wire format: a JSON array whose entry 0 is the root. Objects, arrays and
// strings nested anywhere are moved into their own entries and replaced by
// the entry index written as a decimal string. Numbers, booleans and null
// stay inline. Equal strings share one entry.
//
//   {"color":["red","blue"]}  <->  [{"color":"1"},["2","3"],"red","blue"]
//
// Entries may reference each other freely. Decoding expands shared entries
// by value and rejects references back into an entry that is still being
// expanded, so self-referential payloads fail instead of looping.
// ============================================================================

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::{Deserializer, Serializer};
use crate::core::constants::{MAX_DECODED_DEPTH, MAX_DECODED_NODES};
use crate::core::error::CodecError;
use crate::core::types::Filters;

// =============================================================================
// CODEC
// =============================================================================

/// The default codec: flatted text.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use url_filters::codec::{Deserializer, Flatted, Serializer};
/// use url_filters::Filters;
///
/// let mut filters = Filters::new();
/// filters.insert("color", vec![json!("red"), json!("blue")]);
///
/// let text = Flatted.serialize(&filters);
/// assert_eq!(text, r#"[{"color":"1"},["2","3"],"red","blue"]"#);
/// assert_eq!(Flatted.deserialize(&text).unwrap(), filters);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Flatted;

impl Serializer for Flatted {
    fn serialize(&self, filters: &Filters) -> String {
        stringify(&filters.to_value())
    }
}

impl Deserializer for Flatted {
    fn deserialize(&self, text: &str) -> Result<Filters, CodecError> {
        Filters::from_value(parse(text)?)
    }
}

// =============================================================================
// STRINGIFY
// =============================================================================

#[derive(Default)]
struct Encoder<'a> {
    entries: Vec<&'a Value>,
    strings: HashMap<&'a str, usize>,
}

impl<'a> Encoder<'a> {
    /// Store `value` as an entry and return its index. Strings are stored once.
    fn intern(&mut self, value: &'a Value) -> usize {
        if let Value::String(text) = value {
            if let Some(&index) = self.strings.get(text.as_str()) {
                return index;
            }
            self.strings.insert(text.as_str(), self.entries.len());
        }
        self.entries.push(value);
        self.entries.len() - 1
    }

    /// What a nested value turns into inside its parent entry.
    fn reference(&mut self, value: &'a Value) -> Value {
        match value {
            Value::Object(_) | Value::Array(_) | Value::String(_) => {
                Value::String(self.intern(value).to_string())
            }
            inline => inline.clone(),
        }
    }
}

/// Encode any value as flatted text.
///
/// Output is deterministic: the same value always produces the same text,
/// which makes it usable as a canonical form for comparisons.
pub fn stringify(value: &Value) -> String {
    let mut encoder = Encoder::default();
    encoder.intern(value);

    let mut output = Vec::new();
    let mut index = 0;
    // Entries are appended while earlier ones are flattened.
    while let Some(&entry) = encoder.entries.get(index) {
        let flat = match entry {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, nested)| (key.clone(), encoder.reference(nested)))
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.iter().map(|nested| encoder.reference(nested)).collect())
            }
            literal => literal.clone(),
        };
        output.push(flat);
        index += 1;
    }

    Value::Array(output).to_string()
}

// =============================================================================
// PARSE
// =============================================================================

struct Decoder<'a> {
    entries: &'a [Value],
    /// Entries currently being expanded, innermost last.
    ancestors: Vec<usize>,
    nodes: usize,
}

impl Decoder<'_> {
    fn count(&mut self) -> Result<(), CodecError> {
        self.nodes += 1;
        if self.nodes > MAX_DECODED_NODES {
            return Err(CodecError::TooManyNodes(MAX_DECODED_NODES));
        }
        Ok(())
    }

    fn revive(&mut self, index: usize) -> Result<Value, CodecError> {
        if self.ancestors.contains(&index) {
            return Err(CodecError::CircularReference(index));
        }
        if self.ancestors.len() >= MAX_DECODED_DEPTH {
            return Err(CodecError::TooDeep(MAX_DECODED_DEPTH));
        }
        self.count()?;

        let entries = self.entries;
        let entry = entries
            .get(index)
            .ok_or(CodecError::DanglingReference(index))?;

        self.ancestors.push(index);
        let revived = match entry {
            Value::Object(map) => {
                let mut out = Map::new();
                for (key, nested) in map {
                    out.insert(key.clone(), self.resolve(nested)?);
                }
                Value::Object(out)
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|nested| self.resolve(nested))
                    .collect::<Result<_, _>>()?,
            ),
            literal => literal.clone(),
        };
        self.ancestors.pop();

        Ok(revived)
    }

    fn resolve(&mut self, nested: &Value) -> Result<Value, CodecError> {
        let Value::String(reference) = nested else {
            self.count()?;
            return Ok(nested.clone());
        };

        let index: usize = reference
            .parse()
            .map_err(|_| CodecError::InvalidReference(reference.clone()))?;

        let entries = self.entries;
        match entries.get(index) {
            Some(Value::Object(_) | Value::Array(_)) => self.revive(index),
            Some(literal) => {
                self.count()?;
                Ok(literal.clone())
            }
            None => Err(CodecError::DanglingReference(index)),
        }
    }
}

/// Decode flatted text into a value.
pub fn parse(text: &str) -> Result<Value, CodecError> {
    let Value::Array(entries) = serde_json::from_str::<Value>(text)? else {
        return Err(CodecError::NotAnArray);
    };

    match entries.first() {
        None => Err(CodecError::EmptyPayload),
        Some(Value::Object(_) | Value::Array(_)) => Decoder {
            entries: &entries,
            ancestors: Vec::new(),
            nodes: 0,
        }
        .revive(0),
        Some(literal) => Ok(literal.clone()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
