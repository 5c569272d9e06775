// ============================================================================
// url-filters - JSON Codec
// ============================================================================

use serde_json::Value;

use super::{Deserializer, Serializer};
use crate::core::error::CodecError;
use crate::core::types::Filters;

/// Plain JSON object-of-arrays encoding, e.g. `{"color":["red","blue"]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Serializer for JsonCodec {
    fn serialize(&self, filters: &Filters) -> String {
        filters.to_value().to_string()
    }
}

impl Deserializer for JsonCodec {
    fn deserialize(&self, text: &str) -> Result<Filters, CodecError> {
        let value: Value = serde_json::from_str(text)?;
        Filters::from_value(value)
    }
}
