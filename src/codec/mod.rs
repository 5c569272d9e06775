// ============================================================================
// url-filters - Codecs
// Text <-> filters collection strategies
// ============================================================================
//
// The rest of the crate only sees the Serializer / Deserializer pair. Flatted
// is the default; JsonCodec trades sharing of repeated strings for URLs a
// person can read. Any closure of the right shape is a codec too.
// ============================================================================

pub mod flatted;
mod json;

pub use flatted::Flatted;
pub use json::JsonCodec;

use serde_json::Value;

use crate::core::error::CodecError;
use crate::core::types::Filters;

// =============================================================================
// CAPABILITIES
// =============================================================================

/// Encodes a filters collection as text.
pub trait Serializer {
    fn serialize(&self, filters: &Filters) -> String;
}

/// Decodes text back into a filters collection.
pub trait Deserializer {
    fn deserialize(&self, text: &str) -> Result<Filters, CodecError>;
}

impl<F> Serializer for F
where
    F: Fn(&Filters) -> String,
{
    fn serialize(&self, filters: &Filters) -> String {
        self(filters)
    }
}

impl<F> Deserializer for F
where
    F: Fn(&str) -> Result<Filters, CodecError>,
{
    fn deserialize(&self, text: &str) -> Result<Filters, CodecError> {
        self(text)
    }
}

// =============================================================================
// CANONICAL FORM
// =============================================================================

/// Deterministic text form of a single value, used to compare structured
/// values by content.
pub fn canonical(value: &Value) -> String {
    flatted::stringify(value)
}
