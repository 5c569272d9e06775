// ============================================================================
// url-filters - Constants
// Defaults shared by the codecs and the provider
// ============================================================================

// =============================================================================
// URL
// =============================================================================

/// Query parameter that holds the serialized filters when the provider is not
/// told otherwise.
pub const DEFAULT_SEARCH_PARAM_NAME: &str = "q";

// =============================================================================
// DECODING LIMITS
// =============================================================================

/// Upper bound on the number of values a single flatted payload may expand
/// into.
///
/// Flatted lets one entry be referenced any number of times, so a short
/// payload whose entries reference each other pairwise doubles in size at
/// every level once expanded into an owned tree.
pub const MAX_DECODED_NODES: usize = 65_536;

/// Upper bound on how deeply flatted entries may nest through references.
///
/// The root object and a filter's array use two levels, leaving
/// `MAX_DECODED_DEPTH - 2` for the nesting of a single filter value.
pub const MAX_DECODED_DEPTH: usize = 128;
