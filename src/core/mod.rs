// ============================================================================
// url-filters - Core Module
// Data model, defaults and error types
// ============================================================================

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use error::{CodecError, FiltersError};
pub use types::{FilterInput, FilterValue, FilterValues, Filters, SetFilterInput};
