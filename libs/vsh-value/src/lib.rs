mod record;
mod value;

pub use record::Record;
pub use value::{record_to_json, Value};

/// A finite, materialised sequence of records — what flows between pipeline
/// stages. Streams are built eagerly; there is no lazy/incremental
/// evaluation (see SPEC_FULL.md §5).
pub type Stream = Vec<Record>;
