//! HTML parsing and field extraction

pub mod dates;
pub mod extract;
pub mod selectors;

pub use extract::{FieldExtractor, DEFAULT_CATEGORY};
pub use selectors::RecordSelectors;
