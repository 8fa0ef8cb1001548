//! Reference data files and serialization helpers.

pub mod json;
pub mod reference;
pub mod verb_index;
pub mod word_lists;

pub use json::*;
pub use reference::ReferenceData;
pub use verb_index::{extract_infinitives, parse_verb_entry};
pub use word_lists::*;
