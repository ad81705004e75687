//! The remote vocabulary: term kinds, document fetching, and the mapping
//! from published definitions to local records.

pub mod fetch;
pub mod kind;
pub mod memory;
pub mod parse;
pub mod schema;
