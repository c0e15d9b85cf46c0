//! Loading raw tabular files into typed tables.

mod parser;
mod source;

pub use parser::{Reader, ReaderConfig};
pub use source::SourceMetadata;
