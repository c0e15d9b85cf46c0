//! Persisting and presenting the cleaned table.

mod chart;
mod writer;

pub use chart::{ChartKind, ChartRenderer, ChartSpec, TextRenderer};
pub use writer::write_csv;
