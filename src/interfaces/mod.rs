//! File formats at the edge of the crate: CSV and JSON transaction feeds in,
//! JSON reward summaries out.

pub mod csv;
pub mod json;
