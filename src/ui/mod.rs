//! Presentation layer: panel chrome and the RAW-data table view.

pub mod panels;
pub mod table;
