//! Display model implementations for table and JSON output
//!
//! Display models turn API and state types into CLI-friendly rows with
//! column names suited for tables.

mod app;
mod common;
mod schema;

pub use app::{SpectrumAppDisplay, state_rows};
pub use schema::SchemaFieldDisplay;
