//! Display models for CLI output

pub mod display;

pub use display::{SchemaFieldDisplay, SpectrumAppDisplay, state_rows};
