//! Cloudflare API data models
//!
//! Only the resources spectrumctl reads or writes are modelled.

mod spectrum;
mod zone;

pub use spectrum::{SpectrumApplication, SpectrumApplicationDns, SpectrumApplicationOriginDns};
pub use zone::Zone;
