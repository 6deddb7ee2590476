mod geo;
mod payload;
mod profile;

pub use geo::*;
pub use payload::*;
pub use profile::*;

/// Sentinel for any signal or field the environment could not supply.
pub(crate) const NOT_AVAILABLE: &str = "N/A";
