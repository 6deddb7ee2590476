mod collector;
mod error;
mod geo;
mod profiler;
mod signals;
mod transmit;
mod transport;
mod types;

pub use collector::Collector;
pub use error::{Error, Result};
pub use geo::GeoResolver;
pub use profiler::Profiler;
pub use signals::{ConnectionHint, EnvSignals, EnvSnapshot};
pub use transmit::Transmitter;
pub use transport::{HttpTransport, Method, Transport, TransportRequest, TransportResponse};
pub use types::*;
