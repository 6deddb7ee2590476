use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::error::Result;
use crate::geo::GeoResolver;
use crate::profiler::Profiler;
use crate::signals::EnvSignals;
use crate::transmit::Transmitter;
use crate::transport::Transport;
use crate::types::{Payload, RunReport};

/// Sequences profiler → geolocation lookup → transmission over one shared
/// transport.
///
/// The transmitted record describes the client's device and location in
/// detail; embedding applications must obtain explicit, disclosed consent
/// before running a collection.
pub struct Collector {
    profiler: Profiler,
    resolver: GeoResolver,
    transmitter: Transmitter,
}

impl Collector {
    pub fn new(transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            profiler: Profiler::new()?,
            resolver: GeoResolver::new(Arc::clone(&transport)),
            transmitter: Transmitter::new(transport),
        })
    }

    /// Point the geolocation lookup at a different endpoint.
    pub fn geo_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.resolver = self.resolver.with_endpoint(endpoint);
        self
    }

    /// Point payload delivery at a different endpoint.
    pub fn collect_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.transmitter = self.transmitter.with_endpoint(endpoint);
        self
    }

    /// Run one collection.
    ///
    /// Strictly sequential: the profile is assembled first, then the
    /// geolocation lookup, then delivery of the merged record. A failed
    /// lookup aborts the run with `None` — nothing is transmitted. A failed
    /// delivery does not abort: the merged payload already exists and comes
    /// back with `delivered: false`.
    pub async fn run(
        &self,
        signals: &dyn EnvSignals,
        visitor_name: Option<&str>,
    ) -> Option<RunReport> {
        let profile = self.profiler.profile(signals, visitor_name);
        debug!(
            "profile assembled: os={} browser={} device={}",
            profile.os.as_str(),
            profile.browser,
            profile.device_class.as_str()
        );

        let geo = match self.resolver.resolve().await {
            Ok(geo) => geo,
            Err(err) => {
                error!("aborting collection: {}", err);
                return None;
            }
        };

        let payload = Payload { profile, geo };
        let delivered = self.transmitter.deliver(&payload).await;
        if !delivered {
            warn!("payload not delivered; returning the collected record anyway");
        }

        Some(RunReport { payload, delivered })
    }
}
