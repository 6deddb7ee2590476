use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::transport::{Transport, TransportRequest};

/// Default collection endpoint payloads are delivered to.
const COLLECT_ENDPOINT: &str = "https://collect.clientbeacon.dev/v1/ingest";

/// Delivers serialized payloads to the collection endpoint.
///
/// Never fails outward: every error path degrades to `false` after logging.
pub struct Transmitter {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl Transmitter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoint: COLLECT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// POST `payload` as JSON. `true` only for a 2xx response; soft
    /// (non-2xx) and hard (transport) failures both come back as `false`,
    /// distinguishable only in the logs.
    pub async fn deliver<T: Serialize>(&self, payload: &T) -> bool {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(err) => {
                error!("payload serialization failed: {}", err);
                return false;
            }
        };

        match self
            .transport
            .send(TransportRequest::post_json(&self.endpoint, body))
            .await
        {
            Ok(response) if response.is_success() => {
                info!("payload accepted by {}", self.endpoint);
                true
            }
            Ok(response) => {
                error!("collection endpoint returned HTTP {}", response.status);
                false
            }
            Err(err) => {
                error!("payload delivery failed: {}", err);
                false
            }
        }
    }
}
