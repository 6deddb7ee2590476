use serde::Serialize;

use super::{ClientProfile, GeoRecord};

/// Merged transmission record: profile fields followed by geolocation
/// fields. The two field sets are disjoint, so flattening cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    #[serde(flatten)]
    pub profile: ClientProfile,
    #[serde(flatten)]
    pub geo: GeoRecord,
}

/// Outcome of a full collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub payload: Payload,
    /// Whether the collection endpoint accepted the payload.
    pub delivered: bool,
}
