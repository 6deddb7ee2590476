use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::{Transport, TransportRequest};
use crate::types::{GeoRecord, NOT_AVAILABLE};

/// Public endpoint of the geolocation service.
const GEO_ENDPOINT: &str = "http://ip-api.com/json";
/// Attribution tag stamped on every record.
const GEO_SOURCE: &str = "ip-api.com";

/// Wire shape of a geolocation lookup response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoResponse {
    status: Option<String>,
    /// Only present when `status` reports a failure.
    message: Option<String>,
    query: Option<String>,
    isp: Option<String>,
    #[serde(rename = "as")]
    as_label: Option<String>,
    country_code: Option<String>,
    region_name: Option<String>,
    city: Option<String>,
    zip: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    timezone: Option<String>,
}

/// Resolves the caller's public IP to a normalized [`GeoRecord`] with a
/// single lookup. No retry, no caching.
pub struct GeoResolver {
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl GeoResolver {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoint: GEO_ENDPOINT.to_string(),
        }
    }

    /// Point the resolver at a different endpoint (tests, self-hosted
    /// mirrors).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// One GET; success requires a 2xx status and a body whose `status`
    /// field says `success`.
    pub async fn resolve(&self) -> Result<GeoRecord> {
        debug!("looking up geolocation via {}", self.endpoint);
        let response = self
            .transport
            .send(TransportRequest::get(&self.endpoint))
            .await?;
        if !response.is_success() {
            return Err(Error::GeoStatus(response.status));
        }

        let decoded: GeoResponse = serde_json::from_str(&response.body)?;
        if decoded.status.as_deref() != Some("success") {
            return Err(Error::GeoLookup(
                decoded.message.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        Ok(normalize(decoded))
    }
}

/// Fixed field renaming/combination from the wire shape, absent fields
/// becoming sentinels.
fn normalize(resp: GeoResponse) -> GeoRecord {
    let coords = match (resp.lat, resp.lon) {
        (Some(lat), Some(lon)) => format!("{},{}", lat, lon),
        _ => NOT_AVAILABLE.to_string(),
    };

    GeoRecord {
        ip: or_sentinel(resp.query),
        isp: or_sentinel(resp.isp),
        asn: or_sentinel(resp.as_label),
        country_code: or_sentinel(resp.country_code),
        region_name: or_sentinel(resp.region_name),
        city: or_sentinel(resp.city),
        zip: or_sentinel(resp.zip),
        coords,
        timezone: or_sentinel(resp.timezone),
        api_source: GEO_SOURCE.to_string(),
    }
}

fn or_sentinel(field: Option<String>) -> String {
    field.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> GeoResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn coords_render_without_trailing_zeroes() {
        let record = normalize(decode(
            r#"{"status":"success","query":"1.2.3.4","lat":1.0,"lon":2.0}"#,
        ));
        assert_eq!(record.coords, "1,2");
        assert_eq!(record.ip, "1.2.3.4");
        assert_eq!(record.api_source, "ip-api.com");
    }

    #[test]
    fn absent_fields_become_sentinels() {
        let record = normalize(decode(r#"{"status":"success","query":"1.2.3.4"}"#));
        assert_eq!(record.isp, "N/A");
        assert_eq!(record.zip, "N/A");
        assert_eq!(record.coords, "N/A");
        assert_eq!(record.timezone, "N/A");
    }

    #[test]
    fn wire_shape_decodes_service_fields() {
        let decoded = decode(
            r#"{"status":"success","query":"9.9.9.9","as":"AS15169 Google LLC","countryCode":"US","regionName":"CA"}"#,
        );
        assert_eq!(decoded.as_label.as_deref(), Some("AS15169 Google LLC"));
        assert_eq!(decoded.country_code.as_deref(), Some("US"));
        assert_eq!(decoded.region_name.as_deref(), Some("CA"));
    }
}
