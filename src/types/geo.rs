use serde::Serialize;

/// Normalized geolocation lookup result.
///
/// Field names follow the transmitted wire form; fields the service did not
/// supply are filled with the `"N/A"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRecord {
    /// Public IP address the lookup resolved.
    pub ip: String,
    /// Network operator name.
    pub isp: String,
    /// Autonomous-system identifier.
    pub asn: String,
    pub country_code: String,
    pub region_name: String,
    pub city: String,
    pub zip: String,
    /// Combined `"lat,lon"` pair.
    pub coords: String,
    pub timezone: String,
    /// Attribution tag for the upstream service.
    pub api_source: String,
}
