use serde::Serialize;

/// Operating-system family derived from the User-Agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OsFamily {
    Windows,
    Android,
    #[serde(rename = "macOS")]
    MacOs,
    Linux,
    #[serde(rename = "Chrome OS")]
    ChromeOs,
    #[serde(rename = "iOS")]
    Ios,
    Unknown,
}

impl OsFamily {
    /// Classify a User-Agent string. Fixed probe order, first match wins.
    /// The macOS probe uses `Macintosh`: iOS agents carry `like Mac OS X`.
    pub fn from_user_agent(ua: &str) -> Self {
        if ua.contains("Windows") {
            Self::Windows
        } else if ua.contains("Android") {
            Self::Android
        } else if ua.contains("Macintosh") {
            Self::MacOs
        } else if ua.contains("Linux") {
            Self::Linux
        } else if ua.contains("CrOS") {
            Self::ChromeOs
        } else if ua.contains("iPhone") || ua.contains("iPad") || ua.contains("iPod") {
            Self::Ios
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Android => "Android",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::ChromeOs => "Chrome OS",
            Self::Ios => "iOS",
            Self::Unknown => "Unknown",
        }
    }
}

/// Coarse device class derived from the mobile/tablet token scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceClass {
    #[serde(rename = "Mobile/Tablet")]
    MobileTablet,
    Desktop,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MobileTablet => "Mobile/Tablet",
            Self::Desktop => "Desktop",
        }
    }
}

/// Snapshot of the client environment, assembled by
/// [`Profiler::profile`](crate::Profiler::profile).
///
/// Every field carries a real value or the `"N/A"` sentinel — nothing is
/// ever omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub name: String,
    /// RFC 3339 capture timestamp.
    pub timestamp: String,
    pub os: OsFamily,
    /// Browser name, optionally annotated with its version.
    pub browser: String,
    /// `"WxH"` in pixels.
    pub screen_resolution: String,
    pub device_class: DeviceClass,
    /// `"TIER (D.D Mbps)"` connection descriptor.
    pub network: String,
    /// BCP 47 locale tag.
    pub language: String,
    /// Human-readable rendering of the same capture instant.
    pub local_time: String,
    pub user_agent: String,
}
