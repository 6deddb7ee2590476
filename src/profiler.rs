use aho_corasick::AhoCorasick;
use chrono::{Local, Utc};
use fancy_regex::Regex;

use crate::error::Result;
use crate::signals::{ConnectionHint, EnvSignals};
use crate::types::{ClientProfile, DeviceClass, OsFamily, NOT_AVAILABLE};

/// Display name used when the caller does not supply one.
const DEFAULT_VISITOR_NAME: &str = "Anonymous";

/// Tokens whose presence (case-insensitive) marks a mobile or tablet agent.
const MOBILE_TOKENS: &[&str] = &[
    "android",
    "iphone",
    "ipad",
    "ipod",
    "mobile",
    "tablet",
    "blackberry",
    "opera mini",
    "iemobile",
    "webos",
];

/// Per-family browser version capture patterns, compiled once at init time.
struct BrowserPatterns {
    chrome: Regex,
    firefox: Regex,
    safari: Regex,
    edge: Regex,
    msie: Regex,
}

impl BrowserPatterns {
    fn compile() -> Result<Self> {
        Ok(Self {
            chrome: Regex::new(r"Chrome/([\d.]+)")?,
            firefox: Regex::new(r"Firefox/([\d.]+)")?,
            // Safari reports its version behind a separate `Version/` token.
            safari: Regex::new(r"Version/([\d.]+)")?,
            // Covers Edg/, EdgA/ (Android) and EdgiOS/.
            edge: Regex::new(r"Edg[A-Za-z]*/([\d.]+)")?,
            msie: Regex::new(r"(?:MSIE |rv:)([\d.]+)")?,
        })
    }
}

/// Derives a [`ClientProfile`] from ambient environment signals.
///
/// Total by contract: every classification degrades to a sentinel or an
/// `Unknown` label rather than failing, so [`Profiler::profile`] has no
/// error path.
pub struct Profiler {
    browsers: BrowserPatterns,
    mobile_tokens: AhoCorasick,
}

impl Profiler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            browsers: BrowserPatterns::compile()?,
            mobile_tokens: AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(MOBILE_TOKENS)?,
        })
    }

    /// Build a profile from `signals`, stamping both timestamp renderings
    /// from a single capture instant.
    pub fn profile(&self, signals: &dyn EnvSignals, visitor_name: Option<&str>) -> ClientProfile {
        let ua = signals.user_agent();
        let now = Utc::now();

        ClientProfile {
            name: visitor_name.unwrap_or(DEFAULT_VISITOR_NAME).to_string(),
            timestamp: now.to_rfc3339(),
            os: OsFamily::from_user_agent(ua),
            browser: self.browser_label(ua),
            screen_resolution: match signals.screen() {
                Some((w, h)) => format!("{}x{}", w, h),
                None => NOT_AVAILABLE.to_string(),
            },
            device_class: self.device_class(ua),
            network: network_descriptor(signals.connection().as_ref()),
            language: signals
                .locale()
                .map(str::to_string)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            local_time: now
                .with_timezone(&Local)
                .format("%a, %d %b %Y %H:%M:%S")
                .to_string(),
            user_agent: ua.to_string(),
        }
    }

    /// Browser name, annotated with its version when the family's capture
    /// pattern matches. Check order matters: Chrome must exclude Edge, and
    /// Safari must exclude Chrome.
    pub fn browser_label(&self, ua: &str) -> String {
        let (name, version_re) = if ua.contains("Chrome") && !ua.contains("Edg") {
            ("Chrome", &self.browsers.chrome)
        } else if ua.contains("Firefox") {
            ("Firefox", &self.browsers.firefox)
        } else if ua.contains("Safari") && !ua.contains("Chrome") {
            ("Safari", &self.browsers.safari)
        } else if ua.contains("Edg") {
            ("Edge", &self.browsers.edge)
        } else if ua.contains("MSIE") || ua.contains("Trident") {
            ("Internet Explorer", &self.browsers.msie)
        } else {
            return "Unknown".to_string();
        };

        match capture_first(version_re, ua) {
            Some(version) => format!("{} {}", name, version),
            None => name.to_string(),
        }
    }

    /// One case-insensitive scan over the mobile/tablet token set.
    pub fn device_class(&self, ua: &str) -> DeviceClass {
        if self.mobile_tokens.is_match(ua) {
            DeviceClass::MobileTablet
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Render `"TIER (D.D Mbps)"` from the connection hints, each sub-part
/// independently falling back to the sentinel.
fn network_descriptor(conn: Option<&ConnectionHint>) -> String {
    let (tier, downlink) = match conn {
        Some(c) => (c.effective_type.as_deref(), c.downlink_mbps),
        None => (None, None),
    };

    let tier = match tier {
        Some(t) => t.to_uppercase(),
        None => NOT_AVAILABLE.to_string(),
    };
    let downlink = match downlink {
        Some(mbps) => format!("{:.1} Mbps", round_tenth(mbps)),
        None => NOT_AVAILABLE.to_string(),
    };

    format!("{} ({})", tier, downlink)
}

/// Half-up rounding to one decimal; bare `{:.1}` rounds ties to even.
fn round_tenth(mbps: f64) -> f64 {
    (mbps * 10.0).round() / 10.0
}

fn capture_first<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .ok()
        .flatten()
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
