/// Connection-quality hints, mirroring the Network Information API fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionHint {
    /// Classification tier, e.g. `"4g"` or `"slow-2g"`.
    pub effective_type: Option<String>,
    /// Downstream throughput estimate in megabits per second.
    pub downlink_mbps: Option<f64>,
}

/// Ambient client environment signals.
///
/// Implementations supply whatever the host knows about the client — HTTP
/// headers, client hints, a user report. Everything except the agent string
/// is optional so the profiler can degrade to sentinels.
pub trait EnvSignals {
    /// Raw User-Agent string.
    fn user_agent(&self) -> &str;
    /// Screen dimensions as `(width, height)` in pixels.
    fn screen(&self) -> Option<(u32, u32)>;
    /// BCP 47 locale tag, e.g. `"en-US"`.
    fn locale(&self) -> Option<&str>;
    /// Connection-quality hints, when the host exposes them.
    fn connection(&self) -> Option<ConnectionHint>;
}

/// Owned snapshot of environment signals, for hosts that collect them
/// out-of-band before running a collection.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    pub user_agent: String,
    pub screen: Option<(u32, u32)>,
    pub locale: Option<String>,
    pub connection: Option<ConnectionHint>,
}

impl EnvSignals for EnvSnapshot {
    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn screen(&self) -> Option<(u32, u32)> {
        self.screen
    }

    fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    fn connection(&self) -> Option<ConnectionHint> {
        self.connection.clone()
    }
}
