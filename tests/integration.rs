use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use client_beacon::{
    Collector, ConnectionHint, EnvSnapshot, Error, GeoResolver, Method, Transmitter, Transport,
    TransportRequest, TransportResponse,
};

const ANDROID_CHROME_UA: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";

const GEO_SUCCESS_BODY: &str = r#"{
    "status": "success",
    "query": "1.2.3.4",
    "isp": "ACME",
    "as": "AS1 ACME",
    "countryCode": "US",
    "regionName": "CA",
    "city": "X",
    "zip": "90000",
    "lat": 1.0,
    "lon": 2.0,
    "timezone": "UTC"
}"#;

/// Canned-response transport: GETs answer with the configured geolocation
/// body, POSTs are recorded and answered with `post_status`.
struct FakeTransport {
    geo_status: u16,
    geo_body: String,
    post_status: u16,
    posts: Mutex<Vec<String>>,
}

impl FakeTransport {
    fn new(geo_status: u16, geo_body: &str, post_status: u16) -> Arc<Self> {
        Arc::new(Self {
            geo_status,
            geo_body: geo_body.to_string(),
            post_status,
            posts: Mutex::new(Vec::new()),
        })
    }

    fn recorded_posts(&self) -> Vec<String> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, req: TransportRequest<'_>) -> client_beacon::Result<TransportResponse> {
        match req.method {
            Method::Get => Ok(TransportResponse {
                status: self.geo_status,
                body: self.geo_body.clone(),
            }),
            Method::Post => {
                self.posts
                    .lock()
                    .unwrap()
                    .push(req.json_body.unwrap_or_default());
                Ok(TransportResponse {
                    status: self.post_status,
                    body: String::new(),
                })
            }
        }
    }
}

/// Transport whose every call fails at the network level.
struct DeadTransport;

#[async_trait]
impl Transport for DeadTransport {
    async fn send(&self, _req: TransportRequest<'_>) -> client_beacon::Result<TransportResponse> {
        Err(Error::Transport("connection refused".to_string()))
    }
}

fn android_signals() -> EnvSnapshot {
    EnvSnapshot {
        user_agent: ANDROID_CHROME_UA.to_string(),
        screen: Some((1080, 2400)),
        locale: Some("en-US".to_string()),
        connection: Some(ConnectionHint {
            effective_type: Some("4g".to_string()),
            downlink_mbps: Some(10.25),
        }),
    }
}

#[tokio::test]
async fn full_run_merges_and_delivers() {
    let transport = FakeTransport::new(200, GEO_SUCCESS_BODY, 200);
    let collector = Collector::new(transport.clone() as Arc<dyn Transport>).unwrap();

    let report = collector
        .run(&android_signals(), Some("Ada"))
        .await
        .expect("run should produce a report");
    assert!(report.delivered);

    let posts = transport.recorded_posts();
    assert_eq!(posts.len(), 1);

    let sent: serde_json::Value = serde_json::from_str(&posts[0]).unwrap();
    // Profile side of the union.
    assert_eq!(sent["name"], "Ada");
    assert_eq!(sent["os"], "Android");
    assert_eq!(sent["browser"], "Chrome 120.0.0.0");
    assert_eq!(sent["deviceClass"], "Mobile/Tablet");
    assert_eq!(sent["network"], "4G (10.3 Mbps)");
    assert_eq!(sent["screenResolution"], "1080x2400");
    assert_eq!(sent["language"], "en-US");
    assert_eq!(sent["userAgent"], ANDROID_CHROME_UA);
    // Geo side of the union.
    assert_eq!(sent["ip"], "1.2.3.4");
    assert_eq!(sent["asn"], "AS1 ACME");
    assert_eq!(sent["countryCode"], "US");
    assert_eq!(sent["coords"], "1,2");
    assert_eq!(sent["apiSource"], "ip-api.com");
    // Profile fields precede geo fields in the serialized record.
    assert!(posts[0].find("\"userAgent\"").unwrap() < posts[0].find("\"ip\"").unwrap());
    // Capture timestamp is machine-readable.
    let ts = sent["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}

#[tokio::test]
async fn failed_lookup_aborts_before_transmission() {
    let transport = FakeTransport::new(200, r#"{"status":"fail","message":"invalid query"}"#, 200);
    let collector = Collector::new(transport.clone() as Arc<dyn Transport>).unwrap();

    assert!(collector.run(&android_signals(), None).await.is_none());
    assert!(transport.recorded_posts().is_empty());
}

#[tokio::test]
async fn lookup_error_carries_service_message() {
    let transport = FakeTransport::new(200, r#"{"status":"fail","message":"invalid query"}"#, 200);
    let resolver = GeoResolver::new(transport as Arc<dyn Transport>);

    let err = resolver.resolve().await.unwrap_err();
    assert!(err.to_string().contains("invalid query"));
}

#[tokio::test]
async fn lookup_failure_without_message_gets_fallback() {
    let transport = FakeTransport::new(200, r#"{"status":"fail"}"#, 200);
    let resolver = GeoResolver::new(transport as Arc<dyn Transport>);

    let err = resolver.resolve().await.unwrap_err();
    assert!(err.to_string().contains("unknown error"));
}

#[tokio::test]
async fn lookup_error_includes_http_status() {
    let transport = FakeTransport::new(503, "", 200);
    let resolver = GeoResolver::new(transport as Arc<dyn Transport>);

    let err = resolver.resolve().await.unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn resolver_maps_success_fields() {
    let transport = FakeTransport::new(200, GEO_SUCCESS_BODY, 200);
    let resolver = GeoResolver::new(transport as Arc<dyn Transport>);

    let record = resolver.resolve().await.unwrap();
    assert_eq!(record.ip, "1.2.3.4");
    assert_eq!(record.isp, "ACME");
    assert_eq!(record.asn, "AS1 ACME");
    assert_eq!(record.country_code, "US");
    assert_eq!(record.region_name, "CA");
    assert_eq!(record.city, "X");
    assert_eq!(record.zip, "90000");
    assert_eq!(record.coords, "1,2");
    assert_eq!(record.timezone, "UTC");
    assert_eq!(record.api_source, "ip-api.com");
}

#[tokio::test]
async fn rejected_delivery_still_returns_payload() {
    let transport = FakeTransport::new(200, GEO_SUCCESS_BODY, 500);
    let collector = Collector::new(transport.clone() as Arc<dyn Transport>).unwrap();

    let report = collector.run(&android_signals(), None).await.unwrap();
    assert!(!report.delivered);
    assert_eq!(report.payload.profile.name, "Anonymous");
    assert_eq!(report.payload.geo.coords, "1,2");
    // The attempt still went out.
    assert_eq!(transport.recorded_posts().len(), 1);
}

#[tokio::test]
async fn transmitter_swallows_rejection() {
    let transport = FakeTransport::new(200, GEO_SUCCESS_BODY, 500);
    let transmitter = Transmitter::new(transport as Arc<dyn Transport>);

    assert!(!transmitter.deliver(&serde_json::json!({"probe": true})).await);
}

#[tokio::test]
async fn transmitter_swallows_transport_failure() {
    let transmitter = Transmitter::new(Arc::new(DeadTransport) as Arc<dyn Transport>);
    assert!(!transmitter.deliver(&serde_json::json!({"probe": true})).await);
}

#[tokio::test]
async fn dead_network_aborts_run() {
    let collector = Collector::new(Arc::new(DeadTransport) as Arc<dyn Transport>).unwrap();
    assert!(collector.run(&android_signals(), None).await.is_none());
}

#[tokio::test]
async fn missing_signals_degrade_to_sentinels() {
    let transport = FakeTransport::new(200, GEO_SUCCESS_BODY, 200);
    let collector = Collector::new(transport as Arc<dyn Transport>).unwrap();

    let bare = EnvSnapshot {
        user_agent: "curl/8.5.0".to_string(),
        ..EnvSnapshot::default()
    };
    let report = collector.run(&bare, None).await.unwrap();
    let profile = &report.payload.profile;
    assert_eq!(profile.screen_resolution, "N/A");
    assert_eq!(profile.language, "N/A");
    assert_eq!(profile.network, "N/A (N/A)");
    assert_eq!(profile.browser, "Unknown");
}
