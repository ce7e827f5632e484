// Integration tests for `CloudflareClient` and `StatusPageClient` using wiremock.

use chrono::{Duration, Utc};
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flaremon_api::models::DnsRow;
use flaremon_api::{
    CloudflareClient, Credentials, DashboardOptions, DnsReportOptions, Error, StatusPageClient,
    TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CloudflareClient) {
    let server = MockServer::start().await;
    let client = CloudflareClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn envelope(result: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "errors": [], "messages": [], "result": result })
}

fn zone_json(id: &str, name: &str, price: u32, legacy_id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "status": "active",
        "paused": false,
        "plan": {
            "id": "plan-id",
            "name": format!("{legacy_id} plan"),
            "price": price,
            "currency": "USD",
            "frequency": "monthly",
            "legacy_id": legacy_id,
            "is_subscribed": true
        }
    })
}

fn window() -> DashboardOptions {
    DashboardOptions {
        since: Utc::now() - Duration::minutes(30),
        until: None,
        continuous: true,
    }
}

// ── Zones ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_zones_follows_pagination() {
    let (server, client) = setup().await;

    let page = |n: u32, zones: serde_json::Value| {
        json!({
            "success": true,
            "errors": [],
            "messages": [],
            "result": zones,
            "result_info": { "page": n, "per_page": 50, "total_pages": 2, "count": 1, "total_count": 2 }
        })
    };

    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "50"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(1, json!([zone_json("z1", "example.com", 0, "free")]))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(2, json!([zone_json("z2", "example.org", 200, "business")]))),
        )
        .mount(&server)
        .await;

    let zones = client.list_zones(&[]).await.unwrap();

    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].name, "example.com");
    assert_eq!(zones[1].id, "z2");
    assert_eq!(zones[1].plan.legacy_id, "business");
    assert!((zones[1].plan.price - 200.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_list_zones_filters_by_name() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("name", "example.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!([zone_json("z1", "example.com", 20, "pro")]))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(query_param("name", "missing.net"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let zones = client
        .list_zones(&["example.com".into(), "missing.net".into()])
        .await
        .unwrap();

    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].plan.legacy_id, "pro");
}

#[tokio::test]
async fn test_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    let creds = Credentials::ApiToken(SecretString::from("s3cret".to_owned()));
    let client = CloudflareClient::new(
        Url::parse(&server.uri()).unwrap(),
        &creds,
        &TransportConfig::default(),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/zones"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let zones = client.list_zones(&[]).await.unwrap();
    assert!(zones.is_empty());
}

// ── Dashboard ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_dashboard_totals() {
    let (server, client) = setup().await;

    let body = envelope(json!({
        "totals": {
            "since": "2024-05-01T11:30:00Z",
            "until": "2024-05-01T12:00:00Z",
            "requests": {
                "all": 1234,
                "cached": 1000,
                "uncached": 234,
                "ssl": { "encrypted": 1200, "unencrypted": 34 },
                "http_status": { "200": 1200, "404": 34 },
                "content_type": { "html": 100 },
                "country": { "NL": 1234 },
                "ip_class": { "unknown": 1234 }
            },
            "bandwidth": { "all": 4096, "cached": 4000, "uncached": 96 },
            "threats": { "all": 2, "type": { "bad_browser": 2 }, "country": { "CN": 2 } },
            "pageviews": { "all": 50, "search_engine": { "googlebot": 5 } },
            "uniques": { "all": 17 }
        },
        "timeseries": []
    }));

    Mock::given(method("GET"))
        .and(path("/zones/z1/analytics/dashboard"))
        .and(query_param("continuous", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let dashboard = client.dashboard("z1", &window()).await.unwrap();

    let totals = dashboard.totals;
    assert_eq!(totals.requests.all, 1234);
    assert_eq!(totals.requests.ssl.encrypted, 1200);
    assert_eq!(totals.requests.http_status.get("404"), Some(&34));
    assert_eq!(totals.bandwidth.all, 4096);
    assert_eq!(totals.threats.by_type.get("bad_browser"), Some(&2));
    assert_eq!(totals.uniques.all, 17);
}

#[tokio::test]
async fn test_colos_use_latest_bucket() {
    let (server, client) = setup().await;

    let body = envelope(json!([
        {
            "colo_id": "AMS",
            "timeseries": [
                { "requests": { "all": 10 } },
                { "requests": { "all": 25 } }
            ]
        },
        { "colo_id": "SJC-PIG", "totals": { "requests": { "all": 3 } }, "timeseries": [] }
    ]));

    Mock::given(method("GET"))
        .and(path("/zones/z9/analytics/colos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let colos = client.colos("z9", &window()).await.unwrap();

    assert_eq!(colos.len(), 2);
    assert_eq!(colos[0].latest().unwrap().requests.all, 25);
    assert_eq!(colos[1].colo_id, "SJC-PIG");
    assert_eq!(colos[1].latest().unwrap().requests.all, 3);
}

// ── DNS ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_dns_report_decodes_rows_and_skips_malformed() {
    let (server, client) = setup().await;

    let body = envelope(json!({
        "rows": 3,
        "data": [
            { "dimensions": ["example.com", "NOERROR", "1.1.1.1", "0", "4", "AMS", "A"], "metrics": [10, 2, 1] },
            { "dimensions": ["example.com", "NOERROR"], "metrics": [10, 2, 1] },
            { "dimensions": ["www.example.com", "NXDOMAIN", "1.1.1.1", "1", "6", "XYZ", "AAAA"], "metrics": [4, 4, 0] }
        ]
    }));

    Mock::given(method("GET"))
        .and(path("/zones/z1/dns_analytics/report"))
        .and(query_param("metrics", "queryCount,uncachedCount,staleCount"))
        .and(query_param(
            "dimensions",
            "queryName,responseCode,origin,tcp,ipVersion,coloName,queryType",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let now = Utc::now();
    let opts = DnsReportOptions {
        since: now - Duration::minutes(1),
        until: now,
        metrics: vec!["queryCount".into(), "uncachedCount".into(), "staleCount".into()],
        dimensions: [
            "queryName",
            "responseCode",
            "origin",
            "tcp",
            "ipVersion",
            "coloName",
            "queryType",
        ]
        .iter()
        .map(|d| (*d).to_owned())
        .collect(),
    };

    let report = client.dns_report("z1", &opts).await.unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.skipped, 1);
    assert!(matches!(
        &report.rows[1],
        DnsRow::WithLocationAndQueryType { location, query_type, .. }
            if location == "XYZ" && query_type == "AAAA"
    ));
}

// ── Error paths ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_envelope_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/zones/z1/analytics/dashboard"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "errors": [{ "code": 1004, "message": "Invalid time range" }],
            "messages": [],
            "result": null
        })))
        .mount(&server)
        .await;

    let err = client.dashboard("z1", &window()).await.unwrap_err();

    match err {
        Error::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(1004));
            assert!(message.contains("Invalid time range"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_success_false_on_http_200_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "errors": [{ "code": 7003, "message": "Could not route" }],
            "result": null
        })))
        .mount(&server)
        .await;

    let err = client.list_zones(&[]).await.unwrap_err();
    assert_eq!(err.api_error_code(), Some(7003));
}

#[tokio::test]
async fn test_forbidden_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "errors": [{ "code": 10000, "message": "Authentication error" }],
            "result": null
        })))
        .mount(&server)
        .await;

    let err = client.list_zones(&[]).await.unwrap_err();
    assert!(err.is_auth_failure(), "got {err:?}");
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/zones/z1/analytics/colos"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "42"))
        .mount(&server)
        .await;

    let err = client.colos("z1", &window()).await.unwrap_err();
    assert!(matches!(err, Error::RateLimited { retry_after_secs: 42 }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_garbage_body_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_zones(&[]).await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert!(body.contains("oops")),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

// ── Status page ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_summary() {
    let server = MockServer::start().await;
    let url = Url::parse(&format!("{}/api/v2/summary.json", server.uri())).unwrap();
    let client = StatusPageClient::new(url, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v2/summary.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": { "id": "p", "name": "Cloudflare" },
            "status": { "indicator": "minor", "description": "Minor Service Outage" },
            "components": [
                { "id": "g1", "name": "Europe", "status": "operational", "group": true, "group_id": null },
                { "id": "c1", "name": "Amsterdam, Netherlands - (AMS)", "status": "operational", "group": false, "group_id": "g1" }
            ]
        })))
        .mount(&server)
        .await;

    let summary = client.summary().await.unwrap();

    assert_eq!(summary.status.indicator, "minor");
    assert_eq!(summary.components.len(), 2);
    assert!(summary.components[0].group);
    assert_eq!(summary.components[1].group_id.as_deref(), Some("g1"));
}

#[tokio::test]
async fn test_status_page_outage_is_http_status_error() {
    let server = MockServer::start().await;
    let url = Url::parse(&format!("{}/api/v2/summary.json", server.uri())).unwrap();
    let client = StatusPageClient::new(url, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v2/summary.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client.summary().await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert!(err.is_transient());
}
