//! HttpSalesApi 对接口契约的测试 (wiremock)

mod common;

use oac_sales::error::{FetchError, SubmitError};
use oac_sales::{HttpSalesApi, SalesApi};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpSalesApi {
    HttpSalesApi::with_client(server.uri().parse().unwrap(), reqwest::Client::new()).unwrap()
}

#[tokio::test]
async fn load_all_preserves_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            common::record_json(9, "SS", "Santosh"),
            common::record_json(2, "TITANIUM", "Shiva"),
            common::record_json(5, "SS", "Neither"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records = client(&server).load_all().await.unwrap();
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![9, 2, 5]);
}

#[tokio::test]
async fn non_success_status_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sales"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).load_all().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 503, .. }));
    assert_eq!(err.to_string(), "HTTP error! Status: 503");
}

#[tokio::test]
async fn unexpected_shape_is_parse_error() {
    let server = MockServer::start().await;
    let mut bad = common::record_json(1, "SS", "Santosh");
    bad["assigned"] = json!("Ram");
    Mock::given(method("GET"))
        .and(path("/api/sales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([bad])))
        .mount(&server)
        .await;

    let err = client(&server).load_all().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let api = HttpSalesApi::with_client("http://127.0.0.1:1".parse().unwrap(), reqwest::Client::new()).unwrap();
    assert!(matches!(api.load_all().await, Err(FetchError::Http { .. })));
}

#[tokio::test]
async fn create_posts_draft_without_server_fields() {
    let server = MockServer::start().await;
    let draft = common::filled_form().validate().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/sales"))
        .and(body_json(json!({
            "date": "2024-03-15",
            "bill_no": "B-900",
            "implants_name": "Cortical Screw",
            "implants_type": "TITANIUM",
            "size": 3.5,
            "quantity": 4,
            "rate": "25.25",
            "assigned": "Neither",
            "institute": "Patan Hospital",
            "surgeon": "Dr. Shrestha",
            "remarks": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 41,
            "date": "2024-03-15T00:00:00.000Z",
            "bill_no": "B-900",
            "implants_name": "Cortical Screw",
            "implants_type": "TITANIUM",
            "size": 3.5,
            "quantity": 4,
            "rate": "25.25",
            "total_price": "101.00",
            "assigned": "Neither",
            "institute": "Patan Hospital",
            "surgeon": "Dr. Shrestha",
            "remarks": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server).create(&draft).await.unwrap();
    assert_eq!(record.id, 41);
    assert_eq!(record.total_price.to_string(), "101.00");
}

#[tokio::test]
async fn create_server_error_is_submit_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sales"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let draft = common::filled_form().validate().unwrap();
    match client(&server).create(&draft).await {
        Err(SubmitError::Status { status, body, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
