//! Integration tests for hg-api-client
//!
//! Every operation runs against a local wiremock server standing in for the
//! invoicing API and the authorization server.
//!
//! Run with: cargo test --test api_tests

use std::sync::Once;

use chrono::{Duration, NaiveDateTime, Utc};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hg_api_client::client::{ApiRequest, FilePart, Parameters};
use hg_api_client::prelude::*;

static INIT: Once = Once::new();

/// Initialize logging for tests
fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Start a mock server and a client pointed at it
async fn setup() -> (MockServer, HgClient) {
    init_logging();
    let server = MockServer::start().await;
    let config = ClientConfig::default().with_token_url(format!("{}/connect/token", server.uri()));
    let client = HgClient::with_config(server.uri(), config).expect("Failed to create client");
    (server, client)
}

fn test_token() -> AccessToken {
    AccessToken::new("test-token")
}

fn sample_invoice() -> NewInvoice {
    NewInvoice {
        number: "10001".to_string(),
        service_provider: ServiceProvider {
            id: 42,
            name: "Acme".to_string(),
        },
        service: Service {
            id: 7,
            name: "Delivery".to_string(),
        },
        address: OutletAddress {
            country: "BY".to_string(),
            line1: "Nezavisimosti 1".to_string(),
            city: "Minsk".to_string(),
            full_address: "BY, Minsk, Nezavisimosti 1".to_string(),
        },
        store: StoreInfo {
            name: "Acme Store".to_string(),
            locality_name: "Center".to_string(),
            locality_code: "17030".to_string(),
            city: "Minsk".to_string(),
            locality_city: "Minsk".to_string(),
        },
        items: vec![
            InvoiceItem::new("Pizza", dec!(2), dec!(25.5)).with_description("Large"),
            InvoiceItem::new("Cola", dec!(1), dec!(3)).with_discount(dec!(10), dec!(0.3)),
        ],
        terms_of_days: 30,
    }
}

// ============================================================================
// INVOICE SERVICE TESTS
// ============================================================================

mod invoices_tests {
    use super::*;

    #[tokio::test]
    async fn test_search_returns_records() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v1/invoicing/invoice/"))
            .and(query_param("searchString", "pizza"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{"id": "a"}, {"id": "b"}],
                "total": 2,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client.invoices().get(&test_token(), "pizza").await.unwrap();
        assert_eq!(
            response.into_value(),
            Some(json!([{"id": "a"}, {"id": "b"}]))
        );
    }

    #[tokio::test]
    async fn test_search_unwraps_array_body() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v1/invoicing/invoice/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"records": [{"id": "first"}]},
                {"records": [{"id": "second"}]},
            ])))
            .mount(&server)
            .await;

        let response = client.invoices().get(&test_token(), "x").await.unwrap();
        assert_eq!(response.into_value(), Some(json!([{"id": "first"}])));
    }

    #[tokio::test]
    async fn test_search_with_no_matches_returns_whole_object() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v1/invoicing/invoice/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"records": [], "total": 0})),
            )
            .mount(&server)
            .await;

        let response = client.invoices().get(&test_token(), "nothing").await.unwrap();
        assert_eq!(response.into_value(), Some(json!({"records": [], "total": 0})));
    }

    #[tokio::test]
    async fn test_create_sends_payload_and_returns_id() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v1/invoicing/invoice/"))
            .and(header("content-type", "application/json"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "number": "10001",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client
            .invoices()
            .create(&test_token(), &sample_invoice())
            .await
            .unwrap();
        assert_eq!(response.as_str(), Some("3fa85f64-5717-4562-b3fc-2c963f66afa6"));

        let requests = server.received_requests().await.unwrap();
        let body: Value = requests[0].body_json().unwrap();

        assert_eq!(body["number"], json!("10001"));
        assert_eq!(body["currency"], json!("933"));
        assert_eq!(body["paymentDueTerms"]["termsDay"], json!(30));
        assert_eq!(body["items"][0]["code"], json!("Pizza"));
        assert_eq!(body["items"][1]["discount"]["percent"].as_f64(), Some(10.0));
        assert_eq!(
            body["merchantInfo"]["retailOutlet"]["retailOutletMerchantInfo"]["localityCode"],
            json!("17030")
        );

        let due = NaiveDateTime::parse_from_str(
            body["paymentDueTerms"]["dueUTC"].as_str().unwrap(),
            "%Y-%m-%d %H:%M:%S%.f",
        )
        .unwrap()
        .and_utc();
        let expected = Utc::now() + Duration::days(30);
        assert!(
            (expected - due).num_seconds().abs() < 60,
            "due date {due} should be ~30 days from now"
        );
    }

    #[tokio::test]
    async fn test_create_with_falsy_id_returns_whole_object() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v1/invoicing/invoice/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 0})))
            .mount(&server)
            .await;

        let response = client
            .invoices()
            .create(&test_token(), &sample_invoice())
            .await
            .unwrap();
        assert_eq!(response.into_value(), Some(json!({"id": 0})));
    }

    #[tokio::test]
    async fn test_create_uses_configured_defaults() {
        init_logging();
        let server = MockServer::start().await;
        let defaults = InvoiceDefaults {
            currency: "840".to_string(),
            ..Default::default()
        };
        let client = HgClient::with_config(
            server.uri(),
            ClientConfig::default().with_invoice_defaults(defaults),
        )
        .unwrap();

        Mock::given(method("POST"))
            .and(path("/v1/invoicing/invoice/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
            .mount(&server)
            .await;

        client
            .invoices()
            .create(&test_token(), &sample_invoice())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: Value = requests[0].body_json().unwrap();
        assert_eq!(body["currency"], json!("840"));
    }

    #[tokio::test]
    async fn test_create_with_out_of_range_terms_fails_before_sending() {
        let (server, client) = setup().await;

        let mut invoice = sample_invoice();
        invoice.terms_of_days = 1_000_000_000;

        let err = client
            .invoices()
            .create(&test_token(), &invoice)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "Expected InvalidInput, got: {:?}", err);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_active_posts_empty_body() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v1/invoicing/invoice/abc/send"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "sent"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client
            .invoices()
            .set_active(&test_token(), &InvoiceId::new("abc"))
            .await
            .unwrap();
        assert_eq!(response.into_value(), Some(json!({"status": "sent"})));
    }

    #[tokio::test]
    async fn test_set_inactive_posts_to_cancel() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v1/invoicing/invoice/abc/cancel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "cancelled"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client
            .invoices()
            .set_inactive(&test_token(), &InvoiceId::new("abc"))
            .await
            .unwrap();
        assert!(!response.is_raw());
    }

    #[tokio::test]
    async fn test_get_qrcode_query_and_result() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v1/invoicing/invoice/abc/qrcode"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"result": "data:image/png;base64,AAAA"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let options = QrCodeOptions {
            img_width: 100,
            img_height: 200,
            get_image: false,
        };
        let response = client
            .invoices()
            .get_qrcode(&test_token(), &InvoiceId::new("abc"), options)
            .await
            .unwrap();
        assert_eq!(response.as_str(), Some("data:image/png;base64,AAAA"));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].url.query(),
            Some("imgWidth=100&imgHeight=200&getImage=False")
        );
    }

    #[tokio::test]
    async fn test_non_json_response_is_returned_raw() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v1/invoicing/invoice/abc/qrcode"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x89, 0x50, 0x4e, 0x47], "image/png"))
            .mount(&server)
            .await;

        let response = client
            .invoices()
            .get_qrcode(&test_token(), &InvoiceId::new("abc"), QrCodeOptions::default())
            .await
            .unwrap();
        assert!(response.is_raw());

        let raw = response.into_raw().unwrap();
        assert_eq!(raw.status().as_u16(), 200);
        assert_eq!(raw.bytes().await.unwrap().as_ref(), &[0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_parse_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v1/invoicing/invoice/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
            .mount(&server)
            .await;

        let err = client.invoices().get(&test_token(), "x").await.unwrap_err();
        assert!(err.is_parse_error(), "Expected parse error, got: {:?}", err);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        init_logging();
        // nothing listens on port 1
        let client = HgClient::new("http://127.0.0.1:1").unwrap();

        let err = client.invoices().get(&test_token(), "x").await.unwrap_err();
        assert!(err.is_transport_error(), "Expected transport error, got: {:?}", err);
    }
}

// ============================================================================
// TOKEN SERVICE TESTS
// ============================================================================

mod token_tests {
    use super::*;

    fn credentials() -> ClientCredentials {
        ClientCredentials::new(1001, "s3cret", 42, 7)
    }

    #[tokio::test]
    async fn test_token_exchange_returns_access_token() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=1001"))
            .and(body_string_contains("scope=epos.public.invoice"))
            .and(body_string_contains("client_secret=s3cret"))
            .and(body_string_contains("serviceproviderid=42"))
            .and(body_string_contains("serviceid=7"))
            .and(body_string_contains("retailoutletcode=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "issued-token",
                "token_type": "Bearer",
                "expires_in": 3600,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = client.token().get(&credentials()).await.unwrap();
        assert_eq!(token.map(|t| t.expose().to_string()), Some("issued-token".to_string()));

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn test_token_exchange_without_access_token() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_client"})))
            .mount(&server)
            .await;

        let token = client.token().get(&credentials()).await.unwrap();
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_token_exchange_with_empty_access_token() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": ""})))
            .mount(&server)
            .await;

        assert!(client.token().get(&credentials()).await.unwrap().is_none());
    }
}

// ============================================================================
// REQUEST ENGINE TESTS
// ============================================================================

mod engine_tests {
    use super::*;

    #[tokio::test]
    async fn test_post_with_file_sends_multipart() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v1/files/"))
            .and(query_param("folder", "logos"))
            .and(header_regex("content-type", "^multipart/form-data"))
            .and(body_string_contains("name=\"file\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "f1"})))
            .expect(1)
            .mount(&server)
            .await;

        let route = client.route().child("/v1/files");
        let request = ApiRequest::post("/")
            .with_parameters(
                Parameters::new()
                    .with("folder", "logos")
                    .with_file("file", FilePart::new(b"PNGDATA".to_vec()).with_file_name("logo.png")),
            )
            .with_response_key("id");

        let response = client.request(&route, &test_token(), request).await.unwrap();
        assert_eq!(response.as_str(), Some("f1"));
    }

    #[tokio::test]
    async fn test_post_with_only_files_sends_multipart() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/v1/files/"))
            .and(header_regex("content-type", "^multipart/form-data"))
            .and(body_string_contains("filename=\"logo.png\""))
            .and(body_string_contains("PNGDATA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "f2"})))
            .expect(1)
            .mount(&server)
            .await;

        let route = client.route().child("/v1/files");
        let request = ApiRequest::post("/")
            .with_parameters(Parameters::new().with_file(
                "file",
                FilePart::new(b"PNGDATA".to_vec()).with_file_name("logo.png"),
            ))
            .with_response_key("id");

        let response = client.request(&route, &test_token(), request).await.unwrap();
        assert_eq!(response.as_str(), Some("f2"));

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
        assert_ne!(requests[0].body, b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_get_without_parameters_keeps_url() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/v1/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let route = client.route().child("/v1");
        let response = client
            .request(&route, &test_token(), ApiRequest::get("/status"))
            .await
            .unwrap();
        assert_eq!(response.into_value(), Some(json!({"ok": true})));

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
        assert!(requests[0].headers.get("content-type").is_none());
    }
}
