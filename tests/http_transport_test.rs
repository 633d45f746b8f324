mod common;

use common::{SUCCESS_RESPONSE, config, order};
use swiftpass::application::client::SwiftpassClient;
use swiftpass::config::Credentials;
use swiftpass::domain::ports::Transport;
use swiftpass::error::GatewayError;
use swiftpass::infrastructure::http::HttpTransport;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_posts_xml_body_and_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pay/gateway"))
        .and(header("content-type", "text/xml; charset=utf-8"))
        .and(body_string_contains("<xml>"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<xml><a>1</a></xml>"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::with_endpoint(format!("{}/pay/gateway", server.uri()));
    let body = transport.post("<xml><b>2</b></xml>".to_owned()).await.unwrap();

    assert_eq!(body, b"<xml><a>1</a></xml>");
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let transport = HttpTransport::with_endpoint(server.uri());
    let result = transport.post("<xml/>".to_owned()).await;

    assert!(matches!(result, Err(GatewayError::Http(_))));
}

#[tokio::test]
async fn test_client_round_trip_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("<service>pay.weixin.jspay</service>"))
        .and(body_string_contains("<sign>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SUCCESS_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let client = SwiftpassClient::new(
        Credentials::from_config(&config()).unwrap(),
        Box::new(HttpTransport::with_endpoint(server.uri())),
    );
    let pay_info = client.js_pay_params(order()).await.unwrap();

    assert_eq!(pay_info["appId"], "wx2421b1c4370ec43b");
}

#[test]
fn test_default_endpoint_is_production_gateway() {
    assert_eq!(
        HttpTransport::default().endpoint(),
        "https://pay.swiftpass.cn/pay/gateway"
    );
}
