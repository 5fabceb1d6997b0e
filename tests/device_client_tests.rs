//! Device client against a mock LED controller.

use std::time::Duration;

use micky::device::{DeviceClient, DeviceError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> DeviceClient {
    DeviceClient::new(server.uri(), Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn get_status_returns_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/led/stat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "LED 1 is ON"})))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server).get_status().await;

    assert_eq!(status, "LED 1 is ON");
}

#[tokio::test]
async fn get_status_without_message_returns_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/led/stat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"led1":"on","led2":"off"}"#))
        .mount(&server)
        .await;

    let status = client_for(&server).get_status().await;

    assert_eq!(status, r#"Raw response content: {"led1":"on","led2":"off"}"#);
}

#[tokio::test]
async fn get_status_server_error_is_rendered_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/led/stat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overheated"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let status = client.get_status().await;

    assert_eq!(status, "HTTP error occurred: 500 - Response: overheated");

    let err = client.try_get_status().await.unwrap_err();
    assert!(matches!(err, DeviceError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn set_status_posts_command_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/led/control"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"ledNum": 2, "ledOn": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "LED 2 turned ON"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).set_status(2, true).await;

    assert_eq!(reply, "LED 2 turned ON");
}

#[tokio::test]
async fn set_status_forwards_out_of_range_identifiers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/led/control"))
        .and(body_json(json!({"ledNum": 42, "ledOn": false})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid LED"})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).set_status(42, false).await;

    assert_eq!(
        reply,
        r#"HTTP error occurred: 400 - Response: {"message":"Invalid LED"}"#
    );
}

#[tokio::test]
async fn malformed_body_is_rendered_as_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/led/control"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.try_set_status(1, true).await.unwrap_err();
    assert_eq!(err, DeviceError::Decode { body: "OK".into() });
    assert_eq!(client.set_status(1, true).await, "Raw response content: OK");
}

#[tokio::test]
async fn each_call_is_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/led/stat"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.get_status().await;
    client.get_status().await;
}

#[tokio::test]
async fn slow_device_is_reported_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/led/stat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "late"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = DeviceClient::new(server.uri(), Duration::from_millis(50)).unwrap();
    let err = client.try_get_status().await.unwrap_err();

    assert!(matches!(err, DeviceError::Timeout(_)), "got: {err:?}");
    assert!(client.get_status().await.starts_with("Timeout error occurred"));
}

#[tokio::test]
async fn unreachable_device_is_reported_as_connection_error() {
    let client = DeviceClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();

    let err = client.try_get_status().await.unwrap_err();

    assert!(matches!(err, DeviceError::Connection(_)), "got: {err:?}");
    assert!(client.get_status().await.starts_with("Connection error occurred"));
}
