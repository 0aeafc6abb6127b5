//! Integration tests for the service status checker

use azuriom_client::{ServiceStatus, StatusBoard, StatusChecker};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICES: [&str; 6] = [
    "sessionserver.mojang.com",
    "authserver.mojang.com",
    "textures.minecraft.net",
    "api.mojang.com",
    "minecraft.net",
    "account.mojang.com",
];

fn checker(server: &MockServer) -> StatusChecker {
    StatusChecker::with_client(reqwest::Client::new(), format!("{}/check", server.uri()))
}

fn status_of(board: &StatusBoard, service: &str) -> ServiceStatus {
    board
        .get(service)
        .map(|e| e.status)
        .unwrap_or_else(|| panic!("missing service {}", service))
}

fn assert_baseline_order(board: &StatusBoard) {
    let services: Vec<_> = board.iter().map(|e| e.service).collect();
    assert_eq!(services, SERVICES);
}

#[tokio::test]
async fn test_success_updates_reported_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/check"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "authserver.mojang.com": "red" }])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let board = checker(&mock_server).check_status().await;

    assert_baseline_order(&board);
    assert_eq!(status_of(&board, "authserver.mojang.com"), ServiceStatus::Red);
    assert_eq!(status_of(&board, "sessionserver.mojang.com"), ServiceStatus::Grey);
}

#[tokio::test]
async fn test_full_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "minecraft.net": "green" },
            { "session.minecraft.net": "green" },
            { "account.mojang.com": "green" },
            { "authserver.mojang.com": "green" },
            { "sessionserver.mojang.com": "YELLOW" },
            { "api.mojang.com": "green" },
            { "textures.minecraft.net": "red" },
            { "mojang.com": "green" }
        ])))
        .mount(&mock_server)
        .await;

    let board = checker(&mock_server).check_status().await;

    assert_eq!(board.len(), 6);
    assert_baseline_order(&board);
    assert_eq!(status_of(&board, "sessionserver.mojang.com"), ServiceStatus::Yellow);
    assert_eq!(status_of(&board, "textures.minecraft.net"), ServiceStatus::Red);
    assert_eq!(status_of(&board, "minecraft.net"), ServiceStatus::Green);
    assert!(board.get("mojang.com").is_none());
}

#[tokio::test]
async fn test_unknown_services_are_ignored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "skins.minecraft.net": "red" },
            { "example.com": "green" }
        ])))
        .mount(&mock_server)
        .await;

    let board = checker(&mock_server).check_status().await;

    assert_eq!(board, StatusBoard::baseline());
}

#[tokio::test]
async fn test_non_200_degrades_to_grey() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!([{ "minecraft.net": "green" }])),
        )
        .mount(&mock_server)
        .await;

    let mut previous = StatusBoard::baseline();
    previous.apply(&[json!({ "api.mojang.com": "green" })]);

    let board = checker(&mock_server).refresh(&previous).await;

    assert_baseline_order(&board);
    assert!(board.iter().all(|e| e.status == ServiceStatus::Grey));
}

#[tokio::test]
async fn test_invalid_body_reports_baseline() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let board = checker(&mock_server).check_status().await;

    assert_eq!(board, StatusBoard::baseline());
}

#[tokio::test]
async fn test_refresh_keeps_previous_on_non_list_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "minecraft.net": "red" })),
        )
        .mount(&mock_server)
        .await;

    let mut previous = StatusBoard::baseline();
    previous.apply(&[
        json!({ "minecraft.net": "green" }),
        json!({ "api.mojang.com": "yellow" }),
    ]);

    let board = checker(&mock_server).refresh(&previous).await;

    assert_eq!(board, previous);
    assert_eq!(status_of(&board, "minecraft.net"), ServiceStatus::Green);
}

#[tokio::test]
async fn test_transport_error_degrades_to_grey() {
    // Reserve a port, then free it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let checker = StatusChecker::with_client(
        reqwest::Client::new(),
        format!("http://127.0.0.1:{}/check", port),
    );

    let mut previous = StatusBoard::baseline();
    previous.apply(&[json!({ "minecraft.net": "green" })]);

    let board = checker.refresh(&previous).await;

    assert_baseline_order(&board);
    assert!(board.iter().all(|e| e.status == ServiceStatus::Grey));
}

#[tokio::test]
async fn test_timeout_degrades_to_grey() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "minecraft.net": "green" }]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let board = checker(&mock_server)
        .timeout(Duration::from_millis(100))
        .check_status()
        .await;

    assert!(board.iter().all(|e| e.status == ServiceStatus::Grey));
}

#[tokio::test]
async fn test_refresh_keeps_omitted_services() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "authserver.mojang.com": "red" }])),
        )
        .mount(&mock_server)
        .await;

    let mut previous = StatusBoard::baseline();
    previous.apply(&[
        json!({ "minecraft.net": "green" }),
        json!({ "authserver.mojang.com": "green" }),
    ]);

    let board = checker(&mock_server).refresh(&previous).await;

    assert_eq!(status_of(&board, "authserver.mojang.com"), ServiceStatus::Red);
    assert_eq!(status_of(&board, "minecraft.net"), ServiceStatus::Green);
    // The previous result is not modified
    assert_eq!(status_of(&previous, "authserver.mojang.com"), ServiceStatus::Green);
}

#[tokio::test]
async fn test_concurrent_checks_are_independent() {
    let red_server = MockServer::start().await;
    let green_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "api.mojang.com": "red" }])),
        )
        .mount(&red_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "minecraft.net": "green" }])),
        )
        .mount(&green_server)
        .await;

    let red_checker = checker(&red_server);
    let green_checker = checker(&green_server);
    let (red, green) = tokio::join!(red_checker.check_status(), green_checker.check_status());

    assert_eq!(status_of(&red, "api.mojang.com"), ServiceStatus::Red);
    assert_eq!(status_of(&red, "minecraft.net"), ServiceStatus::Grey);
    assert_eq!(status_of(&green, "minecraft.net"), ServiceStatus::Green);
    assert_eq!(status_of(&green, "api.mojang.com"), ServiceStatus::Grey);
}
