// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP transport and bridge using wiremock.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use lightd_bridge::protocol::{HttpClient, HttpConfig, Protocol};
use lightd_bridge::{
    Accessory, AccessoryConfig, BrightnessConvention, Characteristic, CharacteristicValue,
    DeviceAction, DeviceStateBridge, ProtocolError, TogglePolicy,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Paths of every request the mock server saw, in arrival order.
async fn received_paths(mock_server: &MockServer) -> Vec<String> {
    mock_server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

async fn accept_everything(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(mock_server)
        .await;
}

// ============================================================================
// HttpClient Tests
// ============================================================================

mod http_client {
    use super::*;

    #[tokio::test]
    async fn sends_toggle_power() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/d1/toggle_power"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(mock_server.uri(), "d1").unwrap();
        client.send_action(DeviceAction::TogglePower).await.unwrap();
    }

    #[tokio::test]
    async fn sends_every_brightness_level() {
        let mock_server = MockServer::start().await;
        accept_everything(&mock_server).await;

        let client = HttpConfig::new(mock_server.uri(), "kitchen")
            .into_client()
            .unwrap();
        for action in DeviceAction::ALL {
            client.send_action(action).await.unwrap();
        }

        assert_eq!(
            received_paths(&mock_server).await,
            [
                "/kitchen/toggle_power",
                "/kitchen/minimum_brightness",
                "/kitchen/25_brightness",
                "/kitchen/50_brightness",
                "/kitchen/75_brightness",
                "/kitchen/100_brightness",
            ]
        );
    }

    #[tokio::test]
    async fn response_body_is_ignored() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/d1/50_brightness"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(mock_server.uri(), "d1").unwrap();
        assert!(client.send_action(DeviceAction::Brightness50).await.is_ok());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/d1/toggle_power"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = HttpClient::new(mock_server.uri(), "d1").unwrap();
        let err = client
            .send_action(DeviceAction::TogglePower)
            .await
            .unwrap_err();

        match err {
            ProtocolError::UnexpectedStatus { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/d1/toggle_power"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

// ============================================================================
// Bridge over HTTP
// ============================================================================

mod bridge {
    use super::*;

    fn lamp(mock_server: &MockServer) -> AccessoryConfig {
        AccessoryConfig::new("Lamp", mock_server.uri(), "d1")
    }

    #[tokio::test]
    async fn power_on_then_brightness_scenario() {
        let mock_server = MockServer::start().await;
        accept_everything(&mock_server).await;

        let bridge = DeviceStateBridge::new(lamp(&mock_server)).unwrap();
        bridge.set_power(true);
        bridge.set_brightness(80);
        bridge.flush().await.unwrap();

        assert_eq!(
            received_paths(&mock_server).await,
            ["/d1/toggle_power", "/d1/75_brightness"]
        );
        let state = bridge.state();
        assert!(state.is_on());
        assert_eq!(state.brightness().value(), 80);
    }

    #[tokio::test]
    async fn guarded_repeat_sends_one_toggle() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/d1/toggle_power"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let bridge = DeviceStateBridge::new(lamp(&mock_server)).unwrap();
        bridge.set_power(true);
        bridge.set_power(true);
        bridge.flush().await.unwrap();
    }

    #[tokio::test]
    async fn naive_repeat_sends_two_toggles() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/d1/toggle_power"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&mock_server)
            .await;

        let config = lamp(&mock_server).with_toggle_policy(TogglePolicy::Naive);
        let bridge = DeviceStateBridge::new(config).unwrap();
        bridge.set_power(true);
        bridge.set_power(true);
        bridge.flush().await.unwrap();
    }

    #[tokio::test]
    async fn brightness_zero_switches_off() {
        let mock_server = MockServer::start().await;
        accept_everything(&mock_server).await;

        let bridge = DeviceStateBridge::new(lamp(&mock_server)).unwrap();
        bridge.set_brightness(100);
        bridge.set_brightness(0);
        bridge.flush().await.unwrap();

        assert!(!bridge.get_power());
        assert_eq!(
            received_paths(&mock_server).await,
            ["/d1/toggle_power", "/d1/100_brightness", "/d1/toggle_power"]
        );
    }

    #[tokio::test]
    async fn older_firmware_thresholds() {
        let mock_server = MockServer::start().await;
        accept_everything(&mock_server).await;

        let config = lamp(&mock_server)
            .with_brightness_convention(BrightnessConvention::InclusiveCeiling);
        let bridge = DeviceStateBridge::new(config).unwrap();
        bridge.set_brightness(75);
        bridge.flush().await.unwrap();

        assert_eq!(
            received_paths(&mock_server).await,
            ["/d1/toggle_power", "/d1/50_brightness"]
        );
    }

    #[tokio::test]
    async fn failures_reach_sink_and_state_stays_optimistic() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let failures = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&failures);
        let bridge = DeviceStateBridge::builder(lamp(&mock_server))
            .with_error_sink(move |failure| recorded.lock().push(failure.action()))
            .build()
            .unwrap();

        bridge.set_brightness(30);
        bridge.flush().await.unwrap();

        assert!(bridge.get_power());
        assert_eq!(bridge.get_brightness(), 30);
        assert_eq!(
            *failures.lock(),
            [DeviceAction::TogglePower, DeviceAction::Brightness25]
        );
        // No retries
        assert_eq!(received_paths(&mock_server).await.len(), 2);
    }

    #[tokio::test]
    async fn unreachable_controller_is_not_fatal() {
        // Port is free again once the listener is dropped
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = AccessoryConfig::new("Lamp", format!("http://{addr}"), "d1");
        let failures = Arc::new(Mutex::new(0usize));
        let recorded = Arc::clone(&failures);
        let bridge = DeviceStateBridge::builder(config)
            .with_error_sink(move |_| *recorded.lock() += 1)
            .build()
            .unwrap();

        bridge.set_power(true);
        bridge.flush().await.unwrap();

        assert!(bridge.get_power());
        assert_eq!(*failures.lock(), 1);
    }

    #[tokio::test]
    async fn stalled_request_does_not_block_later_commands() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/d1/toggle_power"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3600)))
            .mount(&mock_server)
            .await;
        accept_everything(&mock_server).await;

        let failures = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&failures);
        let config = lamp(&mock_server).with_timeout(Duration::from_millis(200));
        let bridge = DeviceStateBridge::builder(config)
            .with_error_sink(move |failure| recorded.lock().push(failure.action()))
            .build()
            .unwrap();

        bridge.set_power(true);
        bridge.set_brightness(80);
        bridge.set_brightness(30);
        tokio::time::timeout(Duration::from_secs(5), bridge.flush())
            .await
            .expect("queue stalled behind an unanswered request")
            .unwrap();

        let paths = received_paths(&mock_server).await;
        let levels: Vec<_> = paths
            .iter()
            .filter(|p| p.ends_with("_brightness"))
            .collect();
        assert_eq!(levels, ["/d1/75_brightness", "/d1/25_brightness"]);
        assert_eq!(*failures.lock(), [DeviceAction::TogglePower]);
        assert!(bridge.get_power());
        assert_eq!(bridge.get_brightness(), 30);
    }

    #[tokio::test]
    async fn host_config_json_drives_bridge() {
        let mock_server = MockServer::start().await;
        accept_everything(&mock_server).await;

        let config = AccessoryConfig::from_value(serde_json::json!({
            "accessory": "LightdDimmer",
            "name": "Desk",
            "url": mock_server.uri(),
            "device": "desk"
        }))
        .unwrap();
        let bridge = DeviceStateBridge::new(config).unwrap();

        bridge
            .handle_set(Characteristic::Brightness, CharacteristicValue::Int(10))
            .unwrap();
        bridge.shutdown().await;

        assert_eq!(
            received_paths(&mock_server).await,
            ["/desk/toggle_power", "/desk/minimum_brightness"]
        );
    }
}
