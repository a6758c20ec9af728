// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for lightd controllers.

use std::time::Duration;

use reqwest::Client;

use crate::command::DeviceAction;
use crate::error::ProtocolError;
use crate::protocol::Protocol;

// ============================================================================
// HttpConfig - Where a dimmer lives on the controller
// ============================================================================

/// Configuration for one dimmer behind a lightd controller.
///
/// Neither the base URL nor the device segment is validated: a malformed
/// URL only shows up as a failed request.
///
/// # Examples
///
/// ```
/// use lightd_bridge::command::DeviceAction;
/// use lightd_bridge::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("http://host", "d1")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(
///     config.action_url(DeviceAction::TogglePower),
///     "http://host/d1/toggle_power"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    base_url: String,
    device: String,
    timeout: Option<Duration>,
}

impl HttpConfig {
    /// Creates a configuration for `device` on the controller at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the controller, e.g. `http://host`
    /// * `device` - Device path segment on that controller
    #[must_use]
    pub fn new(base_url: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            device: device.into(),
            timeout: None,
        }
    }

    /// Sets a request timeout. By default requests never time out.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the controller base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the device path segment.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Builds the URL for an action: `{base_url}/{device}/{action}`.
    #[must_use]
    pub fn action_url(&self, action: DeviceAction) -> String {
        format!("{}/{}/{}", self.base_url, self.device, action.as_str())
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            config: self,
            client,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for a single lightd dimmer.
///
/// Every action is a bodiless `GET`; the response body is ignored.
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: HttpConfig,
    client: Client,
}

impl HttpClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        base_url: impl Into<String>,
        device: impl Into<String>,
    ) -> Result<Self, ProtocolError> {
        HttpConfig::new(base_url, device).into_client()
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

impl Protocol for HttpClient {
    async fn send_action(&self, action: DeviceAction) -> Result<(), ProtocolError> {
        let url = self.config.action_url(action);

        tracing::debug!(url = %url, "Sending lightd command");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        tracing::debug!(url = %url, status = status.as_u16(), "lightd command accepted");

        Ok(())
    }
}
