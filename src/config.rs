// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration supplied by the host.
//!
//! The host hands each accessory a JSON object. Only `name`, `url` and
//! `device` are required; unknown keys are ignored so the host can keep its
//! own bookkeeping fields in the same object.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::accessory::ACCESSORY_NAME;
use crate::command::{BrightnessConvention, TogglePolicy};
use crate::error::ConfigError;
use crate::protocol::CommandDispatcher;
#[cfg(feature = "http")]
use crate::protocol::HttpConfig;

/// Configuration for one lightd dimmer accessory.
///
/// # Examples
///
/// ```
/// use lightd_bridge::AccessoryConfig;
///
/// let config = AccessoryConfig::from_json_str(
///     r#"{ "accessory": "LightdDimmer", "name": "Lamp", "url": "http://host", "device": "d1" }"#,
/// ).unwrap();
///
/// assert_eq!(config.name, "Lamp");
/// assert!(!config.replay_brightness);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryConfig {
    /// Host registration key this entry was written for.
    #[serde(default = "default_accessory")]
    pub accessory: String,
    /// Display name.
    pub name: String,
    /// Base URL of the lightd controller.
    pub url: String,
    /// Device path segment on the controller.
    pub device: String,
    /// Manufacturer reported in the accessory information service.
    #[serde(default = "default_manufacturer")]
    pub manufacturer: String,
    /// Model reported in the accessory information service.
    #[serde(default = "default_model")]
    pub model: String,
    /// When power changes send `toggle_power`.
    #[serde(default)]
    pub toggle_policy: TogglePolicy,
    /// Threshold table used to pick brightness commands.
    #[serde(default)]
    pub brightness_convention: BrightnessConvention,
    /// Resend the stored brightness level after an explicit power-on.
    #[serde(default)]
    pub replay_brightness: bool,
    /// Request timeout in milliseconds. Sends are bounded by
    /// [`CommandDispatcher::DEFAULT_SEND_TIMEOUT`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_accessory() -> String {
    ACCESSORY_NAME.to_string()
}

fn default_manufacturer() -> String {
    "Jonathan Hoyt".to_string()
}

fn default_model() -> String {
    "lightd".to_string()
}

impl AccessoryConfig {
    /// Creates a configuration with default options.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            accessory: default_accessory(),
            name: name.into(),
            url: url.into(),
            device: device.into(),
            manufacturer: default_manufacturer(),
            model: default_model(),
            toggle_policy: TogglePolicy::default(),
            brightness_convention: BrightnessConvention::default(),
            replay_brightness: false,
            timeout_ms: None,
        }
    }

    /// Parses the host's JSON configuration text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the JSON is malformed or a required
    /// field is missing.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads an already-parsed JSON configuration object.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a required field is missing or has
    /// the wrong type.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Sets the toggle policy.
    #[must_use]
    pub fn with_toggle_policy(mut self, policy: TogglePolicy) -> Self {
        self.toggle_policy = policy;
        self
    }

    /// Sets the brightness threshold table.
    #[must_use]
    pub fn with_brightness_convention(mut self, convention: BrightnessConvention) -> Self {
        self.brightness_convention = convention;
        self
    }

    /// Enables or disables brightness replay on power-on.
    #[must_use]
    pub fn with_replay_brightness(mut self, replay: bool) -> Self {
        self.replay_brightness = replay;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Returns how long the dispatcher waits for any single command.
    #[must_use]
    pub fn send_timeout(&self) -> Duration {
        self.timeout().unwrap_or(CommandDispatcher::DEFAULT_SEND_TIMEOUT)
    }

    /// Builds the HTTP transport configuration.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn to_http_config(&self) -> HttpConfig {
        let config = HttpConfig::new(&self.url, &self.device);
        match self.timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}
