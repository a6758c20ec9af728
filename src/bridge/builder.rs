// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge builder.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::bridge::DeviceStateBridge;
use crate::config::AccessoryConfig;
use crate::error::Error;
use crate::protocol::{CommandDispatcher, DispatchFailure, ErrorSink, Protocol};
use crate::state::AccessoryState;

/// Builder for [`DeviceStateBridge`].
///
/// Created with [`DeviceStateBridge::builder`]. Building spawns the command
/// dispatcher, so it must happen inside a tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use lightd_bridge::{AccessoryConfig, DeviceStateBridge};
///
/// # async fn example() -> lightd_bridge::Result<()> {
/// let bridge = DeviceStateBridge::builder(AccessoryConfig::new("Lamp", "http://host", "d1"))
///     .with_error_sink(|failure| eprintln!("lamp out of sync: {failure}"))
///     .build()?;
///
/// bridge.set_power(true);
/// # Ok(())
/// # }
/// ```
pub struct BridgeBuilder {
    config: AccessoryConfig,
    sink: Option<ErrorSink>,
}

impl BridgeBuilder {
    pub(crate) fn new(config: AccessoryConfig) -> Self {
        Self { config, sink: None }
    }

    /// Receives every command the controller failed to accept.
    ///
    /// Failures are always logged; the sink is for callers that want to
    /// surface them elsewhere.
    #[must_use]
    pub fn with_error_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&DispatchFailure) + Send + Sync + 'static,
    {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Builds the bridge over HTTP using the configured URL and device.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created or no tokio
    /// runtime is available.
    #[cfg(feature = "http")]
    pub fn build(self) -> Result<DeviceStateBridge, Error> {
        let client = self.config.to_http_config().into_client()?;
        self.build_with_protocol(Arc::new(client))
    }

    /// Builds the bridge over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoRuntime` outside a tokio runtime.
    pub fn build_with_protocol<P: Protocol>(
        self,
        protocol: Arc<P>,
    ) -> Result<DeviceStateBridge, Error> {
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(|_: &DispatchFailure| {}));
        let dispatcher =
            CommandDispatcher::spawn_with_timeout(protocol, sink, self.config.send_timeout())?;

        tracing::info!(
            accessory = %self.config.name,
            device = %self.config.device,
            toggle_policy = ?self.config.toggle_policy,
            brightness_convention = ?self.config.brightness_convention,
            send_timeout = ?self.config.send_timeout(),
            "Dimmer finished initializing"
        );

        Ok(DeviceStateBridge {
            config: self.config,
            state: Mutex::new(AccessoryState::new()),
            dispatcher,
        })
    }
}

impl std::fmt::Debug for BridgeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeBuilder")
            .field("config", &self.config)
            .field("has_error_sink", &self.sink.is_some())
            .finish()
    }
}
