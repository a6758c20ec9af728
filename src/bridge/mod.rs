// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device state bridge.
//!
//! Bridges the host's fine-grained model (bool power, 0-100 brightness) to
//! a controller that only toggles power and knows five brightness levels.
//!
//! # Behavior
//!
//! - Reads return the believed state; they never touch the network.
//! - Writes update the believed state first, then queue zero or more
//!   commands on the dispatcher and return without waiting.
//! - Setting brightness to 0 while on switches the light off. Setting a
//!   non-zero brightness while off switches it on before the level command.
//! - Switching off keeps the stored brightness.

mod builder;

pub use builder::BridgeBuilder;

use parking_lot::Mutex;

use crate::accessory::{Accessory, Characteristic, CharacteristicValue, Service};
use crate::command::DeviceAction;
use crate::config::AccessoryConfig;
use crate::error::{Error, ProtocolError, Result, ValueError};
use crate::protocol::CommandDispatcher;
use crate::state::AccessoryState;
use crate::types::{Brightness, PowerState};

/// One lightd dimmer exposed as an accessory.
///
/// # Examples
///
/// ```no_run
/// use lightd_bridge::{AccessoryConfig, DeviceStateBridge};
///
/// # async fn example() -> lightd_bridge::Result<()> {
/// let bridge = DeviceStateBridge::new(AccessoryConfig::new("Lamp", "http://host", "d1"))?;
///
/// bridge.set_power(true); // GET http://host/d1/toggle_power
/// bridge.set_brightness(80); // GET http://host/d1/75_brightness
///
/// assert!(bridge.get_power());
/// assert_eq!(bridge.get_brightness(), 80);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeviceStateBridge {
    config: AccessoryConfig,
    state: Mutex<AccessoryState>,
    dispatcher: CommandDispatcher,
}

impl DeviceStateBridge {
    /// Creates a bridge builder for `config`.
    #[must_use]
    pub fn builder(config: AccessoryConfig) -> BridgeBuilder {
        BridgeBuilder::new(config)
    }

    /// Creates an HTTP bridge with failures only logged.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created or no tokio
    /// runtime is available.
    #[cfg(feature = "http")]
    pub fn new(config: AccessoryConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AccessoryConfig {
        &self.config
    }

    /// Returns a snapshot of the believed state.
    #[must_use]
    pub fn state(&self) -> AccessoryState {
        *self.state.lock()
    }

    /// Returns the believed on/off flag.
    #[must_use]
    pub fn get_power(&self) -> bool {
        let power = self.state.lock().power_state();
        tracing::info!(accessory = %self.config.name, "Lights are: {power}");
        power.is_on()
    }

    /// Switches the light on or off.
    pub fn set_power(&self, on: bool) {
        let desired = PowerState::from(on);
        let mut state = self.state.lock();
        self.apply_power(&mut state, desired, self.config.replay_brightness);
        tracing::info!(accessory = %self.config.name, "Lights were changed to: {desired}");
    }

    /// Returns the stored brightness percentage.
    #[must_use]
    pub fn get_brightness(&self) -> u8 {
        let brightness = self.state.lock().brightness();
        tracing::info!(accessory = %self.config.name, "Light brightness is: {brightness}");
        brightness.value()
    }

    /// Sets the brightness percentage.
    ///
    /// The host guarantees 0-100; other values are stored as given and
    /// quantize to `100_brightness`.
    pub fn set_brightness(&self, value: u8) {
        let brightness = Brightness::from_host(value);
        let mut state = self.state.lock();
        state.set_brightness(brightness);
        tracing::info!(
            accessory = %self.config.name,
            "Light brightness was changed to: {brightness}"
        );

        if brightness.is_lit() {
            if !state.is_on() {
                tracing::info!(
                    accessory = %self.config.name,
                    "Brightness raised while off, switching on"
                );
                self.apply_power(&mut state, PowerState::On, false);
            }
            let action = self.config.brightness_convention.quantize(brightness);
            self.dispatcher.dispatch(action);
        } else if state.is_on() {
            tracing::info!(accessory = %self.config.name, "Brightness set to 0, switching off");
            self.apply_power(&mut state, PowerState::Off, false);
        }
    }

    /// Waits until every command queued so far has been attempted.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ChannelClosed` if the dispatcher has stopped.
    pub async fn flush(&self) -> std::result::Result<(), ProtocolError> {
        self.dispatcher.flush().await
    }

    /// Sends any queued commands and stops the dispatcher.
    pub async fn shutdown(self) {
        self.dispatcher.shutdown().await;
    }

    fn apply_power(&self, state: &mut AccessoryState, desired: PowerState, replay: bool) {
        let current = state.power_state();
        state.set_on(desired.is_on());

        if !self.config.toggle_policy.requires_toggle(current, desired) {
            tracing::debug!(
                accessory = %self.config.name,
                "Lights already {desired}, skipping toggle"
            );
            return;
        }
        self.dispatcher.dispatch(DeviceAction::TogglePower);

        let brightness = state.brightness();
        if replay && !current.is_on() && desired.is_on() && brightness.is_lit() {
            tracing::debug!(accessory = %self.config.name, "Replaying brightness {brightness}");
            let action = self.config.brightness_convention.quantize(brightness);
            self.dispatcher.dispatch(action);
        }
    }

    fn saturate_brightness(value: i64) -> u8 {
        u8::try_from(value).unwrap_or(if value < 0 { 0 } else { u8::MAX })
    }
}

impl Accessory for DeviceStateBridge {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn identify(&self) {
        tracing::info!(accessory = %self.config.name, "Identify!");
    }

    fn services(&self) -> Vec<Service> {
        vec![
            Service::accessory_information(&self.config.name),
            Service::lightbulb(&self.config.name),
        ]
    }

    fn handle_get(&self, characteristic: Characteristic) -> Result<CharacteristicValue> {
        let value = match characteristic {
            Characteristic::On => self.get_power().into(),
            Characteristic::Brightness => self.get_brightness().into(),
            Characteristic::Manufacturer => self.config.manufacturer.clone().into(),
            Characteristic::Model => self.config.model.clone().into(),
            Characteristic::Name => self.config.name.clone().into(),
        };
        Ok(value)
    }

    fn handle_set(&self, characteristic: Characteristic, value: CharacteristicValue) -> Result<()> {
        if !characteristic.is_writable() {
            return Err(Error::ReadOnlyCharacteristic(characteristic));
        }
        match characteristic {
            Characteristic::On => {
                let on = value.as_bool().ok_or(ValueError::TypeMismatch {
                    characteristic,
                    expected: "bool",
                })?;
                self.set_power(on);
            }
            Characteristic::Brightness => {
                let level = value.as_int().ok_or(ValueError::TypeMismatch {
                    characteristic,
                    expected: "integer",
                })?;
                self.set_brightness(Self::saturate_brightness(level));
            }
            // Rejected above
            _ => {}
        }
        Ok(())
    }
}
