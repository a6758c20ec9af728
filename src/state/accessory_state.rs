// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last-known accessory state.

use crate::types::{Brightness, PowerState};

/// Believed on/off flag and brightness of one accessory.
///
/// Values are optimistic: they reflect what the host last asked for, whether
/// or not the remote controller ever acted on it. Brightness is kept when the
/// light is switched off so it can be replayed on the next power-on.
///
/// # Examples
///
/// ```
/// use lightd_bridge::state::AccessoryState;
/// use lightd_bridge::types::Brightness;
///
/// let mut state = AccessoryState::new();
/// state.set_on(true);
/// state.set_brightness(Brightness::from_host(80));
/// assert!(state.is_on());
/// assert_eq!(state.brightness().value(), 80);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessoryState {
    switch_on: bool,
    brightness: Brightness,
}

impl AccessoryState {
    /// Creates the initial state: off, 0% brightness.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the believed on/off flag.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.switch_on
    }

    /// Returns the on/off flag as a [`PowerState`].
    #[must_use]
    pub fn power_state(&self) -> PowerState {
        PowerState::from(self.switch_on)
    }

    /// Assigns the on/off flag.
    pub fn set_on(&mut self, on: bool) {
        self.switch_on = on;
    }

    /// Returns the stored brightness exactly as last assigned.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Assigns the brightness.
    pub fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }
}
