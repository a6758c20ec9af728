// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote lightd commands and the rules that select them.
//!
//! The lightd controller accepts exactly six actions, each addressed as a
//! path segment: `GET {base_url}/{device}/{action}`.
//!
//! | Action | Effect |
//! |--------|--------|
//! | `toggle_power` | Flip power (no absolute on/off exists) |
//! | `minimum_brightness` | Lowest dim level |
//! | `25_brightness` | 25% |
//! | `50_brightness` | 50% |
//! | `75_brightness` | 75% |
//! | `100_brightness` | Full brightness |
//!
//! # Examples
//!
//! ```
//! use lightd_bridge::command::{quantize, DeviceAction, TogglePolicy};
//! use lightd_bridge::types::{Brightness, PowerState};
//!
//! assert_eq!(quantize(Brightness::new(80).unwrap()), DeviceAction::Brightness75);
//! assert!(!TogglePolicy::Guarded.requires_toggle(PowerState::On, PowerState::On));
//! ```

mod brightness;
mod power;

pub use brightness::{BrightnessConvention, quantize};
pub use power::TogglePolicy;

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A single command understood by the lightd controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceAction {
    /// Flip the power state.
    TogglePower,
    /// Lowest non-zero brightness.
    MinimumBrightness,
    /// 25% brightness.
    Brightness25,
    /// 50% brightness.
    Brightness50,
    /// 75% brightness.
    Brightness75,
    /// Full brightness.
    Brightness100,
}

impl DeviceAction {
    /// Every action, in wire-table order.
    pub const ALL: [Self; 6] = [
        Self::TogglePower,
        Self::MinimumBrightness,
        Self::Brightness25,
        Self::Brightness50,
        Self::Brightness75,
        Self::Brightness100,
    ];

    /// Returns the path segment sent to the controller.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TogglePower => "toggle_power",
            Self::MinimumBrightness => "minimum_brightness",
            Self::Brightness25 => "25_brightness",
            Self::Brightness50 => "50_brightness",
            Self::Brightness75 => "75_brightness",
            Self::Brightness100 => "100_brightness",
        }
    }

    /// Returns `true` for the brightness-level actions.
    #[must_use]
    pub const fn is_brightness(&self) -> bool {
        !matches!(self, Self::TogglePower)
    }
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceAction {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ValueError::UnknownAction(s.to_string()))
    }
}
