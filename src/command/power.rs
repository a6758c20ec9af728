// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power toggle policy.

use serde::{Deserialize, Serialize};

use crate::types::PowerState;

/// Decides when a power change needs a `toggle_power` command.
///
/// # Examples
///
/// ```
/// use lightd_bridge::command::TogglePolicy;
/// use lightd_bridge::types::PowerState;
///
/// // Guarded: only real transitions toggle
/// assert!(TogglePolicy::Guarded.requires_toggle(PowerState::Off, PowerState::On));
/// assert!(!TogglePolicy::Guarded.requires_toggle(PowerState::On, PowerState::On));
///
/// // Naive: every request toggles, even a repeated one
/// assert!(TogglePolicy::Naive.requires_toggle(PowerState::On, PowerState::On));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TogglePolicy {
    /// Toggle only when the requested state differs from the believed one.
    #[default]
    Guarded,
    /// Toggle on every power request.
    ///
    /// Repeating a request flips the physical light twice, leaving it in the
    /// opposite state from the one the bridge believes.
    Naive,
}

impl TogglePolicy {
    /// Returns whether moving from `current` to `desired` sends a toggle.
    #[must_use]
    pub const fn requires_toggle(self, current: PowerState, desired: PowerState) -> bool {
        match self {
            Self::Guarded => current.is_on() != desired.is_on(),
            Self::Naive => true,
        }
    }
}
