// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness quantization.
//!
//! The host requests any percentage in 0-100; the controller only knows five
//! levels. Each [`BrightnessConvention`] is a frozen threshold table.

use serde::{Deserialize, Serialize};

use crate::command::DeviceAction;
use crate::types::Brightness;

/// Threshold table mapping a percentage to a brightness action.
///
/// | Range | `LowerBoundInclusive` | `InclusiveCeiling` |
/// |-------|-----------------------|--------------------|
/// | `minimum_brightness` | `0..25` | `0..26` |
/// | `25_brightness` | `25..50` | `26..51` |
/// | `50_brightness` | `50..75` | `51..76` |
/// | `75_brightness` | `75..100` | `76..100` |
/// | `100_brightness` | `100` | `100` |
///
/// Values above 100 map to `100_brightness` under both tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrightnessConvention {
    /// Buckets start at the round number (25, 50, 75).
    #[default]
    LowerBoundInclusive,
    /// Buckets are shifted up by one (26, 51, 76), as on older firmware.
    InclusiveCeiling,
}

impl BrightnessConvention {
    /// Selects the single action for a brightness value.
    ///
    /// # Examples
    ///
    /// ```
    /// use lightd_bridge::command::{BrightnessConvention, DeviceAction};
    /// use lightd_bridge::types::Brightness;
    ///
    /// let level = Brightness::new(25).unwrap();
    /// assert_eq!(
    ///     BrightnessConvention::LowerBoundInclusive.quantize(level),
    ///     DeviceAction::Brightness25
    /// );
    /// assert_eq!(
    ///     BrightnessConvention::InclusiveCeiling.quantize(level),
    ///     DeviceAction::MinimumBrightness
    /// );
    /// ```
    #[must_use]
    pub const fn quantize(self, brightness: Brightness) -> DeviceAction {
        let [quarter, half, three_quarters] = self.thresholds();
        let v = brightness.value();
        if v < quarter {
            DeviceAction::MinimumBrightness
        } else if v < half {
            DeviceAction::Brightness25
        } else if v < three_quarters {
            DeviceAction::Brightness50
        } else if v < 100 {
            DeviceAction::Brightness75
        } else {
            DeviceAction::Brightness100
        }
    }

    const fn thresholds(self) -> [u8; 3] {
        match self {
            Self::LowerBoundInclusive => [25, 50, 75],
            Self::InclusiveCeiling => [26, 51, 76],
        }
    }
}

/// Quantizes with the default [`BrightnessConvention`].
#[must_use]
pub const fn quantize(brightness: Brightness) -> DeviceAction {
    BrightnessConvention::LowerBoundInclusive.quantize(brightness)
}
