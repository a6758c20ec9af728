// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness percentage as requested by the accessory host.

use std::fmt;

use crate::error::ValueError;

/// Brightness level as a percentage (0-100).
///
/// The host validates brightness before calling into the bridge, so
/// [`Brightness::from_host`] keeps whatever it is given. Use
/// [`Brightness::new`] when the value comes from anywhere else.
///
/// # Examples
///
/// ```
/// use lightd_bridge::types::Brightness;
///
/// let level = Brightness::new(75).unwrap();
/// assert_eq!(level.value(), 75);
/// assert!(Brightness::new(101).is_err());
///
/// // Host values are stored as-is
/// assert_eq!(Brightness::from_host(120).value(), 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Brightness(u8);

impl Brightness {
    /// Zero brightness; drives the light off.
    pub const OFF: Self = Self(0);

    /// Full brightness (100%).
    pub const MAX: Self = Self(100);

    /// Creates a validated brightness value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Wraps a host-supplied value without range checking.
    #[must_use]
    pub const fn from_host(value: u8) -> Self {
        Self(value)
    }

    /// Returns the brightness percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` when the light should be lit at this level.
    #[must_use]
    pub const fn is_lit(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for Brightness {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Brightness> for u8 {
    fn from(value: Brightness) -> Self {
        value.0
    }
}
