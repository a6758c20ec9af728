// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristics and the values the host exchanges for them.

use std::fmt;

/// A characteristic exposed by one of the accessory's services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Lightbulb on/off flag (read/write, bool).
    On,
    /// Lightbulb brightness (read/write, integer 0-100).
    Brightness,
    /// Accessory manufacturer (read-only, string).
    Manufacturer,
    /// Accessory model (read-only, string).
    Model,
    /// Accessory display name (read-only, string).
    Name,
}

impl Characteristic {
    /// Returns the characteristic name used by accessory hosts.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Brightness => "Brightness",
            Self::Manufacturer => "Manufacturer",
            Self::Model => "Model",
            Self::Name => "Name",
        }
    }

    /// Returns `true` if the host may write this characteristic.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(self, Self::On | Self::Brightness)
    }

    /// Returns the inclusive value range for numeric characteristics.
    #[must_use]
    pub const fn value_range(&self) -> Option<(i64, i64)> {
        match self {
            Self::Brightness => Some((0, 100)),
            _ => None,
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value read from or written to a characteristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacteristicValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// String value.
    String(String),
}

impl CharacteristicValue {
    /// Returns the boolean, if this is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for CharacteristicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u8> for CharacteristicValue {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for CharacteristicValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
