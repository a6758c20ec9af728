// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-facing accessory surface.
//!
//! An accessory host (a HomeKit bridge, for example) owns registration,
//! pairing and transport. It talks to this crate through the [`Accessory`]
//! trait: it asks which [`Service`]s to publish, then forwards every
//! characteristic read and write to [`Accessory::handle_get`] and
//! [`Accessory::handle_set`]. Invocations are serialized per accessory by
//! the host.

mod characteristic;
mod service;

pub use characteristic::{Characteristic, CharacteristicValue};
pub use service::{Service, ServiceKind};

use crate::error::Result;

/// Name under which the dimmer accessory registers with the host.
pub const ACCESSORY_NAME: &str = "LightdDimmer";

/// An accessory the host can publish and drive.
pub trait Accessory {
    /// Display name of the accessory.
    fn name(&self) -> &str;

    /// Called when the user asks the accessory to identify itself,
    /// typically during pairing.
    fn identify(&self);

    /// Services to publish, in order.
    fn services(&self) -> Vec<Service>;

    /// Reads a characteristic.
    ///
    /// # Errors
    ///
    /// Returns an error if the characteristic cannot be read.
    fn handle_get(&self, characteristic: Characteristic) -> Result<CharacteristicValue>;

    /// Writes a characteristic.
    ///
    /// # Errors
    ///
    /// Returns an error if the characteristic is read-only or `value` has
    /// the wrong type.
    fn handle_set(&self, characteristic: Characteristic, value: CharacteristicValue)
    -> Result<()>;
}
