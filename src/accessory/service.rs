// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Services an accessory publishes to the host.

use crate::accessory::Characteristic;

/// Kind of service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    /// Manufacturer, model and name.
    AccessoryInformation,
    /// Dimmable light with on/off and brightness.
    Lightbulb,
}

/// A service and the characteristics it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    kind: ServiceKind,
    name: String,
    characteristics: Vec<Characteristic>,
}

impl Service {
    /// Accessory information service.
    #[must_use]
    pub fn accessory_information(name: impl Into<String>) -> Self {
        Self {
            kind: ServiceKind::AccessoryInformation,
            name: name.into(),
            characteristics: vec![
                Characteristic::Manufacturer,
                Characteristic::Model,
                Characteristic::Name,
            ],
        }
    }

    /// Dimmable lightbulb service.
    #[must_use]
    pub fn lightbulb(name: impl Into<String>) -> Self {
        Self {
            kind: ServiceKind::Lightbulb,
            name: name.into(),
            characteristics: vec![Characteristic::On, Characteristic::Brightness],
        }
    }

    /// Returns the service kind.
    #[must_use]
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Returns the service display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the characteristics in registration order.
    #[must_use]
    pub fn characteristics(&self) -> &[Characteristic] {
        &self.characteristics
    }

    /// Returns `true` if the service carries `characteristic`.
    #[must_use]
    pub fn has(&self, characteristic: Characteristic) -> bool {
        self.characteristics.contains(&characteristic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lightbulb_carries_on_and_brightness() {
        let service = Service::lightbulb("Lamp");
        assert_eq!(service.kind(), ServiceKind::Lightbulb);
        assert_eq!(service.name(), "Lamp");
        assert_eq!(
            service.characteristics(),
            [Characteristic::On, Characteristic::Brightness]
        );
    }

    #[test]
    fn information_is_read_only() {
        let service = Service::accessory_information("Lamp");
        assert!(service.has(Characteristic::Manufacturer));
        assert!(!service.has(Characteristic::On));
        assert!(service.characteristics().iter().all(|c| !c.is_writable()));
    }
}
