// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `lightd_bridge` - Exposes a lightd dimmer as a smart-home accessory.
//!
//! A lightd controller drives dimmers over plain HTTP:
//! `GET {url}/{device}/{action}`. It can only toggle power and select one of
//! five brightness levels. This crate keeps the accessory's believed on/off
//! and brightness state, and translates host reads and writes into those
//! commands.
//!
//! # Behavior
//!
//! - **Power**: guarded toggle by default; `toggle_power` is sent only when
//!   the requested state differs from the believed one
//! - **Brightness**: 0-100 is quantized to `minimum`, `25`, `50`, `75` or
//!   `100` (see [`BrightnessConvention`])
//! - **Coupling**: brightness 0 switches the light off, non-zero brightness
//!   while off switches it on first
//! - **Fire-and-forget**: commands are sent in the background; failures are
//!   logged and reported to an optional error sink, never retried
//!
//! # Quick Start
//!
//! ```no_run
//! use lightd_bridge::{
//!     Accessory, AccessoryConfig, Characteristic, CharacteristicValue, DeviceStateBridge,
//! };
//!
//! #[tokio::main]
//! async fn main() -> lightd_bridge::Result<()> {
//!     let config = AccessoryConfig::from_json_str(
//!         r#"{ "name": "Lamp", "url": "http://host", "device": "d1" }"#,
//!     )?;
//!     let bridge = DeviceStateBridge::new(config)?;
//!
//!     // What the host publishes
//!     for service in bridge.services() {
//!         println!("{:?}: {:?}", service.kind(), service.characteristics());
//!     }
//!
//!     // What the host forwards
//!     bridge.handle_set(Characteristic::On, CharacteristicValue::Bool(true))?;
//!     bridge.handle_set(Characteristic::Brightness, CharacteristicValue::Int(80))?;
//!
//!     bridge.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod accessory;
mod bridge;
pub mod command;
mod config;
pub mod error;
pub mod protocol;
pub mod state;
pub mod types;

pub use accessory::{
    ACCESSORY_NAME, Accessory, Characteristic, CharacteristicValue, Service, ServiceKind,
};
pub use bridge::{BridgeBuilder, DeviceStateBridge};
pub use command::{BrightnessConvention, DeviceAction, TogglePolicy, quantize};
pub use config::AccessoryConfig;
pub use error::{ConfigError, Error, ProtocolError, Result, ValueError};
pub use protocol::{CommandDispatcher, DispatchFailure, ErrorSink, Protocol};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use state::AccessoryState;
pub use types::{Brightness, PowerState};
