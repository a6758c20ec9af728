// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the state store and the command translator.
//!
//! - [`PowerState`] - Believed on/off state
//! - [`Brightness`] - Host brightness percentage (0-100)

mod brightness;
mod power;

pub use brightness::Brightness;
pub use power::PowerState;
