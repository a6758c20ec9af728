// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory state store.
//!
//! [`AccessoryState`] is a plain value. The bridge owns one per accessory
//! behind a mutex and is the only code that mutates it.

mod accessory_state;

pub use accessory_state::AccessoryState;
