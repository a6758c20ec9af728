// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the remote lightd controller.
//!
//! - [`HttpClient`]: sends each [`DeviceAction`] as a bare `GET` request
//! - [`CommandDispatcher`]: fire-and-forget background sender used by the
//!   bridge so host callbacks never wait on the network

mod dispatch;
#[cfg(feature = "http")]
mod http;

pub use dispatch::{CommandDispatcher, DispatchFailure, ErrorSink};
#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::future::Future;

use crate::command::DeviceAction;
use crate::error::ProtocolError;

/// Trait for transports that can deliver actions to a lightd controller.
///
/// Responses carry no payload the bridge cares about, so success is just
/// `Ok(())`.
pub trait Protocol: Send + Sync + 'static {
    /// Sends one action to the controller.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request could not be delivered or the
    /// controller rejected it.
    fn send_action(
        &self,
        action: DeviceAction,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}
