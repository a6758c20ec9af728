// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the lightd bridge.
//!
//! None of these errors is fatal to the host process. Network failures never
//! reach the handler that caused them: they are reported asynchronously
//! through the dispatcher's error sink (see
//! [`CommandDispatcher`](crate::protocol::CommandDispatcher)).

use thiserror::Error;

use crate::accessory::Characteristic;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The accessory configuration could not be read.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The host tried to write a read-only characteristic.
    #[error("characteristic {0} is read-only")]
    ReadOnlyCharacteristic(Characteristic),

    /// A background dispatcher was requested outside a tokio runtime.
    #[error("no tokio runtime available to spawn the command dispatcher")]
    NoRuntime,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// An invalid power state string was provided.
    #[error("invalid power state: {0}")]
    InvalidPowerState(String),

    /// An unknown remote action identifier was provided.
    #[error("unknown device action: {0}")]
    UnknownAction(String),

    /// The host passed a value of the wrong type for a characteristic.
    #[error("{characteristic} expects a value of type {expected}")]
    TypeMismatch {
        /// The characteristic being written.
        characteristic: Characteristic,
        /// Human-readable name of the expected value type.
        expected: &'static str,
    },
}

/// Errors related to HTTP communication with the remote controller.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The controller answered with a non-success status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// The numeric status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// The controller did not answer in time.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to reading the host-provided accessory configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration object is malformed or lacks a required field.
    #[error("invalid accessory configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
