// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io;

/// Reasons for rejecting a magnet link.
///
/// Every reason is recoverable: callers use it to decide what to display and
/// whether a transfer may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The link is not an `iota://` URI carrying a 90-tryte segment
    #[error("The link is malformed")]
    MalformedLink,
    /// The address does not pass the address-level integrity check
    #[error("The address checksum is invalid")]
    InvalidAddressChecksum,
    /// The timeout is missing, not a number or out of range
    #[error("The timeout of the link is invalid")]
    InvalidTimeout,
    /// The timeout is not in the future
    #[error("The link has expired")]
    LinkExpired,
    /// The expected amount is not a non-negative integer
    #[error("The expected amount of the link is invalid")]
    InvalidAmount,
    /// The embedded checksum does not match the link parameters
    #[error("The link checksum does not match its parameters")]
    ChecksumMismatch,
}

/// Errors returned by this library
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Magnet link errors
    #[error(transparent)]
    Link(#[from] LinkError),
    /// Ternary conversion errors
    #[error("A ternary conversion error occurred: {0}")]
    Trinary(#[from] sigma_trinary::Error),
    /// Invalid address
    #[error("Invalid address")]
    BadAddress,
    /// Invalid amount
    #[error("Invalid amount")]
    InvalidAmount,
    /// Unknown unit of the currency
    #[error("Unknown unit {0}")]
    UnknownUnit(String),
    /// A stream message carried an unknown type tag
    #[error("Unknown message type {0}")]
    UnknownMessage(u8),
    /// Filesystem errors
    #[error(transparent)]
    IO(#[from] io::Error),
    /// JSON serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Configuration file errors
    #[error("Cannot parse the configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// URL errors
    #[error(transparent)]
    Url(#[from] url::ParseError),
    /// The URL scheme cannot be mapped to a stream scheme
    #[error("Unsupported URL scheme {0}")]
    UnsupportedScheme(String),
    /// Home directory cannot be determined
    #[error("OS not supported")]
    OsNotSupported,
}
