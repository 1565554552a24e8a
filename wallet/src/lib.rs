// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! # Sigma Wallet Lib
//!
//! The `sigma_wallet` library holds the client side of the Sigma wallet that
//! is independent of any rendering: the conditional deposit address (CDA)
//! magnet-link codec, the typed messages exchanged over the account streams
//! and the immutable view models derived from them.
//!
//! A [`MagnetLinkCodec`] encodes a [`ConditionalDepositAddress`] into a
//! self-verifying `iota://` link and decodes such a link back, rejecting it
//! with a [`LinkError`] when it was tampered with, is malformed or expired.

#![deny(missing_docs)]

mod address;
mod cda;
mod clock;
mod error;

pub mod currency;
pub mod stream;
pub mod view;

pub use address::{Address, AddressVerifier, KerlVerifier};
pub use cda::{
    ConditionalDepositAddress, MagnetLinkCodec, LINK_CHECKSUM_TRYTES,
    LINK_SCHEME,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, LinkError};
