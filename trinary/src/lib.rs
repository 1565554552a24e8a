// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Balanced-ternary primitives for the Sigma wallet.
//!
//! The crate provides the numeral system (trits, trytes and integers), the
//! two sponge constructions the wallet relies on ([`CurlP81`] and [`Kerl`])
//! and the address-level checksum built on top of Kerl.

#![cfg_attr(target_family = "wasm", no_std)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

extern crate alloc;

pub mod checksum;
pub mod ternary;

mod curl;
mod error;
mod kerl;
mod sponge;

pub use curl::CurlP81;
pub use error::Error;
pub use kerl::Kerl;
pub use sponge::{Sponge, HASH_LENGTH};
pub use ternary::{Trit, TRITS_PER_TRYTE, TRYTE_ALPHABET};
