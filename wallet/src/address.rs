// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sigma_trinary::checksum::{
    add_checksum, has_valid_checksum, is_normalized, ADDRESS_CHECKSUM_TRYTES,
    ADDRESS_TRYTES,
};
use sigma_trinary::ternary::is_trytes;

use crate::Error;

/// Amount of symbols shown by [`Address::preview`].
const PREVIEW_TRYTES: usize = 15;

/// An 81-tryte deposit address, without checksum.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The trytes of the address
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the address followed by its 9-tryte checksum.
    ///
    /// # Errors
    /// Never for a parsed address, the error is only propagated from the
    /// ternary conversion.
    pub fn with_checksum(&self) -> Result<String, Error> {
        Ok(add_checksum(&self.0)?)
    }

    /// A trimmed version of the address to display as preview
    pub fn preview(&self) -> String {
        format!("{}...", &self.0[..PREVIEW_TRYTES])
    }
}

/// Parses an address given either as 81 trytes, or as 90 trytes whose last
/// nine are its checksum.
impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_trytes(s) {
            return Err(Error::BadAddress);
        }

        match s.len() {
            ADDRESS_TRYTES => Ok(Self(s.to_string())),
            len if len == ADDRESS_TRYTES + ADDRESS_CHECKSUM_TRYTES => {
                if !has_valid_checksum(s)? {
                    return Err(Error::BadAddress);
                }
                Ok(Self(s[..ADDRESS_TRYTES].to_string()))
            }
            _ => Err(Error::BadAddress),
        }
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

/// Address-level integrity check applied to the address of a decoded link.
///
/// The check is independent of the link checksum, which protects the link
/// parameters.
pub trait AddressVerifier {
    /// Returns `true` if the address passes the check
    fn verify(&self, address: &Address) -> bool;
}

/// Accepts addresses that can be the output of Kerl, whose last trit is
/// always zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct KerlVerifier;

impl AddressVerifier for KerlVerifier {
    fn verify(&self, address: &Address) -> bool {
        is_normalized(address.as_str()).unwrap_or(false)
    }
}

impl<F: Fn(&Address) -> bool> AddressVerifier for F {
    fn verify(&self, address: &Address) -> bool {
        self(address)
    }
}
