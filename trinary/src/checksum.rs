// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Address-level checksum.
//!
//! An address checksum is the last [`ADDRESS_CHECKSUM_TRYTES`] trytes of the
//! [`Kerl`] hash of the address. It only protects the address itself and is
//! unrelated to the checksum of a deposit link.

use alloc::string::String;

use crate::ternary::{trits_to_trytes, trytes_to_trits};
use crate::{Error, Kerl, Sponge, HASH_LENGTH, TRYTE_ALPHABET};

/// Amount of trytes of an address without checksum.
pub const ADDRESS_TRYTES: usize = 81;
/// Amount of trytes of an address checksum.
pub const ADDRESS_CHECKSUM_TRYTES: usize = 9;

fn check_address(address: &str) -> Result<(), Error> {
    if address.len() != ADDRESS_TRYTES {
        return Err(Error::InvalidLength {
            expected: ADDRESS_TRYTES,
            found: address.len(),
        });
    }
    Ok(())
}

/// Computes the checksum of an 81-tryte address.
///
/// # Errors
/// If the address is not made of exactly 81 valid trytes.
pub fn address_checksum(address: &str) -> Result<String, Error> {
    check_address(address)?;
    let trits = trytes_to_trits(address)?;

    let digest = Kerl::new().digest(&trits)?;
    let trytes = trits_to_trytes(&digest)?;

    Ok(trytes[ADDRESS_TRYTES - ADDRESS_CHECKSUM_TRYTES..].into())
}

/// Returns the address followed by its checksum.
///
/// # Errors
/// If the address is not made of exactly 81 valid trytes.
pub fn add_checksum(address: &str) -> Result<String, Error> {
    let checksum = address_checksum(address)?;

    let mut out =
        String::with_capacity(ADDRESS_TRYTES + ADDRESS_CHECKSUM_TRYTES);
    out.push_str(address);
    out.push_str(&checksum);
    Ok(out)
}

/// Checks whether the trailing 9 trytes of a 90-tryte address are its
/// checksum.
///
/// # Errors
/// If the input is not made of exactly 90 valid trytes.
pub fn has_valid_checksum(address_with_checksum: &str) -> Result<bool, Error> {
    if let Some(symbol) = address_with_checksum
        .chars()
        .find(|&c| !u8::try_from(c).is_ok_and(|b| TRYTE_ALPHABET.contains(&b)))
    {
        return Err(Error::InvalidTryte(symbol));
    }

    let expected = ADDRESS_TRYTES + ADDRESS_CHECKSUM_TRYTES;
    if address_with_checksum.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            found: address_with_checksum.len(),
        });
    }

    let (address, checksum) = address_with_checksum.split_at(ADDRESS_TRYTES);
    Ok(address_checksum(address)? == checksum)
}

/// Checks whether the last trit of an 81-tryte address is zero, which holds
/// for every address derived through Kerl.
///
/// # Errors
/// If the address is not made of exactly 81 valid trytes.
pub fn is_normalized(address: &str) -> Result<bool, Error> {
    check_address(address)?;
    let trits = trytes_to_trits(address)?;
    Ok(trits[HASH_LENGTH - 1] == 0)
}
