// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversions between trits, trytes and integers.
//!
//! Trit slices are little-endian: the trit at index `0` is the least
//! significant digit. Every tryte is encoded as one symbol of
//! [`TRYTE_ALPHABET`], where `9` is zero, `A` to `M` are `1` to `13` and `N`
//! to `Z` are `-13` to `-1`.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::Error;

/// A balanced-ternary digit, one of `-1`, `0` or `1`.
pub type Trit = i8;

/// The amount of trits encoded by a single tryte.
pub const TRITS_PER_TRYTE: usize = 3;

/// The symbols used to display trytes, indexed by tryte value modulo 27.
pub const TRYTE_ALPHABET: &[u8; 27] = b"9ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const TRYTE_RADIX: i8 = 27;
const MAX_TRYTE_VALUE: i8 = 13;

/// Returns `true` if every symbol of `trytes` belongs to the tryte alphabet.
pub fn is_trytes(trytes: &str) -> bool {
    trytes.bytes().all(|b| TRYTE_ALPHABET.contains(&b))
}

fn tryte_value(symbol: char) -> Result<i8, Error> {
    let index = TRYTE_ALPHABET
        .iter()
        .position(|&b| char::from(b) == symbol)
        .ok_or(Error::InvalidTryte(symbol))?;

    // the alphabet has 27 entries, the index fits an i8
    let value = index as i8;

    Ok(if value > MAX_TRYTE_VALUE {
        value - TRYTE_RADIX
    } else {
        value
    })
}

/// Converts a tryte string into its trits.
///
/// # Errors
/// If any symbol is not part of the tryte alphabet.
pub fn trytes_to_trits(trytes: &str) -> Result<Vec<Trit>, Error> {
    let mut trits = Vec::with_capacity(trytes.len() * TRITS_PER_TRYTE);

    for symbol in trytes.chars() {
        let mut value = tryte_value(symbol)?;
        for _ in 0..TRITS_PER_TRYTE {
            let (trit, carry) = balanced_digit(i128::from(value));
            trits.push(trit);
            value = carry as i8;
        }
    }

    Ok(trits)
}

/// Converts trits into their tryte string.
///
/// # Errors
/// If the amount of trits is not a multiple of [`TRITS_PER_TRYTE`] or if any
/// of them is not a valid trit.
pub fn trits_to_trytes(trits: &[Trit]) -> Result<String, Error> {
    if trits.len() % TRITS_PER_TRYTE != 0 {
        return Err(Error::InvalidLength {
            expected: TRITS_PER_TRYTE,
            found: trits.len(),
        });
    }

    trits
        .chunks(TRITS_PER_TRYTE)
        .map(|chunk| {
            let mut value = 0i8;
            for &trit in chunk.iter().rev() {
                check_trit(trit)?;
                value = value * 3 + trit;
            }
            let index = ((value + TRYTE_RADIX) % TRYTE_RADIX) as usize;
            Ok(char::from(TRYTE_ALPHABET[index]))
        })
        .collect()
}

/// Returns the canonical balanced-ternary representation of `value`.
///
/// The representation has no trailing zero trits, with the exception of
/// zero itself which is represented by a single zero trit.
pub fn int_to_trits<I: Into<i128>>(value: I) -> Vec<Trit> {
    let mut value = value.into();
    if value == 0 {
        return vec![0];
    }

    let mut trits = Vec::new();
    while value != 0 {
        let (trit, carry) = balanced_digit(value);
        trits.push(trit);
        value = carry;
    }
    trits
}

/// Returns the integer represented by the given trits.
///
/// # Errors
/// If a trit is invalid or the value does not fit an `i128`.
pub fn trits_to_int(trits: &[Trit]) -> Result<i128, Error> {
    let overflow = Error::Overflow {
        width: trits.len(),
    };

    trits.iter().rev().try_fold(0i128, |acc, &trit| {
        check_trit(trit)?;
        acc.checked_mul(3)
            .and_then(|acc| acc.checked_add(i128::from(trit)))
            .ok_or(overflow)
    })
}

/// Right-pads `trits` with zero trits up to `width`.
///
/// # Errors
/// If `trits` is already longer than `width`.
pub fn pad_trits(trits: &[Trit], width: usize) -> Result<Vec<Trit>, Error> {
    if trits.len() > width {
        return Err(Error::Overflow { width });
    }

    let mut padded = Vec::with_capacity(width);
    padded.extend_from_slice(trits);
    padded.resize(width, 0);
    Ok(padded)
}

/// Splits off the least significant balanced trit of `value`, returning it
/// together with the remaining, already carried, value.
fn balanced_digit(value: i128) -> (Trit, i128) {
    let rem = value.rem_euclid(3);
    let value = value.div_euclid(3);

    match rem as i8 {
        2 => (-1, value + 1),
        trit => (trit, value),
    }
}

fn check_trit(trit: Trit) -> Result<(), Error> {
    match trit {
        -1..=1 => Ok(()),
        _ => Err(Error::InvalidTrit(trit)),
    }
}
