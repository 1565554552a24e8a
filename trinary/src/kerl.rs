// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use alloc::vec::Vec;

use num_bigint::BigInt;
use sha3::{Digest, Keccak384};

use crate::sponge::{check_block_length, Sponge, HASH_LENGTH};
use crate::{Error, Trit};

/// Amount of bytes of a Keccak-384 digest.
const BYTE_LENGTH: usize = 48;
/// Amount of significant trits of a Kerl block, the last one is always zero.
const SIGNIFICANT_TRITS: usize = HASH_LENGTH - 1;

/// The Kerl sponge: Keccak-384 over the two's-complement byte encoding of
/// 242 balanced trits.
///
/// The address checksum is computed with it.
#[derive(Clone, Default)]
pub struct Kerl {
    keccak: Keccak384,
}

impl Kerl {
    /// Creates a fresh sponge.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sponge for Kerl {
    fn absorb(&mut self, trits: &[Trit]) -> Result<(), Error> {
        check_block_length(trits.len())?;

        for block in trits.chunks(HASH_LENGTH) {
            let bytes = trits_to_bytes(block)?;
            self.keccak.update(bytes);
        }
        Ok(())
    }

    fn squeeze(&mut self, length: usize) -> Result<Vec<Trit>, Error> {
        check_block_length(length)?;

        let mut out = Vec::with_capacity(length);
        for _ in 0..length / HASH_LENGTH {
            let digest = self.keccak.finalize_reset();
            out.extend(bytes_to_trits(&digest));

            let flipped: Vec<u8> = digest.iter().map(|b| !b).collect();
            self.keccak.update(flipped);
        }
        Ok(out)
    }

    fn reset(&mut self) {
        Digest::reset(&mut self.keccak);
    }
}

/// Encodes a block of trits as a 48-byte, big-endian, two's-complement
/// integer. The last trit of the block is ignored.
fn trits_to_bytes(block: &[Trit]) -> Result<[u8; BYTE_LENGTH], Error> {
    let mut value = BigInt::from(0);
    for &trit in block[..SIGNIFICANT_TRITS].iter().rev() {
        if !(-1..=1).contains(&trit) {
            return Err(Error::InvalidTrit(trit));
        }
        value = value * 3u32 + i32::from(trit);
    }

    let signed = value.to_signed_bytes_be();
    let fill = if value.sign() == num_bigint::Sign::Minus {
        0xff
    } else {
        0x00
    };

    // 3^242 < 2^384, so the encoding always fits
    let mut bytes = [fill; BYTE_LENGTH];
    bytes[BYTE_LENGTH - signed.len()..].copy_from_slice(&signed);
    Ok(bytes)
}

/// Decodes a 48-byte two's-complement integer into a block of trits. Only
/// the 242 least significant balanced trits are kept and the last trit of
/// the block is zero.
fn bytes_to_trits(bytes: &[u8]) -> Vec<Trit> {
    let mut value = BigInt::from_signed_bytes_be(bytes);
    let three = BigInt::from(3);

    let mut trits = Vec::with_capacity(HASH_LENGTH);
    for _ in 0..SIGNIFICANT_TRITS {
        let mut rem = &value % &three;
        if rem < BigInt::from(0) {
            rem += &three;
        }
        value = (value - &rem) / &three;

        let trit = if rem == BigInt::from(2) {
            value += 1u32;
            -1
        } else if rem == BigInt::from(1) {
            1
        } else {
            0
        };
        trits.push(trit);
    }
    trits.push(0);
    trits
}
