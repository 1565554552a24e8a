// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use alloc::vec::Vec;

use crate::sponge::{check_block_length, Sponge, HASH_LENGTH};
use crate::{Error, Trit};

const STATE_LENGTH: usize = HASH_LENGTH * 3;
const ROUNDS: usize = 81;

const TRUTH_TABLE: [Trit; 11] = [1, 0, -1, 2, 1, -1, 0, 2, -1, 1, 0];

/// The Curl-P sponge with 81 rounds.
///
/// The link checksum of a conditional deposit address is computed with it.
#[derive(Clone)]
pub struct CurlP81 {
    state: [Trit; STATE_LENGTH],
}

impl CurlP81 {
    /// Creates a sponge with a zeroed state.
    pub fn new() -> Self {
        Self {
            state: [0; STATE_LENGTH],
        }
    }

    fn transform(&mut self) {
        let mut scratch = [0; STATE_LENGTH];
        let mut index = 0usize;

        for _ in 0..ROUNDS {
            scratch.copy_from_slice(&self.state);
            for trit in &mut self.state {
                let prev = index;
                if index < 365 {
                    index += 364;
                } else {
                    index -= 365;
                }
                let lookup = scratch[prev] + (scratch[index] << 2) + 5;
                *trit = TRUTH_TABLE[lookup as usize];
            }
        }
    }
}

impl Default for CurlP81 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sponge for CurlP81 {
    fn absorb(&mut self, trits: &[Trit]) -> Result<(), Error> {
        check_block_length(trits.len())?;
        if let Some(&trit) = trits.iter().find(|t| !(-1..=1).contains(*t)) {
            return Err(Error::InvalidTrit(trit));
        }

        for block in trits.chunks(HASH_LENGTH) {
            self.state[..HASH_LENGTH].copy_from_slice(block);
            self.transform();
        }
        Ok(())
    }

    fn squeeze(&mut self, length: usize) -> Result<Vec<Trit>, Error> {
        check_block_length(length)?;

        let mut out = Vec::with_capacity(length);
        for _ in 0..length / HASH_LENGTH {
            out.extend_from_slice(&self.state[..HASH_LENGTH]);
            self.transform();
        }
        Ok(out)
    }

    fn reset(&mut self) {
        self.state = [0; STATE_LENGTH];
    }
}
