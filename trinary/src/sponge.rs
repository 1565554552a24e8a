// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use alloc::vec::Vec;

use crate::{Error, Trit};

/// The amount of trits absorbed or squeezed per block, which is also the
/// length of a hash.
pub const HASH_LENGTH: usize = 243;

/// A sponge construction operating on trits.
pub trait Sponge {
    /// Absorbs `trits` into the sponge state.
    ///
    /// # Errors
    /// If the amount of trits is not a non-zero multiple of [`HASH_LENGTH`].
    fn absorb(&mut self, trits: &[Trit]) -> Result<(), Error>;

    /// Squeezes `length` trits out of the sponge.
    ///
    /// # Errors
    /// If `length` is not a non-zero multiple of [`HASH_LENGTH`].
    fn squeeze(&mut self, length: usize) -> Result<Vec<Trit>, Error>;

    /// Resets the sponge to its initial state.
    fn reset(&mut self);

    /// Resets the sponge, absorbs `trits` and squeezes a single hash.
    ///
    /// # Errors
    /// If the amount of trits is not a non-zero multiple of [`HASH_LENGTH`].
    fn digest(&mut self, trits: &[Trit]) -> Result<Vec<Trit>, Error> {
        self.reset();
        self.absorb(trits)?;
        self.squeeze(HASH_LENGTH)
    }
}

pub(crate) fn check_block_length(length: usize) -> Result<(), Error> {
    if length == 0 || length % HASH_LENGTH != 0 {
        return Err(Error::InvalidLength {
            expected: HASH_LENGTH,
            found: length,
        });
    }
    Ok(())
}
