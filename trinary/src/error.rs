// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error-type for sigma-trinary.

use core::fmt;

/// The sigma-trinary error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A character outside of the tryte alphabet was found
    InvalidTryte(char),
    /// A value outside of `{-1, 0, 1}` was used as a trit
    InvalidTrit(i8),
    /// The input does not have the length the operation requires
    InvalidLength {
        /// The length, or the multiple of it, that was expected
        expected: usize,
        /// The length that was found
        found: usize,
    },
    /// The value does not fit the requested amount of trits
    Overflow {
        /// The width that was exceeded
        width: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTryte(c) => write!(f, "invalid tryte {c:?}"),
            Error::InvalidTrit(t) => write!(f, "invalid trit {t}"),
            Error::InvalidLength { expected, found } => {
                write!(f, "invalid length {found}, expected {expected}")
            }
            Error::Overflow { width } => {
                write!(f, "value does not fit into {width} trits")
            }
        }
    }
}

impl core::error::Error for Error {}
