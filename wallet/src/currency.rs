// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Module to help with currency conversions.

use core::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The base unit of the currency
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Iota(u64);

impl Iota {
    /// The smallest value that can be represented
    pub const MIN: Iota = Iota(0);
    /// The largest value that can be represented
    pub const MAX: Iota = Iota(u64::MAX);

    /// Returns a new amount of iotas
    pub const fn new(iotas: u64) -> Iota {
        Self(iotas)
    }

    /// Adds two amounts, returning `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtracts two amounts, returning `None` on underflow
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

/// Addition
impl Add for Iota {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

/// Subtraction
impl Sub for Iota {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

/// Comparison
impl Ord for Iota {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Iota {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<u64> for Iota {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl From<u64> for Iota {
    fn from(iotas: u64) -> Self {
        Self(iotas)
    }
}

/// Iota derefs into its underlying amount
impl Deref for Iota {
    type Target = u64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Iota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Denominations the user can enter amounts in
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Unit {
    /// Iotas
    #[default]
    #[serde(rename = "i")]
    I,
    /// Megaiotas, one million iotas
    #[serde(rename = "Mi")]
    Mi,
    /// Gigaiotas, one billion iotas
    #[serde(rename = "Gi")]
    Gi,
    /// Teraiotas, one trillion iotas
    #[serde(rename = "Ti")]
    Ti,
}

impl Unit {
    /// Every unit, from the smallest to the largest
    pub const ALL: [Unit; 4] = [Unit::I, Unit::Mi, Unit::Gi, Unit::Ti];

    /// The amount of iotas in one of this unit
    pub const fn multiplier(&self) -> u64 {
        match self {
            Unit::I => 1,
            Unit::Mi => 1_000_000,
            Unit::Gi => 1_000_000_000,
            Unit::Ti => 1_000_000_000_000,
        }
    }

    /// The long name of the unit
    pub const fn name(&self) -> &'static str {
        match self {
            Unit::I => "Iotas",
            Unit::Mi => "Megaiotas (1 million iotas)",
            Unit::Gi => "Gigaiotas (1 billion iotas)",
            Unit::Ti => "Teraiotas (1 trillion iotas)",
        }
    }

    /// The symbol of the unit
    pub const fn symbol(&self) -> &'static str {
        match self {
            Unit::I => "i",
            Unit::Mi => "Mi",
            Unit::Gi => "Gi",
            Unit::Ti => "Ti",
        }
    }

    /// Formats an amount of iotas in this unit, e.g. `1.5 Mi`
    pub fn format(&self, amount: Iota) -> String {
        let value = amount.0 as f64 / self.multiplier() as f64;
        format!("{value} {}", self.symbol())
    }

    /// Converts an amount given in this unit into iotas.
    ///
    /// # Errors
    /// If the amount is negative, not finite, has fractions of an iota or
    /// exceeds [`Iota::MAX`].
    pub fn to_iota(&self, amount: f64) -> Result<Iota, Error> {
        let iotas = amount * self.multiplier() as f64;
        if !iotas.is_finite()
            || iotas < 0.0
            || iotas.fract() != 0.0
            || iotas >= u64::MAX as f64
        {
            return Err(Error::InvalidAmount);
        }
        Ok(Iota(iotas as u64))
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::ALL
            .into_iter()
            .find(|unit| unit.symbol() == s)
            .ok_or_else(|| Error::UnknownUnit(s.to_string()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parses amounts such as `12`, `1.5Mi` or `3 Gi`
impl FromStr for Iota {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (amount, unit) = s.split_at(split);

        let unit = match unit {
            "" => Unit::I,
            unit => unit.parse()?,
        };
        let amount: f64 =
            amount.trim().parse().map_err(|_| Error::InvalidAmount)?;

        unit.to_iota(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basics() {
        assert_eq!(Iota::MIN, 0);
        assert_eq!(Iota::from(5) + Iota::new(6), 11);
        assert_eq!(Iota::from(6) - Iota::new(5), 1);
        assert!(Iota::new(1) < Iota::new(2));
        assert_eq!(Iota::MAX.checked_add(Iota::new(1)), None);
        assert_eq!(Iota::MIN.checked_sub(Iota::new(1)), None);
        assert_eq!(*Iota::new(42), 42);
        assert_eq!(Iota::new(42).to_string(), "42");
    }

    #[test]
    fn units() {
        assert_eq!(Unit::Mi.to_iota(1.5).unwrap(), 1_500_000);
        assert_eq!(Unit::Ti.to_iota(2.0).unwrap(), 2_000_000_000_000);
        assert_eq!(Unit::I.to_iota(0.0).unwrap(), 0);
        assert!(Unit::I.to_iota(0.5).is_err());
        assert!(Unit::I.to_iota(-1.0).is_err());
        assert!(Unit::I.to_iota(f64::NAN).is_err());
        assert!(Unit::Ti.to_iota(1e10).is_err());

        assert_eq!(Unit::Mi.format(Iota::new(1_500_000)), "1.5 Mi");
        assert_eq!(Unit::I.format(Iota::new(42)), "42 i");

        for unit in Unit::ALL {
            assert_eq!(unit.symbol().parse::<Unit>().unwrap(), unit);
        }
        assert!(matches!("Ki".parse::<Unit>(), Err(Error::UnknownUnit(_))));
    }

    #[test]
    fn parse_amounts() {
        assert_eq!("12".parse::<Iota>().unwrap(), 12);
        assert_eq!("1.5Mi".parse::<Iota>().unwrap(), 1_500_000);
        assert_eq!(" 3 Gi ".parse::<Iota>().unwrap(), 3_000_000_000);
        assert!("".parse::<Iota>().is_err());
        assert!("Mi".parse::<Iota>().is_err());
        assert!("-3i".parse::<Iota>().is_err());
        assert!("3Xi".parse::<Iota>().is_err());
    }

    #[test]
    fn serde() {
        assert_eq!(serde_json::to_string(&Iota::new(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Unit::Mi).unwrap(), "\"Mi\"");
        let unit: Unit = serde_json::from_str("\"i\"").unwrap();
        assert_eq!(unit, Unit::I);
    }
}
