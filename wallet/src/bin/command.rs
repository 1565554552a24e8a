// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::fmt;

use chrono::DateTime;
use clap::Subcommand;
use sigma_wallet::currency::{Iota, Unit};
use sigma_wallet::view::DATE_FORMAT;
use sigma_wallet::{
    Address, AddressVerifier, Clock, ConditionalDepositAddress, LinkError,
    MagnetLinkCodec,
};

use crate::settings::Settings;

/// Commands that can be run against the Sigma wallet
#[derive(PartialEq, Eq, Hash, Clone, Subcommand, Debug)]
pub(crate) enum Command {
    /// Encode a conditional deposit address into its magnet link
    Encode {
        /// Deposit address, with or without checksum
        #[arg(short, long)]
        address: Address,

        /// Unix time after which the funds are usable
        #[arg(short, long, conflicts_with = "expires_in")]
        timeout_at: Option<i64>,

        /// Seconds from now after which the funds are usable [default:
        /// configured link lifetime]
        #[arg(long)]
        expires_in: Option<u64>,

        /// Allow the address to be funded more than once
        #[arg(short, long)]
        multi_use: bool,

        /// Amount after whose arrival the funds are usable, e.g. `1.5Mi`
        #[arg(short, long, default_value_t = Iota::MIN)]
        expected_amount: Iota,
    },

    /// Validate a magnet link and show the address it carries
    Validate {
        /// The magnet link
        link: String,
    },

    /// Show an address followed by its checksum
    Checksum {
        /// Address of 81 trytes
        address: Address,
    },

    /// Show current settings
    Settings,
}

impl Command {
    /// Runs the command with the provided codec
    pub fn run<C, V>(
        self,
        settings: &Settings,
        codec: &MagnetLinkCodec<C, V>,
    ) -> anyhow::Result<RunResult>
    where
        C: Clock,
        V: AddressVerifier,
    {
        match self {
            Command::Encode {
                address,
                timeout_at,
                expires_in,
                multi_use,
                expected_amount,
            } => {
                let timeout_at = timeout_at.unwrap_or_else(|| {
                    let lifetime = expires_in.unwrap_or(settings.link_lifetime);
                    codec.clock().now().saturating_add_unsigned(lifetime)
                });
                let cda = ConditionalDepositAddress::new(
                    address,
                    timeout_at,
                    multi_use,
                    *expected_amount,
                );
                let link = codec.encode(&cda)?;
                Ok(RunResult::Link(link))
            }
            Command::Validate { link } => match codec.decode(&link) {
                Ok(cda) => Ok(RunResult::Valid(cda, settings.unit)),
                Err(err) => Ok(RunResult::Rejected(err)),
            },
            Command::Checksum { address } => {
                Ok(RunResult::Checksum(address.with_checksum()?))
            }
            Command::Settings => Ok(RunResult::Settings()),
        }
    }
}

/// Possible results of running a command
#[derive(Debug, PartialEq, Eq)]
pub enum RunResult {
    Link(String),
    Valid(ConditionalDepositAddress, Unit),
    Rejected(LinkError),
    Checksum(String),
    Settings(),
}

impl RunResult {
    /// Whether the command refused its input
    pub fn is_rejection(&self) -> bool {
        matches!(self, RunResult::Rejected(_))
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RunResult::*;
        match self {
            Link(link) => write!(f, "> {link}"),
            Valid(cda, unit) => {
                let timeout = DateTime::from_timestamp(cda.timeout_at, 0)
                    .map(|date| date.format(DATE_FORMAT).to_string())
                    .unwrap_or_else(|| cda.timeout_at.to_string());
                let usage = if cda.multi_use { "multi" } else { "single" };
                let amount = unit.format(Iota::new(cda.expected_amount));
                write!(
                    f,
                    "> Address: {}\n\
                     > Usable after: {timeout}\n\
                     > Usage: {usage}\n\
                     > Expected amount: {amount}",
                    cda.address,
                )
            }
            Rejected(err) => write!(f, "> Invalid link: {err}"),
            Checksum(address) => write!(f, "> {address}"),
            Settings() => Ok(()),
        }
    }
}
