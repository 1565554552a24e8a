// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use tracing::debug;

use super::DATE_FORMAT;
use crate::currency::Iota;
use crate::stream::{AddressEvent, DepositDescriptor};
use crate::{Address, ConditionalDepositAddress};

/// Inputs and events the address book reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressAction {
    /// The address stream connected or disconnected
    Connected(bool),
    /// The amount text of the next address changed
    ExpectedAmountChanged(String),
    /// The user asked for a new address
    Generate,
    /// A message arrived on the address stream
    Event(AddressEvent),
}

/// The deposit addresses of the account
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressBook {
    /// Every known address
    pub addresses: BTreeMap<Address, DepositDescriptor>,
    /// Whether the address stream is connected
    pub connected: bool,
    /// Whether a new address was requested and not received yet
    pub generating: bool,
    /// The last address received after a request
    pub generated: Option<DepositDescriptor>,
    /// The magnet link of [`generated`](Self::generated)
    pub generated_link: Option<String>,
    /// Expected amount of the next requested address
    pub expected_amount: Iota,
}

impl AddressBook {
    /// Returns the address book after applying `action`
    pub fn reduce(mut self, action: AddressAction) -> Self {
        match action {
            AddressAction::Connected(connected) => {
                self.connected = connected;
                if !connected {
                    self.generating = false;
                }
            }
            AddressAction::ExpectedAmountChanged(amount) => {
                let amount = amount.trim();
                if amount.is_empty() {
                    self.expected_amount = Iota::MIN;
                } else {
                    match amount.parse() {
                        Ok(amount) => self.expected_amount = amount,
                        Err(err) => debug!(%err, amount, "Ignoring amount"),
                    }
                }
            }
            AddressAction::Generate => {
                if self.connected {
                    self.generating = true;
                }
            }
            AddressAction::Event(AddressEvent::Init(addresses)) => {
                self.addresses = addresses
                    .into_iter()
                    .map(|desc| (desc.address.clone(), desc))
                    .collect();
            }
            AddressAction::Event(AddressEvent::Add { address, link }) => {
                let link = if link.is_empty() {
                    ConditionalDepositAddress::from(address.clone())
                        .magnet_link()
                        .ok()
                } else {
                    Some(link)
                };
                self.addresses
                    .insert(address.address.clone(), address.clone());
                self.generated = Some(address);
                self.generated_link = link;
                self.generating = false;
            }
        }
        self
    }

    /// Amount to request a new address with, while one is being generated
    pub fn request(&self) -> Option<Iota> {
        self.generating.then_some(self.expected_amount)
    }

    /// The addresses, latest timeout first
    pub fn list(&self) -> Vec<&DepositDescriptor> {
        let mut list: Vec<_> = self.addresses.values().collect();
        list.sort_by(|a, b| b.timeout_at.cmp(&a.timeout_at));
        list
    }

    /// Describes when the funds received by an address become usable
    pub fn describe(desc: &DepositDescriptor) -> String {
        let timeout = desc.timeout_at.format(DATE_FORMAT);
        if desc.expected_amount > Iota::MIN {
            format!(
                "usable for funding after receiving {} iotas or {timeout}",
                desc.expected_amount
            )
        } else {
            format!("usable for funding after {timeout}")
        }
    }
}
