// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::currency::{Iota, Unit};
use crate::stream::BalanceUpdate;

/// Inputs and events the balance view reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAction {
    /// The balance stream connected or disconnected
    Connected(bool),
    /// A balance arrived on the balance stream
    Update(BalanceUpdate),
    /// The display unit changed
    UnitChanged(Unit),
}

/// Balance of the account
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BalanceView {
    /// Balance usable for transfers
    pub available: Iota,
    /// Balance including deposits whose conditions are not fulfilled yet
    pub total: Iota,
    /// Unit the balance is displayed in
    pub unit: Unit,
    /// Whether the balance stream is connected
    pub connected: bool,
}

impl BalanceView {
    /// Returns the view after applying `action`
    pub fn reduce(mut self, action: BalanceAction) -> Self {
        match action {
            BalanceAction::Connected(connected) => self.connected = connected,
            BalanceAction::Update(BalanceUpdate { available, total }) => {
                self.available = available;
                self.total = total;
            }
            BalanceAction::UnitChanged(unit) => self.unit = unit,
        }
        self
    }

    /// Balance not usable yet
    pub fn pending(&self) -> Iota {
        self.total.checked_sub(self.available).unwrap_or(Iota::MIN)
    }

    /// The available balance in the display unit
    pub fn display_available(&self) -> String {
        self.unit.format(self.available)
    }

    /// The total balance in the display unit
    pub fn display_total(&self) -> String {
        self.unit.format(self.total)
    }
}
