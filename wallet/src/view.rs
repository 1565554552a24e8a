// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Immutable view models of the wallet screens.
//!
//! Every view model is a plain value. A reducer takes the current value and
//! an action and returns the next value, without side effects. The
//! [`Store`] holds the current value of a view model and notifies its
//! subscribers whenever a dispatched action changes it.

mod addresses;
mod balance;
mod history;
mod send;
mod store;

pub use addresses::{AddressAction, AddressBook};
pub use balance::{BalanceAction, BalanceView};
pub use history::{HistoryAction, HistoryView};
pub use send::{FormState, SendAction, SendForm};
pub use store::Store;

/// Format used to display dates
pub const DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
