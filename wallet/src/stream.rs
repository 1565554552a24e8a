// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Messages exchanged over the account streams.
//!
//! Every stream carries JSON envelopes of the form
//! `{"type": <u8>, "data": <payload>}`, where the meaning of the type tag
//! depends on the stream the envelope travels on.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::currency::Iota;
use crate::{Address, ConditionalDepositAddress, Error};

/// Endpoint of the stream reporting the progress of outgoing transfers
pub const SEND_STREAM: &str = "/stream/send";
/// Endpoint of the stream carrying the deposit addresses of the account
pub const ADDRESS_STREAM: &str = "/stream/address";
/// Endpoint of the stream carrying balance updates
pub const BALANCE_STREAM: &str = "/stream/balance";
/// Endpoint of the stream carrying the transfer history
pub const HISTORY_STREAM: &str = "/stream/history";

/// Derives the URL of a stream from the HTTP base URL of the service.
///
/// # Errors
/// If the endpoint cannot be joined or the base URL is neither `http` nor
/// `https`.
pub fn stream_url(base: &Url, endpoint: &str) -> Result<Url, Error> {
    let mut url = base.join(endpoint)?;
    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => return Err(Error::UnsupportedScheme(other.to_string())),
    };
    url.set_scheme(scheme)
        .map_err(|_| Error::UnsupportedScheme(scheme.to_string()))?;
    Ok(url)
}

/// The envelope of every stream message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Type tag, interpreted per stream
    #[serde(rename = "type")]
    pub kind: u8,
    /// Payload
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Message {
    /// Creates a message with the given payload
    ///
    /// # Errors
    /// If the payload cannot be serialized.
    pub fn new<T: Serialize>(kind: u8, data: &T) -> Result<Self, Error> {
        Ok(Self {
            kind,
            data: serde_json::to_value(data)?,
        })
    }

    /// Parses a message from its JSON text
    ///
    /// # Errors
    /// If the text is not a valid envelope.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    /// The JSON text of the message
    ///
    /// # Errors
    /// If the message cannot be serialized.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    fn payload<T: DeserializeOwned>(self) -> Result<T, Error> {
        Ok(serde_json::from_value(self.data)?)
    }

    fn unknown(&self, stream: &str) -> Error {
        warn!(kind = self.kind, stream, "Unknown message type");
        Error::UnknownMessage(self.kind)
    }
}

/// Stages an outgoing transfer goes through, reported on [`SEND_STREAM`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SendStage {
    /// Inputs funding the transfer are selected
    SelectingInputs,
    /// The bundle is prepared
    PreparingTransfers,
    /// Tips to approve are requested
    GettingTransactionsToApprove,
    /// Proof of work is done
    AttachingToTangle,
    /// The transfer was broadcast
    SentOff,
    /// The transfer failed
    Error,
}

impl SendStage {
    /// Human readable description of the stage
    pub fn description(&self) -> &'static str {
        match self {
            SendStage::SelectingInputs => "selecting inputs",
            SendStage::PreparingTransfers => "preparing transfers",
            SendStage::GettingTransactionsToApprove => "getting tips",
            SendStage::AttachingToTangle => "doing PoW",
            SendStage::SentOff => "sent off",
            SendStage::Error => "error",
        }
    }

    /// Whether the transfer is over, successfully or not
    pub fn is_final(&self) -> bool {
        matches!(self, SendStage::SentOff | SendStage::Error)
    }
}

impl TryFrom<Message> for SendStage {
    type Error = Error;

    fn try_from(msg: Message) -> Result<Self, Error> {
        Ok(match msg.kind {
            0 => SendStage::SelectingInputs,
            1 => SendStage::PreparingTransfers,
            2 => SendStage::GettingTransactionsToApprove,
            3 => SendStage::AttachingToTangle,
            4 => SendStage::SentOff,
            5 => SendStage::Error,
            _ => return Err(msg.unknown(SEND_STREAM)),
        })
    }
}

/// A deposit address as described by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositDescriptor {
    /// The deposit address
    pub address: Address,
    /// Point in time after which the funds are usable
    pub timeout_at: DateTime<Utc>,
    /// Whether the address may be funded more than once
    #[serde(default)]
    pub multi_use: bool,
    /// Amount after whose arrival the funds are usable
    #[serde(default)]
    pub expected_amount: Iota,
}

impl From<DepositDescriptor> for ConditionalDepositAddress {
    fn from(desc: DepositDescriptor) -> Self {
        ConditionalDepositAddress::new(
            desc.address,
            desc.timeout_at.timestamp(),
            desc.multi_use,
            *desc.expected_amount,
        )
    }
}

/// Messages received on [`ADDRESS_STREAM`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressEvent {
    /// Every deposit address currently allocated
    Init(Vec<DepositDescriptor>),
    /// A newly allocated address together with its magnet link
    Add {
        /// The new address
        address: DepositDescriptor,
        /// Its magnet link, as encoded by the service
        link: String,
    },
}

#[derive(Deserialize)]
struct AddressAdd {
    address: DepositDescriptor,
    link: String,
}

impl TryFrom<Message> for AddressEvent {
    type Error = Error;

    fn try_from(msg: Message) -> Result<Self, Error> {
        match msg.kind {
            0 => Ok(AddressEvent::Init(
                msg.payload::<Option<Vec<_>>>()?.unwrap_or_default(),
            )),
            1 => {
                let AddressAdd { address, link } = msg.payload()?;
                Ok(AddressEvent::Add { address, link })
            }
            _ => Err(msg.unknown(ADDRESS_STREAM)),
        }
    }
}

/// Balance of the account, received on [`BALANCE_STREAM`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BalanceUpdate {
    /// Balance usable for transfers
    pub available: Iota,
    /// Balance including deposits whose conditions are not fulfilled yet
    pub total: Iota,
}

impl TryFrom<Message> for BalanceUpdate {
    type Error = Error;

    fn try_from(msg: Message) -> Result<Self, Error> {
        match msg.kind {
            0 => msg.payload(),
            _ => Err(msg.unknown(BALANCE_STREAM)),
        }
    }
}

/// Kind of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HistoryItemKind {
    /// A deposit is pending
    Receiving,
    /// A deposit is confirmed
    Received,
    /// A transfer is pending
    Sending,
    /// A transfer is confirmed
    Sent,
    /// A message without value
    Message,
}

impl HistoryItemKind {
    /// Whether the entry moves funds into the account
    pub fn is_incoming(&self) -> bool {
        matches!(self, HistoryItemKind::Receiving | HistoryItemKind::Received)
    }
}

impl fmt::Display for HistoryItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HistoryItemKind::Receiving => "receiving",
            HistoryItemKind::Received => "received",
            HistoryItemKind::Sending => "sending",
            HistoryItemKind::Sent => "sent",
            HistoryItemKind::Message => "message",
        })
    }
}

impl TryFrom<u8> for HistoryItemKind {
    type Error = Error;

    fn try_from(kind: u8) -> Result<Self, Error> {
        Ok(match kind {
            0 => HistoryItemKind::Receiving,
            1 => HistoryItemKind::Received,
            2 => HistoryItemKind::Sending,
            3 => HistoryItemKind::Sent,
            4 => HistoryItemKind::Message,
            _ => return Err(Error::UnknownMessage(kind)),
        })
    }
}

impl From<HistoryItemKind> for u8 {
    fn from(kind: HistoryItemKind) -> u8 {
        kind as u8
    }
}

/// A history entry as it travels on the wire, without its bundle hash
#[derive(Debug, Clone, Deserialize)]
struct RawHistoryItem {
    #[serde(default)]
    amount: i64,
    #[serde(rename = "type")]
    kind: HistoryItemKind,
    date: DateTime<Utc>,
    #[serde(default)]
    message: String,
}

impl RawHistoryItem {
    fn with_bundle(self, bundle: String) -> HistoryItem {
        HistoryItem {
            bundle,
            amount: self.amount,
            kind: self.kind,
            date: self.date,
            message: self.message,
        }
    }
}

/// An entry of the transfer history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// Hash of the bundle the entry refers to
    pub bundle: String,
    /// Moved amount, negative for outgoing transfers
    pub amount: i64,
    /// Kind of the entry
    pub kind: HistoryItemKind,
    /// Point in time of the entry
    pub date: DateTime<Utc>,
    /// Attached message, if any
    pub message: String,
}

/// Messages received on [`HISTORY_STREAM`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// The whole history
    Init(Vec<HistoryItem>),
    /// A new or updated entry
    NewItem(HistoryItem),
}

#[derive(Deserialize)]
struct HistoryInit {
    #[serde(default)]
    items: BTreeMap<String, RawHistoryItem>,
}

#[derive(Deserialize)]
struct HistoryNewItem {
    bundle: String,
    item: RawHistoryItem,
}

impl TryFrom<Message> for HistoryEvent {
    type Error = Error;

    fn try_from(msg: Message) -> Result<Self, Error> {
        match msg.kind {
            0 => {
                let HistoryInit { items } = msg.payload()?;
                let items = items
                    .into_iter()
                    .map(|(bundle, item)| item.with_bundle(bundle))
                    .collect();
                Ok(HistoryEvent::Init(items))
            }
            1 => {
                let HistoryNewItem { bundle, item } = msg.payload()?;
                Ok(HistoryEvent::NewItem(item.with_bundle(bundle)))
            }
            _ => Err(msg.unknown(HISTORY_STREAM)),
        }
    }
}

/// Request to send funds to the address of a magnet link, sent on
/// [`SEND_STREAM`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    /// Amount to send
    pub amount: Iota,
    /// Magnet link of the recipient
    pub link: String,
}

impl SendRequest {
    /// Wraps the request into its envelope
    ///
    /// # Errors
    /// If the request cannot be serialized.
    pub fn into_message(self) -> Result<Message, Error> {
        Message::new(0, &self)
    }
}

/// Request for a new deposit address expecting the given amount, sent on
/// [`ADDRESS_STREAM`]
///
/// # Errors
/// If the request cannot be serialized.
pub fn new_address_request(expected_amount: Iota) -> Result<Message, Error> {
    Message::new(0, &expected_amount)
}
