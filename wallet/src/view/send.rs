// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use tracing::debug;

use crate::currency::{Iota, Unit};
use crate::stream::{SendRequest, SendStage};
use crate::{AddressVerifier, Clock, LinkError, MagnetLinkCodec};

/// Verdict on the content of the send form
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// No link was entered yet
    #[default]
    Empty,
    /// The form can be submitted
    Ok,
    /// The link was rejected
    LinkInvalid(LinkError),
    /// The amount is not a positive amount of iotas
    AmountInvalid,
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormState::Empty | FormState::Ok => Ok(()),
            FormState::LinkInvalid(err) => write!(f, "invalid link: {err}"),
            FormState::AmountInvalid => f.write_str("invalid amount"),
        }
    }
}

/// Inputs and events the send form reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendAction {
    /// The send stream connected or disconnected
    Connected(bool),
    /// The amount text changed
    AmountChanged(String),
    /// The unit of the amount changed
    UnitChanged(Unit),
    /// The link text changed
    LinkChanged(String),
    /// The user asked to send
    Submit,
    /// The send stream reported a stage of the transfer
    Stage(SendStage),
}

/// State of the form used to send funds to a magnet link
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SendForm {
    /// Amount, as typed
    pub amount: String,
    /// Unit of the amount
    pub unit: Unit,
    /// Magnet link of the recipient, as typed
    pub link: String,
    /// Verdict on the current inputs
    pub form_state: FormState,
    /// Whether a transfer is in flight
    pub sending: bool,
    /// Last stage reported for the transfer in flight
    pub stage: Option<SendStage>,
    /// Whether the send stream is connected
    pub connected: bool,
}

impl SendForm {
    /// Returns the form after applying `action`.
    ///
    /// The verdict is recomputed from every input whenever one of them
    /// changes, and again on submission since the link may have expired in
    /// the meantime.
    pub fn reduce<C, V>(
        mut self,
        action: SendAction,
        codec: &MagnetLinkCodec<C, V>,
    ) -> Self
    where
        C: Clock,
        V: AddressVerifier,
    {
        match action {
            SendAction::Connected(connected) => {
                self.connected = connected;
                if !connected {
                    self.sending = false;
                }
            }
            SendAction::AmountChanged(amount) => {
                self.amount = amount;
                self.form_state = self.evaluate(codec);
            }
            SendAction::UnitChanged(unit) => {
                self.unit = unit;
                self.form_state = self.evaluate(codec);
            }
            SendAction::LinkChanged(link) => {
                self.link = link;
                self.form_state = self.evaluate(codec);
            }
            SendAction::Submit => {
                self.form_state = self.evaluate(codec);
                if self.can_submit() {
                    self.sending = true;
                    self.stage = None;
                }
            }
            SendAction::Stage(stage) => {
                self.stage = Some(stage);
                if stage.is_final() {
                    self.sending = false;
                }
            }
        }
        self
    }

    /// The amount in iotas, if it is valid
    pub fn amount(&self) -> Option<Iota> {
        let amount = self.amount.trim().parse().ok()?;
        self.unit.to_iota(amount).ok().filter(|iotas| *iotas > Iota::MIN)
    }

    /// Whether the form may be submitted
    pub fn can_submit(&self) -> bool {
        self.connected && !self.sending && self.form_state == FormState::Ok
    }

    /// The request to send once the form was submitted.
    ///
    /// The link is sent trimmed, exactly as it was validated.
    pub fn request(&self) -> Option<SendRequest> {
        if !self.sending || self.form_state != FormState::Ok {
            return None;
        }
        Some(SendRequest {
            amount: self.amount()?,
            link: self.link.trim().to_string(),
        })
    }

    fn evaluate<C, V>(&self, codec: &MagnetLinkCodec<C, V>) -> FormState
    where
        C: Clock,
        V: AddressVerifier,
    {
        if self.link.is_empty() {
            return FormState::Empty;
        }
        if let Err(err) = codec.decode(self.link.trim()) {
            return FormState::LinkInvalid(err);
        }
        if self.amount().is_none() {
            debug!(amount = %self.amount, unit = %self.unit, "Invalid amount");
            return FormState::AmountInvalid;
        }
        FormState::Ok
    }
}
