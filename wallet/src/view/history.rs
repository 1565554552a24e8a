// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use super::DATE_FORMAT;
use crate::stream::{HistoryEvent, HistoryItem};

/// Amount of symbols of the bundle hash shown in a summary
const BUNDLE_PREVIEW: usize = 40;

/// Inputs and events the history view reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// The history stream connected or disconnected
    Connected(bool),
    /// A message arrived on the history stream
    Event(HistoryEvent),
}

/// The transfer history of the account
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HistoryView {
    /// Every entry, keyed by bundle hash
    pub items: BTreeMap<String, HistoryItem>,
    /// Whether the history stream is connected
    pub connected: bool,
}

impl HistoryView {
    /// Returns the view after applying `action`
    pub fn reduce(mut self, action: HistoryAction) -> Self {
        match action {
            HistoryAction::Connected(connected) => self.connected = connected,
            HistoryAction::Event(HistoryEvent::Init(items)) => {
                self.items = items
                    .into_iter()
                    .map(|item| (item.bundle.clone(), item))
                    .collect();
            }
            HistoryAction::Event(HistoryEvent::NewItem(item)) => {
                self.items.insert(item.bundle.clone(), item);
            }
        }
        self
    }

    /// The entries, newest first
    pub fn list(&self) -> Vec<&HistoryItem> {
        let mut list: Vec<_> = self.items.values().collect();
        list.sort_by(|a, b| b.date.cmp(&a.date));
        list
    }

    /// One line summary of an entry
    pub fn summary(item: &HistoryItem) -> String {
        let sign = if item.kind.is_incoming() {
            "+"
        } else if item.amount < 0 {
            "-"
        } else {
            ""
        };
        let bundle = item.bundle.get(..BUNDLE_PREVIEW).unwrap_or(&item.bundle);
        format!(
            "{sign}{} | {bundle}... | {} - {}",
            item.amount.unsigned_abs(),
            item.kind,
            item.date.format(DATE_FORMAT),
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::stream::HistoryItemKind;

    fn item(
        bundle: &str,
        amount: i64,
        kind: HistoryItemKind,
        date: i64,
    ) -> HistoryItem {
        HistoryItem {
            bundle: bundle.to_string(),
            amount,
            kind,
            date: Utc.timestamp_opt(date, 0).unwrap(),
            message: String::new(),
        }
    }

    #[test]
    fn newest_first() {
        let view = HistoryView::default().reduce(HistoryAction::Event(
            HistoryEvent::Init(vec![
                item("A", 1, HistoryItemKind::Received, 10),
                item("B", -1, HistoryItemKind::Sent, 30),
            ]),
        ));
        let view = view.reduce(HistoryAction::Event(HistoryEvent::NewItem(
            item("C", 5, HistoryItemKind::Receiving, 20),
        )));
        let bundles: Vec<_> =
            view.list().into_iter().map(|i| i.bundle.as_str()).collect();
        assert_eq!(bundles, ["B", "C", "A"]);
    }

    #[test]
    fn new_item_replaces_bundle() {
        let view = HistoryView::default()
            .reduce(HistoryAction::Event(HistoryEvent::NewItem(item(
                "A",
                5,
                HistoryItemKind::Receiving,
                10,
            ))))
            .reduce(HistoryAction::Event(HistoryEvent::NewItem(item(
                "A",
                5,
                HistoryItemKind::Received,
                20,
            ))));
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items["A"].kind, HistoryItemKind::Received);
    }

    #[test]
    fn summaries() {
        let bundle = "9".repeat(81);
        let received =
            item(&bundle, 5, HistoryItemKind::Received, 1_554_209_843);
        assert_eq!(
            HistoryView::summary(&received),
            format!(
                "+5 | {}... | received - 02.04.2019 12:57:23",
                &bundle[..40]
            )
        );

        let sent = item("ABC", -7, HistoryItemKind::Sent, 1_554_209_843);
        assert_eq!(
            HistoryView::summary(&sent),
            "-7 | ABC... | sent - 02.04.2019 12:57:23"
        );
    }
}
