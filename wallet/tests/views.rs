// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use sigma_wallet::currency::{Iota, Unit};
use sigma_wallet::stream::{
    new_address_request, AddressEvent, BalanceUpdate, HistoryEvent,
    HistoryItemKind, Message, SendStage,
};
use sigma_wallet::view::{
    AddressAction, AddressBook, BalanceAction, BalanceView, FormState,
    HistoryAction, HistoryView, SendAction, SendForm, Store,
};
use sigma_wallet::{
    ConditionalDepositAddress, Error, FixedClock, KerlVerifier, MagnetLinkCodec,
};

const ADDRESS: &str = "XUERGHWTYRTFUYKFKXURKHMFEVLOIFTTCNTXOGLDPCZ9CJLKHROO\
                       PGNAQYFJEPGK9OKUQROUECBAVNXRX";
const NOW: i64 = 1_554_209_843;

fn codec() -> MagnetLinkCodec<FixedClock> {
    MagnetLinkCodec::with(FixedClock(NOW), KerlVerifier)
}

#[test]
fn send_form_store() {
    let codec = codec();
    let link = codec
        .encode(&ConditionalDepositAddress::new(
            ADDRESS.parse().unwrap(),
            NOW + 600,
            false,
            0,
        ))
        .unwrap();

    let store = Store::new(SendForm::default(), move |form, action| {
        SendForm::reduce(form, action, &codec)
    });
    let mut rx = store.subscribe();

    store.dispatch(SendAction::Connected(true));
    store.dispatch(SendAction::UnitChanged(Unit::Gi));
    store.dispatch(SendAction::AmountChanged("2".into()));
    store.dispatch(SendAction::LinkChanged(link.clone()));
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().form_state, FormState::Ok);

    assert!(store.dispatch(SendAction::Submit));
    let request = store.state().request().unwrap();
    assert_eq!(request.amount, 2_000_000_000);
    assert_eq!(request.link, link);

    let msg = request.into_message().unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&msg.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": 0,
            "data": { "amount": 2_000_000_000u64, "link": link },
        })
    );

    for text in [r#"{"type":0}"#, r#"{"type":3}"#, r#"{"type":4}"#] {
        let stage = SendStage::try_from(Message::parse(text).unwrap()).unwrap();
        store.dispatch(SendAction::Stage(stage));
    }
    let form = store.state();
    assert_eq!(form.stage, Some(SendStage::SentOff));
    assert!(!form.sending);
}

#[test]
fn address_book_store() {
    let store = Store::new(AddressBook::default(), AddressBook::reduce);

    store.dispatch(AddressAction::Connected(true));
    store.dispatch(AddressAction::ExpectedAmountChanged("10".into()));
    store.dispatch(AddressAction::Generate);
    let expected_amount = store.state().request().unwrap();
    let request = new_address_request(expected_amount).unwrap();
    assert_eq!(request.to_json().unwrap(), r#"{"type":0,"data":10}"#);

    let init = format!(
        r#"{{"type":0,"data":[{{"address":"{ADDRESS}","timeout_at":"2019-04-02T12:57:23Z","multi_use":false,"expected_amount":0}}]}}"#
    );
    let event = AddressEvent::try_from(Message::parse(&init).unwrap()).unwrap();
    store.dispatch(AddressAction::Event(event));
    assert_eq!(store.state().addresses.len(), 1);
    assert!(store.state().generating);

    let add = format!(
        r#"{{"type":1,"data":{{"address":{{"address":"{ADDRESS}","timeout_at":"2019-04-03T12:57:23Z","multi_use":true,"expected_amount":10}},"link":""}}}}"#
    );
    let event = AddressEvent::try_from(Message::parse(&add).unwrap()).unwrap();
    store.dispatch(AddressAction::Event(event));

    let book = store.state();
    assert!(!book.generating);
    assert_eq!(book.addresses.len(), 1);
    let desc = book.list()[0];
    assert_eq!(desc.expected_amount, 10);
    assert_eq!(
        AddressBook::describe(desc),
        "usable for funding after receiving 10 iotas or 03.04.2019 12:57:23"
    );

    let link = book.generated_link.as_deref().unwrap();
    let decoded = codec().decode(link).unwrap();
    assert_eq!(decoded, ConditionalDepositAddress::from(desc.clone()));
}

#[test]
fn balance_store() {
    let store = Store::new(BalanceView::default(), BalanceView::reduce);
    let msg = Message::parse(
        r#"{"type":0,"data":{"available":1000000,"total":3000000}}"#,
    )
    .unwrap();
    let update = BalanceUpdate::try_from(msg).unwrap();

    assert!(store.dispatch(BalanceAction::Update(update)));
    assert!(!store.dispatch(BalanceAction::Update(update)));
    store.dispatch(BalanceAction::UnitChanged(Unit::Mi));

    let view = store.state();
    assert_eq!(view.pending(), Iota::new(2_000_000));
    assert_eq!(view.display_total(), "3 Mi");
}

#[test]
fn history_store() {
    let store = Store::new(HistoryView::default(), HistoryView::reduce);
    let init = r#"{"type":0,"data":{"items":{
        "AAA":{"amount":5,"type":1,"date":"2019-04-02T12:57:23Z"},
        "BBB":{"amount":-3,"type":3,"date":"2019-04-03T12:57:23Z"}
    }}}"#;
    let event = HistoryEvent::try_from(Message::parse(init).unwrap()).unwrap();
    store.dispatch(HistoryAction::Event(event));

    let new_item = r#"{"type":1,"data":{"bundle":"CCC","item":
        {"amount":0,"type":4,"date":"2019-04-04T12:57:23Z","message":"hi"}}}"#;
    let event =
        HistoryEvent::try_from(Message::parse(new_item).unwrap()).unwrap();
    store.dispatch(HistoryAction::Event(event));

    let view = store.state();
    let list = view.list();
    let bundles: Vec<_> = list.iter().map(|item| item.bundle.as_str()).collect();
    assert_eq!(bundles, ["CCC", "BBB", "AAA"]);
    assert_eq!(list[0].kind, HistoryItemKind::Message);
    assert_eq!(list[0].message, "hi");
    assert_eq!(
        HistoryView::summary(list[1]),
        "-3 | BBB... | sent - 03.04.2019 12:57:23"
    );
}

#[test]
fn unknown_messages() {
    let msg = Message::parse(r#"{"type":9,"data":null}"#).unwrap();
    assert!(matches!(
        HistoryEvent::try_from(msg),
        Err(Error::UnknownMessage(9))
    ));

    let msg = Message::parse(r#"{"type":0,"data":{"available":"x"}}"#).unwrap();
    assert!(matches!(BalanceUpdate::try_from(msg), Err(Error::Json(_))));
}
