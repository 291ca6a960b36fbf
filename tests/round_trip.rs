mod common;

use common::*;
use proptest::prelude::*;
use zcash_payment_uri::{
    parse, Amount, FormattingOptions, MemoBytes, Network, OtherParam, ParamNameString,
    ParserResult, Payment, PaymentRequest, QcharString,
};

const ALL_OPTIONS: [FormattingOptions; 3] = [
    FormattingOptions::EnumerateAllPayments,
    FormattingOptions::UseEmptyParamIndex {
        omit_address_label: false,
    },
    FormattingOptions::UseEmptyParamIndex {
        omit_address_label: true,
    },
];

#[test]
fn example_round_trips() {
    init_tracing();
    let bare = FormattingOptions::UseEmptyParamIndex {
        omit_address_label: true,
    };
    let unindexed = FormattingOptions::UseEmptyParamIndex {
        omit_address_label: false,
    };
    for (uri, options) in [
        (
            format!("zcash:{TESTNET_P2PKH}?amount=123.45&label=apple+banana"),
            bare,
        ),
        (
            format!(
                "zcash:?address={TESTNET_P2PKH}&amount=123.456\
                 &address.1={TESTNET_SAPLING}&amount.1=0.789\
                 &memo.1=VGhpcyBpcyBhIHVuaWNvZGUgbWVtbyDinKjwn6aE8J-PhvCfjok"
            ),
            unindexed,
        ),
        (
            format!("zcash:?address.1={TESTNET_TEX}&label.1=Caf%C3%A9&foo.1&bar.1=1"),
            FormattingOptions::EnumerateAllPayments,
        ),
    ] {
        let req = PaymentRequest::from_uri(&uri, Network::Testnet).unwrap();
        assert_eq!(req.to_uri(options), uri);
    }
}

#[test]
fn bare_address_reparses_as_legacy() {
    let req = PaymentRequest::new(vec![Payment::from_address(testnet(TESTNET_SAPLING))]).unwrap();
    let uri = req.to_uri(FormattingOptions::UseEmptyParamIndex {
        omit_address_label: true,
    });
    assert_eq!(
        parse(&uri, Network::Testnet),
        Ok(ParserResult::Legacy(testnet(TESTNET_SAPLING)))
    );
}

fn text() -> impl Strategy<Value = QcharString> {
    "\\PC{1,16}".prop_map(|s| QcharString::new(&s).unwrap())
}

fn key() -> impl Strategy<Value = ParamNameString> {
    "[a-zA-Z][a-zA-Z0-9+-]{0,8}"
        .prop_filter("reserved key", |k| {
            !["address", "amount", "label", "memo", "message"].contains(&k.as_str())
                && !k.starts_with("req-")
        })
        .prop_map(|k| ParamNameString::new(&k).unwrap())
}

fn payment() -> impl Strategy<Value = Payment> {
    (
        prop::sample::select(vec![TESTNET_SAPLING, TESTNET_P2PKH, TESTNET_P2SH, TESTNET_TEX]),
        prop::option::of(0..=2_100_000_000_000_000u64),
        prop::option::of(prop::collection::vec(any::<u8>(), 1..=512)),
        prop::option::of(text()),
        prop::option::of(text()),
        prop::collection::btree_map(key(), prop::option::of(text()), 0..3),
    )
        .prop_map(|(addr, zatoshis, memo, label, message, others)| {
            let address = testnet(addr);
            let memo = memo
                .filter(|_| address.can_receive_memos())
                .map(|bytes| MemoBytes::new(bytes).unwrap());
            let others = others
                .into_iter()
                .map(|(k, v)| OtherParam::new(k, v).unwrap())
                .collect();
            Payment::new(
                address,
                zatoshis.map(|z| Amount::from_zatoshis(z).unwrap()),
                memo,
                label,
                message,
                others,
            )
            .unwrap()
        })
}

proptest! {
    #[test]
    fn render_then_parse(payments in prop::collection::vec(payment(), 1..6)) {
        let req = PaymentRequest::new(payments).unwrap();

        let uri = req.to_uri(FormattingOptions::EnumerateAllPayments);
        prop_assert_eq!(parse(&uri, Network::Testnet), Ok(ParserResult::Request(req.clone())));

        for options in ALL_OPTIONS {
            let uri = req.to_uri(options);
            prop_assert_eq!(PaymentRequest::from_uri(&uri, Network::Testnet), Ok(req.clone()));
        }
    }
}
