#![no_main]
use libfuzzer_sys::fuzz_target;
use zcash_payment_uri::{FormattingOptions, Network, ParserResult};

fuzz_target!(|data: &str| {
    for network in [Network::Mainnet, Network::Testnet, Network::Regtest] {
        let Ok(ParserResult::Request(req)) = zcash_payment_uri::parse(data, network) else {
            continue;
        };

        let uri = req.to_uri(FormattingOptions::EnumerateAllPayments);
        assert_eq!(
            zcash_payment_uri::parse(&uri, network),
            Ok(ParserResult::Request(req))
        );
    }
});
