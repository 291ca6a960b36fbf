#![allow(dead_code)]

use std::sync::Once;
use tracing_subscriber::EnvFilter;
use zcash_payment_uri::{Network, RecipientAddress};

pub const TESTNET_SAPLING: &str =
    "ztestsapling10yy2ex5dcqkclhc7z7yrnjq2z6feyjad56ptwlfgmy77dmaqqrl9gyhprdx59qgmsnyfska2kez";
pub const TESTNET_P2PKH: &str = "tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU";
pub const TESTNET_P2SH: &str = "t26YoyZ1iPgiMEWL4zGUm74eVWfhyDMXzY2";
pub const TESTNET_TEX: &str = "textest1qyqszqgpqyqszqgpqyqszqgpqyqszqgpfcjgfy";
pub const TESTNET_SPROUT: &str = "ztJ1EWLKcGwF2S4NA17pAJVdco8Sdkz4AQPxt1cLTEfNuyNswJJc2BbBqYrsRZsp31xbVZwhF7c7a2L9jsF3p3ZwRWpqqyS";

pub const MAINNET_UNIFIED: &str = "u1fl5mprj0t9p4jg92hjjy8q5myvwc60c9wv0xachauqpn3c3k4xwzlaueafq27dcg7tzzzaz5jl8tyj93wgs983y0jq0qfhzu6n4r8rakpv5f4gg2lrw4z6pyqqcrcqx04d38yunc6je";
pub const MAINNET_TEX: &str = "tex1s2rt77ggv6q989lr49rkgzmh5slsksa9khdgte";
pub const MAINNET_P2PKH: &str = "t1Hsc1LR8yKnbbe3twRp88p6vFfC5t7DLbs";
pub const MAINNET_P2SH: &str = "t3JZcvsuaXE6ygokL4XUiZSTrQBUoPYFnXJ";
pub const MAINNET_SPROUT: &str = "zc8E5gYid86n4bo2Usdq1cpr7PpfoJGzttwBHEEgGhGkLUg7SPPVFNB2AkRFXZ7usfphup5426dt1buMmY3fkYeRrQGLa8y";

/// Installs a test subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn testnet(addr: &str) -> RecipientAddress {
    RecipientAddress::new(addr, Network::Testnet).unwrap()
}

pub fn mainnet(addr: &str) -> RecipientAddress {
    RecipientAddress::new(addr, Network::Mainnet).unwrap()
}
