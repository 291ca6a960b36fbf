mod common;

use common::*;
use zcash_payment_uri::{AddressKind, Error, Network, RecipientAddress};

#[test]
fn classify_mainnet() {
    let net = Network::Mainnet;
    assert_eq!(net.address_kind(MAINNET_UNIFIED), Some(AddressKind::Unified));
    assert_eq!(net.address_kind(MAINNET_TEX), Some(AddressKind::Tex));
    assert_eq!(net.address_kind(MAINNET_P2PKH), Some(AddressKind::P2pkh));
    assert_eq!(net.address_kind(MAINNET_P2SH), Some(AddressKind::P2sh));
    assert_eq!(net.address_kind(MAINNET_SPROUT), Some(AddressKind::Sprout));
    assert_eq!(net.address_kind(TESTNET_P2PKH), None);
    assert_eq!(net.address_kind(TESTNET_TEX), None);
    assert_eq!(net.address_kind("utest1qqqqqqqqqq"), None);
    assert_eq!(net.address_kind("zsapling1qqq"), None);

    assert!(net.is_transparent(MAINNET_TEX));
    assert!(net.is_shielded(MAINNET_UNIFIED));
    assert!(net.is_sprout(MAINNET_SPROUT));
    assert!(!net.is_valid(MAINNET_SPROUT));
    assert!(net.is_valid(MAINNET_P2SH));
}

#[test]
fn classify_testnet() {
    let net = Network::Testnet;
    assert_eq!(net.address_kind(TESTNET_SAPLING), Some(AddressKind::Sapling));
    assert_eq!(net.address_kind(TESTNET_P2PKH), Some(AddressKind::P2pkh));
    assert_eq!(net.address_kind(TESTNET_P2SH), Some(AddressKind::P2sh));
    assert_eq!(net.address_kind(TESTNET_TEX), Some(AddressKind::Tex));
    assert_eq!(net.address_kind(TESTNET_SPROUT), Some(AddressKind::Sprout));
    assert_eq!(net.address_kind(MAINNET_UNIFIED), None);

    assert!(!net.is_sprout(TESTNET_SAPLING));
    assert!(net.is_valid(TESTNET_SAPLING));
}

#[test]
fn non_alphanumeric_is_never_classified() {
    for addr in [
        "tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpUʔamount 1ꓸ234",
        "tm-EZhbWHTpdKMw5it8YDspUXSMGQyFwovpU",
        "",
    ] {
        assert_eq!(Network::Testnet.address_kind(addr), None, "{addr:?}");
        assert!(!Network::Testnet.is_valid(addr));
    }
}

#[test]
fn recipient_construction() {
    let addr = RecipientAddress::new(TESTNET_SAPLING, Network::Testnet).unwrap();
    assert_eq!(addr.as_str(), TESTNET_SAPLING);
    assert_eq!(addr.network(), Network::Testnet);
    assert!(addr.can_receive_memos());
    assert!(!addr.is_transparent());

    let addr = RecipientAddress::new(TESTNET_TEX, Network::Testnet).unwrap();
    assert!(addr.is_transparent());
    assert!(!addr.can_receive_memos());

    let addr = RecipientAddress::new(MAINNET_UNIFIED, Network::Mainnet).unwrap();
    assert!(addr.can_receive_memos());
    assert_eq!(addr.to_string(), MAINNET_UNIFIED);
}

#[test]
fn recipient_errors() {
    assert_eq!(
        RecipientAddress::new(MAINNET_SPROUT, Network::Mainnet),
        Err(Error::SproutRecipientsNotAllowed(None))
    );
    assert_eq!(
        RecipientAddress::new(TESTNET_SPROUT, Network::Testnet),
        Err(Error::SproutRecipientsNotAllowed(None))
    );
    assert_eq!(
        RecipientAddress::new(TESTNET_SAPLING, Network::Mainnet),
        Err(Error::InvalidAddress(None))
    );
    // Right prefix, but `1` is outside the bech32 alphabet after the separator.
    assert_eq!(
        RecipientAddress::new(
            "ztestsapling10yy211111qkclhc7z7yrnjq2z6feyjad56ptwlfgmy77dmaqqrl9gyhprdx59qgmsnyfska2kez",
            Network::Testnet
        ),
        Err(Error::InvalidAddress(None))
    );
    assert_eq!(
        RecipientAddress::new("tm000HTpdKMw5it8YDspUXSMGQyFwovpU", Network::Testnet),
        Err(Error::InvalidAddress(None))
    );
}

#[test]
fn custom_validator_replaces_charset_check() {
    // Fails the charset check but has a valid prefix.
    let odd = "tm000HTpdKMw5it8YDspUXSMGQyFwovpU";
    let accept_all = |_: &str| true;
    let addr = RecipientAddress::with_validator(odd, Network::Testnet, &accept_all).unwrap();
    assert_eq!(addr.as_str(), odd);

    // The network check still applies.
    assert_eq!(
        RecipientAddress::with_validator(MAINNET_P2PKH, Network::Testnet, &accept_all),
        Err(Error::InvalidAddress(None))
    );
    assert_eq!(
        RecipientAddress::with_validator(TESTNET_SPROUT, Network::Testnet, &accept_all),
        Err(Error::SproutRecipientsNotAllowed(None))
    );

    let reject_all = |_: &str| false;
    assert_eq!(
        RecipientAddress::with_validator(TESTNET_P2PKH, Network::Testnet, &reject_all),
        Err(Error::InvalidAddress(None))
    );

    // A network on its own is a validator without charset checks.
    assert!(RecipientAddress::with_validator(odd, Network::Testnet, &Network::Testnet).is_ok());
}

#[test]
fn network_names() {
    for net in [Network::Mainnet, Network::Testnet, Network::Regtest] {
        assert_eq!(net.to_string().parse::<Network>(), Ok(net));
    }
    assert!("mainnet".parse::<Network>().is_ok());
    assert!("signet".parse::<Network>().is_err());
}
