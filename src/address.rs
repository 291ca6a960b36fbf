//! Recipient addresses and their network context.

use crate::{
    error::optional_index,
    pct_enc::table::{ALNUM, BASE58, BECH32},
    Error, Result,
};
use core::{fmt, str::FromStr};

/// The address prefixes of one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prefixes {
    /// Sprout shielded addresses.
    pub sprout: &'static str,
    /// Sapling shielded addresses.
    pub sapling: &'static str,
    /// Unified addresses.
    pub unified: &'static str,
    /// Transparent pay-to-script-hash addresses.
    pub p2sh: &'static str,
    /// Transparent pay-to-public-key-hash addresses.
    pub p2pkh: &'static str,
    /// Transparent-source-only (TEX) addresses.
    pub tex: &'static str,
}

const MAINNET: Prefixes = Prefixes {
    sprout: "zc",
    sapling: "zs",
    unified: "u",
    p2sh: "t3",
    p2pkh: "t1",
    tex: "tex",
};

const TESTNET: Prefixes = Prefixes {
    sprout: "zt",
    sapling: "ztestsapling",
    unified: "utest",
    p2sh: "t2",
    p2pkh: "tm",
    tex: "textest",
};

const REGTEST: Prefixes = Prefixes {
    sprout: "zt",
    sapling: "zregtestsapling",
    unified: "uregtest",
    p2sh: "t3",
    p2pkh: "tm",
    tex: "texregtest",
};

/// Bech32 prefixes are only matched up to the `1` separator, so that `u`
/// does not match `utest1`.
fn has_hrp(address: &str, hrp: &str) -> bool {
    address
        .strip_prefix(hrp)
        .is_some_and(|rest| rest.starts_with('1'))
}

/// The kind of an address, as told by its prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// A Sprout address. Never a valid recipient.
    Sprout,
    /// A Sapling address.
    Sapling,
    /// A unified address.
    Unified,
    /// A P2SH transparent address.
    P2sh,
    /// A P2PKH transparent address.
    P2pkh,
    /// A TEX address.
    Tex,
}

impl AddressKind {
    /// Checks whether the kind is transparent (P2SH, P2PKH or TEX).
    #[must_use]
    pub fn is_transparent(self) -> bool {
        matches!(self, Self::P2sh | Self::P2pkh | Self::Tex)
    }

    /// Checks whether the kind is Sapling or unified.
    #[must_use]
    pub fn is_shielded(self) -> bool {
        matches!(self, Self::Sapling | Self::Unified)
    }
}

/// The network a payment request is parsed for.
///
/// The network decides which address prefixes are accepted and whether
/// an address is transparent or shielded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    /// Zcash mainnet.
    Mainnet,
    /// Zcash testnet.
    Testnet,
    /// A local regression test network.
    Regtest,
}

impl Network {
    /// Returns the address prefixes of the network.
    #[must_use]
    pub const fn prefixes(self) -> &'static Prefixes {
        match self {
            Self::Mainnet => &MAINNET,
            Self::Testnet => &TESTNET,
            Self::Regtest => &REGTEST,
        }
    }

    /// Classifies an address by its prefix.
    ///
    /// Returns `None` if the address has no known prefix or contains
    /// anything but ASCII letters and digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcash_payment_uri::{AddressKind, Network};
    ///
    /// let net = Network::Testnet;
    /// assert_eq!(net.address_kind("tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU"), Some(AddressKind::P2pkh));
    /// assert_eq!(net.address_kind("ztestsapling10yy2ex5dcqkc"), Some(AddressKind::Sapling));
    /// assert_eq!(net.address_kind("ztJ1EWLKcGwF2S4NA17pAJVdco8Sdkz4AQPx"), Some(AddressKind::Sprout));
    /// assert_eq!(net.address_kind("tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU\u{294}"), None);
    /// ```
    #[must_use]
    pub fn address_kind(self, address: &str) -> Option<AddressKind> {
        if address.is_empty() || !ALNUM.validate(address.as_bytes()) {
            return None;
        }

        let p = self.prefixes();
        // The testnet Sprout prefix is a prefix of the Sapling one.
        let kind = if has_hrp(address, p.sapling) {
            AddressKind::Sapling
        } else if address.starts_with(p.sprout) {
            AddressKind::Sprout
        } else if has_hrp(address, p.unified) {
            AddressKind::Unified
        } else if has_hrp(address, p.tex) {
            AddressKind::Tex
        } else if address.starts_with(p.p2sh) {
            AddressKind::P2sh
        } else if address.starts_with(p.p2pkh) {
            AddressKind::P2pkh
        } else {
            return None;
        };
        Some(kind)
    }

    /// Checks whether the address is transparent on this network.
    #[must_use]
    pub fn is_transparent(self, address: &str) -> bool {
        self.address_kind(address)
            .is_some_and(AddressKind::is_transparent)
    }

    /// Checks whether the address is Sapling or unified on this network.
    #[must_use]
    pub fn is_shielded(self, address: &str) -> bool {
        self.address_kind(address).is_some_and(AddressKind::is_shielded)
    }

    /// Checks whether the address is a Sprout address on this network.
    #[must_use]
    pub fn is_sprout(self, address: &str) -> bool {
        self.address_kind(address) == Some(AddressKind::Sprout)
    }

    /// Checks whether the address may be a payment recipient on this network.
    #[must_use]
    pub fn is_valid(self, address: &str) -> bool {
        !self.is_sprout(address) && (self.is_transparent(address) || self.is_shielded(address))
    }

    /// Returns the short name of the network.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "main",
            Self::Testnet => "test",
            Self::Regtest => "regtest",
        }
    }
}

/// An error returned when parsing a [`Network`] name fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown network name {0:?}")]
pub struct ParseNetworkError(String);

impl FromStr for Network {
    type Err = ParseNetworkError;

    /// Parses `main`, `test` or `regtest`, also accepting a `net` suffix.
    fn from_str(s: &str) -> Result<Self, ParseNetworkError> {
        match s.strip_suffix("net").unwrap_or(s) {
            "main" => Ok(Self::Mainnet),
            "test" => Ok(Self::Testnet),
            "regtest" => Ok(Self::Regtest),
            _ => Err(ParseNetworkError(s.to_owned())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

crate::imp::impl_serde_str!(Network, "network");

/// A predicate run on every address found in a payment request.
///
/// It runs in addition to the prefix checks of [`Network`], so it can only
/// tighten validation, for instance by verifying checksums. It is
/// implemented for any `Fn(&str) -> bool`.
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::{parse_with, Error, Network};
///
/// let only_sapling = |addr: &str| addr.starts_with("ztestsapling");
/// let res = parse_with("zcash:tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU", Network::Testnet, &only_sapling);
/// assert_eq!(res, Err(Error::InvalidAddress(None)));
/// ```
pub trait AddressValidator {
    /// Checks whether the address is acceptable.
    fn is_valid(&self, address: &str) -> bool;
}

impl<F: Fn(&str) -> bool + ?Sized> AddressValidator for F {
    fn is_valid(&self, address: &str) -> bool {
        self(address)
    }
}

impl AddressValidator for Network {
    fn is_valid(&self, address: &str) -> bool {
        Network::is_valid(*self, address)
    }
}

/// The default [`AddressValidator`], checking the encoding alphabet.
///
/// Sapling, unified and TEX addresses must consist of a known human-readable
/// part followed by Bech32 characters. Any other address starting with `t`
/// must consist of Base58 characters. Checksums are not verified.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharsetValidator;

const BECH32_HRPS: &[&str] = &[
    "zs1",
    "ztestsapling1",
    "zregtestsapling1",
    "u1",
    "utest1",
    "uregtest1",
    "tex1",
    "textest1",
    "texregtest1",
];

impl AddressValidator for CharsetValidator {
    fn is_valid(&self, address: &str) -> bool {
        let bech32 = BECH32_HRPS.iter().any(|hrp| {
            address
                .strip_prefix(hrp)
                .is_some_and(|data| !data.is_empty() && BECH32.validate(data.as_bytes()))
        });
        bech32 || (address.starts_with('t') && BASE58.validate(address.as_bytes()))
    }
}

/// A payment recipient, valid on the network it was created for.
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::{Error, Network, RecipientAddress};
///
/// let addr = RecipientAddress::new("tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU", Network::Testnet)?;
/// assert!(addr.is_transparent());
/// assert!(!addr.can_receive_memos());
///
/// assert_eq!(
///     RecipientAddress::new("tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU", Network::Mainnet),
///     Err(Error::InvalidAddress(None))
/// );
/// # Ok::<_, Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecipientAddress {
    value: String,
    network: Network,
}

impl RecipientAddress {
    /// Creates an address checked against the network prefixes and
    /// the [`CharsetValidator`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::SproutRecipientsNotAllowed`] for a Sprout address
    /// and [`Error::InvalidAddress`] for any other rejected address.
    pub fn new(value: &str, network: Network) -> Result<Self> {
        Self::with_validator(value, network, &CharsetValidator)
    }

    /// Creates an address checked against the network prefixes and
    /// the given validator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SproutRecipientsNotAllowed`] for a Sprout address
    /// and [`Error::InvalidAddress`] for any other rejected address.
    pub fn with_validator<V: AddressValidator + ?Sized>(
        value: &str,
        network: Network,
        validator: &V,
    ) -> Result<Self> {
        Self::validate(value, network, validator, 0)
    }

    pub(crate) fn validate<V: AddressValidator + ?Sized>(
        value: &str,
        network: Network,
        validator: &V,
        index: usize,
    ) -> Result<Self> {
        if network.is_sprout(value) {
            return Err(Error::SproutRecipientsNotAllowed(optional_index(index)));
        }
        if !network.is_valid(value) || !validator.is_valid(value) {
            return Err(Error::InvalidAddress(optional_index(index)));
        }
        Ok(Self {
            value: value.to_owned(),
            network,
        })
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the network the address was validated for.
    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    /// Checks whether the address is transparent.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.network.is_transparent(&self.value)
    }

    /// Checks whether the address is Sapling or unified.
    #[must_use]
    pub fn is_shielded(&self) -> bool {
        self.network.is_shielded(&self.value)
    }

    /// Checks whether a memo may be sent to the address.
    #[must_use]
    pub fn can_receive_memos(&self) -> bool {
        self.is_shielded()
    }
}

impl AsRef<str> for RecipientAddress {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for RecipientAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
