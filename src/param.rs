//! Single validated parameters.

use crate::{
    address::RecipientAddress, amount::Amount, memo::MemoBytes, qchar::ParamNameString,
    qchar::QcharString, Error, Result,
};

/// Parameter names with a meaning defined by the URI format.
pub(crate) const RESERVED_KEYS: [&str; 5] = ["address", "amount", "label", "memo", "message"];

/// The prefix of parameters a reader must understand to accept the URI.
pub(crate) const REQUIRED_PREFIX: &str = "req-";

/// One validated parameter of a payment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Param {
    /// The recipient address.
    Address(RecipientAddress),
    /// The amount to pay.
    Amount(Amount),
    /// A memo for the recipient.
    Memo(MemoBytes),
    /// A label for the recipient.
    Label(QcharString),
    /// A message for the payer.
    Message(QcharString),
    /// An extension parameter.
    Other(OtherParam),
}

impl Param {
    /// Returns the parameter name, without any index.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Address(_) => "address",
            Self::Amount(_) => "amount",
            Self::Memo(_) => "memo",
            Self::Label(_) => "label",
            Self::Message(_) => "message",
            Self::Other(p) => p.key().as_str(),
        }
    }
}

/// An extension parameter, with an optional value.
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::{Error, OtherParam, ParamNameString, QcharString};
///
/// let key = ParamNameString::new("order-id").unwrap();
/// let value = QcharString::new("A#42").unwrap();
/// let param = OtherParam::new(key, Some(value))?;
/// assert_eq!(param.value().map(|v| v.encoded()), Some("A%2342"));
///
/// let key = ParamNameString::new("req-refund").unwrap();
/// assert_eq!(
///     OtherParam::new(key, None),
///     Err(Error::OtherParamUsesReservedKey("req-refund".into()))
/// );
/// # Ok::<_, Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OtherParam {
    key: ParamNameString,
    value: Option<QcharString>,
}

impl OtherParam {
    /// Creates an extension parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OtherParamUsesReservedKey`] if the key is a reserved
    /// name or starts with `req-`.
    pub fn new(key: ParamNameString, value: Option<QcharString>) -> Result<Self> {
        let k = key.as_str();
        if RESERVED_KEYS.contains(&k) || k.starts_with(REQUIRED_PREFIX) {
            return Err(Error::OtherParamUsesReservedKey(k.to_owned()));
        }
        Ok(Self { key, value })
    }

    /// Creates an extension parameter from its text as written in a URI.
    ///
    /// An empty value is the same as no value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OtherParamEncodingError`] for an invalid key,
    /// [`Error::QcharDecodeFailed`] for an invalid value and
    /// [`Error::OtherParamUsesReservedKey`] for a reserved key.
    pub fn parse(key: &str, value: Option<&str>) -> Result<Self> {
        let key =
            ParamNameString::new(key).map_err(|_| Error::OtherParamEncodingError(key.to_owned()))?;
        let value = match value {
            None | Some("") => None,
            Some(v) => Some(
                QcharString::from_encoded(v).map_err(|_| Error::QcharDecodeFailed(v.to_owned()))?,
            ),
        };
        Self::new(key, value)
    }

    /// Returns the key.
    #[must_use]
    pub fn key(&self) -> &ParamNameString {
        &self.key
    }

    /// Returns the value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&QcharString> {
        self.value.as_ref()
    }
}

/// A parameter paired with its index, `0` standing for no index.
#[derive(Debug)]
pub(crate) struct IndexedParameter {
    pub(crate) index: usize,
    pub(crate) param: Param,
}
