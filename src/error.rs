use crate::{amount::AmountError, memo::MemoError};
use core::fmt;

/// An error occurred when parsing, validating or building a payment request.
///
/// Errors tied to a specific payment carry its parameter index, where
/// `None` stands for the first payment when it is written without an index.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input is not a well-formed `zcash:` URI.
    #[error("malformed payment URI: {0}")]
    ParseError(String),
    /// The URI has neither an address nor any query parameter.
    #[error("URI contains no address and no parameters")]
    InvalidUri,
    /// A parameter index has a leading zero, is zero, or exceeds 9999.
    #[error("invalid parameter index in {0:?}")]
    InvalidParamIndex(String),
    /// An address failed network or character-set validation.
    #[error("invalid address{}", at(.0))]
    InvalidAddress(Option<usize>),
    /// A Sprout address was given as a recipient.
    #[error("sprout recipients are not allowed{}", at(.0))]
    SproutRecipientsNotAllowed(Option<usize>),
    /// An amount exceeds the maximum supply. `0` is the unindexed payment.
    #[error("amount exceeds the maximum supply at payment {0}")]
    AmountExceededSupply(usize),
    /// An amount is negative or finer than one zatoshi. `0` is the unindexed payment.
    #[error("amount is negative or below one zatoshi at payment {0}")]
    AmountTooSmall(usize),
    /// A parameter value could not be parsed at all.
    #[error("invalid value for parameter {:?}{}", .param, at(.index))]
    InvalidParamValue {
        /// The parameter name.
        param: String,
        /// The payment index.
        index: Option<usize>,
    },
    /// A memo is not valid base64url.
    #[error("memo is not valid base64url")]
    InvalidBase64,
    /// A memo has an invalid length or content.
    #[error("invalid memo{}: {}", at(.1), .0)]
    MemoBytesError(MemoError, Option<usize>),
    /// The same parameter appears twice for one payment.
    #[error("duplicate parameter {:?}{}", .0, at(.1))]
    DuplicateParameter(String, Option<usize>),
    /// A payment has no recipient address.
    #[error("recipient address missing{}", at(.0))]
    RecipientMissing(Option<usize>),
    /// A memo is attached to a recipient that cannot receive memos.
    #[error("memos are not allowed for transparent recipients{}", at(.0))]
    TransparentMemoNotAllowed(Option<usize>),
    /// Payments in one request use addresses of different networks.
    #[error("payment request mixes addresses from different networks")]
    NetworkMismatchFound,
    /// A request holds more payments than can be indexed.
    #[error("too many payments in request: {0}")]
    TooManyPayments(usize),
    /// A `req-` parameter the parser does not recognize.
    #[error("unknown required parameter {0:?}")]
    UnknownRequiredParameter(String),
    /// An extension parameter uses a reserved name or the `req-` prefix.
    #[error("extension parameter uses reserved key {0:?}")]
    OtherParamUsesReservedKey(String),
    /// An extension parameter key is not a valid `paramname`.
    #[error("extension parameter key {0:?} is not a valid parameter name")]
    OtherParamEncodingError(String),
    /// A value is not valid `qchar` text or does not decode to UTF-8.
    #[error("failed to decode qchar value {0:?}")]
    QcharDecodeFailed(String),
}

impl Error {
    /// Returns the index of the payment the error is attributed to, if any.
    ///
    /// Amount errors report `0` for the unindexed payment, which is returned
    /// here as `None` like every other variant.
    #[must_use]
    pub fn payment_index(&self) -> Option<usize> {
        match self {
            Self::InvalidAddress(i)
            | Self::SproutRecipientsNotAllowed(i)
            | Self::InvalidParamValue { index: i, .. }
            | Self::MemoBytesError(_, i)
            | Self::DuplicateParameter(_, i)
            | Self::RecipientMissing(i)
            | Self::TransparentMemoNotAllowed(i) => *i,
            Self::AmountExceededSupply(i) | Self::AmountTooSmall(i) => optional_index(*i),
            _ => None,
        }
    }

    pub(crate) fn from_amount(e: AmountError, index: usize) -> Self {
        match e {
            AmountError::GreaterThanSupply => Self::AmountExceededSupply(index),
            AmountError::InvalidTextInput => Self::InvalidParamValue {
                param: "amount".into(),
                index: optional_index(index),
            },
            AmountError::NegativeAmount | AmountError::TooManyFractionalDigits => {
                Self::AmountTooSmall(index)
            }
        }
    }

    pub(crate) fn from_memo(e: MemoError, index: usize) -> Self {
        match e {
            MemoError::InvalidBase64Url => Self::InvalidBase64,
            e => Self::MemoBytesError(e, optional_index(index)),
        }
    }
}

/// Maps the unindexed sentinel `0` to `None`.
pub(crate) fn optional_index(index: usize) -> Option<usize> {
    (index != 0).then_some(index)
}

struct At(Option<usize>);

impl fmt::Display for At {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(i) => write!(f, " at payment {i}"),
            None => Ok(()),
        }
    }
}

fn at(index: &Option<usize>) -> At {
    At(*index)
}
