//! Validated text for parameter values and names.

use crate::pct_enc::{
    self,
    encoder::Qchar,
    table::{ALPHA, PARAM_NAME},
    EStr, EString,
};
use core::{fmt, str::FromStr};

/// Detailed cause of a [`QcharString`] or [`ParamNameString`] construction failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum QcharError {
    /// The input is empty.
    #[error("value is empty")]
    Empty,
    /// The input already contains a percent-encoded octet.
    #[error("value is already percent-encoded")]
    AlreadyEncoded,
    /// The input is not `qchar` text or does not decode to UTF-8.
    #[error("value is not valid qchar text")]
    InvalidEncoding,
    /// The input does not match the `paramname` rule.
    #[error("value is not a valid parameter name")]
    InvalidParamName,
}

/// A non-empty string value, stored percent-encoded under the `qchar` rule.
///
/// Used for `label`, `message` and extension parameter values. Two values
/// compare equal when their decoded text is equal.
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::QcharString;
///
/// let s = QcharString::new("Your Ben & Jerry's Order")?;
/// assert_eq!(s.encoded(), "Your%20Ben%20%26%20Jerry's%20Order");
/// assert_eq!(s.decoded(), "Your Ben & Jerry's Order");
///
/// // `+` is a plain character, not an encoded space.
/// assert_eq!(QcharString::from_encoded("apple+banana")?.decoded(), "apple+banana");
/// # Ok::<_, zcash_payment_uri::QcharError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QcharString(EString<Qchar>);

impl QcharString {
    /// Creates a value from unencoded text, percent-encoding it as needed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the text is empty.
    pub fn new(value: &str) -> Result<Self, QcharError> {
        if value.is_empty() {
            return Err(QcharError::Empty);
        }
        let mut buf = EString::new();
        buf.encode_str(value);
        Ok(Self(buf))
    }

    /// Creates a value from unencoded text, rejecting text that looks
    /// percent-encoded already.
    ///
    /// This catches values that would otherwise be encoded twice.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the text is empty or contains a `%XX` triplet.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcash_payment_uri::{QcharError, QcharString};
    ///
    /// assert_eq!(QcharString::new_strict("Thank%20You!"), Err(QcharError::AlreadyEncoded));
    /// assert_eq!(QcharString::new_strict("100%")?.encoded(), "100%25");
    /// # Ok::<_, QcharError>(())
    /// ```
    pub fn new_strict(value: &str) -> Result<Self, QcharError> {
        let has_triplet = value
            .as_bytes()
            .windows(3)
            .any(|w| w[0] == b'%' && pct_enc::is_hexdig_pair(w[1], w[2]));
        if has_triplet {
            return Err(QcharError::AlreadyEncoded);
        }
        Self::new(value)
    }

    /// Creates a value from `qchar` text as it appears in a URI.
    ///
    /// The text is decoded and encoded again, so equal values always share
    /// one encoded form.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the text is empty, contains characters outside `qchar`,
    /// or does not decode to UTF-8.
    pub fn from_encoded(encoded: &str) -> Result<Self, QcharError> {
        let estr = EStr::<Qchar>::new(encoded).ok_or(QcharError::InvalidEncoding)?;
        let decoded = estr
            .decode()
            .to_string()
            .map_err(|_| QcharError::InvalidEncoding)?;
        Self::new(&decoded)
    }

    /// Returns the decoded text.
    #[must_use]
    pub fn decoded(&self) -> String {
        self.0.decode().to_string_lossy().into_owned()
    }

    /// Returns the percent-encoded text.
    #[must_use]
    pub fn encoded(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the percent-encoded text as an `EStr` slice.
    #[must_use]
    pub fn as_estr(&self) -> &EStr<Qchar> {
        &self.0
    }
}

impl FromStr for QcharString {
    type Err = QcharError;

    /// Same as [`QcharString::from_encoded`].
    fn from_str(s: &str) -> Result<Self, QcharError> {
        Self::from_encoded(s)
    }
}

impl fmt::Display for QcharString {
    /// Writes the percent-encoded text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoded())
    }
}

/// A parameter name matching `ALPHA *( ALPHA / DIGIT / "+" / "-" )`.
///
/// The leading letter keeps a name apart from its optional numeric
/// index suffix.
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::ParamNameString;
///
/// assert!(ParamNameString::new("req-payment+id").is_ok());
/// assert!(ParamNameString::new("1address").is_err());
/// assert!(ParamNameString::new("addre*ss").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamNameString(String);

impl ParamNameString {
    /// Creates a parameter name.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the name is empty or does not match `paramname`.
    pub fn new(value: &str) -> Result<Self, QcharError> {
        match value.as_bytes() {
            [] => Err(QcharError::Empty),
            [first, ..] if ALPHA.allows_ascii(*first) && PARAM_NAME.validate(value.as_bytes()) => {
                Ok(Self(value.to_owned()))
            }
            _ => Err(QcharError::InvalidParamName),
        }
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ParamNameString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ParamNameString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ParamNameString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl FromStr for ParamNameString {
    type Err = QcharError;

    fn from_str(s: &str) -> Result<Self, QcharError> {
        Self::new(s)
    }
}

impl fmt::Display for ParamNameString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

crate::imp::impl_serde_str!(QcharString, "qchar string");
crate::imp::impl_serde_str!(ParamNameString, "parameter name");
