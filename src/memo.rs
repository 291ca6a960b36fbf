//! Memo payloads carried in the `memo` parameter.

use crate::pct_enc::table::BASE64URL;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use core::{fmt, str::FromStr};

/// Base64url without padding, as written in the `memo` parameter.
///
/// Decoding behaves like restoring the padding and decoding standard
/// base64 with `-` and `_` read as `+` and `/`.
const BASE64URL_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Detailed cause of a [`MemoBytes`] construction failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum MemoError {
    /// The memo has no bytes.
    #[error("memo is empty")]
    MemoEmpty,
    /// The memo is longer than 512 bytes.
    #[error("memo exceeds 512 bytes")]
    MemoTooLong,
    /// The memo bytes are not valid UTF-8.
    #[error("memo is not a UTF-8 string")]
    NotUtf8String,
    /// The text is not unpadded base64url.
    #[error("memo is not valid base64url")]
    InvalidBase64Url,
}

/// A memo of 1 to 512 bytes.
///
/// The contents are opaque. On the wire a memo is written as unpadded
/// base64url.
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::MemoBytes;
///
/// let memo = MemoBytes::from_utf8("This is a simple memo.")?;
/// assert_eq!(memo.to_base64url(), "VGhpcyBpcyBhIHNpbXBsZSBtZW1vLg");
///
/// let decoded = MemoBytes::from_base64url("VGhpcyBpcyBhIHNpbXBsZSBtZW1vLg")?;
/// assert_eq!(decoded.to_utf8()?, "This is a simple memo.");
/// # Ok::<_, zcash_payment_uri::MemoError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MemoBytes(Vec<u8>);

impl MemoBytes {
    /// The maximum length of a memo in bytes.
    pub const MAX_LEN: usize = 512;

    /// Creates a memo from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the bytes are empty or longer than [`MAX_LEN`](Self::MAX_LEN).
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, MemoError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(MemoError::MemoEmpty);
        }
        if bytes.len() > Self::MAX_LEN {
            return Err(MemoError::MemoTooLong);
        }
        Ok(Self(bytes))
    }

    /// Creates a memo from the UTF-8 encoding of a string.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is empty or its encoding is longer than
    /// [`MAX_LEN`](Self::MAX_LEN).
    pub fn from_utf8(s: &str) -> Result<Self, MemoError> {
        Self::new(s.as_bytes())
    }

    /// Decodes a memo from unpadded base64url text.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the text contains a character outside `[A-Za-z0-9_-]`,
    /// fails to decode, or decodes to an empty or over-long memo.
    pub fn from_base64url(s: &str) -> Result<Self, MemoError> {
        if !BASE64URL.validate(s.as_bytes()) {
            return Err(MemoError::InvalidBase64Url);
        }
        let bytes = BASE64URL_ENGINE
            .decode(s)
            .map_err(|_| MemoError::InvalidBase64Url)?;
        Self::new(bytes)
    }

    /// Encodes the memo as unpadded base64url text.
    #[must_use]
    pub fn to_base64url(&self) -> String {
        BASE64URL_ENGINE.encode(&self.0)
    }

    /// Returns the memo bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the memo as text.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the bytes are not valid UTF-8.
    pub fn to_utf8(&self) -> Result<&str, MemoError> {
        core::str::from_utf8(&self.0).map_err(|_| MemoError::NotUtf8String)
    }

    /// Consumes the memo and yields its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for MemoBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for MemoBytes {
    type Error = MemoError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, MemoError> {
        Self::new(bytes)
    }
}

impl FromStr for MemoBytes {
    type Err = MemoError;

    /// Same as [`MemoBytes::from_base64url`].
    fn from_str(s: &str) -> Result<Self, MemoError> {
        Self::from_base64url(s)
    }
}

impl fmt::Display for MemoBytes {
    /// Writes the memo as unpadded base64url.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64url())
    }
}

impl fmt::Debug for MemoBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemoBytes")
            .field(&self.to_base64url())
            .finish()
    }
}

crate::imp::impl_serde_str!(MemoBytes, "memo");
