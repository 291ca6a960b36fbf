use super::{EStr, Encode, Encoder};
use core::{cmp::Ordering, fmt, hash, marker::PhantomData, ops::Deref};

/// A percent-encoded, growable string.
///
/// The borrowed counterpart of `EString` is [`EStr`].
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::pct_enc::{encoder::Qchar, EString};
///
/// let mut buf = EString::<Qchar>::new();
/// buf.encode_str("Your Ben & Jerry's Order");
/// assert_eq!(buf, "Your%20Ben%20%26%20Jerry's%20Order");
/// ```
pub struct EString<E: Encoder> {
    buf: String,
    encoder: PhantomData<E>,
}

impl<E: Encoder> Clone for EString<E> {
    fn clone(&self) -> Self {
        Self::new_validated(self.buf.clone())
    }
}

impl<E: Encoder> Default for EString<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Encoder> Deref for EString<E> {
    type Target = EStr<E>;

    fn deref(&self) -> &EStr<E> {
        EStr::new_validated(&self.buf)
    }
}

impl<E: Encoder> EString<E> {
    pub(crate) fn new_validated(buf: String) -> Self {
        Self {
            buf,
            encoder: PhantomData,
        }
    }

    /// Creates a new empty `EString`.
    #[must_use]
    pub fn new() -> Self {
        Self::new_validated(String::new())
    }

    /// Encodes a string and appends the result onto the end of this `EString`.
    ///
    /// A character will be preserved if `E::TABLE` [allows] it; otherwise each
    /// of its UTF-8 bytes is percent-encoded with uppercase hexadecimal digits.
    ///
    /// Note that this method will **not** encode `U+0020` (space) as `U+002B` (+).
    ///
    /// [allows]: super::Table::allows
    ///
    /// # Panics
    ///
    /// Panics at compile time if `E::TABLE` does not [allow percent-encoded octets].
    ///
    /// [allow percent-encoded octets]: super::Table::allows_pct_encoded
    pub fn encode_str(&mut self, s: &str) {
        () = EStr::<E>::ASSERT_ALLOWS_PCT_ENCODED;

        for chunk in Encode::new(E::TABLE, s) {
            self.buf.push_str(chunk);
        }
    }
}

impl<E: Encoder> PartialEq for EString<E> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<E: Encoder> PartialEq<&str> for EString<E> {
    fn eq(&self, other: &&str) -> bool {
        self.buf == *other
    }
}

impl<E: Encoder> Eq for EString<E> {}

impl<E: Encoder> hash::Hash for EString<E> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.buf.hash(state);
    }
}

impl<E: Encoder> PartialOrd for EString<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E: Encoder> Ord for EString<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.buf.cmp(&other.buf)
    }
}

impl<E: Encoder> fmt::Debug for EString<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.buf, f)
    }
}

impl<E: Encoder> fmt::Display for EString<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.buf, f)
    }
}
