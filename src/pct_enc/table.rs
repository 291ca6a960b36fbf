//! Byte pattern tables for ZIP-321 URIs and Zcash address encodings.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

use crate::pct_enc;

const MASK_PCT_ENCODED: u64 = 1 << b'%';
const MASK_UNENCODED_ASCII: u64 = !MASK_PCT_ENCODED;

/// A table specifying the byte patterns allowed in a string.
///
/// Only ASCII characters can be allowed unencoded. Any other character
/// has to be percent-encoded, if the table allows that at all.
#[derive(Clone, Copy, Debug)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or equals `0` or `b'%'`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(
                !matches!(cur, 0 | b'%' | 128..),
                "cannot allow non-ASCII byte, 0, or %"
            );
            table |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the byte patterns allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Marks this table as allowing percent-encoded octets.
    #[must_use]
    pub const fn or_pct_encoded(self) -> Self {
        Self(self.0 | MASK_PCT_ENCODED, self.1)
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the byte patterns allowed
    /// by `self` but not allowed by `other`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Checks whether the table is a subset of another, i.e., `other`
    /// allows at least all the byte patterns allowed by `self`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }

    #[inline]
    pub(crate) const fn allows_ascii(self, x: u8) -> bool {
        let table = if x < 64 {
            self.0 & MASK_UNENCODED_ASCII
        } else if x < 128 {
            self.1
        } else {
            0
        };
        table & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Checks whether the given unencoded character is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows(self, ch: char) -> bool {
        ch.is_ascii() && self.allows_ascii(ch as u8)
    }

    /// Checks whether percent-encoded octets are allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows_pct_encoded(self) -> bool {
        self.0 & MASK_PCT_ENCODED != 0
    }

    /// Validates the given string with the table.
    pub(crate) const fn validate(self, s: &[u8]) -> bool {
        let allow_pct_encoded = self.allows_pct_encoded();
        let mut i = 0;

        while i < s.len() {
            let x = s[i];
            if allow_pct_encoded && x == b'%' {
                if i + 2 >= s.len() {
                    return false;
                }
                if !pct_enc::is_hexdig_pair(s[i + 1], s[i + 2]) {
                    return false;
                }
                i += 3;
            } else {
                if !self.allows_ascii(x) {
                    return false;
                }
                i += 1;
            }
        }
        true
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

// Rules from RFC 3986:

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
pub const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub const UNRESERVED: Table = ALPHA.or(DIGIT).or(new(b"-._~"));

// Rules from ZIP-321:

/// `allowed-delims = "!" / "$" / "'" / "(" / ")" / "*" / "+" / "," / ";"`
pub const ALLOWED_DELIMS: Table = new(b"!$'()*+,;");

/// `qchar = unreserved / pct-encoded / allowed-delims / ":" / "@"`
pub const QCHAR: Table = UNRESERVED
    .or(ALLOWED_DELIMS)
    .or(new(b":@"))
    .or_pct_encoded();

/// `paramname = ALPHA *( ALPHA / DIGIT / "+" / "-" )`
pub const PARAM_NAME: Table = ALPHA.or(DIGIT).or(new(b"+-"));

/// `paramindex = %x31-39 0*3DIGIT`
pub const PARAM_INDEX: Table = DIGIT;

// Address and memo alphabets:

/// `ALPHA / DIGIT`
pub const ALNUM: Table = ALPHA.or(DIGIT);

/// The base64url alphabet from [RFC 4648], without padding.
///
/// [RFC 4648]: https://datatracker.ietf.org/doc/html/rfc4648#section-5
pub const BASE64URL: Table = ALPHA.or(DIGIT).or(new(b"-_"));

/// The data alphabet of Bech32 and Bech32m.
pub const BECH32: Table = new(b"qpzry9x8gf2tvdw0s3jn54khce6mua7l");

/// The Base58 alphabet used by transparent addresses.
pub const BASE58: Table = new(b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qchar_excludes_delimiters() {
        for ch in "&=?#/% \"<>[\\]^`{|}".chars() {
            assert!(!QCHAR.allows(ch), "{ch:?} must not be allowed");
        }
        for ch in "azAZ09-._~!$'()*+,;:@".chars() {
            assert!(QCHAR.allows(ch), "{ch:?} must be allowed");
        }
        assert!(QCHAR.allows_pct_encoded());
        assert!(!QCHAR.allows('é'));
    }

    #[test]
    fn validate() {
        assert!(QCHAR.validate(b"Thank%20you"));
        assert!(!QCHAR.validate(b"100%"));
        assert!(!QCHAR.validate(b"%2g"));
        assert!(!QCHAR.validate(b"a=b"));
        assert!(PARAM_NAME.validate(b"req-foo+bar"));
        assert!(!PARAM_NAME.validate(b"foo.1"));
        assert!(!BASE64URL.validate(b"QTw+Qg"));
        assert!(!BASE58.validate(b"tm0"));
        assert!(BECH32.is_subset(ALNUM));
        assert!(BASE58.is_subset(ALNUM));
    }
}
