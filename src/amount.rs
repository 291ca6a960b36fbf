//! ZEC amounts as written in the `amount` parameter.

use core::{fmt, str::FromStr};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits in one zatoshi.
const FRACTION_DIGITS: u32 = 8;

/// Zatoshis per ZEC.
const COIN: u64 = 100_000_000;

/// The maximum supply in ZEC.
const MAX_SUPPLY: u64 = 21_000_000;

/// Detailed cause of an [`Amount`] construction failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AmountError {
    /// The value is below zero.
    #[error("amount is negative")]
    NegativeAmount,
    /// The value exceeds the maximum supply of 21,000,000 ZEC.
    #[error("amount exceeds the maximum supply")]
    GreaterThanSupply,
    /// The value has more than 8 significant fractional digits.
    #[error("amount has more than 8 fractional digits")]
    TooManyFractionalDigits,
    /// The text is not a decimal number.
    #[error("amount is not a decimal number")]
    InvalidTextInput,
}

/// A non-negative ZEC amount with at most 8 fractional digits.
///
/// The value is kept exact and in canonical form, so that equal amounts
/// always render to the same text: no trailing fractional zeros, no leading
/// integer zeros and no grouping separators.
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::Amount;
///
/// let amount: Amount = "123.4500".parse()?;
/// assert_eq!(amount.to_string(), "123.45");
/// assert_eq!(amount.zatoshis(), 12_345_000_000);
///
/// // Floating-point input is rounded half to even at the zatoshi.
/// assert_eq!(Amount::from_f64(0.02)?.to_string(), "0.02");
/// # Ok::<_, zcash_payment_uri::AmountError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The maximum supply, 21,000,000 ZEC.
    pub const MAX: Self = Self(Decimal::from_parts(MAX_SUPPLY as u32, 0, 0, false, 0));

    /// Creates an amount from a floating-point value.
    ///
    /// The value is rounded to 8 fractional digits with round-half-to-even
    /// before validation, as binary floating point cannot represent most
    /// amounts exactly.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative, exceeds the maximum supply
    /// or is NaN.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if value.is_nan() {
            return Err(AmountError::InvalidTextInput);
        }
        if value < 0.0 {
            return Err(AmountError::NegativeAmount);
        }
        if value > MAX_SUPPLY as f64 {
            return Err(AmountError::GreaterThanSupply);
        }

        let decimal = Decimal::from_f64_retain(value).ok_or(AmountError::GreaterThanSupply)?;
        let rounded = decimal
            .round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointNearestEven);
        Self::from_decimal(rounded)
    }

    /// Creates an amount from a number of zatoshis.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value exceeds the maximum supply.
    pub fn from_zatoshis(zatoshis: u64) -> Result<Self, AmountError> {
        if zatoshis > MAX_SUPPLY * COIN {
            return Err(AmountError::GreaterThanSupply);
        }
        Ok(Self(Decimal::new(zatoshis as i64, FRACTION_DIGITS).normalize()))
    }

    /// Returns the amount in zatoshis.
    #[must_use]
    pub fn zatoshis(&self) -> u64 {
        let mut value = self.0;
        value.rescale(FRACTION_DIGITS);
        value.mantissa() as u64
    }

    /// Returns the amount as a decimal number of ZEC.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Checks whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::NegativeAmount);
        }
        if value > Self::MAX.0 {
            return Err(AmountError::GreaterThanSupply);
        }

        let value = value.normalize();
        if value.scale() > FRACTION_DIGITS {
            return Err(AmountError::TooManyFractionalDigits);
        }
        Ok(Self(value))
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    /// Creates an amount from an exact decimal value.
    ///
    /// Unlike [`Amount::from_f64`], the value is never rounded: more than
    /// 8 significant fractional digits is an error.
    fn try_from(value: Decimal) -> Result<Self, AmountError> {
        Self::from_decimal(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses an amount from decimal text such as `"123.45"`.
    ///
    /// An optional sign, digits and an optional fractional part are accepted.
    /// Exponents, grouping separators and whitespace are not. The text is
    /// never rounded.
    fn from_str(s: &str) -> Result<Self, AmountError> {
        let negative = s.starts_with('-');
        let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);

        let (int, frac) = match unsigned.split_once('.') {
            Some((_, "")) => return Err(AmountError::InvalidTextInput),
            Some((int, frac)) => (int, frac),
            None => (unsigned, ""),
        };
        if (int.is_empty() && frac.is_empty())
            || !int.bytes().all(|x| x.is_ascii_digit())
            || !frac.bytes().all(|x| x.is_ascii_digit())
        {
            return Err(AmountError::InvalidTextInput);
        }

        let int = int.trim_start_matches('0');
        let frac = frac.trim_end_matches('0');

        if negative && !(int.is_empty() && frac.is_empty()) {
            return Err(AmountError::NegativeAmount);
        }

        // At most 8 integer digits from here on, so `u64` cannot overflow.
        if int.len() > 8 {
            return Err(AmountError::GreaterThanSupply);
        }
        let whole = int.bytes().fold(0, |acc, x| acc * 10 + u64::from(x - b'0'));
        if whole > MAX_SUPPLY || (whole == MAX_SUPPLY && !frac.is_empty()) {
            return Err(AmountError::GreaterThanSupply);
        }

        if frac.len() > FRACTION_DIGITS as usize {
            return Err(AmountError::TooManyFractionalDigits);
        }
        let fraction = frac
            .bytes()
            .chain(core::iter::repeat(b'0'))
            .take(FRACTION_DIGITS as usize)
            .fold(0, |acc, x| acc * 10 + u64::from(x - b'0'));

        Self::from_zatoshis(whole * COIN + fraction)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

crate::imp::impl_serde_str!(Amount, "amount");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(Amount::MAX.to_string(), "21000000");
        assert_eq!(Amount::MAX.zatoshis(), 2_100_000_000_000_000);
        assert_eq!(Amount::ZERO.to_string(), "0");
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn text_grammar() {
        assert_eq!("0".parse::<Amount>(), Ok(Amount::ZERO));
        assert_eq!("-0.000".parse::<Amount>(), Ok(Amount::ZERO));
        assert_eq!(".5".parse::<Amount>().map(|a| a.to_string()), Ok("0.5".into()));
        assert_eq!("+1".parse::<Amount>().map(|a| a.zatoshis()), Ok(COIN));
        for bad in ["", ".", "1.", "-", "1e3", " 1", "1 ", "1,000", "1_000", "0x10", "1.2.3"] {
            assert_eq!(bad.parse::<Amount>(), Err(AmountError::InvalidTextInput), "{bad:?}");
        }
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() {
        let amount: Amount = "1.1000000000000000000000000000000000".parse().unwrap();
        assert_eq!(amount.to_string(), "1.1");
    }
}
