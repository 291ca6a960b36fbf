use crate::{
    address::{AddressValidator, Network, RecipientAddress},
    amount::Amount,
    memo::MemoBytes,
    param::{IndexedParameter, OtherParam, Param, REQUIRED_PREFIX},
    payment::{PaymentRequest, ParserResult},
    pct_enc::{
        table::{ALPHA, PARAM_INDEX, PARAM_NAME},
        Table,
    },
    qchar::QcharString,
    render::SCHEME_PREFIX,
    Error, Result,
};
use tracing::{debug, trace};

/// Returns immediately with a syntax error at the given byte offset.
macro_rules! err {
    ($pos:expr, $msg:literal) => {
        return Err(Error::ParseError(format!(concat!($msg, " at index {}"), $pos)))
    };
}

/// The longest parameter index, in digits.
const MAX_INDEX_LEN: usize = 4;

pub(crate) fn parse<V: AddressValidator + ?Sized>(
    s: &str,
    network: Network,
    validator: &V,
) -> Result<ParserResult> {
    let parser = Parser { network, validator };
    let res = parser.parse_uri(s);
    if let Err(e) = &res {
        debug!(error = %e, index = ?e.payment_index(), "rejected payment URI");
    }
    res
}

/// Payment URI parser.
///
/// The URI is split into an optional leading address and a query, and every
/// query parameter is validated on its own as soon as it is read. Grouping
/// parameters into payments happens only after the whole query is read.
struct Parser<'v, V: ?Sized> {
    network: Network,
    validator: &'v V,
}

/// A cursor over the query string.
///
/// # Invariants
///
/// `pos <= s.len()`, `pos` is non-decreasing and only ever stops on an
/// ASCII byte or at the end, so slicing `s` at `pos` is always valid.
struct Reader<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(s: &'a str) -> Self {
        Reader { s, pos: 0 }
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.s.len()
    }

    fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.pos).copied()
    }

    // Returns `true` iff `x` is read.
    fn read_given(&mut self, x: u8) -> bool {
        if self.peek() == Some(x) {
            // INVARIANT: `x` is ASCII here.
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // Reads as many bytes allowed by the table as possible.
    fn read(&mut self, table: &Table) -> &'a str {
        let start = self.pos;
        let rest = &self.s.as_bytes()[start..];
        let n = rest
            .iter()
            .position(|&x| !table.allows_ascii(x))
            .unwrap_or(rest.len());
        // INVARIANT: The table is ASCII-only, so the read stops on an ASCII byte or the end.
        self.pos += n;
        &self.s[start..self.pos]
    }

    // Reads everything up to the next `delim` or the end.
    fn read_until(&mut self, delim: u8) -> &'a str {
        let start = self.pos;
        let n = self.s.as_bytes()[start..]
            .iter()
            .position(|&x| x == delim)
            .unwrap_or(self.s.len() - start);
        // INVARIANT: `delim` is ASCII.
        self.pos += n;
        &self.s[start..self.pos]
    }
}

/// A parameter as written in the URI, before validation.
struct RawParam<'a> {
    key: &'a str,
    name: &'a str,
    index: usize,
    value: Option<&'a str>,
}

impl<V: AddressValidator + ?Sized> Parser<'_, V> {
    fn parse_uri(&self, s: &str) -> Result<ParserResult> {
        let Some(rest) = s.strip_prefix(SCHEME_PREFIX) else {
            return Err(Error::ParseError(format!(
                "payment URI must start with {SCHEME_PREFIX:?}"
            )));
        };

        let (addr, query) = match rest.split_once('?') {
            Some((addr, query)) => (addr, Some(query)),
            None => (rest, None),
        };

        let leading = if addr.is_empty() {
            None
        } else {
            Some(self.address(addr, 0)?)
        };

        let Some(query) = query else {
            return leading.map(ParserResult::Legacy).ok_or(Error::InvalidUri);
        };

        let mut params = Vec::new();
        if let Some(address) = leading {
            params.push(IndexedParameter {
                index: 0,
                param: Param::Address(address),
            });
        }

        let mut reader = Reader::new(query);
        loop {
            let raw = read_param(&mut reader)?;
            trace!(key = raw.key, index = raw.index, "read parameter");
            params.push(IndexedParameter {
                index: raw.index,
                param: self.param(&raw)?,
            });
            if !reader.read_given(b'&') {
                break;
            }
        }
        debug_assert!(!reader.has_remaining());

        PaymentRequest::from_indexed(params).map(ParserResult::Request)
    }

    fn address(&self, value: &str, index: usize) -> Result<RecipientAddress> {
        RecipientAddress::validate(value, self.network, self.validator, index)
    }

    /// Validates a parameter value according to its name.
    fn param(&self, raw: &RawParam<'_>) -> Result<Param> {
        let RawParam {
            name, index, value, ..
        } = *raw;

        if name.starts_with(REQUIRED_PREFIX) {
            return Err(Error::UnknownRequiredParameter(name.to_owned()));
        }

        // Reserved names without a value read as an empty value.
        let text = value.unwrap_or("");
        let param = match name {
            "address" => Param::Address(self.address(text, index)?),
            "amount" => Param::Amount(
                text.parse::<Amount>()
                    .map_err(|e| Error::from_amount(e, index))?,
            ),
            "memo" => Param::Memo(
                MemoBytes::from_base64url(text).map_err(|e| Error::from_memo(e, index))?,
            ),
            "label" => Param::Label(qchar(text)?),
            "message" => Param::Message(qchar(text)?),
            _ => Param::Other(OtherParam::parse(name, value)?),
        };
        Ok(param)
    }
}

fn qchar(value: &str) -> Result<QcharString> {
    QcharString::from_encoded(value).map_err(|_| Error::QcharDecodeFailed(value.to_owned()))
}

/// Reads one `key[=value]` parameter and stops before the next `&`.
fn read_param<'a>(r: &mut Reader<'a>) -> Result<RawParam<'a>> {
    let start = r.pos;
    if !r.has_remaining() || r.peek() == Some(b'&') {
        err!(start, "empty parameter");
    }

    let name = r.read(&PARAM_NAME);
    if !name.bytes().next().is_some_and(|x| ALPHA.allows_ascii(x)) {
        err!(start, "invalid parameter name");
    }

    let mut index = 0;
    if r.read_given(b'.') {
        let digits_start = r.pos;
        let digits = r.read(&PARAM_INDEX);
        if digits.is_empty() {
            err!(digits_start, "empty parameter index");
        }
        let key = &r.s[start..r.pos];
        if digits.len() > MAX_INDEX_LEN || digits.starts_with('0') {
            return Err(Error::InvalidParamIndex(key.to_owned()));
        }
        index = digits
            .parse()
            .map_err(|_| Error::InvalidParamIndex(key.to_owned()))?;
    }
    let key = &r.s[start..r.pos];

    let value = if r.read_given(b'=') {
        Some(r.read_until(b'&'))
    } else {
        None
    };
    if r.has_remaining() && r.peek() != Some(b'&') {
        err!(r.pos, "unexpected character in parameter key");
    }

    Ok(RawParam {
        key,
        name,
        index,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(query: &str) -> Result<Vec<(String, usize, Option<String>)>> {
        let mut r = Reader::new(query);
        let mut out = Vec::new();
        loop {
            let p = read_param(&mut r)?;
            out.push((p.name.to_owned(), p.index, p.value.map(str::to_owned)));
            if !r.read_given(b'&') {
                break;
            }
        }
        Ok(out)
    }

    #[test]
    fn tokens() {
        assert_eq!(
            read_all("address.1=abc&amount=1.5&foo&bar=").unwrap(),
            [
                ("address".into(), 1, Some("abc".into())),
                ("amount".into(), 0, Some("1.5".into())),
                ("foo".into(), 0, None),
                ("bar".into(), 0, Some(String::new())),
            ]
        );
        assert_eq!(read_all("a.9999=").unwrap()[0].1, 9999);
    }

    #[test]
    fn malformed_keys() {
        for query in ["", "&a", "a&", "a&&b", "1a=x", ".1=x", "a.=x", "a.1x=x", "a*b=x", "a b"] {
            assert!(
                matches!(read_all(query), Err(Error::ParseError(_))),
                "{query:?}"
            );
        }
    }

    #[test]
    fn out_of_range_indices() {
        for (query, key) in [
            ("amount.0=1", "amount.0"),
            ("amount.01=1", "amount.01"),
            ("amount.10000=1", "amount.10000"),
        ] {
            assert_eq!(read_all(query), Err(Error::InvalidParamIndex(key.into())));
        }
    }

    #[test]
    fn value_may_contain_anything_but_ampersand() {
        let params = read_all("label=a=b?c&x").unwrap();
        assert_eq!(params[0].2.as_deref(), Some("a=b?c"));
        assert_eq!(params.len(), 2);
    }
}
