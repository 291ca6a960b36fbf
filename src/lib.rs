#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! A parser and renderer for Zcash payment request URIs as defined in [ZIP 321].
//!
//! [ZIP 321]: https://zips.z.cash/zip-0321
//!
//! A payment URI names one or more recipients along with optional amounts,
//! memos and descriptive text:
//!
//! ```text
//! zcash:?address=tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU&amount=123.456
//!       &address.1=ztestsapling10yy2ex5dcqkclhc7z7yrnjq2z6feyjad56ptwlfgmy77dmaqqrl9gyhprdx59qgmsnyfska2kez
//!       &amount.1=0.789&memo.1=VGhpcyBpcyBhIHNpbXBsZSBtZW1vLg
//! ```
//!
//! Use [`parse`] to read a URI into a [`ParserResult`], and [`render`] to
//! write a [`PaymentRequest`] back out. Every value in a parsed request is
//! validated: addresses against the expected [`Network`], amounts against the
//! maximum supply and precision, and memos against their length limit.
//!
//! # Examples
//!
//! ```
//! use zcash_payment_uri::{FormattingOptions, Network, ParserResult};
//!
//! let uri = "zcash:tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU?amount=123.45&label=apple+banana";
//! let ParserResult::Request(req) = zcash_payment_uri::parse(uri, Network::Testnet)? else {
//!     unreachable!();
//! };
//!
//! let payment = &req.payments()[0];
//! assert_eq!(payment.amount().unwrap().to_string(), "123.45");
//! assert_eq!(payment.label().unwrap().decoded(), "apple+banana");
//!
//! let options = FormattingOptions::UseEmptyParamIndex { omit_address_label: true };
//! assert_eq!(zcash_payment_uri::render(&req, options), uri);
//! # Ok::<_, zcash_payment_uri::Error>(())
//! ```
//!
//! # Logging
//!
//! Parsing emits [`tracing`] events: `trace` for every parameter read and
//! `debug` when a URI is rejected. No subscriber is installed by this crate.
//!
//! # Feature flags
//!
//! - `serde`: Enables string-based `Serialize` and `Deserialize`
//!   implementations for [`Amount`], [`MemoBytes`], [`QcharString`],
//!   [`ParamNameString`] and [`Network`].

mod address;
mod amount;
mod error;
mod imp;
mod memo;
mod param;
mod parse;
mod payment;
mod qchar;
mod render;

/// Utilities for percent-encoding.
pub mod pct_enc;

pub use address::{
    AddressKind, AddressValidator, CharsetValidator, Network, ParseNetworkError, Prefixes,
    RecipientAddress,
};
pub use amount::{Amount, AmountError};
pub use error::Error;
pub use memo::{MemoBytes, MemoError};
pub use param::{OtherParam, Param};
pub use payment::{ParserResult, Payment, PaymentRequest, MAX_PAYMENTS};
pub use qchar::{ParamNameString, QcharError, QcharString};
pub use render::FormattingOptions;

/// A `Result` type alias with [`Error`] as the default error type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Parses a payment URI for the given network.
///
/// Addresses are checked against the network prefixes and the default
/// [`CharsetValidator`].
///
/// A URI with an address but no query, such as `zcash:<address>`, gives
/// [`ParserResult::Legacy`]. Anything else gives [`ParserResult::Request`].
///
/// # Errors
///
/// Returns `Err` on the first problem found. Parameters are validated in the
/// order they appear, before payments are assembled.
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::{parse, Error, Network};
///
/// let res = parse("zcash:tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU?amount=1&memo=VGhpcw", Network::Testnet);
/// assert_eq!(res, Err(Error::TransparentMemoNotAllowed(None)));
/// ```
pub fn parse(s: &str, network: Network) -> Result<ParserResult> {
    parse::parse(s, network, &CharsetValidator)
}

/// Parses a payment URI for the given network, checking every address with
/// the given validator instead of the [`CharsetValidator`].
///
/// # Errors
///
/// Returns `Err` on the first problem found, as [`parse`] does.
pub fn parse_with<V: AddressValidator + ?Sized>(
    s: &str,
    network: Network,
    validator: &V,
) -> Result<ParserResult> {
    parse::parse(s, network, validator)
}

/// Renders a payment request as a URI.
#[must_use]
pub fn render(request: &PaymentRequest, options: FormattingOptions) -> String {
    request.to_uri(options)
}

/// Renders a single payment as a URI.
#[must_use]
pub fn render_payment(payment: &Payment, options: FormattingOptions) -> String {
    render::Render::new(core::slice::from_ref(payment), options).to_string()
}

/// Renders a bare address as a URI.
///
/// With `UseEmptyParamIndex { omit_address_label: true }` this gives
/// `zcash:<address>`, and `zcash:?address=<address>` otherwise.
#[must_use]
pub fn render_address(address: &RecipientAddress, options: FormattingOptions) -> String {
    render::render_address(address, options)
}
