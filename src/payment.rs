//! Payments and payment requests.

use crate::{
    address::{AddressValidator, CharsetValidator, Network, RecipientAddress},
    amount::Amount,
    error::optional_index,
    memo::MemoBytes,
    param::{IndexedParameter, OtherParam, Param},
    qchar::QcharString,
    render::{FormattingOptions, Render},
    Error, Result,
};
use std::collections::BTreeMap;

/// The maximum number of payments in one request.
///
/// Parameter indices have at most four digits, so one request can hold
/// the unindexed payment and indices 1 to 9999. Only 9999 of those are
/// allowed at once.
pub const MAX_PAYMENTS: usize = 9999;

/// One payment to a single recipient.
///
/// # Examples
///
/// ```
/// use zcash_payment_uri::{Error, MemoBytes, Network, Payment, RecipientAddress};
///
/// let addr = RecipientAddress::new("tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU", Network::Testnet)?;
/// let memo = MemoBytes::from_utf8("hi").unwrap();
/// assert_eq!(
///     Payment::new(addr, None, Some(memo), None, None, vec![]),
///     Err(Error::TransparentMemoNotAllowed(None))
/// );
/// # Ok::<_, Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    address: RecipientAddress,
    amount: Option<Amount>,
    memo: Option<MemoBytes>,
    label: Option<QcharString>,
    message: Option<QcharString>,
    other_params: Vec<OtherParam>,
}

impl Payment {
    /// Creates a payment.
    ///
    /// An amount of `None` leaves the amount to the payer, which is not the
    /// same as a zero amount.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransparentMemoNotAllowed`] if a memo is given for an
    /// address that cannot receive memos.
    pub fn new(
        address: RecipientAddress,
        amount: Option<Amount>,
        memo: Option<MemoBytes>,
        label: Option<QcharString>,
        message: Option<QcharString>,
        other_params: Vec<OtherParam>,
    ) -> Result<Self> {
        let payment = Self {
            address,
            amount,
            memo,
            label,
            message,
            other_params,
        };
        payment.check(0)?;
        Ok(payment)
    }

    /// Creates a payment to an address, with nothing else specified.
    #[must_use]
    pub fn from_address(address: RecipientAddress) -> Self {
        Self {
            address,
            amount: None,
            memo: None,
            label: None,
            message: None,
            other_params: Vec::new(),
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        if self.memo.is_some() && !self.address.can_receive_memos() {
            return Err(Error::TransparentMemoNotAllowed(optional_index(index)));
        }
        Ok(())
    }

    /// Builds the payment with the given index from parameters that have
    /// already been checked for duplicates.
    fn from_params(index: usize, params: Vec<Param>) -> Result<Self> {
        let mut address = None;
        let mut amount = None;
        let mut memo = None;
        let mut label = None;
        let mut message = None;
        let mut other_params: Vec<OtherParam> = Vec::new();

        for param in params {
            match param {
                Param::Address(x) => address = Some(x),
                Param::Amount(x) => amount = Some(x),
                Param::Memo(x) => memo = Some(x),
                Param::Label(x) => label = Some(x),
                Param::Message(x) => message = Some(x),
                Param::Other(x) => other_params.push(x),
            }
        }

        let Some(address) = address else {
            return Err(Error::RecipientMissing(optional_index(index)));
        };
        let payment = Self {
            address,
            amount,
            memo,
            label,
            message,
            other_params,
        };
        payment.check(index)?;
        Ok(payment)
    }

    /// Returns the recipient address.
    #[must_use]
    pub fn address(&self) -> &RecipientAddress {
        &self.address
    }

    /// Returns the amount, if specified.
    #[must_use]
    pub fn amount(&self) -> Option<Amount> {
        self.amount
    }

    /// Returns the memo, if any.
    #[must_use]
    pub fn memo(&self) -> Option<&MemoBytes> {
        self.memo.as_ref()
    }

    /// Returns the label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&QcharString> {
        self.label.as_ref()
    }

    /// Returns the message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&QcharString> {
        self.message.as_ref()
    }

    /// Returns the extension parameters in the order they were given.
    #[must_use]
    pub fn other_params(&self) -> &[OtherParam] {
        &self.other_params
    }
}

/// A non-empty list of payments on one network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRequest {
    payments: Vec<Payment>,
}

impl PaymentRequest {
    /// Creates a payment request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecipientMissing`] if there are no payments,
    /// [`Error::NetworkMismatchFound`] if the addresses belong to different
    /// networks and [`Error::TooManyPayments`] if there are more than
    /// [`MAX_PAYMENTS`] payments.
    pub fn new(payments: Vec<Payment>) -> Result<Self> {
        let Some(first) = payments.first() else {
            return Err(Error::RecipientMissing(None));
        };
        let network = first.address.network();
        if payments.iter().any(|p| p.address.network() != network) {
            return Err(Error::NetworkMismatchFound);
        }
        if payments.len() > MAX_PAYMENTS {
            return Err(Error::TooManyPayments(payments.len()));
        }
        Ok(Self { payments })
    }

    /// Groups indexed parameters into payments, in ascending index order.
    ///
    /// Duplicates are reported in input order across all groups, before any
    /// group is checked for a missing address.
    pub(crate) fn from_indexed(params: Vec<IndexedParameter>) -> Result<Self> {
        if params.is_empty() {
            return Err(Error::RecipientMissing(None));
        }

        let mut groups: BTreeMap<usize, Vec<Param>> = BTreeMap::new();
        for p in params {
            let group = groups.entry(p.index).or_default();
            if group.iter().any(|q| q.name() == p.param.name()) {
                return Err(Error::DuplicateParameter(
                    p.param.name().to_owned(),
                    optional_index(p.index),
                ));
            }
            group.push(p.param);
        }

        let payments = groups
            .into_iter()
            .map(|(index, params)| Payment::from_params(index, params))
            .collect::<Result<Vec<_>>>()?;
        Self::new(payments)
    }

    /// Parses a payment request from a URI.
    ///
    /// A URI holding only an address gives a request with a single payment
    /// to that address.
    ///
    /// # Errors
    ///
    /// Returns `Err` if parsing fails. See [`parse`](crate::parse).
    pub fn from_uri(s: &str, network: Network) -> Result<Self> {
        crate::parse::parse(s, network, &CharsetValidator).map(ParserResult::into_request)
    }

    /// Parses a payment request from a URI, checking every address with
    /// the given validator.
    ///
    /// # Errors
    ///
    /// Returns `Err` if parsing fails. See [`parse_with`](crate::parse_with).
    pub fn from_uri_with<V: AddressValidator + ?Sized>(
        s: &str,
        network: Network,
        validator: &V,
    ) -> Result<Self> {
        crate::parse::parse(s, network, validator).map(ParserResult::into_request)
    }

    /// Renders the request as a URI.
    #[must_use]
    pub fn to_uri(&self, options: FormattingOptions) -> String {
        Render::new(&self.payments, options).to_string()
    }

    /// Returns the payments.
    #[must_use]
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Consumes the request and yields its payments.
    #[must_use]
    pub fn into_payments(self) -> Vec<Payment> {
        self.payments
    }

    /// Returns the network of the request.
    #[must_use]
    pub fn network(&self) -> Network {
        self.payments[0].address.network()
    }
}

impl TryFrom<Vec<Payment>> for PaymentRequest {
    type Error = Error;

    fn try_from(payments: Vec<Payment>) -> Result<Self> {
        Self::new(payments)
    }
}

/// The outcome of a successful parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParserResult {
    /// A URI holding only an address, such as `zcash:<address>`.
    Legacy(RecipientAddress),
    /// A URI holding query parameters.
    Request(PaymentRequest),
}

impl ParserResult {
    /// Converts the result into a payment request.
    ///
    /// A legacy address becomes a single payment to that address.
    #[must_use]
    pub fn into_request(self) -> PaymentRequest {
        match self {
            Self::Legacy(address) => PaymentRequest {
                payments: vec![Payment::from_address(address)],
            },
            Self::Request(request) => request,
        }
    }

    /// Returns the address if the URI held only an address.
    #[must_use]
    pub fn as_legacy(&self) -> Option<&RecipientAddress> {
        match self {
            Self::Legacy(address) => Some(address),
            Self::Request(_) => None,
        }
    }

    /// Returns the payment request if the URI held query parameters.
    #[must_use]
    pub fn as_request(&self) -> Option<&PaymentRequest> {
        match self {
            Self::Legacy(_) => None,
            Self::Request(request) => Some(request),
        }
    }
}
