//! Rendering payment requests as URI text.

use crate::{address::RecipientAddress, payment::Payment, PaymentRequest};
use core::fmt;

/// The scheme with its colon, starting every payment URI.
pub(crate) const SCHEME_PREFIX: &str = "zcash:";

/// Controls how payment indices appear in a rendered URI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormattingOptions {
    /// Numbers every payment from 1, as in `zcash:?address.1=...`.
    #[default]
    EnumerateAllPayments,
    /// Leaves the first payment unindexed and numbers the rest from 1.
    UseEmptyParamIndex {
        /// Writes the first address right after the scheme, as in
        /// `zcash:<address>?amount=...`, instead of as an `address` parameter.
        omit_address_label: bool,
    },
}

impl FormattingOptions {
    fn index_of(self, position: usize) -> usize {
        match self {
            Self::EnumerateAllPayments => position + 1,
            Self::UseEmptyParamIndex { .. } => position,
        }
    }

    fn bare_first_address(self) -> bool {
        matches!(
            self,
            Self::UseEmptyParamIndex {
                omit_address_label: true
            }
        )
    }
}

/// Writes payments as a URI through `fmt::Display`.
///
/// Parameters of each payment are written in a fixed order: address,
/// amount, memo, label, message and then extensions.
pub(crate) struct Render<'a> {
    payments: &'a [Payment],
    options: FormattingOptions,
}

impl<'a> Render<'a> {
    pub(crate) fn new(payments: &'a [Payment], options: FormattingOptions) -> Self {
        tracing::trace!(payments = payments.len(), ?options, "rendering payment URI");
        Self { payments, options }
    }
}

/// Writes `?` before the first parameter and `&` before every other one.
struct Params<'a, 'f> {
    f: &'a mut fmt::Formatter<'f>,
    started: bool,
}

impl Params<'_, '_> {
    fn write(&mut self, name: &str, index: usize, value: Option<&dyn fmt::Display>) -> fmt::Result {
        self.f
            .write_str(if self.started { "&" } else { "?" })?;
        self.started = true;

        self.f.write_str(name)?;
        if index != 0 {
            write!(self.f, ".{index}")?;
        }
        if let Some(value) = value {
            write!(self.f, "={value}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SCHEME_PREFIX)?;

        let mut payments = self.payments.iter().enumerate();
        let mut bare = None;
        if self.options.bare_first_address() {
            if let Some((_, first)) = payments.next() {
                f.write_str(first.address().as_str())?;
                bare = Some(first);
            }
        }

        let mut params = Params { f, started: false };
        if let Some(first) = bare {
            write_fields(&mut params, first, 0)?;
        }
        for (position, payment) in payments {
            let index = self.options.index_of(position);
            params.write("address", index, Some(&payment.address().as_str()))?;
            write_fields(&mut params, payment, index)?;
        }
        Ok(())
    }
}

/// Writes every parameter of a payment except its address.
fn write_fields(params: &mut Params<'_, '_>, payment: &Payment, index: usize) -> fmt::Result {
    if let Some(amount) = payment.amount() {
        params.write("amount", index, Some(&amount))?;
    }
    if let Some(memo) = payment.memo() {
        params.write("memo", index, Some(memo))?;
    }
    if let Some(label) = payment.label() {
        params.write("label", index, Some(label))?;
    }
    if let Some(message) = payment.message() {
        params.write("message", index, Some(message))?;
    }
    for other in payment.other_params() {
        params.write(
            other.key().as_str(),
            index,
            other.value().map(|v| v as &dyn fmt::Display),
        )?;
    }
    Ok(())
}

pub(crate) fn render_address(address: &RecipientAddress, options: FormattingOptions) -> String {
    if options.bare_first_address() {
        format!("{SCHEME_PREFIX}{address}")
    } else {
        format!("{SCHEME_PREFIX}?address={address}")
    }
}

impl fmt::Display for PaymentRequest {
    /// Writes the request with [`FormattingOptions::EnumerateAllPayments`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(
            &Render::new(self.payments(), FormattingOptions::default()),
            f,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, Network};

    fn payment(addr: &str, zatoshis: Option<u64>) -> Payment {
        let addr = RecipientAddress::new(addr, Network::Testnet).unwrap();
        let amount = zatoshis.map(|z| Amount::from_zatoshis(z).unwrap());
        Payment::new(addr, amount, None, None, None, vec![]).unwrap()
    }

    #[test]
    fn index_placement() {
        let payments = [
            payment("tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU", Some(100_000_000)),
            payment("t26YoyZ1iPgiMEWL4zGUm74eVWfhyDMXzY2", None),
        ];
        let render = |options| Render::new(&payments, options).to_string();

        assert_eq!(
            render(FormattingOptions::EnumerateAllPayments),
            "zcash:?address.1=tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU&amount.1=1\
             &address.2=t26YoyZ1iPgiMEWL4zGUm74eVWfhyDMXzY2"
        );
        assert_eq!(
            render(FormattingOptions::UseEmptyParamIndex {
                omit_address_label: false
            }),
            "zcash:?address=tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU&amount=1\
             &address.1=t26YoyZ1iPgiMEWL4zGUm74eVWfhyDMXzY2"
        );
        assert_eq!(
            render(FormattingOptions::UseEmptyParamIndex {
                omit_address_label: true
            }),
            "zcash:tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU?amount=1\
             &address.1=t26YoyZ1iPgiMEWL4zGUm74eVWfhyDMXzY2"
        );
    }

    #[test]
    fn bare_address_without_params() {
        let payments = [payment("tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU", None)];
        let options = FormattingOptions::UseEmptyParamIndex {
            omit_address_label: true,
        };
        assert_eq!(
            Render::new(&payments, options).to_string(),
            "zcash:tmEZhbWHTpdKMw5it8YDspUXSMGQyFwovpU"
        );
    }
}
