//! Totals aggregation shared by invoices and returns.
//!
//! Subtotal and tax are summed unrounded and rounded half-up once at the
//! aggregate level. Per-line rounding would compound differently and break
//! parity with stored figures, so it is deliberately not done here.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{DocumentTotals, LineItem, ReturnLineItem};

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Anything that contributes a taxable base at some GST rate.
pub trait Taxable {
    /// Unrounded taxable base of this line.
    fn base_amount(&self) -> Decimal;
    /// GST rate applied to the base.
    fn tax_percent(&self) -> Decimal;
}

impl Taxable for LineItem {
    fn base_amount(&self) -> Decimal {
        LineItem::base_amount(self)
    }

    fn tax_percent(&self) -> Decimal {
        self.effective_tax_percent()
    }
}

impl Taxable for ReturnLineItem {
    fn base_amount(&self) -> Decimal {
        Decimal::from(self.return_quantity) * self.unit_rate
    }

    fn tax_percent(&self) -> Decimal {
        self.tax_percent
    }
}

/// Aggregate a list of lines into document totals.
///
/// `net` is computed from the already-rounded subtotal and tax, so
/// `net == subtotal + tax` holds exactly on the result.
///
/// ```
/// use bijak::core::{aggregate, LineItemBuilder};
/// use rust_decimal_macros::dec;
///
/// let items = vec![LineItemBuilder::new("Paracetamol 500mg", 10, dec!(100))
///     .tax_percent(dec!(12))
///     .build()];
/// let totals = aggregate(&items);
/// assert_eq!(totals.subtotal, dec!(1000.00));
/// assert_eq!(totals.tax, dec!(120.00));
/// assert_eq!(totals.net, dec!(1120.00));
/// ```
pub fn aggregate<'a, T, I>(items: I) -> DocumentTotals
where
    T: Taxable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut subtotal = Decimal::ZERO;
    let mut tax = Decimal::ZERO;

    for item in items {
        let base = item.base_amount();
        subtotal += base;
        tax += base * item.tax_percent() / dec!(100);
    }

    let subtotal = round_half_up(subtotal, 2);
    let tax = round_half_up(tax, 2);

    DocumentTotals {
        subtotal,
        tax,
        net: subtotal + tax,
    }
}
