use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::*;

/// Builder for [`LineItem`].
///
/// ```
/// use bijak::core::LineItemBuilder;
/// use rust_decimal_macros::dec;
///
/// let item = LineItemBuilder::new("Insulin Inj 40IU", 5, dec!(320))
///     .hsn_code("3004")
///     .batch_no("B24071")
///     .build();
/// assert_eq!(item.quantity, 5);
/// ```
pub struct LineItemBuilder {
    product_id: Option<u64>,
    product_name: String,
    batch_no: Option<String>,
    hsn_code: Option<String>,
    category: Option<String>,
    quantity: u32,
    unit_rate: Decimal,
    tax_percent: Option<Decimal>,
    legacy_tax_rate: Option<Decimal>,
    discount_percent: Decimal,
}

impl LineItemBuilder {
    pub fn new(product_name: impl Into<String>, quantity: u32, unit_rate: Decimal) -> Self {
        Self {
            product_id: None,
            product_name: product_name.into(),
            batch_no: None,
            hsn_code: None,
            category: None,
            quantity,
            unit_rate,
            tax_percent: None,
            legacy_tax_rate: None,
            discount_percent: Decimal::ZERO,
        }
    }

    pub fn product_id(mut self, id: u64) -> Self {
        self.product_id = Some(id);
        self
    }

    pub fn batch_no(mut self, batch: impl Into<String>) -> Self {
        self.batch_no = Some(batch.into());
        self
    }

    pub fn hsn_code(mut self, code: impl Into<String>) -> Self {
        self.hsn_code = Some(code.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Explicit GST override — wins over every rate table.
    pub fn tax_percent(mut self, percent: Decimal) -> Self {
        self.tax_percent = Some(percent);
        self
    }

    pub fn legacy_tax_rate(mut self, rate: Decimal) -> Self {
        self.legacy_tax_rate = Some(rate);
        self
    }

    pub fn discount_percent(mut self, percent: Decimal) -> Self {
        self.discount_percent = percent;
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            product_id: self.product_id,
            product_name: self.product_name,
            batch_no: self.batch_no,
            hsn_code: self.hsn_code,
            category: self.category,
            quantity: self.quantity,
            unit_rate: self.unit_rate,
            tax_percent: self.tax_percent,
            legacy_tax_rate: self.legacy_tax_rate,
            discount_percent: self.discount_percent,
            taxable_amount: None,
            tax_amount: None,
            line_total: None,
        }
    }
}

/// Builder for [`InvoiceDraft`].
pub struct InvoiceDraftBuilder {
    customer_id: Option<u64>,
    invoice_date: Option<NaiveDate>,
    payment_mode: Option<String>,
    delivery_address: Option<String>,
    delivery_charges: Decimal,
    discount_amount: Decimal,
    notes: Option<String>,
    items: Vec<LineItem>,
}

impl InvoiceDraftBuilder {
    pub fn new() -> Self {
        Self {
            customer_id: None,
            invoice_date: None,
            payment_mode: None,
            delivery_address: None,
            delivery_charges: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            notes: None,
            items: Vec::new(),
        }
    }

    pub fn customer_id(mut self, id: u64) -> Self {
        self.customer_id = Some(id);
        self
    }

    pub fn invoice_date(mut self, date: NaiveDate) -> Self {
        self.invoice_date = Some(date);
        self
    }

    pub fn payment_mode(mut self, mode: impl Into<String>) -> Self {
        self.payment_mode = Some(mode.into());
        self
    }

    pub fn delivery_address(mut self, address: impl Into<String>) -> Self {
        self.delivery_address = Some(address.into());
        self
    }

    pub fn delivery_charges(mut self, charges: Decimal) -> Self {
        self.delivery_charges = charges;
        self
    }

    pub fn discount_amount(mut self, discount: Decimal) -> Self {
        self.discount_amount = discount;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn build(self) -> InvoiceDraft {
        InvoiceDraft {
            customer_id: self.customer_id,
            invoice_date: self.invoice_date,
            payment_mode: self.payment_mode,
            delivery_address: self.delivery_address,
            delivery_charges: self.delivery_charges,
            discount_amount: self.discount_amount,
            notes: self.notes,
            items: self.items,
        }
    }
}

impl Default for InvoiceDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}
