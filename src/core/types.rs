use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::totals::round_half_up;

/// A single line of a sales/purchase document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product reference (remote service primary key).
    pub product_id: Option<u64>,
    /// Display name as printed on the document.
    pub product_name: String,
    /// Batch reference — pharmaceutical lots are tracked per batch.
    pub batch_no: Option<String>,
    /// HSN commodity classification code (e.g. "3004").
    pub hsn_code: Option<String>,
    /// Free-text product category (e.g. "Life-saving drugs").
    pub category: Option<String>,
    /// Quantity in pack units.
    pub quantity: u32,
    /// Net unit rate.
    pub unit_rate: Decimal,
    /// Explicit GST override. `None` resolves through the rate tables;
    /// `Some(0)` is a deliberate nil rate, not a missing value.
    pub tax_percent: Option<Decimal>,
    /// Legacy per-product rate carried by older stock records.
    pub legacy_tax_rate: Option<Decimal>,
    /// Line discount percentage (0 when absent).
    pub discount_percent: Decimal,
    /// Discounted taxable base. Set by [`LineItem::compute_amounts`].
    pub taxable_amount: Option<Decimal>,
    /// GST amount on the taxable base. Set by [`LineItem::compute_amounts`].
    pub tax_amount: Option<Decimal>,
    /// Taxable base + GST, rounded half-up to 2 dp.
    /// Set by [`LineItem::compute_amounts`].
    pub line_total: Option<Decimal>,
}

impl LineItem {
    /// Effective GST rate for arithmetic: explicit override, then the
    /// legacy product rate, then the standard medicament rate.
    pub fn effective_tax_percent(&self) -> Decimal {
        self.tax_percent
            .or(self.legacy_tax_rate)
            .unwrap_or(crate::gst::STANDARD_RATE)
    }

    /// Discounted taxable base before rounding.
    pub fn base_amount(&self) -> Decimal {
        Decimal::from(self.quantity)
            * self.unit_rate
            * (dec!(1) - self.discount_percent / dec!(100))
    }

    /// Recompute `taxable_amount`, `tax_amount` and `line_total`.
    ///
    /// `line_total` is rounded from the unrounded base + tax so that
    /// `line_total = base * (1 + rate/100)` holds before rounding.
    pub fn compute_amounts(&mut self) {
        let base = self.base_amount();
        let tax = base * self.effective_tax_percent() / dec!(100);
        self.taxable_amount = Some(round_half_up(base, 2));
        self.tax_amount = Some(round_half_up(tax, 2));
        self.line_total = Some(round_half_up(base + tax, 2));
    }
}

/// A line of an in-progress return, derived from a source document line.
///
/// `selected` and `return_quantity` are kept synchronized: a line is
/// selected exactly when its return quantity is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnLineItem {
    pub product_id: Option<u64>,
    pub product_name: String,
    pub batch_no: Option<String>,
    pub hsn_code: Option<String>,
    pub unit_rate: Decimal,
    /// Effective GST rate copied from the source line at selection time.
    pub tax_percent: Decimal,
    /// Quantity on the originating document. Immutable once captured.
    pub original_quantity: u32,
    /// Quantity already returned against the source line.
    pub previously_returned_quantity: u32,
    /// `original_quantity - previously_returned_quantity` — the enforced
    /// upper bound for `return_quantity`.
    pub max_returnable_qty: u32,
    /// User-edited quantity, clamped to `[0, max_returnable_qty]`.
    pub return_quantity: u32,
    pub selected: bool,
    /// `return_quantity * unit_rate`, rounded to 2 dp.
    pub return_amount: Decimal,
}

/// Document type of a return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnType {
    /// Customer returns goods against a sales invoice (credit note side).
    SaleReturn,
    /// Goods returned to a supplier (debit note side).
    PurchaseReturn,
}

impl ReturnType {
    /// Prefix of the generated return number.
    pub fn number_prefix(&self) -> &'static str {
        match self {
            Self::SaleReturn => "SR-",
            Self::PurchaseReturn => "DN-",
        }
    }
}

/// Kind of a transient status message shown by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Transient status message attached to a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

/// The in-progress return document owned by a single UI session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnDocument {
    pub return_type: ReturnType,
    /// Human-readable number, e.g. "SR-483920".
    pub return_number: String,
    /// Originating document reference, set by source selection.
    pub source_document_id: Option<u64>,
    pub source_document_number: Option<String>,
    pub counterparty_id: Option<u64>,
    pub counterparty_name: Option<String>,
    pub counterparty_gstin: Option<String>,
    pub items: Vec<ReturnLineItem>,
    pub totals: DocumentTotals,
    /// Free-text return reason.
    pub reason: String,
    /// Workflow step ordinal, starting at 1.
    pub step: u8,
    /// Free-form fields the UI merges in without business effect.
    pub extra_fields: BTreeMap<String, String>,
    /// True while a submission is outstanding.
    pub saving: bool,
    pub field_errors: BTreeMap<String, String>,
    pub message: Option<StatusMessage>,
}

impl ReturnDocument {
    /// A fresh, empty document of the given type and number.
    pub fn new(return_type: ReturnType, return_number: impl Into<String>) -> Self {
        Self {
            return_type,
            return_number: return_number.into(),
            source_document_id: None,
            source_document_number: None,
            counterparty_id: None,
            counterparty_name: None,
            counterparty_gstin: None,
            items: Vec::new(),
            totals: DocumentTotals::default(),
            reason: String::new(),
            step: 1,
            extra_fields: BTreeMap::new(),
            saving: false,
            field_errors: BTreeMap::new(),
            message: None,
        }
    }
}

/// Partial update merged into a [`ReturnDocument`] by `SetData`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnPatch {
    pub reason: Option<String>,
    pub counterparty_id: Option<u64>,
    pub counterparty_name: Option<String>,
    pub counterparty_gstin: Option<String>,
    pub step: Option<u8>,
}

/// Snapshot of an originating document offered for return selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: u64,
    pub number: String,
    pub counterparty_id: Option<u64>,
    pub counterparty_name: Option<String>,
    pub counterparty_gstin: Option<String>,
    pub items: Vec<SourceLineItem>,
}

/// A line of a source document as delivered by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLineItem {
    pub product_id: Option<u64>,
    pub product_name: String,
    pub batch_no: Option<String>,
    pub hsn_code: Option<String>,
    pub category: Option<String>,
    pub quantity: u32,
    pub unit_rate: Decimal,
    pub tax_percent: Option<Decimal>,
    pub previously_returned_quantity: u32,
}

impl SourceLineItem {
    /// Remaining returnable quantity.
    pub fn max_returnable_qty(&self) -> u32 {
        self.quantity
            .saturating_sub(self.previously_returned_quantity)
    }
}

/// Aggregate document totals: subtotal, tax and net.
///
/// All three figures are rounded at the aggregate level, never per line,
/// and `net == subtotal + tax` holds exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
}

/// Counterparty reference data supplied to the payload builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<u64>,
    pub name: String,
    pub gstin: Option<String>,
    pub phone: Option<String>,
    pub state_code: Option<String>,
    pub address: Option<String>,
}

/// Raw in-memory invoice/order draft owned by the UI session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub customer_id: Option<u64>,
    pub invoice_date: Option<NaiveDate>,
    /// Raw payment mode text; normalized during payload construction.
    pub payment_mode: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_charges: Decimal,
    pub discount_amount: Decimal,
    pub notes: Option<String>,
    pub items: Vec<LineItem>,
}

/// One mode entry of a payment (e.g. cash 600, UPI 400).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentModeEntry {
    pub mode: String,
    pub amount: Decimal,
}

/// Allocation of a payment against an outstanding invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAllocation {
    pub invoice_id: u64,
    pub amount: Decimal,
}

/// Canonical multi-mode payment shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub customer_id: Option<u64>,
    pub payment_type: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub total_amount: Decimal,
    pub payment_modes: Vec<PaymentModeEntry>,
    pub allocations: Vec<PaymentAllocation>,
}
