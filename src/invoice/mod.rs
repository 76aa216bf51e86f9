//! Invoice payload construction and pre-submission validation.
//!
//! `build` maps a raw draft plus customer reference data into the exact
//! request shape the remote service expects; `validate` then runs the full
//! checklist, accumulating every violation. Submission is only attempted
//! on a clean report.

mod config;

pub use config::{CompanyConfig, load_config, save_config};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{
    Customer, DocumentTotals, InvoiceDraft, ValidationIssue, ValidationReport, aggregate,
    round_half_up,
};
use rust_decimal_macros::dec;

/// Payment terms accepted by the remote service.
pub const ALLOWED_PAYMENT_TERMS: &[&str] = &["cash", "credit", "advance"];

/// Request body for invoice persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayload {
    pub org_id: Option<u64>,
    pub customer_id: Option<u64>,
    pub customer_name: String,
    pub customer_gstin: Option<String>,
    /// Normalized to the last 10 digits, `None` when absent.
    pub customer_phone: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    /// One of [`ALLOWED_PAYMENT_TERMS`], defaulted to "cash".
    pub payment_terms: String,
    pub place_of_supply: Option<String>,
    pub seller_gstin: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_charges: Decimal,
    pub discount_amount: Decimal,
    pub notes: Option<String>,
    pub items: Vec<InvoicePayloadItem>,
    pub totals: DocumentTotals,
}

/// One line of the request body, with fully computed amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayloadItem {
    pub product_id: Option<u64>,
    pub product_name: String,
    pub batch_no: Option<String>,
    pub hsn_code: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub tax_percent: Decimal,
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
    pub line_total: Decimal,
}

/// Normalize raw payment-mode text through the fixed 3-entry table.
/// Unrecognized or missing input falls back to "cash".
pub fn normalize_payment_terms(raw: Option<&str>) -> String {
    let lowered = raw.unwrap_or("").trim().to_lowercase();
    if ALLOWED_PAYMENT_TERMS.contains(&lowered.as_str()) {
        lowered
    } else {
        "cash".to_string()
    }
}

/// Strip separators from a phone number and keep the last 10 digits.
/// Shorter inputs are returned as their bare digits; validation flags them.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() > 10 {
        digits[digits.len() - 10..].to_string()
    } else {
        digits
    }
}

/// Build the canonical request body from a draft, customer reference data
/// and company configuration. Deterministic; never fails — missing values
/// become defaults and are caught by [`validate`].
pub fn build(
    draft: &InvoiceDraft,
    customer: &Customer,
    org_id: u64,
    config: &CompanyConfig,
) -> InvoicePayload {
    let items = draft
        .items
        .iter()
        .map(|item| {
            let base = item.base_amount();
            let rate = item.effective_tax_percent();
            let tax = base * rate / dec!(100);
            InvoicePayloadItem {
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                batch_no: item.batch_no.clone(),
                hsn_code: item.hsn_code.clone(),
                quantity: item.quantity,
                unit_price: item.unit_rate,
                discount_percent: item.discount_percent,
                tax_percent: rate,
                taxable_amount: round_half_up(base, 2),
                tax_amount: round_half_up(tax, 2),
                line_total: round_half_up(base + tax, 2),
            }
        })
        .collect();

    InvoicePayload {
        org_id: Some(org_id),
        customer_id: draft.customer_id.or(customer.id),
        customer_name: customer.name.clone(),
        customer_gstin: customer.gstin.clone(),
        customer_phone: customer.phone.as_deref().map(normalize_phone),
        invoice_date: draft.invoice_date,
        payment_terms: normalize_payment_terms(draft.payment_mode.as_deref()),
        place_of_supply: customer
            .state_code
            .clone()
            .or_else(|| config.default_place_of_supply.clone()),
        seller_gstin: config.gstin.clone(),
        delivery_address: draft.delivery_address.clone(),
        delivery_charges: draft.delivery_charges,
        discount_amount: draft.discount_amount,
        notes: draft.notes.clone(),
        items,
        totals: aggregate(&draft.items),
    }
}

/// Run the pre-submission checklist. All violations are accumulated —
/// the caller gets the complete picture in one pass.
pub fn validate(payload: &InvoicePayload) -> ValidationReport {
    let mut issues = Vec::new();

    if payload.org_id.is_none_or(|id| id == 0) {
        issues.push(ValidationIssue::new(
            "org_id",
            "required",
            "organisation id is required",
        ));
    }

    if payload.customer_id.is_none_or(|id| id == 0) {
        issues.push(ValidationIssue::new(
            "customer_id",
            "required",
            "customer id is required",
        ));
    }

    if payload.invoice_date.is_none() {
        issues.push(ValidationIssue::new(
            "invoice_date",
            "required",
            "invoice date is required",
        ));
    }

    if payload.items.is_empty() {
        issues.push(ValidationIssue::new(
            "items",
            "required",
            "at least one item is required",
        ));
    }

    if !ALLOWED_PAYMENT_TERMS.contains(&payload.payment_terms.as_str()) {
        issues.push(ValidationIssue::new(
            "payment_terms",
            "invalid_value",
            format!(
                "payment terms '{}' not in allowed set {:?}",
                payload.payment_terms, ALLOWED_PAYMENT_TERMS
            ),
        ));
    }

    if let Some(phone) = &payload.customer_phone {
        if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
            issues.push(ValidationIssue::new(
                "customer_phone",
                "phone",
                "phone must be exactly 10 digits",
            ));
        }
    }

    for (i, item) in payload.items.iter().enumerate() {
        let prefix = format!("items[{i}]");

        if item.product_id.is_none_or(|id| id == 0) {
            issues.push(ValidationIssue::new(
                format!("{prefix}.product_id"),
                "required",
                "product id is required",
            ));
        }

        if item.quantity == 0 {
            issues.push(ValidationIssue::new(
                format!("{prefix}.quantity"),
                "positive",
                "quantity must be greater than zero",
            ));
        }

        if item.unit_price.is_sign_negative() {
            issues.push(ValidationIssue::new(
                format!("{prefix}.unit_price"),
                "non_negative",
                "unit price must not be negative",
            ));
        }

        if item.tax_percent.is_sign_negative() {
            issues.push(ValidationIssue::new(
                format!("{prefix}.tax_percent"),
                "non_negative",
                "tax percent must not be negative",
            ));
        }
    }

    ValidationReport::from_issues(issues)
}
