//! Payment normalization and reconciliation checks.
//!
//! Incoming payment input arrives in one of two shapes: a legacy
//! single-mode `{amount, payment_mode}` record or the multi-mode
//! `{total_amount, payment_modes}` record. `transform` canonicalizes both
//! into [`PaymentDraft`]; `validate` then checks the modes reconcile with
//! the declared total.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{
    PaymentAllocation, PaymentDraft, PaymentModeEntry, ValidationIssue, ValidationReport,
    round_half_up,
};

/// Raw payment input as received from the UI or an older client.
///
/// Untagged: the multi-mode variant is tried first, so canonical input
/// deserializes without change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentInput {
    MultiMode {
        customer_id: Option<u64>,
        payment_type: Option<String>,
        payment_date: Option<NaiveDate>,
        total_amount: Decimal,
        payment_modes: Vec<PaymentModeEntry>,
        #[serde(default)]
        allocations: Vec<PaymentAllocation>,
    },
    Legacy {
        customer_id: Option<u64>,
        payment_type: Option<String>,
        payment_date: Option<NaiveDate>,
        amount: Decimal,
        payment_mode: String,
        #[serde(default)]
        allocations: Vec<PaymentAllocation>,
    },
}

/// Canonicalize payment input into the multi-mode shape.
///
/// The legacy shape becomes a one-entry mode list with its amount as the
/// declared total. Already-canonical input passes through unchanged.
pub fn transform(input: PaymentInput) -> PaymentDraft {
    match input {
        PaymentInput::MultiMode {
            customer_id,
            payment_type,
            payment_date,
            total_amount,
            payment_modes,
            allocations,
        } => PaymentDraft {
            customer_id,
            payment_type,
            payment_date,
            total_amount,
            payment_modes,
            allocations,
        },
        PaymentInput::Legacy {
            customer_id,
            payment_type,
            payment_date,
            amount,
            payment_mode,
            allocations,
        } => PaymentDraft {
            customer_id,
            payment_type,
            payment_date,
            total_amount: amount,
            payment_modes: vec![PaymentModeEntry {
                mode: payment_mode,
                amount,
            }],
            allocations,
        },
    }
}

/// Validate a canonical payment draft, accumulating every violation.
///
/// Offending mode entries are reported individually, never silently
/// dropped.
pub fn validate(draft: &PaymentDraft) -> ValidationReport {
    let mut issues = Vec::new();

    if draft.customer_id.is_none_or(|id| id == 0) {
        issues.push(ValidationIssue::new(
            "customer_id",
            "required",
            "customer id is required",
        ));
    }

    if draft.payment_modes.is_empty() {
        issues.push(ValidationIssue::new(
            "payment_modes",
            "required",
            "at least one payment mode entry is required",
        ));
    }

    for (i, entry) in draft.payment_modes.iter().enumerate() {
        let prefix = format!("payment_modes[{i}]");

        if entry.mode.trim().is_empty() {
            issues.push(ValidationIssue::new(
                format!("{prefix}.mode"),
                "required",
                "payment mode must not be empty",
            ));
        }

        if entry.amount <= Decimal::ZERO {
            issues.push(ValidationIssue::new(
                format!("{prefix}.amount"),
                "positive",
                "payment amount must be positive",
            ));
        }
    }

    let mode_total: Decimal = draft.payment_modes.iter().map(|m| m.amount).sum();
    if round_half_up(mode_total, 2) != round_half_up(draft.total_amount, 2) {
        issues.push(ValidationIssue::new(
            "total_amount",
            "total_mismatch",
            format!(
                "mode amounts sum to {} but declared total is {}",
                mode_total, draft.total_amount
            ),
        ));
    }

    ValidationReport::from_issues(issues)
}
