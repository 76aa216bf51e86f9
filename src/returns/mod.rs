//! Returns workflow state machine.
//!
//! The in-progress return document is driven by discrete synchronous
//! actions through a single pure reducer. Every action produces a brand-new
//! document value, so intermediate states stay consistent and an action
//! sequence can be replayed verbatim in tests.
//!
//! Out-of-range quantities are clamped, not rejected — correcting user
//! input silently is a deliberate leniency of this workflow.

use crate::core::{
    MessageKind, ReturnDocument, ReturnLineItem, ReturnPatch, ReturnType, SourceDocument,
    aggregate, generate_return_number, round_half_up,
};
use crate::gst;
use rust_decimal::Decimal;

/// Discrete action applied to a [`ReturnDocument`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnAction {
    /// Switch the return type, discarding the current document and
    /// generating a fresh return number.
    SetReturnType(ReturnType),
    /// Snapshot a source document's counterparty and lines, or clear the
    /// selection with `None`.
    SelectSourceDocument(Option<SourceDocument>),
    /// Edit one line's return quantity. Clamped to the line's maximum
    /// returnable quantity; selection follows the quantity.
    UpdateItemQuantity { index: usize, quantity: u32 },
    /// Flip one line's selection. Deselecting zeroes the quantity;
    /// selecting returns the full remaining quantity.
    ToggleItemSelected(usize),
    /// Set a named free-text field. Known names map onto typed fields,
    /// anything else lands in `extra_fields`.
    SetField { name: String, value: String },
    /// Merge a partial update. No recomputation.
    SetData(ReturnPatch),
    /// Flag an outstanding submission.
    SetSaving(bool),
    SetError { field: String, message: String },
    ClearError(String),
    SetMessage { text: String, kind: MessageKind },
    /// Back to a fresh document of the current type with a new number.
    Reset,
}

/// Apply one action to the document, returning the next state.
pub fn reduce(state: &ReturnDocument, action: ReturnAction) -> ReturnDocument {
    match action {
        ReturnAction::SetReturnType(return_type) => {
            ReturnDocument::new(return_type, generate_return_number(return_type))
        }

        ReturnAction::Reset => ReturnDocument::new(
            state.return_type,
            generate_return_number(state.return_type),
        ),

        ReturnAction::SelectSourceDocument(source) => {
            let mut next = state.clone();
            match source {
                Some(doc) => {
                    next.source_document_id = Some(doc.id);
                    next.source_document_number = Some(doc.number);
                    next.counterparty_id = doc.counterparty_id;
                    next.counterparty_name = doc.counterparty_name;
                    next.counterparty_gstin = doc.counterparty_gstin;
                    next.items = doc.items.iter().map(return_line_from_source).collect();
                }
                None => {
                    next.source_document_id = None;
                    next.source_document_number = None;
                    next.counterparty_id = None;
                    next.counterparty_name = None;
                    next.counterparty_gstin = None;
                    next.items.clear();
                }
            }
            recompute_totals(&mut next);
            next
        }

        ReturnAction::UpdateItemQuantity { index, quantity } => {
            let mut next = state.clone();
            if let Some(item) = next.items.get_mut(index) {
                let quantity = quantity.min(item.max_returnable_qty);
                item.return_quantity = quantity;
                item.selected = quantity > 0;
                item.return_amount =
                    round_half_up(Decimal::from(quantity) * item.unit_rate, 2);
                recompute_totals(&mut next);
            }
            next
        }

        ReturnAction::ToggleItemSelected(index) => {
            let mut next = state.clone();
            if let Some(item) = next.items.get_mut(index) {
                let quantity = if item.selected {
                    0
                } else {
                    item.max_returnable_qty
                };
                item.return_quantity = quantity;
                item.selected = quantity > 0;
                item.return_amount =
                    round_half_up(Decimal::from(quantity) * item.unit_rate, 2);
                recompute_totals(&mut next);
            }
            next
        }

        ReturnAction::SetField { name, value } => {
            let mut next = state.clone();
            match name.as_str() {
                "reason" => next.reason = value,
                "counterparty_name" => next.counterparty_name = Some(value),
                "counterparty_gstin" => next.counterparty_gstin = Some(value),
                _ => {
                    next.extra_fields.insert(name, value);
                }
            }
            next
        }

        ReturnAction::SetData(patch) => {
            let mut next = state.clone();
            if let Some(reason) = patch.reason {
                next.reason = reason;
            }
            if let Some(id) = patch.counterparty_id {
                next.counterparty_id = Some(id);
            }
            if let Some(name) = patch.counterparty_name {
                next.counterparty_name = Some(name);
            }
            if let Some(gstin) = patch.counterparty_gstin {
                next.counterparty_gstin = Some(gstin);
            }
            if let Some(step) = patch.step {
                next.step = step;
            }
            next
        }

        ReturnAction::SetSaving(saving) => {
            let mut next = state.clone();
            next.saving = saving;
            next
        }

        ReturnAction::SetError { field, message } => {
            let mut next = state.clone();
            next.field_errors.insert(field, message);
            next
        }

        ReturnAction::ClearError(field) => {
            let mut next = state.clone();
            next.field_errors.remove(&field);
            next
        }

        ReturnAction::SetMessage { text, kind } => {
            let mut next = state.clone();
            next.message = Some(crate::core::StatusMessage { text, kind });
            next
        }
    }
}

fn return_line_from_source(line: &crate::core::SourceLineItem) -> ReturnLineItem {
    ReturnLineItem {
        product_id: line.product_id,
        product_name: line.product_name.clone(),
        batch_no: line.batch_no.clone(),
        hsn_code: line.hsn_code.clone(),
        unit_rate: line.unit_rate,
        tax_percent: gst::resolve(line),
        original_quantity: line.quantity,
        previously_returned_quantity: line.previously_returned_quantity,
        max_returnable_qty: line.max_returnable_qty(),
        return_quantity: 0,
        selected: false,
        return_amount: Decimal::ZERO,
    }
}

fn recompute_totals(doc: &mut ReturnDocument) {
    let selected: Vec<&ReturnLineItem> = doc
        .items
        .iter()
        .filter(|item| item.selected && item.return_quantity > 0)
        .collect();
    doc.totals = aggregate(selected);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SourceDocument, SourceLineItem};
    use rust_decimal_macros::dec;

    fn source_line(name: &str, qty: u32, rate: Decimal, returned: u32) -> SourceLineItem {
        SourceLineItem {
            product_id: Some(7),
            product_name: name.into(),
            batch_no: Some("B24119".into()),
            hsn_code: Some("3004".into()),
            category: None,
            quantity: qty,
            unit_rate: rate,
            tax_percent: Some(dec!(12)),
            previously_returned_quantity: returned,
        }
    }

    fn source_doc() -> SourceDocument {
        SourceDocument {
            id: 101,
            number: "INV-2024-0042".into(),
            counterparty_id: Some(9),
            counterparty_name: Some("Sharma Medicals".into()),
            counterparty_gstin: Some("27AABCS1429B1ZB".into()),
            items: vec![
                source_line("Amoxycillin 250", 10, dec!(50), 2),
                source_line("Cough Syrup 100ml", 5, dec!(80), 0),
            ],
        }
    }

    fn fresh() -> ReturnDocument {
        ReturnDocument::new(ReturnType::SaleReturn, "SR-000001")
    }

    #[test]
    fn set_return_type_produces_fresh_numbered_document() {
        let doc = reduce(&fresh(), ReturnAction::SetReturnType(ReturnType::PurchaseReturn));
        assert!(doc.return_number.starts_with("DN-"));
        assert_eq!(doc.step, 1);
        assert!(doc.items.is_empty());
        assert!(doc.source_document_id.is_none());
    }

    #[test]
    fn select_source_copies_counterparty_and_maps_lines() {
        let doc = reduce(&fresh(), ReturnAction::SelectSourceDocument(Some(source_doc())));
        assert_eq!(doc.source_document_number.as_deref(), Some("INV-2024-0042"));
        assert_eq!(doc.counterparty_name.as_deref(), Some("Sharma Medicals"));
        assert_eq!(doc.items.len(), 2);
        let first = &doc.items[0];
        assert_eq!(first.original_quantity, 10);
        assert_eq!(first.max_returnable_qty, 8);
        assert_eq!(first.return_quantity, 0);
        assert!(!first.selected);
        assert_eq!(doc.totals.net, dec!(0));
    }

    #[test]
    fn select_none_clears_and_is_idempotent() {
        let selected = reduce(&fresh(), ReturnAction::SelectSourceDocument(Some(source_doc())));
        let cleared = reduce(&selected, ReturnAction::SelectSourceDocument(None));
        assert!(cleared.items.is_empty());
        assert!(cleared.counterparty_id.is_none());
        assert!(cleared.counterparty_name.is_none());

        let cleared_again = reduce(&cleared, ReturnAction::SelectSourceDocument(None));
        assert_eq!(cleared, cleared_again);
    }

    #[test]
    fn quantity_clamps_to_max_returnable() {
        let doc = reduce(&fresh(), ReturnAction::SelectSourceDocument(Some(source_doc())));
        // 10 sold, 2 already returned — 8 is the ceiling, not 10.
        let doc = reduce(&doc, ReturnAction::UpdateItemQuantity { index: 0, quantity: 12 });
        assert_eq!(doc.items[0].return_quantity, 8);
        assert!(doc.items[0].selected);
        assert_eq!(doc.items[0].return_amount, dec!(400.00));
    }

    #[test]
    fn zero_quantity_deselects() {
        let doc = reduce(&fresh(), ReturnAction::SelectSourceDocument(Some(source_doc())));
        let doc = reduce(&doc, ReturnAction::UpdateItemQuantity { index: 0, quantity: 4 });
        let doc = reduce(&doc, ReturnAction::UpdateItemQuantity { index: 0, quantity: 0 });
        assert!(!doc.items[0].selected);
        assert_eq!(doc.items[0].return_amount, dec!(0));
        assert_eq!(doc.totals.net, dec!(0));
    }

    #[test]
    fn quantity_edit_recomputes_document_totals() {
        let doc = reduce(&fresh(), ReturnAction::SelectSourceDocument(Some(source_doc())));
        let doc = reduce(&doc, ReturnAction::UpdateItemQuantity { index: 0, quantity: 4 });
        let doc = reduce(&doc, ReturnAction::UpdateItemQuantity { index: 1, quantity: 2 });
        // 4×50 + 2×80 = 360 @ 12% → 43.20
        assert_eq!(doc.totals.subtotal, dec!(360.00));
        assert_eq!(doc.totals.tax, dec!(43.20));
        assert_eq!(doc.totals.net, dec!(403.20));
    }

    #[test]
    fn toggle_selects_full_remaining_quantity() {
        let doc = reduce(&fresh(), ReturnAction::SelectSourceDocument(Some(source_doc())));
        let doc = reduce(&doc, ReturnAction::ToggleItemSelected(0));
        assert!(doc.items[0].selected);
        assert_eq!(doc.items[0].return_quantity, 8);

        let doc = reduce(&doc, ReturnAction::ToggleItemSelected(0));
        assert!(!doc.items[0].selected);
        assert_eq!(doc.items[0].return_quantity, 0);
    }

    #[test]
    fn out_of_range_index_is_a_no_op() {
        let doc = reduce(&fresh(), ReturnAction::SelectSourceDocument(Some(source_doc())));
        let same = reduce(&doc, ReturnAction::UpdateItemQuantity { index: 99, quantity: 3 });
        assert_eq!(doc, same);
    }

    #[test]
    fn set_field_routes_known_and_unknown_names() {
        let doc = reduce(
            &fresh(),
            ReturnAction::SetField { name: "reason".into(), value: "expired stock".into() },
        );
        assert_eq!(doc.reason, "expired stock");

        let doc = reduce(
            &doc,
            ReturnAction::SetField { name: "vehicle_no".into(), value: "MH12AB1234".into() },
        );
        assert_eq!(doc.extra_fields.get("vehicle_no").map(String::as_str), Some("MH12AB1234"));
    }

    #[test]
    fn ui_state_actions_have_no_business_effect() {
        let doc = reduce(&fresh(), ReturnAction::SelectSourceDocument(Some(source_doc())));
        let doc = reduce(&doc, ReturnAction::UpdateItemQuantity { index: 0, quantity: 3 });
        let before_totals = doc.totals.clone();

        let doc = reduce(&doc, ReturnAction::SetSaving(true));
        let doc = reduce(
            &doc,
            ReturnAction::SetError { field: "reason".into(), message: "required".into() },
        );
        let doc = reduce(
            &doc,
            ReturnAction::SetMessage { text: "saving…".into(), kind: MessageKind::Info },
        );
        assert!(doc.saving);
        assert_eq!(doc.field_errors.get("reason").map(String::as_str), Some("required"));
        assert_eq!(doc.totals, before_totals);

        let doc = reduce(&doc, ReturnAction::ClearError("reason".into()));
        assert!(doc.field_errors.is_empty());
    }

    #[test]
    fn reset_keeps_type_and_renumbers() {
        let doc = reduce(&fresh(), ReturnAction::SelectSourceDocument(Some(source_doc())));
        let doc = reduce(&doc, ReturnAction::Reset);
        assert_eq!(doc.return_type, ReturnType::SaleReturn);
        assert!(doc.return_number.starts_with("SR-"));
        assert!(doc.items.is_empty());
        assert_eq!(doc.step, 1);
    }
}
