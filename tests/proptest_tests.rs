//! Property-based tests for totals arithmetic, rate resolution,
//! the returns reducer and payment canonicalization.

use bijak::core::*;
use bijak::gst;
use bijak::payment::{PaymentInput, transform, validate as validate_payment};
use bijak::returns::{ReturnAction, reduce};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Strategies ──────────────────────────────────────────────────────────────

/// Price between 0.01 and 99999.99, expressed in paise.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1u64..10_000_000u64).prop_map(|paise| Decimal::new(paise as i64, 2))
}

fn arb_quantity() -> impl Strategy<Value = u32> {
    0u32..=500
}

/// One of the rates the GST tables produce.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(dec!(0)),
        Just(dec!(5)),
        Just(dec!(12)),
        Just(dec!(18)),
    ]
}

fn arb_discount() -> impl Strategy<Value = Decimal> {
    (0u32..=100).prop_map(Decimal::from)
}

fn arb_line() -> impl Strategy<Value = LineItem> {
    (arb_quantity(), arb_price(), arb_rate(), arb_discount()).prop_map(
        |(qty, price, rate, discount)| {
            LineItemBuilder::new("Item", qty, price)
                .tax_percent(rate)
                .discount_percent(discount)
                .build()
        },
    )
}

fn arb_mode_entries() -> impl Strategy<Value = Vec<PaymentModeEntry>> {
    prop::collection::vec(
        ("[a-z]{3,8}", arb_price()).prop_map(|(mode, amount)| PaymentModeEntry { mode, amount }),
        1..=4,
    )
}

// ── Totals ──────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn net_equals_subtotal_plus_tax(items in prop::collection::vec(arb_line(), 0..20)) {
        let totals = aggregate(&items);
        prop_assert_eq!(totals.net, totals.subtotal + totals.tax);
        // all figures are at most 2 dp
        prop_assert_eq!(totals.subtotal, totals.subtotal.round_dp(2));
        prop_assert_eq!(totals.tax, totals.tax.round_dp(2));
    }
}

// ── GST resolution ──────────────────────────────────────────────────────────

proptest! {
    /// Rule 1 dominates regardless of name/HSN/category content.
    #[test]
    fn explicit_rate_dominates(
        rate in arb_rate(),
        name in prop_oneof![
            Just("INSULIN INJ"),
            Just("HUMAN BLOOD PLASMA"),
            Just("Face Cream"),
            Just("Unknown item"),
        ],
        hsn in prop::option::of(prop_oneof![Just("3001"), Just("3304"), Just("9018")]),
        category in prop::option::of(prop_oneof![Just("life-saving"), Just("cosmetic")]),
    ) {
        let mut builder = LineItemBuilder::new(name, 1, dec!(10)).tax_percent(rate);
        if let Some(hsn) = hsn {
            builder = builder.hsn_code(hsn);
        }
        if let Some(category) = category {
            builder = builder.category(category);
        }
        let item = builder.build();
        prop_assert_eq!(gst::resolve(&item), rate);
        prop_assert_eq!(gst::suggest(&item).source, gst::RateSource::Explicit);
    }

    /// Resolution is total: any input produces a rate from the known set.
    #[test]
    fn resolution_is_total(name in ".{0,40}", hsn in prop::option::of("[0-9]{0,6}")) {
        let mut builder = LineItemBuilder::new(name, 1, dec!(10));
        if let Some(hsn) = hsn {
            builder = builder.hsn_code(hsn);
        }
        let rate = gst::resolve(&builder.build());
        prop_assert!([dec!(0), dec!(5), dec!(12), dec!(18)].contains(&rate));
    }
}

// ── Returns reducer ─────────────────────────────────────────────────────────

fn single_line_source(quantity: u32, previously_returned: u32) -> SourceDocument {
    SourceDocument {
        id: 1,
        number: "INV-1".into(),
        counterparty_id: Some(1),
        counterparty_name: Some("Counterparty".into()),
        counterparty_gstin: None,
        items: vec![SourceLineItem {
            product_id: Some(1),
            product_name: "Item".into(),
            batch_no: None,
            hsn_code: Some("3004".into()),
            category: None,
            quantity,
            unit_rate: dec!(50),
            tax_percent: Some(dec!(12)),
            previously_returned_quantity: previously_returned,
        }],
    }
}

proptest! {
    /// After any quantity edit: 0 ≤ qty ≤ max_returnable ≤ original, and
    /// selection tracks the quantity.
    #[test]
    fn quantity_edits_respect_bounds(
        sold in 0u32..=50,
        returned in 0u32..=60,
        asked in 0u32..=100,
    ) {
        let doc = ReturnDocument::new(ReturnType::SaleReturn, "SR-000000");
        let doc = reduce(
            &doc,
            ReturnAction::SelectSourceDocument(Some(single_line_source(sold, returned))),
        );
        let doc = reduce(&doc, ReturnAction::UpdateItemQuantity { index: 0, quantity: asked });

        let item = &doc.items[0];
        prop_assert!(item.return_quantity <= item.max_returnable_qty);
        prop_assert!(item.max_returnable_qty <= item.original_quantity);
        prop_assert_eq!(item.selected, item.return_quantity > 0);
        prop_assert_eq!(doc.totals.net, doc.totals.subtotal + doc.totals.tax);
    }

    /// Clearing the selection twice is a no-op the second time.
    #[test]
    fn clearing_selection_is_idempotent(sold in 1u32..=20, asked in 0u32..=30) {
        let doc = ReturnDocument::new(ReturnType::SaleReturn, "SR-000000");
        let doc = reduce(
            &doc,
            ReturnAction::SelectSourceDocument(Some(single_line_source(sold, 0))),
        );
        let doc = reduce(&doc, ReturnAction::UpdateItemQuantity { index: 0, quantity: asked });
        let cleared = reduce(&doc, ReturnAction::SelectSourceDocument(None));
        let cleared_again = reduce(&cleared, ReturnAction::SelectSourceDocument(None));
        prop_assert_eq!(cleared, cleared_again);
    }
}

// ── Payment canonicalization ────────────────────────────────────────────────

proptest! {
    /// Transforming an already-canonical draft loses nothing.
    #[test]
    fn canonical_payment_round_trips(modes in arb_mode_entries(), customer in 1u64..1000) {
        let total: Decimal = modes.iter().map(|m| m.amount).sum();
        let draft = PaymentDraft {
            customer_id: Some(customer),
            payment_type: Some("receipt".into()),
            payment_date: None,
            total_amount: total,
            payment_modes: modes,
            allocations: Vec::new(),
        };
        let again = transform(PaymentInput::MultiMode {
            customer_id: draft.customer_id,
            payment_type: draft.payment_type.clone(),
            payment_date: draft.payment_date,
            total_amount: draft.total_amount,
            payment_modes: draft.payment_modes.clone(),
            allocations: draft.allocations.clone(),
        });
        prop_assert_eq!(&draft, &again);
        // a draft whose total is the exact mode sum always reconciles
        prop_assert!(validate_payment(&draft).is_valid);
    }
}
