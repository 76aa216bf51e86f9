//! GST rate resolution for pharmaceutical line items.
//!
//! Resolution is a total function over a fixed precedence chain:
//! explicit override → product-name keyword → HSN code → category keyword
//! → standard medicament rate. First match wins; table declaration order
//! is the tie-breaker and must not be reordered.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::{LineItem, SourceLineItem};

/// Standard medicament rate (HSN chapter 30 default).
pub const STANDARD_RATE: Decimal = dec!(12);
/// Rate for life-saving / essential medicines.
pub const ESSENTIAL_RATE: Decimal = dec!(5);
/// Rate for medical devices and equipment.
pub const DEVICE_RATE: Decimal = dec!(12);
/// Rate for cosmetics and toiletries sold alongside medicines.
pub const COSMETIC_RATE: Decimal = dec!(18);
/// Nil rate — exempt supplies such as human blood.
pub const NIL_RATE: Decimal = dec!(0);

/// Product-name keywords checked by case-insensitive substring match.
/// Declaration order is the match order.
const NAME_KEYWORD_RATES: &[(&str, Decimal)] = &[
    ("INSULIN", ESSENTIAL_RATE),
    ("VACCINE", ESSENTIAL_RATE),
    ("ORS", ESSENTIAL_RATE),
    ("OXYGEN", ESSENTIAL_RATE),
    ("ARTEMISININ", ESSENTIAL_RATE),
    ("HUMAN BLOOD", NIL_RATE),
    ("CONTRACEPTIVE", NIL_RATE),
    ("SANITIZER", COSMETIC_RATE),
];

/// HSN classification code → rate, matched exactly.
const HSN_RATES: &[(&str, Decimal)] = &[
    ("3001", ESSENTIAL_RATE),
    ("3002", ESSENTIAL_RATE),
    ("3003", STANDARD_RATE),
    ("3004", STANDARD_RATE),
    ("3005", STANDARD_RATE),
    ("3006", STANDARD_RATE),
    ("9018", DEVICE_RATE),
    ("9021", ESSENTIAL_RATE),
    ("3304", COSMETIC_RATE),
    ("3306", COSMETIC_RATE),
    ("3307", COSMETIC_RATE),
];

/// Category keywords checked by case-insensitive substring match.
const CATEGORY_RATES: &[(&str, Decimal)] = &[
    ("life-saving", ESSENTIAL_RATE),
    ("essential", ESSENTIAL_RATE),
    ("device", DEVICE_RATE),
    ("equipment", DEVICE_RATE),
    ("cosmetic", COSMETIC_RATE),
];

/// The fields rate resolution looks at. Implemented by both invoice lines
/// and source-document lines so returns reuse the same tables.
pub trait TaxProfile {
    /// Explicit rate override carried by the item, if any.
    /// `Some(0)` is a real override, not a missing value.
    fn explicit_tax_percent(&self) -> Option<Decimal>;
    fn product_name(&self) -> &str;
    fn hsn_code(&self) -> Option<&str>;
    fn category(&self) -> Option<&str>;
}

impl TaxProfile for LineItem {
    fn explicit_tax_percent(&self) -> Option<Decimal> {
        self.tax_percent
    }

    fn product_name(&self) -> &str {
        &self.product_name
    }

    fn hsn_code(&self) -> Option<&str> {
        self.hsn_code.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl TaxProfile for SourceLineItem {
    fn explicit_tax_percent(&self) -> Option<Decimal> {
        self.tax_percent
    }

    fn product_name(&self) -> &str {
        &self.product_name
    }

    fn hsn_code(&self) -> Option<&str> {
        self.hsn_code.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Which precedence rule produced a resolved rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Rule 1 — explicit override on the item.
    Explicit,
    /// Rule 2 — product-name keyword table.
    NameKeyword,
    /// Rule 3 — HSN code table.
    HsnCode,
    /// Rule 4 — category keyword table.
    Category,
    /// Rule 5 — standard medicament fallback.
    Default,
}

impl RateSource {
    /// Short display label for the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Explicit => "explicit rate on item",
            Self::NameKeyword => "product name match",
            Self::HsnCode => "HSN code",
            Self::Category => "category match",
            Self::Default => "standard medicament rate",
        }
    }
}

/// A resolved rate with provenance, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSuggestion {
    pub rate: Decimal,
    pub source: RateSource,
    /// Rate at or below the essential-medicine threshold.
    pub is_essential: bool,
    /// Nil-rated items need a supervisor sign-off before billing.
    pub requires_approval: bool,
}

/// Resolve the GST rate for an item. Total and deterministic — always
/// returns a rate, never fails.
pub fn resolve<T: TaxProfile>(item: &T) -> Decimal {
    resolve_with_source(item).0
}

/// Resolve the rate and report which rule fired, plus display flags.
pub fn suggest<T: TaxProfile>(item: &T) -> RateSuggestion {
    let (rate, source) = resolve_with_source(item);
    RateSuggestion {
        rate,
        source,
        is_essential: rate <= ESSENTIAL_RATE,
        requires_approval: rate.is_zero(),
    }
}

fn resolve_with_source<T: TaxProfile>(item: &T) -> (Decimal, RateSource) {
    // Rule 1: explicit override wins, even when it is 0.
    if let Some(percent) = item.explicit_tax_percent() {
        return (percent, RateSource::Explicit);
    }

    // Rule 2: product-name keywords, declaration order.
    let name = item.product_name().to_uppercase();
    for (keyword, rate) in NAME_KEYWORD_RATES {
        if name.contains(keyword) {
            return (*rate, RateSource::NameKeyword);
        }
    }

    // Rule 3: exact HSN code.
    if let Some(hsn) = item.hsn_code() {
        for (code, rate) in HSN_RATES {
            if hsn == *code {
                return (*rate, RateSource::HsnCode);
            }
        }
    }

    // Rule 4: category keywords.
    if let Some(category) = item.category() {
        let category = category.to_lowercase();
        for (keyword, rate) in CATEGORY_RATES {
            if category.contains(keyword) {
                return (*rate, RateSource::Category);
            }
        }
    }

    (STANDARD_RATE, RateSource::Default)
}
