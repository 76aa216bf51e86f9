//! # bijak
//!
//! Transaction-document engine for a pharmaceutical distribution back
//! office: GST rate resolution, totals aggregation, the returns workflow
//! state machine, and payload construction/validation for invoices and
//! payments under the Indian GST regime.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Validation is data, not exceptions: every check returns a
//! [`core::ValidationReport`] listing all violations found.
//!
//! ## Quick Start
//!
//! ```rust
//! use bijak::core::{LineItemBuilder, aggregate};
//! use bijak::gst;
//! use rust_decimal_macros::dec;
//!
//! let mut item = LineItemBuilder::new("INSULIN INJ 40IU", 5, dec!(320))
//!     .hsn_code("3004")
//!     .build();
//!
//! // Name keyword beats the HSN table: insulin is essential-rated.
//! assert_eq!(gst::resolve(&item), dec!(5));
//!
//! // The aggregator uses whatever rate the line carries, so attach
//! // the resolved rate before totalling.
//! item.tax_percent = Some(gst::resolve(&item));
//!
//! let totals = aggregate(&[item]);
//! assert_eq!(totals.subtotal, dec!(1600.00));
//! assert_eq!(totals.tax, dec!(80.00));
//! assert_eq!(totals.net, dec!(1680.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Document types, GST rates, returns reducer, validation |
//! | `remote` | HTTP client for the remote document service |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod gst;

#[cfg(feature = "core")]
pub mod returns;

#[cfg(feature = "core")]
pub mod forms;

#[cfg(feature = "core")]
pub mod invoice;

#[cfg(feature = "core")]
pub mod payment;

#[cfg(feature = "core")]
pub mod remote;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
