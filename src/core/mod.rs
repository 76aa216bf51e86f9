//! Core document types, totals arithmetic, numbering and validation
//! primitives shared by every document kind.

mod builder;
mod error;
mod numbering;
mod totals;
mod types;

pub use builder::*;
pub use error::*;
pub use numbering::*;
pub use totals::*;
pub use types::*;
