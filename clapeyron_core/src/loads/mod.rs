//! Loads acting on a simply supported span
//!
//! - [`Load`] - Tagged enum of point, distributed, and applied-moment loads
//! - [`LoadKind`] - The three load kinds
//! - [`LoadInput`] - Unvalidated form/request record with optional fields
//! - [`LoadSet`] - Caller-owned collection with add/update/remove by id
//!
//! # Example
//!
//! ```
//! use clapeyron_core::loads::{Load, LoadSet};
//!
//! let set = LoadSet::new("Scenario A")
//!     .with_load(Load::point(100.0, 5.0));
//!
//! assert_eq!(set.total_vertical_load(), 100.0);
//! ```

pub mod input;
pub mod load_set;
pub mod load_types;

pub use input::LoadInput;
pub use load_set::LoadSet;
pub use load_types::{
    generate_load_id, Load, LoadKind, CANCELLING_INTENSITY_TOLERANCE, UNIFORM_TOLERANCE,
};
