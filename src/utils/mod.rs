//! Utility functions shared by the model, indexes and page builders.
//!
//! ## Modules
//!
//! - [`collator`] - Locale-independent string ordering
//! - [`paths`] - Relative link URLs between generated and source files
//! - [`text`] - Short hashes, zero-padded positions and heading slugs
//!
//! ```
//! use glossdex::utils::{hash8, pad_position};
//!
//! assert_eq!(hash8("").len(), 8);
//! assert_eq!(pad_position(11), "000011");
//! ```

pub mod collator;
pub mod paths;
pub mod text;

pub use text::{hash8, pad_position, slugify, HASH8_LEN, POSITION_PAD_WIDTH};
