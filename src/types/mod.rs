//! Request payloads and reference enums of the Korapay API.

mod charges;
mod enums;
mod payouts;
mod validate;
mod virtual_accounts;

pub use charges::*;
pub use enums::*;
pub use payouts::*;
pub use validate::{MAX_METADATA_KEY_LENGTH, MAX_METADATA_KEYS, MIN_REFERENCE_LENGTH, Validate};
pub use virtual_accounts::*;

pub use korapay_core::types::{AnyJson, ApiResponse, Record};
