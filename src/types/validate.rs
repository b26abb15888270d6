//! Local checks of the limits the API enforces on request payloads.

use std::collections::HashSet;

use korapay_core::{
    case::snake_case,
    errors::{Error, Result},
    types::{AnyJson, Record},
};

/// Minimum length of a transaction reference.
pub const MIN_REFERENCE_LENGTH: usize = 8;
/// Maximum number of metadata entries.
pub const MAX_METADATA_KEYS: usize = 5;
/// Maximum length of a metadata key.
pub const MAX_METADATA_KEY_LENGTH: usize = 20;

/// A payload that can be checked before it is sent.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub(crate) fn reference(reference: &str) -> Result<()> {
    if reference.chars().count() < MIN_REFERENCE_LENGTH {
        return Err(Error::validation(format!(
            "reference {reference:?} must be at least {MIN_REFERENCE_LENGTH} characters long"
        )));
    }
    Ok(())
}

pub(crate) fn metadata(metadata: Option<&Record<AnyJson>>) -> Result<()> {
    let Some(metadata) = metadata else {
        return Ok(());
    };

    if metadata.is_empty() {
        return Err(Error::validation("metadata must not be empty"));
    }
    if metadata.len() > MAX_METADATA_KEYS {
        return Err(Error::validation(format!(
            "metadata accepts at most {MAX_METADATA_KEYS} keys, got {}",
            metadata.len()
        )));
    }
    let mut sent = HashSet::with_capacity(metadata.len());
    for key in metadata.keys() {
        // Keys are sent wire-cased, so the limits apply to that form as well.
        let wire = snake_case(key);
        if !metadata_key_allowed(key) || !metadata_key_allowed(&wire) {
            return Err(Error::validation(format!(
                "metadata key {key:?} is sent as {wire:?}; both must be 1 to {MAX_METADATA_KEY_LENGTH} characters of A-Z, a-z, 0-9 or -"
            )));
        }
        if !sent.insert(wire) {
            return Err(Error::validation(format!(
                "metadata key {key:?} collides with another key once sent as {:?}",
                snake_case(key)
            )));
        }
    }
    Ok(())
}

fn metadata_key_allowed(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_METADATA_KEY_LENGTH
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
