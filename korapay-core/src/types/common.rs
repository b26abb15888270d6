//! Miscellaneous common types used throughout the Korapay SDK.

/// Represents any JSON value. Used for payloads and response data whose shape
/// is decided by the individual API operation.
pub type AnyJson = serde_json::Value;

/// Represents a key-value pair object. The key is a `String`.
pub type Record<V> = std::collections::HashMap<String, V>;
