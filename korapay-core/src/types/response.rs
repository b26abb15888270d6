//! [`ApiResponse`] is the canonical envelope returned by every API operation.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{errors::Error, types::AnyJson};

/// The uniform response of a Korapay API call.
///
/// Built from any response the remote API answers with a 2xx status, including
/// those whose body reports `"status": false`. Keys inside `data` are already
/// in application (`camelCase`) casing.
///
/// ```
/// use serde_json::json;
/// use korapay_core::types::ApiResponse;
///
/// let response = ApiResponse::from_body(200, json!({ "message": "ok" }));
/// assert!(!response.success);
/// assert_eq!(response.message, "ok");
/// assert_eq!(response.data, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code of the response.
    pub http_status: u16,
    /// The `status` flag reported by the API, `false` when the body omits it.
    pub success: bool,
    /// Human readable message reported by the API.
    pub message: String,
    /// The payload of the response, if any.
    pub data: Option<AnyJson>,
}

impl ApiResponse {
    /// Build the envelope from an HTTP status and an (already app-cased) JSON body.
    pub fn from_body(http_status: u16, body: AnyJson) -> Self {
        let Value::Object(mut body) = body else {
            return ApiResponse {
                http_status,
                success: false,
                message: String::new(),
                data: None,
            };
        };

        let success = body
            .get("status")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let message = match body.remove("message") {
            Some(Value::String(message)) => message,
            _ => String::new(),
        };
        let data = body.remove("data").filter(|data| !data.is_null());

        ApiResponse {
            http_status,
            success,
            message,
            data,
        }
    }

    /// Deserialize `data` into a typed value.
    ///
    /// A missing `data` is deserialized from `null`, so `Option<T>` targets
    /// succeed with `None`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let data = self.data.clone().unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|err| Error::decode(self.http_status, err))
    }
}
