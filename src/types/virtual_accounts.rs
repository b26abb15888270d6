use bon::Builder;
use serde::{Deserialize, Serialize};

/// Owner of a virtual bank account.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountHolder {
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Know-your-customer details of an account holder.
#[derive(Builder, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kyc {
    /// Bank Verification Number.
    #[builder(into)]
    pub bvn: String,
    /// National Identity Number.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nin: Option<String>,
}

impl std::fmt::Debug for Kyc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kyc")
            .field("bvn", &"<redacted>")
            .field("nin", &self.nin.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Create a dedicated virtual bank account for a customer.
///
/// Use bank code `000` in the sandbox.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVirtualBankAccountPayload {
    #[builder(into)]
    pub account_name: String,
    /// Your unique reference for the account.
    #[builder(into)]
    pub account_reference: String,
    /// Code of the bank providing the account, e.g. `035`.
    #[builder(into)]
    pub bank_code: String,
    pub customer: AccountHolder,
    pub kyc: Kyc,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanent: Option<bool>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serializes_in_app_casing() {
        let payload = CreateVirtualBankAccountPayload::builder()
            .account_name("Ada Store")
            .account_reference("ada-store-1")
            .bank_code("000")
            .customer(AccountHolder::builder().name("Ada").build())
            .kyc(Kyc::builder().bvn("22222222222").build())
            .permanent(true)
            .build();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "accountName": "Ada Store",
                "accountReference": "ada-store-1",
                "bankCode": "000",
                "customer": { "name": "Ada" },
                "kyc": { "bvn": "22222222222" },
                "permanent": true
            })
        );
        assert!(!format!("{payload:?}").contains("22222222222"));
    }
}
