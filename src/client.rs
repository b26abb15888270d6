//! [`KorapayClient`]: one async method per Korapay API operation.

use korapay_core::{
    case::to_wire_case,
    config::ClientConfig,
    errors::{Error, Result},
    transport::{AuthMode, Call, HttpMethod, Transport, TransportClient},
    types::{AnyJson, ApiResponse},
};
use serde::Serialize;
use serde_json::json;

use crate::types::{
    AuthorizeCardChargePayload, BulkPayoutToBankAccountPayload, ChargeViaBankTransferPayload,
    ChargeViaCardPayload, ChargeViaMobileMoneyPayload, Country, CreateVirtualBankAccountPayload,
    Currency, InitiateChargePayload, PayoutToBankAccountPayload, PayoutToMobileMoneyPayload,
    Validate,
};

/// The Korapay API client.
///
/// Every method maps to exactly one remote call and returns the canonical
/// [`ApiResponse`] envelope. Methods taking a payload validate it first and
/// send nothing when it is rejected.
///
/// ```no_run
/// use korapay::{KorapayClient, types::Country};
///
/// # async fn run() -> korapay::core::errors::Result<()> {
/// // Reads KORAPAY_PUBLIC_KEY, KORAPAY_SECRET_KEY and KORAPAY_ENCRYPTION_KEY.
/// let client = KorapayClient::from_env()?;
///
/// let banks = client.get_banks(Country::Nigeria).await?;
/// println!("{} {:?}", banks.message, banks.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KorapayClient<T = TransportClient> {
    transport: T,
}

impl KorapayClient<TransportClient> {
    /// Build a client, reading credentials missing from `config` from the environment.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_transport(TransportClient::new(config)?))
    }

    /// Build a client entirely from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_transport(TransportClient::from_env()?))
    }
}

impl<T: Transport> KorapayClient<T> {
    /// Wrap an existing transport.
    pub fn from_transport(transport: T) -> Self {
        KorapayClient { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // === Card ===

    /// Charge a card. The whole payload is encrypted and sent as `chargeData`.
    pub async fn charge_via_card(&self, payload: ChargeViaCardPayload) -> Result<ApiResponse> {
        payload.validate()?;
        let charge_data = self.transport.encrypt(&to_wire_case(body(&payload)?))?;
        self.transport
            .call(post(
                "/merchant/api/v1/charges/card",
                json!({ "chargeData": charge_data }),
            ))
            .await
    }

    /// Complete a card charge with the PIN, OTP or AVS the API asked for.
    pub async fn authorize_card_charge(
        &self,
        payload: AuthorizeCardChargePayload,
    ) -> Result<ApiResponse> {
        self.transport
            .call(post(
                "/merchant/api/v1/charges/card/authorize",
                body(&payload)?,
            ))
            .await
    }

    pub async fn resend_card_otp(&self, transaction_reference: &str) -> Result<ApiResponse> {
        self.transport
            .call(post(
                "/merchant/api/v1/charges/card/resend-otp",
                json!({ "transactionReference": transaction_reference }),
            ))
            .await
    }

    // === Bank transfer & virtual accounts ===

    pub async fn charge_via_bank_transfer(
        &self,
        payload: ChargeViaBankTransferPayload,
    ) -> Result<ApiResponse> {
        payload.validate()?;
        self.transport
            .call(post(
                "/merchant/api/v1/charges/bank-transfer",
                body(&payload)?,
            ))
            .await
    }

    pub async fn create_virtual_bank_account(
        &self,
        payload: CreateVirtualBankAccountPayload,
    ) -> Result<ApiResponse> {
        self.transport
            .call(post(
                "/merchant/api/v1/virtual-bank-account",
                body(&payload)?,
            ))
            .await
    }

    pub async fn get_virtual_bank_account(&self, account_reference: &str) -> Result<ApiResponse> {
        let account_reference = segment("account reference", account_reference)?;
        self.transport
            .call(get(format!(
                "/merchant/api/v1/virtual-bank-account/{account_reference}"
            )))
            .await
    }

    pub async fn get_virtual_bank_account_transactions(
        &self,
        account_number: &str,
    ) -> Result<ApiResponse> {
        self.transport
            .call(
                Call::builder()
                    .path("/merchant/api/v1/virtual-bank-account/transactions")
                    .method(HttpMethod::Get)
                    .query(vec![("accountNumber".to_owned(), account_number.to_owned())])
                    .build(),
            )
            .await
    }

    /// Credit a virtual bank account. Only available with sandbox keys.
    pub async fn credit_sandbox_virtual_bank_account(
        &self,
        account_number: &str,
        amount: f64,
        currency: Currency,
    ) -> Result<ApiResponse> {
        self.transport
            .call(post(
                "/api/v1/virtual-bank-account/sandbox/credit",
                json!({
                    "accountNumber": account_number,
                    "amount": amount,
                    "currency": currency.as_str(),
                }),
            ))
            .await
    }

    // === Mobile money ===

    pub async fn charge_via_mobile_money(
        &self,
        payload: ChargeViaMobileMoneyPayload,
    ) -> Result<ApiResponse> {
        payload.validate()?;
        self.transport
            .call(post(
                "/merchant/api/v1/charges/mobile-money",
                body(&payload)?,
            ))
            .await
    }

    /// Authorize a mobile money charge with the OTP sent to the customer.
    pub async fn authorize_mobile_money_charge(
        &self,
        reference: &str,
        token: &str,
    ) -> Result<ApiResponse> {
        self.transport
            .call(post(
                "/merchant/api/v1/charges/mobile-money/authorize",
                json!({ "reference": reference, "token": token }),
            ))
            .await
    }

    pub async fn resend_mobile_money_otp(
        &self,
        transaction_reference: &str,
    ) -> Result<ApiResponse> {
        self.transport
            .call(post(
                "/merchant/api/v1/charges/mobile-money/resend-otp",
                json!({ "transactionReference": transaction_reference }),
            ))
            .await
    }

    /// Send the STK push prompt to the customer's phone again.
    pub async fn resend_stk(&self, transaction_reference: &str) -> Result<ApiResponse> {
        self.transport
            .call(post(
                "/merchant/api/v1/charges/mobile-money/resend-stk",
                json!({ "transactionReference": transaction_reference }),
            ))
            .await
    }

    pub async fn authorize_stk(&self, reference: &str, pin: &str) -> Result<ApiResponse> {
        self.transport
            .call(post(
                "/merchant/api/v1/charges/mobile-money/authorize-stk",
                json!({ "reference": reference, "pin": pin }),
            ))
            .await
    }

    // === Checkout & charges ===

    /// Start a hosted checkout; the response carries the checkout URL.
    pub async fn initiate_charge(&self, payload: InitiateChargePayload) -> Result<ApiResponse> {
        payload.validate()?;
        self.transport
            .call(post("/merchant/api/v1/charges/initialize", body(&payload)?))
            .await
    }

    pub async fn get_charge(&self, reference: &str) -> Result<ApiResponse> {
        let reference = segment("reference", reference)?;
        self.transport
            .call(get(format!("/merchant/api/v1/charges/{reference}")))
            .await
    }

    // === Misc ===

    /// Resolve the name on a bank account.
    ///
    /// Sent on the open session with the `Authorization` header emptied.
    pub async fn resolve_bank_account(
        &self,
        bank_code: &str,
        account_number: &str,
        currency: Currency,
    ) -> Result<ApiResponse> {
        self.transport
            .call(
                Call::builder()
                    .path("/merchant/api/v1/misc/banks/resolve")
                    .method(HttpMethod::Post)
                    .auth(AuthMode::Open)
                    .without_authorization(true)
                    .body(json!({
                        "bank": bank_code,
                        "account": account_number,
                        "currency": currency.as_str(),
                    }))
                    .build(),
            )
            .await
    }

    pub async fn get_balances(&self) -> Result<ApiResponse> {
        self.transport
            .call(get("/merchant/api/v1/balances"))
            .await
    }

    /// Banks of `country`, on the open session.
    pub async fn get_banks(&self, country: Country) -> Result<ApiResponse> {
        self.transport
            .call(open_get("/merchant/api/v1/misc/banks", country))
            .await
    }

    /// Mobile money operators of `country`, on the open session.
    pub async fn get_mmo(&self, country: Country) -> Result<ApiResponse> {
        self.transport
            .call(open_get("/merchant/api/v1/misc/mobile-money", country))
            .await
    }

    // === Payouts ===

    pub async fn payout_to_bank_account(
        &self,
        payload: PayoutToBankAccountPayload,
    ) -> Result<ApiResponse> {
        payload.validate()?;
        self.transport
            .call(post(
                "/merchant/api/v1/transactions/disburse",
                body(&payload.to_disbursement())?,
            ))
            .await
    }

    pub async fn payout_to_mobile_money(
        &self,
        payload: PayoutToMobileMoneyPayload,
    ) -> Result<ApiResponse> {
        payload.validate()?;
        self.transport
            .call(post(
                "/merchant/api/v1/transactions/disburse",
                body(&payload)?,
            ))
            .await
    }

    pub async fn bulk_payout_to_bank_account(
        &self,
        payload: BulkPayoutToBankAccountPayload,
    ) -> Result<ApiResponse> {
        payload.validate()?;
        self.transport
            .call(post("/api/v1/transactions/disburse/bulk", body(&payload)?))
            .await
    }

    /// The individual payouts of a bulk payout.
    pub async fn get_payouts(&self, bulk_reference: &str) -> Result<ApiResponse> {
        let bulk_reference = segment("bulk reference", bulk_reference)?;
        self.transport
            .call(get(format!(
                "/api/v1/transactions/bulk/{bulk_reference}/payout"
            )))
            .await
    }

    pub async fn get_bulk_transaction(&self, bulk_reference: &str) -> Result<ApiResponse> {
        let bulk_reference = segment("bulk reference", bulk_reference)?;
        self.transport
            .call(get(format!("/api/v1/transactions/bulk/{bulk_reference}")))
            .await
    }

    pub async fn get_payout_transaction(
        &self,
        transaction_reference: &str,
    ) -> Result<ApiResponse> {
        let transaction_reference = segment("transaction reference", transaction_reference)?;
        self.transport
            .call(get(format!(
                "/merchant/api/v1/transactions/{transaction_reference}"
            )))
            .await
    }
}

fn body<B: Serialize + ?Sized>(payload: &B) -> Result<AnyJson> {
    serde_json::to_value(payload).map_err(Error::serialization)
}

fn post(path: &str, body: AnyJson) -> Call {
    Call::builder()
        .path(path)
        .method(HttpMethod::Post)
        .body(body)
        .build()
}

fn get(path: impl Into<String>) -> Call {
    Call::builder().path(path).method(HttpMethod::Get).build()
}

fn open_get(path: &str, country: Country) -> Call {
    Call::builder()
        .path(path)
        .method(HttpMethod::Get)
        .auth(AuthMode::Open)
        .query(vec![("countryCode".to_owned(), country.as_str().to_owned())])
        .build()
}

/// A caller supplied value used as one path segment.
fn segment<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    // `..` anywhere is refused by the transport's path check as well.
    let allowed = !value.is_empty()
        && value != "."
        && !value.contains("..")
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'));
    if !allowed {
        return Err(Error::validation(format!(
            "{name} {value:?} is not a valid path segment"
        )));
    }
    Ok(value)
}
