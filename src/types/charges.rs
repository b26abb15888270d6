//! Payloads for collecting payments: card, bank transfer, mobile money and checkout charges.
//!
//! All payloads serialize in application (`camelCase`) casing. The transport
//! rewrites them to wire casing on the way out.

use bon::Builder;
use korapay_core::{
    errors::Result,
    types::{AnyJson, Record},
};
use serde::{Deserialize, Serialize};

use crate::types::{
    enums::{Currency, PaymentChannel},
    validate::{self, Validate},
};

/// The customer a charge is made for.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[builder(into)]
    pub email: String,
}

/// A debit card.
///
/// Card details only ever leave the client encrypted.
#[derive(Builder, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// The card number.
    #[builder(into)]
    pub number: String,
    /// The card verification value.
    #[builder(into)]
    pub cvv: String,
    /// Two digit expiry month, e.g. `08`.
    #[builder(into)]
    pub expiry_month: String,
    /// Two digit expiry year, e.g. `24`.
    #[builder(into)]
    pub expiry_year: String,
    /// Name of the card holder.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last_four = self
            .number
            .char_indices()
            .rev()
            .nth(3)
            .map_or("", |(index, _)| &self.number[index..]);
        f.debug_struct("Card")
            .field("number", &format_args!("****{last_four}"))
            .field("cvv", &"<redacted>")
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("name", &self.name)
            .field("pin", &self.pin.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Charge a card.
///
/// ```
/// use korapay::types::{Card, ChargeViaCardPayload, Currency, Customer};
///
/// let payload = ChargeViaCardPayload::builder()
///     .reference("order-00001")
///     .customer(Customer::builder().name("Ada").email("ada@example.com").build())
///     .card(
///         Card::builder()
///             .number("5130000052131820")
///             .cvv("419")
///             .expiry_month("12")
///             .expiry_year("32")
///             .build(),
///     )
///     .amount(1000.0)
///     .currency(Currency::Ngn)
///     .build();
/// assert!(!format!("{payload:?}").contains("5130000052131820"));
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeViaCardPayload {
    /// Unique reference of the payment, at least 8 characters long.
    #[builder(into)]
    pub reference: String,
    pub customer: Customer,
    pub card: Card,
    pub amount: f64,
    pub currency: Currency,
    /// Where the customer is sent once the payment completes.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Up to 5 entries; keys of at most 20 characters from `A-Z`, `a-z`, `0-9` and `-`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Record<AnyJson>>,
}

impl Validate for ChargeViaCardPayload {
    fn validate(&self) -> Result<()> {
        validate::reference(&self.reference)?;
        validate::metadata(self.metadata.as_ref())
    }
}

/// Credentials that complete a pending card charge. Set the one the API asked for.
#[derive(Builder, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    /// Address verification details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avs: Option<AnyJson>,
}

impl std::fmt::Debug for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("Authorization")
            .field("pin", &redact(&self.pin))
            .field("otp", &redact(&self.otp))
            .field("avs", &self.avs)
            .finish()
    }
}

#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeCardChargePayload {
    #[builder(into)]
    pub transaction_reference: String,
    pub authorization: Authorization,
}

/// Collect a payment into a one-off bank account.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeViaBankTransferPayload {
    /// Unique reference of the payment, at least 8 characters long.
    #[builder(into)]
    pub reference: String,
    pub customer: Customer,
    pub amount: f64,
    /// Only `NGN` is currently supported by the API.
    pub currency: Currency,
    /// Account name shown when the account number is resolved.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
    /// Webhook URL notified of the transaction outcome.
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    /// `true` when the merchant bears the fee, `false` (the default) when the customer does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_bears_cost: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Record<AnyJson>>,
}

impl Validate for ChargeViaBankTransferPayload {
    fn validate(&self) -> Result<()> {
        validate::reference(&self.reference)?;
        validate::metadata(self.metadata.as_ref())
    }
}

#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileMoney {
    /// The mobile number to charge, e.g. `254700000000`.
    #[builder(into)]
    pub number: String,
}

/// Charge a mobile money wallet.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeViaMobileMoneyPayload {
    /// Unique reference of the payment, at least 8 characters long.
    #[builder(into)]
    pub reference: String,
    pub customer: Customer,
    pub amount: f64,
    pub mobile_money: MobileMoney,
    pub currency: Currency,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_bears_cost: Option<bool>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Record<AnyJson>>,
}

impl Validate for ChargeViaMobileMoneyPayload {
    fn validate(&self) -> Result<()> {
        validate::reference(&self.reference)?;
        validate::metadata(self.metadata.as_ref())
    }
}

/// Start a hosted checkout charge.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateChargePayload {
    #[builder(into)]
    pub reference: String,
    pub amount: f64,
    pub currency: Currency,
    #[builder(into)]
    pub narration: String,
    #[builder(into)]
    pub notification_url: String,
    pub customer: Customer,
    /// Channels offered on the checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<PaymentChannel>>,
    /// Channel preselected when several are offered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_channel: Option<PaymentChannel>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl Validate for InitiateChargePayload {
    fn validate(&self) -> Result<()> {
        validate::reference(&self.reference)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn card() -> Card {
        Card::builder()
            .number("5130000052131820")
            .cvv("419")
            .expiry_month("12")
            .expiry_year("32")
            .build()
    }

    #[test]
    fn test_card_charge_serializes_in_app_casing() {
        let payload = ChargeViaCardPayload::builder()
            .reference("order-00001")
            .customer(Customer::builder().email("ada@example.com").build())
            .card(card())
            .amount(1500.0)
            .currency(Currency::Ngn)
            .redirect_url("https://example.com/done")
            .build();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "reference": "order-00001",
                "customer": { "email": "ada@example.com" },
                "card": {
                    "number": "5130000052131820",
                    "cvv": "419",
                    "expiryMonth": "12",
                    "expiryYear": "32"
                },
                "amount": 1500.0,
                "currency": "NGN",
                "redirectUrl": "https://example.com/done"
            })
        );
    }

    #[test]
    fn test_debug_masks_card() {
        let debug = format!("{:?}", card());
        assert!(debug.contains("****1820"));
        assert!(!debug.contains("5130000052131820"));
        assert!(!debug.contains("419"));

        let authorization = Authorization::builder().pin("1234").build();
        assert!(!format!("{authorization:?}").contains("1234"));
    }

    #[test]
    fn test_short_reference_fails_validation() {
        let payload = ChargeViaBankTransferPayload::builder()
            .reference("short")
            .customer(Customer::builder().email("ada@example.com").build())
            .amount(100.0)
            .currency(Currency::Ngn)
            .build();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_checkout_channels_use_wire_values() {
        let payload = InitiateChargePayload::builder()
            .reference("checkout-1")
            .amount(20.0)
            .currency(Currency::Ghs)
            .narration("Order 1")
            .notification_url("https://example.com/hook")
            .customer(Customer::builder().email("kofi@example.com").build())
            .channels(vec![PaymentChannel::Card, PaymentChannel::MobileMoney])
            .default_channel(PaymentChannel::MobileMoney)
            .build();

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["channels"], json!(["card", "mobile_money"]));
        assert_eq!(value["defaultChannel"], json!("mobile_money"));
        assert!(payload.validate().is_ok());
    }
}
