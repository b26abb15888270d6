//! Payloads for disbursing funds to bank accounts and mobile money wallets.

use bon::Builder;
use korapay_core::errors::Result;
use serde::{Deserialize, Serialize};

use crate::types::{
    charges::Customer,
    enums::{Currency, MobileMoneyOperator},
    validate::{self, Validate},
};

/// Where a payout is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationType {
    BankAccount,
    MobileMoney,
}

/// Pay out to a single bank account.
///
/// In test mode, bank codes `044`, `033` and `058` simulate a successful
/// payout; every other bank simulates a failure.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutToBankAccountPayload {
    #[builder(into)]
    pub reference: String,
    pub amount: f64,
    pub currency: Currency,
    #[builder(into)]
    pub bank_code: String,
    #[builder(into)]
    pub account_number: String,
    pub customer: Customer,
    #[builder(into)]
    pub narration: String,
}

impl PayoutToBankAccountPayload {
    /// The disbursement body: the recipient nested under a `bank_account` destination.
    pub(crate) fn to_disbursement(&self) -> Disbursement<'_> {
        Disbursement {
            reference: &self.reference,
            destination: BankDestination {
                destination_type: DestinationType::BankAccount,
                amount: self.amount,
                currency: self.currency,
                narration: &self.narration,
                bank_account: BankAccountRef {
                    bank: &self.bank_code,
                    account: &self.account_number,
                },
                customer: &self.customer,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Disbursement<'a> {
    reference: &'a str,
    destination: BankDestination<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BankDestination<'a> {
    #[serde(rename = "type")]
    destination_type: DestinationType,
    amount: f64,
    currency: Currency,
    narration: &'a str,
    bank_account: BankAccountRef<'a>,
    customer: &'a Customer,
}

#[derive(Debug, Serialize)]
struct BankAccountRef<'a> {
    bank: &'a str,
    account: &'a str,
}

impl Validate for PayoutToBankAccountPayload {
    fn validate(&self) -> Result<()> {
        validate::reference(&self.reference)
    }
}

#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileMoneyAccount {
    pub operator: MobileMoneyOperator,
    #[builder(into)]
    pub mobile_number: String,
}

#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileMoneyDestination {
    #[serde(rename = "type")]
    #[builder(default = DestinationType::MobileMoney)]
    pub destination_type: DestinationType,
    pub amount: f64,
    pub currency: Currency,
    pub mobile_money: MobileMoneyAccount,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
    pub customer: Customer,
}

/// Pay out to a mobile money wallet.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutToMobileMoneyPayload {
    #[builder(into)]
    pub reference: String,
    pub destination: MobileMoneyDestination,
}

impl Validate for PayoutToMobileMoneyPayload {
    fn validate(&self) -> Result<()> {
        validate::reference(&self.reference)
    }
}

#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[builder(into)]
    pub bank_code: String,
    #[builder(into)]
    pub account_number: String,
}

/// One recipient of a bulk payout.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutOrder {
    #[builder(into)]
    pub reference: String,
    pub amount: f64,
    pub bank_account: BankAccount,
    pub customer: Customer,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
    #[serde(rename = "type")]
    #[builder(default = DestinationType::BankAccount)]
    pub destination_type: DestinationType,
}

/// Pay out to several bank accounts in one batch.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPayoutToBankAccountPayload {
    /// Reference identifying the batch.
    #[builder(into)]
    pub batch_reference: String,
    #[builder(into)]
    pub description: String,
    #[builder(default)]
    pub merchant_bears_cost: bool,
    pub currency: Currency,
    pub payouts: Vec<PayoutOrder>,
}

impl Validate for BulkPayoutToBankAccountPayload {
    fn validate(&self) -> Result<()> {
        if self.payouts.is_empty() {
            return Err(korapay_core::errors::Error::validation(
                "a bulk payout needs at least one payout order",
            ));
        }
        self.payouts
            .iter()
            .try_for_each(|order| validate::reference(&order.reference))
    }
}
