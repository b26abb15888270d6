use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, Uri},
};
use korapay::{
    KorapayClient,
    core::{
        config::ClientConfig,
        errors::ErrorKind,
    },
    types::{
        AccountHolder, BankAccount, BulkPayoutToBankAccountPayload, Card,
        ChargeViaBankTransferPayload, ChargeViaCardPayload, Country,
        CreateVirtualBankAccountPayload, Currency, Customer, Kyc, PayoutOrder,
        PayoutToBankAccountPayload, Record,
    },
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

const ENCRYPTION_KEY: &str = "0123456789abcdef0123456789abcdef";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn record(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> (StatusCode, Json<Value>) {
    if uri.path().ends_with("/charges/missing-charge") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": false, "message": "Charge not found" })),
        );
    }

    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("<none>")
        .to_owned();
    (
        StatusCode::OK,
        Json(json!({
            "status": true,
            "message": "recorded",
            "data": {
                "method": method.as_str(),
                "path": uri.path(),
                "query": uri.query(),
                "authorization": authorization,
                "raw_body": String::from_utf8_lossy(&body),
            }
        })),
    )
}

async fn spawn_mock() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, Router::new().fallback(record))
            .await
            .unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

async fn client() -> KorapayClient {
    init_tracing();
    KorapayClient::new(
        ClientConfig::builder()
            .public_key("pk_test_public")
            .secret_key("sk_test_secret")
            .encryption_key(ENCRYPTION_KEY)
            .base_url(spawn_mock().await)
            .build(),
    )
    .unwrap()
}

fn received(data: &Value) -> Value {
    serde_json::from_str(data["rawBody"].as_str().unwrap()).unwrap()
}

fn customer() -> Customer {
    Customer::builder().name("Ada").email("ada@example.com").build()
}

#[tokio::test]
async fn test_get_balances() {
    let client = client().await;

    let response = client.get_balances().await.unwrap();

    assert!(response.success);
    let data = response.data.unwrap();
    assert_eq!(data["method"], json!("GET"));
    assert_eq!(data["path"], json!("/merchant/api/v1/balances"));
    assert_eq!(data["authorization"], json!("Bearer sk_test_secret"));
}

#[tokio::test]
async fn test_get_banks_uses_public_key() {
    let client = client().await;

    let data = client.get_banks(Country::Ghana).await.unwrap().data.unwrap();

    assert_eq!(data["path"], json!("/merchant/api/v1/misc/banks"));
    assert_eq!(data["query"], json!("country_code=GH"));
    assert_eq!(data["authorization"], json!("Bearer pk_test_public"));
}

#[tokio::test]
async fn test_resolve_bank_account_sends_empty_authorization() {
    let client = client().await;

    let data = client
        .resolve_bank_account("044", "0000000000", Currency::Ngn)
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(data["method"], json!("POST"));
    assert_eq!(data["path"], json!("/merchant/api/v1/misc/banks/resolve"));
    assert_eq!(data["authorization"], json!(""));
    assert_eq!(
        received(&data),
        json!({ "bank": "044", "account": "0000000000", "currency": "NGN" })
    );
}

#[tokio::test]
async fn test_charge_via_card_sends_only_ciphertext() {
    let client = client().await;
    let payload = ChargeViaCardPayload::builder()
        .reference("order-00001")
        .customer(customer())
        .card(
            Card::builder()
                .number("5130000052131820")
                .cvv("419")
                .expiry_month("12")
                .expiry_year("32")
                .build(),
        )
        .amount(1000.0)
        .currency(Currency::Ngn)
        .build();

    let data = client.charge_via_card(payload).await.unwrap().data.unwrap();

    assert_eq!(data["path"], json!("/merchant/api/v1/charges/card"));
    let raw = data["rawBody"].as_str().unwrap();
    assert!(!raw.contains("5130000052131820"));
    let body = received(&data);
    let envelope = body["charge_data"].as_str().unwrap();
    let segments: Vec<&str> = envelope.split(':').collect();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].len(), 32);
}

#[tokio::test]
async fn test_bank_transfer_body_is_wire_cased() {
    let client = client().await;
    let payload = ChargeViaBankTransferPayload::builder()
        .reference("order-00002")
        .customer(customer())
        .amount(2500.0)
        .currency(Currency::Ngn)
        .account_name("Ada Store")
        .merchant_bears_cost(true)
        .metadata(Record::from([("plan".to_owned(), json!("gold"))]))
        .build();

    let data = client.charge_via_bank_transfer(payload).await.unwrap().data.unwrap();

    assert_eq!(data["path"], json!("/merchant/api/v1/charges/bank-transfer"));
    assert_eq!(
        received(&data),
        json!({
            "reference": "order-00002",
            "customer": { "name": "Ada", "email": "ada@example.com" },
            "amount": 2500.0,
            "currency": "NGN",
            "account_name": "Ada Store",
            "merchant_bears_cost": true,
            "metadata": { "plan": "gold" }
        })
    );
}

#[tokio::test]
async fn test_create_virtual_bank_account() {
    let client = client().await;
    let payload = CreateVirtualBankAccountPayload::builder()
        .account_name("Ada Store")
        .account_reference("ada-store-1")
        .bank_code("000")
        .customer(AccountHolder::builder().name("Ada").build())
        .kyc(Kyc::builder().bvn("22222222222").build())
        .build();

    let data = client
        .create_virtual_bank_account(payload)
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(data["path"], json!("/merchant/api/v1/virtual-bank-account"));
    let body = received(&data);
    assert_eq!(body["account_reference"], json!("ada-store-1"));
    assert_eq!(body["bank_code"], json!("000"));
}

#[tokio::test]
async fn test_virtual_bank_account_transactions_query() {
    let client = client().await;

    let data = client
        .get_virtual_bank_account_transactions("1234567890")
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(
        data["path"],
        json!("/merchant/api/v1/virtual-bank-account/transactions")
    );
    assert_eq!(data["query"], json!("account_number=1234567890"));
}

#[tokio::test]
async fn test_payouts() {
    let client = client().await;

    let single = client
        .payout_to_bank_account(
            PayoutToBankAccountPayload::builder()
                .reference("payout-0001")
                .amount(5000.0)
                .currency(Currency::Ngn)
                .bank_code("044")
                .account_number("0000000000")
                .customer(customer())
                .narration("Refund")
                .build(),
        )
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(single["path"], json!("/merchant/api/v1/transactions/disburse"));
    assert_eq!(
        received(&single)["destination"]["bank_account"],
        json!({ "bank": "044", "account": "0000000000" })
    );

    let bulk = client
        .bulk_payout_to_bank_account(
            BulkPayoutToBankAccountPayload::builder()
                .batch_reference("batch-0001")
                .description("Salaries")
                .currency(Currency::Ngn)
                .payouts(vec![
                    PayoutOrder::builder()
                        .reference("order-0001")
                        .amount(100.0)
                        .bank_account(
                            BankAccount::builder()
                                .bank_code("033")
                                .account_number("0000000000")
                                .build(),
                        )
                        .customer(customer())
                        .build(),
                ])
                .build(),
        )
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(bulk["path"], json!("/api/v1/transactions/disburse/bulk"));
    let body = received(&bulk);
    assert_eq!(body["batch_reference"], json!("batch-0001"));
    assert_eq!(body["merchant_bears_cost"], json!(false));
    assert_eq!(body["payouts"][0]["bank_account"]["bank_code"], json!("033"));
    assert_eq!(body["payouts"][0]["type"], json!("bank_account"));
}

#[tokio::test]
async fn test_not_found_is_remote_error() {
    let client = client().await;

    let err = client.get_charge("missing-charge").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Remote);
    assert_eq!(err.status, Some(404));
    assert_eq!(err.detail, "Charge not found");
}

#[tokio::test]
async fn test_rejected_payload_never_reaches_server() {
    let client = client().await;
    let payload = ChargeViaBankTransferPayload::builder()
        .reference("order-00003")
        .customer(customer())
        .amount(10.0)
        .currency(Currency::Ngn)
        .metadata(Record::new())
        .build();

    let err = client.charge_via_bank_transfer(payload).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.status.is_none());
}
