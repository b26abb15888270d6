//! # Korapay
//!
//! An async client for the [Korapay](https://korapay.com) payment API: card,
//! bank transfer and mobile money collections, virtual bank accounts, payouts
//! and reference data.
//!
//! ## Components
//!
//! - **[`KorapayClient`]**: one method per API operation, each returning the
//!   canonical [`ApiResponse`](types::ApiResponse) envelope.
//! - **[`types`]**: request payloads (built with `bon` builders) and the
//!   reference enums [`Currency`](types::Currency), [`Country`](types::Country),
//!   [`PaymentChannel`](types::PaymentChannel) and
//!   [`MobileMoneyOperator`](types::MobileMoneyOperator).
//! - **[`core`]**: the transport layer the client is built on, re-exported
//!   from `korapay-core`.
//!
//! ## Credentials
//!
//! A client needs a public key, a secret key and an encryption key. Any key not
//! set on [`ClientConfig`](core::config::ClientConfig) is read from
//! `KORAPAY_PUBLIC_KEY`, `KORAPAY_SECRET_KEY` or `KORAPAY_ENCRYPTION_KEY`.
//!
//! ```no_run
//! use korapay::{
//!     KorapayClient,
//!     core::config::ClientConfig,
//!     types::{ChargeViaBankTransferPayload, Currency, Customer},
//! };
//!
//! # async fn run() -> korapay::core::errors::Result<()> {
//! let client = KorapayClient::new(
//!     ClientConfig::builder()
//!         .public_key("pk_test_xxx")
//!         .secret_key("sk_test_xxx")
//!         .build(),
//! )?;
//!
//! let response = client
//!     .charge_via_bank_transfer(
//!         ChargeViaBankTransferPayload::builder()
//!             .reference("order-00001")
//!             .customer(Customer::builder().email("ada@example.com").build())
//!             .amount(1000.0)
//!             .currency(Currency::Ngn)
//!             .build(),
//!     )
//!     .await?;
//!
//! if response.success {
//!     println!("{:?}", response.data);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Casing
//!
//! Payloads are written and responses are read in `camelCase`. Every key is
//! converted to `snake_case` on the way out and back on the way in, including
//! keys inside `metadata`.
//!
//! ## Errors
//!
//! Every failure is a [`korapay::core::errors::Error`](core::errors::Error):
//! missing credentials, rejected payloads, transport failures and non-2xx
//! answers alike. A 2xx answer whose body reports `"status": false` is not an
//! error; check [`ApiResponse::success`](types::ApiResponse::success).

pub mod core {
    pub mod case {
        pub use korapay_core::case::*;
    }

    pub mod cipher {
        pub use korapay_core::cipher::*;
    }

    pub mod config {
        pub use korapay_core::config::*;
    }

    pub mod errors {
        pub use korapay_core::errors::*;
    }

    pub mod transport {
        pub use korapay_core::transport::*;
    }
}

pub mod client;
pub mod types;

pub use client::KorapayClient;
