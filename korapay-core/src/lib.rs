//! Korapay core library.
//!
//! The request/response transport layer of the Korapay SDK:
//!
//! - **[`transport`]**: [`transport::TransportClient`], the open and secure HTTP sessions and the
//!   [`transport::Transport`] trait the API surface is written against.
//! - **[`case`]**: recursive `camelCase` ⇄ `snake_case` key rewriting applied to every body.
//! - **[`cipher`]**: AES-GCM encryption of card payloads.
//! - **[`errors`]**: the normalized [`errors::Error`] every operation fails with.
//! - **[`config`]**: client configuration and credential resolution.
//! - **[`types`]**: the canonical [`types::ApiResponse`] envelope and shared aliases.

pub mod case;
pub mod cipher;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;
