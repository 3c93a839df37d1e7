//! Outbound HTTPS client layer with request signing.
//!
//! Request-handling code uses this crate to call external HTTPS services and
//! to compute the signatures and hashes that authenticate those calls
//! (signed webhooks, bearer-token construction, password hashing).
//!
//! # Architecture Overview
//!
//! ```text
//!  caller ──▶ Dispatcher ──▶ RequestCache ──▶ TransportClient ──▶ network
//!                │   (mutating verbs)  │            │
//!                │                     │      HeaderSet + ResponseBuffer
//!                │                     ◀── store ───┘
//!                └──▶ signing (rs256 / hs256 / scrypt) ──▶ ByteSignature
//! ```
//!
//! Per-unit-of-work state (the reusable connection, the last observed status
//! code, the single-slot retry cache) lives in a [`RequestContext`] passed
//! `&mut` into every dispatch call. The only process-wide state is the
//! HTTPS-only policy flag behind [`allow_http`].

// Core subsystems
pub mod config;
pub mod context;
pub mod dispatch;
pub mod http;
pub mod signing;

// Cross-cutting concerns
pub mod observability;

pub use config::EgressConfig;
pub use context::RequestContext;
pub use dispatch::Dispatcher;
pub use http::policy::allow_http;
pub use http::{HeaderSet, HttpError};
pub use signing::scrypt::scrypt;
pub use signing::{sign_hs256, sign_rs256, ByteSignature, SigningError};
