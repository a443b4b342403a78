//! End-to-end scenario tests for Vitae.
//!
//! The tests drive the real web-client router in process and point it at an
//! in-memory stand-in for the résumé backend:
//!
//! - [`stub::StubBackend`] implements the backend REST contract (token
//!   issuance, résumé CRUD, PDF rendering) on an ephemeral port, with a
//!   switch to invalidate all issued tokens so expiry handling can be
//!   exercised deterministically.
//! - [`client::TestClient`] sends requests through the full middleware
//!   stack via `tower::ServiceExt::oneshot`, carrying cookies between
//!   requests like a browser would.
//!
//! Run with: cargo test -p vitae-integration-tests

pub mod client;
pub mod stub;

pub use client::{TestClient, TestResponse};
pub use stub::StubBackend;
