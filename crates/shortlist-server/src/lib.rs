//! Shortlist HTTP server library (used by the `shortlist` binary and
//! integration tests).
//!
//! [`gateway`] carries the Axum router, handlers, and the user-facing
//! error taxonomy. [`client`] is the resilient submit client that the
//! service's UI collaborator builds on.

pub mod client;
pub mod gateway;
