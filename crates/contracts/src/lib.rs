//! Wire contracts shared by the delivery-performance frontend.
//!
//! Everything here mirrors the JSON the API server actually sends:
//! table pages, SLA indicators, auth and user configuration. The
//! delivery-mark classification lives here too because both the import
//! aggregation and the client-side views agree on the same literals.

pub mod auth;
pub mod config;
pub mod error;
pub mod marks;
pub mod sla;
pub mod tables;
