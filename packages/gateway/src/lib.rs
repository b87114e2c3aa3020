//! # Gateway crate: REST client for the hosted backend
//!
//! Implements every repository trait from [`guide::gateway`] against a
//! Supabase project: PostgREST for tables and the auth API for the signed-in
//! user.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Project URL and anonymous key from the environment (`dotenvy` on native, compile-time on wasm) |
//! | [`rest`] | PostgREST query-string builder |
//! | [`client`] | [`SupabaseGateway`], the reqwest-backed implementation |
//! | [`error`] | [`ClientError`] and its mapping onto [`guide::GatewayError`] |

pub mod client;
pub mod config;
pub mod error;
pub mod rest;

pub use client::SupabaseGateway;
pub use config::GatewayConfig;
pub use error::ClientError;
