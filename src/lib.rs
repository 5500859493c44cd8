//! Session/auth core of the clinic portal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three pieces: the edge route guard deciding pass/redirect per request, the
//! client session store holding authenticated state and decoded claims for
//! one user scope, and the OAuth code-exchange flow behind the identity
//! provider's redirect. The gateway binary wires them into an Axum service;
//! embedding clients use the service modules directly.
//!
//! Decoded claims are display/UX data only. Nothing in this crate verifies a
//! credential's signature or expiry; authorization lives with the backing
//! API.

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
