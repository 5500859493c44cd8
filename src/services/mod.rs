//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the session/auth logic so route handlers can stay
//! focused on protocol translation: credential decoding, the session state
//! container, and the code-exchange flow all live here.

pub mod exchange;
pub mod session;
pub mod token;
