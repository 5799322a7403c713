//! Shared types and models for CropGuard
//!
//! This crate holds the domain model and the pure decision logic (pest-risk
//! classification, community filtering, offline advisory replies) shared
//! between the backend and the browser (via WASM).

pub mod models;
pub mod session;
pub mod types;
pub mod validation;

pub use models::*;
pub use session::*;
pub use types::*;
pub use validation::*;
