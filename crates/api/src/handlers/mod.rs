//! Request handlers.
//!
//! Handlers delegate to `salmon_core` for domain logic and map errors via
//! [`AppError`](crate::error::AppError).

pub mod gates;
pub mod grilse;
pub mod validation;
