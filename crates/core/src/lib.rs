//! Domain logic for salmon and sea trout catch returns.
//!
//! Pure logic only: no database or HTTP access. Persistence is reached
//! through the [`grilse::ProbabilityStore`] trait.

pub mod entities;
pub mod error;
pub mod grilse;
pub mod mass;
pub mod range_filter;
pub mod reference;
pub mod types;
pub mod validation;
