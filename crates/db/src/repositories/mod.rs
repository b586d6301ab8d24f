//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! an executor (`&PgPool`, or `&mut *tx` inside a transaction) as the first
//! argument.

pub mod gate_repo;
pub mod grilse_probability_repo;
pub mod reference_repo;

pub use gate_repo::GateRepo;
pub use grilse_probability_repo::GrilseProbabilityRepo;
pub use reference_repo::ReferenceRepo;
