//! Row structs for the persisted tables.
//!
//! Each submodule holds a `FromRow` struct matching the database row and
//! the conversion into the corresponding `salmon-core` type.

pub mod gate;
pub mod grilse_probability;
