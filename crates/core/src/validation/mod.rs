//! Rule-chain validation for submitted domain entities.
//!
//! A [`RuleChainValidator`] runs every registered check against a value and
//! collects all violations instead of stopping at the first failure, so a
//! client receives the complete list in one response. Entity validators for
//! activities, catches and small catches are built on top of it.

pub mod activity;
pub mod catch;
pub mod chain;
pub mod context;
pub mod rules;
pub mod small_catch;

pub use chain::{Check, RuleChainValidator, RuleContext};
pub use context::EntityContext;
pub use rules::{FieldViolation, ViolationCollector, ViolationSink};
