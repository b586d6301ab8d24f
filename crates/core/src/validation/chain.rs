//! The rule-chain engine: ordered, non-short-circuiting checks.

use std::ops::Deref;

use super::rules::{FieldViolation, ViolationSink};

/// A single check. Returns `false` when the value is invalid, after
/// recording at least one violation through the [`RuleContext`].
pub type Check<T, C> = fn(&T, &mut RuleContext<'_, C>) -> bool;

/// The context handed to each check: the caller's sink plus the validator's
/// code prefix.
pub struct RuleContext<'a, C> {
    prefix: &'static str,
    inner: &'a mut C,
}

impl<C: ViolationSink> RuleContext<'_, C> {
    /// Record `{prefix}_{suffix}` at `path` and return `false`, so a check
    /// can end with `return ctx.reject(..)`.
    pub fn reject(&mut self, suffix: &str, path: impl Into<String>) -> bool {
        self.inner.record(FieldViolation {
            code: format!("{}_{}", self.prefix, suffix),
            path: path.into(),
        });
        false
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }
}

impl<C> Deref for RuleContext<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.inner
    }
}

/// Runs every registered check against a value, in registration order.
pub struct RuleChainValidator<T, C> {
    prefix: &'static str,
    checks: Vec<Check<T, C>>,
}

impl<T, C: ViolationSink> RuleChainValidator<T, C> {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            checks: Vec::new(),
        }
    }

    /// Append a check to the chain.
    pub fn check(mut self, check: Check<T, C>) -> Self {
        self.checks.push(check);
        self
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Run all checks, never short-circuiting, and return whether every one
    /// passed.
    pub fn is_valid(&self, value: &T, ctx: &mut C) -> bool {
        let mut rule_ctx = RuleContext {
            prefix: self.prefix,
            inner: ctx,
        };
        self.checks
            .iter()
            .fold(true, |valid, check| check(value, &mut rule_ctx) && valid)
    }
}
