//! Runtime evaluation of fragment conditions.

use std::collections::HashSet;

/// Decides whether a conditionally rendered fragment renders.
pub trait ConditionEvaluator {
    /// Returns true if the fragment's `if` expression holds.
    fn evaluate(&self, fragment: &str, expression: &str) -> bool;
}

impl<F> ConditionEvaluator for F
where
    F: Fn(&str, &str) -> bool,
{
    fn evaluate(&self, fragment: &str, expression: &str) -> bool {
        self(fragment, expression)
    }
}

/// Evaluates expressions against a fixed set of true flags.
///
/// The literals `true` and `false` are understood directly; any other
/// expression holds only if it is one of the configured flags.
#[derive(Debug, Clone, Default)]
pub struct FlagConditions {
    flags: HashSet<String>,
}

impl FlagConditions {
    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    /// Mark another expression as true.
    pub fn set(&mut self, flag: impl Into<String>) {
        self.flags.insert(flag.into());
    }
}

impl ConditionEvaluator for FlagConditions {
    fn evaluate(&self, _fragment: &str, expression: &str) -> bool {
        match expression.trim() {
            "true" => true,
            "false" => false,
            other => self.flags.contains(other),
        }
    }
}
