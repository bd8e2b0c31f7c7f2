//! Publication of fragment data models into the global scope.

use serde::Serialize;
use serde_json::Value;

use crate::scope::{GlobalScope, ScopeBinding};

/// Publishes fragment models under caller-chosen global names.
///
/// Two fragments choosing the same name overwrite each other; the last
/// write wins and the overwrite is logged.
#[derive(Debug, Clone)]
pub struct VariableBroadcaster<S> {
    scope: S,
}

impl<S: GlobalScope> VariableBroadcaster<S> {
    pub fn new(scope: S) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &S {
        &self.scope
    }

    /// Make `model` readable under `variable`.
    pub fn publish(&self, fragment: &str, variable: &str, model: Value) {
        let binding = ScopeBinding {
            owner: fragment.to_string(),
            value: model,
        };

        match self.scope.assign(variable, binding) {
            Some(previous) if previous.owner != fragment => {
                tracing::warn!(
                    variable,
                    fragment,
                    previous_owner = %previous.owner,
                    "Global variable overwritten by another fragment"
                );
            }
            _ => tracing::debug!(variable, fragment, "Fragment variable published"),
        }
    }

    /// Serialize `model` and publish it.
    pub fn publish_serialized<T>(
        &self,
        fragment: &str,
        variable: &str,
        model: &T,
    ) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(model)?;
        self.publish(fragment, variable, value);
        Ok(())
    }
}
