//! Locating the trigger binding of an invocation and its payload.

use crate::context::{BindingDefinition, InvocationContext};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Trigger binding types an adapter can read its input from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// `httpTrigger`
    Http,
    /// `queueTrigger`
    Queue,
    /// `blobTrigger`
    Blob,
    /// `eventHubTrigger`
    EventHub,
    /// `cosmosDBTrigger`
    CosmosDb,
}

impl TriggerKind {
    /// Every supported trigger.
    pub const ALL: [Self; 5] = [
        Self::Http,
        Self::Queue,
        Self::Blob,
        Self::EventHub,
        Self::CosmosDb,
    ];

    /// Binding type as declared in the function configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "httpTrigger",
            Self::Queue => "queueTrigger",
            Self::Blob => "blobTrigger",
            Self::EventHub => "eventHubTrigger",
            Self::CosmosDb => "cosmosDBTrigger",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerKind {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(TriggerError::NotSupported)
    }
}

/// The invocation does not carry a usable trigger payload.
///
/// Both variants are configuration errors: redelivering the same event will
/// fail the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriggerError {
    /// No supported `in` trigger binding is declared.
    #[error("Trigger not supported.")]
    NotSupported,

    /// The trigger is declared but nothing is bound under its name.
    #[error("Unable to find binding data")]
    BindingNotFound {
        /// Name of the trigger binding.
        binding_name: String,
        /// Trigger metadata of the invocation.
        binding_data: Map<String, Value>,
    },
}

/// The trigger binding of `ctx`: the last declared `in` binding whose type is
/// a [`TriggerKind`].
///
/// # Errors
///
/// Returns [`TriggerError::NotSupported`] when there is none.
pub fn function_trigger(ctx: &InvocationContext) -> Result<&BindingDefinition, TriggerError> {
    ctx.binding_definitions
        .iter()
        .rev()
        .find(|def| def.direction == "in" && def.type_.parse::<TriggerKind>().is_ok())
        .ok_or(TriggerError::NotSupported)
}

/// Payload bound to the trigger binding of `ctx`.
///
/// # Errors
///
/// Returns [`TriggerError::NotSupported`] when no trigger is declared and
/// [`TriggerError::BindingNotFound`] when nothing is bound under its name.
///
/// # Example
///
/// ```
/// use handler_kit_azure_func::{trigger_binding_data, BindingDefinition, InvocationContext};
/// use serde_json::json;
///
/// let ctx = InvocationContext::new("my-id", "Echo")
///     .with_binding_definition(BindingDefinition::input("queueTrigger", "str"))
///     .with_binding("str", json!("ping"));
///
/// assert_eq!(trigger_binding_data(&ctx).unwrap(), &json!("ping"));
/// ```
pub fn trigger_binding_data(ctx: &InvocationContext) -> Result<&Value, TriggerError> {
    let trigger = function_trigger(ctx)?;
    ctx.bindings
        .get(&trigger.name)
        .ok_or_else(|| TriggerError::BindingNotFound {
            binding_name: trigger.name.clone(),
            binding_data: ctx.binding_data.clone(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> InvocationContext {
        InvocationContext::new("my-id", "Greet")
    }

    #[test]
    fn test_returns_payload_of_trigger_binding() {
        let ctx = ctx()
            .with_binding_definition(BindingDefinition::input("queueTrigger", "foo"))
            .with_binding("foo", json!("TEST!"));

        assert_eq!(trigger_binding_data(&ctx).unwrap(), "TEST!");
    }

    #[test]
    fn test_no_definitions_is_not_supported() {
        assert_eq!(trigger_binding_data(&ctx()).unwrap_err(), TriggerError::NotSupported);
    }

    #[test]
    fn test_unsupported_and_output_bindings_are_ignored() {
        let ctx = ctx()
            .with_binding_definition(BindingDefinition::input("timerTrigger", "timer"))
            .with_binding_definition(BindingDefinition::output("queueTrigger", "out"))
            .with_binding("timer", json!({}));

        let err = trigger_binding_data(&ctx).unwrap_err();
        assert_eq!(err.to_string(), "Trigger not supported.");
    }

    #[test]
    fn test_last_declared_trigger_wins() {
        let ctx = ctx()
            .with_binding_definition(BindingDefinition::input("queueTrigger", "first"))
            .with_binding_definition(BindingDefinition::output("http", "res"))
            .with_binding_definition(BindingDefinition::input("blobTrigger", "second"))
            .with_binding("first", json!(1))
            .with_binding("second", json!(2));

        assert_eq!(function_trigger(&ctx).unwrap().name, "second");
        assert_eq!(trigger_binding_data(&ctx).unwrap(), 2);
    }

    #[test]
    fn test_missing_payload() {
        let ctx = ctx().with_binding_definition(BindingDefinition::input("httpTrigger", "req"));

        let err = trigger_binding_data(&ctx).unwrap_err();
        assert_eq!(err.to_string(), "Unable to find binding data");
        assert!(matches!(
            err,
            TriggerError::BindingNotFound { ref binding_name, ref binding_data }
                if binding_name == "req" && binding_data["invocationId"] == "my-id"
        ));
    }

    #[test]
    fn test_trigger_kind_names() {
        assert_eq!("cosmosDBTrigger".parse::<TriggerKind>().unwrap(), TriggerKind::CosmosDb);
        assert!("CosmosDBTrigger".parse::<TriggerKind>().is_err());
    }
}
