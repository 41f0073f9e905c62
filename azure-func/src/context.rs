//! The invocation context handed over by the functions runtime.
//!
//! Only the parts adapters read are modelled: identifiers, declared bindings,
//! bound payloads and the per-invocation log.

use handler_kit_logger::LogError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Target of the events written by [`TracingContextLog`].
pub const TARGET: &str = "handler_kit::azure";

/// Log levels of the runtime's context log. There is no fatal level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextLevel {
    /// Verbose output.
    Debug,
    /// Informational output.
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

/// Per-invocation log provided by the runtime.
pub trait ContextLog: Send + Sync {
    /// Write one formatted line.
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the line could not be written.
    fn write(&self, level: ContextLevel, line: &str) -> Result<(), LogError>;
}

/// Context log forwarding lines to `tracing`. Used when the runtime does not
/// provide one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingContextLog;

impl ContextLog for TracingContextLog {
    fn write(&self, level: ContextLevel, line: &str) -> Result<(), LogError> {
        match level {
            ContextLevel::Debug => tracing::debug!(target: TARGET, "{line}"),
            ContextLevel::Info => tracing::info!(target: TARGET, "{line}"),
            ContextLevel::Warn => tracing::warn!(target: TARGET, "{line}"),
            ContextLevel::Error => tracing::error!(target: TARGET, "{line}"),
        }
        Ok(())
    }
}

/// In-memory context log collecting the lines of one invocation.
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: Mutex<Vec<(ContextLevel, String)>>,
}

impl LogBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line written so far, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<(ContextLevel, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Number of lines written at `level`.
    #[must_use]
    pub fn count_at(&self, level: ContextLevel) -> usize {
        self.lines().iter().filter(|(l, _)| *l == level).count()
    }
}

impl ContextLog for LogBuffer {
    fn write(&self, level: ContextLevel, line: &str) -> Result<(), LogError> {
        self.lines
            .lock()
            .map_err(|_| LogError::Sink("log buffer poisoned".to_string()))?
            .push((level, line.to_string()));
        Ok(())
    }
}

fn default_log() -> Arc<dyn ContextLog> {
    Arc::new(TracingContextLog)
}

/// A binding declared in the function's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingDefinition {
    /// Binding type, e.g. `httpTrigger` or `queue`.
    #[serde(rename = "type")]
    pub type_: String,
    /// `in` or `out`.
    pub direction: String,
    /// Name under which the payload is bound.
    pub name: String,
}

impl BindingDefinition {
    /// An input binding.
    #[must_use]
    pub fn input(type_: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            direction: "in".to_string(),
            name: name.into(),
        }
    }

    /// An output binding.
    #[must_use]
    pub fn output(type_: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            direction: "out".to_string(),
            name: name.into(),
        }
    }
}

/// One invocation of a function.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext {
    /// Unique id of this invocation.
    pub invocation_id: String,
    /// Name of the invoked function.
    pub function_name: String,
    /// Bindings declared by the function.
    #[serde(default)]
    pub binding_definitions: Vec<BindingDefinition>,
    /// Bound payloads, by binding name.
    #[serde(default)]
    pub bindings: Map<String, Value>,
    /// Trigger metadata.
    #[serde(default)]
    pub binding_data: Map<String, Value>,
    #[serde(skip, default = "default_log")]
    log: Arc<dyn ContextLog>,
}

impl InvocationContext {
    /// A context with no bindings, logging through `tracing`.
    #[must_use]
    pub fn new(invocation_id: impl Into<String>, function_name: impl Into<String>) -> Self {
        let invocation_id = invocation_id.into();
        let mut binding_data = Map::new();
        binding_data.insert("invocationId".to_string(), Value::from(invocation_id.clone()));

        Self {
            invocation_id,
            function_name: function_name.into(),
            binding_definitions: Vec::new(),
            bindings: Map::new(),
            binding_data,
            log: default_log(),
        }
    }

    /// Declare a binding.
    #[must_use]
    pub fn with_binding_definition(mut self, definition: BindingDefinition) -> Self {
        self.binding_definitions.push(definition);
        self
    }

    /// Bind a payload.
    #[must_use]
    pub fn with_binding(mut self, name: impl Into<String>, payload: Value) -> Self {
        self.bindings.insert(name.into(), payload);
        self
    }

    /// Replace the context log.
    #[must_use]
    pub fn with_log(mut self, log: Arc<dyn ContextLog>) -> Self {
        self.log = log;
        self
    }

    /// The context log.
    #[must_use]
    pub fn log(&self) -> Arc<dyn ContextLog> {
        Arc::clone(&self.log)
    }
}

impl fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("invocation_id", &self.invocation_id)
            .field("function_name", &self.function_name)
            .field("binding_definitions", &self.binding_definitions)
            .field("bindings", &self.bindings)
            .field("binding_data", &self.binding_data)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_from_runtime_payload() {
        let ctx: InvocationContext = serde_json::from_value(json!({
            "invocationId": "my-id",
            "functionName": "Greet",
            "bindingDefinitions": [
                { "type": "queueTrigger", "direction": "in", "name": "foo" }
            ],
            "bindings": { "foo": "TEST!" },
            "bindingData": { "invocationId": "my-id" },
        }))
        .unwrap();

        assert_eq!(ctx.function_name, "Greet");
        assert_eq!(
            ctx.binding_definitions,
            [BindingDefinition::input("queueTrigger", "foo")]
        );
        assert_eq!(ctx.bindings["foo"], "TEST!");
        assert!(ctx.log().write(ContextLevel::Info, "hello").is_ok());
    }

    #[test]
    fn test_log_buffer_collects_lines() {
        let buffer = Arc::new(LogBuffer::new());
        let ctx = InvocationContext::new("my-id", "Greet").with_log(buffer.clone());

        ctx.log().write(ContextLevel::Warn, "careful").unwrap();
        ctx.log().write(ContextLevel::Error, "failed").unwrap();

        assert_eq!(
            buffer.lines(),
            [
                (ContextLevel::Warn, "careful".to_string()),
                (ContextLevel::Error, "failed".to_string()),
            ]
        );
        assert_eq!(buffer.count_at(ContextLevel::Error), 1);
    }
}
