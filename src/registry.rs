use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::protocol::ToolResult;

/// Operation signature advertised by `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// One invocable operation behind `tools/call`.
///
/// Implementations report their own failures through `ToolResult::error`;
/// producing a protocol-level error is not in their vocabulary.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn descriptor(&self) -> ToolDescriptor;
    async fn call(&self, arguments: Option<Value>) -> ToolResult;
}

/// Name-keyed tool table, advertised in insertion order.
///
/// Built once at start-up and never mutated afterwards. Names must be
/// unique; lookups return the first registration under a name.
pub struct ToolRegistry {
    entries: Vec<RegisteredTool>,
}

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: Box<dyn ToolHandler>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn register(&mut self, handler: Box<dyn ToolHandler>) {
        let descriptor = handler.descriptor();
        self.entries.push(RegisteredTool { descriptor, handler });
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolHandler> {
        self.entries
            .iter()
            .find(|entry| entry.descriptor.name == name)
            .map(|entry| entry.handler.as_ref())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
