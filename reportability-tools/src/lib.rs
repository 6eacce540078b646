//! # reportability-tools
//!
//! Tool system for reportability advisory agents: an explicit registry
//! of `{name, description, parameter schema, handler}` entries (spec.md
//! §9's redesign away from decorator-based tool registration), the
//! `RunContext` dependency carrier passed to every call, and the
//! `ToolError`/`ToolReturn` types a handler can produce.
//!
//! ## Core Concepts
//!
//! - **[`Tool`]**: trait for callable tools with typed parameters.
//! - **[`ToolRegistry`]**: register and look up tools by name.
//! - **[`ToolDefinition`]**: JSON Schema-based tool description sent to
//!   the chat backend.
//! - **[`RunContext`]**: execution context with dependencies passed to
//!   tools.
//! - **[`ToolReturn`]**: what a tool call produces on success.
//!
//! ## Defining Tools
//!
//! ```rust
//! use async_trait::async_trait;
//! use reportability_tools::{
//!     Tool, ToolDefinition, SchemaBuilder,
//!     RunContext, ToolResult, ToolReturn,
//! };
//!
//! struct EchoTool;
//!
//! #[async_trait]
//! impl Tool for EchoTool {
//!     fn definition(&self) -> ToolDefinition {
//!         ToolDefinition::new("echo", "Echo the input")
//!             .with_parameters(
//!                 SchemaBuilder::new()
//!                     .string("message", "Text to echo", true)
//!                     .build()
//!                     .expect("SchemaBuilder JSON serialization failed"),
//!             )
//!     }
//!
//!     async fn call(
//!         &self,
//!         _ctx: &RunContext,
//!         args: serde_json::Value,
//!     ) -> ToolResult {
//!         let message = args["message"].as_str().unwrap_or("");
//!         Ok(ToolReturn::text(message))
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod context;
pub mod definition;
pub mod errors;
pub mod registry;
pub mod return_types;
pub mod schema;
pub mod tool;

pub use context::RunContext;
pub use definition::{ObjectJsonSchema, ToolDefinition};
pub use errors::{ToolError, ToolErrorInfo};
pub use registry::{ToolProvider, ToolRegistry};
pub use return_types::{ToolResult, ToolReturn};
pub use schema::{PropertySchema, SchemaBuilder};
pub use tool::{BoxedTool, Tool};
