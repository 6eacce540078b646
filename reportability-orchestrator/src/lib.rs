//! # reportability-orchestrator
//!
//! The fixed agent roster (spec.md §4.5) and the Single/Sequential/
//! Concurrent orchestration strategies that drive it (spec.md §4.6),
//! built on top of `reportability-agent`'s kernel and
//! `reportability-tools`' registry.
//!
//! This crate owns:
//! - the dependency bundle (`OrchestratorDeps`) every tool call and agent
//!   invocation receives
//! - the delta type (`AgentDelta`) flowing out of an orchestrator run,
//!   consumed downstream by the stream framer (C1)
//! - the roster's concrete agents and tools
//! - the three orchestration strategies and the dispatch logic that
//!   picks one per request

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod concurrent;
mod deps;
mod delta;
mod extraction;
mod history;
mod knowledge;
mod orchestrator;
mod roster;
mod runner;
mod sequential;
mod single;
mod stream;
mod tools;

pub use deps::{ContextHandle, OrchestratorDeps};
pub use delta::AgentDelta;
pub use orchestrator::{resolve_orchestration_type, run, OrchestrationType};
pub use roster::Roster;
pub use stream::OrchestratorStream;
