//! # reportability-service
//!
//! The HTTP binary boundary: configuration loading and telemetry
//! bootstrap (C10), concrete `ChatBackend`/`SearchBackend` adapters over
//! Azure OpenAI and Azure AI Search, and the `POST /chat/stream` /
//! `GET /health` Axum router (C7, C9).
//!
//! The actual C1–C6, C8 engine lives in `reportability-core`,
//! `reportability-search`, `reportability-tools`, `reportability-agent`,
//! `reportability-orchestrator`, and `reportability-streaming`; this
//! crate only wires them to a process and a socket.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod clients;
pub mod config;
pub mod server;
pub mod telemetry;

pub use clients::{AzureChatBackend, AzureSearchBackend};
pub use config::{AppConfig, ChatBackendConfig};
pub use server::{router, AppState};
