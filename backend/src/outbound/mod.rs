//! Outbound adapters implementing the driven ports.
//!
//! - **memory**: in-process repositories for development and tests
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **openai**: chat-completions recipe generator
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod openai;
pub mod persistence;
