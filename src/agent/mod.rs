//! Agent runtime modules.
//!
//! This module provides the outbound client for the remote
//! credit-scoring agent.

pub mod client;

pub use client::{AgentClient, AgentError};
