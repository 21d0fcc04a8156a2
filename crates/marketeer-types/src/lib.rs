//! Shared domain types for Marketeer.
//!
//! This crate contains the types used across the Marketeer workspace:
//! conversation messages, advisor request configuration, and the error
//! taxonomy for the completion turn loop.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod advisor;
pub mod error;
pub mod llm;
