//! # omniroute-core
//!
//! Core types and utilities for Omniroute.
//!
//! This crate provides the shared vocabulary used across all Omniroute
//! crates:
//!
//! - **Types**: channels, priorities, recipient contexts, message content
//! - **Utilities**: ID generation

pub mod id;
pub mod types;

// Re-exports for convenience
pub use types::*;
