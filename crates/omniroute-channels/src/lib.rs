//! Outbound channel orchestration for Omniroute.
//!
//! Given a message that must reach a recipient, this crate decides which
//! channel to use (SMS, email, WhatsApp, Telegram), attempts delivery through
//! a caller-supplied sender, and falls back once to the next-ranked channel
//! on failure. Transport adapters live in the hosting application; the
//! orchestrator only sees the [`ChannelSender`] contract.

pub mod availability;
pub mod decision;
pub mod dispatch;
pub mod error;
pub mod quiet_hours;
pub mod scoring;
pub mod traits;

pub use decision::{AlternativeChannel, RoutingDecision};
pub use dispatch::{
    ChannelOrchestrator, DeliveryObserver, DispatchConfig, OrchestratorBuilder, SendResult,
};
pub use error::{RouteError, SenderError};
pub use scoring::ChannelEvaluation;
pub use traits::{ChannelSender, SendReceipt};

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, RouteError>;
