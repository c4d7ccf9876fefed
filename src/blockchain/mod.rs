//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (ETH_RPC, ETH_PRIVATE_KEY, ...)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection, read-only mode, pass-through calls)
//!     → transaction.rs (build and encode legacy transactions)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables or explicit arguments
//! - Never log private keys or sensitive data
//! - RPC calls are bounded by the configured timeout

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::SignedChainClient;
pub use types::{ChainError, ChainResult, KeyStatus, MessageSignature, StartupError};
pub use wallet::Wallet;
