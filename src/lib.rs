//! Signed Ethereum JSON-RPC client.
//!
//! Holds a provider and an optional private key, and exposes address
//! resolution, storage reads, message signing, read-only contract calls and
//! legacy transaction submission.

pub mod blockchain;
pub mod config;
pub mod observability;

pub use blockchain::{ChainError, KeyStatus, MessageSignature, SignedChainClient, StartupError, Wallet};
pub use config::ClientConfig;
