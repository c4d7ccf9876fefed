//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply ETH_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → passed by value to SignedChainClient
//! ```
//!
//! The private key never lives in `ClientConfig`; it is read from
//! `ETH_PRIVATE_KEY` by the wallet and handed to the client separately.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ClientConfig;
pub use validation::{validate_config, ValidationError};
